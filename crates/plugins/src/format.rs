//! Reformats the final HTML document with an injected formatter.

use futures::FutureExt;
use htmlssr_core::{FormatError, FormatOptions, PluginDescriptor, PluginError};
use std::sync::Arc;

/// Name the format plugin registers under.
pub const FORMAT_PLUGIN_NAME: &str = "vite-plugin-html-vue-ssr-prettier";

/// Formats an HTML document.
///
/// `options` always carries `parser = "html"`.
pub trait HtmlFormatter: Send + Sync {
    /// Returns `source` reformatted according to `options`.
    fn format(&self, source: &str, options: &FormatOptions) -> Result<String, FormatError>;
}

impl<F> HtmlFormatter for F
where
    F: Fn(&str, &FormatOptions) -> Result<String, FormatError> + Send + Sync,
{
    fn format(&self, source: &str, options: &FormatOptions) -> Result<String, FormatError> {
        self(source, options)
    }
}

/// Creates a plugin that passes the document through `formatter`.
///
/// The caller's `options` are merged with a forced HTML parser selection once,
/// at creation. Formatter errors are returned to the host unchanged.
pub fn format_html<F>(options: FormatOptions, formatter: F) -> PluginDescriptor
where
    F: HtmlFormatter + 'static,
{
    let options = Arc::new(options.with_html_parser());
    let formatter = Arc::new(formatter);

    PluginDescriptor::transform_index_html(FORMAT_PLUGIN_NAME, move |html| {
        let result = formatter
            .format(&html, &options)
            .map_err(PluginError::from);
        async move { result }.boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use htmlssr_core::HTML_PARSER;
    use serde_json::json;
    use std::sync::Mutex;

    async fn run(plugin: &PluginDescriptor, html: &str) -> Result<String, PluginError> {
        plugin
            .call_transform_index_html(html.to_string())
            .expect("transform hook")
            .await
    }

    #[tokio::test]
    async fn parser_is_forced_to_html() {
        let seen: Arc<Mutex<Vec<FormatOptions>>> = Arc::default();
        let recorder = Arc::clone(&seen);
        let plugin = format_html(
            FormatOptions::from_json(json!({ "parser": "babel", "printWidth": 100 })),
            move |source: &str, options: &FormatOptions| -> Result<String, FormatError> {
                recorder.lock().unwrap().push(options.clone());
                Ok(source.to_uppercase())
            },
        );

        let out = run(&plugin, "<p>hi</p>").await.unwrap();
        assert_eq!(out, "<P>HI</P>");

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].parser(), Some(HTML_PARSER));
        assert_eq!(seen[0].get("printWidth"), Some(&json!(100)));
    }

    #[tokio::test]
    async fn default_options_still_select_html() {
        let plugin = format_html(
            FormatOptions::default(),
            |source: &str, options: &FormatOptions| -> Result<String, FormatError> {
                Ok(format!("{}:{}", options.parser().unwrap_or("none"), source))
            },
        );
        assert_eq!(plugin.name(), "vite-plugin-html-vue-ssr-prettier");
        assert_eq!(run(&plugin, "x").await.unwrap(), "html:x");
    }

    #[tokio::test]
    async fn formatter_errors_propagate() {
        let plugin = format_html(
            FormatOptions::new(),
            |_: &str, _: &FormatOptions| -> Result<String, FormatError> {
                Err(FormatError::parse("Unexpected closing tag \"div\""))
            },
        );

        let err = run(&plugin, "<p></div>").await.unwrap_err();
        assert!(matches!(
            err,
            PluginError::Format(FormatError::Parse { ref message }) if message.contains("closing tag")
        ));
    }
}
