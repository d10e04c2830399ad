//! `v-if`, `v-text`, and `v-html` element directives, applied with lol_html.

use super::expr::{display_value, is_truthy, parse_condition, parse_path};
use htmlssr_core::{RenderError, RenderRoot};
use lol_html::errors::RewritingError;
use lol_html::html_content::ContentType;
use lol_html::{ElementContentHandlers, RewriteStrSettings, Selector, element, rewrite_str};
use std::borrow::Cow;

/// Placeholder left where a `v-if` element was dropped.
pub const EMPTY_PLACEHOLDER: &str = "<!---->";

const V_IF: &str = "v-if";
const V_TEXT: &str = "v-text";
const V_HTML: &str = "v-html";

type Handler<'h> = (Cow<'static, Selector>, ElementContentHandlers<'h>);

/// Applies every directive in `html` against the data in `root`.
pub(crate) fn apply_directives(html: &str, root: &RenderRoot) -> Result<String, RenderError> {
    if !html.contains("v-") {
        return Ok(html.to_string());
    }

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: directive_handlers(root),
            ..RewriteStrSettings::new()
        },
    )
    .map_err(into_render_error)
}

/// Handlers run in order: conditionals first so dropped elements skip the rest.
fn directive_handlers(root: &RenderRoot) -> Vec<Handler<'_>> {
    vec![v_if_handler(root), v_text_handler(root), v_html_handler(root)]
}

fn v_if_handler(root: &RenderRoot) -> Handler<'_> {
    element!("[v-if]", move |el| {
        let expression = el.get_attribute(V_IF).unwrap_or_default();
        let (negated, path) = parse_condition(&expression)?;
        el.remove_attribute(V_IF);
        if is_truthy(root.lookup(path)) == negated {
            el.replace(EMPTY_PLACEHOLDER, ContentType::Html);
        }
        Ok(())
    })
}

fn v_text_handler(root: &RenderRoot) -> Handler<'_> {
    element!("[v-text]", move |el| {
        if el.removed() {
            return Ok(());
        }
        let expression = el.get_attribute(V_TEXT).unwrap_or_default();
        let path = parse_path(&expression)?;
        el.remove_attribute(V_TEXT);
        el.set_inner_content(&display_value(root.lookup(path)), ContentType::Text);
        Ok(())
    })
}

fn v_html_handler(root: &RenderRoot) -> Handler<'_> {
    element!("[v-html]", move |el| {
        if el.removed() {
            return Ok(());
        }
        let expression = el.get_attribute(V_HTML).unwrap_or_default();
        let path = parse_path(&expression)?;
        el.remove_attribute(V_HTML);
        el.set_inner_content(&display_value(root.lookup(path)), ContentType::Html);
        Ok(())
    })
}

fn into_render_error(err: RewritingError) -> RenderError {
    match err {
        RewritingError::ContentHandlerError(inner) => match inner.downcast::<RenderError>() {
            Ok(render) => *render,
            Err(other) => RenderError::Rewrite(other.to_string()),
        },
        other => RenderError::Rewrite(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htmlssr_core::RenderContext;
    use serde_json::json;

    fn render(html: &str, data: serde_json::Value) -> Result<String, RenderError> {
        let root = RenderRoot::new(html, RenderContext::from_json(data));
        apply_directives(html, &root)
    }

    #[test]
    fn v_if_keeps_truthy_and_drops_falsy() {
        let out = render(
            r#"<div><p v-if="show">yes</p><p v-if="hide">no</p><p v-if="!hide">neg</p></div>"#,
            json!({ "show": true, "hide": 0 }),
        )
        .unwrap();
        insta::assert_snapshot!(out, @"<div><p>yes</p><!----><p>neg</p></div>");
    }

    #[test]
    fn v_text_escapes_and_v_html_does_not() {
        let out = render(
            r#"<h1 v-text="title">placeholder</h1><div v-html="body"></div>"#,
            json!({ "title": "Tom & Jerry <3", "body": "<em>hi</em>" }),
        )
        .unwrap();
        insta::assert_snapshot!(out, @"<h1>Tom &amp; Jerry &lt;3</h1><div><em>hi</em></div>");
    }

    #[test]
    fn dropped_element_ignores_other_directives() {
        let out = render(
            r#"<p v-if="missing" v-text="also.missing"></p>"#,
            json!({}),
        )
        .unwrap();
        assert_eq!(out, EMPTY_PLACEHOLDER);
    }

    #[test]
    fn bad_expression_surfaces_render_error() {
        let err = render(r#"<p v-text="a || b"></p>"#, json!({})).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedExpression { .. }));
    }

    #[test]
    fn untouched_without_directives() {
        let html = "<!DOCTYPE html><html><body><p class=\"v\">x</p></body></html>";
        assert_eq!(render(html, json!({})).unwrap(), html);
    }
}
