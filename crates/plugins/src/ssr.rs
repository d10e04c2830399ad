//! Server-side renders the final HTML document.

use crate::renderer::{DirectiveRenderer, TemplateRenderer};
use futures::FutureExt;
use htmlssr_core::{
    PluginDescriptor, PluginError, RenderContext, RenderRoot, TEMPLATE_KEY, strip_marker_comments,
};
use std::sync::Arc;

/// Name the SSR plugin registers under.
pub const SSR_PLUGIN_NAME: &str = "vite-plugin-html-vue-ssr";

/// Creates a plugin that renders the document with `renderer` and strips marker comments.
///
/// The document itself is the template; `context` supplies the component data.
/// A `template` key in `context` is ignored with a warning so it can never
/// replace the document. Renderer errors are returned to the host unchanged.
pub fn ssr_render<R>(context: RenderContext, renderer: R) -> PluginDescriptor
where
    R: TemplateRenderer + 'static,
{
    let context = Arc::new(without_reserved_key(context));
    let renderer = Arc::new(renderer);

    PluginDescriptor::transform_index_html(SSR_PLUGIN_NAME, move |html| {
        let context = Arc::clone(&context);
        let renderer = Arc::clone(&renderer);
        async move {
            let root = RenderRoot::new(html, RenderContext::clone(&context));
            let page = renderer.render(root).await?;
            Ok::<_, PluginError>(strip_marker_comments(&page))
        }
        .boxed()
    })
}

/// [`ssr_render`] with the built-in [`DirectiveRenderer`].
pub fn ssr_render_default(context: RenderContext) -> PluginDescriptor {
    ssr_render(context, DirectiveRenderer::new())
}

fn without_reserved_key(mut context: RenderContext) -> RenderContext {
    if context.take_reserved().is_some() {
        log::warn!(
            "render context key `{}` is reserved for the document and was ignored",
            TEMPLATE_KEY
        );
    }
    context
}
