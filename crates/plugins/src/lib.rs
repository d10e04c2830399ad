#![deny(missing_docs)]
//! htmlssr plugins: server-side rendering, HTML formatting, and output copying.
//!
//! Each factory returns a [`PluginDescriptor`] for the host to register:
//!
//! - [`ssr_render`] at `transformIndexHtml`, rendering the document as a template;
//! - [`format_html`] at `transformIndexHtml`, reformatting the document;
//! - [`copy_dir`] at `writeBundle`, replacing a directory with the build output.

/// Output directory copy plugin.
pub mod copy;
/// HTML formatter plugin.
pub mod format;
/// Template renderers (trait and built-in directive renderer).
pub mod renderer;
/// Server-side render plugin.
pub mod ssr;

pub use copy::{
    COPY_FAILURE_PREFIX, COPY_PLUGIN_NAME, CopyOptions, FailurePolicy, copy_dir, copy_dir_with,
    settle_copy,
};
pub use format::{FORMAT_PLUGIN_NAME, HtmlFormatter, format_html};
pub use htmlssr_core::{
    CopySpec, FormatOptions, Pipeline, PluginDescriptor, PluginError, RenderContext, RenderRoot,
    strip_marker_comments,
};
pub use renderer::{DirectiveRenderer, TemplateRenderer};
pub use ssr::{SSR_PLUGIN_NAME, ssr_render, ssr_render_default};
