//! Template renderers used by the SSR plugin.
//!
//! [`TemplateRenderer`] is the seam: any server renderer can sit behind it.
//! [`DirectiveRenderer`] is the built-in implementation covering the template
//! syntax static index pages need:
//!
//! - `{{ path }}` interpolation (escaped; skipped inside comments, `<script>` and `<style>`),
//! - `v-text` / `v-html` to fill an element,
//! - `v-if` (optionally negated with `!`) to keep or drop an element.
//!
//! Dropped elements leave an empty `<!---->` comment behind, matching what
//! framework server renderers emit; the SSR plugin strips it afterwards.

mod directives;
mod expr;
mod interpolate;

use async_trait::async_trait;
use htmlssr_core::{RenderError, RenderRoot};

pub use directives::EMPTY_PLACEHOLDER;

/// Converts a template plus data into fully resolved markup.
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    /// Renders `root.template` against `root.data`.
    async fn render(&self, root: RenderRoot) -> Result<String, RenderError>;
}

/// Built-in renderer for interpolation and `v-if`/`v-text`/`v-html` directives.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveRenderer;

impl DirectiveRenderer {
    /// Creates the renderer.
    pub fn new() -> Self {
        Self
    }

    /// Renders synchronously.
    pub fn render_str(&self, root: &RenderRoot) -> Result<String, RenderError> {
        let interpolated = interpolate::interpolate(root)?;
        directives::apply_directives(&interpolated, root)
    }
}

#[async_trait]
impl TemplateRenderer for DirectiveRenderer {
    async fn render(&self, root: RenderRoot) -> Result<String, RenderError> {
        self.render_str(&root)
    }
}
