//! Plugin descriptors and the host-side driver that invokes them.

use crate::error::PluginError;
use futures::future::BoxFuture;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Future returned by every lifecycle hook.
pub type HookFuture<T> = BoxFuture<'static, Result<T, PluginError>>;

/// Callback for the "transform final HTML" stage.
pub type TransformIndexHtmlFn = Arc<dyn Fn(String) -> HookFuture<String> + Send + Sync>;

/// Callback for the post-write stage.
pub type WriteBundleFn = Arc<dyn Fn() -> HookFuture<()> + Send + Sync>;

/// Build lifecycle stages a plugin can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookStage {
    /// Invoked with the final HTML document; returns its replacement.
    TransformIndexHtml,
    /// Invoked once after the build output has been written.
    WriteBundle,
}

impl HookStage {
    /// Hook name as bundlers spell it.
    pub fn as_str(self) -> &'static str {
        match self {
            HookStage::TransformIndexHtml => "transformIndexHtml",
            HookStage::WriteBundle => "writeBundle",
        }
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single lifecycle callback a plugin registers.
#[derive(Clone)]
pub enum Hook {
    /// See [`HookStage::TransformIndexHtml`].
    TransformIndexHtml(TransformIndexHtmlFn),
    /// See [`HookStage::WriteBundle`].
    WriteBundle(WriteBundleFn),
}

impl Hook {
    /// Stage this hook runs at.
    pub fn stage(&self) -> HookStage {
        match self {
            Hook::TransformIndexHtml(_) => HookStage::TransformIndexHtml,
            Hook::WriteBundle(_) => HookStage::WriteBundle,
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hook").field(&self.stage()).finish()
    }
}

/// A named plugin with one lifecycle hook, as handed to the host.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    name: Cow<'static, str>,
    hook: Hook,
}

impl PluginDescriptor {
    /// Creates a plugin that rewrites the final HTML document.
    pub fn transform_index_html<F>(name: impl Into<Cow<'static, str>>, hook: F) -> Self
    where
        F: Fn(String) -> HookFuture<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            hook: Hook::TransformIndexHtml(Arc::new(hook)),
        }
    }

    /// Creates a plugin that runs after the build output is written.
    pub fn write_bundle<F>(name: impl Into<Cow<'static, str>>, hook: F) -> Self
    where
        F: Fn() -> HookFuture<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            hook: Hook::WriteBundle(Arc::new(hook)),
        }
    }

    /// Plugin name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The registered hook.
    pub fn hook(&self) -> &Hook {
        &self.hook
    }

    /// Stage the hook runs at.
    pub fn stage(&self) -> HookStage {
        self.hook.stage()
    }

    /// Invokes the transform hook, or returns `None` if this plugin has none.
    pub fn call_transform_index_html(&self, html: String) -> Option<HookFuture<String>> {
        match &self.hook {
            Hook::TransformIndexHtml(hook) => Some(hook(html)),
            Hook::WriteBundle(_) => None,
        }
    }

    /// Invokes the post-write hook, or returns `None` if this plugin has none.
    pub fn call_write_bundle(&self) -> Option<HookFuture<()>> {
        match &self.hook {
            Hook::WriteBundle(hook) => Some(hook()),
            Hook::TransformIndexHtml(_) => None,
        }
    }
}

/// Minimal host: runs registered plugins stage by stage in registration order.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    plugins: Vec<PluginDescriptor>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plugin.
    pub fn register(&mut self, plugin: PluginDescriptor) -> &mut Self {
        self.plugins.push(plugin);
        self
    }

    /// Builder-style [`Pipeline::register`].
    pub fn with(mut self, plugin: PluginDescriptor) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Registered plugins in order.
    pub fn plugins(&self) -> &[PluginDescriptor] {
        &self.plugins
    }

    /// Threads `html` through every transform hook. Stops at the first error.
    pub async fn transform_index_html(&self, html: String) -> Result<String, PluginError> {
        let mut html = html;
        for plugin in &self.plugins {
            if let Some(fut) = plugin.call_transform_index_html(std::mem::take(&mut html)) {
                log::debug!("{}: {}", plugin.name(), HookStage::TransformIndexHtml);
                html = fut.await?;
            }
        }
        Ok(html)
    }

    /// Runs every post-write hook. Stops at the first error.
    pub async fn write_bundle(&self) -> Result<(), PluginError> {
        for plugin in &self.plugins {
            if let Some(fut) = plugin.call_write_bundle() {
                log::debug!("{}: {}", plugin.name(), HookStage::WriteBundle);
                fut.await?;
            }
        }
        Ok(())
    }
}
