#![deny(missing_docs)]
//! Node.js bindings that surface htmlssr's Rust implementation.
//!
//! The JavaScript side wires these into bundler hooks: `renderTemplate` and
//! `stripMarkerComments` from `transformIndexHtml`, `syncDirectory` from
//! `writeBundle`.

use htmlssr_core::{
    PluginError, RenderContext, RenderRoot, StderrSink, strip_marker_comments, sync_directory,
};
use htmlssr_plugins::{DirectiveRenderer, settle_copy};
use napi::bindgen_prelude::AsyncTask;
use napi::{Env, Task};
use napi_derive::napi;
use serde_json::Value as JsonValue;

/// NAPI-exposed data structures.
pub mod types;
pub use types::*;

/// Removes renderer and formatter marker comments from an HTML string.
#[napi(js_name = "stripMarkerComments")]
pub fn strip_marker_comments_napi(html: String) -> String {
    strip_marker_comments(&html)
}

/// Renders `html` as a template against `context` with the built-in directive
/// renderer, then strips marker comments.
#[napi]
pub fn render_template(html: String, context: Option<JsonValue>) -> napi::Result<String> {
    let context = context.map(RenderContext::from_json).unwrap_or_default();
    let root = RenderRoot::new(html, context);
    let page = DirectiveRenderer::new()
        .render_str(&root)
        .map_err(|err| napi::Error::from_reason(PluginError::from(err).to_string()))?;
    Ok(strip_marker_comments(&page))
}

/// Replaces `destination` with a copy of `source` on the libuv thread pool.
///
/// Failures are written to stderr and the promise resolves, unless `strict`
/// is set, in which case it rejects.
#[napi(js_name = "syncDirectory")]
pub fn sync_directory_napi(options: SyncDirectoryOptions) -> AsyncTask<SyncDirectory> {
    AsyncTask::new(SyncDirectory { options })
}

/// Background job behind `syncDirectory`.
pub struct SyncDirectory {
    options: SyncDirectoryOptions,
}

impl SyncDirectory {
    fn run(&self) -> napi::Result<()> {
        let spec = self.options.spec();
        let outcome = sync_directory(&spec);
        settle_copy(&spec, outcome, self.options.policy(), &StderrSink)
            .map_err(|err| napi::Error::from_reason(err.to_string()))
    }
}

impl Task for SyncDirectory {
    type Output = ();
    type JsValue = ();

    fn compute(&mut self) -> napi::Result<Self::Output> {
        self.run()
    }

    fn resolve(&mut self, _env: Env, output: Self::Output) -> napi::Result<Self::JsValue> {
        Ok(output)
    }
}
