//! Replaces a directory with a copy of another once the build is written.

use futures::FutureExt;
use htmlssr_core::{
    CopySpec, DiagnosticSink, PluginDescriptor, PluginError, StderrSink, check_destination,
    copy_tree, recreate_destination, remove_destination,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::sync::Arc;

/// Name the copy plugin registers under.
pub const COPY_PLUGIN_NAME: &str = "vite-plugin-html-vue-ssr-copy";

/// Prefix of the diagnostic written when a lenient copy fails.
pub const COPY_FAILURE_PREFIX: &str = "failed to copy directory:";

/// What the copy plugin does with a filesystem error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Report to the diagnostic sink and let the build continue.
    #[default]
    Lenient,
    /// Return the error to the host.
    Strict,
}

/// Settings for [`copy_dir_with`].
#[derive(Clone)]
pub struct CopyOptions {
    /// Failure handling.
    pub policy: FailurePolicy,
    /// Where lenient failures are reported.
    pub sink: Arc<dyn DiagnosticSink>,
}

impl CopyOptions {
    /// Lenient options reporting to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            sink,
            ..Self::default()
        }
    }

    /// Strict options; errors reach the host.
    pub fn strict() -> Self {
        Self {
            policy: FailurePolicy::Strict,
            ..Self::default()
        }
    }
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            policy: FailurePolicy::Lenient,
            sink: Arc::new(StderrSink),
        }
    }
}

impl fmt::Debug for CopyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyOptions")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Creates a post-write plugin that replaces `spec.destination` with the
/// contents of `spec.source`, reporting failures to stderr without failing
/// the build.
pub fn copy_dir(spec: CopySpec) -> PluginDescriptor {
    copy_dir_with(spec, CopyOptions::default())
}

/// [`copy_dir`] with an explicit failure policy and diagnostic sink.
///
/// The destination is not locked; run at most one copy per destination at a
/// time.
pub fn copy_dir_with(spec: CopySpec, options: CopyOptions) -> PluginDescriptor {
    let spec = Arc::new(spec);

    PluginDescriptor::write_bundle(COPY_PLUGIN_NAME, move || {
        let spec = Arc::clone(&spec);
        let options = options.clone();
        async move {
            let outcome = replace_destination(&spec).await;
            settle_copy(&spec, outcome, options.policy, options.sink.as_ref())
        }
        .boxed()
    })
}

/// Turns the outcome of a directory sync into the hook's result.
///
/// Success is logged. A failure is reported to `sink` with
/// [`COPY_FAILURE_PREFIX`] and swallowed under [`FailurePolicy::Lenient`], or
/// returned as [`PluginError::Sync`] under [`FailurePolicy::Strict`].
pub fn settle_copy(
    spec: &CopySpec,
    outcome: io::Result<u64>,
    policy: FailurePolicy,
    sink: &dyn DiagnosticSink,
) -> Result<(), PluginError> {
    match outcome {
        Ok(copied) => {
            log::debug!(
                "copied {} files from {} to {}",
                copied,
                spec.source.display(),
                spec.destination.display()
            );
            Ok(())
        }
        Err(err) => match policy {
            FailurePolicy::Lenient => {
                sink.report(COPY_FAILURE_PREFIX, &err);
                Ok(())
            }
            FailurePolicy::Strict => Err(PluginError::sync(spec.destination.clone(), err)),
        },
    }
}

async fn replace_destination(spec: &CopySpec) -> io::Result<u64> {
    let checked = spec.clone();
    blocking(move || check_destination(&checked)).await?;

    let destination = spec.destination.clone();
    blocking(move || remove_destination(&destination)).await?;

    let destination = spec.destination.clone();
    blocking(move || recreate_destination(&destination)).await?;

    let source = spec.source.clone();
    let destination = spec.destination.clone();
    blocking(move || copy_tree(&source, &destination)).await
}

/// Runs `task` on tokio's blocking pool, or inline when the hook is polled
/// outside a tokio runtime.
async fn blocking<T, F>(task: F) -> io::Result<T>
where
    F: FnOnce() -> io::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle
            .spawn_blocking(task)
            .await
            .map_err(io::Error::other)?,
        Err(_) => task(),
    }
}
