//! NAPI-exposed data structures.

use htmlssr_core::CopySpec;
use htmlssr_plugins::FailurePolicy;
use napi_derive::napi;

/// Options for `syncDirectory`.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct SyncDirectoryOptions {
    /// Directory whose contents are copied.
    pub source: String,
    /// Directory that is removed, recreated, and filled.
    pub destination: String,
    /// Reject the returned promise on failure instead of logging to stderr.
    pub strict: Option<bool>,
}

impl SyncDirectoryOptions {
    pub(crate) fn spec(&self) -> CopySpec {
        CopySpec::new(&self.source, &self.destination)
    }

    pub(crate) fn policy(&self) -> FailurePolicy {
        if self.strict.unwrap_or(false) {
            FailurePolicy::Strict
        } else {
            FailurePolicy::Lenient
        }
    }
}
