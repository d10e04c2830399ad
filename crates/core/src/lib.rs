#![deny(missing_docs)]
//! htmlssr core: plugin descriptors, marker stripping, and output directory sync.

/// Render and format inputs (context, render root, formatter options).
pub mod context;
/// Sinks for failures that are reported instead of propagated.
pub mod diagnostics;
/// Core error types.
pub mod error;
/// Remove/recreate/copy primitives for replacing an output directory.
pub mod fs_sync;
/// Marker comment removal.
pub mod markers;
/// Plugin descriptors, lifecycle hooks, and the pipeline driver.
pub mod plugin;

pub use context::{
    FormatOptions, HTML_PARSER, PARSER_KEY, RenderContext, RenderRoot, TEMPLATE_KEY,
};
pub use diagnostics::{DiagnosticSink, LogSink, MemorySink, StderrSink};
pub use error::{BoxError, FormatError, PluginError, RenderError};
pub use fs_sync::{
    CopySpec, check_destination, copy_tree, recreate_destination, remove_destination, sync_directory,
};
pub use markers::{MARKER_COMMENTS, strip_marker_comments, strip_marker_comments_cow};
pub use plugin::{
    Hook, HookFuture, HookStage, Pipeline, PluginDescriptor, TransformIndexHtmlFn, WriteBundleFn,
};
