use std::path::PathBuf;
use thiserror::Error;

/// Boxed error type used for failures raised by injected collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while rendering a template to static markup.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A `{{` interpolation was opened but never closed.
    #[error("Unclosed interpolation starting at byte {offset}")]
    UnclosedInterpolation {
        /// Byte offset of the opening `{{` in the template.
        offset: usize,
    },
    /// The expression inside an interpolation or directive is not a dot path.
    #[error("Unsupported expression: '{expression}'")]
    UnsupportedExpression {
        /// The offending expression, trimmed.
        expression: String,
    },
    /// The HTML rewriter rejected the template.
    #[error("Rewrite error: {0}")]
    Rewrite(String),
    /// Failure reported by an injected renderer.
    #[error("{0}")]
    External(BoxError),
}

impl RenderError {
    /// Wraps any error raised by an injected renderer.
    pub fn external(err: impl Into<BoxError>) -> Self {
        Self::External(err.into())
    }
}

/// Errors raised while formatting HTML.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The formatter could not parse the input document.
    #[error("Parse error: {message}")]
    Parse {
        /// Error message
        message: String,
    },
    /// Failure reported by an injected formatter.
    #[error("{0}")]
    External(BoxError),
}

impl FormatError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Wraps any error raised by an injected formatter.
    pub fn external(err: impl Into<BoxError>) -> Self {
        Self::External(err.into())
    }
}

/// Errors a lifecycle hook hands back to the host.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Server-side rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    /// HTML formatting failed.
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
    /// Replacing the destination directory failed.
    #[error("Failed to sync {}: {source}", .destination.display())]
    Sync {
        /// Destination directory that was being replaced.
        destination: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

impl PluginError {
    /// Create a sync error for the given destination
    pub fn sync(destination: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Sync {
            destination: destination.into(),
            source,
        }
    }
}
