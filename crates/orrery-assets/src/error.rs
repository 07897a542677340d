//! Asset loading error types.

use std::path::PathBuf;

/// Errors that can occur while fetching or parsing a model descriptor.
///
/// A load failure is reported to the log and the dependent slot never
/// completes; there is no retry.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The model file could not be read from disk.
    #[error("failed to read model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The model descriptor could not be parsed.
    #[error("failed to parse model {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}
