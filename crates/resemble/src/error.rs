use std::path::PathBuf;

use thiserror::Error;

/// Why a comparison produced no result: an input could not be turned into
/// pixels, or a worker task died.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: image::ImageError,
    },

    #[error("{what} task panicked")]
    Join { what: String },
}
