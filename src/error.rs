//! Error types for rendering and batch setup

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single sprite. Contained at the entry boundary by the batch.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("canvas size must be positive, got {0}")]
    InvalidCanvas(u32),

    #[error("no usable font found (tried {tried} paths)")]
    FontUnavailable { tried: usize },

    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("render failed: {0}")]
    Failed(String),
}

/// Fatal problem found before any sprite is generated.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid sprite config: {0}")]
    InvalidConfig(String),

    #[error("could not create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
