//! Error types for tinsel

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for scene construction and asset handling
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Asset error ({path}): {message}")]
    Asset { path: PathBuf, message: String },

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}
