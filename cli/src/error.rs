use std::path::PathBuf;
use thiserror::Error;

use image_resizer_core::TransformError;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
}
