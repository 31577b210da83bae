use std::path::PathBuf;
use thiserror::Error;

/// Invalid settings, rejected before any file is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid size: {0} (must be greater than 0)")]
    InvalidSize(u32),

    #[error("unknown output format: {0}. Use: same, png, jpg, gif, tiff, webp")]
    UnknownFormat(String),

    #[error("unknown resize mode: {0}. Use: thumbnail, cover, crop")]
    UnknownMode(String),

    #[error("invalid quality: {0} (must be 1-100)")]
    InvalidQuality(u8),

    #[error("input is not a directory: {}", .0.display())]
    InputNotDirectory(PathBuf),
}

/// Problems found while turning discovered files into tasks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error(
        "output collision: {} and {} both map to {}",
        first.display(),
        second.display(),
        output.display()
    )]
    Collision {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{} is not inside the input directory {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("output directory is the input directory: {}", .0.display())]
    OutputIsInput(PathBuf),

    #[error("unsupported source format: {}", .0.display())]
    UnsupportedSource(PathBuf),
}

/// Per-file failures. These never abort the rest of a run.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("invalid image: {width}x{height} has zero area")]
    InvalidImage { width: u32, height: u32 },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("encoding failed: {0}")]
    Encode(String),
}
