pub mod config;
pub mod encoder;
pub mod error;
pub mod format;
pub mod paths;
pub mod pipeline;
pub mod transform;

pub use config::{EncodeOptions, OutputOptions, ResizeConfig, ResizeMode, ResizeSpec, Variant};
pub use error::{ConfigError, PlanError, TransformError};
pub use format::{EncodeFormat, OutputFormat};
pub use paths::{FileTask, PathMapper};
pub use pipeline::{Outcome, Pipeline};
