use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;

/// A concrete format the encoder can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeFormat {
    Png,
    Jpeg,
    Gif,
    Tiff,
    Webp,
}

impl EncodeFormat {
    /// Source format of a discovered file, judged by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(EncodeFormat::Png),
            "jpg" | "jpeg" => Some(EncodeFormat::Jpeg),
            "gif" => Some(EncodeFormat::Gif),
            "tif" | "tiff" => Some(EncodeFormat::Tiff),
            "webp" => Some(EncodeFormat::Webp),
            _ => None,
        }
    }

    /// Native extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            EncodeFormat::Png => "png",
            EncodeFormat::Jpeg => "jpg",
            EncodeFormat::Gif => "gif",
            EncodeFormat::Tiff => "tiff",
            EncodeFormat::Webp => "webp",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodeFormat::Png => "PNG",
            EncodeFormat::Jpeg => "JPEG",
            EncodeFormat::Gif => "GIF",
            EncodeFormat::Tiff => "TIFF",
            EncodeFormat::Webp => "WebP",
        }
    }
}

impl fmt::Display for EncodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format as requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Keep whatever format the source file has.
    #[default]
    Same,
    Png,
    Jpeg,
    Gif,
    Tiff,
    Webp,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Same => write!(f, "same"),
            Self::Png => write!(f, "png"),
            Self::Jpeg => write!(f, "jpg"),
            Self::Gif => write!(f, "gif"),
            Self::Tiff => write!(f, "tiff"),
            Self::Webp => write!(f, "webp"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "same" => Ok(Self::Same),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "gif" => Ok(Self::Gif),
            "tiff" | "tif" => Ok(Self::Tiff),
            "webp" => Ok(Self::Webp),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

/// Resolve the requested output format against the source file's format.
///
/// Returns the format to encode with and the extension to write.
pub fn resolve(requested: OutputFormat, source: EncodeFormat) -> (EncodeFormat, &'static str) {
    let format = match requested {
        OutputFormat::Same => source,
        OutputFormat::Png => EncodeFormat::Png,
        OutputFormat::Jpeg => EncodeFormat::Jpeg,
        OutputFormat::Gif => EncodeFormat::Gif,
        OutputFormat::Tiff => EncodeFormat::Tiff,
        OutputFormat::Webp => EncodeFormat::Webp,
    };
    (format, format.extension())
}
