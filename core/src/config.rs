use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::format::OutputFormat;

pub const DEFAULT_SIZE: u32 = 512;
pub const DEFAULT_QUALITY: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMode {
    /// Longer side becomes the target size.
    #[default]
    Thumbnail,
    /// Shorter side becomes the target size.
    Cover,
    /// Cover, then center-crop to a target-size square.
    Crop,
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thumbnail => write!(f, "thumbnail"),
            Self::Cover => write!(f, "cover"),
            Self::Crop => write!(f, "crop"),
        }
    }
}

impl FromStr for ResizeMode {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "thumbnail" => Ok(Self::Thumbnail),
            "cover" => Ok(Self::Cover),
            "crop" => Ok(Self::Crop),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Target size plus resize policy. The size is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    target_size: u32,
    mode: ResizeMode,
}

impl ResizeSpec {
    pub fn new(target_size: u32, mode: ResizeMode) -> Result<Self, ConfigError> {
        if target_size == 0 {
            return Err(ConfigError::InvalidSize(target_size));
        }
        Ok(Self { target_size, mode })
    }

    pub fn target_size(&self) -> u32 {
        self.target_size
    }

    pub fn mode(&self) -> ResizeMode {
        self.mode
    }
}

impl Default for ResizeSpec {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_SIZE,
            mode: ResizeMode::default(),
        }
    }
}

/// Which rendition of a source file a task produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Normal,
    Mirror,
}

impl Variant {
    pub fn is_mirror(&self) -> bool {
        matches!(self, Variant::Mirror)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Mirror => write!(f, "mirror"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputOptions {
    pub format: OutputFormat,
    /// Write a mirrored copy next to the normal one
    pub add_mirror: bool,
    /// Write only the mirrored copy (wins over `add_mirror`)
    pub mirror_only: bool,
}

impl OutputOptions {
    /// Variants to produce for every source file.
    pub fn variants(&self) -> &'static [Variant] {
        if self.mirror_only {
            &[Variant::Mirror]
        } else if self.add_mirror {
            &[Variant::Normal, Variant::Mirror]
        } else {
            &[Variant::Normal]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Quality 1-100 for JPEG and lossy WebP
    pub quality: u8,
    /// JPEG at quality 100, WebP lossless
    pub lossless: bool,
}

impl EncodeOptions {
    pub fn new(quality: u8, lossless: bool) -> Result<Self, ConfigError> {
        if !(1..=100).contains(&quality) {
            return Err(ConfigError::InvalidQuality(quality));
        }
        Ok(Self { quality, lossless })
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            lossless: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeConfig {
    pub spec: ResizeSpec,
    pub output: OutputOptions,
    pub encode: EncodeOptions,
    /// Skip sources that already fit inside size x size
    pub no_upscale: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            ResizeSpec::new(0, ResizeMode::Crop),
            Err(ConfigError::InvalidSize(0))
        );
        assert!(ResizeSpec::new(1, ResizeMode::Crop).is_ok());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Cover".parse::<ResizeMode>(), Ok(ResizeMode::Cover));
        assert_eq!(
            "stretch".parse::<ResizeMode>(),
            Err(ConfigError::UnknownMode("stretch".into()))
        );
    }

    #[test]
    fn test_variants() {
        let none = OutputOptions::default();
        assert_eq!(none.variants(), &[Variant::Normal]);

        let add = OutputOptions { add_mirror: true, ..Default::default() };
        assert_eq!(add.variants(), &[Variant::Normal, Variant::Mirror]);

        let only = OutputOptions { mirror_only: true, ..Default::default() };
        assert_eq!(only.variants(), &[Variant::Mirror]);

        let both = OutputOptions { add_mirror: true, mirror_only: true, ..Default::default() };
        assert_eq!(both.variants(), &[Variant::Mirror]);
    }

    #[test]
    fn test_quality_range() {
        assert_eq!(EncodeOptions::new(0, false), Err(ConfigError::InvalidQuality(0)));
        assert_eq!(EncodeOptions::new(101, false), Err(ConfigError::InvalidQuality(101)));
        assert!(EncodeOptions::new(100, true).is_ok());
    }
}
