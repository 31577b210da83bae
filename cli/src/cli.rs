use std::path::PathBuf;

use clap::{ArgAction, Parser};

use image_resizer_core::config::{DEFAULT_QUALITY, DEFAULT_SIZE};
use image_resizer_core::{
    ConfigError, EncodeOptions, OutputFormat, OutputOptions, ResizeConfig, ResizeMode, ResizeSpec,
};

/// Resize every image in a directory tree into a mirrored output tree
#[derive(Debug, Parser)]
#[command(name = "image_resizer", version, about)]
pub struct Cli {
    /// Input directory containing images
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for resized images (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target size in pixels
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub size: u32,

    /// Resize mode (thumbnail, cover, crop)
    #[arg(short, long, default_value = "thumbnail")]
    pub resize_mode: String,

    /// Output format (same, png, jpg, gif, tiff, webp)
    #[arg(short, long, value_name = "FORMAT", default_value = "same")]
    pub format: String,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short, long)]
    pub num_processes: Option<usize>,

    /// Also write a horizontally mirrored copy of every image
    #[arg(short = 'm', long)]
    pub add_mirror: bool,

    /// Write only the mirrored copy (overrides --add-mirror)
    #[arg(short = 'M', long)]
    pub mirror_only: bool,

    /// Quality for JPEG and WebP output (1-100)
    #[arg(short, long, default_value_t = DEFAULT_QUALITY)]
    pub quality: u8,

    /// Lossless WebP, maximum quality JPEG
    #[arg(long)]
    pub lossless: bool,

    /// Skip images that already fit within size x size
    #[arg(long)]
    pub no_upscale: bool,

    /// Show what would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error if any file fails
    #[arg(long)]
    pub strict: bool,

    /// Verbose output (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Validate the arguments into a core configuration.
    pub fn to_config(&self) -> Result<ResizeConfig, ConfigError> {
        if !self.input.is_dir() {
            return Err(ConfigError::InputNotDirectory(self.input.clone()));
        }

        let mode: ResizeMode = self.resize_mode.parse()?;
        let format: OutputFormat = self.format.parse()?;

        Ok(ResizeConfig {
            spec: ResizeSpec::new(self.size, mode)?,
            output: OutputOptions {
                format,
                add_mirror: self.add_mirror,
                mirror_only: self.mirror_only,
            },
            encode: EncodeOptions::new(self.quality, self.lossless)?,
            no_upscale: self.no_upscale,
        })
    }

    /// Worker count; 0 or unset means one per CPU core.
    pub fn workers(&self) -> usize {
        match self.num_processes {
            Some(n) if n > 0 => n,
            _ => num_cpus::get(),
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(dir: &std::path::Path, extra: &[&str]) -> Cli {
        let input = dir.to_str().unwrap();
        let mut args = vec!["image_resizer", "-i", input, "-o", "/tmp/unused-out"];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(dir.path(), &[]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.spec.target_size(), 512);
        assert_eq!(config.spec.mode(), ResizeMode::Thumbnail);
        assert_eq!(config.output.format, OutputFormat::Same);
        assert!(!config.output.add_mirror && !config.output.mirror_only);
        assert_eq!(config.encode.quality, 75);
        assert_eq!(cli.log_level(), "warn");
        assert!(cli.workers() >= 1);
    }

    #[test]
    fn test_short_flags() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(
            dir.path(),
            &["-s", "128", "-r", "crop", "-f", "webp", "-n", "3", "-m", "-M", "-vv"],
        );
        let config = cli.to_config().unwrap();

        assert_eq!(config.spec.target_size(), 128);
        assert_eq!(config.spec.mode(), ResizeMode::Crop);
        assert_eq!(config.output.format, OutputFormat::Webp);
        assert!(config.output.add_mirror && config.output.mirror_only);
        assert_eq!(cli.workers(), 3);
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_zero_workers_means_auto() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(dir.path(), &["-n", "0"]);
        assert_eq!(cli.workers(), num_cpus::get());
    }

    #[test]
    fn test_zero_size_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(dir.path(), &["--size", "0"]);
        assert_eq!(cli.to_config().unwrap_err(), ConfigError::InvalidSize(0));
    }

    #[test]
    fn test_unknown_format_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(dir.path(), &["--format", "bmp"]);
        assert_eq!(
            cli.to_config().unwrap_err(),
            ConfigError::UnknownFormat("bmp".into())
        );
    }

    #[test]
    fn test_unknown_mode_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(dir.path(), &["-r", "stretch"]);
        assert!(matches!(cli.to_config(), Err(ConfigError::UnknownMode(_))));
    }

    #[test]
    fn test_missing_input_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&dir.path().join("missing"), &[]);
        assert!(matches!(cli.to_config(), Err(ConfigError::InputNotDirectory(_))));
    }

    #[test]
    fn test_negative_size_rejected_by_parser() {
        let args = ["image_resizer", "-i", ".", "-o", "out", "-s", "-5"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
