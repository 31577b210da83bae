use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageReader};

use crate::config::ResizeConfig;
use crate::encoder;
use crate::error::TransformError;
use crate::paths::FileTask;
use crate::transform::{self, fits_within};

/// What happened to a single task.
#[derive(Debug)]
pub enum Outcome {
    Written {
        data: Vec<u8>,
        original: (u32, u32),
        resized: (u32, u32),
    },
    /// Source already fits and upscaling is disabled.
    Skipped { original: (u32, u32) },
}

/// Decode → resize → mirror → encode, for one task at a time.
///
/// Holds no mutable state, so one instance is shared by every worker.
pub struct Pipeline {
    config: ResizeConfig,
}

impl Pipeline {
    pub fn new(config: ResizeConfig) -> Self {
        Self { config }
    }

    /// Process a source file's bytes for the given task.
    pub fn process(&self, data: &[u8], task: &FileTask) -> Result<Outcome, TransformError> {
        let img = decode(data)?;
        let original = img.dimensions();
        if original.0 == 0 || original.1 == 0 {
            return Err(TransformError::InvalidImage {
                width: original.0,
                height: original.1,
            });
        }

        let target = self.config.spec.target_size();
        if self.config.no_upscale && fits_within(original.0, original.1, target) {
            log::debug!(
                "Skipping {} ({}x{} already within {}x{})",
                task.source.display(),
                original.0,
                original.1,
                target,
                target
            );
            return Ok(Outcome::Skipped { original });
        }

        let resized = transform::transform(&img, &self.config.spec, task.variant.is_mirror())?;
        let data = encoder::encode(&resized, task.format, &self.config.encode)?;

        Ok(Outcome::Written {
            data,
            original,
            resized: resized.dimensions(),
        })
    }
}

/// Decode image bytes, guessing the format from the content.
pub fn decode(data: &[u8]) -> Result<DynamicImage, TransformError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| TransformError::Decode(e.to_string()))?;

    if reader.format().is_none() {
        return Err(TransformError::UnsupportedFormat(
            "unrecognized image data".to_string(),
        ));
    }

    reader
        .decode()
        .map_err(|e| TransformError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::config::{OutputOptions, ResizeMode, ResizeSpec, Variant};
    use crate::format::EncodeFormat;
    use image::{ImageFormat, Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
            Rgb([x as u8, 0, 0])
        }));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png).unwrap();
        out
    }

    fn task(variant: Variant, format: EncodeFormat) -> FileTask {
        FileTask {
            source: PathBuf::from("/in/img.png"),
            relative: PathBuf::from("img.png"),
            variant,
            output: PathBuf::from("/out/img.png"),
            format,
        }
    }

    fn config(size: u32, mode: ResizeMode, no_upscale: bool) -> ResizeConfig {
        ResizeConfig {
            spec: ResizeSpec::new(size, mode).unwrap(),
            output: OutputOptions::default(),
            no_upscale,
            ..Default::default()
        }
    }

    #[test]
    fn test_process_writes_target_format() {
        let pipeline = Pipeline::new(config(20, ResizeMode::Crop, false));
        let outcome = pipeline
            .process(&png_bytes(40, 30), &task(Variant::Normal, EncodeFormat::Jpeg))
            .unwrap();

        match outcome {
            Outcome::Written { data, original, resized } => {
                assert_eq!(original, (40, 30));
                assert_eq!(resized, (20, 20));
                assert_eq!(image::guess_format(&data).unwrap(), ImageFormat::Jpeg);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_process_mirror_variant_flips() {
        let pipeline = Pipeline::new(config(8, ResizeMode::Thumbnail, false));
        let outcome = pipeline
            .process(&png_bytes(8, 4), &task(Variant::Mirror, EncodeFormat::Png))
            .unwrap();

        let Outcome::Written { data, .. } = outcome else {
            panic!("expected a written image");
        };
        let decoded = image::load_from_memory(&data).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(0, 0)[0], 7);
        assert_eq!(decoded.get_pixel(7, 0)[0], 0);
    }

    #[test]
    fn test_process_upscales_by_default() {
        let pipeline = Pipeline::new(config(64, ResizeMode::Thumbnail, false));
        let outcome = pipeline
            .process(&png_bytes(16, 8), &task(Variant::Normal, EncodeFormat::Png))
            .unwrap();
        assert!(matches!(outcome, Outcome::Written { resized: (64, 32), .. }));
    }

    #[test]
    fn test_process_no_upscale_skips_small_images() {
        let pipeline = Pipeline::new(config(64, ResizeMode::Thumbnail, true));
        let outcome = pipeline
            .process(&png_bytes(16, 8), &task(Variant::Normal, EncodeFormat::Png))
            .unwrap();
        assert!(matches!(outcome, Outcome::Skipped { original: (16, 8) }));
    }

    #[test]
    fn test_process_rejects_garbage() {
        let pipeline = Pipeline::new(ResizeConfig::default());
        let err = pipeline
            .process(b"definitely not an image", &task(Variant::Normal, EncodeFormat::Png))
            .unwrap_err();
        assert!(matches!(
            err,
            TransformError::UnsupportedFormat(_) | TransformError::Decode(_)
        ));
    }

    #[test]
    fn test_process_rejects_truncated_png() {
        let bytes = png_bytes(32, 32);
        let pipeline = Pipeline::new(ResizeConfig::default());
        let err = pipeline
            .process(&bytes[..bytes.len() / 2], &task(Variant::Normal, EncodeFormat::Png))
            .unwrap_err();
        assert!(matches!(err, TransformError::Decode(_)));
    }
}
