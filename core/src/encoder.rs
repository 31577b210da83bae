use std::io::Cursor;

use image::{ColorType, DynamicImage, GenericImageView, ImageFormat as ImgFormat};

use crate::config::EncodeOptions;
use crate::error::TransformError;
use crate::format::EncodeFormat;

/// Encode a transformed image into `format`.
pub fn encode(
    img: &DynamicImage,
    format: EncodeFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, TransformError> {
    let output = match format {
        EncodeFormat::Png => encode_png(img)?,
        EncodeFormat::Jpeg => encode_jpg(img, options)?,
        EncodeFormat::Gif => encode_gif(img)?,
        EncodeFormat::Tiff => encode_tiff(img)?,
        EncodeFormat::Webp => encode_webp(img, options)?,
    };

    log::debug!(
        "Encoded {}x{} image: {} bytes ({})",
        img.width(),
        img.height(),
        output.len(),
        format
    );

    Ok(output)
}

fn write_with(img: &DynamicImage, format: ImgFormat) -> Result<Vec<u8>, TransformError> {
    let mut output = Vec::new();
    img.write_to(&mut Cursor::new(&mut output), format)
        .map_err(|e| TransformError::Encode(format!("Failed to encode {:?}: {}", format, e)))?;
    Ok(output)
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, TransformError> {
    // The PNG encoder has no float sample support
    match img.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => {
            write_with(&DynamicImage::ImageRgba16(img.to_rgba16()), ImgFormat::Png)
        }
        _ => write_with(img, ImgFormat::Png),
    }
}

fn encode_jpg(img: &DynamicImage, options: &EncodeOptions) -> Result<Vec<u8>, TransformError> {
    let mut output = Vec::new();
    let mut cursor = Cursor::new(&mut output);

    // JPEG has no alpha channel
    let rgb_img = img.to_rgb8();
    let quality = if options.lossless { 100 } else { options.quality };

    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
    encoder
        .encode(
            rgb_img.as_raw(),
            rgb_img.width(),
            rgb_img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| TransformError::Encode(format!("Failed to encode JPEG: {}", e)))?;

    Ok(output)
}

fn encode_gif(img: &DynamicImage) -> Result<Vec<u8>, TransformError> {
    write_with(&DynamicImage::ImageRgba8(img.to_rgba8()), ImgFormat::Gif)
}

fn encode_tiff(img: &DynamicImage) -> Result<Vec<u8>, TransformError> {
    let normalized = if img.color().has_alpha() {
        DynamicImage::ImageRgba8(img.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8())
    };
    write_with(&normalized, ImgFormat::Tiff)
}

/// Largest width or height a WebP bitstream can describe.
pub const WEBP_MAX_DIMENSION: u32 = 16383;

fn encode_webp(img: &DynamicImage, options: &EncodeOptions) -> Result<Vec<u8>, TransformError> {
    let (width, height) = img.dimensions();
    if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
        return Err(TransformError::Encode(format!(
            "{}x{} exceeds the WebP limit of {} pixels per side",
            width, height, WEBP_MAX_DIMENSION
        )));
    }

    let rgba = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);

    let encoded = encoder
        .encode_simple(options.lossless, options.quality as f32)
        .map_err(|e| TransformError::Encode(format!("Failed to encode WebP: {:?}", e)))?;

    Ok(encoded.to_vec())
}
