//! Resize policy geometry and the per-image transform.
//!
//! The dimension helpers are pure so the policy can be checked without
//! touching pixels; [`transform`] applies them to a decoded image.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::config::{ResizeMode, ResizeSpec};
use crate::error::TransformError;

const FILTER: FilterType = FilterType::Lanczos3;

/// Scale `dim` by `target / reference`, rounded, never below 1.
fn scale(dim: u32, target: u32, reference: u32) -> u32 {
    let scaled = (dim as f64 * target as f64 / reference as f64).round();
    (scaled as u32).max(1)
}

/// Dimensions with the longer side equal to `target`.
///
/// Small images are scaled up as well.
pub fn thumbnail_dimensions(width: u32, height: u32, target: u32) -> (u32, u32) {
    if width >= height {
        (target, scale(height, target, width))
    } else {
        (scale(width, target, height), target)
    }
}

/// Dimensions with the shorter side equal to `target`.
pub fn cover_dimensions(width: u32, height: u32, target: u32) -> (u32, u32) {
    if width <= height {
        (target, scale(height, target, width))
    } else {
        (scale(width, target, height), target)
    }
}

/// Top-left corner of a centered `target` square inside `scaled`.
pub fn crop_offset(scaled: (u32, u32), target: u32) -> (u32, u32) {
    let (w, h) = scaled;
    (w.saturating_sub(target) / 2, h.saturating_sub(target) / 2)
}

/// The region of the source that ends up in the cropped square.
///
/// This is the centered `target` window of the cover-scaled image, mapped back
/// into source coordinates as `(x, y, width, height)`, so the crop can run
/// before the resize.
pub fn crop_window(width: u32, height: u32, target: u32) -> (u32, u32, u32, u32) {
    let scaled = cover_dimensions(width, height, target);
    let (ox, oy) = crop_offset(scaled, target);
    let (x, w) = source_span(ox, target, width, scaled.0);
    let (y, h) = source_span(oy, target, height, scaled.1);
    (x, y, w, h)
}

/// Map `[offset, offset + len)` on an axis scaled to `scaled` back onto `source`.
fn source_span(offset: u32, len: u32, source: u32, scaled: u32) -> (u32, u32) {
    let (offset, len, source, scaled) = (offset as u64, len as u64, source as u64, scaled as u64);
    let start = (offset * source / scaled).min(source - 1);
    let span = ((len * source + scaled / 2) / scaled).clamp(1, source - start);
    (start as u32, span as u32)
}

/// True when both sides already fit inside a `target` square.
pub fn fits_within(width: u32, height: u32, target: u32) -> bool {
    width <= target && height <= target
}

/// Horizontal flip.
pub fn mirror(image: &DynamicImage) -> DynamicImage {
    image.fliph()
}

fn resize_to(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    image.resize_exact(width, height, FILTER)
}

/// Resize `image` under `spec`, then flip it if `mirror` is set.
pub fn transform(
    image: &DynamicImage,
    spec: &ResizeSpec,
    mirror: bool,
) -> Result<DynamicImage, TransformError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidImage { width, height });
    }

    let target = spec.target_size();
    let resized = match spec.mode() {
        ResizeMode::Thumbnail => {
            let (w, h) = thumbnail_dimensions(width, height, target);
            resize_to(image, w, h)
        }
        ResizeMode::Cover => {
            let (w, h) = cover_dimensions(width, height, target);
            resize_to(image, w, h)
        }
        ResizeMode::Crop => {
            let (x, y, w, h) = crop_window(width, height, target);
            resize_to(&image.crop_imm(x, y, w, h), target, target)
        }
    };

    log::trace!(
        "{:?} {}x{} -> {}x{}{}",
        spec.mode(),
        width,
        height,
        resized.width(),
        resized.height(),
        if mirror { " (mirrored)" } else { "" }
    );

    Ok(if mirror { self::mirror(&resized) } else { resized })
}
