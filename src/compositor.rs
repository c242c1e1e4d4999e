//! Flattening of a photo and its stroke layer into one bitmap.
//!
//! The output always has the photo's pixel dimensions. The stroke layer is
//! drawn over the same rectangle, resampled if its buffer differs in size.
//! Text labels are not drawn: they stay live overlays on top of the result.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::{debug, trace};

use crate::annotations::StrokeLayer;

/// Composite `base` with `strokes` on top.
///
/// Returns `None` when there is no photo; callers treat that as nothing to
/// save.
pub fn flatten(base: Option<&RgbaImage>, strokes: Option<&StrokeLayer>) -> Option<RgbaImage> {
    let Some(base) = base else {
        debug!("Flatten requested without a base image, skipping");
        return None;
    };

    let mut output = base.clone();
    let Some(strokes) = strokes.filter(|s| !s.is_empty()) else {
        return Some(output);
    };

    let (width, height) = output.dimensions();
    if strokes.pixel_size() == (width, height) {
        overlay(&mut output, strokes.image());
    } else {
        trace!(
            "Resampling stroke layer {:?} to {}x{}",
            strokes.pixel_size(),
            width,
            height
        );
        let resized = resample(strokes.image(), width, height);
        overlay(&mut output, &resized);
    }

    debug!(
        "Flattened {} stroke segments into {}x{} image",
        strokes.segment_count(),
        width,
        height
    );
    Some(output)
}

/// Resize a straight-alpha layer without dark fringes.
///
/// Filtering runs on premultiplied pixels so transparent neighbours carry no
/// color into the edges of a stroke.
fn resample(layer: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut premultiplied = layer.clone();
    for px in premultiplied.pixels_mut() {
        let a = px[3] as u32;
        for c in 0..3 {
            px[c] = ((px[c] as u32 * a + 127) / 255) as u8;
        }
    }

    let mut resized = imageops::resize(&premultiplied, width, height, FilterType::Triangle);
    for px in resized.pixels_mut() {
        let a = px[3] as u32;
        if a == 0 {
            *px = Rgba([0, 0, 0, 0]);
            continue;
        }
        for c in 0..3 {
            px[c] = ((px[c] as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
    resized
}

/// Source-over `top` onto `bottom`. Both must have the same dimensions.
fn overlay(bottom: &mut RgbaImage, top: &RgbaImage) {
    for (dst, src) in bottom.pixels_mut().zip(top.pixels()) {
        blend_pixel(dst, *src);
    }
}

/// Straight-alpha source-over of one pixel.
///
/// Fully transparent sources leave `dst` untouched and opaque sources replace
/// it, so neither case accumulates rounding error.
pub fn blend_pixel(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = src[3] as u32;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        *dst = src;
        return;
    }

    let da = dst[3] as u32;
    let inv = 255 - sa;
    let out_a = sa + (da * inv + 127) / 255;
    if out_a == 0 {
        return;
    }

    let den = out_a * 255;
    for c in 0..3 {
        let num = src[c] as u32 * sa * 255 + dst[c] as u32 * da * inv;
        dst[c] = ((num + den / 2) / den).min(255) as u8;
    }
    dst[3] = out_a.min(255) as u8;
}
