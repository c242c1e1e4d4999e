//! Freehand stroke raster.
//!
//! A [`StrokeLayer`] is a transparent RGBA buffer that accumulates round-capped
//! line segments while the user drags across the photo. Input points are in
//! display points; each axis has its own pixels-per-point scale so the buffer
//! covers the whole photo at the photo's own resolution, whatever the aspect
//! ratio of the overlay.

use image::RgbaImage;
use tracing::trace;

use crate::color::Color;
use crate::compositor::blend_pixel;
use crate::constants::DEFAULT_STROKE_WIDTH;
use crate::geometry::{Point, Size, distance_to_segment};

#[derive(Debug, Clone)]
pub struct StrokeLayer {
    image: RgbaImage,
    /// Pixels per display point, horizontally
    scale_x: f32,
    /// Pixels per display point, vertically
    scale_y: f32,
    color: Color,
    /// Line width in display points
    width: f32,
    last_point: Option<Point>,
    segment_count: usize,
}

impl StrokeLayer {
    /// Empty layer covering `display_size` points at `scale` pixels per point.
    pub fn new(display_size: Size, scale: f32) -> Self {
        let scale = valid_scale(scale);
        let width = pixels(display_size.width * scale);
        let height = pixels(display_size.height * scale);
        Self::with_pixel_size(width, height, scale)
    }

    /// Empty `width`x`height` pixel layer at `scale` pixels per point.
    pub fn with_pixel_size(width: u32, height: u32, scale: f32) -> Self {
        Self::with_scales(width, height, scale, scale)
    }

    /// Empty `width`x`height` pixel layer stretched over `display_size`
    /// points. The two axes scale independently.
    pub fn covering(width: u32, height: u32, display_size: Size) -> Self {
        let scale_x = width as f32 / display_size.width;
        let scale_y = height as f32 / display_size.height;
        Self::with_scales(width, height, scale_x, scale_y)
    }

    fn with_scales(width: u32, height: u32, scale_x: f32, scale_y: f32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
            scale_x: valid_scale(scale_x),
            scale_y: valid_scale(scale_y),
            color: Color::BLACK,
            width: DEFAULT_STROKE_WIDTH,
            last_point: None,
            segment_count: 0,
        }
    }

    /// Start a new chain of segments at `point`. Nothing is drawn yet.
    pub fn begin(&mut self, point: Point) {
        self.last_point = Some(point);
    }

    /// Draw a segment from the last recorded point to `to`.
    ///
    /// Returns false (and leaves the pixels alone) when no stroke has begun.
    pub fn extend(&mut self, to: Point) -> bool {
        let Some(from) = self.last_point else {
            trace!("Stroke extended to {:?} without an origin, ignoring", to);
            return false;
        };

        // Each segment renders into a fresh surface seeded with everything
        // drawn so far.
        let mut surface = self.image.clone();
        draw_segment(
            &mut surface,
            from.scaled(self.scale_x, self.scale_y),
            to.scaled(self.scale_x, self.scale_y),
            self.width * (self.scale_x + self.scale_y) / 2.0,
            self.color,
        );
        self.image = surface;

        self.last_point = Some(to);
        self.segment_count += 1;
        true
    }

    /// Finish the current chain. Accumulated pixels stay.
    pub fn end(&mut self) {
        self.last_point = None;
    }

    pub fn is_stroking(&self) -> bool {
        self.last_point.is_some()
    }

    /// True while no segment has been drawn.
    pub fn is_empty(&self) -> bool {
        self.segment_count == 0
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
    }

    /// Pixels per display point as `(x, y)`.
    pub fn scale(&self) -> (f32, f32) {
        (self.scale_x, self.scale_y)
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Zero, negative and non-finite scales fall back to one pixel per point.
fn valid_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
}

fn pixels(length: f32) -> u32 {
    if length.is_finite() {
        length.ceil().max(1.0) as u32
    } else {
        1
    }
}

/// Rasterize a round-capped segment of `width` pixels onto `target`.
///
/// Coverage is the distance from each pixel center to the segment, with a
/// one pixel linear falloff at the edge.
fn draw_segment(target: &mut RgbaImage, from: Point, to: Point, width: f32, color: Color) {
    let radius = width / 2.0;
    if radius <= 0.0 || color.a == 0 {
        return;
    }

    let (img_w, img_h) = target.dimensions();
    let pad = radius + 1.0;
    let min_x = (from.x.min(to.x) - pad).floor().max(0.0) as u32;
    let min_y = (from.y.min(to.y) - pad).floor().max(0.0) as u32;
    let max_x = ((from.x.max(to.x) + pad).ceil().max(0.0) as u32).min(img_w);
    let max_y = ((from.y.max(to.y) + pad).ceil().max(0.0) as u32).min(img_h);

    for y in min_y..max_y {
        for x in min_x..max_x {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let coverage = (radius + 0.5 - distance_to_segment(center, from, to)).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }

            let mut src = color.to_rgba();
            src[3] = (color.a as f32 * coverage).round() as u8;
            blend_pixel(target.get_pixel_mut(x, y), src);
        }
    }
}
