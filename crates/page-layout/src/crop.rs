//! Crop rectangle of the visible part of a placed image
//!
//! The page viewport is projected back into image-pixel space through the
//! same scale that placed the image; whatever falls outside it is cropped.

use crate::placement::place;
use crate::{check_dimensions, ImageOptions, PageSize, Placement, Result, Unit};

/// Rectangle of image pixels that stays on the page
///
/// Coordinates are in image pixels, `x2`/`y2` exclusive. When `must_crop` is
/// false the rectangle is the whole image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    pub must_crop: bool,
}

impl CropRect {
    /// The uncropped rectangle of a `width_px` x `height_px` image
    pub fn full(width_px: u32, height_px: u32) -> Self {
        Self {
            x1: 0,
            y1: 0,
            x2: width_px,
            y2: height_px,
            must_crop: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Where the kept pixels land on the page
    ///
    /// Drawing the cropped image at the returned placement puts every kept
    /// pixel exactly where it sits in `placement` of the full image.
    pub fn visible_placement(
        &self,
        placement: &Placement,
        width_px: u32,
        height_px: u32,
    ) -> Placement {
        let px_w = placement.width / width_px as f64;
        let px_h = placement.height / height_px as f64;
        Placement {
            x: placement.x + self.x1 as f64 * px_w,
            y: placement.y + self.y1 as f64 * px_h,
            width: self.width() as f64 * px_w,
            height: self.height() as f64 * px_h,
        }
    }
}

/// Compute the crop rectangle for an image placed with `options`
///
/// # Arguments
/// * `page` - Page size, in any unit
/// * `unit` - Working unit
/// * `width_px` - Image width in pixels
/// * `height_px` - Image height in pixels
/// * `options` - Placement mode and scale
pub fn crop_rect(
    page: PageSize,
    unit: Unit,
    width_px: u32,
    height_px: u32,
    options: &ImageOptions,
) -> Result<CropRect> {
    render(page, unit, width_px, height_px, options).map(|(_, crop)| crop)
}

/// Compute placement and crop rectangle in one pass
pub fn render(
    page: PageSize,
    unit: Unit,
    width_px: u32,
    height_px: u32,
    options: &ImageOptions,
) -> Result<(Placement, CropRect)> {
    page.validate()?;
    check_dimensions(width_px, height_px)?;

    let page = page.convert(unit);
    let placement = place(page.width, page.height, unit, width_px, height_px, options);
    let crop = project(page.width, page.height, &placement, width_px, height_px);
    Ok((placement, crop))
}

/// Relative tolerance under which a pixel coordinate counts as whole
const PIXEL_EPSILON: f64 = 1e-9;

/// Round `value` to the nearest integer when it is within rounding noise of it
fn snap(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() <= PIXEL_EPSILON * nearest.abs().max(1.0) {
        nearest
    } else {
        value
    }
}

/// Project the page viewport into image pixels and clip the image to it
fn project(
    page_w: f64,
    page_h: f64,
    placement: &Placement,
    width_px: u32,
    height_px: u32,
) -> CropRect {
    // Size of one image pixel on the page
    let px_w = placement.width / width_px as f64;
    let px_h = placement.height / height_px as f64;

    // Page-relative image corners, in image pixels. Fit and Fill pin one side
    // to the page exactly; snapping keeps that side whole after the division.
    let img_x1 = snap(placement.x / px_w);
    let img_y1 = snap(placement.y / px_h);
    let img_x2 = img_x1 + width_px as f64;
    let img_y2 = img_y1 + height_px as f64;

    // Page extent, in image pixels
    let page_w_px = snap(page_w / px_w);
    let page_h_px = snap(page_h / px_h);

    let mut crop = CropRect::full(width_px, height_px);

    // `as u32` truncates toward zero, so a fractional pixel on an edge may
    // stay or go depending on the side
    if img_x1 < 0.0 {
        crop.x1 = snap(-img_x1) as u32;
        crop.must_crop = true;
    }
    if img_y1 < 0.0 {
        crop.y1 = snap(-img_y1) as u32;
        crop.must_crop = true;
    }
    if img_x2 > page_w_px + img_x1 {
        crop.x2 = snap(page_w_px - img_x1) as u32;
        crop.must_crop = true;
    }
    if img_y2 > page_h_px + img_y1 {
        crop.y2 = snap(page_h_px - img_y1) as u32;
        crop.must_crop = true;
    }

    // Images under a page pixel wide can truncate to nothing; keep one pixel
    crop.x2 = crop.x2.max(crop.x1 + 1);
    crop.y2 = crop.y2.max(crop.y1 + 1);

    crop
}
