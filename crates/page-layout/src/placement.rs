//! Image placement on a page

use crate::{check_dimensions, LayoutError, PageSize, Result, Unit};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How an image is sized relative to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Mode {
    /// Keep the image's natural size (1 px = 1 pt) and center it
    #[default]
    Center,
    /// Largest uniform scale at which the whole image is visible
    Fit,
    /// Smallest uniform scale at which the image covers the whole page
    Fill,
}

impl TryFrom<String> for Mode {
    type Error = LayoutError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Mode {
    type Err = LayoutError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "center" => Ok(Mode::Center),
            "fit" => Ok(Mode::Fit),
            "fill" => Ok(Mode::Fill),
            _ => Err(LayoutError::UnknownMode(s.to_string())),
        }
    }
}

/// Placement request for one image
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageOptions {
    #[serde(default)]
    pub mode: Mode,
    /// Extra uniform scale applied after the mode; absent or <= 0 means 1
    #[serde(default)]
    pub scale: Option<f64>,
}

impl ImageOptions {
    /// Options for `mode` without extra scaling
    pub fn new(mode: Mode) -> Self {
        Self { mode, scale: None }
    }

    /// Set the extra scale factor
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// The scale factor actually applied
    pub fn effective_scale(&self) -> f64 {
        match self.scale {
            Some(scale) if scale > 0.0 => scale,
            _ => 1.0,
        }
    }
}

/// Where an image lands on the page
///
/// Coordinates are in the working unit with the origin at the top-left page
/// corner and y growing downward. `x` and `y` are negative when the image is
/// larger than the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// True when the placed image lies entirely inside a page of the given size
    pub fn is_within(&self, page_width: f64, page_height: f64) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= page_width && self.bottom() <= page_height
    }
}

/// Compute where an image goes on the page
///
/// # Arguments
/// * `page` - Page size, in any unit (converted to `unit` first)
/// * `unit` - Working unit of the result
/// * `width_px` - Image width in pixels
/// * `height_px` - Image height in pixels
/// * `options` - Placement mode and scale
///
/// # Returns
/// Position and size in `unit`
pub fn layout(
    page: PageSize,
    unit: Unit,
    width_px: u32,
    height_px: u32,
    options: &ImageOptions,
) -> Result<Placement> {
    page.validate()?;
    check_dimensions(width_px, height_px)?;

    let page = page.convert(unit);
    Ok(place(page.width, page.height, unit, width_px, height_px, options))
}

/// Placement arithmetic on already validated, already converted inputs
pub(crate) fn place(
    page_w: f64,
    page_h: f64,
    unit: Unit,
    width_px: u32,
    height_px: u32,
    options: &ImageOptions,
) -> Placement {
    // Pixels count as points (72 DPI)
    let f = unit.points_per_unit();
    let img_w = width_px as f64 / f;
    let img_h = height_px as f64 / f;

    let (mut w, mut h) = match options.mode {
        Mode::Center => (img_w, img_h),
        Mode::Fit => {
            if img_w / img_h > page_w / page_h {
                (page_w, page_w * img_h / img_w)
            } else {
                (page_h * img_w / img_h, page_h)
            }
        }
        Mode::Fill => {
            if img_w / img_h < page_w / page_h {
                (page_w, page_w * img_h / img_w)
            } else {
                (page_h * img_w / img_h, page_h)
            }
        }
    };

    if let Some(scale) = options.scale.filter(|s| *s > 0.0) {
        w *= scale;
        h *= scale;
    }

    Placement {
        x: page_w / 2.0 - w / 2.0,
        y: page_h / 2.0 - h / 2.0,
        width: w,
        height: h,
    }
}
