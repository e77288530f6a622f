//! Page Layout - image placement geometry
//!
//! This crate provides:
//! - A linear unit system with the point as base unit
//! - Page sizes (A1-A6, Letter, Legal, Tabloid) convertible between units
//! - Image placement on a page (center, fit, fill) with optional scaling
//! - The crop rectangle, in image pixels, of the part that stays on the page
//!
//! Everything here is a pure function of its inputs.
//!
//! # Example
//!
//! ```
//! use page_layout::{render, ImageOptions, Mode, PageSize, Unit};
//!
//! let options = ImageOptions::new(Mode::Fill);
//! let (placement, crop) = render(PageSize::a4(), Unit::Point, 316, 317, &options)?;
//!
//! assert!(crop.must_crop);
//! assert_eq!(placement.height, 841.89);
//! # Ok::<(), page_layout::LayoutError>(())
//! ```

mod crop;
mod page;
mod placement;
mod unit;

pub use crop::{crop_rect, render, CropRect};
pub use page::{convert_page_size, rotate, PageSize};
pub use placement::{layout, ImageOptions, Mode, Placement};
pub use unit::Unit;

use thiserror::Error;

/// Errors raised when layout inputs break their geometric preconditions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Invalid page size: {0} x {1} (both sides must be positive)")]
    InvalidPageSize(f64, f64),

    #[error("Invalid image dimensions: {0} x {1} px (both sides must be positive)")]
    InvalidDimensions(u32, u32),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Unknown placement mode: {0}")]
    UnknownMode(String),

    #[error("Unknown page size: {0}")]
    UnknownPageSize(String),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Reject empty images before any aspect-ratio arithmetic runs
pub(crate) fn check_dimensions(width_px: u32, height_px: u32) -> Result<()> {
    if width_px == 0 || height_px == 0 {
        return Err(LayoutError::InvalidDimensions(width_px, height_px));
    }
    Ok(())
}
