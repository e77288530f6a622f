//! PDF Core - one image per page
//!
//! This crate provides functionality for:
//! - Probing JPEG/PNG data (format, pixel size, alpha)
//! - Converting images into PDF image XObjects (with soft masks for alpha)
//! - Building a PDF with one image page per call
//! - Placing images on pages (center, fit, fill) and cropping overflow
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Generator, ImageOptions, Mode, PageSize, Unit};
//!
//! let mut generator = Generator::new(Unit::Millimeter, PageSize::a4())?;
//! generator.add_image_file("photo.jpg", ImageOptions::new(Mode::Fit))?;
//! generator.add_image_file("poster.png", ImageOptions::new(Mode::Fill))?;
//! generator.write_file("album.pdf")?;
//! ```

mod document;
mod generator;
mod image;

pub use crate::image::{
    detect_format, encode_jpeg, generate_image_operators, probe, ImageFormat, ImageInfo,
    ImageXObject,
};
pub use document::PdfDocument;
pub use generator::Generator;
pub use page_layout::{
    crop_rect, layout, render, CropRect, ImageOptions, LayoutError, Mode, PageSize, Placement,
    Unit,
};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;
