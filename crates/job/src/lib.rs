//! Job descriptions - JSON-driven image-to-PDF runs
//!
//! This crate provides:
//! - Job JSON schema types (page, unit, crop policy, image list)
//! - Job parsing from JSON strings and files
//! - Rendering a job to PDF bytes or a file
//!
//! # Example
//!
//! ```ignore
//! use job::{Job, JobRunner};
//!
//! let job = Job::from_file("album.json")?;
//! JobRunner::new(&job)
//!     .with_base_dir("photos")
//!     .render_to_file("album.pdf")?;
//! ```

pub mod parser;
mod runner;
mod schema;

pub use parser::parse_job;
pub use runner::JobRunner;
pub use schema::*;

use page_layout::LayoutError;
use pdf_core::PdfError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or running a job
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Failed to parse job: {0}")]
    ParseError(String),

    #[error("Failed to add image {}: {source}", path.display())]
    ImageError { path: PathBuf, source: PdfError },

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for job operations
pub type Result<T> = std::result::Result<T, JobError>;
