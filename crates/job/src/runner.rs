//! Job rendering

use crate::{Job, JobError, Result};
use pdf_core::Generator;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runs a job through the generator
pub struct JobRunner<'a> {
    /// The job to render
    job: &'a Job,
    /// Directory relative image paths resolve against
    base_dir: Option<PathBuf>,
}

impl<'a> JobRunner<'a> {
    /// Create a runner; relative paths resolve against the current directory
    pub fn new(job: &'a Job) -> Self {
        Self {
            job,
            base_dir: None,
        }
    }

    /// Resolve relative image paths against `dir`
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Where the entry at `path` is read from
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Render the job to PDF bytes
    pub fn render(&self) -> Result<Vec<u8>> {
        let mut generator = self.build()?;
        Ok(generator.to_bytes()?)
    }

    /// Render the job to a PDF file
    pub fn render_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut generator = self.build()?;
        generator.write_file(path)?;
        Ok(())
    }

    /// Add every image of the job, in order
    fn build(&self) -> Result<Generator> {
        let page = self.job.page.resolve()?;
        let mut generator =
            Generator::new(self.job.unit, page)?.with_crop_overflow(self.job.crop_overflow);

        info!(
            images = self.job.images.len(),
            unit = %self.job.unit,
            crop_overflow = self.job.crop_overflow,
            "Rendering job"
        );

        for entry in &self.job.images {
            let path = self.resolve_path(&entry.path);
            debug!(path = %path.display(), mode = ?entry.mode, scale = ?entry.scale, "Adding image");
            generator
                .add_image_file(&path, entry.options())
                .map_err(|source| JobError::ImageError { path, source })?;
        }

        Ok(generator)
    }
}
