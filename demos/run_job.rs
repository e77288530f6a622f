//! Renders a JSON job file to PDF
//! Run with: cargo run -p job --example run_job -- album.json album.pdf
//!
//! Image paths in the job resolve against the job file's directory.

use anyhow::Context;
use job::{Job, JobRunner};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let job_path = args.next().context("usage: run_job <job.json> [output.pdf]")?;
    let output = args.next().unwrap_or_else(|| "job.pdf".to_string());

    let job = Job::from_file(&job_path).with_context(|| format!("loading {job_path}"))?;
    let base_dir = Path::new(&job_path)
        .parent()
        .unwrap_or_else(|| Path::new("."));

    JobRunner::new(&job)
        .with_base_dir(base_dir)
        .render_to_file(&output)
        .with_context(|| format!("rendering {job_path}"))?;

    println!("Wrote {} images to {output}", job.images.len());
    Ok(())
}
