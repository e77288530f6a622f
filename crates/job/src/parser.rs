//! Job JSON parsing

use crate::{Job, JobError, Result};
use std::path::Path;

/// Parse and validate a job from a JSON string
pub fn parse_job(json: &str) -> Result<Job> {
    let job: Job = serde_json::from_str(json).map_err(|e| JobError::ParseError(e.to_string()))?;
    job.validate()?;
    Ok(job)
}

impl Job {
    /// Parse a job from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        parse_job(json)
    }

    /// Read and parse a job file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        parse_job(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_layout::{LayoutError, Mode, PageSize, Unit};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_job() {
        let json = r#"{
            "unit": "mm",
            "page": { "size": "a4", "landscape": false },
            "cropOverflow": true,
            "images": [
                { "path": "cat.jpg", "mode": "fill", "scale": 1.0 },
                { "path": "dog.png", "mode": "fit" }
            ]
        }"#;

        let job = parse_job(json).unwrap();
        assert_eq!(job.unit, Unit::Millimeter);
        assert_eq!(job.page.resolve().unwrap(), PageSize::a4());
        assert_eq!(job.images.len(), 2);
        assert_eq!(job.images[0].mode, Mode::Fill);
        assert_eq!(job.images[0].scale, Some(1.0));
        assert_eq!(job.images[1].scale, None);
    }

    #[test]
    fn test_parse_unit_names() {
        for (name, unit) in [("pt", Unit::Point), ("cm", Unit::Centimeter), ("inch", Unit::Inch)] {
            let job = parse_job(&format!(r#"{{"unit": "{name}"}}"#)).unwrap();
            assert_eq!(job.unit, unit);
        }
    }

    #[test]
    fn test_parse_names_case_insensitively() {
        let json = r#"{
            "unit": "MM",
            "page": { "width": 4, "height": 6, "unit": "Inches" },
            "images": [
                { "path": "a.png", "mode": "Fill" },
                { "path": "b.png", "mode": "FIT" }
            ]
        }"#;

        let job = parse_job(json).unwrap();
        assert_eq!(job.unit, Unit::Millimeter);
        assert_eq!(job.page.resolve().unwrap().unit, Unit::Inch);
        assert_eq!(job.images[0].mode, Mode::Fill);
        assert_eq!(job.images[1].mode, Mode::Fit);

        let job = parse_job(r#"{"unit": "points"}"#).unwrap();
        assert_eq!(job.unit, Unit::Point);
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        assert!(matches!(parse_job("{"), Err(JobError::ParseError(_))));
        assert!(matches!(
            parse_job(r#"{"unit": "furlong"}"#),
            Err(JobError::ParseError(_))
        ));
        assert!(matches!(
            parse_job(r#"{"images": [{"path": "a.png", "mode": "stretch"}]}"#),
            Err(JobError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_page_name() {
        assert!(matches!(
            parse_job(r#"{"page": {"size": "quarto"}}"#),
            Err(JobError::Layout(LayoutError::UnknownPageSize(_)))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            Job::from_file("no/such/job.json"),
            Err(JobError::Io(_))
        ));
    }
}
