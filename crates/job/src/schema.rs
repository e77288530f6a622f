//! Job JSON schema types

use crate::Result;
use page_layout::{ImageOptions, Mode, PageSize, Unit};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root job structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Working unit for all geometry (defaults to millimeters)
    #[serde(default = "default_unit")]
    pub unit: Unit,

    /// Size of every page
    #[serde(default)]
    pub page: PageSpec,

    /// Crop image parts that fall outside the page
    #[serde(default = "default_true")]
    pub crop_overflow: bool,

    /// Images, one page each, in order
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

fn default_unit() -> Unit {
    Unit::Millimeter
}

fn default_true() -> bool {
    true
}

impl Default for Job {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            page: PageSpec::default(),
            crop_overflow: true,
            images: Vec::new(),
        }
    }
}

impl Job {
    /// Create an empty job
    pub fn new(unit: Unit, page: PageSpec) -> Self {
        Self {
            unit,
            page,
            ..Self::default()
        }
    }

    /// Append an image entry
    pub fn add_image(&mut self, path: impl Into<PathBuf>, options: ImageOptions) -> &mut Self {
        self.images.push(ImageEntry {
            path: path.into(),
            mode: options.mode,
            scale: options.scale,
        });
        self
    }

    /// Set the crop policy
    pub fn set_crop_overflow(&mut self, crop_overflow: bool) -> &mut Self {
        self.crop_overflow = crop_overflow;
        self
    }

    /// Check everything that can be checked without touching the images
    pub fn validate(&self) -> Result<()> {
        self.page.resolve()?;
        Ok(())
    }

    /// Serialize back to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| crate::JobError::ParseError(e.to_string()))
    }
}

/// Page size: a named standard size or explicit dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageSpec {
    /// `{ "size": "a4", "landscape": true }`
    Named {
        size: String,
        #[serde(default)]
        landscape: bool,
    },
    /// `{ "width": 100, "height": 150, "unit": "mm" }`
    Custom(PageSize),
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::named("a4")
    }
}

impl PageSpec {
    /// Named size in portrait orientation
    pub fn named(size: &str) -> Self {
        Self::Named {
            size: size.to_string(),
            landscape: false,
        }
    }

    /// The concrete page size
    pub fn resolve(&self) -> Result<PageSize> {
        match self {
            PageSpec::Named { size, landscape } => {
                let page = PageSize::from_name(size)?;
                Ok(if *landscape {
                    page.landscape()
                } else {
                    page.portrait()
                })
            }
            PageSpec::Custom(page) => {
                page.validate()?;
                Ok(*page)
            }
        }
    }
}

impl From<PageSize> for PageSpec {
    fn from(page: PageSize) -> Self {
        Self::Custom(page)
    }
}

/// One image to place on its own page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Image file; relative paths resolve against the runner's base directory
    pub path: PathBuf,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl ImageEntry {
    /// Placement options for this entry
    pub fn options(&self) -> ImageOptions {
        ImageOptions {
            mode: self.mode,
            scale: self.scale,
        }
    }
}
