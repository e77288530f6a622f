//! Page sizes

use crate::{LayoutError, Result, Unit};
use serde::{Deserialize, Serialize};

/// Page width and height, tagged with the unit they are measured in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: Unit,
}

impl PageSize {
    /// Create a page size, rejecting non-positive sides
    ///
    /// # Arguments
    /// * `width` - Page width in `unit`
    /// * `height` - Page height in `unit`
    /// * `unit` - Unit of both sides
    pub fn new(width: f64, height: f64, unit: Unit) -> Result<Self> {
        let size = Self {
            width,
            height,
            unit,
        };
        size.validate()?;
        Ok(size)
    }

    const fn points(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            unit: Unit::Point,
        }
    }

    /// A1 (594 x 841 mm)
    pub const fn a1() -> Self {
        Self::points(1683.78, 2383.94)
    }

    /// A2 (420 x 594 mm)
    pub const fn a2() -> Self {
        Self::points(1190.55, 1683.78)
    }

    /// A3 (297 x 420 mm)
    pub const fn a3() -> Self {
        Self::points(841.89, 1190.55)
    }

    /// A4 (210 x 297 mm)
    pub const fn a4() -> Self {
        Self::points(595.28, 841.89)
    }

    /// A5 (148 x 210 mm)
    pub const fn a5() -> Self {
        Self::points(420.94, 595.28)
    }

    /// A6 (105 x 148 mm)
    pub const fn a6() -> Self {
        Self::points(297.64, 420.94)
    }

    /// US Letter (8.5 x 11 in)
    pub const fn letter() -> Self {
        Self::points(612.0, 792.0)
    }

    /// US Legal (8.5 x 14 in)
    pub const fn legal() -> Self {
        Self::points(612.0, 1008.0)
    }

    /// Tabloid (11 x 17 in)
    pub const fn tabloid() -> Self {
        Self::points(792.0, 1224.0)
    }

    /// Look up a named standard size ("a4", "Letter", ...)
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "a1" => Ok(Self::a1()),
            "a2" => Ok(Self::a2()),
            "a3" => Ok(Self::a3()),
            "a4" => Ok(Self::a4()),
            "a5" => Ok(Self::a5()),
            "a6" => Ok(Self::a6()),
            "letter" => Ok(Self::letter()),
            "legal" => Ok(Self::legal()),
            "tabloid" => Ok(Self::tabloid()),
            _ => Err(LayoutError::UnknownPageSize(name.to_string())),
        }
    }

    /// Check that both sides are positive (and not NaN)
    pub fn validate(&self) -> Result<()> {
        if self.width > 0.0 && self.height > 0.0 {
            Ok(())
        } else {
            Err(LayoutError::InvalidPageSize(self.width, self.height))
        }
    }

    /// Swap width and height (portrait <-> landscape)
    pub fn rotate(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            unit: self.unit,
        }
    }

    /// Re-express the size in another unit
    pub fn convert(self, to: Unit) -> Self {
        let from = self.unit.points_per_unit();
        let to_ppu = to.points_per_unit();
        Self {
            width: self.width * from / to_ppu,
            height: self.height * from / to_ppu,
            unit: to,
        }
    }

    /// True when the page is wider than tall
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// This size in landscape orientation
    pub fn landscape(self) -> Self {
        if self.is_landscape() {
            self
        } else {
            self.rotate()
        }
    }

    /// This size in portrait orientation
    pub fn portrait(self) -> Self {
        if self.is_landscape() {
            self.rotate()
        } else {
            self
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::a4()
    }
}

/// Re-express `size` in `to`; the source unit is the one carried by `size`
pub fn convert_page_size(size: PageSize, to: Unit) -> PageSize {
    size.convert(to)
}

/// Swap the sides of `size`
pub fn rotate(size: PageSize) -> PageSize {
    size.rotate()
}
