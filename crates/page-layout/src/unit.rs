//! Length units
//!
//! The point (1/72 inch) is the base unit. Every other unit is a fixed,
//! positive number of points.

use crate::LayoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Points per inch
const POINTS_PER_INCH: f64 = 72.0;
/// Points per centimeter (1 inch = 2.54 cm)
const POINTS_PER_CM: f64 = POINTS_PER_INCH / 2.54;
/// Points per millimeter
const POINTS_PER_MM: f64 = POINTS_PER_CM / 10.0;

/// Length unit used for page sizes and placement geometry
///
/// Deserializes from any name `FromStr` accepts ("mm", "Inches", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Unit {
    /// 1/72 inch, the base unit
    #[default]
    #[serde(rename = "pt")]
    Point,
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "in")]
    Inch,
}

impl Unit {
    /// All supported units
    pub const ALL: [Unit; 4] = [Unit::Point, Unit::Millimeter, Unit::Centimeter, Unit::Inch];

    /// Number of points in one of this unit
    pub const fn points_per_unit(self) -> f64 {
        match self {
            Unit::Point => 1.0,
            Unit::Millimeter => POINTS_PER_MM,
            Unit::Centimeter => POINTS_PER_CM,
            Unit::Inch => POINTS_PER_INCH,
        }
    }

    /// Short name as used in PDF tooling ("pt", "mm", "cm", "in")
    pub const fn short_name(self) -> &'static str {
        match self {
            Unit::Point => "pt",
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Inch => "in",
        }
    }

    /// Convert a length in this unit to points
    pub fn to_points(self, value: f64) -> f64 {
        value * self.points_per_unit()
    }

    /// Convert a length in points to this unit
    pub fn from_points(self, points: f64) -> f64 {
        points / self.points_per_unit()
    }

    /// Factor that turns a length in `self` into a length in `target`
    pub fn ratio_to(self, target: Unit) -> f64 {
        self.points_per_unit() / target.points_per_unit()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl TryFrom<String> for Unit {
    type Error = LayoutError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Unit {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" | "point" | "points" => Ok(Unit::Point),
            "mm" | "millimeter" | "millimeters" => Ok(Unit::Millimeter),
            "cm" | "centimeter" | "centimeters" => Ok(Unit::Centimeter),
            "in" | "inch" | "inches" => Ok(Unit::Inch),
            _ => Err(LayoutError::UnknownUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_is_base_unit() {
        assert_eq!(Unit::Point.points_per_unit(), 1.0);
        assert_eq!(Unit::Inch.points_per_unit(), 72.0);
    }

    #[test]
    fn test_derived_ratios() {
        assert!((Unit::Centimeter.points_per_unit() - 28.346_456_692_913_385).abs() < 1e-9);
        assert!((Unit::Millimeter.points_per_unit() - 2.834_645_669_291_338_5).abs() < 1e-9);
        assert!(
            (Unit::Centimeter.points_per_unit() / Unit::Millimeter.points_per_unit() - 10.0).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_all_ratios_positive() {
        for unit in Unit::ALL {
            assert!(unit.points_per_unit() > 0.0, "{unit} must be positive");
        }
    }

    #[test]
    fn test_to_and_from_points() {
        assert_eq!(Unit::Inch.to_points(2.0), 144.0);
        assert_eq!(Unit::Inch.from_points(36.0), 0.5);
        let mm = Unit::Millimeter.from_points(Unit::Millimeter.to_points(210.0));
        assert!((mm - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_to() {
        assert_eq!(Unit::Inch.ratio_to(Unit::Point), 72.0);
        assert!((Unit::Inch.ratio_to(Unit::Centimeter) - 2.54).abs() < 1e-12);
        assert_eq!(Unit::Millimeter.ratio_to(Unit::Millimeter), 1.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("pt".parse::<Unit>().unwrap(), Unit::Point);
        assert_eq!("MM".parse::<Unit>().unwrap(), Unit::Millimeter);
        assert_eq!(" centimeter ".parse::<Unit>().unwrap(), Unit::Centimeter);
        assert_eq!("inches".parse::<Unit>().unwrap(), Unit::Inch);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "furlong".parse::<Unit>(),
            Err(LayoutError::UnknownUnit("furlong".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Unit::Inch.to_string(), "in");
        assert_eq!(format!("{}", Unit::Millimeter), "mm");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Unit::Centimeter).unwrap(), "\"cm\"");
        let unit: Unit = serde_json::from_str("\"inch\"").unwrap();
        assert_eq!(unit, Unit::Inch);
        let unit: Unit = serde_json::from_str("\"MM\"").unwrap();
        assert_eq!(unit, Unit::Millimeter);
        let unit: Unit = serde_json::from_str("\"Points\"").unwrap();
        assert_eq!(unit, Unit::Point);
        assert!(serde_json::from_str::<Unit>("\"furlong\"").is_err());
    }
}
