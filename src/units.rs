//! Unit conversion for catalog dimensions.
//!
//! Catalog products carry their dimensions in whatever unit the supplier used,
//! tagged with a short label (`dim_sku`). Placement math works in meters, so
//! every footprint goes through [`conversion_factor`] first. Unknown or missing
//! labels are treated as meters rather than rejected.

#[cfg(test)]
#[path = "units_test.rs"]
mod units_test;

/// A recognized length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Meter,
    Centimeter,
    Inch,
    Foot,
}

impl Unit {
    /// Parse a unit label, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "m" => Some(Self::Meter),
            "cm" => Some(Self::Centimeter),
            "in" => Some(Self::Inch),
            "ft" => Some(Self::Foot),
            _ => None,
        }
    }

    /// Meters per one of this unit.
    #[must_use]
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meter => 1.0,
            Self::Centimeter => 0.01,
            Self::Inch => 0.0254,
            Self::Foot => 0.3048,
        }
    }

    /// Canonical lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meter => "m",
            Self::Centimeter => "cm",
            Self::Inch => "in",
            Self::Foot => "ft",
        }
    }
}

/// Meters per unit for `label`. Unrecognized or absent labels yield `1.0`.
#[must_use]
pub fn conversion_factor(label: Option<&str>) -> f64 {
    label.and_then(Unit::parse).map_or(1.0, Unit::meters_per_unit)
}

/// Convert `value` expressed in `label` units to meters.
#[must_use]
pub fn to_meters(value: f64, label: Option<&str>) -> f64 {
    value * conversion_factor(label)
}
