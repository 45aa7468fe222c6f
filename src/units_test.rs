#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// conversion_factor
// =============================================================

#[test]
fn factor_known_units() {
    assert_eq!(conversion_factor(Some("m")), 1.0);
    assert_eq!(conversion_factor(Some("cm")), 0.01);
    assert_eq!(conversion_factor(Some("in")), 0.0254);
    assert_eq!(conversion_factor(Some("ft")), 0.3048);
}

#[test]
fn factor_is_case_insensitive() {
    assert_eq!(conversion_factor(Some("CM")), 0.01);
    assert_eq!(conversion_factor(Some("Ft")), 0.3048);
    assert_eq!(conversion_factor(Some("IN")), 0.0254);
}

#[test]
fn factor_ignores_surrounding_whitespace() {
    assert_eq!(conversion_factor(Some(" cm ")), 0.01);
}

#[test]
fn factor_unknown_label_is_meters() {
    assert_eq!(conversion_factor(Some("unknown")), 1.0);
    assert_eq!(conversion_factor(Some("mm")), 1.0);
    assert_eq!(conversion_factor(Some("")), 1.0);
}

#[test]
fn factor_absent_label_is_meters() {
    assert_eq!(conversion_factor(None), 1.0);
}

// =============================================================
// Unit
// =============================================================

#[test]
fn unit_parse_and_label_agree() {
    for unit in [Unit::Meter, Unit::Centimeter, Unit::Inch, Unit::Foot] {
        assert_eq!(Unit::parse(unit.as_str()), Some(unit));
    }
}

#[test]
fn unit_parse_rejects_unknown() {
    assert_eq!(Unit::parse("yd"), None);
}

#[test]
fn to_meters_converts_inches() {
    assert!((to_meters(100.0, Some("in")) - 2.54).abs() < 1e-12);
}

#[test]
fn to_meters_unknown_passes_through() {
    assert_eq!(to_meters(3.5, Some("furlong")), 3.5);
}
