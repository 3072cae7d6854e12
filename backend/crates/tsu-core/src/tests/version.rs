use crate::{CoreError, Version};

use std::str::FromStr;

fn v(s: &str) -> Version {
    Version::from_str(s).unwrap()
}

#[test]
fn test_parse_four_segments() {
    assert_eq!(v("3.0.13.5").segments(), &[3, 0, 13, 5]);
}

#[test]
fn test_parse_accepts_v_prefix_and_whitespace() {
    assert_eq!(v(" v3.12.1\n").segments(), &[3, 12, 1]);
}

#[test]
fn test_parse_rejects_garbage() {
    for input in ["", "   ", "v", "3..1", ".3", "3.", "3.0-beta", "3.a.1", "-1.0", "+3"] {
        let result = Version::from_str(input);
        assert!(
            matches!(result, Err(CoreError::InvalidVersion { .. })),
            "expected '{}' to be rejected",
            input
        );
    }
}

#[test]
fn test_parse_rejects_overflowing_segment() {
    assert!(Version::from_str("3.99999999999999999999999").is_err());
}

#[test]
fn test_missing_segment_is_older() {
    assert!(v("3.0.13").is_older_than(&v("3.0.13.5")));
    assert!(!v("3.0.13.5").is_older_than(&v("3.0.13")));
}

#[test]
fn test_trailing_zero_segments_are_equal() {
    assert_eq!(v("3.0"), v("3.0.0.0"));
    assert!(!v("3.0").is_older_than(&v("3.0.0")));
}

#[test]
fn test_numeric_not_lexical_compare() {
    assert!(v("3.0.9").is_older_than(&v("3.0.10")));
    assert!(v("3.9.0").is_older_than(&v("3.10.0")));
}

#[test]
fn test_equal_versions_are_not_older() {
    assert!(!v("3.0.13.5").is_older_than(&v("3.0.13.5")));
}

#[test]
fn test_leading_zeros_compare_numerically() {
    assert_eq!(v("3.01"), v("3.1"));
}

#[test]
fn test_display_joins_segments() {
    assert_eq!(v("v3.0.13.5").to_string(), "3.0.13.5");
}
