use std::fmt;

/// Release version extracted from a tag name
///
/// Components are kept as the decimal strings found in the tag, so
/// `GNET-01_2.3` yields `("01", "2", "3")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion {
    pub major: String,
    pub minor: String,
    pub patch: String,
}

impl ReleaseVersion {
    /// Create a new release version from its three components
    pub fn new(major: impl Into<String>, minor: impl Into<String>, patch: impl Into<String>) -> Self {
        ReleaseVersion {
            major: major.into(),
            minor: minor.into(),
            patch: patch.into(),
        }
    }

    /// The components as a string triple, in tag order
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.major, &self.minor, &self.patch)
    }
}

/// Renders a string of decimal digits as an integer: leading zeros go away,
/// and an all-zero string renders as `0`.
fn as_integer(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            as_integer(&self.major),
            as_integer(&self.minor),
            as_integer(&self.patch)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ReleaseVersion::new("1", "2", "3").to_string(), "1.2.3");
    }

    #[test]
    fn test_display_drops_leading_zeros() {
        assert_eq!(ReleaseVersion::new("01", "002", "10").to_string(), "1.2.10");
    }

    #[test]
    fn test_display_zero_components() {
        assert_eq!(ReleaseVersion::new("0", "00", "0").to_string(), "0.0.0");
    }

    #[test]
    fn test_display_beyond_u64() {
        let v = ReleaseVersion::new("0099999999999999999999", "1", "0");
        assert_eq!(v.to_string(), "99999999999999999999.1.0");
    }

    #[test]
    fn test_tuple_keeps_raw_strings() {
        let v = ReleaseVersion::new("01", "2", "3");
        assert_eq!(v.as_tuple(), ("01", "2", "3"));
    }
}
