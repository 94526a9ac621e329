//! Bus-power current quantities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current in milliamps, as reported by the enumeration tool
///
/// Only ever built from text carrying at least one digit; a missing or
/// digit-free value means "unknown", which is distinct from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilliAmps(pub u32);

impl MilliAmps {
    /// Parse free-form text such as `"500mA"` or `"Up to 900 mA"`
    ///
    /// Every non-digit character is dropped and the remaining digits are read
    /// as one integer, so `"0.5 A"` yields `5`. Returns `None` when no digit is
    /// present or the number does not fit.
    pub fn parse(text: Option<&str>) -> Option<Self> {
        let digits: String = text?.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok().map(MilliAmps)
    }
}

impl fmt::Display for MilliAmps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mA", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_digits() {
        assert_eq!(MilliAmps::parse(Some("500")), Some(MilliAmps(500)));
        assert_eq!(MilliAmps::parse(Some("500mA")), Some(MilliAmps(500)));
        assert_eq!(MilliAmps::parse(Some("Up to 900 mA")), Some(MilliAmps(900)));
    }

    #[test]
    fn test_parse_drops_separators() {
        assert_eq!(MilliAmps::parse(Some("0.5 A")), Some(MilliAmps(5)));
        assert_eq!(MilliAmps::parse(Some("1,500")), Some(MilliAmps(1500)));
    }

    #[test]
    fn test_parse_absent() {
        assert_eq!(MilliAmps::parse(None), None);
        assert_eq!(MilliAmps::parse(Some("")), None);
        assert_eq!(MilliAmps::parse(Some("n/a")), None);
    }

    #[test]
    fn test_parse_zero_is_a_value() {
        assert_eq!(MilliAmps::parse(Some("0")), Some(MilliAmps(0)));
    }

    #[test]
    fn test_parse_overflow_is_absent() {
        assert_eq!(MilliAmps::parse(Some("99999999999999999999")), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(MilliAmps(500).to_string(), "500 mA");
    }
}
