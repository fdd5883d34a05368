use std::{fmt, str::FromStr};

/// A UV index reading.
///
/// The value is always finite and non-negative. An absent reading (not yet
/// fetched, or the fetch failed) is represented as `Option::<UvIndex>::None`
/// by callers rather than by a special value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct UvIndex(f64);

impl UvIndex {
    /// Creates a new UV index reading.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUvIndex`] if the value is negative, NaN or infinite.
    pub fn new(value: f64) -> Result<Self, InvalidUvIndex> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidUvIndex(value))
        }
    }

    /// Returns the raw reading.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the exposure band this reading falls into.
    #[must_use]
    pub fn band(self) -> UvBand {
        UvBand::of(self)
    }
}

impl TryFrom<f64> for UvIndex {
    type Error = InvalidUvIndex;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for UvIndex {
    type Err = InvalidUvIndex;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| InvalidUvIndex(f64::NAN))?;
        Self::new(value)
    }
}

impl fmt::Display for UvIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Error returned when a UV reading is negative or not a finite number.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Invalid UV index '{0}': must be a finite, non-negative number")]
pub struct InvalidUvIndex(f64);

/// Exposure bands used to pick the base reapplication time.
///
/// Thresholds are checked from the highest band down and the first match
/// wins, so a reading of exactly 8.0 is [`UvBand::VeryHigh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UvBand {
    /// UV index below 3.
    Low,
    /// UV index from 3 up to (but excluding) 6.
    Moderate,
    /// UV index from 6 up to (but excluding) 8.
    High,
    /// UV index of 8 or more.
    VeryHigh,
}

impl UvBand {
    /// Classifies a reading.
    #[must_use]
    pub fn of(uv: UvIndex) -> Self {
        let value = uv.value();
        if value >= 8.0 {
            Self::VeryHigh
        } else if value >= 6.0 {
            Self::High
        } else if value >= 3.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Minutes of protection before any skin or product adjustment.
    #[must_use]
    pub const fn base_minutes(self) -> u32 {
        match self {
            Self::VeryHigh => 60,
            Self::High => 90,
            Self::Moderate => 120,
            Self::Low => 180,
        }
    }
}

impl fmt::Display for UvBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very high",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0.0, UvBand::Low; "zero")]
    #[test_case(2.99, UvBand::Low; "just below moderate")]
    #[test_case(3.0, UvBand::Moderate; "moderate lower bound")]
    #[test_case(5.99, UvBand::Moderate; "just below high")]
    #[test_case(6.0, UvBand::High; "high lower bound")]
    #[test_case(7.99, UvBand::High; "just below very high")]
    #[test_case(8.0, UvBand::VeryHigh; "very high lower bound")]
    #[test_case(11.5, UvBand::VeryHigh; "extreme reading")]
    fn band_thresholds(value: f64, expected: UvBand) {
        assert_eq!(UvIndex::new(value).unwrap().band(), expected);
    }

    #[test_case(UvBand::VeryHigh, 60)]
    #[test_case(UvBand::High, 90)]
    #[test_case(UvBand::Moderate, 120)]
    #[test_case(UvBand::Low, 180)]
    fn base_minutes_per_band(band: UvBand, expected: u32) {
        assert_eq!(band.base_minutes(), expected);
    }

    #[test_case(-0.1; "negative")]
    #[test_case(f64::NAN; "nan")]
    #[test_case(f64::INFINITY; "infinite")]
    fn rejects_invalid_readings(value: f64) {
        assert!(UvIndex::new(value).is_err());
    }

    #[test]
    fn parses_from_text() {
        let uv: UvIndex = " 8.5 ".parse().unwrap();
        assert!((uv.value() - 8.5).abs() < f64::EPSILON);
        assert!("high".parse::<UvIndex>().is_err());
        assert!("-1".parse::<UvIndex>().is_err());
    }

    #[test]
    fn displays_one_decimal_place() {
        assert_eq!(UvIndex::new(6.27).unwrap().to_string(), "6.3");
        assert_eq!(UvIndex::new(3.0).unwrap().to_string(), "3.0");
    }
}
