use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::timer::Multiplier;

/// The protection rating of the sunscreen being worn.
///
/// A product is rated either by its SPF or by its PA grade; exactly one of
/// the two is used for a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Protection {
    /// Sun Protection Factor, conventionally a multiple of 5 in `5..=75`.
    Spf(u32),
    /// Protection Grade of UVA, as the number of `+` signs (`1..=6`).
    Pa(u8),
}

impl Protection {
    /// The SPF used as the normalisation baseline.
    pub const BASELINE_SPF: u32 = 30;

    /// Whether the rating is within the conventional range: SPF 5 to 75, or
    /// PA+ to PA++++++.
    #[must_use]
    pub const fn is_recognised(self) -> bool {
        match self {
            Self::Spf(n) => n >= 5 && n <= 75,
            Self::Pa(n) => n >= 1 && n <= 6,
        }
    }

    /// The adjustment applied after the skin adjustment.
    ///
    /// `SPF n` scales by `n / 30` for every `n`, so a stronger SPF never
    /// shortens the interval. `SPF 0` scales to zero minutes. `PA n` scales by
    /// `1 + n`; a grade outside `1..=6` is not a real PA rating and scales
    /// by 1.
    #[must_use]
    pub const fn multiplier(self) -> Multiplier {
        match self {
            Self::Spf(n) => Multiplier::new(n, Self::BASELINE_SPF),
            Self::Pa(n) if self.is_recognised() => Multiplier::new(1 + n as u32, 1),
            Self::Pa(_) => Multiplier::IDENTITY,
        }
    }
}

impl Default for Protection {
    fn default() -> Self {
        Self::Spf(Self::BASELINE_SPF)
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Spf(n) => write!(f, "SPF {n}"),
            Self::Pa(n) if (1..=6).contains(&n) => {
                write!(f, "PA{}", "+".repeat(usize::from(n)))
            }
            Self::Pa(n) => write!(f, "PA{n}"),
        }
    }
}

/// Errors that can occur when parsing a protection rating.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProtectionParseError {
    /// The rating did not start with `SPF` or `PA`.
    #[error("Invalid protection rating '{0}': expected e.g. 'SPF30' or 'PA+++'")]
    Syntax(String),

    /// The grade following the prefix was missing or not a number.
    #[error("Invalid protection grade in '{0}'")]
    Grade(String),
}

impl FromStr for Protection {
    type Err = ProtectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();

        if let Some(rest) = upper.strip_prefix("SPF") {
            let grade = rest.trim().trim_end_matches('+');
            return grade
                .parse()
                .map(Self::Spf)
                .map_err(|_| ProtectionParseError::Grade(trimmed.to_string()));
        }

        if let Some(rest) = upper.strip_prefix("PA") {
            let rest = rest.trim();
            if !rest.is_empty() && rest.chars().all(|c| c == '+') {
                let level = u8::try_from(rest.len())
                    .map_err(|_| ProtectionParseError::Grade(trimmed.to_string()))?;
                return Ok(Self::Pa(level));
            }
            return rest
                .parse()
                .map(Self::Pa)
                .map_err(|_| ProtectionParseError::Grade(trimmed.to_string()));
        }

        Err(ProtectionParseError::Syntax(trimmed.to_string()))
    }
}

impl TryFrom<String> for Protection {
    type Error = ProtectionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Protection> for String {
    fn from(protection: Protection) -> Self {
        protection.to_string()
    }
}
