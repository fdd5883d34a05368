use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::timer::Multiplier;

/// A Fitzpatrick-style skin sensitivity class.
///
/// Classes run from 1 (most sensitive) to 6 (least sensitive). The raw value
/// the user entered is kept as-is: anything outside `1..=6` is not rejected,
/// it simply receives the neutral adjustment when computing timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkinClass(u8);

impl SkinClass {
    /// The lowest recognised class.
    pub const MIN: u8 = 1;
    /// The highest recognised class.
    pub const MAX: u8 = 6;

    /// Wraps a raw class value.
    #[must_use]
    pub const fn new(class: u8) -> Self {
        Self(class)
    }

    /// Returns the raw class value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether the class is one of the six recognised levels.
    #[must_use]
    pub const fn is_recognised(self) -> bool {
        self.0 >= Self::MIN && self.0 <= Self::MAX
    }

    /// The adjustment applied to the base reapplication time.
    ///
    /// - classes 1 and 2: x0.8
    /// - classes 3 and 4: x1.0
    /// - classes 5 and 6: x1.2
    /// - anything else: x1.0
    #[must_use]
    pub const fn multiplier(self) -> Multiplier {
        match self.0 {
            1 | 2 => Multiplier::new(4, 5),
            5 | 6 => Multiplier::new(6, 5),
            _ => Multiplier::IDENTITY,
        }
    }
}

impl Default for SkinClass {
    fn default() -> Self {
        Self(3)
    }
}

impl From<u8> for SkinClass {
    fn from(class: u8) -> Self {
        Self(class)
    }
}

impl fmt::Display for SkinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(1, 0.8)]
    #[test_case(2, 0.8)]
    #[test_case(3, 1.0)]
    #[test_case(4, 1.0)]
    #[test_case(5, 1.2)]
    #[test_case(6, 1.2)]
    fn recognised_classes(class: u8, expected: f64) {
        let multiplier = SkinClass::new(class).multiplier();
        assert!((multiplier.as_f64() - expected).abs() < 1e-9);
        assert!(SkinClass::new(class).is_recognised());
    }

    #[test_case(0; "zero")]
    #[test_case(7; "just above range")]
    #[test_case(u8::MAX; "max value")]
    fn unrecognised_classes_default_to_identity(class: u8) {
        let skin = SkinClass::new(class);
        assert!(!skin.is_recognised());
        assert_eq!(skin.multiplier(), Multiplier::IDENTITY);
    }
}
