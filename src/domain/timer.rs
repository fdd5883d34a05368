//! Sunscreen reapplication timer.
//!
//! The recommended interval is derived in four steps, each of which
//! truncates to whole minutes before the next is applied:
//!
//! 1. a base time from the [`UvBand`] of the current reading,
//! 2. the [`SkinClass`] adjustment,
//! 3. the [`Protection`] adjustment,
//! 4. [`round_down_timer`].

use std::fmt;

use crate::domain::{Protection, SkinClass, UvBand, UvIndex};

/// Minute remainders (within the hour) that are never rounded.
const PRESERVED_REMAINDERS: [u32; 6] = [8, 18, 28, 38, 48, 58];

/// An exact rational scale factor.
///
/// Kept as a ratio so that applying it is an exact floor of the real product,
/// without floating point error at the truncation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Multiplier {
    numerator: u32,
    denominator: u32,
}

impl Multiplier {
    /// Leaves values unchanged.
    pub const IDENTITY: Self = Self::new(1, 1);

    /// Creates a multiplier of `numerator / denominator`.
    ///
    /// A zero denominator is treated as 1.
    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator: if denominator == 0 { 1 } else { denominator },
        }
    }

    /// Scales `minutes`, truncating toward zero.
    #[must_use]
    pub fn apply(self, minutes: u32) -> u32 {
        let scaled = u64::from(minutes) * u64::from(self.numerator) / u64::from(self.denominator);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }

    /// The multiplier as a float, for display.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{:.2}", self.as_f64())
    }
}

/// Rounds a timer down to a "safe" value.
///
/// Values whose remainder within the hour is one of 8, 18, 28, 38, 48 or 58
/// are returned unchanged. Otherwise the value is rounded down to the nearest
/// ten when its last digit is below 8, and left unchanged when it is 8 or 9.
///
/// ```
/// use suncare::domain::timer::round_down_timer;
///
/// assert_eq!(round_down_timer(118), 118);
/// assert_eq!(round_down_timer(121), 120);
/// assert_eq!(round_down_timer(129), 129);
/// ```
#[must_use]
pub fn round_down_timer(minutes: u32) -> u32 {
    if PRESERVED_REMAINDERS.contains(&(minutes % 60)) {
        return minutes;
    }
    let digit = minutes % 10;
    if digit < 8 { minutes - digit } else { minutes }
}

/// Every intermediate value of a reapplication timer calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReapplicationPlan {
    /// The reading the plan was computed from.
    pub uv: UvIndex,
    /// The exposure band of the reading.
    pub band: UvBand,
    /// Base minutes for the band.
    pub base: u32,
    /// Minutes after the skin class adjustment.
    pub skin_adjusted: u32,
    /// Minutes after the protection adjustment.
    pub protection_adjusted: u32,
    /// The recommended interval, after rounding.
    pub minutes: u32,
}

/// Computes the full reapplication plan.
///
/// Returns `None` when there is no UV reading.
#[must_use]
pub fn plan_reapplication(
    uv: Option<UvIndex>,
    skin: SkinClass,
    protection: Protection,
) -> Option<ReapplicationPlan> {
    let uv = uv?;
    let band = uv.band();
    let base = band.base_minutes();
    let skin_adjusted = skin.multiplier().apply(base);
    let protection_adjusted = protection.multiplier().apply(skin_adjusted);
    let minutes = round_down_timer(protection_adjusted);

    tracing::trace!(
        %uv, %band, base, skin = %skin, skin_adjusted, %protection, protection_adjusted, minutes,
        "computed reapplication plan"
    );

    Some(ReapplicationPlan {
        uv,
        band,
        base,
        skin_adjusted,
        protection_adjusted,
        minutes,
    })
}

/// Computes the recommended number of minutes before sunscreen must be
/// reapplied.
///
/// Returns `0` when no UV reading is available. Callers must treat `0` as
/// "not computable" rather than as a real duration.
///
/// ```
/// use suncare::{compute_reapplication_minutes, Protection, SkinClass, UvIndex};
///
/// let uv = UvIndex::new(8.5).unwrap();
/// let minutes = compute_reapplication_minutes(Some(uv), SkinClass::new(1), Protection::Spf(15));
/// assert_eq!(minutes, 20);
///
/// assert_eq!(compute_reapplication_minutes(None, SkinClass::new(1), Protection::Spf(15)), 0);
/// ```
#[must_use]
pub fn compute_reapplication_minutes(
    uv: Option<UvIndex>,
    skin: SkinClass,
    protection: Protection,
) -> u32 {
    plan_reapplication(uv, skin, protection).map_or(0, |plan| plan.minutes)
}
