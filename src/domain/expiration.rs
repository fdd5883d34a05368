//! Period-After-Opening expiration tracking.

use std::{cmp::Ordering, fmt, num::NonZeroU32, str::FromStr};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// How close a product is to its expiration date.
///
/// The variants partition the integer day axis:
///
/// | days until expiration | status     |
/// |-----------------------|------------|
/// | < 0                   | expired    |
/// | 0 to 3                | critical   |
/// | 4 to 7                | warning    |
/// | 8 to 14               | reminder   |
/// | > 14                  | good       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationStatus {
    /// More than two weeks left.
    Good,
    /// Between 8 and 14 days left.
    Reminder,
    /// Between 4 and 7 days left.
    Warning,
    /// Between 0 and 3 days left.
    Critical,
    /// Past its expiration date.
    Expired,
}

impl ExpirationStatus {
    /// All statuses, from least to most urgent.
    pub const ALL: [Self; 5] = [
        Self::Good,
        Self::Reminder,
        Self::Warning,
        Self::Critical,
        Self::Expired,
    ];

    /// Classifies a number of days until expiration.
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        match days {
            i64::MIN..=-1 => Self::Expired,
            0..=3 => Self::Critical,
            4..=7 => Self::Warning,
            8..=14 => Self::Reminder,
            _ => Self::Good,
        }
    }

    /// Urgency rank, 0 for [`Self::Good`] up to 4 for [`Self::Expired`].
    #[must_use]
    pub const fn urgency(self) -> u8 {
        match self {
            Self::Good => 0,
            Self::Reminder => 1,
            Self::Warning => 2,
            Self::Critical => 3,
            Self::Expired => 4,
        }
    }

    /// The lowercase name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Reminder => "reminder",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Expired => "expired",
        }
    }
}

impl PartialOrd for ExpirationStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExpirationStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.urgency().cmp(&other.urgency())
    }
}

impl fmt::Display for ExpirationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpirationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown expiration status: {s}"))
    }
}

/// Everything a listing needs to know about a product's expiration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpirationReport {
    /// The last day the product is considered safe to use.
    pub expiration_date: NaiveDate,
    /// Whole days from `today` until `expiration_date`; negative once expired.
    pub days_until_expiration: i64,
    /// The classification of `days_until_expiration`.
    pub status: ExpirationStatus,
}

impl PartialOrd for ExpirationReport {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reports order by urgency: fewer days remaining sorts first.
impl Ord for ExpirationReport {
    fn cmp(&self, other: &Self) -> Ordering {
        self.days_until_expiration
            .cmp(&other.days_until_expiration)
            .then_with(|| self.expiration_date.cmp(&other.expiration_date))
    }
}

/// The date a product opened on `opened` with the given PAO expires.
///
/// This is exact calendar addition. Dates beyond the representable range
/// saturate at [`NaiveDate::MAX`].
#[must_use]
pub fn expiration_date(opened: NaiveDate, pao_days: NonZeroU32) -> NaiveDate {
    opened
        .checked_add_days(Days::new(u64::from(pao_days.get())))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole calendar days from `today` until `expiration_date`.
///
/// Negative when the date has already passed.
#[must_use]
pub fn days_until_expiration(expiration_date: NaiveDate, today: NaiveDate) -> i64 {
    expiration_date.signed_duration_since(today).num_days()
}

/// Derives the expiration date, remaining days and status of a product.
///
/// ```
/// use std::num::NonZeroU32;
///
/// use chrono::NaiveDate;
/// use suncare::{expiration_status_of, ExpirationStatus};
///
/// let opened = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
/// let report = expiration_status_of(opened, NonZeroU32::new(30).unwrap(), today);
///
/// assert_eq!(report.expiration_date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
/// assert_eq!(report.days_until_expiration, 11);
/// assert_eq!(report.status, ExpirationStatus::Reminder);
/// ```
#[must_use]
pub fn expiration_status_of(
    opened: NaiveDate,
    pao_days: NonZeroU32,
    today: NaiveDate,
) -> ExpirationReport {
    let expiration_date = expiration_date(opened, pao_days);
    let days_until_expiration = days_until_expiration(expiration_date, today);
    ExpirationReport {
        expiration_date,
        days_until_expiration,
        status: ExpirationStatus::from_days(days_until_expiration),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn pao(days: u32) -> NonZeroU32 {
        NonZeroU32::new(days).unwrap()
    }

    #[test_case(-1, ExpirationStatus::Expired)]
    #[test_case(0, ExpirationStatus::Critical)]
    #[test_case(3, ExpirationStatus::Critical)]
    #[test_case(4, ExpirationStatus::Warning)]
    #[test_case(7, ExpirationStatus::Warning)]
    #[test_case(8, ExpirationStatus::Reminder)]
    #[test_case(14, ExpirationStatus::Reminder)]
    #[test_case(15, ExpirationStatus::Good)]
    #[test_case(i64::MIN, ExpirationStatus::Expired)]
    #[test_case(i64::MAX, ExpirationStatus::Good)]
    fn status_boundaries(days: i64, expected: ExpirationStatus) {
        assert_eq!(ExpirationStatus::from_days(days), expected);
    }

    #[test]
    fn status_partition_is_total_and_exclusive() {
        for days in -100..=100 {
            let matching: Vec<_> = ExpirationStatus::ALL
                .into_iter()
                .filter(|status| match status {
                    ExpirationStatus::Expired => days < 0,
                    ExpirationStatus::Critical => (0..=3).contains(&days),
                    ExpirationStatus::Warning => (4..=7).contains(&days),
                    ExpirationStatus::Reminder => (8..=14).contains(&days),
                    ExpirationStatus::Good => days > 14,
                })
                .collect();
            assert_eq!(matching.len(), 1, "day {days} matched {matching:?}");
            assert_eq!(ExpirationStatus::from_days(days), matching[0]);
        }
    }

    #[test]
    fn status_is_monotonic_in_days() {
        let mut previous = ExpirationStatus::from_days(-100);
        for days in -99..=100 {
            let status = ExpirationStatus::from_days(days);
            assert!(status <= previous, "urgency increased at day {days}");
            previous = status;
        }
    }

    #[test]
    fn january_scenario() {
        let report = expiration_status_of(date(2024, 1, 1), pao(30), date(2024, 1, 20));
        assert_eq!(report.expiration_date, date(2024, 1, 31));
        assert_eq!(report.days_until_expiration, 11);
        assert_eq!(report.status, ExpirationStatus::Reminder);
    }

    #[test_case(date(2024, 1, 1), 30; "thirty days")]
    #[test_case(date(2024, 2, 28), 1; "into leap day")]
    #[test_case(date(2023, 12, 31), 365; "across year")]
    #[test_case(date(2024, 3, 10), 730; "two years spanning leap")]
    #[test_case(date(1999, 12, 31), 36_500; "century")]
    fn expiration_round_trip(opened: NaiveDate, days: u32) {
        let expires = expiration_date(opened, pao(days));
        assert_eq!((expires - opened).num_days(), i64::from(days));
    }

    #[test]
    fn leap_day_addition() {
        assert_eq!(expiration_date(date(2024, 2, 28), pao(1)), date(2024, 2, 29));
        assert_eq!(expiration_date(date(2023, 2, 28), pao(1)), date(2023, 3, 1));
    }

    #[test]
    fn expiration_saturates_at_max_date() {
        let expires = expiration_date(NaiveDate::MAX, pao(1));
        assert_eq!(expires, NaiveDate::MAX);
    }

    #[test]
    fn expired_products_have_negative_days() {
        let report = expiration_status_of(date(2024, 1, 1), pao(30), date(2024, 2, 1));
        assert_eq!(report.days_until_expiration, -1);
        assert_eq!(report.status, ExpirationStatus::Expired);
    }

    #[test]
    fn expiration_day_itself_is_critical() {
        let report = expiration_status_of(date(2024, 1, 1), pao(30), date(2024, 1, 31));
        assert_eq!(report.days_until_expiration, 0);
        assert_eq!(report.status, ExpirationStatus::Critical);
    }

    #[test]
    fn reports_sort_most_urgent_first() {
        let today = date(2024, 6, 1);
        let mut reports = vec![
            expiration_status_of(date(2024, 1, 1), pao(365), today),
            expiration_status_of(date(2024, 1, 1), pao(30), today),
            expiration_status_of(date(2024, 5, 1), pao(35), today),
        ];
        reports.sort();
        let statuses: Vec<_> = reports.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            [
                ExpirationStatus::Expired,
                ExpirationStatus::Warning,
                ExpirationStatus::Good
            ]
        );
    }

    #[test]
    fn parses_status_names() {
        assert_eq!(
            "Critical".parse::<ExpirationStatus>().unwrap(),
            ExpirationStatus::Critical
        );
        assert!("stale".parse::<ExpirationStatus>().is_err());
    }
}
