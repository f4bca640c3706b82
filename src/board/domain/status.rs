//! Derived cycle lifecycle status.

use super::ParseCycleStatusError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a cycle, derived from its dates and today's date.
///
/// Tasks carry a copy of their cycle's status taken when the task was
/// created. That copy is not refreshed when the cycle's status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    /// The cycle has not started yet.
    Pending,
    /// The cycle is running.
    Open,
    /// The cycle has ended.
    Closed,
}

impl CycleStatus {
    /// Resolves the status for a cycle spanning `starts_on..=ends_on`.
    ///
    /// Rules are checked in order and the first match wins: a cycle whose
    /// end date is before `today` is closed, one whose start date is on or
    /// before `today` is open, anything else is pending.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use percurso::board::domain::CycleStatus;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).expect("valid date");
    /// assert_eq!(CycleStatus::resolve(day(1), day(9), day(5)), CycleStatus::Open);
    /// assert_eq!(CycleStatus::resolve(day(6), day(9), day(5)), CycleStatus::Pending);
    /// assert_eq!(CycleStatus::resolve(day(1), day(4), day(5)), CycleStatus::Closed);
    /// ```
    #[must_use]
    pub fn resolve(starts_on: NaiveDate, ends_on: NaiveDate, today: NaiveDate) -> Self {
        if ends_on < today {
            Self::Closed
        } else if starts_on <= today {
            Self::Open
        } else {
            Self::Pending
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl TryFrom<&str> for CycleStatus {
    type Error = ParseCycleStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseCycleStatusError(value.to_owned())),
        }
    }
}
