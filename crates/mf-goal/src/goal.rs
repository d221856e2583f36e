// goal.rs — Goal: one monthly objective, plus the calendar month it targets.
//
// The wire format is fixed by the host application that owns the list:
// a JSON array of objects with the keys `id`, `title`, `isCompleted`,
// `year`, and `month`. Unknown keys are ignored on read.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// A user-defined monthly objective with a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Identifier assigned by the host application. Assumed unique.
    pub id: String,

    /// Display label (e.g., "Exercise"). Unbounded; the view truncates.
    pub title: String,

    /// Whether the user has checked this goal off.
    pub is_completed: bool,

    /// Target year.
    pub year: i64,

    /// Target month, 1–12 expected but never validated.
    pub month: i64,
}

impl Goal {
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: i64, month: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_completed: false,
            year,
            month,
        }
    }

    /// A copy with the completion flag flipped and every other field unchanged.
    pub fn toggled(&self) -> Self {
        Self {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }

    /// The calendar month this goal targets, after normalisation.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::normalized(self.year, self.month)
    }

    /// Whether this goal targets the given month.
    pub fn is_in(&self, month: YearMonth) -> bool {
        self.year_month() == month
    }
}

/// A calendar month.
///
/// Built from raw components the way a calendar builds a date: months
/// outside 1–12 roll over into neighbouring years, so month 13 of 2023 is
/// January 2024 and month 0 of 2024 is December 2023.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i64,
    /// Always 1–12.
    pub month: u32,
}

impl YearMonth {
    /// Normalise arbitrary (year, month) components.
    ///
    /// Years beyond the `i64` range saturate; such months never match a real date.
    pub fn normalized(year: i64, month: i64) -> Self {
        let total = i128::from(year) * 12 + (i128::from(month) - 1);
        let year = total.div_euclid(12);
        Self {
            year: i64::try_from(year).unwrap_or(if year < 0 { i64::MIN } else { i64::MAX }),
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: i64::from(date.year()),
            month: date.month(),
        }
    }

    /// The month after this one.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The first day of this month, if it is representable as a date.
    pub fn first_day(self) -> Option<NaiveDate> {
        let year = i32::try_from(self.year).ok()?;
        NaiveDate::from_ymd_opt(year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Decode a stored goal list.
pub fn decode_goals(bytes: &[u8]) -> Result<Vec<Goal>, GoalError> {
    serde_json::from_slice(bytes).map_err(GoalError::Decode)
}

/// Encode a goal list for storage (compact JSON array, order preserved).
pub fn encode_goals(goals: &[Goal]) -> Result<Vec<u8>, GoalError> {
    serde_json::to_vec(goals).map_err(GoalError::Encode)
}
