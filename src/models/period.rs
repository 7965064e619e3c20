//! Reporting period filter.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid year: {0}")]
    InvalidYear(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("A month filter requires a year")]
    MonthWithoutYear,
}

/// A calendar window over game dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    All,
    Year { year: i32 },
    Month { year: i32, month: u32 },
}

impl Period {
    /// Parse a `(year, month)` pair where either side may be `"all"`.
    pub fn parse(year: &str, month: &str) -> Result<Self, PeriodError> {
        let year = year.trim();
        let month = month.trim();

        let year = if year.is_empty() || year.eq_ignore_ascii_case("all") {
            None
        } else {
            let y: i32 = year
                .parse()
                .map_err(|_| PeriodError::InvalidYear(year.to_string()))?;
            Some(y)
        };

        let month = if month.is_empty() || month.eq_ignore_ascii_case("all") {
            None
        } else {
            let m: u32 = month
                .parse()
                .map_err(|_| PeriodError::InvalidMonth(month.to_string()))?;
            if !(1..=12).contains(&m) {
                return Err(PeriodError::InvalidMonth(m.to_string()));
            }
            Some(m)
        };

        match (year, month) {
            (None, None) => Ok(Period::All),
            (None, Some(_)) => Err(PeriodError::MonthWithoutYear),
            (Some(year), None) => Ok(Period::Year { year }),
            (Some(year), Some(month)) => Ok(Period::Month { year, month }),
        }
    }

    /// Whether a game date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Period::All => true,
            Period::Year { year } => date.year() == year,
            Period::Month { year, month } => date.year() == year && date.month() == month,
        }
    }

    /// Inclusive date bounds, `None` for the unbounded period.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Period::All => None,
            Period::Year { year } => Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )),
            Period::Month { year, month } => {
                Some((NaiveDate::from_ymd_opt(year, month, 1)?, last_day_of_month(year, month)?))
            }
        }
    }

    /// Date the period is evaluated at: last day of the month or year,
    /// or `today` when unbounded.
    pub fn reference_date(&self, today: NaiveDate) -> NaiveDate {
        self.bounds().map(|(_, end)| end).unwrap_or(today)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::All => write!(f, "all"),
            Period::Year { year } => write!(f, "{}", year),
            Period::Month { year, month } => write!(f, "{}-{:02}", year, month),
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
