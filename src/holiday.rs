use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;
use tracing::info;

use crate::error::{FixtureError, Result};

/// Answers whether a date is a public holiday or rest day.
///
/// `None` means the calendar has no data for that date; callers fall back to a weekend check.
pub trait HolidayCalendar: Send + Sync {
    fn is_rest_day(&self, date: NaiveDate) -> Option<bool>;
}

/// Calendar with no holiday data at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidayData;

impl HolidayCalendar for NoHolidayData {
    fn is_rest_day(&self, _date: NaiveDate) -> Option<bool> {
        None
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Holiday lookup with the weekend fallback applied.
pub fn is_rest_day_or_weekend(calendar: &dyn HolidayCalendar, date: NaiveDate) -> bool {
    calendar.is_rest_day(date).unwrap_or_else(|| is_weekend(date))
}

#[derive(Debug, Deserialize)]
struct HolidayFile {
    years: Vec<i32>,
    #[serde(default)]
    holidays: Vec<NaiveDate>,
    #[serde(default)]
    workdays: Vec<NaiveDate>,
}

/// Table-driven calendar for a set of covered years.
///
/// Within a covered year a date is a rest day when it is listed as a holiday, or falls on a
/// weekend and is not listed as a make-up workday.
#[derive(Debug, Clone, Default)]
pub struct HolidayTable {
    years: BTreeSet<i32>,
    holidays: HashSet<NaiveDate>,
    workdays: HashSet<NaiveDate>,
}

impl HolidayTable {
    pub fn new(
        years: impl IntoIterator<Item = i32>,
        holidays: impl IntoIterator<Item = NaiveDate>,
        workdays: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            years: years.into_iter().collect(),
            holidays: holidays.into_iter().collect(),
            workdays: workdays.into_iter().collect(),
        }
    }

    /// Parse `{"years": [..], "holidays": ["YYYY-MM-DD", ..], "workdays": [..]}`.
    pub fn from_json(body: &str) -> Result<Self> {
        let file: HolidayFile = serde_json::from_str(body)
            .map_err(|e| FixtureError::Config(format!("invalid holiday JSON: {}", e)))?;
        Ok(Self::new(file.years, file.holidays, file.workdays))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)
            .map_err(|e| FixtureError::Config(format!("cannot read holidays {}: {}", path.display(), e)))?;
        let table = Self::from_json(&body)?;
        info!(path = %path.display(), years = ?table.years, holidays = table.holidays.len(), "Loaded holiday table");
        Ok(table)
    }
}

impl HolidayCalendar for HolidayTable {
    fn is_rest_day(&self, date: NaiveDate) -> Option<bool> {
        if !self.years.contains(&date.year()) {
            return None;
        }
        if self.holidays.contains(&date) {
            return Some(true);
        }
        if self.workdays.contains(&date) {
            return Some(false);
        }
        Some(is_weekend(date))
    }
}
