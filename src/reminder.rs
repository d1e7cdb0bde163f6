use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, Result};
use crate::holiday::{is_rest_day_or_weekend, HolidayCalendar};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// What a reminder means relative to kickoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    /// Fires before the match starts.
    BeforeKickoff,
    /// Fires at or after kickoff; the match is already under way, so it is a "check the result" notice.
    CheckResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub at: NaiveDateTime,
    pub kind: ReminderKind,
}

/// True for kickoffs before 07:00, or at exactly 07:00.
pub fn is_early_morning(kickoff: NaiveDateTime) -> bool {
    kickoff.hour() < 7 || (kickoff.hour() == 7 && kickoff.minute() == 0)
}

/// Local time a reminder should fire for a match kicking off at local time `kickoff`.
///
/// Early-morning matches are announced at 08:00 on rest days and 07:00 on workdays;
/// everything else 30 minutes before kickoff.
pub fn remind_at(kickoff: NaiveDateTime, calendar: &dyn HolidayCalendar) -> NaiveDateTime {
    if is_early_morning(kickoff) {
        let hour = if is_rest_day_or_weekend(calendar, kickoff.date()) { 8 } else { 7 };
        match NaiveTime::from_hms_opt(hour, 0, 0) {
            Some(t) => kickoff.date().and_time(t),
            None => kickoff,
        }
    } else {
        kickoff - Duration::minutes(30)
    }
}

pub fn plan_reminder(kickoff: NaiveDateTime, calendar: &dyn HolidayCalendar) -> Reminder {
    let at = remind_at(kickoff, calendar);
    let kind = if at >= kickoff { ReminderKind::CheckResult } else { ReminderKind::BeforeKickoff };
    Reminder { at, kind }
}

pub fn parse_match_time(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT)
        .map_err(|_| FixtureError::Format { input: input.to_string() })
}

/// String form of [`remind_at`]: `"YYYY-MM-DD HH:MM"` in, same format out.
pub fn reminder_time(input: &str, calendar: &dyn HolidayCalendar) -> Result<String> {
    let kickoff = parse_match_time(input)?;
    Ok(remind_at(kickoff, calendar).format(TIMESTAMP_FORMAT).to_string())
}
