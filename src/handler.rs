use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::{Settings, MAX_WINDOW_DAYS};
use crate::error::FixtureError;
use crate::holiday::HolidayCalendar;
use crate::model::fixture::{Fixture, Resolution};
use crate::reminder::{plan_reminder, ReminderKind, TIMESTAMP_FORMAT};
use crate::service::{FixtureService, TeamSelector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

fn default_team() -> String {
    "All".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// A catalog team name, or "All".
    #[serde(default = "default_team")]
    pub team: String,
    #[serde(default)]
    pub window_days: Option<i64>,
}

/// One fixture as handed to display and calendar consumers, in the display timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureView {
    pub time: String,
    pub weekday: String,
    pub team: String,
    pub opponent: String,
    pub competition: String,
    pub venue: Venue,
    pub resolution: Resolution,
    pub reminder: String,
    pub reminder_kind: ReminderKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    pub fixtures: Vec<FixtureView>,
}

impl FixtureView {
    pub fn new(fixture: &Fixture, display_tz: Tz, holidays: &dyn HolidayCalendar) -> Self {
        let local = fixture.datetime_utc.with_timezone(&display_tz);
        let reminder = plan_reminder(local.naive_local(), holidays);
        FixtureView {
            time: local.format(TIMESTAMP_FORMAT).to_string(),
            weekday: local.format("%A").to_string(),
            team: fixture.team.clone(),
            opponent: fixture.opponent.clone(),
            competition: fixture.competition.clone(),
            venue: if fixture.is_home { Venue::Home } else { Venue::Away },
            resolution: fixture.resolution,
            reminder: reminder.at.format(TIMESTAMP_FORMAT).to_string(),
            reminder_kind: reminder.kind,
        }
    }
}

/// Run one listing against an already-built service. Split from [`handler`] so tests can inject doubles.
pub async fn respond(service: &FixtureService, request: &Request, now: DateTime<Utc>) -> Result<Response, FixtureError> {
    let selector = TeamSelector::parse(&request.team);
    let window = match request.window_days {
        Some(days) if (0..=MAX_WINDOW_DAYS).contains(&days) => chrono::Duration::days(days),
        Some(days) => {
            return Err(FixtureError::InvalidRequest(format!(
                "window_days must be between 0 and {}, got {}",
                MAX_WINDOW_DAYS, days
            )));
        }
        None => service.settings().window(),
    };
    let fixtures = service.list_fixtures_within(&selector, now, window).await?;
    let display_tz = service.settings().display_tz()?;

    let views: Vec<FixtureView> = fixtures
        .iter()
        .map(|f| FixtureView::new(f, display_tz, service.holidays()))
        .collect();

    let message = if views.is_empty() {
        format!("No fixtures in the next {} days from {}.", window.num_days(), now)
    } else {
        format!("{} fixtures in the next {} days.", views.len(), window.num_days())
    };
    info!(message = %message, "Prepared fixture listing");
    Ok(Response { message, fixtures: views })
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let settings = Settings::from_env()?;
    let service = FixtureService::from_settings(settings)?;
    let response = respond(&service, &event.payload, Utc::now()).await?;
    Ok(response)
}
