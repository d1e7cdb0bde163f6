use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::aggregate::aggregate;
use crate::catalog::Catalog;
use crate::config::Settings;
use crate::error::{FixtureError, Result};
use crate::fetcher::{HttpFetch, UreqFetch};
use crate::holiday::{HolidayCalendar, HolidayTable, NoHolidayData};
use crate::model::fixture::Fixture;
use crate::model::team::Team;
use crate::orchestrator::Orchestrator;

/// Which teams a fixture listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamSelector {
    All,
    Team(String),
}

impl TeamSelector {
    /// "All" (any case, or empty) selects the whole catalog; anything else names one team.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            TeamSelector::All
        } else {
            TeamSelector::Team(trimmed.to_string())
        }
    }
}

/// Entry point for callers: owns the injected catalog, transport, holiday data and settings.
#[derive(Clone)]
pub struct FixtureService {
    catalog: Arc<Catalog>,
    holidays: Arc<dyn HolidayCalendar>,
    settings: Arc<Settings>,
    orchestrator: Orchestrator,
}

impl FixtureService {
    pub fn new(
        catalog: Catalog,
        http: Arc<dyn HttpFetch>,
        holidays: Arc<dyn HolidayCalendar>,
        settings: Settings,
    ) -> Result<Self> {
        settings.validate()?;
        let catalog = Arc::new(catalog);
        let settings = Arc::new(settings);
        let orchestrator = Orchestrator::new(catalog.clone(), http, settings.clone());
        Ok(Self { catalog, holidays, settings, orchestrator })
    }

    /// Build the production service: ureq transport, catalog and holiday table from the configured files.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let catalog = match &settings.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::default(),
        };
        let holidays: Arc<dyn HolidayCalendar> = match &settings.holidays_path {
            Some(path) => Arc::new(HolidayTable::from_json_file(path)?),
            None => Arc::new(NoHolidayData),
        };
        Self::new(catalog, Arc::new(UreqFetch::new()), holidays, settings)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn holidays(&self) -> &dyn HolidayCalendar {
        self.holidays.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn select(&self, selector: &TeamSelector) -> Result<Vec<Team>> {
        match selector {
            TeamSelector::All => Ok(self.catalog.teams().to_vec()),
            TeamSelector::Team(name) => {
                let canonical = self.catalog.normalize(name);
                self.catalog
                    .get(&canonical)
                    .cloned()
                    .map(|t| vec![t])
                    .ok_or_else(|| FixtureError::UnknownTeam(name.clone()))
            }
        }
    }

    /// Upcoming fixtures for the selected teams within the configured window, deduplicated and sorted.
    pub async fn list_fixtures(&self, selector: &TeamSelector, now: DateTime<Utc>) -> Result<Vec<Fixture>> {
        self.list_fixtures_within(selector, now, self.settings.window()).await
    }

    #[instrument(level = "info", skip(self, now))]
    pub async fn list_fixtures_within(
        &self,
        selector: &TeamSelector,
        now: DateTime<Utc>,
        window: chrono::Duration,
    ) -> Result<Vec<Fixture>> {
        let teams = self.select(selector)?;
        let fetched = self.orchestrator.fetch_all(&teams, now).await;
        let fetched_count = fetched.len();
        let upcoming = aggregate(fetched, &self.catalog, now, window);
        info!(fetched = fetched_count, upcoming = upcoming.len(), "Listed fixtures");
        Ok(upcoming)
    }
}
