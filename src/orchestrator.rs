use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;
use tracing::{error, info, instrument, warn};

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::error::Result;
use crate::fetcher::{next_month_anchor, FixtureFetcher, HttpFetch};
use crate::model::fixture::Fixture;
use crate::model::team::Team;
use crate::skysports::FixtureParser;

/// Result of one team's fetch+parse pipeline.
#[derive(Debug)]
pub enum TeamOutcome {
    Fetched(Vec<Fixture>),
    /// At least one page came back but held no usable fixtures.
    Empty,
    /// Every page request failed, or the task itself died.
    Failed(String),
}

impl TeamOutcome {
    pub fn into_fixtures(self) -> Vec<Fixture> {
        match self {
            TeamOutcome::Fetched(f) => f,
            TeamOutcome::Empty | TeamOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Shared, read-only state for running team pipelines on worker threads.
#[derive(Clone)]
pub struct Orchestrator {
    catalog: Arc<Catalog>,
    http: Arc<dyn HttpFetch>,
    settings: Arc<Settings>,
}

impl Orchestrator {
    pub fn new(catalog: Arc<Catalog>, http: Arc<dyn HttpFetch>, settings: Arc<Settings>) -> Self {
        Self { catalog, http, settings }
    }

    /// Fetch the current and next month for one team and parse both pages.
    /// Blocking; a failed page contributes nothing and the other page is still used.
    #[instrument(level = "info", skip(self, team, now), fields(team = %team.name))]
    pub fn fetch_team(&self, team: &Team, now: DateTime<Utc>) -> Result<TeamOutcome> {
        let source_tz = self.settings.source_tz()?;
        let fetcher = FixtureFetcher::new(self.http.as_ref(), &self.settings.base_url, self.settings.fetch_timeout());
        let parser = FixtureParser::new(&self.catalog, source_tz, now);

        let mut anchors = vec![None];
        anchors.extend(next_month_anchor(now.with_timezone(&source_tz).date_naive()).map(Some));
        let mut fixtures = Vec::new();
        let mut failures = Vec::new();
        for &anchor in &anchors {
            match fetcher.fetch(&team.slug, anchor) {
                Ok(html) => fixtures.extend(parser.parse(&html, team)),
                Err(e) => failures.push(e.to_string()),
            }
        }

        let outcome = if failures.len() == anchors.len() {
            TeamOutcome::Failed(failures.join("; "))
        } else if fixtures.is_empty() {
            TeamOutcome::Empty
        } else {
            TeamOutcome::Fetched(fixtures)
        };
        Ok(outcome)
    }

    /// Run every team's pipeline with at most `max_concurrency` in flight and merge what succeeded.
    #[instrument(level = "info", skip(self, teams, now), fields(teams = teams.len()))]
    pub async fn fetch_all(&self, teams: &[Team], now: DateTime<Utc>) -> Vec<Fixture> {
        // One team needs no pool, just its two page fetches off the async threads.
        if let [team] = teams {
            let worker = self.clone();
            let team = team.clone();
            let name = team.name.clone();
            return match tokio::task::spawn_blocking(move || worker.fetch_team(&team, now)).await {
                Ok(Ok(TeamOutcome::Failed(reason))) => {
                    warn!(team = %name, reason = %reason, "Team fetch failed");
                    Vec::new()
                }
                Ok(Ok(outcome)) => outcome.into_fixtures(),
                Ok(Err(e)) => {
                    error!(team = %name, error = %e, "Team pipeline could not start");
                    Vec::new()
                }
                Err(e) => {
                    error!(team = %name, error = %e, "Team task join error");
                    Vec::new()
                }
            };
        }

        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrency.max(1)));
        let mut handles: Vec<(String, tokio::task::JoinHandle<Result<TeamOutcome>>)> = Vec::new();

        for team in teams {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(p) => p,
                Err(e) => {
                    error!(error = %e, "Worker pool closed");
                    break;
                }
            };
            // spawn_blocking needs 'static owned inputs
            let worker = self.clone();
            let team = team.clone();
            let name = team.name.clone();
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                worker.fetch_team(&team, now)
            });
            handles.push((name, handle));
        }

        let mut all = Vec::new();
        let (mut fetched, mut empty, mut failed) = (0usize, 0usize, 0usize);
        for (name, handle) in handles {
            let outcome = match handle.await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => TeamOutcome::Failed(e.to_string()),
                Err(e) => TeamOutcome::Failed(format!("task join error: {}", e)),
            };
            match outcome {
                TeamOutcome::Fetched(fixtures) => {
                    fetched += 1;
                    all.extend(fixtures);
                }
                TeamOutcome::Empty => empty += 1,
                TeamOutcome::Failed(reason) => {
                    failed += 1;
                    warn!(team = %name, reason = %reason, "Team fetch failed; continuing with the rest");
                }
            }
        }

        info!(fetched, empty, failed, fixtures = all.len(), "Merged team results");
        all
    }
}
