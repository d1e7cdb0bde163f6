use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::catalog::Catalog;
use crate::model::fixture::Fixture;

/// Dedup identity: kickoff instant plus the participants' normalized names in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureKey {
    pub kickoff: DateTime<Utc>,
    pub teams: (String, String),
}

impl FixtureKey {
    pub fn of(fixture: &Fixture, catalog: &Catalog) -> Self {
        let a = catalog.normalize(&fixture.team);
        let b = catalog.normalize(&fixture.opponent);
        let teams = if a <= b { (a, b) } else { (b, a) };
        Self { kickoff: fixture.datetime_utc, teams }
    }
}

/// Keep fixtures kicking off in `[now, now + window]`, drop repeats of the same match seen from
/// another team's page (first one wins), and sort by kickoff.
pub fn aggregate(fixtures: Vec<Fixture>, catalog: &Catalog, now: DateTime<Utc>, window: Duration) -> Vec<Fixture> {
    let window_end = now.checked_add_signed(window).unwrap_or(DateTime::<Utc>::MAX_UTC);
    let mut seen: HashSet<FixtureKey> = HashSet::new();

    let mut upcoming: Vec<Fixture> = fixtures
        .into_iter()
        .filter(|f| f.datetime_utc >= now && f.datetime_utc <= window_end)
        .filter(|f| {
            let fresh = seen.insert(FixtureKey::of(f, catalog));
            if !fresh {
                debug!(team = %f.team, opponent = %f.opponent, kickoff = %f.datetime_utc, "Dropping duplicate fixture");
            }
            fresh
        })
        .collect();

    upcoming.sort_by_key(|f| f.datetime_utc);
    upcoming
}
