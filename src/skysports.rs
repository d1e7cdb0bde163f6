use chrono::{DateTime, Datelike, LocalResult, Month, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

use crate::catalog::Catalog;
use crate::model::fixture::{Fixture, Resolution};
use crate::model::match_state::{MatchState, RawMatchRecord};
use crate::model::team::Team;

/// Largest distance, in whole days, a yearless date may sit from "now" before its year is rolled.
pub const YEAR_ROLLOVER_DAYS: i64 = 180;

/// Turns fixture pages into [`Fixture`] records for one fetch cycle.
///
/// `now` is fixed at construction so a whole cycle resolves years against the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureParser<'a> {
    catalog: &'a Catalog,
    source_tz: Tz,
    now: DateTime<Utc>,
}

impl<'a> FixtureParser<'a> {
    pub fn new(catalog: &'a Catalog, source_tz: Tz, now: DateTime<Utc>) -> Self {
        Self { catalog, source_tz, now }
    }

    /// Parse every embedded match object on the page. Malformed or unresolvable records are dropped.
    #[instrument(level = "info", skip(self, html, team), fields(team = %team.name, bytes = html.len()))]
    pub fn parse(&self, html: &str, team: &Team) -> Vec<Fixture> {
        let records = extract_match_records(html);
        let total = records.len();
        let now_local = self.now.with_timezone(&self.source_tz).naive_local();

        let fixtures: Vec<Fixture> = records
            .into_iter()
            .filter_map(|raw| {
                let Some(local) = resolve_local_datetime(&raw.date, &raw.time, now_local) else {
                    debug!(date = %raw.date, time = %raw.time, "Skipping record with unresolvable kickoff");
                    return None;
                };
                let Some(datetime_utc) = localize_to_utc(local, self.source_tz) else {
                    debug!(local = %local, "Skipping kickoff inside a daylight-saving gap");
                    return None;
                };
                let (opponent, is_home, resolution) = resolve_sides(&raw.home, &raw.away, team, self.catalog);
                if resolution == Resolution::Ambiguous {
                    debug!(home = %raw.home, away = %raw.away, "Could not tell which side is the queried team");
                }
                Some(Fixture {
                    datetime_utc,
                    team: team.name.clone(),
                    opponent,
                    competition: raw.competition.unwrap_or_else(|| "Unknown".to_string()),
                    is_home,
                    resolution,
                })
            })
            .collect();

        info!(records = total, fixtures = fixtures.len(), "Parsed fixture page");
        fixtures
    }
}

/// Decode every `data-state` attribute on the page and keep those shaped like a match.
pub fn extract_match_records(html: &str) -> Vec<RawMatchRecord> {
    let selector = match Selector::parse("[data-state]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("data-state"))
        .filter_map(|state| serde_json::from_str::<MatchState>(state).ok())
        .filter_map(MatchState::into_raw)
        .collect()
}

/// Resolve "Weekday DDth Month" plus "HH:MM" into a naive wall-clock time in the source timezone.
///
/// The source omits the year. The current year is assumed, then rolled forward when the result is
/// more than [`YEAR_ROLLOVER_DAYS`] in the past, or back when it is that far in the future. This is
/// an approximation that only holds while pages cover roughly six months either side of `now_local`.
pub fn resolve_local_datetime(date: &str, time: &str, now_local: NaiveDateTime) -> Option<NaiveDateTime> {
    let mut parts = date.split_whitespace();
    let _weekday = parts.next()?;
    let day: u32 = strip_ordinal(parts.next()?).parse().ok()?;
    let month = parts.next()?.parse::<Month>().ok()?.number_from_month();
    // "TBC" and friends fail here
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;

    let year = now_local.year();
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => roll_year(d.and_time(time), now_local),
        // 29 February outside a leap year: only a neighbouring year can hold it
        None => [year + 1, year - 1].into_iter().find_map(|y| {
            let candidate = NaiveDate::from_ymd_opt(y, month, day)?.and_time(time);
            let distance = (candidate - now_local).num_days().abs();
            (distance <= YEAR_ROLLOVER_DAYS).then_some(candidate)
        }),
    }
}

fn roll_year(candidate: NaiveDateTime, now_local: NaiveDateTime) -> Option<NaiveDateTime> {
    if (now_local - candidate).num_days() > YEAR_ROLLOVER_DAYS {
        candidate.with_year(candidate.year() + 1)
    } else if (candidate - now_local).num_days() > YEAR_ROLLOVER_DAYS {
        candidate.with_year(candidate.year() - 1)
    } else {
        Some(candidate)
    }
}

fn strip_ordinal(token: &str) -> &str {
    token.trim_end_matches(|c: char| c.is_ascii_alphabetic())
}

/// Interpret a wall-clock time under the zone's rules for that date and convert to UTC.
///
/// An ambiguous time (clocks going back) resolves to the later, standard-time instant.
/// A time inside the spring-forward gap never existed locally and yields None.
pub fn localize_to_utc(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(_, later) => Some(later.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Work out which side of a match is `team`.
///
/// Exact normalized-name equality is tried first, then case-insensitive containment of the team's
/// name or slug in each side's name. When neither side matches, the opponent becomes a combined
/// "home vs away" label and the fixture is tagged [`Resolution::Ambiguous`].
pub fn resolve_sides(home: &str, away: &str, team: &Team, catalog: &Catalog) -> (String, bool, Resolution) {
    if catalog.normalize(home).eq_ignore_ascii_case(&team.name) {
        return (away.to_string(), true, Resolution::Exact);
    }
    if catalog.normalize(away).eq_ignore_ascii_case(&team.name) {
        return (home.to_string(), false, Resolution::Exact);
    }

    let needles: Vec<String> = [team.name.to_lowercase(), team.slug.to_lowercase(), team.slug_words().to_lowercase()]
        .into_iter()
        .filter(|n| !n.is_empty())
        .collect();
    let contains_team = |side: &str| {
        let haystack = side.to_lowercase().replace('-', " ");
        needles.iter().any(|n| haystack.contains(n.as_str()))
    };

    if contains_team(home) {
        (away.to_string(), true, Resolution::Contains)
    } else if contains_team(away) {
        (home.to_string(), false, Resolution::Contains)
    } else {
        (format!("{} vs {}", home, away), true, Resolution::Ambiguous)
    }
}
