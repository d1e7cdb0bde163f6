use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Europe::London;

use fixture_reminder_lambda_rust::catalog::Catalog;
use fixture_reminder_lambda_rust::model::fixture::Resolution;
use fixture_reminder_lambda_rust::model::team::Team;
use fixture_reminder_lambda_rust::skysports::{
    extract_match_records, localize_to_utc, resolve_local_datetime, resolve_sides, FixtureParser,
};

fn load_sample() -> String {
    std::fs::read_to_string("tests/arsenal_fixtures.html").expect("failed to read arsenal_fixtures.html")
}

fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

fn arsenal() -> Team {
    Team::new("Arsenal", "arsenal")
}

#[test]
fn extracts_only_match_shaped_states() {
    let records = extract_match_records(&load_sample());
    // config widget and the truncated blob are dropped; TBC and dateless records still extract
    assert_eq!(records.len(), 6, "records were: {:?}", records);
    assert_eq!(records[1].home, "Tottenham Hotspur", "entity-encoded attribute should decode");
    assert_eq!(records[3].competition, None);
}

#[test]
fn parses_sample_page_into_fixtures() {
    let catalog = Catalog::default();
    let now = Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap();
    let parser = FixtureParser::new(&catalog, London, now);

    let fixtures = parser.parse(&load_sample(), &arsenal());
    assert_eq!(fixtures.len(), 4, "fixtures were: {:?}", fixtures);

    let chelsea = &fixtures[0];
    assert_eq!(chelsea.datetime_utc, Utc.with_ymd_and_hms(2025, 11, 8, 15, 0, 0).unwrap());
    assert_eq!(chelsea.opponent, "Chelsea");
    assert!(chelsea.is_home);
    assert_eq!(chelsea.resolution, Resolution::Exact);
    assert_eq!(chelsea.competition, "Premier League");
    assert_eq!(chelsea.team, "Arsenal");

    let spurs = &fixtures[1];
    assert_eq!(spurs.opponent, "Tottenham Hotspur");
    assert!(!spurs.is_home);

    let slavia = &fixtures[2];
    assert_eq!(slavia.opponent, "Slavia Prague");
    assert!(!slavia.is_home);
    assert_eq!(slavia.resolution, Resolution::Contains);
    assert_eq!(slavia.competition, "Unknown");

    let unrelated = &fixtures[3];
    assert_eq!(unrelated.opponent, "Brentford vs Fulham");
    assert!(unrelated.is_home);
    assert_eq!(unrelated.resolution, Resolution::Ambiguous);
}

#[test]
fn parsed_instants_round_trip_to_source_wall_clock() {
    let catalog = Catalog::default();
    let now = Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap();
    let fixtures = FixtureParser::new(&catalog, London, now).parse(&load_sample(), &arsenal());

    let expected = [(8, 11, 15, 0), (23, 11, 16, 30), (30, 11, 20, 0), (29, 11, 12, 30)];
    for (fixture, (day, month, hour, minute)) in fixtures.iter().zip(expected) {
        let local = fixture.datetime_utc.with_timezone(&London);
        assert_eq!((local.day(), local.month(), local.hour(), local.minute()), (day, month, hour, minute));
    }
}

#[test]
fn summer_kickoff_uses_british_summer_time() {
    let html = r#"<div data-state='{"start":{"date":"Saturday 16th August","time":"12:30"},"teams":{"home":{"name":{"full":"Arsenal"}},"away":{"name":{"full":"Leeds United"}}}}'></div>"#;
    let catalog = Catalog::default();
    let now = Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap();
    let fixtures = FixtureParser::new(&catalog, London, now).parse(html, &arsenal());
    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].datetime_utc, Utc.with_ymd_and_hms(2025, 8, 16, 11, 30, 0).unwrap());
}

#[test]
fn november_date_seen_in_july_stays_in_same_year() {
    let resolved = resolve_local_datetime("Sunday 30th November", "16:30", naive(2025, 7, 15, 12, 0));
    assert_eq!(resolved, Some(naive(2025, 11, 30, 16, 30)));
}

#[test]
fn january_date_seen_in_december_rolls_forward() {
    let resolved = resolve_local_datetime("Friday 2nd January", "20:00", naive(2025, 12, 15, 9, 0));
    assert_eq!(resolved, Some(naive(2026, 1, 2, 20, 0)));
}

#[test]
fn december_date_seen_in_january_rolls_back() {
    let resolved = resolve_local_datetime("Saturday 27th December", "17:30", naive(2026, 1, 10, 9, 0));
    assert_eq!(resolved, Some(naive(2025, 12, 27, 17, 30)));
}

#[test]
fn leap_day_resolves_to_the_neighbouring_leap_year() {
    let resolved = resolve_local_datetime("Tuesday 29th February", "19:45", naive(2027, 12, 20, 9, 0));
    assert_eq!(resolved, Some(naive(2028, 2, 29, 19, 45)));
}

#[test]
fn unconfirmed_or_malformed_times_are_rejected() {
    let now = naive(2025, 11, 1, 0, 0);
    assert_eq!(resolve_local_datetime("Saturday 8th November", "TBC", now), None);
    assert_eq!(resolve_local_datetime("Saturday 8th", "15:00", now), None);
    assert_eq!(resolve_local_datetime("Saturday 8th Novembruary", "15:00", now), None);
    assert_eq!(resolve_local_datetime("Saturday 31st November", "15:00", now), None);
}

#[test]
fn daylight_saving_edges() {
    // clocks go forward at 01:00 on 30 March 2025: 01:30 never happened
    assert_eq!(localize_to_utc(naive(2025, 3, 30, 1, 30), London), None);
    // clocks go back at 02:00 on 26 October 2025: 01:30 happens twice, take the GMT one
    assert_eq!(
        localize_to_utc(naive(2025, 10, 26, 1, 30), London),
        Some(Utc.with_ymd_and_hms(2025, 10, 26, 1, 30, 0).unwrap())
    );
    assert_eq!(
        localize_to_utc(naive(2025, 10, 25, 20, 0), London),
        Some(Utc.with_ymd_and_hms(2025, 10, 25, 19, 0, 0).unwrap())
    );
}

#[test]
fn slug_resolves_abbreviated_catalog_names() {
    let catalog = Catalog::default();
    let city = Team::new("Man City", "manchester-city");
    let (opponent, is_home, resolution) = resolve_sides("Liverpool", "Manchester City", &city, &catalog);
    assert_eq!(opponent, "Liverpool");
    assert!(!is_home);
    assert_eq!(resolution, Resolution::Exact);

    let psg = Team::new("PSG", "paris-saint-germain");
    let (opponent, is_home, resolution) = resolve_sides("Paris Saint-Germain FC", "Marseille", &psg, &catalog);
    assert_eq!(opponent, "Marseille");
    assert!(is_home);
    assert_eq!(resolution, Resolution::Contains);
}

#[test]
fn short_team_name_inside_another_name_is_a_known_false_match() {
    let catalog = Catalog::default();
    let spain = Team::new("Spain", "spain");
    let (opponent, is_home, resolution) = resolve_sides("Spain U21", "Spain", &spain, &catalog);
    // exact stage runs first, so the real senior side is still found
    assert_eq!((opponent.as_str(), is_home, resolution), ("Spain U21", false, Resolution::Exact));

    // "Spain" is contained in both names; containment cannot tell them apart,
    // so the home side wins even though neither is the queried team.
    let (opponent, is_home, resolution) = resolve_sides("Spain U21", "Spain Women", &spain, &catalog);
    assert_eq!((opponent.as_str(), is_home, resolution), ("Spain Women", true, Resolution::Contains));
}
