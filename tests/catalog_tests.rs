use std::collections::HashMap;

use fixture_reminder_lambda_rust::catalog::Catalog;
use fixture_reminder_lambda_rust::model::team::Team;

#[test]
fn resolves_keys_slugs_and_aliases() {
    let catalog = Catalog::default();
    assert_eq!(catalog.normalize("arsenal"), "Arsenal");
    assert_eq!(catalog.normalize("  MAN CITY "), "Man City");
    assert_eq!(catalog.normalize("Manchester City"), "Man City");
    assert_eq!(catalog.normalize("manchester-city"), "Man City");
    assert_eq!(catalog.normalize("Paris Saint Germain"), "PSG");
    assert_eq!(catalog.normalize("Paris Saint-Germain"), "PSG");
    assert_eq!(catalog.normalize("Atletico-Madrid"), "Atletico Madrid");
    assert_eq!(catalog.normalize("Spurs"), "Tottenham Hotspur");
    assert_eq!(catalog.normalize("wolves"), "Wolverhampton Wanderers");
}

#[test]
fn unknown_names_pass_through_unchanged() {
    let catalog = Catalog::default();
    assert_eq!(catalog.normalize("Slavia Prague"), "Slavia Prague");
    assert_eq!(catalog.normalize(""), "");
    assert_eq!(catalog.normalize("Brentford vs Fulham"), "Brentford vs Fulham");
}

#[test]
fn normalize_is_idempotent() {
    let catalog = Catalog::default();
    let inputs = [
        "Arsenal", "man city", "manchester-city", "Manchester United", "man utd", "Tottenham", "spurs",
        "Wolves", "brighton", "Paris SG", "paris", "PSG", "Paris Saint-Germain", "England", "Real Madrid CF", "", "  ",
    ];
    for input in inputs {
        let once = catalog.normalize(input);
        assert_eq!(catalog.normalize(&once), once, "input was {:?}", input);
    }
}

#[test]
fn looks_up_teams_case_insensitively() {
    let catalog = Catalog::default();
    assert_eq!(catalog.get("psg").map(|t| t.slug.as_str()), Some("paris-saint-germain"));
    assert!(catalog.get("Tottenham Hotspur").is_none());
    assert_eq!(catalog.teams().len(), 17);
}

#[test]
fn injected_catalog_replaces_defaults() {
    let catalog = Catalog::new(
        vec![Team::new("Spurs", "tottenham-hotspur")],
        HashMap::from([("THFC".to_string(), "Spurs".to_string())]),
    );
    assert_eq!(catalog.normalize("Tottenham Hotspur"), "Spurs");
    assert_eq!(catalog.normalize("thfc"), "Spurs");
    assert_eq!(catalog.normalize("Arsenal"), "Arsenal");
}

#[test]
fn loads_catalog_from_json() {
    let json = r#"{"teams":[{"name":"Celtic","slug":"celtic"},{"name":"Rangers","slug":"rangers"}],"aliases":{"the bhoys":"Celtic"}}"#;
    let catalog = Catalog::from_json(json).expect("valid catalog");
    assert_eq!(catalog.teams().len(), 2);
    assert_eq!(catalog.normalize("The Bhoys"), "Celtic");

    assert!(Catalog::from_json(r#"{"teams":[]}"#).is_err());
    assert!(Catalog::from_json("not json").is_err());
}

#[test]
fn chained_aliases_resolve_to_their_final_name() {
    let catalog = Catalog::new(
        vec![Team::new("Arsenal", "arsenal")],
        HashMap::from([
            ("spurs".to_string(), "Tottenham".to_string()),
            ("tottenham".to_string(), "Tottenham Hotspur".to_string()),
            ("gunners".to_string(), "arsenal".to_string()),
        ]),
    );
    assert_eq!(catalog.normalize("Spurs"), "Tottenham Hotspur");
    assert_eq!(catalog.normalize("Tottenham"), "Tottenham Hotspur");
    assert_eq!(catalog.normalize("Gunners"), "Arsenal");
    for input in ["Spurs", "Tottenham", "Gunners"] {
        let once = catalog.normalize(input);
        assert_eq!(catalog.normalize(&once), once, "input was {:?}", input);
    }
}

#[test]
fn looping_aliases_are_dropped() {
    let json = r#"{"teams":[{"name":"Celtic","slug":"celtic"}],"aliases":{"hoops":"Bhoys","bhoys":"Hoops","the hoops":"hoops"}}"#;
    let catalog = Catalog::from_json(json).expect("valid catalog");
    for input in ["Hoops", "Bhoys", "The Hoops"] {
        let once = catalog.normalize(input);
        assert_eq!(once, input, "looping alias should not rewrite {:?}", input);
        assert_eq!(catalog.normalize(&once), once);
    }
}
