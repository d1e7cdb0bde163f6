use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{FixtureError, Result};
use crate::model::team::Team;

const DEFAULT_TEAMS: &[(&str, &str)] = &[
    ("Arsenal", "arsenal"),
    ("Man City", "manchester-city"),
    ("Liverpool", "liverpool"),
    ("Chelsea", "chelsea"),
    ("Real Madrid", "real-madrid"),
    ("Barcelona", "barcelona"),
    ("Atletico Madrid", "atletico-madrid"),
    ("Bayern Munich", "bayern-munich"),
    ("PSG", "paris-saint-germain"),
    ("China", "china"),
    ("Germany", "germany"),
    ("France", "france"),
    ("Spain", "spain"),
    ("Brazil", "brazil"),
    ("Argentina", "argentina"),
    ("Portugal", "portugal"),
    ("England", "england"),
];

const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("manchester united", "Man Utd"),
    ("man utd", "Man Utd"),
    ("tottenham", "Tottenham Hotspur"),
    ("spurs", "Tottenham Hotspur"),
    ("wolves", "Wolverhampton Wanderers"),
    ("brighton", "Brighton and Hove Albion"),
    ("paris saint germain", "PSG"),
    ("paris sg", "PSG"),
    ("paris", "PSG"),
];

/// On-disk shape of a catalog override.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    teams: Vec<Team>,
    #[serde(default)]
    aliases: HashMap<String, String>,
}

/// Immutable roster of followed teams plus the alias table used for name normalization.
#[derive(Debug, Clone)]
pub struct Catalog {
    teams: Vec<Team>,
    // keyed by folded alias, values already fully resolved
    aliases: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let teams = DEFAULT_TEAMS.iter().map(|(name, slug)| Team::new(*name, *slug)).collect();
        let aliases = DEFAULT_ALIASES.iter().map(|(k, v)| (k.to_string(), v.to_string()));
        Self::new(teams, aliases.collect())
    }
}

impl Catalog {
    /// Alias targets are followed through keys, slugs and other aliases until they settle, so a
    /// chained alias points straight at its final name. Aliases that loop back on themselves are dropped.
    pub fn new(teams: Vec<Team>, aliases: HashMap<String, String>) -> Self {
        let raw: HashMap<String, String> = aliases.into_iter().map(|(k, v)| (fold(&k), v)).collect();

        let mut resolved = HashMap::with_capacity(raw.len());
        for (alias, target) in &raw {
            let mut visited = HashSet::from([alias.clone()]);
            let mut current = target.clone();
            let settled = loop {
                match lookup(&teams, &raw, &current) {
                    Some(next) if next != current => {
                        if !visited.insert(fold(&next)) {
                            break None;
                        }
                        current = next;
                    }
                    _ => break Some(current),
                }
            };
            match settled {
                Some(name) => {
                    resolved.insert(alias.clone(), name);
                }
                None => warn!(alias = %alias, "Dropping alias that resolves in a loop"),
            }
        }

        Self { teams, aliases: resolved }
    }

    /// Load a catalog from a JSON file of the form `{"teams": [{"name", "slug"}], "aliases": {..}}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)
            .map_err(|e| FixtureError::Config(format!("cannot read catalog {}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&body)?;
        info!(path = %path.display(), teams = catalog.teams.len(), "Loaded team catalog");
        Ok(catalog)
    }

    pub fn from_json(body: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(body)
            .map_err(|e| FixtureError::Config(format!("invalid catalog JSON: {}", e)))?;
        if file.teams.is_empty() {
            return Err(FixtureError::Config("catalog has no teams".to_string()));
        }
        Ok(Self::new(file.teams, file.aliases))
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Look up a catalog entry by canonical name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Team> {
        let wanted = name.trim();
        self.teams.iter().find(|t| t.name.eq_ignore_ascii_case(wanted))
    }

    /// Map any spelling of a team name to its canonical form.
    ///
    /// Case and dashes are ignored. Tries catalog keys, then slugs, then the alias table.
    /// Unrecognized input is returned unchanged, so the function is total and idempotent.
    pub fn normalize(&self, name: &str) -> String {
        lookup(&self.teams, &self.aliases, name).unwrap_or_else(|| name.to_string())
    }
}

/// Comparison form of a name: trimmed, lowercase, dashes read as spaces.
fn fold(name: &str) -> String {
    name.trim().to_lowercase().replace('-', " ")
}

fn lookup(teams: &[Team], aliases: &HashMap<String, String>, name: &str) -> Option<String> {
    let folded = fold(name);
    if folded.is_empty() {
        return None;
    }
    teams
        .iter()
        .find(|t| fold(&t.name) == folded)
        .or_else(|| teams.iter().find(|t| fold(&t.slug) == folded))
        .map(|t| t.name.clone())
        .or_else(|| aliases.get(&folded).cloned())
}
