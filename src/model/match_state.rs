use serde::Deserialize;

/// Match object embedded in a fixture page's `data-state` attribute.
/// Every member is optional so unrelated widgets decode cleanly and get filtered afterwards.
#[derive(Debug, Deserialize)]
pub struct MatchState {
    pub start: Option<StartInfo>,
    pub teams: Option<Sides>,
    #[serde(default)]
    pub competition: Option<Competition>,
}

#[derive(Debug, Deserialize)]
pub struct StartInfo {
    /// e.g. "Sunday 30th November"
    pub date: Option<String>,
    /// e.g. "16:30" or "TBC"
    pub time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Sides {
    pub home: Side,
    pub away: Side,
}

#[derive(Debug, Deserialize)]
pub struct Side {
    pub name: FullName,
}

#[derive(Debug, Deserialize)]
pub struct FullName {
    pub full: String,
}

#[derive(Debug, Deserialize)]
pub struct Competition {
    pub name: Option<CompetitionName>,
}

#[derive(Debug, Deserialize)]
pub struct CompetitionName {
    pub full: Option<String>,
}

/// Flattened view of one match object, before date and side resolution.
#[derive(Debug, Clone)]
pub struct RawMatchRecord {
    pub date: String,
    pub time: String,
    pub home: String,
    pub away: String,
    pub competition: Option<String>,
}

impl MatchState {
    /// Returns None unless the object has the "start time + two teams" shape of a match.
    pub fn into_raw(self) -> Option<RawMatchRecord> {
        let start = self.start?;
        let teams = self.teams?;
        let date = start.date.filter(|s| !s.trim().is_empty())?;
        let time = start.time.filter(|s| !s.trim().is_empty())?;
        let competition = self.competition.and_then(|c| c.name).and_then(|n| n.full);
        Some(RawMatchRecord {
            date,
            time,
            home: teams.home.name.full,
            away: teams.away.name.full,
            competition,
        })
    }
}
