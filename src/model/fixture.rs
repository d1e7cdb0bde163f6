use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the queried team was located among the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// A side's normalized name equals the team's canonical name.
    Exact,
    /// A side's name contains the team name or slug.
    Contains,
    /// Neither side was recognized; `opponent` holds "home vs away" and `is_home` is a default.
    Ambiguous,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fixture {
    pub datetime_utc: DateTime<Utc>,
    pub team: String,
    pub opponent: String,
    pub competition: String,
    pub is_home: bool,
    pub resolution: Resolution,
}
