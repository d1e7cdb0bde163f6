use serde::{Deserialize, Serialize};

/// A catalog entry: canonical display name and the source site's slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub slug: String,
}

impl Team {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self { name: name.into(), slug: slug.into() }
    }

    /// Slug with dashes read as spaces, e.g. "manchester-city" -> "manchester city".
    pub fn slug_words(&self) -> String {
        self.slug.replace('-', " ")
    }
}
