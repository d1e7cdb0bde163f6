use thiserror::Error;

/// Errors surfaced to direct callers of the fixture pipeline.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A caller-supplied timestamp did not match `YYYY-MM-DD HH:MM`.
    #[error("invalid match time {input:?}: expected YYYY-MM-DD HH:MM")]
    Format { input: String },

    /// A request field is outside its accepted range.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Soft failure of a single page retrieval. Logged and turned into zero records.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("non-success status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

pub type Result<T> = std::result::Result<T, FixtureError>;
