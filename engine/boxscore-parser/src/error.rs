//! Error types for box-score and scoring-play ingestion.

use thiserror::Error;

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors raised while mapping rows or recording scoring plays. Malformed
/// narrative lines are NOT errors (they are logged and skipped); these are
/// the faults that make a record unusable or indicate caller misuse.
#[derive(Error, Debug)]
pub enum IngestError {
    /// A row is shorter than the source table's schema requires.
    #[error("row is missing column {index} ({what})")]
    MissingColumn { index: usize, what: &'static str },

    /// A numeric column failed to parse. Fatal for that record: scoring
    /// correctness depends on exact figures, so no default is substituted.
    #[error("invalid number in column {index} ({what}): '{value}'")]
    InvalidNumber {
        index: usize,
        what: &'static str,
        value: String,
    },

    /// A team-stats row did not carry the expected header label.
    #[error("unexpected team-stats row header: found '{found}', expected '{expected}'")]
    UnexpectedHeader { found: String, expected: &'static str },

    /// A stat line referenced a team that is not part of this game.
    #[error("team '{team}' is not part of this game")]
    TeamNotInGame { team: String },

    /// Week numbers outside 1..=18 cannot be ingested.
    #[error("invalid week: {0}")]
    InvalidWeek(u8),

    /// Registry sequencing or integrity error.
    #[error(transparent)]
    Registry(#[from] season_registry::RegistryError),
}
