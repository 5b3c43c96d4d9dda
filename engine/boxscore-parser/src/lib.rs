//! Box-score ingestion: positional row mapping for the offense, kicking,
//! defense and injury tables, plus the narrative scoring-play grammar.
//!
//! Everything here writes into a [`season_registry::Season`]; this crate
//! owns no state of its own beyond compiled pattern tables.

pub mod error;
pub mod rows;
pub mod scoring;

pub use error::{IngestError, Result};
pub use rows::{record_injury_row, BoxscoreIngest, GameTeams, PlayerRow};
pub use scoring::{ScoreOutcome, ScoringPlayParser};
