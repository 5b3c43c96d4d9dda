//! Season Registry - canonical entities for one fantasy football season
//!
//! This crate owns the season's player and team registries with
//! get-or-create semantics, the per-week game stat records that ingestion
//! fills in, the scoped display-name index used while parsing narrative
//! scoring plays, and the flat lookup tables (bye weeks, city codes)
//! consumed by normalization.

pub mod error;
pub mod lookup;
pub mod season;
pub mod sources;
pub mod types;

pub use error::{RegistryError, Result};
pub use lookup::{ByeWeeks, CityCodes};
pub use season::{normalize_team_code, Registered, Season};
pub use types::{
    Defense, Fumbles, GameLog, InjuryCategory, InjuryStatus, Kicking, Passing, Player, Position,
    PositionBaseline, Receiving, Rushing, Team, TeamDefense,
};
