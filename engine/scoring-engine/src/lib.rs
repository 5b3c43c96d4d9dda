//! Scoring engine - pure computation over finished season records
//!
//! Given the per-week stat records the ingestion crates fill in, this
//! crate computes fantasy point totals with their tiered bonus rules, a
//! human-readable breakdown of the same arithmetic, stack-ranked
//! replacement baselines per position, and per-player value and
//! consistency analysis.

pub mod analysis;
pub mod breakdown;
pub mod config;
pub mod points;
pub mod replacement;

pub use analysis::{analyze, PlayerAnalysis};
pub use breakdown::{breakdown, Breakdown, Term};
pub use config::ReplacementConfig;
pub use points::{game_bonuses, game_points, games_played, season_points, total_bonuses};
pub use replacement::{estimate_team_defense_points, ReplacementValueCalculator};
