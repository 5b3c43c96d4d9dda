//! Replacement-rank configuration.
//!
//! The ranks encode the league format's roster-size assumptions (how deep
//! the waiver wire runs at each position) and are deliberately data, not
//! algorithm.

use season_registry::Position;
use serde::{Deserialize, Serialize};

/// Per-position replacement ranks: indices into the descending
/// points-per-game ranking at which the "freely available" player sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementConfig {
    pub qb_rank: usize,
    pub rb_rank: usize,
    pub wr_rank: usize,
    pub k_rank: usize,
    pub dst_rank: usize,
}

impl Default for ReplacementConfig {
    fn default() -> Self {
        Self {
            qb_rank: 22,
            rb_rank: 48,
            wr_rank: 48,
            k_rank: 21,
            dst_rank: 21,
        }
    }
}

impl ReplacementConfig {
    pub fn rank_for(&self, position: Position) -> usize {
        match position {
            Position::QB => self.qb_rank,
            Position::RB => self.rb_rank,
            Position::WR => self.wr_rank,
            Position::K => self.k_rank,
            Position::DST => self.dst_rank,
            Position::Unknown => 0,
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: ReplacementConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &str) -> Result<(), anyhow::Error> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_league_format() {
        let c = ReplacementConfig::default();
        assert_eq!(c.rank_for(Position::QB), 22);
        assert_eq!(c.rank_for(Position::RB), 48);
        assert_eq!(c.rank_for(Position::WR), 48);
        assert_eq!(c.rank_for(Position::K), 21);
        assert_eq!(c.rank_for(Position::DST), 21);
        assert_eq!(c.rank_for(Position::Unknown), 0);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replacement.toml");
        let path = path.to_str().unwrap();

        let config = ReplacementConfig { qb_rank: 10, ..Default::default() };
        config.save_to_file(path).unwrap();
        let loaded = ReplacementConfig::load_from_file(path).unwrap();
        assert_eq!(loaded, config);
    }
}
