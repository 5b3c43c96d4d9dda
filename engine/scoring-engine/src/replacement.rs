//! Replacement-value stack ranking. For each position, players are ranked
//! by integer points-per-game and the value at the configured rank becomes
//! the position's baseline. Defense is ranked at the team level from the
//! season-long aggregate.

use crate::config::ReplacementConfig;
use crate::points::{
    games_played, season_points, DEFENSE_FUMBLE_RECOVERY, DEFENSE_INTERCEPTION, DEFENSE_SACK,
};
use season_registry::{Position, PositionBaseline, Result, Season, TeamDefense};
use tracing::info;

/// Estimated season fantasy points for a team defense, from the externally
/// supplied aggregate. Touchdown and safety detail is not in the
/// aggregate, so this deliberately under-counts a little.
pub fn estimate_team_defense_points(d: &TeamDefense) -> i32 {
    DEFENSE_INTERCEPTION * d.interceptions
        + d.int_return_yards
        + DEFENSE_FUMBLE_RECOVERY * d.fumble_recoveries
        + DEFENSE_SACK * d.sacks
}

pub struct ReplacementValueCalculator<'a> {
    config: &'a ReplacementConfig,
}

impl<'a> ReplacementValueCalculator<'a> {
    pub fn new(config: &'a ReplacementConfig) -> Self {
        Self { config }
    }

    /// Recomputes all five baselines and installs them on the season.
    /// A baseline already present must be cleared first; the five values
    /// are always written together.
    pub fn recompute(&self, season: &mut Season) -> Result<()> {
        let baseline = PositionBaseline {
            qb: self.position_baseline(season, Position::QB),
            rb: self.position_baseline(season, Position::RB),
            wr: self.position_baseline(season, Position::WR),
            k: self.position_baseline(season, Position::K),
            dst: self.dst_baseline(season),
        };
        season.set_baseline(baseline)?;
        info!(?baseline, "replacement baseline recomputed");
        Ok(())
    }

    /// Baseline for one player-level position. Players with zero games are
    /// excluded entirely; an empty ranking yields 0. Ties in average break
    /// on ascending player id so reruns produce identical rankings.
    fn position_baseline(&self, season: &Season, position: Position) -> i32 {
        let mut ranked: Vec<(i32, &str)> = season
            .players_at(position)
            .filter_map(|p| {
                let games = games_played(p);
                if games == 0 {
                    return None;
                }
                Some((season_points(p) / games, p.id()))
            })
            .collect();
        pick_at_rank(&mut ranked, self.config.rank_for(position))
    }

    /// Team-level defense baseline. Per-team game counts are not in the
    /// aggregate feed; the maximum games-played observed league-wide
    /// stands in as the divisor.
    fn dst_baseline(&self, season: &Season) -> i32 {
        let max_games = season.players().map(games_played).max().unwrap_or(0);
        if max_games == 0 {
            return 0;
        }

        let mut ranked: Vec<(i32, &str)> = season
            .teams()
            .filter_map(|t| {
                t.defense
                    .as_ref()
                    .map(|d| (estimate_team_defense_points(d) / max_games, t.code()))
            })
            .collect();
        pick_at_rank(&mut ranked, self.config.rank_for(Position::DST))
    }
}

/// Sorts descending by average (ascending id on ties) and returns the
/// average at `min(rank, len - 1)`, or 0 when nothing is eligible.
fn pick_at_rank(ranked: &mut [(i32, &str)], rank: usize) -> i32 {
    if ranked.is_empty() {
        return 0;
    }
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    let index = rank.min(ranked.len() - 1);
    ranked[index].0
}
