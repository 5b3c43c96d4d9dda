//! Per-player season analysis: value over the replacement baseline plus
//! recent-form and consistency statistics.

use crate::points::{game_points, games_played, points_in_recent_games, season_points, RECENT_GAMES};
use season_registry::{Player, PositionBaseline};
use serde::Serialize;

/// One player's derived season figures. Averages over games are integer,
/// matching the ranking arithmetic; the distribution statistics are real.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PlayerAnalysis {
    pub points: i32,
    pub games: i32,
    /// Points across the three most recent played games.
    pub recent_points: i32,
    /// Integer points-per-game minus the position baseline.
    pub points_over_replacement: i32,
    /// Same, over the recent-form window only.
    pub recent_over_replacement: i32,
    pub mean: f64,
    pub std_dev: f64,
    /// std_dev / mean; 0 when the mean is 0. Lower is steadier.
    pub coefficient_of_variation: f64,
}

/// Computes the full analysis for one player. A player with no played
/// games yields the zero analysis rather than dividing by zero.
pub fn analyze(player: &Player, baseline: &PositionBaseline) -> PlayerAnalysis {
    let games = games_played(player);
    if games == 0 {
        return PlayerAnalysis::default();
    }

    let points = season_points(player);
    let replacement = baseline.for_position(player.position);

    let recent_games = (games as usize).min(RECENT_GAMES);
    let recent_points = points_in_recent_games(player, RECENT_GAMES);

    let per_game: Vec<f64> = player
        .game_log
        .iter()
        .filter(|g| !g.is_dnp())
        .map(|g| game_points(g) as f64)
        .collect();
    let mean = per_game.iter().sum::<f64>() / per_game.len() as f64;
    let variance =
        per_game.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / per_game.len() as f64;
    let std_dev = variance.sqrt();
    let coefficient_of_variation = if mean == 0.0 { 0.0 } else { std_dev / mean };

    PlayerAnalysis {
        points,
        games,
        recent_points,
        points_over_replacement: points / games - replacement,
        recent_over_replacement: recent_points / recent_games as i32 - replacement,
        mean,
        std_dev,
        coefficient_of_variation,
    }
}
