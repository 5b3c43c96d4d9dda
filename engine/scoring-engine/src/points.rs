//! The fantasy point formula. Pure functions over one week's stat record;
//! every rule here has a mirror in [`crate::breakdown`] and the two must
//! stay numerically identical.

use season_registry::{Defense, Fumbles, GameLog, Kicking, Passing, Player, Receiving, Rushing};

/// Points awarded per yardage-threshold or long-score bonus event.
pub const BONUS_POINTS: i32 = 50;
/// Passing yardage bonus threshold and repeat step.
pub const PASS_BONUS_MIN: i32 = 300;
pub const PASS_BONUS_STEP: i32 = 100;
/// Rushing and receiving share one threshold and step.
pub const RUSH_RECV_BONUS_MIN: i32 = 100;
pub const RUSH_RECV_BONUS_STEP: i32 = 50;
/// A touchdown or field goal from this distance out earns a long-score bonus.
pub const LONG_SCORE_MIN: i32 = 50;
/// Field goals at or beyond the all-time-record benchmark earn this flat
/// bonus instead of the standard long-score bonus.
pub const PREMIUM_KICK_MIN: i32 = 67;
pub const PREMIUM_KICK_BONUS: i32 = 200;
pub const TWO_POINT_CONVERSION: i32 = 25;
pub const INTERCEPTION_THROWN: i32 = 50;
pub const FUMBLE_LOST: i32 = 25;
pub const EXTRA_POINT: i32 = 33;
/// Miss distances are not tracked; a fixed average-distance penalty stands in.
pub const MISSED_FIELD_GOAL: i32 = 46;
pub const DEFENSE_INTERCEPTION: i32 = 50;
pub const DEFENSE_FUMBLE_RECOVERY: i32 = 25;
pub const DEFENSE_SACK: i32 = 10;
pub const SAFETY: i32 = 50;
/// Window for the recent-form aggregates.
pub const RECENT_GAMES: usize = 3;

/// Number of bonus events a yardage total earns: one at the threshold plus
/// one per full `step` beyond it.
pub fn yardage_bonus_count(yards: i32, min: i32, step: i32) -> i32 {
    if yards >= min {
        1 + (yards - min) / step
    } else {
        0
    }
}

/// Bonus points for one touchdown scored from `distance` yards out.
fn long_score_bonus(distance: i32) -> i32 {
    if distance >= LONG_SCORE_MIN {
        BONUS_POINTS
    } else {
        0
    }
}

/// Points for one made field goal: its distance, plus the premium bonus at
/// record range or the standard long-score bonus at 50+. The premium
/// replaces the standard bonus, it does not stack.
pub fn made_field_goal_points(distance: i32) -> i32 {
    if distance >= PREMIUM_KICK_MIN {
        distance + PREMIUM_KICK_BONUS
    } else {
        distance + long_score_bonus(distance)
    }
}

pub(crate) fn passing_points(p: &Passing) -> i32 {
    let mut pts = p.yards;
    pts += BONUS_POINTS * yardage_bonus_count(p.yards, PASS_BONUS_MIN, PASS_BONUS_STEP);
    for &d in &p.td_yds {
        pts += d + long_score_bonus(d);
    }
    pts += TWO_POINT_CONVERSION * p.two_pt_conv;
    pts -= INTERCEPTION_THROWN * p.interceptions;
    pts
}

pub(crate) fn rushing_points(r: &Rushing) -> i32 {
    let mut pts = r.yards;
    pts += BONUS_POINTS * yardage_bonus_count(r.yards, RUSH_RECV_BONUS_MIN, RUSH_RECV_BONUS_STEP);
    for &d in &r.td_yds {
        pts += d + long_score_bonus(d);
    }
    pts += TWO_POINT_CONVERSION * r.two_pt_conv;
    pts
}

pub(crate) fn receiving_points(r: &Receiving) -> i32 {
    let mut pts = r.yards;
    pts += BONUS_POINTS * yardage_bonus_count(r.yards, RUSH_RECV_BONUS_MIN, RUSH_RECV_BONUS_STEP);
    for &d in &r.td_yds {
        pts += d + long_score_bonus(d);
    }
    pts += TWO_POINT_CONVERSION * r.two_pt_conv;
    pts
}

pub(crate) fn fumble_points(f: &Fumbles) -> i32 {
    -(FUMBLE_LOST * f.lost)
}

pub(crate) fn kicking_points(k: &Kicking) -> i32 {
    let mut pts = 0;
    for &d in &k.fg_yds {
        pts += made_field_goal_points(d);
    }
    // counters can lag the narrative lists within a partially ingested
    // record, so miss counts saturate at zero
    pts -= MISSED_FIELD_GOAL * (k.fga - k.fgm).max(0);
    pts += EXTRA_POINT * k.xpm;
    pts -= EXTRA_POINT * (k.xpa - k.xpm).max(0);
    pts
}

pub(crate) fn defense_points(d: &Defense) -> i32 {
    let mut pts = 0;
    pts += DEFENSE_INTERCEPTION * d.interceptions + d.int_return_yards;
    pts += DEFENSE_FUMBLE_RECOVERY * d.fumble_recoveries;
    pts += DEFENSE_SACK * d.sacks;
    pts += SAFETY * d.safeties;
    for &yd in &d.td_yds {
        pts += yd + long_score_bonus(yd);
    }
    // special-teams touchdowns score their yardage only
    for &yd in &d.td_st_yds {
        pts += yd;
    }
    pts
}

/// Fantasy points for one week's record. A record with no category blocks
/// (DNP) scores exactly 0.
pub fn game_points(game: &GameLog) -> i32 {
    let mut pts = 0;
    if let Some(p) = &game.passing {
        pts += passing_points(p);
    }
    if let Some(r) = &game.rushing {
        pts += rushing_points(r);
    }
    if let Some(r) = &game.receiving {
        pts += receiving_points(r);
    }
    if let Some(f) = &game.fumbles {
        pts += fumble_points(f);
    }
    if let Some(k) = &game.kicking {
        pts += kicking_points(k);
    }
    if let Some(d) = &game.defense {
        pts += defense_points(d);
    }
    pts
}

/// Season fantasy point total.
pub fn season_points(player: &Player) -> i32 {
    player.game_log.iter().map(game_points).sum()
}

/// Games actually played (records that are not DNP).
pub fn games_played(player: &Player) -> i32 {
    player.game_log.iter().filter(|g| !g.is_dnp()).count() as i32
}

/// Points across the player's `n` most recent played games, by week.
pub fn points_in_recent_games(player: &Player, n: usize) -> i32 {
    let mut played: Vec<&GameLog> = player.game_log.iter().filter(|g| !g.is_dnp()).collect();
    played.sort_by(|a, b| b.week.cmp(&a.week));
    played.iter().take(n).map(|g| game_points(g)).sum()
}

/// Qualifying bonus *events* in one week's record, for display. Distinct
/// from bonus points: a premium field goal is one event worth a different
/// point value, and special-teams touchdowns never produce events.
pub fn game_bonuses(game: &GameLog) -> i32 {
    let mut events = 0;
    if let Some(p) = &game.passing {
        events += yardage_bonus_count(p.yards, PASS_BONUS_MIN, PASS_BONUS_STEP);
        events += p.td_yds.iter().filter(|&&d| d >= LONG_SCORE_MIN).count() as i32;
    }
    if let Some(r) = &game.rushing {
        events += yardage_bonus_count(r.yards, RUSH_RECV_BONUS_MIN, RUSH_RECV_BONUS_STEP);
        events += r.td_yds.iter().filter(|&&d| d >= LONG_SCORE_MIN).count() as i32;
    }
    if let Some(r) = &game.receiving {
        events += yardage_bonus_count(r.yards, RUSH_RECV_BONUS_MIN, RUSH_RECV_BONUS_STEP);
        events += r.td_yds.iter().filter(|&&d| d >= LONG_SCORE_MIN).count() as i32;
    }
    if let Some(k) = &game.kicking {
        events += k.fg_yds.iter().filter(|&&d| d >= LONG_SCORE_MIN).count() as i32;
    }
    if let Some(d) = &game.defense {
        events += d.td_yds.iter().filter(|&&yd| yd >= LONG_SCORE_MIN).count() as i32;
    }
    events
}

/// Qualifying bonus events across the whole season.
pub fn total_bonuses(player: &Player) -> i32 {
    player.game_log.iter().map(game_bonuses).sum()
}
