//! Human-readable per-category detail of the point formula. Mirrors
//! [`crate::points`] term for term; the tests assert the two never drift.

use crate::points::{
    made_field_goal_points, yardage_bonus_count, BONUS_POINTS, DEFENSE_FUMBLE_RECOVERY,
    DEFENSE_INTERCEPTION, DEFENSE_SACK, EXTRA_POINT, FUMBLE_LOST, INTERCEPTION_THROWN,
    LONG_SCORE_MIN, MISSED_FIELD_GOAL, PASS_BONUS_MIN, PASS_BONUS_STEP, RUSH_RECV_BONUS_MIN,
    RUSH_RECV_BONUS_STEP, SAFETY, TWO_POINT_CONVERSION,
};
use season_registry::GameLog;
use std::fmt;

/// One scoring term: a label and the signed points it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub label: String,
    pub points: i32,
}

/// The full detail of one week's score.
#[derive(Debug, Clone, Default)]
pub struct Breakdown {
    terms: Vec<Term>,
}

impl Breakdown {
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Sum of all terms. Equal to [`crate::points::game_points`] for the
    /// record this breakdown was built from.
    pub fn total(&self) -> i32 {
        self.terms.iter().map(|t| t.points).sum()
    }

    fn push(&mut self, label: impl Into<String>, points: i32) {
        self.terms.push(Term { label: label.into(), points });
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {:+}", term.label, term.points)?;
        }
        write!(f, " = {}", self.total())
    }
}

fn long_score_term(distance: i32) -> i32 {
    if distance >= LONG_SCORE_MIN {
        distance + BONUS_POINTS
    } else {
        distance
    }
}

/// Builds the detail for one week's record.
pub fn breakdown(game: &GameLog) -> Breakdown {
    let mut b = Breakdown::default();

    if let Some(p) = &game.passing {
        b.push("pass yds", p.yards);
        let n = yardage_bonus_count(p.yards, PASS_BONUS_MIN, PASS_BONUS_STEP);
        if n > 0 {
            b.push(format!("pass yds bonus x{n}"), BONUS_POINTS * n);
        }
        for &d in &p.td_yds {
            b.push(format!("pass td {d}yd"), long_score_term(d));
        }
        if p.two_pt_conv > 0 {
            b.push("2pt pass", TWO_POINT_CONVERSION * p.two_pt_conv);
        }
        if p.interceptions > 0 {
            b.push("int thrown", -(INTERCEPTION_THROWN * p.interceptions));
        }
    }

    if let Some(r) = &game.rushing {
        b.push("rush yds", r.yards);
        let n = yardage_bonus_count(r.yards, RUSH_RECV_BONUS_MIN, RUSH_RECV_BONUS_STEP);
        if n > 0 {
            b.push(format!("rush yds bonus x{n}"), BONUS_POINTS * n);
        }
        for &d in &r.td_yds {
            b.push(format!("rush td {d}yd"), long_score_term(d));
        }
        if r.two_pt_conv > 0 {
            b.push("2pt rush", TWO_POINT_CONVERSION * r.two_pt_conv);
        }
    }

    if let Some(r) = &game.receiving {
        b.push("rec yds", r.yards);
        let n = yardage_bonus_count(r.yards, RUSH_RECV_BONUS_MIN, RUSH_RECV_BONUS_STEP);
        if n > 0 {
            b.push(format!("rec yds bonus x{n}"), BONUS_POINTS * n);
        }
        for &d in &r.td_yds {
            b.push(format!("rec td {d}yd"), long_score_term(d));
        }
        if r.two_pt_conv > 0 {
            b.push("2pt rec", TWO_POINT_CONVERSION * r.two_pt_conv);
        }
    }

    if let Some(fum) = &game.fumbles {
        if fum.lost > 0 {
            b.push("fumbles lost", -(FUMBLE_LOST * fum.lost));
        }
    }

    if let Some(k) = &game.kicking {
        for &d in &k.fg_yds {
            b.push(format!("fg {d}yd"), made_field_goal_points(d));
        }
        let missed = (k.fga - k.fgm).max(0);
        if missed > 0 {
            b.push("fg missed", -(MISSED_FIELD_GOAL * missed));
        }
        if k.xpm > 0 {
            b.push("xp made", EXTRA_POINT * k.xpm);
        }
        let xp_missed = (k.xpa - k.xpm).max(0);
        if xp_missed > 0 {
            b.push("xp missed", -(EXTRA_POINT * xp_missed));
        }
    }

    if let Some(d) = &game.defense {
        if d.interceptions > 0 {
            b.push("def int", DEFENSE_INTERCEPTION * d.interceptions + d.int_return_yards);
        }
        if d.fumble_recoveries > 0 {
            b.push("fum rec", DEFENSE_FUMBLE_RECOVERY * d.fumble_recoveries);
        }
        if d.sacks > 0 {
            b.push("sacks", DEFENSE_SACK * d.sacks);
        }
        if d.safeties > 0 {
            b.push("safety", SAFETY * d.safeties);
        }
        for &yd in &d.td_yds {
            b.push(format!("def td {yd}yd"), long_score_term(yd));
        }
        for &yd in &d.td_st_yds {
            b.push(format!("st td {yd}yd"), yd);
        }
    }

    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::game_points;
    use season_registry::GameLog;

    fn sample_records() -> Vec<GameLog> {
        let mut records = Vec::new();

        let mut g = GameLog::new(1);
        let p = g.passing_mut();
        p.yards = 320;
        p.td_yds = vec![10, 45];
        p.interceptions = 1;
        records.push(g);

        let mut g = GameLog::new(2);
        let k = g.kicking_mut();
        k.fg_yds = vec![68, 51, 22];
        k.fgm = 3;
        k.fga = 5;
        k.xpm = 2;
        k.xpa = 3;
        records.push(g);

        let mut g = GameLog::new(3);
        g.rushing_mut().yards = 164;
        g.rushing_mut().td_yds = vec![62];
        g.receiving_mut().yards = 31;
        g.receiving_mut().two_pt_conv = 1;
        g.fumbles_mut().lost = 2;
        records.push(g);

        let mut g = GameLog::new(4);
        let d = g.defense_mut();
        d.interceptions = 2;
        d.int_return_yards = 41;
        d.sacks = 4;
        d.fumble_recoveries = 1;
        d.safeties = 1;
        d.td_yds = vec![55];
        d.td_st_yds = vec![98];
        records.push(g);

        records.push(GameLog::new(5));
        records
    }

    #[test]
    fn breakdown_total_matches_the_formula() {
        for g in sample_records() {
            let b = breakdown(&g);
            assert_eq!(b.total(), game_points(&g), "week {} diverged: {b}", g.week);
        }
    }

    #[test]
    fn dnp_breakdown_is_empty() {
        let b = breakdown(&GameLog::new(7));
        assert!(b.terms().is_empty());
        assert_eq!(b.total(), 0);
    }

    #[test]
    fn display_lists_terms_and_total() {
        let mut g = GameLog::new(1);
        g.rushing_mut().yards = 120;
        let rendered = breakdown(&g).to_string();
        assert_eq!(rendered, "rush yds +120, rush yds bonus x1 +50 = 170");
    }
}
