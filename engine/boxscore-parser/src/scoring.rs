//! Scoring-play grammar: classifies free-text play descriptions against
//! three ordered pattern tables and dispatches to handlers that mutate the
//! scoring players' current-week records.
//!
//! The literal wording of every pattern is contract with the upstream
//! source's phrasing. Patterns within a table are tried in declaration
//! order and the first match wins, so the tables must stay ordered lists,
//! never maps.

use crate::error::{IngestError, Result};
use regex::Regex;
use season_registry::{Position, Season};
use tracing::{info, warn};

/// What one scoring-play line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// A touchdown pattern matched. `extra_point` reports whether the same
    /// line also carried a recognizable conversion phrase; a touchdown
    /// without one is legitimate (it can end the game).
    Touchdown { extra_point: bool },
    /// A field goal or safety.
    Other,
    /// No pattern matched; the line was logged and ignored.
    Unknown,
}

struct PlayCtx<'a> {
    season: &'a mut Season,
    week: u8,
    scoring_team: Option<&'a str>,
    play: &'a str,
}

type Handler = fn(&mut PlayCtx<'_>, &[String]) -> Result<()>;

/// Parser for narrative scoring-play lines. Stateless across calls except
/// for the season registry it is handed per line; compile it once and
/// reuse it for a whole ingestion pass.
pub struct ScoringPlayParser {
    touchdowns: Vec<(Regex, Handler)>,
    /// `None` handlers are phrases that must be recognized (so the line is
    /// not reported as missing its conversion) but record nothing.
    extra_points: Vec<(Regex, Option<Handler>)>,
    other_scores: Vec<(Regex, Handler)>,
}

impl ScoringPlayParser {
    pub fn new() -> Self {
        let touchdowns: Vec<(Regex, Handler)> = vec![
            (re(r"([\w .'-]*) (\d*) yard pass from ([\w .'-]*)"), touchdown_pass as Handler),
            (re(r"([\w .'-]*) (\d*) yard rush"), touchdown_run),
            (re(r"([\w .'-]*) fumble recovery in end zone"), endzone_recovery),
            (re(r"([\w .'-]*) kickoff recovery in end zone"), endzone_recovery),
            (re(r"([\w .'-]*) (\d*) yard fumble return"), touchdown_defense),
            (re(r"([\w .'-]*) (\d*) yard interception return"), touchdown_defense),
            (re(r"([\w .'-]*) (\d*) yard blocked punt return"), touchdown_special_teams),
            (re(r"([\w .'-]*) (\d*) yard blocked field goal return"), touchdown_special_teams),
            (re(r"([\w .'-]*) (\d*) yard kickoff return"), touchdown_special_teams),
            (re(r"([\w .'-]*) (\d*) yard punt return"), touchdown_special_teams),
        ];

        let extra_points: Vec<(Regex, Option<Handler>)> = vec![
            (re(r"\(([\w .'-]*) kick\)$"), Some(extra_point_kick as Handler)),
            (re(r"\(([\w .'-]*) kick failed\)$"), None),
            (re(r"\(([\w .'-]*) run\)$"), Some(extra_point_run)),
            (re(r"\(run failed\)$"), None),
            (re(r"\(([\w .'-]*) pass from ([\w .'-]*)\)$"), Some(extra_point_pass)),
            (re(r"\(pass failed\)$"), None),
        ];

        let other_scores: Vec<(Regex, Handler)> = vec![
            (re(r"([\w .'-]*) (\d*) yard field goal"), field_goal as Handler),
            (re(r"Safety, ([\w .'-]*) tackled in end zone by ([\w ']*)"), safety),
            (re(r"Safety, ([\w .'-]*) sacked in end zone by ([\w ']*)"), safety),
            (re(r"Safety, ([\w .'-]*) offensive holding in end zone"), safety),
        ];

        ScoringPlayParser { touchdowns, extra_points, other_scores }
    }

    /// Classifies and records one scoring-play line for `week`.
    ///
    /// `scoring_team` names the team credited with defensive and
    /// special-teams scores. Requires the season's name index to be built;
    /// an unparseable line is logged and ignored, never an error.
    pub fn record(
        &self,
        season: &mut Season,
        week: u8,
        scoring_team: Option<&str>,
        play: &str,
    ) -> Result<ScoreOutcome> {
        let mut ctx = PlayCtx { season, week, scoring_team, play };

        for (pattern, handler) in &self.touchdowns {
            if let Some(captures) = capture_all(pattern, play) {
                handler(&mut ctx, &captures)?;

                for (xp_pattern, xp_handler) in &self.extra_points {
                    if let Some(xp_captures) = capture_all(xp_pattern, play) {
                        if let Some(xp_handler) = xp_handler {
                            xp_handler(&mut ctx, &xp_captures)?;
                        }
                        return Ok(ScoreOutcome::Touchdown { extra_point: true });
                    }
                }

                // legitimate when the touchdown ends the game
                info!(play, "no extra point found for touchdown");
                return Ok(ScoreOutcome::Touchdown { extra_point: false });
            }
        }

        for (pattern, handler) in &self.other_scores {
            if let Some(captures) = capture_all(pattern, play) {
                handler(&mut ctx, &captures)?;
                return Ok(ScoreOutcome::Other);
            }
        }

        warn!(play, "unknown score");
        Ok(ScoreOutcome::Unknown)
    }
}

impl Default for ScoringPlayParser {
    fn default() -> Self {
        Self::new()
    }
}

fn re(pattern: &str) -> Regex {
    // the tables are fixed literals; a failure here is a programming error
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid scoring pattern {pattern:?}: {e}"))
}

fn capture_all(pattern: &Regex, text: &str) -> Option<Vec<String>> {
    pattern.captures(text).map(|caps| {
        caps.iter()
            .skip(1)
            .map(|m| m.map(|m| m.as_str().trim().to_string()).unwrap_or_default())
            .collect()
    })
}

fn parse_distance(raw: &str) -> Result<i32> {
    raw.parse().map_err(|_| IngestError::InvalidNumber {
        index: 0,
        what: "scoring distance",
        value: raw.to_string(),
    })
}

/// Resolves a captured name through the name index. A name with no entry
/// means the player never appeared in the box score; the mutation for that
/// name is skipped with a warning rather than silently attributed to a
/// throwaway entity.
fn lookup_player(ctx: &PlayCtx<'_>, name: &str) -> Result<Option<String>> {
    let id = ctx.season.player_id_by_name(name)?;
    if id.is_none() {
        warn!(name, play = ctx.play, "scoring play references a player missing from the box score");
    }
    Ok(id)
}

/// The scoring team's DST placeholder record for this week, or `None`
/// (with a warning) when no scoring team was supplied.
fn dst_defense_mut<'s>(
    ctx: &'s mut PlayCtx<'_>,
) -> Option<&'s mut season_registry::Defense> {
    let code = match ctx.scoring_team {
        Some(code) => season_registry::normalize_team_code(code),
        None => {
            warn!(play = ctx.play, "defensive score with no scoring team supplied");
            return None;
        }
    };

    let week = ctx.week;
    ctx.season.get_or_create_team(&code);
    let init_code = code.clone();
    let player = ctx
        .season
        .get_or_create_player_with(&code, |p| {
            p.name = init_code.clone();
            p.position = Position::DST;
            p.team = Some(init_code);
        })
        .into_inner();
    Some(player.game_for_week_mut(week).defense_mut())
}

fn touchdown_pass(ctx: &mut PlayCtx<'_>, captures: &[String]) -> Result<()> {
    let distance = parse_distance(&captures[1])?;
    let week = ctx.week;

    if let Some(id) = lookup_player(ctx, &captures[0])? {
        let receiver = ctx.season.player_mut(&id).unwrap();
        receiver.game_for_week_mut(week).receiving_mut().td_yds.push(distance);
    }
    if let Some(id) = lookup_player(ctx, &captures[2])? {
        let passer = ctx.season.player_mut(&id).unwrap();
        passer.game_for_week_mut(week).passing_mut().td_yds.push(distance);
    }
    Ok(())
}

fn touchdown_run(ctx: &mut PlayCtx<'_>, captures: &[String]) -> Result<()> {
    let distance = parse_distance(&captures[1])?;
    let week = ctx.week;

    if let Some(id) = lookup_player(ctx, &captures[0])? {
        let rusher = ctx.season.player_mut(&id).unwrap();
        rusher.game_for_week_mut(week).rushing_mut().td_yds.push(distance);
    }
    Ok(())
}

fn touchdown_defense(ctx: &mut PlayCtx<'_>, captures: &[String]) -> Result<()> {
    let distance = parse_distance(&captures[1])?;
    if let Some(defense) = dst_defense_mut(ctx) {
        defense.td_yds.push(distance);
    }
    Ok(())
}

fn touchdown_special_teams(ctx: &mut PlayCtx<'_>, captures: &[String]) -> Result<()> {
    let distance = parse_distance(&captures[1])?;
    if let Some(defense) = dst_defense_mut(ctx) {
        defense.td_st_yds.push(distance);
    }
    Ok(())
}

/// End-zone recoveries have no stated distance; they carry an implicit
/// one-yard score.
fn endzone_recovery(ctx: &mut PlayCtx<'_>, _captures: &[String]) -> Result<()> {
    if let Some(defense) = dst_defense_mut(ctx) {
        defense.td_st_yds.push(1);
    }
    Ok(())
}

fn extra_point_kick(ctx: &mut PlayCtx<'_>, captures: &[String]) -> Result<()> {
    let week = ctx.week;
    if let Some(id) = lookup_player(ctx, &captures[0])? {
        let kicker = ctx.season.player_mut(&id).unwrap();
        let k = kicker.game_for_week_mut(week).kicking_mut();
        k.xpm += 1;
        k.xpa += 1;
    }
    Ok(())
}

fn extra_point_run(ctx: &mut PlayCtx<'_>, captures: &[String]) -> Result<()> {
    let week = ctx.week;
    if let Some(id) = lookup_player(ctx, &captures[0])? {
        let rusher = ctx.season.player_mut(&id).unwrap();
        rusher.game_for_week_mut(week).rushing_mut().two_pt_conv += 1;
    }
    Ok(())
}

fn extra_point_pass(ctx: &mut PlayCtx<'_>, captures: &[String]) -> Result<()> {
    let week = ctx.week;
    if let Some(id) = lookup_player(ctx, &captures[0])? {
        let receiver = ctx.season.player_mut(&id).unwrap();
        receiver.game_for_week_mut(week).receiving_mut().two_pt_conv += 1;
    }
    if let Some(id) = lookup_player(ctx, &captures[1])? {
        let passer = ctx.season.player_mut(&id).unwrap();
        passer.game_for_week_mut(week).passing_mut().two_pt_conv += 1;
    }
    Ok(())
}

fn field_goal(ctx: &mut PlayCtx<'_>, captures: &[String]) -> Result<()> {
    let distance = parse_distance(&captures[1])?;
    let week = ctx.week;

    if let Some(id) = lookup_player(ctx, &captures[0])? {
        let kicker = ctx.season.player_mut(&id).unwrap();
        kicker.game_for_week_mut(week).kicking_mut().fg_yds.push(distance);
    }
    Ok(())
}

fn safety(ctx: &mut PlayCtx<'_>, _captures: &[String]) -> Result<()> {
    if let Some(defense) = dst_defense_mut(ctx) {
        defense.safeties += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use season_registry::Season;

    fn seeded_season() -> Season {
        let mut season = Season::new(2025);
        season.get_or_create_player_with("AlleJo00", |p| p.name = "Josh Allen".to_string());
        season.get_or_create_player_with("BrowJo00", |p| p.name = "John Brown".to_string());
        season.get_or_create_player_with("BassTy00", |p| p.name = "Tyler Bass".to_string());
        season.get_or_create_player_with("TuckJu00", |p| p.name = "Justin Tucker".to_string());
        season
    }

    #[test]
    fn touchdown_pass_credits_receiver_and_passer() {
        let mut season = seeded_season();
        let parser = ScoringPlayParser::new();

        season.build_name_index().unwrap();
        let outcome = parser
            .record(&mut season, 3, None, "John Brown 13 yard pass from Josh Allen (Tyler Bass kick)")
            .unwrap();
        season.drop_name_index().unwrap();

        assert_eq!(outcome, ScoreOutcome::Touchdown { extra_point: true });

        let receiver = season.player("BrowJo00").unwrap();
        assert_eq!(receiver.game_for_week(3).unwrap().receiving.as_ref().unwrap().td_yds, vec![13]);

        let passer = season.player("AlleJo00").unwrap();
        assert_eq!(passer.game_for_week(3).unwrap().passing.as_ref().unwrap().td_yds, vec![13]);
    }

    #[test]
    fn extra_point_kick_is_recorded_for_the_named_kicker() {
        let mut season = seeded_season();
        let parser = ScoringPlayParser::new();

        season.build_name_index().unwrap();
        parser
            .record(&mut season, 3, None, "John Brown 13 yard pass from Josh Allen (Justin Tucker kick)")
            .unwrap();
        season.drop_name_index().unwrap();

        let k = season
            .player("TuckJu00")
            .unwrap()
            .game_for_week(3)
            .unwrap()
            .kicking
            .clone()
            .unwrap();
        assert_eq!((k.xpm, k.xpa), (1, 1));
    }

    #[test]
    fn failed_conversions_match_and_record_nothing() {
        let mut season = seeded_season();
        let parser = ScoringPlayParser::new();

        season.build_name_index().unwrap();
        let outcome = parser
            .record(&mut season, 3, None, "Josh Allen 2 yard rush (run failed)")
            .unwrap();
        season.drop_name_index().unwrap();

        assert_eq!(outcome, ScoreOutcome::Touchdown { extra_point: true });
        let allen = season.player("AlleJo00").unwrap().game_for_week(3).unwrap();
        assert_eq!(allen.rushing.as_ref().unwrap().td_yds, vec![2]);
        assert_eq!(allen.rushing.as_ref().unwrap().two_pt_conv, 0);
        assert!(allen.kicking.is_none());
    }

    #[test]
    fn touchdown_without_conversion_phrase_is_not_an_error() {
        let mut season = seeded_season();
        let parser = ScoringPlayParser::new();

        season.build_name_index().unwrap();
        let outcome = parser.record(&mut season, 3, None, "Josh Allen 12 yard rush").unwrap();
        season.drop_name_index().unwrap();

        assert_eq!(outcome, ScoreOutcome::Touchdown { extra_point: false });
    }

    #[test]
    fn two_point_pass_credits_both_players() {
        let mut season = seeded_season();
        let parser = ScoringPlayParser::new();

        season.build_name_index().unwrap();
        parser
            .record(&mut season, 3, None, "Josh Allen 1 yard rush (John Brown pass from Josh Allen)")
            .unwrap();
        season.drop_name_index().unwrap();

        let brown = season.player("BrowJo00").unwrap().game_for_week(3).unwrap();
        assert_eq!(brown.receiving.as_ref().unwrap().two_pt_conv, 1);
        let allen = season.player("AlleJo00").unwrap().game_for_week(3).unwrap();
        assert_eq!(allen.passing.as_ref().unwrap().two_pt_conv, 1);
    }

    #[test]
    fn field_goal_appends_distance() {
        let mut season = seeded_season();
        let parser = ScoringPlayParser::new();

        season.build_name_index().unwrap();
        let outcome = parser
            .record(&mut season, 3, None, "Justin Tucker 52 yard field goal")
            .unwrap();
        season.drop_name_index().unwrap();

        assert_eq!(outcome, ScoreOutcome::Other);
        let k = season.player("TuckJu00").unwrap().game_for_week(3).unwrap().kicking.clone().unwrap();
        assert_eq!(k.fg_yds, vec![52]);
        // made/attempt counters are owned by the box-score table
        assert_eq!((k.fgm, k.fga), (0, 0));
    }

    #[test]
    fn safety_phrasings_credit_the_scoring_team() {
        let plays = [
            "Safety, J. Smith tackled in end zone by T. Watt",
            "Safety, J. Smith sacked in end zone by T. Watt",
            "Safety, J. Smith offensive holding in end zone",
        ];

        for play in plays {
            let mut season = seeded_season();
            let parser = ScoringPlayParser::new();

            season.build_name_index().unwrap();
            let outcome = parser.record(&mut season, 3, Some("PIT"), play).unwrap();
            season.drop_name_index().unwrap();

            assert_eq!(outcome, ScoreOutcome::Other, "{play}");
            let d = season.player("PIT").unwrap().game_for_week(3).unwrap().defense.clone().unwrap();
            assert_eq!(d.safeties, 1, "{play}");
        }
    }

    #[test]
    fn defensive_and_special_teams_touchdowns_split_distance_lists() {
        let mut season = seeded_season();
        let parser = ScoringPlayParser::new();

        season.build_name_index().unwrap();
        parser
            .record(&mut season, 3, Some("PIT"), "T. Watt 45 yard interception return (Chris Boswell kick failed)")
            .unwrap();
        parser
            .record(&mut season, 3, Some("PIT"), "C. Austin 98 yard kickoff return")
            .unwrap();
        parser
            .record(&mut season, 3, Some("PIT"), "M. Fitzpatrick fumble recovery in end zone")
            .unwrap();
        season.drop_name_index().unwrap();

        let d = season.player("PIT").unwrap().game_for_week(3).unwrap().defense.clone().unwrap();
        assert_eq!(d.td_yds, vec![45]);
        assert_eq!(d.td_st_yds, vec![98, 1]);
    }

    #[test]
    fn unknown_score_is_logged_and_ignored() {
        let mut season = seeded_season();
        let parser = ScoringPlayParser::new();

        season.build_name_index().unwrap();
        let outcome = parser
            .record(&mut season, 3, None, "Quarterback kneels to end the half")
            .unwrap();
        season.drop_name_index().unwrap();

        assert_eq!(outcome, ScoreOutcome::Unknown);
    }

    #[test]
    fn unknown_player_name_is_skipped_without_error() {
        let mut season = seeded_season();
        let parser = ScoringPlayParser::new();

        season.build_name_index().unwrap();
        let outcome = parser
            .record(&mut season, 3, None, "Total Stranger 9 yard rush")
            .unwrap();
        season.drop_name_index().unwrap();

        assert_eq!(outcome, ScoreOutcome::Touchdown { extra_point: false });
        assert!(season.players().all(|p| p.game_log.is_empty()));
    }

    #[test]
    fn lookup_without_index_is_a_sequencing_error() {
        let mut season = seeded_season();
        let parser = ScoringPlayParser::new();
        let err = parser.record(&mut season, 3, None, "Josh Allen 12 yard rush").unwrap_err();
        assert!(matches!(
            err,
            IngestError::Registry(season_registry::RegistryError::IndexNotBuilt)
        ));
    }
}
