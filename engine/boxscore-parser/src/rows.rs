//! Column-index mapping of box-score table rows onto game stat records.
//!
//! The table-extraction layer (not part of this crate) yields one row
//! record per table row: the player's stable id and display name plus the
//! raw column text values. Column positions here are coupled to the source
//! table's schema and must be re-validated whenever that schema changes.

use crate::error::{IngestError, Result};
use season_registry::{CityCodes, Position, Season};
use tracing::warn;

/// One row of a player table: stable id, display name, and the raw cells.
#[derive(Debug, Clone)]
pub struct PlayerRow<'a> {
    pub player_id: &'a str,
    pub player_name: &'a str,
    pub columns: &'a [String],
}

// player_offense table schema
const COL_TEAM: usize = 1;
const COL_PASS_CMP: usize = 2;
const COL_PASS_ATT: usize = 3;
const COL_PASS_YDS: usize = 4;
const COL_PASS_TD: usize = 5;
const COL_PASS_INT: usize = 6;
const COL_PASS_LONG: usize = 9;
const COL_RUSH_CAR: usize = 11;
const COL_RUSH_YDS: usize = 12;
const COL_RUSH_TD: usize = 13;
const COL_RUSH_LONG: usize = 14;
const COL_REC_TGT: usize = 15;
const COL_REC_REC: usize = 16;
const COL_REC_YDS: usize = 17;
const COL_REC_TD: usize = 18;
const COL_REC_LONG: usize = 19;
const COL_FUM: usize = 20;
const COL_FUM_LOST: usize = 21;

// kicking table schema
const COL_KICK_XPM: usize = 2;
const COL_KICK_XPA: usize = 3;
const COL_KICK_FGM: usize = 4;
const COL_KICK_FGA: usize = 5;

// player_defense table schema
const COL_DEF_TEAM: usize = 1;
const COL_DEF_INT: usize = 2;
const COL_DEF_INT_YDS: usize = 3;
const COL_DEF_INT_TD: usize = 4;

// injury report schema
const COL_INJ_STATUS: usize = 3;
const COL_INJ_REPORT: usize = 4;
const COL_INJ_PRACTICE: usize = 5;

fn col<'a>(columns: &'a [String], index: usize, what: &'static str) -> Result<&'a str> {
    columns
        .get(index)
        .map(String::as_str)
        .ok_or(IngestError::MissingColumn { index, what })
}

fn col_i32(columns: &[String], index: usize, what: &'static str) -> Result<i32> {
    let value = col(columns, index, what)?;
    value.trim().parse().map_err(|_| IngestError::InvalidNumber {
        index,
        what,
        value: value.to_string(),
    })
}

/// Blank cells in the kicking table mean zero, not a parse fault: punters
/// and kickers share the table and punters leave these columns empty.
fn col_i32_or_blank(columns: &[String], index: usize, what: &'static str) -> Result<i32> {
    let value = col(columns, index, what)?;
    if value.trim().is_empty() {
        return Ok(0);
    }
    value.trim().parse().map_err(|_| IngestError::InvalidNumber {
        index,
        what,
        value: value.to_string(),
    })
}

/// The two teams in one game, resolved through the season's team registry
/// so each stat line can be stamped with its opponent.
#[derive(Debug, Clone)]
pub struct GameTeams {
    home: String,
    away: String,
}

impl GameTeams {
    pub fn new(season: &mut Season, code1: &str, code2: &str) -> Self {
        let home = season.get_or_create_team(code1).code().to_string();
        let away = season.get_or_create_team(code2).code().to_string();
        GameTeams { home, away }
    }

    /// The opponent of `code` in this game.
    pub fn opponent_of(&self, code: &str) -> Result<&str> {
        if code == self.home {
            Ok(&self.away)
        } else if code == self.away {
            Ok(&self.home)
        } else {
            Err(IngestError::TeamNotInGame { team: code.to_string() })
        }
    }
}

/// Records one game's box-score rows into the season registry. One
/// instance per (game, week); all mutation is serialized through the
/// season it borrows.
pub struct BoxscoreIngest<'a> {
    season: &'a mut Season,
    week: u8,
    teams: GameTeams,
    cities: &'a CityCodes,
}

impl<'a> BoxscoreIngest<'a> {
    pub fn new(
        season: &'a mut Season,
        week: u8,
        teams: GameTeams,
        cities: &'a CityCodes,
    ) -> Result<Self> {
        if !(1..=18).contains(&week) {
            return Err(IngestError::InvalidWeek(week));
        }
        Ok(BoxscoreIngest { season, week, teams, cities })
    }

    /// Maps one player_offense row. Category blocks are only created for
    /// categories the player actually participated in; the fumbles block
    /// is always recorded.
    pub fn record_offense_row(&mut self, row: &PlayerRow<'_>) -> Result<()> {
        let attempts = col_i32(row.columns, COL_PASS_ATT, "pass attempts")?;
        let carries = col_i32(row.columns, COL_RUSH_CAR, "carries")?;
        let targets = col_i32(row.columns, COL_REC_TGT, "targets")?;
        let fumbles = col_i32(row.columns, COL_FUM, "fumbles")?;
        let fumbles_lost = col_i32(row.columns, COL_FUM_LOST, "fumbles lost")?;

        let player_id = self.resolve_player(row);
        let team = self.assign_team(row)?;
        let opponent = self.teams.opponent_of(&team)?.to_string();
        let player = self.season.player_mut(&player_id).unwrap();
        let game = player.game_for_week_mut(self.week);
        game.opponent = Some(opponent);

        if attempts > 0 {
            let p = game.passing_mut();
            p.completions = col_i32(row.columns, COL_PASS_CMP, "completions")?;
            p.attempts = attempts;
            p.yards = col_i32(row.columns, COL_PASS_YDS, "passing yards")?;
            p.touchdowns = col_i32(row.columns, COL_PASS_TD, "passing touchdowns")?;
            p.interceptions = col_i32(row.columns, COL_PASS_INT, "interceptions")?;
            p.longest = col_i32(row.columns, COL_PASS_LONG, "longest completion")?;
        }

        if carries > 0 {
            let r = game.rushing_mut();
            r.carries = carries;
            r.yards = col_i32(row.columns, COL_RUSH_YDS, "rushing yards")?;
            r.touchdowns = col_i32(row.columns, COL_RUSH_TD, "rushing touchdowns")?;
            r.longest = col_i32(row.columns, COL_RUSH_LONG, "longest rush")?;
        }

        if targets > 0 {
            let c = game.receiving_mut();
            c.receptions = col_i32(row.columns, COL_REC_REC, "receptions")?;
            c.yards = col_i32(row.columns, COL_REC_YDS, "receiving yards")?;
            c.touchdowns = col_i32(row.columns, COL_REC_TD, "receiving touchdowns")?;
            c.longest = col_i32(row.columns, COL_REC_LONG, "longest reception")?;
        }

        let f = game.fumbles_mut();
        f.fumbles = fumbles;
        f.lost = fumbles_lost;

        Ok(())
    }

    /// Maps one kicking-table row. Rows with all four counter columns
    /// blank are punters and are skipped. Counter fields are assigned
    /// authoritatively, but an existing field-goal distance list (appended
    /// by narrative scoring plays) is preserved.
    pub fn record_kicking_row(&mut self, row: &PlayerRow<'_>) -> Result<()> {
        let raw_counters = [COL_KICK_XPM, COL_KICK_XPA, COL_KICK_FGM, COL_KICK_FGA];
        let mut all_blank = true;
        for index in raw_counters {
            if !col(row.columns, index, "kicking counter")?.trim().is_empty() {
                all_blank = false;
            }
        }
        if all_blank {
            return Ok(());
        }

        let xpm = col_i32_or_blank(row.columns, COL_KICK_XPM, "extra points made")?;
        let xpa = col_i32_or_blank(row.columns, COL_KICK_XPA, "extra point attempts")?;
        let fgm = col_i32_or_blank(row.columns, COL_KICK_FGM, "field goals made")?;
        let fga = col_i32_or_blank(row.columns, COL_KICK_FGA, "field goal attempts")?;

        let player_id = self.resolve_player(row);
        let team = self.assign_team(row)?;
        let opponent = self.teams.opponent_of(&team)?.to_string();
        let player = self.season.player_mut(&player_id).unwrap();
        let game = player.game_for_week_mut(self.week);
        game.opponent = Some(opponent);

        let k = game.kicking_mut();
        k.xpm = xpm;
        k.xpa = xpa;
        k.fgm = fgm;
        k.fga = fga;

        Ok(())
    }

    /// Aggregates player_defense rows per team and records interception
    /// totals against each team's DST placeholder.
    pub fn record_interception_rows(&mut self, rows: &[Vec<String>]) -> Result<()> {
        let mut per_team: Vec<(String, i32, i32, i32)> = Vec::new();
        for columns in rows {
            let team = col(columns, COL_DEF_TEAM, "team")?.to_string();
            let ints = col_i32(columns, COL_DEF_INT, "interceptions")?;
            let yds = col_i32(columns, COL_DEF_INT_YDS, "interception return yards")?;
            let tds = col_i32(columns, COL_DEF_INT_TD, "interception return touchdowns")?;

            match per_team.iter_mut().find(|(t, ..)| *t == team) {
                Some(entry) => {
                    entry.1 += ints;
                    entry.2 += yds;
                    entry.3 += tds;
                }
                None => per_team.push((team, ints, yds, tds)),
            }
        }

        for (team, ints, yds, tds) in per_team {
            let dst_id = self.get_or_create_dst(&team)?;
            let opponent = self.teams.opponent_of(&team)?.to_string();
            let player = self.season.player_mut(&dst_id).unwrap();
            let game = player.game_for_week_mut(self.week);
            game.opponent = Some(opponent);
            let d = game.defense_mut();
            d.interceptions = ints;
            d.int_return_yards = yds;
            d.int_return_tds = tds;
        }

        Ok(())
    }

    /// Records sacks and fumble recoveries from the team_stats table.
    /// The table reports offensive figures ("Sacked-Yards", "Fumbles-Lost"
    /// as `N-M` pairs), so each value is credited to the OPPOSING defense.
    pub fn record_sacks_and_fumbles(
        &mut self,
        team1: &str,
        team2: &str,
        sacked_row: &[String],
        fumbles_row: &[String],
    ) -> Result<()> {
        let sacked = parse_pair_row(sacked_row, "Sacked-Yards", 0)?;
        let fumbles = parse_pair_row(fumbles_row, "Fumbles-Lost", 1)?;

        self.record_defense_takeaways(team1, sacked.1, fumbles.1)?;
        self.record_defense_takeaways(team2, sacked.0, fumbles.0)?;
        Ok(())
    }

    fn record_defense_takeaways(&mut self, team: &str, sacks: i32, recoveries: i32) -> Result<()> {
        let dst_id = self.get_or_create_dst(team)?;
        let opponent = self.teams.opponent_of(&season_registry::normalize_team_code(team))?.to_string();
        let player = self.season.player_mut(&dst_id).unwrap();
        let game = player.game_for_week_mut(self.week);
        game.opponent = Some(opponent);
        let d = game.defense_mut();
        d.sacks = sacks;
        d.fumble_recoveries = recoveries;
        Ok(())
    }

    /// Finds or creates the team's DST placeholder player. The placeholder
    /// is keyed by the team code and named after the franchise when the
    /// city table knows it.
    fn get_or_create_dst(&mut self, team: &str) -> Result<String> {
        let code = season_registry::normalize_team_code(team);
        let name = self
            .cities
            .to_name(&code)
            .map(str::to_string)
            .unwrap_or_else(|| code.clone());
        self.season.get_or_create_team(&code);
        self.season.get_or_create_player_with(&code, |p| {
            p.name = name;
            p.position = Position::DST;
            p.team = Some(code.clone());
        });
        Ok(code)
    }

    /// Resolves the row's player, creating on first discovery. A changed
    /// display name for a known id is corrected in place with a warning,
    /// never an error.
    fn resolve_player(&mut self, row: &PlayerRow<'_>) -> String {
        let name = row.player_name.trim();
        let registered = self.season.get_or_create_player_with(row.player_id, |p| {
            p.name = name.to_string();
        });
        let player = registered.into_inner();
        if player.name != name {
            if !player.name.is_empty() {
                warn!(old = %player.name, new = %name, "correcting player name");
            }
            player.name = name.to_string();
        }
        player.id().to_string()
    }

    /// Assigns the row's team to the player. When a player has appeared
    /// for multiple teams, only the most recent one is kept.
    fn assign_team(&mut self, row: &PlayerRow<'_>) -> Result<String> {
        let raw = col(row.columns, COL_TEAM, "team")?;
        let code = self.season.get_or_create_team(raw).code().to_string();
        let player = self.season.get_or_create_player(row.player_id);
        if player.team.as_deref() != Some(&code) {
            player.team = Some(code.clone());
        }
        Ok(code)
    }
}

fn parse_pair_row(row: &[String], expected_header: &'static str, index: usize) -> Result<(i32, i32)> {
    let header = col(row, 0, "team-stats header")?;
    if header != expected_header {
        return Err(IngestError::UnexpectedHeader {
            found: header.to_string(),
            expected: expected_header,
        });
    }

    let mut values = [0i32; 2];
    for (slot, column) in values.iter_mut().zip(1..=2) {
        let raw = col(row, column, "team-stats value")?;
        let part = raw.split('-').nth(index).unwrap_or("");
        *slot = part.trim().parse().map_err(|_| IngestError::InvalidNumber {
            index: column,
            what: expected_header,
            value: raw.to_string(),
        })?;
    }
    Ok((values[0], values[1]))
}

/// Maps one injury-report row onto a player's status. Players the season
/// has never seen are skipped: the report covers the whole league, not
/// just players with stats.
pub fn record_injury_row(season: &mut Season, row: &PlayerRow<'_>) -> Result<()> {
    if season.player(row.player_id).is_none() {
        return Ok(());
    }

    let status = col(row.columns, COL_INJ_STATUS, "injury status")?;
    if status.trim().is_empty() {
        return Ok(());
    }
    let report = col(row.columns, COL_INJ_REPORT, "injury report")?;
    let practice = col(row.columns, COL_INJ_PRACTICE, "practice status")?;

    let category = season_registry::InjuryCategory::from_report(status.trim());
    let player = season.player_mut(row.player_id).unwrap();
    player.injury = Some(season_registry::InjuryStatus {
        category,
        reason: format!("{} - {}", report.trim(), practice.trim()),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use season_registry::Season;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn offense_cells(
        att: &str,
        cmp: &str,
        pass_yds: &str,
        car: &str,
        rush_yds: &str,
        tgt: &str,
    ) -> Vec<String> {
        let mut columns = vec![String::new(); 22];
        columns[COL_TEAM] = "BUF".to_string();
        columns[COL_PASS_CMP] = cmp.to_string();
        columns[COL_PASS_ATT] = att.to_string();
        columns[COL_PASS_YDS] = pass_yds.to_string();
        columns[COL_PASS_TD] = "0".to_string();
        columns[COL_PASS_INT] = "0".to_string();
        columns[COL_PASS_LONG] = "0".to_string();
        columns[COL_RUSH_CAR] = car.to_string();
        columns[COL_RUSH_YDS] = rush_yds.to_string();
        columns[COL_RUSH_TD] = "0".to_string();
        columns[COL_RUSH_LONG] = "0".to_string();
        columns[COL_REC_TGT] = tgt.to_string();
        columns[COL_REC_REC] = "0".to_string();
        columns[COL_REC_YDS] = "0".to_string();
        columns[COL_REC_TD] = "0".to_string();
        columns[COL_REC_LONG] = "0".to_string();
        columns[COL_FUM] = "0".to_string();
        columns[COL_FUM_LOST] = "0".to_string();
        columns
    }

    fn ingest<'a>(season: &'a mut Season, cities: &'a CityCodes, week: u8) -> BoxscoreIngest<'a> {
        let teams = GameTeams::new(season, "BUF", "NYG");
        BoxscoreIngest::new(season, week, teams, cities).unwrap()
    }

    #[test]
    fn offense_row_creates_only_active_categories() {
        let mut season = Season::new(2025);
        let cities = CityCodes::default();
        let columns = offense_cells("33", "24", "287", "5", "22", "0");
        let row = PlayerRow { player_id: "AlleJo00", player_name: "Josh Allen", columns: &columns };

        ingest(&mut season, &cities, 3).record_offense_row(&row).unwrap();

        let player = season.player("AlleJo00").unwrap();
        let game = player.game_for_week(3).unwrap();
        assert_eq!(game.opponent.as_deref(), Some("NYG"));
        assert_eq!(game.passing.as_ref().unwrap().yards, 287);
        assert_eq!(game.rushing.as_ref().unwrap().carries, 5);
        assert!(game.receiving.is_none());
        assert!(game.fumbles.is_some());
    }

    #[test]
    fn offense_row_bad_number_is_fatal_for_the_record() {
        let mut season = Season::new(2025);
        let cities = CityCodes::default();
        let columns = offense_cells("33", "24", "n/a", "0", "0", "0");
        let row = PlayerRow { player_id: "AlleJo00", player_name: "Josh Allen", columns: &columns };

        let err = ingest(&mut season, &cities, 3).record_offense_row(&row).unwrap_err();
        assert!(matches!(err, IngestError::InvalidNumber { .. }));
    }

    #[test]
    fn kicking_row_skips_punters() {
        let mut season = Season::new(2025);
        let cities = CityCodes::default();
        let mut columns = vec![String::new(); 10];
        columns[COL_TEAM] = "BUF".to_string();
        let row = PlayerRow { player_id: "PuntGu00", player_name: "Punter Guy", columns: &columns };

        ingest(&mut season, &cities, 3).record_kicking_row(&row).unwrap();
        assert!(season.player("PuntGu00").is_none());
    }

    #[test]
    fn kicking_row_preserves_narrative_distances() {
        let mut season = Season::new(2025);
        let cities = CityCodes::default();

        // narrative pass already appended a field goal distance
        season
            .get_or_create_player_with("TuckJu00", |p| p.name = "Justin Tucker".to_string())
            .into_inner()
            .game_for_week_mut(3)
            .kicking_mut()
            .fg_yds
            .push(52);

        let mut columns = vec![String::new(); 10];
        columns[COL_TEAM] = "BUF".to_string();
        columns[COL_KICK_XPM] = "2".to_string();
        columns[COL_KICK_XPA] = "2".to_string();
        columns[COL_KICK_FGM] = "1".to_string();
        columns[COL_KICK_FGA] = "2".to_string();
        let row = PlayerRow { player_id: "TuckJu00", player_name: "Justin Tucker", columns: &columns };

        ingest(&mut season, &cities, 3).record_kicking_row(&row).unwrap();

        let k = season
            .player("TuckJu00")
            .unwrap()
            .game_for_week(3)
            .unwrap()
            .kicking
            .clone()
            .unwrap();
        assert_eq!(k.xpm, 2);
        assert_eq!(k.fga, 2);
        assert_eq!(k.fg_yds, vec![52]);
    }

    #[test]
    fn interception_rows_aggregate_per_team() {
        let mut season = Season::new(2025);
        let cities = CityCodes::parse("Buffalo Bills<>BUF\n");
        let rows = vec![
            cells(&["T. Safety", "BUF", "1", "22", "0"]),
            cells(&["C. Corner", "BUF", "1", "40", "1"]),
        ];

        ingest(&mut season, &cities, 3).record_interception_rows(&rows).unwrap();

        let dst = season.player("BUF").unwrap();
        assert_eq!(dst.name, "Buffalo Bills");
        assert_eq!(dst.position, Position::DST);
        let d = dst.game_for_week(3).unwrap().defense.as_ref().unwrap();
        assert_eq!(d.interceptions, 2);
        assert_eq!(d.int_return_yards, 62);
        assert_eq!(d.int_return_tds, 1);
    }

    #[test]
    fn sacks_and_fumbles_are_credited_to_the_opposing_defense() {
        let mut season = Season::new(2025);
        let cities = CityCodes::default();
        let sacked = cells(&["Sacked-Yards", "3-21", "1-9"]);
        let fumbles = cells(&["Fumbles-Lost", "2-1", "1-0"]);

        ingest(&mut season, &cities, 3)
            .record_sacks_and_fumbles("BUF", "NYG", &sacked, &fumbles)
            .unwrap();

        // BUF's offense was sacked once and lost nothing -> NYG defense
        let nyg = season.player("NYG").unwrap().game_for_week(3).unwrap().defense.clone().unwrap();
        assert_eq!(nyg.sacks, 3);
        assert_eq!(nyg.fumble_recoveries, 1);

        let buf = season.player("BUF").unwrap().game_for_week(3).unwrap().defense.clone().unwrap();
        assert_eq!(buf.sacks, 1);
        assert_eq!(buf.fumble_recoveries, 0);
    }

    #[test]
    fn sacks_row_with_wrong_header_is_rejected() {
        let mut season = Season::new(2025);
        let cities = CityCodes::default();
        let sacked = cells(&["Rushing-Yards", "3-21", "1-9"]);
        let fumbles = cells(&["Fumbles-Lost", "2-1", "1-0"]);

        let err = ingest(&mut season, &cities, 3)
            .record_sacks_and_fumbles("BUF", "NYG", &sacked, &fumbles)
            .unwrap_err();
        assert!(matches!(err, IngestError::UnexpectedHeader { .. }));
    }

    #[test]
    fn injury_row_only_touches_known_players() {
        let mut season = Season::new(2025);
        season.get_or_create_player_with("AlleJo00", |p| p.name = "Josh Allen".to_string());

        let columns = cells(&["Josh Allen", "BUF", "", "Questionable", "Shoulder", "Limited"]);
        let row = PlayerRow { player_id: "AlleJo00", player_name: "Josh Allen", columns: &columns };
        record_injury_row(&mut season, &row).unwrap();

        let injury = season.player("AlleJo00").unwrap().injury.clone().unwrap();
        assert_eq!(injury.category, season_registry::InjuryCategory::Questionable);
        assert_eq!(injury.reason, "Shoulder - Limited");

        let unknown = PlayerRow { player_id: "NobodyXx00", player_name: "Nobody", columns: &columns };
        record_injury_row(&mut season, &unknown).unwrap();
        assert!(season.player("NobodyXx00").is_none());
    }

    #[test]
    fn invalid_week_is_rejected() {
        let mut season = Season::new(2025);
        let cities = CityCodes::default();
        let teams = GameTeams::new(&mut season, "BUF", "NYG");
        assert!(matches!(
            BoxscoreIngest::new(&mut season, 0, teams, &cities),
            Err(IngestError::InvalidWeek(0))
        ));
    }
}
