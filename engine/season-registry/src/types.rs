//! Entity types for one fantasy season: players, teams, and the per-week
//! game stat records that ingestion fills in and the scoring engine reads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fantasy positions. DST is scored at the team level and is represented in
/// the registry by a per-team placeholder player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Position {
    QB,
    RB,
    WR,
    K,
    DST,
    #[default]
    Unknown,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::K => "K",
            Position::DST => "DST",
            Position::Unknown => "n/a",
        };
        write!(f, "{s}")
    }
}

/// Injury report category for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjuryCategory {
    Out,
    Doubtful,
    Questionable,
    Probable,
}

impl InjuryCategory {
    /// Maps the report's status text. Unrecognized statuses (the source uses
    /// "Unknown" for players practicing in full) fall back to Probable.
    pub fn from_report(status: &str) -> Self {
        match status {
            "Out" => InjuryCategory::Out,
            "Doubtful" => InjuryCategory::Doubtful,
            "Questionable" => InjuryCategory::Questionable,
            _ => InjuryCategory::Probable,
        }
    }
}

/// Injury status attached to a player: the category plus the free-text
/// reason from the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryStatus {
    pub category: InjuryCategory,
    pub reason: String,
}

/// One NFL player (or a team's DST placeholder) within a single season.
///
/// The identifier is immutable after creation. The game log is kept in
/// discovery order, which is not necessarily week order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: String,
    pub name: String,
    pub position: Position,
    /// Weak reference into the season's team registry, by code. Only the
    /// most recent team a player suited up for is kept.
    pub team: Option<String>,
    pub injury: Option<InjuryStatus>,
    pub game_log: Vec<GameLog>,
}

impl Player {
    pub(crate) fn new(id: &str) -> Self {
        Player {
            id: id.to_string(),
            name: String::new(),
            position: Position::Unknown,
            team: None,
            injury: None,
            game_log: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the record for `week`, creating an empty one if the player
    /// has none yet. There is at most one record per (player, week).
    pub fn game_for_week_mut(&mut self, week: u8) -> &mut GameLog {
        let pos = self.game_log.iter().position(|g| g.week == week);
        match pos {
            Some(i) => &mut self.game_log[i],
            None => {
                self.game_log.push(GameLog::new(week));
                self.game_log.last_mut().unwrap()
            }
        }
    }

    pub fn game_for_week(&self, week: u8) -> Option<&GameLog> {
        self.game_log.iter().find(|g| g.week == week)
    }
}

/// One NFL team. The code is the canonical short form ("NYG", "BUF").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    code: String,
    /// Season-long defensive aggregate, supplied by an external leaders
    /// feed. Used only for the DST replacement baseline.
    pub defense: Option<TeamDefense>,
}

impl Team {
    pub(crate) fn new(code: &str) -> Self {
        Team { code: code.to_string(), defense: None }
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Season-long team defense aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDefense {
    pub sacks: i32,
    pub interceptions: i32,
    pub int_return_yards: i32,
    pub int_return_tds: i32,
    pub fumble_recoveries: i32,
    pub fumble_return_tds: i32,
}

/// One player's statistical line for one week. A record with no category
/// blocks populated represents "did not play".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    /// 1..=18; 0 means the week could not be resolved.
    pub week: u8,
    /// Opponent team code, when known.
    pub opponent: Option<String>,
    pub passing: Option<Passing>,
    pub rushing: Option<Rushing>,
    pub receiving: Option<Receiving>,
    pub fumbles: Option<Fumbles>,
    pub kicking: Option<Kicking>,
    pub defense: Option<Defense>,
}

impl GameLog {
    pub fn new(week: u8) -> Self {
        GameLog { week, ..Default::default() }
    }

    /// True when no category block is populated (DNP).
    pub fn is_dnp(&self) -> bool {
        self.passing.is_none()
            && self.rushing.is_none()
            && self.receiving.is_none()
            && self.fumbles.is_none()
            && self.kicking.is_none()
            && self.defense.is_none()
    }

    pub fn passing_mut(&mut self) -> &mut Passing {
        self.passing.get_or_insert_with(Passing::default)
    }

    pub fn rushing_mut(&mut self) -> &mut Rushing {
        self.rushing.get_or_insert_with(Rushing::default)
    }

    pub fn receiving_mut(&mut self) -> &mut Receiving {
        self.receiving.get_or_insert_with(Receiving::default)
    }

    pub fn fumbles_mut(&mut self) -> &mut Fumbles {
        self.fumbles.get_or_insert_with(Fumbles::default)
    }

    pub fn kicking_mut(&mut self) -> &mut Kicking {
        self.kicking.get_or_insert_with(Kicking::default)
    }

    pub fn defense_mut(&mut self) -> &mut Defense {
        self.defense.get_or_insert_with(Defense::default)
    }
}

/// Passing stat block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passing {
    pub completions: i32,
    pub attempts: i32,
    pub yards: i32,
    pub touchdowns: i32,
    pub interceptions: i32,
    pub longest: i32,
    /// Distance of each individual touchdown pass, appended from narrative
    /// scoring plays.
    pub td_yds: Vec<i32>,
    pub two_pt_conv: i32,
}

/// Rushing stat block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rushing {
    pub carries: i32,
    pub yards: i32,
    pub touchdowns: i32,
    pub longest: i32,
    pub td_yds: Vec<i32>,
    pub two_pt_conv: i32,
}

/// Receiving stat block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiving {
    pub receptions: i32,
    pub yards: i32,
    pub touchdowns: i32,
    pub longest: i32,
    pub td_yds: Vec<i32>,
    pub two_pt_conv: i32,
}

/// Fumble stat block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fumbles {
    pub fumbles: i32,
    pub lost: i32,
}

/// Kicking stat block. Counters come from the box-score table; `fg_yds`
/// holds individual made-field-goal distances appended from narrative
/// scoring plays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kicking {
    pub fgm: i32,
    pub fga: i32,
    pub xpm: i32,
    pub xpa: i32,
    pub fg_yds: Vec<i32>,
}

/// Defense / special teams stat block, recorded against a team's DST
/// placeholder player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defense {
    pub sacks: i32,
    pub interceptions: i32,
    pub int_return_yards: i32,
    pub int_return_tds: i32,
    pub fumble_recoveries: i32,
    /// Distance of each defensive touchdown (fumble and interception
    /// returns).
    pub td_yds: Vec<i32>,
    /// Distance of each special-teams touchdown (kickoff, punt and blocked
    /// kick returns; end-zone recoveries carry an implicit 1).
    pub td_st_yds: Vec<i32>,
    /// Conversion points scored by the defense. Tracked, never scored.
    pub xp: i32,
    pub safeties: i32,
}

/// Replacement-level points-per-game baseline, one value per position.
/// Always written in full; a partially updated baseline is not a valid
/// state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionBaseline {
    pub qb: i32,
    pub rb: i32,
    pub wr: i32,
    pub k: i32,
    pub dst: i32,
}

impl PositionBaseline {
    pub fn for_position(&self, position: Position) -> i32 {
        match position {
            Position::QB => self.qb,
            Position::RB => self.rb,
            Position::WR => self.wr,
            Position::K => self.k,
            Position::DST => self.dst,
            Position::Unknown => 0,
        }
    }
}
