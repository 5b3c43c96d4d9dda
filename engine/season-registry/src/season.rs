//! The season aggregate root: canonical player and team registries with
//! get-or-create semantics, plus the scoped name index used while parsing
//! narrative scoring plays.

use crate::error::{RegistryError, Result};
use crate::types::{Player, Position, PositionBaseline, Team, TeamDefense};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Outcome of a get-or-create lookup, so callers (and tests) can tell
/// "first discovery" apart from "subsequent reference".
#[derive(Debug)]
pub enum Registered<T> {
    Created(T),
    Existing(T),
}

impl<T> Registered<T> {
    pub fn was_created(&self) -> bool {
        matches!(self, Registered::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Registered::Created(v) | Registered::Existing(v) => v,
        }
    }
}

/// One season's worth of canonical entities. The season exclusively owns
/// its players and teams; records reference teams by code only.
#[derive(Debug, Serialize, Deserialize)]
pub struct Season {
    year: u16,
    last_updated: Option<DateTime<Utc>>,
    replacement_value: Option<PositionBaseline>,
    players: HashMap<String, Player>,
    teams: HashMap<String, Team>,
    #[serde(skip)]
    name_index: Option<HashMap<String, String>>,
}

impl Season {
    pub fn new(year: u16) -> Self {
        Season {
            year,
            last_updated: None,
            replacement_value: None,
            players: HashMap::new(),
            teams: HashMap::new(),
            name_index: None,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Stamps the season as updated now. Called at the end of an ingestion
    /// pass, whether or not it succeeded.
    pub fn touch(&mut self) {
        self.last_updated = Some(Utc::now());
    }

    /// Returns the player for `id`, constructing and registering an empty
    /// one on first reference. Deterministic: the same id always resolves
    /// to the same entry within a season.
    pub fn get_or_create_player(&mut self, id: &str) -> &mut Player {
        self.players.entry(id.to_string()).or_insert_with(|| Player::new(id))
    }

    /// As [`get_or_create_player`](Self::get_or_create_player), but runs
    /// `init` exactly once, only when the player is created. On a cache hit
    /// the initializer is discarded and already-set fields are untouched.
    pub fn get_or_create_player_with<F>(&mut self, id: &str, init: F) -> Registered<&mut Player>
    where
        F: FnOnce(&mut Player),
    {
        if self.players.contains_key(id) {
            Registered::Existing(self.players.get_mut(id).unwrap())
        } else {
            let mut player = Player::new(id);
            init(&mut player);
            self.players.insert(id.to_string(), player);
            Registered::Created(self.players.get_mut(id).unwrap())
        }
    }

    /// Strict first-discovery registration. Unlike the lenient
    /// get-or-create path (which corrects names in place with a warning),
    /// re-registering an id under a different name here is an integrity
    /// conflict and is surfaced, not swallowed.
    pub fn register_player(&mut self, id: &str, name: &str) -> Result<Registered<&mut Player>> {
        if let Some(existing) = self.players.get(id) {
            if !existing.name.is_empty() && existing.name != name {
                return Err(RegistryError::IdentityConflict {
                    id: id.to_string(),
                    existing: existing.name.clone(),
                    incoming: name.to_string(),
                });
            }
            return Ok(Registered::Existing(self.players.get_mut(id).unwrap()));
        }

        let mut player = Player::new(id);
        player.name = name.to_string();
        self.players.insert(id.to_string(), player);
        Ok(Registered::Created(self.players.get_mut(id).unwrap()))
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    /// All players currently recorded at `position`. DST placeholders are
    /// ordinary registry entries and are returned like anyone else.
    pub fn players_at(&self, position: Position) -> impl Iterator<Item = &Player> {
        self.players.values().filter(move |p| p.position == position)
    }

    /// Returns the team for `code`, normalizing first so that repeated
    /// references through different phrasings resolve to one entry.
    pub fn get_or_create_team(&mut self, code: &str) -> &mut Team {
        let code = normalize_team_code(code);
        self.teams.entry(code.clone()).or_insert_with(|| Team::new(&code))
    }

    pub fn team(&self, code: &str) -> Option<&Team> {
        self.teams.get(&normalize_team_code(code))
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    /// Attaches the season-long defensive aggregate to a team. Supplying it
    /// twice in one pass indicates a duplicated feed and is rejected.
    pub fn set_team_defense(&mut self, code: &str, defense: TeamDefense) -> Result<()> {
        let team = self.get_or_create_team(code);
        if team.defense.is_some() {
            return Err(RegistryError::DefenseAlreadyRecorded { team: team.code().to_string() });
        }
        team.defense = Some(defense);
        Ok(())
    }

    pub fn clear_team_defenses(&mut self) {
        for team in self.teams.values_mut() {
            team.defense = None;
        }
    }

    /// Builds the display-name → player index used during a scoring-play
    /// parsing pass. Building twice without a drop is a sequencing error.
    /// Name collisions are not resolved: a later identical name silently
    /// replaces the earlier entry (known limitation).
    pub fn build_name_index(&mut self) -> Result<()> {
        if self.name_index.is_some() {
            return Err(RegistryError::IndexAlreadyBuilt);
        }

        let mut index = HashMap::new();
        for player in self.players.values() {
            if !player.name.is_empty() {
                index.insert(player.name.clone(), player.id().to_string());
            }
        }
        debug!(entries = index.len(), "built player name index");
        self.name_index = Some(index);
        Ok(())
    }

    /// Tears down the name index after a parsing pass.
    pub fn drop_name_index(&mut self) -> Result<()> {
        if self.name_index.take().is_none() {
            return Err(RegistryError::IndexNotBuilt);
        }
        Ok(())
    }

    /// Looks a player up by exact display name. `Ok(None)` means the name
    /// has no entry in the box score; calling without an index built is a
    /// sequencing error.
    pub fn player_id_by_name(&self, name: &str) -> Result<Option<String>> {
        let index = self.name_index.as_ref().ok_or(RegistryError::IndexNotBuilt)?;
        Ok(index.get(name).cloned())
    }

    /// Runs `f` with the name index built, guaranteeing teardown afterward
    /// even when `f` bails out early with an error.
    pub fn with_name_index<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Season) -> T,
    {
        self.build_name_index()?;
        let result = f(self);
        self.drop_name_index()?;
        Ok(result)
    }

    /// Removes every per-player game record, enabling a full re-ingestion.
    pub fn clear_game_logs(&mut self) {
        for player in self.players.values_mut() {
            player.game_log.clear();
        }
    }

    /// Removes only the records for `week`, so a corrected week can be
    /// re-ingested without accumulating duplicates.
    pub fn clear_game_logs_for_week(&mut self, week: u8) {
        for player in self.players.values_mut() {
            player.game_log.retain(|g| g.week != week);
        }
    }

    /// Drops all injury statuses ahead of re-ingesting a report.
    pub fn clear_injuries(&mut self) {
        for player in self.players.values_mut() {
            player.injury = None;
        }
    }

    pub fn replacement_value(&self) -> Option<&PositionBaseline> {
        self.replacement_value.as_ref()
    }

    /// Installs a freshly computed baseline. The baseline is overwritten as
    /// a whole; finalizing while one is present requires an explicit
    /// [`clear_baseline`](Self::clear_baseline) first.
    pub fn set_baseline(&mut self, baseline: PositionBaseline) -> Result<()> {
        if self.replacement_value.is_some() {
            return Err(RegistryError::BaselineAlreadySet);
        }
        self.replacement_value = Some(baseline);
        Ok(())
    }

    pub fn clear_baseline(&mut self) {
        self.replacement_value = None;
    }
}

/// Normalizes a team code: surrounding whitespace and a leading home/away
/// marker ("vs", "@") are stripped. Applying it twice yields the same code.
pub fn normalize_team_code(raw: &str) -> String {
    let code = raw.trim();
    let code = code.strip_prefix("vs").unwrap_or(code);
    let code = code.strip_prefix('@').unwrap_or(code);
    let normalized = code.trim();
    if normalized.is_empty() && !raw.trim().is_empty() {
        warn!(raw, "team code normalized to empty string");
    }
    normalized.to_string()
}
