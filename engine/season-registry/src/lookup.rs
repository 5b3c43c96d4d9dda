//! Flat key/value lookup tables consumed read-only by the core: bye weeks
//! per team and city-name <-> team-code conversion.
//!
//! Files hold one `KEY=VALUE` or `KEY<>VALUE` pair per line; malformed
//! lines are skipped. Tables are parsed once at startup and handed to the
//! components that need them, rather than living in ambient static state.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = if let Some((k, v)) = line.split_once("<>") {
        (k, v)
    } else {
        line.split_once('=')?
    };
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Bye week per team code.
#[derive(Debug, Clone, Default)]
pub struct ByeWeeks {
    by_team: HashMap<String, u8>,
}

impl ByeWeeks {
    pub fn parse(text: &str) -> Self {
        let mut by_team = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match split_pair(line) {
                Some((team, week)) => match week.parse::<u8>() {
                    Ok(week) => {
                        by_team.insert(team.to_string(), week);
                    }
                    Err(_) => warn!(line, "skipping bye-week line with non-numeric week"),
                },
                None => warn!(line, "skipping malformed bye-week line"),
            }
        }
        ByeWeeks { by_team }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading bye weeks from {}", path.as_ref().display()))?;
        Ok(Self::parse(&text))
    }

    /// The team's bye week, or `None` when the team is not listed.
    pub fn bye_week(&self, team: &str) -> Option<u8> {
        self.by_team.get(team).copied()
    }

    pub fn is_bye_week(&self, team: &str, week: u8) -> bool {
        self.bye_week(team) == Some(week)
    }
}

/// Bidirectional city-name <-> team-code table.
#[derive(Debug, Clone, Default)]
pub struct CityCodes {
    by_city: HashMap<String, String>,
    by_code: HashMap<String, String>,
}

impl CityCodes {
    pub fn parse(text: &str) -> Self {
        let mut by_city = HashMap::new();
        let mut by_code = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match split_pair(line) {
                Some((city, code)) => {
                    by_city.insert(city.to_string(), code.to_string());
                    by_code.insert(code.to_string(), city.to_string());
                }
                None => warn!(line, "skipping malformed city-code line"),
            }
        }
        CityCodes { by_city, by_code }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading city codes from {}", path.as_ref().display()))?;
        Ok(Self::parse(&text))
    }

    pub fn to_code(&self, city: &str) -> Option<&str> {
        self.by_city.get(city).map(String::as_str)
    }

    pub fn to_name(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(String::as_str)
    }
}
