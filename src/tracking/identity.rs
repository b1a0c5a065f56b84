use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_GAME_NAME_CHARS: usize = 16;
const MAX_TAG_LINE_CHARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("expected `name#tag`, got `{0}`")]
    MissingSeparator(String),
    #[error("the game name and tag of `{0}` must not be empty")]
    EmptyPart(String),
    #[error("`{0}` contains more than one `#`")]
    ExtraSeparator(String),
    #[error("the game name of `{0}` is longer than {MAX_GAME_NAME_CHARS} characters")]
    GameNameTooLong(String),
    #[error("the tag of `{0}` is longer than {MAX_TAG_LINE_CHARS} characters")]
    TagLineTooLong(String),
}

/// A Riot ID (`game_name#tag_line`) as typed by a user.
///
/// Casing is preserved for display; [`RiotId::key`] gives the normalized form
/// used to index tracked players and pending sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiotId {
    pub game_name: String,
    pub tag_line: String,
}

impl RiotId {
    pub fn new(game_name: impl Into<String>, tag_line: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            tag_line: tag_line.into(),
        }
    }

    pub fn key(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line).to_lowercase()
    }
}

impl FromStr for RiotId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (game_name, tag_line) = raw
            .split_once('#')
            .ok_or_else(|| IdentityError::MissingSeparator(raw.to_string()))?;

        let (game_name, tag_line) = (game_name.trim(), tag_line.trim());

        if game_name.is_empty() || tag_line.is_empty() {
            return Err(IdentityError::EmptyPart(raw.to_string()));
        }
        if tag_line.contains('#') {
            return Err(IdentityError::ExtraSeparator(raw.to_string()));
        }
        if game_name.chars().count() > MAX_GAME_NAME_CHARS {
            return Err(IdentityError::GameNameTooLong(raw.to_string()));
        }
        if tag_line.chars().count() > MAX_TAG_LINE_CHARS {
            return Err(IdentityError::TagLineTooLong(raw.to_string()));
        }

        Ok(Self::new(game_name, tag_line))
    }
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}
