use std::fmt;

use crate::error::ClientError;

pub const MAX_NAME_CHARS: usize = 20;

/// A validated local display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    /// Trim, then require 1 to 20 characters.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ClientError::InvalidName {
                detail: "name must not be empty".to_string(),
            });
        }
        let chars = name.chars().count();
        if chars > MAX_NAME_CHARS {
            return Err(ClientError::InvalidName {
                detail: format!("name is {chars} characters, max is {MAX_NAME_CHARS}"),
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
