use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Caller-visible failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    BadInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum GameError {
    #[error("A user with the name '{user_name}' does not exist!")]
    UserNotFound { user_name: String },
    #[error("Game '{game_key}' not found!")]
    GameNotFound { game_key: String },
    #[error("A user with the name '{user_name}' already exists!")]
    UserAlreadyExists { user_name: String },
    #[error("'{selection}' is not a valid selection. Please choose rock, paper, scissors, lizard, or spock!")]
    InvalidSelection { selection: String },
    #[error("'{game_key}' is not a valid game key")]
    InvalidGameKey { game_key: String },
    #[error("User name must not be empty")]
    InvalidUserName,
    #[error("Result limit must be at least 1, got {limit}")]
    InvalidLimit { limit: u64 },
    #[error("Game '{game_key}' is already over")]
    GameAlreadyOver { game_key: String },
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::UserNotFound { .. } | GameError::GameNotFound { .. } => ErrorKind::NotFound,
            GameError::UserAlreadyExists { .. } => ErrorKind::Conflict,
            GameError::InvalidSelection { .. }
            | GameError::InvalidGameKey { .. }
            | GameError::InvalidUserName
            | GameError::InvalidLimit { .. }
            | GameError::GameAlreadyOver { .. } => ErrorKind::BadInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let not_found = GameError::UserNotFound {
            user_name: "ghost".to_string(),
        };
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let conflict = GameError::UserAlreadyExists {
            user_name: "alice".to_string(),
        };
        assert_eq!(conflict.kind(), ErrorKind::Conflict);

        let bad_input = GameError::InvalidSelection {
            selection: "stone".to_string(),
        };
        assert_eq!(bad_input.kind(), ErrorKind::BadInput);
        assert_eq!(GameError::InvalidLimit { limit: 0 }.kind(), ErrorKind::BadInput);
    }

    #[test]
    fn test_error_messages_name_the_input() {
        let err = GameError::InvalidSelection {
            selection: "stone".to_string(),
        };
        assert!(err.to_string().contains("'stone'"));
    }
}
