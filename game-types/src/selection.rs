use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Selection {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

impl Selection {
    pub const ALL: [Selection; 5] = [
        Selection::Rock,
        Selection::Paper,
        Selection::Scissors,
        Selection::Lizard,
        Selection::Spock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::Rock => "rock",
            Selection::Paper => "paper",
            Selection::Scissors => "scissors",
            Selection::Lizard => "lizard",
            Selection::Spock => "spock",
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Selection {
    type Err = GameError;

    /// Case-insensitive; surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Selection::ALL
            .into_iter()
            .find(|selection| selection.as_str() == normalized)
            .ok_or_else(|| GameError::InvalidSelection {
                selection: s.to_string(),
            })
    }
}

/// Who took a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Outcome {
    User,
    Computer,
    Tie,
}

impl Outcome {
    pub fn is_decisive(&self) -> bool {
        !matches!(self, Outcome::Tie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("rock".parse::<Selection>().unwrap(), Selection::Rock);
        assert_eq!("Lizard".parse::<Selection>().unwrap(), Selection::Lizard);
        assert_eq!("SPOCK".parse::<Selection>().unwrap(), Selection::Spock);
        assert_eq!("  paper ".parse::<Selection>().unwrap(), Selection::Paper);
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        for token in ["", "stone", "rocks", "spock!", "r"] {
            match token.parse::<Selection>() {
                Err(GameError::InvalidSelection { selection }) => assert_eq!(selection, token),
                other => panic!("Expected InvalidSelection for {:?}, got {:?}", token, other),
            }
        }
    }

    #[test]
    fn test_display_matches_wire_name() {
        for selection in Selection::ALL {
            let json = serde_json::to_string(&selection).unwrap();
            assert_eq!(json, format!("\"{}\"", selection));
        }
    }

    #[test]
    fn test_only_tie_is_not_decisive() {
        assert!(Outcome::User.is_decisive());
        assert!(Outcome::Computer.is_decisive());
        assert!(!Outcome::Tie.is_decisive());
    }
}
