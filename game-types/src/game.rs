use crate::{GameId, Outcome, Selection, UserId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const NEW_GAME_MESSAGE: &str = "Rock! Paper! Scissors! Lizard! Spock!";
pub const MAKE_SELECTION_MESSAGE: &str = "Make your selection please.";
pub const ALREADY_OVER_MESSAGE: &str = "Game already over.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameStatus {
    Open, // Waiting for a decisive move
    Over, // A decisive move has been played
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameState {
    pub id: GameId,
    pub user_id: UserId,
    pub user_name: String,
    pub game_over: bool,
    pub record: Vec<String>,
    pub created_at: String, // ISO 8601 string
}

impl GameState {
    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::Over
        } else {
            GameStatus::Open
        }
    }

    /// Client-facing game key
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    /// Prompt shown alongside the game when it is fetched
    pub fn prompt(&self) -> &'static str {
        if self.game_over {
            ALREADY_OVER_MESSAGE
        } else if self.record.is_empty() {
            NEW_GAME_MESSAGE
        } else {
            MAKE_SELECTION_MESSAGE
        }
    }
}

/// A single resolved round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Round {
    pub user_selection: Selection,
    pub computer_selection: Selection,
    pub outcome: Outcome,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MoveResult {
    Played { state: GameState, round: Round },
    AlreadyOver { state: GameState },
}

impl MoveResult {
    pub fn state(&self) -> &GameState {
        match self {
            MoveResult::Played { state, .. } | MoveResult::AlreadyOver { state } => state,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            MoveResult::Played { round, .. } => &round.message,
            MoveResult::AlreadyOver { .. } => ALREADY_OVER_MESSAGE,
        }
    }
}
