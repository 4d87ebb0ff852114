#![allow(dead_code)]

use game_core::{FixedOpponent, Game, MoveOutcome, Opponent};
use game_types::{Round, Selection};
use std::sync::Mutex;
use uuid::Uuid;

/// Creates an open game owned by a fresh user id
pub fn create_test_game(user_name: &str) -> Game {
    Game::new(Uuid::new_v4(), Uuid::new_v4(), user_name.to_string())
}

/// Creates a standard test game for "Alice"
pub fn create_standard_game() -> Game {
    create_test_game("Alice")
}

/// Opponent that replays a fixed script, then repeats the last selection
pub struct ScriptedOpponent {
    script: Mutex<Vec<Selection>>,
    last: Mutex<Selection>,
}

impl ScriptedOpponent {
    pub fn new(script: &[Selection]) -> Self {
        let mut reversed = script.to_vec();
        reversed.reverse();
        Self {
            script: Mutex::new(reversed),
            last: Mutex::new(Selection::Rock),
        }
    }
}

impl Opponent for ScriptedOpponent {
    fn choose(&self) -> Selection {
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop() {
            *last = next;
        }
        *last
    }
}

/// Plays `selection` against a fixed computer choice and returns the round
pub fn play(game: &mut Game, selection: &str, computer: Selection) -> Round {
    match game.make_move(selection, &FixedOpponent(computer)).unwrap() {
        MoveOutcome::Played(round) => round,
        MoveOutcome::AlreadyOver => panic!("Expected the round to be played"),
    }
}
