use crate::{Opponent, RulesEngine};
use game_types::{GameError, GameId, GameState, GameStatus, Outcome, Round, Selection, UserId};

#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Played(Round),
    AlreadyOver,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
}

impl Game {
    pub fn new(id: GameId, user_id: UserId, user_name: String) -> Self {
        let state = GameState {
            id,
            user_id,
            user_name,
            game_over: false,
            record: Vec::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        Self { state }
    }

    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Validate the raw selection and play it against `opponent`.
    ///
    /// A finished game short-circuits before validation so a late move
    /// never changes anything, even if its token is garbage.
    pub fn make_move(
        &mut self,
        selection: &str,
        opponent: &dyn Opponent,
    ) -> Result<MoveOutcome, GameError> {
        if self.state.game_over {
            return Ok(MoveOutcome::AlreadyOver);
        }

        let user_selection: Selection = selection.parse()?;
        Ok(self.play_round(user_selection, opponent.choose()))
    }

    /// Resolve one round with a known computer selection
    pub fn play_round(&mut self, user: Selection, computer: Selection) -> MoveOutcome {
        if self.state.game_over {
            return MoveOutcome::AlreadyOver;
        }

        let outcome = RulesEngine::resolve(user, computer);
        let message = RulesEngine::describe(user, computer, outcome);

        self.state.record.push(message.clone());
        if outcome != Outcome::Tie {
            self.state.game_over = true;
        }

        tracing::debug!(
            game_id = %self.state.id,
            user = %user,
            computer = %computer,
            ?outcome,
            "Round resolved"
        );

        MoveOutcome::Played(Round {
            user_selection: user,
            computer_selection: computer,
            outcome,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedOpponent;
    use uuid::Uuid;

    fn create_test_game() -> Game {
        Game::new(Uuid::new_v4(), Uuid::new_v4(), "Alice".to_string())
    }

    #[test]
    fn test_game_creation() {
        let game = create_test_game();
        assert_eq!(game.status(), GameStatus::Open);
        assert!(!game.state.game_over);
        assert!(game.state.record.is_empty());
        assert_eq!(game.state.user_name, "Alice");
    }

    #[test]
    fn test_decisive_move_ends_game() {
        let mut game = create_test_game();
        let opponent = FixedOpponent(Selection::Scissors);

        let outcome = game.make_move("rock", &opponent).unwrap();
        match outcome {
            MoveOutcome::Played(round) => {
                assert_eq!(round.outcome, Outcome::User);
                assert_eq!(round.user_selection, Selection::Rock);
                assert_eq!(round.computer_selection, Selection::Scissors);
                assert_eq!(
                    round.message,
                    "User plays rock. Computer plays scissors. You win!"
                );
            }
            MoveOutcome::AlreadyOver => panic!("Expected a played round"),
        }

        assert_eq!(game.status(), GameStatus::Over);
        assert_eq!(game.state.record.len(), 1);
    }

    #[test]
    fn test_loss_ends_game() {
        let mut game = create_test_game();
        let outcome = game.make_move("paper", &FixedOpponent(Selection::Lizard)).unwrap();

        assert!(matches!(
            outcome,
            MoveOutcome::Played(Round {
                outcome: Outcome::Computer,
                ..
            })
        ));
        assert_eq!(game.status(), GameStatus::Over);
    }

    #[test]
    fn test_tie_keeps_game_open() {
        let mut game = create_test_game();
        let opponent = FixedOpponent(Selection::Paper);

        let outcome = game.make_move("Paper", &opponent).unwrap();
        assert!(matches!(
            outcome,
            MoveOutcome::Played(Round {
                outcome: Outcome::Tie,
                ..
            })
        ));
        assert_eq!(game.status(), GameStatus::Open);
        assert_eq!(game.state.record.len(), 1);

        // Ties can repeat until someone wins
        game.make_move("paper", &opponent).unwrap();
        assert_eq!(game.status(), GameStatus::Open);
        assert_eq!(game.state.record.len(), 2);

        game.make_move("scissors", &opponent).unwrap();
        assert_eq!(game.status(), GameStatus::Over);
        assert_eq!(game.state.record.len(), 3);
    }

    #[test]
    fn test_over_game_rejects_moves_without_mutation() {
        let mut game = create_test_game();
        game.make_move("lizard", &FixedOpponent(Selection::Spock))
            .unwrap();
        let before = game.state.clone();

        let outcome = game
            .make_move("rock", &FixedOpponent(Selection::Scissors))
            .unwrap();
        assert_eq!(outcome, MoveOutcome::AlreadyOver);
        assert_eq!(game.state, before);

        // Even an invalid token is not validated once the game is over
        let outcome = game
            .make_move("banana", &FixedOpponent(Selection::Rock))
            .unwrap();
        assert_eq!(outcome, MoveOutcome::AlreadyOver);
        assert_eq!(game.state, before);

        assert_eq!(
            game.play_round(Selection::Rock, Selection::Rock),
            MoveOutcome::AlreadyOver
        );
        assert_eq!(game.state, before);
    }

    #[test]
    fn test_invalid_selection_is_rejected() {
        let mut game = create_test_game();

        let err = game
            .make_move("stone", &FixedOpponent(Selection::Rock))
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidSelection {
                selection: "stone".to_string()
            }
        );
        assert!(game.state.record.is_empty());
        assert_eq!(game.status(), GameStatus::Open);
    }

    #[test]
    fn test_state_round_trip() {
        let mut game = create_test_game();
        game.play_round(Selection::Spock, Selection::Spock);

        let state = game.clone().into_state();
        let restored = Game::from_state(state);
        assert_eq!(restored.state, game.state);
        assert_eq!(restored.status(), GameStatus::Open);
    }
}
