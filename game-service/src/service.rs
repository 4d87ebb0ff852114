use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ServiceResult;
use game_core::{Game, MoveOutcome, Opponent, RandomOpponent};
use game_persistence::connection::connect_and_migrate;
use game_persistence::repositories::{
    GameRepository, RecordedRound, ScoreRepository, UserRepository,
};
use game_types::{
    GameError, GameId, GameState, LeaderboardEntry, MoveResult, Score, User, UserStats,
};

/// Rounds replayed when another move on the same game lands first
const MAX_MOVE_ATTEMPTS: usize = 5;

/// Entry point for every game operation.
///
/// Each call is independent: it loads what it needs from the store,
/// applies the rules and writes the result back before returning.
pub struct GameService {
    users: UserRepository,
    games: GameRepository,
    scores: ScoreRepository,
    opponent: Arc<dyn Opponent>,
    config: Config,
}

impl GameService {
    /// Service playing against a uniformly random computer
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self::with_opponent(db, config, Arc::new(RandomOpponent))
    }

    pub fn with_opponent(
        db: DatabaseConnection,
        config: Config,
        opponent: Arc<dyn Opponent>,
    ) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            games: GameRepository::new(db.clone()),
            scores: ScoreRepository::new(db),
            opponent,
            config,
        }
    }

    /// Connect to `config.database_url`, migrate, and build the service
    pub async fn connect(config: Config) -> ServiceResult<Self> {
        let db = connect_and_migrate(&config.database_url).await?;
        Ok(Self::new(db, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn parse_game_key(game_key: &str) -> Result<GameId, GameError> {
        Uuid::parse_str(game_key.trim()).map_err(|_| GameError::InvalidGameKey {
            game_key: game_key.to_string(),
        })
    }

    fn resolve_limit(&self, limit: Option<u64>) -> Result<u64, GameError> {
        match limit {
            None => Ok(self.config.default_result_limit.min(self.config.max_result_limit)),
            Some(0) => Err(GameError::InvalidLimit { limit: 0 }),
            Some(limit) => Ok(limit.min(self.config.max_result_limit)),
        }
    }

    async fn require_user(&self, user_name: &str) -> ServiceResult<User> {
        self.users
            .find_by_name(user_name)
            .await?
            .ok_or_else(|| {
                GameError::UserNotFound {
                    user_name: user_name.to_string(),
                }
                .into()
            })
    }

    async fn require_game(&self, game_key: &str) -> ServiceResult<GameState> {
        let game_id = Self::parse_game_key(game_key)?;
        self.games.find_by_id(game_id).await?.ok_or_else(|| {
            GameError::GameNotFound {
                game_key: game_key.to_string(),
            }
            .into()
        })
    }

    /// Register a new user. Names are unique and compared after trimming.
    pub async fn create_user(&self, user_name: &str, email: Option<&str>) -> ServiceResult<User> {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Err(GameError::InvalidUserName.into());
        }

        if self.users.find_by_name(user_name).await?.is_some() {
            return Err(GameError::UserAlreadyExists {
                user_name: user_name.to_string(),
            }
            .into());
        }

        let email = email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string);

        let user = self.users.create_user(user_name, email).await?;
        info!(user_id = %user.id, user_name = %user.name, "User created");
        Ok(user)
    }

    /// Profile plus position on the wins leaderboard
    pub async fn get_user(&self, user_name: &str) -> ServiceResult<UserStats> {
        let user = self.require_user(user_name).await?;
        let rank = self.users.get_user_rank(user.id).await?.ok_or_else(|| {
            GameError::UserNotFound {
                user_name: user_name.to_string(),
            }
        })?;

        Ok(UserStats { user, rank })
    }

    pub async fn new_game(&self, user_name: &str) -> ServiceResult<GameState> {
        let user = self.require_user(user_name).await?;
        let game = Game::new(Uuid::new_v4(), user.id, user.name.clone());

        let state = self.games.create_game(&game.state).await?;
        info!(game_id = %state.id, user_name = %user.name, "Game created");
        Ok(state)
    }

    pub async fn get_game(&self, game_key: &str) -> ServiceResult<GameState> {
        self.require_game(game_key).await
    }

    /// Play one round of `selection` against the computer.
    ///
    /// If another move on the same game is stored between reading the game
    /// and writing this round, the round is replayed on the fresh state. A
    /// game finished by that other move answers `AlreadyOver`.
    pub async fn make_move(&self, game_key: &str, selection: &str) -> ServiceResult<MoveResult> {
        for attempt in 1..=MAX_MOVE_ATTEMPTS {
            let mut game = Game::from_state(self.require_game(game_key).await?);

            let round = match game.make_move(selection, self.opponent.as_ref())? {
                MoveOutcome::AlreadyOver => {
                    info!(game_id = %game.state.id, "Move rejected, game already over");
                    return Ok(MoveResult::AlreadyOver {
                        state: game.into_state(),
                    });
                }
                MoveOutcome::Played(round) => round,
            };

            let score = match self.games.record_round(&game.state, &round).await? {
                RecordedRound::Saved(score) => score,
                RecordedRound::Stale => {
                    warn!(
                        game_id = %game.state.id,
                        attempt,
                        "Concurrent move detected, replaying round"
                    );
                    continue;
                }
            };

            info!(
                game_id = %game.state.id,
                user_selection = %round.user_selection,
                computer_selection = %round.computer_selection,
                outcome = ?round.outcome,
                "Round played"
            );
            if let Some(score) = score {
                info!(game_id = %game.state.id, won = score.won, "Game over");
            }

            return Ok(MoveResult::Played {
                state: game.into_state(),
                round,
            });
        }

        Err(anyhow::anyhow!(
            "Gave up on game {} after {} conflicting moves",
            game_key,
            MAX_MOVE_ATTEMPTS
        )
        .into())
    }

    /// Delete an open game. It is not counted as a loss.
    pub async fn cancel_game(&self, game_key: &str) -> ServiceResult<()> {
        let game = self.require_game(game_key).await?;
        if game.game_over {
            return Err(GameError::GameAlreadyOver {
                game_key: game_key.to_string(),
            }
            .into());
        }

        if !self.games.delete_open_game(game.id).await? {
            warn!(game_id = %game.id, "Game vanished before it could be cancelled");
            return Err(GameError::GameNotFound {
                game_key: game_key.to_string(),
            }
            .into());
        }

        info!(game_id = %game.id, user_name = %game.user_name, "Game cancelled");
        Ok(())
    }

    pub async fn get_game_history(&self, game_key: &str) -> ServiceResult<Vec<String>> {
        Ok(self.require_game(game_key).await?.record)
    }

    /// The user's open games
    pub async fn get_user_games(&self, user_name: &str) -> ServiceResult<Vec<GameState>> {
        let user = self.require_user(user_name).await?;
        Ok(self.games.find_active_by_user(&user).await?)
    }

    pub async fn get_scores(&self) -> ServiceResult<Vec<Score>> {
        Ok(self.scores.find_all().await?)
    }

    pub async fn get_user_scores(&self, user_name: &str) -> ServiceResult<Vec<Score>> {
        let user = self.require_user(user_name).await?;
        Ok(self.scores.find_by_user(&user).await?)
    }

    /// Users by wins; `None` uses the configured default size
    pub async fn get_leaderboard(&self, limit: Option<u64>) -> ServiceResult<Vec<LeaderboardEntry>> {
        let limit = self.resolve_limit(limit)?;
        Ok(self.users.get_leaderboard(limit).await?)
    }

    /// Users by win percentage
    pub async fn get_user_rankings(
        &self,
        limit: Option<u64>,
    ) -> ServiceResult<Vec<LeaderboardEntry>> {
        let limit = self.resolve_limit(limit)?;
        Ok(self.users.get_user_rankings(limit).await?)
    }

    /// Users with an email address and at least one open game
    pub async fn get_reminder_candidates(&self) -> ServiceResult<Vec<User>> {
        let active: HashSet<Uuid> = self
            .games
            .find_users_with_active_games()
            .await?
            .into_iter()
            .collect();

        let candidates = self
            .users
            .find_with_email()
            .await?
            .into_iter()
            .filter(|user| active.contains(&user.id))
            .collect();

        Ok(candidates)
    }
}
