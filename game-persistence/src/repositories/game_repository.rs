use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{games, prelude::*, scores};
use crate::repositories::score_repository::ScoreRepository;
use crate::repositories::user_repository::increment_user_stats;
use game_types::{GameId, GameState, Outcome, Round, Score, User};

/// What happened to a round handed to `GameRepository::record_round`
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRound {
    /// Stored; decisive rounds carry their score
    Saved(Option<Score>),
    /// The stored game moved on since it was read, nothing was written
    Stale,
}

pub struct GameRepository {
    db: DatabaseConnection,
}

impl GameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_state(model: games::Model, user_name: String) -> Result<GameState> {
        let record: Vec<String> = serde_json::from_str(&model.record)
            .with_context(|| format!("Corrupt move record for game {}", model.id))?;

        Ok(GameState {
            id: model.id,
            user_id: model.user_id,
            user_name,
            game_over: model.game_over,
            record,
            created_at: model.created_at.to_rfc3339(),
        })
    }

    fn encode_record(record: &[String]) -> Result<String> {
        Ok(serde_json::to_string(record)?)
    }

    pub async fn create_game(&self, game: &GameState) -> Result<GameState> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let created_at = chrono::DateTime::parse_from_rfc3339(&game.created_at).unwrap_or(now);

        let game_model = games::ActiveModel {
            id: ActiveValue::Set(game.id),
            user_id: ActiveValue::Set(game.user_id),
            game_over: ActiveValue::Set(game.game_over),
            record: ActiveValue::Set(Self::encode_record(&game.record)?),
            created_at: ActiveValue::Set(created_at),
            updated_at: ActiveValue::Set(now),
        };

        let saved_model = Games::insert(game_model).exec(&self.db).await?;

        self.find_by_id(saved_model.last_insert_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created game"))
    }

    pub async fn find_by_id(&self, id: GameId) -> Result<Option<GameState>> {
        let found = Games::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await?;

        match found {
            Some((game, Some(user))) => Ok(Some(Self::model_to_state(game, user.name)?)),
            Some((game, None)) => Err(anyhow::anyhow!("Game {} has no owner", game.id)),
            None => Ok(None),
        }
    }

    /// Open games owned by `user`, oldest first
    pub async fn find_active_by_user(&self, user: &User) -> Result<Vec<GameState>> {
        let models = Games::find()
            .filter(games::Column::UserId.eq(user.id))
            .filter(games::Column::GameOver.eq(false))
            .order_by_asc(games::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|model| Self::model_to_state(model, user.name.clone()))
            .collect()
    }

    /// Ids of users that own at least one open game
    pub async fn find_users_with_active_games(&self) -> Result<Vec<Uuid>> {
        let mut user_ids: Vec<Uuid> = Games::find()
            .filter(games::Column::GameOver.eq(false))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|model| model.user_id)
            .collect();

        user_ids.sort();
        user_ids.dedup();
        Ok(user_ids)
    }

    /// Persist a played round.
    ///
    /// `game` is the state after the round, so its record ends with the
    /// round's line. The row is only written if it is still open and still
    /// holds the record the round was played on; otherwise the round is
    /// dropped and `Stale` returned. A decisive round also appends a score
    /// and bumps the owner's counters in the same transaction.
    pub async fn record_round(&self, game: &GameState, round: &Round) -> Result<RecordedRound> {
        let previous = game
            .record
            .split_last()
            .map(|(_, previous)| previous)
            .ok_or_else(|| anyhow::anyhow!("Game {} has no recorded round", game.id))?;

        let txn = self.db.begin().await?;

        let updated = Games::update_many()
            .col_expr(games::Column::GameOver, Expr::value(game.game_over))
            .col_expr(
                games::Column::Record,
                Expr::value(Self::encode_record(&game.record)?),
            )
            .col_expr(
                games::Column::UpdatedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(
                    chrono::Utc::now(),
                )),
            )
            .filter(games::Column::Id.eq(game.id))
            .filter(games::Column::GameOver.eq(false))
            .filter(games::Column::Record.eq(Self::encode_record(previous)?))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            txn.rollback().await?;
            tracing::debug!(game_id = %game.id, "Round dropped, game changed underneath it");
            return Ok(RecordedRound::Stale);
        }

        let score = if round.outcome.is_decisive() {
            let won = round.outcome == Outcome::User;
            let score_model = scores::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                user_id: ActiveValue::Set(game.user_id),
                game: ActiveValue::Set(game.key()),
                message: ActiveValue::Set(round.message.clone()),
                user_selection: ActiveValue::Set(round.user_selection.to_string()),
                computer_selection: ActiveValue::Set(round.computer_selection.to_string()),
                won: ActiveValue::Set(won),
                created_at: ActiveValue::Set(chrono::Utc::now().into()),
            };
            let inserted = Scores::insert(score_model).exec(&txn).await?;
            increment_user_stats(&txn, game.user_id, won).await?;

            let model = Scores::find_by_id(inserted.last_insert_id)
                .one(&txn)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created score"))?;
            Some(ScoreRepository::model_to_score(model, game.user_name.clone())?)
        } else {
            None
        };

        txn.commit().await?;
        Ok(RecordedRound::Saved(score))
    }

    /// Delete a game that is still open. Returns false when nothing matched.
    pub async fn delete_open_game(&self, id: GameId) -> Result<bool> {
        let result = Games::delete_many()
            .filter(games::Column::Id.eq(id))
            .filter(games::Column::GameOver.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
