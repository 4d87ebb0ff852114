use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use crate::entities::{prelude::*, users};
use game_types::{win_percentage, GameError, LeaderboardEntry, User};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub(crate) fn model_to_user(model: users::Model) -> User {
        User {
            id: model.id,
            percentage: win_percentage(model.wins, model.total_games),
            name: model.name,
            email: model.email,
            wins: model.wins,
            total_games: model.total_games,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    fn rank_users(users: Vec<User>) -> Vec<LeaderboardEntry> {
        users
            .into_iter()
            .enumerate()
            .map(|(index, user)| LeaderboardEntry {
                user,
                rank: (index + 1) as u32,
            })
            .collect()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user_model = Users::find_by_id(id).one(&self.db).await?;
        Ok(user_model.map(Self::model_to_user))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let user_model = Users::find()
            .filter(users::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(user_model.map(Self::model_to_user))
    }

    /// Insert a new user. A name already taken fails with
    /// `GameError::UserAlreadyExists` inside the returned error.
    pub async fn create_user(&self, name: &str, email: Option<String>) -> Result<User> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let user_model = users::ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::new_v4()),
            name: sea_orm::ActiveValue::Set(name.to_string()),
            email: sea_orm::ActiveValue::Set(email),
            wins: sea_orm::ActiveValue::Set(0),
            total_games: sea_orm::ActiveValue::Set(0),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
        };

        let saved_model = match Users::insert(user_model).exec(&self.db).await {
            Ok(saved_model) => saved_model,
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(GameError::UserAlreadyExists {
                    user_name: name.to_string(),
                }
                .into());
            }
            Err(err) => return Err(err.into()),
        };

        // Fetch the created user
        let created_user = Users::find_by_id(saved_model.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created user"))?;

        Ok(Self::model_to_user(created_user))
    }

    /// Users ordered by wins, best first
    pub async fn get_leaderboard(&self, limit: u64) -> Result<Vec<LeaderboardEntry>> {
        let users = Users::find()
            .order_by_desc(users::Column::Wins)
            .order_by_asc(users::Column::Name)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(Self::rank_users(
            users.into_iter().map(Self::model_to_user).collect(),
        ))
    }

    /// Users ordered by win percentage, best first
    pub async fn get_user_rankings(&self, limit: u64) -> Result<Vec<LeaderboardEntry>> {
        // Users without games rank at 0%, like `win_percentage`
        let percentage = Expr::cust("COALESCE(CAST(wins AS REAL) / NULLIF(total_games, 0), 0)");

        let users = Users::find()
            .order_by_desc(percentage)
            .order_by_desc(users::Column::Wins)
            .order_by_asc(users::Column::Name)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(Self::rank_users(
            users.into_iter().map(Self::model_to_user).collect(),
        ))
    }

    /// 1-based position on the wins leaderboard
    pub async fn get_user_rank(&self, user_id: Uuid) -> Result<Option<u32>> {
        let user = Users::find_by_id(user_id).one(&self.db).await?;

        if let Some(user_model) = user {
            let users_above = Users::find()
                .filter(users::Column::Wins.gt(user_model.wins))
                .count(&self.db)
                .await?;

            Ok(Some(users_above as u32 + 1))
        } else {
            Ok(None)
        }
    }

    /// Users that registered an email address
    pub async fn find_with_email(&self) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(users::Column::Email.is_not_null())
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await?;

        Ok(users.into_iter().map(Self::model_to_user).collect())
    }
}

/// Atomic counter bump, usable inside a transaction
pub(crate) async fn increment_user_stats<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    won: bool,
) -> Result<()> {
    let result = Users::update_many()
        .col_expr(
            users::Column::Wins,
            Expr::col(users::Column::Wins).add(if won { 1 } else { 0 }),
        )
        .col_expr(
            users::Column::TotalGames,
            Expr::col(users::Column::TotalGames).add(1),
        )
        .col_expr(
            users::Column::UpdatedAt,
            Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(
                chrono::Utc::now(),
            )),
        )
        .filter(users::Column::Id.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(anyhow::anyhow!("User not found"));
    }

    Ok(())
}
