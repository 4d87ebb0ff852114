use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{prelude::*, scores};
use game_types::{Score, Selection, User};

pub struct ScoreRepository {
    db: DatabaseConnection,
}

impl ScoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub(crate) fn model_to_score(model: scores::Model, user_name: String) -> Result<Score> {
        let user_selection: Selection = model
            .user_selection
            .parse()
            .with_context(|| format!("Corrupt user selection in score {}", model.id))?;
        let computer_selection: Selection = model
            .computer_selection
            .parse()
            .with_context(|| format!("Corrupt computer selection in score {}", model.id))?;

        Ok(Score {
            id: model.id,
            user_id: model.user_id,
            user_name,
            game: model.game,
            message: model.message,
            user_selection,
            computer_selection,
            won: model.won,
            created_at: model.created_at.to_rfc3339(),
        })
    }

    /// Every score, newest first
    pub async fn find_all(&self) -> Result<Vec<Score>> {
        let rows = Scores::find()
            .find_also_related(Users)
            .order_by_desc(scores::Column::CreatedAt)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(score, user)| {
                let user = user
                    .ok_or_else(|| anyhow::anyhow!("Score {} has no owner", score.id))?;
                Self::model_to_score(score, user.name)
            })
            .collect()
    }

    /// One user's scores, newest first
    pub async fn find_by_user(&self, user: &User) -> Result<Vec<Score>> {
        let rows = Scores::find()
            .filter(scores::Column::UserId.eq(user.id))
            .order_by_desc(scores::Column::CreatedAt)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|score| Self::model_to_score(score, user.name.clone()))
            .collect()
    }
}
