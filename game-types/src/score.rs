use crate::{Selection, UserId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Outcome of one decisive round, append-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Score {
    pub id: Uuid,
    pub user_id: UserId,
    pub user_name: String,
    pub game: String,
    pub message: String,
    pub user_selection: Selection,
    pub computer_selection: Selection,
    pub won: bool,
    pub created_at: String, // ISO 8601 string
}
