use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub wins: i32,
    pub total_games: i32,
    pub percentage: f64,
    pub created_at: String, // ISO 8601 string for simplicity
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardEntry {
    pub user: User,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserStats {
    pub user: User,
    pub rank: u32, // Position on the wins leaderboard
}

/// Fraction of decisive rounds won, 0 when nothing has been played
pub fn win_percentage(wins: i32, total_games: i32) -> f64 {
    if total_games > 0 {
        f64::from(wins) / f64::from(total_games)
    } else {
        0.0
    }
}
