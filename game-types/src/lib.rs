pub mod errors;
pub mod game;
pub mod score;
pub mod selection;
pub mod user;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use score::*;
pub use selection::*;
pub use user::*;

pub type GameId = uuid::Uuid;
pub type UserId = uuid::Uuid;
