pub mod game_state;
pub mod opponent;
pub mod rules;

// Re-export main components
pub use game_state::*;
pub use opponent::*;
pub use rules::*;
