use game_types::Selection;
use rand::seq::SliceRandom;

/// Picks the computer's side of a round
pub trait Opponent: Send + Sync {
    fn choose(&self) -> Selection;
}

/// Uniformly random computer player
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomOpponent;

impl Opponent for RandomOpponent {
    fn choose(&self) -> Selection {
        *Selection::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&Selection::Rock)
    }
}

/// Always plays the same selection
#[derive(Debug, Clone, Copy)]
pub struct FixedOpponent(pub Selection);

impl Opponent for FixedOpponent {
    fn choose(&self) -> Selection {
        self.0
    }
}
