pub mod prelude;

pub mod games;
pub mod scores;
pub mod users;
