pub mod models;
pub mod session;

pub use models::{ChatTurn, Role};
pub use session::{Recommender, GREETING};
