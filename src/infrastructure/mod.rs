pub mod config;
pub mod server;
pub mod state;

pub use state::AppState;
