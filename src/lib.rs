pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod recommender;
pub mod store;

pub use infrastructure::config;
pub use infrastructure::server;
