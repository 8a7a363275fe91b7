use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cribris::config::Config;
use cribris::infrastructure::AppState;
use cribris::recommender::Recommender;
use cribris::server;
use cribris::store::{LibraryStore, OrderLog};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cribris=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // A corrupt library file is reported but not fatal; the process keeps
    // running with an empty library and the next save rewrites the file.
    let library = match LibraryStore::open(&config.library_path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("{}; starting with an empty library", e);
            LibraryStore::empty(&config.library_path)
        }
    };
    tracing::info!(
        "Loaded {} book(s) from {}",
        library.len(),
        config.library_path
    );

    let orders = match OrderLog::open(&config.orders_path) {
        Ok(log) => log,
        Err(e) => {
            tracing::error!("{}; starting with an empty order log", e);
            OrderLog::empty(&config.orders_path)
        }
    };

    // The recommendation chat is optional: without a key the rest of the
    // application still works and /api/chat reports 503.
    let recommender = match Recommender::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
    ) {
        Ok(r) => Some(r),
        Err(e) => {
            tracing::warn!("{}; the recommendation chat will be unavailable", e);
            None
        }
    };

    let state = AppState::new(library, orders, recommender);

    if let Err(e) = server::serve(state, config.port).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
