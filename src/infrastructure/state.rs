//! Application state containing the stores and the recommendation session

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::recommender::Recommender;
use crate::store::{LibraryStore, OrderLog};

/// Shared handles behind the router. Handlers run one lock-guarded operation
/// at a time; there is no other concurrency control over the JSON files.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<RwLock<LibraryStore>>,
    pub orders: Arc<RwLock<OrderLog>>,
    /// `None` until an API key is configured
    pub recommender: Arc<Mutex<Option<Recommender>>>,
}

impl AppState {
    pub fn new(library: LibraryStore, orders: OrderLog, recommender: Option<Recommender>) -> Self {
        Self {
            library: Arc::new(RwLock::new(library)),
            orders: Arc::new(RwLock::new(orders)),
            recommender: Arc::new(Mutex::new(recommender)),
        }
    }
}
