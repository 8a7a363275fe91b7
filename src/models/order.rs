use serde::{Deserialize, Serialize};

/// A placed order. Orders are only recorded for titles present in the
/// library at placement time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub title: String,
    /// RFC 3339 timestamp of when the order was received
    pub created_at: String,
}
