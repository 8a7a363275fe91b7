use serde::{Deserialize, Serialize};

/// One book entry. Every persisted record carries all three keys;
/// `description` may be the empty string but is never absent once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
}
