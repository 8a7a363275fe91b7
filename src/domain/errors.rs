//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum LibraryError {
    /// Required field missing or empty
    Validation(String),
    /// Random pick requested on an empty library
    EmptyLibrary,
    /// Durable storage unreadable or unwritable (distinct from "absent")
    Storage(String),
    /// Missing or unusable credential
    Configuration(String),
    /// Failure from the external chat-completion service
    Completion(String),
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Validation(msg) => write!(f, "Validation error: {}", msg),
            LibraryError::EmptyLibrary => write!(f, "The library is empty"),
            LibraryError::Storage(msg) => write!(f, "Storage error: {}", msg),
            LibraryError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            LibraryError::Completion(msg) => write!(f, "Recommendation service error: {}", msg),
        }
    }
}

impl std::error::Error for LibraryError {}
