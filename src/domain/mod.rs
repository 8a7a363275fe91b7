//! Domain layer - business-level error types, no framework dependencies

pub mod errors;

pub use errors::LibraryError;
