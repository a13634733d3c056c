use thiserror::Error;

/// Errors returned by `OrderedMap` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested key is not stored in the map.
    #[error("key not found")]
    KeyNotFound,
    /// The map was structurally modified while a cursor was walking it.
    #[error("map changed during iteration")]
    ConcurrentModification,
}

/// A `Result` alias with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
