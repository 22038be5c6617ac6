//! Error types for the session crate.
//!
//! Only one kind of failure can happen inside the session core: a caller
//! tried to store a rating that breaks the store's invariants. Everything
//! else (network, decoding) lives at the gateway boundary.

use thiserror::Error;

/// Reasons a `rate()` call is rejected.
///
/// A rejected call never touches the store, so the caller can surface the
/// message and carry on with the previous state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Rating value outside the 1-5 star range
    #[error("Rating must be between 1 and 5 stars, got {value}")]
    InvalidRating { value: i64 },

    /// Movie id 0 is reserved as "no movie"
    #[error("Movie identifier is empty")]
    EmptyMovieId,

    /// Blank title after trimming
    #[error("Movie {movie_id} has an empty title")]
    EmptyTitle { movie_id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ValidationError>;
