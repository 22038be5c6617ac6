//! Core domain types for a rating session.
//!
//! - Type aliases for domain clarity (MovieId)
//! - A validated newtype (Stars) so an out-of-range rating cannot be built
//! - Rating, the single stored entry
//! - RatingSnapshot, the immutable view handed to analytics and requests

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie in the remote catalog
///
/// `0` never names a real movie and is treated as an empty identifier.
pub type MovieId = u32;

// =============================================================================
// Stars
// =============================================================================

/// A star rating, always within `Stars::MIN..=Stars::MAX`.
///
/// The only way to build one is `Stars::new`, so any `Rating` in the store
/// is in range by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Stars(u8);

impl Stars {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw integer rating.
    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::InvalidRating { value })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All valid values, lowest first.
    pub fn all() -> impl Iterator<Item = Stars> {
        (Self::MIN..=Self::MAX).map(Stars)
    }
}

impl TryFrom<i64> for Stars {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self> {
        Stars::new(value)
    }
}

impl From<Stars> for u8 {
    fn from(stars: Stars) -> u8 {
        stars.0
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}★", self.0)
    }
}

// =============================================================================
// Rating
// =============================================================================

/// One rated movie in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub movie_id: MovieId,
    pub title: String,
    pub rating: Stars,
}

impl Rating {
    /// Build a rating, checking every field.
    ///
    /// The title is trimmed before the emptiness check and stored trimmed.
    pub fn new(movie_id: MovieId, title: &str, value: i64) -> Result<Self> {
        if movie_id == 0 {
            return Err(ValidationError::EmptyMovieId);
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle { movie_id });
        }
        let rating = Stars::new(value)?;

        Ok(Self {
            movie_id,
            title: title.to_string(),
            rating,
        })
    }
}

// =============================================================================
// RatingSnapshot
// =============================================================================

/// Immutable copy of the store at one point in time.
///
/// Ordered by movie id so display and request payloads are deterministic.
/// Holding a snapshot never lets a caller reach back into the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingSnapshot {
    entries: BTreeMap<MovieId, Rating>,
}

impl RatingSnapshot {
    pub(crate) fn from_entries(entries: BTreeMap<MovieId, Rating>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, movie_id: MovieId) -> Option<&Rating> {
        self.entries.get(&movie_id)
    }

    /// Ratings ordered by movie id
    pub fn iter(&self) -> impl Iterator<Item = &Rating> {
        self.entries.values()
    }
}

impl<'a> IntoIterator for &'a RatingSnapshot {
    type Item = &'a Rating;
    type IntoIter = std::collections::btree_map::Values<'a, MovieId, Rating>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
