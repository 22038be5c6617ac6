//! The session's rating store.
//!
//! RatingStore is the single source of truth for what the visitor has rated.
//! It owns its entries outright; callers read through `snapshot()` or the
//! borrowing getters and write through `rate()`/`remove()` only.

use crate::error::Result;
use crate::types::{MovieId, Rating, RatingSnapshot};
use std::collections::HashMap;
use tracing::debug;

/// Movie id to rating, at most one entry per movie.
#[derive(Debug, Default)]
pub struct RatingStore {
    ratings: HashMap<MovieId, Rating>,
}

impl RatingStore {
    /// Creates a new, empty store
    pub fn new() -> Self {
        Self {
            ratings: HashMap::new(),
        }
    }

    /// Insert or overwrite the rating for `movie_id`.
    ///
    /// Validation happens before the map is touched, so a rejected call
    /// leaves the store exactly as it was.
    pub fn rate(&mut self, movie_id: MovieId, title: &str, value: i64) -> Result<&Rating> {
        let rating = Rating::new(movie_id, title, value)?;

        let previous = self.ratings.insert(movie_id, rating);
        if let Some(previous) = previous {
            debug!(
                movie_id,
                from = previous.rating.get(),
                to = value,
                "Overwrote existing rating"
            );
        }

        // Just inserted above
        Ok(&self.ratings[&movie_id])
    }

    /// Remove the rating for `movie_id`. Absent ids are a no-op.
    ///
    /// Returns the removed entry, if there was one.
    pub fn remove(&mut self, movie_id: MovieId) -> Option<Rating> {
        let removed = self.ratings.remove(&movie_id);
        if removed.is_none() {
            debug!(movie_id, "Remove requested for unrated movie");
        }
        removed
    }

    /// Immutable copy of the current contents
    pub fn snapshot(&self) -> RatingSnapshot {
        RatingSnapshot::from_entries(
            self.ratings
                .iter()
                .map(|(id, rating)| (*id, rating.clone()))
                .collect(),
        )
    }

    pub fn get(&self, movie_id: MovieId) -> Option<&Rating> {
        self.ratings.get(&movie_id)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}
