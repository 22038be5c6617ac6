//! Profile analytics derived from a rating snapshot.
//!
//! `ProfileAnalytics::compute` is a pure function: same snapshot in, same
//! profile out. The controller calls it after every store mutation and never
//! patches a profile incrementally.

use crate::types::{RatingSnapshot, Stars};
use serde::Serialize;

/// Summary of the visitor's ratings.
///
/// `average_rating` is `None` for an empty snapshot rather than a NaN from
/// dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSnapshot {
    pub total_ratings: usize,
    pub average_rating: Option<f64>,
    /// Count per star value; index 0 holds 1★, index 4 holds 5★
    pub rating_distribution: [usize; 5],
}

impl ProfileSnapshot {
    /// Profile of an empty session
    pub fn empty() -> Self {
        Self {
            total_ratings: 0,
            average_rating: None,
            rating_distribution: [0; 5],
        }
    }

    /// Number of ratings with exactly `stars`
    pub fn count_for(&self, stars: Stars) -> usize {
        self.rating_distribution[(stars.get() - Stars::MIN) as usize]
    }

    /// (stars, count) for every bucket, 1★ first. All five are always present.
    pub fn distribution(&self) -> impl Iterator<Item = (Stars, usize)> + '_ {
        Stars::all().map(|stars| (stars, self.count_for(stars)))
    }

    pub fn five_star_count(&self) -> usize {
        self.rating_distribution[4]
    }

    /// Share of 4★ and 5★ ratings as a whole percentage
    pub fn liked_percent(&self) -> Option<u32> {
        if self.total_ratings == 0 {
            return None;
        }
        let liked = self.rating_distribution[3] + self.rating_distribution[4];
        Some(((liked as f64 / self.total_ratings as f64) * 100.0).round() as u32)
    }
}

impl Default for ProfileSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Stateless namespace for the profile derivation
pub struct ProfileAnalytics;

impl ProfileAnalytics {
    /// Recompute the whole profile from `snapshot`.
    pub fn compute(snapshot: &RatingSnapshot) -> ProfileSnapshot {
        let mut rating_distribution = [0usize; 5];
        let mut sum: u64 = 0;

        for rating in snapshot {
            let stars = rating.rating.get();
            rating_distribution[(stars - Stars::MIN) as usize] += 1;
            sum += stars as u64;
        }

        let total_ratings = snapshot.len();
        let average_rating = if total_ratings > 0 {
            Some(sum as f64 / total_ratings as f64)
        } else {
            None
        };

        ProfileSnapshot {
            total_ratings,
            average_rating,
            rating_distribution,
        }
    }
}
