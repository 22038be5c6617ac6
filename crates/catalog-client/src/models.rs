//! Wire types for the catalog REST API.
//!
//! Every response field is required. A payload missing one of them fails to
//! deserialize and surfaces as `GatewayError::Decoding`.

use serde::{Deserialize, Serialize};
use session::{MovieId, RatingSnapshot};
use std::collections::BTreeMap;
use std::fmt;

/// `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_movies: u64,
    pub total_ratings: u64,
    pub unique_users: u64,
    pub avg_rating: f64,
}

/// One entry of `GET /api/movies/popular`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularMovie {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
    pub rating_count: u64,
}

/// One entry of `GET /api/movies/search/{query}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
}

/// `GET /api/movies/{id}/details`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
    /// Pipe-delimited, e.g. `"Adventure|Animation|Children"`
    pub genres: String,
    pub avg_rating: f64,
    pub rating_count: u64,
}

impl MovieDetails {
    pub fn genre_list(&self) -> Vec<&str> {
        split_genres(&self.genres)
    }
}

/// One entry of `GET /api/movies/{id}/similar`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarMovie {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
    pub avg_rating: f64,
    pub common_genres: u32,
}

/// One entry of a recommendation response. Order is the service's ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
    pub score: f64,
}

/// Split a pipe-delimited genre string, dropping blank pieces
pub fn split_genres(genres: &str) -> Vec<&str> {
    genres
        .split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect()
}

// =============================================================================
// Requests
// =============================================================================

/// Which backend variant ranks the recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    #[default]
    Standard,
    Hybrid,
}

impl Strategy {
    /// Path segments below the API base
    pub fn path_segments(self) -> &'static [&'static str] {
        match self {
            Strategy::Standard => &["api", "recommendations"],
            Strategy::Hybrid => &["api", "recommendations", "hybrid"],
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Standard => write!(f, "standard"),
            Strategy::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// A rated movie as sent to the recommendation endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatedMovie {
    pub title: String,
    pub rating: u8,
}

/// Body of `POST /api/recommendations[/hybrid]`
///
/// Serializes as `{"ratings": {"<movieId>": {"title": .., "rating": ..}}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct RecommendationRequest {
    pub ratings: BTreeMap<MovieId, RatedMovie>,
}

impl From<&RatingSnapshot> for RecommendationRequest {
    fn from(snapshot: &RatingSnapshot) -> Self {
        let ratings = snapshot
            .iter()
            .map(|r| {
                (
                    r.movie_id,
                    RatedMovie {
                        title: r.title.clone(),
                        rating: r.rating.get(),
                    },
                )
            })
            .collect();

        Self { ratings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use session::RatingStore;

    #[test]
    fn test_request_body_shape() {
        let mut store = RatingStore::new();
        store.rate(1, "Toy Story (1995)", 5).unwrap();
        store.rate(32, "Twelve Monkeys (1995)", 4).unwrap();

        let request = RecommendationRequest::from(&store.snapshot());
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "ratings": {
                    "1": {"title": "Toy Story (1995)", "rating": 5},
                    "32": {"title": "Twelve Monkeys (1995)", "rating": 4}
                }
            })
        );
    }

    #[test]
    fn test_details_missing_field_is_rejected() {
        let body = json!({
            "movieId": 1,
            "title": "Toy Story (1995)",
            "genres": "Animation|Children",
            "avg_rating": 3.9
        });
        assert!(serde_json::from_value::<MovieDetails>(body).is_err());
    }

    #[test]
    fn test_genre_list_splits_pipes() {
        let details = MovieDetails {
            movie_id: 1,
            title: "Toy Story (1995)".to_string(),
            genres: "Adventure|Animation||Children".to_string(),
            avg_rating: 3.9,
            rating_count: 215,
        };
        assert_eq!(details.genre_list(), vec!["Adventure", "Animation", "Children"]);
    }

    #[test]
    fn test_strategy_paths() {
        assert_eq!(Strategy::Standard.path_segments(), &["api", "recommendations"]);
        assert_eq!(
            Strategy::Hybrid.path_segments(),
            &["api", "recommendations", "hybrid"]
        );
        assert_eq!(Strategy::default(), Strategy::Standard);
    }
}
