//! # Session Crate
//!
//! In-memory state for one visitor session of the ReelRate client.
//!
//! ## Main Components
//!
//! - **types**: Domain types (MovieId, Stars, Rating, RatingSnapshot)
//! - **store**: RatingStore, the single source of truth for ratings
//! - **analytics**: ProfileAnalytics, a pure derivation of summary stats
//! - **visibility**: UiVisibility, threshold-gated affordances
//! - **error**: Validation errors for rejected ratings
//!
//! Nothing here performs I/O and nothing is persisted; the store lives as
//! long as its owner.
//!
//! ## Example Usage
//!
//! ```
//! use session::{ProfileAnalytics, RatingStore, UiVisibility};
//!
//! let mut store = RatingStore::new();
//! store.rate(1, "Toy Story (1995)", 5)?;
//! store.rate(2, "Jumanji (1995)", 3)?;
//! store.rate(3, "Grumpier Old Men (1995)", 4)?;
//!
//! let profile = ProfileAnalytics::compute(&store.snapshot());
//! assert_eq!(profile.average_rating, Some(4.0));
//! assert!(UiVisibility::from_profile(&profile).show_recommendations);
//! # Ok::<(), session::ValidationError>(())
//! ```

pub mod analytics;
pub mod error;
pub mod store;
pub mod types;
pub mod visibility;

// Re-export commonly used types for convenience
pub use analytics::{ProfileAnalytics, ProfileSnapshot};
pub use error::{Result, ValidationError};
pub use store::RatingStore;
pub use types::{MovieId, Rating, RatingSnapshot, Stars};
pub use visibility::{ANALYTICS_THRESHOLD, RECOMMENDATION_THRESHOLD, UiVisibility};
