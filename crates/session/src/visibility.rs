//! Threshold-gated affordances.

use crate::analytics::ProfileSnapshot;
use serde::Serialize;

/// Ratings needed before recommendations can be requested
pub const RECOMMENDATION_THRESHOLD: usize = 3;

/// Ratings needed before the analytics panel is shown
pub const ANALYTICS_THRESHOLD: usize = 5;

/// Which gated controls are visible for a given profile.
///
/// Always derived fresh from a profile; there is no setter, so a value can
/// only be stale if the caller holds on to an old one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UiVisibility {
    pub show_recommendations: bool,
    pub show_analytics: bool,
}

impl UiVisibility {
    pub fn from_profile(profile: &ProfileSnapshot) -> Self {
        Self {
            show_recommendations: profile.total_ratings >= RECOMMENDATION_THRESHOLD,
            show_analytics: profile.total_ratings >= ANALYTICS_THRESHOLD,
        }
    }
}
