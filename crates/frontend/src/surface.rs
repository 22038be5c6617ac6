//! The interaction surface: everything the visitor can see.
//!
//! The surface never decides anything on its own. `sync_with` rebuilds the
//! ratings list, profile, and visibility from a store snapshot; the regions
//! are driven by the controller's fetches.

use std::collections::VecDeque;

use catalog_client::{DatasetStats, MovieDetails, PopularMovie, SearchHit, SimilarMovie};
use session::{ProfileAnalytics, ProfileSnapshot, Rating, RatingSnapshot, UiVisibility};
use tracing::info;

use crate::modal::Modal;
use crate::region::Region;

/// Keep at most this many undrained notices
const NOTICE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A short message for the visitor (a toast in the browser version)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Search hits together with the query that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

/// How the gated affordances moved during one sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub before: UiVisibility,
    pub after: UiVisibility,
}

impl VisibilityChange {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

#[derive(Debug, Default)]
pub struct InteractionSurface {
    ratings: Vec<Rating>,
    profile: ProfileSnapshot,
    visibility: UiVisibility,
    stats: Region<DatasetStats>,
    popular: Region<Vec<PopularMovie>>,
    search: Region<SearchResults>,
    modal: Modal,
    notices: VecDeque<Notice>,
}

impl InteractionSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every store-derived part of the surface from `snapshot`.
    ///
    /// Called after each store mutation, before control goes back to the
    /// event loop, so nothing derived is ever observed stale.
    pub fn sync_with(&mut self, snapshot: &RatingSnapshot) -> VisibilityChange {
        let before = self.visibility;

        self.ratings = snapshot.iter().cloned().collect();
        self.profile = ProfileAnalytics::compute(snapshot);
        self.visibility = UiVisibility::from_profile(&self.profile);

        let change = VisibilityChange {
            before,
            after: self.visibility,
        };
        if before.show_recommendations != self.visibility.show_recommendations {
            info!(
                visible = self.visibility.show_recommendations,
                total = self.profile.total_ratings,
                "Recommendation affordance toggled"
            );
        }
        if before.show_analytics != self.visibility.show_analytics {
            info!(
                visible = self.visibility.show_analytics,
                total = self.profile.total_ratings,
                "Analytics panel toggled"
            );
        }
        change
    }

    /// Current ratings list, ordered by movie id. Empty means the list shows
    /// its empty state.
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn profile(&self) -> &ProfileSnapshot {
        &self.profile
    }

    pub fn visibility(&self) -> UiVisibility {
        self.visibility
    }

    pub fn stats(&self) -> &Region<DatasetStats> {
        &self.stats
    }

    pub fn popular(&self) -> &Region<Vec<PopularMovie>> {
        &self.popular
    }

    pub fn search(&self) -> &Region<SearchResults> {
        &self.search
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub(crate) fn stats_mut(&mut self) -> &mut Region<DatasetStats> {
        &mut self.stats
    }

    pub(crate) fn popular_mut(&mut self) -> &mut Region<Vec<PopularMovie>> {
        &mut self.popular
    }

    pub(crate) fn search_mut(&mut self) -> &mut Region<SearchResults> {
        &mut self.search
    }

    pub(crate) fn modal_mut(&mut self) -> &mut Modal {
        &mut self.modal
    }

    pub(crate) fn modal_details_mut(&mut self) -> &mut Region<MovieDetails> {
        self.modal.details_mut()
    }

    pub(crate) fn modal_similar_mut(&mut self) -> &mut Region<Vec<SimilarMovie>> {
        self.modal.similar_mut()
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() == NOTICE_CAPACITY {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    /// Hand all pending notices to the caller
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}
