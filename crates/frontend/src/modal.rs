//! The movie detail modal.

use crate::region::{Region, Ticket};
use catalog_client::{MovieDetails, SimilarMovie};
use session::MovieId;

/// Open/closed state and which movie is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalState {
    pub is_open: bool,
    pub movie_id: Option<MovieId>,
}

/// Where a click landed while the modal was open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the dialog
    Backdrop,
    /// Anywhere inside the dialog
    Content,
}

/// Modal state plus the two independently loaded sections
#[derive(Debug, Default)]
pub struct Modal {
    state: ModalState,
    details: Region<MovieDetails>,
    similar: Region<Vec<SimilarMovie>>,
}

impl Modal {
    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn details(&self) -> &Region<MovieDetails> {
        &self.details
    }

    pub fn similar(&self) -> &Region<Vec<SimilarMovie>> {
        &self.similar
    }

    pub(crate) fn details_mut(&mut self) -> &mut Region<MovieDetails> {
        &mut self.details
    }

    pub(crate) fn similar_mut(&mut self) -> &mut Region<Vec<SimilarMovie>> {
        &mut self.similar
    }

    /// Show `movie_id`, replacing whatever was shown. Never stacks.
    ///
    /// Returns tickets for the details and similar-movies fetches.
    pub(crate) fn open(&mut self, movie_id: MovieId) -> (Ticket, Ticket) {
        self.state = ModalState {
            is_open: true,
            movie_id: Some(movie_id),
        };
        (self.details.begin(), self.similar.begin())
    }

    /// Close and drop both sections. Returns whether it was open.
    pub(crate) fn close(&mut self) -> bool {
        let was_open = self.state.is_open;
        self.state = ModalState::default();
        self.details.reset();
        self.similar.reset();
        was_open
    }
}
