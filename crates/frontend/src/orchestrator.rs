//! # Recommendation Orchestrator
//!
//! Turns a rating snapshot into one recommendation request and routes the
//! answer to the recommendation panel:
//! 1. Take a ticket for the panel (panel shows `Loading`)
//! 2. Build the request body from the snapshot
//! 3. Call the standard or hybrid endpoint
//! 4. Populate the panel, or show an inline error, if the ticket is still current
//!
//! The orchestrator does not enforce the minimum-ratings gate; that is a UI
//! affordance. Whatever snapshot it is handed gets forwarded.

use std::cell::{Ref, RefCell};
use std::sync::Arc;
use std::time::Instant;

use catalog_client::{CatalogGateway, Recommendation, RecommendationRequest, Strategy};
use session::RatingSnapshot;
use tracing::{error, info};

use crate::region::{Outcome, Region, Ticket};

/// What the recommendation panel shows once populated
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationPanel {
    pub strategy: Strategy,
    /// In the order the service returned them
    pub items: Vec<Recommendation>,
}

/// Message shown in the panel when a request fails
pub const RECOMMENDATION_ERROR: &str = "Error getting recommendations";

/// A request that holds a panel ticket but has not been sent yet
#[derive(Debug)]
pub struct PendingRecommendations {
    ticket: Ticket,
    strategy: Strategy,
    request: RecommendationRequest,
    started: Instant,
}

impl PendingRecommendations {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

pub struct RecommendationOrchestrator<G: CatalogGateway + ?Sized> {
    gateway: Arc<G>,
    panel: RefCell<Region<RecommendationPanel>>,
}

impl<G: CatalogGateway + ?Sized> RecommendationOrchestrator<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            panel: RefCell::new(Region::new()),
        }
    }

    pub fn panel(&self) -> Ref<'_, Region<RecommendationPanel>> {
        self.panel.borrow()
    }

    /// Take a ticket for the panel and build the request body.
    ///
    /// The panel is `Loading` once this returns, so a caller can redraw
    /// before awaiting [`finish`](Self::finish).
    pub fn begin(&self, strategy: Strategy, snapshot: &RatingSnapshot) -> PendingRecommendations {
        let ticket = self.panel.borrow_mut().begin();
        let request = RecommendationRequest::from(snapshot);
        info!(
            "Requesting {} recommendations for {} ratings",
            strategy,
            request.ratings.len()
        );
        PendingRecommendations {
            ticket,
            strategy,
            request,
            started: Instant::now(),
        }
    }

    /// Send a prepared request and route the answer to the panel.
    ///
    /// Never retries and never panics on I/O: failures end up as the panel's
    /// error state and a log line.
    pub async fn finish(&self, pending: PendingRecommendations) -> Outcome {
        let PendingRecommendations {
            ticket,
            strategy,
            request,
            started,
        } = pending;

        let result = self.gateway.recommendations(strategy, &request).await;

        let mut panel = self.panel.borrow_mut();
        match result {
            Ok(items) => {
                let count = items.len();
                let completion = panel.populate(ticket, RecommendationPanel { strategy, items });
                let outcome = Outcome::from_completion(completion, true);
                if outcome == Outcome::Populated {
                    info!(
                        "Received {} {} recommendations in {:.2?}",
                        count,
                        strategy,
                        started.elapsed()
                    );
                }
                outcome
            }
            Err(e) => {
                error!("Error getting {} recommendations: {}", strategy, e);
                Outcome::from_completion(panel.fail(ticket, RECOMMENDATION_ERROR), false)
            }
        }
    }

    /// Issue one request for `snapshot` with `strategy`.
    pub async fn request_recommendations(
        &self,
        strategy: Strategy,
        snapshot: &RatingSnapshot,
    ) -> Outcome {
        let pending = self.begin(strategy, snapshot);
        self.finish(pending).await
    }
}
