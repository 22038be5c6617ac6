//! The session controller.
//!
//! `Frontend` owns the rating store, the interaction surface, and the
//! recommendation orchestrator, and exposes every user action as a method.
//! Each action follows the same shape:
//!
//! 1. Mutate (store or region) synchronously
//! 2. Recompute everything derived from the store
//! 3. Notify renderers
//! 4. Await the fetch, if any, and settle the region it targets
//!
//! All methods take `&self`, so independent fetches can run concurrently on
//! one task (`tokio::join!`). No `RefCell` borrow is held across an await.

use std::cell::{Ref, RefCell};
use std::future::Future;
use std::sync::Arc;

use catalog_client::{CatalogGateway, ClientConfig, HttpCatalogClient, Strategy};
use session::{MovieId, RatingSnapshot, RatingStore};
use tracing::{debug, error, info, warn};

use crate::error::{FrontendError, Result};
use crate::modal::ClickTarget;
use crate::orchestrator::{RecommendationOrchestrator, RecommendationPanel};
use crate::region::{Outcome, Region, Ticket};
use crate::surface::{InteractionSurface, Notice, SearchResults};
use crate::traits::{Change, Renderer, SurfaceView};

pub const STATS_ERROR: &str = "Error loading stats. Make sure the catalog service is running";
pub const POPULAR_ERROR: &str = "Error loading popular movies";
pub const SEARCH_ERROR: &str = "Error searching movies";
pub const DETAILS_ERROR: &str = "Error loading movie details";
pub const SIMILAR_ERROR: &str = "Error loading similar movies";

type RegionSelector<T> = fn(&mut InteractionSurface) -> &mut Region<T>;

pub struct Frontend<G: CatalogGateway + ?Sized> {
    gateway: Arc<G>,
    store: RefCell<RatingStore>,
    surface: RefCell<InteractionSurface>,
    orchestrator: RecommendationOrchestrator<G>,
    renderers: Vec<Box<dyn Renderer>>,
}

impl Frontend<HttpCatalogClient> {
    /// Build a frontend talking HTTP to `config.api_base`
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let client = HttpCatalogClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}

impl<G: CatalogGateway + ?Sized> Frontend<G> {
    /// Start an empty session
    pub fn new(gateway: Arc<G>) -> Self {
        let store = RatingStore::new();
        let mut surface = InteractionSurface::new();
        surface.sync_with(&store.snapshot());

        Self {
            orchestrator: RecommendationOrchestrator::new(gateway.clone()),
            gateway,
            store: RefCell::new(store),
            surface: RefCell::new(surface),
            renderers: Vec::new(),
        }
    }

    /// Subscribe a renderer (builder pattern)
    pub fn add_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    pub fn surface(&self) -> Ref<'_, InteractionSurface> {
        self.surface.borrow()
    }

    pub fn recommendations(&self) -> Ref<'_, Region<RecommendationPanel>> {
        self.orchestrator.panel()
    }

    /// Immutable copy of the ratings
    pub fn snapshot(&self) -> RatingSnapshot {
        self.store.borrow().snapshot()
    }

    /// Take every queued notice
    pub fn take_notices(&self) -> Vec<Notice> {
        self.surface.borrow_mut().drain_notices()
    }

    // =========================================================================
    // Catalog browsing
    // =========================================================================

    /// Initial load: stats and popular movies, concurrently
    pub async fn start(&self) -> (Outcome, Outcome) {
        tokio::join!(self.load_stats(), self.load_popular())
    }

    pub async fn load_stats(&self) -> Outcome {
        let outcome = self
            .load_region(
                Change::Stats,
                InteractionSurface::stats_mut,
                STATS_ERROR,
                self.gateway.stats(),
            )
            .await;

        if outcome == Outcome::Failed {
            self.push_notice(Notice::error("Failed to load statistics"));
        }
        outcome
    }

    pub async fn load_popular(&self) -> Outcome {
        self.load_region(
            Change::Popular,
            InteractionSurface::popular_mut,
            POPULAR_ERROR,
            self.gateway.popular_movies(),
        )
        .await
    }

    /// Search the catalog. A blank query sends nothing and leaves the
    /// current results alone.
    pub async fn search(&self, query: &str) -> Outcome {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring blank search query");
            return Outcome::Skipped;
        }

        let fetch = async {
            self.gateway
                .search(query)
                .await
                .map(|hits| SearchResults {
                    query: query.to_string(),
                    hits,
                })
        };
        self.load_region(
            Change::Search,
            InteractionSurface::search_mut,
            SEARCH_ERROR,
            fetch,
        )
        .await
    }

    // =========================================================================
    // Ratings
    // =========================================================================

    /// Rate (or re-rate) a movie. A rejected value leaves the store unchanged.
    pub fn rate(&self, movie_id: MovieId, title: &str, value: i64) -> Result<()> {
        let result = self.apply_rating(movie_id, title, value);
        if result.is_ok() {
            self.notify(Change::Ratings);
        }
        self.notify(Change::Notices);
        result
    }

    /// Remove a rating; unrated ids are a no-op. Returns whether one was removed.
    pub fn remove(&self, movie_id: MovieId) -> bool {
        let removed = self.store.borrow_mut().remove(movie_id);
        if let Some(rating) = &removed {
            info!("Removed rating for \"{}\"", rating.title);
        }
        self.resync();
        self.notify(Change::Ratings);
        removed.is_some()
    }

    fn apply_rating(&self, movie_id: MovieId, title: &str, value: i64) -> Result<()> {
        let rated = self
            .store
            .borrow_mut()
            .rate(movie_id, title, value)
            .map(|rating| rating.clone());

        match rated {
            Ok(rating) => {
                self.resync();
                info!("Rated \"{}\" {}", rating.title, rating.rating);
                self.surface.borrow_mut().push_notice(Notice::success(format!(
                    "Rated \"{}\" {} stars!",
                    rating.title,
                    rating.rating.get()
                )));
                Ok(())
            }
            Err(e) => {
                warn!("Rejected rating for movie {}: {}", movie_id, e);
                self.surface
                    .borrow_mut()
                    .push_notice(Notice::error(e.to_string()));
                Err(FrontendError::from(e))
            }
        }
    }

    /// Recompute profile, visibility, and the ratings list from the store
    fn resync(&self) {
        let snapshot = self.store.borrow().snapshot();
        self.surface.borrow_mut().sync_with(&snapshot);
    }

    // =========================================================================
    // Detail modal
    // =========================================================================

    /// Open (or retarget) the modal and load details and similar movies.
    ///
    /// The two fetches settle independently; a failed similar-movies fetch
    /// does not hide the details.
    pub async fn show_details(&self, movie_id: MovieId) -> (Outcome, Outcome) {
        let (details_ticket, similar_ticket) = self.surface.borrow_mut().modal_mut().open(movie_id);
        debug!(movie_id, "Opened detail modal");
        self.notify(Change::Modal);

        let details = async {
            let result = self.gateway.movie_details(movie_id).await;
            self.settle(
                Change::Modal,
                InteractionSurface::modal_details_mut,
                DETAILS_ERROR,
                details_ticket,
                result,
            )
        };
        let similar = async {
            let result = self.gateway.similar_movies(movie_id).await;
            self.settle(
                Change::Modal,
                InteractionSurface::modal_similar_mut,
                SIMILAR_ERROR,
                similar_ticket,
                result,
            )
        };

        tokio::join!(details, similar)
    }

    /// Explicit close. Returns whether the modal was open.
    pub fn close_modal(&self) -> bool {
        let was_open = self.surface.borrow_mut().modal_mut().close();
        if was_open {
            self.notify(Change::Modal);
        }
        was_open
    }

    /// A click while the modal is up; only the backdrop dismisses it.
    pub fn dismiss_modal(&self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Backdrop => self.close_modal(),
            ClickTarget::Content => false,
        }
    }

    /// Rate the movie shown in the modal, then close it.
    ///
    /// Renderers see both effects together. If the rating is rejected the
    /// modal stays open.
    pub fn rate_from_modal(&self, value: i64) -> Result<()> {
        let (movie_id, title) = {
            let surface = self.surface.borrow();
            let modal = surface.modal();
            match modal.details().value() {
                Some(details) if modal.is_open() => (details.movie_id, details.title.clone()),
                _ => return Err(FrontendError::ModalNotReady),
            }
        };

        let result = self.apply_rating(movie_id, &title, value);
        if result.is_ok() {
            self.surface.borrow_mut().modal_mut().close();
            self.notify(Change::Ratings);
            self.notify(Change::Modal);
        }
        self.notify(Change::Notices);
        result
    }

    // =========================================================================
    // Recommendations
    // =========================================================================

    /// Ask for recommendations from the current ratings.
    ///
    /// The affordance is only shown from three ratings up, but the request
    /// goes out regardless of how many there are.
    pub async fn request_recommendations(&self, strategy: Strategy) -> Outcome {
        let snapshot = self.snapshot();
        if !self.surface.borrow().visibility().show_recommendations {
            debug!(
                total = snapshot.len(),
                "Recommendations requested below the affordance threshold"
            );
        }

        let pending = self.orchestrator.begin(strategy, &snapshot);
        self.notify(Change::Recommendations);

        let outcome = self.orchestrator.finish(pending).await;
        if outcome == Outcome::Populated && strategy == Strategy::Hybrid {
            self.push_notice(Notice::success("Hybrid recommendations loaded!"));
        }
        if outcome != Outcome::Superseded {
            self.notify(Change::Recommendations);
        }
        outcome
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    async fn load_region<T, F>(
        &self,
        change: Change,
        select: RegionSelector<T>,
        error_message: &str,
        fetch: F,
    ) -> Outcome
    where
        F: Future<Output = catalog_client::Result<T>>,
    {
        let ticket = select(&mut self.surface.borrow_mut()).begin();
        self.notify(change);

        let result = fetch.await;
        self.settle(change, select, error_message, ticket, result)
    }

    /// Apply a finished fetch to its region if the ticket is still current
    fn settle<T>(
        &self,
        change: Change,
        select: RegionSelector<T>,
        error_message: &str,
        ticket: Ticket,
        result: catalog_client::Result<T>,
    ) -> Outcome {
        let outcome = {
            let mut surface = self.surface.borrow_mut();
            let region = select(&mut surface);
            match result {
                Ok(value) => Outcome::from_completion(region.populate(ticket, value), true),
                Err(e) => {
                    error!("{}: {}", error_message, e);
                    Outcome::from_completion(region.fail(ticket, error_message), false)
                }
            }
        };

        if outcome != Outcome::Superseded {
            self.notify(change);
        }
        outcome
    }

    fn push_notice(&self, notice: Notice) {
        self.surface.borrow_mut().push_notice(notice);
        self.notify(Change::Notices);
    }

    fn notify(&self, change: Change) {
        if self.renderers.is_empty() {
            return;
        }

        let view = SurfaceView {
            surface: self.surface.borrow(),
            recommendations: self.orchestrator.panel(),
        };
        for renderer in &self.renderers {
            debug!(renderer = renderer.name(), ?change, "Rendering");
            renderer.render(change, &view);
        }
    }
}
