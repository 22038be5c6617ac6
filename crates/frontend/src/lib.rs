//! Frontend crate for the ReelRate client.
//!
//! This crate holds the session controller and everything it drives:
//!
//! - **controller**: `Frontend`, one method per user action
//! - **orchestrator**: standard/hybrid recommendation requests
//! - **surface**: ratings list, profile, gated affordances, regions, notices
//! - **modal**: the movie detail modal
//! - **region**: per-surface load state with last-request-wins tickets
//! - **traits**: the `Renderer` observer interface

pub mod controller;
pub mod error;
pub mod modal;
pub mod orchestrator;
pub mod region;
pub mod surface;
pub mod traits;

pub use controller::Frontend;
pub use error::{FrontendError, Result};
pub use modal::{ClickTarget, ModalState};
pub use orchestrator::{RecommendationOrchestrator, RecommendationPanel};
pub use region::{Outcome, Region, RegionState};
pub use surface::{InteractionSurface, Notice, NoticeKind, SearchResults};
pub use traits::{Change, Renderer, SurfaceView};
