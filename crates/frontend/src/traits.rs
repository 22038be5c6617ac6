//! Core traits for drawing the surface.
//!
//! Renderers subscribe to the controller and are told which part of the
//! surface changed after every state transition. They read; they never
//! mutate.

use std::cell::Ref;

use crate::orchestrator::RecommendationPanel;
use crate::region::Region;
use crate::surface::InteractionSurface;

/// Which part of the surface a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    /// Ratings list, profile, and gated affordances
    Ratings,
    Stats,
    Popular,
    Search,
    Modal,
    Recommendations,
    Notices,
}

/// Read-only view handed to renderers
pub struct SurfaceView<'a> {
    pub surface: Ref<'a, InteractionSurface>,
    pub recommendations: Ref<'a, Region<RecommendationPanel>>,
}

/// Core trait for anything that draws the surface.
///
/// ## Design Note
/// - Called synchronously on the UI task, after the state is consistent
/// - A renderer may redraw everything or just the changed part
pub trait Renderer {
    /// Returns the name of this renderer (for logging/debugging)
    fn name(&self) -> &str;

    fn render(&self, change: Change, view: &SurfaceView<'_>);
}
