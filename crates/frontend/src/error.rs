//! Errors reported back to the caller of a frontend operation.
//!
//! Fetch failures are not in here: they end up as a region's error state.
//! These are the cases where the caller asked for something that cannot be
//! done at all.

use catalog_client::GatewayError;
use session::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontendError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Rating from the modal needs its details (for the title)
    #[error("Movie details are not loaded yet")]
    ModalNotReady,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FrontendError>;
