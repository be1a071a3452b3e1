//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the hub behind a single `RwLock`; connection tasks take the write
//! guard for every mutation so all board and session changes are applied one
//! at a time.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::board::Board;
use crate::services::hub::Hub;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the hub is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub hub: Arc<RwLock<Hub>>,
    /// Outbound queue depth for each new session.
    pub client_channel_capacity: usize,
}

impl AppState {
    #[must_use]
    pub fn new(board: Board, client_channel_capacity: usize) -> Self {
        Self { hub: Arc::new(RwLock::new(Hub::new(board))), client_channel_capacity }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
