//! HTTP route handlers for the valve control server.
//!
//! Routes match the URLs the original device firmware served, so the page
//! script and bookmarks keep working against this implementation.

pub mod setup;
pub mod valves;

use crate::AppState;
use axum::Router;

/// Create the main Axum router with all routes.
///
/// Routes are organized as:
/// - `/`, `/action` - control page and the toggle endpoint its script calls
/// - `/setup`, `/configuration.save` - WiFi provisioning flow
/// - `/api/valves` - JSON read access to the valve table
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(valves::routes())
        .merge(setup::routes())
        .with_state(state)
}
