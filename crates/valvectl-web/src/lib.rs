//! # valvectl-web
//!
//! Web UI and REST API for the valve control system.
//!
//! This crate provides:
//! - The HTML control page assembled from the core templates
//! - The toggle endpoint the control page's script calls
//! - The WiFi setup flow (form page + `configuration.save`)
//! - JSON read access to the valve table
//!
//! ## Usage
//!
//! ```rust,ignore
//! use valvectl_web::{create_router, ServerState};
//!
//! let state = ServerState::shared(store, None);
//! let app = create_router(state);
//!
//! let listener = TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod pages;
pub mod routes;

// Re-exports
pub use routes::create_router;

use std::sync::Arc;
use tokio::sync::RwLock;

use valvectl_core::provision::ProvisioningStore;
use valvectl_core::{ConfigStore, Renderer};

/// Shared server state for all route handlers.
///
/// This is wrapped in Arc and shared across all Axum handlers. The
/// configuration record sits behind an RwLock: reads render pages
/// concurrently, mutations (`/action`, `configuration.save`) take the write
/// guard for the duration of the single field update.
pub struct ServerState {
    pub config: RwLock<ConfigStore>,
    pub renderer: Renderer,
    /// Persistence collaborator, when one exists.
    pub provisioning: Option<Box<dyn ProvisioningStore>>,
}

impl ServerState {
    /// Create new server state.
    pub fn new(config: ConfigStore, provisioning: Option<Box<dyn ProvisioningStore>>) -> Self {
        Self {
            config: RwLock::new(config),
            renderer: Renderer::new(),
            provisioning,
        }
    }

    /// Create state already wrapped for sharing across handlers.
    pub fn shared(
        config: ConfigStore,
        provisioning: Option<Box<dyn ProvisioningStore>>,
    ) -> AppState {
        Arc::new(Self::new(config, provisioning))
    }
}

/// Type alias for shared state in Axum handlers.
pub type AppState = Arc<ServerState>;
