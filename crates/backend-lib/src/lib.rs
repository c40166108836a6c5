// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the coffer account service.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod model;
pub mod routes;
pub mod seed;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Settings;

/// Application state shared across all handlers
pub struct AppState<S> {
    /// Token issue/validate service built from the injected secret
    pub tokens: TokenService,
    /// Settings the service was started with
    pub settings: Arc<Settings>,
    /// Storage backend
    pub store: S,
}

impl<S> AppState<S> {
    /// Create a new application state.
    ///
    /// Fails when the configured signing secret is unusable, so a
    /// misconfigured process stops at startup instead of limping along
    /// unable to issue or validate tokens.
    pub fn new(store: S, settings: Settings) -> anyhow::Result<Self> {
        let tokens = TokenService::new(&settings.signing_secret, settings.token_ttl_secs)?;
        Ok(Self {
            tokens,
            settings: Arc::new(settings),
            store,
        })
    }
}
