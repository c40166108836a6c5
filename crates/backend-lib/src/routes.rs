// ============================
// crates/backend-lib/src/routes.rs
// ============================
//! HTTP router assembly.
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::gate;
use crate::handlers;
use crate::storage::AccountStore;
use crate::AppState;

/// Create the HTTP router. The ownership gate is layered onto the
/// single-account routes only; registration, login, listing and the
/// transfer stub stay open.
pub fn create_router<S: AccountStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let gated = Router::new()
        .route(
            "/account/{id}",
            get(handlers::get_account::<S>).delete(handlers::delete_account::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            gate::require_owner::<S>,
        ));

    Router::new()
        .route("/login", post(handlers::login::<S>))
        .route(
            "/account",
            get(handlers::list_accounts::<S>).post(handlers::create_account::<S>),
        )
        .route("/transfer", post(handlers::transfer))
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
