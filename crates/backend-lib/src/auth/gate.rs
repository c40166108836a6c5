// ============================
// crates/backend-lib/src/auth/gate.rs
// ============================
//! Owner-only authorization for account routes.
//!
//! Checks run in a fixed order: token present, token valid, addressed
//! account exists, token bound to that account. The first failure wins.
//! Every refusal surfaces as the same response; the precise reason is
//! only logged and counted server-side.
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use metrics::counter;

use crate::auth::token::{TokenService, TOKEN_HEADER};
use crate::error::{AppError, RejectReason};
use crate::metrics::GATE_REJECTED;
use crate::model::Account;
use crate::storage::AccountStore;
use crate::AppState;

/// Run the ownership checks for `account_id` against an optional bearer
/// token. Returns the account on success.
///
/// A storage backend failure during the existence check propagates as-is;
/// only a definite "no such account" collapses into the refusal.
pub async fn authorize_owner<S: AccountStore>(
    tokens: &TokenService,
    store: &S,
    token: Option<&str>,
    account_id: i64,
) -> Result<Account, AppError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Forbidden(RejectReason::MissingToken))?;

    let claims = tokens
        .validate(token)
        .map_err(|_| AppError::Forbidden(RejectReason::InvalidToken))?;

    let account = match store.get_by_id(account_id).await {
        Ok(account) => account,
        Err(AppError::NotFound(_)) => {
            return Err(AppError::Forbidden(RejectReason::UnknownAccount));
        }
        Err(e) => return Err(e),
    };

    if account.number != claims.account_number {
        return Err(AppError::Forbidden(RejectReason::NotOwner));
    }

    Ok(account)
}

/// Middleware guarding `/account/{id}`: the request proceeds only when
/// the caller presents a valid token bound to that exact account.
pub async fn require_owner<S: AccountStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(account_id): Path<i64>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    match authorize_owner(&state.tokens, &state.store, token, account_id).await {
        Ok(_) => Ok(next.run(request).await),
        Err(err) => {
            if let AppError::Forbidden(reason) = &err {
                tracing::warn!(account_id, ?reason, "request refused by authorization gate");
                counter!(GATE_REJECTED).increment(1);
            }
            Err(err)
        }
    }
}
