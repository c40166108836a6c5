// ============================
// crates/backend-lib/src/handlers.rs
// ============================
//! HTTP handlers for the account API.
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use metrics::counter;

use coffer_common::{
    AccountResponse, CreateAccountRequest, DeleteResponse, LoginRequest, LoginResponse,
    TransferRequest,
};

use crate::auth::password::{hash_password, hash_password_secure, verify_password};
use crate::error::AppError;
use crate::metrics::{ACCOUNT_CREATED, ACCOUNT_DELETED, LOGIN_FAILED, LOGIN_SUCCEEDED};
use crate::model::NewAccount;
use crate::storage::AccountStore;
use crate::validation;
use crate::AppState;

/// How many times registration draws a public number before giving up
/// when the store keeps reporting collisions.
const NUMBER_DRAW_ATTEMPTS: u32 = 3;

/// `POST /login`: exchange an account number and password for a token.
///
/// Unknown numbers and wrong passwords produce the same response; a
/// failed login reveals nothing about whether the account exists.
pub async fn login<S: AccountStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validation::validate_login(&request)?;

    let account = match state.store.get_by_number(request.number).await {
        Ok(account) => account,
        Err(AppError::NotFound(_)) => {
            // Burn a hash so an unknown number costs the same as a
            // wrong password
            let _ = hash_password(&request.password);
            counter!(LOGIN_FAILED).increment(1);
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    match verify_password(&account.credential_secret, &request.password) {
        Ok(true) => {}
        Ok(false) => {
            counter!(LOGIN_FAILED).increment(1);
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => {
            tracing::error!(number = account.number, error = %e, "stored credential secret unusable");
            return Err(AppError::Internal(
                "credential verification failed".to_string(),
            ));
        }
    }

    let (token, expires_at) = state
        .tokens
        .issue(account.number)
        .map_err(|e| AppError::Signing(e.to_string()))?;

    counter!(LOGIN_SUCCEEDED).increment(1);
    tracing::info!(number = account.number, "login succeeded");

    Ok(Json(LoginResponse {
        token,
        number: account.number,
        expires_at,
    }))
}

/// `POST /account`: open a new account.
///
/// The plaintext password is hashed (and wiped) before anything is
/// stored; the public number is drawn server-side and redrawn on the
/// rare collision.
pub async fn create_account<S: AccountStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(mut request): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, AppError> {
    validation::validate_registration(&request)?;

    let secret = hash_password_secure(&mut request.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut attempts = 1;
    let account = loop {
        let new_account = NewAccount::new(&request.first_name, &request.last_name, secret.clone());
        match state.store.create(&new_account).await {
            Ok(account) => break account,
            Err(AppError::DuplicateNumber(number)) if attempts < NUMBER_DRAW_ATTEMPTS => {
                attempts += 1;
                tracing::warn!(number, "account number collision, redrawing");
            }
            Err(e) => return Err(e),
        }
    };

    counter!(ACCOUNT_CREATED).increment(1);
    tracing::info!(id = account.id, number = account.number, "account created");

    Ok(Json(AccountResponse::from(&account)))
}

/// `GET /account`: list every account.
pub async fn list_accounts<S: AccountStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let accounts = state.store.list().await?;
    Ok(Json(accounts.iter().map(AccountResponse::from).collect()))
}

/// `GET /account/{id}`: fetch one account.
///
/// The ownership gate has already run; a race with a concurrent delete
/// still reports not-found rather than a stale row.
pub async fn get_account<S: AccountStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state.store.get_by_id(id).await?;
    Ok(Json(AccountResponse::from(&account)))
}

/// `DELETE /account/{id}`: remove one account.
pub async fn delete_account<S: AccountStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.store.delete(id).await?;
    counter!(ACCOUNT_DELETED).increment(1);
    tracing::info!(id, "account deleted");
    Ok(Json(DeleteResponse { deleted: id }))
}

/// `POST /transfer`: accepted and echoed back; executing transfers is
/// outside this service.
pub async fn transfer(Json(request): Json<TransferRequest>) -> Json<TransferRequest> {
    Json(request)
}
