// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between `coffer` clients and the server.
//! This module defines the JSON request and response bodies of the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /account`: open a new account.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Holder's first name
    pub first_name: String,
    /// Holder's last name
    pub last_name: String,
    /// Plaintext password; hashed server-side, never stored or echoed
    pub password: String,
}

/// Body of `POST /login`: exchange credentials for a bearer token.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Public account number the caller claims to own
    pub number: i64,
    /// Plaintext password to verify
    pub password: String,
}

/// Successful login result.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed bearer token; send back in the `x-jwt-token` header
    pub token: String,
    /// Public account number the token is bound to
    pub number: i64,
    /// Unix seconds after which the token stops validating
    pub expires_at: i64,
}

/// An account as exposed over the wire.
///
/// The stored credential secret has no field here, so it cannot be
/// serialized into a response by construction.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Storage-assigned identifier
    pub id: i64,
    /// Holder's first name
    pub first_name: String,
    /// Holder's last name
    pub last_name: String,
    /// Public account number used for login and token binding
    pub number: i64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Result of `DELETE /account/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    /// Identifier of the removed account
    pub deleted: i64,
}

/// Body of `POST /transfer`. Accepted and echoed back; execution of
/// transfers is not part of this service.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Destination account number
    pub to_account: i64,
    /// Amount in minor units
    pub amount: i64,
}
