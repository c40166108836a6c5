// ============================
// crates/backend-lib/src/model.rs
// ============================
//! Internal account records as held by the storage layer.

use chrono::{DateTime, TimeZone, Utc};
use coffer_common::AccountResponse;
use rand::Rng;

/// Public account numbers are drawn from `0..ACCOUNT_NUMBER_SPACE`.
pub const ACCOUNT_NUMBER_SPACE: i64 = 1_000_000_000;

/// A stored account. `credential_secret` is the PHC-encoded password hash;
/// it never leaves the storage boundary because wire responses are built
/// from [`AccountResponse`], which has no such field.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub credential_secret: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A record ready for insertion. The store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub credential_secret: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewAccount {
    /// Draws a fresh public number and stamps both timestamps with the
    /// same second-truncated instant.
    pub fn new(first_name: &str, last_name: &str, credential_secret: String) -> Self {
        let now = now_to_seconds();
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            number: draw_account_number(),
            credential_secret,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        AccountResponse {
            id: account.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            number: account.number,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Draws a candidate public account number. Uniqueness is enforced by the
/// store; callers redraw when an insert reports a duplicate.
pub fn draw_account_number() -> i64 {
    rand::thread_rng().gen_range(0..ACCOUNT_NUMBER_SPACE)
}

/// Timestamps are persisted as unix seconds, so they are truncated up
/// front; the record a store hands back compares equal to the one that
/// went in.
pub fn now_to_seconds() -> DateTime<Utc> {
    let secs = Utc::now().timestamp();
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
