// ============================
// crates/backend-lib/src/storage/mod.rs
// ============================
//! Storage abstraction with relational and in-memory implementations.
//!
//! Handlers and the authorization gate only ever see the [`AccountStore`]
//! trait; which backend sits behind it is a wiring decision made at
//! startup (SQLite in the binary, the hash-map fake in tests).
use async_trait::async_trait;

use crate::error::AppError;
use crate::model::{Account, NewAccount};

pub mod memory;
pub mod sqlite;

pub use memory::MemStore;
pub use sqlite::SqliteStore;

/// Trait for account storage backends
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account and return the stored record with its
    /// assigned identifier. A public-number collision is reported as
    /// [`AppError::DuplicateNumber`], never silently absorbed.
    async fn create(&self, account: &NewAccount) -> Result<Account, AppError>;

    /// Fetch an account by storage identifier
    async fn get_by_id(&self, id: i64) -> Result<Account, AppError>;

    /// Fetch an account by public account number
    async fn get_by_number(&self, number: i64) -> Result<Account, AppError>;

    /// List every stored account, ordered by identifier
    async fn list(&self) -> Result<Vec<Account>, AppError>;

    /// Remove an account. Removal is verified against the affected row
    /// count, so deleting an absent account reports not-found.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

pub(crate) fn not_found_by_id(id: i64) -> AppError {
    AppError::NotFound(format!("account {id} not found"))
}

pub(crate) fn not_found_by_number(number: i64) -> AppError {
    AppError::NotFound(format!("account with number [{number}] not found"))
}
