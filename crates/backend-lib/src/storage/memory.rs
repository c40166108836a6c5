// ============================
// crates/backend-lib/src/storage/memory.rs
// ============================
//! In-memory account store for tests and local development.
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::model::{Account, NewAccount};
use crate::storage::{not_found_by_id, not_found_by_number, AccountStore};

/// Hash-map implementation of [`AccountStore`], contract-equivalent to
/// the relational backend: same not-found semantics, same duplicate
/// number rejection, same row-verified delete.
#[derive(Default)]
pub struct MemStore {
    accounts: RwLock<HashMap<i64, Account>>,
    next_id: AtomicI64,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemStore {
    async fn create(&self, account: &NewAccount) -> Result<Account, AppError> {
        let mut accounts = self.accounts.write().await;
        // Uniqueness check and insert stay under one write lock
        if accounts.values().any(|a| a.number == account.number) {
            return Err(AppError::DuplicateNumber(account.number));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = Account {
            id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            number: account.number,
            credential_secret: account.credential_secret.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        };
        accounts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: i64) -> Result<Account, AppError> {
        self.accounts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_by_id(id))
    }

    async fn get_by_number(&self, number: i64) -> Result<Account, AppError> {
        self.accounts
            .read()
            .await
            .values()
            .find(|a| a.number == number)
            .cloned()
            .ok_or_else(|| not_found_by_number(number))
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by_key(|a| a.id);
        Ok(accounts)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        match self.accounts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(not_found_by_id(id)),
        }
    }
}
