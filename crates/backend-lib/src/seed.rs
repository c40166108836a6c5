// ============================
// crates/backend-lib/src/seed.rs
// ============================
//! Demo account seeding for walkthroughs and smoke tests.
use anyhow::Context;

use crate::auth::hash_password;
use crate::model::{Account, NewAccount};
use crate::storage::AccountStore;

/// Name and password of the account created by `--seed`.
pub const DEMO_FIRST_NAME: &str = "Ali";
pub const DEMO_LAST_NAME: &str = "Raza";
pub const DEMO_PASSWORD: &str = "password@123";

/// Insert the demo account. Its public number is drawn like any other
/// registration and logged so the operator can log in with it.
pub async fn seed_demo_account<S: AccountStore>(store: &S) -> anyhow::Result<Account> {
    let secret = hash_password(DEMO_PASSWORD)?;
    let account = store
        .create(&NewAccount::new(DEMO_FIRST_NAME, DEMO_LAST_NAME, secret))
        .await
        .context("seeding demo account")?;
    tracing::info!(number = account.number, "seeded demo account");
    Ok(account)
}
