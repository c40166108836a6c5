// ============================
// crates/backend-lib/src/storage/sqlite.rs
// ============================
//! SQLite-backed account store.
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection};

use crate::error::AppError;
use crate::model::{Account, NewAccount};
use crate::storage::{not_found_by_id, not_found_by_number, AccountStore};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS accounts (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name        TEXT    NOT NULL,
    last_name         TEXT    NOT NULL,
    number            INTEGER NOT NULL UNIQUE,
    credential_secret TEXT    NOT NULL,
    created_at        INTEGER NOT NULL,
    updated_at        INTEGER NOT NULL
);
";

const ACCOUNT_COLUMNS: &str =
    "id, first_name, last_name, number, credential_secret, created_at, updated_at";

/// Relational implementation of [`AccountStore`].
///
/// One connection behind a mutex; every statement is short-lived, and the
/// busy timeout turns lock contention into an error instead of a hang.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Fully in-memory database, used by tests.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl AccountStore for SqliteStore {
    async fn create(&self, account: &NewAccount) -> Result<Account, AppError> {
        let conn = self.conn.lock();
        let inserted = conn.execute(
            "INSERT INTO accounts
                 (first_name, last_name, number, credential_secret, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                account.first_name,
                account.last_name,
                account.number,
                account.credential_secret,
                account.created_at.timestamp(),
                account.updated_at.timestamp(),
            ],
        );
        match inserted {
            Ok(_) => {}
            // UNIQUE(number) is the only constraint an insert can trip
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(AppError::DuplicateNumber(account.number));
            }
            Err(e) => return Err(e.into()),
        }
        let id = conn.last_insert_rowid();
        fetch_by_id(&conn, id)
    }

    async fn get_by_id(&self, id: i64) -> Result<Account, AppError> {
        let conn = self.conn.lock();
        fetch_by_id(&conn, id)
    }

    async fn get_by_number(&self, number: i64) -> Result<Account, AppError> {
        let conn = self.conn.lock();
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE number = ?1");
        match conn.query_row(&query, params![number], row_to_account) {
            Ok(account) => Ok(account),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(not_found_by_number(number)),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let conn = self.conn.lock();
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id");
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([], row_to_account)?;
        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row?);
        }
        Ok(accounts)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let conn = self.conn.lock();
        let affected = conn.execute("DELETE FROM accounts WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(not_found_by_id(id));
        }
        Ok(())
    }
}

fn fetch_by_id(conn: &Connection, id: i64) -> Result<Account, AppError> {
    let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?1");
    match conn.query_row(&query, params![id], row_to_account) {
        Ok(account) => Ok(account),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(not_found_by_id(id)),
        Err(e) => Err(e.into()),
    }
}

fn row_to_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        number: row.get(3)?,
        credential_secret: row.get(4)?,
        created_at: epoch(row.get(5)?),
        updated_at: epoch(row.get(6)?),
    })
}

fn epoch(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
