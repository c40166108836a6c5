// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const ACCOUNT_CREATED: &str = "account.created";
pub const ACCOUNT_DELETED: &str = "account.deleted";
pub const LOGIN_SUCCEEDED: &str = "login.succeeded";
pub const LOGIN_FAILED: &str = "login.failed";
pub const GATE_REJECTED: &str = "gate.rejected";
