// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication and authorization.

pub mod gate;
pub mod password;
pub mod token;

pub use gate::{authorize_owner, require_owner};
pub use password::{hash_password, hash_password_secure, verify_password};
pub use token::{Claims, TokenError, TokenService, TOKEN_HEADER};
