// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Credential hashing and verification.
//!
//! Secrets are salted scrypt hashes in PHC string form. Hashing is
//! deliberately slow; verification re-derives with the salt and cost
//! parameters embedded in the stored string.
use anyhow::anyhow;
use scrypt::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Scrypt,
};
use zeroize::Zeroize;

/// Hash a password using scrypt with a freshly generated salt
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt.hash_password(plain.as_bytes(), &salt)?.to_string();
    Ok(hash)
}

/// Verify a password against a stored credential secret.
///
/// `Ok(false)` is a plain mismatch. `Err` means the stored secret itself is
/// unusable (not a PHC string, unknown algorithm or parameters), which is a
/// server-side defect rather than a caller failure.
pub fn verify_password(secret: &str, plain: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(secret)
        .map_err(|e| anyhow!("stored credential secret is malformed: {e}"))?;
    match Scrypt.verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(anyhow!("credential verification failed: {e}")),
    }
}

/// Securely hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String) -> anyhow::Result<String> {
    let hash = hash_password(plain)?;
    plain.zeroize();
    Ok(hash)
}
