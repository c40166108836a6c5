// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Signed bearer tokens.
//!
//! Tokens are HS256 JWTs whose claims carry the holder's public account
//! number and an absolute expiry instant. The expiry lives in a custom
//! claim rather than the registered `exp`, so the library's registered
//! claim handling is turned off and the check made explicitly: a token is
//! good strictly while `now < expiredAt`.
use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request header carrying the bearer token on gated routes.
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// Errors from issuing or validating tokens.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token creation failed: {0}")]
    Creation(String),
    #[error("token verification failed: {0}")]
    Verification(String),
    #[error("token service misconfigured: {0}")]
    Configuration(String),
}

/// Claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Public account number the token is bound to
    #[serde(rename = "accountNumber")]
    pub account_number: i64,
    /// Unix seconds; the token validates strictly before this instant
    #[serde(rename = "expiredAt")]
    pub expired_at: i64,
}

/// Issues and validates tokens with a single shared secret.
///
/// The secret is injected explicitly at construction; nothing here reads
/// the environment.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Build a service from an explicit secret and token lifetime.
    /// Fails fast on an empty secret so a misconfigured deployment cannot
    /// issue tokens at all.
    pub fn new(secret: &str, ttl_secs: i64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::Configuration(
                "signing secret must not be empty".to_string(),
            ));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        })
    }

    /// Issue a token bound to `account_number`. Returns the compact token
    /// together with the expiry instant baked into it, in unix seconds.
    pub fn issue(&self, account_number: i64) -> Result<(String, i64), TokenError> {
        let expired_at = (Utc::now() + self.ttl).timestamp();
        let claims = Claims {
            account_number,
            expired_at,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Creation(e.to_string()))?;
        Ok((token, expired_at))
    }

    /// Validate a compact token: HS256 only, signature must match, expiry
    /// strictly in the future. Returns the embedded claims.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| TokenError::Verification(e.to_string()))?;

        if Utc::now().timestamp() >= data.claims.expired_at {
            return Err(TokenError::Verification("token expired".to_string()));
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn service() -> TokenService {
        TokenService::new("test-signing-secret", 3600).unwrap()
    }

    #[test]
    fn test_issue_then_validate_roundtrip() {
        let service = service();
        let (token, expired_at) = service.issue(424_242).unwrap();
        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.account_number, 424_242);
        assert_eq!(claims.expired_at, expired_at);
        assert!(expired_at > Utc::now().timestamp());
    }

    #[test]
    fn test_compact_form_has_three_segments_and_named_claims() {
        let (token, _) = service().issue(7).unwrap();
        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);

        let payload = URL_SAFE_NO_PAD.decode(segments[1]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(value["accountNumber"], 7);
        assert!(value["expiredAt"].is_i64());
    }

    #[test]
    fn test_rejects_empty_secret_at_construction() {
        assert!(matches!(
            TokenService::new("", 3600),
            Err(TokenError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_token_signed_with_other_secret() {
        let ours = service();
        let theirs = TokenService::new("some-other-secret", 3600).unwrap();
        let (token, _) = theirs.issue(7).unwrap();
        assert!(matches!(
            ours.validate(&token),
            Err(TokenError::Verification(_))
        ));
    }

    #[test]
    fn test_rejects_tampered_claims() {
        let service = service();
        let (token, expired_at) = service.issue(7).unwrap();
        let mut segments: Vec<String> = token.split('.').map(String::from).collect();

        let forged = Claims {
            account_number: 999,
            expired_at,
        };
        segments[1] = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let tampered = segments.join(".");

        assert!(service.validate(&tampered).is_err());
    }

    #[test]
    fn test_rejects_other_algorithms() {
        // Same secret, different MAC; the validator pins HS256
        let claims = Claims {
            account_number: 7,
            expired_at: Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-signing-secret"),
        )
        .unwrap();
        assert!(service().validate(&token).is_err());
    }

    #[test]
    fn test_rejects_unsigned_token() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let claims = Claims {
            account_number: 7,
            expired_at: Utc::now().timestamp() + 3600,
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let token = format!("{header}.{payload}.");
        assert!(service().validate(&token).is_err());
    }

    #[test]
    fn test_rejects_garbage_tokens() {
        let service = service();
        assert!(service.validate("").is_err());
        assert!(service.validate("garbage").is_err());
        assert!(service.validate("a.b.c").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new("test-signing-secret", -60).unwrap();
        let (token, _) = service.issue(7).unwrap();
        let err = service.validate(&token).unwrap_err();
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn test_token_at_exact_expiry_is_rejected() {
        // Zero lifetime puts expiredAt at the current second; the rule is
        // strictly before, so validation must fail
        let service = TokenService::new("test-signing-secret", 0).unwrap();
        let (token, _) = service.issue(7).unwrap();
        assert!(service.validate(&token).is_err());
    }
}
