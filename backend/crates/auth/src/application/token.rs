//! Token Service
//!
//! Issues and verifies signed, time-bounded bearer tokens (JWT,
//! header.payload.signature). Verification collapses every failure mode to
//! the same `None`, so callers cannot distinguish a bad signature from a
//! malformed or expired token.

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::AccountId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Bearer token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id, stringified
    pub sub: String,
    /// Email claim, for display only
    pub email: String,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
}

/// Stateless token issue/verify service
///
/// Keys are derived once from the configured secret at construction.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    expiry_secs: i64,
}

impl TokenService {
    /// Build from application configuration
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.token_secret.as_bytes();

        let mut validation = Validation::new(config.token_algorithm);
        // Expired means expired; no grace window
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(config.token_algorithm),
            validation,
            expiry_secs: config.token_expiry_secs(),
        }
    }

    /// Issue a token for the given account
    pub fn issue(&self, account_id: AccountId, email: &Email) -> AuthResult<String> {
        self.issue_at(account_id, email, Utc::now())
    }

    /// Issue a token with an explicit issue instant
    pub fn issue_at(
        &self,
        account_id: AccountId,
        email: &Email,
        issued_at: DateTime<Utc>,
    ) -> AuthResult<String> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: account_id.to_string(),
            email: email.as_str().to_string(),
            iat,
            exp: iat + self.expiry_secs,
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify a token and extract its subject
    ///
    /// Malformed token, wrong signature, expiry in the past and a
    /// non-numeric subject all yield `None`.
    pub fn verify(&self, token: &str) -> Option<AccountId> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).ok()?;
        let id: i64 = data.claims.sub.parse().ok()?;
        Some(AccountId::from_i64(id))
    }

    /// Algorithm-agnostic access to the configured lifetime, in seconds
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service() -> TokenService {
        let config = AuthConfig {
            token_secret: "test-secret".to_string(),
            ..Default::default()
        };
        TokenService::new(&config)
    }

    fn email() -> Email {
        Email::new("a@test.com").unwrap()
    }

    #[test]
    fn test_issue_produces_three_segments() {
        let token = service().issue(AccountId::from_i64(7), &email()).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let svc = service();
        let token = svc.issue(AccountId::from_i64(42), &email()).unwrap();
        assert_eq!(svc.verify(&token), Some(AccountId::from_i64(42)));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let svc = service();
        let token = svc.issue(AccountId::from_i64(1), &email()).unwrap();

        // Flip the last signature character
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_ne!(token, tampered);
        assert_eq!(svc.verify(&tampered), None);
    }

    #[test]
    fn test_expired_token_fails() {
        let svc = service();
        let past = Utc::now() - Duration::hours(2);
        let token = svc
            .issue_at(AccountId::from_i64(1), &email(), past)
            .unwrap();
        assert_eq!(svc.verify(&token), None);
    }

    #[test]
    fn test_wrong_secret_fails() {
        let svc = service();
        let other = TokenService::new(&AuthConfig {
            token_secret: "other-secret".to_string(),
            ..Default::default()
        });

        let token = svc.issue(AccountId::from_i64(1), &email()).unwrap();
        assert_eq!(other.verify(&token), None);
    }

    #[test]
    fn test_garbage_input_fails() {
        let svc = service();
        assert_eq!(svc.verify(""), None);
        assert_eq!(svc.verify("not-a-token"), None);
        assert_eq!(svc.verify("a.b.c"), None);
    }
}
