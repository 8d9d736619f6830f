//! Login Use Case
//!
//! Authenticates a user and issues a bearer token.
//!
//! Rejection discipline: an unknown email, a wrong password, an over-long
//! candidate and a malformed email all produce the same
//! [`AuthError::InvalidCredentials`], so responses leak nothing about which
//! accounts exist. Only an active lockout is reported distinctly.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use platform::password::ClearTextPassword;

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer token
    pub access_token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let now = Utc::now();

        let email = match Email::new(input.email) {
            Ok(email) => email,
            Err(_) => return Err(AuthError::InvalidCredentials),
        };

        // Byte-limit contract of the hash primitive, checked before hashing
        let password = ClearTextPassword::login_candidate(input.password)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Pre-login check: attempts against a locked account are rejected
        // without touching the failure counter
        if account.is_locked_at(now) {
            return Err(AuthError::AccountLocked);
        }

        if !account.password_hash.verify(&password, self.config.pepper()) {
            let outcome = self
                .repo
                .record_failed_attempt(account.account_id, now)
                .await?;

            if outcome.locked {
                tracing::warn!(
                    account_id = %account.account_id,
                    "Account locked after repeated failed logins"
                );
            } else {
                tracing::warn!(
                    account_id = %account.account_id,
                    failed_attempts = outcome.failed_attempts,
                    "Failed login attempt"
                );
            }

            return Err(AuthError::InvalidCredentials);
        }

        // Successful login resets the counter and clears any stale lock
        self.repo.reset_lockout(account.account_id).await?;

        let access_token = self.tokens.issue(account.account_id, &account.email)?;

        tracing::info!(account_id = %account.account_id, "User logged in");

        Ok(LoginOutput { access_token })
    }
}
