//! Repository Traits
//!
//! Interface to the credential store. Implementation is in the
//! infrastructure layer. Lockout bookkeeping crosses this boundary as
//! single atomic operations; callers never read-modify-write counters
//! across round trips.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;

use crate::domain::entity::account::{Account, FailedAttemptOutcome};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Credential store trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account, returning the stored row with its issued id
    async fn create(&self, email: &Email, password_hash: &HashedPassword)
    -> AuthResult<Account>;

    /// Look up an account by normalized email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    /// Look up an account by id
    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>>;

    /// Record one failed login attempt as a single atomic increment-and-lock
    ///
    /// If the incremented count reaches the lockout threshold, the same
    /// operation applies the lock and resets the counter. Two concurrent
    /// failures must never observe the same pre-increment value.
    async fn record_failed_attempt(
        &self,
        account_id: AccountId,
        now: DateTime<Utc>,
    ) -> AuthResult<FailedAttemptOutcome>;

    /// Reset the failure counter and clear any lock after a successful login
    async fn reset_lockout(&self, account_id: AccountId) -> AuthResult<()>;
}
