//! In-Memory Repository Implementation
//!
//! HashMap-backed credential store for tests and local development. A single
//! mutex guards every read-modify-write, so the lockout bookkeeping has the
//! same atomicity as the Postgres statement it stands in for. The lock is
//! never held across an await point.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;

use crate::domain::entity::account::{Account, FailedAttemptOutcome};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    accounts: HashMap<i64, Account>,
    next_id: i64,
}

/// In-memory credential store
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // Mutex poisoning only happens if a holder panicked; propagating the
        // inner state is still sound for tests
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create(
        &self,
        email: &Email,
        password_hash: &HashedPassword,
    ) -> AuthResult<Account> {
        let mut state = self.lock();

        if state.accounts.values().any(|a| &a.email == email) {
            return Err(AuthError::EmailTaken);
        }

        state.next_id += 1;
        let account = Account {
            account_id: AccountId::from_i64(state.next_id),
            email: email.clone(),
            password_hash: password_hash.clone(),
            created_at: Utc::now(),
            failed_attempts: 0,
            locked_until: None,
        };
        state
            .accounts
            .insert(account.account_id.as_i64(), account.clone());

        Ok(account)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let state = self.lock();
        Ok(state.accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        let state = self.lock();
        Ok(state.accounts.get(&account_id.as_i64()).cloned())
    }

    async fn record_failed_attempt(
        &self,
        account_id: AccountId,
        now: DateTime<Utc>,
    ) -> AuthResult<FailedAttemptOutcome> {
        let mut state = self.lock();
        let account = state
            .accounts
            .get_mut(&account_id.as_i64())
            .ok_or_else(|| {
                AuthError::Internal(format!(
                    "account {account_id} vanished during failed-attempt update"
                ))
            })?;

        // Same transition the Postgres statement applies, under one guard
        Ok(account.register_failure(now))
    }

    async fn reset_lockout(&self, account_id: AccountId) -> AuthResult<()> {
        let mut state = self.lock();
        if let Some(account) = state.accounts.get_mut(&account_id.as_i64()) {
            account.register_success();
        }
        Ok(())
    }
}
