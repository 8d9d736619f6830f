//! Account Entity
//!
//! A registered user account together with its lockout bookkeeping.
//! The lockout rules are pure functions of stored state plus a
//! caller-supplied `now`; nothing here reads the wall clock, so the
//! policy is independent of clock skew in the caller.

use chrono::{DateTime, Duration, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;

use crate::domain::value_object::email::Email;

/// Lockout state derived from stored fields at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Login attempts may proceed
    Active,
    /// Login attempts are rejected until the contained instant
    Locked(DateTime<Utc>),
}

/// Result of recording a failed login attempt
///
/// Returned by the credential store's atomic increment-and-lock operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedAttemptOutcome {
    /// Post-update consecutive failure count (0 right after a lock applies)
    pub failed_attempts: u16,
    /// Whether this attempt triggered a lock
    pub locked: bool,
}

/// User account entity
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
    /// Consecutive failed login attempts since the last success or lock
    pub failed_attempts: u16,
    /// Set while a lockout episode is pending; stale values may linger
    /// until the next successful login clears them
    pub locked_until: Option<DateTime<Utc>>,
}

impl Account {
    /// Consecutive failures that trigger a lockout
    pub const MAX_FAILED_ATTEMPTS: u16 = 5;
    /// Lockout duration in minutes
    pub const LOCKOUT_MINUTES: i64 = 10;

    /// Lockout state at the given instant
    pub fn lock_state(&self, now: DateTime<Utc>) -> LockState {
        match self.locked_until {
            Some(until) if until > now => LockState::Locked(until),
            _ => LockState::Active,
        }
    }

    /// Whether login attempts are rejected at the given instant
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.lock_state(now), LockState::Locked(_))
    }

    /// The instant a lock applied at `now` expires
    pub fn lock_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::minutes(Self::LOCKOUT_MINUTES)
    }

    /// Apply one failed login attempt to this state
    ///
    /// Reaching [`Self::MAX_FAILED_ATTEMPTS`] locks the account until
    /// [`Self::lock_expiry`] and resets the counter to zero; the lock itself
    /// is the signal, and the counter restarts fresh after each episode.
    ///
    /// This is the reference semantics for the store's atomic
    /// increment-and-lock statement; production code goes through the store,
    /// which applies the same transition in a single statement.
    pub fn register_failure(&mut self, now: DateTime<Utc>) -> FailedAttemptOutcome {
        let next = self.failed_attempts.saturating_add(1);
        if next >= Self::MAX_FAILED_ATTEMPTS {
            self.failed_attempts = 0;
            self.locked_until = Some(Self::lock_expiry(now));
            FailedAttemptOutcome {
                failed_attempts: 0,
                locked: true,
            }
        } else {
            self.failed_attempts = next;
            FailedAttemptOutcome {
                failed_attempts: next,
                locked: false,
            }
        }
    }

    /// Apply a successful login to this state
    ///
    /// Resets the failure counter and clears any stale lock.
    pub fn register_success(&mut self) {
        self.failed_attempts = 0;
        self.locked_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        use platform::password::ClearTextPassword;

        let password_hash = ClearTextPassword::new("secret1".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        Account {
            account_id: AccountId::from_i64(1),
            email: Email::new("a@test.com").unwrap(),
            password_hash,
            created_at: Utc::now(),
            failed_attempts: 0,
            locked_until: None,
        }
    }

    #[test]
    fn fresh_account_is_active() {
        let acc = account();
        let now = Utc::now();
        assert_eq!(acc.lock_state(now), LockState::Active);
        assert!(!acc.is_locked_at(now));
    }

    #[test]
    fn failures_below_threshold_only_count() {
        let mut acc = account();
        let now = Utc::now();

        for expected in 1..Account::MAX_FAILED_ATTEMPTS {
            let outcome = acc.register_failure(now);
            assert_eq!(outcome.failed_attempts, expected);
            assert!(!outcome.locked);
            assert!(!acc.is_locked_at(now));
        }
    }

    #[test]
    fn fifth_failure_locks_and_resets_counter() {
        let mut acc = account();
        let now = Utc::now();

        for _ in 0..4 {
            acc.register_failure(now);
        }
        let outcome = acc.register_failure(now);

        assert!(outcome.locked);
        assert_eq!(outcome.failed_attempts, 0);
        assert_eq!(acc.failed_attempts, 0);
        assert_eq!(
            acc.lock_state(now),
            LockState::Locked(Account::lock_expiry(now))
        );
    }

    #[test]
    fn lock_expires_after_duration() {
        let mut acc = account();
        let now = Utc::now();
        for _ in 0..5 {
            acc.register_failure(now);
        }

        assert!(acc.is_locked_at(now));
        let just_before = Account::lock_expiry(now) - Duration::seconds(1);
        assert!(acc.is_locked_at(just_before));
        let after = Account::lock_expiry(now) + Duration::seconds(1);
        assert!(!acc.is_locked_at(after));
    }

    #[test]
    fn stale_lock_does_not_block_but_lingers_until_success() {
        let mut acc = account();
        let locked_at = Utc::now() - Duration::minutes(30);
        for _ in 0..5 {
            acc.register_failure(locked_at);
        }

        let now = Utc::now();
        assert!(!acc.is_locked_at(now));
        assert!(acc.locked_until.is_some());

        acc.register_success();
        assert!(acc.locked_until.is_none());
        assert_eq!(acc.failed_attempts, 0);
    }

    #[test]
    fn success_resets_counter() {
        let mut acc = account();
        let now = Utc::now();
        acc.register_failure(now);
        acc.register_failure(now);

        acc.register_success();
        assert_eq!(acc.failed_attempts, 0);
    }

    #[test]
    fn counter_restarts_after_lock_episode() {
        let mut acc = account();
        let locked_at = Utc::now() - Duration::minutes(30);
        for _ in 0..5 {
            acc.register_failure(locked_at);
        }

        // Next episode counts from zero again
        let now = Utc::now();
        let outcome = acc.register_failure(now);
        assert_eq!(outcome.failed_attempts, 1);
        assert!(!outcome.locked);
    }
}
