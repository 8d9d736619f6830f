//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::account::{Account, FailedAttemptOutcome};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(
        &self,
        email: &Email,
        password_hash: &HashedPassword,
    ) -> AuthResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING
                user_id,
                email,
                password_hash,
                created_at,
                failed_attempts,
                locked_until
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Unique index backstop for concurrent registrations
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AuthError::EmailTaken
            }
            _ => AuthError::Database(e),
        })?;

        tracing::info!(account_id = row.user_id, "Account row created");

        row.into_account()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                created_at,
                failed_attempts,
                locked_until
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                created_at,
                failed_attempts,
                locked_until
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(account_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn record_failed_attempt(
        &self,
        account_id: AccountId,
        now: DateTime<Utc>,
    ) -> AuthResult<FailedAttemptOutcome> {
        // One atomic increment-and-lock. Row-level serialization in Postgres
        // guarantees two concurrent failures never observe the same
        // pre-increment value, and a burst can lock at most once per episode.
        let row = sqlx::query_as::<_, (i32,)>(
            r#"
            UPDATE users
            SET failed_attempts = CASE
                    WHEN failed_attempts + 1 >= $2 THEN 0
                    ELSE failed_attempts + 1
                END,
                locked_until = CASE
                    WHEN failed_attempts + 1 >= $2 THEN $3
                    ELSE locked_until
                END
            WHERE user_id = $1
            RETURNING failed_attempts
            "#,
        )
        .bind(account_id.as_i64())
        .bind(i32::from(Account::MAX_FAILED_ATTEMPTS))
        .bind(Account::lock_expiry(now))
        .fetch_optional(&self.pool)
        .await?;

        let Some((failed_attempts,)) = row else {
            // Accounts are never deleted by this core; a missing row is a bug
            return Err(AuthError::Internal(format!(
                "account {account_id} vanished during failed-attempt update"
            )));
        };

        // The counter resets to zero in the same statement that applies the
        // lock, so zero after an increment means this attempt locked.
        Ok(FailedAttemptOutcome {
            failed_attempts: failed_attempts as u16,
            locked: failed_attempts == 0,
        })
    }

    async fn reset_lockout(&self, account_id: AccountId) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET failed_attempts = 0,
                locked_until = NULL
            WHERE user_id = $1
            "#,
        )
        .bind(account_id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct AccountRow {
    user_id: i64,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    failed_attempts: i32,
    locked_until: Option<DateTime<Utc>>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("stored hash unreadable: {e}")))?;

        Ok(Account {
            account_id: AccountId::from_i64(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            created_at: self.created_at,
            failed_attempts: self.failed_attempts as u16,
            locked_until: self.locked_until,
        })
    }
}
