//! PostgreSQL Repository Implementations

use kernel::id::{AccountId, WishListId, WishNoteId};
use sqlx::PgPool;

use crate::domain::entities::{
    NewWishList, NewWishNote, WishList, WishListUpdate, WishNote, WishNoteUpdate,
};
use crate::domain::repository::{NoteRepository, WishRepository};
use crate::error::WishResult;

/// PostgreSQL-backed wish list store
#[derive(Clone)]
pub struct PgWishRepository {
    pool: PgPool,
}

impl PgWishRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl WishRepository for PgWishRepository {
    async fn create(&self, wish: &NewWishList) -> WishResult<WishListId> {
        let (wish_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO wish_lists (user_id, title, description, estimate_price_cents)
            VALUES ($1, $2, $3, $4)
            RETURNING wish_list_id
            "#,
        )
        .bind(wish.owner_id.as_i64())
        .bind(&wish.title)
        .bind(&wish.description)
        .bind(wish.estimate_price_cents)
        .fetch_one(&self.pool)
        .await?;

        Ok(WishListId::from_i64(wish_id))
    }

    async fn find_by_id(&self, wish_id: WishListId) -> WishResult<Option<WishList>> {
        let row = sqlx::query_as::<_, WishRow>(
            r#"
            SELECT
                wish_list_id,
                user_id,
                title,
                description,
                estimate_price_cents,
                link
            FROM wish_lists
            WHERE wish_list_id = $1
            "#,
        )
        .bind(wish_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(WishRow::into_wish))
    }

    async fn list_by_owner(
        &self,
        owner_id: AccountId,
        max_price_cents: Option<i64>,
    ) -> WishResult<Vec<WishList>> {
        let rows = sqlx::query_as::<_, WishRow>(
            r#"
            SELECT
                wish_list_id,
                user_id,
                title,
                description,
                estimate_price_cents,
                link
            FROM wish_lists
            WHERE user_id = $1
              AND ($2::BIGINT IS NULL OR estimate_price_cents <= $2)
            ORDER BY wish_list_id
            "#,
        )
        .bind(owner_id.as_i64())
        .bind(max_price_cents)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WishRow::into_wish).collect())
    }

    async fn update(&self, wish_id: WishListId, update: &WishListUpdate) -> WishResult<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE wish_lists
            SET title = $2,
                description = $3,
                estimate_price_cents = $4,
                link = $5
            WHERE wish_list_id = $1
            "#,
        )
        .bind(wish_id.as_i64())
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.estimate_price_cents)
        .bind(&update.link)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn delete(&self, wish_id: WishListId) -> WishResult<bool> {
        let affected = sqlx::query("DELETE FROM wish_lists WHERE wish_list_id = $1")
            .bind(wish_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

impl NoteRepository for PgWishRepository {
    async fn create(&self, wish_id: WishListId, note: &NewWishNote) -> WishResult<WishNoteId> {
        let (note_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO wish_notes (wish_list_id, title, description, received)
            VALUES ($1, $2, $3, $4)
            RETURNING wish_note_id
            "#,
        )
        .bind(wish_id.as_i64())
        .bind(&note.title)
        .bind(&note.description)
        .bind(note.received)
        .fetch_one(&self.pool)
        .await?;

        Ok(WishNoteId::from_i64(note_id))
    }

    async fn list_by_wish(&self, wish_id: WishListId) -> WishResult<Vec<WishNote>> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT
                wish_note_id,
                wish_list_id,
                title,
                description,
                received
            FROM wish_notes
            WHERE wish_list_id = $1
            ORDER BY wish_note_id
            "#,
        )
        .bind(wish_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(NoteRow::into_note).collect())
    }

    async fn update(&self, wish_id: WishListId, update: &WishNoteUpdate) -> WishResult<bool> {
        // Scoped to the wish so a note id from another list cannot be reached
        let affected = sqlx::query(
            r#"
            UPDATE wish_notes
            SET title = $3,
                description = $4,
                received = $5
            WHERE wish_note_id = $1 AND wish_list_id = $2
            "#,
        )
        .bind(update.wish_note_id.as_i64())
        .bind(wish_id.as_i64())
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.received)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn delete(&self, wish_id: WishListId, note_id: WishNoteId) -> WishResult<()> {
        sqlx::query("DELETE FROM wish_notes WHERE wish_note_id = $1 AND wish_list_id = $2")
            .bind(note_id.as_i64())
            .bind(wish_id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct WishRow {
    wish_list_id: i64,
    user_id: i64,
    title: String,
    description: String,
    estimate_price_cents: i64,
    link: Option<String>,
}

impl WishRow {
    fn into_wish(self) -> WishList {
        WishList {
            wish_list_id: WishListId::from_i64(self.wish_list_id),
            owner_id: AccountId::from_i64(self.user_id),
            title: self.title,
            description: self.description,
            estimate_price_cents: self.estimate_price_cents,
            link: self.link,
        }
    }
}

#[derive(sqlx::FromRow)]
struct NoteRow {
    wish_note_id: i64,
    wish_list_id: i64,
    title: String,
    description: String,
    received: bool,
}

impl NoteRow {
    fn into_note(self) -> WishNote {
        WishNote {
            wish_note_id: WishNoteId::from_i64(self.wish_note_id),
            wish_list_id: WishListId::from_i64(self.wish_list_id),
            title: self.title,
            description: self.description,
            received: self.received,
        }
    }
}
