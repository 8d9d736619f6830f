//! Wish List Use Case
//!
//! CRUD over wish lists and their notes. Every mutating or detail-reading
//! operation resolves the wish first and checks ownership before touching
//! anything else; the authorization decision is made here, not in handlers.

use std::sync::Arc;

use kernel::id::{AccountId, WishListId, WishNoteId};

use crate::domain::entities::{
    NewWishList, NewWishNote, WishList, WishListDetailed, WishListUpdate, WishNoteUpdate,
};
use crate::domain::repository::{NoteRepository, WishRepository};
use crate::error::{WishError, WishResult};

/// Wish list use case
pub struct WishListUseCase<W, N>
where
    W: WishRepository,
    N: NoteRepository,
{
    wishes: Arc<W>,
    notes: Arc<N>,
}

impl<W, N> WishListUseCase<W, N>
where
    W: WishRepository,
    N: NoteRepository,
{
    pub fn new(wishes: Arc<W>, notes: Arc<N>) -> Self {
        Self { wishes, notes }
    }

    /// List the caller's wishes, optionally capped by price
    pub async fn list(
        &self,
        owner_id: AccountId,
        max_price_cents: Option<i64>,
    ) -> WishResult<Vec<WishList>> {
        self.wishes.list_by_owner(owner_id, max_price_cents).await
    }

    /// Fetch one wish with its notes
    pub async fn get_detailed(
        &self,
        wish_id: WishListId,
        caller: AccountId,
    ) -> WishResult<WishListDetailed> {
        let wish = self.owned_wish(wish_id, caller).await?;
        let notes = self.notes.list_by_wish(wish_id).await?;
        Ok(WishListDetailed { wish, notes })
    }

    /// Create a wish with its initial notes
    pub async fn create(
        &self,
        mut wish: NewWishList,
        mut notes: Vec<NewWishNote>,
    ) -> WishResult<WishListId> {
        wish.title = wish.title.trim().to_string();
        wish.description = wish.description.trim().to_string();

        if wish.title.is_empty() {
            return Err(WishError::Validation("wish title must be filled".into()));
        }
        if wish.estimate_price_cents < 0 {
            return Err(WishError::Validation(
                "estimate price must be zero or greater".into(),
            ));
        }
        for note in &mut notes {
            trim_note(note)?;
        }

        let wish_id = self.wishes.create(&wish).await?;
        for note in &notes {
            self.notes.create(wish_id, note).await?;
        }

        tracing::info!(wish_id = %wish_id, owner_id = %wish.owner_id, "Wish list created");

        Ok(wish_id)
    }

    /// Update a wish
    pub async fn update(
        &self,
        wish_id: WishListId,
        mut update: WishListUpdate,
        caller: AccountId,
    ) -> WishResult<bool> {
        self.owned_wish(wish_id, caller).await?;

        update.title = update.title.trim().to_string();
        update.description = update.description.trim().to_string();

        if update.title.is_empty() {
            return Err(WishError::Validation("title must be filled".into()));
        }
        if update.estimate_price_cents < 0 {
            return Err(WishError::Validation(
                "estimate price must be zero or greater".into(),
            ));
        }

        self.wishes.update(wish_id, &update).await
    }

    /// Delete a wish and its notes
    pub async fn delete(&self, wish_id: WishListId, caller: AccountId) -> WishResult<bool> {
        self.owned_wish(wish_id, caller).await?;
        self.wishes.delete(wish_id).await
    }

    /// Attach notes to an existing wish
    pub async fn add_notes(
        &self,
        wish_id: WishListId,
        mut notes: Vec<NewWishNote>,
        caller: AccountId,
    ) -> WishResult<bool> {
        self.owned_wish(wish_id, caller).await?;

        for note in &mut notes {
            trim_note(note)?;
        }
        for note in &notes {
            self.notes.create(wish_id, note).await?;
        }
        Ok(true)
    }

    /// Update notes of an existing wish
    pub async fn update_notes(
        &self,
        wish_id: WishListId,
        mut notes: Vec<WishNoteUpdate>,
        caller: AccountId,
    ) -> WishResult<bool> {
        self.owned_wish(wish_id, caller).await?;

        for note in &mut notes {
            note.title = note.title.trim().to_string();
            note.description = note.description.trim().to_string();
            if note.title.is_empty() {
                return Err(WishError::Validation("title must be filled".into()));
            }
        }
        for note in &notes {
            self.notes.update(wish_id, note).await?;
        }
        Ok(true)
    }

    /// Delete notes of an existing wish by id
    pub async fn delete_notes(
        &self,
        wish_id: WishListId,
        note_ids: Vec<WishNoteId>,
        caller: AccountId,
    ) -> WishResult<bool> {
        self.owned_wish(wish_id, caller).await?;

        for note_id in note_ids {
            self.notes.delete(wish_id, note_id).await?;
        }
        Ok(true)
    }

    /// Resolve a wish and enforce ownership
    async fn owned_wish(&self, wish_id: WishListId, caller: AccountId) -> WishResult<WishList> {
        let wish = self
            .wishes
            .find_by_id(wish_id)
            .await?
            .ok_or(WishError::NotFound)?;

        if !wish.is_owned_by(caller) {
            return Err(WishError::AccessDenied);
        }

        Ok(wish)
    }
}

fn trim_note(note: &mut NewWishNote) -> WishResult<()> {
    note.title = note.title.trim().to_string();
    note.description = note.description.trim().to_string();
    if note.title.is_empty() {
        return Err(WishError::Validation("note title must be filled".into()));
    }
    Ok(())
}
