//! Repository Traits
//!
//! Interfaces for wish-list persistence. Implementation is in the
//! infrastructure layer.

use kernel::id::{AccountId, WishListId, WishNoteId};

use crate::domain::entities::{
    NewWishList, NewWishNote, WishList, WishListUpdate, WishNote, WishNoteUpdate,
};
use crate::error::WishResult;

/// Wish list repository trait
#[trait_variant::make(WishRepository: Send)]
pub trait LocalWishRepository {
    /// Create a wish list, returning its issued id
    async fn create(&self, wish: &NewWishList) -> WishResult<WishListId>;

    /// Look up a wish list by id
    async fn find_by_id(&self, wish_id: WishListId) -> WishResult<Option<WishList>>;

    /// List an account's wish lists, optionally capped by price
    async fn list_by_owner(
        &self,
        owner_id: AccountId,
        max_price_cents: Option<i64>,
    ) -> WishResult<Vec<WishList>>;

    /// Update a wish list; returns false if the row is gone
    async fn update(&self, wish_id: WishListId, update: &WishListUpdate) -> WishResult<bool>;

    /// Delete a wish list (notes cascade); returns false if the row is gone
    async fn delete(&self, wish_id: WishListId) -> WishResult<bool>;
}

/// Wish note repository trait
#[trait_variant::make(NoteRepository: Send)]
pub trait LocalNoteRepository {
    /// Attach a note to a wish list
    async fn create(&self, wish_id: WishListId, note: &NewWishNote) -> WishResult<WishNoteId>;

    /// List the notes of a wish list
    async fn list_by_wish(&self, wish_id: WishListId) -> WishResult<Vec<WishNote>>;

    /// Update a note; returns false if the row is gone
    async fn update(&self, wish_id: WishListId, update: &WishNoteUpdate) -> WishResult<bool>;

    /// Delete a note of the given wish list
    async fn delete(&self, wish_id: WishListId, note_id: WishNoteId) -> WishResult<()>;
}
