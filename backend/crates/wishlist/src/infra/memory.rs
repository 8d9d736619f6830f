//! In-Memory Repository Implementation
//!
//! HashMap-backed wish store for tests and local development.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use kernel::id::{AccountId, WishListId, WishNoteId};

use crate::domain::entities::{
    NewWishList, NewWishNote, WishList, WishListUpdate, WishNote, WishNoteUpdate,
};
use crate::domain::repository::{NoteRepository, WishRepository};
use crate::error::WishResult;

#[derive(Default)]
struct State {
    wishes: HashMap<i64, WishList>,
    notes: HashMap<i64, WishNote>,
    next_wish_id: i64,
    next_note_id: i64,
}

/// In-memory wish list store
#[derive(Clone, Default)]
pub struct InMemoryWishRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryWishRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl WishRepository for InMemoryWishRepository {
    async fn create(&self, wish: &NewWishList) -> WishResult<WishListId> {
        let mut state = self.lock();
        state.next_wish_id += 1;
        let wish_id = WishListId::from_i64(state.next_wish_id);

        state.wishes.insert(
            wish_id.as_i64(),
            WishList {
                wish_list_id: wish_id,
                owner_id: wish.owner_id,
                title: wish.title.clone(),
                description: wish.description.clone(),
                estimate_price_cents: wish.estimate_price_cents,
                link: None,
            },
        );

        Ok(wish_id)
    }

    async fn find_by_id(&self, wish_id: WishListId) -> WishResult<Option<WishList>> {
        Ok(self.lock().wishes.get(&wish_id.as_i64()).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: AccountId,
        max_price_cents: Option<i64>,
    ) -> WishResult<Vec<WishList>> {
        let state = self.lock();
        let mut wishes: Vec<WishList> = state
            .wishes
            .values()
            .filter(|w| w.owner_id == owner_id)
            .filter(|w| max_price_cents.is_none_or(|max| w.estimate_price_cents <= max))
            .cloned()
            .collect();
        wishes.sort_by_key(|w| w.wish_list_id);
        Ok(wishes)
    }

    async fn update(&self, wish_id: WishListId, update: &WishListUpdate) -> WishResult<bool> {
        let mut state = self.lock();
        match state.wishes.get_mut(&wish_id.as_i64()) {
            Some(wish) => {
                wish.title = update.title.clone();
                wish.description = update.description.clone();
                wish.estimate_price_cents = update.estimate_price_cents;
                wish.link = update.link.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, wish_id: WishListId) -> WishResult<bool> {
        let mut state = self.lock();
        let existed = state.wishes.remove(&wish_id.as_i64()).is_some();
        state
            .notes
            .retain(|_, note| note.wish_list_id != wish_id);
        Ok(existed)
    }
}

impl NoteRepository for InMemoryWishRepository {
    async fn create(&self, wish_id: WishListId, note: &NewWishNote) -> WishResult<WishNoteId> {
        let mut state = self.lock();
        state.next_note_id += 1;
        let note_id = WishNoteId::from_i64(state.next_note_id);

        state.notes.insert(
            note_id.as_i64(),
            WishNote {
                wish_note_id: note_id,
                wish_list_id: wish_id,
                title: note.title.clone(),
                description: note.description.clone(),
                received: note.received,
            },
        );

        Ok(note_id)
    }

    async fn list_by_wish(&self, wish_id: WishListId) -> WishResult<Vec<WishNote>> {
        let state = self.lock();
        let mut notes: Vec<WishNote> = state
            .notes
            .values()
            .filter(|n| n.wish_list_id == wish_id)
            .cloned()
            .collect();
        notes.sort_by_key(|n| n.wish_note_id);
        Ok(notes)
    }

    async fn update(&self, wish_id: WishListId, update: &WishNoteUpdate) -> WishResult<bool> {
        let mut state = self.lock();
        match state.notes.get_mut(&update.wish_note_id.as_i64()) {
            Some(note) if note.wish_list_id == wish_id => {
                note.title = update.title.clone();
                note.description = update.description.clone();
                note.received = update.received;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, wish_id: WishListId, note_id: WishNoteId) -> WishResult<()> {
        let mut state = self.lock();
        let belongs = state
            .notes
            .get(&note_id.as_i64())
            .is_some_and(|note| note.wish_list_id == wish_id);
        if belongs {
            state.notes.remove(&note_id.as_i64());
        }
        Ok(())
    }
}
