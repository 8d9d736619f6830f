//! Domain Layer
//!
//! Entities and repository traits.

pub mod entities;
pub mod repository;

pub use entities::{
    NewWishList, NewWishNote, WishList, WishListDetailed, WishListUpdate, WishNote, WishNoteUpdate,
};
pub use repository::{NoteRepository, WishRepository};
