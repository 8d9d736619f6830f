//! Wishlist Entities

use kernel::id::{AccountId, WishListId, WishNoteId};

/// A wish list owned by one account
#[derive(Debug, Clone)]
pub struct WishList {
    pub wish_list_id: WishListId,
    pub owner_id: AccountId,
    pub title: String,
    pub description: String,
    pub estimate_price_cents: i64,
    pub link: Option<String>,
}

impl WishList {
    /// Whether the given account owns this wish
    pub fn is_owned_by(&self, account_id: AccountId) -> bool {
        self.owner_id == account_id
    }
}

/// A note attached to a wish list
#[derive(Debug, Clone)]
pub struct WishNote {
    pub wish_note_id: WishNoteId,
    pub wish_list_id: WishListId,
    pub title: String,
    pub description: String,
    pub received: bool,
}

/// A wish list together with its notes
#[derive(Debug, Clone)]
pub struct WishListDetailed {
    pub wish: WishList,
    pub notes: Vec<WishNote>,
}

/// Data for creating a wish list
#[derive(Debug, Clone)]
pub struct NewWishList {
    pub owner_id: AccountId,
    pub title: String,
    pub description: String,
    pub estimate_price_cents: i64,
}

/// Data for updating a wish list
#[derive(Debug, Clone)]
pub struct WishListUpdate {
    pub title: String,
    pub description: String,
    pub estimate_price_cents: i64,
    pub link: Option<String>,
}

/// Data for creating a note
#[derive(Debug, Clone)]
pub struct NewWishNote {
    pub title: String,
    pub description: String,
    pub received: bool,
}

/// Data for updating a note
#[derive(Debug, Clone)]
pub struct WishNoteUpdate {
    pub wish_note_id: WishNoteId,
    pub title: String,
    pub description: String,
    pub received: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_check() {
        let wish = WishList {
            wish_list_id: WishListId::from_i64(1),
            owner_id: AccountId::from_i64(10),
            title: "bike".to_string(),
            description: String::new(),
            estimate_price_cents: 25_000,
            link: None,
        };

        assert!(wish.is_owned_by(AccountId::from_i64(10)));
        assert!(!wish.is_owned_by(AccountId::from_i64(11)));
    }
}
