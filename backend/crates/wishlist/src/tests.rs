//! Unit tests for the wishlist crate
//!
//! Use-case level tests run against the in-memory store.

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use kernel::id::{AccountId, WishListId, WishNoteId};

    use crate::application::WishListUseCase;
    use crate::domain::entities::{NewWishList, NewWishNote, WishListUpdate, WishNoteUpdate};
    use crate::error::WishError;
    use crate::infra::memory::InMemoryWishRepository;

    const OWNER: AccountId = AccountId::from_i64(1);
    const STRANGER: AccountId = AccountId::from_i64(2);

    fn use_case() -> WishListUseCase<InMemoryWishRepository, InMemoryWishRepository> {
        let repo = Arc::new(InMemoryWishRepository::new());
        WishListUseCase::new(repo.clone(), repo)
    }

    fn new_wish(title: &str, price: i64) -> NewWishList {
        NewWishList {
            owner_id: OWNER,
            title: title.to_string(),
            description: "  trimmed  ".to_string(),
            estimate_price_cents: price,
        }
    }

    fn note(title: &str) -> NewWishNote {
        NewWishNote {
            title: title.to_string(),
            description: String::new(),
            received: false,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_roundtrip() {
        let uc = use_case();

        let wish_id = uc
            .create(new_wish("  bike  ", 25_000), vec![note("color")])
            .await
            .unwrap();

        let detailed = uc.get_detailed(wish_id, OWNER).await.unwrap();
        assert_eq!(detailed.wish.title, "bike");
        assert_eq!(detailed.wish.description, "trimmed");
        assert_eq!(detailed.wish.estimate_price_cents, 25_000);
        assert_eq!(detailed.notes.len(), 1);
        assert_eq!(detailed.notes[0].title, "color");
    }

    #[tokio::test]
    async fn create_validates_input() {
        let uc = use_case();

        let empty_title = uc.create(new_wish("   ", 0), vec![]).await;
        assert!(matches!(empty_title, Err(WishError::Validation(_))));

        let negative_price = uc.create(new_wish("bike", -1), vec![]).await;
        assert!(matches!(negative_price, Err(WishError::Validation(_))));

        let empty_note = uc.create(new_wish("bike", 0), vec![note("  ")]).await;
        assert!(matches!(empty_note, Err(WishError::Validation(_))));
    }

    #[tokio::test]
    async fn unknown_wish_is_not_found() {
        let uc = use_case();
        let result = uc.get_detailed(WishListId::from_i64(999), OWNER).await;
        assert!(matches!(result, Err(WishError::NotFound)));
    }

    #[tokio::test]
    async fn non_owner_is_rejected_on_every_operation() {
        let uc = use_case();
        let wish_id = uc.create(new_wish("bike", 0), vec![]).await.unwrap();

        let get = uc.get_detailed(wish_id, STRANGER).await;
        assert!(matches!(get, Err(WishError::AccessDenied)));

        let update = uc
            .update(
                wish_id,
                WishListUpdate {
                    title: "hijacked".to_string(),
                    description: String::new(),
                    estimate_price_cents: 0,
                    link: None,
                },
                STRANGER,
            )
            .await;
        assert!(matches!(update, Err(WishError::AccessDenied)));

        let delete = uc.delete(wish_id, STRANGER).await;
        assert!(matches!(delete, Err(WishError::AccessDenied)));

        let add_notes = uc.add_notes(wish_id, vec![note("x")], STRANGER).await;
        assert!(matches!(add_notes, Err(WishError::AccessDenied)));

        // The wish is untouched
        let detailed = uc.get_detailed(wish_id, OWNER).await.unwrap();
        assert_eq!(detailed.wish.title, "bike");
    }

    #[tokio::test]
    async fn update_and_delete_roundtrip() {
        let uc = use_case();
        let wish_id = uc.create(new_wish("bike", 100), vec![]).await.unwrap();

        let updated = uc
            .update(
                wish_id,
                WishListUpdate {
                    title: "e-bike".to_string(),
                    description: "with battery".to_string(),
                    estimate_price_cents: 200_000,
                    link: Some("https://example.com/ebike".to_string()),
                },
                OWNER,
            )
            .await
            .unwrap();
        assert!(updated);

        let detailed = uc.get_detailed(wish_id, OWNER).await.unwrap();
        assert_eq!(detailed.wish.title, "e-bike");
        assert_eq!(detailed.wish.link.as_deref(), Some("https://example.com/ebike"));

        assert!(uc.delete(wish_id, OWNER).await.unwrap());
        let gone = uc.get_detailed(wish_id, OWNER).await;
        assert!(matches!(gone, Err(WishError::NotFound)));
    }

    #[tokio::test]
    async fn note_batches_are_scoped_to_their_wish() {
        let uc = use_case();
        let first = uc.create(new_wish("bike", 0), vec![note("a")]).await.unwrap();
        let second = uc.create(new_wish("desk", 0), vec![note("b")]).await.unwrap();

        let first_note_id = uc.get_detailed(first, OWNER).await.unwrap().notes[0].wish_note_id;

        // Updating the first wish's note through the second wish id is a no-op
        uc.update_notes(
            second,
            vec![WishNoteUpdate {
                wish_note_id: first_note_id,
                title: "stolen".to_string(),
                description: String::new(),
                received: true,
            }],
            OWNER,
        )
        .await
        .unwrap();

        let detailed = uc.get_detailed(first, OWNER).await.unwrap();
        assert_eq!(detailed.notes[0].title, "a");

        // Same scoping for deletes
        uc.delete_notes(second, vec![first_note_id], OWNER).await.unwrap();
        assert_eq!(uc.get_detailed(first, OWNER).await.unwrap().notes.len(), 1);
    }

    #[tokio::test]
    async fn note_lifecycle_on_one_wish() {
        let uc = use_case();
        let wish_id = uc.create(new_wish("bike", 0), vec![]).await.unwrap();

        uc.add_notes(wish_id, vec![note("color"), note("size")], OWNER)
            .await
            .unwrap();
        let notes = uc.get_detailed(wish_id, OWNER).await.unwrap().notes;
        assert_eq!(notes.len(), 2);

        uc.update_notes(
            wish_id,
            vec![WishNoteUpdate {
                wish_note_id: notes[0].wish_note_id,
                title: "colour".to_string(),
                description: "red".to_string(),
                received: true,
            }],
            OWNER,
        )
        .await
        .unwrap();

        let notes = uc.get_detailed(wish_id, OWNER).await.unwrap().notes;
        assert_eq!(notes[0].title, "colour");
        assert!(notes[0].received);

        uc.delete_notes(
            wish_id,
            notes.iter().map(|n| n.wish_note_id).collect::<Vec<WishNoteId>>(),
            OWNER,
        )
        .await
        .unwrap();
        assert!(uc.get_detailed(wish_id, OWNER).await.unwrap().notes.is_empty());
    }

    #[tokio::test]
    async fn list_is_per_owner_and_price_filtered() {
        let repo = Arc::new(InMemoryWishRepository::new());
        let uc = WishListUseCase::new(repo.clone(), repo);

        uc.create(new_wish("cheap", 100), vec![]).await.unwrap();
        uc.create(new_wish("pricey", 100_000), vec![]).await.unwrap();
        uc.create(
            NewWishList {
                owner_id: STRANGER,
                title: "theirs".to_string(),
                description: String::new(),
                estimate_price_cents: 50,
            },
            vec![],
        )
        .await
        .unwrap();

        let all = uc.list(OWNER, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|w| w.owner_id == OWNER));

        let cheap = uc.list(OWNER, Some(1_000)).await.unwrap();
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap[0].title, "cheap");
    }
}
