//! Wishlist Router

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::domain::repository::{NoteRepository, WishRepository};
use crate::infra::postgres::PgWishRepository;
use crate::presentation::handlers::{self, WishAppState};

/// Create the wishlist router with PostgreSQL repository
pub fn wishlist_router(repo: PgWishRepository) -> Router {
    wishlist_router_generic(repo)
}

/// Create a generic wishlist router for any repository implementation
pub fn wishlist_router_generic<R>(repo: R) -> Router
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    let state = WishAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", get(handlers::list_wishes::<R>))
        .route("/", post(handlers::create_wish::<R>))
        .route("/{id}", get(handlers::get_wish::<R>))
        .route("/{id}", put(handlers::update_wish::<R>))
        .route("/{id}", delete(handlers::delete_wish::<R>))
        .route("/{id}/notes", post(handlers::create_notes::<R>))
        .route("/{id}/notes", put(handlers::update_notes::<R>))
        .route("/{id}/notes", delete(handlers::delete_notes::<R>))
        .with_state(state)
}
