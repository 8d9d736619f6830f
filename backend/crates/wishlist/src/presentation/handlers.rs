//! HTTP Handlers
//!
//! Every handler receives an already-validated [`AuthenticatedUser`] from
//! the bearer-auth middleware; authorization against the resource happens
//! in the use case.

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum_extra::extract::Query as MultiQuery;
use std::sync::Arc;

use auth::presentation::middleware::AuthenticatedUser;
use kernel::id::{WishListId, WishNoteId};

use crate::application::WishListUseCase;
use crate::domain::entities::{NewWishList, NewWishNote, WishListUpdate, WishNoteUpdate};
use crate::domain::repository::{NoteRepository, WishRepository};
use crate::error::WishResult;
use crate::presentation::dto::{
    CreateWishRequest, CreateWishResponse, DeleteNotesParams, ListWishesParams, NotesPostRequest,
    NotesPutRequest, SuccessResponse, UpdateWishRequest, WishDetailedResponse, WishResponse,
};

/// Shared state for wishlist handlers
#[derive(Clone)]
pub struct WishAppState<R>
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> WishAppState<R>
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    fn use_case(&self) -> WishListUseCase<R, R> {
        WishListUseCase::new(self.repo.clone(), self.repo.clone())
    }
}

/// GET /api/wishes?maxPriceCents=2000
pub async fn list_wishes<R>(
    State(state): State<WishAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<ListWishesParams>,
) -> WishResult<Json<Vec<WishResponse>>>
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    let wishes = state
        .use_case()
        .list(user.account_id, params.max_price_cents)
        .await?;

    Ok(Json(wishes.into_iter().map(Into::into).collect()))
}

/// GET /api/wishes/{id}
pub async fn get_wish<R>(
    State(state): State<WishAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> WishResult<Json<WishDetailedResponse>>
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    let detailed = state
        .use_case()
        .get_detailed(WishListId::from_i64(id), user.account_id)
        .await?;

    Ok(Json(detailed.into()))
}

/// POST /api/wishes
pub async fn create_wish<R>(
    State(state): State<WishAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateWishRequest>,
) -> WishResult<Json<CreateWishResponse>>
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    let wish = NewWishList {
        owner_id: user.account_id,
        title: req.info.title,
        description: req.info.description,
        estimate_price_cents: req.info.estimate_price_cents,
    };
    let notes = req
        .notes
        .into_iter()
        .map(|n| NewWishNote {
            title: n.title,
            description: n.description,
            received: n.received,
        })
        .collect();

    let wish_id = state.use_case().create(wish, notes).await?;

    Ok(Json(CreateWishResponse {
        wish_list_id: wish_id.as_i64(),
    }))
}

/// PUT /api/wishes/{id}
pub async fn update_wish<R>(
    State(state): State<WishAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateWishRequest>,
) -> WishResult<Json<SuccessResponse>>
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    let update = WishListUpdate {
        title: req.title,
        description: req.description,
        estimate_price_cents: req.estimate_price_cents,
        link: req.link,
    };

    let success = state
        .use_case()
        .update(WishListId::from_i64(id), update, user.account_id)
        .await?;

    Ok(Json(SuccessResponse { success }))
}

/// DELETE /api/wishes/{id}
pub async fn delete_wish<R>(
    State(state): State<WishAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> WishResult<Json<SuccessResponse>>
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    let success = state
        .use_case()
        .delete(WishListId::from_i64(id), user.account_id)
        .await?;

    Ok(Json(SuccessResponse { success }))
}

/// POST /api/wishes/{id}/notes
pub async fn create_notes<R>(
    State(state): State<WishAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(req): Json<NotesPostRequest>,
) -> WishResult<Json<SuccessResponse>>
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    let notes = req
        .notes
        .into_iter()
        .map(|n| NewWishNote {
            title: n.title,
            description: n.description,
            received: n.received,
        })
        .collect();

    let success = state
        .use_case()
        .add_notes(WishListId::from_i64(id), notes, user.account_id)
        .await?;

    Ok(Json(SuccessResponse { success }))
}

/// PUT /api/wishes/{id}/notes
pub async fn update_notes<R>(
    State(state): State<WishAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(req): Json<NotesPutRequest>,
) -> WishResult<Json<SuccessResponse>>
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    let notes = req
        .notes
        .into_iter()
        .map(|n| WishNoteUpdate {
            wish_note_id: WishNoteId::from_i64(n.wish_note_id),
            title: n.title,
            description: n.description,
            received: n.received,
        })
        .collect();

    let success = state
        .use_case()
        .update_notes(WishListId::from_i64(id), notes, user.account_id)
        .await?;

    Ok(Json(SuccessResponse { success }))
}

/// DELETE /api/wishes/{id}/notes?ids=1&ids=2
pub async fn delete_notes<R>(
    State(state): State<WishAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    MultiQuery(params): MultiQuery<DeleteNotesParams>,
) -> WishResult<Json<SuccessResponse>>
where
    R: WishRepository + NoteRepository + Clone + Send + Sync + 'static,
{
    let note_ids = params.ids.into_iter().map(WishNoteId::from_i64).collect();

    let success = state
        .use_case()
        .delete_notes(WishListId::from_i64(id), note_ids, user.account_id)
        .await?;

    Ok(Json(SuccessResponse { success }))
}
