//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::{WishList, WishListDetailed, WishNote};

// ============================================================================
// Responses
// ============================================================================

/// One wish list in API shape
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishResponse {
    pub wish_list_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub estimate_price_cents: i64,
    pub link: Option<String>,
}

impl From<WishList> for WishResponse {
    fn from(wish: WishList) -> Self {
        Self {
            wish_list_id: wish.wish_list_id.as_i64(),
            user_id: wish.owner_id.as_i64(),
            title: wish.title,
            description: wish.description,
            estimate_price_cents: wish.estimate_price_cents,
            link: wish.link,
        }
    }
}

/// One note in API shape
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub wish_note_id: i64,
    pub wish_list_id: i64,
    pub title: String,
    pub description: String,
    pub received: bool,
}

impl From<WishNote> for NoteResponse {
    fn from(note: WishNote) -> Self {
        Self {
            wish_note_id: note.wish_note_id.as_i64(),
            wish_list_id: note.wish_list_id.as_i64(),
            title: note.title,
            description: note.description,
            received: note.received,
        }
    }
}

/// Wish list with notes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishDetailedResponse {
    #[serde(flatten)]
    pub wish: WishResponse,
    pub notes: Vec<NoteResponse>,
}

impl From<WishListDetailed> for WishDetailedResponse {
    fn from(detailed: WishListDetailed) -> Self {
        Self {
            wish: detailed.wish.into(),
            notes: detailed.notes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response for POST /api/wishes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishResponse {
    pub wish_list_id: i64,
}

/// Generic mutation acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ============================================================================
// Requests
// ============================================================================

/// Query parameters for GET /api/wishes
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWishesParams {
    /// Only wishes at or below this price
    pub max_price_cents: Option<i64>,
}

/// Wish fields of the create request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishInfoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimate_price_cents: i64,
}

/// Request for POST /api/wishes
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishRequest {
    pub info: WishInfoRequest,
    #[serde(default)]
    pub notes: Vec<NoteCreateRequest>,
}

/// Request for PUT /api/wishes/{id}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWishRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimate_price_cents: i64,
    pub link: Option<String>,
}

/// One note in a create batch
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCreateRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub received: bool,
}

/// Request for POST /api/wishes/{id}/notes
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesPostRequest {
    pub notes: Vec<NoteCreateRequest>,
}

/// One note in an update batch
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdateRequest {
    pub wish_note_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub received: bool,
}

/// Request for PUT /api/wishes/{id}/notes
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesPutRequest {
    pub notes: Vec<NoteUpdateRequest>,
}

/// Query parameters for DELETE /api/wishes/{id}/notes (?ids=1&ids=2)
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteNotesParams {
    #[serde(default)]
    pub ids: Vec<i64>,
}
