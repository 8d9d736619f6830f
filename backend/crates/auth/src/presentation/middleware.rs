//! Auth Middleware
//!
//! Middleware for requiring a valid bearer token on protected routes.
//! Handlers behind it receive an already-validated [`AuthenticatedUser`]
//! from request extensions; they never re-check credentials themselves.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use kernel::id::AccountId;
use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::repository::AccountRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

/// Identity of the authenticated caller, stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub account_id: AccountId,
}

/// Middleware that requires a valid bearer token
///
/// Rejections: 401 for a missing/invalid/expired token or an unknown
/// subject, 403 when the account is currently locked.
pub async fn require_bearer_auth<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let token = match bearer_token(req.headers()) {
        Some(token) => token,
        None => return Err(AuthError::InvalidToken.into_response()),
    };

    // All verification failures collapse to the same rejection
    let account_id = match state.tokens.verify(token) {
        Some(id) => id,
        None => return Err(AuthError::InvalidToken.into_response()),
    };

    let account = match state.repo.find_by_id(account_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return Err(AuthError::InvalidToken.into_response()),
        Err(e) => return Err(e.into_response()),
    };

    // A lock applied after token issuance still blocks protected requests
    if account.is_locked_at(Utc::now()) {
        return Err(AuthError::AccountLocked.into_response());
    }

    req.extensions_mut().insert(AuthenticatedUser { account_id });

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &header::HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}
