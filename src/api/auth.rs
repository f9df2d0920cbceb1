//! Bearer-token authentication for `/api/v1` routes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::error::ApiError;
use super::state::AppState;
use crate::board::AccountService;
use crate::db::{Database, UserSummary};

/// The authenticated principal of a request.
///
/// Rejects with 401 when the `Authorization: Bearer <token>` header is
/// missing or the token is unknown.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserSummary);

impl<D: Database + 'static> FromRequestParts<AppState<D>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<D>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Not authorized, no token".to_string()))?;

        let user = AccountService::new(state.db())
            .authenticate(token)
            .await?;
        Ok(AuthUser(user))
    }
}
