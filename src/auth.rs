use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    error::AppError,
    models::session::SessionUser,
    services::session::SessionProvider,
    state::AppState,
};

/// Whoever the session store says is signed in; `None` for anonymous visitors.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<SessionUser>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.session.current_user()))
    }
}

impl CurrentUser {
    pub fn require_user(&self) -> Result<&SessionUser, AppError> {
        self.0.as_ref().ok_or(AppError::Unauthorized)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().map(|user| user.user_id)
    }

    pub fn token(&self) -> Option<&str> {
        self.0.as_ref().map(|user| user.token.as_str())
    }
}
