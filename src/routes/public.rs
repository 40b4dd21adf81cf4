use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::session::{SessionRecord, SessionUser},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(client_config))
        .route(
            "/session",
            get(session_show).post(session_create).delete(session_delete),
        )
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Settings the application shell needs before anyone signs in.
async fn client_config(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "apiUrl": state.config.api_base_url.as_str(),
        "oauthClientId": state.config.oauth_client_id,
    }))
}

async fn session_show(current: CurrentUser) -> Result<Json<SessionUser>, AppError> {
    let user = current.require_user()?;
    Ok(Json(user.clone()))
}

async fn session_create(
    State(state): State<AppState>,
    Json(record): Json<SessionRecord>,
) -> Result<(StatusCode, Json<SessionUser>), AppError> {
    let user = state.session.sign_in(record).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn session_delete(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.session.sign_out().await?;
    Ok(StatusCode::NO_CONTENT)
}
