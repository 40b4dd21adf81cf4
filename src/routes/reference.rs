use std::collections::BTreeMap;

use axum::{extract::Path, routing::get, Json, Router};

use crate::{
    error::AppError,
    reference::{self, LabelEntry, Province},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/provinces", get(provinces))
        .route("/provinces/:code/cities", get(cities))
        .route("/labels", get(labels))
}

async fn provinces() -> Json<&'static [Province]> {
    Json(reference::provinces())
}

async fn cities(Path(code): Path<String>) -> Result<Json<&'static [&'static str]>, AppError> {
    reference::cities_of(&code)
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn labels() -> Json<BTreeMap<&'static str, Vec<LabelEntry>>> {
    Json(reference::labels())
}
