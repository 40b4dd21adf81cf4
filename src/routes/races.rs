use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::warn;

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::race::Race,
    routes::views::{DayQuery, TripView, FETCH_FAILED_NOTICE},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(races_list))
        .route("/:id", get(race_detail))
        .route("/:id/trips", get(race_trips))
}

async fn races_list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Race>>, AppError> {
    let races = state.api.races(current.token()).await?;
    Ok(Json(races))
}

async fn race_detail(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(race_id): Path<i64>,
) -> Result<Json<Race>, AppError> {
    let race = state.api.race(race_id, current.token()).await?;
    Ok(Json(race))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RaceTrips {
    race_id: i64,
    trips: Vec<TripView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
}

/// Open to anonymous visitors; badges only show up for a signed-in user.
async fn race_trips(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(race_id): Path<i64>,
    Query(query): Query<DayQuery>,
) -> Json<RaceTrips> {
    let (trips, notice) = match state.api.race_trips(race_id, current.token()).await {
        Ok(trips) => (trips, None),
        Err(err) => {
            warn!(race_id, "could not load race trips: {err}");
            (Vec::new(), Some(FETCH_FAILED_NOTICE.to_string()))
        }
    };
    let day = query.reference_day();
    let user = current.user_id();
    Json(RaceTrips {
        race_id,
        trips: trips
            .iter()
            .map(|trip| TripView::new(trip, user, day))
            .collect(),
        notice,
    })
}
