use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::warn;

use crate::{
    auth::CurrentUser,
    classify,
    error::AppError,
    models::{
        rating::NewRating,
        trip::{JoinTripRequest, NewTrip, Trip, TripCreated},
    },
    routes::views::{DayQuery, TripDetail, TripTabs, TripView, FETCH_FAILED_NOTICE},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", get(my_trips).post(create_trip))
        .route("/trips/pending-count", get(pending_count))
        .route("/trips/:id", get(trip_detail))
        .route("/trips/:id/join", post(join_trip))
        .route("/ratings", post(submit_rating))
}

/// Fetch failures degrade to an empty snapshot plus a notice for the user.
async fn load_my_trips(
    state: &AppState,
    current: &CurrentUser,
) -> Result<(Vec<Trip>, Option<String>), AppError> {
    let user = current.require_user()?;
    match state
        .api
        .passenger_trips(user.user_id, Some(&user.token))
        .await
    {
        Ok(trips) => Ok((trips, None)),
        Err(err) => {
            warn!(user_id = user.user_id, "could not load trips: {err}");
            Ok((Vec::new(), Some(FETCH_FAILED_NOTICE.to_string())))
        }
    }
}

async fn my_trips(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<DayQuery>,
) -> Result<Json<TripTabs>, AppError> {
    let (trips, notice) = load_my_trips(&state, &current).await?;
    let day = query.reference_day();
    let user = current.user_id();
    let buckets = classify::categorize(&trips, user, day);
    Ok(Json(TripTabs::from_buckets(&buckets, user, day, notice)))
}

async fn pending_count(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<DayQuery>,
) -> Result<Json<Value>, AppError> {
    let (trips, _) = load_my_trips(&state, &current).await?;
    let count = classify::count_pending(&trips, current.user_id(), query.reference_day());
    Ok(Json(json!({ "count": count })))
}

async fn trip_detail(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<i64>,
    Query(query): Query<DayQuery>,
) -> Result<Json<TripDetail>, AppError> {
    let user = current.require_user()?;
    let trip = state.api.trip(trip_id, Some(&user.token)).await?;
    let view = TripView::new(&trip, Some(user.user_id), query.reference_day());
    let rating_targets = if view.can_rate {
        classify::rating_targets(&trip, Some(user.user_id), view.role)
    } else {
        Vec::new()
    };
    Ok(Json(TripDetail {
        view,
        rating_targets,
    }))
}

async fn create_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(mut new_trip): Json<NewTrip>,
) -> Result<(StatusCode, Json<TripCreated>), AppError> {
    let user = current.require_user()?;
    new_trip.driver_id = user.user_id;
    new_trip.validate().map_err(AppError::BadRequest)?;
    let created = state.api.create_trip(&new_trip, &user.token).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn join_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<i64>,
) -> Result<Json<TripCreated>, AppError> {
    let user = current.require_user()?;
    let request = JoinTripRequest {
        trip_id,
        passenger_id: user.user_id,
    };
    let joined = state.api.join_trip(&request, &user.token).await?;
    Ok(Json(joined))
}

async fn submit_rating(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<DayQuery>,
    Json(mut rating): Json<NewRating>,
) -> Result<StatusCode, AppError> {
    let user = current.require_user()?;
    rating.rater_id = user.user_id;
    rating.validate().map_err(AppError::BadRequest)?;

    let trip = state.api.trip(rating.trip_id, Some(&user.token)).await?;
    let me = Some(user.user_id);
    let role = classify::derive_user_role(&trip, me);
    if !classify::can_rate(&trip, me, role, query.reference_day()) {
        return Err(AppError::BadRequest("this trip cannot be rated".into()));
    }
    let allowed = classify::rating_targets(&trip, me, role)
        .into_iter()
        .any(|target| target.rated_id == rating.rated_id && target.kind == rating.kind);
    if !allowed {
        return Err(AppError::BadRequest(
            "that traveller cannot be rated on this trip".into(),
        ));
    }

    state.api.submit_rating(&rating, &user.token).await?;
    Ok(StatusCode::CREATED)
}
