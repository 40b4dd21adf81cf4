use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use httpmock::prelude::*;
use runpool::{
    config::AppConfig,
    models::session::SessionRecord,
    routes::create_router,
    services::session::SessionStore,
    state::AppState,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use url::Url;

struct Harness {
    app: Router,
    backend: MockServer,
    _root: TempDir,
}

async fn harness(signed_in_as: Option<i64>) -> Harness {
    harness_with(signed_in_as, None).await
}

async fn harness_with(signed_in_as: Option<i64>, oauth_client_id: Option<&str>) -> Harness {
    let backend = MockServer::start_async().await;
    let root = TempDir::new().expect("temp dir");
    let config = AppConfig {
        api_base_url: Url::parse(&backend.base_url()).expect("mock url"),
        oauth_client_id: oauth_client_id.map(str::to_string),
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        session_file: root.path().join("session.json"),
    };
    let session = SessionStore::new(config.session_file.clone());
    if let Some(user_id) = signed_in_as {
        session
            .sign_in(SessionRecord {
                user_id: Some(user_id),
                token: Some("tok".into()),
                ..SessionRecord::default()
            })
            .await
            .expect("sign in");
    }
    let app = create_router(AppState::new(config, session));
    Harness {
        app,
        backend,
        _root: root,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn trip(id: i64, day: &str, driver: i64, passengers: Value) -> Value {
    json!({
        "id": id,
        "departureDay": day,
        "driver": { "id": driver, "name": "Ana" },
        "passengers": passengers,
        "race": { "id": 5, "name": "Medio Maratón de Getafe" }
    })
}

#[tokio::test]
async fn my_trips_are_split_into_tabs() {
    let h = harness(Some(7)).await;
    h.backend
        .mock_async(|when, then| {
            when.method(GET).path("/trips/passenger/7");
            then.status(200).json_body(json!([
                trip(1, "2024-01-12", 42, json!([{ "passengerId": 7, "status": "CONFIRMED" }])),
                trip(2, "2024-01-09", 42, json!([{ "passengerId": 7, "status": "CONFIRMED" }])),
                trip(3, "2023-12-01", 42, json!([{ "passengerId": 7, "status": "PENDING" }])),
            ]));
        })
        .await;

    let (status, body) = send(&h.app, get("/me/trips?on=2024-01-10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upcoming"].as_array().unwrap().len(), 1);
    assert_eq!(body["upcoming"][0]["id"], 1);
    assert_eq!(body["upcoming"][0]["badge"], "PASSENGER_CONFIRMED");
    assert_eq!(body["past"].as_array().unwrap().len(), 2);
    assert_eq!(body["past"][0]["canRate"], true);
    assert_eq!(body["pending"][0]["id"], 3);
    assert_eq!(body["pendingCount"], 1);
    assert!(body.get("notice").is_none());
}

#[tokio::test]
async fn backend_failure_yields_empty_tabs_with_notice() {
    let h = harness(Some(7)).await;
    h.backend
        .mock_async(|when, then| {
            when.method(GET).path("/trips/passenger/7");
            then.status(500);
        })
        .await;

    let (status, body) = send(&h.app, get("/me/trips")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pendingCount"], 0);
    assert!(body["upcoming"].as_array().unwrap().is_empty());
    assert!(body["notice"].is_string());

    let (status, body) = send(&h.app, get("/me/trips/pending-count")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn my_trips_require_a_session() {
    let h = harness(None).await;
    let (status, _) = send(&h.app, get("/me/trips")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn driver_sees_pending_approvals_on_detail() {
    let h = harness(Some(42)).await;
    h.backend
        .mock_async(|when, then| {
            when.method(GET).path("/trips/1");
            then.status(200).json_body(trip(
                1,
                "2024-01-10",
                42,
                json!([{ "passengerId": 7, "status": "PENDING" }]),
            ));
        })
        .await;

    let (status, body) = send(&h.app, get("/me/trips/1?on=2024-01-10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "DRIVER");
    assert_eq!(body["badge"], "DRIVER_WITH_PENDING_APPROVALS");
    assert_eq!(body["timeClass"], "UPCOMING");
    assert_eq!(body["canRate"], false);
    assert!(body["ratingTargets"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_trip_is_not_found() {
    let h = harness(Some(7)).await;
    h.backend
        .mock_async(|when, then| {
            when.method(GET).path("/trips/99");
            then.status(404);
        })
        .await;

    let (status, _) = send(&h.app, get("/me/trips/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rating_is_forwarded_for_past_trip() {
    let h = harness(Some(7)).await;
    h.backend
        .mock_async(|when, then| {
            when.method(GET).path("/trips/1");
            then.status(200).json_body(trip(
                1,
                "2024-01-01",
                42,
                json!([{ "passengerId": 7, "status": "CONFIRMED" }]),
            ));
        })
        .await;
    let rating = h
        .backend
        .mock_async(|when, then| {
            when.method(POST)
                .path("/trip-ratings")
                .json_body(json!({
                    "tripId": 1,
                    "raterId": 7,
                    "ratedId": 42,
                    "type": "DRIVER",
                    "rating": 4
                }));
            then.status(201);
        })
        .await;

    let (status, _) = send(
        &h.app,
        post_json(
            "/me/ratings?on=2024-01-10",
            json!({ "tripId": 1, "ratedId": 42, "type": "DRIVER", "rating": 4 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    rating.assert_async().await;
}

#[tokio::test]
async fn rating_out_of_range_is_rejected() {
    let h = harness(Some(7)).await;
    let (status, body) = send(
        &h.app,
        post_json(
            "/me/ratings",
            json!({ "tripId": 1, "ratedId": 42, "type": "DRIVER", "rating": 9 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("between"));
}

#[tokio::test]
async fn upcoming_trip_cannot_be_rated() {
    let h = harness(Some(7)).await;
    h.backend
        .mock_async(|when, then| {
            when.method(GET).path("/trips/1");
            then.status(200).json_body(trip(
                1,
                "2024-02-01",
                42,
                json!([{ "passengerId": 7, "status": "CONFIRMED" }]),
            ));
        })
        .await;

    let (status, _) = send(
        &h.app,
        post_json(
            "/me/ratings?on=2024-01-10",
            json!({ "tripId": 1, "ratedId": 42, "type": "DRIVER", "rating": 4 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_trip_uses_session_user_as_driver() {
    let h = harness(Some(42)).await;
    let created = h
        .backend
        .mock_async(|when, then| {
            when.method(POST)
                .path("/trips")
                .json_body(json!({
                    "raceId": 5,
                    "driverId": 42,
                    "departureDay": "2024-03-17",
                    "seats": 3,
                    "car": null,
                    "description": null
                }));
            then.status(201).json_body(json!({ "id": 77 }));
        })
        .await;

    let (status, body) = send(
        &h.app,
        post_json(
            "/me/trips",
            json!({ "raceId": 5, "departureDay": "2024-03-17", "seats": 3 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 77);
    created.assert_async().await;
}

#[tokio::test]
async fn anonymous_race_trips_have_no_badges() {
    let h = harness(None).await;
    h.backend
        .mock_async(|when, then| {
            when.method(GET).path("/trips").query_param("raceId", "5");
            then.status(200).json_body(json!([trip(
                1,
                "2024-03-17",
                42,
                json!([{ "passengerId": 7, "status": "CONFIRMED" }])
            )]));
        })
        .await;

    let (status, body) = send(&h.app, get("/races/5/trips?on=2024-01-10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trips"][0]["role"], "UNRELATED");
    assert_eq!(body["trips"][0]["badge"], "NONE");
}

#[tokio::test]
async fn session_round_trip() {
    let h = harness(None).await;
    let (status, _) = send(&h.app, get("/session")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &h.app,
        post_json("/session", json!({ "id": 7, "accessToken": "abc", "name": "Iker" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["userId"], 7);
    assert!(body.get("token").is_none());

    let (status, body) = send(&h.app, get("/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Iker");

    let delete = Request::builder()
        .method("DELETE")
        .uri("/session")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&h.app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&h.app, get("/session")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reference_data_is_served() {
    let h = harness(None).await;
    let (status, body) = send(&h.app, get("/reference/provinces/M/cities")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0], "Madrid");

    let (status, _) = send(&h.app, get("/reference/provinces/QQ/cities")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&h.app, get("/reference/labels")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["badge"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn join_sends_session_user_as_passenger() {
    let h = harness(Some(7)).await;
    let joined = h
        .backend
        .mock_async(|when, then| {
            when.method(POST)
                .path("/trips/join")
                .header("authorization", "Bearer tok")
                .json_body(json!({ "tripId": 12, "passengerId": 7 }));
            then.status(200).json_body(json!({ "id": 12 }));
        })
        .await;

    let (status, body) = send(&h.app, post_json("/me/trips/12/join", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 12);
    joined.assert_async().await;
}

#[tokio::test]
async fn join_requires_a_session() {
    let h = harness(None).await;
    let joined = h
        .backend
        .mock_async(|when, then| {
            when.method(POST).path("/trips/join");
            then.status(200).json_body(json!({ "id": 12 }));
        })
        .await;

    let (status, _) = send(&h.app, post_json("/me/trips/12/join", json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    joined.assert_hits_async(0).await;
}

#[tokio::test]
async fn pending_count_is_zero_when_backend_fails() {
    let h = harness(Some(7)).await;
    h.backend
        .mock_async(|when, then| {
            when.method(GET).path("/trips/passenger/7");
            then.status(502).body("bad gateway");
        })
        .await;

    let (status, body) = send(&h.app, get("/me/trips/pending-count")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "count": 0 }));
}

#[tokio::test]
async fn client_config_exposes_api_url_and_oauth_client() {
    let h = harness(None).await;
    let (status, body) = send(&h.app, get("/config")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["apiUrl"]
        .as_str()
        .unwrap()
        .starts_with(&h.backend.base_url()));
    assert!(body["oauthClientId"].is_null());
}

#[tokio::test]
async fn client_config_passes_oauth_client_through() {
    let h = harness_with(None, Some("runpool-web.apps.example")).await;
    let (_, body) = send(&h.app, get("/config")).await;
    assert_eq!(body["oauthClientId"], "runpool-web.apps.example");
}
