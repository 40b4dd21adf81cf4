//! REST client for the RunPool backend.
//!
//! Thin wrapper over [`reqwest`]: one method per endpoint the client relies on,
//! each sending the caller's bearer token when one is given.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::models::{
    race::Race,
    rating::NewRating,
    trip::{JoinTripRequest, NewTrip, Trip, TripCreated},
};

/// Errors from the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network, DNS, TLS or body decoding failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),

    #[error("resource not found")]
    NotFound,

    /// Any other non-2xx answer.
    #[error("RunPool API error ({status}): {body}")]
    Status { status: u16, body: String },
}

#[derive(Clone)]
pub struct RunPoolApi {
    client: reqwest::Client,
    base_url: Url,
}

impl RunPoolApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, mut base_url: Url) -> Self {
        // Url::join drops the last path segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn authorized(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = Self::authorized(self.client.get(url), token).send().await?;
        Self::parse_response(response).await
    }

    /// `GET /trips/passenger/{userId}`: every trip the user drives or asked to join.
    pub async fn passenger_trips(
        &self,
        user_id: i64,
        token: Option<&str>,
    ) -> Result<Vec<Trip>, ApiError> {
        let url = self.endpoint(&format!("trips/passenger/{user_id}"))?;
        self.get_json(url, token).await
    }

    /// `GET /trips?raceId={raceId}`
    pub async fn race_trips(&self, race_id: i64, token: Option<&str>) -> Result<Vec<Trip>, ApiError> {
        let mut url = self.endpoint("trips")?;
        url.query_pairs_mut()
            .append_pair("raceId", &race_id.to_string());
        self.get_json(url, token).await
    }

    pub async fn trip(&self, trip_id: i64, token: Option<&str>) -> Result<Trip, ApiError> {
        let url = self.endpoint(&format!("trips/{trip_id}"))?;
        self.get_json(url, token).await
    }

    pub async fn races(&self, token: Option<&str>) -> Result<Vec<Race>, ApiError> {
        let url = self.endpoint("races")?;
        self.get_json(url, token).await
    }

    pub async fn race(&self, race_id: i64, token: Option<&str>) -> Result<Race, ApiError> {
        let url = self.endpoint(&format!("races/{race_id}"))?;
        self.get_json(url, token).await
    }

    /// `POST /trips/join`. The answer only matters for its trip id.
    pub async fn join_trip(
        &self,
        request: &JoinTripRequest,
        token: &str,
    ) -> Result<TripCreated, ApiError> {
        let url = self.endpoint("trips/join")?;
        debug!(trip_id = request.trip_id, passenger_id = request.passenger_id, "joining trip");
        let response = self.client.post(url).bearer_auth(token).json(request).send().await?;
        Self::parse_response(response).await
    }

    pub async fn create_trip(&self, trip: &NewTrip, token: &str) -> Result<TripCreated, ApiError> {
        let url = self.endpoint("trips")?;
        debug!(race_id = trip.race_id, "creating trip");
        let response = self.client.post(url).bearer_auth(token).json(trip).send().await?;
        Self::parse_response(response).await
    }

    pub async fn submit_rating(&self, rating: &NewRating, token: &str) -> Result<(), ApiError> {
        let url = self.endpoint("trip-ratings")?;
        debug!(trip_id = rating.trip_id, rated_id = rating.rated_id, "submitting rating");
        let response = self.client.post(url).bearer_auth(token).json(rating).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}
