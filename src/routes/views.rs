use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    classify::{self, BadgeState, RatingTarget, TimeClass, TripBuckets, UserRole},
    models::trip::{PassengerStatus, Trip},
};

pub const FETCH_FAILED_NOTICE: &str = "No se pudieron cargar los viajes. Inténtalo de nuevo más tarde.";

/// `?on=YYYY-MM-DD` pins the reference day; otherwise today's local date.
#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    pub on: Option<NaiveDate>,
}

impl DayQuery {
    pub fn reference_day(&self) -> NaiveDate {
        self.on
            .unwrap_or_else(|| classify::reference_day(chrono::Local::now()))
    }
}

/// A trip as one user sees it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripView {
    #[serde(flatten)]
    pub trip: Trip,
    pub time_class: TimeClass,
    pub role: UserRole,
    pub passenger_status: Option<PassengerStatus>,
    pub badge: BadgeState,
    pub badge_label: &'static str,
    pub can_rate: bool,
}

impl TripView {
    pub fn new(trip: &Trip, user: Option<i64>, reference_day: NaiveDate) -> Self {
        let role = classify::derive_user_role(trip, user);
        let badge = classify::derive_role_badge(trip, user);
        Self {
            trip: trip.clone(),
            time_class: classify::classify_by_time(trip, reference_day),
            role,
            passenger_status: classify::derive_passenger_status(trip, user),
            badge,
            badge_label: badge.label(),
            can_rate: classify::can_rate(trip, user, role, reference_day),
        }
    }

    pub fn many(trips: &[&Trip], user: Option<i64>, reference_day: NaiveDate) -> Vec<Self> {
        trips
            .iter()
            .map(|trip| Self::new(trip, user, reference_day))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetail {
    #[serde(flatten)]
    pub view: TripView,
    pub rating_targets: Vec<RatingTarget>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripTabs {
    pub upcoming: Vec<TripView>,
    pub past: Vec<TripView>,
    pub pending: Vec<TripView>,
    pub pending_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl TripTabs {
    pub fn from_buckets(
        buckets: &TripBuckets<'_>,
        user: Option<i64>,
        reference_day: NaiveDate,
        notice: Option<String>,
    ) -> Self {
        Self {
            upcoming: TripView::many(&buckets.upcoming, user, reference_day),
            past: TripView::many(&buckets.past, user, reference_day),
            pending: TripView::many(&buckets.pending, user, reference_day),
            pending_count: buckets.pending_count,
            notice,
        }
    }
}
