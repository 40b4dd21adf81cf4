//! Trip classification and role visibility.
//!
//! Every tab, badge and rating prompt derives from the functions here. They are
//! pure over `(trips, user, reference_day)`: the caller picks "today" (see
//! [`reference_day`]) and passes the signed-in user, or `None` when there is no
//! session, in which case every role query answers as for a stranger.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;
use std::fmt;

use crate::models::{
    rating::RatingType,
    trip::{PassengerStatus, Trip},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeClass {
    Upcoming,
    Past,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Driver,
    Passenger,
    Unrelated,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Driver => "DRIVER",
            UserRole::Passenger => "PASSENGER",
            UserRole::Unrelated => "UNRELATED",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeState {
    DriverWithPendingApprovals,
    DriverConfirmed,
    PassengerConfirmed,
    PassengerAwaitingApproval,
    None,
}

impl BadgeState {
    pub const ALL: [BadgeState; 5] = [
        BadgeState::DriverWithPendingApprovals,
        BadgeState::DriverConfirmed,
        BadgeState::PassengerConfirmed,
        BadgeState::PassengerAwaitingApproval,
        BadgeState::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeState::DriverWithPendingApprovals => "DRIVER_WITH_PENDING_APPROVALS",
            BadgeState::DriverConfirmed => "DRIVER_CONFIRMED",
            BadgeState::PassengerConfirmed => "PASSENGER_CONFIRMED",
            BadgeState::PassengerAwaitingApproval => "PASSENGER_AWAITING_APPROVAL",
            BadgeState::None => "NONE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BadgeState::DriverWithPendingApprovals => "Conductor · solicitudes pendientes",
            BadgeState::DriverConfirmed => "Conductor",
            BadgeState::PassengerConfirmed => "Pasajero confirmado",
            BadgeState::PassengerAwaitingApproval => "Esperando aprobación",
            BadgeState::None => "",
        }
    }
}

/// Calendar day of `now` in its own timezone. Time of day is discarded.
pub fn reference_day<Tz: TimeZone>(now: DateTime<Tz>) -> NaiveDate {
    now.date_naive()
}

/// A trip departing on `reference_day` itself is still upcoming.
pub fn classify_by_time(trip: &Trip, reference_day: NaiveDate) -> TimeClass {
    if trip.departure_day < reference_day {
        TimeClass::Past
    } else {
        TimeClass::Upcoming
    }
}

/// Driver wins over passenger membership if the data lists both.
pub fn derive_user_role(trip: &Trip, user: Option<i64>) -> UserRole {
    let Some(user_id) = user else {
        return UserRole::Unrelated;
    };
    if trip.driver.id == user_id {
        UserRole::Driver
    } else if trip.link_of(user_id).is_some() {
        UserRole::Passenger
    } else {
        UserRole::Unrelated
    }
}

pub fn derive_passenger_status(trip: &Trip, user: Option<i64>) -> Option<PassengerStatus> {
    match derive_user_role(trip, user) {
        UserRole::Passenger => user
            .and_then(|id| trip.link_of(id))
            .map(|link| link.status),
        UserRole::Driver | UserRole::Unrelated => None,
    }
}

/// Upcoming trips that already have some confirmed passenger.
///
/// The confirmed link does not have to be `user`'s own; `user` is accepted so
/// every selector shares one call shape.
pub fn select_upcoming<'a>(
    trips: &'a [Trip],
    _user: Option<i64>,
    reference_day: NaiveDate,
) -> Vec<&'a Trip> {
    trips
        .iter()
        .filter(|trip| classify_by_time(trip, reference_day) == TimeClass::Upcoming)
        .filter(|trip| trip.has_status(PassengerStatus::Confirmed))
        .collect()
}

pub fn select_past(trips: &[Trip], reference_day: NaiveDate) -> Vec<&Trip> {
    trips
        .iter()
        .filter(|trip| classify_by_time(trip, reference_day) == TimeClass::Past)
        .collect()
}

/// Trips where `user` still waits for the driver's answer, whatever the date.
pub fn select_pending<'a>(
    trips: &'a [Trip],
    user: Option<i64>,
    _reference_day: NaiveDate,
) -> Vec<&'a Trip> {
    let Some(user_id) = user else {
        return Vec::new();
    };
    trips
        .iter()
        .filter(|trip| {
            trip.passengers
                .iter()
                .any(|p| p.passenger_id == user_id && p.status == PassengerStatus::Pending)
        })
        .collect()
}

pub fn count_pending(trips: &[Trip], user: Option<i64>, reference_day: NaiveDate) -> usize {
    select_pending(trips, user, reference_day).len()
}

pub fn derive_role_badge(trip: &Trip, user: Option<i64>) -> BadgeState {
    match derive_user_role(trip, user) {
        UserRole::Driver if trip.has_status(PassengerStatus::Pending) => {
            BadgeState::DriverWithPendingApprovals
        }
        UserRole::Driver => BadgeState::DriverConfirmed,
        UserRole::Passenger => match derive_passenger_status(trip, user) {
            Some(PassengerStatus::Confirmed) => BadgeState::PassengerConfirmed,
            Some(PassengerStatus::Pending) => BadgeState::PassengerAwaitingApproval,
            None => BadgeState::None,
        },
        UserRole::Unrelated => BadgeState::None,
    }
}

fn has_rated(trip: &Trip, user_id: i64) -> bool {
    trip.ratings.iter().any(|r| r.rater_id == user_id)
}

pub fn can_rate(
    trip: &Trip,
    user: Option<i64>,
    user_role: UserRole,
    reference_day: NaiveDate,
) -> bool {
    let Some(user_id) = user else {
        return false;
    };
    if classify_by_time(trip, reference_day) != TimeClass::Past || has_rated(trip, user_id) {
        return false;
    }
    match user_role {
        UserRole::Passenger => trip.driver.id != user_id,
        UserRole::Driver => trip.passengers.iter().any(|p| p.passenger_id != user_id),
        UserRole::Unrelated => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingTarget {
    pub rated_id: i64,
    #[serde(rename = "type")]
    pub kind: RatingType,
    pub name: Option<String>,
}

/// People `user` may still rate on this trip. Passengers rate the driver,
/// drivers rate their passengers; anyone `user` already rated is left out.
pub fn rating_targets(trip: &Trip, user: Option<i64>, user_role: UserRole) -> Vec<RatingTarget> {
    let Some(user_id) = user else {
        return Vec::new();
    };
    let already_rated = |rated_id: i64| {
        trip.ratings
            .iter()
            .any(|r| r.rater_id == user_id && r.rated_id == rated_id)
    };
    match user_role {
        UserRole::Passenger if trip.driver.id != user_id && !already_rated(trip.driver.id) => {
            vec![RatingTarget {
                rated_id: trip.driver.id,
                kind: RatingType::Driver,
                name: trip.driver.name.clone(),
            }]
        }
        UserRole::Driver => trip
            .passengers
            .iter()
            .filter(|p| p.passenger_id != user_id && !already_rated(p.passenger_id))
            .map(|p| RatingTarget {
                rated_id: p.passenger_id,
                kind: RatingType::Passenger,
                name: p.name.clone(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// The tab split of a trip snapshot for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripBuckets<'a> {
    pub upcoming: Vec<&'a Trip>,
    pub past: Vec<&'a Trip>,
    pub pending: Vec<&'a Trip>,
    pub pending_count: usize,
}

pub fn categorize(trips: &[Trip], user: Option<i64>, reference_day: NaiveDate) -> TripBuckets<'_> {
    let pending = select_pending(trips, user, reference_day);
    TripBuckets {
        upcoming: select_upcoming(trips, user, reference_day),
        past: select_past(trips, reference_day),
        pending_count: pending.len(),
        pending,
    }
}
