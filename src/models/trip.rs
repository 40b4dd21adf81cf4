use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::rating::TripRating;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PassengerStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
}

impl PassengerStatus {
    pub const ALL: [PassengerStatus; 2] = [PassengerStatus::Pending, PassengerStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            PassengerStatus::Pending => "PENDING",
            PassengerStatus::Confirmed => "CONFIRMED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PassengerStatus::Pending => "Pendiente de aprobación",
            PassengerStatus::Confirmed => "Confirmado",
        }
    }
}

impl fmt::Display for PassengerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TripDriver {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PassengerLink {
    pub passenger_id: i64,
    pub status: PassengerStatus,
    #[serde(default)]
    pub name: Option<String>,
}

/// Race as embedded in a trip response; only display fields travel with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TripRace {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TripCar {
    pub brand: String,
    pub model: String,
    pub seats: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub departure_day: NaiveDate,
    pub driver: TripDriver,
    #[serde(default)]
    pub passengers: Vec<PassengerLink>,
    pub race: TripRace,
    #[serde(default)]
    pub car: Option<TripCar>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub available_seats: Option<u32>,
    #[serde(default)]
    pub ratings: Vec<TripRating>,
}

impl Trip {
    pub fn link_of(&self, user_id: i64) -> Option<&PassengerLink> {
        self.passengers.iter().find(|p| p.passenger_id == user_id)
    }

    pub fn has_status(&self, status: PassengerStatus) -> bool {
        self.passengers.iter().any(|p| p.status == status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTripRequest {
    pub trip_id: i64,
    pub passenger_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub race_id: i64,
    #[serde(default)]
    pub driver_id: i64,
    pub departure_day: NaiveDate,
    pub seats: u32,
    #[serde(default)]
    pub car: Option<TripCar>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTrip {
    pub fn validate(&self) -> Result<(), String> {
        if self.race_id <= 0 {
            return Err("a trip needs a race".into());
        }
        if self.seats == 0 {
            return Err("a trip needs at least one free seat".into());
        }
        Ok(())
    }
}

/// Body returned by mutating trip endpoints; only the id is relied upon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripCreated {
    pub id: i64,
}
