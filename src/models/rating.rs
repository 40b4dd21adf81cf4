use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the trip the rated person travelled on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RatingType {
    #[serde(rename = "DRIVER")]
    Driver,
    #[serde(rename = "PASSENGER")]
    Passenger,
}

impl RatingType {
    pub const ALL: [RatingType; 2] = [RatingType::Driver, RatingType::Passenger];

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingType::Driver => "DRIVER",
            RatingType::Passenger => "PASSENGER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingType::Driver => "Valoración como conductor",
            RatingType::Passenger => "Valoración como pasajero",
        }
    }
}

impl fmt::Display for RatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TripRating {
    pub rater_id: i64,
    pub rated_id: i64,
    pub rating: u8,
    #[serde(rename = "type")]
    pub kind: RatingType,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRating {
    pub trip_id: i64,
    #[serde(default)]
    pub rater_id: i64,
    pub rated_id: i64,
    #[serde(rename = "type")]
    pub kind: RatingType,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl NewRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Checks the score range and trims the comment in place.
    pub fn validate(&mut self) -> Result<(), String> {
        if !(Self::MIN..=Self::MAX).contains(&self.rating) {
            return Err(format!(
                "rating must be between {} and {}",
                Self::MIN,
                Self::MAX
            ));
        }
        if self.rater_id == self.rated_id {
            return Err("you cannot rate yourself".into());
        }
        self.comment = self.comment.take().and_then(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        });
        Ok(())
    }
}
