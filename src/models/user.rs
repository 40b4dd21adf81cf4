use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RunnerLevel {
    #[default]
    #[serde(rename = "BEGINNER")]
    Beginner,
    #[serde(rename = "INTERMEDIATE")]
    Intermediate,
    #[serde(rename = "ADVANCED")]
    Advanced,
    #[serde(rename = "ELITE")]
    Elite,
}

impl RunnerLevel {
    pub const ALL: [RunnerLevel; 4] = [
        RunnerLevel::Beginner,
        RunnerLevel::Intermediate,
        RunnerLevel::Advanced,
        RunnerLevel::Elite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RunnerLevel::Beginner => "BEGINNER",
            RunnerLevel::Intermediate => "INTERMEDIATE",
            RunnerLevel::Advanced => "ADVANCED",
            RunnerLevel::Elite => "ELITE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunnerLevel::Beginner => "Principiante",
            RunnerLevel::Intermediate => "Intermedio",
            RunnerLevel::Advanced => "Avanzado",
            RunnerLevel::Elite => "Élite",
        }
    }
}

impl fmt::Display for RunnerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SmokingPreference {
    #[default]
    #[serde(rename = "NO_SMOKING")]
    NoSmoking,
    #[serde(rename = "SMOKING_ALLOWED")]
    SmokingAllowed,
}

impl SmokingPreference {
    pub const ALL: [SmokingPreference; 2] =
        [SmokingPreference::NoSmoking, SmokingPreference::SmokingAllowed];

    pub fn as_str(&self) -> &'static str {
        match self {
            SmokingPreference::NoSmoking => "NO_SMOKING",
            SmokingPreference::SmokingAllowed => "SMOKING_ALLOWED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SmokingPreference::NoSmoking => "Sin humo",
            SmokingPreference::SmokingAllowed => "Se permite fumar",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MusicPreference {
    #[default]
    #[serde(rename = "ANY")]
    Any,
    #[serde(rename = "QUIET")]
    Quiet,
    #[serde(rename = "MUSIC")]
    Music,
}

impl MusicPreference {
    pub const ALL: [MusicPreference; 3] = [
        MusicPreference::Any,
        MusicPreference::Quiet,
        MusicPreference::Music,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicPreference::Any => "ANY",
            MusicPreference::Quiet => "QUIET",
            MusicPreference::Music => "MUSIC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MusicPreference::Any => "Me da igual",
            MusicPreference::Quiet => "Viaje tranquilo",
            MusicPreference::Music => "Con música",
        }
    }
}
