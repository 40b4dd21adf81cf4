//! Static lookup data shared with the forms: provinces with their main cities
//! and the label tables for every closed enumeration.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    classify::BadgeState,
    models::{
        rating::RatingType,
        trip::PassengerStatus,
        user::{MusicPreference, RunnerLevel, SmokingPreference},
    },
};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Province {
    pub code: &'static str,
    pub name: &'static str,
    pub cities: &'static [&'static str],
}

pub const PROVINCES: &[Province] = &[
    Province {
        code: "A",
        name: "Alicante",
        cities: &["Alicante", "Elche", "Benidorm", "Torrevieja", "Alcoy"],
    },
    Province {
        code: "B",
        name: "Barcelona",
        cities: &["Barcelona", "Badalona", "Sabadell", "Terrassa", "Mataró"],
    },
    Province {
        code: "BI",
        name: "Bizkaia",
        cities: &["Bilbao", "Barakaldo", "Getxo", "Durango"],
    },
    Province {
        code: "CS",
        name: "Castellón",
        cities: &["Castellón de la Plana", "Vila-real", "Burriana", "Vinaròs"],
    },
    Province {
        code: "M",
        name: "Madrid",
        cities: &["Madrid", "Alcalá de Henares", "Getafe", "Móstoles", "Leganés"],
    },
    Province {
        code: "MU",
        name: "Murcia",
        cities: &["Murcia", "Cartagena", "Lorca", "Molina de Segura"],
    },
    Province {
        code: "SE",
        name: "Sevilla",
        cities: &["Sevilla", "Dos Hermanas", "Alcalá de Guadaíra", "Utrera"],
    },
    Province {
        code: "SS",
        name: "Gipuzkoa",
        cities: &["Donostia-San Sebastián", "Irun", "Errenteria", "Eibar"],
    },
    Province {
        code: "V",
        name: "Valencia",
        cities: &["Valencia", "Gandia", "Torrent", "Paterna", "Sagunto"],
    },
    Province {
        code: "Z",
        name: "Zaragoza",
        cities: &["Zaragoza", "Calatayud", "Utebo", "Ejea de los Caballeros"],
    },
];

pub fn provinces() -> &'static [Province] {
    PROVINCES
}

/// Case-insensitive on the province code.
pub fn cities_of(province_code: &str) -> Option<&'static [&'static str]> {
    PROVINCES
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(province_code))
        .map(|p| p.cities)
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelEntry {
    pub value: &'static str,
    pub label: &'static str,
}

fn entries<T: Copy>(
    all: &[T],
    value: fn(&T) -> &'static str,
    label: fn(&T) -> &'static str,
) -> Vec<LabelEntry> {
    all.iter()
        .map(|item| LabelEntry {
            value: value(item),
            label: label(item),
        })
        .collect()
}

pub fn labels() -> BTreeMap<&'static str, Vec<LabelEntry>> {
    let mut tables = BTreeMap::new();
    tables.insert(
        "passengerStatus",
        entries(&PassengerStatus::ALL, PassengerStatus::as_str, PassengerStatus::label),
    );
    tables.insert(
        "ratingType",
        entries(&RatingType::ALL, RatingType::as_str, RatingType::label),
    );
    tables.insert(
        "badge",
        entries(&BadgeState::ALL, BadgeState::as_str, BadgeState::label),
    );
    tables.insert(
        "runnerLevel",
        entries(&RunnerLevel::ALL, RunnerLevel::as_str, RunnerLevel::label),
    );
    tables.insert(
        "smoking",
        entries(
            &SmokingPreference::ALL,
            SmokingPreference::as_str,
            SmokingPreference::label,
        ),
    );
    tables.insert(
        "music",
        entries(&MusicPreference::ALL, MusicPreference::as_str, MusicPreference::label),
    );
    tables
}
