use serde::{Deserialize, Serialize};

use crate::ephemeris::zodiac::{normalize_degrees, sign_name, SIGN_SPAN};
use crate::ephemeris::{Body, PositionSet};
use crate::profile::{BirthData, Profile};
use crate::vedic::dashas::ActivePhase;

/// One house of the chart with its sign and occupants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCell {
    pub house: u8,
    pub sign: String,
    pub occupants: Vec<Body>,
}

/// Read-only record a chart renderer draws from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub birth: BirthData,
    pub positions: PositionSet,
    #[serde(rename = "activePhase")]
    pub active_phase: Option<ActivePhase>,
    pub houses: Vec<HouseCell>,
}

impl From<&Profile> for ChartSnapshot {
    fn from(profile: &Profile) -> Self {
        let asc = profile.positions.longitude(Body::Ascendant).unwrap_or(0.0);
        let houses = (1..=12u8)
            .map(|house| HouseCell {
                house,
                sign: sign_name(normalize_degrees(asc + SIGN_SPAN * f64::from(house - 1))).to_string(),
                occupants: profile.positions.occupants(house),
            })
            .collect();

        Self {
            birth: profile.birth.clone(),
            positions: profile.positions.clone(),
            active_phase: profile.active_phase.clone(),
            houses,
        }
    }
}
