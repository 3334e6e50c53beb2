use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::time::julian_day;
use crate::ephemeris::zodiac::{degrees_to_dms, house_from_ascendant, normalize_degrees, sign_index, SIGN_NAMES};
use crate::error::{CoreError, EphemerisError};
use crate::vedic::nakshatra::get_nakshatra_for_longitude;

/// A tracked body. The Ascendant is a pseudo-body anchoring the houses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Rahu,
    Ketu,
    Ascendant,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Rahu,
        Body::Ketu,
        Body::Ascendant,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
            Body::Ascendant => "Ascendant",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .or_else(|| match wanted.to_lowercase().as_str() {
                "asc" | "lagna" => Some(Body::Ascendant),
                "north_node" => Some(Body::Rahu),
                "south_node" => Some(Body::Ketu),
                _ => None,
            })
            .ok_or_else(|| CoreError::lookup("body", wanted))
    }
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    pub fn validate(&self) -> Result<(), EphemerisError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(EphemerisError::InvalidLatitude { lat: self.lat });
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(EphemerisError::InvalidLongitude { lon: self.lon });
        }
        Ok(())
    }
}

/// Zodiac reference frame for reported longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    #[default]
    Tropical,
    /// Shifted by a linear Lahiri ayanamsa.
    Sidereal,
}

/// Settings for ephemeris calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisSettings {
    pub zodiac: Zodiac,
    /// Bodies flagged retrograde in every chart. Static membership, not motion.
    pub retrograde_bodies: Vec<Body>,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            zodiac: Zodiac::Tropical,
            retrograde_bodies: vec![Body::Saturn, Body::Rahu, Body::Ketu],
        }
    }
}

/// Position of one body, with every bucket derived from its longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Longitude in degrees [0, 360)
    pub longitude: f64,
    /// Latitude in degrees, zero unless the body is computed from a full series
    pub latitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(rename = "signIndex")]
    pub sign_index: usize,
    pub sign: String,
    pub degree: u32,
    pub minute: u32,
    pub second: u32,
    #[serde(rename = "mansionIndex")]
    pub mansion_index: usize,
    pub mansion: String,
    pub quarter: u8,
    pub house: u8,
    pub retrograde: bool,
}

impl BodyPosition {
    /// Build a position from a raw longitude; sign, mansion and house all follow from it.
    pub fn from_longitude(
        body: Body,
        longitude: f64,
        latitude: f64,
        ascendant: f64,
        retrograde: bool,
    ) -> Self {
        let longitude = normalize_degrees(longitude);
        let sign_index = sign_index(longitude);
        let (degree, minute, second) = degrees_to_dms(longitude % 30.0);
        let mansion = get_nakshatra_for_longitude(longitude);

        Self {
            body,
            longitude,
            latitude,
            distance_km: None,
            sign_index,
            sign: SIGN_NAMES[sign_index].to_string(),
            degree,
            minute,
            second,
            mansion_index: mansion.base.index,
            mansion: mansion.base.name,
            quarter: mansion.pada,
            house: house_from_ascendant(longitude, ascendant),
            retrograde,
        }
    }

    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }
}

/// Positions of every tracked body at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSet {
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(rename = "julianDay")]
    pub julian_day: f64,
    pub bodies: BTreeMap<Body, BodyPosition>,
}

impl PositionSet {
    /// Assemble a set from bare longitudes, e.g. positions imported from elsewhere.
    /// Houses count from the Ascendant when one is given, otherwise from 0 Aries.
    pub fn from_longitudes(date: NaiveDate, longitudes: &[(Body, f64)]) -> Self {
        let time = NaiveTime::default();
        let ascendant = longitudes
            .iter()
            .find(|(body, _)| *body == Body::Ascendant)
            .map(|(_, lon)| *lon)
            .unwrap_or(0.0);
        let bodies = longitudes
            .iter()
            .map(|&(body, lon)| (body, BodyPosition::from_longitude(body, lon, 0.0, ascendant, false)))
            .collect();
        Self {
            date,
            time,
            julian_day: julian_day(date, time, 0.0).unwrap_or_default(),
            bodies,
        }
    }

    pub fn get(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.get(&body)
    }

    pub fn longitude(&self, body: Body) -> Option<f64> {
        self.bodies.get(&body).map(|p| p.longitude)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyPosition> {
        self.bodies.values()
    }

    /// Bodies placed in the given house.
    pub fn occupants(&self, house: u8) -> Vec<Body> {
        self.bodies
            .values()
            .filter(|p| p.house == house && p.body != Body::Ascendant)
            .map(|p| p.body)
            .collect()
    }

    /// Drop a body, e.g. to model transit data that lacks the nodes.
    pub fn without(mut self, body: Body) -> Self {
        self.bodies.remove(&body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_parses_case_insensitively() {
        assert_eq!("rahu".parse::<Body>().unwrap(), Body::Rahu);
        assert_eq!("ASC".parse::<Body>().unwrap(), Body::Ascendant);
        assert_eq!("south_node".parse::<Body>().unwrap(), Body::Ketu);
        assert!("pluto".parse::<Body>().is_err());
    }

    #[test]
    fn position_buckets_follow_longitude() {
        let pos = BodyPosition::from_longitude(Body::Moon, 165.0, 0.0, 113.2819, false);
        assert_eq!(pos.sign, "Virgo");
        assert_eq!(pos.degree, 15);
        assert_eq!(pos.mansion, "Hasta");
        assert_eq!(pos.quarter, 2);
        assert_eq!(pos.house, 2);
    }

    #[test]
    fn negative_longitude_is_normalized() {
        let pos = BodyPosition::from_longitude(Body::Sun, -30.0, 0.0, 0.0, false);
        assert!((pos.longitude - 330.0).abs() < 1e-12);
        assert_eq!(pos.sign, "Pisces");
        assert_eq!(pos.house, 12);
    }

    #[test]
    fn from_longitudes_uses_ascendant() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let set = PositionSet::from_longitudes(date, &[(Body::Ascendant, 200.0), (Body::Mars, 10.0)]);
        assert_eq!(set.get(Body::Ascendant).unwrap().house, 1);
        assert_eq!(set.get(Body::Mars).unwrap().house, 6);
        assert_eq!(set.occupants(6), vec![Body::Mars]);
        assert!(set.get(Body::Sun).is_none());
    }

    #[test]
    fn location_bounds() {
        assert!(GeoLocation { lat: 28.6, lon: 77.2 }.validate().is_ok());
        assert!(GeoLocation { lat: 91.0, lon: 0.0 }.validate().is_err());
        assert!(GeoLocation { lat: 0.0, lon: -181.0 }.validate().is_err());
    }
}
