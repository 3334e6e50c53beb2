//! Nakshatra (lunar mansion) table.
//!
//! The 27 mansions each span 13°20' (360/27 degrees) and split into 4 quarters (padas).
//! Every mansion has a ruling body that seeds the period timeline.

use serde::{Deserialize, Serialize};

use crate::ephemeris::types::Body;
use crate::ephemeris::zodiac::normalize_degrees;
use crate::error::{CoreError, Result};

pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (slug, display_name, ruling body)
pub const NAKSHATRA_ORDER: &[(&str, &str, Body)] = &[
    ("ashwini", "Ashwini", Body::Ketu),
    ("bharani", "Bharani", Body::Venus),
    ("krittika", "Krittika", Body::Sun),
    ("rohini", "Rohini", Body::Moon),
    ("mrigashira", "Mrigashira", Body::Mars),
    ("ardra", "Ardra", Body::Rahu),
    ("punarvasu", "Punarvasu", Body::Jupiter),
    ("pushya", "Pushya", Body::Saturn),
    ("ashlesha", "Ashlesha", Body::Mercury),
    ("magha", "Magha", Body::Ketu),
    ("purva_phalguni", "Purva Phalguni", Body::Venus),
    ("uttara_phalguni", "Uttara Phalguni", Body::Sun),
    ("hasta", "Hasta", Body::Moon),
    ("chitra", "Chitra", Body::Mars),
    ("swati", "Swati", Body::Rahu),
    ("vishakha", "Vishakha", Body::Jupiter),
    ("anuradha", "Anuradha", Body::Saturn),
    ("jyeshtha", "Jyeshtha", Body::Mercury),
    ("mula", "Mula", Body::Ketu),
    ("purva_ashadha", "Purva Ashadha", Body::Venus),
    ("uttara_ashadha", "Uttara Ashadha", Body::Sun),
    ("shravana", "Shravana", Body::Moon),
    ("dhanishta", "Dhanishta", Body::Mars),
    ("shatabhisha", "Shatabhisha", Body::Rahu),
    ("purva_bhadrapada", "Purva Bhadrapada", Body::Jupiter),
    ("uttara_bhadrapada", "Uttara Bhadrapada", Body::Saturn),
    ("revati", "Revati", Body::Mercury),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseNakshatraRecord {
    pub id: String,
    pub name: String,
    pub lord: Body,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraMetadata {
    #[serde(flatten)]
    pub base: BaseNakshatraRecord,
    pub offset: f64,
    /// Fraction of the mansion already traversed, in [0, 1).
    pub progress: f64,
    pub pada: u8,
    pub pada_fraction: f64,
}

fn build_nakshatra_table() -> Vec<BaseNakshatraRecord> {
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(idx, (slug, display_name, lord))| {
            let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
            BaseNakshatraRecord {
                id: slug.to_string(),
                name: display_name.to_string(),
                lord: *lord,
                start,
                end: start + NAKSHATRA_SEGMENT_SIZE,
                index: idx,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<BaseNakshatraRecord> = build_nakshatra_table();
}

pub fn nakshatra_table() -> &'static [BaseNakshatraRecord] {
    &NAKSHATRA_TABLE
}

/// Return metadata for the nakshatra containing the given longitude.
pub fn get_nakshatra_for_longitude(longitude: f64) -> NakshatraMetadata {
    let lon = normalize_degrees(longitude);
    let index = (lon / NAKSHATRA_SEGMENT_SIZE).floor() as usize % NAKSHATRA_TABLE.len();
    let entry = &NAKSHATRA_TABLE[index];

    let offset = (lon - entry.start).max(0.0);
    let pada = ((offset / PADA_SIZE).floor() as u8).min(3) + 1;
    let pada_offset = offset - (pada - 1) as f64 * PADA_SIZE;

    NakshatraMetadata {
        base: entry.clone(),
        offset,
        progress: (offset / NAKSHATRA_SEGMENT_SIZE).min(1.0),
        pada,
        pada_fraction: pada_offset / PADA_SIZE,
    }
}

/// Look a mansion up by display name or slug, ignoring case.
pub fn find_nakshatra(name: &str) -> Result<&'static BaseNakshatraRecord> {
    let wanted = name.trim();
    NAKSHATRA_TABLE
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(wanted) || entry.id.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CoreError::lookup("mansion", wanted))
}

/// The body ruling a named mansion.
pub fn nakshatra_lord(name: &str) -> Result<Body> {
    find_nakshatra(name).map(|entry| entry.lord)
}
