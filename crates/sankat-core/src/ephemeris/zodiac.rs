//! Pure helpers that bucket an ecliptic longitude.

pub const SIGN_SPAN: f64 = 30.0;

pub const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let mut normalized = value % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    // -1e-15 + 360.0 rounds up to 360.0
    if normalized >= 360.0 {
        normalized = 0.0;
    }
    normalized
}

pub fn sign_index(longitude: f64) -> usize {
    (normalize_degrees(longitude) / SIGN_SPAN).floor() as usize % 12
}

pub fn sign_name(longitude: f64) -> &'static str {
    SIGN_NAMES[sign_index(longitude)]
}

/// Split a non-negative angle into whole degrees, minutes and seconds (truncated).
pub fn degrees_to_dms(value: f64) -> (u32, u32, u32) {
    let value = value.abs();
    let degrees = value.floor();
    let minutes_full = (value - degrees) * 60.0;
    let minutes = minutes_full.floor();
    let seconds = ((minutes_full - minutes) * 60.0).floor();
    (degrees as u32, (minutes as u32).min(59), (seconds as u32).min(59))
}

/// House counted from the Ascendant, one sign per house.
pub fn house_from_ascendant(longitude: f64, ascendant: f64) -> u8 {
    let offset = normalize_degrees(longitude - ascendant);
    ((offset / SIGN_SPAN).floor() as u8).min(11) + 1
}

/// Shorter-arc distance between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}
