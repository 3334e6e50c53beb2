use anyhow::Context;
use sankat_core::{Body, CoordinateResolver, EphemerisSettings, GeoLocation, Zodiac};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Relative paths tried for `configs/sankat.toml`, from the repo root and from a crate dir.
pub const CONFIG_PATHS: [&str; 2] = ["configs/sankat.toml", "../../configs/sankat.toml"];

const DEFAULT_LOCATION: GeoLocation = GeoLocation {
    lat: 28.6139,
    lon: 77.2090,
};
const DEFAULT_TZ_HOURS: f64 = 5.5;
const DEFAULT_MONTHS_AHEAD: u32 = 12;

const BUILTIN_CITIES: &[(&str, f64, f64)] = &[
    ("delhi", 28.6139, 77.2090),
    ("mumbai", 19.0760, 72.8777),
    ("bangalore", 12.9716, 77.5946),
    ("chennai", 13.0827, 80.2707),
    ("kolkata", 22.5726, 88.3639),
    ("hyderabad", 17.3850, 78.4867),
    ("pune", 18.5204, 73.8567),
    ("ahmedabad", 23.0225, 72.5714),
    ("jaipur", 26.9124, 75.7873),
    ("lucknow", 26.8467, 80.9462),
];

#[derive(Debug, Clone)]
pub struct SankatConfig {
    /// Fallback birth location when a place is unknown.
    pub default_location: GeoLocation,
    pub tz_hours: f64,
    pub ephemeris: EphemerisSettings,
    pub months_ahead: u32,
    pub cities: CityTable,
}

impl Default for SankatConfig {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION,
            tz_hours: DEFAULT_TZ_HOURS,
            ephemeris: EphemerisSettings::default(),
            months_ahead: DEFAULT_MONTHS_AHEAD,
            cities: CityTable::builtin(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LocationToml {
    #[serde(default = "default_lat")]
    lat: f64,
    #[serde(default = "default_lon")]
    lon: f64,
}

fn default_lat() -> f64 {
    DEFAULT_LOCATION.lat
}

fn default_lon() -> f64 {
    DEFAULT_LOCATION.lon
}

#[derive(Debug, Clone, Deserialize)]
struct BirthToml {
    #[serde(default = "default_tz_hours")]
    tz_hours: f64,
}

fn default_tz_hours() -> f64 {
    DEFAULT_TZ_HOURS
}

#[derive(Debug, Clone, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    zodiac: Zodiac,
    #[serde(default)]
    retrograde_bodies: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct PredictionsToml {
    #[serde(default = "default_months_ahead")]
    months_ahead: u32,
}

fn default_months_ahead() -> u32 {
    DEFAULT_MONTHS_AHEAD
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    location: Option<LocationToml>,
    #[serde(default)]
    birth: Option<BirthToml>,
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
    #[serde(default)]
    predictions: Option<PredictionsToml>,
    #[serde(default)]
    cities: Option<BTreeMap<String, [f64; 2]>>,
}

/// Try the common relative paths for `configs/sankat.toml`; `None` when none exist.
pub fn read_config_toml_text() -> Option<String> {
    CONFIG_PATHS.iter().find_map(|p| fs::read_to_string(p).ok())
}

/// Load from the default paths, falling back to built-in defaults when no file is found.
pub fn load() -> anyhow::Result<SankatConfig> {
    match read_config_toml_text() {
        Some(text) => parse(&text).context("Failed to parse sankat.toml"),
        None => {
            log::warn!("Could not load sankat.toml from {:?}; using defaults", CONFIG_PATHS);
            Ok(SankatConfig::default())
        }
    }
}

/// Load an explicit file. A missing file is an error here since the caller asked for it.
pub fn load_from(path: &Path) -> anyhow::Result<SankatConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
    parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse(text: &str) -> anyhow::Result<SankatConfig> {
    let root: RootConfigToml = toml::from_str(text)?;
    let defaults = SankatConfig::default();

    let default_location = match root.location {
        Some(LocationToml { lat, lon }) => {
            let location = GeoLocation { lat, lon };
            location.validate().context("Invalid [location]")?;
            location
        }
        None => defaults.default_location,
    };

    let tz_hours = root.birth.map(|b| b.tz_hours).unwrap_or(defaults.tz_hours);
    if !(-14.0..=14.0).contains(&tz_hours) {
        anyhow::bail!("birth.tz_hours {tz_hours} is outside [-14, 14]");
    }

    let ephemeris = match root.ephemeris {
        Some(EphemerisToml {
            zodiac,
            retrograde_bodies,
        }) => {
            let retrograde_bodies = match retrograde_bodies {
                Some(names) => names
                    .iter()
                    .map(|name| name.parse::<Body>())
                    .collect::<Result<Vec<_>, _>>()
                    .context("Invalid ephemeris.retrograde_bodies")?,
                None => defaults.ephemeris.retrograde_bodies.clone(),
            };
            EphemerisSettings {
                zodiac,
                retrograde_bodies,
            }
        }
        None => defaults.ephemeris.clone(),
    };

    let months_ahead = root.predictions.map(|p| p.months_ahead).unwrap_or(defaults.months_ahead);

    let cities = match root.cities {
        Some(entries) => {
            let mut table = BTreeMap::new();
            for (name, [lat, lon]) in entries {
                let location = GeoLocation { lat, lon };
                location
                    .validate()
                    .with_context(|| format!("Invalid coordinates for city '{name}'"))?;
                table.insert(name.trim().to_lowercase(), location);
            }
            CityTable::new(table, default_location)
        }
        None => CityTable {
            default: default_location,
            ..defaults.cities
        },
    };

    Ok(SankatConfig {
        default_location,
        tz_hours,
        ephemeris,
        months_ahead,
        cities,
    })
}

/// Case-insensitive place lookup with a configured fallback location.
#[derive(Debug, Clone, PartialEq)]
pub struct CityTable {
    cities: BTreeMap<String, GeoLocation>,
    default: GeoLocation,
}

impl CityTable {
    pub fn new(cities: BTreeMap<String, GeoLocation>, default: GeoLocation) -> Self {
        Self { cities, default }
    }

    pub fn builtin() -> Self {
        let cities = BUILTIN_CITIES
            .iter()
            .map(|(name, lat, lon)| (name.to_string(), GeoLocation { lat: *lat, lon: *lon }))
            .collect();
        Self::new(cities, DEFAULT_LOCATION)
    }

    pub fn get(&self, place: &str) -> Option<GeoLocation> {
        self.cities.get(&place.trim().to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl CoordinateResolver for CityTable {
    fn resolve(&self, place: &str) -> GeoLocation {
        self.get(place).unwrap_or_else(|| {
            log::warn!(
                "Unknown place '{}', using default location ({}, {})",
                place,
                self.default.lat,
                self.default.lon
            );
            self.default
        })
    }
}
