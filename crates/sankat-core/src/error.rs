use thiserror::Error;

/// Errors raised by the profile computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A name that must resolve through one of the fixed tables did not.
    #[error("Unknown {kind}: {name}")]
    Lookup { kind: &'static str, name: String },
    /// A catalog entry that would divide by zero or leave its valid range.
    #[error("Invalid configuration for {entry}: {message}")]
    Configuration { entry: String, message: String },
    /// A period node cannot be subdivided any further.
    #[error("{tier} periods cannot be subdivided")]
    LowestTier { tier: &'static str },
    /// A date step left the representable calendar range.
    #[error("Adding {years} years to {start} overflows the calendar")]
    DateOverflow { start: chrono::NaiveDate, years: f64 },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

impl CoreError {
    pub(crate) fn lookup(kind: &'static str, name: impl Into<String>) -> Self {
        Self::Lookup {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn configuration(entry: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            entry: entry.into(),
            message: message.into(),
        }
    }
}

/// Errors for civil input handed to the ephemeris.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Latitude {lat} is outside [-90, 90]")]
    InvalidLatitude { lat: f64 },
    #[error("Longitude {lon} is outside [-180, 180]")]
    InvalidLongitude { lon: f64 },
    #[error("Timezone offset {hours}h is outside [-14, 14]")]
    InvalidTimezone { hours: f64 },
    #[error("Julian day {jd} does not map to a calendar date")]
    DateOutOfRange { jd: f64 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
