pub mod calculator;
pub mod series;
pub mod time;
pub mod types;
pub mod zodiac;

pub use calculator::{Ephemeris, TransitTable};
pub use time::{calendar_date, julian_day};
pub use types::{Body, BodyPosition, EphemerisSettings, GeoLocation, PositionSet, Zodiac};
pub use zodiac::{angular_separation, degrees_to_dms, normalize_degrees};
