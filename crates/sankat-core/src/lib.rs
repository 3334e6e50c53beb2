//! Birth-chart profile engine: closed-form ephemeris, Vimshottari period timeline,
//! conjunction pattern matching, confidence-scored statements and sign-based readings.

pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod interpretation;
pub mod patterns;
pub mod predictions;
pub mod profile;
pub mod vedic;

pub use chart::{ChartSnapshot, HouseCell};
pub use ephemeris::{Body, BodyPosition, Ephemeris, EphemerisSettings, GeoLocation, PositionSet, TransitTable, Zodiac};
pub use error::{CoreError, EphemerisError, Result};
pub use interpretation::{ChartReading, Strength};
pub use patterns::{PatternMatch, PatternMatcher, PatternRule, RuleFeedback};
pub use predictions::{DailyGuidance, PredictionEngine, Statement};
pub use profile::{BirthData, CoordinateResolver, Profile, ProfileBuilder};
pub use vedic::{ActivePhase, CycleVerification, DashaPeriod, PeriodEntry, PeriodStatus, PeriodTier, PeriodTimeline};
