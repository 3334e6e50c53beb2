//! End-to-end pipeline from birth data to a queryable profile.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::chart::ChartSnapshot;
use crate::ephemeris::{Body, Ephemeris, GeoLocation, PositionSet};
use crate::error::{CoreError, Result};
use crate::interpretation::{interpret, ChartReading};
use crate::patterns::{PatternMatch, PatternMatcher, RuleFeedback};
use crate::predictions::{daily_guidance, AccuracyRecord, DailyGuidance, PredictionEngine, Statement};
use crate::vedic::dashas::{ActivePhase, CycleVerification, PeriodEntry, PeriodTimeline};
use crate::vedic::nakshatra::{get_nakshatra_for_longitude, NakshatraMetadata};

/// Maps a place name to coordinates. What happens for unknown names is up to the implementor.
pub trait CoordinateResolver {
    fn resolve(&self, place: &str) -> GeoLocation;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(rename = "tzHours")]
    pub tz_hours: f64,
    pub place: String,
    pub location: GeoLocation,
}

pub struct ProfileBuilder<'a> {
    name: String,
    date: NaiveDate,
    time: NaiveTime,
    tz_hours: f64,
    place: String,
    location: Option<GeoLocation>,
    resolver: Option<&'a dyn CoordinateResolver>,
    ephemeris: Ephemeris,
    matcher: Option<PatternMatcher>,
    engine: Option<PredictionEngine>,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(name: impl Into<String>, date: NaiveDate, time: NaiveTime, tz_hours: f64) -> Self {
        Self {
            name: name.into(),
            date,
            time,
            tz_hours,
            place: String::new(),
            location: None,
            resolver: None,
            ephemeris: Ephemeris::default(),
            matcher: None,
            engine: None,
        }
    }

    pub fn place(mut self, place: impl Into<String>) -> Self {
        self.place = place.into();
        self
    }

    /// Explicit coordinates win over the resolver.
    pub fn coordinates(mut self, location: GeoLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn resolver(mut self, resolver: &'a dyn CoordinateResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn ephemeris(mut self, ephemeris: Ephemeris) -> Self {
        self.ephemeris = ephemeris;
        self
    }

    pub fn matcher(mut self, matcher: PatternMatcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn engine(mut self, engine: PredictionEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Run the pipeline, locating the active period on `reference_date`.
    pub fn build(self, reference_date: NaiveDate) -> Result<Profile> {
        let location = match (self.location, self.resolver) {
            (Some(location), _) => location,
            (None, Some(resolver)) => resolver.resolve(&self.place),
            (None, None) => {
                return Err(CoreError::configuration(
                    "location",
                    format!("no coordinates or resolver for '{}'", self.place),
                ))
            }
        };

        let birth = BirthData {
            name: self.name,
            date: self.date,
            time: self.time,
            tz_hours: self.tz_hours,
            place: self.place,
            location,
        };

        let positions = self
            .ephemeris
            .compute_positions(birth.date, birth.time, birth.tz_hours, location)?;

        let moon = positions
            .longitude(Body::Moon)
            .ok_or_else(|| CoreError::lookup("body", "Moon"))?;
        let birth_mansion = get_nakshatra_for_longitude(moon);

        let timeline = PeriodTimeline::new(&birth_mansion.base.name, birth_mansion.progress, birth.date)?;
        let active_phase = timeline.active_phase(reference_date);

        let matcher = match self.matcher {
            Some(matcher) => matcher,
            None => PatternMatcher::with_default_catalog()?,
        };
        let matches = matcher.detect(&positions);

        let engine = match self.engine {
            Some(engine) => engine,
            None => PredictionEngine::new()?,
        };

        log::info!(
            "Profile for {}: Moon in {} ({:.1}% traversed), {} in effect, {} birth patterns",
            birth.name,
            birth_mansion.base.name,
            birth_mansion.progress * 100.0,
            active_phase
                .as_ref()
                .map(|p| p.status())
                .unwrap_or_else(|| "no period".to_string()),
            matches.len()
        );

        Ok(Profile {
            birth,
            positions,
            birth_mansion,
            timeline,
            reference_date,
            active_phase,
            matches,
            ephemeris: self.ephemeris,
            matcher,
            engine,
        })
    }
}

/// Everything derived from one birth instant.
#[derive(Debug, Clone)]
pub struct Profile {
    pub birth: BirthData,
    pub positions: PositionSet,
    pub birth_mansion: NakshatraMetadata,
    pub timeline: PeriodTimeline,
    pub reference_date: NaiveDate,
    pub active_phase: Option<ActivePhase>,
    pub matches: Vec<PatternMatch>,
    ephemeris: Ephemeris,
    matcher: PatternMatcher,
    engine: PredictionEngine,
}

impl Profile {
    /// Ranked statements from the active period and the birth-chart matches.
    pub fn predictions(&self, months_ahead: u32, today: NaiveDate) -> Vec<Statement> {
        self.engine
            .combine(self.active_phase.as_ref(), &self.matches, months_ahead, today)
    }

    /// Antardasha running on the reference date.
    pub fn active_sub_phase(&self) -> Result<Option<ActivePhase>> {
        self.timeline.active_sub_phase(self.reference_date)
    }

    /// Mahadashas marked completed, current or future relative to the reference date.
    pub fn period_statuses(&self) -> Vec<PeriodEntry> {
        self.timeline.with_status(self.reference_date)
    }

    /// Weekday guidance for `date`, using the Mahadasha running on that date.
    pub fn daily_guidance(&self, date: NaiveDate) -> DailyGuidance {
        let lord = self.timeline.active_phase(date).map(|phase| phase.lord());
        daily_guidance(date, lord)
    }

    pub fn reading(&self) -> ChartReading {
        interpret(&self.positions)
    }

    pub fn verify_timeline(&self) -> Result<CycleVerification> {
        self.timeline.verify()
    }

    /// Patterns formed by the moving sky, one set per day at the birth location.
    pub fn transit_matches(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<PatternMatch>> {
        let table = self.ephemeris.transit_positions(start, end, self.birth.location)?;
        Ok(self.matcher.detect_over_transit_range(&table, start, end))
    }

    pub fn record_pattern_feedback(&mut self, rule_id: &str, confirmed: bool, effect_weight: f64) -> Result<RuleFeedback> {
        self.matcher.record_feedback(rule_id, confirmed, effect_weight)
    }

    pub fn record_outcome(&mut self, statement_id: &str, outcome: &str, rating: f64) -> AccuracyRecord {
        self.engine.record_outcome(statement_id, outcome, rating)
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    pub fn chart_snapshot(&self) -> ChartSnapshot {
        ChartSnapshot::from(self)
    }
}
