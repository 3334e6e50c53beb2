use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

use crate::ephemeris::series::{ascendant, lahiri_ayanamsa, mean_longitude, moon_position, sun_true_longitude};
use crate::ephemeris::time::{centuries_since_j2000, julian_day};
use crate::ephemeris::types::{Body, BodyPosition, EphemerisSettings, GeoLocation, PositionSet, Zodiac};
use crate::ephemeris::zodiac::normalize_degrees;
use crate::error::EphemerisError;

/// One position set per calendar day.
pub type TransitTable = BTreeMap<NaiveDate, PositionSet>;

/// Closed-form ephemeris. Holds only settings, so it is cheap to share.
#[derive(Debug, Clone, Default)]
pub struct Ephemeris {
    settings: EphemerisSettings,
}

impl Ephemeris {
    pub fn new(settings: EphemerisSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EphemerisSettings {
        &self.settings
    }

    /// Positions of every tracked body for a local civil instant.
    pub fn compute_positions(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        tz_hours: f64,
        location: GeoLocation,
    ) -> Result<PositionSet, EphemerisError> {
        location.validate()?;
        let jd = julian_day(date, time, tz_hours)?;
        let t = centuries_since_j2000(jd);

        let shift = match self.settings.zodiac {
            Zodiac::Tropical => 0.0,
            Zodiac::Sidereal => lahiri_ayanamsa(jd),
        };

        let moon = moon_position(t);
        let mut longitudes: Vec<(Body, f64)> = vec![
            (Body::Sun, sun_true_longitude(t)),
            (Body::Moon, moon.longitude),
        ];
        for body in [Body::Mercury, Body::Venus, Body::Mars, Body::Jupiter, Body::Saturn, Body::Rahu] {
            if let Some(lon) = mean_longitude(body, t) {
                longitudes.push((body, lon));
            }
        }
        for (_, lon) in longitudes.iter_mut() {
            *lon = normalize_degrees(*lon - shift);
        }

        // Ketu is derived after the shift so the nodal axis stays exact
        let rahu = longitudes
            .iter()
            .find(|(body, _)| *body == Body::Rahu)
            .map(|(_, lon)| *lon)
            .unwrap_or_default();
        longitudes.push((Body::Ketu, normalize_degrees(rahu + 180.0)));

        let asc = normalize_degrees(ascendant(jd, location.lat, location.lon) - shift);
        longitudes.push((Body::Ascendant, asc));

        let mut bodies = BTreeMap::new();
        for (body, lon) in longitudes {
            let latitude = if body == Body::Moon { moon.latitude } else { 0.0 };
            let retrograde = self.settings.retrograde_bodies.contains(&body);
            let mut position = BodyPosition::from_longitude(body, lon, latitude, asc, retrograde);
            if body == Body::Moon {
                position = position.with_distance(moon.distance_km);
            }
            bodies.insert(body, position);
        }

        log::debug!(
            "Computed {} positions for {} {} (jd {:.5}, asc {:.3})",
            bodies.len(),
            date,
            time,
            jd,
            asc
        );

        Ok(PositionSet {
            date,
            time,
            julian_day: jd,
            bodies,
        })
    }

    /// Daily position sets over `[start, end]`, each taken at local mean noon.
    pub fn transit_positions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        location: GeoLocation,
    ) -> Result<TransitTable, EphemerisError> {
        location.validate()?;
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        let tz_hours = location.lon / 15.0;

        let mut table = TransitTable::new();
        let mut day = start;
        while day <= end {
            table.insert(day, self.compute_positions(day, noon, tz_hours, location)?);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        log::debug!("Computed {} transit days from {} to {}", table.len(), start, end);
        Ok(table)
    }
}
