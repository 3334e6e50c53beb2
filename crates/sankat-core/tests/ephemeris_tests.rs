use chrono::{Duration, NaiveDate, NaiveTime};
use sankat_core::ephemeris::{
    angular_separation, calendar_date, julian_day, normalize_degrees, Body, Ephemeris, EphemerisSettings,
    GeoLocation, Zodiac,
};

const LOCATIONS: &[GeoLocation] = &[
    GeoLocation { lat: 28.6139, lon: 77.2090 },
    GeoLocation { lat: -33.8688, lon: 151.2093 },
    GeoLocation { lat: 64.1466, lon: -21.9426 },
    GeoLocation { lat: 0.0, lon: 0.0 },
];

fn sample_dates() -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(1940, 1, 1).unwrap();
    (0..40).map(|i| start + Duration::days(i * 743)).collect()
}

#[test]
fn test_julian_day_inverse_recovers_date() {
    let time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    for date in sample_dates() {
        let jd = julian_day(date, time, 0.0).unwrap();
        let (back, fraction) = calendar_date(jd).unwrap();
        assert_eq!(back, date);
        assert!((fraction - 0.5).abs() < 1e-6);
    }
}

#[test]
fn test_normalize_always_in_range() {
    for raw in [-1e6, -720.5, -360.0, -0.0001, 0.0, 359.9999, 360.0, 1234.5, 1e6] {
        let n = normalize_degrees(raw);
        assert!((0.0..360.0).contains(&n), "{raw} -> {n}");
    }
}

#[test]
fn test_houses_and_nodes_across_sample_charts() {
    let ephemeris = Ephemeris::default();
    let time = NaiveTime::from_hms_opt(7, 20, 0).unwrap();
    for date in sample_dates() {
        for location in LOCATIONS {
            let set = ephemeris.compute_positions(date, time, 0.0, *location).unwrap();

            assert_eq!(set.get(Body::Ascendant).unwrap().house, 1);
            for position in set.iter() {
                assert!((1..=12).contains(&position.house));
                assert!((0.0..360.0).contains(&position.longitude));
                assert!((1..=4).contains(&position.quarter));
                assert!(position.mansion_index < 27);
                assert!(position.sign_index < 12);
            }

            let rahu = set.longitude(Body::Rahu).unwrap();
            let ketu = set.longitude(Body::Ketu).unwrap();
            assert_eq!(ketu, normalize_degrees(rahu + 180.0));
        }
    }
}

#[test]
fn test_sidereal_nodes_stay_opposite() {
    let ephemeris = Ephemeris::new(EphemerisSettings {
        zodiac: Zodiac::Sidereal,
        ..EphemerisSettings::default()
    });
    let time = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
    for date in sample_dates() {
        let set = ephemeris.compute_positions(date, time, -5.0, LOCATIONS[0]).unwrap();
        let rahu = set.longitude(Body::Rahu).unwrap();
        assert_eq!(set.longitude(Body::Ketu).unwrap(), normalize_degrees(rahu + 180.0));
        assert_eq!(set.get(Body::Ascendant).unwrap().house, 1);
    }
}

#[test]
fn test_angular_separation_symmetric_and_bounded() {
    let values = [0.0, 0.5, 10.0, 89.9, 179.9, 180.0, 180.1, 270.0, 359.9];
    for &a in &values {
        for &b in &values {
            let ab = angular_separation(a, b);
            assert_eq!(ab, angular_separation(b, a));
            assert!((0.0..=180.0).contains(&ab));
        }
    }
}

#[test]
fn test_moon_moves_about_thirteen_degrees_a_day() {
    let ephemeris = Ephemeris::default();
    let time = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    let day = NaiveDate::from_ymd_opt(2010, 6, 1).unwrap();
    let today = ephemeris.compute_positions(day, time, 0.0, LOCATIONS[3]).unwrap();
    let tomorrow = ephemeris
        .compute_positions(day + Duration::days(1), time, 0.0, LOCATIONS[3])
        .unwrap();
    let step = normalize_degrees(tomorrow.longitude(Body::Moon).unwrap() - today.longitude(Body::Moon).unwrap());
    assert!(step > 11.0 && step < 16.0, "moon moved {step}");
}

#[test]
fn test_positions_are_deterministic() {
    let ephemeris = Ephemeris::default();
    let date = NaiveDate::from_ymd_opt(1975, 11, 30).unwrap();
    let time = NaiveTime::from_hms_opt(3, 15, 0).unwrap();
    let a = ephemeris.compute_positions(date, time, 2.0, LOCATIONS[1]).unwrap();
    let b = ephemeris.compute_positions(date, time, 2.0, LOCATIONS[1]).unwrap();
    assert_eq!(a, b);
}
