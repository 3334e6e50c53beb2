use chrono::{Duration, NaiveDate};
use sankat_core::ephemeris::{Body, PositionSet};
use sankat_core::patterns::PatternMatcher;
use sankat_core::predictions::PredictionEngine;
use sankat_core::vedic::nakshatra::nakshatra_table;
use sankat_core::PeriodTimeline;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_combine_is_sorted_and_capped_for_every_ruler() {
    let engine = PredictionEngine::new().unwrap();
    let matcher = PatternMatcher::with_default_catalog().unwrap();
    let today = ymd(2025, 3, 1);

    let sky = PositionSet::from_longitudes(
        today,
        &[
            (Body::Rahu, 200.0),
            (Body::Sun, 200.4),
            (Body::Mars, 201.0),
            (Body::Saturn, 202.0),
            (Body::Ketu, 20.0),
            (Body::Moon, 20.3),
        ],
    );
    let matches = matcher.detect(&sky);
    assert_eq!(matches.len(), 4);

    for mansion in nakshatra_table().iter().take(9) {
        let timeline = PeriodTimeline::new(&mansion.name, 0.0, ymd(2020, 1, 1)).unwrap();
        let phase = timeline.active_phase(today).unwrap();
        for months in [0, 1, 3, 6, 12] {
            let statements = engine.combine(Some(&phase), &matches, months, today);
            assert!(statements.len() <= 10);
            for pair in statements.windows(2) {
                let ordered = pair[0].confidence > pair[1].confidence
                    || (pair[0].confidence == pair[1].confidence && pair[0].date <= pair[1].date);
                assert!(ordered, "{} before {}", pair[0].id, pair[1].id);
            }
            assert!(statements.iter().all(|s| (0.0..=1.0).contains(&s.confidence)));
        }
    }
}

#[test]
fn test_zero_months_keeps_only_patterns() {
    let engine = PredictionEngine::new().unwrap();
    let matcher = PatternMatcher::with_default_catalog().unwrap();
    let today = ymd(2025, 3, 1);
    let sky = PositionSet::from_longitudes(today, &[(Body::Mars, 90.0), (Body::Saturn, 90.2)]);
    let matches = matcher.detect(&sky);

    let timeline = PeriodTimeline::new("Pushya", 0.5, ymd(2010, 1, 1)).unwrap();
    let phase = timeline.active_phase(today).unwrap();
    let statements = engine.combine(Some(&phase), &matches, 0, today);
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].support.pattern_ids, vec!["mars_saturn_conjunction".to_string()]);
    assert_eq!(statements[0].remedies.len(), 4);
}

#[test]
fn test_statement_dates_follow_today() {
    let engine = PredictionEngine::new().unwrap();
    let today = ymd(2030, 12, 15);
    let timeline = PeriodTimeline::new("Hasta", 0.2, ymd(2025, 1, 1)).unwrap();
    let phase = timeline.active_phase(today).unwrap();
    let statements = engine.combine(Some(&phase), &[], 12, today);

    assert_eq!(statements.len(), 9);
    assert!(statements.iter().all(|s| s.date > today && s.date <= today + Duration::days(180)));
    assert!(statements.iter().all(|s| s.support.phase_body == Some(phase.lord())));
}
