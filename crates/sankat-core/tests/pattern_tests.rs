use chrono::{Duration, NaiveDate};
use sankat_core::ephemeris::{Body, Ephemeris, GeoLocation, PositionSet};
use sankat_core::patterns::{PatternMatcher, PatternRule, MATCH_THRESHOLD};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 9, 9).unwrap()
}

fn mars_sun(orb: f64) -> PatternMatcher {
    PatternMatcher::new(vec![PatternRule {
        id: "mars_sun".to_string(),
        name: "Mars-Sun".to_string(),
        description: "Test rule".to_string(),
        bodies: (Body::Mars, Body::Sun),
        orb,
        severity: 6,
        effects: vec!["Heat".to_string()],
        remedies: vec!["Rest".to_string()],
    }])
    .unwrap()
}

#[test]
fn test_reference_separations() {
    let matcher = mars_sun(6.0);

    let near = PositionSet::from_longitudes(day(), &[(Body::Mars, 10.0), (Body::Sun, 15.0)]);
    // 5 degrees is within the orb even though confidence stays below the threshold
    let rule = &matcher.rules()[0];
    assert!((matcher.confidence(rule, 5.0) - 1.0 / 6.0).abs() < 1e-12);
    assert!(matcher.detect(&near).is_empty());

    let far = PositionSet::from_longitudes(day(), &[(Body::Mars, 10.0), (Body::Sun, 350.0)]);
    assert!(matcher.detect(&far).is_empty());

    let tight = PositionSet::from_longitudes(day(), &[(Body::Mars, 10.0), (Body::Sun, 10.5)]);
    let matches = matcher.detect(&tight);
    assert_eq!(matches.len(), 1);
    assert!((matches[0].separation - 0.5).abs() < 1e-12);
}

#[test]
fn test_confidence_bounds_over_a_sweep() {
    let mut matcher = PatternMatcher::with_default_catalog().unwrap();
    for _ in 0..6 {
        matcher.record_feedback("rahu_mars_conjunction", true, 1.0).unwrap();
    }
    for step in 0..720 {
        let mars = step as f64 * 0.5;
        let set = PositionSet::from_longitudes(day(), &[(Body::Rahu, 100.0), (Body::Mars, mars)]);
        for m in matcher.detect(&set) {
            assert!((0.0..=1.0).contains(&m.confidence));
            assert!(m.confidence > MATCH_THRESHOLD);
            assert!(m.separation <= m.orb);
        }
    }
}

#[test]
fn test_three_confirmations_reach_full_accuracy() {
    let mut matcher = PatternMatcher::with_default_catalog().unwrap();
    for _ in 0..3 {
        matcher.record_feedback("ketu_moon_conjunction", true, 1.0).unwrap();
    }
    let feedback = matcher.feedback("ketu_moon_conjunction").unwrap();
    assert!((feedback.accuracy - 1.0).abs() < 1e-12);
    assert_eq!(matcher.statistics().confirmed_rules, 1);
}

#[test]
fn test_feedback_accuracy_stays_clamped() {
    let mut matcher = PatternMatcher::with_default_catalog().unwrap();
    let fb = matcher.record_feedback("mars_saturn_conjunction", true, 5.0).unwrap();
    assert_eq!(fb.accuracy, 1.0);
    let fb = matcher.record_feedback("mars_saturn_conjunction", true, -5.0).unwrap();
    assert_eq!(fb.accuracy, 0.0);
}

#[test]
fn test_transit_range_over_computed_sky() {
    let ephemeris = Ephemeris::default();
    let location = GeoLocation { lat: 13.0827, lon: 80.2707 };
    let start = day();
    let end = start + Duration::days(29);
    let table = ephemeris.transit_positions(start, end, location).unwrap();
    assert_eq!(table.len(), 30);

    let matcher = PatternMatcher::with_default_catalog().unwrap();
    let matches = matcher.detect_over_transit_range(&table, start, end);
    let expected: usize = table.values().map(|set| matcher.detect(set).len()).sum();
    assert_eq!(matches.len(), expected);
    assert!(matches.iter().all(|m| m.match_date >= start && m.match_date <= end));
    for pair in matches.windows(2) {
        assert!(pair[0].match_date <= pair[1].match_date);
    }
}

#[test]
fn test_transit_sets_without_nodes_skip_node_rules() {
    let matcher = PatternMatcher::with_default_catalog().unwrap();
    let set = PositionSet::from_longitudes(
        day(),
        &[(Body::Sun, 40.0), (Body::Moon, 40.0), (Body::Mars, 40.0), (Body::Saturn, 41.0)],
    );
    let ids: Vec<String> = matcher.detect(&set).into_iter().map(|m| m.rule_id).collect();
    assert_eq!(ids, vec!["mars_saturn_conjunction".to_string()]);
}

#[test]
fn test_node_rules_need_both_nodes() {
    let sky = PositionSet::from_longitudes(
        day(),
        &[(Body::Rahu, 75.0), (Body::Sun, 75.5), (Body::Mars, 76.0), (Body::Ketu, 255.0), (Body::Moon, 255.5)],
    );
    let matcher = PatternMatcher::with_default_catalog().unwrap();
    assert_eq!(matcher.detect(&sky).len(), 3);

    let without_nodes = sky.without(Body::Rahu).without(Body::Ketu);
    assert!(matcher.detect(&without_nodes).is_empty());
}

#[test]
fn test_undefined_feedback_weight_leaves_detection_intact() {
    let mut matcher = PatternMatcher::with_default_catalog().unwrap();
    assert!(matcher.record_feedback("mars_saturn_conjunction", true, f64::NAN).is_err());
    let fb = matcher.feedback("mars_saturn_conjunction").unwrap();
    assert_eq!(fb.confirmed_count, 0);
    assert_eq!(fb.accuracy, 0.0);

    // 5.9 of 6 degrees apart stays below the threshold
    let wide = PositionSet::from_longitudes(day(), &[(Body::Mars, 10.0), (Body::Saturn, 15.9)]);
    assert!(matcher.detect(&wide).is_empty());
    let rule = matcher.rules().iter().find(|r| r.id == "mars_saturn_conjunction").unwrap();
    let confidence = matcher.confidence(rule, 5.9);
    assert!(confidence.is_finite() && (0.0..=1.0).contains(&confidence));

    let exact = PositionSet::from_longitudes(day(), &[(Body::Mars, 10.0), (Body::Saturn, 10.0)]);
    let matches = matcher.detect(&exact);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].confidence, 1.0);
}
