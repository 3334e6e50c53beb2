use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::ephemeris::calculator::TransitTable;
use crate::ephemeris::types::PositionSet;
use crate::ephemeris::zodiac::angular_separation;
use crate::error::{CoreError, Result};
use crate::patterns::catalog::default_rules;
use crate::patterns::types::{PatternMatch, PatternRule, PatternStatistics, RuleFeedback, RuleStatistics};

/// Confidence a match must exceed to be reported.
pub const MATCH_THRESHOLD: f64 = 0.6;
const ACCURACY_WEIGHT: f64 = 0.1;
const CONFIRMATION_STEP: f64 = 0.05;
const CONFIRMATION_CAP: f64 = 0.2;

/// Scans position sets against a fixed rule catalog.
///
/// Rules never change after construction; user feedback accumulates in a separate
/// ledger and feeds back into the confidence of later matches.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    rules: Vec<PatternRule>,
    feedback: HashMap<String, RuleFeedback>,
}

impl PatternMatcher {
    pub fn new(rules: Vec<PatternRule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !rule.orb.is_finite() || rule.orb <= 0.0 {
                return Err(CoreError::configuration(
                    &rule.id,
                    format!("orb {} must be positive", rule.orb),
                ));
            }
            if rule.bodies.0 == rule.bodies.1 {
                return Err(CoreError::configuration(&rule.id, "rule needs two distinct bodies"));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(CoreError::configuration(&rule.id, "duplicate rule id"));
            }
        }

        let feedback = rules
            .iter()
            .map(|rule| (rule.id.clone(), RuleFeedback::default()))
            .collect();
        log::debug!("Pattern matcher ready with {} rules", rules.len());
        Ok(Self { rules, feedback })
    }

    pub fn with_default_catalog() -> Result<Self> {
        Self::new(default_rules())
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn feedback(&self, rule_id: &str) -> Option<&RuleFeedback> {
        self.feedback.get(rule_id)
    }

    /// Matches for every rule whose bodies are both present, dated with the set's date.
    pub fn detect(&self, positions: &PositionSet) -> Vec<PatternMatch> {
        self.rules
            .iter()
            .filter_map(|rule| self.check_rule(rule, positions))
            .collect()
    }

    /// Run [`detect`](Self::detect) on each day of `[start, end]` that has a transit set.
    ///
    /// Results are concatenated day by day; a configuration lasting several days
    /// yields one match per day.
    pub fn detect_over_transit_range(
        &self,
        transit_by_day: &TransitTable,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut day = start;
        while day <= end {
            if let Some(positions) = transit_by_day.get(&day) {
                matches.extend(self.detect(positions));
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        log::debug!("{} transit matches between {} and {}", matches.len(), start, end);
        matches
    }

    /// Fold one piece of user feedback into a rule's running accuracy.
    ///
    /// A confirmation bumps the counter and averages `effect_weight` in; a rejection
    /// decays the accuracy as if a zero had been averaged in, without counting.
    pub fn record_feedback(&mut self, rule_id: &str, confirmed: bool, effect_weight: f64) -> Result<RuleFeedback> {
        let entry = self
            .feedback
            .get_mut(rule_id)
            .ok_or_else(|| CoreError::lookup("rule", rule_id))?;
        if !effect_weight.is_finite() {
            return Err(CoreError::configuration(
                rule_id,
                format!("feedback weight {effect_weight} is not a finite number"),
            ));
        }

        if confirmed {
            entry.confirmed_count += 1;
            let n = entry.confirmed_count as f64;
            entry.accuracy = (entry.accuracy * (n - 1.0) + effect_weight) / n;
        } else {
            let n = entry.confirmed_count as f64 + 1.0;
            entry.accuracy = entry.accuracy * (n - 1.0) / n;
        }
        entry.accuracy = entry.accuracy.clamp(0.0, 1.0);

        log::info!(
            "Feedback for {}: confirmed={} accuracy={:.3} count={}",
            rule_id,
            confirmed,
            entry.accuracy,
            entry.confirmed_count
        );
        Ok(*entry)
    }

    pub fn statistics(&self) -> PatternStatistics {
        let mut details = BTreeMap::new();
        let mut confirmed_accuracies = Vec::new();

        for rule in &self.rules {
            let feedback = self.feedback.get(&rule.id).copied().unwrap_or_default();
            if feedback.confirmed_count > 0 {
                confirmed_accuracies.push(feedback.accuracy);
            }
            details.insert(
                rule.id.clone(),
                RuleStatistics {
                    name: rule.name.clone(),
                    confirmed_count: feedback.confirmed_count,
                    accuracy: feedback.accuracy,
                    severity: rule.severity,
                },
            );
        }

        let average_accuracy = if confirmed_accuracies.is_empty() {
            0.0
        } else {
            confirmed_accuracies.iter().sum::<f64>() / confirmed_accuracies.len() as f64
        };

        PatternStatistics {
            total_rules: self.rules.len(),
            confirmed_rules: confirmed_accuracies.len(),
            average_accuracy,
            details,
        }
    }

    /// Closeness to exact plus bonuses for past accuracy and confirmations, in [0, 1].
    pub fn confidence(&self, rule: &PatternRule, separation: f64) -> f64 {
        let feedback = self.feedback.get(&rule.id).copied().unwrap_or_default();
        let closeness = (rule.orb - separation) / rule.orb;
        let accuracy_bonus = feedback.accuracy * ACCURACY_WEIGHT;
        let confirmation_bonus = (feedback.confirmed_count as f64 * CONFIRMATION_STEP).min(CONFIRMATION_CAP);
        let total = closeness + accuracy_bonus + confirmation_bonus;
        if total.is_finite() {
            total.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn check_rule(&self, rule: &PatternRule, positions: &PositionSet) -> Option<PatternMatch> {
        let (a, b) = rule.bodies;
        let lon_a = positions.longitude(a)?;
        let lon_b = positions.longitude(b)?;

        let separation = angular_separation(lon_a, lon_b);
        if separation > rule.orb {
            return None;
        }

        let confidence = self.confidence(rule, separation);
        if confidence <= MATCH_THRESHOLD {
            return None;
        }

        let accuracy = self.feedback.get(&rule.id).map(|f| f.accuracy).unwrap_or_default();
        Some(PatternMatch {
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            description: rule.description.clone(),
            match_date: positions.date,
            longitudes: BTreeMap::from([(a, lon_a), (b, lon_b)]),
            separation,
            confidence,
            orb: rule.orb,
            accuracy,
            severity: rule.severity,
            predicted_effects: rule.effects.clone(),
            remedies: rule.remedies.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::types::Body;
    use chrono::Duration;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn rule(id: &str, a: Body, b: Body, orb: f64) -> PatternRule {
        PatternRule {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            bodies: (a, b),
            orb,
            severity: 5,
            effects: vec!["effect".to_string()],
            remedies: vec!["remedy".to_string()],
        }
    }

    #[test]
    fn test_close_conjunction_matches() {
        let matcher = PatternMatcher::new(vec![rule("mars_sun", Body::Mars, Body::Sun, 6.0)]).unwrap();
        let set = PositionSet::from_longitudes(day(), &[(Body::Mars, 10.0), (Body::Sun, 11.0)]);
        let matches = matcher.detect(&set);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].separation, 1.0);
        assert!((matches[0].confidence - 5.0 / 6.0).abs() < 1e-12);
        assert_eq!(matches[0].match_date, day());
    }

    #[test]
    fn test_within_orb_but_low_confidence() {
        // 5 of 6 degrees apart: closeness 1/6, below the threshold
        let matcher = PatternMatcher::new(vec![rule("mars_sun", Body::Mars, Body::Sun, 6.0)]).unwrap();
        let set = PositionSet::from_longitudes(day(), &[(Body::Mars, 10.0), (Body::Sun, 15.0)]);
        assert!(matcher.detect(&set).is_empty());
    }

    #[test]
    fn test_wraparound_separation() {
        let matcher = PatternMatcher::new(vec![rule("mars_sun", Body::Mars, Body::Sun, 6.0)]).unwrap();
        let set = PositionSet::from_longitudes(day(), &[(Body::Mars, 359.5), (Body::Sun, 0.5)]);
        let matches = matcher.detect(&set);
        assert_eq!(matches.len(), 1);
        assert!((matches[0].separation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_body_is_skipped() {
        let matcher = PatternMatcher::with_default_catalog().unwrap();
        let set = PositionSet::from_longitudes(day(), &[(Body::Mars, 10.0), (Body::Saturn, 10.0)]);
        let matches = matcher.detect(&set);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule_id, "mars_saturn_conjunction");
    }

    #[test]
    fn test_invalid_orb_rejected() {
        let result = PatternMatcher::new(vec![rule("flat", Body::Mars, Body::Sun, 0.0)]);
        assert!(matches!(result, Err(CoreError::Configuration { .. })));
        let negative = PatternMatcher::new(vec![rule("neg", Body::Mars, Body::Sun, -2.0)]);
        assert!(negative.is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let rules = vec![
            rule("same", Body::Mars, Body::Sun, 6.0),
            rule("same", Body::Moon, Body::Sun, 6.0),
        ];
        assert!(PatternMatcher::new(rules).is_err());
    }

    #[test]
    fn test_feedback_running_average() {
        let mut matcher = PatternMatcher::with_default_catalog().unwrap();
        for _ in 0..3 {
            matcher.record_feedback("rahu_sun_conjunction", true, 1.0).unwrap();
        }
        let fb = matcher.feedback("rahu_sun_conjunction").unwrap();
        assert_eq!(fb.confirmed_count, 3);
        assert!((fb.accuracy - 1.0).abs() < 1e-12);

        // Rejection averages in a zero without bumping the counter
        let after = matcher.record_feedback("rahu_sun_conjunction", false, 0.0).unwrap();
        assert_eq!(after.confirmed_count, 3);
        assert!((after.accuracy - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_weight_is_rejected() {
        let mut matcher = PatternMatcher::with_default_catalog().unwrap();
        for weight in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                matcher.record_feedback("mars_saturn_conjunction", true, weight),
                Err(CoreError::Configuration { .. })
            ));
        }
        let fb = matcher.feedback("mars_saturn_conjunction").unwrap();
        assert_eq!(*fb, RuleFeedback::default());

        let set = PositionSet::from_longitudes(day(), &[(Body::Mars, 10.0), (Body::Saturn, 10.9)]);
        let matches = matcher.detect(&set);
        assert_eq!(matches.len(), 1);
        assert!((0.0..=1.0).contains(&matches[0].confidence));
    }

    #[test]
    fn test_confidence_of_undefined_separation_is_zero() {
        let matcher = PatternMatcher::with_default_catalog().unwrap();
        let rule = &matcher.rules()[0];
        assert_eq!(matcher.confidence(rule, f64::NAN), 0.0);
    }

    #[test]
    fn test_transit_range_ending_at_calendar_limit() {
        let matcher = PatternMatcher::new(vec![rule("mars_sun", Body::Mars, Body::Sun, 6.0)]).unwrap();
        let last = NaiveDate::MAX;
        let mut table = TransitTable::new();
        table.insert(last, PositionSet::from_longitudes(last, &[(Body::Mars, 10.0), (Body::Sun, 10.5)]));
        let start = last - Duration::days(2);
        let matches = matcher.detect_over_transit_range(&table, start, last);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_date, last);
    }

    #[test]
    fn test_feedback_unknown_rule() {
        let mut matcher = PatternMatcher::with_default_catalog().unwrap();
        assert!(matches!(
            matcher.record_feedback("venus_jupiter", true, 1.0),
            Err(CoreError::Lookup { kind: "rule", .. })
        ));
    }

    #[test]
    fn test_feedback_raises_confidence() {
        let mut matcher = PatternMatcher::new(vec![rule("mars_sun", Body::Mars, Body::Sun, 6.0)]).unwrap();
        let set = PositionSet::from_longitudes(day(), &[(Body::Mars, 10.0), (Body::Sun, 13.0)]);
        // closeness 0.5 alone does not fire
        assert!(matcher.detect(&set).is_empty());

        matcher.record_feedback("mars_sun", true, 1.0).unwrap();
        matcher.record_feedback("mars_sun", true, 1.0).unwrap();
        // 0.5 + 0.1 + 0.1
        let matches = matcher.detect(&set);
        assert_eq!(matches.len(), 1);
        assert!((matches[0].confidence - 0.7).abs() < 1e-12);
        assert_eq!(matches[0].accuracy, 1.0);
    }

    #[test]
    fn test_statistics() {
        let mut matcher = PatternMatcher::with_default_catalog().unwrap();
        matcher.record_feedback("ketu_moon_conjunction", true, 0.8).unwrap();
        matcher.record_feedback("mars_saturn_conjunction", true, 0.4).unwrap();
        let stats = matcher.statistics();
        assert_eq!(stats.total_rules, 4);
        assert_eq!(stats.confirmed_rules, 2);
        assert!((stats.average_accuracy - 0.6).abs() < 1e-12);
        assert_eq!(stats.details["ketu_moon_conjunction"].severity, 7);
    }

    #[test]
    fn test_transit_range_skips_missing_days() {
        let matcher = PatternMatcher::new(vec![rule("mars_sun", Body::Mars, Body::Sun, 6.0)]).unwrap();
        let start = day();
        let mut table = TransitTable::new();
        for offset in [0, 1, 3] {
            let date = start + Duration::days(offset);
            table.insert(date, PositionSet::from_longitudes(date, &[(Body::Mars, 10.0), (Body::Sun, 10.5)]));
        }
        let matches = matcher.detect_over_transit_range(&table, start, start + Duration::days(3));
        let dates: Vec<NaiveDate> = matches.iter().map(|m| m.match_date).collect();
        assert_eq!(dates, vec![start, start + Duration::days(1), start + Duration::days(3)]);
    }
}
