use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ephemeris::types::Body;

/// Immutable definition of a two-body configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub bodies: (Body, Body),
    /// Largest separation in degrees that still counts as a match
    pub orb: f64,
    pub severity: u8,
    pub effects: Vec<String>,
    pub remedies: Vec<String>,
}

/// Running feedback for one rule, owned by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleFeedback {
    #[serde(rename = "confirmedCount")]
    pub confirmed_count: u32,
    /// Running accuracy in [0, 1]
    pub accuracy: f64,
}

/// A rule that fired against one position set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    #[serde(rename = "ruleName")]
    pub rule_name: String,
    pub description: String,
    #[serde(rename = "matchDate")]
    pub match_date: NaiveDate,
    /// Exact longitudes of the two bodies
    pub longitudes: BTreeMap<Body, f64>,
    pub separation: f64,
    pub confidence: f64,
    pub orb: f64,
    /// Rule accuracy at match time
    pub accuracy: f64,
    pub severity: u8,
    #[serde(rename = "predictedEffects")]
    pub predicted_effects: Vec<String>,
    pub remedies: Vec<String>,
}

impl PatternMatch {
    /// How close to exact the match is, 1.0 at zero separation.
    pub fn orb_accuracy(&self) -> f64 {
        if self.orb > 0.0 {
            ((self.orb - self.separation) / self.orb).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleStatistics {
    pub name: String,
    #[serde(rename = "confirmedCount")]
    pub confirmed_count: u32,
    pub accuracy: f64,
    pub severity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStatistics {
    #[serde(rename = "totalRules")]
    pub total_rules: usize,
    #[serde(rename = "confirmedRules")]
    pub confirmed_rules: usize,
    /// Mean accuracy over rules with at least one confirmation
    #[serde(rename = "averageAccuracy")]
    pub average_accuracy: f64,
    pub details: BTreeMap<String, RuleStatistics>,
}
