use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ephemeris::types::Body;

/// What a statement rests on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Support {
    #[serde(rename = "patternIds", skip_serializing_if = "Vec::is_empty", default)]
    pub pattern_ids: Vec<String>,
    #[serde(rename = "phaseBody", skip_serializing_if = "Option::is_none", default)]
    pub phase_body: Option<Body>,
}

/// A dated, confidence-scored forward-looking statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub id: String,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub confidence: f64,
    pub factors: BTreeMap<String, f64>,
    pub support: Support,
    pub remedies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccuracyRecord {
    pub total: u32,
    pub confirmed: u32,
    /// Percentage in [0, 100]
    pub rate: f64,
}

/// User-reported outcome for a previously issued statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(rename = "statementId")]
    pub statement_id: String,
    pub outcome: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    #[serde(rename = "overallAccuracy")]
    pub overall_accuracy: f64,
    pub total: u32,
    pub confirmed: u32,
    pub suggestions: Vec<String>,
}
