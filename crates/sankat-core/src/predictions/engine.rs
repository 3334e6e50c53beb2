use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, VecDeque};

use crate::ephemeris::types::Body;
use crate::error::{CoreError, Result};
use crate::patterns::types::PatternMatch;
use crate::predictions::themes::{default_themes, monthly_theme, PhaseTheme, MONTHLY_EXTRA_REMEDY};
use crate::predictions::types::{AccuracyRecord, AccuracyReport, OutcomeRecord, Statement, Support};
use crate::vedic::dashas::ActivePhase;

/// Horizons in days for period-based statements.
pub const HORIZONS: &[(i64, &str)] = &[(30, "Short-term"), (90, "Medium-term"), (180, "Long-term")];
/// Pattern matches must be more confident than this to become statements.
pub const PATTERN_STATEMENT_THRESHOLD: f64 = 0.7;
pub const MAX_MONTHLY_STATEMENTS: u32 = 6;
pub const MAX_COMBINED_STATEMENTS: usize = 10;
const DAYS_PER_MONTH: i64 = 30;
/// Outcome records kept before the oldest are dropped.
pub const MAX_HISTORY: usize = 500;

/// Turns the active period and pattern matches into ranked statements.
///
/// "Today" is always passed in, so identical inputs give identical output.
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    themes: BTreeMap<Body, PhaseTheme>,
    accuracy: AccuracyRecord,
    history: VecDeque<OutcomeRecord>,
}

impl PredictionEngine {
    pub fn new() -> Result<Self> {
        Self::with_themes(default_themes())
    }

    pub fn with_themes(themes: BTreeMap<Body, PhaseTheme>) -> Result<Self> {
        for (body, theme) in &themes {
            if !(0.0..=1.0).contains(&theme.base_confidence) {
                return Err(CoreError::configuration(
                    format!("{body} theme"),
                    format!("confidence {} is outside [0, 1]", theme.base_confidence),
                ));
            }
        }
        Ok(Self {
            themes,
            accuracy: AccuracyRecord::default(),
            history: VecDeque::new(),
        })
    }

    pub fn theme(&self, body: Body) -> Option<&PhaseTheme> {
        self.themes.get(&body)
    }

    pub fn accuracy(&self) -> AccuracyRecord {
        self.accuracy
    }

    /// The most recent outcomes, oldest first, at most [`MAX_HISTORY`] of them.
    pub fn history(&self) -> &VecDeque<OutcomeRecord> {
        &self.history
    }

    /// One statement per horizon that fits inside `months_ahead`.
    pub fn from_active_phase(&self, phase: &ActivePhase, months_ahead: u32, today: NaiveDate) -> Vec<Statement> {
        let lord = phase.lord();
        let Some(theme) = self.themes.get(&lord) else {
            return Vec::new();
        };
        let reach = i64::from(months_ahead) * DAYS_PER_MONTH;

        HORIZONS
            .iter()
            .filter(|(days, _)| *days <= reach)
            .filter_map(|&(days, label)| {
                let date = today.checked_add_signed(Duration::days(days))?;
                Some(Statement {
                    id: format!("dasha_{lord}_{date}_{label}"),
                    date,
                    category: format!("{label} {}", theme.category),
                    description: format!("{} - {label} manifestation", theme.description),
                    confidence: theme.base_confidence.clamp(0.0, 1.0),
                    factors: BTreeMap::from([("dasha_based".to_string(), 1.0)]),
                    support: Support {
                        pattern_ids: Vec::new(),
                        phase_body: Some(lord),
                    },
                    remedies: theme.remedies.clone(),
                })
            })
            .collect()
    }

    /// One statement per match confident enough to report.
    pub fn from_pattern_matches(&self, matches: &[PatternMatch]) -> Vec<Statement> {
        matches
            .iter()
            .filter(|m| m.confidence > PATTERN_STATEMENT_THRESHOLD)
            .map(|m| Statement {
                id: format!("pattern_{}_{}", m.rule_id, m.match_date),
                date: m.match_date,
                category: m.rule_name.clone(),
                description: m.description.clone(),
                confidence: m.confidence.clamp(0.0, 1.0),
                factors: BTreeMap::from([
                    ("pattern_accuracy".to_string(), m.accuracy),
                    ("orb_accuracy".to_string(), m.orb_accuracy()),
                ]),
                support: Support {
                    pattern_ids: vec![m.rule_id.clone()],
                    phase_body: None,
                },
                remedies: m.remedies.clone(),
            })
            .collect()
    }

    /// Month-by-month statements for up to six months.
    pub fn from_monthly_schedule(&self, phase: &ActivePhase, months_ahead: u32, today: NaiveDate) -> Vec<Statement> {
        let lord = phase.lord();
        let Some(theme) = self.themes.get(&lord) else {
            return Vec::new();
        };
        let remedies: Vec<String> = theme
            .remedies
            .iter()
            .take(2)
            .cloned()
            .chain(std::iter::once(MONTHLY_EXTRA_REMEDY.to_string()))
            .collect();

        (1..=months_ahead.min(MAX_MONTHLY_STATEMENTS))
            .filter_map(|month| {
                let (label, delta) = monthly_theme(month);
                let date = today.checked_add_signed(Duration::days(DAYS_PER_MONTH * i64::from(month)))?;
                Some(Statement {
                    id: format!("monthly_{lord}_{date}"),
                    date,
                    category: format!("{label} in {}", theme.category),
                    description: format!("{} with focus on {}", theme.description, label.to_lowercase()),
                    confidence: (theme.base_confidence + delta).clamp(0.0, 1.0),
                    factors: BTreeMap::from([("monthly_prediction".to_string(), 1.0)]),
                    support: Support {
                        pattern_ids: Vec::new(),
                        phase_body: Some(lord),
                    },
                    remedies: remedies.clone(),
                })
            })
            .collect()
    }

    /// All three sources, most confident first, earlier dates breaking ties, capped at ten.
    pub fn combine(
        &self,
        phase: Option<&ActivePhase>,
        matches: &[PatternMatch],
        months_ahead: u32,
        today: NaiveDate,
    ) -> Vec<Statement> {
        let mut statements = Vec::new();
        if let Some(phase) = phase {
            statements.extend(self.from_active_phase(phase, months_ahead, today));
        }
        statements.extend(self.from_pattern_matches(matches));
        if let Some(phase) = phase {
            statements.extend(self.from_monthly_schedule(phase, months_ahead, today));
        }

        statements.sort_by(|a, b| b.confidence.total_cmp(&a.confidence).then_with(|| a.date.cmp(&b.date)));
        statements.truncate(MAX_COMBINED_STATEMENTS);
        log::debug!("Combined into {} statements", statements.len());
        statements
    }

    /// Count an outcome; ratings above one half count as confirmed.
    pub fn record_outcome(&mut self, statement_id: &str, outcome: &str, rating: f64) -> AccuracyRecord {
        self.accuracy.total = self.accuracy.total.saturating_add(1);
        if rating > 0.5 {
            self.accuracy.confirmed = self.accuracy.confirmed.saturating_add(1);
        }
        self.accuracy.rate =
            (f64::from(self.accuracy.confirmed) / f64::from(self.accuracy.total) * 100.0).clamp(0.0, 100.0);
        if self.history.len() == MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(OutcomeRecord {
            statement_id: statement_id.to_string(),
            outcome: outcome.to_string(),
            rating,
        });
        log::info!(
            "Outcome for {}: rating {:.2}, accuracy now {:.1}%",
            statement_id,
            rating,
            self.accuracy.rate
        );
        self.accuracy
    }

    pub fn accuracy_report(&self) -> AccuracyReport {
        let mut suggestions = Vec::new();
        if self.accuracy.rate < 80.0 {
            suggestions.push("Focus on patterns with highest accuracy rates".to_string());
            suggestions.push("Collect more user feedback for validation".to_string());
            suggestions.push("Refine confidence scoring algorithms".to_string());
        }
        if self.accuracy.total < 10 {
            suggestions.push("Generate more predictions to improve statistical accuracy".to_string());
        }
        AccuracyReport {
            overall_accuracy: self.accuracy.rate,
            total: self.accuracy.total,
            confirmed: self.accuracy.confirmed,
            suggestions,
        }
    }
}
