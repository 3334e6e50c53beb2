//! Vimshottari dasha calculations.
//!
//! Dashas are time periods ruled by bodies, seeded by the Moon's nakshatra at birth.
//! A full cycle of nine Mahadashas covers 120 years; each subdivides into nine
//! Antardashas, which subdivide once more into Pratyantardashas.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ephemeris::types::Body;
use crate::error::{CoreError, Result};
use crate::vedic::nakshatra::find_nakshatra;

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.25;

/// Accuracy percentage a cycle must exceed to verify.
pub const VERIFICATION_THRESHOLD: f64 = 99.9;

type BodyYears = (Body, f64);

pub const VIMSHOTTARI_SEQUENCE: &[BodyYears] = &[
    (Body::Ketu, 7.0),
    (Body::Venus, 20.0),
    (Body::Sun, 6.0),
    (Body::Moon, 10.0),
    (Body::Mars, 7.0),
    (Body::Rahu, 18.0),
    (Body::Jupiter, 16.0),
    (Body::Saturn, 19.0),
    (Body::Mercury, 17.0),
];

/// Depth of a period, with a back-reference to the parent ruler below the top tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "lowercase")]
pub enum PeriodTier {
    Mahadasha,
    Antardasha { parent: Body },
    Pratyantardasha { parent: Body },
}

impl PeriodTier {
    pub fn name(&self) -> &'static str {
        match self {
            PeriodTier::Mahadasha => "Mahadasha",
            PeriodTier::Antardasha { .. } => "Antardasha",
            PeriodTier::Pratyantardasha { .. } => "Pratyantardasha",
        }
    }

    pub fn parent(&self) -> Option<Body> {
        match self {
            PeriodTier::Mahadasha => None,
            PeriodTier::Antardasha { parent } | PeriodTier::Pratyantardasha { parent } => Some(*parent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Body,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(rename = "durationYears")]
    pub duration_years: f64,
    #[serde(rename = "durationMonths")]
    pub duration_months: f64,
    #[serde(rename = "durationDays")]
    pub duration_days: i64,
    /// Pro-rated length of the first Mahadasha; zero for every other node.
    pub balance: f64,
    pub tier: PeriodTier,
}

impl DashaPeriod {
    fn new(lord: Body, start: NaiveDate, years: f64, balance: f64, tier: PeriodTier) -> Result<Self> {
        let end = add_years(start, years)?;
        Ok(Self::spanning(lord, start, end, years, balance, tier))
    }

    fn spanning(lord: Body, start: NaiveDate, end: NaiveDate, years: f64, balance: f64, tier: PeriodTier) -> Self {
        Self {
            lord,
            start,
            end,
            duration_years: years,
            duration_months: years * 12.0,
            duration_days: (years * VIMSHOTTARI_YEAR_DAYS).trunc() as i64,
            balance,
            tier,
        }
    }

    /// Both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Where a period sits relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    Completed,
    Current,
    Future,
}

/// A period tagged with its status on the timeline's reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    #[serde(flatten)]
    pub period: DashaPeriod,
    pub status: PeriodStatus,
}

/// Where a reference date falls inside one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePhase {
    pub period: DashaPeriod,
    #[serde(rename = "referenceDate")]
    pub reference_date: NaiveDate,
    #[serde(rename = "elapsedDays")]
    pub elapsed_days: i64,
    #[serde(rename = "remainingDays")]
    pub remaining_days: i64,
    #[serde(rename = "remainingYears")]
    pub remaining_years: f64,
    #[serde(rename = "completionPercentage")]
    pub completion_percentage: f64,
}

impl ActivePhase {
    pub fn lord(&self) -> Body {
        self.period.lord
    }

    pub fn status(&self) -> String {
        format!("Currently in {} {}", self.period.lord, self.period.tier.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleVerification {
    #[serde(rename = "totalYears")]
    pub total_years: f64,
    #[serde(rename = "expectedYears")]
    pub expected_years: f64,
    #[serde(rename = "accuracyPercentage")]
    pub accuracy_percentage: f64,
    pub passed: bool,
}

impl CycleVerification {
    fn from_total(total_years: f64) -> Self {
        let accuracy_percentage =
            (1.0 - (total_years - VIMSHOTTARI_TOTAL_YEARS).abs() / VIMSHOTTARI_TOTAL_YEARS) * 100.0;
        Self {
            total_years,
            expected_years: VIMSHOTTARI_TOTAL_YEARS,
            accuracy_percentage,
            passed: accuracy_percentage > VERIFICATION_THRESHOLD,
        }
    }
}

/// Mahadasha sequence anchored at birth, plus the inputs that seeded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTimeline {
    #[serde(rename = "birthDate")]
    pub birth_date: NaiveDate,
    pub mansion: String,
    #[serde(rename = "elapsedFraction")]
    pub elapsed_fraction: f64,
    pub periods: Vec<DashaPeriod>,
}

impl PeriodTimeline {
    pub fn new(mansion: &str, elapsed_fraction: f64, birth_date: NaiveDate) -> Result<Self> {
        let periods = build_mahadasha_cycle(mansion, elapsed_fraction, birth_date)?;
        let record = find_nakshatra(mansion)?;
        Ok(Self {
            birth_date,
            mansion: record.name.clone(),
            elapsed_fraction: elapsed_fraction.clamp(0.0, 1.0),
            periods,
        })
    }

    pub fn active_phase(&self, date: NaiveDate) -> Option<ActivePhase> {
        query_active_phase(&self.periods, date)
    }

    /// Every Mahadasha marked completed, current or future as of `date`.
    ///
    /// At most one period is current; a shared boundary day goes to the earlier one.
    pub fn with_status(&self, date: NaiveDate) -> Vec<PeriodEntry> {
        let current = self.periods.iter().position(|p| p.contains(date));
        self.periods
            .iter()
            .enumerate()
            .map(|(idx, period)| {
                let status = match current {
                    Some(active) if idx < active => PeriodStatus::Completed,
                    Some(active) if idx == active => PeriodStatus::Current,
                    Some(_) => PeriodStatus::Future,
                    None if period.end < date => PeriodStatus::Completed,
                    None => PeriodStatus::Future,
                };
                PeriodEntry {
                    period: period.clone(),
                    status,
                }
            })
            .collect()
    }

    /// The Antardasha running on `date`, if the date is inside the timeline.
    pub fn active_sub_phase(&self, date: NaiveDate) -> Result<Option<ActivePhase>> {
        let Some(phase) = self.active_phase(date) else {
            return Ok(None);
        };
        let children = subdivide(&phase.period)?;
        Ok(query_active_phase(&children, date))
    }

    /// Verify the cycle, counting the part of the first period that ran before birth.
    pub fn verify(&self) -> Result<CycleVerification> {
        let first_lord = find_nakshatra(&self.mansion)?.lord;
        let pre_birth = full_years(first_lord)? * self.elapsed_fraction;
        let total: f64 = self.periods.iter().map(|p| p.duration_years).sum();
        Ok(CycleVerification::from_total(total + pre_birth))
    }
}

/// Nine Mahadashas starting at the ruler of `mansion`.
///
/// The first period only runs for the unelapsed share of its full length and is
/// dropped when nothing of it remains.
pub fn build_mahadasha_cycle(
    mansion: &str,
    elapsed_fraction: f64,
    birth_date: NaiveDate,
) -> Result<Vec<DashaPeriod>> {
    validate_period_table(VIMSHOTTARI_SEQUENCE)?;
    let lord = find_nakshatra(mansion)?.lord;
    let start_index = find_sequence_index(lord)?;
    let elapsed = elapsed_fraction.clamp(0.0, 1.0);

    let mut periods = Vec::with_capacity(VIMSHOTTARI_SEQUENCE.len());
    let mut current_start = birth_date;

    for offset in 0..VIMSHOTTARI_SEQUENCE.len() {
        let (body, years) = VIMSHOTTARI_SEQUENCE[(start_index + offset) % VIMSHOTTARI_SEQUENCE.len()];
        let (effective_years, balance) = if offset == 0 {
            let balance = years * (1.0 - elapsed);
            if balance == 0.0 {
                continue;
            }
            (balance, balance)
        } else {
            (years, 0.0)
        };

        let period = DashaPeriod::new(body, current_start, effective_years, balance, PeriodTier::Mahadasha)?;
        current_start = period.end;
        periods.push(period);
    }

    log::debug!(
        "Built {} Mahadashas from {} ({} elapsed {:.4})",
        periods.len(),
        birth_date,
        mansion,
        elapsed
    );
    Ok(periods)
}

/// Nine Antardashas inside a Mahadasha of `parent_years`, starting at the parent ruler.
pub fn build_antardasha_cycle(parent: Body, parent_start: NaiveDate, parent_years: f64) -> Result<Vec<DashaPeriod>> {
    let parent_end = add_years(parent_start, parent_years)?;
    build_sub_cycle(
        parent,
        parent_start,
        parent_end,
        parent_years,
        PeriodTier::Antardasha { parent },
    )
}

/// Split a period one tier down. The children exactly tile `[period.start, period.end]`.
pub fn subdivide(period: &DashaPeriod) -> Result<Vec<DashaPeriod>> {
    let tier = match period.tier {
        PeriodTier::Mahadasha => PeriodTier::Antardasha { parent: period.lord },
        PeriodTier::Antardasha { .. } => PeriodTier::Pratyantardasha { parent: period.lord },
        PeriodTier::Pratyantardasha { .. } => {
            return Err(CoreError::LowestTier {
                tier: period.tier.name(),
            })
        }
    };
    build_sub_cycle(period.lord, period.start, period.end, period.duration_years, tier)
}

// Child ends sit on the running total from the parent start; the last child
// closes on the parent's own end date.
fn build_sub_cycle(
    parent: Body,
    start: NaiveDate,
    end: NaiveDate,
    parent_years: f64,
    tier: PeriodTier,
) -> Result<Vec<DashaPeriod>> {
    validate_period_table(VIMSHOTTARI_SEQUENCE)?;
    let start_index = find_sequence_index(parent)?;
    let count = VIMSHOTTARI_SEQUENCE.len();

    let mut periods = Vec::with_capacity(count);
    let mut child_start = start;
    let mut elapsed_years = 0.0;
    for offset in 0..count {
        let (body, years) = VIMSHOTTARI_SEQUENCE[(start_index + offset) % count];
        let child_years = years * parent_years / VIMSHOTTARI_TOTAL_YEARS;
        elapsed_years += child_years;

        let child_end = if offset + 1 == count {
            end
        } else {
            add_years(start, elapsed_years)?.clamp(child_start, end)
        };
        periods.push(DashaPeriod::spanning(body, child_start, child_end, child_years, 0.0, tier));
        child_start = child_end;
    }
    Ok(periods)
}

/// First period containing `date`, with elapsed and remaining time measured in days.
pub fn query_active_phase(periods: &[DashaPeriod], date: NaiveDate) -> Option<ActivePhase> {
    let period = periods.iter().find(|p| p.contains(date))?;

    let remaining_days = (period.end - date).num_days();
    let elapsed_days = (date - period.start).num_days();
    let span_days = period.duration_years * VIMSHOTTARI_YEAR_DAYS;
    let completion = if span_days > 0.0 {
        elapsed_days as f64 / span_days * 100.0
    } else {
        100.0
    };

    Some(ActivePhase {
        period: period.clone(),
        reference_date: date,
        elapsed_days,
        remaining_days,
        remaining_years: remaining_days as f64 / VIMSHOTTARI_YEAR_DAYS,
        completion_percentage: completion.clamp(0.0, 100.0),
    })
}

/// Compare the summed durations of a cycle with the full 120 years.
pub fn verify_cycle(periods: &[DashaPeriod]) -> CycleVerification {
    CycleVerification::from_total(periods.iter().map(|p| p.duration_years).sum())
}

/// Every period length must be positive and the table must cover 120 years.
pub fn validate_period_table(table: &[(Body, f64)]) -> Result<()> {
    for (body, years) in table {
        if years.is_nan() || *years <= 0.0 {
            return Err(CoreError::configuration(
                body.to_string(),
                format!("period length {years} must be positive"),
            ));
        }
    }
    let total: f64 = table.iter().map(|(_, years)| years).sum();
    if (total - VIMSHOTTARI_TOTAL_YEARS).abs() > 1e-9 {
        return Err(CoreError::configuration(
            "period table",
            format!("total {total} years, expected {VIMSHOTTARI_TOTAL_YEARS}"),
        ));
    }
    Ok(())
}

/// Full Mahadasha length of a body.
pub fn full_years(body: Body) -> Result<f64> {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .find(|(b, _)| *b == body)
        .map(|(_, years)| *years)
        .ok_or_else(|| CoreError::lookup("period ruler", body.to_string()))
}

/// Whole days, plus one when the leftover fraction reaches half a day.
fn add_years(start: NaiveDate, years: f64) -> Result<NaiveDate> {
    let days = years * VIMSHOTTARI_YEAR_DAYS;
    let whole = days.trunc();
    let step = whole as i64 + i64::from(days - whole >= 0.5);
    start
        .checked_add_signed(Duration::days(step))
        .ok_or(CoreError::DateOverflow { start, years })
}

fn find_sequence_index(body: Body) -> Result<usize> {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .position(|(b, _)| *b == body)
        .ok_or_else(|| CoreError::lookup("period ruler", body.to_string()))
}
