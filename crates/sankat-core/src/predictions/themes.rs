//! Per-ruler themes and remedies for period-based statements.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ephemeris::types::Body;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTheme {
    pub category: String,
    pub description: String,
    #[serde(rename = "baseConfidence")]
    pub base_confidence: f64,
    pub effects: Vec<String>,
    pub remedies: Vec<String>,
}

// (body, category, description, base confidence, effects, remedies)
type ThemeRow = (
    Body,
    &'static str,
    &'static str,
    f64,
    [&'static str; 4],
    [&'static str; 3],
);

const THEME_TABLE: &[ThemeRow] = &[
    (
        Body::Sun,
        "Career Authority Enhancement",
        "Leadership opportunities and recognition in professional sphere",
        0.75,
        ["Career advancement", "Leadership roles", "Government recognition", "Father-related matters"],
        [
            "Chant Aditya Hridayam daily at sunrise",
            "Offer water to Sun every morning",
            "Donate wheat and jaggery on Sundays",
        ],
    ),
    (
        Body::Moon,
        "Emotional and Family Focus",
        "Increased attention to family matters and emotional well-being",
        0.72,
        ["Family harmony", "Emotional growth", "Home-related matters", "Mother-related issues"],
        [
            "Chant 'Om Chandraya Namaha' 108 times daily",
            "Offer milk to Shiva on Mondays",
            "Practice meditation near water bodies",
        ],
    ),
    (
        Body::Mars,
        "Action and Achievement Period",
        "Time for bold actions and overcoming obstacles through determination",
        0.78,
        ["Goal achievement", "Physical activities", "Property matters", "Competitive success"],
        [
            "Recite Hanuman Chalisa daily",
            "Donate red lentils on Tuesdays",
            "Practice physical exercise regularly",
        ],
    ),
    (
        Body::Mercury,
        "Communication and Learning Phase",
        "Enhanced communication skills and learning opportunities",
        0.74,
        ["Business success", "Communication skills", "Learning opportunities", "Travel"],
        [
            "Chant 'Om Budhaya Namaha' daily",
            "Donate green items on Wednesdays",
            "Engage in learning and teaching",
        ],
    ),
    (
        Body::Jupiter,
        "Wisdom and Expansion Period",
        "Spiritual growth, education, and expansion of knowledge",
        0.80,
        ["Spiritual growth", "Educational success", "Financial expansion", "Religious activities"],
        [
            "Chant 'Om Gurave Namaha' daily",
            "Donate yellow items on Thursdays",
            "Practice charity and help teachers",
        ],
    ),
    (
        Body::Venus,
        "Relationship and Creative Focus",
        "Emphasis on relationships, creativity, and artistic pursuits",
        0.76,
        ["Relationship harmony", "Creative success", "Artistic pursuits", "Luxury and comfort"],
        [
            "Chant 'Om Shukraya Namaha' daily",
            "Donate white items on Fridays",
            "Engage in artistic activities",
        ],
    ),
    (
        Body::Saturn,
        "Discipline and Structure Building",
        "Period requiring discipline and long-term planning",
        0.77,
        ["Long-term success", "Disciplined approach", "Responsibility", "Slow but steady progress"],
        [
            "Chant 'Om Shanicharaya Namaha' daily",
            "Donate black items on Saturdays",
            "Practice discipline and serve the needy",
        ],
    ),
    (
        Body::Rahu,
        "Innovation and Worldly Success",
        "Unconventional opportunities and material advancement",
        0.73,
        ["Innovative opportunities", "Foreign connections", "Technology success", "Unconventional gains"],
        [
            "Chant 'Om Rahave Namaha' daily",
            "Donate multicolored items",
            "Practice meditation and charity",
        ],
    ),
    (
        Body::Ketu,
        "Spiritual Detachment Phase",
        "Focus on spirituality and detachment from material concerns",
        0.71,
        ["Spiritual growth", "Detachment", "Research activities", "Inner wisdom"],
        [
            "Chant 'Om Ketave Namaha' daily",
            "Donate spiritual items",
            "Practice spiritual disciplines",
        ],
    ),
];

/// Month themes with their confidence deltas, months 1 through 6.
pub const MONTHLY_THEMES: &[(&str, f64)] = &[
    ("New beginnings", 0.05),
    ("Development", 0.0),
    ("Growth", 0.03),
    ("Stability", 0.02),
    ("Expansion", 0.04),
    ("Consolidation", 0.01),
];

/// Theme for months past the table.
pub const FALLBACK_MONTHLY_THEME: (&str, f64) = ("Progress", 0.0);

pub const MONTHLY_EXTRA_REMEDY: &str = "Daily prayer and positive thinking";

pub fn default_themes() -> BTreeMap<Body, PhaseTheme> {
    THEME_TABLE
        .iter()
        .map(|(body, category, description, confidence, effects, remedies)| {
            (
                *body,
                PhaseTheme {
                    category: category.to_string(),
                    description: description.to_string(),
                    base_confidence: *confidence,
                    effects: effects.iter().map(|s| s.to_string()).collect(),
                    remedies: remedies.iter().map(|s| s.to_string()).collect(),
                },
            )
        })
        .collect()
}

/// Theme and delta for a 1-based month index.
pub fn monthly_theme(month: u32) -> (&'static str, f64) {
    month
        .checked_sub(1)
        .and_then(|idx| MONTHLY_THEMES.get(idx as usize))
        .copied()
        .unwrap_or(FALLBACK_MONTHLY_THEME)
}
