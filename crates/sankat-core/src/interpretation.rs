//! Sign-based readings of a birth chart.
//!
//! Strength follows the classical exaltation, debilitation and own-sign tables;
//! the house readings only look at which bodies occupy the 7th and 10th houses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ephemeris::types::{Body, PositionSet};

pub const CAREER_HOUSE: u8 = 10;
pub const PARTNERSHIP_HOUSE: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strength {
    Exalted,
    OwnSign,
    Neutral,
    Debilitated,
}

impl Strength {
    pub fn label(self) -> &'static str {
        match self {
            Strength::Exalted => "Exalted (Very Strong)",
            Strength::OwnSign => "Own Sign (Strong)",
            Strength::Neutral => "Neutral",
            Strength::Debilitated => "Debilitated (Weak)",
        }
    }
}

// (body, exaltation sign, own signs); debilitation is the sign opposite exaltation
const DIGNITY_TABLE: &[(Body, usize, &[usize])] = &[
    (Body::Sun, 0, &[4]),
    (Body::Moon, 1, &[3]),
    (Body::Mercury, 5, &[2, 5]),
    (Body::Venus, 11, &[1, 6]),
    (Body::Mars, 9, &[0, 7]),
    (Body::Jupiter, 3, &[8, 11]),
    (Body::Saturn, 6, &[9, 10]),
    (Body::Rahu, 1, &[]),
    (Body::Ketu, 7, &[]),
];

/// Strength of `body` in the sign with index `sign_index` (0 = Aries).
pub fn planet_strength(body: Body, sign_index: usize) -> Strength {
    let Some(&(_, exalted, own)) = DIGNITY_TABLE.iter().find(|(b, _, _)| *b == body) else {
        return Strength::Neutral;
    };
    let sign = sign_index % 12;
    if sign == exalted {
        Strength::Exalted
    } else if sign == (exalted + 6) % 12 {
        Strength::Debilitated
    } else if own.contains(&sign) {
        Strength::OwnSign
    } else {
        Strength::Neutral
    }
}

/// Character lines from the Ascendant and Moon signs.
pub fn personality(positions: &PositionSet) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(asc) = positions.get(Body::Ascendant) {
        lines.push(format!(
            "Your Ascendant in {} gives you a core personality that is energetic and pioneering.",
            asc.sign
        ));
    }
    if let Some(moon) = positions.get(Body::Moon) {
        lines.push(format!(
            "Your Moon in {} indicates your mind is analytical, practical, and detail-oriented.",
            moon.sign
        ));
    }
    lines
}

pub fn career(positions: &PositionSet) -> Vec<String> {
    let occupants = positions.occupants(CAREER_HOUSE);
    if occupants.is_empty() {
        return vec![
            "With an empty 10th house, your career is more influenced by the lord of the 10th house and its placement."
                .to_string(),
        ];
    }
    occupants
        .into_iter()
        .map(|body| {
            format!("{body} in your 10th house of career indicates a profession related to leadership and authority.")
        })
        .collect()
}

pub fn relationships(positions: &PositionSet) -> Vec<String> {
    let occupants = positions.occupants(PARTNERSHIP_HOUSE);
    if occupants.is_empty() {
        return vec![
            "Your 7th house is unoccupied, suggesting that partnerships will be strongly influenced by the 7th lord and transiting planets."
                .to_string(),
        ];
    }
    occupants
        .into_iter()
        .map(|body| {
            format!(
                "The presence of {body} in your 7th house of partnership brings intensity and transformation to your relationships."
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartReading {
    pub strengths: BTreeMap<Body, Strength>,
    pub personality: Vec<String>,
    pub career: Vec<String>,
    pub relationships: Vec<String>,
}

/// Full reading of a position set. The Ascendant gets no strength entry.
pub fn interpret(positions: &PositionSet) -> ChartReading {
    let strengths = positions
        .iter()
        .filter(|p| p.body != Body::Ascendant)
        .map(|p| (p.body, planet_strength(p.body, p.sign_index)))
        .collect();

    ChartReading {
        strengths,
        personality: personality(positions),
        career: career(positions),
        relationships: relationships(positions),
    }
}
