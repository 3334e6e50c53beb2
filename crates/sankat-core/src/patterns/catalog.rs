//! Built-in conjunction rules.

use crate::ephemeris::types::Body;
use crate::patterns::types::PatternRule;

struct RuleRow {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    bodies: (Body, Body),
    orb: f64,
    severity: u8,
    effects: &'static [&'static str],
    remedies: &'static [&'static str],
}

const DEFAULT_RULES: &[RuleRow] = &[
    RuleRow {
        id: "rahu_sun_conjunction",
        name: "Rahu-Sun Conjunction",
        description: "Conjunction causing ego conflicts and authority issues",
        bodies: (Body::Rahu, Body::Sun),
        orb: 6.0,
        severity: 9,
        effects: &[
            "Authority conflicts",
            "Ego issues",
            "Government problems",
            "Father-related issues",
            "Career obstacles",
            "Health problems",
        ],
        remedies: &[
            "Chant Aditya Hridayam daily",
            "Offer water to Sun every morning",
            "Donate copper items on Sundays",
            "Avoid conflicts with authority figures",
        ],
    },
    RuleRow {
        id: "mars_saturn_conjunction",
        name: "Mars-Saturn Conjunction",
        description: "Conjunction causing delays, accidents, and frustrations",
        bodies: (Body::Mars, Body::Saturn),
        orb: 6.0,
        severity: 8,
        effects: &[
            "Accidents",
            "Delays in projects",
            "Frustration",
            "Legal issues",
            "Property disputes",
            "Bone/muscle problems",
        ],
        remedies: &[
            "Recite Hanuman Chalisa daily",
            "Donate iron items on Tuesdays",
            "Avoid risky activities",
            "Practice patience and discipline",
        ],
    },
    RuleRow {
        id: "ketu_moon_conjunction",
        name: "Ketu-Moon Conjunction",
        description: "Conjunction causing mental stress and emotional instability",
        bodies: (Body::Ketu, Body::Moon),
        orb: 4.0,
        severity: 7,
        effects: &[
            "Mental stress",
            "Emotional instability",
            "Depression",
            "Family problems",
            "Mother-related issues",
            "Sleep disorders",
        ],
        remedies: &[
            "Chant Mahamrityunjaya Mantra",
            "Worship Goddess Durga",
            "Practice meditation",
            "Maintain emotional balance",
        ],
    },
    RuleRow {
        id: "rahu_mars_conjunction",
        name: "Rahu-Mars Conjunction (Angarak Yoga)",
        description: "Dangerous conjunction causing accidents and violence",
        bodies: (Body::Rahu, Body::Mars),
        orb: 6.0,
        severity: 9,
        effects: &[
            "Accidents",
            "Violence",
            "Explosions",
            "Surgery",
            "Blood-related issues",
            "Aggressive behavior",
        ],
        remedies: &[
            "Recite Hanuman Chalisa 108 times daily",
            "Donate red items on Tuesdays",
            "Avoid aggressive behavior",
            "Practice anger management",
        ],
    },
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The four default conjunction rules.
pub fn default_rules() -> Vec<PatternRule> {
    DEFAULT_RULES
        .iter()
        .map(|row| PatternRule {
            id: row.id.to_string(),
            name: row.name.to_string(),
            description: row.description.to_string(),
            bodies: row.bodies,
            orb: row.orb,
            severity: row.severity,
            effects: to_strings(row.effects),
            remedies: to_strings(row.remedies),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = default_rules();
        assert_eq!(rules.len(), 4);
        let ketu_moon = rules.iter().find(|r| r.id == "ketu_moon_conjunction").unwrap();
        assert_eq!(ketu_moon.orb, 4.0);
        assert_eq!(ketu_moon.severity, 7);
        assert!(rules.iter().all(|r| r.orb > 0.0 && !r.remedies.is_empty()));
    }
}
