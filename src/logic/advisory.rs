use crate::models::{Advisory, Profile, RiskTier};

const HIGH_RISK_AVOID: &[&str] = &[
    "Continuous outdoor work longer than 45 minutes",
    "Strenuous tasks between 11 AM and 4 PM",
];

const HIGH_RISK_RECOMMEND: &[&str] = &[
    "Take a shaded rest break every 30 minutes",
    "Drink 250 ml of water every 20 minutes, even without thirst",
    "Work in pairs and watch each other for heat stress symptoms",
];

const HIGH_RISK_SCHEDULE: &str =
    "Work 6 AM - 11 AM and 4 PM - 7 PM only, with a shaded break every 30 minutes";

const EXTREME_RISK_AVOID: &[&str] = &[
    "All outdoor work between 10 AM and 5 PM",
    "Any strenuous activity in direct sun",
    "Working alone outdoors",
];

const EXTREME_RISK_RECOMMEND: &[&str] = &[
    "Mandatory 15 minute cooling break every 30 minutes",
    "Drink 250 ml of water every 15 minutes",
    "Know the emergency number (108) and the nearest cooling shelter",
];

const EXTREME_RISK_SCHEDULE: &str =
    "Work only 5 AM - 9 AM and after 6 PM, with mandatory breaks every 30 minutes";

fn extend_unique(list: &mut Vec<String>, items: &[&str]) {
    for item in items {
        if !list.iter().any(|existing| existing == item) {
            list.push(item.to_string());
        }
    }
}

/// Combine a profile's base template with the supplement for `tier`.
///
/// Base items always come first. Supplemental items are appended in a fixed
/// order and skipped only when an identical string is already present.
pub fn compose(profile: &Profile, tier: RiskTier) -> Advisory {
    let mut avoid = profile.avoid.clone();
    let mut recommend = profile.recommend.clone();

    let schedule = match tier {
        RiskTier::Safe | RiskTier::Mild => profile.schedule.clone(),
        RiskTier::High => {
            extend_unique(&mut avoid, HIGH_RISK_AVOID);
            extend_unique(&mut recommend, HIGH_RISK_RECOMMEND);
            HIGH_RISK_SCHEDULE.to_string()
        }
        RiskTier::Extreme => {
            extend_unique(&mut avoid, EXTREME_RISK_AVOID);
            extend_unique(&mut recommend, EXTREME_RISK_RECOMMEND);
            EXTREME_RISK_SCHEDULE.to_string()
        }
    };

    Advisory {
        profile_id: profile.id.clone(),
        tier,
        avoid,
        recommend,
        schedule,
        guidance: tier.guidance().to_string(),
    }
}
