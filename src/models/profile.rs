use super::weather::RiskTier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Worker,
    Vehicle,
}

impl ProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Worker => "Worker",
            ProfileKind::Vehicle => "Vehicle",
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A profession or vehicle category and its base advisory template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub label: String,
    pub kind: ProfileKind,
    pub avoid: Vec<String>,
    pub recommend: Vec<String>,
    pub schedule: String,
}

impl Profile {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: ProfileKind,
        schedule: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            avoid: Vec::new(),
            recommend: Vec::new(),
            schedule: schedule.into(),
        }
    }

    pub fn avoiding(mut self, items: &[&str]) -> Self {
        self.avoid.extend(items.iter().map(|s| s.to_string()));
        self
    }

    pub fn recommending(mut self, items: &[&str]) -> Self {
        self.recommend.extend(items.iter().map(|s| s.to_string()));
        self
    }

    /// The stock profiles for outdoor workers and transport staff.
    pub fn builtin() -> Vec<Profile> {
        vec![
            Profile::new(
                "construction",
                "Construction Worker",
                ProfileKind::Worker,
                "Start work at 6 AM, break 10 AM-4 PM, resume 4 PM-7 PM",
            )
            .avoiding(&[
                "10 AM - 4 PM outdoor work",
                "Heavy lifting in direct sun",
                "Dark colored protective gear",
            ])
            .recommending(&[
                "Frequent water breaks every 15 mins",
                "Light-colored clothing",
                "Seek shade during breaks",
            ]),
            Profile::new(
                "delivery",
                "Delivery Agent",
                ProfileKind::Worker,
                "Early morning (6-10 AM) and evening (5-8 PM) deliveries",
            )
            .avoiding(&[
                "Long stops in unshaded areas",
                "Heavy packages during peak heat",
                "Closed vehicle cabins",
            ])
            .recommending(&[
                "Pre-cool delivery vehicle",
                "Carry insulated water bottles",
                "Plan shorter routes",
            ]),
            Profile::new(
                "bus",
                "Public Bus",
                ProfileKind::Vehicle,
                "Avoid 11 AM - 4 PM peak heat hours when possible",
            )
            .avoiding(&[
                "Long idling at unshaded stops",
                "Running with a faulty AC system",
            ])
            .recommending(&[
                "Start AC 10 minutes before departure to reduce cabin temperature",
                "Monitor elderly and children for heat stress symptoms",
                "Provide water to elderly and children passengers",
            ]),
            Profile::new(
                "truck",
                "Delivery Truck",
                ProfileKind::Vehicle,
                "Load and dispatch before 11 AM, resume after 4 PM",
            )
            .avoiding(&[
                "Leaving cargo in direct sun during stops",
                "Skipping coolant checks",
            ])
            .recommending(&[
                "Check AC refrigerant and coolant levels weekly during summer",
                "Keep extra water bottles and cooling towels",
                "Monitor dashboard temperature warnings",
            ]),
            Profile::new(
                "taxi",
                "Taxi/Rideshare",
                ProfileKind::Vehicle,
                "Avoid 11 AM - 4 PM peak heat hours when possible",
            )
            .avoiding(&[
                "Waiting for fares in unshaded areas",
                "Running the AC at maximum for hours without a break",
            ])
            .recommending(&[
                "Start AC 10 minutes before departure to reduce cabin temperature",
                "Pull over in shaded areas if experiencing heat exhaustion",
                "Report AC malfunctions immediately",
            ]),
        ]
    }

    /// Map common spellings onto a builtin profile id.
    pub fn canonical_id(s: &str) -> String {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "construction" | "construction worker" | "construction_worker" => "construction",
            "delivery" | "delivery agent" | "delivery_agent" | "courier" => "delivery",
            "bus" | "public bus" | "public_bus" => "bus",
            "truck" | "delivery truck" | "delivery_truck" | "lorry" => "truck",
            "taxi" | "rideshare" | "taxi/rideshare" | "cab" => "taxi",
            other => return other.to_string(),
        }
        .to_string()
    }
}

/// Avoid/recommend/schedule guidance for one profile under one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub profile_id: String,
    pub tier: RiskTier,
    pub avoid: Vec<String>,
    pub recommend: Vec<String>,
    pub schedule: String,
    pub guidance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_have_templates() {
        let profiles = Profile::builtin();
        assert_eq!(profiles.len(), 5);
        for profile in &profiles {
            assert!(!profile.avoid.is_empty(), "{} has no avoid list", profile.id);
            assert!(!profile.recommend.is_empty());
            assert!(!profile.schedule.is_empty());
        }
    }

    #[test]
    fn builtin_ids_are_unique() {
        let profiles = Profile::builtin();
        let mut ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), profiles.len());
    }

    #[test]
    fn canonical_id_aliases() {
        assert_eq!(Profile::canonical_id("Construction Worker"), "construction");
        assert_eq!(Profile::canonical_id("courier"), "delivery");
        assert_eq!(Profile::canonical_id("Rideshare"), "taxi");
        assert_eq!(Profile::canonical_id("LORRY"), "truck");
        assert_eq!(Profile::canonical_id("Farmhand"), "farmhand");
    }

    #[test]
    fn kinds_split_workers_and_vehicles() {
        let profiles = Profile::builtin();
        let workers = profiles
            .iter()
            .filter(|p| p.kind == ProfileKind::Worker)
            .count();
        assert_eq!(workers, 2);
    }
}
