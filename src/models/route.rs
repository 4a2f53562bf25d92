use super::weather::{Coordinates, RiskTier};
use serde::{Deserialize, Serialize};

/// A named stretch of a route, in travel order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tier: Option<RiskTier>,
}

impl RouteSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temperature_c: None,
            risk_tier: None,
        }
    }

    pub fn with_temperature(mut self, temperature_c: f64) -> Self {
        self.temperature_c = Some(temperature_c);
        self
    }

    pub fn with_tier(mut self, tier: RiskTier) -> Self {
        self.risk_tier = Some(tier);
        self
    }

    /// Explicit tier if the route service supplied one, otherwise the
    /// classified segment temperature. `None` when neither is usable.
    pub fn resolved_tier(&self) -> Option<RiskTier> {
        self.risk_tier.or_else(|| {
            self.temperature_c
                .and_then(|t| crate::logic::classifier::classify_temperature(t).ok())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub id: String,
    #[serde(default)]
    pub geometry: Vec<Coordinates>,
    pub duration_sec: f64,
    pub distance_m: f64,
    #[serde(default)]
    pub segments: Vec<RouteSegment>,
}

impl RouteCandidate {
    pub fn new(id: impl Into<String>, duration_sec: f64, distance_m: f64) -> Self {
        Self {
            id: id.into(),
            geometry: Vec::new(),
            duration_sec,
            distance_m,
            segments: Vec::new(),
        }
    }

    pub fn with_segment(mut self, segment: RouteSegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Worst resolvable segment tier, `None` if no segment could be rated.
    pub fn worst_tier(&self) -> Option<RiskTier> {
        self.segments
            .iter()
            .filter_map(RouteSegment::resolved_tier)
            .max()
    }

    /// Overall heat badge for the route. Unrated routes read as safe.
    pub fn heat_risk(&self) -> RiskTier {
        self.worst_tier().unwrap_or_default()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.duration_sec / 60.0).round() as i64
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }
}

/// One position in a ranking, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRoute {
    pub position: usize,
    pub route: RouteCandidate,
    pub score: f64,
    pub worst_tier: RiskTier,
    /// No segment carried a tier or temperature; ranked as safe.
    pub unscored: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteRanking {
    pub entries: Vec<RankedRoute>,
}

impl RouteRanking {
    pub fn recommended(&self) -> Option<&RankedRoute> {
        self.entries.first()
    }

    pub fn fastest(&self) -> Option<&RankedRoute> {
        self.entries.iter().min_by(|a, b| {
            a.route
                .duration_sec
                .total_cmp(&b.route.duration_sec)
                .then(a.position.cmp(&b.position))
        })
    }

    pub fn routes(&self) -> Vec<RouteCandidate> {
        self.entries.iter().map(|e| e.route.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Plain-language trade-off between the recommended and the fastest route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAdvice {
    pub recommended_id: String,
    pub fastest_id: String,
    pub extra_minutes: i64,
    pub avoided_tier: Option<RiskTier>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub ranking: RouteRanking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<RouteAdvice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_prefers_explicit_tier() {
        let seg = RouteSegment::new("Main St")
            .with_temperature(44.0)
            .with_tier(RiskTier::Mild);
        assert_eq!(seg.resolved_tier(), Some(RiskTier::Mild));
    }

    #[test]
    fn segment_falls_back_to_temperature() {
        let seg = RouteSegment::new("Industrial Rd").with_temperature(44.0);
        assert_eq!(seg.resolved_tier(), Some(RiskTier::Extreme));
        assert_eq!(RouteSegment::new("Unknown Ln").resolved_tier(), None);
    }

    #[test]
    fn route_heat_risk_is_worst_segment() {
        let route = RouteCandidate::new("default", 2100.0, 18_500.0)
            .with_segment(RouteSegment::new("Main St").with_temperature(36.0))
            .with_segment(RouteSegment::new("Industrial Rd").with_temperature(44.0))
            .with_segment(RouteSegment::new("Highway 101").with_temperature(40.0));
        assert_eq!(route.worst_tier(), Some(RiskTier::Extreme));
        assert_eq!(route.heat_risk(), RiskTier::Extreme);
        assert_eq!(route.duration_minutes(), 35);
        assert!((route.distance_km() - 18.5).abs() < 1e-9);
    }

    #[test]
    fn route_without_segments_reads_safe() {
        let route = RouteCandidate::new("bare", 600.0, 1000.0);
        assert_eq!(route.worst_tier(), None);
        assert_eq!(route.heat_risk(), RiskTier::Safe);
    }

    #[test]
    fn route_deserializes_without_optional_fields() {
        let json = r#"{"id":"r1","duration_sec":1200,"distance_m":9000,
            "segments":[{"name":"Coastal Rd"}]}"#;
        let route: RouteCandidate = serde_json::from_str(json).unwrap();
        assert!(route.geometry.is_empty());
        assert_eq!(route.segments[0].temperature_c, None);
    }
}
