use super::{Geocoder, RouteSource, WeatherSource};
use crate::error::{HeatwiseError, Result};
use crate::models::{Coordinates, HistorySeries, RouteCandidate, SampleRecord, WeatherSample};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Places further than this (in degrees) from a query do not match.
const MATCH_TOLERANCE_DEG: f64 = 0.05;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub current: Option<SampleRecord>,
    #[serde(default)]
    pub history: Vec<SampleRecord>,
}

impl ScenarioPlace {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRoutes {
    pub from: String,
    pub to: String,
    pub candidates: Vec<RouteCandidate>,
}

/// A recorded set of places, readings and route candidates loaded from a
/// YAML or JSON file. Stands in for the live weather, routing and geocoding
/// services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub places: Vec<ScenarioPlace>,
    #[serde(default)]
    pub routes: Vec<ScenarioRoutes>,
}

impl ScenarioFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scenario = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        tracing::debug!(path = %path.display(), "loaded scenario");
        Ok(scenario)
    }

    pub fn place_named(&self, name: &str) -> Option<&ScenarioPlace> {
        self.places
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    fn place_at(&self, at: Coordinates) -> Result<&ScenarioPlace> {
        self.places
            .iter()
            .map(|p| (p, distance_deg(p.coordinates(), at)))
            .filter(|(_, d)| *d <= MATCH_TOLERANCE_DEG)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
            .ok_or_else(|| HeatwiseError::LocationNotFound(at.to_string()))
    }
}

impl Geocoder for ScenarioFile {
    /// Accepts a known place name or a literal `lat,lon` pair.
    fn resolve(&self, query: &str) -> Result<Coordinates> {
        if let Some(place) = self.place_named(query) {
            return Ok(place.coordinates());
        }
        parse_lat_lon(query).ok_or_else(|| HeatwiseError::LocationNotFound(query.to_string()))
    }
}

impl WeatherSource for ScenarioFile {
    fn current(&self, at: Coordinates) -> Result<WeatherSample> {
        let place = self.place_at(at)?;
        let record = place.current.clone().ok_or_else(|| {
            HeatwiseError::NotFound(format!("current conditions for {}", place.name))
        })?;
        Ok(WeatherSample::try_from(record)?)
    }

    /// Unclassifiable records are dropped with a warning rather than failing
    /// the whole window.
    fn history(&self, at: Coordinates, days: u32) -> Result<HistorySeries> {
        let place = self.place_at(at)?;
        let mut samples = Vec::with_capacity(place.history.len());
        for record in &place.history {
            match WeatherSample::try_from(record.clone()) {
                Ok(sample) => samples.push(sample),
                Err(e) => tracing::warn!(place = %place.name, "dropping history record: {}", e),
            }
        }
        Ok(HistorySeries::from_unordered(days, samples).trimmed())
    }
}

impl RouteSource for ScenarioFile {
    fn routes(&self, from: Coordinates, to: Coordinates) -> Result<Vec<RouteCandidate>> {
        let origin = self.place_at(from)?;
        let destination = self.place_at(to)?;
        self.routes
            .iter()
            .find(|r| {
                r.from.eq_ignore_ascii_case(&origin.name)
                    && r.to.eq_ignore_ascii_case(&destination.name)
            })
            .map(|r| r.candidates.clone())
            .ok_or_else(|| {
                HeatwiseError::NotFound(format!(
                    "routes from {} to {}",
                    origin.name, destination.name
                ))
            })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn distance_deg(a: Coordinates, b: Coordinates) -> f64 {
    ((a.latitude - b.latitude).powi(2) + (a.longitude - b.longitude).powi(2)).sqrt()
}

fn parse_lat_lon(s: &str) -> Option<Coordinates> {
    let (lat, lon) = s.split_once(',')?;
    let latitude: f64 = lat.trim().parse().ok()?;
    let longitude: f64 = lon.trim().parse().ok()?;
    ((-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude))
        .then(|| Coordinates::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskTier;

    const SCENARIO: &str = r#"
places:
  - name: Downtown
    latitude: 19.076
    longitude: 72.8777
    current:
      timestamp: 2024-05-12T13:00:00Z
      temperature_c: 42
      humidity_pct: 65
      aqi: 89
    history:
      - { timestamp: 2024-05-07T13:00:00Z, temperature_c: 41, humidity_pct: 60 }
      - { timestamp: 2024-05-06T13:00:00Z, temperature_c: 38, humidity_pct: 62 }
      - { timestamp: 2024-05-08T13:00:00Z, humidity_pct: 60 }
  - name: Airport
    latitude: 19.0896
    longitude: 72.8656
routes:
  - from: Downtown
    to: Airport
    candidates:
      - id: default
        duration_sec: 2100
        distance_m: 18500
        segments:
          - { name: Industrial Rd, temperature_c: 44 }
      - id: alternative
        duration_sec: 2520
        distance_m: 21200
        segments:
          - { name: Coastal Rd, risk_tier: safe }
"#;

    fn scenario() -> ScenarioFile {
        serde_yaml::from_str(SCENARIO).unwrap()
    }

    #[test]
    fn resolves_names_case_insensitively() {
        let s = scenario();
        let c = s.resolve("downtown").unwrap();
        assert_eq!(c.latitude, 19.076);
    }

    #[test]
    fn resolves_literal_coordinates() {
        let c = scenario().resolve("12.97, 77.59").unwrap();
        assert_eq!(c, Coordinates::new(12.97, 77.59));
    }

    #[test]
    fn unknown_place_cannot_be_resolved() {
        assert!(matches!(
            scenario().resolve("Atlantis"),
            Err(HeatwiseError::LocationNotFound(_))
        ));
        assert!(scenario().resolve("95,10").is_err());
    }

    #[test]
    fn current_conditions_by_coordinates() {
        let s = scenario();
        let at = s.resolve("Downtown").unwrap();
        let sample = s.current(at).unwrap();
        assert_eq!(sample.temperature_c, 42.0);
        assert_eq!(sample.aqi, Some(89.0));
    }

    #[test]
    fn far_away_coordinates_do_not_match() {
        let s = scenario();
        assert!(matches!(
            s.current(Coordinates::new(0.0, 0.0)),
            Err(HeatwiseError::LocationNotFound(_))
        ));
    }

    #[test]
    fn missing_current_is_not_found() {
        let s = scenario();
        let at = s.resolve("Airport").unwrap();
        assert!(matches!(s.current(at), Err(HeatwiseError::NotFound(_))));
    }

    #[test]
    fn history_sorted_and_bad_records_dropped() {
        let s = scenario();
        let at = s.resolve("Downtown").unwrap();
        let history = s.history(at, 7).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.first().unwrap().temperature_c, 38.0);
        assert_eq!(history.lookback_days(), 7);
    }

    #[test]
    fn routes_between_places() {
        let s = scenario();
        let from = s.resolve("Downtown").unwrap();
        let to = s.resolve("Airport").unwrap();
        let routes = s.routes(from, to).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].heat_risk(), RiskTier::Extreme);
        assert_eq!(routes[1].heat_risk(), RiskTier::Safe);
        assert!(s.routes(to, from).is_err());
    }
}
