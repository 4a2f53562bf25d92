//! Boundary collaborators. The engine never calls these; the calling layer
//! fetches through them and hands fully materialized values to the engine.

pub mod scenario;

pub use scenario::ScenarioFile;

use crate::error::Result;
use crate::models::{Coordinates, HistorySeries, RouteCandidate, WeatherSample};

/// Free-text place name to coordinates.
pub trait Geocoder {
    fn resolve(&self, query: &str) -> Result<Coordinates>;
}

pub trait WeatherSource {
    fn current(&self, at: Coordinates) -> Result<WeatherSample>;

    fn history(&self, at: Coordinates, days: u32) -> Result<HistorySeries>;
}

pub trait RouteSource {
    fn routes(&self, from: Coordinates, to: Coordinates) -> Result<Vec<RouteCandidate>>;
}
