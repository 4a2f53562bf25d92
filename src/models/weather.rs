use crate::error::Unclassifiable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded observation. Produced by ingestion, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi: Option<f64>,
}

impl WeatherSample {
    pub fn new(timestamp: DateTime<Utc>, temperature_c: f64, humidity_pct: f64) -> Self {
        Self {
            timestamp,
            temperature_c,
            humidity_pct,
            uv_index: None,
            aqi: None,
        }
    }

    pub fn with_uv(mut self, uv_index: f64) -> Self {
        self.uv_index = Some(uv_index);
        self
    }

    pub fn with_aqi(mut self, aqi: f64) -> Self {
        self.aqi = Some(aqi);
        self
    }

    /// Every reading the sample carries must be a finite number.
    pub fn validate(&self) -> Result<(), Unclassifiable> {
        finite("temperature_c", self.temperature_c)?;
        finite("humidity_pct", self.humidity_pct)?;
        if let Some(uv) = self.uv_index {
            finite("uv_index", uv)?;
        }
        if let Some(aqi) = self.aqi {
            finite("aqi", aqi)?;
        }
        Ok(())
    }
}

/// Loosely typed reading as delivered by an upstream feed.
///
/// Every field is optional so that a malformed reading can still be parsed
/// and then rejected with a specific reason instead of failing the whole file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleRecord {
    pub timestamp: Option<DateTime<Utc>>,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub uv_index: Option<f64>,
    pub aqi: Option<f64>,
}

impl TryFrom<SampleRecord> for WeatherSample {
    type Error = Unclassifiable;

    fn try_from(record: SampleRecord) -> Result<Self, Self::Error> {
        let timestamp = record
            .timestamp
            .ok_or(Unclassifiable::MissingField("timestamp"))?;
        let temperature_c = finite(
            "temperature_c",
            record
                .temperature_c
                .ok_or(Unclassifiable::MissingField("temperature_c"))?,
        )?;
        let humidity_pct = finite(
            "humidity_pct",
            record
                .humidity_pct
                .ok_or(Unclassifiable::MissingField("humidity_pct"))?,
        )?;

        Ok(Self {
            timestamp,
            temperature_c,
            humidity_pct,
            uv_index: record.uv_index.map(|v| finite("uv_index", v)).transpose()?,
            aqi: record.aqi.map(|v| finite("aqi", v)).transpose()?,
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, Unclassifiable> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Unclassifiable::NonFinite { field, value })
    }
}

/// Heat danger classification, ordered by severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    #[default]
    Safe,
    Mild,
    High,
    Extreme,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Safe,
        RiskTier::Mild,
        RiskTier::High,
        RiskTier::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Safe => "safe",
            RiskTier::Mild => "mild",
            RiskTier::High => "high",
            RiskTier::Extreme => "extreme",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "safe" | "low" => Some(RiskTier::Safe),
            "mild" | "moderate" => Some(RiskTier::Mild),
            "high" => Some(RiskTier::High),
            "extreme" => Some(RiskTier::Extreme),
            _ => None,
        }
    }

    /// Counts toward the heat-wave tally.
    pub fn is_heat_wave(&self) -> bool {
        *self >= RiskTier::High
    }

    /// One-line guidance shown next to the tier badge.
    pub fn guidance(&self) -> &'static str {
        match self {
            RiskTier::Extreme => "EXTREME HEAT WARNING: Avoid outdoor work. Seek immediate cooling.",
            RiskTier::High => "HIGH HEAT RISK: Limit outdoor exposure. Stay hydrated.",
            RiskTier::Mild => "MODERATE CONDITIONS: Take regular breaks in shade.",
            RiskTier::Safe => "SAFE CONDITIONS: Normal outdoor activities permitted.",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// US EPA style air quality band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    pub fn is_poor(&self) -> bool {
        *self >= AqiCategory::Unhealthy
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// WHO UV index band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            UvCategory::Low => "Low",
            UvCategory::Moderate => "Moderate",
            UvCategory::High => "High",
            UvCategory::VeryHigh => "Very High",
            UvCategory::Extreme => "Extreme",
        }
    }

    pub fn is_high(&self) -> bool {
        *self >= UvCategory::High
    }
}

impl std::fmt::Display for UvCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three independent scales for one sample, reported side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub guidance: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi_category: Option<AqiCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_category: Option<UvCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
