use super::weather::{AqiCategory, RiskTier, SampleRecord, UvCategory, WeatherSample};
use crate::error::{HeatwiseError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Samples for one location over a fixed lookback window, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySeries {
    lookback_days: u32,
    samples: Vec<WeatherSample>,
}

impl HistorySeries {
    /// Fails if timestamps go backwards or any reading is not a finite number.
    pub fn new(lookback_days: u32, samples: Vec<WeatherSample>) -> Result<Self> {
        for sample in &samples {
            sample.validate()?;
        }

        if let Some(pair) = samples
            .windows(2)
            .find(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            return Err(HeatwiseError::InvalidData(format!(
                "history is not in time order: {} follows {}",
                pair[1].timestamp, pair[0].timestamp
            )));
        }

        Ok(Self {
            lookback_days,
            samples,
        })
    }

    /// Sorts the samples first; for feeds that do not guarantee order.
    /// Unclassifiable samples are dropped with a warning.
    pub fn from_unordered(lookback_days: u32, mut samples: Vec<WeatherSample>) -> Self {
        samples.retain(|s| match s.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(timestamp = %s.timestamp, "dropping history sample: {}", e);
                false
            }
        });
        samples.sort_by_key(|s| s.timestamp);
        Self {
            lookback_days,
            samples,
        }
    }

    pub fn empty(lookback_days: u32) -> Self {
        Self {
            lookback_days,
            samples: Vec::new(),
        }
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    pub fn samples(&self) -> &[WeatherSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&WeatherSample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&WeatherSample> {
        self.samples.last()
    }

    /// Keep only samples within `lookback_days` of the newest sample.
    pub fn trimmed(&self) -> Self {
        let Some(newest) = self.last() else {
            return self.clone();
        };
        let cutoff = newest.timestamp.date_naive()
            - chrono::Duration::days(self.lookback_days.saturating_sub(1) as i64);
        let samples = self
            .samples
            .iter()
            .filter(|s| s.timestamp.date_naive() >= cutoff)
            .cloned()
            .collect();
        Self {
            lookback_days: self.lookback_days,
            samples,
        }
    }
}

impl<'de> Deserialize<'de> for HistorySeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default = "default_lookback")]
            lookback_days: u32,
            samples: Vec<SampleRecord>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut samples = Vec::with_capacity(raw.samples.len());
        for record in raw.samples {
            match WeatherSample::try_from(record) {
                Ok(sample) => samples.push(sample),
                Err(e) => tracing::warn!("dropping history record: {}", e),
            }
        }
        HistorySeries::new(raw.lookback_days, samples).map_err(serde::de::Error::custom)
    }
}

fn default_lookback() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Stable,
    Unknown,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "↑ Rising",
            Trend::Falling => "↓ Falling",
            Trend::Stable => "→ Stable",
            Trend::Unknown => "? Unknown",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
        }
    }

    pub fn value(&self, sample: &WeatherSample) -> f64 {
        match self {
            Metric::Temperature => sample.temperature_c,
            Metric::Humidity => sample.humidity_pct,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub metric: Metric,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Last value minus first value. Not a regression fit.
    pub trend: f64,
    pub direction: Trend,
    /// Fewer than two samples; `trend` is reported as zero.
    pub insufficient_data: bool,
    pub sample_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricSummary {
    NoData { metric: Metric },
    Summary(TrendSummary),
}

impl MetricSummary {
    pub fn summary(&self) -> Option<&TrendSummary> {
        match self {
            MetricSummary::Summary(s) => Some(s),
            MetricSummary::NoData { .. } => None,
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self, MetricSummary::Summary(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertsSummary {
    pub heat_wave_days: usize,
    pub high_uv_days: usize,
    pub poor_aqi_days: usize,
    pub days_observed: usize,
    pub current_heat: Option<RiskTier>,
    pub current_uv: Option<UvCategory>,
    pub current_aqi: Option<AqiCategory>,
}

impl AlertsSummary {
    pub fn total_alert_days(&self) -> usize {
        self.heat_wave_days + self.high_uv_days + self.poor_aqi_days
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub temperature: MetricSummary,
    pub humidity: MetricSummary,
    pub alerts: AlertsSummary,
}

/// Headline figures for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAnalytics {
    pub peak_temp_c: Option<f64>,
    pub avg_humidity_pct: Option<f64>,
    pub peak_aqi: Option<f64>,
    pub peak_uv: Option<f64>,
    pub heat_alerts: usize,
}

/// A named region's history, as input to the regional comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionHistory {
    pub region: String,
    pub history: HistorySeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    pub region: String,
    pub heat_alerts: usize,
    pub avg_temp_c: Option<f64>,
    pub risk: Option<RiskTier>,
}
