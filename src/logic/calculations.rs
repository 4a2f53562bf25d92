use crate::models::WeatherSample;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().min_by(f64::total_cmp)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().max_by(f64::total_cmp)
}

/// Largest finite value. `total_cmp` ranks NaN above every number, so
/// non-finite values are skipped rather than allowed to win.
fn finite_max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.filter(|v| v.is_finite()).max_by(f64::total_cmp)
}

/// Highest UV reading across the samples that carry one.
pub fn peak_uv(samples: &[WeatherSample]) -> Option<f64> {
    finite_max(samples.iter().filter_map(|s| s.uv_index))
}

/// Highest AQI reading across the samples that carry one.
pub fn peak_aqi(samples: &[WeatherSample]) -> Option<f64> {
    finite_max(samples.iter().filter_map(|s| s.aqi))
}

/// Per-day extremes of one calendar day of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPeak {
    pub date: NaiveDate,
    /// `None` when no reading that day was a finite number.
    pub high_temp_c: Option<f64>,
    pub max_uv: Option<f64>,
    pub max_aqi: Option<f64>,
}

/// Group samples by UTC calendar day and keep each day's peaks, oldest first.
/// Daily series pass through unchanged; hourly series collapse to one entry
/// per day.
pub fn daily_peaks(samples: &[WeatherSample]) -> Vec<DailyPeak> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&WeatherSample>> = BTreeMap::new();
    for sample in samples {
        by_date
            .entry(sample.timestamp.date_naive())
            .or_default()
            .push(sample);
    }

    by_date
        .into_iter()
        .map(|(date, day)| DailyPeak {
            date,
            high_temp_c: finite_max(day.iter().map(|s| s.temperature_c)),
            max_uv: finite_max(day.iter().filter_map(|s| s.uv_index)),
            max_aqi: finite_max(day.iter().filter_map(|s| s.aqi)),
        })
        .collect()
}
