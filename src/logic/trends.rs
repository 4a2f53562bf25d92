//! Multi-day history aggregation: per-metric trends and alert day counts.

use super::calculations::{self, daily_peaks};
use super::classifier::{classify_aqi, classify_temperature, classify_uv};
use crate::models::{
    AlertsSummary, HistorySeries, HistorySummary, LocationAnalytics, Metric, MetricSummary,
    RegionHistory, RegionReport, Trend, TrendSummary,
};

/// Changes smaller than this read as stable.
const STABLE_BAND: f64 = 0.5;

pub fn summarize(history: &HistorySeries) -> HistorySummary {
    HistorySummary {
        temperature: summarize_metric(history, Metric::Temperature),
        humidity: summarize_metric(history, Metric::Humidity),
        alerts: count_alerts(history),
    }
}

pub fn summarize_metric(history: &HistorySeries, metric: Metric) -> MetricSummary {
    let values: Vec<f64> = history.samples().iter().map(|s| metric.value(s)).collect();

    let (Some(average), Some(min), Some(max)) = (
        calculations::mean(&values),
        calculations::min(&values),
        calculations::max(&values),
    ) else {
        return MetricSummary::NoData { metric };
    };

    let insufficient_data = values.len() < 2;
    let trend = match (values.first(), values.last()) {
        (Some(first), Some(last)) if !insufficient_data => last - first,
        _ => 0.0,
    };

    let direction = if insufficient_data {
        Trend::Unknown
    } else if trend >= STABLE_BAND {
        Trend::Rising
    } else if trend <= -STABLE_BAND {
        Trend::Falling
    } else {
        Trend::Stable
    };

    MetricSummary::Summary(TrendSummary {
        metric,
        average,
        min,
        max,
        trend,
        direction,
        insufficient_data,
        sample_count: values.len(),
    })
}

/// Count threshold-crossing days over the whole window, using each day's
/// peak readings.
pub fn count_alerts(history: &HistorySeries) -> AlertsSummary {
    let days = daily_peaks(history.samples());

    let mut alerts = AlertsSummary {
        days_observed: days.len(),
        ..AlertsSummary::default()
    };

    for day in &days {
        match day.high_temp_c.map(classify_temperature) {
            Some(Ok(tier)) if tier.is_heat_wave() => alerts.heat_wave_days += 1,
            Some(Ok(_)) => {}
            Some(Err(e)) => tracing::warn!(date = %day.date, "skipping day: {}", e),
            None => tracing::warn!(date = %day.date, "skipping day: no finite temperature"),
        }
        if day.max_uv.map(classify_uv).is_some_and(|c| c.is_high()) {
            alerts.high_uv_days += 1;
        }
        if day.max_aqi.map(classify_aqi).is_some_and(|c| c.is_poor()) {
            alerts.poor_aqi_days += 1;
        }
    }

    if let Some(current) = history.last() {
        alerts.current_heat = classify_temperature(current.temperature_c).ok();
        alerts.current_uv = current
            .uv_index
            .filter(|v| v.is_finite())
            .map(classify_uv);
        alerts.current_aqi = current.aqi.filter(|v| v.is_finite()).map(classify_aqi);
    }

    alerts
}

/// Headline figures for a location: peak temperature, mean humidity, peak
/// AQI and UV, and the number of heat-wave days.
pub fn location_analytics(history: &HistorySeries) -> LocationAnalytics {
    let samples = history.samples();
    let temps: Vec<f64> = samples.iter().map(|s| s.temperature_c).collect();
    let humidity: Vec<f64> = samples.iter().map(|s| s.humidity_pct).collect();

    LocationAnalytics {
        peak_temp_c: calculations::max(&temps),
        avg_humidity_pct: calculations::mean(&humidity),
        peak_aqi: calculations::peak_aqi(samples),
        peak_uv: calculations::peak_uv(samples),
        heat_alerts: count_alerts(history).heat_wave_days,
    }
}

/// Compare regions by heat-wave frequency, most alerts first.
pub fn rank_regions(regions: &[RegionHistory]) -> Vec<RegionReport> {
    let mut reports: Vec<RegionReport> = regions
        .iter()
        .map(|r| {
            let temps: Vec<f64> = r
                .history
                .samples()
                .iter()
                .map(|s| s.temperature_c)
                .collect();
            let avg_temp_c = calculations::mean(&temps);
            RegionReport {
                region: r.region.clone(),
                heat_alerts: count_alerts(&r.history).heat_wave_days,
                avg_temp_c,
                risk: avg_temp_c.and_then(|t| classify_temperature(t).ok()),
            }
        })
        .collect();

    reports.sort_by(|a, b| {
        b.heat_alerts
            .cmp(&a.heat_alerts)
            .then_with(|| a.region.cmp(&b.region))
    });
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskTier, UvCategory, WeatherSample};
    use chrono::{Duration, TimeZone, Utc};

    fn week(temps: &[f64]) -> HistorySeries {
        let base = Utc.with_ymd_and_hms(2024, 5, 6, 14, 0, 0).unwrap();
        let samples = temps
            .iter()
            .enumerate()
            .map(|(i, t)| WeatherSample::new(base + Duration::days(i as i64), *t, 50.0 + i as f64))
            .collect();
        HistorySeries::new(7, samples).unwrap()
    }

    #[test]
    fn seven_day_heat_wave_count() {
        let history = week(&[38.0, 41.0, 44.0, 42.0, 39.0, 37.0, 35.0]);
        let summary = summarize(&history);
        // 39°C also classifies as high, so five days cross the threshold.
        assert_eq!(summary.alerts.heat_wave_days, 5);
        assert_eq!(summary.alerts.days_observed, 7);
        assert_eq!(summary.alerts.current_heat, Some(RiskTier::Mild));
    }

    #[test]
    fn heat_wave_count_only_high_or_extreme() {
        let history = week(&[38.0, 41.0, 44.0, 42.0, 37.0, 36.0, 35.0]);
        assert_eq!(count_alerts(&history).heat_wave_days, 4);
    }

    #[test]
    fn nan_reading_does_not_hide_a_heat_wave_day() {
        let yaml = r#"
lookback_days: 7
samples:
  - { timestamp: 2024-05-06T08:00:00Z, temperature_c: .nan, humidity_pct: 50 }
  - { timestamp: 2024-05-06T14:00:00Z, temperature_c: 44, humidity_pct: 40 }
"#;
        let history: HistorySeries = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(history.len(), 1);

        let summary = summarize(&history);
        assert_eq!(summary.alerts.heat_wave_days, 1);
        let temp = summary.temperature.summary().unwrap();
        assert_eq!(temp.average, 44.0);
        assert_eq!(temp.max, 44.0);
        assert_eq!(temp.direction, Trend::Unknown);
    }

    #[test]
    fn empty_history_reports_no_data() {
        let summary = summarize(&HistorySeries::empty(7));
        assert_eq!(
            summary.temperature,
            MetricSummary::NoData {
                metric: Metric::Temperature
            }
        );
        assert!(!summary.humidity.has_data());
        assert_eq!(summary.alerts.days_observed, 0);
        assert_eq!(summary.alerts.current_heat, None);
    }

    #[test]
    fn trend_is_last_minus_first() {
        let history = week(&[38.0, 41.0, 44.0, 42.0, 39.0, 37.0, 35.5]);
        let temp = summarize(&history).temperature;
        let temp = temp.summary().unwrap();
        assert_eq!(temp.trend, 35.5 - 38.0);
        assert_eq!(temp.direction, Trend::Falling);
        assert_eq!(temp.min, 35.5);
        assert_eq!(temp.max, 44.0);
        assert!(!temp.insufficient_data);

        let humidity = summarize_metric(&history, Metric::Humidity);
        let humidity = humidity.summary().unwrap();
        assert_eq!(humidity.trend, 6.0);
        assert_eq!(humidity.direction, Trend::Rising);
        assert_eq!(humidity.average, 53.0);
    }

    #[test]
    fn single_sample_is_insufficient() {
        let summary = summarize_metric(&week(&[40.0]), Metric::Temperature);
        let s = summary.summary().unwrap();
        assert!(s.insufficient_data);
        assert_eq!(s.trend, 0.0);
        assert_eq!(s.direction, Trend::Unknown);
        assert_eq!(s.average, 40.0);
    }

    #[test]
    fn small_changes_read_stable() {
        let s = summarize_metric(&week(&[36.0, 39.0, 36.2]), Metric::Temperature);
        assert_eq!(s.summary().unwrap().direction, Trend::Stable);
    }

    #[test]
    fn uv_and_aqi_days_counted_from_daily_peaks() {
        let base = Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap();
        let samples = vec![
            WeatherSample::new(base, 30.0, 60.0).with_uv(2.0).with_aqi(45.0),
            WeatherSample::new(base + Duration::hours(5), 33.0, 55.0)
                .with_uv(7.5)
                .with_aqi(160.0),
            WeatherSample::new(base + Duration::days(1), 31.0, 60.0)
                .with_uv(11.0)
                .with_aqi(90.0),
            WeatherSample::new(base + Duration::days(2), 29.0, 60.0),
        ];
        let alerts = count_alerts(&HistorySeries::new(7, samples).unwrap());
        assert_eq!(alerts.days_observed, 3);
        assert_eq!(alerts.high_uv_days, 2);
        assert_eq!(alerts.poor_aqi_days, 1);
        assert_eq!(alerts.heat_wave_days, 0);
        assert_eq!(alerts.current_uv, None);
        assert_eq!(alerts.total_alert_days(), 3);
    }

    #[test]
    fn current_levels_come_from_last_sample() {
        let base = Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap();
        let samples = vec![
            WeatherSample::new(base, 44.0, 60.0),
            WeatherSample::new(base + Duration::days(1), 39.0, 60.0)
                .with_uv(6.5)
                .with_aqi(120.0),
        ];
        let alerts = count_alerts(&HistorySeries::new(7, samples).unwrap());
        assert_eq!(alerts.current_heat, Some(RiskTier::High));
        assert_eq!(alerts.current_uv, Some(UvCategory::High));
        assert!(alerts.current_aqi.is_some_and(|c| c.is_poor()));
    }

    #[test]
    fn location_analytics_figures() {
        let base = Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap();
        let samples = vec![
            WeatherSample::new(base, 41.0, 60.0).with_aqi(89.0).with_uv(9.5),
            WeatherSample::new(base + Duration::days(1), 43.5, 70.0).with_aqi(112.0),
        ];
        let analytics = location_analytics(&HistorySeries::new(7, samples).unwrap());
        assert_eq!(analytics.peak_temp_c, Some(43.5));
        assert_eq!(analytics.avg_humidity_pct, Some(65.0));
        assert_eq!(analytics.peak_aqi, Some(112.0));
        assert_eq!(analytics.peak_uv, Some(9.5));
        assert_eq!(analytics.heat_alerts, 2);

        let empty = location_analytics(&HistorySeries::empty(7));
        assert_eq!(empty.peak_temp_c, None);
        assert_eq!(empty.peak_uv, None);
        assert_eq!(empty.heat_alerts, 0);
    }

    #[test]
    fn regions_ordered_by_alerts_then_name() {
        let regions = vec![
            RegionHistory {
                region: "Chennai Coastal".into(),
                history: week(&[36.0, 35.0, 37.0]),
            },
            RegionHistory {
                region: "Delhi NCR".into(),
                history: week(&[44.0, 45.0, 43.0]),
            },
            RegionHistory {
                region: "Bangalore Tech".into(),
                history: week(&[32.0, 31.0, 33.0]),
            },
            RegionHistory {
                region: "Pune Industrial".into(),
                history: HistorySeries::empty(7),
            },
        ];
        let reports = rank_regions(&regions);
        let names: Vec<&str> = reports.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Delhi NCR",
                "Bangalore Tech",
                "Chennai Coastal",
                "Pune Industrial"
            ]
        );
        assert_eq!(reports[0].heat_alerts, 3);
        assert_eq!(reports[0].risk, Some(RiskTier::Extreme));
        assert_eq!(reports[2].risk, Some(RiskTier::Mild));
        assert_eq!(reports[3].avg_temp_c, None);
    }
}
