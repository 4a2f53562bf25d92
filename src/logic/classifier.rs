//! Temperature-led heat risk tiers and the independent AQI and UV scales.
//!
//! These thresholds are the only place tiers are derived from readings. Map
//! zones, route segments, worker advisories and the "current risk" of an
//! analytics window all go through here.

use crate::error::Unclassifiable;
use crate::models::{AqiCategory, RiskAssessment, RiskTier, UvCategory, WeatherSample};

pub const EXTREME_TEMP_C: f64 = 42.0;
pub const HIGH_TEMP_C: f64 = 38.0;
pub const MILD_TEMP_C: f64 = 35.0;

/// Map an air temperature onto a risk tier.
///
/// Any finite value classifies, including negative and implausibly high
/// readings. Clamping for display is the caller's business.
pub fn classify_temperature(temp_c: f64) -> Result<RiskTier, Unclassifiable> {
    if !temp_c.is_finite() {
        return Err(Unclassifiable::NonFinite {
            field: "temperature_c",
            value: temp_c,
        });
    }

    let tier = if temp_c >= EXTREME_TEMP_C {
        RiskTier::Extreme
    } else if temp_c >= HIGH_TEMP_C {
        RiskTier::High
    } else if temp_c >= MILD_TEMP_C {
        RiskTier::Mild
    } else {
        RiskTier::Safe
    };
    Ok(tier)
}

pub fn classify(sample: &WeatherSample) -> Result<RiskTier, Unclassifiable> {
    classify_temperature(sample.temperature_c)
}

pub fn classify_aqi(aqi: f64) -> AqiCategory {
    if aqi <= 50.0 {
        AqiCategory::Good
    } else if aqi <= 100.0 {
        AqiCategory::Moderate
    } else if aqi <= 150.0 {
        AqiCategory::Unhealthy
    } else if aqi <= 200.0 {
        AqiCategory::VeryUnhealthy
    } else {
        AqiCategory::Hazardous
    }
}

pub fn classify_uv(uv: f64) -> UvCategory {
    if uv < 3.0 {
        UvCategory::Low
    } else if uv < 6.0 {
        UvCategory::Moderate
    } else if uv < 8.0 {
        UvCategory::High
    } else if uv < 11.0 {
        UvCategory::VeryHigh
    } else {
        UvCategory::Extreme
    }
}

/// Heat tier plus whichever of the AQI and UV scales the sample carries.
/// The scales are reported side by side, never folded into one number.
pub fn assess(sample: &WeatherSample) -> Result<RiskAssessment, Unclassifiable> {
    let tier = classify(sample)?;
    Ok(RiskAssessment {
        tier,
        guidance: tier.guidance().to_string(),
        temperature_c: sample.temperature_c,
        humidity_pct: sample.humidity_pct,
        aqi_category: sample.aqi.filter(|v| v.is_finite()).map(classify_aqi),
        uv_category: sample.uv_index.filter(|v| v.is_finite()).map(classify_uv),
    })
}
