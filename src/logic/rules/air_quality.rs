use super::{HeatContext, Rule};
use crate::models::{AqiCategory, Recommendation, RecommendationCategory, Severity};

/// Air quality rule - fires at unhealthy AQI (above 100) or worse
pub struct AirQualityRule;

impl Rule for AirQualityRule {
    fn id(&self) -> &'static str {
        "air_quality"
    }

    fn name(&self) -> &'static str {
        "Air Quality"
    }

    fn evaluate(&self, ctx: &HeatContext<'_>) -> Option<Recommendation> {
        let category = ctx.current?.aqi_category?;
        if !category.is_poor() {
            return None;
        }

        let severity = if category == AqiCategory::Hazardous {
            Severity::Critical
        } else {
            Severity::Warning
        };

        let action = match severity {
            Severity::Critical => "Move work indoors. Outdoor staff should wear N95 masks.",
            _ => "Shorten outdoor shifts and avoid heavy exertion. Consider N95 masks.",
        };

        Some(
            Recommendation::new(
                "air_quality",
                RecommendationCategory::AirQuality,
                severity,
                format!("{} Air Quality", category),
                format!(
                    "Air quality is {}. Heat and pollution together raise the strain on \
                     heart and lungs.",
                    category.as_str().to_lowercase()
                ),
            )
            .with_data_point("AQI Category", category)
            .with_data_point("Poor AQI Days", ctx.alerts.poor_aqi_days)
            .with_action(action),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::classifier::assess;
    use crate::models::{AlertsSummary, WeatherSample};
    use chrono::Utc;

    fn run(aqi: Option<f64>) -> Option<Recommendation> {
        let mut sample = WeatherSample::new(Utc::now(), 30.0, 60.0);
        sample.aqi = aqi;
        let current = assess(&sample).unwrap();
        AirQualityRule.evaluate(&HeatContext {
            current: Some(&current),
            alerts: &AlertsSummary::default(),
        })
    }

    #[test]
    fn moderate_air_is_quiet() {
        assert!(run(Some(100.0)).is_none());
        assert!(run(None).is_none());
    }

    #[test]
    fn unhealthy_is_warning_hazardous_is_critical() {
        assert_eq!(run(Some(112.0)).unwrap().severity, Severity::Warning);
        assert_eq!(run(Some(190.0)).unwrap().severity, Severity::Warning);
        assert_eq!(run(Some(250.0)).unwrap().severity, Severity::Critical);
    }
}
