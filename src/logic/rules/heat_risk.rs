use super::{HeatContext, Rule};
use crate::models::{Recommendation, RecommendationCategory, RiskTier, Severity};

/// Heat risk warning rule - fires when the current reading is high or extreme
///
/// Severity levels:
/// - Warning: 38-42°C (high)
/// - Critical: 42°C and above (extreme)
pub struct HeatRiskRule;

impl Rule for HeatRiskRule {
    fn id(&self) -> &'static str {
        "heat_risk"
    }

    fn name(&self) -> &'static str {
        "Heat Risk"
    }

    fn evaluate(&self, ctx: &HeatContext<'_>) -> Option<Recommendation> {
        let current = ctx.current?;

        let severity = match current.tier {
            RiskTier::Extreme => Severity::Critical,
            RiskTier::High => Severity::Warning,
            _ => return None,
        };

        let title = match severity {
            Severity::Critical => "Extreme Heat Warning",
            _ => "High Heat Risk",
        };

        let mut description = format!(
            "Current temperature is {:.1}°C at {:.0}% humidity.",
            current.temperature_c, current.humidity_pct
        );
        if ctx.alerts.heat_wave_days > 0 {
            description.push_str(&format!(
                " {} of the last {} days reached high heat or worse.",
                ctx.alerts.heat_wave_days, ctx.alerts.days_observed
            ));
        }

        let action = match severity {
            Severity::Critical => {
                "Stop non-essential outdoor work. Move people into shade or cooling. \
                 Watch for confusion, hot dry skin or a rapid pulse and call 108 if they appear."
            }
            _ => {
                "Limit outdoor exposure during midday. Drink water every 20 minutes \
                 and rest in shade. Watch for dizziness, nausea or heavy sweating."
            }
        };

        Some(
            Recommendation::new(
                "heat_risk",
                RecommendationCategory::HeatStress,
                severity,
                title,
                description,
            )
            .with_data_point("Temperature", format!("{:.1}°C", current.temperature_c))
            .with_data_point("Risk Tier", current.tier)
            .with_data_point("Heat Wave Days", ctx.alerts.heat_wave_days)
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

    fn run(temp: f64, alerts: &AlertsSummary) -> Option<Recommendation> {
        let current = assess(&WeatherSample::new(Utc::now(), temp, 60.0)).unwrap();
        HeatRiskRule.evaluate(&HeatContext {
            current: Some(&current),
            alerts,
        })
    }

    #[test]
    fn silent_below_high() {
        assert!(run(37.9, &AlertsSummary::default()).is_none());
    }

    #[test]
    fn warning_at_high() {
        let rec = run(38.0, &AlertsSummary::default()).unwrap();
        assert_eq!(rec.severity, Severity::Warning);
        assert_eq!(rec.category, RecommendationCategory::HeatStress);
    }

    #[test]
    fn critical_at_extreme_mentions_history() {
        let alerts = AlertsSummary {
            heat_wave_days: 4,
            days_observed: 7,
            ..AlertsSummary::default()
        };
        let rec = run(44.0, &alerts).unwrap();
        assert_eq!(rec.severity, Severity::Critical);
        assert!(rec.description.contains("4 of the last 7 days"));
    }

    #[test]
    fn no_current_reading_no_alert() {
        let alerts = AlertsSummary::default();
        let ctx = HeatContext {
            current: None,
            alerts: &alerts,
        };
        assert!(HeatRiskRule.evaluate(&ctx).is_none());
    }
}
