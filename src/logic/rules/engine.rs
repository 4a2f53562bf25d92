use super::{
    air_quality::AirQualityRule, heat_risk::HeatRiskRule, uv_exposure::UvExposureRule,
    HeatContext, Rule,
};
use crate::models::Recommendation;

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(HeatRiskRule),
            Box::new(AirQualityRule),
            Box::new(UvExposureRule),
        ];

        Self { rules }
    }

    /// All firing rules, most severe first.
    pub fn evaluate(&self, ctx: &HeatContext<'_>) -> Vec<Recommendation> {
        let mut recs: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(ctx))
            .collect();
        recs.sort_by(|a, b| b.severity.cmp(&a.severity));
        recs
    }

    pub fn evaluate_rule(&self, rule_id: &str, ctx: &HeatContext<'_>) -> Option<Recommendation> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(ctx))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::classifier::assess;
    use crate::models::{AlertsSummary, Severity, WeatherSample};
    use chrono::Utc;

    #[test]
    fn lists_all_rules() {
        let ids: Vec<&str> = RulesEngine::new()
            .list_rules()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["heat_risk", "air_quality", "uv_exposure"]);
    }

    #[test]
    fn benign_conditions_produce_nothing() {
        let current = assess(&WeatherSample::new(Utc::now(), 30.0, 50.0).with_aqi(40.0)).unwrap();
        let alerts = AlertsSummary::default();
        let ctx = HeatContext {
            current: Some(&current),
            alerts: &alerts,
        };
        assert!(RulesEngine::new().evaluate(&ctx).is_empty());
    }

    #[test]
    fn results_sorted_most_severe_first() {
        let current = assess(
            &WeatherSample::new(Utc::now(), 43.0, 50.0)
                .with_aqi(120.0)
                .with_uv(6.5),
        )
        .unwrap();
        let alerts = AlertsSummary::default();
        let ctx = HeatContext {
            current: Some(&current),
            alerts: &alerts,
        };
        let recs = RulesEngine::new().evaluate(&ctx);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].id, "heat_risk");
        assert_eq!(recs[0].severity, Severity::Critical);
        assert!(recs.windows(2).all(|w| w[0].severity >= w[1].severity));
    }

    #[test]
    fn evaluate_single_rule() {
        let current = assess(&WeatherSample::new(Utc::now(), 39.0, 50.0)).unwrap();
        let alerts = AlertsSummary::default();
        let ctx = HeatContext {
            current: Some(&current),
            alerts: &alerts,
        };
        let engine = RulesEngine::new();
        assert!(engine.evaluate_rule("heat_risk", &ctx).is_some());
        assert!(engine.evaluate_rule("air_quality", &ctx).is_none());
        assert!(engine.evaluate_rule("missing", &ctx).is_none());
    }
}
