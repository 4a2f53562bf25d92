use super::{HeatContext, Rule};
use crate::models::{Recommendation, RecommendationCategory, Severity, UvCategory};

/// UV exposure rule - fires at UV index 6 and above
///
/// Severity levels:
/// - Advisory: high (6-7)
/// - Warning: very high (8-10)
/// - Critical: extreme (11+)
pub struct UvExposureRule;

impl Rule for UvExposureRule {
    fn id(&self) -> &'static str {
        "uv_exposure"
    }

    fn name(&self) -> &'static str {
        "UV Exposure"
    }

    fn evaluate(&self, ctx: &HeatContext<'_>) -> Option<Recommendation> {
        let category = ctx.current?.uv_category?;

        let severity = match category {
            UvCategory::Extreme => Severity::Critical,
            UvCategory::VeryHigh => Severity::Warning,
            UvCategory::High => Severity::Advisory,
            _ => return None,
        };

        Some(
            Recommendation::new(
                "uv_exposure",
                RecommendationCategory::UvExposure,
                severity,
                format!("{} UV Index", category),
                "Unprotected skin can burn in under 30 minutes.",
            )
            .with_data_point("UV Category", category)
            .with_data_point("High UV Days", ctx.alerts.high_uv_days)
            .with_action(
                "Cover up with light long-sleeved clothing and a wide-brimmed hat. \
                 Reapply sunscreen every two hours.",
            ),
        )
    }
}
