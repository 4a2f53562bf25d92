pub mod air_quality;
pub mod engine;
pub mod heat_risk;
pub mod uv_exposure;

pub use engine::RulesEngine;

use crate::models::{AlertsSummary, Recommendation, RiskAssessment};

/// What a rule sees: the current reading's scales and the history alerts.
#[derive(Debug, Clone, Copy)]
pub struct HeatContext<'a> {
    pub current: Option<&'a RiskAssessment>,
    pub alerts: &'a AlertsSummary,
}

/// Trait for heat and air alert rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a recommendation if conditions are met
    fn evaluate(&self, ctx: &HeatContext<'_>) -> Option<Recommendation>;
}
