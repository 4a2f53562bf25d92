use super::rules::{HeatContext, RulesEngine};
use super::{advisory, classifier, routing, trends};
use crate::error::{HeatwiseError, Result};
use crate::models::{
    Advisory, AlertsSummary, HistorySeries, HistorySummary, LocationAnalytics, Profile,
    Recommendation, RegionHistory, RegionReport, RiskAssessment, RouteCandidate, RoutePlan,
    WeatherSample,
};
use serde::{Deserialize, Serialize};

/// Inputs for a full location report, already fetched by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub current: Option<WeatherSample>,
    #[serde(default)]
    pub history: Option<HistorySeries>,
    #[serde(default)]
    pub profile_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<RiskAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<HistorySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<LocationAnalytics>,
    pub alerts: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<Advisory>,
}

/// Entry point for the calling layer. Holds only the profile catalog, so one
/// instance can serve any number of independent requests.
pub struct HeatEngine {
    profiles: Vec<Profile>,
    rules: RulesEngine,
}

impl HeatEngine {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles,
            rules: RulesEngine::new(),
        }
    }

    /// Builtin profiles, with `overrides` replacing same-id entries and
    /// adding new ones.
    pub fn with_overrides(overrides: Vec<Profile>) -> Self {
        let mut profiles = Profile::builtin();
        for profile in overrides {
            match profiles.iter_mut().find(|p| p.id == profile.id) {
                Some(existing) => {
                    tracing::info!(profile = %profile.id, "overriding builtin profile");
                    *existing = profile;
                }
                None => {
                    tracing::debug!(profile = %profile.id, "adding custom profile");
                    profiles.push(profile);
                }
            }
        }
        Self::new(profiles)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile(&self, id: &str) -> Result<&Profile> {
        let canonical = Profile::canonical_id(id);
        self.profiles
            .iter()
            .find(|p| p.id == canonical || p.id == id)
            .ok_or_else(|| HeatwiseError::NotFound(format!("profile '{}'", id)))
    }

    pub fn assess(&self, sample: &WeatherSample) -> Result<RiskAssessment> {
        Ok(classifier::assess(sample)?)
    }

    pub fn plan_routes(&self, routes: &[RouteCandidate]) -> RoutePlan {
        let ranking = routing::rank_scored(routes);
        let advice = routing::advise_routes(&ranking);
        RoutePlan { ranking, advice }
    }

    pub fn analyze(&self, history: &HistorySeries) -> HistorySummary {
        trends::summarize(history)
    }

    pub fn compare_regions(&self, regions: &[RegionHistory]) -> Vec<RegionReport> {
        trends::rank_regions(regions)
    }

    pub fn advise(&self, profile_id: &str, sample: &WeatherSample) -> Result<Advisory> {
        let profile = self.profile(profile_id)?;
        let tier = classifier::classify(sample)?;
        Ok(advisory::compose(profile, tier))
    }

    /// Everything the dashboard shows for one location.
    ///
    /// An unclassifiable current reading drops the assessment and advisory
    /// but keeps the history figures; an unknown profile is an error.
    pub fn report(&self, request: &ReportRequest) -> Result<LocationReport> {
        let assessment = match request.current.as_ref().map(classifier::assess) {
            Some(Ok(a)) => Some(a),
            Some(Err(e)) => {
                tracing::warn!("current reading unclassifiable: {}", e);
                None
            }
            None => None,
        };

        let history = request.history.as_ref().map(|h| h.trimmed());
        let summary = history.as_ref().map(trends::summarize);
        let analytics = history.as_ref().map(trends::location_analytics);

        let empty_alerts = AlertsSummary::default();
        let ctx = HeatContext {
            current: assessment.as_ref(),
            alerts: summary.as_ref().map(|s| &s.alerts).unwrap_or(&empty_alerts),
        };
        let alerts = self.rules.evaluate(&ctx);

        let advisory = match (&request.profile_id, &assessment) {
            (Some(id), Some(a)) => Some(advisory::compose(self.profile(id)?, a.tier)),
            (Some(id), None) => {
                self.profile(id)?;
                None
            }
            _ => None,
        };

        Ok(LocationReport {
            location: request.location.clone(),
            assessment,
            history: summary,
            analytics,
            alerts,
            advisory,
        })
    }
}

impl Default for HeatEngine {
    fn default() -> Self {
        Self::new(Profile::builtin())
    }
}
