//! Heat-exposure scoring and ranking of candidate routes.
//!
//! Ranking is lexicographic: worst segment tier first, then duration rounded
//! to whole minutes, then distance, then input position. A route crossing an
//! extreme zone can never outrank one that stays at high or below, however
//! much faster it is.

use crate::models::{RankedRoute, RiskTier, RouteAdvice, RouteCandidate, RouteRanking};
use std::cmp::Ordering;

const HIGH_SEGMENT_WEIGHT: f64 = 10.0;
const EXTREME_SEGMENT_WEIGHT: f64 = 40.0;
const DURATION_WEIGHT_PER_MIN: f64 = 1.0;

fn severity_band(tier: RiskTier) -> f64 {
    match tier {
        RiskTier::Safe => 0.0,
        RiskTier::Mild => 100.0,
        RiskTier::High => 1_000.0,
        RiskTier::Extreme => 10_000.0,
    }
}

/// Exposure magnitude for display. Higher is worse.
///
/// Combines the worst segment's severity band, a per-segment weight for
/// every high and extreme segment, and travel time in minutes. Ordering
/// decisions use [`rank`], not this number.
pub fn score(route: &RouteCandidate) -> f64 {
    let worst = route.heat_risk();
    let exposure: f64 = route
        .segments
        .iter()
        .filter_map(|s| s.resolved_tier())
        .map(|tier| match tier {
            RiskTier::Extreme => EXTREME_SEGMENT_WEIGHT,
            RiskTier::High => HIGH_SEGMENT_WEIGHT,
            _ => 0.0,
        })
        .sum();

    severity_band(worst) + exposure + route.duration_sec.max(0.0) / 60.0 * DURATION_WEIGHT_PER_MIN
}

fn compare(a: &(usize, &RouteCandidate), b: &(usize, &RouteCandidate)) -> Ordering {
    let (ia, ra) = a;
    let (ib, rb) = b;
    ra.heat_risk()
        .cmp(&rb.heat_risk())
        .then_with(|| ra.duration_minutes().cmp(&rb.duration_minutes()))
        .then_with(|| ra.distance_m.total_cmp(&rb.distance_m))
        .then_with(|| ia.cmp(ib))
}

/// Best-first ranking with score, worst tier and unscored flag per route.
pub fn rank_scored(routes: &[RouteCandidate]) -> RouteRanking {
    let mut indexed: Vec<(usize, &RouteCandidate)> = routes.iter().enumerate().collect();
    indexed.sort_by(compare);

    let entries: Vec<RankedRoute> = indexed
        .into_iter()
        .enumerate()
        .map(|(position, (_, route))| {
            let unscored = route.worst_tier().is_none();
            if unscored {
                tracing::debug!(route = %route.id, "route has no rated segments, ranking as safe");
            }
            RankedRoute {
                position: position + 1,
                route: route.clone(),
                score: score(route),
                worst_tier: route.heat_risk(),
                unscored,
            }
        })
        .collect();

    tracing::debug!(routes = entries.len(), "ranked candidate routes");
    RouteRanking { entries }
}

/// Best-first order of the candidates themselves.
pub fn rank(routes: Vec<RouteCandidate>) -> Vec<RouteCandidate> {
    let mut indexed: Vec<(usize, RouteCandidate)> = routes.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, ra), (ib, rb)| compare(&(*ia, ra), &(*ib, rb)));
    indexed.into_iter().map(|(_, route)| route).collect()
}

/// Explain the trade-off between the recommended route and the fastest one.
pub fn advise_routes(ranking: &RouteRanking) -> Option<RouteAdvice> {
    let recommended = ranking.recommended()?;
    let fastest = ranking.fastest()?;

    if recommended.route.id == fastest.route.id {
        let message = match recommended.worst_tier {
            RiskTier::Safe | RiskTier::Mild => format!(
                "Recommended: {} is the fastest route and stays out of high-heat zones.",
                recommended.route.id
            ),
            tier => format!(
                "Caution: {} is the best available route but passes through {} heat zones. \
                 Plan breaks and carry water.",
                recommended.route.id, tier
            ),
        };
        return Some(RouteAdvice {
            recommended_id: recommended.route.id.clone(),
            fastest_id: fastest.route.id.clone(),
            extra_minutes: 0,
            avoided_tier: None,
            message,
        });
    }

    let extra_minutes =
        (recommended.route.duration_minutes() - fastest.route.duration_minutes()).max(0);
    let avoided_tier = (fastest.worst_tier > recommended.worst_tier).then_some(fastest.worst_tier);

    let message = match avoided_tier {
        Some(tier) => format!(
            "Recommended: {} adds {} minutes but avoids {} heat zones, reducing health risks \
             for drivers and passengers.",
            recommended.route.id, extra_minutes, tier
        ),
        None => format!(
            "Recommended: {} has the same heat exposure as {} and is shorter.",
            recommended.route.id, fastest.route.id
        ),
    };

    Some(RouteAdvice {
        recommended_id: recommended.route.id.clone(),
        fastest_id: fastest.route.id.clone(),
        extra_minutes,
        avoided_tier,
        message,
    })
}
