pub mod advisory;
pub mod calculations;
pub mod classifier;
pub mod engine;
pub mod routing;
pub mod rules;
pub mod trends;

pub use engine::{HeatEngine, LocationReport, ReportRequest};
pub use rules::RulesEngine;
