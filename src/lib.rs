//! Heat risk assessment and route advisory engine.
//!
//! Classifies weather readings into heat risk tiers, ranks candidate routes
//! by heat exposure, summarizes multi-day history into trends and alert
//! counts, and composes worker and vehicle advisories. Every function here is
//! pure; fetching data is left to the caller (see [`datasources`]).

pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;

pub use error::{HeatwiseError, Result};
pub use logic::HeatEngine;
