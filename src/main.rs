mod cli;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, PlaceArgs, ReadingArgs};
use heatwise::config::Config;
use heatwise::datasources::{Geocoder, RouteSource, ScenarioFile, WeatherSource};
use heatwise::logic::{trends, HeatEngine, ReportRequest};
use heatwise::models::{
    Coordinates, HistorySeries, HistorySummary, LocationAnalytics, RegionHistory,
    RouteCandidate, SampleRecord, WeatherSample,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let Cli {
        command,
        config: config_path,
        verbose,
    } = Cli::parse();

    init_logging(verbose);

    match command {
        Commands::Init => {
            Config::setup_interactive()?;
            return Ok(());
        }
        Commands::Check { scenario } => return check(config_path, scenario),
        _ => {}
    }

    let config = Config::load_or_default(config_path).context("Configuration error")?;
    let engine = HeatEngine::with_overrides(config.profiles.clone());

    match command {
        Commands::Classify { reading, file } => {
            let sample = match file {
                Some(path) => sample_from_file(&path)?,
                None => match sample_from_reading(&reading) {
                    Some(sample) => sample,
                    None => bail!("pass --temp or --file"),
                },
            };
            print_json(&engine.assess(&sample)?)
        }
        Commands::Routes {
            file,
            scenario,
            from,
            to,
        } => {
            let candidates: Vec<RouteCandidate> = match file {
                Some(path) => read_document(&path)?,
                None => {
                    let (Some(from), Some(to)) = (from, to) else {
                        bail!("pass --file, or --from and --to with a scenario");
                    };
                    let scenario = open_scenario(&config, scenario.as_deref())?;
                    let origin = scenario.resolve(&from)?;
                    let destination = scenario.resolve(&to)?;
                    scenario.routes(origin, destination)?
                }
            };
            tracing::debug!(count = candidates.len(), "ranking route candidates");
            print_json(&engine.plan_routes(&candidates))
        }
        Commands::History { file, place, days } => {
            let lookback = days.unwrap_or(config.analytics.lookback_days);
            let history = match file {
                Some(path) => {
                    let series: HistorySeries = read_document(&path)?;
                    let lookback = days.unwrap_or(series.lookback_days());
                    HistorySeries::new(lookback, series.samples().to_vec())?.trimmed()
                }
                None => {
                    let (scenario, _, at) = resolve_place(&config, &place)?;
                    scenario.history(at, lookback)?
                }
            };
            print_json(&HistoryOutput {
                lookback_days: history.lookback_days(),
                samples: history.len(),
                summary: engine.analyze(&history),
                analytics: trends::location_analytics(&history),
            })
        }
        Commands::Regions { file } => {
            let regions: Vec<RegionHistory> = read_document(&file)?;
            print_json(&engine.compare_regions(&regions))
        }
        Commands::Advise {
            profile,
            reading,
            place,
        } => {
            let profile_id = profile_or_default(profile, &config)?;
            let sample = match sample_from_reading(&reading) {
                Some(sample) => sample,
                None => {
                    let (scenario, _, at) = resolve_place(&config, &place)?;
                    scenario.current(at)?
                }
            };
            print_json(&engine.advise(&profile_id, &sample)?)
        }
        Commands::Report { place, profile } => {
            let (scenario, name, at) = resolve_place(&config, &place)?;
            let current = match scenario.current(at) {
                Ok(sample) => Some(sample),
                Err(e) => {
                    tracing::warn!(place = %name, "no usable current reading: {}", e);
                    None
                }
            };
            let history = scenario.history(at, config.analytics.lookback_days)?;
            let request = ReportRequest {
                location: Some(name),
                current,
                history: Some(history),
                profile_id: profile.or_else(|| config.default_profile.clone()),
            };
            print_json(&engine.report(&request)?)
        }
        Commands::Profiles => {
            for profile in engine.profiles() {
                println!(
                    "{:<14} {:<8} {}",
                    profile.id,
                    profile.kind.as_str(),
                    profile.label
                );
            }
            Ok(())
        }
        // handled before the config is loaded
        Commands::Init | Commands::Check { .. } => Ok(()),
    }
}

#[derive(Serialize)]
struct HistoryOutput {
    lookback_days: u32,
    samples: usize,
    summary: HistorySummary,
    analytics: LocationAnalytics,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn check(config_path: Option<PathBuf>, scenario: Option<PathBuf>) -> Result<()> {
    let config = if Config::exists(config_path.as_ref()) {
        let config = Config::load(config_path).context("Configuration error")?;
        println!("Config: OK");
        config
    } else {
        println!("Config: not found, using defaults (run `heatwise init` to create one)");
        Config::default()
    };

    let engine = HeatEngine::with_overrides(config.profiles.clone());
    println!("Profiles: {}", engine.profiles().len());
    if let Some(id) = &config.default_profile {
        engine.profile(id)?;
        println!("Default profile: {}", id);
    }

    match scenario.or(config.scenario) {
        Some(path) => {
            let scenario = ScenarioFile::load(&path)
                .with_context(|| format!("Failed to load scenario {}", path.display()))?;
            println!(
                "Scenario: OK ({} places, {} route sets)",
                scenario.places.len(),
                scenario.routes.len()
            );
        }
        None => println!("Scenario: none configured"),
    }

    Ok(())
}

fn open_scenario(config: &Config, explicit: Option<&Path>) -> Result<ScenarioFile> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match &config.scenario {
            Some(p) => p.clone(),
            None => bail!("no scenario file; pass --scenario or set `scenario` in config"),
        },
    };
    ScenarioFile::load(&path)
        .with_context(|| format!("Failed to load scenario {}", path.display()))
}

/// The scenario, a display name and coordinates for `--at`, falling back to
/// the configured location.
fn resolve_place(config: &Config, args: &PlaceArgs) -> Result<(ScenarioFile, String, Coordinates)> {
    let scenario = open_scenario(config, args.scenario.as_deref())?;
    match (&args.at, &config.location) {
        (Some(query), _) => {
            let at = scenario.resolve(query)?;
            Ok((scenario, query.clone(), at))
        }
        (None, Some(loc)) => {
            let at = Coordinates::new(loc.latitude, loc.longitude);
            Ok((scenario, loc.name.clone(), at))
        }
        (None, None) => bail!("pass --at or set `location` in config"),
    }
}

fn profile_or_default(profile: Option<String>, config: &Config) -> Result<String> {
    match profile.or_else(|| config.default_profile.clone()) {
        Some(id) => Ok(id),
        None => bail!("pass --profile or set `default_profile` in config"),
    }
}

fn sample_from_reading(reading: &ReadingArgs) -> Option<WeatherSample> {
    let mut sample = WeatherSample::new(Utc::now(), reading.temperature_c?, reading.humidity_pct);
    if let Some(uv) = reading.uv_index {
        sample = sample.with_uv(uv);
    }
    if let Some(aqi) = reading.aqi {
        sample = sample.with_aqi(aqi);
    }
    Some(sample)
}

fn sample_from_file(path: &Path) -> Result<WeatherSample> {
    let record: SampleRecord = read_document(path)?;
    Ok(WeatherSample::try_from(record)?)
}

/// JSON when the extension says so, YAML otherwise.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let value = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?
    };
    Ok(value)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
