use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "heatwise",
    version,
    about = "Heat risk assessment, heat-safe routing and worker advisories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// A single reading given on the command line.
#[derive(Args, Debug, Clone)]
pub struct ReadingArgs {
    /// Air temperature in °C
    #[arg(long = "temp", allow_hyphen_values = true)]
    pub temperature_c: Option<f64>,

    /// Relative humidity in %
    #[arg(long = "humidity", default_value_t = 50.0)]
    pub humidity_pct: f64,

    /// UV index
    #[arg(long = "uv")]
    pub uv_index: Option<f64>,

    /// Air quality index
    #[arg(long)]
    pub aqi: Option<f64>,
}

/// Where to fetch data for a place from.
#[derive(Args, Debug, Clone)]
pub struct PlaceArgs {
    /// Scenario file (YAML or JSON) standing in for live services
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Place name or "lat,lon"; defaults to the configured location
    #[arg(short, long)]
    pub at: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify one reading into a heat risk tier
    Classify {
        #[command(flatten)]
        reading: ReadingArgs,

        /// Read the sample from a JSON/YAML file instead
        #[arg(short, long, conflicts_with = "temperature_c")]
        file: Option<PathBuf>,
    },
    /// Rank candidate routes by heat exposure
    Routes {
        /// JSON/YAML file holding a list of route candidates
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Scenario file to look routes up in
        #[arg(short, long, conflicts_with = "file")]
        scenario: Option<PathBuf>,

        /// Start location (with --scenario)
        #[arg(long)]
        from: Option<String>,

        /// Destination (with --scenario)
        #[arg(long)]
        to: Option<String>,
    },
    /// Summarize a multi-day history into trends and alert counts
    History {
        /// JSON/YAML history file
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        place: PlaceArgs,

        /// Lookback window in days (defaults to the configured window)
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Compare regions by heat alert frequency
    Regions {
        /// JSON/YAML file holding a list of {region, history}
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Advice for a profession or vehicle under current conditions
    Advise {
        /// Profile id (construction, delivery, bus, truck, taxi, ...)
        #[arg(short, long)]
        profile: Option<String>,

        #[command(flatten)]
        reading: ReadingArgs,

        #[command(flatten)]
        place: PlaceArgs,
    },
    /// Full report for one location: risk, history, alerts and advice
    Report {
        #[command(flatten)]
        place: PlaceArgs,

        /// Profile to include advice for
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// List available profiles
    Profiles,
    /// Re-run interactive setup
    Init,
    /// Validate config and scenario file
    Check {
        /// Scenario file to validate
        #[arg(short, long)]
        scenario: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_classify_with_negative_temperature() {
        let cli = Cli::parse_from(["heatwise", "classify", "--temp", "-5", "--aqi", "30"]);
        match cli.command {
            Commands::Classify { reading, file } => {
                assert_eq!(reading.temperature_c, Some(-5.0));
                assert_eq!(reading.aqi, Some(30.0));
                assert!(file.is_none());
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn parses_report_with_global_flags() {
        let cli = Cli::parse_from([
            "heatwise", "report", "-s", "demo.yaml", "--at", "Downtown", "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Report { place, profile } => {
                assert_eq!(place.at.as_deref(), Some("Downtown"));
                assert!(profile.is_none());
            }
            _ => panic!("expected report"),
        }
    }
}
