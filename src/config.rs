use crate::error::{HeatwiseError, Result};
use crate::models::{Profile, DEFAULT_LOOKBACK_DAYS};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationConfig>,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Scenario file used when a command is not given one explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<PathBuf>,
    /// Added to the builtin catalog; an entry with a builtin id replaces it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(HeatwiseError::Config(format!(
                "Config file not found at {:?}. Run `heatwise init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| HeatwiseError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Load the config if one exists anywhere, otherwise fall back to
    /// defaults. An explicit path that does not exist is still an error.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if config_override.is_none() && !Self::exists(None) {
            tracing::debug!("no config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(config_override)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| HeatwiseError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.analytics.lookback_days == 0 {
            return Err(HeatwiseError::Config(
                "analytics.lookback_days must be at least 1".into(),
            ));
        }
        if let Some(loc) = &self.location {
            if !(-90.0..=90.0).contains(&loc.latitude) || !(-180.0..=180.0).contains(&loc.longitude)
            {
                return Err(HeatwiseError::Config(format!(
                    "location '{}' has out-of-range coordinates",
                    loc.name
                )));
            }
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("heatwise").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/heatwise/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HeatwiseError::Config("Cannot determine config directory".into()))?
            .join("heatwise");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up heatwise!");
        println!();

        println!("Default location (leave name blank to skip)");
        let name: String = Input::new()
            .with_prompt("  Name")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HeatwiseError::Config(format!("Input error: {}", e)))?;

        let location = if name.is_empty() {
            None
        } else {
            let latitude: f64 = Input::new()
                .with_prompt("  Latitude")
                .default(19.076)
                .interact_text()
                .map_err(|e| HeatwiseError::Config(format!("Input error: {}", e)))?;

            let longitude: f64 = Input::new()
                .with_prompt("  Longitude")
                .default(72.8777)
                .interact_text()
                .map_err(|e| HeatwiseError::Config(format!("Input error: {}", e)))?;

            Some(LocationConfig {
                name,
                latitude,
                longitude,
            })
        };

        println!();

        let default_profile: String = Input::new()
            .with_prompt("Default profile (construction, delivery, bus, truck, taxi)")
            .default("construction".into())
            .interact_text()
            .map_err(|e| HeatwiseError::Config(format!("Input error: {}", e)))?;

        let lookback_days: u32 = Input::new()
            .with_prompt("Analytics lookback window (days)")
            .default(DEFAULT_LOOKBACK_DAYS)
            .interact_text()
            .map_err(|e| HeatwiseError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            location,
            analytics: AnalyticsConfig { lookback_days },
            default_profile: Some(Profile::canonical_id(&default_profile)),
            scenario: None,
            profiles: Vec::new(),
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| HeatwiseError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# heatwise configuration\n# Generated by `heatwise init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static pattern");

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config.analytics.lookback_days, DEFAULT_LOOKBACK_DAYS);
        assert!(config.location.is_none());
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn parses_location_and_profiles() {
        let yaml = r#"
location:
  name: Mumbai Central
  latitude: 19.076
  longitude: 72.8777
analytics:
  lookback_days: 30
default_profile: delivery
profiles:
  - id: farm
    label: Farm Hand
    kind: worker
    avoid: ["Midday harvesting"]
    recommend: ["Harvest at dawn"]
    schedule: "5 AM - 10 AM"
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.analytics.lookback_days, 30);
        assert_eq!(config.location.unwrap().name, "Mumbai Central");
        assert_eq!(config.default_profile.as_deref(), Some("delivery"));
        assert_eq!(config.profiles[0].id, "farm");
    }

    #[test]
    fn rejects_zero_lookback() {
        assert!(matches!(
            Config::parse("analytics:\n  lookback_days: 0\n"),
            Err(HeatwiseError::Config(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_location() {
        let yaml = "location:\n  name: Nowhere\n  latitude: 120\n  longitude: 0\n";
        assert!(Config::parse(yaml).is_err());
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("HEATWISE_TEST_PROFILE", "taxi");
        let config = Config::parse("default_profile: ${HEATWISE_TEST_PROFILE}\n").unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("taxi"));
    }

    #[test]
    fn unset_variables_left_verbatim() {
        let out = Config::substitute_env_vars("scenario: ${HEATWISE_SURELY_UNSET_VAR}");
        assert_eq!(out, "scenario: ${HEATWISE_SURELY_UNSET_VAR}");
    }
}
