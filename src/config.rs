use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::core::{matcher::{MatchOptions, ResultOrder}, similarity::Scorer};
use crate::models::FieldWeights;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid cutoff {0}: must be within [0, 1]")]
    InvalidCutoff(f64),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    #[serde(default = "default_max_field_len")]
    pub max_field_len: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            max_candidates: default_max_candidates(),
            max_field_len: default_max_field_len(),
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_max_candidates() -> usize { 10_000 }
fn default_max_field_len() -> usize { 256 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    #[serde(default)]
    pub scorer: Scorer,
    #[serde(default)]
    pub order: ResultOrder,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            cutoff: default_cutoff(),
            scorer: Scorer::default(),
            order: ResultOrder::default(),
            parallel: false,
        }
    }
}

fn default_cutoff() -> f64 { crate::core::matcher::DEFAULT_CUTOFF }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_street_line_weight")]
    pub street_line: f64,
    #[serde(default = "default_city_weight")]
    pub city: f64,
    #[serde(default = "default_parish_weight")]
    pub parish: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            street_line: default_street_line_weight(),
            city: default_city_weight(),
            parish: default_parish_weight(),
        }
    }
}

impl From<&WeightsConfig> for FieldWeights {
    fn from(config: &WeightsConfig) -> Self {
        FieldWeights {
            street_line: config.street_line,
            city: config.city,
            parish: config.parish,
        }
    }
}

fn default_street_line_weight() -> f64 { 0.6 }
fn default_city_weight() -> f64 { 0.2 }
fn default_parish_weight() -> f64 { 0.2 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Reject a cutoff that can't be compared against a [0, 1] score
pub fn validate_cutoff(cutoff: f64) -> Result<f64, SettingsError> {
    if (0.0..=1.0).contains(&cutoff) {
        Ok(cutoff)
    } else {
        Err(SettingsError::InvalidCutoff(cutoff))
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ADDRESS__)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ADDRESS__MATCHING__CUTOFF -> matching.cutoff
            .add_source(env_source())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Matching options for the configured weights, cutoff, scorer and order
    pub fn match_options(&self) -> Result<MatchOptions, SettingsError> {
        let matching = &self.matching;
        let weights = FieldWeights::from(&matching.weights);

        if !weights.is_normalized() {
            tracing::warn!(
                sum = weights.sum(),
                "Configured field weights do not sum to 1.0; scores will scale accordingly"
            );
        }

        Ok(MatchOptions {
            weights,
            cutoff: validate_cutoff(matching.cutoff)?,
            scorer: matching.scorer,
            order: matching.order,
            limit: None,
        })
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("ADDRESS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.street_line, 0.6);
        assert_eq!(weights.city, 0.2);
        assert_eq!(weights.parish, 0.2);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_validate_cutoff() {
        assert_eq!(validate_cutoff(0.0).unwrap(), 0.0);
        assert_eq!(validate_cutoff(1.0).unwrap(), 1.0);
        assert!(matches!(validate_cutoff(1.5), Err(SettingsError::InvalidCutoff(_))));
        assert!(matches!(validate_cutoff(-0.1), Err(SettingsError::InvalidCutoff(_))));
        assert!(validate_cutoff(f64::NAN).is_err());
    }

    #[test]
    fn test_parse_matching_section() {
        let settings: Settings = toml::from_str(
            r#"
            [matching]
            cutoff = 0.75
            scorer = "weighted_ratio"
            order = "score_descending"

            [matching.weights]
            street_line = 0.5
            city = 0.25
            parish = 0.25
            "#,
        )
        .unwrap();

        let options = settings.match_options().unwrap();
        assert_eq!(options.cutoff, 0.75);
        assert_eq!(options.scorer, Scorer::WeightedRatio);
        assert_eq!(options.order, ResultOrder::ScoreDescending);
        assert_eq!(options.weights.street_line, 0.5);
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        let options = settings.match_options().unwrap();

        assert_eq!(options, MatchOptions::default());
        assert!(!settings.matching.parallel);
        assert_eq!(settings.server.max_candidates, 10_000);
        assert_eq!(settings.server.max_field_len, 256);
    }

    #[test]
    fn test_bad_cutoff_rejected() {
        let settings: Settings = toml::from_str("[matching]\ncutoff = 2.0\n").unwrap();
        assert!(matches!(settings.match_options(), Err(SettingsError::InvalidCutoff(c)) if c == 2.0));
    }

    // Single test so no other test observes the ADDRESS__ variables
    #[test]
    fn test_load_layers_file_then_env() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9191\nmax_field_len = 128\n\n[matching]\ncutoff = 0.7\nscorer = \"token_set_ratio\""
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.server.port, 9191);
        assert_eq!(settings.server.max_field_len, 128);
        assert_eq!(settings.matching.cutoff, 0.7);
        assert_eq!(settings.matching.scorer, Scorer::TokenSetRatio);
        assert_eq!(settings.server.max_candidates, 10_000);

        std::env::set_var("ADDRESS__MATCHING__CUTOFF", "0.65");
        std::env::set_var("ADDRESS__SERVER__MAX_FIELD_LEN", "64");

        let overridden = Settings::load_from(file.path());
        let defaults = Settings::load();

        std::env::remove_var("ADDRESS__MATCHING__CUTOFF");
        std::env::remove_var("ADDRESS__SERVER__MAX_FIELD_LEN");

        let overridden = overridden.unwrap();
        assert_eq!(overridden.matching.cutoff, 0.65);
        assert_eq!(overridden.server.max_field_len, 64);
        assert_eq!(overridden.matching.scorer, Scorer::TokenSetRatio);
        assert_eq!(overridden.server.port, 9191);

        // config/default.toml under the crate root, then env on top
        let defaults = defaults.unwrap();
        assert_eq!(defaults.matching.cutoff, 0.65);
        assert_eq!(defaults.server.max_field_len, 64);
        assert_eq!(defaults.matching.scorer, Scorer::Ratio);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let path = std::env::temp_dir().join("address-matcher-no-such-settings.toml");
        assert!(matches!(Settings::load_from(path), Err(SettingsError::Config(_))));
    }

    #[test]
    fn test_unnormalized_weights_pass_through() {
        let settings: Settings = toml::from_str(
            "[matching.weights]\nstreet_line = 1.0\ncity = 1.0\nparish = 1.0\n",
        )
        .unwrap();

        let options = settings.match_options().unwrap();
        assert_eq!(options.weights.sum(), 3.0);
    }
}
