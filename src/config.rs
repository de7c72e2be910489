use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
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
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

/// External semantic-ranking service settings
#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_ranking_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default = "default_ranking_timeout")]
    pub timeout_secs: u64,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            endpoint: default_ranking_endpoint(),
            api_key: None,
            timeout_secs: default_ranking_timeout(),
        }
    }
}

fn default_ranking_endpoint() -> String {
    "http://localhost:9000".to_string()
}
fn default_ranking_timeout() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u16 {
    50
}
fn default_max_limit() -> u16 {
    200
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_ai_weight")]
    pub ai: f64,
    #[serde(default = "default_rule_weight")]
    pub rule: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            ai: default_ai_weight(),
            rule: default_rule_weight(),
        }
    }
}

fn default_ai_weight() -> f64 {
    0.7
}
fn default_rule_weight() -> f64 {
    0.3
}

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

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with MATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCH_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Fail fast on configuration that would poison every request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scoring.weights.ai < 0.0 || self.scoring.weights.rule < 0.0 {
            return Err(ConfigError::Message(
                "scoring weights must be non-negative".to_string(),
            ));
        }
        if self.matching.default_limit == 0 {
            return Err(ConfigError::Message(
                "matching.default_limit must be at least 1".to_string(),
            ));
        }
        if self.matching.default_limit > self.matching.max_limit {
            return Err(ConfigError::Message(
                "matching.default_limit must not exceed matching.max_limit".to_string(),
            ));
        }
        if self.ranking.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "ranking.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.ai, 0.7);
        assert_eq!(weights.rule, 0.3);
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings {
            server: ServerSettings::default(),
            ranking: RankingSettings::default(),
            matching: MatchingSettings::default(),
            scoring: ScoringSettings::default(),
            logging: LoggingSettings::default(),
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_fails_validation() {
        let mut settings = Settings {
            server: ServerSettings::default(),
            ranking: RankingSettings::default(),
            matching: MatchingSettings::default(),
            scoring: ScoringSettings::default(),
            logging: LoggingSettings::default(),
        };
        settings.scoring.weights.rule = -0.1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_limit_fails_validation() {
        let mut settings = Settings {
            server: ServerSettings::default(),
            ranking: RankingSettings::default(),
            matching: MatchingSettings::default(),
            scoring: ScoringSettings::default(),
            logging: LoggingSettings::default(),
        };
        settings.matching.default_limit = 0;
        assert!(settings.validate().is_err());
    }
}
