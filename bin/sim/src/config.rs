use serde::Deserialize;
use thiserror::Error;

/// Prefix of every simulator environment variable
const ENV_PREFIX: &str = "LK_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment error: {0}")]
    Env(#[from] envy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Filter directive used when `RUST_LOG` is unset.
    ///
    /// Development keeps the per-card `debug` events of the scheduler.
    pub const fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production => "info",
        }
    }
}

/// Simulation settings, read from `LK_*` variables.
///
/// | Variable | Default |
/// |---|---|
/// | `LK_ENVIRONMENT` | `development` |
/// | `LK_SEED` | random |
/// | `LK_DAYS` | 30 |
/// | `LK_DECK_SIZE` | 50 |
/// | `LK_SESSION_LIMIT` | 20 |
/// | `LK_RECALL_PROBABILITY` | 0.85 |
/// | `LK_MEAN_ANSWER_SECONDS` | 8.0 |
#[derive(Clone, Debug, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub environment: Environment,
    pub seed: Option<u64>,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_deck_size")]
    pub deck_size: usize,
    #[serde(default = "default_session_limit")]
    pub session_limit: usize,
    #[serde(default = "default_recall_probability")]
    pub recall_probability: f64,
    #[serde(default = "default_mean_answer_seconds")]
    pub mean_answer_seconds: f64,
}

const fn default_days() -> u32 {
    30
}

const fn default_deck_size() -> usize {
    50
}

const fn default_session_limit() -> usize {
    lk_srs::DEFAULT_REVIEW_LIMIT
}

const fn default_recall_probability() -> f64 {
    0.85
}

const fn default_mean_answer_seconds() -> f64 {
    8.0
}

impl SimConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = envy::prefixed(ENV_PREFIX).from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Same as [`Self::from_env`] over an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::Invalid("days must be at least 1".to_string()));
        }
        if self.deck_size == 0 {
            return Err(ConfigError::Invalid(
                "deck_size must be at least 1".to_string(),
            ));
        }
        if self.session_limit == 0 {
            return Err(ConfigError::Invalid(
                "session_limit must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.recall_probability) {
            return Err(ConfigError::Invalid(format!(
                "recall_probability must be between 0 and 1, got {}",
                self.recall_probability
            )));
        }
        if !self.mean_answer_seconds.is_finite() || self.mean_answer_seconds <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "mean_answer_seconds must be positive, got {}",
                self.mean_answer_seconds
            )));
        }
        Ok(())
    }
}
