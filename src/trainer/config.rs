//! Trainer configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) is a
//! valid configuration:
//!
//! ```json
//! {
//!   "position": "BTN",
//!   "rng_seed": 7,
//!   "locale": "Chinese",
//!   "ranges": "charts/tight.json",
//!   "advisor": { "model": "gemini-2.5-flash", "api_key_env": "GEMINI_API_KEY" }
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::trainer::{
    models::{Locale, Position},
    ranges::RangeError,
};

fn default_position() -> Position {
    Position::BTN
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key. The key itself never lives
    /// in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Seat the session starts at.
    #[serde(default = "default_position")]
    pub position: Position,
    /// `None` seeds from OS entropy; `Some` makes every deal reproducible.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub locale: Locale,
    /// Substitute range chart; the built-in chart when absent.
    #[serde(default)]
    pub ranges: Option<PathBuf>,
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            position: default_position(),
            rng_seed: None,
            locale: Locale::default(),
            ranges: None,
            advisor: AdvisorConfig::default(),
        }
    }
}

impl TrainerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TrainerConfig = serde_json::from_str(json).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = TrainerConfig::from_json(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.advisor.model.trim().is_empty() {
            return Err(ConfigError::Invalid("advisor.model", "must not be empty"));
        }
        if self.advisor.api_key_env.trim().is_empty() {
            return Err(ConfigError::Invalid("advisor.api_key_env", "must not be empty"));
        }
        if self.advisor.model.contains(&['/', '?', '#'][..]) {
            return Err(ConfigError::Invalid("advisor.model", "must be a bare model name"));
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Json(serde_json::Error),
    /// A field holds a value the trainer cannot use.
    Invalid(&'static str, &'static str),
    /// The configured range chart failed to load.
    Ranges(RangeError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e)          => write!(f, "cannot read {}: {}", path.display(), e),
            ConfigError::Json(e)              => write!(f, "malformed config: {}", e),
            ConfigError::Invalid(field, why)  => write!(f, "{} {}", field, why),
            ConfigError::Ranges(e)            => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e)   => Some(e),
            ConfigError::Json(e)    => Some(e),
            ConfigError::Ranges(e)  => Some(e),
            ConfigError::Invalid(..) => None,
        }
    }
}

impl From<RangeError> for ConfigError {
    fn from(e: RangeError) -> Self {
        ConfigError::Ranges(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = TrainerConfig::from_json("{}").unwrap();
        assert_eq!(config, TrainerConfig::default());
        assert_eq!(config.position, Position::BTN);
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.advisor.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn fields_override_defaults() {
        let config = TrainerConfig::from_json(
            r#"{ "position": "BB", "rng_seed": 9, "locale": "Chinese", "advisor": { "model": "gemini-2.0-flash" } }"#,
        )
        .unwrap();
        assert_eq!(config.position, Position::BB);
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.locale, Locale::Chinese);
        assert_eq!(config.advisor.model, "gemini-2.0-flash");
        assert_eq!(config.advisor.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            TrainerConfig::from_json(r#"{ "advisor": { "model": "" } }"#),
            Err(ConfigError::Invalid("advisor.model", _))
        ));
        assert!(matches!(
            TrainerConfig::from_json(r#"{ "advisor": { "model": "../../x" } }"#),
            Err(ConfigError::Invalid("advisor.model", _))
        ));
        assert!(matches!(
            TrainerConfig::from_json(r#"{ "position": "HJ" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = TrainerConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
