//! Host configuration read by the planning core.
//!
//! # Responsibility
//! - Load the expiry policy, actor identity field and logging settings.
//! - Reject values the transitions cannot honor.
//!
//! # Invariants
//! - `expiry.minutes` is never zero, so a spiked item's expiry lies strictly
//!   after the transition time.
//! - A missing config file yields defaults; a malformed one is an error.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// Default time-to-live for spiked items: three days.
pub const DEFAULT_EXPIRY_MINUTES: u32 = 3 * 24 * 60;
/// Default record key holding the actor identity.
pub const DEFAULT_ACTOR_ID_FIELD: &str = "_id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlanningConfig {
    #[serde(default)]
    pub expiry: ExpiryPolicy,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Offset policy used to compute the expiry of spiked items.
///
/// `minutes` is non-zero by construction, including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryPolicy {
    #[serde(default = "default_expiry_minutes")]
    minutes: NonZeroU32,
}

impl ExpiryPolicy {
    pub fn new(minutes: NonZeroU32) -> Self {
        Self { minutes }
    }

    /// Returns `None` for a zero offset.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        NonZeroU32::new(minutes).map(Self::new)
    }

    pub fn minutes(&self) -> u32 {
        self.minutes.get()
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            minutes: default_expiry_minutes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Key of the session user record that holds the actor id.
    #[serde(default = "default_actor_id_field")]
    pub id_field: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            id_field: default_actor_id_field(),
        }
    }
}

/// Logging settings; both fields fall back to build defaults when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoggingSettings {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_expiry_minutes() -> NonZeroU32 {
    NonZeroU32::new(DEFAULT_EXPIRY_MINUTES).unwrap_or(NonZeroU32::MIN)
}

fn default_actor_id_field() -> String {
    DEFAULT_ACTOR_ID_FIELD.to_string()
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

impl PlanningConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.id_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "auth.id_field cannot be empty".to_string(),
            ));
        }
        if let Some(level) = self.logging.level.as_deref() {
            crate::logging::normalize_level(level).map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }
}

/// Loads config from `path`, returning defaults when the file does not exist.
pub fn load_config(path: &Path) -> Result<PlanningConfig, ConfigError> {
    if !path.exists() {
        return Ok(PlanningConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PlanningConfig::from_toml_str(&content)
}
