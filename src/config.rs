//! Environment configuration
//!
//! Every setting is optional; defaults point at a local gateway and the
//! fixed dashboard targets.

use thiserror::Error;

use crate::models::MacroTarget;

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8000/api/v1/recipes";
pub const DEFAULT_CATALOG_LIMIT: u32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

const ENV_CATALOG_URL: &str = "NUTRIENT_ENGINE_CATALOG_URL";
const ENV_CATALOG_LIMIT: &str = "NUTRIENT_ENGINE_CATALOG_LIMIT";
const ENV_TIMEOUT_SECS: &str = "NUTRIENT_ENGINE_TIMEOUT_SECS";
const ENV_TARGET_CALORIES: &str = "NUTRIENT_ENGINE_TARGET_CALORIES";
const ENV_TARGET_PROTEIN: &str = "NUTRIENT_ENGINE_TARGET_PROTEIN";
const ENV_TARGET_CARBS: &str = "NUTRIENT_ENGINE_TARGET_CARBS";
const ENV_TARGET_FAT: &str = "NUTRIENT_ENGINE_TARGET_FAT";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be a positive number, got '{value}'")]
    InvalidTarget { var: &'static str, value: String },
}

/// Where and how to reach the ingredient catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub limit: u32,
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            limit: DEFAULT_CATALOG_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub catalog: CatalogConfig,
    pub targets: MacroTarget,
}

impl EngineConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = EngineConfig::default();

        if let Some(url) = get(ENV_CATALOG_URL) {
            config.catalog.base_url = url;
        }
        if let Some(raw) = get(ENV_CATALOG_LIMIT) {
            config.catalog.limit = parse_positive_int(ENV_CATALOG_LIMIT, &raw)?;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config.catalog.timeout_secs = parse_positive_int(ENV_TIMEOUT_SECS, &raw)?;
        }

        let targets = &mut config.targets;
        for (var, slot) in [
            (ENV_TARGET_CALORIES, &mut targets.calories),
            (ENV_TARGET_PROTEIN, &mut targets.protein),
            (ENV_TARGET_CARBS, &mut targets.carbs),
            (ENV_TARGET_FAT, &mut targets.fat),
        ] {
            if let Some(raw) = get(var) {
                *slot = parse_target(var, &raw)?;
            }
        }

        Ok(config)
    }
}

fn parse_positive_int<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::InvalidNumber { var, value: raw.to_string() }),
    }
}

fn parse_target(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ConfigError::InvalidTarget { var, value: raw.to_string() }),
    }
}
