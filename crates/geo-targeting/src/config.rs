//! Configuration for geo-targeting.

use std::env;
use std::path::PathBuf;

use crate::error::{GeoTargetingError, Result};
use crate::location::FallbackCountries;

/// Configuration for campaign targeting.
#[derive(Debug, Clone)]
pub struct GeoTargetingConfig {
    /// Optional JSON file of fallback countries keyed by user id.
    pub fallback_countries_path: Option<PathBuf>,
    /// Log one line per campaign decision.
    pub log_decisions: bool,
}

impl Default for GeoTargetingConfig {
    fn default() -> Self {
        Self {
            fallback_countries_path: None,
            log_decisions: true,
        }
    }
}

impl GeoTargetingConfig {
    pub fn with_fallback_countries_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_countries_path = Some(path.into());
        self
    }

    pub fn with_log_decisions(mut self, enabled: bool) -> Self {
        self.log_decisions = enabled;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `GEO_FALLBACK_COUNTRIES_PATH` (JSON object of user id -> country)
    /// - `GEO_LOG_DECISIONS` (default: true)
    pub fn from_env() -> Result<Self> {
        let fallback_countries_path = env::var("GEO_FALLBACK_COUNTRIES_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let log_decisions = match env::var("GEO_LOG_DECISIONS") {
            Ok(value) => parse_flag("GEO_LOG_DECISIONS", &value)?,
            Err(_) => true,
        };

        Ok(Self {
            fallback_countries_path,
            log_decisions,
        })
    }

    /// Load the fallback table, or an empty one if no path is configured.
    pub fn load_fallback_countries(&self) -> Result<FallbackCountries> {
        match &self.fallback_countries_path {
            Some(path) => FallbackCountries::from_path(path),
            None => Ok(FallbackCountries::new()),
        }
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(GeoTargetingError::Config {
            key,
            value: value.to_string(),
        }),
    }
}
