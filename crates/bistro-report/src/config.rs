//! # Report Configuration
//!
//! Engine settings and scenario defaults for report generation.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority, binary only)                       │
//! │     --daily-sales 80 --multiplier 1.1                                  │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     BISTRO_DAYS_PER_MONTH=26                                           │
//! │     BISTRO_BRAND_ALLOCATION=weight:0.4                                 │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/dashboard/report.toml (Linux)                            │
//! │     ~/Library/Application Support/com.bistro.dashboard/report.toml     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     30-day month, built-in bands, equal split, 50/day at 1.0×          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # report.toml
//! [engine]
//! days_per_month = 30
//!
//! [engine.allocation]
//! mode = "equal_split"   # equal_split | weight | revenue_share
//!
//! [scenario]
//! daily_sales = 50
//! price_multiplier = 1.0
//!
//! [output]
//! pretty = true
//! ```

use std::path::PathBuf;

use bistro_core::validation::validate_allocation_mode;
use bistro_core::{BrandAllocation, EngineSettings, ScenarioParams};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ReportError, ReportResult};

// =============================================================================
// Scenario Defaults
// =============================================================================

/// Parameters applied to every product in the report's scenario plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefaults {
    #[serde(default = "default_daily_sales")]
    pub daily_sales: u32,

    #[serde(default = "default_price_multiplier")]
    pub price_multiplier: f64,
}

fn default_daily_sales() -> u32 {
    50
}

fn default_price_multiplier() -> f64 {
    1.0
}

impl Default for ScenarioDefaults {
    fn default() -> Self {
        ScenarioDefaults {
            daily_sales: default_daily_sales(),
            price_multiplier: default_price_multiplier(),
        }
    }
}

// =============================================================================
// Output Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Pretty-print the JSON report.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings { pretty: true }
    }
}

// =============================================================================
// Main Report Configuration
// =============================================================================

/// Complete report configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Calculation settings passed to the engine.
    #[serde(default)]
    pub engine: EngineSettings,

    /// Scenario plan defaults.
    #[serde(default)]
    pub scenario: ScenarioDefaults,

    #[serde(default)]
    pub output: OutputSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (report.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading report config from file");
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| ReportError::ConfigLoadFailed {
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load report config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReportResult<()> {
        self.engine
            .validate()
            .map_err(|e| ReportError::InvalidConfig(e.to_string()))?;

        ScenarioParams::new(self.scenario.daily_sales, self.scenario.price_multiplier)
            .map_err(|e| ReportError::InvalidConfig(e.to_string()))?;

        Ok(())
    }

    /// Scenario parameters from the `[scenario]` section.
    pub fn scenario_params(&self) -> ReportResult<ScenarioParams> {
        let params = ScenarioParams::new(self.scenario.daily_sales, self.scenario.price_multiplier)
            .map_err(bistro_core::CoreError::from)?;
        Ok(params)
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml_string(&self) -> ReportResult<String> {
        toml::to_string_pretty(self).map_err(|e| ReportError::InvalidConfig(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `BISTRO_*` overrides from `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(days) = lookup("BISTRO_DAYS_PER_MONTH") {
            match days.trim().parse::<u32>() {
                Ok(d) => {
                    debug!(days = d, "Overriding days per month from environment");
                    self.engine.days_per_month = d;
                }
                Err(_) => warn!(value = %days, "Invalid BISTRO_DAYS_PER_MONTH"),
            }
        }

        if let Some(sales) = lookup("BISTRO_DAILY_SALES") {
            match sales.trim().parse::<u32>() {
                Ok(s) => self.scenario.daily_sales = s,
                Err(_) => warn!(value = %sales, "Invalid BISTRO_DAILY_SALES"),
            }
        }

        if let Some(multiplier) = lookup("BISTRO_PRICE_MULTIPLIER") {
            match multiplier.trim().parse::<f64>() {
                Ok(m) => self.scenario.price_multiplier = m,
                Err(_) => warn!(value = %multiplier, "Invalid BISTRO_PRICE_MULTIPLIER"),
            }
        }

        if let Some(allocation) = lookup("BISTRO_BRAND_ALLOCATION") {
            match parse_allocation(&allocation) {
                Some(parsed) => {
                    debug!(allocation = %allocation, "Overriding brand allocation from environment");
                    self.engine.allocation = parsed;
                }
                None => warn!(allocation = %allocation, "Unknown brand allocation in environment"),
            }
        }

        if let Some(pretty) = lookup("BISTRO_PRETTY") {
            match pretty.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.output.pretty = true,
                "0" | "false" | "no" => self.output.pretty = false,
                _ => warn!(value = %pretty, "Invalid BISTRO_PRETTY"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bistro", "dashboard")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }
}

/// Parses `equal_split`, `revenue_share` or `weight:<w>`.
///
/// `revenue_share` carries no revenue; the dashboard derives it from the
/// scenario plan.
fn parse_allocation(value: &str) -> Option<BrandAllocation> {
    let (mode, argument) = match value.split_once(':') {
        Some((mode, argument)) => (mode, Some(argument.trim())),
        None => (value, None),
    };

    match (validate_allocation_mode(mode).ok()?.as_str(), argument) {
        ("equal_split", None) => Some(BrandAllocation::EqualSplit),
        ("revenue_share", None) => Some(BrandAllocation::RevenueShare {
            revenue: Default::default(),
        }),
        ("weight", Some(weight)) => weight
            .parse::<f64>()
            .ok()
            .map(|weight| BrandAllocation::Weight { weight }),
        _ => None,
    }
}
