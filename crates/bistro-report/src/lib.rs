//! # bistro-report: Dashboard Report Generation
//!
//! Loads a snapshot and a configuration, runs the engine and wraps the
//! result in an envelope with an id and a timestamp.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportOptions                                                          │
//! │     │                                                                   │
//! │     ├── ReportConfig::load(config_path)     defaults → TOML → env      │
//! │     ├── load_snapshot(snapshot_path)        JSON → refresh → validate  │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Dashboard::new(&snapshot, &config.engine)                              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  ReportEnvelope { reportId, generatedAt, report }  ──► JSON            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod snapshot;

use std::path::PathBuf;

use bistro_core::{Dashboard, DashboardReport, FinancialSnapshot, ScenarioParams, ScenarioPlan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};
pub use snapshot::{load_snapshot, parse_snapshot};

/// A generated report with its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEnvelope {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub report: DashboardReport,
}

impl ReportEnvelope {
    pub fn to_json(&self, pretty: bool) -> ReportResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Inputs of one report run.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub snapshot_path: PathBuf,
    /// Falls back to the platform config directory.
    pub config_path: Option<PathBuf>,
    /// Overrides `[scenario] daily_sales`.
    pub daily_sales: Option<u32>,
    /// Overrides `[scenario] price_multiplier`.
    pub price_multiplier: Option<f64>,
}

/// Initializes the tracing subscriber for the binary.
///
/// `RUST_LOG` wins over the built-in filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bistro=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the scenario parameters: command line over config.
pub fn resolve_params(config: &ReportConfig, options: &ReportOptions) -> ReportResult<ScenarioParams> {
    let daily_sales = options.daily_sales.unwrap_or(config.scenario.daily_sales);
    let price_multiplier = options
        .price_multiplier
        .unwrap_or(config.scenario.price_multiplier);

    let params = ScenarioParams::new(daily_sales, price_multiplier).map_err(bistro_core::CoreError::from)?;
    Ok(params)
}

/// Builds the report for an already loaded snapshot.
pub fn build_report(
    snapshot: &FinancialSnapshot,
    config: &ReportConfig,
    params: ScenarioParams,
) -> ReportEnvelope {
    let dashboard = Dashboard::new(snapshot, &config.engine);
    let plan = ScenarioPlan::uniform(&snapshot.products, params);

    let envelope = ReportEnvelope {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        report: dashboard.report(&plan),
    };

    info!(
        report_id = %envelope.report_id,
        breakeven_daily = envelope.report.breakeven.daily_units,
        recommendations = envelope.report.recommendations.len(),
        "Dashboard report generated"
    );

    envelope
}

/// Loads config and snapshot, then builds the report.
pub fn generate(options: &ReportOptions) -> ReportResult<(ReportEnvelope, ReportConfig)> {
    let config = ReportConfig::load(options.config_path.clone())?;
    let params = resolve_params(&config, options)?;
    let snapshot = load_snapshot(&options.snapshot_path)?;

    Ok((build_report(&snapshot, &config, params), config))
}
