//! # Snapshot Loading
//!
//! Reads the JSON snapshot exported by the storage collaborator.
//!
//! ## Load Steps
//! ```text
//! snapshot.json ──► read ──► decode (camelCase) ──► refresh stale CMVs ──► validate
//!                    │            │                        │                  │
//!                    ▼            ▼                        ▼                  ▼
//!          SnapshotLoadFailed  Core(InvalidSnapshot)   warn! per product  Core(..)
//! ```

use std::path::Path;

use bistro_core::FinancialSnapshot;
use tracing::{info, warn};

use crate::error::{ReportError, ReportResult};

/// Loads, repairs and validates a snapshot file.
pub fn load_snapshot(path: &Path) -> ReportResult<FinancialSnapshot> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReportError::SnapshotLoadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let snapshot = parse_snapshot(&contents)?;

    info!(
        ?path,
        brands = snapshot.brands.len(),
        products = snapshot.products.len(),
        fixed_costs = snapshot.fixed_costs.len(),
        "Snapshot loaded"
    );

    Ok(snapshot)
}

/// Decodes, repairs and validates snapshot JSON.
pub fn parse_snapshot(json: &str) -> ReportResult<FinancialSnapshot> {
    let mut snapshot = FinancialSnapshot::from_json(json)?;

    for product_id in snapshot.refresh_stale_cmvs() {
        warn!(product_id = %product_id, "Cached CMV disagreed with ingredients; refreshed");
    }

    snapshot.validate()?;
    Ok(snapshot)
}
