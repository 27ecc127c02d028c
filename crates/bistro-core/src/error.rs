//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - Entity lookups, thresholds, snapshots          │
//! │  └── ValidationError  - Out-of-range simulation/settings input         │
//! │                                                                         │
//! │  bistro-report errors (separate crate)                                 │
//! │  └── ReportError      - Config/snapshot loading failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ReportError → stderr              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Never Errors
//! The calculations themselves (CMV, margin, break-even, scenarios) do not
//! return `Result`. Degenerate input such as a zero price or an empty product
//! list produces 0, not an error. Errors are reserved for lookups by id and
//! for parameters a caller can correct.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Ingredient id is not part of the product's recipe.
    ///
    /// ## When This Occurs
    /// - Updating an ingredient that was removed in another tab
    /// - Stale ingredient id after a snapshot refresh
    #[error("Ingredient {ingredient_id} not found in product {product_id}")]
    IngredientNotFound {
        product_id: String,
        ingredient_id: String,
    },

    /// Brand cannot be found in the snapshot.
    #[error("Brand not found: {0}")]
    BrandNotFound(String),

    /// Banding thresholds are not ordered for their direction.
    #[error("Invalid thresholds for {policy}: {reason}")]
    InvalidThresholds { policy: String, reason: String },

    /// Snapshot payload could not be decoded.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the validating constructors (`ScenarioParams::new`,
/// `EngineSettings::validate`), never by the calculations.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
