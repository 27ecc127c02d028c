//! # bistro-core: Pure Financial Engine for Bistro Finance
//!
//! This crate turns raw dashboard entities (brands, products, ingredients,
//! fixed costs) into the metrics the operator looks at: CMV, margin,
//! break-even point and scenario projections. Everything here is a pure
//! function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bistro Finance Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard UI (tabs)                          │   │
//! │  │  Overview ─ Products ─ Costs ─ Margins ─ Break-even ─ Scenarios │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ FinancialSnapshot                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ economics │  │   costs   │  │ breakeven │  │ scenario  │  │   │
//! │  │   │ CMV       │  │ totals    │  │ units/day │  │ what-if   │  │   │
//! │  │   │ margin %  │  │ category  │  │ per brand │  │ projection│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │          └──────────────┴──── status ───┴──────────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │          Storage collaborator (hosted table store)              │   │
//! │  │          fetches the snapshot, never called from here           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Brand, Product, Ingredient, GlobalFixedCost, ...)
//! - [`money`] - Money type with integer centavo arithmetic
//! - [`status`] - Four-band status classifier with explicit direction
//! - [`economics`] - Per-product CMV, profit and margin
//! - [`costs`] - Fixed cost aggregation
//! - [`breakeven`] - Break-even units, consolidated and per brand
//! - [`scenario`] - Revenue/profit projections from sales volume and price
//! - [`insights`] - Prioritised recommendations derived from the bands
//! - [`context`] - Per-request dashboard context over a snapshot
//! - [`settings`] - Tunable engine parameters
//! - [`error`] - Domain error types
//! - [`validation`] - Simulation/settings parameter validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same snapshot in, bit-identical numbers out
//! 2. **No I/O**: the storage layer is an external collaborator
//! 3. **Integer Money**: amounts are centavos (i64); only ratios are `f64`
//! 4. **Never NaN**: divisions by zero resolve to 0, never `NaN`/`inf`
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::economics::compute_economics;
//! use bistro_core::money::Money;
//! use bistro_core::types::{Ingredient, Product};
//!
//! let burger = Product::new(
//!     "p-1",
//!     "Classic Burger",
//!     "brand-1",
//!     Money::from_cents(2000),
//!     vec![
//!         Ingredient::new("i-1", "Bun", Money::from_cents(150), "un"),
//!         Ingredient::new("i-2", "Patty", Money::from_cents(650), "un"),
//!     ],
//! );
//!
//! let economics = compute_economics(&burger);
//! assert_eq!(economics.cmv.cents(), 800);
//! assert_eq!(economics.profit.cents(), 1200);
//! assert!((economics.margin_pct - 60.0).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod breakeven;
pub mod context;
pub mod costs;
pub mod economics;
pub mod error;
pub mod insights;
pub mod money;
pub mod scenario;
pub mod settings;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use breakeven::{BrandAllocation, BreakEven, BreakEvenCalculator, BreakEvenScope};
pub use context::{Dashboard, DashboardReport, FinancialSnapshot};
pub use costs::{aggregate, CostBreakdown, FixedCostBuckets};
pub use economics::{compute_economics, ProductEconomics};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use scenario::{ConsolidatedScenario, Scenario, ScenarioParams, ScenarioPlan, ScenarioProjector};
pub use settings::EngineSettings;
pub use status::{classify, BandDirection, BandingPolicy, StatusBand, Thresholds};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Days used to convert between daily and monthly figures.
///
/// ## Business Reason
/// The dashboard plans on a flat 30-day month; changing it shifts every
/// daily target, so it lives in [`EngineSettings`] for overrides.
pub const DAYS_PER_MONTH: u32 = 30;

/// Lowest daily sales volume the scenario simulator offers.
pub const MIN_DAILY_SALES: u32 = 10;

/// Highest daily sales volume the scenario simulator offers.
pub const MAX_DAILY_SALES: u32 = 200;

/// Lowest price multiplier (30% discount).
pub const MIN_PRICE_MULTIPLIER: f64 = 0.7;

/// Highest price multiplier (50% increase).
pub const MAX_PRICE_MULTIPLIER: f64 = 1.5;

/// Returns `value` when it is finite, otherwise 0.
///
/// Every ratio in the engine goes through this before leaving a function.
#[inline]
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
