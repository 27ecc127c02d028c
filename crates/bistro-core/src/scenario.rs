//! # Scenario Projection
//!
//! "What if we sell N burgers a day at X% of the current price?"
//!
//! ## Per-Product Projection
//! ```text
//! adjusted price   = price × multiplier            (rounded to the centavo)
//! unit margin      = adjusted price − cmv
//! monthly revenue  = daily sales × adjusted price × 30
//! monthly profit   = daily sales × unit margin × 30
//! profit margin %  = profit ÷ revenue × 100        (0 when revenue ≤ 0)
//! ```
//!
//! ## Consolidated Projection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each product WITH an entry in the plan:                           │
//! │      revenue += projection.monthly_revenue                             │
//! │      gross   += projection.monthly_profit                              │
//! │                                                                         │
//! │  net profit = gross − fixed costs        (fixed costs subtracted ONCE) │
//! │  margin %   = net profit ÷ revenue × 100                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A product missing from the plan contributes nothing; it is never filled
//! in with default parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::status::{BandingPolicy, StatusBand, Thresholds};
use crate::types::Product;
use crate::validation::{validate_daily_sales, validate_price_multiplier, ValidationResult};
use crate::DAYS_PER_MONTH;

// =============================================================================
// Parameters
// =============================================================================

/// Simulation inputs for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParams {
    /// Units sold per day.
    pub daily_sales: u32,
    /// 1.0 = current price, 0.9 = 10% discount, 1.2 = 20% increase.
    pub price_multiplier: f64,
}

impl ScenarioParams {
    /// Creates parameters within the simulator's ranges
    /// (daily sales 10–200, multiplier 0.7–1.5).
    pub fn new(daily_sales: u32, price_multiplier: f64) -> ValidationResult<Self> {
        validate_daily_sales(daily_sales)?;
        validate_price_multiplier(price_multiplier)?;
        Ok(ScenarioParams {
            daily_sales,
            price_multiplier,
        })
    }

    /// Creates parameters without range checks.
    ///
    /// Projection accepts any values; this exists for callers that
    /// deliberately go beyond the simulator sliders.
    pub const fn unchecked(daily_sales: u32, price_multiplier: f64) -> Self {
        ScenarioParams {
            daily_sales,
            price_multiplier,
        }
    }
}

impl Default for ScenarioParams {
    /// 50 burgers a day at the current price.
    fn default() -> Self {
        ScenarioParams::unchecked(50, 1.0)
    }
}

impl TryFrom<(u32, f64)> for ScenarioParams {
    type Error = ValidationError;

    fn try_from((daily_sales, price_multiplier): (u32, f64)) -> Result<Self, Self::Error> {
        ScenarioParams::new(daily_sales, price_multiplier)
    }
}

// =============================================================================
// Scenario Plan
// =============================================================================

/// Parameters per product id.
///
/// Ordered by product id so that anything derived from a plan is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScenarioPlan {
    entries: BTreeMap<String, ScenarioParams>,
}

impl ScenarioPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives every product the same parameters.
    pub fn uniform(products: &[Product], params: ScenarioParams) -> Self {
        ScenarioPlan {
            entries: products
                .iter()
                .map(|product| (product.id.clone(), params))
                .collect(),
        }
    }

    pub fn set(&mut self, product_id: impl Into<String>, params: ScenarioParams) {
        self.entries.insert(product_id.into(), params);
    }

    pub fn get(&self, product_id: &str) -> Option<&ScenarioParams> {
        self.entries.get(product_id)
    }

    pub fn remove(&mut self, product_id: &str) -> Option<ScenarioParams> {
        self.entries.remove(product_id)
    }

    /// Overwrites the parameters of the selected products ("apply to
    /// selection"). Returns how many entries were written.
    pub fn apply<'a, I>(&mut self, product_ids: I, params: ScenarioParams) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut written = 0;
        for product_id in product_ids {
            self.entries.insert(product_id.to_string(), params);
            written += 1;
        }
        written
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Results
// =============================================================================

/// Monthly projection for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub adjusted_price: Money,
    pub unit_margin: Money,
    pub monthly_revenue: Money,
    pub monthly_profit: Money,
    pub profit_margin_pct: f64,
    pub status: StatusBand,
}

/// Monthly projection of the whole menu, net of fixed costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedScenario {
    /// Products that had an entry in the plan.
    pub products_included: usize,
    pub monthly_revenue: Money,
    /// Σ product profit before fixed costs.
    pub gross_profit: Money,
    pub fixed_costs: Money,
    /// Gross profit minus fixed costs.
    pub monthly_profit: Money,
    pub profit_margin_pct: f64,
    pub status: StatusBand,
}

// =============================================================================
// Projector
// =============================================================================

/// Projects scenarios with a given month length and margin banding.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioProjector {
    days_per_month: u32,
    thresholds: Thresholds,
}

impl Default for ScenarioProjector {
    fn default() -> Self {
        ScenarioProjector {
            days_per_month: DAYS_PER_MONTH,
            thresholds: BandingPolicy::ScenarioProfitMargin.thresholds(),
        }
    }
}

impl ScenarioProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_days_per_month(mut self, days: u32) -> Self {
        self.days_per_month = days.max(1);
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn monthly_volume(&self, params: &ScenarioParams) -> i64 {
        i64::from(params.daily_sales) * i64::from(self.days_per_month)
    }

    /// Projects one product.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    /// use bistro_core::scenario::{ScenarioParams, ScenarioProjector};
    /// use bistro_core::status::StatusBand;
    /// use bistro_core::types::{Ingredient, Product};
    ///
    /// let product = Product::new(
    ///     "p-1",
    ///     "Classic",
    ///     "b-1",
    ///     Money::from_cents(2000),
    ///     vec![Ingredient::new("i-1", "Patty", Money::from_cents(800), "un")],
    /// );
    ///
    /// let scenario = ScenarioProjector::new().project(&product, &ScenarioParams::default());
    /// assert_eq!(scenario.monthly_revenue.cents(), 3_000_000); // R$ 30.000
    /// assert_eq!(scenario.monthly_profit.cents(), 1_800_000); // R$ 18.000
    /// assert_eq!(scenario.profit_margin_pct, 60.0);
    /// assert_eq!(scenario.status, StatusBand::Excellent);
    /// ```
    pub fn project(&self, product: &Product, params: &ScenarioParams) -> Scenario {
        let adjusted_price = product.price().scale(params.price_multiplier);
        let unit_margin = adjusted_price - product.live_cmv();
        let volume = self.monthly_volume(params);

        let monthly_revenue = adjusted_price.multiply_quantity(volume);
        let monthly_profit = unit_margin.multiply_quantity(volume);
        let profit_margin_pct = monthly_profit.percent_of(monthly_revenue);

        Scenario {
            adjusted_price,
            unit_margin,
            monthly_revenue,
            monthly_profit,
            profit_margin_pct,
            status: self.thresholds.classify(profit_margin_pct),
        }
    }

    /// Projects every product in the plan and nets out the fixed costs once.
    pub fn project_consolidated(
        &self,
        products: &[Product],
        plan: &ScenarioPlan,
        total_fixed_costs: Money,
    ) -> ConsolidatedScenario {
        let mut products_included = 0;
        let mut monthly_revenue = Money::zero();
        let mut gross_profit = Money::zero();

        for product in products {
            let Some(params) = plan.get(&product.id) else {
                continue;
            };
            let scenario = self.project(product, params);
            monthly_revenue += scenario.monthly_revenue;
            gross_profit += scenario.monthly_profit;
            products_included += 1;
        }

        let monthly_profit = gross_profit - total_fixed_costs;
        let profit_margin_pct = monthly_profit.percent_of(monthly_revenue);

        debug!(
            products = products_included,
            revenue = %monthly_revenue,
            profit = %monthly_profit,
            "Projected consolidated scenario"
        );

        ConsolidatedScenario {
            products_included,
            monthly_revenue,
            gross_profit,
            fixed_costs: total_fixed_costs,
            monthly_profit,
            profit_margin_pct,
            status: self.thresholds.classify(profit_margin_pct),
        }
    }

    /// Projected monthly revenue per brand id, for products in the plan.
    ///
    /// Feeds `BrandAllocation::RevenueShare`.
    pub fn revenue_by_brand(&self, products: &[Product], plan: &ScenarioPlan) -> BTreeMap<String, Money> {
        let mut revenue: BTreeMap<String, Money> = BTreeMap::new();
        for product in products {
            if let Some(params) = plan.get(&product.id) {
                *revenue.entry(product.brand_id.clone()).or_default() +=
                    self.project(product, params).monthly_revenue;
            }
        }
        revenue
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ingredient;

    fn product(id: &str, brand: &str, price: i64, cmv: i64) -> Product {
        Product::new(
            id,
            id,
            brand,
            Money::from_cents(price),
            vec![Ingredient::new(format!("{id}-i"), "mix", Money::from_cents(cmv), "un")],
        )
    }

    #[test]
    fn test_reference_projection() {
        let scenario = ScenarioProjector::new().project(
            &product("p-1", "b-1", 2000, 800),
            &ScenarioParams::new(50, 1.0).unwrap(),
        );
        assert_eq!(scenario.adjusted_price.cents(), 2000);
        assert_eq!(scenario.unit_margin.cents(), 1200);
        assert_eq!(scenario.monthly_revenue.cents(), 3_000_000);
        assert_eq!(scenario.monthly_profit.cents(), 1_800_000);
        assert_eq!(scenario.profit_margin_pct, 60.0);
        assert_eq!(scenario.status, StatusBand::Excellent);
    }

    #[test]
    fn test_discount_can_turn_critical() {
        // 30% off a thin-margin product sells below cost
        let scenario = ScenarioProjector::new().project(
            &product("p-1", "b-1", 1000, 800),
            &ScenarioParams::new(100, 0.7).unwrap(),
        );
        assert_eq!(scenario.adjusted_price.cents(), 700);
        assert_eq!(scenario.unit_margin.cents(), -100);
        assert_eq!(scenario.monthly_profit.cents(), -300_000);
        assert_eq!(scenario.status, StatusBand::Critical);
    }

    #[test]
    fn test_zero_revenue_has_zero_margin() {
        let scenario = ScenarioProjector::new().project(
            &product("p-1", "b-1", 2000, 800),
            &ScenarioParams::unchecked(0, 1.0),
        );
        assert!(scenario.monthly_revenue.is_zero());
        assert_eq!(scenario.profit_margin_pct, 0.0);
        assert_eq!(scenario.status, StatusBand::Critical);
    }

    #[test]
    fn test_params_validation() {
        assert!(ScenarioParams::new(10, 0.7).is_ok());
        assert!(ScenarioParams::new(200, 1.5).is_ok());
        assert!(ScenarioParams::new(9, 1.0).is_err());
        assert!(ScenarioParams::new(201, 1.0).is_err());
        assert!(ScenarioParams::new(50, 0.69).is_err());
        assert!(ScenarioParams::new(50, f64::NAN).is_err());
        assert!(ScenarioParams::try_from((50, 1.2)).is_ok());
    }

    #[test]
    fn test_consolidated_subtracts_fixed_costs_once() {
        let products = vec![product("p-1", "b-1", 2000, 800), product("p-2", "b-2", 2000, 800)];
        let plan = ScenarioPlan::uniform(&products, ScenarioParams::default());

        let consolidated =
            ScenarioProjector::new().project_consolidated(&products, &plan, Money::from_cents(1_000_000));
        assert_eq!(consolidated.products_included, 2);
        assert_eq!(consolidated.gross_profit.cents(), 3_600_000);
        assert_eq!(consolidated.monthly_profit.cents(), 2_600_000);
        assert_eq!(consolidated.monthly_revenue.cents(), 6_000_000);
        assert!((consolidated.profit_margin_pct - 43.333_333).abs() < 1e-5);
        assert_eq!(consolidated.status, StatusBand::Excellent);
    }

    #[test]
    fn test_products_missing_from_plan_are_excluded() {
        let products = vec![product("p-1", "b-1", 2000, 800), product("p-2", "b-1", 5000, 100)];
        let mut plan = ScenarioPlan::new();
        plan.set("p-1", ScenarioParams::default());

        let consolidated = ScenarioProjector::new().project_consolidated(&products, &plan, Money::zero());
        assert_eq!(consolidated.products_included, 1);
        assert_eq!(consolidated.monthly_revenue.cents(), 3_000_000);
    }

    #[test]
    fn test_empty_plan_is_pure_fixed_cost_loss() {
        let products = vec![product("p-1", "b-1", 2000, 800)];
        let consolidated = ScenarioProjector::new().project_consolidated(
            &products,
            &ScenarioPlan::new(),
            Money::from_cents(500_000),
        );
        assert_eq!(consolidated.monthly_profit.cents(), -500_000);
        assert_eq!(consolidated.profit_margin_pct, 0.0);
        assert_eq!(consolidated.status, StatusBand::Critical);
    }

    #[test]
    fn test_apply_to_selection() {
        let products = vec![
            product("p-1", "b-1", 2000, 800),
            product("p-2", "b-1", 2000, 800),
            product("p-3", "b-1", 2000, 800),
        ];
        let mut plan = ScenarioPlan::uniform(&products, ScenarioParams::default());
        let boost = ScenarioParams::new(120, 1.1).unwrap();

        assert_eq!(plan.apply(["p-1", "p-3"], boost), 2);
        assert_eq!(plan.get("p-1"), Some(&boost));
        assert_eq!(plan.get("p-2"), Some(&ScenarioParams::default()));
        assert_eq!(plan.get("p-3"), Some(&boost));
        assert_eq!(plan.len(), 3);

        assert_eq!(plan.remove("p-2"), Some(ScenarioParams::default()));
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_revenue_by_brand() {
        let products = vec![
            product("p-1", "b-1", 2000, 800),
            product("p-2", "b-1", 1000, 800),
            product("p-3", "b-2", 3000, 800),
        ];
        let plan = ScenarioPlan::uniform(&products, ScenarioParams::unchecked(10, 1.0));

        let revenue = ScenarioProjector::new().revenue_by_brand(&products, &plan);
        assert_eq!(revenue["b-1"].cents(), 900_000);
        assert_eq!(revenue["b-2"].cents(), 900_000);
    }
}
