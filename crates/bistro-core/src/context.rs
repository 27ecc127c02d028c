//! # Dashboard Context
//!
//! The per-request entry point: a read-only view over one snapshot plus the
//! engine settings, exposing every number the dashboard tabs show.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storage collaborator ──► FinancialSnapshot (owned, fully loaded)      │
//! │                                   │                                     │
//! │  EngineSettings ──────────────────┤                                     │
//! │                                   ▼                                     │
//! │                     Dashboard::new(&snapshot, &settings)                │
//! │                                   │                                     │
//! │            ┌──────────────┬───────┴───────┬──────────────┐              │
//! │            ▼              ▼               ▼              ▼              │
//! │      cost_breakdown  product_economics  breakeven  project_consolidated│
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                     report(&plan) → DashboardReport                     │
//! │                                                                         │
//! │  The Dashboard borrows; dropping it leaves nothing behind.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is cached between calls: every method recomputes from the
//! snapshot, so two calls on the same input return identical values.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::breakeven::{BrandAllocation, BrandBreakEven, BreakEven, BreakEvenCalculator, BreakEvenScope};
use crate::costs::{self, CategorySummary, CostBreakdown, FixedCostBuckets};
use crate::economics::{self, BrandMargins, PortfolioSummary, ProductEconomics};
use crate::error::{CoreError, CoreResult};
use crate::insights::{self, Recommendation};
use crate::money::Money;
use crate::scenario::{ConsolidatedScenario, Scenario, ScenarioParams, ScenarioPlan};
use crate::settings::EngineSettings;
use crate::types::{Brand, CostCategory, FinancialMetrics, GlobalFixedCost, Product};
use crate::validation::{validate_amount_cents, validate_entity_id};

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the engine needs, fully materialised.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub fixed_costs: Vec<GlobalFixedCost>,
    #[serde(default)]
    pub cost_categories: Vec<CostCategory>,
    /// Latest stored metrics record, passed through untouched.
    #[serde(default)]
    pub latest_metrics: Option<FinancialMetrics>,
}

impl FinancialSnapshot {
    /// Decodes a camelCase JSON snapshot.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidSnapshot(e.to_string()))?;
        if !value.is_object() {
            return Err(CoreError::InvalidSnapshot(
                "expected a JSON object at the top level".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| CoreError::InvalidSnapshot(e.to_string()))
    }

    /// Checks ids and stored amounts.
    ///
    /// ## Rules
    /// - Every brand, product, ingredient and fixed cost has a non-blank id
    /// - Prices, ingredient costs and fixed cost amounts are non-negative
    /// - Every product references a known brand (when brands are present)
    pub fn validate(&self) -> CoreResult<()> {
        for brand in &self.brands {
            validate_entity_id("brand.id", &brand.id)?;
        }

        for product in &self.products {
            validate_entity_id("product.id", &product.id)?;
            validate_amount_cents("product.priceCents", product.price_cents)?;
            for ingredient in &product.ingredients {
                validate_entity_id("ingredient.id", &ingredient.id)?;
                validate_amount_cents("ingredient.costCents", ingredient.cost_cents)?;
            }
            if !self.brands.is_empty() && self.brand(&product.brand_id).is_err() {
                return Err(CoreError::BrandNotFound(product.brand_id.clone()));
            }
        }

        for cost in &self.fixed_costs {
            validate_entity_id("fixedCost.id", &cost.id)?;
            validate_amount_cents("fixedCost.amountCents", cost.amount_cents)?;
        }

        Ok(())
    }

    /// Refreshes every cached CMV that disagrees with its ingredients.
    ///
    /// Returns the ids of the refreshed products.
    pub fn refresh_stale_cmvs(&mut self) -> Vec<String> {
        let mut refreshed = Vec::new();
        for product in self.products.iter_mut().filter(|product| product.is_cmv_stale()) {
            debug!(
                product_id = %product.id,
                cached = %product.cached_cmv(),
                live = %product.live_cmv(),
                "Refreshing stale CMV"
            );
            product.refresh_cmv();
            refreshed.push(product.id.clone());
        }
        refreshed
    }

    pub fn product(&self, product_id: &str) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|product| product.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))
    }

    pub fn brand(&self, brand_id: &str) -> CoreResult<&Brand> {
        self.brands
            .iter()
            .find(|brand| brand.id == brand_id)
            .ok_or_else(|| CoreError::BrandNotFound(brand_id.to_string()))
    }
}

// =============================================================================
// Report
// =============================================================================

/// Every dashboard figure for one snapshot and scenario plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub total_fixed_costs: Money,
    pub cost_breakdown: CostBreakdown,
    pub cost_buckets: FixedCostBuckets,
    pub category_summaries: Vec<CategorySummary>,
    pub products: Vec<ProductEconomics>,
    pub portfolio: PortfolioSummary,
    pub margins_by_brand: Vec<BrandMargins>,
    pub breakeven: BreakEven,
    pub breakeven_by_brand: Vec<BrandBreakEven>,
    pub scenario: ConsolidatedScenario,
    pub recommendations: Vec<Recommendation>,
    pub latest_metrics: Option<FinancialMetrics>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Read-only computation context for one request.
#[derive(Debug, Clone, Copy)]
pub struct Dashboard<'a> {
    snapshot: &'a FinancialSnapshot,
    settings: &'a EngineSettings,
}

impl<'a> Dashboard<'a> {
    pub fn new(snapshot: &'a FinancialSnapshot, settings: &'a EngineSettings) -> Self {
        Dashboard { snapshot, settings }
    }

    pub fn snapshot(&self) -> &'a FinancialSnapshot {
        self.snapshot
    }

    pub fn settings(&self) -> &'a EngineSettings {
        self.settings
    }

    // -------------------------------------------------------------------------
    // Costs
    // -------------------------------------------------------------------------

    pub fn total_fixed_costs(&self) -> Money {
        costs::total_active(&self.snapshot.fixed_costs)
    }

    pub fn cost_breakdown(&self) -> CostBreakdown {
        costs::aggregate(&self.snapshot.fixed_costs)
    }

    pub fn cost_buckets(&self) -> FixedCostBuckets {
        FixedCostBuckets::from_costs(&self.snapshot.fixed_costs)
    }

    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        costs::summarize_by_category(&self.snapshot.fixed_costs, &self.snapshot.cost_categories)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Economics of every product, in snapshot order.
    pub fn product_economics(&self) -> Vec<ProductEconomics> {
        self.snapshot
            .products
            .iter()
            .map(|product| {
                ProductEconomics::compute_with(product, &self.settings.product_margin_thresholds)
            })
            .collect()
    }

    pub fn economics_for(&self, product_id: &str) -> CoreResult<ProductEconomics> {
        let product = self.snapshot.product(product_id)?;
        Ok(ProductEconomics::compute_with(
            product,
            &self.settings.product_margin_thresholds,
        ))
    }

    pub fn portfolio(&self, brand_id: Option<&str>) -> PortfolioSummary {
        economics::portfolio_summary(&self.snapshot.products, brand_id)
    }

    pub fn margins_by_brand(&self) -> Vec<BrandMargins> {
        economics::margins_by_brand(
            &self.snapshot.brands,
            &self.snapshot.products,
            &self.settings.product_margin_thresholds,
        )
    }

    // -------------------------------------------------------------------------
    // Break-even
    // -------------------------------------------------------------------------

    /// Consolidated break-even over all products and all fixed costs.
    pub fn breakeven(&self) -> BreakEven {
        self.settings.breakeven_calculator().compute(
            self.total_fixed_costs(),
            &self.snapshot.products,
            BreakEvenScope::Consolidated,
        )
    }

    /// Break-even of one brand. A revenue-share policy without explicit
    /// revenue weighs brands by `plan`'s projection.
    pub fn breakeven_for_brand(&self, brand_id: &str, plan: &ScenarioPlan) -> CoreResult<BreakEven> {
        self.snapshot.brand(brand_id)?;
        Ok(self.calculator_for(plan).for_brand(
            self.total_fixed_costs(),
            brand_id,
            &self.snapshot.brands,
            &self.snapshot.products,
        ))
    }

    /// Per-brand break-even, allocated the same way as `breakeven_for_brand`.
    pub fn breakeven_by_brand(&self, plan: &ScenarioPlan) -> Vec<BrandBreakEven> {
        self.calculator_for(plan).by_brand(
            self.total_fixed_costs(),
            &self.snapshot.brands,
            &self.snapshot.products,
        )
    }

    fn calculator_for(&self, plan: &ScenarioPlan) -> BreakEvenCalculator {
        let calculator = self.settings.breakeven_calculator();
        match calculator.allocation() {
            BrandAllocation::RevenueShare { revenue } if revenue.is_empty() => {
                let revenue = self
                    .settings
                    .scenario_projector()
                    .revenue_by_brand(&self.snapshot.products, plan);
                calculator.with_allocation(BrandAllocation::RevenueShare { revenue })
            }
            _ => calculator,
        }
    }

    // -------------------------------------------------------------------------
    // Scenarios
    // -------------------------------------------------------------------------

    /// Every product at 50 a day and the current price.
    pub fn default_plan(&self) -> ScenarioPlan {
        ScenarioPlan::uniform(&self.snapshot.products, ScenarioParams::default())
    }

    pub fn project(&self, product_id: &str, params: &ScenarioParams) -> CoreResult<Scenario> {
        let product = self.snapshot.product(product_id)?;
        Ok(self.settings.scenario_projector().project(product, params))
    }

    pub fn project_consolidated(&self, plan: &ScenarioPlan) -> ConsolidatedScenario {
        self.settings.scenario_projector().project_consolidated(
            &self.snapshot.products,
            plan,
            self.total_fixed_costs(),
        )
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------

    pub fn recommendations(&self) -> Vec<Recommendation> {
        insights::recommend(self)
    }

    /// Bundles every figure for `plan`.
    pub fn report(&self, plan: &ScenarioPlan) -> DashboardReport {
        debug!(
            brands = self.snapshot.brands.len(),
            products = self.snapshot.products.len(),
            fixed_costs = self.snapshot.fixed_costs.len(),
            planned = plan.len(),
            "Building dashboard report"
        );

        DashboardReport {
            total_fixed_costs: self.total_fixed_costs(),
            cost_breakdown: self.cost_breakdown(),
            cost_buckets: self.cost_buckets(),
            category_summaries: self.category_summaries(),
            products: self.product_economics(),
            portfolio: self.portfolio(None),
            margins_by_brand: self.margins_by_brand(),
            breakeven: self.breakeven(),
            breakeven_by_brand: self.breakeven_by_brand(plan),
            scenario: self.project_consolidated(plan),
            recommendations: self.recommendations(),
            latest_metrics: self.snapshot.latest_metrics.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
