//! # Product Economics
//!
//! Unit-level numbers for a single product: CMV, profit and margin, plus
//! the recipe and portfolio views built on top of them.
//!
//! ## Formulas
//! ```text
//! cmv        = Σ ingredient.cost            (0 for an empty recipe)
//! profit     = price − cmv                  (may be negative)
//! margin_pct = profit / price × 100         (0 when price ≤ 0)
//! ```
//!
//! A negative profit is not rejected here; it lands in the `Critical` band
//! and is flagged by [`crate::insights`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::status::{BandingPolicy, StatusBand, Thresholds};
use crate::types::{Brand, Product};

// =============================================================================
// Product Economics
// =============================================================================

/// CMV, profit and margin of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductEconomics {
    pub product_id: String,
    pub cmv: Money,
    pub profit: Money,
    pub margin_pct: f64,
    pub status: StatusBand,
}

impl ProductEconomics {
    /// Computes the economics with explicit margin thresholds.
    pub fn compute_with(product: &Product, thresholds: &Thresholds) -> Self {
        let price = product.price();
        let cmv = product.live_cmv();
        let profit = price - cmv;
        let margin_pct = profit.percent_of(price);

        ProductEconomics {
            product_id: product.id.clone(),
            cmv,
            profit,
            margin_pct,
            status: thresholds.classify(margin_pct),
        }
    }
}

/// Computes the economics with the default product-margin bands.
///
/// ## Example
/// ```rust
/// use bistro_core::economics::compute_economics;
/// use bistro_core::money::Money;
/// use bistro_core::types::Product;
///
/// let giveaway = Product::new("p-9", "Sample", "b-1", Money::zero(), vec![]);
/// let economics = compute_economics(&giveaway);
/// assert_eq!(economics.margin_pct, 0.0);
/// ```
pub fn compute_economics(product: &Product) -> ProductEconomics {
    ProductEconomics::compute_with(product, &BandingPolicy::ProductMargin.thresholds())
}

// =============================================================================
// Recipe Breakdown
// =============================================================================

/// How much one ingredient weighs in the product's CMV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct IngredientShare {
    pub ingredient_id: String,
    pub name: String,
    pub cost: Money,
    /// Percentage of the CMV; 0 when the CMV is 0.
    pub share_of_cmv_pct: f64,
}

/// Per-ingredient share of CMV, in recipe order.
pub fn ingredient_breakdown(product: &Product) -> Vec<IngredientShare> {
    let cmv = product.live_cmv();
    product
        .ingredients
        .iter()
        .map(|ingredient| IngredientShare {
            ingredient_id: ingredient.id.clone(),
            name: ingredient.name.clone(),
            cost: ingredient.cost(),
            share_of_cmv_pct: ingredient.cost().percent_of(cmv),
        })
        .collect()
}

/// CMV per real of price (0.4 = 40 centavos of cost per real sold).
///
/// Returns 0 when the price is not positive.
pub fn cost_ratio(product: &Product) -> f64 {
    product.live_cmv().percent_of(product.price()) / 100.0
}

/// Price as a percentage of CMV (250 = sells for 2.5× its cost).
///
/// Returns 0 when the CMV is not positive.
pub fn markup_pct(product: &Product) -> f64 {
    product.price().percent_of(product.live_cmv())
}

// =============================================================================
// Portfolio Summary
// =============================================================================

/// Averages across a set of products (the products tab header).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub product_count: usize,
    /// Average CMV in centavos.
    pub average_cmv_cents: f64,
    /// Average price in centavos.
    pub average_price_cents: f64,
    /// Margin of the averages: (avg price − avg CMV) / avg price × 100.
    pub average_margin_pct: f64,
}

/// Summarises all products, or only those of `brand_id`.
pub fn portfolio_summary(products: &[Product], brand_id: Option<&str>) -> PortfolioSummary {
    let in_scope: Vec<&Product> = products
        .iter()
        .filter(|product| brand_id.map_or(true, |id| product.brand_id == id))
        .collect();

    if in_scope.is_empty() {
        return PortfolioSummary {
            product_count: 0,
            average_cmv_cents: 0.0,
            average_price_cents: 0.0,
            average_margin_pct: 0.0,
        };
    }

    let count = in_scope.len() as f64;
    let total_cmv: Money = in_scope.iter().map(|product| product.live_cmv()).sum();
    let total_price: Money = in_scope.iter().map(|product| product.price()).sum();

    let average_cmv_cents = total_cmv.cents_f64() / count;
    let average_price_cents = total_price.cents_f64() / count;
    // The count cancels out, so the totals give the same ratio exactly
    let average_margin_pct = (total_price - total_cmv).percent_of(total_price);

    PortfolioSummary {
        product_count: in_scope.len(),
        average_cmv_cents,
        average_price_cents,
        average_margin_pct,
    }
}

// =============================================================================
// Margins by Brand
// =============================================================================

/// One brand with the economics of each of its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BrandMargins {
    pub brand_id: String,
    pub brand_name: String,
    pub products: Vec<ProductEconomics>,
}

/// Groups product economics under every brand, in brand order.
///
/// Brands without products are kept with an empty list.
pub fn margins_by_brand(
    brands: &[Brand],
    products: &[Product],
    thresholds: &Thresholds,
) -> Vec<BrandMargins> {
    brands
        .iter()
        .map(|brand| BrandMargins {
            brand_id: brand.id.clone(),
            brand_name: brand.name.clone(),
            products: products
                .iter()
                .filter(|product| product.brand_id == brand.id)
                .map(|product| ProductEconomics::compute_with(product, thresholds))
                .collect(),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
