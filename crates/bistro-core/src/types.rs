//! # Domain Types
//!
//! Entities the engine consumes. They arrive fully materialised from the
//! storage collaborator; the engine never creates or persists them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  1   * ┌─────────────────┐  1   * ┌────────────┐ │
//! │  │     Brand       │───────►│    Product      │───────►│ Ingredient │ │
//! │  │  ─────────────  │        │  ─────────────  │  owns  │ ────────── │ │
//! │  │  type           │        │  price_cents    │        │ cost_cents │ │
//! │  │  fixed_price?   │        │  cmv_cents (Σ)  │        │ unit       │ │
//! │  │  status         │        └─────────────────┘        └────────────┘ │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐  1   * ┌─────────────────┐   ┌─────────────────┐  │
//! │  │  CostCategory   │───────►│ GlobalFixedCost │   │FinancialMetrics │  │
//! │  │  rent, utilities│        │  amount_cents   │   │ latest snapshot │  │
//! │  │  employees, ... │        │  is_active      │   │ (not derived)   │  │
//! │  └─────────────────┘        └─────────────────┘   └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## CMV Invariant
//! `Product::cmv_cents` is a cached copy of the ingredient sum kept for the
//! table store. Every mutation helper on [`Product`] refreshes it, and the
//! calculations read [`Product::live_cmv`] rather than trusting the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Brand
// =============================================================================

/// Pricing mode of a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BrandType {
    /// One uniform price for the whole menu.
    Popular,
    /// Every product priced individually.
    #[default]
    Premium,
}

/// Whether a brand is currently operating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BrandStatus {
    #[default]
    Active,
    Inactive,
}

/// A brand operated by the business (e.g. a budget line and a premium line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub brand_type: BrandType,
    /// Uniform menu price, only meaningful for `Popular` brands.
    #[serde(default)]
    pub fixed_price_cents: Option<i64>,
    #[serde(default)]
    pub status: BrandStatus,
    /// Display color (hex), used by the UI only.
    #[serde(default)]
    pub color: String,
}

impl Brand {
    /// Creates an active brand without a fixed price.
    pub fn new(id: impl Into<String>, name: impl Into<String>, brand_type: BrandType) -> Self {
        Brand {
            id: id.into(),
            name: name.into(),
            brand_type,
            fixed_price_cents: None,
            status: BrandStatus::Active,
            color: String::new(),
        }
    }

    /// Returns true when the brand is active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrandStatus::Active
    }

    /// Returns the uniform menu price, if one is set.
    #[inline]
    pub fn fixed_price(&self) -> Option<Money> {
        self.fixed_price_cents.map(Money::from_cents)
    }
}

// =============================================================================
// Ingredient
// =============================================================================

/// One line of a product's recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    /// Cost of the quantity used in one product, in centavos.
    pub cost_cents: i64,
    /// Free-text unit label ("kg", "un", "fatia", ...).
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cost: Money,
        unit: impl Into<String>,
    ) -> Self {
        Ingredient {
            id: id.into(),
            name: name.into(),
            cost_cents: cost.cents(),
            unit: unit.into(),
        }
    }

    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A menu item with its recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand_id: String,
    /// Sale price in centavos.
    pub price_cents: i64,
    /// Recipe, in display order.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Cached Σ ingredient costs (see module docs).
    #[serde(default)]
    pub cmv_cents: i64,
}

impl Product {
    /// Creates a product and computes its CMV from the recipe.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        brand_id: impl Into<String>,
        price: Money,
        ingredients: Vec<Ingredient>,
    ) -> Self {
        let mut product = Product {
            id: id.into(),
            name: name.into(),
            brand_id: brand_id.into(),
            price_cents: price.cents(),
            ingredients,
            cmv_cents: 0,
        };
        product.refresh_cmv();
        product
    }

    /// Returns the sale price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the cached CMV as stored with the product.
    #[inline]
    pub fn cached_cmv(&self) -> Money {
        Money::from_cents(self.cmv_cents)
    }

    /// Sums the recipe right now.
    pub fn live_cmv(&self) -> Money {
        self.ingredients.iter().map(Ingredient::cost).sum()
    }

    /// Unit contribution margin: price minus live CMV.
    #[inline]
    pub fn contribution_margin(&self) -> Money {
        self.price() - self.live_cmv()
    }

    /// True when the cached CMV no longer matches the recipe.
    pub fn is_cmv_stale(&self) -> bool {
        self.cached_cmv() != self.live_cmv()
    }

    /// Recomputes the cached CMV from the recipe.
    pub fn refresh_cmv(&mut self) {
        self.cmv_cents = self.live_cmv().cents();
    }

    /// Appends an ingredient and refreshes the CMV.
    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
        self.refresh_cmv();
    }

    /// Replaces the ingredient with the same id and refreshes the CMV.
    pub fn update_ingredient(&mut self, ingredient: Ingredient) -> CoreResult<()> {
        let slot = self
            .ingredients
            .iter_mut()
            .find(|existing| existing.id == ingredient.id)
            .ok_or_else(|| CoreError::IngredientNotFound {
                product_id: self.id.clone(),
                ingredient_id: ingredient.id.clone(),
            })?;
        *slot = ingredient;
        self.refresh_cmv();
        Ok(())
    }

    /// Removes an ingredient by id, refreshes the CMV and returns the
    /// removed ingredient.
    pub fn remove_ingredient(&mut self, ingredient_id: &str) -> CoreResult<Ingredient> {
        let index = self
            .ingredients
            .iter()
            .position(|existing| existing.id == ingredient_id)
            .ok_or_else(|| CoreError::IngredientNotFound {
                product_id: self.id.clone(),
                ingredient_id: ingredient_id.to_string(),
            })?;
        let removed = self.ingredients.remove(index);
        self.refresh_cmv();
        Ok(removed)
    }
}

// =============================================================================
// Cost Category
// =============================================================================

/// Reference list entry for fixed cost grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostCategory {
    /// Stable id: "rent", "utilities", "employees", "marketing", "other", ...
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

// =============================================================================
// Global Fixed Cost
// =============================================================================

/// A recurring monthly cost shared by every brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFixedCost {
    pub id: String,
    pub category_id: String,
    pub name: String,
    /// Monthly amount in centavos.
    pub amount_cents: i64,
    #[serde(default)]
    pub description: Option<String>,
    /// Only active costs enter any total.
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl GlobalFixedCost {
    /// Creates an active cost stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        category_id: impl Into<String>,
        name: impl Into<String>,
        amount: Money,
    ) -> Self {
        let now = Utc::now();
        GlobalFixedCost {
            id: id.into(),
            category_id: category_id.into(),
            name: name.into(),
            amount_cents: amount.cents(),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the monthly amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Financial Metrics
// =============================================================================

/// Point-in-time aggregate record fetched as "latest" from storage.
///
/// The engine carries it through the snapshot untouched; it is not derived
/// from the live entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    pub total_revenue_cents: i64,
    pub total_costs_cents: i64,
    pub total_profit_cents: i64,
    /// Percentage, e.g. 28.9.
    pub profit_margin: f64,
    /// Units per month.
    pub break_even_point: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
