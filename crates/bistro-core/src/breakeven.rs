//! # Break-Even Calculator
//!
//! How many burgers must be sold for the contribution margin to cover the
//! fixed costs.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  average margin = mean(price − cmv) over the products in scope          │
//! │                                                                         │
//! │  monthly units  = ⌈ allocated fixed costs ÷ average margin ⌉            │
//! │  daily units    = ⌈ monthly units ÷ 30 ⌉                                │
//! │                                                                         │
//! │  average margin ≤ 0  →  unreachable: 0 / 0, status Critical             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Per-Brand Allocation
//! Fixed costs are shared. A brand's break-even uses only its share:
//!
//! ```text
//! EqualSplit          share = total ÷ N active brands
//! Weight(w)           share = total × w
//! RevenueShare(map)   share = total × brand revenue ÷ Σ revenue
//! ```
//!
//! With two active brands `EqualSplit` is the classic "half the fixed costs
//! per brand" rule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::status::{BandingPolicy, StatusBand, Thresholds};
use crate::types::{Brand, Product};
use crate::{finite_or_zero, DAYS_PER_MONTH};

// =============================================================================
// Allocation Policy
// =============================================================================

/// How shared fixed costs are divided between brands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BrandAllocation {
    /// Same share for every active brand.
    #[default]
    EqualSplit,
    /// The same explicit weight (0–1) for every brand.
    Weight { weight: f64 },
    /// Weight proportional to each brand's revenue.
    RevenueShare { revenue: BTreeMap<String, Money> },
}

impl BrandAllocation {
    /// Resolves the weight of `brand_id` among `brands`.
    ///
    /// `EqualSplit` counts active brands, falling back to all brands and
    /// then to 1 so the weight is never a division by zero. An inactive
    /// brand gets no share while any brand is active.
    pub fn weight_for(&self, brand_id: &str, brands: &[Brand]) -> f64 {
        match self {
            BrandAllocation::EqualSplit => equal_split_weight(brand_id, brands),
            BrandAllocation::Weight { weight } => finite_or_zero(*weight),
            BrandAllocation::RevenueShare { revenue } => {
                let total: Money = revenue.values().sum();
                if !total.is_positive() {
                    return equal_split_weight(brand_id, brands);
                }
                let brand_revenue = revenue.get(brand_id).copied().unwrap_or_default();
                brand_revenue.percent_of(total) / 100.0
            }
        }
    }
}

fn equal_split_weight(brand_id: &str, brands: &[Brand]) -> f64 {
    let active = brands.iter().filter(|brand| brand.is_active()).count();
    if active == 0 {
        return 1.0 / brands.len().max(1) as f64;
    }

    let inactive = brands
        .iter()
        .any(|brand| brand.id == brand_id && !brand.is_active());
    if inactive {
        0.0
    } else {
        1.0 / active as f64
    }
}

/// Brands that take part in the allocation: the active ones, or all of them
/// when none is active.
fn allocated_brands(brands: &[Brand]) -> impl Iterator<Item = &Brand> {
    let any_active = brands.iter().any(Brand::is_active);
    brands
        .iter()
        .filter(move |brand| !any_active || brand.is_active())
}

// =============================================================================
// Result Types
// =============================================================================

/// Which products and what share of the fixed costs a calculation covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakEvenScope<'a> {
    /// All products, all fixed costs.
    Consolidated,
    /// One brand's products, `weight` × fixed costs.
    Brand { brand_id: &'a str, weight: f64 },
}

/// Break-even target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BreakEven {
    /// Fixed costs this target has to cover (after allocation).
    pub fixed_costs: Money,
    /// Mean unit contribution margin, in centavos.
    pub average_margin_cents: f64,
    pub monthly_units: u64,
    pub daily_units: u64,
    /// False when the average margin is not positive.
    pub reachable: bool,
    pub status: StatusBand,
}

/// Break-even of one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BrandBreakEven {
    pub brand_id: String,
    pub brand_name: String,
    pub brand_color: String,
    /// Share of the total fixed costs allocated to the brand, 0–1.
    pub allocation_weight: f64,
    pub break_even: BreakEven,
}

// =============================================================================
// Calculator
// =============================================================================

/// Mean `(price − cmv)` in centavos over the products in scope.
///
/// Returns 0 for an empty scope.
pub fn average_contribution_margin(products: &[Product], brand_id: Option<&str>) -> f64 {
    let margins: Vec<Money> = products
        .iter()
        .filter(|product| brand_id.map_or(true, |id| product.brand_id == id))
        .map(Product::contribution_margin)
        .collect();

    if margins.is_empty() {
        return 0.0;
    }

    let total: Money = margins.iter().sum();
    finite_or_zero(total.cents_f64() / margins.len() as f64)
}

/// Break-even calculator with its banding and allocation policy.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakEvenCalculator {
    days_per_month: u32,
    thresholds: Thresholds,
    allocation: BrandAllocation,
}

impl Default for BreakEvenCalculator {
    fn default() -> Self {
        BreakEvenCalculator {
            days_per_month: DAYS_PER_MONTH,
            thresholds: BandingPolicy::BreakEvenDailyUnits.thresholds(),
            allocation: BrandAllocation::default(),
        }
    }
}

impl BreakEvenCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the 30-day month. Zero is treated as one day.
    pub fn with_days_per_month(mut self, days: u32) -> Self {
        self.days_per_month = days.max(1);
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_allocation(mut self, allocation: BrandAllocation) -> Self {
        self.allocation = allocation;
        self
    }

    pub fn allocation(&self) -> &BrandAllocation {
        &self.allocation
    }

    /// Computes the break-even target for a scope.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::breakeven::{BreakEvenCalculator, BreakEvenScope};
    /// use bistro_core::money::Money;
    /// use bistro_core::types::{Ingredient, Product};
    ///
    /// let products = vec![Product::new(
    ///     "p-1",
    ///     "Classic",
    ///     "b-1",
    ///     Money::from_cents(1500),
    ///     vec![Ingredient::new("i-1", "Patty", Money::from_cents(500), "un")],
    /// )];
    ///
    /// let target = BreakEvenCalculator::new().compute(
    ///     Money::from_cents(900_000),
    ///     &products,
    ///     BreakEvenScope::Consolidated,
    /// );
    /// assert_eq!(target.monthly_units, 900);
    /// assert_eq!(target.daily_units, 30);
    /// ```
    pub fn compute(
        &self,
        total_fixed_costs: Money,
        products: &[Product],
        scope: BreakEvenScope<'_>,
    ) -> BreakEven {
        let (brand_id, fixed_costs) = match scope {
            BreakEvenScope::Consolidated => (None, total_fixed_costs),
            BreakEvenScope::Brand { brand_id, weight } => {
                (Some(brand_id), total_fixed_costs.scale(weight))
            }
        };

        let average_margin = average_contribution_margin(products, brand_id);
        if average_margin <= 0.0 {
            debug!(
                brand = brand_id.unwrap_or("*"),
                average_margin, "Break-even unreachable: no positive margin"
            );
            return BreakEven {
                fixed_costs,
                average_margin_cents: average_margin,
                monthly_units: 0,
                daily_units: 0,
                reachable: false,
                status: StatusBand::Critical,
            };
        }

        let units = finite_or_zero((fixed_costs.cents_f64() / average_margin).ceil()).max(0.0);
        // `as` saturates for absurdly large targets
        let monthly_units = units as u64;
        let daily_units = monthly_units.div_ceil(u64::from(self.days_per_month));

        BreakEven {
            fixed_costs,
            average_margin_cents: average_margin,
            monthly_units,
            daily_units,
            reachable: true,
            status: self.thresholds.classify(daily_units as f64),
        }
    }

    /// Break-even of one brand, with its weight resolved from the policy.
    pub fn for_brand(
        &self,
        total_fixed_costs: Money,
        brand_id: &str,
        brands: &[Brand],
        products: &[Product],
    ) -> BreakEven {
        let weight = self.allocation.weight_for(brand_id, brands);
        self.compute(
            total_fixed_costs,
            products,
            BreakEvenScope::Brand { brand_id, weight },
        )
    }

    /// Break-even of every allocated brand that has at least one product,
    /// in brand order. Inactive brands are left out while any brand is
    /// active.
    pub fn by_brand(
        &self,
        total_fixed_costs: Money,
        brands: &[Brand],
        products: &[Product],
    ) -> Vec<BrandBreakEven> {
        allocated_brands(brands)
            .filter(|brand| products.iter().any(|product| product.brand_id == brand.id))
            .map(|brand| {
                let weight = self.allocation.weight_for(&brand.id, brands);
                BrandBreakEven {
                    brand_id: brand.id.clone(),
                    brand_name: brand.name.clone(),
                    brand_color: brand.color.clone(),
                    allocation_weight: weight,
                    break_even: self.compute(
                        total_fixed_costs,
                        products,
                        BreakEvenScope::Brand {
                            brand_id: &brand.id,
                            weight,
                        },
                    ),
                }
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BrandStatus, BrandType, Ingredient};

    fn product(id: &str, brand: &str, price: i64, cmv: i64) -> Product {
        Product::new(
            id,
            id,
            brand,
            Money::from_cents(price),
            vec![Ingredient::new(format!("{id}-i"), "mix", Money::from_cents(cmv), "un")],
        )
    }

    fn brands() -> Vec<Brand> {
        vec![
            Brand::new("b-1", "Smash Co", BrandType::Popular),
            Brand::new("b-2", "Gourmet", BrandType::Premium),
        ]
    }

    #[test]
    fn test_reference_case() {
        // Fixed R$ 9.000, average margin R$ 10 → 900 / month, 30 / day
        let products = vec![product("p-1", "b-1", 2000, 1200), product("p-2", "b-1", 2500, 1300)];
        let target = BreakEvenCalculator::new().compute(
            Money::from_cents(900_000),
            &products,
            BreakEvenScope::Consolidated,
        );
        assert_eq!(target.average_margin_cents, 1000.0);
        assert_eq!(target.monthly_units, 900);
        assert_eq!(target.daily_units, 30);
        assert!(target.reachable);
        assert_eq!(target.status, StatusBand::Good);
    }

    #[test]
    fn test_rounds_up() {
        let products = vec![product("p-1", "b-1", 1300, 1000)];
        let target = BreakEvenCalculator::new().compute(
            Money::from_cents(100_000),
            &products,
            BreakEvenScope::Consolidated,
        );
        // 100000 / 300 = 333.33 → 334 / month → 12 / day
        assert_eq!(target.monthly_units, 334);
        assert_eq!(target.daily_units, 12);
        assert_eq!(target.status, StatusBand::Excellent);
    }

    #[test]
    fn test_empty_products_unreachable() {
        let target = BreakEvenCalculator::new().compute(
            Money::from_cents(900_000),
            &[],
            BreakEvenScope::Consolidated,
        );
        assert_eq!(target.monthly_units, 0);
        assert_eq!(target.daily_units, 0);
        assert!(!target.reachable);
        assert_eq!(target.status, StatusBand::Critical);
    }

    #[test]
    fn test_non_positive_margin_unreachable() {
        let products = vec![product("p-1", "b-1", 1000, 1000), product("p-2", "b-1", 1000, 1500)];
        let target = BreakEvenCalculator::new().compute(
            Money::from_cents(900_000),
            &products,
            BreakEvenScope::Consolidated,
        );
        assert!(!target.reachable);
        assert_eq!(target.monthly_units, 0);
        assert_eq!(target.average_margin_cents, -250.0);
    }

    #[test]
    fn test_zero_fixed_costs_is_zero_units() {
        let products = vec![product("p-1", "b-1", 2000, 1000)];
        let target =
            BreakEvenCalculator::new().compute(Money::zero(), &products, BreakEvenScope::Consolidated);
        assert!(target.reachable);
        assert_eq!(target.monthly_units, 0);
        assert_eq!(target.status, StatusBand::Excellent);
    }

    #[test]
    fn test_equal_split_between_two_brands_halves_costs() {
        let products = vec![product("p-1", "b-1", 2000, 1000), product("p-2", "b-2", 3000, 1000)];
        let calculator = BreakEvenCalculator::new();

        let rows = calculator.by_brand(Money::from_cents(1_200_000), &brands(), &products);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].allocation_weight, 0.5);
        assert_eq!(rows[0].break_even.fixed_costs.cents(), 600_000);
        // 600000 / 1000 = 600 / month, 20 / day
        assert_eq!(rows[0].break_even.monthly_units, 600);
        assert_eq!(rows[0].break_even.daily_units, 20);

        // 600000 / 2000 = 300 / month, 10 / day
        assert_eq!(rows[1].break_even.monthly_units, 300);
        assert_eq!(rows[1].break_even.daily_units, 10);
    }

    #[test]
    fn test_equal_split_counts_active_brands_only() {
        let mut fleet = brands();
        fleet.push(Brand::new("b-3", "Food Truck", BrandType::Popular));
        fleet[1].status = BrandStatus::Inactive;

        assert_eq!(BrandAllocation::EqualSplit.weight_for("b-1", &fleet), 0.5);

        let single = vec![Brand::new("b-1", "Solo", BrandType::Premium)];
        assert_eq!(BrandAllocation::EqualSplit.weight_for("b-1", &single), 1.0);
        assert_eq!(BrandAllocation::EqualSplit.weight_for("b-1", &[]), 1.0);
    }

    #[test]
    fn test_inactive_brand_gets_no_share() {
        let mut fleet = brands();
        fleet.push(Brand::new("b-3", "Food Truck", BrandType::Popular));
        fleet[2].status = BrandStatus::Inactive;
        let products = vec![
            product("p-1", "b-1", 2000, 1000),
            product("p-2", "b-2", 3000, 1000),
            product("p-3", "b-3", 1500, 500),
        ];

        assert_eq!(BrandAllocation::EqualSplit.weight_for("b-3", &fleet), 0.0);

        let rows = BreakEvenCalculator::new().by_brand(Money::from_cents(900_000), &fleet, &products);
        let ids: Vec<&str> = rows.iter().map(|row| row.brand_id.as_str()).collect();
        assert_eq!(ids, vec!["b-1", "b-2"]);

        let weight_sum: f64 = rows.iter().map(|row| row.allocation_weight).sum();
        let allocated: Money = rows.iter().map(|row| row.break_even.fixed_costs).sum();
        assert_eq!(weight_sum, 1.0);
        assert_eq!(allocated.cents(), 900_000);
    }

    #[test]
    fn test_all_inactive_brands_share_equally() {
        let mut fleet = brands();
        for brand in &mut fleet {
            brand.status = BrandStatus::Inactive;
        }
        let products = vec![product("p-1", "b-1", 2000, 1000), product("p-2", "b-2", 3000, 1000)];

        let rows = BreakEvenCalculator::new().by_brand(Money::from_cents(600_000), &fleet, &products);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].allocation_weight, 0.5);
    }

    #[test]
    fn test_revenue_share_allocation() {
        let mut revenue = BTreeMap::new();
        revenue.insert("b-1".to_string(), Money::from_cents(300_000));
        revenue.insert("b-2".to_string(), Money::from_cents(100_000));
        let policy = BrandAllocation::RevenueShare { revenue };

        assert_eq!(policy.weight_for("b-1", &brands()), 0.75);
        assert_eq!(policy.weight_for("b-2", &brands()), 0.25);
        assert_eq!(policy.weight_for("b-9", &brands()), 0.0);

        let empty = BrandAllocation::RevenueShare {
            revenue: BTreeMap::new(),
        };
        assert_eq!(empty.weight_for("b-1", &brands()), 0.5);
    }

    #[test]
    fn test_explicit_weight() {
        let products = vec![product("p-1", "b-1", 2000, 1000)];
        let calculator =
            BreakEvenCalculator::new().with_allocation(BrandAllocation::Weight { weight: 0.25 });
        let target = calculator.for_brand(Money::from_cents(400_000), "b-1", &brands(), &products);
        assert_eq!(target.fixed_costs.cents(), 100_000);
        assert_eq!(target.monthly_units, 100);
    }

    #[test]
    fn test_brands_without_products_are_skipped() {
        let products = vec![product("p-1", "b-1", 2000, 1000)];
        let rows = BreakEvenCalculator::new().by_brand(Money::from_cents(100_000), &brands(), &products);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].brand_id, "b-1");
    }

    #[test]
    fn test_custom_month_length() {
        let products = vec![product("p-1", "b-1", 2000, 1000)];
        let target = BreakEvenCalculator::new().with_days_per_month(26).compute(
            Money::from_cents(520_000),
            &products,
            BreakEvenScope::Consolidated,
        );
        assert_eq!(target.monthly_units, 520);
        assert_eq!(target.daily_units, 20);
    }

    #[test]
    fn test_idempotent() {
        let products = vec![product("p-1", "b-1", 1990, 733), product("p-2", "b-2", 2790, 1021)];
        let calculator = BreakEvenCalculator::new();
        let first = calculator.by_brand(Money::from_cents(1_234_567), &brands(), &products);
        let second = calculator.by_brand(Money::from_cents(1_234_567), &brands(), &products);
        assert_eq!(first, second);
    }
}
