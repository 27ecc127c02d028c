//! # Fixed Cost Aggregation
//!
//! Totals of the monthly fixed costs shared by every brand.
//!
//! ## Aggregation Flow
//! ```text
//! GlobalFixedCost[] ──► keep is_active ──► Σ amount ──────────────► total
//!                                      │
//!                                      └─► group by category_id
//!                                            ├─ Σ per group, count
//!                                            ├─ % of total (0 if total = 0)
//!                                            └─ sort by total, descending
//! ```
//!
//! Inactive costs are paused, not deleted: they stay in the list for the
//! operator to re-enable but never enter a number.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CostCategory, GlobalFixedCost};

// =============================================================================
// Totals
// =============================================================================

/// Σ of the active costs.
pub fn total_active(costs: &[GlobalFixedCost]) -> Money {
    costs
        .iter()
        .filter(|cost| cost.is_active)
        .map(GlobalFixedCost::amount)
        .sum()
}

// =============================================================================
// Breakdown by Category
// =============================================================================

/// One category's slice of the fixed costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_id: String,
    pub total: Money,
    /// Share of the overall total, 0–100.
    pub percentage: f64,
    /// Number of active costs in the category.
    pub count: usize,
}

/// Active fixed costs, overall and per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub total: Money,
    /// Largest category first.
    pub by_category: Vec<CategoryTotal>,
}

/// Aggregates the active costs.
///
/// ## Example
/// ```rust
/// use bistro_core::costs::aggregate;
/// use bistro_core::money::Money;
/// use bistro_core::types::GlobalFixedCost;
///
/// let mut paused = GlobalFixedCost::new("c-3", "marketing", "Flyers", Money::from_cents(50_000));
/// paused.is_active = false;
///
/// let costs = vec![
///     GlobalFixedCost::new("c-1", "rent", "Aluguel", Money::from_cents(300_000)),
///     GlobalFixedCost::new("c-2", "utilities", "Energia", Money::from_cents(100_000)),
///     paused,
/// ];
///
/// let breakdown = aggregate(&costs);
/// assert_eq!(breakdown.total.cents(), 400_000);
/// assert_eq!(breakdown.by_category[0].category_id, "rent");
/// assert_eq!(breakdown.by_category[0].percentage, 75.0);
/// ```
pub fn aggregate(costs: &[GlobalFixedCost]) -> CostBreakdown {
    let mut groups: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
    for cost in costs.iter().filter(|cost| cost.is_active) {
        let entry = groups
            .entry(cost.category_id.as_str())
            .or_insert((Money::zero(), 0));
        entry.0 += cost.amount();
        entry.1 += 1;
    }

    let total: Money = groups.values().map(|(amount, _)| *amount).sum();

    let mut by_category: Vec<CategoryTotal> = groups
        .into_iter()
        .filter(|(_, (amount, _))| !amount.is_zero())
        .map(|(category_id, (amount, count))| CategoryTotal {
            category_id: category_id.to_string(),
            total: amount,
            percentage: amount.percent_of(total),
            count,
        })
        .collect();

    // Stable sort: ties keep the BTreeMap (category id) order
    by_category.sort_by(|a, b| b.total.cmp(&a.total));

    debug!(
        active = costs.iter().filter(|cost| cost.is_active).count(),
        categories = by_category.len(),
        total = %total,
        "Aggregated fixed costs"
    );

    CostBreakdown { total, by_category }
}

// =============================================================================
// Category Summary
// =============================================================================

/// A category with its metadata and its slice of the costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: CostCategory,
    pub total: Money,
    pub percentage: f64,
    pub count: usize,
}

/// Joins the breakdown with the category reference list.
///
/// Only known categories with a positive total are returned, largest first.
/// Costs filed under an unknown category still count towards the
/// percentage denominator.
pub fn summarize_by_category(
    costs: &[GlobalFixedCost],
    categories: &[CostCategory],
) -> Vec<CategorySummary> {
    let breakdown = aggregate(costs);
    breakdown
        .by_category
        .into_iter()
        .filter(|slice| slice.total.is_positive())
        .filter_map(|slice| {
            categories
                .iter()
                .find(|category| category.id == slice.category_id)
                .map(|category| CategorySummary {
                    category: category.clone(),
                    total: slice.total,
                    percentage: slice.percentage,
                    count: slice.count,
                })
        })
        .collect()
}

// =============================================================================
// Legacy Buckets
// =============================================================================

/// Five-field cost summary used by the overview card.
///
/// `rent`, `utilities`, `employees` and `marketing` map to their own field;
/// every other category id lands in `other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FixedCostBuckets {
    pub rent: Money,
    pub utilities: Money,
    pub employees: Money,
    pub marketing: Money,
    pub other: Money,
}

impl FixedCostBuckets {
    pub fn from_costs(costs: &[GlobalFixedCost]) -> Self {
        let mut buckets = FixedCostBuckets::default();
        for cost in costs.iter().filter(|cost| cost.is_active) {
            let slot = match cost.category_id.as_str() {
                "rent" => &mut buckets.rent,
                "utilities" => &mut buckets.utilities,
                "employees" => &mut buckets.employees,
                "marketing" => &mut buckets.marketing,
                _ => &mut buckets.other,
            };
            *slot += cost.amount();
        }
        buckets
    }

    pub fn total(&self) -> Money {
        self.rent + self.utilities + self.employees + self.marketing + self.other
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(id: &str, category: &str, cents: i64, active: bool) -> GlobalFixedCost {
        let mut cost = GlobalFixedCost::new(id, category, id, Money::from_cents(cents));
        cost.is_active = active;
        cost
    }

    fn category(id: &str, name: &str) -> CostCategory {
        CostCategory {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            icon: String::new(),
        }
    }

    #[test]
    fn test_total_skips_inactive() {
        let costs = vec![
            cost("c-1", "rent", 350_000, true),
            cost("c-2", "rent", 99_999, false),
            cost("c-3", "employees", 600_000, true),
        ];
        assert_eq!(total_active(&costs).cents(), 950_000);
    }

    #[test]
    fn test_breakdown_groups_and_sorts() {
        let costs = vec![
            cost("c-1", "utilities", 80_000, true),
            cost("c-2", "employees", 300_000, true),
            cost("c-3", "employees", 300_000, true),
            cost("c-4", "rent", 350_000, true),
            cost("c-5", "marketing", 120_000, false),
        ];

        let breakdown = aggregate(&costs);
        assert_eq!(breakdown.total.cents(), 1_030_000);

        let ids: Vec<&str> = breakdown
            .by_category
            .iter()
            .map(|slice| slice.category_id.as_str())
            .collect();
        assert_eq!(ids, vec!["employees", "rent", "utilities"]);
        assert_eq!(breakdown.by_category[0].count, 2);

        let sum: f64 = breakdown.by_category.iter().map(|slice| slice.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_totals_order_by_category_id() {
        let costs = vec![
            cost("c-1", "utilities", 1_000, true),
            cost("c-2", "marketing", 1_000, true),
        ];
        let breakdown = aggregate(&costs);
        assert_eq!(breakdown.by_category[0].category_id, "marketing");
        assert_eq!(breakdown.by_category[1].category_id, "utilities");
    }

    #[test]
    fn test_empty_or_inactive_gives_no_groups() {
        assert!(aggregate(&[]).by_category.is_empty());

        let paused = vec![cost("c-1", "rent", 350_000, false)];
        let breakdown = aggregate(&paused);
        assert!(breakdown.total.is_zero());
        assert!(breakdown.by_category.is_empty());
    }

    #[test]
    fn test_zero_amount_groups_are_omitted() {
        let costs = vec![
            cost("c-1", "rent", 100_000, true),
            cost("c-2", "other", 0, true),
        ];
        let breakdown = aggregate(&costs);
        assert_eq!(breakdown.by_category.len(), 1);
        assert_eq!(breakdown.by_category[0].percentage, 100.0);
    }

    #[test]
    fn test_category_summary_joins_known_categories() {
        let costs = vec![
            cost("c-1", "rent", 300_000, true),
            cost("c-2", "insurance", 100_000, true),
        ];
        let categories = vec![category("rent", "Aluguel"), category("utilities", "Contas")];

        let summary = summarize_by_category(&costs, &categories);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].category.name, "Aluguel");
        // The unknown category still counts in the denominator
        assert_eq!(summary[0].percentage, 75.0);
    }

    #[test]
    fn test_legacy_buckets() {
        let costs = vec![
            cost("c-1", "rent", 350_000, true),
            cost("c-2", "utilities", 80_000, true),
            cost("c-3", "employees", 600_000, true),
            cost("c-4", "marketing", 120_000, true),
            cost("c-5", "insurance", 30_000, true),
            cost("c-6", "maintenance", 20_000, true),
            cost("c-7", "rent", 1, false),
        ];

        let buckets = FixedCostBuckets::from_costs(&costs);
        assert_eq!(buckets.rent.cents(), 350_000);
        assert_eq!(buckets.other.cents(), 50_000);
        assert_eq!(buckets.total(), total_active(&costs));
    }
}
