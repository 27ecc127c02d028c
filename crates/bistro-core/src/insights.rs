//! # Recommendations
//!
//! Turns the status bands into a short, prioritised to-do list for the
//! overview "next steps" card.
//!
//! ## Rules
//! ```text
//! ┌──────────────────────────────────────────┬──────────┬──────────────────────┐
//! │ Condition                                │ Priority │ Kind                 │
//! ├──────────────────────────────────────────┼──────────┼──────────────────────┤
//! │ product sells below its CMV              │ high     │ PriceBelowCost       │
//! │ product margin band warning / critical   │ high     │ ReviewProductCosts   │
//! │ consolidated break-even critical (*)     │ high     │ LowerBreakEven       │
//! │ consolidated break-even warning (*)      │ medium   │ LowerBreakEven       │
//! │ no active fixed cost registered          │ low      │ RegisterFixedCosts   │
//! └──────────────────────────────────────────┴──────────┴──────────────────────┘
//! ```
//!
//! (*) only when the snapshot has at least one product.
//!
//! Output is sorted high → low. Within a priority, product rules come first
//! in snapshot order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::context::Dashboard;
use crate::status::StatusBand;

// =============================================================================
// Types
// =============================================================================

/// Urgency of a recommendation. Sorts `High` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    PriceBelowCost,
    ReviewProductCosts,
    LowerBreakEven,
    RegisterFixedCosts,
}

/// One suggested next step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub kind: RecommendationKind,
    /// Product the recommendation is about, if any.
    pub subject_id: Option<String>,
    pub message: String,
}

impl Recommendation {
    fn new(priority: Priority, kind: RecommendationKind, subject_id: Option<&str>, message: String) -> Self {
        Recommendation {
            priority,
            kind,
            subject_id: subject_id.map(str::to_string),
            message,
        }
    }
}

// =============================================================================
// Rules
// =============================================================================

/// Derives the recommendations for a dashboard.
pub fn recommend(dashboard: &Dashboard<'_>) -> Vec<Recommendation> {
    let snapshot = dashboard.snapshot();
    let mut recommendations = Vec::new();

    for (product, economics) in snapshot.products.iter().zip(dashboard.product_economics()) {
        if economics.profit.is_negative() {
            recommendations.push(Recommendation::new(
                Priority::High,
                RecommendationKind::PriceBelowCost,
                Some(product.id.as_str()),
                format!(
                    "{} sells for {} but costs {} to make",
                    product.name,
                    product.price(),
                    economics.cmv
                ),
            ));
        }

        if economics.status.needs_attention() {
            recommendations.push(Recommendation::new(
                Priority::High,
                RecommendationKind::ReviewProductCosts,
                Some(product.id.as_str()),
                format!(
                    "{} has a {:.1}% margin; review its ingredient costs or price",
                    product.name, economics.margin_pct
                ),
            ));
        }
    }

    // An empty menu has no margin to judge
    let breakeven = dashboard.breakeven();
    let breakeven_priority = match breakeven.status {
        _ if snapshot.products.is_empty() => None,
        StatusBand::Critical => Some(Priority::High),
        StatusBand::Warning => Some(Priority::Medium),
        StatusBand::Good | StatusBand::Excellent => None,
    };
    if let Some(priority) = breakeven_priority {
        let message = if breakeven.reachable {
            format!(
                "Break-even needs {} burgers a day; cut fixed costs or raise margins",
                breakeven.daily_units
            )
        } else {
            "No positive average margin: fixed costs can never be covered".to_string()
        };
        recommendations.push(Recommendation::new(
            priority,
            RecommendationKind::LowerBreakEven,
            None,
            message,
        ));
    }

    if !snapshot.fixed_costs.iter().any(|cost| cost.is_active) {
        recommendations.push(Recommendation::new(
            Priority::Low,
            RecommendationKind::RegisterFixedCosts,
            None,
            "Register your monthly fixed costs to get a real break-even target".to_string(),
        ));
    }

    // Stable: rule order is kept within a priority
    recommendations.sort_by_key(|recommendation| recommendation.priority);
    recommendations
}

// =============================================================================
// Unit Tests
// =============================================================================
