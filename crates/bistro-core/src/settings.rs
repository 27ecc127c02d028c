//! # Engine Settings
//!
//! Tunable parameters of the calculations: month length, banding thresholds
//! and the brand allocation policy. Defaults reproduce the dashboard's
//! built-in numbers exactly.
//!
//! ## File Format
//! ```toml
//! [engine]
//! days_per_month = 30
//!
//! [engine.breakeven_thresholds]
//! bounds = [20.0, 40.0, 60.0]
//! direction = "lower_is_better"
//!
//! [engine.allocation]
//! mode = "weight"
//! weight = 0.5
//! ```
//!
//! Every field is optional; a missing field keeps its default.

use serde::{Deserialize, Serialize};

use crate::breakeven::{BrandAllocation, BreakEvenCalculator};
use crate::error::CoreResult;
use crate::scenario::ScenarioProjector;
use crate::status::{BandingPolicy, Thresholds};
use crate::validation::{validate_allocation_weight, validate_amount_cents, validate_days_per_month};
use crate::DAYS_PER_MONTH;

/// Parameters shared by every calculation in a dashboard request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Days per month used for daily ⇄ monthly conversion.
    #[serde(default = "default_days_per_month")]
    pub days_per_month: u32,

    /// Bands for daily break-even units (lower is better).
    #[serde(default = "default_breakeven_thresholds")]
    pub breakeven_thresholds: Thresholds,

    /// Bands for scenario profit margin % (higher is better).
    #[serde(default = "default_scenario_thresholds")]
    pub scenario_thresholds: Thresholds,

    /// Bands for single product margin % (higher is better).
    #[serde(default = "default_product_margin_thresholds")]
    pub product_margin_thresholds: Thresholds,

    /// How fixed costs are divided between brands.
    #[serde(default)]
    pub allocation: BrandAllocation,
}

fn default_days_per_month() -> u32 {
    DAYS_PER_MONTH
}

fn default_breakeven_thresholds() -> Thresholds {
    BandingPolicy::BreakEvenDailyUnits.thresholds()
}

fn default_scenario_thresholds() -> Thresholds {
    BandingPolicy::ScenarioProfitMargin.thresholds()
}

fn default_product_margin_thresholds() -> Thresholds {
    BandingPolicy::ProductMargin.thresholds()
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            days_per_month: default_days_per_month(),
            breakeven_thresholds: default_breakeven_thresholds(),
            scenario_thresholds: default_scenario_thresholds(),
            product_margin_thresholds: default_product_margin_thresholds(),
            allocation: BrandAllocation::default(),
        }
    }
}

impl EngineSettings {
    /// Rejects settings the calculators cannot use meaningfully.
    pub fn validate(&self) -> CoreResult<()> {
        validate_days_per_month(self.days_per_month)?;

        self.breakeven_thresholds
            .validate(BandingPolicy::BreakEvenDailyUnits.name())?;
        self.scenario_thresholds
            .validate(BandingPolicy::ScenarioProfitMargin.name())?;
        self.product_margin_thresholds
            .validate(BandingPolicy::ProductMargin.name())?;

        match &self.allocation {
            BrandAllocation::EqualSplit => {}
            BrandAllocation::Weight { weight } => validate_allocation_weight(*weight)?,
            BrandAllocation::RevenueShare { revenue } => {
                for (brand_id, amount) in revenue {
                    validate_amount_cents(&format!("allocation.revenue.{brand_id}"), amount.cents())?;
                }
            }
        }

        Ok(())
    }

    pub fn breakeven_calculator(&self) -> BreakEvenCalculator {
        BreakEvenCalculator::new()
            .with_days_per_month(self.days_per_month)
            .with_thresholds(self.breakeven_thresholds)
            .with_allocation(self.allocation.clone())
    }

    pub fn scenario_projector(&self) -> ScenarioProjector {
        ScenarioProjector::new()
            .with_days_per_month(self.days_per_month)
            .with_thresholds(self.scenario_thresholds)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::money::Money;
    use std::collections::BTreeMap;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EngineSettings::default();
        assert_eq!(settings.days_per_month, 30);
        assert_eq!(settings.allocation, BrandAllocation::EqualSplit);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.breakeven_calculator(), BreakEvenCalculator::new());
        assert_eq!(settings.scenario_projector(), ScenarioProjector::new());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{"days_per_month": 26, "allocation": {"mode": "weight", "weight": 0.4}}"#)
                .unwrap();
        assert_eq!(settings.days_per_month, 26);
        assert_eq!(settings.allocation, BrandAllocation::Weight { weight: 0.4 });
        assert_eq!(
            settings.scenario_thresholds,
            BandingPolicy::ScenarioProfitMargin.thresholds()
        );
    }

    #[test]
    fn test_zero_days_rejected() {
        let settings = EngineSettings {
            days_per_month: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let settings = EngineSettings {
            breakeven_thresholds: Thresholds::lower_is_better([60.0, 40.0, 20.0]),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CoreError::InvalidThresholds { policy, .. }) if policy == "break_even_daily_units"
        ));
    }

    #[test]
    fn test_allocation_validation() {
        let weight = EngineSettings {
            allocation: BrandAllocation::Weight { weight: 1.5 },
            ..Default::default()
        };
        assert!(weight.validate().is_err());

        let mut revenue = BTreeMap::new();
        revenue.insert("b-1".to_string(), Money::from_cents(-1));
        let negative = EngineSettings {
            allocation: BrandAllocation::RevenueShare { revenue },
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }
}
