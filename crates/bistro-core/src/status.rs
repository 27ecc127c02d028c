//! # Status Classification
//!
//! Maps a continuous value onto one of four ordered bands. Every status badge
//! on the dashboard (product margin, break-even target, scenario result) goes
//! through here.
//!
//! ## Direction Matters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HigherIsBetter (margins)          LowerIsBetter (units to sell)        │
//! │                                                                         │
//! │  value ≥ t1 → Excellent            value ≤ t1 → Excellent               │
//! │  value ≥ t2 → Good                 value ≤ t2 → Good                    │
//! │  value ≥ t3 → Warning              value ≤ t3 → Warning                 │
//! │  otherwise  → Critical             otherwise  → Critical                │
//! │                                                                         │
//! │  t1 > t2 > t3                      t1 < t2 < t3                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::status::{BandingPolicy, StatusBand};
//!
//! assert_eq!(BandingPolicy::BreakEvenDailyUnits.classify(18.0), StatusBand::Excellent);
//! assert_eq!(BandingPolicy::ScenarioProfitMargin.classify(18.0), StatusBand::Good);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Status Band
// =============================================================================

/// Qualitative band, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StatusBand {
    Critical,
    Warning,
    Good,
    Excellent,
}

impl StatusBand {
    /// True for `Warning` and `Critical`.
    #[inline]
    pub fn needs_attention(&self) -> bool {
        *self <= StatusBand::Warning
    }
}

impl std::fmt::Display for StatusBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusBand::Critical => write!(f, "critical"),
            StatusBand::Warning => write!(f, "warning"),
            StatusBand::Good => write!(f, "good"),
            StatusBand::Excellent => write!(f, "excellent"),
        }
    }
}

// =============================================================================
// Thresholds
// =============================================================================

/// Which way along the axis is an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// Three band boundaries plus their direction.
///
/// `bounds[0]` is the Excellent boundary, `bounds[2]` the Warning boundary.
/// Boundaries are inclusive in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub bounds: [f64; 3],
    pub direction: BandDirection,
}

impl Thresholds {
    pub const fn higher_is_better(bounds: [f64; 3]) -> Self {
        Thresholds {
            bounds,
            direction: BandDirection::HigherIsBetter,
        }
    }

    pub const fn lower_is_better(bounds: [f64; 3]) -> Self {
        Thresholds {
            bounds,
            direction: BandDirection::LowerIsBetter,
        }
    }

    /// Classifies `value`. `NaN` is always `Critical`.
    pub fn classify(&self, value: f64) -> StatusBand {
        classify(value, self.bounds, self.direction)
    }

    /// Checks that the boundaries are finite and strictly ordered for the
    /// direction.
    pub fn validate(&self, policy: &str) -> CoreResult<()> {
        let [t1, t2, t3] = self.bounds;
        if !(t1.is_finite() && t2.is_finite() && t3.is_finite()) {
            return Err(CoreError::InvalidThresholds {
                policy: policy.to_string(),
                reason: "bounds must be finite numbers".to_string(),
            });
        }

        let ordered = match self.direction {
            BandDirection::HigherIsBetter => t1 > t2 && t2 > t3,
            BandDirection::LowerIsBetter => t1 < t2 && t2 < t3,
        };
        if !ordered {
            let expected = match self.direction {
                BandDirection::HigherIsBetter => "descending",
                BandDirection::LowerIsBetter => "ascending",
            };
            return Err(CoreError::InvalidThresholds {
                policy: policy.to_string(),
                reason: format!("bounds {:?} must be strictly {}", self.bounds, expected),
            });
        }

        Ok(())
    }
}

/// Classifies `value` against `[t1, t2, t3]` in the given direction.
pub fn classify(value: f64, bounds: [f64; 3], direction: BandDirection) -> StatusBand {
    if value.is_nan() {
        return StatusBand::Critical;
    }

    let [t1, t2, t3] = bounds;
    match direction {
        BandDirection::HigherIsBetter => {
            if value >= t1 {
                StatusBand::Excellent
            } else if value >= t2 {
                StatusBand::Good
            } else if value >= t3 {
                StatusBand::Warning
            } else {
                StatusBand::Critical
            }
        }
        BandDirection::LowerIsBetter => {
            if value <= t1 {
                StatusBand::Excellent
            } else if value <= t2 {
                StatusBand::Good
            } else if value <= t3 {
                StatusBand::Warning
            } else {
                StatusBand::Critical
            }
        }
    }
}

// =============================================================================
// Banding Policies
// =============================================================================

/// The banding policies the dashboard uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandingPolicy {
    /// Burgers per day needed to break even: ≤20 / ≤40 / ≤60.
    BreakEvenDailyUnits,
    /// Scenario profit margin %: ≥25 / ≥15 / ≥5.
    ScenarioProfitMargin,
    /// Single product margin %: ≥60 / ≥40 / ≥20.
    ProductMargin,
}

impl BandingPolicy {
    /// Default thresholds for this policy.
    pub const fn thresholds(self) -> Thresholds {
        match self {
            BandingPolicy::BreakEvenDailyUnits => Thresholds::lower_is_better([20.0, 40.0, 60.0]),
            BandingPolicy::ScenarioProfitMargin => Thresholds::higher_is_better([25.0, 15.0, 5.0]),
            BandingPolicy::ProductMargin => Thresholds::higher_is_better([60.0, 40.0, 20.0]),
        }
    }

    pub fn classify(self, value: f64) -> StatusBand {
        self.thresholds().classify(value)
    }

    /// Name used in config files and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            BandingPolicy::BreakEvenDailyUnits => "break_even_daily_units",
            BandingPolicy::ScenarioProfitMargin => "scenario_profit_margin",
            BandingPolicy::ProductMargin => "product_margin",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_ordering() {
        assert!(StatusBand::Critical < StatusBand::Warning);
        assert!(StatusBand::Warning < StatusBand::Good);
        assert!(StatusBand::Good < StatusBand::Excellent);
        assert!(StatusBand::Warning.needs_attention());
        assert!(!StatusBand::Good.needs_attention());
    }

    #[test]
    fn test_break_even_bands_are_inclusive() {
        let policy = BandingPolicy::BreakEvenDailyUnits;
        assert_eq!(policy.classify(0.0), StatusBand::Excellent);
        assert_eq!(policy.classify(20.0), StatusBand::Excellent);
        assert_eq!(policy.classify(21.0), StatusBand::Good);
        assert_eq!(policy.classify(40.0), StatusBand::Good);
        assert_eq!(policy.classify(60.0), StatusBand::Warning);
        assert_eq!(policy.classify(61.0), StatusBand::Critical);
    }

    #[test]
    fn test_profit_margin_bands() {
        let policy = BandingPolicy::ScenarioProfitMargin;
        assert_eq!(policy.classify(60.0), StatusBand::Excellent);
        assert_eq!(policy.classify(25.0), StatusBand::Excellent);
        assert_eq!(policy.classify(24.9), StatusBand::Good);
        assert_eq!(policy.classify(15.0), StatusBand::Good);
        assert_eq!(policy.classify(5.0), StatusBand::Warning);
        assert_eq!(policy.classify(4.9), StatusBand::Critical);
        assert_eq!(policy.classify(-30.0), StatusBand::Critical);
    }

    #[test]
    fn test_product_margin_bands() {
        let policy = BandingPolicy::ProductMargin;
        assert_eq!(policy.classify(65.0), StatusBand::Excellent);
        assert_eq!(policy.classify(45.0), StatusBand::Good);
        assert_eq!(policy.classify(20.0), StatusBand::Warning);
        assert_eq!(policy.classify(19.0), StatusBand::Critical);
    }

    #[test]
    fn test_nan_is_critical_both_ways() {
        assert_eq!(
            classify(f64::NAN, [1.0, 2.0, 3.0], BandDirection::LowerIsBetter),
            StatusBand::Critical
        );
        assert_eq!(
            classify(f64::NAN, [3.0, 2.0, 1.0], BandDirection::HigherIsBetter),
            StatusBand::Critical
        );
    }

    #[test]
    fn test_threshold_validation() {
        for policy in [
            BandingPolicy::BreakEvenDailyUnits,
            BandingPolicy::ScenarioProfitMargin,
            BandingPolicy::ProductMargin,
        ] {
            assert!(policy.thresholds().validate(policy.name()).is_ok());
        }

        // Ascending bounds with HigherIsBetter would never yield Good
        let inverted = Thresholds::higher_is_better([5.0, 15.0, 25.0]);
        assert!(matches!(
            inverted.validate("scenario_profit_margin"),
            Err(CoreError::InvalidThresholds { .. })
        ));

        let infinite = Thresholds::lower_is_better([1.0, 2.0, f64::INFINITY]);
        assert!(infinite.validate("x").is_err());
    }
}
