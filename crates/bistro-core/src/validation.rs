//! # Validation Module
//!
//! Range checks for simulator inputs, engine settings and snapshot records.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Simulator sliders                                                      │
//! │  └── ScenarioParams::new → validate_daily_sales                        │
//! │                          → validate_price_multiplier                   │
//! │                                                                         │
//! │  Engine settings (config file / env)                                   │
//! │  └── EngineSettings::validate → validate_days_per_month                │
//! │                               → validate_allocation_weight             │
//! │                                                                         │
//! │  Snapshot load                                                          │
//! │  └── FinancialSnapshot::validate → validate_entity_id                  │
//! │                                  → validate_amount_cents               │
//! │                                                                         │
//! │  The calculations never validate: bad numbers produce 0, not errors.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::validation::{validate_daily_sales, validate_price_multiplier};
//!
//! assert!(validate_daily_sales(50).is_ok());
//! assert!(validate_price_multiplier(1.6).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_DAILY_SALES, MAX_PRICE_MULTIPLIER, MIN_DAILY_SALES, MIN_PRICE_MULTIPLIER};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn finite(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        })
    }
}

// =============================================================================
// Simulator Validators
// =============================================================================

/// Validates burgers sold per day.
///
/// ## Rules
/// - Between MIN_DAILY_SALES (10) and MAX_DAILY_SALES (200), inclusive
pub fn validate_daily_sales(daily_sales: u32) -> ValidationResult<()> {
    if !(MIN_DAILY_SALES..=MAX_DAILY_SALES).contains(&daily_sales) {
        return Err(ValidationError::OutOfRange {
            field: "daily_sales".to_string(),
            min: f64::from(MIN_DAILY_SALES),
            max: f64::from(MAX_DAILY_SALES),
        });
    }

    Ok(())
}

/// Validates a price multiplier.
///
/// ## Rules
/// - Must be finite
/// - Between 0.7 (30% discount) and 1.5 (50% increase), inclusive
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_price_multiplier;
///
/// assert!(validate_price_multiplier(0.9).is_ok());
/// assert!(validate_price_multiplier(f64::INFINITY).is_err());
/// assert!(validate_price_multiplier(0.5).is_err());
/// ```
pub fn validate_price_multiplier(multiplier: f64) -> ValidationResult<()> {
    finite("price_multiplier", multiplier)?;

    if !(MIN_PRICE_MULTIPLIER..=MAX_PRICE_MULTIPLIER).contains(&multiplier) {
        return Err(ValidationError::OutOfRange {
            field: "price_multiplier".to_string(),
            min: MIN_PRICE_MULTIPLIER,
            max: MAX_PRICE_MULTIPLIER,
        });
    }

    Ok(())
}

// =============================================================================
// Settings Validators
// =============================================================================

/// Validates the number of operating days in a month.
///
/// ## Rules
/// - Must be positive
/// - At most 31
pub fn validate_days_per_month(days: u32) -> ValidationResult<()> {
    if days == 0 {
        return Err(ValidationError::MustBePositive {
            field: "days_per_month".to_string(),
        });
    }

    if days > 31 {
        return Err(ValidationError::OutOfRange {
            field: "days_per_month".to_string(),
            min: 1.0,
            max: 31.0,
        });
    }

    Ok(())
}

/// Validates a fixed brand allocation weight.
///
/// ## Rules
/// - Must be finite
/// - Between 0 and 1, inclusive
pub fn validate_allocation_weight(weight: f64) -> ValidationResult<()> {
    finite("allocation_weight", weight)?;

    if !(0.0..=1.0).contains(&weight) {
        return Err(ValidationError::OutOfRange {
            field: "allocation_weight".to_string(),
            min: 0.0,
            max: 1.0,
        });
    }

    Ok(())
}

/// Validates an allocation mode name from config or env.
///
/// ## Returns
/// The normalised (trimmed, lowercase) name.
pub fn validate_allocation_mode(mode: &str) -> ValidationResult<String> {
    const ALLOWED: [&str; 3] = ["equal_split", "weight", "revenue_share"];

    let mode = mode.trim().to_lowercase();
    if !ALLOWED.contains(&mode.as_str()) {
        return Err(ValidationError::NotAllowed {
            field: "allocation".to_string(),
            allowed: ALLOWED.iter().map(|name| name.to_string()).collect(),
        });
    }

    Ok(mode)
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates an entity id.
///
/// ## Rules
/// - Must not be blank
pub fn validate_entity_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stored amount in centavos.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (giveaways, free garnish)
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_amount_cents;
///
/// assert!(validate_amount_cents("price", 2590).is_ok());
/// assert!(validate_amount_cents("price", 0).is_ok());
/// assert!(validate_amount_cents("price", -100).is_err());
/// ```
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: i64::MAX as f64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_daily_sales() {
        assert!(validate_daily_sales(10).is_ok());
        assert!(validate_daily_sales(50).is_ok());
        assert!(validate_daily_sales(200).is_ok());

        assert!(validate_daily_sales(0).is_err());
        assert!(validate_daily_sales(9).is_err());
        assert!(validate_daily_sales(201).is_err());
    }

    #[test]
    fn test_validate_price_multiplier() {
        assert!(validate_price_multiplier(0.7).is_ok());
        assert!(validate_price_multiplier(1.0).is_ok());
        assert!(validate_price_multiplier(1.5).is_ok());

        assert!(validate_price_multiplier(0.69).is_err());
        assert!(validate_price_multiplier(1.51).is_err());
        assert!(matches!(
            validate_price_multiplier(f64::NAN),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_days_per_month() {
        assert!(validate_days_per_month(30).is_ok());
        assert!(validate_days_per_month(26).is_ok());
        assert!(matches!(
            validate_days_per_month(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_days_per_month(32).is_err());
    }

    #[test]
    fn test_validate_allocation_weight() {
        assert!(validate_allocation_weight(0.0).is_ok());
        assert!(validate_allocation_weight(0.5).is_ok());
        assert!(validate_allocation_weight(1.0).is_ok());
        assert!(validate_allocation_weight(-0.1).is_err());
        assert!(validate_allocation_weight(1.1).is_err());
        assert!(validate_allocation_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_allocation_mode() {
        assert_eq!(validate_allocation_mode(" Equal_Split ").unwrap(), "equal_split");
        assert_eq!(validate_allocation_mode("revenue_share").unwrap(), "revenue_share");
        assert!(matches!(
            validate_allocation_mode("half"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_validate_records() {
        assert!(validate_entity_id("product.id", "p-1").is_ok());
        assert!(validate_entity_id("product.id", "  ").is_err());
        assert!(validate_amount_cents("price", 0).is_ok());
        assert!(validate_amount_cents("price", -1).is_err());
    }
}
