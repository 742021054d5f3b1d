//! Field validation rules for observation records
//!
//! Validation happens before any store mutation; these helpers return
//! user-correctable messages surfaced as 400 responses by the API layer.

use rust_decimal::Decimal;

/// Validate that a region label is non-empty after trimming
pub fn validate_region(region: &str) -> Result<(), &'static str> {
    if region.trim().is_empty() {
        return Err("region cannot be empty");
    }
    Ok(())
}

/// Validate that a precipitation amount is non-negative
pub fn validate_precipitation(precipitation: Decimal) -> Result<(), &'static str> {
    if precipitation < Decimal::ZERO {
        return Err("precipitation cannot be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_region_valid() {
        assert!(validate_region("Москва").is_ok());
        assert!(validate_region("Chiang Mai").is_ok());
        assert!(validate_region("  Сочи  ").is_ok());
    }

    #[test]
    fn test_validate_region_invalid() {
        assert!(validate_region("").is_err());
        assert!(validate_region("   ").is_err());
        assert!(validate_region("\t\n").is_err());
    }

    #[test]
    fn test_validate_precipitation_valid() {
        assert!(validate_precipitation(Decimal::ZERO).is_ok());
        assert!(validate_precipitation(Decimal::new(125, 1)).is_ok());
    }

    #[test]
    fn test_validate_precipitation_invalid() {
        assert!(validate_precipitation(Decimal::new(-1, 1)).is_err());
        assert!(validate_precipitation(Decimal::from(-100)).is_err());
    }

    proptest! {
        /// Any non-negative amount passes, any negative amount fails
        #[test]
        fn prop_precipitation_sign_decides(n in -5000i64..=5000i64) {
            let amount = Decimal::new(n, 1);
            prop_assert_eq!(validate_precipitation(amount).is_ok(), n >= 0);
        }

        /// Whitespace padding never changes the verdict on a region label
        #[test]
        fn prop_region_trim_invariant(label in "[a-zA-Zа-яА-Я]{0,12}") {
            let padded = format!("  {}\t", label);
            prop_assert_eq!(
                validate_region(&padded).is_ok(),
                validate_region(&label).is_ok()
            );
        }
    }
}
