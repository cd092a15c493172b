//! Conversion of scaled integers to decimals for display
//!
//! Only for presentation and logging. No computation in this crate ever
//! goes through [`Decimal`].

use super::precision::decimals;
use crate::error::{VammError, VammResult};
use rust_decimal::Decimal;

/// Render an unsigned scaled integer, e.g. a price at mark price precision
///
/// # Examples
/// ```
/// use vamm::math::convert_to_decimal;
/// use rust_decimal::Decimal;
///
/// let price = convert_to_decimal(12_345_000_000, 10_000_000_000).unwrap();
/// assert_eq!(price, Decimal::new(12345, 4));
/// ```
pub fn convert_to_decimal(value: u128, precision: u128) -> VammResult<Decimal> {
    let signed = i128::try_from(value).map_err(|_| VammError::Conversion {
        value: value.to_string(),
        target: "i128",
    })?;
    convert_signed_to_decimal(signed, precision)
}

/// Render a signed scaled integer, e.g. a PnL at quote precision
pub fn convert_signed_to_decimal(value: i128, precision: u128) -> VammResult<Decimal> {
    let scale = decimals(precision).ok_or_else(|| {
        VammError::InvalidPrecision(format!("{} is not a power of ten", precision))
    })?;
    Decimal::try_from_i128_with_scale(value, scale).map_err(|_| VammError::Conversion {
        value: value.to_string(),
        target: "Decimal",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_rendering() {
        assert_eq!(convert_to_decimal(10_000_000_000, 10_000_000_000).unwrap(), dec!(1));
        assert_eq!(convert_to_decimal(5, 1_000).unwrap(), dec!(0.005));
    }

    #[test]
    fn test_signed_rendering() {
        assert_eq!(convert_signed_to_decimal(-1_500_000, 1_000_000).unwrap(), dec!(-1.5));
    }

    #[test]
    fn test_out_of_range() {
        assert!(convert_to_decimal(u128::MAX, 1).is_err());
        assert!(convert_to_decimal(1, 3).is_err());
    }
}
