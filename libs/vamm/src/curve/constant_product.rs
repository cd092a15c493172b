//! Constant product curve (x·y=k)

use super::Curve;
use crate::error::VammResult;
use crate::math::{Precision, SafeMath, U192};
use crate::types::{AssetType, SwapDirection};

/// Reserves move along `input × output = sqrt_k²`; price is the reserve ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantProductCurve {
    precision: Precision,
}

impl ConstantProductCurve {
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }
}

impl Curve for ConstantProductCurve {
    fn swap_output(
        &self,
        input_asset_reserve: u128,
        swap_amount: u128,
        direction: SwapDirection,
        invariant: U192,
        _input_asset_type: AssetType,
    ) -> VammResult<(u128, u128)> {
        swap_along_invariant(input_asset_reserve, swap_amount, direction, invariant)
    }

    /// `quote × mark_price × peg / peg_precision / base`, flooring each step
    fn price(
        &self,
        base_asset_amount: u128,
        quote_asset_amount: u128,
        peg_multiplier: u128,
    ) -> VammResult<u128> {
        U192::from(quote_asset_amount)
            .safe_mul(U192::from(self.precision.mark_price()))?
            .safe_mul(U192::from(peg_multiplier))?
            .safe_div(U192::from(self.precision.peg()))?
            .safe_div(U192::from(base_asset_amount))?
            .try_to_u128()
    }
}

/// Move the input reserve by `swap_amount` and solve the output reserve
/// from the invariant: `output = floor(invariant / new_input)`
pub(crate) fn swap_along_invariant(
    input_asset_reserve: u128,
    swap_amount: u128,
    direction: SwapDirection,
    invariant: U192,
) -> VammResult<(u128, u128)> {
    let new_input_asset_reserve = match direction {
        SwapDirection::Add => input_asset_reserve.safe_add(swap_amount)?,
        SwapDirection::Remove => input_asset_reserve.safe_sub(swap_amount)?,
    };

    let new_output_asset_reserve = invariant
        .safe_div(U192::from(new_input_asset_reserve))?
        .try_to_u128()?;

    Ok((new_input_asset_reserve, new_output_asset_reserve))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VammError;

    fn curve() -> ConstantProductCurve {
        ConstantProductCurve::new(Precision::default())
    }

    #[test]
    fn test_add_preserves_invariant() {
        let invariant = U192::from(1_000_000u128) * U192::from(1_000_000u128);
        let (new_in, new_out) = curve()
            .swap_output(1_000_000, 250_000, SwapDirection::Add, invariant, AssetType::Base)
            .unwrap();
        assert_eq!(new_in, 1_250_000);
        assert_eq!(new_out, 800_000);
    }

    #[test]
    fn test_remove_floors_output() {
        let invariant = U192::from(1_000u128) * U192::from(1_000u128);
        let (new_in, new_out) = curve()
            .swap_output(1_000, 1, SwapDirection::Remove, invariant, AssetType::Quote)
            .unwrap();
        assert_eq!(new_in, 999);
        // 1_000_000 / 999 = 1001.001...
        assert_eq!(new_out, 1_001);
    }

    #[test]
    fn test_removing_whole_reserve_is_fatal() {
        let invariant = U192::from(1_000_000u128);
        let err = curve()
            .swap_output(1_000, 1_000, SwapDirection::Remove, invariant, AssetType::Base)
            .unwrap_err();
        assert!(matches!(err, VammError::DivisionByZero(_)));

        let err = curve()
            .swap_output(1_000, 1_001, SwapDirection::Remove, invariant, AssetType::Base)
            .unwrap_err();
        assert!(matches!(err, VammError::Underflow(_)));
    }

    #[test]
    fn test_price_at_peg_one() {
        // equal reserves, peg 1.000 -> price 1.0
        assert_eq!(curve().price(1_000_000, 1_000_000, 1_000).unwrap(), 10_000_000_000);
        // peg 1 (0.001)
        assert_eq!(curve().price(1_000_000, 1_000_000, 1).unwrap(), 10_000_000);
    }

    #[test]
    fn test_price_floors() {
        // 1 / 3 at mark price precision
        assert_eq!(curve().price(3, 1, 1_000).unwrap(), 3_333_333_333);
    }

    #[test]
    fn test_zero_base_is_division_by_zero() {
        assert!(matches!(
            curve().price(0, 1, 1_000),
            Err(VammError::DivisionByZero(_))
        ));
    }
}
