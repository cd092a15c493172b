//! Squared curve for markets whose oracle quotes the square of the underlying
//!
//! Reserves move along the same `sqrt_k²` hyperbola as the constant product
//! curve, so swap output is shared. The price mapping is squared: the
//! market tracks `(quote / base)²` rather than `quote / base`.

use super::constant_product::swap_along_invariant;
use super::Curve;
use crate::error::VammResult;
use crate::math::{Precision, SafeMath, U192};
use crate::types::{AssetType, SwapDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquaredCurve {
    precision: Precision,
}

impl SquaredCurve {
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }
}

impl Curve for SquaredCurve {
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

    /// `quote² × mark_price × peg / peg_precision / base²`, flooring each step
    fn price(
        &self,
        base_asset_amount: u128,
        quote_asset_amount: u128,
        peg_multiplier: u128,
    ) -> VammResult<u128> {
        let quote = U192::from(quote_asset_amount);
        let base = U192::from(base_asset_amount);

        quote
            .safe_mul(quote)?
            .safe_mul(U192::from(self.precision.mark_price()))?
            .safe_mul(U192::from(peg_multiplier))?
            .safe_div(U192::from(self.precision.peg()))?
            .safe_div(base.safe_mul(base)?)?
            .try_to_u128()
    }
}
