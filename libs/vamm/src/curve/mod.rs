//! Curve strategies
//!
//! A curve answers two questions: where do the reserves land after a swap,
//! and what price do a pair of reserves imply. Markets pick their curve by
//! oracle source, once, through [`CurveModel::for_oracle`].

mod constant_product;
mod squared;

pub use constant_product::ConstantProductCurve;
pub use squared::SquaredCurve;

use crate::error::VammResult;
use crate::math::{Precision, U192};
use crate::types::{AssetType, OracleSource, SwapDirection};
use tracing::trace;

/// Shared contract of every curve formula
pub trait Curve {
    /// Reserves after moving `swap_amount` into or out of `input_asset_reserve`
    ///
    /// # Returns
    /// `(new_input_asset_reserve, new_output_asset_reserve)` at reserve
    /// precision.
    fn swap_output(
        &self,
        input_asset_reserve: u128,
        swap_amount: u128,
        direction: SwapDirection,
        invariant: U192,
        input_asset_type: AssetType,
    ) -> VammResult<(u128, u128)>;

    /// Price implied by a base and quote amount of the same precision
    ///
    /// # Returns
    /// Price at mark price precision.
    fn price(
        &self,
        base_asset_amount: u128,
        quote_asset_amount: u128,
        peg_multiplier: u128,
    ) -> VammResult<u128>;
}

/// Curve selected by a market's oracle source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveModel {
    ConstantProduct(ConstantProductCurve),
    Squared(SquaredCurve),
}

impl CurveModel {
    pub fn for_oracle(oracle_source: OracleSource, precision: Precision) -> Self {
        match oracle_source {
            OracleSource::Standard => {
                CurveModel::ConstantProduct(ConstantProductCurve::new(precision))
            }
            OracleSource::PythSquared => CurveModel::Squared(SquaredCurve::new(precision)),
        }
    }
}

impl Curve for CurveModel {
    fn swap_output(
        &self,
        input_asset_reserve: u128,
        swap_amount: u128,
        direction: SwapDirection,
        invariant: U192,
        input_asset_type: AssetType,
    ) -> VammResult<(u128, u128)> {
        trace!(curve = ?self, ?direction, ?input_asset_type, %swap_amount, "swap output");
        match self {
            CurveModel::ConstantProduct(curve) => curve.swap_output(
                input_asset_reserve,
                swap_amount,
                direction,
                invariant,
                input_asset_type,
            ),
            CurveModel::Squared(curve) => curve.swap_output(
                input_asset_reserve,
                swap_amount,
                direction,
                invariant,
                input_asset_type,
            ),
        }
    }

    fn price(
        &self,
        base_asset_amount: u128,
        quote_asset_amount: u128,
        peg_multiplier: u128,
    ) -> VammResult<u128> {
        match self {
            CurveModel::ConstantProduct(curve) => {
                curve.price(base_asset_amount, quote_asset_amount, peg_multiplier)
            }
            CurveModel::Squared(curve) => {
                curve.price(base_asset_amount, quote_asset_amount, peg_multiplier)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_oracle_source() {
        let precision = Precision::default();
        assert!(matches!(
            CurveModel::for_oracle(OracleSource::Standard, precision),
            CurveModel::ConstantProduct(_)
        ));
        assert!(matches!(
            CurveModel::for_oracle(OracleSource::PythSquared, precision),
            CurveModel::Squared(_)
        ));
    }

    #[test]
    fn test_curves_disagree_only_on_price() {
        let precision = Precision::default();
        let standard = CurveModel::for_oracle(OracleSource::Standard, precision);
        let squared = CurveModel::for_oracle(OracleSource::PythSquared, precision);
        let invariant = U192::from(4_000_000u128) * U192::from(1_000_000u128);

        let swap = |curve: &CurveModel| {
            curve
                .swap_output(4_000_000, 1_000_000, SwapDirection::Add, invariant, AssetType::Base)
                .unwrap()
        };
        assert_eq!(swap(&standard), swap(&squared));

        // quote / base = 1/4
        assert_eq!(standard.price(4_000_000, 1_000_000, 1_000).unwrap(), 2_500_000_000);
        assert_eq!(squared.price(4_000_000, 1_000_000, 1_000).unwrap(), 625_000_000);
    }
}
