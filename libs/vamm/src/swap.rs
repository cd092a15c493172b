//! Swap simulation against AMM reserves
//!
//! Computes where the reserves would land if a trade executed, without
//! executing anything. Quote-denominated amounts are first converted to
//! peg-adjusted reserve units; base amounts already are.

use crate::curve::{Curve, CurveModel};
use crate::error::{VammError, VammResult};
use crate::math::{Precision, SafeMath, U192};
use crate::types::{Amm, AssetType, PositionDirection, SwapDirection};
use tracing::warn;

/// Simulates swaps for any market's curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapSimulator {
    precision: Precision,
}

impl SwapSimulator {
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Reserves after swapping a quote or base amount
    ///
    /// # Arguments
    /// * `amm` - Market AMM snapshot
    /// * `input_asset_type` - Side the amount is denominated in
    /// * `swap_amount` - Quote precision for quote input, reserve precision for base
    /// * `swap_direction` - Whether the input reserve grows or shrinks
    ///
    /// # Returns
    /// `(new_quote_asset_reserve, new_base_asset_reserve)` at reserve precision
    ///
    /// # Errors
    /// [`VammError::NegativeSwapAmount`] when `swap_amount < 0`; arithmetic
    /// errors when the snapshot holds a zero peg or a swap drains a reserve.
    pub fn calculate_amm_reserves_after_swap(
        &self,
        amm: &Amm,
        input_asset_type: AssetType,
        swap_amount: i128,
        swap_direction: SwapDirection,
    ) -> VammResult<(u128, u128)> {
        if swap_amount < 0 {
            warn!(swap_amount = %swap_amount, "rejecting negative swap amount");
            return Err(VammError::NegativeSwapAmount {
                amount: swap_amount,
            });
        }

        self.simulate_swap(
            amm,
            input_asset_type,
            swap_amount.unsigned_abs(),
            swap_direction,
        )
    }

    /// Same as [`Self::calculate_amm_reserves_after_swap`] for an amount
    /// that is non-negative by type
    pub fn simulate_swap(
        &self,
        amm: &Amm,
        input_asset_type: AssetType,
        swap_amount: u128,
        swap_direction: SwapDirection,
    ) -> VammResult<(u128, u128)> {
        let curve = CurveModel::for_oracle(amm.oracle_source, self.precision);
        let invariant = U192::from(amm.sqrt_k).safe_mul(U192::from(amm.sqrt_k))?;

        match input_asset_type {
            AssetType::Quote => {
                let reserve_amount =
                    self.quote_to_reserve_amount(swap_amount, amm.peg_multiplier)?;
                let (new_quote_asset_reserve, new_base_asset_reserve) = curve.swap_output(
                    amm.quote_asset_reserve,
                    reserve_amount,
                    swap_direction,
                    invariant,
                    input_asset_type,
                )?;
                Ok((new_quote_asset_reserve, new_base_asset_reserve))
            }
            AssetType::Base => {
                let (new_base_asset_reserve, new_quote_asset_reserve) = curve.swap_output(
                    amm.base_asset_reserve,
                    swap_amount,
                    swap_direction,
                    invariant,
                    input_asset_type,
                )?;
                Ok((new_quote_asset_reserve, new_base_asset_reserve))
            }
        }
    }

    /// Quote precision amount -> peg-adjusted reserve units
    ///
    /// `amount × (reserve × peg / quote ratio) / peg_multiplier`
    pub fn quote_to_reserve_amount(
        &self,
        quote_asset_amount: u128,
        peg_multiplier: u128,
    ) -> VammResult<u128> {
        U192::from(quote_asset_amount)
            .safe_mul(U192::from(self.precision.amm_times_peg_to_quote_ratio()))?
            .safe_div(U192::from(peg_multiplier))?
            .try_to_u128()
    }
}

/// Translate longing/shorting a quote or base amount into an AMM operation
///
/// | input | position | result |
/// |-------|----------|--------|
/// | base  | long     | Remove |
/// | quote | short    | Remove |
/// | base  | short    | Add    |
/// | quote | long     | Add    |
pub fn get_swap_direction(
    input_asset_type: AssetType,
    position_direction: PositionDirection,
) -> SwapDirection {
    match (input_asset_type, position_direction) {
        (AssetType::Base, PositionDirection::Long) => SwapDirection::Remove,
        (AssetType::Quote, PositionDirection::Short) => SwapDirection::Remove,
        (AssetType::Base, PositionDirection::Short) => SwapDirection::Add,
        (AssetType::Quote, PositionDirection::Long) => SwapDirection::Add,
    }
}
