//! Price derivation from reserves
//!
//! Mark price reads the AMM's current reserves; terminal price reads the
//! reserves the AMM would hold if every open position closed against it
//! right now. Terminal price is the manipulation-resistant benchmark used
//! for repegging and closing checks.

use crate::curve::{ConstantProductCurve, Curve, CurveModel};
use crate::error::VammResult;
use crate::math::Precision;
use crate::swap::{get_swap_direction, SwapSimulator};
use crate::types::{Amm, AssetType, Market, PositionDirection};
use tracing::debug;

/// Returned by [`PriceEngine::calculate_price`] when there is no base to
/// price against. Not a market price of zero.
pub const NO_LIQUIDITY_PRICE: u128 = 0;

/// Derives prices at mark price precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceEngine {
    precision: Precision,
    simulator: SwapSimulator,
}

impl PriceEngine {
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            simulator: SwapSimulator::new(precision),
        }
    }

    /// Price of an arbitrary base and quote amount of the same precision
    ///
    /// Returns [`NO_LIQUIDITY_PRICE`] when `base_asset_amount` is zero;
    /// otherwise dispatches to the market's curve.
    pub fn calculate_price(
        &self,
        amm: &Amm,
        base_asset_amount: u128,
        quote_asset_amount: u128,
        peg_multiplier: u128,
    ) -> VammResult<u128> {
        if base_asset_amount == 0 {
            debug!("no base asset to price against, returning sentinel");
            return Ok(NO_LIQUIDITY_PRICE);
        }

        CurveModel::for_oracle(amm.oracle_source, self.precision).price(
            base_asset_amount,
            quote_asset_amount,
            peg_multiplier,
        )
    }

    /// Price implied by the AMM's current reserves and peg
    pub fn calculate_mark_price(&self, amm: &Amm) -> VammResult<u128> {
        self.calculate_price(
            amm,
            amm.base_asset_reserve,
            amm.quote_asset_reserve,
            amm.peg_multiplier,
        )
    }

    /// Price after the market's whole net position closes against the AMM
    ///
    /// A net long closes by shorting the base amount back into the AMM,
    /// anything else by longing it out. The closing reserves are always
    /// priced with the constant product formula, whatever the oracle source.
    /// A zero base reserve after the close is an error, not the sentinel.
    pub fn calculate_terminal_price(&self, market: &Market) -> VammResult<u128> {
        let direction_to_close = if market.base_asset_amount > 0 {
            PositionDirection::Short
        } else {
            PositionDirection::Long
        };

        let (new_quote_asset_reserve, new_base_asset_reserve) = self.simulator.simulate_swap(
            &market.amm,
            AssetType::Base,
            market.base_asset_amount.unsigned_abs(),
            get_swap_direction(AssetType::Base, direction_to_close),
        )?;

        ConstantProductCurve::new(self.precision).price(
            new_base_asset_reserve,
            new_quote_asset_reserve,
            market.amm.peg_multiplier,
        )
    }
}
