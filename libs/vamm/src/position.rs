//! Valuing a position by simulating its close against the AMM

use crate::error::{VammError, VammResult};
use crate::math::{Precision, SafeMath, U192};
use crate::swap::SwapSimulator;
use crate::types::{Amm, AssetType, SwapDirection};

/// Longs close by adding base back to the AMM; shorts by removing it
pub fn swap_direction_to_close_position(base_asset_amount: i128) -> SwapDirection {
    if base_asset_amount >= 0 {
        SwapDirection::Add
    } else {
        SwapDirection::Remove
    }
}

/// Signed PnL of exiting at `exit_value` a position entered at `entry_value`
///
/// `Add` closes a long (`exit - entry`), `Remove` closes a short
/// (`entry - exit`).
pub fn calculate_pnl(
    exit_value: u128,
    entry_value: u128,
    swap_direction_to_close: SwapDirection,
) -> VammResult<i128> {
    let exit_value = to_i128(exit_value)?;
    let entry_value = to_i128(entry_value)?;

    match swap_direction_to_close {
        SwapDirection::Add => exit_value.safe_sub(entry_value),
        SwapDirection::Remove => entry_value.safe_sub(exit_value),
    }
}

fn to_i128(value: u128) -> VammResult<i128> {
    i128::try_from(value).map_err(|_| VammError::Conversion {
        value: value.to_string(),
        target: "i128",
    })
}

/// Position valuation at a fixed precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionMath {
    precision: Precision,
    simulator: SwapSimulator,
}

impl PositionMath {
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            simulator: SwapSimulator::new(precision),
        }
    }

    /// Quote reserve units -> quote precision: `delta × peg / (reserve × peg / quote ratio)`
    pub fn reserve_to_asset_amount(
        &self,
        quote_asset_reserve: u128,
        peg_multiplier: u128,
    ) -> VammResult<u128> {
        U192::from(quote_asset_reserve)
            .safe_mul(U192::from(peg_multiplier))?
            .safe_div(U192::from(self.precision.amm_times_peg_to_quote_ratio()))?
            .try_to_u128()
    }

    /// Quote amount that changed hands when the quote reserve moved
    ///
    /// A `Remove` rounds up by one unit so the AMM never undercharges.
    pub fn calculate_quote_asset_amount_swapped(
        &self,
        quote_asset_reserve_before: u128,
        quote_asset_reserve_after: u128,
        swap_direction: SwapDirection,
        peg_multiplier: u128,
    ) -> VammResult<u128> {
        let quote_asset_reserve_change = match swap_direction {
            SwapDirection::Add => quote_asset_reserve_before.safe_sub(quote_asset_reserve_after)?,
            SwapDirection::Remove => {
                quote_asset_reserve_after.safe_sub(quote_asset_reserve_before)?
            }
        };

        let quote_asset_amount =
            self.reserve_to_asset_amount(quote_asset_reserve_change, peg_multiplier)?;

        match swap_direction {
            SwapDirection::Add => Ok(quote_asset_amount),
            SwapDirection::Remove => quote_asset_amount.safe_add(1),
        }
    }

    /// Value of closing `base_asset_amount` against the AMM, and the PnL
    /// relative to `quote_asset_amount` (the entry notional)
    ///
    /// # Returns
    /// `(base_asset_value, pnl)` at quote precision; `(0, 0)` for a flat position.
    pub fn calculate_base_asset_value_and_pnl(
        &self,
        base_asset_amount: i128,
        quote_asset_amount: u128,
        amm: &Amm,
    ) -> VammResult<(u128, i128)> {
        if base_asset_amount == 0 {
            return Ok((0, 0));
        }

        let swap_direction = swap_direction_to_close_position(base_asset_amount);

        let (new_quote_asset_reserve, _new_base_asset_reserve) = self.simulator.simulate_swap(
            amm,
            AssetType::Base,
            base_asset_amount.unsigned_abs(),
            swap_direction,
        )?;

        let base_asset_value = self.calculate_quote_asset_amount_swapped(
            amm.quote_asset_reserve,
            new_quote_asset_reserve,
            swap_direction,
            amm.peg_multiplier,
        )?;

        let pnl = calculate_pnl(base_asset_value, quote_asset_amount, swap_direction)?;

        Ok((base_asset_value, pnl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMM_RESERVE_PRECISION: u128 = 10_000_000_000_000;
    const QUOTE_PRECISION: u128 = 1_000_000;

    fn math() -> PositionMath {
        PositionMath::new(Precision::default())
    }

    fn amm() -> Amm {
        // 1_000 base / 1_000 quote reserves pegged at 10.000
        let reserve = 1_000 * AMM_RESERVE_PRECISION;
        Amm::new(reserve, reserve, reserve, 10_000)
    }

    #[test]
    fn test_close_direction() {
        assert_eq!(swap_direction_to_close_position(5), SwapDirection::Add);
        assert_eq!(swap_direction_to_close_position(0), SwapDirection::Add);
        assert_eq!(swap_direction_to_close_position(-5), SwapDirection::Remove);
    }

    #[test]
    fn test_pnl_sign_follows_side() {
        assert_eq!(calculate_pnl(120, 100, SwapDirection::Add).unwrap(), 20);
        assert_eq!(calculate_pnl(120, 100, SwapDirection::Remove).unwrap(), -20);
    }

    #[test]
    fn test_flat_position_has_no_value() {
        assert_eq!(math().calculate_base_asset_value_and_pnl(0, 5, &amm()).unwrap(), (0, 0));
    }

    #[test]
    fn test_long_value() {
        // closing a 1_000 base long doubles the base reserve and halves quote:
        // 500 quote reserve × peg 10 = 5_000 QUOTE
        let base = 1_000 * AMM_RESERVE_PRECISION as i128;
        let entry = 4_000 * QUOTE_PRECISION;
        let (value, pnl) = math().calculate_base_asset_value_and_pnl(base, entry, &amm()).unwrap();
        assert_eq!(value, 5_000 * QUOTE_PRECISION);
        assert_eq!(pnl, 1_000 * QUOTE_PRECISION as i128);
    }

    #[test]
    fn test_short_value_rounds_up() {
        // closing a 500 base short leaves 500 base, so quote grows by 1_000:
        // 1_000 × 10 = 10_000 QUOTE, plus one unit
        let base = -(500 * AMM_RESERVE_PRECISION as i128);
        let entry = 10_000 * QUOTE_PRECISION;
        let (value, pnl) = math().calculate_base_asset_value_and_pnl(base, entry, &amm()).unwrap();
        assert_eq!(value, 10_000 * QUOTE_PRECISION + 1);
        assert_eq!(pnl, -1);
    }
}
