//! Maximum trade size before a limit price is reached
//!
//! Inverts the constant product curve: given a limit price, solve for the
//! base reserve that would realise it, then compare with the current one.

use crate::error::VammResult;
use crate::math::{sqrt_floor_u256, Precision, SafeMath, U256};
use crate::types::{Amm, PositionDirection};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeBoundsSolver {
    precision: Precision,
}

impl TradeBoundsSolver {
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }

    /// Largest base amount tradable before the mark price reaches `limit_price`
    ///
    /// `new_base² = sqrt_k² × mark_price × peg / limit_price / peg_precision`,
    /// flooring at each step, then `new_base = floor(sqrt(new_base²))`.
    ///
    /// # Returns
    /// `(base_asset_amount, direction)`: a growing base reserve means the
    /// price falls, so the trade is a short; a shrinking one is a long. When
    /// the solved reserve equals the current one the result is `(0, Long)`.
    ///
    /// # Errors
    /// [`crate::VammError::DivisionByZero`] when `limit_price` is zero.
    pub fn calculate_max_base_asset_amount_to_trade(
        &self,
        amm: &Amm,
        limit_price: u128,
    ) -> VammResult<(u128, PositionDirection)> {
        // sqrt_k² × mark_price × peg outgrows 192 bits for large pools
        let invariant = U256::from(amm.sqrt_k).safe_mul(U256::from(amm.sqrt_k))?;

        let new_base_asset_reserve_squared = invariant
            .safe_mul(U256::from(self.precision.mark_price()))?
            .safe_mul(U256::from(amm.peg_multiplier))?
            .safe_div(U256::from(limit_price))?
            .safe_div(U256::from(self.precision.peg()))?;

        let new_base_asset_reserve =
            sqrt_floor_u256(new_base_asset_reserve_squared).try_to_u128()?;

        if new_base_asset_reserve > amm.base_asset_reserve {
            Ok((
                new_base_asset_reserve.safe_sub(amm.base_asset_reserve)?,
                PositionDirection::Short,
            ))
        } else if new_base_asset_reserve < amm.base_asset_reserve {
            Ok((
                amm.base_asset_reserve.safe_sub(new_base_asset_reserve)?,
                PositionDirection::Long,
            ))
        } else {
            debug!(limit_price = %limit_price, "trade size too small");
            Ok((0, PositionDirection::Long))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VammError;

    fn solver() -> TradeBoundsSolver {
        TradeBoundsSolver::new(Precision::default())
    }

    #[test]
    fn test_higher_limit_is_a_long() {
        // price 1.0 -> 4.0 halves the base reserve
        let amm = Amm::new(1_000_000, 1_000_000, 1_000_000, 1_000);
        let (size, direction) = solver()
            .calculate_max_base_asset_amount_to_trade(&amm, 40_000_000_000)
            .unwrap();
        assert_eq!((size, direction), (500_000, PositionDirection::Long));
    }

    #[test]
    fn test_lower_limit_is_a_short() {
        // price 1.0 -> 0.25 doubles the base reserve
        let amm = Amm::new(1_000_000, 1_000_000, 1_000_000, 1_000);
        let (size, direction) = solver()
            .calculate_max_base_asset_amount_to_trade(&amm, 2_500_000_000)
            .unwrap();
        assert_eq!((size, direction), (1_000_000, PositionDirection::Short));
    }

    #[test]
    fn test_limit_at_mark_is_zero_long() {
        // the zero-size result keeps the Long default even though nothing trades
        let amm = Amm::new(1_000_000, 1_000_000, 1_000_000, 1_000);
        let result = solver()
            .calculate_max_base_asset_amount_to_trade(&amm, 10_000_000_000)
            .unwrap();
        assert_eq!(result, (0, PositionDirection::Long));
    }

    #[test]
    fn test_root_is_floored() {
        // new_base² = 10^12 × 10^10 × 1000 / 3 × 10^10 / 1000 = 333_333_333_333
        let amm = Amm::new(1_000_000, 1_000_000, 1_000_000, 1_000);
        let (size, direction) = solver()
            .calculate_max_base_asset_amount_to_trade(&amm, 30_000_000_000)
            .unwrap();
        // floor(sqrt(333_333_333_333)) = 577_350
        assert_eq!((size, direction), (422_650, PositionDirection::Long));
    }

    #[test]
    fn test_large_pool_at_high_peg() {
        // sqrt_k 10^22 at peg 1_000.000: sqrt_k² × mark_price × peg = 10^60
        let reserve = 10_000_000_000_000_000_000_000;
        let amm = Amm::new(reserve, reserve, reserve, 1_000_000);
        let mark = 10_000_000_000_000;

        let (size, direction) = solver()
            .calculate_max_base_asset_amount_to_trade(&amm, 4 * mark)
            .unwrap();
        assert_eq!((size, direction), (reserve / 2, PositionDirection::Long));

        let result = solver().calculate_max_base_asset_amount_to_trade(&amm, mark).unwrap();
        assert_eq!(result, (0, PositionDirection::Long));
    }

    #[test]
    fn test_zero_limit_price_is_fatal() {
        let amm = Amm::new(1_000_000, 1_000_000, 1_000_000, 1_000);
        assert!(matches!(
            solver().calculate_max_base_asset_amount_to_trade(&amm, 0),
            Err(VammError::DivisionByZero(_))
        ));
    }
}
