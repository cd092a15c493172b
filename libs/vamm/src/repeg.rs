//! Peg adjustment math
//!
//! Prices what moving a market's peg multiplier would cost and checks a
//! proposed repeg against the oracle. Nothing here mutates the market: every
//! "after" state is returned as a new [`Market`].

use crate::curve::{ConstantProductCurve, Curve};
use crate::error::{VammError, VammResult};
use crate::math::{Precision, SafeMath, U192};
use crate::position::PositionMath;
use crate::price::PriceEngine;
use crate::swap::SwapSimulator;
use crate::types::{AssetType, Market, OraclePriceData, SwapDirection};
use tracing::debug;
use vamm_config::RepegConfig;

const HOURS_PER_DAY: i64 = 24;

/// Outcome of checking a repeg against the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepegValidity {
    pub oracle_is_valid: bool,
    /// Terminal price moved toward the oracle
    pub direction_valid: bool,
    /// Terminal price stayed on the near side of the confidence band
    pub profitability_valid: bool,
    /// Mark price stayed inside the confidence band
    pub price_impact_valid: bool,
    /// `(oracle - terminal) / oracle` at price spread precision
    pub oracle_terminal_divergence_pct_after: i128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepegCalculator {
    precision: Precision,
    policy: RepegConfig,
    prices: PriceEngine,
    positions: PositionMath,
    simulator: SwapSimulator,
}

impl RepegCalculator {
    pub fn new(precision: Precision, policy: RepegConfig) -> Self {
        Self {
            precision,
            policy,
            prices: PriceEngine::new(precision),
            positions: PositionMath::new(precision),
            simulator: SwapSimulator::new(precision),
        }
    }

    /// Peg that puts the mark price of these reserves at `target_price`
    ///
    /// `target × base / quote / (mark price / peg ratio)`
    pub fn calculate_peg_from_target_price(
        &self,
        quote_asset_reserve: u128,
        base_asset_reserve: u128,
        target_price: u128,
    ) -> VammResult<u128> {
        U192::from(target_price)
            .safe_mul(U192::from(base_asset_reserve))?
            .safe_div(U192::from(quote_asset_reserve))?
            .safe_div(U192::from(self.precision.price_to_peg_ratio()))?
            .try_to_u128()
    }

    /// Market with `new_peg` applied, and what the change costs
    ///
    /// The cost is the change in value of the net market position: positive
    /// when the AMM pays out, negative when it gains.
    pub fn adjust_peg_cost(&self, market: &Market, new_peg: u128) -> VammResult<(Market, i128)> {
        let mut repegged = market.clone();

        if new_peg == repegged.amm.peg_multiplier {
            return Ok((repegged, 0));
        }

        let (current_net_market_value, _) = self.positions.calculate_base_asset_value_and_pnl(
            repegged.base_asset_amount,
            0,
            &repegged.amm,
        )?;

        repegged.amm.peg_multiplier = new_peg;

        let (_new_net_market_value, cost) = self.positions.calculate_base_asset_value_and_pnl(
            repegged.base_asset_amount,
            current_net_market_value,
            &repegged.amm,
        )?;

        Ok((repegged, cost))
    }

    /// Peg a `budget` (quote precision) can afford on the way to `target_price`
    ///
    /// Never overshoots the optimal peg for the target; when the budget
    /// covers more than needed, the optimal peg wins.
    ///
    /// # Returns
    /// `(candidate_peg, cost, repegged_market)`
    pub fn calculate_budgeted_peg(
        &self,
        market: &Market,
        budget: u128,
        current_price: u128,
        target_price: u128,
    ) -> VammResult<(u128, i128, Market)> {
        let amm = &market.amm;

        let order_swap_direction = if market.base_asset_amount > 0 {
            SwapDirection::Add
        } else {
            SwapDirection::Remove
        };

        let (new_quote_asset_reserve, _new_base_asset_reserve) = self.simulator.simulate_swap(
            amm,
            AssetType::Base,
            market.base_asset_amount.unsigned_abs(),
            order_swap_direction,
        )?;

        let optimal_peg = self.calculate_peg_from_target_price(
            amm.quote_asset_reserve,
            amm.base_asset_reserve,
            target_price,
        )?;

        let full_budget_peg = if new_quote_asset_reserve != amm.quote_asset_reserve {
            let peg_rises = amm.quote_asset_reserve > new_quote_asset_reserve;

            let delta_quote_asset_reserves = if peg_rises {
                amm.quote_asset_reserve.safe_sub(new_quote_asset_reserve)?
            } else {
                new_quote_asset_reserve.safe_sub(amm.quote_asset_reserve)?
            };

            let delta_peg_multiplier = budget
                .safe_mul(self.precision.mark_price())?
                .safe_div(delta_quote_asset_reserves.safe_div(self.precision.amm_to_quote_ratio())?)?;

            let delta_peg_precision = delta_peg_multiplier
                .safe_mul(self.precision.peg())?
                .safe_div(self.precision.mark_price())?;

            let new_budget_peg = if peg_rises {
                amm.peg_multiplier.safe_add(delta_peg_precision)?
            } else {
                amm.peg_multiplier.safe_sub(delta_peg_precision)?
            };

            // pegs that act against the net market are free
            if (peg_rises && optimal_peg < new_budget_peg)
                || (!peg_rises && optimal_peg > new_budget_peg)
            {
                optimal_peg
            } else {
                new_budget_peg
            }
        } else {
            optimal_peg
        };

        // avoid overshooting budget past target
        let candidate_peg = if (current_price > target_price && full_budget_peg < optimal_peg)
            || (current_price < target_price && full_budget_peg > optimal_peg)
        {
            optimal_peg
        } else {
            full_budget_peg
        };

        let (repegged_market, candidate_cost) = self.adjust_peg_cost(market, candidate_peg)?;

        Ok((candidate_peg, candidate_cost, repegged_market))
    }

    /// Check a repegged market against the oracle
    ///
    /// `terminal_price_before` is the terminal price prior to the repeg.
    /// With an invalid oracle every check fails.
    pub fn calculate_repeg_validity(
        &self,
        market: &Market,
        oracle_price_data: &OraclePriceData,
        oracle_is_valid: bool,
        terminal_price_before: u128,
    ) -> VammResult<RepegValidity> {
        let OraclePriceData {
            price: oracle_price,
            confidence: oracle_conf,
            ..
        } = *oracle_price_data;

        let oracle_price_u128 = u128::try_from(oracle_price).map_err(|_| VammError::Conversion {
            value: oracle_price.to_string(),
            target: "u128",
        })?;

        let terminal_price_after = self.prices.calculate_terminal_price(market)?;
        let oracle_terminal_spread_after = oracle_price.safe_sub(to_i128(terminal_price_after)?)?;
        let oracle_terminal_divergence_pct_after = oracle_terminal_spread_after
            .safe_mul(to_i128(self.precision.price_spread())?)?
            .safe_div(oracle_price)?;

        if !oracle_is_valid {
            return Ok(RepegValidity {
                oracle_is_valid,
                direction_valid: false,
                profitability_valid: false,
                price_impact_valid: false,
                oracle_terminal_divergence_pct_after,
            });
        }

        let mut direction_valid = true;
        let mut profitability_valid = true;
        let mut price_impact_valid = true;

        // the band check reads the reserve ratio, as terminal price does
        let mark_price_after = ConstantProductCurve::new(self.precision).price(
            market.amm.base_asset_reserve,
            market.amm.quote_asset_reserve,
            market.amm.peg_multiplier,
        )?;
        let oracle_conf_band_top = oracle_price_u128.safe_add(oracle_conf)?;
        let oracle_conf_band_bottom = oracle_price_u128.safe_sub(oracle_conf)?;

        if oracle_price_u128 > terminal_price_after {
            // only allow terminal up when oracle is higher
            if terminal_price_after < terminal_price_before {
                debug!(
                    oracle = %oracle_price_u128,
                    terminal_before = %terminal_price_before,
                    terminal_after = %terminal_price_after,
                    "repeg moves terminal away from oracle"
                );
                direction_valid = false;
            }

            if oracle_conf_band_bottom < terminal_price_after {
                profitability_valid = false;
            }

            if mark_price_after > oracle_conf_band_top {
                price_impact_valid = false;
            }
        } else if oracle_price_u128 < terminal_price_after {
            // only allow terminal down when oracle is lower
            if terminal_price_after > terminal_price_before {
                debug!(
                    oracle = %oracle_price_u128,
                    terminal_before = %terminal_price_before,
                    terminal_after = %terminal_price_after,
                    "repeg moves terminal away from oracle"
                );
                direction_valid = false;
            }

            if oracle_conf_band_top > terminal_price_after {
                profitability_valid = false;
            }

            if mark_price_after < oracle_conf_band_bottom {
                price_impact_valid = false;
            }
        }

        Ok(RepegValidity {
            oracle_is_valid,
            direction_valid,
            profitability_valid,
            price_impact_valid,
            oracle_terminal_divergence_pct_after,
        })
    }

    /// Budget available for a single repeg (quote precision)
    ///
    /// The lesser of the policy cap, a fraction of the excess funding, and a
    /// fraction of the fee pool.
    pub fn calculate_pool_budget(
        &self,
        market: &Market,
        precomputed_mark_price: u128,
        oracle_price_data: &OraclePriceData,
    ) -> VammResult<u128> {
        let fee_pool = self.calculate_fee_pool(market)?;
        let expected_funding_excess = self.calculate_expected_funding_excess(
            market,
            oracle_price_data.price,
            precomputed_mark_price,
        )?;

        let funding_share = expected_funding_excess
            .max(0)
            .unsigned_abs()
            .safe_div(u128::from(self.policy.funding_excess_divisor))?;
        let fee_pool_share = fee_pool.safe_div(u128::from(self.policy.fee_pool_divisor))?;

        Ok(u128::from(self.policy.max_budget_quote)
            .min(funding_share)
            .min(fee_pool_share))
    }

    /// Funding the market would collect at the instantaneous spread beyond
    /// what the TWAP spread already implies (quote precision)
    pub fn calculate_expected_funding_excess(
        &self,
        market: &Market,
        oracle_price: i128,
        precomputed_mark_price: u128,
    ) -> VammResult<i128> {
        let oracle_mark_spread = to_i128(precomputed_mark_price)?.safe_sub(oracle_price)?;

        let oracle_mark_twap_spread = to_i128(market.amm.last_mark_price_twap)?
            .safe_sub(market.amm.last_oracle_price_twap)?;

        let one_hour = self.policy.min_funding_period_secs;
        let period_adjustment = HOURS_PER_DAY
            .checked_mul(one_hour)
            .ok_or(VammError::Overflow("funding period adjustment"))?
            .checked_div(one_hour.max(market.amm.funding_period))
            .ok_or(VammError::DivisionByZero("funding period adjustment"))?;

        let funding_precision = self
            .precision
            .mark_price()
            .safe_mul(self.precision.amm_reserve())?
            .safe_div(self.precision.quote())?;

        market
            .base_asset_amount
            .safe_mul(oracle_mark_spread.safe_sub(oracle_mark_twap_spread)?)?
            .safe_div(i128::from(period_adjustment))?
            .safe_div(to_i128(funding_precision)?)
    }

    /// Fees above the clearing house's reserved share
    pub fn calculate_fee_pool(&self, market: &Market) -> VammResult<u128> {
        let total_fee_minus_distributions_lower_bound = self.total_fee_lower_bound(market)?;

        if market.amm.total_fee_minus_distributions > total_fee_minus_distributions_lower_bound {
            market
                .amm
                .total_fee_minus_distributions
                .safe_sub(total_fee_minus_distributions_lower_bound)
        } else {
            Ok(0)
        }
    }

    /// Share of total fees reserved for the clearing house
    pub fn total_fee_lower_bound(&self, market: &Market) -> VammResult<u128> {
        market
            .amm
            .total_fee
            .safe_mul(u128::from(self.policy.fee_share_numerator))?
            .safe_div(u128::from(self.policy.fee_share_denominator))
    }
}

fn to_i128(value: u128) -> VammResult<i128> {
    i128::try_from(value).map_err(|_| VammError::Conversion {
        value: value.to_string(),
        target: "i128",
    })
}
