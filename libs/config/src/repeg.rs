//! Repeg budget policy
//!
//! Limits on how much of the fee pool a single peg adjustment may spend.

use serde::{Deserialize, Serialize};

/// Budget caps and fee-share ratios used when pricing a repeg
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct RepegConfig {
    /// Hard cap on a single repeg budget, in quote precision (1 QUOTE)
    pub max_budget_quote: u64,

    /// Only this fraction (1/n) of the excess funding may be spent
    pub funding_excess_divisor: u64,

    /// Only this fraction (1/n) of the fee pool may be spent
    pub fee_pool_divisor: u64,

    /// Share of fees reserved for the clearing house (numerator)
    pub fee_share_numerator: u64,

    /// Share of fees reserved for the clearing house (denominator)
    pub fee_share_denominator: u64,

    /// Funding periods shorter than this are treated as this long (seconds)
    pub min_funding_period_secs: i64,
}

impl Default for RepegConfig {
    fn default() -> Self {
        Self {
            max_budget_quote: 1_000_000,
            funding_excess_divisor: 10,
            fee_pool_divisor: 100,
            fee_share_numerator: 1,
            fee_share_denominator: 2,
            min_funding_period_secs: 3_600,
        }
    }
}

impl RepegConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.funding_excess_divisor == 0 || self.fee_pool_divisor == 0 {
            anyhow::bail!("repeg divisors must be non-zero");
        }
        if self.fee_share_denominator == 0 {
            anyhow::bail!("repeg.fee_share_denominator must be non-zero");
        }
        if self.fee_share_numerator > self.fee_share_denominator {
            anyhow::bail!(
                "repeg fee share {}/{} exceeds 1",
                self.fee_share_numerator,
                self.fee_share_denominator
            );
        }
        if self.min_funding_period_secs <= 0 {
            anyhow::bail!("repeg.min_funding_period_secs must be positive");
        }
        Ok(())
    }
}
