//! Numeric scale factors
//!
//! Every quantity the pricing core handles is an integer at one of these
//! scales. Changing them changes every quoted number, so they must match
//! the program whose trades are being previewed.

use serde::{Deserialize, Serialize};

/// On-chain default scales
pub mod defaults {
    /// Mark price precision (expo = -10)
    pub const MARK_PRICE_PRECISION: u64 = 10_000_000_000;

    /// Peg multiplier precision (expo = -3)
    pub const PEG_PRECISION: u64 = 1_000;

    /// AMM reserve precision (expo = -13)
    pub const AMM_RESERVE_PRECISION: u64 = 10_000_000_000_000;

    /// Quote asset precision (expo = -6)
    pub const QUOTE_PRECISION: u64 = 1_000_000;

    /// Price spread precision for divergence percentages (expo = -4)
    pub const PRICE_SPREAD_PRECISION: u64 = 10_000;
}

/// Scale factors for prices, pegs, reserves and quote amounts
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PrecisionConfig {
    pub mark_price: u64,
    pub peg: u64,
    pub amm_reserve: u64,
    pub quote: u64,
    pub price_spread: u64,
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self {
            mark_price: defaults::MARK_PRICE_PRECISION,
            peg: defaults::PEG_PRECISION,
            amm_reserve: defaults::AMM_RESERVE_PRECISION,
            quote: defaults::QUOTE_PRECISION,
            price_spread: defaults::PRICE_SPREAD_PRECISION,
        }
    }
}

impl PrecisionConfig {
    /// Reject scales that would reach a division step as zero
    pub fn validate(&self) -> anyhow::Result<()> {
        let scales = [
            ("mark_price", self.mark_price),
            ("peg", self.peg),
            ("amm_reserve", self.amm_reserve),
            ("quote", self.quote),
            ("price_spread", self.price_spread),
        ];

        for (name, value) in scales {
            if value == 0 {
                anyhow::bail!("precision.{} must be non-zero", name);
            }
        }

        Ok(())
    }
}
