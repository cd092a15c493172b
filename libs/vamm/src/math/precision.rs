//! Scale factors held by every engine
//!
//! [`Precision`] is the single constants value the arithmetic runs against.
//! It is validated once at construction so the engines can divide by its
//! fields without re-checking them.

use crate::error::{VammError, VammResult};
use vamm_config::PrecisionConfig;

/// Validated scale factors and the ratios derived from them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    mark_price: u128,
    peg: u128,
    amm_reserve: u128,
    quote: u128,
    price_spread: u128,
    amm_times_peg_to_quote_ratio: u128,
    amm_to_quote_ratio: u128,
    price_to_peg_ratio: u128,
}

impl Precision {
    /// Scales used by the on-chain clearing house
    pub const DEFAULT: Self = Self {
        mark_price: 10_000_000_000,
        peg: 1_000,
        amm_reserve: 10_000_000_000_000,
        quote: 1_000_000,
        price_spread: 10_000,
        amm_times_peg_to_quote_ratio: 10_000_000_000,
        amm_to_quote_ratio: 10_000_000,
        price_to_peg_ratio: 10_000_000,
    };

    /// Build from raw scales
    ///
    /// Every scale must be a power of ten, and the derived ratios
    /// (reserve×peg/quote, reserve/quote, price/peg) must divide exactly.
    pub fn new(
        mark_price: u128,
        peg: u128,
        amm_reserve: u128,
        quote: u128,
        price_spread: u128,
    ) -> VammResult<Self> {
        for (name, value) in [
            ("mark_price", mark_price),
            ("peg", peg),
            ("amm_reserve", amm_reserve),
            ("quote", quote),
            ("price_spread", price_spread),
        ] {
            if decimals(value).is_none() {
                return Err(VammError::InvalidPrecision(format!(
                    "{} scale {} is not a power of ten",
                    name, value
                )));
            }
        }

        if amm_reserve < quote {
            return Err(VammError::InvalidPrecision(format!(
                "reserve scale {} is finer than quote scale {}",
                amm_reserve, quote
            )));
        }
        if mark_price < peg {
            return Err(VammError::InvalidPrecision(format!(
                "mark price scale {} is finer than peg scale {}",
                mark_price, peg
            )));
        }

        let amm_times_peg = amm_reserve
            .checked_mul(peg)
            .ok_or(VammError::Overflow("reserve × peg scale"))?;

        Ok(Self {
            mark_price,
            peg,
            amm_reserve,
            quote,
            price_spread,
            amm_times_peg_to_quote_ratio: amm_times_peg / quote,
            amm_to_quote_ratio: amm_reserve / quote,
            price_to_peg_ratio: mark_price / peg,
        })
    }

    /// Mark price precision
    #[inline]
    pub fn mark_price(&self) -> u128 {
        self.mark_price
    }

    /// Peg multiplier precision
    #[inline]
    pub fn peg(&self) -> u128 {
        self.peg
    }

    /// AMM reserve precision
    #[inline]
    pub fn amm_reserve(&self) -> u128 {
        self.amm_reserve
    }

    /// Quote asset precision
    #[inline]
    pub fn quote(&self) -> u128 {
        self.quote
    }

    /// Precision of oracle/terminal divergence percentages
    #[inline]
    pub fn price_spread(&self) -> u128 {
        self.price_spread
    }

    /// Converts quote units into peg-adjusted reserve units
    #[inline]
    pub fn amm_times_peg_to_quote_ratio(&self) -> u128 {
        self.amm_times_peg_to_quote_ratio
    }

    #[inline]
    pub fn amm_to_quote_ratio(&self) -> u128 {
        self.amm_to_quote_ratio
    }

    #[inline]
    pub fn price_to_peg_ratio(&self) -> u128 {
        self.price_to_peg_ratio
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<&PrecisionConfig> for Precision {
    type Error = VammError;

    fn try_from(config: &PrecisionConfig) -> VammResult<Self> {
        Self::new(
            u128::from(config.mark_price),
            u128::from(config.peg),
            u128::from(config.amm_reserve),
            u128::from(config.quote),
            u128::from(config.price_spread),
        )
    }
}

/// Number of decimal places a power-of-ten scale represents
pub(crate) fn decimals(scale: u128) -> Option<u32> {
    if scale == 0 {
        return None;
    }
    let mut remaining = scale;
    let mut places = 0;
    while remaining % 10 == 0 {
        remaining /= 10;
        places += 1;
    }
    (remaining == 1).then_some(places)
}
