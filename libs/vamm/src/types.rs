//! Snapshot types supplied by the account layer
//!
//! These mirror the on-chain market account. The core only reads them; a
//! fresh snapshot is passed into every call.

use serde::{Deserialize, Serialize};

/// Which curve formula governs a market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OracleSource {
    /// Constant product over reserves
    #[default]
    Standard,
    /// Oracle quotes the square of the underlying; price is squared
    PythSquared,
}

/// Whether the input-asset reserve grows or shrinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapDirection {
    Add,
    Remove,
}

/// Which side of the pair an amount is denominated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetType {
    Quote,
    Base,
}

/// Trader's intended exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionDirection {
    #[default]
    Long,
    Short,
}

impl PositionDirection {
    /// Direction that unwinds this one
    pub fn opposite(self) -> Self {
        match self {
            PositionDirection::Long => PositionDirection::Short,
            PositionDirection::Short => PositionDirection::Long,
        }
    }
}

/// Virtual AMM state of one market
///
/// `base_asset_reserve` and `quote_asset_reserve` share reserve precision and
/// `sqrt_k² == base_asset_reserve × quote_asset_reserve` outside a swap.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amm {
    pub base_asset_reserve: u128,
    pub quote_asset_reserve: u128,
    pub sqrt_k: u128,
    pub peg_multiplier: u128,
    #[serde(default)]
    pub oracle_source: OracleSource,

    // Funding and fee accumulators
    #[serde(default)]
    pub cumulative_funding_rate_long: i128,
    #[serde(default)]
    pub cumulative_funding_rate_short: i128,
    #[serde(default)]
    pub last_funding_rate: i128,
    #[serde(default)]
    pub last_funding_rate_ts: i64,
    #[serde(default)]
    pub funding_period: i64,
    #[serde(default)]
    pub last_oracle_price_twap: i128,
    #[serde(default)]
    pub last_mark_price_twap: u128,
    #[serde(default)]
    pub last_mark_price_twap_ts: i64,
    #[serde(default)]
    pub total_fee: u128,
    #[serde(default)]
    pub total_fee_minus_distributions: u128,
}

impl Amm {
    /// Standard-curve AMM with empty accumulators
    pub fn new(
        base_asset_reserve: u128,
        quote_asset_reserve: u128,
        sqrt_k: u128,
        peg_multiplier: u128,
    ) -> Self {
        Self {
            base_asset_reserve,
            quote_asset_reserve,
            sqrt_k,
            peg_multiplier,
            ..Self::default()
        }
    }

    pub fn with_oracle_source(mut self, oracle_source: OracleSource) -> Self {
        self.oracle_source = oracle_source;
        self
    }
}

/// One perpetual market: its AMM plus the net position traded against it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub amm: Amm,
    /// Net position against the AMM; positive is net long
    #[serde(default)]
    pub base_asset_amount: i128,
    #[serde(default)]
    pub base_asset_amount_long: i128,
    #[serde(default)]
    pub base_asset_amount_short: i128,
    #[serde(default)]
    pub open_interest: u128,
}

impl Market {
    pub fn new(amm: Amm, base_asset_amount: i128) -> Self {
        Self {
            amm,
            base_asset_amount,
            ..Self::default()
        }
    }
}

/// Oracle reading handed in by the account layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OraclePriceData {
    /// Price at mark price precision
    pub price: i128,
    /// Confidence interval half-width at mark price precision
    pub confidence: u128,
    /// Slots since the last oracle update
    pub delay: i64,
    pub has_sufficient_number_of_data_points: bool,
}
