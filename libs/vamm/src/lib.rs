//! # vAMM Pricing Core - Deterministic Perpetual Market Mathematics
//!
//! ## Purpose
//!
//! Fixed-point pricing and swap simulation for a virtual AMM that backs a
//! perpetual futures market. No real liquidity sits behind the reserves: they
//! exist only to quote prices, and every result must match the on-chain
//! program bit for bit so off-chain previews agree with settlement.
//!
//! ## Integration Points
//!
//! - **Input Sources**: [`Market`] and [`OraclePriceData`] snapshots handed in by the account layer
//! - **Output Destinations**: Order previews, liquidation checks, repeg keepers
//! - **Curves**: Constant product and squared-oracle markets via [`CurveModel`]
//! - **Precision**: Integer fixed point at the scales held by [`Precision`]
//! - **Validation**: Checked arithmetic everywhere; nothing wraps or saturates
//!
//! ## Architecture Role
//!
//! ```text
//! Market snapshot ─> SwapSimulator ─> PriceEngine ─> mark / terminal price
//!                          │
//!                          ├─> TradeBoundsSolver ─> max size to a limit price
//!                          ├─> PositionMath ─> position value and PnL
//!                          └─> RepegCalculator ─> peg cost, budget, validity
//! ```
//!
//! Every component is a small `Copy` value configured with a [`Precision`];
//! none of them hold market state between calls.
//!
//! ## Examples
//!
//! ```rust
//! use vamm::{Amm, Precision, PriceEngine};
//!
//! let amm = Amm::new(1_000_000, 2_000_000, 1_414_213, 1_000);
//! let mark = PriceEngine::new(Precision::default()).calculate_mark_price(&amm)?;
//! assert_eq!(mark, 20_000_000_000);
//! # Ok::<(), vamm::VammError>(())
//! ```

pub mod curve;
pub mod error;
pub mod math;
pub mod position;
pub mod price;
pub mod repeg;
pub mod swap;
pub mod trade_bounds;
pub mod types;

pub use curve::{ConstantProductCurve, Curve, CurveModel, SquaredCurve};
pub use error::{VammError, VammResult};
pub use math::{
    convert_signed_to_decimal, convert_to_decimal, sqrt_floor, sqrt_floor_u256, Precision,
    SafeMath, U192, U256,
};
pub use position::{calculate_pnl, swap_direction_to_close_position, PositionMath};
pub use price::{PriceEngine, NO_LIQUIDITY_PRICE};
pub use repeg::{RepegCalculator, RepegValidity};
pub use swap::{get_swap_direction, SwapSimulator};
pub use trade_bounds::TradeBoundsSolver;
pub use types::{
    Amm, AssetType, Market, OraclePriceData, OracleSource, PositionDirection, SwapDirection,
};

/// Decimal type used for human-readable output
pub use rust_decimal::Decimal;
