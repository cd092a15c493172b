//! Fixed-point arithmetic for vAMM calculations
//!
//! Every quantity is an integer at a known scale ([`Precision`]). Division is
//! always floor division on unsigned values and truncation toward zero on
//! signed ones, reproducing the on-chain program bit for bit. Intermediates
//! that multiply reserves by scales and pegs are widened to [`U192`].

mod bn;
mod checked;
mod display;
mod precision;
mod sqrt;

pub use bn::{U192, U256};
pub use checked::SafeMath;
pub use display::{convert_signed_to_decimal, convert_to_decimal};
pub use precision::Precision;
pub use sqrt::{sqrt_floor, sqrt_floor_u256};
