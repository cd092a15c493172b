//! Wide unsigned integer for intermediate products

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use crate::error::{VammError, VammResult};
use uint::construct_uint;

construct_uint! {
    /// 192-bit unsigned integer.
    pub struct U192(3);
}

construct_uint! {
    /// 256-bit unsigned integer, for products of a squared reserve.
    pub struct U256(4);
}

macro_rules! impl_try_to_u128 {
    ($ty:ident) => {
        impl $ty {
            /// Narrow back to `u128`, failing instead of truncating
            pub fn try_to_u128(self) -> VammResult<u128> {
                if self > $ty::from(u128::MAX) {
                    return Err(VammError::Conversion {
                        value: self.to_string(),
                        target: "u128",
                    });
                }
                Ok(self.as_u128())
            }
        }
    };
}

impl_try_to_u128!(U192);
impl_try_to_u128!(U256);
