//! Integer square root

use super::{U192, U256};

macro_rules! newton_sqrt_floor {
    ($name:ident, $ty:ident) => {
        /// Exact `floor(sqrt(n))` by Newton iteration
        ///
        /// The iteration starts at `ceil(n / 2)`, which is never below the root for
        /// `n >= 1`, and stops as soon as the estimate stops decreasing. The result
        /// is at the square root of the input's scale: a value at reserve precision
        /// squared yields a root at reserve precision.
        pub fn $name(n: $ty) -> $ty {
            let two = $ty::from(2u8);
            let mut x = n;
            let mut y = n / two + n % two;
            while y < x {
                x = y;
                y = (x + n / x) / two;
            }
            x
        }
    };
}

newton_sqrt_floor!(sqrt_floor, U192);
newton_sqrt_floor!(sqrt_floor_u256, U256);
