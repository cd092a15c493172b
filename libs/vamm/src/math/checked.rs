//! Checked arithmetic trait
//!
//! [`SafeMath`] turns every overflow, underflow and zero divisor into a
//! [`VammError`] so corrupted account state surfaces as an error instead of
//! a wrapped number.
//!
//! # Examples
//!
//! ```
//! use vamm::math::SafeMath;
//!
//! assert_eq!(7u128.safe_div(2).unwrap(), 3);
//! assert!(1u128.safe_sub(2).is_err());
//! ```

use super::{U192, U256};
use crate::error::{VammError, VammResult};

/// Fallible arithmetic with typed errors
///
/// # Contract
///
/// - **No panics**: every error condition produces `Err`.
/// - **No saturation**: errors propagate instead.
/// - `safe_div` floors for unsigned types and truncates toward zero for
///   signed types, matching `checked_div`.
pub trait SafeMath: Sized + Copy {
    fn safe_add(self, rhs: Self) -> VammResult<Self>;
    fn safe_sub(self, rhs: Self) -> VammResult<Self>;
    fn safe_mul(self, rhs: Self) -> VammResult<Self>;
    fn safe_div(self, rhs: Self) -> VammResult<Self>;
}

macro_rules! impl_safe_math {
    ($ty:ty, $zero:expr, $sub_err:ident) => {
        impl SafeMath for $ty {
            #[inline]
            fn safe_add(self, rhs: Self) -> VammResult<Self> {
                self.checked_add(rhs)
                    .ok_or(VammError::Overflow(concat!(stringify!($ty), " addition")))
            }

            #[inline]
            fn safe_sub(self, rhs: Self) -> VammResult<Self> {
                self.checked_sub(rhs)
                    .ok_or(VammError::$sub_err(concat!(stringify!($ty), " subtraction")))
            }

            #[inline]
            fn safe_mul(self, rhs: Self) -> VammResult<Self> {
                self.checked_mul(rhs)
                    .ok_or(VammError::Overflow(concat!(stringify!($ty), " multiplication")))
            }

            #[inline]
            fn safe_div(self, rhs: Self) -> VammResult<Self> {
                if rhs == $zero {
                    return Err(VammError::DivisionByZero(concat!(stringify!($ty), " division")));
                }
                self.checked_div(rhs)
                    .ok_or(VammError::Overflow(concat!(stringify!($ty), " division")))
            }
        }
    };
}

impl_safe_math!(u128, 0, Underflow);
impl_safe_math!(i128, 0, Overflow);
impl_safe_math!(U192, U192::zero(), Underflow);
impl_safe_math!(U256, U256::zero(), Underflow);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_division_floors() {
        assert_eq!(9u128.safe_div(4).unwrap(), 2);
        assert_eq!(U192::from(9u8).safe_div(U192::from(4u8)).unwrap(), U192::from(2u8));
    }

    #[test]
    fn test_signed_division_truncates_toward_zero() {
        assert_eq!((-9i128).safe_div(4).unwrap(), -2);
        assert_eq!(9i128.safe_div(-4).unwrap(), -2);
    }

    #[test]
    fn test_division_by_zero_is_error() {
        assert!(matches!(1u128.safe_div(0), Err(VammError::DivisionByZero(_))));
        assert!(matches!(1i128.safe_div(0), Err(VammError::DivisionByZero(_))));
        assert!(matches!(
            U192::one().safe_div(U192::zero()),
            Err(VammError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_overflow_and_underflow() {
        assert!(matches!(u128::MAX.safe_add(1), Err(VammError::Overflow(_))));
        assert!(matches!(0u128.safe_sub(1), Err(VammError::Underflow(_))));
        assert!(matches!(i128::MIN.safe_sub(1), Err(VammError::Overflow(_))));
        assert!(matches!(i128::MIN.safe_div(-1), Err(VammError::Overflow(_))));
        assert!(matches!(U192::MAX.safe_mul(U192::from(2u8)), Err(VammError::Overflow(_))));
    }
}
