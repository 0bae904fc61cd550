//! Finite field arithmetic, generalized just enough to share polynomial code
//! between the two concrete fields this crate implements.
//!
//! There is no dynamic field identity anywhere: `Gf256` and `Gf65537` are
//! distinct, unrelated types, and a codec instance is generic over one or the
//! other at the type level. [`Field`] is sealed — callers cannot add a third
//! implementor, because a third field is explicitly out of scope (see the
//! crate's Non-goals).

mod gf256;
mod gf65537;

pub use gf256::Gf256;
pub use gf65537::Gf65537;

use crate::error::{FecError, Result};
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

mod sealed {
    pub trait Sealed {}
}

/// Shared arithmetic surface of [`Gf256`] and [`Gf65537`].
///
/// Addition/subtraction/multiplication/negation are total; [`Field::div`]
/// and [`Field::inv`] are the only operations that can fail (division by
/// zero), surfaced at the public API boundary as
/// [`crate::error::FecError::DivisionByZero`] rather than a panic. The
/// `core::ops::Div` impls each concrete field carries, and
/// [`Field::checked_div`]/[`Field::checked_inv`] below, remain available for
/// internal hot loops that already know the divisor is non-zero.
pub trait Field:
    sealed::Sealed
    + Copy
    + Clone
    + PartialEq
    + Eq
    + Default
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Div<Output = Self>
    + core::fmt::Debug
{
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;

    /// Raise to a non-negative integer power by square-and-multiply.
    fn pow(self, exp: u32) -> Self;

    /// Multiplicative inverse, or `None` for zero.
    fn checked_inv(self) -> Option<Self>;

    /// `a / b`, or `None` if `b` is zero.
    fn checked_div(self, rhs: Self) -> Option<Self>;

    /// `true` iff this is the additive identity.
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Multiplicative inverse, surfacing [`FecError::DivisionByZero`] for
    /// zero rather than panicking. This is the public, fallible counterpart
    /// to the `core::ops::Div` impl each concrete field carries (which
    /// panics on a zero divisor, matching the operator's inherent total
    /// signature) and to [`Field::checked_inv`] (which internal callers that
    /// already know the divisor is non-zero use directly). Named `try_inv`
    /// rather than `inv` so it cannot collide with a future `core::ops`-style
    /// inherent method on either concrete field.
    fn try_inv(self) -> Result<Self> {
        self.checked_inv().ok_or(FecError::DivisionByZero)
    }

    /// `a / b`, surfacing [`FecError::DivisionByZero`] for `b == 0` rather
    /// than panicking. See [`Field::try_inv`]; named `try_div` to avoid
    /// colliding with the `core::ops::Div::div` this same type implements.
    fn try_div(self, rhs: Self) -> Result<Self> {
        self.checked_div(rhs).ok_or(FecError::DivisionByZero)
    }
}

impl sealed::Sealed for Gf256 {}
impl sealed::Sealed for Gf65537 {}
