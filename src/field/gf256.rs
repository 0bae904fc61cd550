//! GF(2⁸) — the binary extension field used by the byte-oriented RS codec.
//!
//! An element is a byte; its bits are the coefficients of a degree ≤7
//! polynomial over GF(2) with the least significant bit the coefficient of 1.
//! Multiplication is carryless polynomial multiplication reduced modulo a
//! fixed irreducible degree-8 polynomial (`poly1`). With the crate's default
//! `poly1 = 0x11d` and `primitive = 2`, the powers of the primitive element
//! run through every non-zero byte exactly once before repeating, so every
//! non-zero element can be named by its discrete log. `exp`/`log` are the two
//! lookup tables that make every field operation a handful of array reads.

use super::Field;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

const FIELD_SIZE: usize = 256;
const GROUP_ORDER: usize = 255;

/// Precompute `exp`/`log` for a given irreducible polynomial and primitive
/// element. `exp` is duplicated to length `2 * GROUP_ORDER` so that
/// `exp[log(a) + log(b)]` never needs an explicit `% 255`.
const fn build_tables(poly1: u16, primitive: u8) -> ([u8; 2 * GROUP_ORDER], [u8; FIELD_SIZE]) {
    let mut exp = [0u8; 2 * GROUP_ORDER];
    let mut log = [0u8; FIELD_SIZE];
    let mut x: u16 = 1;
    let mut i = 0usize;
    while i < GROUP_ORDER {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x = carryless_mul(x as u8, primitive, poly1);
        i += 1;
    }
    // duplicate so indices in [0, 2*510) are safe without a modulo
    let mut j = 0usize;
    while j < GROUP_ORDER {
        exp[GROUP_ORDER + j] = exp[j];
        j += 1;
    }
    (exp, log)
}

/// Carryless (XOR) polynomial multiplication of `a` by `b`, reduced modulo
/// the degree-8 polynomial `poly1` (given in its 9-bit integer form).
const fn carryless_mul(a: u8, b: u8, poly1: u16) -> u8 {
    let mut p: u16 = 0;
    let mut a = a as u16;
    let mut b = b;
    let mut i = 0;
    while i < 8 {
        if b & 1 != 0 {
            p ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= poly1;
        }
        b >>= 1;
        i += 1;
    }
    (p & 0xff) as u8
}

const DEFAULT_POLY1: u16 = 0x11d;
const DEFAULT_PRIMITIVE: u8 = 2;
const TABLES: ([u8; 2 * GROUP_ORDER], [u8; FIELD_SIZE]) =
    build_tables(DEFAULT_POLY1, DEFAULT_PRIMITIVE);
const EXP: [u8; 2 * GROUP_ORDER] = TABLES.0;
const LOG: [u8; FIELD_SIZE] = TABLES.1;

/// A GF(256) field element, using the crate's default irreducible polynomial
/// `0x11d` and primitive element `2`.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Gf256(pub u8);

impl Gf256 {
    /// The irreducible polynomial this build's tables were generated from.
    #[inline]
    #[must_use]
    pub const fn poly1() -> u16 {
        DEFAULT_POLY1
    }

    /// The primitive element this build's tables were generated from.
    #[inline]
    #[must_use]
    pub const fn primitive() -> u8 {
        DEFAULT_PRIMITIVE
    }

    /// `primitive^i`, wrapping at the group order (255).
    #[inline]
    #[must_use]
    pub fn primitive_power(i: u32) -> Self {
        Self(EXP[(i as usize) % GROUP_ORDER])
    }

    /// Discrete log of a non-zero element, in `0..255`.
    #[must_use]
    pub fn log(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(LOG[self.0 as usize])
        }
    }

    /// Validate that `poly1`/`primitive` would reproduce this table, i.e.
    /// that `primitive` really has multiplicative order 255 modulo `poly1`.
    /// Only the crate defaults are wired up as const tables, but constructors
    /// still check any caller-supplied pair against this condition so a
    /// mismatched request surfaces as `InvalidConfig` rather than silently
    /// using the defaults.
    #[must_use]
    pub fn is_valid_generator(poly1: u16, primitive: u8) -> bool {
        if poly1 < 0x100 || poly1 > 0x1ff || primitive < 2 {
            return false;
        }
        let mut seen = [false; FIELD_SIZE];
        let mut x: u16 = 1;
        let mut count = 0usize;
        loop {
            if x == 0 || seen[x as usize] {
                break;
            }
            seen[x as usize] = true;
            count += 1;
            x = carryless_mul(x as u8, primitive, poly1) as u16;
            if count > GROUP_ORDER {
                return false;
            }
        }
        count == GROUP_ORDER && x == 1
    }
}

impl core::fmt::Debug for Gf256 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Gf256({})", self.0)
    }
}

impl Add for Gf256 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for Gf256 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Sub for Gf256 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        // addition is its own inverse in characteristic 2
        self + rhs
    }
}

impl SubAssign for Gf256 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Neg for Gf256 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self
    }
}

impl Mul for Gf256 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return Self(0);
        }
        let i = LOG[self.0 as usize] as usize + LOG[rhs.0 as usize] as usize;
        Self(EXP[i])
    }
}

impl Div for Gf256 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.checked_div(rhs).expect("division by zero in Gf256")
    }
}

impl Field for Gf256 {
    const ZERO: Self = Gf256(0);
    const ONE: Self = Gf256(1);

    fn pow(self, exp: u32) -> Self {
        if exp == 0 {
            return Self::ONE;
        }
        match self.log() {
            None => Self::ZERO,
            Some(l) => Self::primitive_power((l as u32).wrapping_mul(exp)),
        }
    }

    fn checked_inv(self) -> Option<Self> {
        let l = self.log()?;
        Some(Self::primitive_power(GROUP_ORDER as u32 - l as u32))
    }

    fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.0 == 0 {
            return None;
        }
        if self.0 == 0 {
            return Some(Self(0));
        }
        let la = LOG[self.0 as usize] as i32;
        let lb = LOG[rhs.0 as usize] as i32;
        let mut i = la - lb;
        if i < 0 {
            i += GROUP_ORDER as i32;
        }
        Some(Self(EXP[i as usize]))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Gf256 {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Gf256(u8::arbitrary(g))
    }
}
