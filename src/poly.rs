//! Polynomial arithmetic over a generic [`Field`], and the synthetic-division
//! kernel shared by both systematic RS encoders.
//!
//! Coefficients are stored ascending: index `i` holds the coefficient of
//! `x^i`. This matches the teacher's own convention of indexing by least
//! significant term first (see e.g. `errorcode::galois`'s generator-building
//! loop). The systematic encode step, `synthetic_divide`, instead walks a
//! *descending* (highest-degree-first) buffer, mirroring the teacher's
//! `poly_mod_x_n`/Reed-Solomon generator-division idiom exactly, since that
//! buffer IS the codeword under construction (message followed by the
//! parity placeholder) rather than a freestanding polynomial.

use crate::field::Field;
use alloc::vec;
use alloc::vec::Vec;

/// A polynomial with ascending-degree coefficients over `F`.
///
/// The zero polynomial is represented by an empty coefficient vector.
/// [`Poly::normalize`] trims trailing (high-degree) zero coefficients;
/// most constructors call it, but callers building a polynomial in a
/// fixed-size buffer (e.g. syndrome vectors) can skip it deliberately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly<F: Field> {
    coeffs: Vec<F>,
}

impl<F: Field> Poly<F> {
    /// Build from a coefficient vector, trimming trailing zeros.
    #[must_use]
    pub fn new(coeffs: Vec<F>) -> Self {
        let mut p = Self { coeffs };
        p.normalize();
        p
    }

    /// Build from a coefficient vector without trimming.
    #[must_use]
    pub fn from_raw(coeffs: Vec<F>) -> Self {
        Self { coeffs }
    }

    /// The monic constant polynomial `1`.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![F::ONE],
        }
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    fn normalize(&mut self) {
        while matches!(self.coeffs.last(), Some(c) if c.is_zero()) {
            self.coeffs.pop();
        }
    }

    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    #[must_use]
    pub fn coeffs(&self) -> &[F] {
        &self.coeffs
    }

    #[must_use]
    pub fn coeff(&self, i: usize) -> F {
        self.coeffs.get(i).copied().unwrap_or(F::ZERO)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Evaluate via Horner's method.
    #[must_use]
    pub fn eval(&self, x: F) -> F {
        let mut acc = F::ZERO;
        for &c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    #[must_use]
    pub fn add(&self, rhs: &Self) -> Self {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            out.push(self.coeff(i) + rhs.coeff(i));
        }
        Self::new(out)
    }

    #[must_use]
    pub fn sub(&self, rhs: &Self) -> Self {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            out.push(self.coeff(i) - rhs.coeff(i));
        }
        Self::new(out)
    }

    #[must_use]
    pub fn mul(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }
        let mut out = vec![F::ZERO; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Self::new(out)
    }

    /// Polynomial long division: `self = quotient * divisor + remainder` with
    /// `remainder.degree() < divisor.degree()`. `None` iff `divisor` is the
    /// zero polynomial. This is the crate's `poly_divmod`; [`Poly::rem`] below
    /// is `poly_mod`, its remainder-only half.
    #[must_use]
    pub fn divmod(&self, divisor: &Self) -> Option<(Self, Self)> {
        let divisor_deg = divisor.degree()?;
        let lead_inv = divisor.coeffs[divisor_deg].checked_inv()?;
        let self_deg = match self.degree() {
            Some(d) => d,
            None => return Some((Self::zero(), Self::zero())),
        };
        if self_deg < divisor_deg {
            return Some((Self::zero(), self.clone()));
        }
        let mut remainder = self.coeffs.clone();
        let mut quotient = vec![F::ZERO; self_deg - divisor_deg + 1];
        for i in (0..=self_deg - divisor_deg).rev() {
            let coef = remainder[i + divisor_deg];
            if coef.is_zero() {
                continue;
            }
            let q = coef * lead_inv;
            quotient[i] = q;
            for (j, &d) in divisor.coeffs.iter().enumerate() {
                remainder[i + j] -= q * d;
            }
        }
        Some((Self::new(quotient), Self::new(remainder)))
    }

    /// `self mod divisor`, the remainder half of [`Poly::divmod`].
    #[must_use]
    pub fn rem(&self, divisor: &Self) -> Option<Self> {
        self.divmod(divisor).map(|(_, r)| r)
    }

    /// Multiply by a single monomial `(x - root)`, in place conceptually,
    /// returning the new polynomial. Used to build generator polynomials one
    /// root at a time, the way the teacher's galois generator builder does.
    #[must_use]
    pub fn mul_monic_linear(&self, root: F) -> Self {
        let mut out = vec![F::ZERO; self.coeffs.len() + 1];
        for (j, &c) in self.coeffs.iter().enumerate() {
            out[j] -= c * root;
            out[j + 1] += c;
        }
        Self::new(out)
    }
}

/// Build the monic generator polynomial with roots `root_base^0, root_base^1,
/// ..., root_base^(count-1)`, ascending coefficients, `Poly::coeff(count)`
/// equal to `F::ONE`.
///
/// Grounded in the teacher's `errorcode::galois` generator-building loop,
/// generalized to an arbitrary field and an arbitrary (non-necessarily-255)
/// root count.
#[must_use]
pub fn build_generator<F: Field>(root_base: F, count: usize) -> Poly<F> {
    let mut g = Poly::one();
    let mut root = F::ONE;
    for _ in 0..count {
        g = g.mul_monic_linear(root);
        root = root * root_base;
    }
    g
}

/// Synthetic division of a systematic codeword buffer against a monic
/// generator's non-leading coefficients.
///
/// `buf` holds `message.len() + tail_len` coefficients in **descending**
/// order (index 0 = highest degree term, i.e. the first message byte), with
/// the trailing `tail_len` slots holding the placeholder zeros for the
/// parity. `generator_tail` holds the generator's non-leading coefficients
/// in the same descending convention (`generator_tail.len() == tail_len`).
/// Returns the `tail_len`-long remainder, i.e. the parity to write into
/// `buf`'s tail (already negated so the caller can just copy it in, matching
/// systematic polynomial codes over characteristic-2 fields where "negate"
/// is the identity, and over GF(65537) where it genuinely flips sign).
pub fn synthetic_divide<F: Field>(buf: &[F], generator_tail: &[F]) -> Vec<F> {
    let tail_len = generator_tail.len();
    let mut work = buf.to_vec();
    let steps = work.len().saturating_sub(tail_len);
    for i in 0..steps {
        let coef = work[i];
        if coef.is_zero() {
            continue;
        }
        for (j, &g) in generator_tail.iter().enumerate() {
            work[i + 1 + j] -= g * coef;
        }
    }
    let start = work.len() - tail_len;
    work[start..].iter().map(|&r| F::ZERO - r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Gf256;
    use quickcheck_macros::quickcheck;

    #[test]
    fn eval_matches_hand_computation() {
        // p(x) = 1 + 2x + 3x^2 over GF256 (xor-add)
        let p = Poly::new(vec![Gf256(1), Gf256(2), Gf256(3)]);
        let x = Gf256(5);
        let expected = Gf256(1) + Gf256(2) * x + Gf256(3) * x * x;
        assert_eq!(p.eval(x), expected);
    }

    #[test]
    fn mul_monic_linear_builds_expected_degree() {
        let g = build_generator(Gf256(2), 4);
        assert_eq!(g.degree(), Some(4));
        assert_eq!(g.coeff(4), Gf256::ONE);
    }

    #[test]
    fn generator_vanishes_at_its_roots() {
        let root_base = Gf256(2);
        let count = 6;
        let g = build_generator(root_base, count);
        let mut root = Gf256::ONE;
        for _ in 0..count {
            assert_eq!(g.eval(root), Gf256::ZERO);
            root = root * root_base;
        }
    }

    #[test]
    fn add_sub_are_inverse() {
        let a = Poly::new(vec![Gf256(1), Gf256(2), Gf256(3)]);
        let b = Poly::new(vec![Gf256(9), Gf256(8)]);
        assert_eq!(a.add(&b).sub(&b), a);
    }

    #[test]
    fn divmod_by_zero_poly_is_none() {
        let a = Poly::new(vec![Gf256(1), Gf256(2)]);
        assert_eq!(a.divmod(&Poly::zero()), None);
    }

    #[test]
    fn divmod_degree_bound_matches_dividend_below_divisor_degree() {
        let a = Poly::new(vec![Gf256(7)]);
        let b = Poly::new(vec![Gf256(1), Gf256(1), Gf256(1)]); // degree 2
        let (q, r) = a.divmod(&b).unwrap();
        assert!(q.is_zero());
        assert_eq!(r, a);
    }

    /// P-POLY-1: `a = (a div b) * b + (a mod b)` for any `a` and non-zero
    /// `b`.
    #[quickcheck]
    fn prop_poly_1_divmod_reconstructs_dividend(a: Vec<Gf256>, b: Vec<Gf256>) -> bool {
        let a = Poly::new(a);
        let b = Poly::new(b);
        if b.is_zero() {
            return true;
        }
        let Some((q, r)) = a.divmod(&b) else {
            return false;
        };
        r.degree().map_or(true, |rd| rd < b.degree().unwrap()) && q.mul(&b).add(&r) == a
    }

    /// P-POLY-2: `poly_mod_x_n(a, b_tail) = (a * x^n) mod (x^n + b_tail)`,
    /// checked by running both the crate's synthetic-division kernel
    /// ([`synthetic_divide`]) and the general-purpose [`Poly::divmod`]
    /// against the same systematic codeword shape and comparing results.
    /// `synthetic_divide`'s buffers are in descending order (index 0 =
    /// highest degree, i.e. a codeword's first message byte); `Poly`'s are
    /// ascending, so the message is reversed going from one convention to
    /// the other.
    fn check_poly_mod_x_n_equivalence(message: &[Gf256], tail_len: usize) {
        let generator = build_generator(Gf256(2), tail_len);
        let generator_tail: Vec<Gf256> = generator.coeffs()[..tail_len]
            .iter()
            .rev()
            .copied()
            .collect();

        // descending buf: message followed by tail_len zero placeholders
        let mut descending_buf = message.to_vec();
        descending_buf.extend(core::iter::repeat(Gf256::ZERO).take(tail_len));
        let parity_descending = synthetic_divide(&descending_buf, &generator_tail);

        // ascending equivalent: M(x) = reverse(message), shifted by x^tail_len
        let m_ascending: Vec<Gf256> = message.iter().rev().copied().collect();
        let mut shifted = vec![Gf256::ZERO; tail_len];
        shifted.extend(m_ascending);
        let shifted = Poly::new(shifted);
        let (_, remainder) = shifted.divmod(&generator).unwrap();

        let mut remainder_ascending = vec![Gf256::ZERO; tail_len];
        for (i, &c) in remainder.coeffs().iter().enumerate() {
            remainder_ascending[i] = c;
        }
        let remainder_descending: Vec<Gf256> = remainder_ascending.into_iter().rev().collect();
        assert_eq!(remainder_descending, parity_descending);
    }

    #[test]
    fn poly_mod_x_n_matches_general_divmod() {
        check_poly_mod_x_n_equivalence(&[Gf256(1), Gf256(2), Gf256(3), Gf256(4), Gf256(5)], 4);
        check_poly_mod_x_n_equivalence(&[Gf256(0), Gf256(0), Gf256(9)], 2);
        check_poly_mod_x_n_equivalence(&[Gf256(255)], 1);
        check_poly_mod_x_n_equivalence(&[Gf256(1); 8], 6);
    }

    #[quickcheck]
    fn prop_poly_2_poly_mod_x_n_matches_general_divmod(message: Vec<Gf256>, tail_len: u8) -> bool {
        let tail_len = (tail_len as usize) % 8 + 1;
        if message.is_empty() || message.len() > 16 {
            return true;
        }
        check_poly_mod_x_n_equivalence(&message, tail_len);
        true
    }
}
