//! Classical byte-oriented Reed-Solomon codec over [`Gf256`].
//!
//! Construction, encode, and decode directly generalize the teacher's
//! `errorcode` module (`galois.rs`'s table-building, `correction.rs`'s
//! syndrome/Hankel-matrix sketch, `decoding/pgz.rs`'s completed decoder) from
//! a Data-Matrix-fixed `(poly1, primitive, err_len)` to a caller-configured
//! `(block_len, ecc_len)` pair, with the spec's `fcr = 0` convention (roots
//! starting at `α⁰`) rather than the teacher's `fcr = 1`.

use crate::error::{FecError, Result};
use crate::field::{Field, Gf256};
use crate::linalg;
use crate::poly::{build_generator, synthetic_divide, Poly};
use alloc::vec;
use alloc::vec::Vec;
use arrayvec::ArrayVec;

/// Upper bound on the number of correctable errors this codec ever searches
/// for: `ecc_len <= 254` (the tightest real constraint is `block_len <= 255`),
/// so `ecc_len / 2 <= 127`. Chien search's hit lists are bounded by this
/// count and known at construction time, so they live on the stack via
/// [`arrayvec::ArrayVec`] instead of the heap.
const MAX_ERRORS: usize = 127;

/// A configured classical Reed-Solomon codec instance.
///
/// Immutable after construction except [`Rs256::set_block_len`], which only
/// changes the accepted buffer length for subsequent calls — it does not
/// recompute `ecc_len`, the generator, or the generator roots. Callers must
/// not mutate one instance concurrently with an active encode/decode on it
/// (see the crate's concurrency notes); sharing an instance across threads
/// for non-overlapping calls is fine since nothing else is mutable.
#[derive(Clone, Debug)]
pub struct Rs256 {
    block_len: usize,
    ecc_len: usize,
    generator_tail: Vec<Gf256>,
    generator_roots: Vec<Gf256>,
}

impl Rs256 {
    /// Build a codec for `block_len` total bytes per block, the last
    /// `ecc_len` of which are parity.
    pub fn new(block_len: usize, ecc_len: usize) -> Result<Self> {
        if !(2..=255).contains(&block_len) {
            return Err(FecError::InvalidConfig("block_len must be in [2, 255]"));
        }
        if ecc_len == 0 || ecc_len >= block_len {
            return Err(FecError::InvalidConfig(
                "ecc_len must be in [1, block_len - 1]",
            ));
        }
        let generator_roots: Vec<Gf256> = (0..ecc_len as u32).map(Gf256::primitive_power).collect();
        let generator = build_generator(Gf256::primitive_power(1), ecc_len);
        let generator_tail: Vec<Gf256> = generator.coeffs()[..ecc_len]
            .iter()
            .rev()
            .copied()
            .collect();
        Ok(Self {
            block_len,
            ecc_len,
            generator_tail,
            generator_roots,
        })
    }

    #[inline]
    #[must_use]
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    #[inline]
    #[must_use]
    pub fn ecc_len(&self) -> usize {
        self.ecc_len
    }

    #[inline]
    #[must_use]
    pub fn message_len(&self) -> usize {
        self.block_len - self.ecc_len
    }

    /// Change the accepted buffer length for subsequent calls. Does not
    /// touch `ecc_len`, the generator, or the generator roots.
    pub fn set_block_len(&mut self, block_len: usize) -> Result<()> {
        if block_len <= self.ecc_len || block_len > 255 {
            return Err(FecError::InvalidConfig(
                "block_len must exceed ecc_len and be at most 255",
            ));
        }
        self.block_len = block_len;
        Ok(())
    }

    fn check_buf(&self, buf: &[u8]) -> Result<()> {
        if buf.len() != self.block_len {
            return Err(FecError::BufferSize {
                expected: self.block_len,
                actual: buf.len(),
            });
        }
        Ok(())
    }

    /// Encode `buf` in place: the last `ecc_len` bytes (which must be zero
    /// on entry) are overwritten with the computed parity.
    pub fn encode(&self, buf: &mut [u8]) -> Result<()> {
        self.check_buf(buf)?;
        let message_len = self.message_len();
        if buf[message_len..].iter().any(|&b| b != 0) {
            return Err(FecError::InputRange(
                "parity region must be zero before encode",
            ));
        }
        let descending: Vec<Gf256> = buf.iter().map(|&b| Gf256(b)).collect();
        let parity = synthetic_divide(&descending, &self.generator_tail);
        for (dst, p) in buf[message_len..].iter_mut().zip(parity) {
            *dst = p.0;
        }
        Ok(())
    }

    /// Non-mutating variant of [`Rs256::encode`].
    pub fn encode_owned(&self, message: &[u8]) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.block_len];
        if message.len() != self.message_len() {
            return Err(FecError::BufferSize {
                expected: self.message_len(),
                actual: message.len(),
            });
        }
        buf[..message.len()].copy_from_slice(message);
        self.encode(&mut buf)?;
        Ok(buf)
    }

    fn syndromes(&self, buf: &[u8]) -> (Vec<Gf256>, bool) {
        let poly = Poly::from_raw(buf.iter().rev().map(|&b| Gf256(b)).collect());
        let mut have_err = false;
        let synd: Vec<Gf256> = self
            .generator_roots
            .iter()
            .map(|&root| {
                let v = poly.eval(root);
                have_err |= !v.is_zero();
                v
            })
            .collect();
        (synd, have_err)
    }

    /// Locate and evaluate errors without mutating `buf`.
    ///
    /// Returns a list of `(position, magnitude)` pairs. Positions index into
    /// `buf` directly (`0` is the first message byte).
    pub fn find_errors(&self, buf: &[u8]) -> Result<Vec<(usize, u8)>> {
        self.check_buf(buf)?;
        let (synd, have_err) = self.syndromes(buf);
        if !have_err {
            return Ok(Vec::new());
        }
        let n = buf.len();
        let max_v = self.ecc_len / 2;
        let coeff = find_error_locator(&synd, max_v).ok_or(FecError::DecodeFailed)?;
        let v = coeff.len() - 1;

        // Chien search scans the whole GF(256) multiplicative group (order
        // 255), not just `0..n` — a shortened codeword's error locations
        // still live among the full set of field elements, and restricting
        // the search to `0..n` would silently miss roots outside that
        // window (see the teacher's own `chien_search`, `for i in 0..=255`).
        //
        // A root at `x = primitive_power(i)` names an error locator value
        // `X_k = 1/x`; with this crate's descending buffer convention
        // (`buf[p]` is the coefficient of `x^(n-1-p)`), `X_k = β^(n-1-p)`, so
        // `i ≡ p - n + 1 (mod 255)` and the buffer position is recovered as
        // `p ≡ i + n - 1 (mod 255)`. A candidate root whose recovered
        // position falls outside `0..n` is extraneous — the codeword was
        // shortened and that position was never part of `buf`.
        let mut positions: ArrayVec<usize, MAX_ERRORS> = ArrayVec::new();
        let mut xs: ArrayVec<Gf256, MAX_ERRORS> = ArrayVec::new();
        for i in 0..255u32 {
            let x = Gf256::primitive_power(i);
            let val = eval_reversed(&coeff, x);
            if val.is_zero() {
                let pos = (i as usize + n - 1) % 255;
                if pos >= n {
                    return Err(FecError::DecodeFailed);
                }
                positions
                    .try_push(pos)
                    .map_err(|_| FecError::DecodeFailed)?;
                xs.try_push(x.checked_inv().ok_or(FecError::DecodeFailed)?)
                    .map_err(|_| FecError::DecodeFailed)?;
            }
        }
        if positions.len() != v {
            return Err(FecError::DecodeFailed);
        }

        let vals = find_error_values(&xs, &synd[..v]);
        Ok(positions
            .into_iter()
            .zip(vals.iter().map(|g| g.0))
            .collect())
    }

    /// Decode `buf` in place, applying any found corrections.
    ///
    /// Returns `Ok(())` if the word was already valid or was corrected to a
    /// valid codeword; `Err(FecError::DecodeFailed)` if no consistent
    /// correction exists (`buf` is left unmodified in that case).
    pub fn decode(&self, buf: &mut [u8]) -> Result<()> {
        let errors = self.find_errors(buf)?;
        for (pos, err) in errors {
            buf[pos] ^= err;
        }
        Ok(())
    }

    /// Non-mutating variant of [`Rs256::decode`].
    pub fn decode_owned(&self, buf: &[u8]) -> Result<Vec<u8>> {
        let mut out = buf.to_vec();
        self.decode(&mut out)?;
        Ok(out)
    }
}

/// Evaluate the "reversed" polynomial used by Chien search: coefficients
/// taken highest-degree first, so a root of this evaluated function at `x`
/// corresponds to a root of the locator at `1/x`.
fn eval_reversed(coeff: &[Gf256], x: Gf256) -> Gf256 {
    let mut v = Gf256::ZERO;
    let mut xp = Gf256::ONE;
    for &g in coeff.iter().rev() {
        v += g * xp;
        xp = xp * x;
    }
    v
}

fn find_error_locator(synd: &[Gf256], max_v: usize) -> Option<Vec<Gf256>> {
    for v in (1..=max_v).rev() {
        let mut matrix = vec![Gf256::ZERO; v * v];
        for i in 0..v {
            for j in 0..v {
                matrix[i * v + j] = synd[i + j];
            }
        }
        let rhs: Vec<Gf256> = synd[v..2 * v].iter().map(|&s| Gf256::ZERO - s).collect();
        if let Some(mut sol) = linalg::solve(matrix, rhs, v) {
            sol.push(Gf256::ONE);
            return Some(sol);
        }
    }
    None
}

/// Björck-Pereyra solve for the Vandermonde magnitude system, `fcr = 0`
/// variant (no trailing per-row division — see `rs256` vs the teacher's
/// `fcr = 1` `find_error_values_bp` in `errorcode/decoding/pgz.rs`, which
/// divides once more by `x[i]` at the end to shift the root convention).
fn find_error_values(xs: &[Gf256], syn: &[Gf256]) -> Vec<Gf256> {
    let e = xs.len();
    let mut syn = syn.to_vec();
    for k in 0..e.saturating_sub(1) {
        for j in (k + 1..e).rev() {
            let tmp = syn[j - 1];
            syn[j] -= xs[k] * tmp;
        }
    }
    for k in (0..e.saturating_sub(1)).rev() {
        for j in (k + 1)..e {
            syn[j] = syn[j] / (xs[j] - xs[j - k - 1]);
        }
        for j in k..e - 1 {
            let tmp = syn[j + 1];
            syn[j] += tmp;
        }
    }
    syn
}
