//! Radix-2 Number-Theoretic Transform over [`Gf65537`].
//!
//! Forward transform is decimation-in-frequency (Gentleman-Sande),
//! natural-order input / bit-reversed-order output. Inverse is
//! decimation-in-time (Cooley-Tukey), bit-reversed-order input / natural-
//! order output. Run one immediately after the other and no explicit
//! bit-reversal pass is needed in between; [`ntt_natural`] and
//! [`intt_natural`] below add that pass for callers that need a natural-
//! order result on its own.

use crate::error::{FecError, Result};
use crate::field::{Field, Gf65537};
use alloc::vec;
use alloc::vec::Vec;

/// Reverse the low `n.trailing_zeros()` bits of `i`.
#[must_use]
pub fn rbo(n: usize, i: usize) -> usize {
    let bits = n.trailing_zeros();
    let mut r = 0usize;
    let mut i = i;
    for _ in 0..bits {
        r = (r << 1) | (i & 1);
        i >>= 1;
    }
    r
}

fn check_len(n: usize) -> Result<()> {
    if n == 0 || !n.is_power_of_two() || n > 65536 {
        return Err(FecError::InvalidConfig(
            "NTT length must be a power of two dividing 2^16",
        ));
    }
    Ok(())
}

/// In-place forward NTT: natural-order input, bit-reversed-order output.
pub fn ntt_dif(a: &mut [Gf65537], w: Gf65537) -> Result<()> {
    let n = a.len();
    check_len(n)?;
    let mut stride = n / 2;
    while stride >= 1 {
        let span = n / (2 * stride);
        let mut s = 0;
        while s < n {
            for i in 0..stride {
                let wi = w.pow((i * span) as u32);
                let x = a[s + i];
                let y = a[s + i + stride];
                a[s + i] = x + y;
                a[s + i + stride] = (x - y) * wi;
            }
            s += 2 * stride;
        }
        stride /= 2;
    }
    Ok(())
}

/// In-place inverse NTT: bit-reversed-order input, natural-order output.
pub fn intt_dit(a: &mut [Gf65537], w: Gf65537) -> Result<()> {
    let n = a.len();
    check_len(n)?;
    let w_inv = w
        .checked_inv()
        .ok_or(FecError::InvalidConfig("NTT root of unity must be nonzero"))?;
    let mut stride = 1;
    while stride < n {
        let span = n / (2 * stride);
        let mut s = 0;
        while s < n {
            for i in 0..stride {
                let wi = w_inv.pow((i * span) as u32);
                let x = a[s + i];
                let y = a[s + i + stride] * wi;
                a[s + i] = x + y;
                a[s + i + stride] = x - y;
            }
            s += 2 * stride;
        }
        stride *= 2;
    }
    let n_inv = Gf65537::new(n as u32)
        .checked_inv()
        .ok_or(FecError::InvalidConfig("NTT length not invertible mod p"))?;
    for v in a.iter_mut() {
        *v = *v * n_inv;
    }
    Ok(())
}

/// Apply the `(i, rbo(n, i))` swap permutation in place.
pub fn bit_reverse_permute<T: Copy>(a: &mut [T]) {
    let n = a.len();
    for i in 0..n {
        let j = rbo(n, i);
        if i < j {
            a.swap(i, j);
        }
    }
}

/// Forward NTT with a natural-order result (adds an explicit bit-reversal
/// pass after [`ntt_dif`]).
pub fn ntt_natural(a: &[Gf65537], w: Gf65537) -> Result<Vec<Gf65537>> {
    let mut out = a.to_vec();
    ntt_dif(&mut out, w)?;
    bit_reverse_permute(&mut out);
    Ok(out)
}

/// Inverse NTT from a natural-order input (adds a leading bit-reversal pass
/// before [`intt_dit`]).
pub fn intt_natural(a: &[Gf65537], w: Gf65537) -> Result<Vec<Gf65537>> {
    let mut out = a.to_vec();
    bit_reverse_permute(&mut out);
    intt_dit(&mut out, w)?;
    Ok(out)
}
