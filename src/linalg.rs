//! Generic linear system solver shared by both RS decoders' locator and
//! magnitude steps.
//!
//! Grounded in the teacher's row-major `solve` (`errorcode/correction.rs`),
//! generalized from `GF` to any [`Field`]. Gaussian elimination with partial
//! pivoting (first non-zero pivot in column order, not largest-magnitude —
//! finite fields have no notion of magnitude), forward elimination to
//! triangular form, then back-substitution.

use crate::field::Field;
use alloc::vec;
use alloc::vec::Vec;

/// Solve `mat * x = b` for `x`, where `mat` is `n x n` in row-major order.
///
/// Returns `None` if the matrix is singular (no solution, or the system is
/// under-determined). `mat` and `b` are consumed by value since both are
/// mutated in place during elimination.
#[must_use]
pub fn solve<F: Field>(mut mat: Vec<F>, mut b: Vec<F>, n: usize) -> Option<Vec<F>> {
    debug_assert_eq!(mat.len(), n * n);
    debug_assert_eq!(b.len(), n);
    let c = |i: usize, j: usize| i * n + j;

    for i in 0..n {
        let pivot_row = (i..n).find(|&k| !mat[c(k, i)].is_zero())?;
        if pivot_row != i {
            for j in 0..n {
                mat.swap(c(i, j), c(pivot_row, j));
            }
            b.swap(i, pivot_row);
        }
        let pivot_inv = mat[c(i, i)].checked_inv()?;
        for k in (i + 1)..n {
            let factor = mat[c(k, i)] * pivot_inv;
            if factor.is_zero() {
                continue;
            }
            for j in i..n {
                mat[c(k, j)] = mat[c(k, j)] - factor * mat[c(i, j)];
            }
            b[k] = b[k] - factor * b[i];
        }
    }

    if mat[c(n - 1, n - 1)].is_zero() {
        return None;
    }

    let mut x = vec![F::ZERO; n];
    for i in (0..n).rev() {
        let mut s = b[i];
        for j in (i + 1)..n {
            s = s - mat[c(i, j)] * x[j];
        }
        x[i] = s.checked_div(mat[c(i, i)])?;
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Gf256;

    #[test]
    fn solve_1x1() {
        let x = solve(vec![Gf256(5)], vec![Gf256(88)], 1).unwrap();
        assert_eq!(x, vec![Gf256(88) / Gf256(5)]);
    }

    #[test]
    fn solve_2x2() {
        let mat = vec![Gf256(2), Gf256(1), Gf256(5), Gf256(2)];
        let b = vec![Gf256(56), Gf256(23)];
        let x = solve(mat, b, 2).unwrap();
        assert_eq!(Gf256(2) * x[0] + Gf256(1) * x[1], Gf256(56));
        assert_eq!(Gf256(5) * x[0] + Gf256(2) * x[1], Gf256(23));
    }

    #[test]
    fn solve_3x3_needs_pivot_swap() {
        let mat = vec![
            Gf256(0),
            Gf256(0),
            Gf256(8),
            Gf256(89),
            Gf256(0),
            Gf256(2),
            Gf256(45),
            Gf256(10),
            Gf256(5),
        ];
        let b = vec![Gf256(126), Gf256(23), Gf256(99)];
        let x = solve(mat, b, 3).unwrap();
        assert_eq!(Gf256(0) * x[0] + Gf256(0) * x[1] + Gf256(8) * x[2], Gf256(126));
        assert_eq!(Gf256(89) * x[0] + Gf256(0) * x[1] + Gf256(2) * x[2], Gf256(23));
        assert_eq!(Gf256(45) * x[0] + Gf256(10) * x[1] + Gf256(5) * x[2], Gf256(99));
    }

    #[test]
    fn singular_system_returns_none() {
        let mat = vec![Gf256(2), Gf256(1), Gf256(4), Gf256(2)];
        let b = vec![Gf256(56), Gf256(23)];
        assert_eq!(solve(mat, b, 2), None);
    }
}
