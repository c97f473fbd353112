//! Scalar kernels: plain triple loops with one accumulator per output
//! element. The block variant is the correctness baseline the vectorized
//! strategies are compared against, and [`columns`] doubles as the tail
//! path every vectorized kernel falls back to for leftover columns.

use super::BlockCoords;

/// C_sub += packA * packB over the full bs×bs block.
pub fn block(pack_a: &[f64], pack_b: &[f64], c: &mut [f64], n: usize, at: BlockCoords, bs: usize) {
    columns(pack_a, pack_b, c, n, at, bs, 0, bs)
}

/// Scalar accumulation restricted to packed columns `j_lo..j_hi`, all rows.
/// Vectorized kernels call this for the remainder when bs is not a multiple
/// of their group width.
pub(crate) fn columns(
    pack_a: &[f64],
    pack_b: &[f64],
    c: &mut [f64],
    n: usize,
    at: BlockCoords,
    bs: usize,
    j_lo: usize,
    j_hi: usize,
) {
    for ii in 0..bs {
        let i = at.i0 + ii;
        let a_row = &pack_a[ii * bs..(ii + 1) * bs];
        for jj in j_lo..j_hi {
            let mut sum = c[i * n + at.j0 + jj];
            for (kk, &aval) in a_row.iter().enumerate() {
                sum += aval * pack_b[kk * bs + jj];
            }
            c[i * n + at.j0 + jj] = sum;
        }
    }
}

/// Whole-matrix scalar kernel: full O(N^3) contraction in one call,
/// overwriting C.
pub fn whole(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a[i * n + k] * b[k * n + j];
            }
            c[i * n + j] = sum;
        }
    }
}
