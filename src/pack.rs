//! Block packing: copying one bs×bs tile of a source matrix into a dense,
//! stride-free scratch buffer before the kernel runs over it. Removing the
//! stride-N jump from the inner contraction loop is the whole point of
//! blocking, so both packers produce plain row-major bs×bs layouts:
//!
//!   packA[ii*bs + kk] = A[(i0+ii)*N + (k0+kk)]
//!   packB[kk*bs + jj] = B[(k0+kk)*N + (j0+jj)]

use aligned_vec::{avec, AVec, ConstAlign};

use crate::matrix::{Matrix, BUF_ALIGN};

/// A reusable bs×bs packing buffer. Allocated once per driver call and
/// overwritten in place on every (i0,k0) / (k0,j0) iteration.
pub struct PackBuf {
    buf: AVec<f64, ConstAlign<BUF_ALIGN>>,
    bs: usize,
}

impl PackBuf {
    pub fn new(bs: usize) -> PackBuf {
        PackBuf {
            buf: avec![[BUF_ALIGN] | 0.0; bs * bs],
            bs,
        }
    }

    #[inline(always)]
    pub fn bs(&self) -> usize {
        self.bs
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[f64] {
        &self.buf
    }
}

/// Packs the bs×bs block of A whose top-left corner is (i0, k0).
/// Caller guarantees `i0 + bs <= N` and `k0 + bs <= N`; the destination is
/// overwritten entirely.
pub fn pack_a(a: &Matrix, dst: &mut PackBuf, i0: usize, k0: usize) {
    copy_block(a, dst, i0, k0)
}

/// Packs the bs×bs block of B whose top-left corner is (k0, j0). Same copy
/// as [`pack_a`] with the axis pairing swapped: the packed row index is the
/// contraction coordinate.
pub fn pack_b(b: &Matrix, dst: &mut PackBuf, k0: usize, j0: usize) {
    copy_block(b, dst, k0, j0)
}

#[inline(always)]
fn copy_block(src: &Matrix, dst: &mut PackBuf, r0: usize, c0: usize) {
    let n = src.n();
    let bs = dst.bs;
    let s = src.as_slice();
    for r in 0..bs {
        let row = &s[(r0 + r) * n + c0..(r0 + r) * n + c0 + bs];
        dst.buf[r * bs..(r + 1) * bs].copy_from_slice(row);
    }
}
