//! Delegate kernels: forward the contraction to the external optimized
//! gemm capability (`matrixmultiply::dgemm`). The capability takes explicit
//! row/column strides, so translating our row-major blocks means passing a
//! row stride of the leading dimension and a column stride of one.
//!
//! The block variant accumulates (beta = 1) because the driver revisits
//! each C sub-block once per k0 step; the whole-matrix variant overwrites
//! (beta = 0) since its single call is the entire contraction.

use super::BlockCoords;

/// C_sub += packA * packB, delegated. Operates on the packed bs×bs blocks
/// and writes straight into the strided C sub-block.
pub fn block(pack_a: &[f64], pack_b: &[f64], c: &mut [f64], n: usize, at: BlockCoords, bs: usize) {
    debug_assert!(pack_a.len() >= bs * bs && pack_b.len() >= bs * bs);
    debug_assert!((at.i0 + bs - 1) * n + at.j0 + bs <= c.len());
    unsafe {
        matrixmultiply::dgemm(
            bs,
            bs,
            bs,
            1.0,
            pack_a.as_ptr(),
            bs as isize,
            1,
            pack_b.as_ptr(),
            bs as isize,
            1,
            1.0,
            c.as_mut_ptr().add(at.i0 * n + at.j0),
            n as isize,
            1,
        );
    }
}

/// C = A * B in one delegated call over the full matrices.
pub fn whole(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    debug_assert!(a.len() >= n * n && b.len() >= n * n && c.len() >= n * n);
    unsafe {
        matrixmultiply::dgemm(
            n,
            n,
            n,
            1.0,
            a.as_ptr(),
            n as isize,
            1,
            b.as_ptr(),
            n as isize,
            1,
            0.0,
            c.as_mut_ptr(),
            n as isize,
            1,
        );
    }
}
