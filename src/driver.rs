//! The blocked multiplication driver: decomposes C = A·B into bs×bs blocks
//! and walks them in i0 → k0 → j0 order. The A block is packed once per
//! (i0,k0) pair and reused across the whole row of column blocks, which is
//! the reason for this particular loop order; the B block is packed fresh
//! per (k0,j0). Fixing the order also sequences every accumulation into a
//! given C sub-block, one k0 step at a time.

use crate::error::ConfigError;
use crate::kern::{BlockCoords, BlockKernel, WholeKernel};
use crate::matrix::Matrix;
use crate::pack::{pack_a, pack_b, PackBuf};
use crate::policy::Mixer;

/// Shape preconditions for the blocked path, checked before any block
/// computation: N a multiple of 8, bs a positive divisor of N.
pub fn check_dims(n: usize, bs: usize) -> Result<(), ConfigError> {
    if n % 8 != 0 || bs == 0 || n % bs != 0 {
        return Err(ConfigError::BadShape { n, bs });
    }
    Ok(())
}

/// Computes C += A·B by blocks. Each block decision asks `mixer` which of
/// the two kernels in `pair` to run; single-strategy runs pass the same
/// kernel twice with the constant policy. Packing buffers are allocated
/// here, owned exclusively by this call, and overwritten every iteration.
pub fn run_blocked(
    a: &Matrix,
    b: &Matrix,
    c: &mut Matrix,
    bs: usize,
    pair: [BlockKernel; 2],
    mixer: &mut Mixer,
) -> Result<(), ConfigError> {
    let n = c.n();
    if a.n() != n || b.n() != n {
        return Err(ConfigError::BadShape { n, bs });
    }
    check_dims(n, bs)?;

    let mut pa = PackBuf::new(bs);
    let mut pb = PackBuf::new(bs);
    let mut block_index = 0usize;

    for i0 in (0..n).step_by(bs) {
        for k0 in (0..n).step_by(bs) {
            pack_a(a, &mut pa, i0, k0);
            for j0 in (0..n).step_by(bs) {
                pack_b(b, &mut pb, k0, j0);
                let kern = &pair[mixer.select(block_index)];
                kern.apply(&pa, &pb, c, BlockCoords { i0, j0, k0 });
                block_index += 1;
            }
        }
    }
    Ok(())
}

/// The whole-matrix path: no packing, no blocking, a single kernel call
/// that overwrites C.
pub fn run_whole(
    a: &Matrix,
    b: &Matrix,
    c: &mut Matrix,
    kernel: WholeKernel,
) -> Result<(), ConfigError> {
    let n = c.n();
    if a.n() != n || b.n() != n {
        return Err(ConfigError::BadShape { n, bs: n });
    }
    kernel.apply(a, b, c);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MixPolicy;

    fn pattern(n: usize) -> Matrix {
        let mut m = Matrix::zeroed(n);
        m.fill_pattern();
        m
    }

    #[test]
    fn rejects_bad_shapes_before_computing() {
        assert!(check_dims(12, 4).is_err()); // N not a multiple of 8
        assert!(check_dims(16, 0).is_err());
        assert!(check_dims(16, 5).is_err()); // bs does not divide N
        assert!(check_dims(16, 8).is_ok());
        assert!(check_dims(8, 8).is_ok());
    }

    #[test]
    fn blocked_scalar_equals_whole_scalar() {
        let n = 16;
        let a = pattern(n);
        let b = pattern(n);

        let mut c_blocked = Matrix::zeroed(n);
        let mut mixer = Mixer::new(MixPolicy::Constant, 0);
        run_blocked(&a, &b, &mut c_blocked, 8, [BlockKernel::Scalar; 2], &mut mixer).unwrap();

        let mut c_whole = Matrix::zeroed(n);
        run_whole(&a, &b, &mut c_whole, WholeKernel::Scalar).unwrap();

        for (x, y) in c_blocked.as_slice().iter().zip(c_whole.as_slice()) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn mismatched_operand_sizes_are_rejected() {
        let a = pattern(16);
        let b = pattern(8);
        let mut c = Matrix::zeroed(16);
        let mut mixer = Mixer::new(MixPolicy::Constant, 0);
        assert!(run_blocked(&a, &b, &mut c, 8, [BlockKernel::Scalar; 2], &mut mixer).is_err());
    }
}
