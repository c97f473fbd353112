//! The kernel set: one module per compute strategy, each a stateless
//! function that adds one packed block's contribution into C (block family)
//! or performs the full contraction in one call (whole-matrix family).
//!
//! Block kernels always accumulate (`C_sub += A_sub * B_sub`): the driver
//! revisits the same C sub-block once per k0 step. Whole-matrix kernels
//! overwrite, since the single call performs the complete contraction. The
//! two families deliberately keep these different semantics.

use once_cell::sync::Lazy;

use crate::error::ConfigError;
use crate::matrix::Matrix;
use crate::pack::PackBuf;

pub mod delegate;
pub mod hybrid;
pub mod interleaved;
pub mod scalar;
pub mod vector;

/// f64 lanes per vector step: one 512-bit register.
pub const LANES: usize = 8;

/// Upper bound on the configurable unroll/group factors of the hybrid and
/// interleaved kernels. Keeps their accumulator arrays at a fixed size while
/// the live counts stay runtime configuration.
pub const MAX_UNROLL: usize = 4;

#[cfg(target_arch = "x86_64")]
static AVX512: Lazy<bool> =
    Lazy::new(|| is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("fma"));

/// Whether the hand-written AVX-512 path of the vector kernel can run on
/// this CPU. Detected once, cached.
#[inline(always)]
pub fn avx512_available() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        *AVX512
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

/// Origin of the block a kernel is working on: row-start of the A/C row
/// block, column-start of the B/C column block, contraction-start of the
/// shared dimension. All multiples of the block size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockCoords {
    pub i0: usize,
    pub j0: usize,
    pub k0: usize,
}

/// Group factors for the hybrid kernel: each repeating group is
/// `vector_chunks` 8-wide vector chunks followed by `scalar_cols` scalar
/// columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HybridShape {
    pub vector_chunks: usize,
    pub scalar_cols: usize,
}

impl Default for HybridShape {
    fn default() -> Self {
        HybridShape { vector_chunks: 1, scalar_cols: 2 }
    }
}

impl HybridShape {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_factors("hybrid", self.vector_chunks, self.scalar_cols)
    }

    /// Columns consumed by one full group.
    #[inline(always)]
    pub fn group(&self) -> usize {
        self.vector_chunks * LANES + self.scalar_cols
    }
}

/// Accumulator counts for the interleaved kernel: `vector_accs` vector
/// accumulators and `scalar_accs` scalar accumulators live across the same
/// contraction loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterleavedShape {
    pub vector_accs: usize,
    pub scalar_accs: usize,
}

impl Default for InterleavedShape {
    fn default() -> Self {
        InterleavedShape { vector_accs: 1, scalar_accs: 1 }
    }
}

impl InterleavedShape {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_factors("interleaved", self.vector_accs, self.scalar_accs)
    }

    #[inline(always)]
    pub fn group(&self) -> usize {
        self.vector_accs * LANES + self.scalar_accs
    }
}

fn check_factors(kernel: &'static str, vec: usize, sc: usize) -> Result<(), ConfigError> {
    if vec > MAX_UNROLL || sc > MAX_UNROLL {
        return Err(ConfigError::BadKernelShape {
            kernel,
            reason: format!("factors {vec}/{sc} exceed the maximum of {MAX_UNROLL}"),
        });
    }
    if vec + sc == 0 {
        return Err(ConfigError::BadKernelShape {
            kernel,
            reason: "at least one vector or scalar slot is required".to_string(),
        });
    }
    Ok(())
}

/// A block-family compute strategy. Applying one adds the packed blocks'
/// product into the C sub-block addressed by `at`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlockKernel {
    Scalar,
    Vector,
    Hybrid(HybridShape),
    Interleaved(InterleavedShape),
    Delegate,
}

impl BlockKernel {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKernel::Scalar => "scalar",
            BlockKernel::Vector => "vector",
            BlockKernel::Hybrid(_) => "hybrid",
            BlockKernel::Interleaved(_) => "interleaved",
            BlockKernel::Delegate => "delegate",
        }
    }

    #[inline]
    pub fn apply(&self, pack_a: &PackBuf, pack_b: &PackBuf, c: &mut Matrix, at: BlockCoords) {
        let bs = pack_a.bs();
        let n = c.n();
        let (pa, pb) = (pack_a.as_slice(), pack_b.as_slice());
        let cs = c.as_mut_slice();
        match self {
            BlockKernel::Scalar => scalar::block(pa, pb, cs, n, at, bs),
            BlockKernel::Vector => vector::block(pa, pb, cs, n, at, bs),
            BlockKernel::Hybrid(shape) => hybrid::block(pa, pb, cs, n, at, bs, *shape),
            BlockKernel::Interleaved(shape) => interleaved::block(pa, pb, cs, n, at, bs, *shape),
            BlockKernel::Delegate => delegate::block(pa, pb, cs, n, at, bs),
        }
    }
}

/// A whole-matrix compute strategy: one call, full contraction, C
/// overwritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WholeKernel {
    Scalar,
    Delegate,
}

impl WholeKernel {
    pub fn name(&self) -> &'static str {
        match self {
            WholeKernel::Scalar => "scalar_whole",
            WholeKernel::Delegate => "delegate_whole",
        }
    }

    pub fn apply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) {
        let n = c.n();
        match self {
            WholeKernel::Scalar => scalar::whole(a.as_slice(), b.as_slice(), c.as_mut_slice(), n),
            WholeKernel::Delegate => {
                delegate::whole(a.as_slice(), b.as_slice(), c.as_mut_slice(), n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_validation_bounds() {
        assert!(HybridShape::default().validate().is_ok());
        assert!(InterleavedShape::default().validate().is_ok());
        assert!(HybridShape { vector_chunks: 5, scalar_cols: 0 }.validate().is_err());
        assert!(HybridShape { vector_chunks: 0, scalar_cols: 0 }.validate().is_err());
        assert!(InterleavedShape { vector_accs: 0, scalar_accs: 1 }.validate().is_ok());
        assert!(InterleavedShape { vector_accs: 2, scalar_accs: 5 }.validate().is_err());
    }

    #[test]
    fn group_widths() {
        assert_eq!(HybridShape::default().group(), 10);
        assert_eq!(InterleavedShape { vector_accs: 2, scalar_accs: 3 }.group(), 19);
    }
}
