//! Wide-SIMD block kernel. For each output row, eight adjacent C elements
//! ride in one vector accumulator while the contraction loop broadcasts one
//! scalar of packed A against one vector of packed B per fused
//! multiply-add.
//!
//! Two code paths compute the identical sequence of FMAs: hand-written
//! AVX-512 intrinsics when the CPU has them, and a portable 8-lane
//! accumulator array otherwise. Columns left over when bs is not a multiple
//! of eight always go through the scalar cleanup, so any positive bs is
//! handled.

use super::{scalar, BlockCoords, LANES};

/// C_sub += packA * packB over the full bs×bs block.
pub fn block(pack_a: &[f64], pack_b: &[f64], c: &mut [f64], n: usize, at: BlockCoords, bs: usize) {
    let vec_end = bs - bs % LANES;

    #[cfg(target_arch = "x86_64")]
    {
        if super::avx512_available() {
            unsafe {
                block_avx512(pack_a, pack_b, c, n, at, bs, vec_end);
            }
            scalar::columns(pack_a, pack_b, c, n, at, bs, vec_end, bs);
            return;
        }
    }

    block_portable(pack_a, pack_b, c, n, at, bs, vec_end);
    scalar::columns(pack_a, pack_b, c, n, at, bs, vec_end, bs);
}

fn block_portable(
    pack_a: &[f64],
    pack_b: &[f64],
    c: &mut [f64],
    n: usize,
    at: BlockCoords,
    bs: usize,
    vec_end: usize,
) {
    for ii in 0..bs {
        let i = at.i0 + ii;
        let a_row = &pack_a[ii * bs..(ii + 1) * bs];
        let mut j_off = 0;
        while j_off < vec_end {
            let base = i * n + at.j0 + j_off;
            let mut acc = [0.0f64; LANES];
            acc.copy_from_slice(&c[base..base + LANES]);
            for (kk, &aval) in a_row.iter().enumerate() {
                let brow = &pack_b[kk * bs + j_off..kk * bs + j_off + LANES];
                for l in 0..LANES {
                    acc[l] = aval.mul_add(brow[l], acc[l]);
                }
            }
            c[base..base + LANES].copy_from_slice(&acc);
            j_off += LANES;
        }
    }
}

/// # Safety
///
/// Caller must ensure the CPU supports AVX-512F and FMA, `pack_a` and
/// `pack_b` hold at least bs*bs elements, `vec_end <= bs` is a multiple of
/// [`LANES`], and every addressed C row segment is in bounds.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f", enable = "fma")]
unsafe fn block_avx512(
    pack_a: &[f64],
    pack_b: &[f64],
    c: &mut [f64],
    n: usize,
    at: BlockCoords,
    bs: usize,
    vec_end: usize,
) {
    use std::arch::x86_64::*;

    let pa = pack_a.as_ptr();
    let pb = pack_b.as_ptr();
    let cp = c.as_mut_ptr();

    for ii in 0..bs {
        let i = at.i0 + ii;
        let a_row = pa.add(ii * bs);
        let mut j_off = 0;
        while j_off < vec_end {
            let cptr = cp.add(i * n + at.j0 + j_off);
            let mut cvec = _mm512_loadu_pd(cptr);
            for kk in 0..bs {
                let avec = _mm512_set1_pd(*a_row.add(kk));
                let bvec = _mm512_loadu_pd(pb.add(kk * bs + j_off));
                cvec = _mm512_fmadd_pd(avec, bvec, cvec);
            }
            _mm512_storeu_pd(cptr, cvec);
            j_off += LANES;
        }
    }
}
