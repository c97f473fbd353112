//! Interleaved block kernel: several independent accumulators stay live
//! across one shared contraction loop, increasing instruction-level
//! parallelism. Per group there are `vector_accs` 8-lane accumulators and
//! `scalar_accs` scalar accumulators; each k step updates all of them
//! before advancing. Accumulator counts are configuration fields bounded by
//! [`MAX_UNROLL`].

use super::{BlockCoords, InterleavedShape, LANES, MAX_UNROLL};

pub fn block(
    pack_a: &[f64],
    pack_b: &[f64],
    c: &mut [f64],
    n: usize,
    at: BlockCoords,
    bs: usize,
    shape: InterleavedShape,
) {
    let group = shape.group();
    let (nvec, nsc) = (shape.vector_accs, shape.scalar_accs);

    for ii in 0..bs {
        let i = at.i0 + ii;
        let a_row = &pack_a[ii * bs..(ii + 1) * bs];
        let mut j_off = 0;

        while j_off + group <= bs {
            let scalar_start = j_off + nvec * LANES;

            // Storage for the largest allowed shape; only the first
            // nvec/nsc entries are live.
            let mut vacc = [[0.0f64; LANES]; MAX_UNROLL];
            let mut sacc = [0.0f64; MAX_UNROLL];

            for v in 0..nvec {
                let base = i * n + at.j0 + j_off + v * LANES;
                vacc[v].copy_from_slice(&c[base..base + LANES]);
            }
            for s in 0..nsc {
                sacc[s] = c[i * n + at.j0 + scalar_start + s];
            }

            // One pass over k updates every live accumulator.
            for (kk, &aval) in a_row.iter().enumerate() {
                let b_row = &pack_b[kk * bs..(kk + 1) * bs];
                for v in 0..nvec {
                    let brow = &b_row[j_off + v * LANES..j_off + (v + 1) * LANES];
                    for l in 0..LANES {
                        vacc[v][l] = aval.mul_add(brow[l], vacc[v][l]);
                    }
                }
                for s in 0..nsc {
                    sacc[s] += aval * b_row[scalar_start + s];
                }
            }

            for v in 0..nvec {
                let base = i * n + at.j0 + j_off + v * LANES;
                c[base..base + LANES].copy_from_slice(&vacc[v]);
            }
            for s in 0..nsc {
                c[i * n + at.j0 + scalar_start + s] = sacc[s];
            }

            j_off += group;
        }

        // Cleanup for columns that do not fill a whole group.
        for jj in j_off..bs {
            let mut sum = c[i * n + at.j0 + jj];
            for (kk, &aval) in a_row.iter().enumerate() {
                sum += aval * pack_b[kk * bs + jj];
            }
            c[i * n + at.j0 + jj] = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kern::scalar;

    fn check_against_scalar(bs: usize, shape: InterleavedShape) {
        let n = bs * 2;
        let a: Vec<f64> = (0..bs * bs).map(|i| ((i * 29 + 11) % 60) as f64).collect();
        let b: Vec<f64> = (0..bs * bs).map(|i| ((i * 3 + 2) % 60) as f64).collect();
        let at = BlockCoords { i0: 0, j0: bs, k0: 0 };

        let mut c_ilv = vec![0.25; n * n];
        let mut c_ref = vec![0.25; n * n];
        block(&a, &b, &mut c_ilv, n, at, bs, shape);
        scalar::block(&a, &b, &mut c_ref, n, at, bs);

        for (x, y) in c_ilv.iter().zip(c_ref.iter()) {
            assert!((x - y).abs() < 1e-9, "{x} vs {y}");
        }
    }

    #[test]
    fn default_shape_matches_scalar() {
        check_against_scalar(16, InterleavedShape::default());
    }

    #[test]
    fn multiple_accumulators_match_scalar() {
        check_against_scalar(32, InterleavedShape { vector_accs: 2, scalar_accs: 2 });
    }
}
