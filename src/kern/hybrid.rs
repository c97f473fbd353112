//! Hybrid block kernel: within each output row the columns are processed in
//! repeating groups of a few vector-width chunks followed by a few scalar
//! columns, to interleave vector and scalar execution at fine grain. Group
//! factors come from [`HybridShape`] at configuration time rather than
//! being baked in at build time.

use super::{scalar, BlockCoords, HybridShape, LANES};

pub fn block(
    pack_a: &[f64],
    pack_b: &[f64],
    c: &mut [f64],
    n: usize,
    at: BlockCoords,
    bs: usize,
    shape: HybridShape,
) {
    let group = shape.group();

    for ii in 0..bs {
        let i = at.i0 + ii;
        let a_row = &pack_a[ii * bs..(ii + 1) * bs];
        let mut j_off = 0;

        // Full groups only; anything that would cross the block edge is
        // left to the cleanup loop below.
        while j_off + group <= bs {
            for chunk in 0..shape.vector_chunks {
                let j = j_off + chunk * LANES;
                let base = i * n + at.j0 + j;
                let mut acc = [0.0f64; LANES];
                acc.copy_from_slice(&c[base..base + LANES]);
                for (kk, &aval) in a_row.iter().enumerate() {
                    let brow = &pack_b[kk * bs + j..kk * bs + j + LANES];
                    for l in 0..LANES {
                        acc[l] = aval.mul_add(brow[l], acc[l]);
                    }
                }
                c[base..base + LANES].copy_from_slice(&acc);
            }

            let scalar_start = j_off + shape.vector_chunks * LANES;
            for jj in scalar_start..scalar_start + shape.scalar_cols {
                let mut sum = c[i * n + at.j0 + jj];
                for (kk, &aval) in a_row.iter().enumerate() {
                    sum += aval * pack_b[kk * bs + jj];
                }
                c[i * n + at.j0 + jj] = sum;
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

    fn check_against_scalar(bs: usize, shape: HybridShape) {
        let n = bs * 2;
        let a: Vec<f64> = (0..bs * bs).map(|i| ((i * 13 + 5) % 50) as f64).collect();
        let b: Vec<f64> = (0..bs * bs).map(|i| ((i * 7 + 1) % 50) as f64).collect();
        let at = BlockCoords { i0: bs, j0: bs, k0: 0 };

        let mut c_hyb = vec![0.5; n * n];
        let mut c_ref = vec![0.5; n * n];
        block(&a, &b, &mut c_hyb, n, at, bs, shape);
        scalar::block(&a, &b, &mut c_ref, n, at, bs);

        for (x, y) in c_hyb.iter().zip(c_ref.iter()) {
            assert!((x - y).abs() < 1e-9, "{x} vs {y}");
        }
    }

    #[test]
    fn default_shape_matches_scalar() {
        // group = 10 does not divide 16, exercising the cleanup loop.
        check_against_scalar(16, HybridShape::default());
    }

    #[test]
    fn wide_group_matches_scalar() {
        check_against_scalar(24, HybridShape { vector_chunks: 2, scalar_cols: 3 });
    }

    #[test]
    fn group_larger_than_block_is_all_cleanup() {
        check_against_scalar(8, HybridShape { vector_chunks: 4, scalar_cols: 4 });
    }
}
