use aligned_vec::{avec, AVec, ConstAlign};
use rand::Rng;

/// Alignment of every matrix and packing buffer, in bytes. Wide enough for
/// one full 512-bit vector load.
pub const BUF_ALIGN: usize = 64;

/// A dense square N×N matrix of `f64` in row-major order, element (r,c) at
/// offset `r*N + c`, backed by a 64-byte-aligned buffer.
pub struct Matrix {
    buf: AVec<f64, ConstAlign<BUF_ALIGN>>,
    n: usize,
}

impl Matrix {
    /// Allocates an N×N matrix filled with zeros. Allocation failure aborts
    /// the process; the benchmark has nothing useful to do without its
    /// operands.
    pub fn zeroed(n: usize) -> Matrix {
        Matrix {
            buf: avec![[BUF_ALIGN] | 0.0; n * n],
            n,
        }
    }

    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[f64] {
        &self.buf
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.buf
    }

    #[inline(always)]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.buf[r * self.n + c]
    }

    #[inline(always)]
    pub fn set(&mut self, r: usize, c: usize, alpha: f64) {
        self.buf[r * self.n + c] = alpha;
    }

    /// Deterministic fill used by the benchmark binary: element at linear
    /// offset i gets `(i*33 + 7) % 100 + 1`. Values stay in [1, 100] so
    /// accumulated products remain well within f64 exact-integer range for
    /// the matrix sizes we care about.
    pub fn fill_pattern(&mut self) {
        for (i, x) in self.buf.iter_mut().enumerate() {
            *x = ((i * 33 + 7) % 100) as f64 + 1.0;
        }
    }

    /// Fills with uniform random values in [0, 1) drawn from the supplied
    /// generator, so two matrices filled from the same seeded generator
    /// state are reproducible.
    pub fn fill_rand<R: Rng>(&mut self, rng: &mut R) {
        for x in self.buf.iter_mut() {
            *x = rng.gen::<f64>();
        }
    }

    pub fn fill_zero(&mut self) {
        for x in self.buf.iter_mut() {
            *x = 0.0;
        }
    }

    /// Sum of all elements. The benchmark binary prints this as a cheap
    /// whole-matrix checksum.
    pub fn checksum(&self) -> f64 {
        self.buf.iter().sum()
    }
}
