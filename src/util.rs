use std::time::Instant;

use crate::matrix::Matrix;

/// Naive triple-loop reference multiplication, C = A·B (overwrite). Every
/// optimized strategy is validated against this.
pub fn naive_gemm(a: &Matrix, b: &Matrix, c: &mut Matrix) {
    let n = c.n();
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a.get(i, k) * b.get(k, j);
            }
            c.set(i, j, sum);
        }
    }
}

/// Largest element-wise absolute difference between two matrices.
pub fn max_abs_diff(x: &Matrix, y: &Matrix) -> f64 {
    x.as_slice()
        .iter()
        .zip(y.as_slice())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

pub fn dur_seconds(start: Instant) -> f64 {
    start.elapsed().as_secs_f64()
}

pub fn gflops(n: usize, seconds: f64) -> f64 {
    let nflops = (n * n * n) as f64;
    2.0 * nflops / seconds / 1e9
}

/// Pins the calling thread to one core so repeated runs see the same cache
/// and frequency domain. Failure is diagnostic only.
#[cfg(target_os = "linux")]
pub fn pin_to_core(core: usize) {
    unsafe {
        let mut set: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_ZERO(&mut set);
        libc::CPU_SET(core, &mut set);
        if libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) != 0 {
            eprintln!("[WARN] could not pin to core {core}; continuing unpinned");
        }
    }
}

#[cfg(not(target_os = "linux"))]
pub fn pin_to_core(_core: usize) {
    eprintln!("[WARN] core pinning unsupported on this platform");
}
