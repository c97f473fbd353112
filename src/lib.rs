//! gemmix benchmarks dense square matrix multiplication (C = A·B,
//! row-major f64) under several compute strategies: scalar, wide-SIMD,
//! hybrid vector/scalar groups, multi-accumulator interleaving, and
//! delegation to an optimized gemm library. Strategies can be fixed for a
//! whole run or mixed block-by-block under a policy (constant, random,
//! periodic, burst), which is what makes differing instruction mixes
//! comparable within a single run.

pub mod dispatch;
pub mod driver;
pub mod error;
pub mod kern;
pub mod matrix;
pub mod pack;
pub mod policy;
pub mod session;
pub mod util;

pub use dispatch::{resolve, KernelShapes, Resolved};
pub use driver::{run_blocked, run_whole};
pub use error::ConfigError;
pub use kern::{BlockKernel, WholeKernel};
pub use matrix::Matrix;
pub use policy::{MixPolicy, Mixer};
