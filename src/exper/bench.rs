//! Benchmark driver: resolves a strategy (and optionally a mixing policy),
//! runs the multiplication a few times, and prints a tab-separated SUMMARY
//! line. Configuration problems are fatal before any block computes;
//! measurement diagnostics go to stderr.

use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;

use gemmix::kern::{HybridShape, InterleavedShape};
use gemmix::session::{Session, WallClock};
use gemmix::{
    dispatch, driver, util, KernelShapes, Matrix, MixPolicy, Mixer, Resolved,
};

#[derive(Parser, Debug)]
#[command(version, about = "Blocked matmul strategy benchmark")]
struct Args {
    /// Matrix dimension N (multiple of 8)
    #[arg(short, long, default_value_t = 512)]
    n: usize,

    /// Block size BS (positive divisor of N)
    #[arg(short, long, default_value_t = 64)]
    bs: usize,

    /// Strategy: scalar, vector, hybrid, interleaved, delegate,
    /// scalar_whole, delegate_whole
    #[arg(short, long, default_value = "vector")]
    mode: String,

    /// Second strategy of the mix pair (block family only)
    #[arg(long, default_value = "scalar")]
    alt: String,

    /// Mix policy: constant, random, periodic:P, burst:A,B
    #[arg(long, default_value = "constant")]
    mix: String,

    /// Run seed (random fills and the random mix policy)
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Repetitions; the best time is reported
    #[arg(short, long, default_value_t = 3)]
    reps: usize,

    /// Pin the benchmark thread to this core
    #[arg(long)]
    pin: Option<usize>,

    /// Hybrid kernel: vector chunks per group
    #[arg(long, default_value_t = 1)]
    hybrid_chunks: usize,

    /// Hybrid kernel: scalar columns per group
    #[arg(long, default_value_t = 2)]
    hybrid_scalars: usize,

    /// Interleaved kernel: live vector accumulators
    #[arg(long, default_value_t = 1)]
    ilv_vec: usize,

    /// Interleaved kernel: live scalar accumulators
    #[arg(long, default_value_t = 1)]
    ilv_scalar: usize,

    /// Verify the result against the naive reference
    #[arg(long, default_value_t = false)]
    check: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let shapes = KernelShapes {
        hybrid: HybridShape {
            vector_chunks: args.hybrid_chunks,
            scalar_cols: args.hybrid_scalars,
        },
        interleaved: InterleavedShape {
            vector_accs: args.ilv_vec,
            scalar_accs: args.ilv_scalar,
        },
    };
    let policy = MixPolicy::parse(&args.mix)?;

    // Resolve everything up front so a bad name or shape never reaches the
    // block loop. Whole-matrix lookup first, block registry on a miss.
    let resolved = dispatch::resolve(&args.mode, &shapes)?;
    let pair = match (&resolved, policy) {
        (Resolved::Whole(_), MixPolicy::Constant) => None,
        (Resolved::Whole(_), _) => {
            bail!("mix policies select block kernels; '{}' is whole-matrix", args.mode)
        }
        (Resolved::Block(first), _) => {
            let second = match dispatch::resolve(&args.alt, &shapes)? {
                Resolved::Block(k) => k,
                Resolved::Whole(_) => {
                    bail!("mix pair must be block strategies; '{}' is whole-matrix", args.alt)
                }
            };
            driver::check_dims(args.n, args.bs)?;
            Some([*first, second])
        }
    };

    if let Some(core) = args.pin {
        util::pin_to_core(core);
    }

    let mut a = Matrix::zeroed(args.n);
    let mut b = Matrix::zeroed(args.n);
    let mut c = Matrix::zeroed(args.n);
    a.fill_pattern();
    b.fill_pattern();

    let mut session = WallClock::new();
    session.init();

    let mut best_time = f64::INFINITY;
    for _ in 0..args.reps.max(1) {
        c.fill_zero();
        session.start();
        let start = Instant::now();
        match (&resolved, &pair) {
            (_, Some(pair)) => {
                // The mixer restarts each rep so every rep sees the same
                // block-by-block strategy sequence.
                let mut mixer = Mixer::new(policy, args.seed);
                driver::run_blocked(&a, &b, &mut c, args.bs, *pair, &mut mixer)?;
            }
            (Resolved::Whole(k), None) => driver::run_whole(&a, &b, &mut c, *k)?,
            (Resolved::Block(_), None) => unreachable!(),
        }
        best_time = best_time.min(util::dur_seconds(start));
        session.end();
    }
    session.finalize();

    if args.check {
        let mut c_ref = Matrix::zeroed(args.n);
        util::naive_gemm(&a, &b, &mut c_ref);
        let err = util::max_abs_diff(&c, &c_ref);
        eprintln!("[check] max_abs_diff={err:e}");
        if err > 1e-6 {
            bail!("result differs from the naive reference by {err:e}");
        }
    }

    let sum = c.checksum();
    println!("done sum={sum}");
    println!(
        "SUMMARY\tN={}\tBS={}\tmode={}\talt={}\tmix={}\tseed={}\tseconds={:.6}\tgflops={:.3}\tchecksum={}",
        args.n,
        args.bs,
        args.mode,
        args.alt,
        args.mix,
        args.seed,
        best_time,
        util::gflops(args.n, best_time),
        sum
    );
    Ok(())
}
