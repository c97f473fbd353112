use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use gemmix::dispatch::{self, BLOCK_STRATEGIES};
use gemmix::{driver, KernelShapes, Matrix, MixPolicy, Mixer, Resolved, WholeKernel};

const N: usize = 256;
const BS: usize = 64;

fn bench_block_strategies(crit: &mut Criterion) {
    let mut a = Matrix::zeroed(N);
    let mut b = Matrix::zeroed(N);
    a.fill_pattern();
    b.fill_pattern();

    let mut group = crit.benchmark_group("blocked");
    group.throughput(Throughput::Elements((2 * N * N * N) as u64));
    for name in BLOCK_STRATEGIES {
        let kern = match dispatch::resolve(name, &KernelShapes::default()).unwrap() {
            Resolved::Block(k) => k,
            Resolved::Whole(_) => unreachable!(),
        };
        group.bench_with_input(BenchmarkId::from_parameter(name), &kern, |bencher, &kern| {
            let mut c = Matrix::zeroed(N);
            bencher.iter(|| {
                c.fill_zero();
                let mut mixer = Mixer::new(MixPolicy::Constant, 0);
                driver::run_blocked(&a, &b, &mut c, BS, [kern, kern], &mut mixer).unwrap();
                black_box(c.as_slice());
            })
        });
    }
    group.finish();
}

fn bench_whole_delegate(crit: &mut Criterion) {
    let mut a = Matrix::zeroed(N);
    let mut b = Matrix::zeroed(N);
    a.fill_pattern();
    b.fill_pattern();

    crit.bench_function("delegate_whole", |bencher| {
        let mut c = Matrix::zeroed(N);
        bencher.iter(|| {
            driver::run_whole(&a, &b, &mut c, WholeKernel::Delegate).unwrap();
            black_box(c.as_slice());
        })
    });
}

criterion_group!(benches, bench_block_strategies, bench_whole_delegate);
criterion_main!(benches);
