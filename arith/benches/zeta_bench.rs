use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;

use critline_arith::zeta;
use critline_types::Precision;

fn bench_zeta_precision(c: &mut Criterion) {
    let mut group = c.benchmark_group("zeta_precision");
    let s = Complex64::new(0.5, 14.134_725_141_734_694);

    for digits in [15u32, 50, 200] {
        let precision = Precision::new(digits).unwrap();
        group.bench_with_input(BenchmarkId::new("critical_line", digits), &precision, |b, &p| {
            b.iter(|| black_box(zeta(black_box(s), p).unwrap()));
        });
    }

    group.finish();
}

fn bench_zeta_height(c: &mut Criterion) {
    let mut group = c.benchmark_group("zeta_height");
    let precision = Precision::default();

    for t in [10.0f64, 100.0, 1_000.0, 10_000.0] {
        group.bench_with_input(BenchmarkId::new("t", t as u64), &t, |b, &t| {
            b.iter(|| black_box(zeta(black_box(Complex64::new(0.5, t)), precision).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_zeta_precision, bench_zeta_height);
criterion_main!(benches);
