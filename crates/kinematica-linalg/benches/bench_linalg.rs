use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kinematica_linalg::{ops, Matrix};

fn bench_mul_matrix_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("mul_matrix_matrix");

    for n in [3usize, 4, 16, 64] {
        let a = Matrix::from_fn(n, n, |i, j| (i * n + j) as f64 * 0.01);
        let b = Matrix::from_fn(n, n, |i, j| (i + j) as f64 * 0.5);

        group.bench_with_input(BenchmarkId::new("triple_loop", n), &(a, b), |bencher, (a, b)| {
            bencher.iter(|| black_box(ops::mul_matrix_matrix(black_box(a), black_box(b))))
        });
    }

    group.finish();
}

fn bench_inverse_3x3(c: &mut Criterion) {
    let a = Matrix::from_array(&[[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 1.0]]);

    c.bench_function("matrix_inverse_3x3", |bencher| {
        bencher.iter(|| black_box(ops::matrix_inverse_3x3(black_box(&a))))
    });
}

fn bench_cross_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_product");
    let a = [1.0, 2.0, 3.0];
    let b = [-3.0, 0.5, 2.0];

    group.bench_function("flat_checked", |bencher| {
        bencher.iter(|| black_box(ops::cross_product(black_box(&a), black_box(&b))))
    });

    group.bench_function("cross3", |bencher| {
        bencher.iter(|| black_box(ops::cross3(black_box(&a), black_box(&b))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mul_matrix_matrix,
    bench_inverse_3x3,
    bench_cross_product
);
criterion_main!(benches);
