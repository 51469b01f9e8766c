//! Benchmarks for the hot paths: field multiplication/inversion, point
//! doubling/addition, and scalar multiplication.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use edwards25519_core::{ED25519_BASEPOINT_POINT, Scalar};
use rand_core::{OsRng, RngCore};

fn random_scalar() -> Scalar {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    Scalar::from_bytes(bytes)
}

fn bench_scalarmult(c: &mut Criterion) {
    let g = ED25519_BASEPOINT_POINT;
    let s = random_scalar();
    c.bench_function("scalarmult_base", |b| {
        b.iter(|| black_box(g).scalarmult(black_box(&s)))
    });
}

fn bench_double(c: &mut Criterion) {
    let g = ED25519_BASEPOINT_POINT;
    c.bench_function("point_double", |b| b.iter(|| black_box(g).double()));
}

fn bench_add(c: &mut Criterion) {
    let g = ED25519_BASEPOINT_POINT;
    let h = g.double();
    c.bench_function("point_add", |b| {
        b.iter(|| black_box(g).add_points(black_box(&h)))
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    let a = random_scalar();
    let b_scalar = random_scalar();
    c.bench_function("scalar_mul", |b| {
        b.iter(|| black_box(a).mul(black_box(&b_scalar)))
    });
}

criterion_group!(
    benches,
    bench_scalarmult,
    bench_double,
    bench_add,
    bench_scalar_mul
);
criterion_main!(benches);
