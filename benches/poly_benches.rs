// benches/poly_benches.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grpoly::backends::{IntegerRing, NmodRing};
use grpoly::core::static_random::StaticRandom;
use grpoly::core::{vector, Ring};
use grpoly::polynomial::GrPoly;

const P: u64 = 998_244_353;

fn random_poly<R: Ring>(len: usize, state: &mut StaticRandom, ring: &R) -> GrPoly<R::Elem> {
    let mut v = vector::random(len, state.rng(), ring);
    if let Some(last) = v.last_mut() {
        if ring.is_zero(last).is_true() {
            *last = ring.one();
        }
    }
    GrPoly::from_vec(v, ring)
}

fn benchmark_multiplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiplication");
    let p = NmodRing::new(P);
    let zz = IntegerRing::new();
    let mut state = StaticRandom::from_seed(1);

    for len in [16, 64, 256, 1024] {
        let a = random_poly(len, &mut state, &p);
        let b = random_poly(len, &mut state, &p);
        group.bench_function(&format!("nmod_len_{}", len), |bench| {
            bench.iter(|| black_box(a.mul(&b, &p).unwrap()))
        });
    }

    for len in [16, 64, 256] {
        let a = random_poly(len, &mut state, &zz);
        let b = random_poly(len, &mut state, &zz);
        group.bench_function(&format!("fmpz_len_{}", len), |bench| {
            bench.iter(|| black_box(a.mul(&b, &zz).unwrap()))
        });
    }

    group.finish();
}

fn benchmark_division(c: &mut Criterion) {
    let mut group = c.benchmark_group("division");
    let p = NmodRing::new(P);
    let mut state = StaticRandom::from_seed(2);

    for len in [32, 128, 512] {
        let a = random_poly(2 * len, &mut state, &p);
        let b = random_poly(len, &mut state, &p);
        group.bench_function(&format!("divrem_len_{}", len), |bench| {
            bench.iter(|| black_box(a.divrem(&b, &p).unwrap()))
        });
        group.bench_function(&format!("divrem_basecase_len_{}", len), |bench| {
            bench.iter(|| black_box(a.divrem_basecase(&b, &p).unwrap()))
        });
    }

    group.finish();
}

fn benchmark_inv_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("inv_series");
    let p = NmodRing::new(P);
    let mut state = StaticRandom::from_seed(3);

    for len in [32, 256, 1024] {
        let mut f = random_poly(len, &mut state, &p);
        f.set_coeff(0, 1, &p);
        group.bench_function(&format!("len_{}", len), |bench| {
            bench.iter(|| black_box(f.inv_series(len, &p).unwrap()))
        });
    }

    group.finish();
}

fn benchmark_gcd(c: &mut Criterion) {
    let mut group = c.benchmark_group("gcd");
    let p = NmodRing::new(P);
    let zz = IntegerRing::new();
    let mut state = StaticRandom::from_seed(4);

    for len in [32, 128, 512] {
        let a = random_poly(len, &mut state, &p);
        let b = random_poly(len - 1, &mut state, &p);
        group.bench_function(&format!("nmod_len_{}", len), |bench| {
            bench.iter(|| black_box(a.gcd(&b, &p).unwrap()))
        });
    }

    for len in [8, 16, 32] {
        let a = random_poly(len, &mut state, &zz);
        let b = random_poly(len - 1, &mut state, &zz);
        group.bench_function(&format!("fmpz_resultant_len_{}", len), |bench| {
            bench.iter(|| black_box(a.resultant(&b, &zz).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_multiplication,
    benchmark_division,
    benchmark_inv_series,
    benchmark_gcd
);
criterion_main!(benches);
