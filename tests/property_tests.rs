// Seeded randomized checks of algebraic identities across coefficient rings
use grpoly::backends::{IntegerRing, NmodRing, RationalRing};
use grpoly::config::Tuning;
use grpoly::core::static_random::StaticRandom;
use grpoly::core::{Ring, Truth};
use grpoly::core::vector;
use grpoly::polynomial::GrPoly;

const SEEDS: [u64; 4] = [101, 202, 303, 404];

fn random_poly<R: Ring>(len: usize, state: &mut StaticRandom, ring: &R) -> GrPoly<R::Elem> {
    let mut v = vector::random(len, state.rng(), ring);
    if let Some(last) = v.last_mut() {
        if ring.is_zero(last).is_true() {
            *last = ring.one();
        }
    }
    GrPoly::from_vec(v, ring)
}

fn check_ring_identities<R: Ring>(state: &mut StaticRandom, ring: &R) {
    let la = state.next_range(0, 40);
    let lb = state.next_range(0, 40);
    let lc = state.next_range(0, 20);
    let a = random_poly(la, state, ring);
    let b = random_poly(lb, state, ring);
    let c = random_poly(lc, state, ring);

    let n = la + state.next_range(0, 4);
    assert!(a.reverse(n, ring).reverse(n, ring).equal(&a, ring).is_true());

    let lhs = a.add(&b, ring).unwrap().mul(&c, ring).unwrap();
    let rhs = a.mul(&c, ring).unwrap().add(&b.mul(&c, ring).unwrap(), ring).unwrap();
    assert!(lhs.equal(&rhs, ring).is_true());
    assert!(a.mul(&b, ring).unwrap().equal(&b.mul(&a, ring).unwrap(), ring).is_true());

    // (ab)' = a'b + ab'
    let d1 = a.mul(&b, ring).unwrap().derivative(ring).unwrap();
    let d2 = a
        .derivative(ring)
        .unwrap()
        .mul(&b, ring)
        .unwrap()
        .add(&a.mul(&b.derivative(ring).unwrap(), ring).unwrap(), ring)
        .unwrap();
    assert!(d1.equal(&d2, ring).is_true());

    let mut u = GrPoly::from_vec_unnormalised(vector::fit(a.coeffs(), la + 3, ring));
    u.normalise(ring);
    let once = u.len();
    u.normalise(ring);
    assert_eq!(u.len(), once);
    assert!(u.equal(&a, ring).is_true());
}

fn check_field_identities<R: Ring>(state: &mut StaticRandom, max_len: usize, ring: &R) {
    let la = state.next_range(1, max_len);
    let lb = state.next_range(1, max_len / 2 + 1);
    let f = random_poly(la, state, ring);
    let g = random_poly(lb, state, ring);

    let (q, r) = f.divrem(&g, ring).unwrap();
    assert!(r.len() < g.len());
    assert!(q.mul(&g, ring).unwrap().add(&r, ring).unwrap().equal(&f, ring).is_true());

    let (qb, rb) = f.divrem_basecase(&g, ring).unwrap();
    let (qn, rn) = f.divrem_newton(&g, ring).unwrap();
    assert_eq!(qb.equal(&qn, ring), Truth::True);
    assert_eq!(rb.equal(&rn, ring), Truth::True);

    // h · h⁻¹ ≡ 1 mod x^n whenever h(0) is a unit
    let n = state.next_range(1, max_len);
    let mut h = random_poly(n, state, ring);
    h.set_coeff(0, ring.one(), ring);
    let inv = h.inv_series(n, ring).unwrap();
    assert!(h.mullow(&inv, n, ring).unwrap().is_one(ring).is_true());

    if la > lb {
        let hg = f.hgcd(&g, ring).unwrap();
        let (x, y) = hg.m.apply(&hg.a, &hg.b, ring).unwrap();
        assert!(GrPoly::from_vec(x, ring).equal(&f, ring).is_true());
        assert!(GrPoly::from_vec(y, ring).equal(&g, ring).is_true());
    }
}

#[test]
fn test_identities_over_integers() {
    let zz = IntegerRing::new();
    for seed in SEEDS {
        let mut state = StaticRandom::from_seed(seed);
        check_ring_identities(&mut state, &zz);
    }
}

#[test]
fn test_identities_over_rationals() {
    let qq = RationalRing::new();
    for seed in SEEDS {
        let mut state = StaticRandom::from_seed(seed);
        check_ring_identities(&mut state, &qq);
        check_field_identities(&mut state, 24, &qq);
    }
}

#[test]
fn test_identities_modulo_prime() {
    let tuning = Tuning { karatsuba: 4, inv_series_newton: 4, hgcd: 4, ..Tuning::default() };
    let fast = NmodRing::with_tuning(1_000_003, tuning);
    let plain = NmodRing::new(1_000_003);
    for seed in SEEDS {
        let mut state = StaticRandom::from_seed(seed);
        check_ring_identities(&mut state, &fast);
        check_field_identities(&mut state, 90, &fast);
        check_field_identities(&mut state, 90, &plain);
    }
}

#[test]
fn test_identities_modulo_composite() {
    // Z/2^16: multiplication laws hold even though division does not
    let p = NmodRing::new(1 << 16);
    for seed in SEEDS {
        let mut state = StaticRandom::from_seed(seed);
        check_ring_identities(&mut state, &p);
    }
}
