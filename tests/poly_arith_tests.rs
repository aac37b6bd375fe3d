// Integration tests for polynomial construction, normalisation and multiplication
use grpoly::backends::{IntegerRing, NmodRing, RationalRing, RealBallRing, Ball};
use grpoly::core::static_random::StaticRandom;
use grpoly::core::{Ring, Truth};
use grpoly::core::vector;
use grpoly::polynomial::GrPoly;
use grpoly::polynomial::mul::{mul_karatsuba, mul_toom3, mullow, mullow_classical};
use num::BigInt;

fn ints(values: &[i64]) -> Vec<BigInt> {
    values.iter().map(|&v| BigInt::from(v)).collect()
}

fn random_poly<R: Ring>(len: usize, state: &mut StaticRandom, ring: &R) -> GrPoly<R::Elem> {
    let mut v = vector::random(len, state.rng(), ring);
    if let Some(last) = v.last_mut() {
        if ring.is_zero(last).is_true() {
            *last = ring.one();
        }
    }
    GrPoly::from_vec(v, ring)
}

#[test]
fn test_mullow_one_plus_x_squared() {
    let zz = IntegerRing::new();
    let a = GrPoly::from_i64s(&[1, 1], &zz).unwrap();
    let p = a.mullow(&a, 3, &zz).unwrap();
    assert_eq!(p.coeffs(), ints(&[1, 2, 1]).as_slice());
    let p2 = a.mullow(&a, 2, &zz).unwrap();
    assert_eq!(p2.coeffs(), ints(&[1, 2]).as_slice());
}

#[test]
fn test_reverse_round_trip() {
    let qq = RationalRing::new();
    let mut state = StaticRandom::from_seed(11);
    for len in 0..20 {
        let f = random_poly(len, &mut state, &qq);
        for n in [len, len + 1, len + 5] {
            let back = f.reverse(n, &qq).reverse(n, &qq);
            assert!(back.equal(&f, &qq).is_true(), "len {} n {}", len, n);
        }
    }
}

#[test]
fn test_normalise_is_idempotent() {
    let zz = IntegerRing::new();
    let mut f = GrPoly::from_vec_unnormalised(ints(&[3, 0, 5, 0, 0]));
    f.normalise(&zz);
    let once = f.clone();
    f.normalise(&zz);
    assert_eq!(f.len(), 3);
    assert_eq!(f.coeffs(), once.coeffs());

    // an undecided trailing coefficient stops the trim
    let rr = RealBallRing::new();
    let mut g = GrPoly::from_vec_unnormalised(vec![
        Ball::exact(1.0),
        Ball::new(0.0, 1e-9),
        Ball::exact(0.0),
    ]);
    g.normalise(&rr);
    assert_eq!(g.len(), 2);
    g.normalise(&rr);
    assert_eq!(g.len(), 2);
    assert_eq!(g.is_zero(&rr), Truth::False);
}

#[test]
fn test_multiplication_distributes() {
    let p = NmodRing::new(1_000_003);
    let mut state = StaticRandom::from_seed(5);
    for &len in &[1usize, 3, 17, 40, 90] {
        let f = random_poly(len, &mut state, &p);
        let g = random_poly(len + 3, &mut state, &p);
        let h = random_poly(len / 2 + 1, &mut state, &p);
        let lhs = f.add(&g, &p).unwrap().mul(&h, &p).unwrap();
        let rhs = f.mul(&h, &p).unwrap().add(&g.mul(&h, &p).unwrap(), &p).unwrap();
        assert!(lhs.equal(&rhs, &p).is_true(), "length {}", len);
    }
}

#[test]
fn test_fast_multiplication_matches_schoolbook() {
    let zz = IntegerRing::new();
    let mut state = StaticRandom::from_seed(21);
    for &(la, lb) in &[(20usize, 20usize), (33, 17), (70, 70), (100, 64)] {
        let a = random_poly(la, &mut state, &zz);
        let b = random_poly(lb, &mut state, &zz);
        let n = la + lb - 1;
        let classical = mullow_classical(a.coeffs(), b.coeffs(), n, &zz).unwrap();
        let kara = mul_karatsuba(a.coeffs(), b.coeffs(), &zz).unwrap();
        assert_eq!(kara[..n], classical[..]);
        let auto = mullow(a.coeffs(), b.coeffs(), n, &zz).unwrap();
        assert_eq!(auto, classical);
        if la == lb {
            let toom = mul_toom3(a.coeffs(), b.coeffs(), &zz).unwrap();
            assert_eq!(toom[..n], classical[..]);
        }
    }
}

#[test]
fn test_squaring_matches_product() {
    let qq = RationalRing::new();
    let mut state = StaticRandom::from_seed(8);
    let f = random_poly(45, &mut state, &qq);
    let sq = f.sqr(&qq).unwrap();
    let prod = f.mul_classical(&f.clone(), &qq).unwrap();
    assert!(sq.equal(&prod, &qq).is_true());
}

#[test]
fn test_polynomial_basics() {
    let zz = IntegerRing::new();
    let x = GrPoly::<BigInt>::gen(&zz);
    assert_eq!(x.degree(), 1);
    assert!(x.is_gen(&zz).is_true());
    assert!(GrPoly::<BigInt>::zero().is_zero(&zz).is_true());
    assert_eq!(GrPoly::<BigInt>::zero().degree(), -1);

    let f = GrPoly::from_i64s(&[0, 0, 3, 1], &zz).unwrap();
    assert!(f.is_monic(&zz).is_true());
    assert_eq!(f.shift_right(2, &zz).coeffs(), ints(&[3, 1]).as_slice());
    assert!(f.shift_right(2, &zz).shift_left(2, &zz).equal(&f, &zz).is_true());
    assert_eq!(f.derivative(&zz).unwrap().coeffs(), ints(&[0, 6, 3]).as_slice());
    assert_eq!(f.write("x", &zz), "3*x^2 + 1*x^3");

    let mut g = f.clone();
    g.set_coeff(3, BigInt::from(0), &zz);
    assert_eq!(g.degree(), 2);
    g.truncate(1, &zz);
    assert!(g.is_zero(&zz).is_true());
}

#[test]
fn test_equality_is_three_valued() {
    let rr = RealBallRing::new();
    let a = GrPoly::from_vec(vec![Ball::exact(1.0), Ball::exact(2.0)], &rr);
    let b = GrPoly::from_vec(vec![Ball::exact(1.0), Ball::new(2.0, 1e-6)], &rr);
    let c = GrPoly::from_vec(vec![Ball::exact(1.0), Ball::exact(3.0)], &rr);
    assert_eq!(a.equal(&b, &rr), Truth::Unknown);
    assert_eq!(a.equal(&c, &rr), Truth::False);
    assert_eq!(a.equal(&a.clone(), &rr), Truth::True);
}
