// src/polynomial/mul.rs
//
// Multiplication: schoolbook, Karatsuba and Toom-Cook-3, with a length
// dispatcher. Slice kernels return exactly min(n, len(a) + len(b) - 1)
// coefficients and an empty vector when either operand is empty.

use std::fmt::Debug;
use log::trace;
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult};
use crate::core::vector;
use crate::polynomial::poly::GrPoly;

fn same_operand<E>(a: &[E], b: &[E]) -> bool {
    std::ptr::eq(a.as_ptr(), b.as_ptr()) && a.len() == b.len()
}

fn product_len(la: usize, lb: usize, n: usize) -> usize {
    if la == 0 || lb == 0 {
        0
    } else {
        n.min(la + lb - 1)
    }
}

/// Schoolbook truncated product, one dot product per output coefficient.
/// Squaring is detected by operand identity and computes each cross term once.
pub fn mullow_classical<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    let (la, lb) = (a.len(), b.len());
    let len = product_len(la, lb, n);
    if len == 0 {
        return Ok(Vec::new());
    }

    let mut res = Vec::with_capacity(len);

    if same_operand(a, b) {
        for i in 0..len {
            let lo = i.saturating_sub(la - 1);
            let hi = i.min(la - 1);
            // pairs (k, i - k) with k < i - k
            let kend = ((i + 1) / 2).min(hi + 1).max(lo);
            let mut s = ring.dot_rev(None, false, &a[lo..kend], &a[i + 1 - kend..=i - lo])?;
            s = ring.add(&s, &s)?;
            if i % 2 == 0 && i / 2 >= lo && i / 2 <= hi {
                let sq = ring.sqr(&a[i / 2])?;
                s = ring.add(&s, &sq)?;
            }
            res.push(s);
        }
        return Ok(res);
    }

    for i in 0..len {
        let lo = i.saturating_sub(lb - 1);
        let hi = i.min(la - 1);
        res.push(ring.dot_rev(None, false, &a[lo..=hi], &b[i - hi..=i - lo])?);
    }
    Ok(res)
}

fn add_at<R: Ring>(res: &mut [R::Elem], offset: usize, v: &[R::Elem], ring: &R) -> GrResult<()> {
    if offset >= res.len() {
        return Ok(());
    }
    let end = (offset + v.len()).min(res.len());
    vector::add_assign(&mut res[offset..end], &v[..end - offset], ring)
}

/// Karatsuba full product. Operands are split at half the shorter length and
/// the three half-size products recurse through `mul`.
pub fn mul_karatsuba<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let squaring = same_operand(a, b);
    let (a, b) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let (la, lb) = (a.len(), b.len());
    if lb <= 1 {
        return mullow_classical(a, b, la + lb, ring);
    }

    let m = lb / 2;
    let (a0, a1) = a.split_at(m);
    let (b0, b1) = b.split_at(m);

    let (z0, z2, mid) = if squaring {
        let z0 = mul(a0, a0, ring)?;
        let z2 = mul(a1, a1, ring)?;
        let s = vector::add(a0, a1, ring)?;
        (z0, z2, mul(&s, &s, ring)?)
    } else {
        let z0 = mul(a0, b0, ring)?;
        let z2 = mul(a1, b1, ring)?;
        let sa = vector::add(a0, a1, ring)?;
        let sb = vector::add(b0, b1, ring)?;
        (z0, z2, mul(&sa, &sb, ring)?)
    };

    let mut mid = mid;
    vector::sub_assign(&mut mid[..z0.len()], &z0, ring)?;
    vector::sub_assign(&mut mid[..z2.len()], &z2, ring)?;

    let mut res = vector::zeros(la + lb - 1, ring);
    add_at(&mut res, 0, &z0, ring)?;
    add_at(&mut res, m, &mid, ring)?;
    add_at(&mut res, 2 * m, &z2, ring)?;
    Ok(res)
}

/// Whether the ring supports the exact divisions by 2 and 3 that Toom-3
/// interpolation needs.
pub fn toom3_available<R: Ring>(ring: &R) -> bool {
    let probe = |c: u64| -> bool {
        ring.from_u64(c)
            .and_then(|x| ring.divexact_ui(&x, c))
            .map(|q| ring.is_one(&q).is_true())
            .unwrap_or(false)
    };
    probe(2) && probe(3)
}

/// Toom-Cook-3 full product evaluated at 0, 1, -1, -2, ∞ with Bodrato's
/// interpolation sequence. Needs exact division by 2 and 3; `Unable` when
/// the ring lacks either, and for unbalanced operands.
pub fn mul_toom3<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let squaring = same_operand(a, b);
    let (a, b) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let (la, lb) = (a.len(), b.len());
    let m = (la + 2) / 3;
    if la < 3 || lb <= 2 * m {
        return Err(GrError::Unable);
    }
    if !toom3_available(ring) {
        return Err(GrError::Unable);
    }

    let w = 2 * m - 1;
    let (a0, a1, a2) = (&a[..m], &a[m..2 * m], &a[2 * m..]);
    let (b0, b1, b2) = (&b[..m], &b[m..2 * m], &b[2 * m..]);

    // p(1), p(-1), p(-2) for one operand
    let evaluate = |x0: &[R::Elem], x1: &[R::Elem], x2: &[R::Elem]| -> GrResult<[Vec<R::Elem>; 3]> {
        let p = vector::add(x0, x2, ring)?;
        let p1 = vector::add(&p, x1, ring)?;
        let pm1 = vector::sub(&p, x1, ring)?;
        let t = vector::add(&pm1, x2, ring)?;
        let t = vector::add(&t, &t, ring)?;
        let pm2 = vector::sub(&t, x0, ring)?;
        Ok([p1, pm1, pm2])
    };

    let [pa1, pam1, pam2] = evaluate(a0, a1, a2)?;
    let (r0, r1, rm1, rm2, rinf) = if squaring {
        (
            mul(a0, a0, ring)?,
            mul(&pa1, &pa1, ring)?,
            mul(&pam1, &pam1, ring)?,
            mul(&pam2, &pam2, ring)?,
            mul(a2, a2, ring)?,
        )
    } else {
        let [pb1, pbm1, pbm2] = evaluate(b0, b1, b2)?;
        (
            mul(a0, b0, ring)?,
            mul(&pa1, &pb1, ring)?,
            mul(&pam1, &pbm1, ring)?,
            mul(&pam2, &pbm2, ring)?,
            mul(a2, b2, ring)?,
        )
    };

    let r0 = vector::fit(&r0, w, ring);
    let r1 = vector::fit(&r1, w, ring);
    let rm1 = vector::fit(&rm1, w, ring);
    let rm2 = vector::fit(&rm2, w, ring);
    let r4 = vector::fit(&rinf, w, ring);

    let r3 = vector::sub(&rm2, &r1, ring)?;
    let r3 = vector::scalar_divexact_ui(&r3, 3, ring)?;
    let r1 = vector::sub(&r1, &rm1, ring)?;
    let r1 = vector::scalar_divexact_ui(&r1, 2, ring)?;
    let r2 = vector::sub(&rm1, &r0, ring)?;
    let r3 = vector::sub(&r2, &r3, ring)?;
    let r3 = vector::scalar_divexact_ui(&r3, 2, ring)?;
    let r4x2 = vector::add(&r4, &r4, ring)?;
    let r3 = vector::add(&r3, &r4x2, ring)?;
    let r2 = vector::add(&r2, &r1, ring)?;
    let r2 = vector::sub(&r2, &r4, ring)?;
    let r1 = vector::sub(&r1, &r3, ring)?;

    let mut res = vector::zeros(la + lb - 1, ring);
    add_at(&mut res, 0, &r0, ring)?;
    add_at(&mut res, m, &r1, ring)?;
    add_at(&mut res, 2 * m, &r2, ring)?;
    add_at(&mut res, 3 * m, &r3, ring)?;
    add_at(&mut res, 4 * m, &r4, ring)?;
    Ok(res)
}

/// Truncated product, choosing the algorithm from the operand lengths and
/// the ring's tuning.
pub fn mullow<R: Ring>(a: &[R::Elem], b: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    let len = product_len(a.len(), b.len(), n);
    if len == 0 {
        return Ok(Vec::new());
    }
    let squaring = same_operand(a, b);
    let a = &a[..a.len().min(len)];
    let b = if squaring { a } else { &b[..b.len().min(len)] };

    let tuning = ring.tuning();
    let short = a.len().min(b.len());
    if short < tuning.karatsuba.max(2) {
        return mullow_classical(a, b, len, ring);
    }

    let mut full = None;
    if short >= tuning.toom3 {
        match mul_toom3(a, b, ring) {
            Ok(v) => full = Some(v),
            Err(_) => trace!("toom3 not applicable at lengths {}x{}", a.len(), b.len()),
        }
    }
    let mut full = match full {
        Some(v) => v,
        None => mul_karatsuba(a, b, ring)?,
    };
    full.truncate(len);
    Ok(full)
}

/// Full product a·b.
pub fn mul<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    mullow(a, b, a.len() + b.len(), ring)
}

/// Product truncated to the first `n` coefficients, then normalised.
pub fn mullow_normalised<R: Ring>(a: &[R::Elem], b: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    let mut res = mullow(a, b, n, ring)?;
    vector::normalise(&mut res, ring);
    Ok(res)
}

impl<E: Clone + Debug> GrPoly<E> {
    pub fn mul<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(mul(self.coeffs(), other.coeffs(), ring)?, ring))
    }

    /// Product modulo x^n.
    pub fn mullow<R: Ring<Elem = E>>(&self, other: &Self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(mullow(self.coeffs(), other.coeffs(), n, ring)?, ring))
    }

    pub fn sqr<R: Ring<Elem = E>>(&self, ring: &R) -> GrResult<Self> {
        let a = self.coeffs();
        Ok(GrPoly::from_vec(mul(a, a, ring)?, ring))
    }

    pub fn mul_classical<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        let n = self.len() + other.len();
        Ok(GrPoly::from_vec(mullow_classical(self.coeffs(), other.coeffs(), n, ring)?, ring))
    }

    pub fn mul_karatsuba<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        if self.is_empty() || other.is_empty() {
            return Ok(GrPoly::new());
        }
        Ok(GrPoly::from_vec(mul_karatsuba(self.coeffs(), other.coeffs(), ring)?, ring))
    }

    pub fn mul_toom3<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        if self.is_empty() || other.is_empty() {
            return Ok(GrPoly::new());
        }
        Ok(GrPoly::from_vec(mul_toom3(self.coeffs(), other.coeffs(), ring)?, ring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{IntegerRing, NmodRing};
    use crate::config::Tuning;
    use crate::core::static_random::StaticRandom;
    use num::BigInt;

    fn ints(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    #[test]
    fn test_classical_small() {
        let zz = IntegerRing::new();
        let a = ints(&[1, 1]);
        let b = ints(&[1, 1]);
        assert_eq!(mullow_classical(&a, &b, 3, &zz).unwrap(), ints(&[1, 2, 1]));
        assert_eq!(mullow_classical(&a, &b, 2, &zz).unwrap(), ints(&[1, 2]));
        assert_eq!(mullow_classical(&a, &ints(&[]), 2, &zz).unwrap(), ints(&[]));
    }

    #[test]
    fn test_squaring_matches_general_product() {
        let zz = IntegerRing::new();
        let a = ints(&[3, -1, 4, 1, -5, 9]);
        let b = a.clone();
        let sq = mullow_classical(&a, &a, 11, &zz).unwrap();
        let gen = mullow_classical(&a, &b, 11, &zz).unwrap();
        assert_eq!(sq, gen);
        let sq = mullow_classical(&a, &a, 4, &zz).unwrap();
        assert_eq!(sq, gen[..4].to_vec());
    }

    #[test]
    fn test_karatsuba_and_toom_agree_with_classical() {
        let zz = IntegerRing::new();
        let mut rng = StaticRandom::from_seed(11);
        for &(la, lb) in &[(7, 7), (20, 13), (33, 33), (40, 25)] {
            let a = crate::core::vector::random(la, rng.rng(), &zz);
            let b = crate::core::vector::random(lb, rng.rng(), &zz);
            let expected = mullow_classical(&a, &b, la + lb, &zz).unwrap();
            assert_eq!(mul_karatsuba(&a, &b, &zz).unwrap(), expected);
            if let Ok(t) = mul_toom3(&a, &b, &zz) {
                assert_eq!(t, expected);
            }
            assert_eq!(mul_karatsuba(&a, &a, &zz).unwrap(), mullow_classical(&a, &a, 2 * la, &zz).unwrap());
        }
    }

    #[test]
    fn test_toom3_balanced_squaring() {
        let zz = IntegerRing::new();
        let a = ints(&[1, -2, 3, -4, 5, -6, 7, -8, 9]);
        let expected = mullow_classical(&a, &a, 17, &zz).unwrap();
        assert_eq!(mul_toom3(&a, &a, &zz).unwrap(), expected);
    }

    #[test]
    fn test_toom3_unavailable_mod_6() {
        let r = NmodRing::new(6);
        assert!(!toom3_available(&r));
        let a: Vec<u64> = (0..12).map(|i| i % 6).collect();
        assert_eq!(mul_toom3(&a, &a, &r), Err(GrError::Unable));
    }

    #[test]
    fn test_dispatcher_with_low_cutoffs() {
        let mut tuning = Tuning::default();
        tuning.karatsuba = 2;
        tuning.toom3 = 6;
        let fast = NmodRing::with_tuning(1_000_000_007, tuning);
        let slow = NmodRing::new(1_000_000_007);
        let mut rng = StaticRandom::from_seed(5);
        for &(la, lb, n) in &[(30, 30, 59), (31, 17, 40), (50, 9, 20), (12, 12, 5)] {
            let a = crate::core::vector::random(la, rng.rng(), &slow);
            let b = crate::core::vector::random(lb, rng.rng(), &slow);
            assert_eq!(
                mullow(&a, &b, n, &fast).unwrap(),
                mullow_classical(&a, &b, n, &slow).unwrap()
            );
        }
    }

    #[test]
    fn test_dispatcher_mod_small_prime_power_falls_back() {
        let mut tuning = Tuning::default();
        tuning.karatsuba = 2;
        tuning.toom3 = 3;
        let r = NmodRing::with_tuning(8, tuning);
        let a: Vec<u64> = (0..20).map(|i| (i * 3 + 1) % 8).collect();
        let b: Vec<u64> = (0..20).map(|i| (i * 5 + 2) % 8).collect();
        assert_eq!(mul(&a, &b, &r).unwrap(), mullow_classical(&a, &b, 40, &r).unwrap());
    }
}
