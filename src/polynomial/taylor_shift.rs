// src/polynomial/taylor_shift.rs

use std::fmt::Debug;
use log::debug;
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult};
use crate::core::vector;
use crate::polynomial::mul::{mul, mullow};
use crate::polynomial::poly::GrPoly;

/// f(x + c) by repeated synthetic division, O(n²) additions and
/// multiplications by c.
pub fn taylor_shift_horner<R: Ring>(f: &[R::Elem], c: &R::Elem, ring: &R) -> GrResult<Vec<R::Elem>> {
    let mut res = f.to_vec();
    let n = res.len();
    if n <= 1 || ring.is_zero(c).is_true() {
        return Ok(res);
    }
    let c_is_one = ring.is_one(c).is_true();
    for i in (0..n - 1).rev() {
        for j in i..n - 1 {
            let t = if c_is_one {
                res[j + 1].clone()
            } else {
                ring.mul(&res[j + 1], c)?
            };
            res[j] = ring.add(&res[j], &t)?;
        }
    }
    Ok(res)
}

/// f(x + c) = f_lo(x + c) + (x + c)^k·f_hi(x + c).
pub fn taylor_shift_divconquer<R: Ring>(f: &[R::Elem], c: &R::Elem, ring: &R) -> GrResult<Vec<R::Elem>> {
    let cutoff = ring.tuning().taylor_shift_divconquer.max(2);
    let linear = vec![c.clone(), ring.one()];
    // powers[i] = (x + c)^(2^i)
    let mut powers = vec![linear];
    divconquer_rec(f, c, &mut powers, cutoff, ring)
}

fn divconquer_rec<R: Ring>(
    f: &[R::Elem],
    c: &R::Elem,
    powers: &mut Vec<Vec<R::Elem>>,
    cutoff: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    if f.len() <= cutoff {
        return taylor_shift_horner(f, c, ring);
    }
    let mut level = 0;
    while (2usize << level) < f.len() {
        level += 1;
    }
    while powers.len() <= level {
        let last = &powers[powers.len() - 1];
        let next = mul(last, last, ring)?;
        powers.push(next);
    }
    let k = 1usize << level;
    let lo = divconquer_rec(&f[..k], c, powers, cutoff, ring)?;
    let hi = divconquer_rec(&f[k..], c, powers, cutoff, ring)?;
    let t = mul(&hi, &powers[level], ring)?;
    vector::add(&lo, &t, ring)
}

/// f(x + c) as a single convolution:
/// g_k = (1/k!) Σ_(i≥k) (i!·f_i)·c^(i-k)/(i-k)!.
/// Needs 1/(n-1)!; `Domain` otherwise.
pub fn taylor_shift_convolution<R: Ring>(f: &[R::Elem], c: &R::Elem, ring: &R) -> GrResult<Vec<R::Elem>> {
    let n = f.len();
    if n <= 1 {
        return Ok(f.to_vec());
    }

    let mut fact = Vec::with_capacity(n);
    fact.push(ring.one());
    for i in 1..n {
        let next = ring.mul_si(&fact[i - 1], i as i64)?;
        fact.push(next);
    }
    let mut inv_fact = vector::zeros(n, ring);
    inv_fact[n - 1] = ring.inv(&fact[n - 1])?;
    for i in (1..n).rev() {
        inv_fact[i - 1] = ring.mul_si(&inv_fact[i], i as i64)?;
    }

    // a reversed so the sum becomes a plain product
    let mut a = Vec::with_capacity(n);
    for i in (0..n).rev() {
        a.push(ring.mul(&f[i], &fact[i])?);
    }
    let mut b = Vec::with_capacity(n);
    let mut cpow = ring.one();
    for j in 0..n {
        b.push(ring.mul(&cpow, &inv_fact[j])?);
        cpow = ring.mul(&cpow, c)?;
    }

    let h = vector::fit(&mullow(&a, &b, n, ring)?, n, ring);
    let mut res = Vec::with_capacity(n);
    for k in 0..n {
        res.push(ring.mul(&h[n - 1 - k], &inv_fact[k])?);
    }
    Ok(res)
}

/// f(x + c).
pub fn taylor_shift<R: Ring>(f: &[R::Elem], c: &R::Elem, ring: &R) -> GrResult<Vec<R::Elem>> {
    if f.len() <= ring.tuning().taylor_shift_divconquer {
        return taylor_shift_horner(f, c, ring);
    }
    if ring.characteristic() == num::BigInt::from(0) || ring.characteristic() >= num::BigInt::from(f.len()) {
        match taylor_shift_convolution(f, c, ring) {
            Ok(res) => return Ok(res),
            Err(GrError::Domain) => debug!("taylor_shift: factorials not invertible, using divide-and-conquer"),
            Err(e) => return Err(e),
        }
    }
    taylor_shift_divconquer(f, c, ring)
}

impl<E: Clone + Debug> GrPoly<E> {
    /// self(x + c)
    pub fn taylor_shift<R: Ring<Elem = E>>(&self, c: &E, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(taylor_shift(self.coeffs(), c, ring)?, ring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{IntegerRing, NmodRing, RationalRing};
    use crate::core::static_random::StaticRandom;
    use num::BigInt;

    fn ints(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    #[test]
    fn test_shift_by_one() {
        let zz = IntegerRing::new();
        // 1 + 2x + 3x^2 at x + 1
        let r = taylor_shift_horner(&ints(&[1, 2, 3]), &BigInt::from(1), &zz).unwrap();
        assert_eq!(r, ints(&[6, 8, 3]));
        let r = taylor_shift_divconquer(&ints(&[1, 2, 3]), &BigInt::from(1), &zz).unwrap();
        assert_eq!(r, ints(&[6, 8, 3]));
    }

    #[test]
    fn test_convolution_needs_invertible_factorials() {
        let zz = IntegerRing::new();
        assert_eq!(
            taylor_shift_convolution(&ints(&[1, 2, 3]), &BigInt::from(1), &zz),
            Err(GrError::Domain)
        );
        let qq = RationalRing::new();
        let f = vec![qq.fraction(1, 1), qq.fraction(2, 1), qq.fraction(3, 1)];
        let r = taylor_shift_convolution(&f, &qq.fraction(-2, 1), &qq).unwrap();
        // 1 + 2(x-2) + 3(x-2)^2 = 9 - 10x + 3x^2
        assert_eq!(r, vec![qq.fraction(9, 1), qq.fraction(-10, 1), qq.fraction(3, 1)]);
    }

    #[test]
    fn test_algorithms_agree() {
        let p = NmodRing::new(1_000_003);
        let mut rng = StaticRandom::from_seed(5);
        let f = crate::core::vector::random(70, rng.rng(), &p);
        let c = 12_345u64;
        let horner = taylor_shift_horner(&f, &c, &p).unwrap();
        assert_eq!(taylor_shift_divconquer(&f, &c, &p).unwrap(), horner);
        assert_eq!(taylor_shift_convolution(&f, &c, &p).unwrap(), horner);
        assert_eq!(taylor_shift(&f, &c, &p).unwrap(), horner);
    }
}
