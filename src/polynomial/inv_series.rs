// src/polynomial/inv_series.rs
//
// Power-series reciprocal and quotient. Every kernel returns exactly `n`
// coefficients.

use std::fmt::Debug;
use log::{debug, trace, warn};
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;
use crate::polynomial::mul::mullow;
use crate::polynomial::poly::GrPoly;

/// Precisions n, ceil(n/2), ... down to the first one at or below `cutoff`,
/// returned in increasing order.
pub fn newton_ladder(n: usize, cutoff: usize) -> Vec<usize> {
    let cutoff = cutoff.max(1);
    let mut ladder = vec![n];
    while let Some(&last) = ladder.last() {
        if last <= cutoff {
            break;
        }
        ladder.push((last + 1) / 2);
    }
    ladder.reverse();
    ladder
}

/// Inverse of the constant term: `Domain` when it is provably zero or not a
/// unit, `Unable` when the ring cannot decide.
pub fn inv_constant<R: Ring>(c: Option<&R::Elem>, ring: &R) -> GrResult<R::Elem> {
    let c = match c {
        Some(c) => c,
        None => return Err(GrError::Domain),
    };
    match ring.is_zero(c) {
        Truth::True => Err(GrError::Domain),
        Truth::Unknown => Err(GrError::Unable),
        Truth::False => ring.inv(c),
    }
}

/// O(n²) recurrence: res[i] = -c⁻¹ Σ q[j]·res[i-j]. Pure binomials
/// c + d·x^k are resolved in O(n).
pub fn inv_series_basecase<R: Ring>(q: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let cinv = inv_constant(q.first(), ring)?;
    let qlen = q.len().min(n);
    let mut res = vector::zeros(n, ring);
    res[0] = cinv.clone();
    if qlen == 1 {
        return Ok(res);
    }

    let is_binomial = qlen > 2 && vector::is_zero(&q[1..qlen - 1], ring).is_true();
    if is_binomial {
        let k = qlen - 1;
        let ratio = ring.mul(&q[k], &cinv)?;
        let ratio = ring.neg(&ratio)?;
        let mut i = k;
        while i < n {
            res[i] = ring.mul(&res[i - k], &ratio)?;
            i += k;
        }
        return Ok(res);
    }

    let cinv_is_one = ring.is_one(&cinv).is_true();
    for i in 1..n {
        let l = i.min(qlen - 1);
        let s = ring.dot_rev(None, false, &q[1..=l], &res[i - l..i])?;
        let s = ring.neg(&s)?;
        res[i] = if cinv_is_one { s } else { ring.mul(&s, &cinv)? };
    }
    Ok(res)
}

/// Newton lifting res ← res - res·(q·res - 1) from a basecase seed.
pub fn inv_series_newton<R: Ring>(q: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let ladder = newton_ladder(n, ring.tuning().inv_series_newton);
    let mut res = inv_series_basecase(q, ladder[0], ring)?;

    for w in ladder.windows(2) {
        let (m, np) = (w[0], w[1]);
        trace!("inv_series_newton: lifting {} -> {}", m, np);
        let qn = &q[..q.len().min(np)];
        let t = vector::fit(&mullow(qn, &res, np, ring)?, np, ring);
        let mut corr = mullow(&res, &t[m..np], np - m, ring)?;
        vector::neg_in_place(&mut corr, ring)?;
        res.resize_with(np, || ring.zero());
        for (j, c) in corr.into_iter().enumerate() {
            res[m + j] = c;
        }
    }
    Ok(res)
}

/// 1/q mod x^n.
pub fn inv_series<R: Ring>(q: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    if q.is_empty() {
        return Err(GrError::Domain);
    }
    let qlen = q.len().min(n);
    if qlen <= 2 || n <= ring.tuning().inv_series_newton {
        return inv_series_basecase(q, n, ring);
    }
    inv_series_newton(q, n, ring)
}

/// a/b mod x^n by the convolution recurrence. Multiplies by b[0]⁻¹ when it
/// exists and otherwise divides by b[0] at every step.
pub fn div_series_basecase<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let b0 = match b.first() {
        Some(b0) => b0,
        None => return Err(GrError::Domain),
    };
    match ring.is_zero(b0) {
        Truth::True => return Err(GrError::Domain),
        Truth::Unknown => return Err(GrError::Unable),
        Truth::False => {}
    }
    let inv = ring.inv(b0).ok();
    let blen = b.len().min(n);
    let mut q = vector::zeros(n, ring);

    for i in 0..n {
        let l = i.min(blen - 1);
        let ai = if i < a.len() { a[i].clone() } else { ring.zero() };
        let s = ring.dot_rev(Some(&ai), true, &b[1..=l], &q[i - l..i])?;
        q[i] = match &inv {
            Some(inv) => ring.mul(&s, inv)?,
            None => ring.div(&s, b0)?,
        };
    }
    Ok(q)
}

/// Karp–Markstein: q0 = a·b⁻¹ to half precision, then one correction using
/// the residual a - b·q0.
pub fn div_series_newton<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let m = (n + 1) / 2;
    let binv = inv_series(b, m, ring)?;
    let a = &a[..a.len().min(n)];
    let b = &b[..b.len().min(n)];

    let q0 = vector::fit(&mullow(a, &binv, m, ring)?, m, ring);
    let bq0 = vector::fit(&mullow(b, &q0, n, ring)?, n, ring);
    let mut r = vector::fit(a, n, ring);
    vector::sub_assign(&mut r, &bq0, ring)?;

    let corr = mullow(&binv, &r[m..n], n - m, ring)?;
    let mut q = q0;
    q.extend(vector::fit(&corr, n - m, ring));
    Ok(q)
}

/// a/b mod x^n. Falls back from Newton to the basecase recurrence when the
/// constant term of b has no inverse.
pub fn div_series<R: Ring>(a: &[R::Elem], b: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    if b.is_empty() {
        return Err(GrError::Domain);
    }
    if a.is_empty() {
        return match ring.is_zero(&b[0]) {
            Truth::True => Err(GrError::Domain),
            Truth::Unknown => Err(GrError::Unable),
            Truth::False => Ok(vector::zeros(n, ring)),
        };
    }
    if b.len().min(n) <= 2 || n <= ring.tuning().div_series_newton {
        return div_series_basecase(a, b, n, ring);
    }
    match div_series_newton(a, b, n, ring) {
        Ok(q) => Ok(q),
        Err(GrError::Domain) => {
            warn!("div_series: constant term not invertible, using basecase division");
            div_series_basecase(a, b, n, ring)
        }
        Err(e) => {
            debug!("div_series: Newton iteration failed with {:?}", e);
            Err(e)
        }
    }
}

impl<E: Clone + Debug> GrPoly<E> {
    /// 1/self mod x^n
    pub fn inv_series<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(inv_series(self.coeffs(), n, ring)?, ring))
    }

    pub fn inv_series_basecase<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(inv_series_basecase(self.coeffs(), n, ring)?, ring))
    }

    pub fn inv_series_newton<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(inv_series_newton(self.coeffs(), n, ring)?, ring))
    }

    /// self/other mod x^n
    pub fn div_series<R: Ring<Elem = E>>(&self, other: &Self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(div_series(self.coeffs(), other.coeffs(), n, ring)?, ring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{IntegerRing, NmodRing, RationalRing};
    use crate::config::Tuning;
    use crate::core::static_random::StaticRandom;
    use num::BigInt;

    fn ints(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    #[test]
    fn test_ladder() {
        assert_eq!(newton_ladder(10, 3), vec![3, 5, 10]);
        assert_eq!(newton_ladder(2, 5), vec![2]);
        assert_eq!(newton_ladder(17, 4), vec![3, 5, 9, 17]);
    }

    #[test]
    fn test_geometric_series() {
        let zz = IntegerRing::new();
        let inv = inv_series(&ints(&[1, -1]), 6, &zz).unwrap();
        assert_eq!(inv, ints(&[1, 1, 1, 1, 1, 1]));
    }

    #[test]
    fn test_binomial_fast_path() {
        let zz = IntegerRing::new();
        // 1/(1 + 2x^3)
        let inv = inv_series_basecase(&ints(&[1, 0, 0, 2]), 10, &zz).unwrap();
        assert_eq!(inv, ints(&[1, 0, 0, -2, 0, 0, 4, 0, 0, -8]));
    }

    #[test]
    fn test_constant_term_errors() {
        let zz = IntegerRing::new();
        assert_eq!(inv_series(&ints(&[0, 1]), 4, &zz), Err(GrError::Domain));
        assert_eq!(inv_series(&ints(&[2, 1]), 4, &zz), Err(GrError::Domain));
        assert_eq!(inv_series(&ints(&[]), 4, &zz), Err(GrError::Domain));
    }

    #[test]
    fn test_newton_matches_basecase() {
        let mut tuning = Tuning::default();
        tuning.inv_series_newton = 3;
        let p = NmodRing::with_tuning(998_244_353, tuning);
        let mut rng = StaticRandom::from_seed(9);
        let mut q = crate::core::vector::random(30, rng.rng(), &p);
        q[0] = 7;
        for n in [1usize, 2, 5, 16, 31, 45] {
            assert_eq!(
                inv_series_newton(&q, n, &p).unwrap(),
                inv_series_basecase(&q, n, &p).unwrap()
            );
        }
    }

    #[test]
    fn test_div_series_noinv_path() {
        let zz = IntegerRing::new();
        // (2 + 4x) / (2 + 2x) = (1 + 2x)/(1 + x) = 1 + x - x^2 + x^3 ...
        let q = div_series_basecase(&ints(&[2, 4]), &ints(&[2, 2]), 5, &zz).unwrap();
        assert_eq!(q, ints(&[1, 1, -1, 1, -1]));
    }

    #[test]
    fn test_div_series_newton_fallback() {
        let mut tuning = Tuning::default();
        tuning.div_series_newton = 2;
        tuning.inv_series_newton = 2;
        let zz = IntegerRing::with_tuning(tuning);
        let a = ints(&[2, 4, 6, 8, 10, 12]);
        let b = ints(&[2, 2, 2, 2]);
        let q = div_series(&a, &b, 8, &zz).unwrap();
        assert_eq!(q, div_series_basecase(&a, &b, 8, &zz).unwrap());
    }

    #[test]
    fn test_div_series_newton_matches_basecase() {
        let mut tuning = Tuning::default();
        tuning.inv_series_newton = 2;
        let qq = RationalRing::with_tuning(tuning);
        let a: Vec<_> = (1..12).map(|i| qq.fraction(i, 3)).collect();
        let b: Vec<_> = (1..9).map(|i| qq.fraction(2 * i - 1, i)).collect();
        assert_eq!(
            div_series_newton(&a, &b, 15, &qq).unwrap(),
            div_series_basecase(&a, &b, 15, &qq).unwrap()
        );
    }
}
