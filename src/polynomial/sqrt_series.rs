// src/polynomial/sqrt_series.rs

use std::fmt::Debug;
use num::BigInt;
use log::{trace, warn};
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;
use crate::polynomial::inv_series::{inv_series, newton_ladder};
use crate::polynomial::mul::mullow;
use crate::polynomial::poly::GrPoly;

/// v /= 2, through the inverse of 2 when it exists.
pub(crate) fn halve_in_place<R: Ring>(v: &mut [R::Elem], ring: &R) -> GrResult<()> {
    let half = ring.from_u64(2).and_then(|two| ring.inv(&two));
    for x in v.iter_mut() {
        *x = match &half {
            Ok(h) => ring.mul(x, h)?,
            Err(_) => ring.div_ui(x, 2)?,
        };
    }
    Ok(())
}

fn constant_term_nonzero<R: Ring>(f: &[R::Elem], ring: &R) -> GrResult<()> {
    match f.first().map(|c| ring.is_zero(c)) {
        None | Some(Truth::True) => Err(GrError::Domain),
        Some(Truth::Unknown) => Err(GrError::Unable),
        Some(Truth::False) => Ok(()),
    }
}

fn is_characteristic_two<R: Ring>(ring: &R) -> bool {
    ring.characteristic() == BigInt::from(2)
}

/// Square root in characteristic 2: g(x)² = Σ g_i² x^(2i), so every odd
/// coefficient of f must vanish and g_i = sqrt(f_2i).
pub fn sqrt_series_char2<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    let flen = f.len().min(n);
    let mut g = vector::zeros(n, ring);
    for i in 0..flen {
        if i % 2 == 1 {
            match ring.is_zero(&f[i]) {
                Truth::True => {}
                Truth::False => return Err(GrError::Domain),
                Truth::Unknown => return Err(GrError::Unable),
            }
        } else {
            g[i / 2] = ring.sqrt(&f[i])?;
        }
    }
    Ok(g)
}

/// g_0 = sqrt(f_0), g_i = (f_i - Σ_{0<j<i} g_j g_(i-j)) / (2 g_0)
pub fn sqrt_series_basecase<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    constant_term_nonzero(f, ring)?;
    let flen = f.len().min(n);
    let mut g = vector::zeros(n, ring);
    g[0] = ring.sqrt(&f[0])?;

    let two_g0 = ring.add(&g[0], &g[0])?;
    let inv = ring.inv(&two_g0).ok();

    for i in 1..n {
        let fi = if i < flen { f[i].clone() } else { ring.zero() };
        let s = if i >= 2 {
            ring.dot_rev(Some(&fi), true, &g[1..i], &g[1..i])?
        } else {
            fi
        };
        g[i] = match &inv {
            Some(inv) => ring.mul(&s, inv)?,
            None => ring.div(&s, &two_g0)?,
        };
    }
    Ok(g)
}

/// Reciprocal square root by Newton iteration y ← y - y·(f·y² - 1)/2.
pub fn rsqrt_series_newton<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    constant_term_nonzero(f, ring)?;
    let ladder = newton_ladder(n, ring.tuning().sqrt_series_newton);
    let seed = sqrt_series_basecase(f, ladder[0], ring)?;
    let mut y = vector::fit(&inv_series(&seed, ladder[0], ring)?, ladder[0], ring);

    for w in ladder.windows(2) {
        let (m, np) = (w[0], w[1]);
        trace!("rsqrt_series_newton: lifting {} -> {}", m, np);
        let fn_ = &f[..f.len().min(np)];
        let t = mullow(&y, &y, np, ring)?;
        let u = vector::fit(&mullow(fn_, &t, np, ring)?, np, ring);
        let mut corr = mullow(&y, &u[m..np], np - m, ring)?;
        halve_in_place(&mut corr, ring)?;
        vector::neg_in_place(&mut corr, ring)?;
        y.resize_with(np, || ring.zero());
        for (j, c) in corr.into_iter().enumerate() {
            y[m + j] = c;
        }
    }
    Ok(y)
}

/// 1/sqrt(f) mod x^n.
pub fn rsqrt_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    constant_term_nonzero(f, ring)?;
    if is_characteristic_two(ring) {
        let g = sqrt_series_char2(f, n, ring)?;
        return inv_series(&g, n, ring);
    }
    if n <= ring.tuning().sqrt_series_newton {
        let g = sqrt_series_basecase(f, n, ring)?;
        return inv_series(&g, n, ring);
    }
    rsqrt_series_newton(f, n, ring)
}

/// sqrt(f) mod x^n. A zero series has square root zero; any other series
/// needs a nonzero constant term.
pub fn sqrt_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let flen = f.len().min(n);
    if vector::is_zero(&f[..flen], ring).is_true() {
        return Ok(vector::zeros(n, ring));
    }
    if is_characteristic_two(ring) {
        return sqrt_series_char2(f, n, ring);
    }
    constant_term_nonzero(f, ring)?;
    if n <= ring.tuning().sqrt_series_newton {
        return sqrt_series_basecase(f, n, ring);
    }
    match rsqrt_series_newton(f, n, ring) {
        Ok(y) => {
            let g = mullow(&f[..flen], &y, n, ring)?;
            Ok(vector::fit(&g, n, ring))
        }
        Err(GrError::Domain) => {
            warn!("sqrt_series: Newton iteration hit a non-unit, using basecase recurrence");
            sqrt_series_basecase(f, n, ring)
        }
        Err(e) => Err(e),
    }
}

impl<E: Clone + Debug> GrPoly<E> {
    pub fn sqrt_series<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(sqrt_series(self.coeffs(), n, ring)?, ring))
    }

    pub fn rsqrt_series<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(rsqrt_series(self.coeffs(), n, ring)?, ring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{IntegerRing, NmodRing, RationalRing};
    use crate::config::Tuning;
    use num::BigRational;

    #[test]
    fn test_sqrt_of_square_over_integers() {
        let zz = IntegerRing::new();
        let f = GrPoly::from_i64s(&[1, 2, 1], &zz).unwrap();
        let g = f.sqrt_series(3, &zz).unwrap();
        assert!(g.equal(&GrPoly::from_i64s(&[1, 1], &zz).unwrap(), &zz).is_true());
    }

    #[test]
    fn test_sqrt_one_plus_x_rational() {
        let qq = RationalRing::new();
        let g = sqrt_series(&[qq.one(), qq.one()], 4, &qq).unwrap();
        assert_eq!(
            g,
            vec![qq.fraction(1, 1), qq.fraction(1, 2), qq.fraction(-1, 8), qq.fraction(1, 16)]
        );
    }

    #[test]
    fn test_newton_rsqrt_matches_basecase() {
        let mut tuning = Tuning::default();
        tuning.sqrt_series_newton = 2;
        tuning.inv_series_newton = 2;
        let qq = RationalRing::with_tuning(tuning);
        let f: Vec<BigRational> = (0..10).map(|i| qq.fraction(i + 4, i + 1)).collect();
        let f0_square: Vec<BigRational> = {
            let mut v = f.clone();
            v[0] = qq.fraction(9, 4);
            v
        };
        let newton = rsqrt_series(&f0_square, 12, &qq).unwrap();
        let base = inv_series(&sqrt_series_basecase(&f0_square, 12, &qq).unwrap(), 12, &qq).unwrap();
        assert_eq!(newton, base);
        let s = sqrt_series(&f0_square, 12, &qq).unwrap();
        assert_eq!(s, sqrt_series_basecase(&f0_square, 12, &qq).unwrap());
    }

    #[test]
    fn test_characteristic_two() {
        let f2 = NmodRing::new(2);
        // (1 + x)^2 = 1 + x^2
        assert_eq!(sqrt_series(&[1, 0, 1], 3, &f2).unwrap(), vec![1, 1, 0]);
        assert_eq!(sqrt_series(&[1, 1], 3, &f2), Err(GrError::Domain));
    }

    #[test]
    fn test_zero_constant_term() {
        let qq = RationalRing::new();
        assert_eq!(sqrt_series(&[qq.zero(), qq.one()], 3, &qq), Err(GrError::Domain));
        assert_eq!(sqrt_series(&[qq.zero()], 3, &qq).unwrap(), vec![qq.zero(); 3]);
    }
}
