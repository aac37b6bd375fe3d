// src/polynomial/elementary.rs
//
// Elementary functions of power series. The ring supplies the value at the
// constant term through `Ring::elementary`; every higher coefficient is
// derived here. All kernels return exactly `n` coefficients.

use std::fmt::Debug;
use log::{trace, warn};
use crate::core::ring::{ElementaryFunction, Ring};
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;
use crate::polynomial::inv_series::{div_series, inv_series, newton_ladder};
use crate::polynomial::mul::mullow;
use crate::polynomial::poly::{derivative, integral, naturals_inverse_table, GrPoly};
use crate::polynomial::sqrt_series::{halve_in_place, rsqrt_series};

fn constant_term<R: Ring>(f: &[R::Elem], ring: &R) -> R::Elem {
    match f.first() {
        Some(c) => c.clone(),
        None => ring.zero(),
    }
}

fn eval_constant<R: Ring>(func: ElementaryFunction, f: &[R::Elem], ring: &R) -> GrResult<R::Elem> {
    ring.elementary(func, &constant_term(f, ring))
}

/// f mod x^n with the constant term replaced by zero.
fn without_constant<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> Vec<R::Elem> {
    let mut h = vector::fit(f, n, ring);
    if n > 0 {
        h[0] = ring.zero();
    }
    h
}

/// j·f_j for j = 1..len, truncated to `n` terms of f.
fn scaled_derivative<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    derivative(&f[..f.len().min(n)], ring)
}

/// v[k] /= k for k >= 1, with v[0] untouched.
fn divide_by_index<R: Ring>(v: &mut [R::Elem], table: &Option<Vec<R::Elem>>, k: usize, ring: &R) -> GrResult<()> {
    v[k] = match table {
        Some(t) => ring.mul(&v[k], &t[k - 1])?,
        None => ring.div_ui(&v[k], k as u64)?,
    };
    Ok(())
}

/// c + ∫ num/den, to `n` terms.
fn integral_of_quotient<R: Ring>(
    c: R::Elem,
    num: &[R::Elem],
    den: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let q = div_series(num, den, n - 1, ring)?;
    let mut res = vector::fit(&integral(&q, ring)?, n, ring);
    res[0] = c;
    Ok(res)
}

/// c + ∫ a·b, to `n` terms.
fn integral_of_product<R: Ring>(
    c: R::Elem,
    a: &[R::Elem],
    b: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let p = mullow(a, b, n - 1, ring)?;
    let mut res = vector::fit(&integral(&p, ring)?, n, ring);
    res[0] = c;
    Ok(res)
}

/// 1 + s·f² mod x^m for s = ±1.
fn one_plus_signed_square<R: Ring>(f: &[R::Elem], negate: bool, m: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    let mut t = vector::fit(&mullow(f, f, m, ring)?, m.max(1), ring);
    if negate {
        vector::neg_in_place(&mut t, ring)?;
    }
    t[0] = ring.add(&t[0], &ring.one())?;
    Ok(t)
}

/// exp by the recurrence k·g_k = Σ j·f_j·g_(k-j).
pub fn exp_series_basecase<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut g = vector::zeros(n, ring);
    g[0] = eval_constant(ElementaryFunction::Exp, f, ring)?;
    let flen = f.len().min(n);
    if flen <= 1 {
        return Ok(g);
    }

    let fp = scaled_derivative(f, n, ring)?;
    let table = naturals_inverse_table(n - 1, ring);
    for k in 1..n {
        let l = k.min(flen - 1);
        g[k] = ring.dot_rev(None, false, &fp[..l], &g[k - l..k])?;
        divide_by_index(&mut g, &table, k, ring)?;
    }
    Ok(g)
}

/// log(f) - log(f_0) = ∫ f'/f
fn log_series_noconst<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let fp = scaled_derivative(f, n, ring)?;
    let f = &f[..f.len().min(n)];
    integral_of_quotient(ring.zero(), &fp, f, n, ring)
}

/// exp by Newton iteration g ← g·(1 + h - log g) on exp(f - f_0), scaled by
/// exp(f_0) at the end.
pub fn exp_series_newton<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let e0 = eval_constant(ElementaryFunction::Exp, f, ring)?;
    let h = without_constant(f, n, ring);
    let ladder = newton_ladder(n, ring.tuning().exp_series_newton);
    let mut g = exp_series_basecase(&h[..ladder[0]], ladder[0], ring)?;

    for w in ladder.windows(2) {
        let (m, np) = (w[0], w[1]);
        trace!("exp_series_newton: lifting {} -> {}", m, np);
        let l = log_series_noconst(&g, np, ring)?;
        let mut d = h[..np].to_vec();
        vector::sub_assign(&mut d, &l, ring)?;
        let corr = mullow(&g, &d[m..np], np - m, ring)?;
        g.resize_with(np, || ring.zero());
        for (j, c) in corr.into_iter().enumerate() {
            g[m + j] = c;
        }
    }

    if !ring.is_one(&e0).is_true() {
        vector::scalar_mul_in_place(&mut g, &e0, ring)?;
    }
    Ok(g)
}

pub fn exp_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    let flen = f.len().min(n);
    if flen <= 2 || n <= ring.tuning().exp_series_newton {
        return exp_series_basecase(f, n, ring);
    }
    exp_series_newton(f, n, ring)
}

/// log(f) mod x^n; needs a nonzero constant term.
pub fn log_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    match f.first().map(|c| ring.is_zero(c)) {
        None | Some(Truth::True) => return Err(GrError::Domain),
        Some(Truth::Unknown) => return Err(GrError::Unable),
        Some(Truth::False) => {}
    }
    let c = eval_constant(ElementaryFunction::Log, f, ring)?;
    let mut res = log_series_noconst(f, n, ring)?;
    res[0] = c;
    Ok(res)
}

/// atan(f) = atan(f_0) + ∫ f'/(1 + f²)
pub fn atan_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let c = eval_constant(ElementaryFunction::Atan, f, ring)?;
    atan_like(c, f, false, n, ring)
}

/// atanh(f) = atanh(f_0) + ∫ f'/(1 - f²)
pub fn atanh_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let c = eval_constant(ElementaryFunction::Atanh, f, ring)?;
    atan_like(c, f, true, n, ring)
}

fn atan_like<R: Ring>(c: R::Elem, f: &[R::Elem], hyperbolic: bool, n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    let fp = scaled_derivative(f, n, ring)?;
    let den = one_plus_signed_square(&f[..f.len().min(n)], hyperbolic, n.saturating_sub(1), ring)?;
    integral_of_quotient(c, &fp, &den, n, ring)
}

/// asin(f) = asin(f_0) + ∫ f'/sqrt(1 - f²)
pub fn asin_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let c = eval_constant(ElementaryFunction::Asin, f, ring)?;
    asin_like(c, f, true, false, n, ring)
}

/// asinh(f) = asinh(f_0) + ∫ f'/sqrt(1 + f²)
pub fn asinh_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let c = eval_constant(ElementaryFunction::Asinh, f, ring)?;
    asin_like(c, f, false, false, n, ring)
}

/// acos(f) = acos(f_0) - ∫ f'/sqrt(1 - f²)
pub fn acos_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let c = eval_constant(ElementaryFunction::Acos, f, ring)?;
    asin_like(c, f, true, true, n, ring)
}

fn asin_like<R: Ring>(
    c: R::Elem,
    f: &[R::Elem],
    negate_square: bool,
    negate_integrand: bool,
    n: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    let m = n.saturating_sub(1);
    let mut fp = scaled_derivative(f, n, ring)?;
    if negate_integrand {
        vector::neg_in_place(&mut fp, ring)?;
    }
    let t = one_plus_signed_square(&f[..f.len().min(n)], negate_square, m, ring)?;
    let r = rsqrt_series(&t, m, ring)?;
    integral_of_product(c, &fp, &r, n, ring)
}

/// sin and cos together by the coupled recurrences
/// k·s_k = Σ j·f_j·c_(k-j), k·c_k = -Σ j·f_j·s_(k-j).
pub fn sin_cos_series_basecase<R: Ring>(
    f: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<(Vec<R::Elem>, Vec<R::Elem>)> {
    if n == 0 {
        return Ok((Vec::new(), Vec::new()));
    }
    let mut s = vector::zeros(n, ring);
    let mut c = vector::zeros(n, ring);
    s[0] = eval_constant(ElementaryFunction::Sin, f, ring)?;
    c[0] = eval_constant(ElementaryFunction::Cos, f, ring)?;
    let flen = f.len().min(n);
    if flen <= 1 {
        return Ok((s, c));
    }

    let fp = scaled_derivative(f, n, ring)?;
    let table = naturals_inverse_table(n - 1, ring);
    for k in 1..n {
        let l = k.min(flen - 1);
        let ss = ring.dot_rev(None, false, &fp[..l], &c[k - l..k])?;
        let cc = ring.dot_rev(None, false, &fp[..l], &s[k - l..k])?;
        s[k] = ss;
        c[k] = ring.neg(&cc)?;
        divide_by_index(&mut s, &table, k, ring)?;
        divide_by_index(&mut c, &table, k, ring)?;
    }
    Ok((s, c))
}

/// Tangent half-angle form: with t = tan((f - f_0)/2),
/// sin = 2t/(1 + t²) and cos = (1 - t²)/(1 + t²), rotated by f_0.
pub fn sin_cos_series_tangent<R: Ring>(
    f: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<(Vec<R::Elem>, Vec<R::Elem>)> {
    if n == 0 {
        return Ok((Vec::new(), Vec::new()));
    }
    let f0 = constant_term(f, ring);
    let mut h = without_constant(f, n, ring);
    halve_in_place(&mut h, ring)?;

    let t = tan_series(&h, n, ring)?;
    let u = one_plus_signed_square(&t, false, n, ring)?;
    let ui = inv_series(&u, n, ring)?;

    let mut s1 = vector::fit(&mullow(&t, &ui, n, ring)?, n, ring);
    for x in s1.iter_mut() {
        *x = ring.add(x, x)?;
    }
    let mut c1 = vector::zeros(n, ring);
    for (x, y) in c1.iter_mut().zip(ui.iter()) {
        *x = ring.add(y, y)?;
    }
    c1[0] = ring.sub(&c1[0], &ring.one())?;

    if ring.is_zero(&f0).is_true() {
        return Ok((s1, c1));
    }
    let sin0 = ring.elementary(ElementaryFunction::Sin, &f0)?;
    let cos0 = ring.elementary(ElementaryFunction::Cos, &f0)?;
    let mut s = vector::scalar_mul(&c1, &sin0, ring)?;
    vector::scalar_addmul(&mut s, &s1, &cos0, ring)?;
    let mut c = vector::scalar_mul(&c1, &cos0, ring)?;
    vector::scalar_submul(&mut c, &s1, &sin0, ring)?;
    Ok((s, c))
}

pub fn sin_cos_series<R: Ring>(
    f: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<(Vec<R::Elem>, Vec<R::Elem>)> {
    let flen = f.len().min(n);
    if flen > 2 && n > ring.tuning().exp_series_newton && ring.characteristic() == num::BigInt::from(0) {
        match sin_cos_series_tangent(f, n, ring) {
            Ok(res) => return Ok(res),
            Err(GrError::Domain) => warn!("sin_cos_series: tangent form failed, using basecase recurrence"),
            Err(e) => return Err(e),
        }
    }
    sin_cos_series_basecase(f, n, ring)
}

pub fn sin_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    Ok(sin_cos_series(f, n, ring)?.0)
}

pub fn cos_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    Ok(sin_cos_series(f, n, ring)?.1)
}

/// tan by Newton iteration t ← t + (1 + t²)(f - atan t), seeded with
/// sin/cos at low precision.
pub fn tan_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let cutoff = ring.tuning().exp_series_newton;
    let ladder = newton_ladder(n, cutoff);
    let m0 = ladder[0];
    let (s, c) = sin_cos_series_basecase(&f[..f.len().min(m0)], m0, ring)?;
    let mut t = div_series(&s, &c, m0, ring)?;
    if ladder.len() == 1 {
        return Ok(t);
    }

    let h = without_constant(f, n, ring);
    for w in ladder.windows(2) {
        let (m, np) = (w[0], w[1]);
        trace!("tan_series: lifting {} -> {}", m, np);
        t.resize_with(np, || ring.zero());
        let a = atan_like(ring.zero(), &t[..m], false, np, ring)?;
        let mut d = h[..np].to_vec();
        vector::sub_assign(&mut d, &a, ring)?;
        let u = one_plus_signed_square(&t[..m], false, np - m, ring)?;
        let corr = mullow(&u, &d[m..np], np - m, ring)?;
        for (j, x) in corr.into_iter().enumerate() {
            t[m + j] = x;
        }
    }
    Ok(t)
}

/// sinh and cosh from e = exp(f): (e ∓ 1/e)/2.
pub fn sinh_cosh_series<R: Ring>(
    f: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<(Vec<R::Elem>, Vec<R::Elem>)> {
    if n == 0 {
        return Ok((Vec::new(), Vec::new()));
    }
    let e = exp_series(f, n, ring)?;
    let ei = inv_series(&e, n, ring)?;
    let mut s = vector::sub(&e, &ei, ring)?;
    let mut c = vector::add(&e, &ei, ring)?;
    halve_in_place(&mut s, ring)?;
    halve_in_place(&mut c, ring)?;
    Ok((s, c))
}

pub fn sinh_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    Ok(sinh_cosh_series(f, n, ring)?.0)
}

pub fn cosh_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    Ok(sinh_cosh_series(f, n, ring)?.1)
}

/// tanh(f) = (exp(2f) - 1)/(exp(2f) + 1)
pub fn tanh_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let f2 = vector::scalar_mul_si(&f[..f.len().min(n)], 2, ring)?;
    let e = exp_series(&f2, n, ring)?;
    let mut num = e.clone();
    let mut den = e;
    num[0] = ring.sub(&num[0], &ring.one())?;
    den[0] = ring.add(&den[0], &ring.one())?;
    div_series(&num, &den, n, ring)
}

/// f^e mod x^n by binary powering.
pub fn pow_series_ui<R: Ring>(f: &[R::Elem], e: u64, n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut result = vector::zeros(n, ring);
    result[0] = ring.one();
    if e == 0 {
        return Ok(result);
    }
    let mut base = vector::fit(f, n, ring);
    let mut e = e;
    let mut first = true;
    loop {
        if e & 1 == 1 {
            result = if first {
                base.clone()
            } else {
                vector::fit(&mullow(&result, &base, n, ring)?, n, ring)
            };
            first = false;
        }
        e >>= 1;
        if e == 0 {
            break;
        }
        base = vector::fit(&mullow(&base, &base, n, ring)?, n, ring);
    }
    Ok(result)
}

/// f^c = exp(c·log f) for a scalar exponent c.
pub fn pow_series_scalar<R: Ring>(f: &[R::Elem], c: &R::Elem, n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    if ring.is_zero(c).is_true() {
        return pow_series_ui(f, 0, n, ring);
    }
    if ring.is_one(c).is_true() {
        return Ok(vector::fit(f, n, ring));
    }
    let l = log_series(f, n, ring)?;
    let l = vector::scalar_mul(&l, c, ring)?;
    exp_series(&l, n, ring)
}

impl<E: Clone + Debug> GrPoly<E> {
    pub fn exp_series<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(exp_series(self.coeffs(), n, ring)?, ring))
    }

    pub fn log_series<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(log_series(self.coeffs(), n, ring)?, ring))
    }

    pub fn atan_series<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(atan_series(self.coeffs(), n, ring)?, ring))
    }

    pub fn sin_series<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(sin_series(self.coeffs(), n, ring)?, ring))
    }

    pub fn cos_series<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(cos_series(self.coeffs(), n, ring)?, ring))
    }

    pub fn tan_series<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(tan_series(self.coeffs(), n, ring)?, ring))
    }

    pub fn pow_series_ui<R: Ring<Elem = E>>(&self, e: u64, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(pow_series_ui(self.coeffs(), e, n, ring)?, ring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{IntegerRing, NmodRing, RationalRing};
    use crate::config::Tuning;
    use num::BigRational;

    fn qq_low_cutoffs() -> RationalRing {
        let mut tuning = Tuning::default();
        tuning.exp_series_newton = 3;
        tuning.inv_series_newton = 3;
        tuning.div_series_newton = 3;
        tuning.sqrt_series_newton = 3;
        RationalRing::with_tuning(tuning)
    }

    fn x_series(qq: &RationalRing) -> Vec<BigRational> {
        vec![qq.zero(), qq.one()]
    }

    #[test]
    fn test_exp_of_x() {
        let qq = RationalRing::new();
        let e = exp_series(&x_series(&qq), 5, &qq).unwrap();
        assert_eq!(
            e,
            vec![qq.fraction(1, 1), qq.fraction(1, 1), qq.fraction(1, 2), qq.fraction(1, 6), qq.fraction(1, 24)]
        );
    }

    #[test]
    fn test_exp_newton_matches_basecase() {
        let qq = qq_low_cutoffs();
        let f: Vec<_> = (0..9).map(|i| qq.fraction(if i == 0 { 0 } else { i }, i + 2)).collect();
        assert_eq!(exp_series_newton(&f, 14, &qq).unwrap(), exp_series_basecase(&f, 14, &qq).unwrap());
    }

    #[test]
    fn test_log_inverts_exp() {
        let qq = qq_low_cutoffs();
        let f: Vec<_> = (0..7).map(|i| qq.fraction(if i == 0 { 0 } else { 3 - i }, 5)).collect();
        let e = exp_series(&f, 10, &qq).unwrap();
        let l = log_series(&e, 10, &qq).unwrap();
        assert_eq!(l, vector::fit(&f, 10, &qq));
    }

    #[test]
    fn test_log_needs_known_constant() {
        let qq = RationalRing::new();
        let two_plus_x = vec![qq.fraction(2, 1), qq.one()];
        assert_eq!(log_series(&two_plus_x, 4, &qq), Err(GrError::Unable));
        assert_eq!(log_series(&x_series(&qq), 4, &qq), Err(GrError::Domain));
    }

    #[test]
    fn test_sin_cos_identities() {
        let qq = RationalRing::new();
        let (s, c) = sin_cos_series(&x_series(&qq), 6, &qq).unwrap();
        assert_eq!(s, vec![qq.zero(), qq.one(), qq.zero(), qq.fraction(-1, 6), qq.zero(), qq.fraction(1, 120)]);
        assert_eq!(c, vec![qq.one(), qq.zero(), qq.fraction(-1, 2), qq.zero(), qq.fraction(1, 24), qq.zero()]);
    }

    #[test]
    fn test_tangent_form_matches_basecase() {
        let qq = qq_low_cutoffs();
        let f: Vec<_> = (0..6).map(|i| qq.fraction(if i == 0 { 0 } else { i * i - 3 }, 7)).collect();
        assert_eq!(
            sin_cos_series_tangent(&f, 12, &qq).unwrap(),
            sin_cos_series_basecase(&f, 12, &qq).unwrap()
        );
    }

    #[test]
    fn test_tan_newton_matches_quotient() {
        let qq = qq_low_cutoffs();
        let f: Vec<_> = (0..5).map(|i| qq.fraction(if i == 0 { 0 } else { 2 * i + 1 }, 3)).collect();
        let (s, c) = sin_cos_series_basecase(&f, 11, &qq).unwrap();
        assert_eq!(tan_series(&f, 11, &qq).unwrap(), div_series(&s, &c, 11, &qq).unwrap());
    }

    #[test]
    fn test_atan_and_asin_of_x() {
        let qq = RationalRing::new();
        let x = x_series(&qq);
        assert_eq!(
            atan_series(&x, 6, &qq).unwrap(),
            vec![qq.zero(), qq.one(), qq.zero(), qq.fraction(-1, 3), qq.zero(), qq.fraction(1, 5)]
        );
        assert_eq!(
            asin_series(&x, 6, &qq).unwrap(),
            vec![qq.zero(), qq.one(), qq.zero(), qq.fraction(1, 6), qq.zero(), qq.fraction(3, 40)]
        );
        assert_eq!(
            atanh_series(&x, 4, &qq).unwrap(),
            vec![qq.zero(), qq.one(), qq.zero(), qq.fraction(1, 3)]
        );
    }

    #[test]
    fn test_hyperbolic() {
        let qq = RationalRing::new();
        let x = x_series(&qq);
        assert_eq!(
            sinh_series(&x, 4, &qq).unwrap(),
            vec![qq.zero(), qq.one(), qq.zero(), qq.fraction(1, 6)]
        );
        assert_eq!(
            cosh_series(&x, 4, &qq).unwrap(),
            vec![qq.one(), qq.zero(), qq.fraction(1, 2), qq.zero()]
        );
        assert_eq!(
            tanh_series(&x, 4, &qq).unwrap(),
            vec![qq.zero(), qq.one(), qq.zero(), qq.fraction(-1, 3)]
        );
    }

    #[test]
    fn test_pow_series() {
        let zz = IntegerRing::new();
        let f = vec![num::BigInt::from(1), num::BigInt::from(1)];
        let p = pow_series_ui(&f, 5, 4, &zz).unwrap();
        let expected: Vec<_> = [1, 5, 10, 10].iter().map(|&v| num::BigInt::from(v)).collect();
        assert_eq!(p, expected);

        let qq = RationalRing::new();
        let one_plus_x = vec![qq.one(), qq.one()];
        let half = qq.fraction(1, 2);
        assert_eq!(
            pow_series_scalar(&one_plus_x, &half, 3, &qq).unwrap(),
            vec![qq.one(), qq.fraction(1, 2), qq.fraction(-1, 8)]
        );
    }

    #[test]
    fn test_exp_in_small_characteristic_fails() {
        let f5 = NmodRing::new(5);
        assert_eq!(exp_series(&[0, 1], 6, &f5), Err(GrError::Domain));
        assert_eq!(exp_series(&[0, 1], 5, &f5).unwrap(), vec![1, 1, 3, 1, 4]);
    }
}
