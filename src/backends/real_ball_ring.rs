// src/backends/real_ball_ring.rs

use std::f64::consts::PI;
use num::{BigInt, ToPrimitive};
use rand::Rng;
use crate::config::Tuning;
use crate::core::ring::{ElementaryFunction, Ring, SpecialFunction};
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;
use crate::polynomial::elementary::exp_series;
use crate::polynomial::mul::mullow;
use crate::polynomial::poly::{derivative, integral};

/// A real ball [mid ± rad] in double precision.
///
/// Radii are propagated with a first-order error bound plus the rounding
/// error of the midpoint, so the ball contains the exact result of the
/// operation applied to any points of the input balls (up to the double
/// precision of the radius arithmetic itself).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub mid: f64,
    pub rad: f64,
}

impl Ball {
    pub fn exact(mid: f64) -> Self {
        Ball { mid, rad: 0.0 }
    }

    pub fn new(mid: f64, rad: f64) -> Self {
        Ball { mid, rad: rad.abs() }
    }

    pub fn is_exact(&self) -> bool {
        self.rad == 0.0
    }

    pub fn lower(&self) -> f64 {
        self.mid - self.rad
    }

    pub fn upper(&self) -> f64 {
        self.mid + self.rad
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.mid - x).abs() <= self.rad
    }

    /// Ball spanning [lo, hi], widened by the rounding error of both ends.
    fn from_endpoints(lo: f64, hi: f64) -> Self {
        let mid = 0.5 * (lo + hi);
        let rad = 0.5 * (hi - lo).abs() + f64::EPSILON * lo.abs().max(hi.abs());
        Ball { mid, rad }
    }
}

/// Grows a propagated radius slightly so that it also covers the rounding
/// of the radius computation.
fn widen(rad: f64) -> f64 {
    rad * (1.0 + 4.0 * f64::EPSILON)
}

/// Rounding error of a + b (TwoSum).
fn add_error(a: f64, b: f64, s: f64) -> f64 {
    let bb = s - a;
    ((a - (s - bb)) + (b - bb)).abs()
}

/// erf(x) and a bound for its error: Taylor series below 3, the continued
/// fraction for erfc above.
fn erf_f64(x: f64) -> (f64, f64) {
    let ax = x.abs();
    if ax < 3.0 {
        let x2 = x * x;
        let mut term = x;
        let mut sum = x;
        let mut n = 0.0;
        loop {
            n += 1.0;
            term *= -x2 / n;
            let t = term / (2.0 * n + 1.0);
            sum += t;
            if t.abs() <= 1e-17 * sum.abs().max(1e-300) {
                break;
            }
        }
        (2.0 / PI.sqrt() * sum, 1e-14)
    } else {
        let mut t = ax;
        for k in (1..=60).rev() {
            t = ax + (k as f64 / 2.0) / t;
        }
        let erfc = (-ax * ax).exp() / PI.sqrt() / t;
        let v = 1.0 - erfc;
        (if x < 0.0 { -v } else { v }, 1e-15)
    }
}

/// The reals as double-precision midpoint-radius balls.
///
/// Inexact: zero tests on balls containing zero answer `Unknown`, and
/// inverting such a ball is `Unable` rather than a domain error.
#[derive(Debug, Clone, Default)]
pub struct RealBallRing {
    tuning: Tuning,
}

impl RealBallRing {
    pub fn new() -> Self {
        RealBallRing { tuning: Tuning::default() }
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        RealBallRing { tuning }
    }

    /// Monotone f on the ball, evaluated at both endpoints.
    fn monotone(&self, x: &Ball, f: impl Fn(f64) -> f64) -> GrResult<Ball> {
        let (a, b) = (f(x.lower()), f(x.upper()));
        let ball = Ball::from_endpoints(a.min(b), a.max(b));
        self.finite(ball)
    }

    /// f with |f'| ≤ lipschitz on the ball.
    fn lipschitz(&self, x: &Ball, f: impl Fn(f64) -> f64, lipschitz: f64) -> GrResult<Ball> {
        let mid = f(x.mid);
        let ball = Ball::new(mid, widen(lipschitz * x.rad + f64::EPSILON * mid.abs()));
        self.finite(ball)
    }

    fn finite(&self, x: Ball) -> GrResult<Ball> {
        if x.mid.is_finite() && x.rad.is_finite() {
            Ok(x)
        } else {
            Err(GrError::Unable)
        }
    }

    /// Domain check for functions defined on [lo, hi]: `Domain` when the
    /// ball lies entirely outside, `Unable` when it straddles a boundary.
    fn check_interval(x: &Ball, lo: f64, hi: f64, open: bool) -> GrResult<()> {
        let outside = if open {
            x.upper() <= lo || x.lower() >= hi
        } else {
            x.upper() < lo || x.lower() > hi
        };
        if outside {
            return Err(GrError::Domain);
        }
        let inside = if open {
            x.lower() > lo && x.upper() < hi
        } else {
            x.lower() >= lo && x.upper() <= hi
        };
        if inside {
            Ok(())
        } else {
            Err(GrError::Unable)
        }
    }

    fn erf_ball(&self, x: &Ball) -> GrResult<Ball> {
        let (v, err) = erf_f64(x.mid);
        // |erf'| ≤ 2/sqrt(pi)
        let rad = widen(2.0 / PI.sqrt() * x.rad + err + f64::EPSILON * v.abs());
        self.finite(Ball::new(v, rad))
    }

    /// erf(f) = erf(f0) + 2/sqrt(pi)·∫ exp(-f²)·f'
    fn erf_series(&self, f: &[Ball], len: usize) -> GrResult<Vec<Ball>> {
        if len == 0 {
            return Ok(Vec::new());
        }
        let f = vector::fit(f, len, self);
        let e0 = self.erf_ball(&f[0])?;
        if len == 1 {
            return Ok(vec![e0]);
        }
        let fp = derivative(&f, self)?;
        let sq = vector::neg(&vector::fit(&mullow(&f, &f, len - 1, self)?, len - 1, self), self)?;
        let ex = exp_series(&sq, len - 1, self)?;
        let t = vector::fit(&mullow(&ex, &fp, len - 1, self)?, len - 1, self);
        let t = vector::scalar_mul(&t, &Ball::new(2.0 / PI.sqrt(), 2.0 * f64::EPSILON), self)?;
        let mut res = integral(&t, self)?;
        res[0] = e0;
        Ok(vector::fit(&res, len, self))
    }
}

impl Ring for RealBallRing {
    type Elem = Ball;

    fn name(&self) -> String {
        "Real balls (f64 midpoint-radius)".to_string()
    }

    fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn is_exact(&self) -> Truth {
        Truth::False
    }

    fn is_field(&self) -> Truth {
        Truth::True
    }

    fn is_integral_domain(&self) -> Truth {
        Truth::True
    }

    fn characteristic(&self) -> BigInt {
        BigInt::from(0)
    }

    fn zero(&self) -> Ball {
        Ball::exact(0.0)
    }

    fn one(&self) -> Ball {
        Ball::exact(1.0)
    }

    fn from_i64(&self, value: i64) -> GrResult<Ball> {
        let mid = value as f64;
        if mid as i64 == value && mid.abs() < 9.007_199_254_740_992e15 {
            Ok(Ball::exact(mid))
        } else {
            Ok(Ball::new(mid, f64::EPSILON * mid.abs()))
        }
    }

    fn from_bigint(&self, value: &BigInt) -> GrResult<Ball> {
        match value.to_i64() {
            Some(v) => self.from_i64(v),
            None => {
                let mid = value.to_f64().ok_or(GrError::Unable)?;
                self.finite(Ball::new(mid, f64::EPSILON * mid.abs()))
            }
        }
    }

    fn is_zero(&self, x: &Ball) -> Truth {
        if x.mid == 0.0 && x.rad == 0.0 {
            Truth::True
        } else if x.mid.abs() > x.rad {
            Truth::False
        } else {
            Truth::Unknown
        }
    }

    fn is_one(&self, x: &Ball) -> Truth {
        if x.mid == 1.0 && x.rad == 0.0 {
            Truth::True
        } else if !x.contains(1.0) {
            Truth::False
        } else {
            Truth::Unknown
        }
    }

    fn equal(&self, x: &Ball, y: &Ball) -> Truth {
        if x.is_exact() && y.is_exact() && x.mid == y.mid {
            Truth::True
        } else if (x.mid - y.mid).abs() > x.rad + y.rad {
            Truth::False
        } else {
            Truth::Unknown
        }
    }

    fn neg(&self, x: &Ball) -> GrResult<Ball> {
        Ok(Ball { mid: -x.mid, rad: x.rad })
    }

    fn add(&self, x: &Ball, y: &Ball) -> GrResult<Ball> {
        let mid = x.mid + y.mid;
        let err = add_error(x.mid, y.mid, mid);
        let rad = x.rad + y.rad + err;
        self.finite(Ball::new(mid, if rad == 0.0 { 0.0 } else { widen(rad) }))
    }

    fn sub(&self, x: &Ball, y: &Ball) -> GrResult<Ball> {
        self.add(x, &Ball { mid: -y.mid, rad: y.rad })
    }

    fn mul(&self, x: &Ball, y: &Ball) -> GrResult<Ball> {
        let mid = x.mid * y.mid;
        let err = x.mid.mul_add(y.mid, -mid).abs();
        let rad = x.mid.abs() * y.rad + y.mid.abs() * x.rad + x.rad * y.rad + err;
        self.finite(Ball::new(mid, if rad == 0.0 { 0.0 } else { widen(rad) }))
    }

    fn div(&self, x: &Ball, y: &Ball) -> GrResult<Ball> {
        let inv = self.inv(y)?;
        self.mul(x, &inv)
    }

    fn inv(&self, x: &Ball) -> GrResult<Ball> {
        match self.is_zero(x) {
            Truth::True => Err(GrError::Domain),
            Truth::Unknown => Err(GrError::Unable),
            Truth::False => {
                let mid = 1.0 / x.mid;
                let err = (x.mid.mul_add(mid, -1.0) / x.mid).abs();
                let m = x.mid.abs();
                let rad = x.rad / (m * (m - x.rad)) + err;
                self.finite(Ball::new(mid, if rad == 0.0 { 0.0 } else { widen(rad) }))
            }
        }
    }

    fn is_invertible(&self, x: &Ball) -> Truth {
        !self.is_zero(x)
    }

    fn sqrt(&self, x: &Ball) -> GrResult<Ball> {
        if x.mid == 0.0 && x.rad == 0.0 {
            return Ok(self.zero());
        }
        if x.upper() < 0.0 {
            return Err(GrError::Domain);
        }
        if x.lower() < 0.0 {
            return Err(GrError::Unable);
        }
        if x.is_exact() {
            let s = x.mid.sqrt();
            if s * s == x.mid {
                return Ok(Ball::exact(s));
            }
        }
        self.monotone(x, f64::sqrt)
    }

    fn pi(&self) -> GrResult<Ball> {
        Ok(Ball::new(PI, f64::EPSILON * PI))
    }

    fn elementary(&self, func: ElementaryFunction, x: &Ball) -> GrResult<Ball> {
        use ElementaryFunction::*;
        match func {
            Exp => {
                if self.is_zero(x).is_true() {
                    return Ok(self.one());
                }
                self.monotone(x, f64::exp)
            }
            Log => {
                if self.is_one(x).is_true() {
                    return Ok(self.zero());
                }
                if x.upper() <= 0.0 {
                    return Err(GrError::Domain);
                }
                if x.lower() <= 0.0 {
                    return Err(GrError::Unable);
                }
                self.monotone(x, f64::ln)
            }
            Sin => self.lipschitz(x, f64::sin, 1.0),
            Cos => {
                if self.is_zero(x).is_true() {
                    return Ok(self.one());
                }
                self.lipschitz(x, f64::cos, 1.0)
            }
            Tan => {
                let s = self.elementary(Sin, x)?;
                let c = self.elementary(Cos, x)?;
                self.div(&s, &c)
            }
            Atan => self.monotone(x, f64::atan),
            Asin => {
                Self::check_interval(x, -1.0, 1.0, false)?;
                self.monotone(x, f64::asin)
            }
            Acos => {
                Self::check_interval(x, -1.0, 1.0, false)?;
                self.monotone(x, f64::acos)
            }
            Sinh => self.monotone(x, f64::sinh),
            Cosh => {
                if self.is_zero(x).is_true() {
                    return Ok(self.one());
                }
                let bound = (x.mid.abs() + x.rad).sinh();
                self.lipschitz(x, f64::cosh, bound)
            }
            Tanh => self.monotone(x, f64::tanh),
            Atanh => {
                Self::check_interval(x, -1.0, 1.0, true)?;
                self.monotone(x, f64::atanh)
            }
            Asinh => self.monotone(x, f64::asinh),
        }
    }

    fn gcd(&self, _x: &Ball, _y: &Ball) -> GrResult<Ball> {
        Err(GrError::Unable)
    }

    fn canonical_unit(&self, x: &Ball) -> GrResult<Ball> {
        match self.is_zero(x) {
            Truth::True => Ok(self.one()),
            Truth::False => Ok(*x),
            Truth::Unknown => Err(GrError::Unable),
        }
    }

    fn is_finite(&self, x: &Ball) -> Truth {
        Truth::from_bool(x.mid.is_finite() && x.rad.is_finite())
    }

    fn special_series(&self, func: &SpecialFunction<Ball>, x: &[Ball], len: usize) -> GrResult<Vec<Ball>> {
        match func {
            SpecialFunction::Erf => self.erf_series(x, len),
            SpecialFunction::Erfc => {
                let mut res = self.erf_series(x, len)?;
                vector::neg_in_place(&mut res, self)?;
                if let Some(c) = res.first_mut() {
                    *c = self.add(c, &self.one())?;
                }
                Ok(res)
            }
            _ => Err(GrError::Unable),
        }
    }

    fn write(&self, x: &Ball) -> String {
        if x.is_exact() {
            format!("{}", x.mid)
        } else {
            format!("[{:e} +/- {:.2e}]", x.mid, x.rad)
        }
    }

    fn random_elem<G: Rng + ?Sized>(&self, rng: &mut G) -> Ball {
        let mid = rng.random_range(-1024i64..=1024) as f64 / 64.0;
        match rng.random_range(0..4) {
            0 => Ball::exact(0.0),
            1 => Ball::new(mid, 1e-12 * (1.0 + mid.abs())),
            _ => Ball::exact(mid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_integer_arithmetic_stays_exact() {
        let rr = RealBallRing::new();
        let a = rr.from_i64(3).unwrap();
        let b = rr.from_i64(-7).unwrap();
        let p = rr.mul(&a, &b).unwrap();
        assert_eq!(p, Ball::exact(-21.0));
        assert!(rr.is_one(&rr.add(&p, &rr.from_i64(22).unwrap()).unwrap()).is_true());
    }

    #[test]
    fn test_zero_tests_are_three_valued() {
        let rr = RealBallRing::new();
        assert_eq!(rr.is_zero(&Ball::exact(0.0)), Truth::True);
        assert_eq!(rr.is_zero(&Ball::new(1e-3, 1e-2)), Truth::Unknown);
        assert_eq!(rr.is_zero(&Ball::new(1.0, 1e-2)), Truth::False);
        assert_eq!(rr.inv(&Ball::exact(0.0)), Err(GrError::Domain));
        assert_eq!(rr.inv(&Ball::new(0.0, 1e-9)), Err(GrError::Unable));
    }

    #[test]
    fn test_inverse_contains_exact_value() {
        let rr = RealBallRing::new();
        let x = Ball::new(3.0, 1e-6);
        let y = rr.inv(&x).unwrap();
        assert!(y.contains(1.0 / 3.0));
        assert!(y.contains(1.0 / (3.0 + 1e-6)));
        assert!(y.contains(1.0 / (3.0 - 1e-6)));
    }

    #[test]
    fn test_elementary_domains() {
        let rr = RealBallRing::new();
        assert_eq!(rr.elementary(ElementaryFunction::Log, &Ball::exact(-1.0)), Err(GrError::Domain));
        assert_eq!(rr.elementary(ElementaryFunction::Log, &Ball::new(0.0, 0.5)), Err(GrError::Unable));
        assert_eq!(rr.elementary(ElementaryFunction::Asin, &Ball::exact(2.0)), Err(GrError::Domain));
        assert_eq!(rr.elementary(ElementaryFunction::Atanh, &Ball::new(1.0, 0.1)), Err(GrError::Unable));
        let e = rr.elementary(ElementaryFunction::Exp, &Ball::exact(1.0)).unwrap();
        assert!(e.contains(std::f64::consts::E));
        let s = rr.sqrt(&Ball::exact(2.0)).unwrap();
        assert!(s.contains(std::f64::consts::SQRT_2));
    }

    #[test]
    fn test_erf_values() {
        let (v, _) = erf_f64(0.5);
        assert!((v - 0.520_499_877_813_046_5).abs() < 1e-13);
        let (v, _) = erf_f64(-4.0);
        assert!((v + 0.999_999_984_582_742_1).abs() < 1e-14);
    }

    #[test]
    fn test_erf_series_at_zero() {
        let rr = RealBallRing::new();
        let x = vec![Ball::exact(0.0), Ball::exact(1.0)];
        let s = rr.special_series(&SpecialFunction::Erf, &x, 5).unwrap();
        let c = 2.0 / PI.sqrt();
        assert!(rr.is_zero(&s[0]).is_true() || s[0].contains(0.0));
        assert!((s[1].mid - c).abs() < 1e-12);
        assert!(s[2].contains(0.0));
        assert!((s[3].mid + c / 3.0).abs() < 1e-12);
        let erfc = rr.special_series(&SpecialFunction::Erfc, &x, 2).unwrap();
        assert!(erfc[0].contains(1.0));
        assert!((erfc[1].mid + c).abs() < 1e-12);
        assert_eq!(rr.special_series(&SpecialFunction::Gamma, &x, 2), Err(GrError::Unable));
    }
}
