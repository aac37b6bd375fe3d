// src/series/functions.rs
//
// Algebraic, elementary and special functions of power series. Every
// function goes through `GrSeries::apply`, which fixes the result length and
// error from the series context before calling the polynomial kernel.

use std::fmt::Debug;
use log::debug;
use crate::core::ring::{Ring, SpecialFunction};
use crate::core::status::{GrError, GrResult, Truth};
use crate::polynomial::elementary::{
    acos_series, asin_series, asinh_series, atan_series, atanh_series, cos_series, cosh_series,
    exp_series, log_series, pow_series_scalar, sin_series, sinh_series, tan_series, tanh_series,
};
use crate::polynomial::sqrt_series::{rsqrt_series, sqrt_series};
use crate::series::series::{check_constant_invertible, GrSeries, SeriesCtx};

/// Non-finite coefficients (overflowed balls) make the result meaningless.
fn check_finite<R: Ring>(coeffs: &[R::Elem], ring: &R) -> GrResult<()> {
    for c in coeffs {
        if !ring.is_finite(c).is_true() {
            return Err(GrError::Unable);
        }
    }
    Ok(())
}

impl<E: Clone + Debug> GrSeries<E> {
    /// Applies a series kernel `f, n -> g mod x^n`. The image of an exact
    /// constant is an exact constant; otherwise the result is truncated at
    /// the input error or the working precision.
    fn apply<R, F>(&self, ctx: &SeriesCtx, ring: &R, kernel: F) -> GrResult<Self>
    where
        R: Ring<Elem = E>,
        F: FnOnce(&[E], usize, &R) -> GrResult<Vec<E>>,
    {
        let full = if self.is_exact() && self.poly.len() <= 1 { 1 } else { usize::MAX };
        let (len, error) = ctx.bound(self.error, full);
        let coeffs = kernel(self.poly.coeffs(), len, ring)?;
        check_finite(&coeffs, ring)?;
        Ok(GrSeries::from_parts(coeffs, error, ring))
    }

    pub fn sqrt<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        if self.poly.is_zero(ring).is_true() {
            return Ok(GrSeries { poly: self.poly.clone(), error: self.error });
        }
        check_constant_invertible(&self.poly, ring)?;
        self.apply(ctx, ring, sqrt_series)
    }

    pub fn rsqrt<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        check_constant_invertible(&self.poly, ring)?;
        self.apply(ctx, ring, rsqrt_series)
    }

    pub fn exp<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, exp_series)
    }

    pub fn log<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, log_series)
    }

    pub fn atan<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, atan_series)
    }

    pub fn atanh<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, atanh_series)
    }

    pub fn asin<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, asin_series)
    }

    pub fn asinh<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, asinh_series)
    }

    pub fn acos<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, acos_series)
    }

    pub fn sin<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, sin_series)
    }

    pub fn cos<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, cos_series)
    }

    pub fn tan<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, tan_series)
    }

    pub fn sinh<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, sinh_series)
    }

    pub fn cosh<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, cosh_series)
    }

    pub fn tanh<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.apply(ctx, ring, tanh_series)
    }

    /// self^c for a scalar exponent.
    pub fn pow_scalar<R: Ring<Elem = E>>(&self, c: &E, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        if ring.is_zero(c).is_true() {
            return Ok(GrSeries::one(ctx, ring));
        }
        self.apply(ctx, ring, |f, n, ring| pow_series_scalar(f, c, n, ring))
    }

    /// self^y = exp(y·log self). A constant exponent goes through `pow_scalar`.
    pub fn pow<R: Ring<Elem = E>>(&self, y: &Self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        if y.is_exact() && y.poly.is_scalar(ring).is_true() {
            let c = y.poly.coeff(0, ring);
            return self.pow_scalar(&c, ctx, ring);
        }
        let l = self.log(ctx, ring)?;
        y.mul(&l, ctx, ring)?.exp(ctx, ring)
    }

    /// A special function of the series, where the ring provides it.
    pub fn special<R: Ring<Elem = E>>(
        &self,
        func: &SpecialFunction<E>,
        ctx: &SeriesCtx,
        ring: &R,
    ) -> GrResult<Self> {
        let res = self.apply(ctx, ring, |f, n, ring| ring.special_series(func, f, n));
        if let Err(GrError::Unable) = res {
            debug!("{:?} series unavailable over {}", func, ring.name());
        }
        res
    }

    pub fn gamma<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::Gamma, ctx, ring)
    }

    pub fn rgamma<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::RGamma, ctx, ring)
    }

    pub fn lgamma<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::LogGamma, ctx, ring)
    }

    pub fn digamma<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::Digamma, ctx, ring)
    }

    pub fn erf<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::Erf, ctx, ring)
    }

    pub fn erfc<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::Erfc, ctx, ring)
    }

    pub fn erfi<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::Erfi, ctx, ring)
    }

    pub fn zeta<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::Zeta, ctx, ring)
    }

    /// ζ(self, a)
    pub fn hurwitz_zeta<R: Ring<Elem = E>>(&self, a: &E, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::HurwitzZeta(a.clone()), ctx, ring)
    }

    /// Li_s(self)
    pub fn polylog<R: Ring<Elem = E>>(&self, s: &E, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::Polylog(s.clone()), ctx, ring)
    }

    /// agm(1, self)
    pub fn agm1<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::Agm1, ctx, ring)
    }

    pub fn elliptic_k<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::EllipticK, ctx, ring)
    }

    pub fn elliptic_e<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::EllipticE, ctx, ring)
    }

    pub fn lambert_w<R: Ring<Elem = E>>(&self, branch: i64, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::LambertW(branch), ctx, ring)
    }

    pub fn airy_ai<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::AiryAi, ctx, ring)
    }

    pub fn airy_bi<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        self.special(&SpecialFunction::AiryBi, ctx, ring)
    }

    /// θ_i(self, tau) for i in 1..=4.
    pub fn jacobi_theta<R: Ring<Elem = E>>(&self, i: u32, tau: &E, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        if !(1..=4).contains(&i) {
            return Err(GrError::Domain);
        }
        self.special(&SpecialFunction::JacobiTheta(i, tau.clone()), ctx, ring)
    }

    /// L(self, χ) for the character with Conrey index `index` mod `modulus`.
    pub fn dirichlet_l<R: Ring<Elem = E>>(
        &self,
        modulus: u64,
        index: u64,
        ctx: &SeriesCtx,
        ring: &R,
    ) -> GrResult<Self> {
        if modulus == 0 || num::integer::gcd(modulus, index) != 1 {
            return Err(GrError::Domain);
        }
        self.special(&SpecialFunction::DirichletL { modulus, index }, ctx, ring)
    }

    /// pFq(upper; lower; self), optionally regularized.
    pub fn hypergeometric<R: Ring<Elem = E>>(
        &self,
        upper: &[E],
        lower: &[E],
        regularized: bool,
        ctx: &SeriesCtx,
        ring: &R,
    ) -> GrResult<Self> {
        let func = SpecialFunction::Hypergeometric {
            upper: upper.to_vec(),
            lower: lower.to_vec(),
            regularized,
        };
        self.special(&func, ctx, ring)
    }

    /// Whether every known coefficient is finite.
    pub fn is_finite<R: Ring<Elem = E>>(&self, ring: &R) -> Truth {
        self.poly
            .coeffs()
            .iter()
            .fold(Truth::True, |acc, c| acc.and(ring.is_finite(c)))
    }
}
