// src/series/series.rs

use std::fmt::{self, Debug};
use log::trace;
use crate::config::SeriesConfig;
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;
use crate::polynomial::inv_series::{div_series, inv_series};
use crate::polynomial::mul::mullow;
use crate::polynomial::poly::GrPoly;

/// Truncation order of a series: coefficients at x^k for k ≥ the order are
/// unknown. `EXACT` marks a series that is known completely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesError(pub usize);

impl SeriesError {
    pub const EXACT: SeriesError = SeriesError(usize::MAX);

    pub fn is_exact(self) -> bool {
        self == SeriesError::EXACT
    }

    /// Finite order, or `None` for exact series.
    pub fn order(self) -> Option<usize> {
        if self.is_exact() {
            None
        } else {
            Some(self.0)
        }
    }
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order() {
            Some(n) => write!(f, "O(x^{})", n),
            None => write!(f, "exact"),
        }
    }
}

/// Bounds shared by all series of one domain.
///
/// `modulus` is a hard ceiling (the domain is the quotient ring R[[x]]/x^mod,
/// nothing at or beyond it exists); `prec` is the working precision for
/// operations that have no natural length of their own. `prec ≤ modulus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesCtx {
    prec: usize,
    modulus: usize,
}

impl SeriesCtx {
    /// Power series R[[x]] computed to `prec` terms.
    pub fn new(prec: usize) -> Self {
        SeriesCtx { prec, modulus: usize::MAX }
    }

    /// The truncated ring R[[x]]/x^n; every series in it is exact.
    pub fn with_modulus(n: usize) -> Self {
        SeriesCtx { prec: n, modulus: n }
    }

    pub fn from_config(config: &SeriesConfig) -> Self {
        SeriesCtx::new(config.default_prec)
    }

    /// Lowers the working precision; it never exceeds the modulus.
    pub fn with_prec(self, prec: usize) -> Self {
        SeriesCtx { prec: prec.min(self.modulus), modulus: self.modulus }
    }

    pub fn prec(&self) -> usize {
        self.prec
    }

    pub fn modulus(&self) -> Option<usize> {
        if self.modulus == usize::MAX {
            None
        } else {
            Some(self.modulus)
        }
    }

    /// Result length and error for an operation whose operands are known to
    /// `err` and whose exact result has `full_len` coefficients
    /// (`usize::MAX` when it is an infinite series).
    ///
    /// Anything cut off at `prec` becomes an error term at `prec`; an error at
    /// or beyond the modulus collapses to exact.
    pub(crate) fn bound(&self, err: SeriesError, full_len: usize) -> (usize, SeriesError) {
        let mut err = err.0;
        let mut len = full_len.min(err);
        if len > self.prec {
            len = self.prec;
            err = err.min(self.prec);
        }
        len = len.min(self.modulus);
        if err >= self.modulus {
            (len, SeriesError::EXACT)
        } else {
            (len, SeriesError(err))
        }
    }
}

impl Default for SeriesCtx {
    fn default() -> Self {
        SeriesCtx::from_config(&SeriesConfig::default())
    }
}

/// A power series: a polynomial plus its truncation order.
#[derive(Debug, Clone)]
pub struct GrSeries<E> {
    pub(crate) poly: GrPoly<E>,
    pub(crate) error: SeriesError,
}

impl<E: Clone + Debug> GrSeries<E> {
    pub(crate) fn from_parts<R: Ring<Elem = E>>(coeffs: Vec<E>, error: SeriesError, ring: &R) -> Self {
        GrSeries { poly: GrPoly::from_vec(coeffs, ring), error }
    }

    pub fn poly(&self) -> &GrPoly<E> {
        &self.poly
    }

    pub fn error(&self) -> SeriesError {
        self.error
    }

    pub fn is_exact(&self) -> bool {
        self.error.is_exact()
    }

    pub fn zero() -> Self {
        GrSeries { poly: GrPoly::zero(), error: SeriesError::EXACT }
    }

    pub fn one<R: Ring<Elem = E>>(ctx: &SeriesCtx, ring: &R) -> Self {
        GrSeries::from_poly(&GrPoly::one(ring), ctx, ring)
    }

    /// The series x (zero in R[[x]]/x^1).
    pub fn gen<R: Ring<Elem = E>>(ctx: &SeriesCtx, ring: &R) -> Self {
        GrSeries::from_poly(&GrPoly::gen(ring), ctx, ring)
    }

    /// An exact polynomial, truncated to the working precision.
    pub fn from_poly<R: Ring<Elem = E>>(poly: &GrPoly<E>, ctx: &SeriesCtx, ring: &R) -> Self {
        let (len, error) = ctx.bound(SeriesError::EXACT, poly.len());
        GrSeries { poly: poly.truncated(len, ring), error }
    }

    /// A polynomial known only below x^error.
    pub fn from_poly_with_error<R: Ring<Elem = E>>(
        poly: &GrPoly<E>,
        error: usize,
        ctx: &SeriesCtx,
        ring: &R,
    ) -> Self {
        let (len, error) = ctx.bound(SeriesError(error), poly.len());
        GrSeries { poly: poly.truncated(len, ring), error }
    }

    pub fn from_scalar<R: Ring<Elem = E>>(c: E, ctx: &SeriesCtx, ring: &R) -> Self {
        GrSeries::from_poly(&GrPoly::scalar(c, ring), ctx, ring)
    }

    pub fn from_i64<R: Ring<Elem = E>>(c: i64, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        Ok(GrSeries::from_scalar(ring.from_i64(c)?, ctx, ring))
    }

    pub fn coeff<R: Ring<Elem = E>>(&self, i: usize, ring: &R) -> GrResult<E> {
        if i >= self.error.0 {
            return Err(GrError::Unable);
        }
        Ok(self.poly.coeff(i, ring))
    }

    pub fn neg<R: Ring<Elem = E>>(&self, ring: &R) -> GrResult<Self> {
        Ok(GrSeries { poly: self.poly.neg(ring)?, error: self.error })
    }

    pub fn add<R: Ring<Elem = E>>(&self, other: &Self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        let full = self.poly.len().max(other.poly.len());
        let (len, error) = ctx.bound(self.error.min(other.error), full);
        let coeffs = vector::add(
            &self.poly.coeffs()[..self.poly.len().min(len)],
            &other.poly.coeffs()[..other.poly.len().min(len)],
            ring,
        )?;
        Ok(GrSeries::from_parts(coeffs, error, ring))
    }

    pub fn sub<R: Ring<Elem = E>>(&self, other: &Self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        let full = self.poly.len().max(other.poly.len());
        let (len, error) = ctx.bound(self.error.min(other.error), full);
        let coeffs = vector::sub(
            &self.poly.coeffs()[..self.poly.len().min(len)],
            &other.poly.coeffs()[..other.poly.len().min(len)],
            ring,
        )?;
        Ok(GrSeries::from_parts(coeffs, error, ring))
    }

    /// The error of a product is min(err_x + val_y, err_y + val_x), bounded
    /// below by the plain minimum; only the plain minimum is tracked.
    pub fn mul<R: Ring<Elem = E>>(&self, other: &Self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        let (xlen, ylen) = (self.poly.len(), other.poly.len());
        let full = if xlen == 0 || ylen == 0 { 0 } else { xlen + ylen - 1 };
        let (len, error) = ctx.bound(self.error.min(other.error), full);
        let coeffs = mullow(self.poly.coeffs(), other.poly.coeffs(), len, ring)?;
        Ok(GrSeries::from_parts(coeffs, error, ring))
    }

    /// 1/x. An exact constant has an exact inverse.
    pub fn inv<R: Ring<Elem = E>>(&self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        check_constant_invertible(&self.poly, ring)?;
        let full = if self.is_exact() && self.poly.len() <= 1 { 1 } else { usize::MAX };
        let (len, error) = ctx.bound(self.error, full);
        trace!("series inv to length {} ({})", len, error);
        let coeffs = inv_series(self.poly.coeffs(), len, ring)?;
        Ok(GrSeries::from_parts(coeffs, error, ring))
    }

    pub fn div<R: Ring<Elem = E>>(&self, other: &Self, ctx: &SeriesCtx, ring: &R) -> GrResult<Self> {
        check_constant_invertible(&other.poly, ring)?;
        let full = if other.is_exact() && other.poly.len() <= 1 {
            self.poly.len()
        } else {
            usize::MAX
        };
        let (len, error) = ctx.bound(self.error.min(other.error), full);
        let coeffs = div_series(self.poly.coeffs(), other.poly.coeffs(), len, ring)?;
        Ok(GrSeries::from_parts(coeffs, error, ring))
    }

    /// Equality of the known prefixes. Series that agree there but are not
    /// both exact compare `Unknown`.
    pub fn equal<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> Truth {
        if self.is_exact() && other.is_exact() {
            return self.poly.equal(&other.poly, ring);
        }
        let n = self.error.min(other.error).0;
        let a = self.poly.truncated(n, ring);
        let b = other.poly.truncated(n, ring);
        match a.equal(&b, ring) {
            Truth::False => Truth::False,
            _ => Truth::Unknown,
        }
    }

    pub fn is_zero<R: Ring<Elem = E>>(&self, ring: &R) -> Truth {
        self.equal(&GrSeries::zero(), ring)
    }

    pub fn is_one<R: Ring<Elem = E>>(&self, ring: &R) -> Truth {
        let one = GrSeries { poly: GrPoly::one(ring), error: SeriesError::EXACT };
        self.equal(&one, ring)
    }

    /// `c0 + c1*x + ... + O(x^n)`
    pub fn write<R: Ring<Elem = E>>(&self, var: &str, ring: &R) -> String {
        let body = self.poly.write(var, ring);
        match self.error.order() {
            None => body,
            Some(n) if self.poly.is_empty() => format!("O({}^{})", var, n),
            Some(n) => format!("{} + O({}^{})", body, var, n),
        }
    }
}

/// DOMAIN when the constant term is provably zero, UNABLE when undecided.
pub(crate) fn check_constant_invertible<E: Clone + Debug, R: Ring<Elem = E>>(
    poly: &GrPoly<E>,
    ring: &R,
) -> GrResult<()> {
    let Some(c) = poly.get_coeff(0) else {
        return Err(GrError::Domain);
    };
    match ring.is_invertible(c) {
        Truth::True => Ok(()),
        Truth::False => Err(GrError::Domain),
        Truth::Unknown => Err(GrError::Unable),
    }
}
