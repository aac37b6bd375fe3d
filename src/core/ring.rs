// src/core/ring.rs

use std::fmt::Debug;
use num::BigInt;
use rand::Rng;
use crate::config::{Tuning, DEFAULT_TUNING};
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;

/// Elementary functions a ring may evaluate on a single element.
///
/// Series expansions only need the value at the constant term; the
/// polynomial engine derives every higher coefficient itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementaryFunction {
    Exp,
    Log,
    Sin,
    Cos,
    Tan,
    Atan,
    Asin,
    Acos,
    Sinh,
    Cosh,
    Tanh,
    Atanh,
    Asinh,
}

/// Special functions whose power-series expansions only ball rings provide.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecialFunction<E> {
    Gamma,
    RGamma,
    LogGamma,
    Digamma,
    Erf,
    Erfc,
    Erfi,
    Zeta,
    /// Hurwitz zeta ζ(x, a) with the series in the first argument.
    HurwitzZeta(E),
    /// Polylogarithm Li_s(x) with fixed order s.
    Polylog(E),
    Agm1,
    EllipticK,
    EllipticE,
    /// Lambert W on the given branch.
    LambertW(i64),
    AiryAi,
    AiryBi,
    /// Jacobi theta θ_i(x, τ), i in 1..=4.
    JacobiTheta(u32, E),
    /// Dirichlet L(s, χ) for the Conrey-labelled character index mod q.
    DirichletL { modulus: u64, index: u64 },
    Hypergeometric { upper: Vec<E>, lower: Vec<E>, regularized: bool },
}

/// A coefficient domain: the dispatch contract the polynomial engine is
/// written against.
///
/// Elements are opaque to the engine; every manipulation goes through the
/// ring. Fallible operations report `GrError::Domain` when the result is
/// mathematically undefined and `GrError::Unable` when the ring cannot
/// decide or compute it. Predicates answer with a three-valued `Truth`.
///
/// Implementations:
/// - IntegerRing: ZZ over num::BigInt
/// - RationalRing: QQ over num::BigRational
/// - NmodRing: Z/nZ with a word-size modulus
/// - RealBallRing: midpoint-radius real balls (inexact)
pub trait Ring {
    type Elem: Clone + Debug;

    /// Human-readable name for logging
    fn name(&self) -> String;

    /// Algorithm cutoffs used by the polynomial engine over this ring
    fn tuning(&self) -> &Tuning {
        &DEFAULT_TUNING
    }

    fn is_exact(&self) -> Truth {
        Truth::True
    }

    fn is_field(&self) -> Truth;

    fn is_integral_domain(&self) -> Truth;

    /// Characteristic, zero for characteristic 0
    fn characteristic(&self) -> BigInt;

    fn zero(&self) -> Self::Elem;

    fn one(&self) -> Self::Elem;

    fn from_i64(&self, value: i64) -> GrResult<Self::Elem>;

    fn from_bigint(&self, value: &BigInt) -> GrResult<Self::Elem>;

    fn from_u64(&self, value: u64) -> GrResult<Self::Elem> {
        self.from_bigint(&BigInt::from(value))
    }

    fn is_zero(&self, x: &Self::Elem) -> Truth;

    fn is_one(&self, x: &Self::Elem) -> Truth;

    fn is_neg_one(&self, x: &Self::Elem) -> Truth {
        match self.neg(x) {
            Ok(y) => self.is_one(&y),
            Err(_) => Truth::Unknown,
        }
    }

    fn equal(&self, x: &Self::Elem, y: &Self::Elem) -> Truth;

    fn neg(&self, x: &Self::Elem) -> GrResult<Self::Elem>;

    fn add(&self, x: &Self::Elem, y: &Self::Elem) -> GrResult<Self::Elem>;

    fn sub(&self, x: &Self::Elem, y: &Self::Elem) -> GrResult<Self::Elem>;

    fn mul(&self, x: &Self::Elem, y: &Self::Elem) -> GrResult<Self::Elem>;

    fn sqr(&self, x: &Self::Elem) -> GrResult<Self::Elem> {
        self.mul(x, x)
    }

    fn mul_si(&self, x: &Self::Elem, c: i64) -> GrResult<Self::Elem> {
        let c = self.from_i64(c)?;
        self.mul(x, &c)
    }

    /// acc += x * y
    fn addmul(&self, acc: &mut Self::Elem, x: &Self::Elem, y: &Self::Elem) -> GrResult<()> {
        let t = self.mul(x, y)?;
        *acc = self.add(acc, &t)?;
        Ok(())
    }

    /// acc -= x * y
    fn submul(&self, acc: &mut Self::Elem, x: &Self::Elem, y: &Self::Elem) -> GrResult<()> {
        let t = self.mul(x, y)?;
        *acc = self.sub(acc, &t)?;
        Ok(())
    }

    /// x / y; `Domain` when y is provably not a divisor of x.
    fn div(&self, x: &Self::Elem, y: &Self::Elem) -> GrResult<Self::Elem>;

    /// x / y where the caller promises y divides x.
    fn divexact(&self, x: &Self::Elem, y: &Self::Elem) -> GrResult<Self::Elem> {
        self.div(x, y)
    }

    fn div_ui(&self, x: &Self::Elem, c: u64) -> GrResult<Self::Elem> {
        let c = self.from_u64(c)?;
        self.div(x, &c)
    }

    fn divexact_ui(&self, x: &Self::Elem, c: u64) -> GrResult<Self::Elem> {
        self.div_ui(x, c)
    }

    fn inv(&self, x: &Self::Elem) -> GrResult<Self::Elem>;

    fn is_invertible(&self, x: &Self::Elem) -> Truth {
        match self.inv(x) {
            Ok(_) => Truth::True,
            Err(GrError::Domain) => Truth::False,
            Err(GrError::Unable) => Truth::Unknown,
        }
    }

    fn pow_ui(&self, x: &Self::Elem, exp: u64) -> GrResult<Self::Elem> {
        let mut result = self.one();
        if exp == 0 {
            return Ok(result);
        }
        let mut base = x.clone();
        let mut e = exp;
        loop {
            if e & 1 == 1 {
                result = self.mul(&result, &base)?;
            }
            e >>= 1;
            if e == 0 {
                break;
            }
            base = self.sqr(&base)?;
        }
        Ok(result)
    }

    /// Square root; the generic version only resolves 0 and 1.
    fn sqrt(&self, x: &Self::Elem) -> GrResult<Self::Elem> {
        if self.is_zero(x).is_true() {
            return Ok(self.zero());
        }
        if self.is_one(x).is_true() {
            return Ok(self.one());
        }
        Err(GrError::Unable)
    }

    fn rsqrt(&self, x: &Self::Elem) -> GrResult<Self::Elem> {
        let s = self.sqrt(x)?;
        self.inv(&s)
    }

    /// π, where the ring has it.
    fn pi(&self) -> GrResult<Self::Elem> {
        Err(GrError::Unable)
    }

    /// Evaluates an elementary function; the generic version only handles
    /// arguments with a known exact value (exp(0) = 1, log(1) = 0, ...).
    fn elementary(&self, func: ElementaryFunction, x: &Self::Elem) -> GrResult<Self::Elem> {
        use ElementaryFunction::*;
        match func {
            Log => match self.is_one(x) {
                Truth::True => Ok(self.zero()),
                _ => Err(GrError::Unable),
            },
            Exp | Cos | Cosh => match self.is_zero(x) {
                Truth::True => Ok(self.one()),
                _ => Err(GrError::Unable),
            },
            Acos => Err(GrError::Unable),
            Sin | Tan | Atan | Asin | Sinh | Tanh | Atanh | Asinh => match self.is_zero(x) {
                Truth::True => Ok(self.zero()),
                _ => Err(GrError::Unable),
            },
        }
    }

    /// Greatest common divisor of two elements.
    fn gcd(&self, x: &Self::Elem, y: &Self::Elem) -> GrResult<Self::Elem> {
        if self.is_field().is_true() {
            return match (self.is_zero(x), self.is_zero(y)) {
                (Truth::True, Truth::True) => Ok(self.zero()),
                (Truth::False, _) | (_, Truth::False) => Ok(self.one()),
                _ => Err(GrError::Unable),
            };
        }
        Err(GrError::Unable)
    }

    /// A unit u such that x / u is the canonical associate of x.
    fn canonical_unit(&self, x: &Self::Elem) -> GrResult<Self::Elem> {
        if self.is_field().is_true() {
            return match self.is_zero(x) {
                Truth::True => Ok(self.one()),
                Truth::False => Ok(x.clone()),
                Truth::Unknown => Err(GrError::Unable),
            };
        }
        Err(GrError::Unable)
    }

    /// Whether x is a finite value (balls may overflow to an indeterminate interval).
    fn is_finite(&self, _x: &Self::Elem) -> Truth {
        Truth::True
    }

    /// Power series of a special function at `x`, truncated to `len`.
    /// Only ball rings implement these.
    fn special_series(
        &self,
        _func: &SpecialFunction<Self::Elem>,
        _x: &[Self::Elem],
        _len: usize,
    ) -> GrResult<Vec<Self::Elem>> {
        Err(GrError::Unable)
    }

    /// initial ± Σ a[i]·b[i]
    fn dot(
        &self,
        initial: Option<&Self::Elem>,
        subtract: bool,
        a: &[Self::Elem],
        b: &[Self::Elem],
    ) -> GrResult<Self::Elem> {
        vector::dot_generic(self, initial, subtract, a, b)
    }

    /// initial ± Σ a[i]·b[n-1-i]
    fn dot_rev(
        &self,
        initial: Option<&Self::Elem>,
        subtract: bool,
        a: &[Self::Elem],
        b: &[Self::Elem],
    ) -> GrResult<Self::Elem> {
        vector::dot_rev_generic(self, initial, subtract, a, b)
    }

    /// Diagnostic formatting of one element
    fn write(&self, x: &Self::Elem) -> String;

    /// Random element for randomized testing; the caller owns the RNG state.
    fn random_elem<G: Rng + ?Sized>(&self, rng: &mut G) -> Self::Elem;
}
