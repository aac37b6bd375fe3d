// src/backends/rational_ring.rs

use num::{BigInt, BigRational, One, Signed, Zero};
use num::integer::Roots;
use rand::Rng;
use crate::config::Tuning;
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};

/// The rationals QQ over num::BigRational.
#[derive(Debug, Clone, Default)]
pub struct RationalRing {
    tuning: Tuning,
}

impl RationalRing {
    pub fn new() -> Self {
        RationalRing { tuning: Tuning::default() }
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        RationalRing { tuning }
    }

    /// Convenience constructor for num/den.
    pub fn fraction(&self, num: i64, den: i64) -> BigRational {
        BigRational::new(BigInt::from(num), BigInt::from(den))
    }
}

fn exact_sqrt(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let s = n.sqrt();
    if &s * &s == *n {
        Some(s)
    } else {
        None
    }
}

impl Ring for RationalRing {
    type Elem = BigRational;

    fn name(&self) -> String {
        "Rational field (QQ)".to_string()
    }

    fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn is_field(&self) -> Truth {
        Truth::True
    }

    fn is_integral_domain(&self) -> Truth {
        Truth::True
    }

    fn characteristic(&self) -> BigInt {
        BigInt::zero()
    }

    fn zero(&self) -> BigRational {
        BigRational::zero()
    }

    fn one(&self) -> BigRational {
        BigRational::one()
    }

    fn from_i64(&self, value: i64) -> GrResult<BigRational> {
        Ok(BigRational::from_integer(BigInt::from(value)))
    }

    fn from_bigint(&self, value: &BigInt) -> GrResult<BigRational> {
        Ok(BigRational::from_integer(value.clone()))
    }

    fn is_zero(&self, x: &BigRational) -> Truth {
        Truth::from_bool(x.is_zero())
    }

    fn is_one(&self, x: &BigRational) -> Truth {
        Truth::from_bool(x.is_one())
    }

    fn is_neg_one(&self, x: &BigRational) -> Truth {
        Truth::from_bool(*x == -BigRational::one())
    }

    fn equal(&self, x: &BigRational, y: &BigRational) -> Truth {
        Truth::from_bool(x == y)
    }

    fn neg(&self, x: &BigRational) -> GrResult<BigRational> {
        Ok(-x)
    }

    fn add(&self, x: &BigRational, y: &BigRational) -> GrResult<BigRational> {
        Ok(x + y)
    }

    fn sub(&self, x: &BigRational, y: &BigRational) -> GrResult<BigRational> {
        Ok(x - y)
    }

    fn mul(&self, x: &BigRational, y: &BigRational) -> GrResult<BigRational> {
        Ok(x * y)
    }

    fn mul_si(&self, x: &BigRational, c: i64) -> GrResult<BigRational> {
        Ok(x * BigRational::from_integer(BigInt::from(c)))
    }

    fn div(&self, x: &BigRational, y: &BigRational) -> GrResult<BigRational> {
        if y.is_zero() {
            return Err(GrError::Domain);
        }
        Ok(x / y)
    }

    fn div_ui(&self, x: &BigRational, c: u64) -> GrResult<BigRational> {
        if c == 0 {
            return Err(GrError::Domain);
        }
        Ok(x / BigRational::from_integer(BigInt::from(c)))
    }

    fn inv(&self, x: &BigRational) -> GrResult<BigRational> {
        if x.is_zero() {
            return Err(GrError::Domain);
        }
        Ok(x.recip())
    }

    fn sqrt(&self, x: &BigRational) -> GrResult<BigRational> {
        match (exact_sqrt(x.numer()), exact_sqrt(x.denom())) {
            (Some(n), Some(d)) => Ok(BigRational::new(n, d)),
            _ => Err(GrError::Domain),
        }
    }

    fn write(&self, x: &BigRational) -> String {
        x.to_string()
    }

    fn random_elem<G: Rng + ?Sized>(&self, rng: &mut G) -> BigRational {
        match rng.random_range(0..8) {
            0 => BigRational::zero(),
            1..=4 => BigRational::from_integer(BigInt::from(rng.random_range(-10i64..=10))),
            _ => BigRational::new(
                BigInt::from(rng.random_range(-100i64..=100)),
                BigInt::from(rng.random_range(1i64..=30)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_operations() {
        let qq = RationalRing::new();
        let a = qq.fraction(1, 3);
        let b = qq.fraction(2, 5);
        assert_eq!(qq.add(&a, &b), Ok(qq.fraction(11, 15)));
        assert_eq!(qq.div(&a, &b), Ok(qq.fraction(5, 6)));
        assert_eq!(qq.inv(&qq.zero()), Err(GrError::Domain));
        assert_eq!(qq.div_ui(&a, 2), Ok(qq.fraction(1, 6)));
    }

    #[test]
    fn test_sqrt_of_rational_squares() {
        let qq = RationalRing::new();
        assert_eq!(qq.sqrt(&qq.fraction(9, 4)), Ok(qq.fraction(3, 2)));
        assert_eq!(qq.sqrt(&qq.fraction(2, 1)), Err(GrError::Domain));
    }

    #[test]
    fn test_field_gcd_and_unit() {
        let qq = RationalRing::new();
        assert_eq!(qq.gcd(&qq.fraction(3, 2), &qq.zero()), Ok(qq.one()));
        assert_eq!(qq.canonical_unit(&qq.fraction(3, 2)), Ok(qq.fraction(3, 2)));
    }
}
