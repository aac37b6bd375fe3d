// src/backends/integer_ring.rs

use num::{BigInt, Integer, One, Signed, Zero};
use num::integer::Roots;
use rand::Rng;
use crate::config::Tuning;
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};

/// The integers ZZ over num::BigInt.
///
/// Exact, characteristic zero, not a field: division succeeds only when it
/// is exact, and only ±1 are invertible.
#[derive(Debug, Clone, Default)]
pub struct IntegerRing {
    tuning: Tuning,
}

impl IntegerRing {
    pub fn new() -> Self {
        IntegerRing { tuning: Tuning::default() }
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        IntegerRing { tuning }
    }
}

impl Ring for IntegerRing {
    type Elem = BigInt;

    fn name(&self) -> String {
        "Integer ring (ZZ)".to_string()
    }

    fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn is_field(&self) -> Truth {
        Truth::False
    }

    fn is_integral_domain(&self) -> Truth {
        Truth::True
    }

    fn characteristic(&self) -> BigInt {
        BigInt::zero()
    }

    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    fn one(&self) -> BigInt {
        BigInt::one()
    }

    fn from_i64(&self, value: i64) -> GrResult<BigInt> {
        Ok(BigInt::from(value))
    }

    fn from_bigint(&self, value: &BigInt) -> GrResult<BigInt> {
        Ok(value.clone())
    }

    fn is_zero(&self, x: &BigInt) -> Truth {
        Truth::from_bool(x.is_zero())
    }

    fn is_one(&self, x: &BigInt) -> Truth {
        Truth::from_bool(x.is_one())
    }

    fn is_neg_one(&self, x: &BigInt) -> Truth {
        Truth::from_bool(*x == -BigInt::one())
    }

    fn equal(&self, x: &BigInt, y: &BigInt) -> Truth {
        Truth::from_bool(x == y)
    }

    fn neg(&self, x: &BigInt) -> GrResult<BigInt> {
        Ok(-x)
    }

    fn add(&self, x: &BigInt, y: &BigInt) -> GrResult<BigInt> {
        Ok(x + y)
    }

    fn sub(&self, x: &BigInt, y: &BigInt) -> GrResult<BigInt> {
        Ok(x - y)
    }

    fn mul(&self, x: &BigInt, y: &BigInt) -> GrResult<BigInt> {
        Ok(x * y)
    }

    fn mul_si(&self, x: &BigInt, c: i64) -> GrResult<BigInt> {
        Ok(x * c)
    }

    fn addmul(&self, acc: &mut BigInt, x: &BigInt, y: &BigInt) -> GrResult<()> {
        *acc += x * y;
        Ok(())
    }

    fn submul(&self, acc: &mut BigInt, x: &BigInt, y: &BigInt) -> GrResult<()> {
        *acc -= x * y;
        Ok(())
    }

    fn div(&self, x: &BigInt, y: &BigInt) -> GrResult<BigInt> {
        if y.is_zero() {
            return Err(GrError::Domain);
        }
        let (q, r) = x.div_rem(y);
        if r.is_zero() {
            Ok(q)
        } else {
            Err(GrError::Domain)
        }
    }

    fn divexact(&self, x: &BigInt, y: &BigInt) -> GrResult<BigInt> {
        if y.is_zero() {
            return Err(GrError::Domain);
        }
        Ok(x / y)
    }

    fn div_ui(&self, x: &BigInt, c: u64) -> GrResult<BigInt> {
        self.div(x, &BigInt::from(c))
    }

    fn inv(&self, x: &BigInt) -> GrResult<BigInt> {
        if x.is_one() || *x == -BigInt::one() {
            Ok(x.clone())
        } else {
            Err(GrError::Domain)
        }
    }

    fn pow_ui(&self, x: &BigInt, exp: u64) -> GrResult<BigInt> {
        match u32::try_from(exp) {
            Ok(e) => Ok(num::pow::pow(x.clone(), e as usize)),
            Err(_) => {
                if x.is_zero() || x.is_one() {
                    Ok(x.clone())
                } else if *x == -BigInt::one() {
                    Ok(if exp % 2 == 0 { BigInt::one() } else { x.clone() })
                } else {
                    Err(GrError::Unable)
                }
            }
        }
    }

    fn sqrt(&self, x: &BigInt) -> GrResult<BigInt> {
        if x.is_negative() {
            return Err(GrError::Domain);
        }
        let s = x.sqrt();
        if &s * &s == *x {
            Ok(s)
        } else {
            Err(GrError::Domain)
        }
    }

    fn gcd(&self, x: &BigInt, y: &BigInt) -> GrResult<BigInt> {
        Ok(x.gcd(y))
    }

    fn canonical_unit(&self, x: &BigInt) -> GrResult<BigInt> {
        if x.is_negative() {
            Ok(-BigInt::one())
        } else {
            Ok(BigInt::one())
        }
    }

    fn write(&self, x: &BigInt) -> String {
        x.to_string()
    }

    fn random_elem<G: Rng + ?Sized>(&self, rng: &mut G) -> BigInt {
        match rng.random_range(0..10) {
            0 => BigInt::zero(),
            1..=6 => BigInt::from(rng.random_range(-10i64..=10)),
            7 | 8 => BigInt::from(rng.random_range(-1_000_000i64..=1_000_000)),
            _ => BigInt::from(rng.random::<i64>()) * BigInt::from(rng.random::<i64>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_division() {
        let zz = IntegerRing::new();
        assert_eq!(zz.div(&BigInt::from(12), &BigInt::from(4)), Ok(BigInt::from(3)));
        assert_eq!(zz.div(&BigInt::from(12), &BigInt::from(5)), Err(GrError::Domain));
        assert_eq!(zz.div(&BigInt::from(1), &BigInt::zero()), Err(GrError::Domain));
    }

    #[test]
    fn test_units() {
        let zz = IntegerRing::new();
        assert_eq!(zz.inv(&BigInt::from(-1)), Ok(BigInt::from(-1)));
        assert_eq!(zz.inv(&BigInt::from(2)), Err(GrError::Domain));
        assert_eq!(zz.is_invertible(&BigInt::from(3)), Truth::False);
        assert_eq!(zz.canonical_unit(&BigInt::from(-7)), Ok(BigInt::from(-1)));
    }

    #[test]
    fn test_sqrt_perfect_squares_only() {
        let zz = IntegerRing::new();
        assert_eq!(zz.sqrt(&BigInt::from(49)), Ok(BigInt::from(7)));
        assert_eq!(zz.sqrt(&BigInt::from(50)), Err(GrError::Domain));
        assert_eq!(zz.sqrt(&BigInt::from(-4)), Err(GrError::Domain));
    }

    #[test]
    fn test_generic_elementary_defaults() {
        use crate::core::ring::ElementaryFunction;
        let zz = IntegerRing::new();
        assert_eq!(zz.elementary(ElementaryFunction::Exp, &BigInt::zero()), Ok(BigInt::one()));
        assert_eq!(zz.elementary(ElementaryFunction::Log, &BigInt::one()), Ok(BigInt::zero()));
        assert_eq!(zz.elementary(ElementaryFunction::Exp, &BigInt::one()), Err(GrError::Unable));
    }
}
