// src/polynomial/squarefree.rs

use std::fmt::Debug;
use num::BigInt;
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;
use crate::polynomial::divrem::divexact_poly;
use crate::polynomial::gcd::{content, gcd};
use crate::polynomial::poly::{derivative, GrPoly};

/// f = unit · Π factors[i].0 ^ factors[i].1, with pairwise coprime
/// squarefree factors of positive degree in increasing multiplicity.
#[derive(Debug, Clone)]
pub struct SquarefreeFactorization<E> {
    pub unit: E,
    pub factors: Vec<(GrPoly<E>, u64)>,
}

/// Splits off the unit: over a field the leading coefficient, otherwise
/// the content times the canonical unit of the leading coefficient.
fn split_unit<R: Ring>(f: &[R::Elem], ring: &R) -> GrResult<(R::Elem, Vec<R::Elem>)> {
    let lead = &f[f.len() - 1];
    let unit = if ring.is_field().is_true() {
        lead.clone()
    } else {
        ring.mul(&content(f, ring)?, &ring.canonical_unit(lead)?)?
    };
    let mut g = vector::scalar_divexact(f, &unit, ring)?;
    vector::normalise(&mut g, ring);
    Ok((unit, g))
}

/// Yun's algorithm. Needs characteristic zero or larger than deg f, so that
/// f' only vanishes for constants.
pub fn squarefree_factor<R: Ring>(f: &[R::Elem], ring: &R) -> GrResult<SquarefreeFactorization<R::Elem>> {
    let mut f = f.to_vec();
    vector::normalise(&mut f, ring);
    let Some(lead) = f.last() else {
        return Err(GrError::Domain);
    };
    if !ring.is_zero(lead).is_false() {
        return Err(GrError::Unable);
    }
    if f.len() == 1 {
        return Ok(SquarefreeFactorization { unit: f[0].clone(), factors: Vec::new() });
    }
    let chr = ring.characteristic();
    if chr != BigInt::from(0) && chr < BigInt::from(f.len()) {
        return Err(GrError::Unable);
    }

    let (unit, f) = split_unit(&f, ring)?;
    let fp = derivative(&f, ring)?;
    let a0 = gcd(&f, &fp, ring)?;
    let mut b = divexact_poly(&f, &a0, ring)?;
    let c = divexact_poly(&fp, &a0, ring)?;
    let mut d = vector::sub(&c, &derivative(&b, ring)?, ring)?;
    vector::normalise(&mut d, ring);

    let mut factors = Vec::new();
    let mut i = 1u64;
    while b.len() > 1 {
        let a = gcd(&b, &d, ring)?;
        let next_b = divexact_poly(&b, &a, ring)?;
        let c = divexact_poly(&d, &a, ring)?;
        d = vector::sub(&c, &derivative(&next_b, ring)?, ring)?;
        vector::normalise(&mut d, ring);
        if a.len() > 1 {
            factors.push((GrPoly::from_vec(a, ring), i));
        }
        b = next_b;
        i += 1;
    }
    Ok(SquarefreeFactorization { unit, factors })
}

/// Whether f has no repeated factor: gcd(f, f') constant. Zero is not
/// squarefree; the answer is `Unknown` when the gcd cannot be computed.
pub fn is_squarefree<R: Ring>(f: &[R::Elem], ring: &R) -> Truth {
    let mut f = f.to_vec();
    vector::normalise(&mut f, ring);
    match f.len() {
        0 => return Truth::False,
        1 => return !ring.is_zero(&f[0]),
        _ => {}
    }
    let g = derivative(&f, ring).and_then(|fp| gcd(&f, &fp, ring));
    match g {
        Ok(g) => Truth::from_bool(g.len() == 1),
        Err(_) => Truth::Unknown,
    }
}

impl<E: Clone + Debug> GrPoly<E> {
    pub fn squarefree_factor<R: Ring<Elem = E>>(&self, ring: &R) -> GrResult<SquarefreeFactorization<E>> {
        squarefree_factor(self.coeffs(), ring)
    }

    pub fn is_squarefree<R: Ring<Elem = E>>(&self, ring: &R) -> Truth {
        is_squarefree(self.coeffs(), ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{IntegerRing, NmodRing, RationalRing};

    #[test]
    fn test_yun_over_integers() {
        let zz = IntegerRing::new();
        // -2·x·(x + 1)^2
        let f = GrPoly::from_i64s(&[0, -2, -4, -2], &zz).unwrap();
        let sf = f.squarefree_factor(&zz).unwrap();
        assert_eq!(sf.unit, BigInt::from(-2));
        assert_eq!(sf.factors.len(), 2);
        assert!(sf.factors[0].0.equal(&GrPoly::from_i64s(&[0, 1], &zz).unwrap(), &zz).is_true());
        assert_eq!(sf.factors[0].1, 1);
        assert!(sf.factors[1].0.equal(&GrPoly::from_i64s(&[1, 1], &zz).unwrap(), &zz).is_true());
        assert_eq!(sf.factors[1].1, 2);
    }

    #[test]
    fn test_yun_over_rationals() {
        let qq = RationalRing::new();
        // 3·(x - 1)^3·(x + 2)
        let base = GrPoly::from_i64s(&[-1, 1], &qq).unwrap();
        let cube = base.mul(&base, &qq).unwrap().mul(&base, &qq).unwrap();
        let f = cube.mul(&GrPoly::from_i64s(&[6, 3], &qq).unwrap(), &qq).unwrap();
        let sf = f.squarefree_factor(&qq).unwrap();
        assert_eq!(sf.unit, qq.fraction(3, 1));
        assert_eq!(sf.factors.len(), 2);
        assert_eq!(sf.factors[0].1, 1);
        assert!(sf.factors[0].0.equal(&GrPoly::from_i64s(&[2, 1], &qq).unwrap(), &qq).is_true());
        assert_eq!(sf.factors[1].1, 3);
        assert!(sf.factors[1].0.equal(&base, &qq).is_true());
    }

    #[test]
    fn test_small_characteristic_is_unable() {
        let f3 = NmodRing::new(3);
        assert_eq!(squarefree_factor(&[1, 0, 0, 1], &f3).map(|s| s.unit), Err(GrError::Unable));
    }

    #[test]
    fn test_is_squarefree() {
        let zz = IntegerRing::new();
        assert!(is_squarefree(&GrPoly::from_i64s(&[-1, 0, 1], &zz).unwrap().into_vec(), &zz).is_true());
        assert!(is_squarefree(&GrPoly::from_i64s(&[1, 2, 1], &zz).unwrap().into_vec(), &zz).is_false());
        // x^3 + 1 = (x + 1)^3 over F_3
        let f3 = NmodRing::new(3);
        assert!(is_squarefree(&[1, 0, 0, 1], &f3).is_false());
        assert!(is_squarefree(&[1, 1], &f3).is_true());
    }
}
