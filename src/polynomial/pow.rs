// src/polynomial/pow.rs

use std::fmt::Debug;
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult};
use crate::core::vector;
use crate::polynomial::divrem::rem;
use crate::polynomial::mul::mul;
use crate::polynomial::poly::GrPoly;

/// f^e by left-to-right binary powering; f^0 = 1 for every f.
pub fn pow_ui<R: Ring>(f: &[R::Elem], e: u64, ring: &R) -> GrResult<Vec<R::Elem>> {
    if e == 0 {
        return Ok(vec![ring.one()]);
    }
    let mut f = f.to_vec();
    vector::normalise(&mut f, ring);
    if f.is_empty() {
        return Ok(Vec::new());
    }
    // monomial c·x^k
    if vector::is_zero(&f[..f.len() - 1], ring).is_true() {
        let k = f.len() - 1;
        let c = ring.pow_ui(&f[k], e)?;
        let mut res = vector::zeros(k * e as usize + 1, ring);
        let last = res.len() - 1;
        res[last] = c;
        return Ok(res);
    }
    let mut res = f.clone();
    for bit in (0..63 - e.leading_zeros()).rev() {
        res = mul(&res, &res, ring)?;
        if (e >> bit) & 1 == 1 {
            res = mul(&res, &f, ring)?;
        }
    }
    vector::normalise(&mut res, ring);
    Ok(res)
}

/// f^e mod m, reducing after every multiplication.
pub fn pow_ui_mod<R: Ring>(f: &[R::Elem], e: u64, m: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    if m.is_empty() {
        return Err(GrError::Domain);
    }
    let base = rem(f, m, ring)?;
    if e == 0 {
        return rem(&[ring.one()], m, ring);
    }
    let mut res = base.clone();
    for bit in (0..63 - e.leading_zeros()).rev() {
        res = rem(&mul(&res, &res, ring)?, m, ring)?;
        if (e >> bit) & 1 == 1 {
            res = rem(&mul(&res, &base, ring)?, m, ring)?;
        }
    }
    Ok(res)
}

impl<E: Clone + Debug> GrPoly<E> {
    pub fn pow_ui<R: Ring<Elem = E>>(&self, e: u64, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(pow_ui(self.coeffs(), e, ring)?, ring))
    }

    /// self^e mod m
    pub fn pow_ui_mod<R: Ring<Elem = E>>(&self, e: u64, m: &Self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(pow_ui_mod(self.coeffs(), e, m.coeffs(), ring)?, ring))
    }
}
