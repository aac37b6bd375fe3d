// src/polynomial/divrem.rs
//
// Division with remainder. Operands are coefficient slices with a nonzero
// leading coefficient in the divisor; quotients have len(a) - len(b) + 1
// coefficients and remainders len(b) - 1 (before normalisation).

use std::fmt::Debug;
use log::{debug, warn};
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;
use crate::polynomial::inv_series::div_series;
use crate::polynomial::mul::{mul, mullow};
use crate::polynomial::poly::GrPoly;

/// Schoolbook division. Uses one multiplication per quotient coefficient when
/// the leading coefficient of `b` is invertible and one ring division
/// otherwise; the latter may fail with `Domain` on the first inexact step.
pub fn divrem_basecase<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    ring: &R,
) -> GrResult<(Vec<R::Elem>, Vec<R::Elem>)> {
    let (la, lb) = (a.len(), b.len());
    debug_assert!(lb >= 1 && la >= lb);
    let lead = &b[lb - 1];
    let inv = ring.inv(lead).ok();

    let lenq = la - lb + 1;
    let mut r = a.to_vec();
    let mut q = vector::zeros(lenq, ring);

    for i in (0..lenq).rev() {
        let top = &r[i + lb - 1];
        let c = match ring.is_zero(top) {
            Truth::True => continue,
            _ => match &inv {
                Some(inv) => ring.mul(top, inv)?,
                None => ring.div(top, lead)?,
            },
        };
        vector::scalar_submul(&mut r[i..i + lb - 1], &b[..lb - 1], &c, ring)?;
        q[i] = c;
    }

    r.truncate(lb - 1);
    Ok((q, r))
}

/// Quotient by reversal: rev(q) = rev(a) / rev(b) mod x^lenq. `Domain` when
/// the leading coefficient of `b` is not invertible.
pub fn divrem_newton<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    ring: &R,
) -> GrResult<(Vec<R::Elem>, Vec<R::Elem>)> {
    let (la, lb) = (a.len(), b.len());
    let lenq = la - lb + 1;
    ring.inv(&b[lb - 1])?;

    let arev: Vec<R::Elem> = a.iter().rev().take(lenq).cloned().collect();
    let brev: Vec<R::Elem> = b.iter().rev().take(lenq).cloned().collect();
    let mut q = div_series(&arev, &brev, lenq, ring)?;
    q.reverse();

    let r = remainder_from_quotient(a, b, &q, ring)?;
    Ok((q, r))
}

/// a - q·b on the low len(b) - 1 coefficients.
fn remainder_from_quotient<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    q: &[R::Elem],
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    let lr = b.len() - 1;
    if lr == 0 {
        return Ok(Vec::new());
    }
    let qb = mullow(q, b, lr, ring)?;
    let mut r = a[..lr].to_vec();
    vector::sub_assign(&mut r[..qb.len()], &qb, ring)?;
    Ok(r)
}

/// Quotient of a (length 2n - 1) by b (length n), recursing on the top
/// halves of the dividend and divisor.
fn div_divconquer_balanced<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    cutoff: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    let n = b.len();
    debug_assert_eq!(a.len(), 2 * n - 1);
    if n <= cutoff.max(2) {
        return Ok(divrem_basecase(a, b, ring)?.0);
    }

    let k = n / 2;
    let h = n - k;

    // high quotient coefficients from the top 2h - 1 terms
    let q1 = div_divconquer_balanced(&a[2 * k..], &b[k..], cutoff, ring)?;
    let t = mul(&q1, b, ring)?;

    // a - q1·b·x^k on the window [h, h + 2k - 1)
    let mut w = a[h..h + 2 * k - 1].to_vec();
    for (j, x) in w.iter_mut().enumerate() {
        let idx = h + j - k;
        if idx < t.len() {
            *x = ring.sub(x, &t[idx])?;
        }
    }
    let q0 = div_divconquer_balanced(&w, &b[h..], cutoff, ring)?;

    let mut q = q0;
    q.extend(q1);
    Ok(q)
}

/// Divide-and-conquer division. Long dividends are consumed in blocks of
/// len(b) quotient coefficients; the last block reduces to a balanced
/// problem on the top coefficients.
pub fn divrem_divconquer<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    ring: &R,
) -> GrResult<(Vec<R::Elem>, Vec<R::Elem>)> {
    let (la, lb) = (a.len(), b.len());
    let cutoff = ring.tuning().divrem_divconquer;
    let lenq = la - lb + 1;
    let mut q = vector::zeros(lenq, ring);
    let mut r = a.to_vec();
    let mut cur = la;

    while cur >= 2 * lb {
        let s = cur - (2 * lb - 1);
        let block = div_divconquer_balanced(&r[s..cur], b, cutoff, ring)?;
        let t = mul(&block, b, ring)?;
        vector::sub_assign(&mut r[s..s + t.len()], &t, ring)?;
        for (j, c) in block.into_iter().enumerate() {
            q[s + j] = c;
        }
        cur -= lb;
    }

    let m = cur - lb + 1;
    if m > 0 {
        let top = &r[cur - (2 * m - 1)..cur];
        let block = div_divconquer_balanced(top, &b[lb - m..], cutoff, ring)?;
        for (j, c) in block.into_iter().enumerate() {
            q[j] = c;
        }
    }

    let rem = remainder_from_quotient(a, b, &q, ring)?;
    Ok((q, rem))
}

fn check_divisor<R: Ring>(b: &[R::Elem], ring: &R) -> GrResult<()> {
    match b.last() {
        None => Err(GrError::Domain),
        Some(lead) => match ring.is_zero(lead) {
            Truth::False => Ok(()),
            _ => Err(GrError::Unable),
        },
    }
}

/// Division with remainder: `Domain` for a zero divisor, `Unable` when the
/// divisor's leading coefficient is not provably nonzero.
pub fn divrem<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    ring: &R,
) -> GrResult<(Vec<R::Elem>, Vec<R::Elem>)> {
    check_divisor(b, ring)?;
    let (la, lb) = (a.len(), b.len());
    if la < lb {
        return Ok((Vec::new(), a.to_vec()));
    }

    let tuning = ring.tuning();
    let lenq = la - lb + 1;
    if lb == 1 || lenq <= 2 || lb < tuning.divrem_divconquer {
        return divrem_basecase(a, b, ring);
    }

    if lb >= tuning.divrem_newton && lenq >= tuning.divrem_newton {
        match divrem_newton(a, b, ring) {
            Ok(res) => return Ok(res),
            Err(GrError::Domain) => {
                warn!("Newton division unavailable (leading coefficient not invertible), using divide-and-conquer");
            }
            Err(e) => return Err(e),
        }
    }
    debug!("divrem: divide-and-conquer for lengths {} / {}", la, lb);
    divrem_divconquer(a, b, ring)
}

/// Quotient only.
pub fn div<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    Ok(divrem(a, b, ring)?.0)
}

pub fn rem<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let mut r = divrem(a, b, ring)?.1;
    vector::normalise(&mut r, ring);
    Ok(r)
}

/// Quotient of a division expected to be exact; a remainder that is not
/// provably zero is reported as `Domain` (nonzero) or `Unable` (undecided).
pub fn divexact_poly<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let (mut q, r) = divrem(a, b, ring)?;
    match vector::is_zero(&r, ring) {
        Truth::True => {}
        Truth::False => return Err(GrError::Domain),
        Truth::Unknown => return Err(GrError::Unable),
    }
    vector::normalise(&mut q, ring);
    Ok(q)
}

/// lc(b)^(len(a) - len(b) + 1) · a reduced modulo b without divisions.
pub fn pseudo_rem<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    check_divisor(b, ring)?;
    let (la, lb) = (a.len(), b.len());
    if la < lb {
        return Ok(a.to_vec());
    }
    let lead = &b[lb - 1];
    let mut r = a.to_vec();
    for i in (0..la - lb + 1).rev() {
        let top = r[i + lb - 1].clone();
        vector::scalar_mul_in_place(&mut r[..i + lb - 1], lead, ring)?;
        vector::scalar_submul(&mut r[i..i + lb - 1], &b[..lb - 1], &top, ring)?;
    }
    r.truncate(lb - 1);
    vector::normalise(&mut r, ring);
    Ok(r)
}

impl<E: Clone + Debug> GrPoly<E> {
    pub fn divrem<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<(Self, Self)> {
        let (q, r) = divrem(self.coeffs(), other.coeffs(), ring)?;
        Ok((GrPoly::from_vec(q, ring), GrPoly::from_vec(r, ring)))
    }

    pub fn divrem_basecase<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<(Self, Self)> {
        check_divisor(other.coeffs(), ring)?;
        if self.len() < other.len() {
            return Ok((GrPoly::new(), self.clone()));
        }
        let (q, r) = divrem_basecase(self.coeffs(), other.coeffs(), ring)?;
        Ok((GrPoly::from_vec(q, ring), GrPoly::from_vec(r, ring)))
    }

    pub fn divrem_newton<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<(Self, Self)> {
        check_divisor(other.coeffs(), ring)?;
        if self.len() < other.len() {
            return Ok((GrPoly::new(), self.clone()));
        }
        let (q, r) = divrem_newton(self.coeffs(), other.coeffs(), ring)?;
        Ok((GrPoly::from_vec(q, ring), GrPoly::from_vec(r, ring)))
    }

    pub fn divrem_divconquer<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<(Self, Self)> {
        check_divisor(other.coeffs(), ring)?;
        if self.len() < other.len() {
            return Ok((GrPoly::new(), self.clone()));
        }
        let (q, r) = divrem_divconquer(self.coeffs(), other.coeffs(), ring)?;
        Ok((GrPoly::from_vec(q, ring), GrPoly::from_vec(r, ring)))
    }

    pub fn div<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(div(self.coeffs(), other.coeffs(), ring)?, ring))
    }

    pub fn rem<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(rem(self.coeffs(), other.coeffs(), ring)?, ring))
    }

    /// Quotient of an exact division.
    pub fn divexact<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(divexact_poly(self.coeffs(), other.coeffs(), ring)?, ring))
    }

    pub fn pseudo_rem<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(pseudo_rem(self.coeffs(), other.coeffs(), ring)?, ring))
    }
}
