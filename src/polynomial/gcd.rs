// src/polynomial/gcd.rs

use std::fmt::Debug;
use log::debug;
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;
use crate::polynomial::divrem::{divrem, pseudo_rem, rem};
use crate::polynomial::hgcd::{division_step, hgcd_with, Mat2, ResultantAcc};
use crate::polynomial::mul::mul;
use crate::polynomial::poly::{derivative, GrPoly};

fn normalised<R: Ring>(a: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let mut v = a.to_vec();
    vector::normalise(&mut v, ring);
    if let Some(lead) = v.last() {
        if !ring.is_zero(lead).is_false() {
            return Err(GrError::Unable);
        }
    }
    Ok(v)
}

fn require_field<R: Ring>(ring: &R) -> GrResult<()> {
    match ring.is_field() {
        Truth::True => Ok(()),
        _ => Err(GrError::Unable),
    }
}

/// f / lc(f)
fn monic<R: Ring>(f: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    match f.last() {
        None => Ok(Vec::new()),
        Some(lead) => {
            let inv = ring.inv(lead)?;
            let mut res = vector::scalar_mul(f, &inv, ring)?;
            let n = res.len();
            res[n - 1] = ring.one();
            Ok(res)
        }
    }
}

/// GCD of the coefficients.
pub fn content<R: Ring>(f: &[R::Elem], ring: &R) -> GrResult<R::Elem> {
    let mut g = ring.zero();
    for c in f {
        g = ring.gcd(&g, c)?;
        if ring.is_one(&g).is_true() {
            break;
        }
    }
    Ok(g)
}

/// f divided by its content and by the canonical unit of its leading
/// coefficient.
pub fn primitive_part<R: Ring>(f: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let Some(lead) = f.last() else {
        return Ok(Vec::new());
    };
    let c = content(f, ring)?;
    let u = ring.canonical_unit(lead)?;
    let c = ring.mul(&c, &u)?;
    vector::scalar_divexact(f, &c, ring)
}

/// Euclidean GCD over a field, made monic.
pub fn gcd_euclidean<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let mut u = normalised(a, ring)?;
    let mut v = normalised(b, ring)?;
    if u.len() < v.len() {
        std::mem::swap(&mut u, &mut v);
    }
    while !v.is_empty() {
        let r = normalised(&rem(&u, &v, ring)?, ring)?;
        u = v;
        v = r;
    }
    monic(&u, ring)
}

/// GCD over a field, collapsing the remainder sequence with half-GCD while
/// the operands are long.
pub fn gcd_hgcd<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let mut u = normalised(a, ring)?;
    let mut v = normalised(b, ring)?;
    if u.len() < v.len() {
        std::mem::swap(&mut u, &mut v);
    }
    let cutoff = ring.tuning().gcd_hgcd.max(2);
    while !v.is_empty() {
        if v.len() < cutoff {
            return gcd_euclidean(&u, &v, ring);
        }
        if u.len() == v.len() || 2 * v.len() <= u.len() {
            let r = normalised(&rem(&u, &v, ring)?, ring)?;
            u = v;
            v = r;
            continue;
        }
        let h = hgcd_with(&u, &v, &mut None, ring)?;
        u = h.a;
        v = h.b;
    }
    monic(&u, ring)
}

/// GCD over a GCD domain by the primitive remainder sequence: pseudo
/// remainders with the content removed at every step.
pub fn gcd_primitive<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let u = normalised(a, ring)?;
    let v = normalised(b, ring)?;
    if u.is_empty() {
        return primitive_part_with_content(&v, ring);
    }
    if v.is_empty() {
        return primitive_part_with_content(&u, ring);
    }
    let c = ring.gcd(&content(&u, ring)?, &content(&v, ring)?)?;
    let (mut u, mut v) = (primitive_part(&u, ring)?, primitive_part(&v, ring)?);
    if u.len() < v.len() {
        std::mem::swap(&mut u, &mut v);
    }
    while !v.is_empty() {
        let r = normalised(&pseudo_rem(&u, &v, ring)?, ring)?;
        u = v;
        v = primitive_part(&r, ring)?;
    }
    vector::scalar_mul(&primitive_part(&u, ring)?, &c, ring)
}

/// f with its leading coefficient made canonical (content kept).
fn primitive_part_with_content<R: Ring>(f: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    match f.last() {
        None => Ok(Vec::new()),
        Some(lead) => {
            let u = ring.canonical_unit(lead)?;
            vector::scalar_divexact(f, &u, ring)
        }
    }
}

/// gcd(a, b): monic over fields, canonical associate with the gcd of the
/// contents over other GCD domains.
pub fn gcd<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    if !ring.is_exact().is_true() {
        return Err(GrError::Unable);
    }
    match ring.is_field() {
        Truth::True => {
            if a.len().min(b.len()) >= ring.tuning().gcd_hgcd {
                debug!("gcd: half-GCD for lengths {} and {}", a.len(), b.len());
                gcd_hgcd(a, b, ring)
            } else {
                gcd_euclidean(a, b, ring)
            }
        }
        Truth::False if ring.is_integral_domain().is_true() => gcd_primitive(a, b, ring),
        _ => Err(GrError::Unable),
    }
}

/// Bezout identity s·a + t·b = g.
#[derive(Debug, Clone, PartialEq)]
pub struct Xgcd<E> {
    pub g: Vec<E>,
    pub s: Vec<E>,
    pub t: Vec<E>,
}

fn finish_xgcd<R: Ring>(g: Vec<R::Elem>, s: Vec<R::Elem>, t: Vec<R::Elem>, ring: &R) -> GrResult<Xgcd<R::Elem>> {
    let Some(lead) = g.last() else {
        return Ok(Xgcd { g, s, t });
    };
    let inv = ring.inv(lead)?;
    let mut s = vector::scalar_mul(&s, &inv, ring)?;
    let mut t = vector::scalar_mul(&t, &inv, ring)?;
    vector::normalise(&mut s, ring);
    vector::normalise(&mut t, ring);
    Ok(Xgcd { g: monic(&g, ring)?, s, t })
}

/// Extended Euclidean algorithm over a field.
pub fn xgcd_euclidean<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Xgcd<R::Elem>> {
    require_field(ring)?;
    let x = xgcd_euclidean_raw(&normalised(a, ring)?, &normalised(b, ring)?, ring)?;
    finish_xgcd(x.g, x.s, x.t, ring)
}

/// Extended GCD through half-GCD. The cofactor matrix N satisfies
/// [u; v] = N·[a; b] for the current pair; a half-GCD matrix M updates it
/// to M⁻¹·N and a single step to [[0, 1], [1, -q]]·N.
pub fn xgcd_hgcd<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Xgcd<R::Elem>> {
    require_field(ring)?;
    let (mut u, mut v) = (normalised(a, ring)?, normalised(b, ring)?);
    let swapped = u.len() < v.len();
    if swapped {
        std::mem::swap(&mut u, &mut v);
    }
    let cutoff = ring.tuning().xgcd_hgcd.max(2);
    let mut n = Mat2::identity(ring);
    while !v.is_empty() {
        if v.len() < cutoff {
            break;
        }
        if u.len() == v.len() || 2 * v.len() <= u.len() {
            let (q, r) = division_step(&u, &v, 0, &mut None, ring)?;
            let step_inv = Mat2::step(q, ring).inverse(ring)?;
            n = step_inv.mul(&n, ring)?;
            u = v;
            v = r;
            continue;
        }
        let h = hgcd_with(&u, &v, &mut None, ring)?;
        n = h.m.inverse(ring)?.mul(&n, ring)?;
        u = h.a;
        v = h.b;
    }

    // finish the short tail classically; its cofactors compose with N
    let tail = xgcd_euclidean_raw(&u, &v, ring)?;
    let s = vector::add(&mul(&tail.s, &n.m00, ring)?, &mul(&tail.t, &n.m10, ring)?, ring)?;
    let t = vector::add(&mul(&tail.s, &n.m01, ring)?, &mul(&tail.t, &n.m11, ring)?, ring)?;
    let (s, t) = if swapped { (t, s) } else { (s, t) };
    finish_xgcd(tail.g, s, t, ring)
}

/// Extended Euclid without the final normalisation to a monic gcd.
fn xgcd_euclidean_raw<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Xgcd<R::Elem>> {
    let (mut r0, mut r1) = (a.to_vec(), b.to_vec());
    let (mut s0, mut s1) = (vec![ring.one()], Vec::new());
    let (mut t0, mut t1) = (Vec::new(), vec![ring.one()]);
    while !r1.is_empty() {
        let (q, r) = divrem(&r0, &r1, ring)?;
        let r = normalised(&r, ring)?;
        let mut s = vector::sub(&s0, &mul(&q, &s1, ring)?, ring)?;
        let mut t = vector::sub(&t0, &mul(&q, &t1, ring)?, ring)?;
        vector::normalise(&mut s, ring);
        vector::normalise(&mut t, ring);
        r0 = std::mem::replace(&mut r1, r);
        s0 = std::mem::replace(&mut s1, s);
        t0 = std::mem::replace(&mut t1, t);
    }
    Ok(Xgcd { g: r0, s: s0, t: t0 })
}

/// Monic g = gcd(a, b) with s·a + t·b = g (fields only).
pub fn xgcd<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Xgcd<R::Elem>> {
    if !ring.is_exact().is_true() {
        return Err(GrError::Unable);
    }
    if a.len().min(b.len()) >= ring.tuning().xgcd_hgcd {
        debug!("xgcd: half-GCD for lengths {} and {}", a.len(), b.len());
        xgcd_hgcd(a, b, ring)
    } else {
        xgcd_euclidean(a, b, ring)
    }
}

fn odd_product(len_a: usize, len_b: usize) -> bool {
    (len_a - 1) % 2 == 1 && (len_b - 1) % 2 == 1
}

/// Orders the operands so the first is at least as long, returning the
/// starting sign of the resultant.
fn order_for_resultant<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    ring: &R,
) -> GrResult<(Vec<R::Elem>, Vec<R::Elem>, R::Elem)> {
    let (u, v) = (normalised(a, ring)?, normalised(b, ring)?);
    if u.len() >= v.len() {
        return Ok((u, v, ring.one()));
    }
    let sign = if odd_product(u.len(), v.len()) { ring.neg(&ring.one())? } else { ring.one() };
    Ok((v, u, sign))
}

/// Resultant by the Euclidean remainder sequence:
/// res(u, v) = (-1)^(deg u·deg v)·lc(v)^(deg u - deg r)·res(v, r).
pub fn resultant_euclidean<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<R::Elem> {
    let (mut u, mut v, mut res) = order_for_resultant(a, b, ring)?;
    if v.is_empty() {
        return Ok(ring.zero());
    }
    loop {
        let (lu, lv) = (u.len(), v.len());
        if lv == 1 {
            let f = ring.pow_ui(&v[0], (lu - 1) as u64)?;
            return ring.mul(&res, &f);
        }
        let r = normalised(&rem(&u, &v, ring)?, ring)?;
        if r.is_empty() {
            return Ok(ring.zero());
        }
        if odd_product(lu, lv) {
            res = ring.neg(&res)?;
        }
        let f = ring.pow_ui(&v[lv - 1], (lu - r.len()) as u64)?;
        res = ring.mul(&res, &f)?;
        u = v;
        v = r;
    }
}

/// Resultant with the remainder sequence collapsed by half-GCD; leading
/// coefficient powers and signs are collected lazily through the recursion.
pub fn resultant_hgcd<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<R::Elem> {
    let (mut u, mut v, sign) = order_for_resultant(a, b, ring)?;
    if v.is_empty() {
        return Ok(ring.zero());
    }
    let cutoff = ring.tuning().resultant_hgcd.max(2);
    let mut acc = Some(ResultantAcc::new(sign));
    loop {
        if v.len() < cutoff {
            let tail = resultant_euclidean(&u, &v, ring)?;
            let res = acc.map(|a| a.res).unwrap_or_else(|| ring.one());
            return ring.mul(&res, &tail);
        }
        let (next_u, next_v) = if u.len() == v.len() || 2 * v.len() <= u.len() {
            let (_, r) = division_step(&u, &v, 0, &mut acc, ring)?;
            (v, r)
        } else {
            let h = hgcd_with(&u, &v, &mut acc, ring)?;
            (h.a, h.b)
        };
        if next_v.is_empty() {
            return Ok(ring.zero());
        }
        if let Some(acc) = acc.as_mut() {
            acc.flush(next_v.len(), ring)?;
        }
        u = next_u;
        v = next_v;
    }
}

/// Subresultant pseudo-remainder sequence; divisions are exact in any
/// integral domain.
pub fn resultant_subresultant<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<R::Elem> {
    let (mut u, mut v, mut s) = order_for_resultant(a, b, ring)?;
    if v.is_empty() {
        return Ok(ring.zero());
    }
    if v.len() == 1 {
        let f = ring.pow_ui(&v[0], (u.len() - 1) as u64)?;
        return ring.mul(&s, &f);
    }
    let mut g = ring.one();
    let mut h = ring.one();
    loop {
        let (du, dv) = (u.len() - 1, v.len() - 1);
        let delta = du - dv;
        if du % 2 == 1 && dv % 2 == 1 {
            s = ring.neg(&s)?;
        }
        let r = normalised(&pseudo_rem(&u, &v, ring)?, ring)?;
        u = v;
        let denom = ring.mul(&g, &ring.pow_ui(&h, delta as u64)?)?;
        v = vector::scalar_divexact(&r, &denom, ring)?;
        g = u[u.len() - 1].clone();
        if delta > 0 {
            let num = ring.pow_ui(&g, delta as u64)?;
            let den = ring.pow_ui(&h, (delta - 1) as u64)?;
            h = ring.divexact(&num, &den)?;
        }
        if v.len() <= 1 {
            break;
        }
    }
    if v.is_empty() {
        return Ok(ring.zero());
    }
    let du = u.len() - 1;
    let num = ring.pow_ui(&v[0], du as u64)?;
    let den = ring.pow_ui(&h, (du - 1) as u64)?;
    let h = ring.divexact(&num, &den)?;
    ring.mul(&s, &h)
}

/// res(a, b); zero when either operand is zero.
pub fn resultant<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<R::Elem> {
    if !ring.is_exact().is_true() {
        return Err(GrError::Unable);
    }
    match ring.is_field() {
        Truth::True => {
            if a.len().min(b.len()) >= ring.tuning().resultant_hgcd {
                debug!("resultant: half-GCD for lengths {} and {}", a.len(), b.len());
                resultant_hgcd(a, b, ring)
            } else {
                resultant_euclidean(a, b, ring)
            }
        }
        Truth::False if ring.is_integral_domain().is_true() => resultant_subresultant(a, b, ring),
        _ => Err(GrError::Unable),
    }
}

/// (-1)^(n(n-1)/2)·res(f, f')/lc(f) with n = deg f.
///
/// `Domain` for constants; `Unable` when the derivative loses degree
/// (characteristic dividing deg f).
pub fn discriminant<R: Ring>(f: &[R::Elem], ring: &R) -> GrResult<R::Elem> {
    let f = normalised(f, ring)?;
    if f.len() < 2 {
        return Err(GrError::Domain);
    }
    let n = f.len() - 1;
    let mut fp = derivative(&f, ring)?;
    vector::normalise(&mut fp, ring);
    if fp.len() != n {
        return Err(GrError::Unable);
    }
    let res = resultant(&f, &fp, ring)?;
    let mut d = ring.divexact(&res, &f[n])?;
    if (n * (n - 1) / 2) % 2 == 1 {
        d = ring.neg(&d)?;
    }
    Ok(d)
}

impl<E: Clone + Debug> GrPoly<E> {
    pub fn gcd<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(gcd(self.coeffs(), other.coeffs(), ring)?, ring))
    }

    /// (g, s, t) with s·self + t·other = g.
    pub fn xgcd<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<(Self, Self, Self)> {
        let x = xgcd(self.coeffs(), other.coeffs(), ring)?;
        Ok((
            GrPoly::from_vec(x.g, ring),
            GrPoly::from_vec(x.s, ring),
            GrPoly::from_vec(x.t, ring),
        ))
    }

    pub fn resultant<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<E> {
        resultant(self.coeffs(), other.coeffs(), ring)
    }

    pub fn discriminant<R: Ring<Elem = E>>(&self, ring: &R) -> GrResult<E> {
        discriminant(self.coeffs(), ring)
    }

    pub fn content<R: Ring<Elem = E>>(&self, ring: &R) -> GrResult<E> {
        content(self.coeffs(), ring)
    }
}
