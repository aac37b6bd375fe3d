// src/polynomial/hgcd.rs

use std::fmt::Debug;
use log::{debug, trace};
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult};
use crate::core::vector;
use crate::polynomial::divrem::divrem;
use crate::polynomial::mul::mul;
use crate::polynomial::poly::GrPoly;

/// 2x2 matrix of polynomials with determinant ±1.
///
/// Half-GCD matrices are products of Euclidean step matrices
/// [[q, 1], [1, 0]], so `[u; v] = M·[u'; v']` maps a later remainder pair
/// back to an earlier one.
#[derive(Debug, Clone, PartialEq)]
pub struct Mat2<E> {
    pub m00: Vec<E>,
    pub m01: Vec<E>,
    pub m10: Vec<E>,
    pub m11: Vec<E>,
    /// Determinant, +1 or -1.
    pub det: i8,
}

impl<E: Clone + Debug> Mat2<E> {
    pub fn identity<R: Ring<Elem = E>>(ring: &R) -> Self {
        Mat2 {
            m00: vec![ring.one()],
            m01: Vec::new(),
            m10: Vec::new(),
            m11: vec![ring.one()],
            det: 1,
        }
    }

    /// [[q, 1], [1, 0]]
    pub fn step<R: Ring<Elem = E>>(q: Vec<E>, ring: &R) -> Self {
        Mat2 {
            m00: q,
            m01: vec![ring.one()],
            m10: vec![ring.one()],
            m11: Vec::new(),
            det: -1,
        }
    }

    pub fn is_identity<R: Ring<Elem = E>>(&self, ring: &R) -> bool {
        self.m01.is_empty()
            && self.m10.is_empty()
            && self.m00.len() == 1
            && self.m11.len() == 1
            && ring.is_one(&self.m00[0]).is_true()
            && ring.is_one(&self.m11[0]).is_true()
    }

    fn min_entry_len(&self) -> usize {
        self.m00.len().min(self.m01.len()).min(self.m10.len()).min(self.m11.len())
    }

    /// self·other, classical or by Strassen's seven products.
    pub fn mul<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        let cutoff = ring.tuning().mat2_strassen;
        if self.min_entry_len().min(other.min_entry_len()) >= cutoff {
            self.mul_strassen(other, ring)
        } else {
            self.mul_classical(other, ring)
        }
    }

    pub fn mul_classical<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        let entry = |x: &[E], y: &[E], z: &[E], w: &[E]| -> GrResult<Vec<E>> {
            let mut s = vector::add(&mul(x, y, ring)?, &mul(z, w, ring)?, ring)?;
            vector::normalise(&mut s, ring);
            Ok(s)
        };
        Ok(Mat2 {
            m00: entry(&self.m00, &other.m00, &self.m01, &other.m10)?,
            m01: entry(&self.m00, &other.m01, &self.m01, &other.m11)?,
            m10: entry(&self.m10, &other.m00, &self.m11, &other.m10)?,
            m11: entry(&self.m10, &other.m01, &self.m11, &other.m11)?,
            det: self.det * other.det,
        })
    }

    pub fn mul_strassen<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        let (a, b) = (self, other);
        let add = |x: &[E], y: &[E]| vector::add(x, y, ring);
        let sub = |x: &[E], y: &[E]| vector::sub(x, y, ring);

        let p1 = mul(&add(&a.m00, &a.m11)?, &add(&b.m00, &b.m11)?, ring)?;
        let p2 = mul(&add(&a.m10, &a.m11)?, &b.m00, ring)?;
        let p3 = mul(&a.m00, &sub(&b.m01, &b.m11)?, ring)?;
        let p4 = mul(&a.m11, &sub(&b.m10, &b.m00)?, ring)?;
        let p5 = mul(&add(&a.m00, &a.m01)?, &b.m11, ring)?;
        let p6 = mul(&sub(&a.m10, &a.m00)?, &add(&b.m00, &b.m01)?, ring)?;
        let p7 = mul(&sub(&a.m01, &a.m11)?, &add(&b.m10, &b.m11)?, ring)?;

        let mut m00 = add(&sub(&add(&p1, &p4)?, &p5)?, &p7)?;
        let mut m01 = add(&p3, &p5)?;
        let mut m10 = add(&p2, &p4)?;
        let mut m11 = add(&add(&sub(&p1, &p2)?, &p3)?, &p6)?;
        for e in [&mut m00, &mut m01, &mut m10, &mut m11] {
            vector::normalise(e, ring);
        }
        Ok(Mat2 { m00, m01, m10, m11, det: a.det * b.det })
    }

    /// M·[u; v]
    pub fn apply<R: Ring<Elem = E>>(&self, u: &[E], v: &[E], ring: &R) -> GrResult<(Vec<E>, Vec<E>)> {
        let mut x = vector::add(&mul(&self.m00, u, ring)?, &mul(&self.m01, v, ring)?, ring)?;
        let mut y = vector::add(&mul(&self.m10, u, ring)?, &mul(&self.m11, v, ring)?, ring)?;
        vector::normalise(&mut x, ring);
        vector::normalise(&mut y, ring);
        Ok((x, y))
    }

    /// M⁻¹·[u; v] = det·[m11·u - m01·v; m00·v - m10·u]
    pub fn apply_inverse<R: Ring<Elem = E>>(&self, u: &[E], v: &[E], ring: &R) -> GrResult<(Vec<E>, Vec<E>)> {
        let mut x = vector::sub(&mul(&self.m11, u, ring)?, &mul(&self.m01, v, ring)?, ring)?;
        let mut y = vector::sub(&mul(&self.m00, v, ring)?, &mul(&self.m10, u, ring)?, ring)?;
        if self.det < 0 {
            vector::neg_in_place(&mut x, ring)?;
            vector::neg_in_place(&mut y, ring)?;
        }
        vector::normalise(&mut x, ring);
        vector::normalise(&mut y, ring);
        Ok((x, y))
    }

    /// det·[[m11, -m01], [-m10, m00]]
    pub fn inverse<R: Ring<Elem = E>>(&self, ring: &R) -> GrResult<Self> {
        let (mut m00, mut m11) = (self.m11.clone(), self.m00.clone());
        let (mut m01, mut m10) = (vector::neg(&self.m01, ring)?, vector::neg(&self.m10, ring)?);
        if self.det < 0 {
            for e in [&mut m00, &mut m01, &mut m10, &mut m11] {
                vector::neg_in_place(e, ring)?;
            }
        }
        Ok(Mat2 { m00, m01, m10, m11, det: self.det })
    }
}

/// Running product for resultants computed through half-GCD.
///
/// The factor lc(v)^(len u - len r) of a division step u = q·v + r needs
/// the true length of r, which inside the recursion is only known once the
/// next step starts. The pending pair holds lc(v) and len(u) until then.
/// Lengths are true lengths: shifted length plus the recursion offset.
#[derive(Debug, Clone)]
pub(crate) struct ResultantAcc<E> {
    pub(crate) res: E,
    pending: Option<(E, usize)>,
}

impl<E: Clone + Debug> ResultantAcc<E> {
    pub(crate) fn new(res: E) -> Self {
        ResultantAcc { res, pending: None }
    }

    pub(crate) fn flush<R: Ring<Elem = E>>(&mut self, next_len: usize, ring: &R) -> GrResult<()> {
        if let Some((lc, len_u)) = self.pending.take() {
            let f = ring.pow_ui(&lc, (len_u - next_len) as u64)?;
            self.res = ring.mul(&self.res, &f)?;
        }
        Ok(())
    }

    fn record_step<R: Ring<Elem = E>>(&mut self, len_u: usize, len_v: usize, lc_v: &E, ring: &R) -> GrResult<()> {
        self.flush(len_v, ring)?;
        if (len_u - 1) % 2 == 1 && (len_v - 1) % 2 == 1 {
            self.res = ring.neg(&self.res)?;
        }
        self.pending = Some((lc_v.clone(), len_u));
        Ok(())
    }
}

/// One Euclidean step u = q·v + r, recorded into the resultant when one is
/// being accumulated. `offset` is the number of low coefficients shifted
/// off both operands.
pub(crate) fn division_step<R: Ring>(
    u: &[R::Elem],
    v: &[R::Elem],
    offset: usize,
    acc: &mut Option<ResultantAcc<R::Elem>>,
    ring: &R,
) -> GrResult<(Vec<R::Elem>, Vec<R::Elem>)> {
    let (mut q, mut r) = divrem(u, v, ring)?;
    vector::normalise(&mut q, ring);
    vector::normalise(&mut r, ring);
    if let Some(acc) = acc.as_mut() {
        acc.record_step(u.len() + offset, v.len() + offset, &v[v.len() - 1], ring)?;
    }
    Ok((q, r))
}

/// Plain Euclidean steps until deg v ≤ deg u - d_red.
fn hgcd_iter<R: Ring>(
    u: &[R::Elem],
    v: &[R::Elem],
    d_red: usize,
    offset: usize,
    acc: &mut Option<ResultantAcc<R::Elem>>,
    ring: &R,
) -> GrResult<Mat2<R::Elem>> {
    let target = u.len();
    let mut m = Mat2::identity(ring);
    let (mut a, mut b) = (u.to_vec(), v.to_vec());
    while !b.is_empty() && b.len() + d_red > target {
        let (q, r) = division_step(&a, &b, offset, acc, ring)?;
        // M·[[q, 1], [1, 0]]
        let m00 = vector::add(&mul(&m.m00, &q, ring)?, &m.m01, ring)?;
        let m10 = vector::add(&mul(&m.m10, &q, ring)?, &m.m11, ring)?;
        let (mut m00, mut m10) = (m00, m10);
        vector::normalise(&mut m00, ring);
        vector::normalise(&mut m10, ring);
        m = Mat2 {
            m01: std::mem::take(&mut m.m00),
            m11: std::mem::take(&mut m.m10),
            m00,
            m10,
            det: -m.det,
        };
        a = b;
        b = r;
    }
    Ok(m)
}

/// Matrix M with [u; v] = M·[u'; v'] where deg v' ≤ deg u - d_red < deg u'.
///
/// Only the top 2·d_red - 1 coefficients of u (and the matching part of v)
/// determine the quotients, so both are shifted right before recursing on
/// the upper half and then on what is left.
fn hgcd_rec<R: Ring>(
    u: &[R::Elem],
    v: &[R::Elem],
    d_red: usize,
    offset: usize,
    acc: &mut Option<ResultantAcc<R::Elem>>,
    ring: &R,
) -> GrResult<Mat2<R::Elem>> {
    if v.is_empty() || v.len() + d_red <= u.len() {
        return Ok(Mat2::identity(ring));
    }
    let n = (u.len() + 1).saturating_sub(2 * d_red);
    let (u1, v1) = (&u[n..], &v[n..]);

    let cutoff = ring.tuning().hgcd.max(1);
    if d_red <= cutoff {
        return hgcd_iter(u1, v1, d_red, offset + n, acc, ring);
    }

    let d1 = ((d_red + 1) / 2).clamp(1, d_red - 1);
    let m1 = hgcd_rec(u1, v1, d1, offset + n, acc, ring)?;
    let (a1, b1) = m1.apply_inverse(u1, v1, ring)?;

    // remaining reduction: deg b1 (unshifted) - (deg u - d_red)
    let d2 = (b1.len() + n + d_red) as i64 - u.len() as i64;
    if b1.is_empty() || d2 <= 0 {
        return Ok(m1);
    }
    trace!("hgcd: second half, d_red {} -> {}", d_red, d2);

    let (q, r) = division_step(&a1, &b1, offset + n, acc, ring)?;
    let m2 = hgcd_rec(&b1, &r, d2 as usize, offset + n, acc, ring)?;
    let m = m1.mul(&Mat2::step(q, ring), ring)?;
    m.mul(&m2, ring)
}

/// Result of a half-GCD: `[a; b] = m·[a_red; b_red]` with
/// 2·deg a_red ≥ deg a > 2·deg b_red.
#[derive(Debug, Clone)]
pub struct HalfGcd<E> {
    pub m: Mat2<E>,
    pub a: Vec<E>,
    pub b: Vec<E>,
}

pub(crate) fn hgcd_with<R: Ring>(
    a: &[R::Elem],
    b: &[R::Elem],
    acc: &mut Option<ResultantAcc<R::Elem>>,
    ring: &R,
) -> GrResult<HalfGcd<R::Elem>> {
    if !ring.is_exact().is_true() {
        return Err(GrError::Unable);
    }
    if a.is_empty() || a.len() <= b.len() {
        return Err(GrError::Domain);
    }
    for p in [a, b] {
        if let Some(lead) = p.last() {
            if !ring.is_zero(lead).is_false() {
                return Err(GrError::Unable);
            }
        }
    }
    let d = a.len() - 1;
    if d == 0 {
        return Ok(HalfGcd { m: Mat2::identity(ring), a: a.to_vec(), b: b.to_vec() });
    }
    // goal: deg b_red ≤ (d - 1)/2
    let goal_len = (d - 1) / 2 + 1;
    let d_red = d - (d - 1) / 2;

    let mut m = hgcd_rec(a, b, d_red, 0, acc, ring)?;
    let (mut x, mut y) = m.apply_inverse(a, b, ring)?;
    while y.len() > goal_len {
        debug!("hgcd: extra Euclidean step at length {}", y.len());
        let (q, r) = division_step(&x, &y, 0, acc, ring)?;
        m = m.mul(&Mat2::step(q, ring), ring)?;
        x = y;
        y = r;
    }
    Ok(HalfGcd { m, a: x, b: y })
}

/// Half-GCD of a and b with deg a > deg b.
pub fn hgcd<R: Ring>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<HalfGcd<R::Elem>> {
    hgcd_with(a, b, &mut None, ring)
}

impl<E: Clone + Debug> GrPoly<E> {
    pub fn hgcd<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<HalfGcd<E>> {
        hgcd(self.coeffs(), other.coeffs(), ring)
    }
}
