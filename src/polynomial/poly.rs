// src/polynomial/poly.rs

use std::fmt::Debug;
use rand::Rng;
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;

/// Dense univariate polynomial over an abstract ring.
///
/// `coeffs` holds `alloc` fully initialised elements; only the first
/// `length` are significant. Slots at or beyond `length` always hold the
/// canonical zero. After `normalise`, the coefficient at `length - 1` is not
/// provably zero, although over inexact rings it may be undecided.
#[derive(Debug, Clone)]
pub struct GrPoly<E> {
    coeffs: Vec<E>,
    length: usize,
}

impl<E> Default for GrPoly<E> {
    fn default() -> Self {
        GrPoly { coeffs: Vec::new(), length: 0 }
    }
}

impl<E: Clone + Debug> GrPoly<E> {
    /// The zero polynomial with no storage.
    pub fn new() -> Self {
        GrPoly::default()
    }

    pub fn zero() -> Self {
        GrPoly::default()
    }

    /// Zero polynomial with `alloc` pre-initialised slots.
    pub fn with_capacity<R: Ring<Elem = E>>(alloc: usize, ring: &R) -> Self {
        GrPoly { coeffs: vector::zeros(alloc, ring), length: 0 }
    }

    /// Takes ownership of `coeffs` and normalises.
    pub fn from_vec<R: Ring<Elem = E>>(coeffs: Vec<E>, ring: &R) -> Self {
        let mut poly = GrPoly::from_vec_unnormalised(coeffs);
        poly.normalise(ring);
        poly
    }

    /// Takes ownership of `coeffs` as-is; the length is `coeffs.len()`.
    pub fn from_vec_unnormalised(coeffs: Vec<E>) -> Self {
        let length = coeffs.len();
        GrPoly { coeffs, length }
    }

    pub fn from_slice<R: Ring<Elem = E>>(coeffs: &[E], ring: &R) -> Self {
        GrPoly::from_vec(coeffs.to_vec(), ring)
    }

    pub fn from_i64s<R: Ring<Elem = E>>(values: &[i64], ring: &R) -> GrResult<Self> {
        let coeffs = values
            .iter()
            .map(|&v| ring.from_i64(v))
            .collect::<GrResult<Vec<E>>>()?;
        Ok(GrPoly::from_vec(coeffs, ring))
    }

    pub fn one<R: Ring<Elem = E>>(ring: &R) -> Self {
        GrPoly::from_vec(vec![ring.one()], ring)
    }

    /// The generator x.
    pub fn gen<R: Ring<Elem = E>>(ring: &R) -> Self {
        GrPoly::from_vec(vec![ring.zero(), ring.one()], ring)
    }

    pub fn scalar<R: Ring<Elem = E>>(c: E, ring: &R) -> Self {
        GrPoly::from_vec(vec![c], ring)
    }

    /// Number of significant coefficients.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn alloc(&self) -> usize {
        self.coeffs.len()
    }

    /// Degree, -1 for the zero polynomial.
    pub fn degree(&self) -> i64 {
        self.length as i64 - 1
    }

    pub fn coeffs(&self) -> &[E] {
        &self.coeffs[..self.length]
    }

    pub fn coeffs_mut(&mut self) -> &mut [E] {
        &mut self.coeffs[..self.length]
    }

    pub fn into_vec(mut self) -> Vec<E> {
        self.coeffs.truncate(self.length);
        self.coeffs
    }

    pub fn lead(&self) -> Option<&E> {
        if self.length == 0 {
            None
        } else {
            Some(&self.coeffs[self.length - 1])
        }
    }

    /// Ensures `alloc >= len`, growing by at least doubling. New slots hold zero.
    pub fn fit_length<R: Ring<Elem = E>>(&mut self, len: usize, ring: &R) {
        let alloc = self.coeffs.len();
        if len > alloc {
            let new_alloc = len.max(2 * alloc);
            self.coeffs.resize_with(new_alloc, || ring.zero());
        }
    }

    /// Resizes the significant region without normalising. Dropped
    /// coefficients are reset to zero.
    pub fn set_length<R: Ring<Elem = E>>(&mut self, len: usize, ring: &R) {
        if len > self.coeffs.len() {
            panic!(
                "set_length({}) exceeds allocated capacity {}",
                len,
                self.coeffs.len()
            );
        }
        if len < self.length {
            vector::zero_fill(&mut self.coeffs[len..self.length], ring);
        }
        self.length = len;
    }

    /// Trims trailing coefficients that are provably zero. Stops at the first
    /// coefficient whose zero test is false or undecided.
    pub fn normalise<R: Ring<Elem = E>>(&mut self, ring: &R) {
        while self.length > 0 && ring.is_zero(&self.coeffs[self.length - 1]).is_true() {
            self.coeffs[self.length - 1] = ring.zero();
            self.length -= 1;
        }
    }

    /// Deep copy of `other` into `self`.
    pub fn set(&mut self, other: &Self) {
        self.clone_from(other);
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Coefficient of x^i (zero beyond the length).
    pub fn coeff<R: Ring<Elem = E>>(&self, i: usize, ring: &R) -> E {
        if i < self.length {
            self.coeffs[i].clone()
        } else {
            ring.zero()
        }
    }

    pub fn get_coeff(&self, i: usize) -> Option<&E> {
        self.coeffs().get(i)
    }

    pub fn set_coeff<R: Ring<Elem = E>>(&mut self, i: usize, c: E, ring: &R) {
        self.fit_length(i + 1, ring);
        self.coeffs[i] = c;
        if i >= self.length {
            self.length = i + 1;
        }
        self.normalise(ring);
    }

    /// Keeps the first `n` coefficients.
    pub fn truncate<R: Ring<Elem = E>>(&mut self, n: usize, ring: &R) {
        if n < self.length {
            self.set_length(n, ring);
            self.normalise(ring);
        }
    }

    pub fn truncated<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> Self {
        let n = n.min(self.length);
        GrPoly::from_slice(&self.coeffs[..n], ring)
    }

    /// Multiplies by x^n.
    pub fn shift_left<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> Self {
        if self.length == 0 {
            return GrPoly::new();
        }
        let mut v = vector::zeros(n, ring);
        v.extend_from_slice(self.coeffs());
        GrPoly::from_vec_unnormalised(v)
    }

    /// Divides by x^n, discarding the low coefficients.
    pub fn shift_right<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> Self {
        if n >= self.length {
            return GrPoly::new();
        }
        GrPoly::from_slice(&self.coeffs[n..self.length], ring)
    }

    /// x^(n-1) f(1/x) for the first `n` coefficients.
    pub fn reverse<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> Self {
        let mut v = vector::fit(self.coeffs(), n, ring);
        v.reverse();
        GrPoly::from_vec(v, ring)
    }

    pub fn neg<R: Ring<Elem = E>>(&self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec_unnormalised(vector::neg(self.coeffs(), ring)?))
    }

    pub fn add<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(vector::add(self.coeffs(), other.coeffs(), ring)?, ring))
    }

    pub fn sub<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(vector::sub(self.coeffs(), other.coeffs(), ring)?, ring))
    }

    /// (self + other) mod x^n
    pub fn add_series<R: Ring<Elem = E>>(&self, other: &Self, n: usize, ring: &R) -> GrResult<Self> {
        let a = &self.coeffs()[..self.length.min(n)];
        let b = &other.coeffs()[..other.length.min(n)];
        Ok(GrPoly::from_vec(vector::add(a, b, ring)?, ring))
    }

    /// (self - other) mod x^n
    pub fn sub_series<R: Ring<Elem = E>>(&self, other: &Self, n: usize, ring: &R) -> GrResult<Self> {
        let a = &self.coeffs()[..self.length.min(n)];
        let b = &other.coeffs()[..other.length.min(n)];
        Ok(GrPoly::from_vec(vector::sub(a, b, ring)?, ring))
    }

    pub fn mul_scalar<R: Ring<Elem = E>>(&self, c: &E, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(vector::scalar_mul(self.coeffs(), c, ring)?, ring))
    }

    pub fn mul_si<R: Ring<Elem = E>>(&self, c: i64, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(vector::scalar_mul_si(self.coeffs(), c, ring)?, ring))
    }

    pub fn div_scalar<R: Ring<Elem = E>>(&self, c: &E, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(vector::scalar_div(self.coeffs(), c, ring)?, ring))
    }

    pub fn divexact_scalar<R: Ring<Elem = E>>(&self, c: &E, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(vector::scalar_divexact(self.coeffs(), c, ring)?, ring))
    }

    /// Divides by the leading coefficient; the new leading coefficient is set
    /// to exactly one.
    pub fn make_monic<R: Ring<Elem = E>>(&self, ring: &R) -> GrResult<Self> {
        let lead = match self.lead() {
            Some(c) => c.clone(),
            None => return Err(GrError::Domain),
        };
        match ring.is_zero(&lead) {
            Truth::True => return Err(GrError::Domain),
            Truth::Unknown => return Err(GrError::Unable),
            Truth::False => {}
        }
        let mut v = match ring.inv(&lead) {
            Ok(inv) => vector::scalar_mul(self.coeffs(), &inv, ring)?,
            Err(_) => vector::scalar_div(self.coeffs(), &lead, ring)?,
        };
        let last = v.len() - 1;
        v[last] = ring.one();
        Ok(GrPoly::from_vec_unnormalised(v))
    }

    pub fn is_zero<R: Ring<Elem = E>>(&self, ring: &R) -> Truth {
        vector::is_zero(self.coeffs(), ring)
    }

    pub fn is_one<R: Ring<Elem = E>>(&self, ring: &R) -> Truth {
        self.equal(&GrPoly::one(ring), ring)
    }

    pub fn is_gen<R: Ring<Elem = E>>(&self, ring: &R) -> Truth {
        self.equal(&GrPoly::gen(ring), ring)
    }

    /// Whether the polynomial is a constant.
    pub fn is_scalar<R: Ring<Elem = E>>(&self, ring: &R) -> Truth {
        if self.length <= 1 {
            Truth::True
        } else {
            vector::is_zero(&self.coeffs[1..self.length], ring)
        }
    }

    pub fn is_monic<R: Ring<Elem = E>>(&self, ring: &R) -> Truth {
        match self.lead() {
            None => Truth::False,
            Some(c) => ring.is_one(c),
        }
    }

    /// Compares the overlapping prefix, then requires the longer tail to be
    /// zero. Undecided comparisons give `Unknown`.
    pub fn equal<R: Ring<Elem = E>>(&self, other: &Self, ring: &R) -> Truth {
        let a = self.coeffs();
        let b = other.coeffs();
        let m = a.len().min(b.len());
        let prefix = vector::equal(&a[..m], &b[..m], ring);
        if prefix.is_false() {
            return Truth::False;
        }
        let tail = if a.len() > m { &a[m..] } else { &b[m..] };
        prefix.and(vector::is_zero(tail, ring))
    }

    pub fn derivative<R: Ring<Elem = E>>(&self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(derivative(self.coeffs(), ring)?, ring))
    }

    /// Antiderivative with zero constant term.
    pub fn integral<R: Ring<Elem = E>>(&self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(integral(self.coeffs(), ring)?, ring))
    }

    /// Random polynomial with up to `len` coefficients.
    pub fn random<R: Ring<Elem = E>, G: Rng + ?Sized>(len: usize, rng: &mut G, ring: &R) -> Self {
        GrPoly::from_vec(vector::random(len, rng, ring), ring)
    }

    /// Formats as `c0 + c1*x + c2*x^2`, skipping zero terms.
    pub fn write<R: Ring<Elem = E>>(&self, var: &str, ring: &R) -> String {
        let mut terms = Vec::new();
        for (i, c) in self.coeffs().iter().enumerate() {
            if ring.is_zero(c).is_true() {
                continue;
            }
            let c = ring.write(c);
            let c = if c.contains(' ') || (i > 0 && c.starts_with('-')) {
                format!("({})", c)
            } else {
                c
            };
            terms.push(match i {
                0 => c,
                1 => format!("{}*{}", c, var),
                _ => format!("{}*{}^{}", c, var, i),
            });
        }
        if terms.is_empty() {
            "0".to_string()
        } else {
            terms.join(" + ")
        }
    }
}

/// Coefficients of f'.
pub fn derivative<R: Ring>(f: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    if f.len() <= 1 {
        return Ok(Vec::new());
    }
    (1..f.len()).map(|i| ring.mul_si(&f[i], i as i64)).collect()
}

/// Coefficients of the antiderivative with zero constant term.
pub fn integral<R: Ring>(f: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    if f.is_empty() {
        return Ok(Vec::new());
    }
    let mut res = Vec::with_capacity(f.len() + 1);
    res.push(ring.zero());
    res.extend_from_slice(f);
    divide_by_naturals(&mut res[1..], 1, ring)?;
    Ok(res)
}

/// Inverses of 1, 2, ..., n, when every one of them exists.
///
/// Returns `None` over rings where some small integer is not a unit (ZZ,
/// finite characteristic up to n); callers then divide element by element.
pub fn naturals_inverse_table<R: Ring>(n: usize, ring: &R) -> Option<Vec<R::Elem>> {
    if !ring.is_field().is_true() {
        return None;
    }
    let mut table = Vec::with_capacity(n);
    for k in 1..=n as u64 {
        let k = ring.from_u64(k).ok()?;
        table.push(ring.inv(&k).ok()?);
    }
    Some(table)
}

/// v[j] /= first + j
pub fn divide_by_naturals<R: Ring>(v: &mut [R::Elem], first: u64, ring: &R) -> GrResult<()> {
    if v.is_empty() {
        return Ok(());
    }
    let top = first as usize + v.len() - 1;
    match naturals_inverse_table(top, ring) {
        Some(table) => {
            for (j, x) in v.iter_mut().enumerate() {
                *x = ring.mul(x, &table[first as usize + j - 1])?;
            }
        }
        None => {
            for (j, x) in v.iter_mut().enumerate() {
                *x = ring.div_ui(x, first + j as u64)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{IntegerRing, NmodRing, RationalRing};
    use num::BigInt;

    fn zz_poly(values: &[i64]) -> GrPoly<BigInt> {
        GrPoly::from_i64s(values, &IntegerRing::new()).unwrap()
    }

    #[test]
    fn test_fit_length_doubles_and_zeroes() {
        let zz = IntegerRing::new();
        let mut p: GrPoly<BigInt> = GrPoly::with_capacity(3, &zz);
        assert_eq!(p.alloc(), 3);
        p.fit_length(4, &zz);
        assert_eq!(p.alloc(), 6);
        p.set_length(6, &zz);
        assert!(p.coeffs().iter().all(|c| c == &BigInt::from(0)));
    }

    #[test]
    fn test_set_length_zeroes_dropped() {
        let zz = IntegerRing::new();
        let mut p = zz_poly(&[1, 2, 3]);
        p.set_length(1, &zz);
        p.set_length(3, &zz);
        assert_eq!(p.coeffs(), &[BigInt::from(1), BigInt::from(0), BigInt::from(0)]);
    }

    #[test]
    fn test_normalise_trims_trailing_zeros() {
        let zz = IntegerRing::new();
        let mut p = GrPoly::from_vec_unnormalised(vec![BigInt::from(1), BigInt::from(0), BigInt::from(0)]);
        p.normalise(&zz);
        assert_eq!(p.len(), 1);
        assert_eq!(p.degree(), 0);
    }

    #[test]
    fn test_set_coeff_extends_and_normalises() {
        let zz = IntegerRing::new();
        let mut p = GrPoly::new();
        p.set_coeff(3, BigInt::from(5), &zz);
        assert_eq!(p.len(), 4);
        p.set_coeff(3, BigInt::from(0), &zz);
        assert!(p.is_empty());
    }

    #[test]
    fn test_equal_with_tail() {
        let zz = IntegerRing::new();
        let a = zz_poly(&[1, 2]);
        let b = GrPoly::from_vec_unnormalised(vec![BigInt::from(1), BigInt::from(2), BigInt::from(0)]);
        assert_eq!(a.equal(&b, &zz), Truth::True);
        assert_eq!(a.equal(&zz_poly(&[1, 2, 1]), &zz), Truth::False);
    }

    #[test]
    fn test_shift_and_reverse() {
        let zz = IntegerRing::new();
        let p = zz_poly(&[1, 2, 3]);
        assert_eq!(p.shift_left(2, &zz).coeffs(), zz_poly(&[0, 0, 1, 2, 3]).coeffs());
        assert_eq!(p.shift_right(1, &zz).coeffs(), zz_poly(&[2, 3]).coeffs());
        assert_eq!(p.reverse(4, &zz).coeffs(), zz_poly(&[0, 3, 2, 1]).coeffs());
        assert_eq!(p.reverse(2, &zz).coeffs(), zz_poly(&[2, 1]).coeffs());
    }

    #[test]
    fn test_derivative_and_integral() {
        let qq = RationalRing::new();
        let p = GrPoly::from_i64s(&[1, 2, 3], &qq).unwrap();
        let d = p.derivative(&qq).unwrap();
        assert_eq!(d.equal(&GrPoly::from_i64s(&[2, 6], &qq).unwrap(), &qq), Truth::True);
        let i = d.integral(&qq).unwrap();
        assert_eq!(i.equal(&GrPoly::from_i64s(&[0, 2, 3], &qq).unwrap(), &qq), Truth::True);
    }

    #[test]
    fn test_integral_over_integers_needs_exact_division() {
        let zz = IntegerRing::new();
        let ok = zz_poly(&[2, 4]).integral(&zz).unwrap();
        assert_eq!(ok.coeffs(), zz_poly(&[0, 2, 2]).coeffs());
        assert_eq!(zz_poly(&[1, 1]).integral(&zz).unwrap_err(), GrError::Domain);
    }

    #[test]
    fn test_integral_in_small_characteristic() {
        let f3 = NmodRing::new(3);
        let p = GrPoly::from_i64s(&[1, 1, 1], &f3).unwrap();
        assert_eq!(p.integral(&f3).unwrap_err(), GrError::Domain);
    }

    #[test]
    fn test_make_monic() {
        let qq = RationalRing::new();
        let p = GrPoly::from_i64s(&[2, 4], &qq).unwrap();
        let m = p.make_monic(&qq).unwrap();
        assert_eq!(m.coeffs(), &[qq.fraction(1, 2), qq.fraction(1, 1)]);
        assert_eq!(GrPoly::<BigInt>::new().make_monic(&IntegerRing::new()).unwrap_err(), GrError::Domain);
    }

    #[test]
    fn test_write() {
        let zz = IntegerRing::new();
        assert_eq!(zz_poly(&[1, 0, -3]).write("x", &zz), "1 + (-3)*x^2");
        assert_eq!(GrPoly::<BigInt>::new().write("x", &zz), "0");
    }
}
