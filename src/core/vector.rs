// src/core/vector.rs
//
// Contiguous runs of ring elements. Everything the polynomial engine does to
// more than one coefficient at a time goes through here.

use crate::core::ring::Ring;
use crate::core::status::{GrResult, Truth};

pub fn zeros<R: Ring + ?Sized>(len: usize, ring: &R) -> Vec<R::Elem> {
    (0..len).map(|_| ring.zero()).collect()
}

/// Resets every entry to the canonical zero.
pub fn zero_fill<R: Ring + ?Sized>(v: &mut [R::Elem], ring: &R) {
    for x in v.iter_mut() {
        *x = ring.zero();
    }
}

pub fn neg<R: Ring + ?Sized>(a: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    a.iter().map(|x| ring.neg(x)).collect()
}

pub fn neg_in_place<R: Ring + ?Sized>(a: &mut [R::Elem], ring: &R) -> GrResult<()> {
    for x in a.iter_mut() {
        *x = ring.neg(x)?;
    }
    Ok(())
}

/// Elementwise a + b; the shorter operand is padded with zeros.
pub fn add<R: Ring + ?Sized>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut res = Vec::with_capacity(long.len());
    for i in 0..short.len() {
        res.push(ring.add(&a[i], &b[i])?);
    }
    res.extend_from_slice(&long[short.len()..]);
    Ok(res)
}

/// Elementwise a - b; the shorter operand is padded with zeros.
pub fn sub<R: Ring + ?Sized>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let n = a.len().max(b.len());
    let m = a.len().min(b.len());
    let mut res = Vec::with_capacity(n);
    for i in 0..m {
        res.push(ring.sub(&a[i], &b[i])?);
    }
    if a.len() > m {
        res.extend_from_slice(&a[m..]);
    } else {
        for x in &b[m..] {
            res.push(ring.neg(x)?);
        }
    }
    Ok(res)
}

/// dst[i] += src[i]; requires dst.len() >= src.len()
pub fn add_assign<R: Ring + ?Sized>(dst: &mut [R::Elem], src: &[R::Elem], ring: &R) -> GrResult<()> {
    debug_assert!(dst.len() >= src.len());
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = ring.add(d, s)?;
    }
    Ok(())
}

/// dst[i] -= src[i]; requires dst.len() >= src.len()
pub fn sub_assign<R: Ring + ?Sized>(dst: &mut [R::Elem], src: &[R::Elem], ring: &R) -> GrResult<()> {
    debug_assert!(dst.len() >= src.len());
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = ring.sub(d, s)?;
    }
    Ok(())
}

pub fn scalar_mul<R: Ring + ?Sized>(a: &[R::Elem], c: &R::Elem, ring: &R) -> GrResult<Vec<R::Elem>> {
    a.iter().map(|x| ring.mul(x, c)).collect()
}

pub fn scalar_mul_si<R: Ring + ?Sized>(a: &[R::Elem], c: i64, ring: &R) -> GrResult<Vec<R::Elem>> {
    a.iter().map(|x| ring.mul_si(x, c)).collect()
}

pub fn scalar_mul_in_place<R: Ring + ?Sized>(a: &mut [R::Elem], c: &R::Elem, ring: &R) -> GrResult<()> {
    for x in a.iter_mut() {
        *x = ring.mul(x, c)?;
    }
    Ok(())
}

/// dst[i] += c * src[i]
pub fn scalar_addmul<R: Ring + ?Sized>(
    dst: &mut [R::Elem],
    src: &[R::Elem],
    c: &R::Elem,
    ring: &R,
) -> GrResult<()> {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        ring.addmul(d, s, c)?;
    }
    Ok(())
}

/// dst[i] -= c * src[i]
pub fn scalar_submul<R: Ring + ?Sized>(
    dst: &mut [R::Elem],
    src: &[R::Elem],
    c: &R::Elem,
    ring: &R,
) -> GrResult<()> {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        ring.submul(d, s, c)?;
    }
    Ok(())
}

pub fn scalar_div<R: Ring + ?Sized>(a: &[R::Elem], c: &R::Elem, ring: &R) -> GrResult<Vec<R::Elem>> {
    a.iter().map(|x| ring.div(x, c)).collect()
}

pub fn scalar_divexact<R: Ring + ?Sized>(a: &[R::Elem], c: &R::Elem, ring: &R) -> GrResult<Vec<R::Elem>> {
    a.iter().map(|x| ring.divexact(x, c)).collect()
}

pub fn scalar_divexact_ui<R: Ring + ?Sized>(a: &[R::Elem], c: u64, ring: &R) -> GrResult<Vec<R::Elem>> {
    a.iter().map(|x| ring.divexact_ui(x, c)).collect()
}

/// Elementwise equality with the usual three-valued short-circuit: a definite
/// `False` anywhere decides, otherwise any `Unknown` poisons the answer.
pub fn equal<R: Ring + ?Sized>(a: &[R::Elem], b: &[R::Elem], ring: &R) -> Truth {
    if a.len() != b.len() {
        return Truth::False;
    }
    let mut result = Truth::True;
    for (x, y) in a.iter().zip(b.iter()) {
        match ring.equal(x, y) {
            Truth::False => return Truth::False,
            Truth::Unknown => result = Truth::Unknown,
            Truth::True => {}
        }
    }
    result
}

pub fn is_zero<R: Ring + ?Sized>(a: &[R::Elem], ring: &R) -> Truth {
    let mut result = Truth::True;
    for x in a {
        match ring.is_zero(x) {
            Truth::False => return Truth::False,
            Truth::Unknown => result = Truth::Unknown,
            Truth::True => {}
        }
    }
    result
}

pub fn reverse<E: Clone>(a: &[E]) -> Vec<E> {
    a.iter().rev().cloned().collect()
}

/// Length after dropping trailing entries that are provably zero.
pub fn normalised_len<R: Ring + ?Sized>(a: &[R::Elem], ring: &R) -> usize {
    let mut len = a.len();
    while len > 0 && ring.is_zero(&a[len - 1]).is_true() {
        len -= 1;
    }
    len
}

/// Drops trailing provable zeros in place.
pub fn normalise<R: Ring + ?Sized>(v: &mut Vec<R::Elem>, ring: &R) {
    let len = normalised_len(v, ring);
    v.truncate(len);
}

/// Copies `a` into a vector of exactly `len` entries (zero padded or cut).
pub fn fit<R: Ring + ?Sized>(a: &[R::Elem], len: usize, ring: &R) -> Vec<R::Elem> {
    let mut res: Vec<R::Elem> = a.iter().take(len).cloned().collect();
    while res.len() < len {
        res.push(ring.zero());
    }
    res
}

pub fn dot_generic<R: Ring + ?Sized>(
    ring: &R,
    initial: Option<&R::Elem>,
    subtract: bool,
    a: &[R::Elem],
    b: &[R::Elem],
) -> GrResult<R::Elem> {
    let n = a.len().min(b.len());
    let mut acc = match initial {
        Some(x) => x.clone(),
        None => ring.zero(),
    };
    if n == 0 {
        return Ok(acc);
    }
    if initial.is_none() && !subtract {
        acc = ring.mul(&a[0], &b[0])?;
        for i in 1..n {
            ring.addmul(&mut acc, &a[i], &b[i])?;
        }
        return Ok(acc);
    }
    for i in 0..n {
        if subtract {
            ring.submul(&mut acc, &a[i], &b[i])?;
        } else {
            ring.addmul(&mut acc, &a[i], &b[i])?;
        }
    }
    Ok(acc)
}

pub fn dot_rev_generic<R: Ring + ?Sized>(
    ring: &R,
    initial: Option<&R::Elem>,
    subtract: bool,
    a: &[R::Elem],
    b: &[R::Elem],
) -> GrResult<R::Elem> {
    let n = a.len().min(b.len());
    let mut acc = match initial {
        Some(x) => x.clone(),
        None => ring.zero(),
    };
    for i in 0..n {
        if subtract {
            ring.submul(&mut acc, &a[i], &b[n - 1 - i])?;
        } else {
            ring.addmul(&mut acc, &a[i], &b[n - 1 - i])?;
        }
    }
    Ok(acc)
}

/// Random vector for randomized testing.
pub fn random<R: Ring, G: rand::Rng + ?Sized>(len: usize, rng: &mut G, ring: &R) -> Vec<R::Elem> {
    (0..len).map(|_| ring.random_elem(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::IntegerRing;
    use num::BigInt;

    fn ints(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    #[test]
    fn test_add_sub_pad() {
        let zz = IntegerRing::new();
        let a = ints(&[1, 2, 3]);
        let b = ints(&[5]);
        assert_eq!(add(&a, &b, &zz).unwrap(), ints(&[6, 2, 3]));
        assert_eq!(sub(&b, &a, &zz).unwrap(), ints(&[4, -2, -3]));
    }

    #[test]
    fn test_dot_and_dot_rev() {
        let zz = IntegerRing::new();
        let a = ints(&[1, 2, 3]);
        let b = ints(&[4, 5, 6]);
        assert_eq!(zz.dot(None, false, &a, &b).unwrap(), BigInt::from(32));
        assert_eq!(zz.dot_rev(None, false, &a, &b).unwrap(), BigInt::from(28));
        let init = BigInt::from(100);
        assert_eq!(zz.dot(Some(&init), true, &a, &b).unwrap(), BigInt::from(68));
    }

    #[test]
    fn test_normalised_len() {
        let zz = IntegerRing::new();
        assert_eq!(normalised_len(&ints(&[1, 0, 2, 0, 0]), &zz), 3);
        assert_eq!(normalised_len(&ints(&[0, 0]), &zz), 0);
    }

    #[test]
    fn test_equal_lengths_and_values() {
        let zz = IntegerRing::new();
        assert!(equal(&ints(&[1, 2]), &ints(&[1, 2]), &zz).is_true());
        assert!(equal(&ints(&[1, 2]), &ints(&[1, 3]), &zz).is_false());
        assert!(equal(&ints(&[1, 2]), &ints(&[1]), &zz).is_false());
    }
}
