// src/polynomial/evaluate.rs

use std::fmt::Debug;
use log::debug;
use crate::core::ring::Ring;
use crate::core::status::GrResult;
use crate::polynomial::divrem::rem;
use crate::polynomial::mul::mul;
use crate::polynomial::poly::GrPoly;

pub fn evaluate_horner<R: Ring>(f: &[R::Elem], x: &R::Elem, ring: &R) -> GrResult<R::Elem> {
    let Some((last, rest)) = f.split_last() else {
        return Ok(ring.zero());
    };
    let mut y = last.clone();
    for c in rest.iter().rev() {
        y = ring.mul(&y, x)?;
        y = ring.add(&y, c)?;
    }
    Ok(y)
}

/// Rectangular splitting: with m ≈ sqrt(n) and the powers x^0..x^(m-1)
/// precomputed, each block of m coefficients is one dot product and the
/// blocks are combined by Horner's rule in x^m.
pub fn evaluate_rectangular<R: Ring>(f: &[R::Elem], x: &R::Elem, ring: &R) -> GrResult<R::Elem> {
    let n = f.len();
    if n <= 2 {
        return evaluate_horner(f, x, ring);
    }
    let m = ((n as f64).sqrt().ceil() as usize).max(2);
    let mut powers = Vec::with_capacity(m + 1);
    powers.push(ring.one());
    for i in 1..=m {
        let next = ring.mul(&powers[i - 1], x)?;
        powers.push(next);
    }
    let xm = powers[m].clone();

    let blocks = (n + m - 1) / m;
    let mut y = ring.zero();
    for j in (0..blocks).rev() {
        let start = j * m;
        let end = (start + m).min(n);
        let block = ring.dot(None, false, &f[start..end], &powers[..end - start])?;
        y = if j + 1 == blocks {
            block
        } else {
            let t = ring.mul(&y, &xm)?;
            ring.add(&t, &block)?
        };
    }
    Ok(y)
}

/// f(x).
pub fn evaluate<R: Ring>(f: &[R::Elem], x: &R::Elem, ring: &R) -> GrResult<R::Elem> {
    if f.len() >= ring.tuning().evaluate_rectangular {
        evaluate_rectangular(f, x, ring)
    } else {
        evaluate_horner(f, x, ring)
    }
}

/// f at every point, one Horner evaluation each.
pub fn evaluate_vec_iter<R: Ring>(f: &[R::Elem], xs: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    xs.iter().map(|x| evaluate(f, x, ring)).collect()
}

/// Levels of the subproduct tree over the points: level 0 holds the linear
/// factors x - x_i, each further level multiplies adjacent pairs (an odd
/// node out is carried up unchanged). The last level is the single root.
pub fn subproduct_tree<R: Ring>(xs: &[R::Elem], ring: &R) -> GrResult<Vec<Vec<Vec<R::Elem>>>> {
    let mut leaves = Vec::with_capacity(xs.len());
    for x in xs {
        leaves.push(vec![ring.neg(x)?, ring.one()]);
    }
    let mut tree = vec![leaves];
    while tree[tree.len() - 1].len() > 1 {
        let prev = &tree[tree.len() - 1];
        let mut next = Vec::with_capacity((prev.len() + 1) / 2);
        for pair in prev.chunks(2) {
            if pair.len() == 2 {
                next.push(mul(&pair[0], &pair[1], ring)?);
            } else {
                next.push(pair[0].clone());
            }
        }
        tree.push(next);
    }
    Ok(tree)
}

/// Π (x - x_i).
pub fn product_roots<R: Ring>(xs: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    if xs.is_empty() {
        return Ok(vec![ring.one()]);
    }
    let mut tree = subproduct_tree(xs, ring)?;
    let mut top = tree.pop().unwrap_or_default();
    Ok(top.pop().unwrap_or_default())
}

/// Multipoint evaluation down the remainder tree: f is reduced modulo each
/// node's product, and at the leaves the remainder modulo x - x_i is f(x_i).
pub fn evaluate_vec_fast<R: Ring>(f: &[R::Elem], xs: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    if xs.is_empty() {
        return Ok(Vec::new());
    }
    let tree = subproduct_tree(xs, ring)?;
    let top = tree.len() - 1;
    let mut rems = vec![rem(f, &tree[top][0], ring)?];
    for level in (0..top).rev() {
        let mut next = Vec::with_capacity(tree[level].len());
        for (j, node) in tree[level].iter().enumerate() {
            next.push(rem(&rems[j / 2], node, ring)?);
        }
        rems = next;
    }
    Ok(rems
        .into_iter()
        .map(|r| r.into_iter().next().unwrap_or_else(|| ring.zero()))
        .collect())
}

/// f at every point.
pub fn evaluate_vec<R: Ring>(f: &[R::Elem], xs: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    if xs.len() >= ring.tuning().evaluate_vec_fast && f.len() >= ring.tuning().evaluate_vec_fast {
        debug!("evaluate_vec: subproduct tree for {} points", xs.len());
        evaluate_vec_fast(f, xs, ring)
    } else {
        evaluate_vec_iter(f, xs, ring)
    }
}

impl<E: Clone + Debug> GrPoly<E> {
    pub fn evaluate<R: Ring<Elem = E>>(&self, x: &E, ring: &R) -> GrResult<E> {
        evaluate(self.coeffs(), x, ring)
    }

    pub fn evaluate_vec<R: Ring<Elem = E>>(&self, xs: &[E], ring: &R) -> GrResult<Vec<E>> {
        evaluate_vec(self.coeffs(), xs, ring)
    }

    /// The monic polynomial with the given roots.
    pub fn product_roots<R: Ring<Elem = E>>(xs: &[E], ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(product_roots(xs, ring)?, ring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{IntegerRing, NmodRing};
    use crate::core::static_random::StaticRandom;
    use num::BigInt;

    fn ints(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    #[test]
    fn test_evaluate_small() {
        let zz = IntegerRing::new();
        let f = ints(&[1, -2, 0, 3]);
        assert_eq!(evaluate_horner(&f, &BigInt::from(2), &zz).unwrap(), BigInt::from(21));
        assert_eq!(evaluate_rectangular(&f, &BigInt::from(2), &zz).unwrap(), BigInt::from(21));
        assert_eq!(evaluate(&[], &BigInt::from(2), &zz).unwrap(), BigInt::from(0));
    }

    #[test]
    fn test_rectangular_matches_horner() {
        let p = NmodRing::new(998_244_353);
        let mut rng = StaticRandom::from_seed(41);
        let f = crate::core::vector::random(50, rng.rng(), &p);
        for x in [0u64, 1, 7, 998_244_352] {
            assert_eq!(evaluate_rectangular(&f, &x, &p).unwrap(), evaluate_horner(&f, &x, &p).unwrap());
        }
    }

    #[test]
    fn test_product_roots() {
        let zz = IntegerRing::new();
        // (x - 1)(x - 2)(x + 3) = x^3 - 7x + 6
        assert_eq!(product_roots(&ints(&[1, 2, -3]), &zz).unwrap(), ints(&[6, -7, 0, 1]));
        assert_eq!(product_roots(&[], &zz).unwrap(), ints(&[1]));
    }

    #[test]
    fn test_fast_multipoint_matches_iterative() {
        let p = NmodRing::new(65_537);
        let mut rng = StaticRandom::from_seed(3);
        let f = crate::core::vector::random(40, rng.rng(), &p);
        let xs = crate::core::vector::random(21, rng.rng(), &p);
        assert_eq!(evaluate_vec_fast(&f, &xs, &p).unwrap(), evaluate_vec_iter(&f, &xs, &p).unwrap());

        let zz = IntegerRing::new();
        let f = ints(&[5, 0, -1, 2, 3]);
        let xs = ints(&[0, 1, -1, 4, 10]);
        assert_eq!(evaluate_vec_fast(&f, &xs, &zz).unwrap(), evaluate_vec_iter(&f, &xs, &zz).unwrap());
    }
}
