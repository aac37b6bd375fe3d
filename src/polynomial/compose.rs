// src/polynomial/compose.rs

use std::fmt::Debug;
use log::{debug, trace};
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};
use crate::core::vector;
use crate::polynomial::evaluate::evaluate;
use crate::polynomial::inv_series::{div_series, inv_constant, newton_ladder};
use crate::polynomial::mul::{mul, mullow};
use crate::polynomial::poly::{derivative, GrPoly};
use crate::polynomial::taylor_shift::taylor_shift;

/// f(g) by Horner's rule.
pub fn compose_horner<R: Ring>(f: &[R::Elem], g: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    let Some((last, rest)) = f.split_last() else {
        return Ok(Vec::new());
    };
    let mut res = vec![last.clone()];
    for c in rest.iter().rev() {
        res = mul(&res, g, ring)?;
        if res.is_empty() {
            res.push(c.clone());
        } else {
            res[0] = ring.add(&res[0], c)?;
        }
    }
    Ok(res)
}

/// f(g) = f_lo(g) + g^k·f_hi(g) with k a power of two, reusing the powers
/// g^(2^i).
pub fn compose_divconquer<R: Ring>(f: &[R::Elem], g: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    if f.is_empty() {
        return Ok(Vec::new());
    }
    let cutoff = ring.tuning().compose_divconquer.max(2);
    let mut powers = vec![g.to_vec()];
    compose_divconquer_rec(f, &mut powers, cutoff, ring)
}

fn compose_divconquer_rec<R: Ring>(
    f: &[R::Elem],
    powers: &mut Vec<Vec<R::Elem>>,
    cutoff: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    if f.len() <= cutoff {
        return compose_horner(f, &powers[0], ring);
    }
    // largest power of two strictly below len(f)
    let mut level = 0;
    while (2usize << level) < f.len() {
        level += 1;
    }
    let k = 1usize << level;
    while powers.len() <= level {
        let last = &powers[powers.len() - 1];
        let next = mul(last, last, ring)?;
        powers.push(next);
    }

    let lo = compose_divconquer_rec(&f[..k], powers, cutoff, ring)?;
    let hi = compose_divconquer_rec(&f[k..], powers, cutoff, ring)?;
    let t = mul(&hi, &powers[level], ring)?;
    vector::add(&lo, &t, ring)
}

/// f(g) for polynomials.
pub fn compose<R: Ring>(f: &[R::Elem], g: &[R::Elem], ring: &R) -> GrResult<Vec<R::Elem>> {
    if f.is_empty() {
        return Ok(Vec::new());
    }
    if f.len() == 1 || g.len() <= 1 {
        let x = match g.first() {
            Some(c) => c.clone(),
            None => ring.zero(),
        };
        return Ok(vec![evaluate(f, &x, ring)?]);
    }
    // g = x + c
    if g.len() == 2 && ring.is_one(&g[1]).is_true() {
        return taylor_shift(f, &g[0], ring);
    }
    if f.len() < ring.tuning().compose_divconquer {
        compose_horner(f, g, ring)
    } else {
        debug!("compose: divide-and-conquer for lengths {} o {}", f.len(), g.len());
        compose_divconquer(f, g, ring)
    }
}

fn check_zero_constant<R: Ring>(g: &[R::Elem], ring: &R) -> GrResult<()> {
    match g.first().map(|c| ring.is_zero(c)) {
        None | Some(Truth::True) => Ok(()),
        Some(Truth::False) => Err(GrError::Domain),
        Some(Truth::Unknown) => Err(GrError::Unable),
    }
}

/// f(g) mod x^n by Horner's rule; g must have zero constant term.
pub fn compose_series_horner<R: Ring>(
    f: &[R::Elem],
    g: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    check_zero_constant(g, ring)?;
    let mut res = vector::zeros(n, ring);
    if n == 0 || f.is_empty() {
        return Ok(res);
    }
    let f = &f[..f.len().min(n)];
    let g = &g[..g.len().min(n)];
    res[0] = f[f.len() - 1].clone();
    for c in f[..f.len() - 1].iter().rev() {
        res = vector::fit(&mullow(&res, g, n, ring)?, n, ring);
        res[0] = ring.add(&res[0], c)?;
    }
    Ok(res)
}

/// Brent–Kung baby-step giant-step: with m ≈ sqrt(len f), the blocks
/// Σ f_(jm+i) g^i are linear combinations of precomputed g^0..g^(m-1),
/// combined by Horner's rule in g^m.
pub fn compose_series_brent_kung<R: Ring>(
    f: &[R::Elem],
    g: &[R::Elem],
    n: usize,
    ring: &R,
) -> GrResult<Vec<R::Elem>> {
    check_zero_constant(g, ring)?;
    if n == 0 || f.is_empty() {
        return Ok(vector::zeros(n, ring));
    }
    let f = &f[..f.len().min(n)];
    let g = &g[..g.len().min(n)];
    let flen = f.len();
    let m = (flen as f64).sqrt().ceil() as usize;
    let m = m.max(1);

    let mut powers: Vec<Vec<R::Elem>> = Vec::with_capacity(m + 1);
    let mut one = vector::zeros(n, ring);
    one[0] = ring.one();
    powers.push(one);
    for i in 1..=m {
        let next = vector::fit(&mullow(&powers[i - 1], g, n, ring)?, n, ring);
        powers.push(next);
    }
    let giant = powers.pop().unwrap_or_default();

    let blocks = (flen + m - 1) / m;
    let mut res = vector::zeros(n, ring);
    for j in (0..blocks).rev() {
        let mut block = vector::zeros(n, ring);
        let start = j * m;
        let end = (start + m).min(flen);
        for (i, c) in f[start..end].iter().enumerate() {
            vector::scalar_addmul(&mut block, &powers[i], c, ring)?;
        }
        if j + 1 == blocks {
            res = block;
        } else {
            res = vector::fit(&mullow(&res, &giant, n, ring)?, n, ring);
            vector::add_assign(&mut res, &block, ring)?;
        }
    }
    Ok(res)
}

/// f(g) mod x^n. `Domain` when g has a nonzero constant term, `Unable` when
/// that cannot be decided.
pub fn compose_series<R: Ring>(f: &[R::Elem], g: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    check_zero_constant(g, ring)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    if f.len() <= 1 || g.len() <= 1 {
        let mut res = vector::zeros(n, ring);
        if let Some(c) = f.first() {
            res[0] = c.clone();
        }
        return Ok(res);
    }
    // g = x
    if g.len() == 2 && ring.is_one(&g[1]).is_true() {
        return Ok(vector::fit(f, n, ring));
    }
    if f.len().min(n) < ring.tuning().compose_series_brent_kung {
        compose_series_horner(f, g, n, ring)
    } else {
        compose_series_brent_kung(f, g, n, ring)
    }
}

/// Compositional inverse mod x^n by Newton iteration
/// g ← g - (f(g) - x)/f'(g). Needs f_0 = 0 and an invertible f_1.
pub fn revert_series<R: Ring>(f: &[R::Elem], n: usize, ring: &R) -> GrResult<Vec<R::Elem>> {
    check_zero_constant(f, ring)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    let f1_inv = inv_constant(f.get(1), ring)?;
    let mut g = vector::zeros(n, ring);
    if n == 1 {
        return Ok(g);
    }
    g[1] = f1_inv;
    if n == 2 {
        return Ok(g);
    }

    let f = &f[..f.len().min(n)];
    let fp = derivative(f, ring)?;
    let ladder = newton_ladder(n, 2);
    let mut cur = g[..2].to_vec();
    for w in ladder.windows(2) {
        let (m, np) = (w[0], w[1]);
        trace!("revert_series: lifting {} -> {}", m, np);
        let mut fg = compose_series(f, &cur, np, ring)?;
        fg[1] = ring.sub(&fg[1], &ring.one())?;
        let fpg = compose_series(&fp, &cur, np, ring)?;
        let corr = div_series(&fg, &fpg, np, ring)?;
        cur = vector::fit(&cur, np, ring);
        vector::sub_assign(&mut cur, &corr, ring)?;
    }
    Ok(vector::fit(&cur, n, ring))
}

impl<E: Clone + Debug> GrPoly<E> {
    /// self(g)
    pub fn compose<R: Ring<Elem = E>>(&self, g: &Self, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(compose(self.coeffs(), g.coeffs(), ring)?, ring))
    }

    /// self(g) mod x^n
    pub fn compose_series<R: Ring<Elem = E>>(&self, g: &Self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(compose_series(self.coeffs(), g.coeffs(), n, ring)?, ring))
    }

    pub fn revert_series<R: Ring<Elem = E>>(&self, n: usize, ring: &R) -> GrResult<Self> {
        Ok(GrPoly::from_vec(revert_series(self.coeffs(), n, ring)?, ring))
    }
}
