// src/backends/nmod_ring.rs

use num::{BigInt, ToPrimitive, Integer, Zero};
use rand::Rng;
use crate::config::Tuning;
use crate::core::ring::Ring;
use crate::core::status::{GrError, GrResult, Truth};

/// Integers modulo a word-size n, elements stored reduced as u64.
///
/// A field exactly when n is prime. Products go through u128, so any
/// modulus up to u64::MAX is supported.
#[derive(Debug, Clone)]
pub struct NmodRing {
    modulus: u64,
    is_prime: bool,
    tuning: Tuning,
}

impl NmodRing {
    pub fn new(modulus: u64) -> Self {
        if modulus == 0 {
            panic!("Parameter 'modulus' must be at least 1");
        }
        NmodRing {
            modulus,
            is_prime: is_prime_u64(modulus),
            tuning: Tuning::default(),
        }
    }

    pub fn with_tuning(modulus: u64, tuning: Tuning) -> Self {
        let mut ring = NmodRing::new(modulus);
        ring.tuning = tuning;
        ring
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    fn reduce_i64(&self, value: i64) -> u64 {
        let m = self.modulus as i128;
        (((value as i128) % m + m) % m) as u64
    }

    fn mul_mod(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.modulus as u128) as u64
    }

    fn pow_mod(&self, base: u64, exp: u64) -> u64 {
        pow_mod(base, exp, self.modulus)
    }

    fn inverse(&self, a: u64) -> Option<u64> {
        let (g, x, _) = extended_gcd(a as i128, self.modulus as i128);
        if g != 1 {
            return None;
        }
        let m = self.modulus as i128;
        Some((((x % m) + m) % m) as u64)
    }

    /// Tonelli–Shanks square root for prime moduli.
    fn sqrt_prime(&self, n: u64) -> GrResult<u64> {
        let p = self.modulus;
        if n == 0 || p == 2 {
            return Ok(n);
        }
        if self.pow_mod(n, (p - 1) / 2) != 1 {
            return Err(GrError::Domain);
        }
        if p % 4 == 3 {
            return Ok(self.pow_mod(n, (p + 1) / 4));
        }

        let mut q = p - 1;
        let mut s = 0u32;
        while q % 2 == 0 {
            q /= 2;
            s += 1;
        }

        // First quadratic non-residue
        let mut z = 2u64;
        while self.pow_mod(z, (p - 1) / 2) != p - 1 {
            z += 1;
        }

        let mut m = s;
        let mut c = self.pow_mod(z, q);
        let mut t = self.pow_mod(n, q);
        let mut r = self.pow_mod(n, (q + 1) / 2);

        while t != 1 {
            let mut i = 0u32;
            let mut t2 = t;
            while t2 != 1 {
                t2 = self.mul_mod(t2, t2);
                i += 1;
                if i == m {
                    return Err(GrError::Domain);
                }
            }
            let b = self.pow_mod(c, 1u64 << (m - i - 1));
            m = i;
            c = self.mul_mod(b, b);
            t = self.mul_mod(t, c);
            r = self.mul_mod(r, b);
        }
        Ok(r)
    }
}

pub fn pow_mod(base: u64, exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = modulus as u128;
    let mut result = 1u128;
    let mut b = base as u128 % m;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = result * b % m;
        }
        e >>= 1;
        b = b * b % m;
    }
    result as u64
}

fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x, y) = extended_gcd(b, a % b);
        (g, y, x - (a / b) * y)
    }
}

/// Deterministic Miller–Rabin for 64-bit integers.
pub fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for p in [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        if n % p == 0 {
            return n == p;
        }
    }
    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }
    'witness: for a in [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = ((x as u128 * x as u128) % n as u128) as u64;
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

impl Ring for NmodRing {
    type Elem = u64;

    fn name(&self) -> String {
        format!("Integers mod {}", self.modulus)
    }

    fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn is_field(&self) -> Truth {
        Truth::from_bool(self.is_prime)
    }

    fn is_integral_domain(&self) -> Truth {
        Truth::from_bool(self.is_prime)
    }

    fn characteristic(&self) -> BigInt {
        BigInt::from(self.modulus)
    }

    fn zero(&self) -> u64 {
        0
    }

    fn one(&self) -> u64 {
        if self.modulus == 1 {
            0
        } else {
            1
        }
    }

    fn from_i64(&self, value: i64) -> GrResult<u64> {
        Ok(self.reduce_i64(value))
    }

    fn from_bigint(&self, value: &BigInt) -> GrResult<u64> {
        let r = value.mod_floor(&BigInt::from(self.modulus));
        r.to_u64().ok_or(GrError::Unable)
    }

    fn from_u64(&self, value: u64) -> GrResult<u64> {
        Ok(value % self.modulus)
    }

    fn is_zero(&self, x: &u64) -> Truth {
        Truth::from_bool(*x == 0)
    }

    fn is_one(&self, x: &u64) -> Truth {
        Truth::from_bool(*x == self.one())
    }

    fn is_neg_one(&self, x: &u64) -> Truth {
        Truth::from_bool(*x == self.modulus - 1)
    }

    fn equal(&self, x: &u64, y: &u64) -> Truth {
        Truth::from_bool(x == y)
    }

    fn neg(&self, x: &u64) -> GrResult<u64> {
        Ok(if *x == 0 { 0 } else { self.modulus - x })
    }

    fn add(&self, x: &u64, y: &u64) -> GrResult<u64> {
        Ok(((*x as u128 + *y as u128) % self.modulus as u128) as u64)
    }

    fn sub(&self, x: &u64, y: &u64) -> GrResult<u64> {
        Ok(if x >= y { x - y } else { self.modulus - (y - x) })
    }

    fn mul(&self, x: &u64, y: &u64) -> GrResult<u64> {
        Ok(self.mul_mod(*x, *y))
    }

    fn div(&self, x: &u64, y: &u64) -> GrResult<u64> {
        match self.inverse(*y) {
            Some(inv) => Ok(self.mul_mod(*x, inv)),
            None => Err(GrError::Domain),
        }
    }

    fn div_ui(&self, x: &u64, c: u64) -> GrResult<u64> {
        self.div(x, &(c % self.modulus))
    }

    fn inv(&self, x: &u64) -> GrResult<u64> {
        self.inverse(*x).ok_or(GrError::Domain)
    }

    fn is_invertible(&self, x: &u64) -> Truth {
        Truth::from_bool(self.inverse(*x).is_some())
    }

    fn pow_ui(&self, x: &u64, exp: u64) -> GrResult<u64> {
        Ok(self.pow_mod(*x, exp))
    }

    fn sqrt(&self, x: &u64) -> GrResult<u64> {
        if *x == 0 || *x == self.one() {
            return Ok(*x);
        }
        if !self.is_prime {
            return Err(GrError::Unable);
        }
        self.sqrt_prime(*x)
    }

    fn gcd(&self, x: &u64, y: &u64) -> GrResult<u64> {
        if self.is_prime {
            return Ok(if *x == 0 && *y == 0 { 0 } else { 1 });
        }
        Err(GrError::Unable)
    }

    fn canonical_unit(&self, x: &u64) -> GrResult<u64> {
        if *x == 0 {
            return Ok(self.one());
        }
        self.inverse(*x).map(|_| *x).ok_or(GrError::Unable)
    }

    /// Fused dot product: accumulates in u128 and reduces once per term.
    fn dot(&self, initial: Option<&u64>, subtract: bool, a: &[u64], b: &[u64]) -> GrResult<u64> {
        let m = self.modulus as u128;
        let mut acc: u128 = 0;
        for (x, y) in a.iter().zip(b.iter()) {
            acc = (acc + *x as u128 * *y as u128) % m;
        }
        let mut s = acc as u64;
        if subtract {
            s = self.neg(&s)?;
        }
        match initial {
            Some(init) => self.add(init, &s),
            None => Ok(s),
        }
    }

    fn dot_rev(&self, initial: Option<&u64>, subtract: bool, a: &[u64], b: &[u64]) -> GrResult<u64> {
        let m = self.modulus as u128;
        let n = a.len().min(b.len());
        let mut acc: u128 = 0;
        for i in 0..n {
            acc = (acc + a[i] as u128 * b[n - 1 - i] as u128) % m;
        }
        let mut s = acc as u64;
        if subtract {
            s = self.neg(&s)?;
        }
        match initial {
            Some(init) => self.add(init, &s),
            None => Ok(s),
        }
    }

    fn write(&self, x: &u64) -> String {
        x.to_string()
    }

    fn random_elem<G: Rng + ?Sized>(&self, rng: &mut G) -> u64 {
        if rng.random_range(0..8) == 0 {
            0
        } else {
            rng.random_range(0..self.modulus)
        }
    }
}

impl NmodRing {
    /// Reduces a big integer into the ring, for callers mapping ZZ data over.
    pub fn reduce(&self, value: &BigInt) -> u64 {
        let m = BigInt::from(self.modulus);
        let r = value.mod_floor(&m);
        if r.is_zero() {
            0
        } else {
            r.to_u64().unwrap_or(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primality() {
        assert!(is_prime_u64(2));
        assert!(is_prime_u64(17));
        assert!(is_prime_u64(1_000_000_007));
        assert!(!is_prime_u64(1));
        assert!(!is_prime_u64(561));
        assert!(!is_prime_u64(1_000_000_007u64 * 3));
    }

    #[test]
    fn test_inverse_and_domain() {
        let r = NmodRing::new(17);
        assert_eq!(r.inv(&3), Ok(6));
        let r6 = NmodRing::new(6);
        assert_eq!(r6.inv(&3), Err(GrError::Domain));
        assert_eq!(r6.is_field(), Truth::False);
        assert_eq!(r6.inv(&5), Ok(5));
    }

    #[test]
    fn test_tonelli_shanks() {
        let r = NmodRing::new(17);
        let s = r.sqrt(&2).unwrap();
        assert_eq!(r.mul(&s, &s), Ok(2));
        assert_eq!(r.sqrt(&3), Err(GrError::Domain));

        let r = NmodRing::new(1_000_000_007);
        let s = r.sqrt(&5).unwrap();
        assert_eq!(r.mul(&s, &s), Ok(5));
    }

    #[test]
    fn test_fused_dot_matches_generic() {
        let r = NmodRing::new(1_000_000_007);
        let a = vec![999_999_999u64, 123_456_789, 5];
        let b = vec![888_888_888u64, 987_654_321, 7];
        let fused = r.dot(Some(&11), true, &a, &b).unwrap();
        let generic = crate::core::vector::dot_generic(&r, Some(&11), true, &a, &b).unwrap();
        assert_eq!(fused, generic);
        let fused = r.dot_rev(None, false, &a, &b).unwrap();
        let generic = crate::core::vector::dot_rev_generic(&r, None, false, &a, &b).unwrap();
        assert_eq!(fused, generic);
    }

    #[test]
    fn test_reduce_negative() {
        let r = NmodRing::new(7);
        assert_eq!(r.from_i64(-1), Ok(6));
        assert_eq!(r.reduce(&BigInt::from(-8)), 6);
    }
}
