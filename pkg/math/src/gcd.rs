use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Computes the greatest common divisor of two integers using Euclid's
/// algorithm.
pub fn gcd(mut a: BigInt, mut b: BigInt) -> BigInt {
    while !b.is_zero() {
        let r = &a % &b;
        a = core::mem::replace(&mut b, r);
    }
    a.abs()
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` such that `g = gcd(a, b) = a*x + b*y`. For
/// non-negative inputs `g` is non-negative.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let mut old_r = a.clone();
    let mut r = b.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();
    let mut old_t = BigInt::zero();
    let mut t = BigInt::one();

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = core::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = core::mem::replace(&mut s, next_s);

        let next_t = &old_t - &quotient * &t;
        old_t = core::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}
