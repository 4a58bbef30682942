use core::fmt;
use core::ops::Deref;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;
use thiserror::Error;
use tracing::debug;

use crate::random::{random_between, random_with_bit_length};

/// False-positive probability used by the primality checks when none is
/// given explicitly.
pub const DEFAULT_ERROR_BOUND: f64 = 1e-10;

/// Trial-division candidates. 2 is absent: even numbers are rejected before
/// the sieve runs.
const SMALL_PRIMES: [u32; 29] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113,
];

/// A composite number was passed where a prime is required.
#[derive(Clone, Debug, Error)]
#[error("{0} failed the primality test")]
pub struct CompositeError(pub BigInt);

/// An integer that has passed the probabilistic primality test, or that the
/// caller vouches for.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigPrime(BigInt);

impl BigPrime {
    /// Certifies `value` with the default error bound.
    pub fn new<R: RngCore + ?Sized>(value: BigInt, rng: &mut R) -> Result<Self, CompositeError> {
        if is_probably_prime(&value, rng) {
            Ok(Self(value))
        } else {
            Err(CompositeError(value))
        }
    }

    /// Wraps a value without testing it. Intended for published, fixed
    /// parameters whose primality is already established.
    pub fn new_unchecked(value: BigInt) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> BigInt {
        self.0
    }
}

impl Deref for BigPrime {
    type Target = BigInt;

    fn deref(&self) -> &BigInt {
        &self.0
    }
}

impl AsRef<BigInt> for BigPrime {
    fn as_ref(&self) -> &BigInt {
        &self.0
    }
}

impl From<BigPrime> for BigInt {
    fn from(prime: BigPrime) -> BigInt {
        prime.0
    }
}

impl fmt::Display for BigPrime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Returns true iff `a` witnesses the compositeness of `n = q * 2^k + 1`
/// (`q` odd): neither `a^q = 1 mod n` nor `a^(q * 2^i) = n - 1` for any
/// `i` in `[0, k)`.
pub fn is_composite_witness(a: &BigInt, q: &BigInt, k: u64, n: &BigInt) -> bool {
    let minus_one = n - 1;
    let mut x = a.modpow(q, n);
    if x.is_one() {
        return false;
    }

    for _ in 0..k {
        if x == minus_one {
            return false;
        }
        x = (&x * &x) % n;
    }

    true
}

/// Miller-Rabin with the default error bound.
pub fn is_probably_prime<R: RngCore + ?Sized>(n: &BigInt, rng: &mut R) -> bool {
    is_probably_prime_with(n, rng, DEFAULT_ERROR_BOUND)
}

/// Miller-Rabin primality test preceded by a small-prime sieve.
///
/// A composite is accepted with probability below `error_bound`. Even
/// inputs are rejected outright, so this classifies odd candidates; it
/// reports 2 as composite.
pub fn is_probably_prime_with<R: RngCore + ?Sized>(
    n: &BigInt,
    rng: &mut R,
    error_bound: f64,
) -> bool {
    if n < &BigInt::from(2) || n.is_even() {
        return false;
    }

    for p in SMALL_PRIMES {
        let p = BigInt::from(p);
        if *n == p {
            return true;
        }
        if n.mod_floor(&p).is_zero() {
            return false;
        }
    }

    // n - 1 = q * 2^k with q odd.
    let mut q: BigInt = n - 1;
    let mut k = 0u64;
    while q.is_even() {
        q /= 2;
        k += 1;
    }

    let lower = BigInt::from(2);
    let upper = n - 2;
    for _ in 0..miller_rabin_rounds(error_bound) {
        let a = random_between(rng, &lower, &upper);
        if is_composite_witness(&a, &q, k, n) {
            return false;
        }
    }

    true
}

/// Number of rounds needed to drive the false-positive probability of a
/// single trial (at most 1/4) below `error_bound`.
fn miller_rabin_rounds(error_bound: f64) -> usize {
    1 + (-error_bound.ln() / 4f64.ln()).ceil() as usize
}

/// Samples a probable prime of exactly `bit_length` bits.
///
/// The starting candidate is drawn odd with the top bit set and moved into
/// residue class 1 or 5 modulo 6 (any other class is divisible by 2 or 3).
/// The walk then alternates steps of 4 and 2, which cycles between those
/// two classes, until the test accepts.
pub fn random_prime<R: RngCore + ?Sized>(rng: &mut R, bit_length: usize) -> BigInt {
    let mut candidate = random_with_bit_length(rng, bit_length);
    align_candidate(&mut candidate);

    let mut attempts = 0u64;
    loop {
        if is_probably_prime(&candidate, rng) {
            debug!(attempts, bits = bit_length, "prime search finished");
            return candidate;
        }
        attempts += 1;
        advance_candidate(&mut candidate);
    }
}

/// Searches for a safe prime `p = 2q + 1` with `p` of exactly `bit_length`
/// bits. Returns `(p, q)`.
pub fn random_safe_prime<R: RngCore + ?Sized>(
    rng: &mut R,
    bit_length: usize,
) -> (BigInt, BigInt) {
    let mut q = random_with_bit_length(rng, bit_length - 1);
    align_candidate(&mut q);

    let mut attempts = 0u64;
    loop {
        if is_probably_prime(&q, rng) {
            let p = &q * 2 + 1;
            if is_probably_prime(&p, rng) {
                debug!(attempts, bits = bit_length, "safe prime search finished");
                return (p, q);
            }
        }
        attempts += 1;
        advance_candidate(&mut q);
    }
}

fn align_candidate(candidate: &mut BigInt) {
    if candidate.is_even() {
        *candidate += 1;
    }
    if candidate.mod_floor(&BigInt::from(6)) == BigInt::from(3) {
        *candidate += 2;
    }
}

fn advance_candidate(candidate: &mut BigInt) {
    // 1 mod 6 -> +4 -> 5 mod 6 -> +2 -> 1 mod 6 -> ...
    if candidate.mod_floor(&BigInt::from(6)).is_one() {
        *candidate += 4;
    } else {
        *candidate += 2;
    }
}
