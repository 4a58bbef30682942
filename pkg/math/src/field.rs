use num_bigint::BigInt;
use num_integer::Integer;

use crate::gcd::extended_gcd;
use crate::length::NumberLength;
use crate::prime::BigPrime;

/// Arithmetic in the prime field of integers modulo `p`.
///
/// Every operation reduces its result into `[0, p)`. Inputs may be any
/// integers; they are reduced as needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    modulus: BigPrime,
    element_byte_length: usize,
}

impl Field {
    pub fn new(modulus: BigPrime) -> Self {
        let element_byte_length = NumberLength::of(&modulus).bytes();
        Self {
            modulus,
            element_byte_length,
        }
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Number of bytes in the fixed-width encoding of a field element.
    pub fn element_byte_length(&self) -> usize {
        self.element_byte_length
    }

    pub fn element_length(&self) -> NumberLength {
        NumberLength::of(&self.modulus)
    }

    pub fn reduce(&self, x: &BigInt) -> BigInt {
        x.mod_floor(&self.modulus)
    }

    pub fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        (a + b).mod_floor(&self.modulus)
    }

    pub fn sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        (a - b).mod_floor(&self.modulus)
    }

    pub fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        (a * b).mod_floor(&self.modulus)
    }

    pub fn square(&self, a: &BigInt) -> BigInt {
        self.mul(a, a)
    }

    /// Computes `x^k mod p` for a non-negative exponent.
    pub fn pow(&self, x: &BigInt, k: &BigInt) -> BigInt {
        self.reduce(x).modpow(k, &self.modulus)
    }

    /// Computes the multiplicative inverse `x^-1` with `x * x^-1 = 1 mod p`
    /// from the Bezout coefficient of `gcd(p, x)`.
    ///
    /// `x` must not be a multiple of `p`; the modulus is prime, so every
    /// other input is invertible.
    pub fn invert(&self, x: &BigInt) -> BigInt {
        let (_, _, y) = extended_gcd(&self.modulus, x);
        y.mod_floor(&self.modulus)
    }

    /// Computes `-x mod p`.
    pub fn negate(&self, x: &BigInt) -> BigInt {
        (-x).mod_floor(&self.modulus)
    }
}
