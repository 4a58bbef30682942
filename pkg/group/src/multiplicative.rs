use core::f64::consts::LN_2;

use math::prime::random_safe_prime;
use math::{BigPrime, Field, NumberLength};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive};
use rand::RngCore;
use tracing::debug;

use crate::algebra::GroupAlgebra;
use crate::errors::{Error, Result};

/// The multiplicative group of integers modulo a prime `p`, restricted to
/// the subgroup of prime order `q` spanned by the generator.
///
/// The group operation is modular multiplication, so "scalar
/// multiplication" is modular exponentiation and "negation" is the modular
/// inverse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiplicativeGroupAlgebra {
    field: Field,
    order: BigPrime,
    generator: BigInt,
    cofactor: BigInt,
}

impl MultiplicativeGroupAlgebra {
    /// Creates the algebra for the subgroup of order `order` of `Z_p*`
    /// spanned by `generator`.
    ///
    /// The cofactor is derived as `(p - 1) / order`. Fails with
    /// [`Error::InvalidParameter`] if the generator does not span a subgroup
    /// of the declared order.
    pub fn new(modulus: BigPrime, order: BigPrime, generator: BigInt) -> Result<Self> {
        let cofactor = (modulus.as_ref() - BigInt::one()) / order.as_ref();
        let algebra = Self {
            field: Field::new(modulus),
            order,
            generator,
            cofactor,
        };

        if !algebra.is_safe_element(&algebra.generator) {
            return Err(Error::InvalidParameter(format!(
                "{} does not generate a subgroup of order {} modulo {}",
                algebra.generator,
                algebra.order,
                algebra.field.modulus()
            )));
        }

        Ok(algebra)
    }

    /// Builds a group with the requested security level over a fresh safe
    /// prime `p = 2q + 1`.
    ///
    /// 4 is a square, so it spans the subgroup of the squares, which in a
    /// safe-prime group is exactly the subgroup of order `q`.
    pub fn for_security_level<R: RngCore + ?Sized>(
        security_level: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let length = Self::prime_length_for_security_level(security_level);
        debug!(
            security_level,
            bits = length.bits(),
            "searching for a safe prime"
        );

        let (p, q) = random_safe_prime(rng, length.bits());
        Self::new(
            BigPrime::new_unchecked(p),
            BigPrime::new_unchecked(q),
            BigInt::from(4),
        )
    }

    /// Attack cost, in bits of work, of the general number field sieve
    /// against a field of the given prime modulus:
    /// `1.9 * (ln p)^(1/3) * (ln ln p)^(2/3) / ln 2`.
    pub fn nfs_security_level(modulus: &BigInt) -> usize {
        let ln_p = natural_log(modulus);
        (1.9 * ln_p.cbrt() * ln_p.ln().powf(2.0 / 3.0) / LN_2).floor() as usize
    }

    /// Smallest field length whose number-field-sieve cost reaches the
    /// requested security level, and whose subgroup can hold an order of
    /// twice that many bits.
    ///
    /// Inverts the formula of [`nfs_security_level`] with Newton's method
    /// on `z = ln ln p`, then clamps the result to at least
    /// `2 * security_level` bits.
    pub fn prime_length_for_security_level(security_level: usize) -> NumberLength {
        assert!(security_level > 0);

        let target = ((security_level as f64) * LN_2).ln();
        let mut z = 5.0f64;
        for _ in 0..64 {
            let residual = (1.9f64).ln() + z / 3.0 + (2.0 / 3.0) * z.ln() - target;
            let step = residual / (1.0 / 3.0 + 2.0 / (3.0 * z));
            z -= step;
            if step.abs() < 1e-12 {
                break;
            }
        }

        let bits = (z.exp() / LN_2).ceil() as usize;
        NumberLength::from_bits(bits.max(2 * security_level))
    }
}

impl GroupAlgebra for MultiplicativeGroupAlgebra {
    type Element = BigInt;

    fn order(&self) -> &BigPrime {
        &self.order
    }

    fn cofactor(&self) -> &BigInt {
        &self.cofactor
    }

    fn generator(&self) -> &BigInt {
        &self.generator
    }

    fn neutral(&self) -> BigInt {
        BigInt::one()
    }

    fn element_bit_length(&self) -> NumberLength {
        self.field.element_length()
    }

    /// The weaker of the number-field-sieve bound against the field and the
    /// Pollard-rho bound (`sqrt(q)` work) against the subgroup.
    fn security_level(&self) -> usize {
        let nfs = Self::nfs_security_level(self.field.modulus());
        let rho = self.order_bit_length().bits() / 2;
        nfs.min(rho)
    }

    fn add(&self, lhs: &BigInt, rhs: &BigInt) -> BigInt {
        self.field.mul(lhs, rhs)
    }

    fn negate(&self, element: &BigInt) -> BigInt {
        self.field.invert(element)
    }

    fn is_potential_element(&self, element: &BigInt) -> bool {
        element.is_positive() && element < self.field.modulus()
    }

    /// Signed two's-complement little-endian, as produced by the
    /// big-integer facade.
    fn from_bytes(&self, data: &[u8]) -> Result<BigInt> {
        Ok(BigInt::from_signed_bytes_le(data))
    }

    fn to_bytes(&self, element: &BigInt) -> Result<Vec<u8>> {
        Ok(element.to_signed_bytes_le())
    }
}

/// Natural logarithm of a positive big integer, from its top bits.
fn natural_log(n: &BigInt) -> f64 {
    let bits = n.bits();
    if bits <= 52 {
        return n.to_f64().unwrap_or(1.0).max(1.0).ln();
    }
    let shift = bits - 52;
    let top = (n >> shift).to_f64().unwrap_or(1.0);
    top.ln() + (shift as f64) * LN_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tiny_group() -> MultiplicativeGroupAlgebra {
        // 2 spans the order-11 subgroup of Z_23*.
        MultiplicativeGroupAlgebra::new(
            BigPrime::new_unchecked(BigInt::from(23)),
            BigPrime::new_unchecked(BigInt::from(11)),
            BigInt::from(2),
        )
        .unwrap()
    }

    #[test]
    fn construction_derives_cofactor() {
        let algebra = tiny_group();
        assert_eq!(*algebra.cofactor(), BigInt::from(2));
        assert_eq!(algebra.neutral(), BigInt::one());
        assert_eq!(algebra.element_bit_length().bits(), 5);
        assert_eq!(algebra.order_bit_length().bits(), 4);
    }

    #[test]
    fn construction_rejects_unsafe_generator() {
        // 22 = -1 mod 23 has order 2, not 11.
        let err = MultiplicativeGroupAlgebra::new(
            BigPrime::new_unchecked(BigInt::from(23)),
            BigPrime::new_unchecked(BigInt::from(11)),
            BigInt::from(22),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn group_operation_is_modular_multiplication() {
        let algebra = tiny_group();
        assert_eq!(
            algebra.add(&BigInt::from(7), &BigInt::from(8)),
            BigInt::from(10)
        );
        assert_eq!(
            algebra.add(&algebra.neutral(), &BigInt::from(9)),
            BigInt::from(9)
        );
    }

    #[test]
    fn negation_is_modular_inverse() {
        let algebra = tiny_group();
        for x in 1..23u32 {
            let x = BigInt::from(x);
            let inverse = algebra.negate(&x);
            assert_eq!(algebra.add(&x, &inverse), algebra.neutral());
        }
        // Same result as the generic order - 1 exponentiation.
        let x = BigInt::from(2);
        assert_eq!(
            algebra.negate(&x),
            algebra.multiply_scalar(&x, &BigInt::from(10)).unwrap()
        );
    }

    #[test]
    fn diffie_hellman_exchange() {
        let algebra = tiny_group();
        let (k_a, k_b) = (BigInt::from(3), BigInt::from(5));

        let public_a = algebra.generate_element(&k_a).unwrap();
        let public_b = algebra.generate_element(&k_b).unwrap();
        assert_eq!(public_a, BigInt::from(8));
        assert_eq!(public_b, BigInt::from(9));

        let shared_a = algebra.multiply_scalar(&public_b, &k_a).unwrap();
        let shared_b = algebra.multiply_scalar(&public_a, &k_b).unwrap();
        assert_eq!(shared_a, BigInt::from(16));
        assert_eq!(shared_a, shared_b);

        // Public values sit in the order-11 subgroup.
        assert_eq!(
            algebra
                .multiply_scalar(&public_a, algebra.order().as_ref())
                .unwrap(),
            algebra.neutral()
        );
    }

    #[test]
    fn membership() {
        let algebra = tiny_group();
        assert!(algebra.is_potential_element(&BigInt::from(1)));
        assert!(algebra.is_potential_element(&BigInt::from(22)));
        assert!(!algebra.is_potential_element(&BigInt::from(0)));
        assert!(!algebra.is_potential_element(&BigInt::from(23)));
        assert!(!algebra.is_potential_element(&BigInt::from(-4)));
    }

    #[test]
    fn safe_elements() {
        let algebra = tiny_group();
        assert!(algebra.is_safe_element(algebra.generator()));
        assert!(!algebra.is_safe_element(&algebra.neutral()));
        // -1 collapses under the cofactor 2.
        assert!(!algebra.is_safe_element(&BigInt::from(22)));
    }

    #[test]
    fn byte_round_trip() {
        let algebra = tiny_group();
        for x in 1..23u32 {
            let x = BigInt::from(x);
            let encoded = algebra.to_bytes(&x).unwrap();
            assert_eq!(algebra.from_bytes(&encoded).unwrap(), x);
        }
    }

    #[test]
    fn security_accounting() {
        let algebra = tiny_group();
        // min(nfs(23) = 4, 4 / 2) = 2.
        assert_eq!(algebra.security_level(), 2);

        let big = BigInt::one() << 2048;
        assert_eq!(MultiplicativeGroupAlgebra::nfs_security_level(&big), 115);
        let bigger = BigInt::one() << 3072;
        assert_eq!(
            MultiplicativeGroupAlgebra::nfs_security_level(&bigger),
            137
        );
    }

    #[test]
    fn prime_length_inverts_the_estimate() {
        for level in [16usize, 32, 80, 128] {
            let length = MultiplicativeGroupAlgebra::prime_length_for_security_level(level);
            assert!(length.bits() >= 2 * level);
            assert!(
                MultiplicativeGroupAlgebra::nfs_security_level(
                    &(BigInt::one() << length.bits())
                ) >= level
            );
        }
    }

    #[test]
    fn group_for_security_level() {
        let mut rng = StdRng::seed_from_u64(17);
        let algebra = MultiplicativeGroupAlgebra::for_security_level(16, &mut rng).unwrap();

        assert_eq!(*algebra.generator(), BigInt::from(4));
        assert_eq!(*algebra.cofactor(), BigInt::from(2));
        assert!(algebra.is_safe_element(algebra.generator()));
        // The 2-lambda clamp leaves the rho bound half a bit short of the
        // target: q has 31 bits, so min(nfs, rho) lands on 15.
        assert!(algebra.security_level() >= 15);

        // A full exchange over the fresh group.
        let mut rng = StdRng::seed_from_u64(18);
        let (k_a, public_a) = algebra.generate_random_element(&mut rng);
        let (k_b, public_b) = algebra.generate_random_element(&mut rng);
        assert_eq!(
            algebra.multiply_scalar(&public_b, &k_a).unwrap(),
            algebra.multiply_scalar(&public_a, &k_b).unwrap()
        );
    }
}
