use core::mem;

use math::{BigPrime, NumberLength};
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, Zero};

use super::equation::{CurveEquation, MontgomeryCurve};
use super::parameters::CurveParameters;
use crate::algebra::GroupAlgebra;
use crate::errors::{Error, Result};

/// Montgomery-curve algebra over x-coordinates alone.
///
/// Dropping the y coordinate halves the wire size and is enough for
/// Diffie-Hellman, but leaves no way to add two arbitrary points: this
/// algebra advertises `supports_add() == false` and overrides scalar
/// multiplication with the projective Montgomery ladder. The neutral
/// element (the x-coordinate "of" the point at infinity) is represented by
/// the field zero.
#[derive(Clone, Debug, PartialEq)]
pub struct XOnlyMontgomeryAlgebra {
    parameters: CurveParameters<MontgomeryCurve>,
    generator_x: BigInt,
    /// `(a - 2) / 4` in the field, the constant of the ladder's doubling
    /// step.
    a24: BigInt,
}

impl XOnlyMontgomeryAlgebra {
    pub fn new(parameters: CurveParameters<MontgomeryCurve>) -> Result<Self> {
        let field = parameters.equation.field();
        let a24 = field.mul(
            &field.sub(parameters.equation.a(), &BigInt::from(2)),
            &field.invert(&BigInt::from(4)),
        );
        let generator_x = field.reduce(parameters.generator.x());

        let algebra = Self {
            parameters,
            generator_x,
            a24,
        };
        if !algebra.is_safe_element(&algebra.generator_x) {
            return Err(Error::InvalidParameter(format!(
                "base x-coordinate {} collapses under the cofactor",
                algebra.generator_x
            )));
        }

        Ok(algebra)
    }

    pub fn parameters(&self) -> &CurveParameters<MontgomeryCurve> {
        &self.parameters
    }

    /// RFC 7748 ladder over the projective line: tracks `(x, z)` pairs for
    /// two consecutive multiples and conditionally swaps them by the
    /// current scalar bit (deferred-swap form). Runs exactly `steps`
    /// iterations whatever the scalar value.
    fn ladder(&self, x: &BigInt, k: &BigInt, steps: usize) -> BigInt {
        let f = self.parameters.equation.field();

        let x1 = f.reduce(x);
        let mut x2 = BigInt::one();
        let mut z2 = BigInt::zero();
        let mut x3 = x1.clone();
        let mut z3 = BigInt::one();
        let mut swap = false;

        for t in (0..steps as u64).rev() {
            let k_t = k.bit(t);
            swap ^= k_t;
            if swap {
                mem::swap(&mut x2, &mut x3);
                mem::swap(&mut z2, &mut z3);
            }
            swap = k_t;

            let a = f.add(&x2, &z2);
            let aa = f.square(&a);
            let b = f.sub(&x2, &z2);
            let bb = f.square(&b);
            let e = f.sub(&aa, &bb);
            let c = f.add(&x3, &z3);
            let d = f.sub(&x3, &z3);
            let da = f.mul(&d, &a);
            let cb = f.mul(&c, &b);

            x3 = f.square(&f.add(&da, &cb));
            z3 = f.mul(&x1, &f.square(&f.sub(&da, &cb)));
            x2 = f.mul(&aa, &bb);
            z2 = f.mul(&e, &f.add(&aa, &f.mul(&self.a24, &e)));
        }

        if swap {
            mem::swap(&mut x2, &mut x3);
            mem::swap(&mut z2, &mut z3);
        }

        // z = 0 is the projective point at infinity: the sentinel.
        if z2.is_zero() {
            return BigInt::zero();
        }
        f.mul(&x2, &f.invert(&z2))
    }
}

impl GroupAlgebra for XOnlyMontgomeryAlgebra {
    type Element = BigInt;

    fn order(&self) -> &BigPrime {
        &self.parameters.order
    }

    fn cofactor(&self) -> &BigInt {
        &self.parameters.cofactor
    }

    fn generator(&self) -> &BigInt {
        &self.generator_x
    }

    fn neutral(&self) -> BigInt {
        BigInt::zero()
    }

    fn element_bit_length(&self) -> NumberLength {
        self.parameters.equation.field().element_length()
    }

    fn security_level(&self) -> usize {
        self.order_bit_length().bits() / 2
    }

    fn supports_add(&self) -> bool {
        false
    }

    /// Not available without y coordinates. Reaching this is a contract
    /// violation; [`GroupElement`](crate::GroupElement) reports
    /// [`Error::UnsupportedOperation`] before it gets here.
    fn add(&self, _lhs: &BigInt, _rhs: &BigInt) -> BigInt {
        panic!("x-only Montgomery algebra cannot add points");
    }

    /// A point and its negation share their x-coordinate.
    fn negate(&self, element: &BigInt) -> BigInt {
        element.clone()
    }

    fn multiply_scalar_raw(
        &self,
        element: &BigInt,
        k: &BigInt,
        factor_bit_length: NumberLength,
    ) -> BigInt {
        self.ladder(element, k, factor_bit_length.bits())
    }

    fn is_potential_element(&self, element: &BigInt) -> bool {
        !element.is_negative() && element < self.parameters.equation.field().modulus()
    }

    /// A single fixed-width little-endian field element.
    fn from_bytes(&self, data: &[u8]) -> Result<BigInt> {
        let width = self.parameters.equation.field().element_byte_length();
        if data.len() != width {
            return Err(Error::InvalidEncoding(format!(
                "expected {} bytes for an x-coordinate, got {}",
                width,
                data.len()
            )));
        }
        Ok(BigInt::from_bytes_le(Sign::Plus, data))
    }

    fn to_bytes(&self, element: &BigInt) -> Result<Vec<u8>> {
        let width = self.parameters.equation.field().element_byte_length();
        let (_, mut bytes) = element.to_bytes_le();
        bytes.resize(width, 0);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::group::CurveGroupAlgebra;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn x25519() -> XOnlyMontgomeryAlgebra {
        XOnlyMontgomeryAlgebra::new(CurveParameters::curve25519()).unwrap()
    }

    /// RFC 7748 section 5 scalar decoding.
    fn clamp(data: &[u8; 32]) -> BigInt {
        let mut data = *data;
        data[0] &= 248;
        data[31] &= 127;
        data[31] |= 64;
        BigInt::from_bytes_le(Sign::Plus, &data)
    }

    #[test]
    fn scalar_multiples_of_the_base() {
        let algebra = x25519();
        let g = algebra.generator().clone();
        assert_eq!(g, BigInt::from(9));

        assert_eq!(
            algebra.multiply_scalar(&g, &BigInt::from(0)).unwrap(),
            algebra.neutral()
        );
        assert_eq!(algebra.multiply_scalar(&g, &BigInt::from(1)).unwrap(), g);

        // A full cycle returns to the sentinel.
        assert_eq!(
            algebra
                .multiply_scalar(&g, algebra.order().as_ref())
                .unwrap(),
            algebra.neutral()
        );
    }

    #[test]
    fn ladder_matches_affine_arithmetic() {
        let x_only = x25519();
        let affine = CurveGroupAlgebra::new(CurveParameters::curve25519()).unwrap();

        for k in [2u32, 3, 5, 8, 1000] {
            let k = BigInt::from(k);
            let expected = affine
                .multiply_scalar(affine.generator(), &k)
                .unwrap();
            let got = x_only
                .multiply_scalar(x_only.generator(), &k)
                .unwrap();
            assert_eq!(got, *expected.x());
        }
    }

    #[test]
    fn rfc7748_key_exchange_vectors() {
        let algebra = x25519();

        let alice_private =
            clamp(&hex_decode("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a"));
        let bob_private =
            clamp(&hex_decode("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb"));

        let alice_public = algebra
            .multiply_scalar(algebra.generator(), &alice_private)
            .unwrap();
        let bob_public = algebra
            .multiply_scalar(algebra.generator(), &bob_private)
            .unwrap();

        assert_eq!(
            algebra.to_bytes(&alice_public).unwrap(),
            hex_decode("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a")
        );
        assert_eq!(
            algebra.to_bytes(&bob_public).unwrap(),
            hex_decode("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f")
        );

        let shared_a = algebra
            .multiply_scalar(&bob_public, &alice_private)
            .unwrap();
        let shared_b = algebra
            .multiply_scalar(&alice_public, &bob_private)
            .unwrap();
        assert_eq!(shared_a, shared_b);
        assert_eq!(
            algebra.to_bytes(&shared_a).unwrap(),
            hex_decode("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742")
        );
    }

    #[test]
    fn random_key_exchange() {
        let algebra = x25519();
        let mut rng = StdRng::seed_from_u64(23);

        let (k_a, public_a) = algebra.generate_random_element(&mut rng);
        let (k_b, public_b) = algebra.generate_random_element(&mut rng);

        assert_eq!(
            algebra.multiply_scalar(&public_b, &k_a).unwrap(),
            algebra.multiply_scalar(&public_a, &k_b).unwrap()
        );
    }

    #[test]
    fn byte_round_trip() {
        let algebra = x25519();
        let element = algebra
            .multiply_scalar(algebra.generator(), &BigInt::from(7))
            .unwrap();

        let encoded = algebra.to_bytes(&element).unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(algebra.from_bytes(&encoded).unwrap(), element);

        let err = algebra.from_bytes(&encoded[1..]).unwrap_err();
        assert!(matches!(err, Error::InvalidEncoding(_)));
    }

    #[test]
    fn negation_preserves_the_coordinate() {
        let algebra = x25519();
        let element = algebra
            .multiply_scalar(algebra.generator(), &BigInt::from(11))
            .unwrap();
        assert_eq!(algebra.negate(&element), element);
    }

    #[test]
    #[should_panic(expected = "cannot add points")]
    fn add_is_a_contract_violation() {
        let algebra = x25519();
        algebra.add(&BigInt::from(9), &BigInt::from(9));
    }

    #[test]
    fn membership_and_safety() {
        let algebra = x25519();
        assert!(algebra.is_potential_element(&algebra.neutral()));
        assert!(algebra.is_potential_element(&BigInt::from(9)));
        assert!(!algebra.is_potential_element(&BigInt::from(-1)));
        assert!(!algebra.is_potential_element(algebra.parameters().equation.field().modulus()));

        assert!(algebra.is_safe_element(algebra.generator()));
        assert!(!algebra.is_safe_element(&algebra.neutral()));
    }

    fn hex_decode(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&hex::decode(s).unwrap());
        out
    }
}
