use std::sync::Arc;

use math::{BigPrime, NumberLength};
use num_bigint::BigInt;
use rand::RngCore;

use crate::algebra::GroupAlgebra;
use crate::curve::{
    CurveGroupAlgebra, CurveParameters, MontgomeryCurve, WeierstrassCurve, XOnlyMontgomeryAlgebra,
};
use crate::element::GroupElement;
use crate::errors::{Error, Result};
use crate::multiplicative::MultiplicativeGroupAlgebra;

/// Facade owning a group algebra and handing out wrapped elements.
///
/// Every element-taking method verifies that the element belongs to this
/// group's algebra and fails with [`Error::AlgebraMismatch`] otherwise.
#[derive(Clone, Debug)]
pub struct Group<A: GroupAlgebra> {
    algebra: Arc<A>,
}

impl<A: GroupAlgebra> Group<A> {
    pub fn new(algebra: A) -> Self {
        Self {
            algebra: Arc::new(algebra),
        }
    }

    pub fn algebra(&self) -> &Arc<A> {
        &self.algebra
    }

    pub fn generator(&self) -> GroupElement<A> {
        GroupElement::wrap(self.algebra.generator().clone(), self.algebra.clone())
    }

    pub fn order(&self) -> &BigPrime {
        self.algebra.order()
    }

    pub fn cofactor(&self) -> &BigInt {
        self.algebra.cofactor()
    }

    pub fn order_length(&self) -> NumberLength {
        self.algebra.order_bit_length()
    }

    pub fn element_length(&self) -> NumberLength {
        self.algebra.element_bit_length()
    }

    pub fn security_level(&self) -> usize {
        self.algebra.security_level()
    }

    /// `k` times the generator.
    pub fn generate(&self, k: &BigInt) -> Result<GroupElement<A>> {
        let value = self.algebra.generate_element(k)?;
        Ok(GroupElement::wrap(value, self.algebra.clone()))
    }

    /// A uniform element of the group with its generator index.
    pub fn generate_random<R: RngCore + ?Sized>(&self, rng: &mut R) -> (BigInt, GroupElement<A>) {
        let (k, value) = self.algebra.generate_random_element(rng);
        (k, GroupElement::wrap(value, self.algebra.clone()))
    }

    /// Decodes and validates an element.
    pub fn from_bytes(&self, data: &[u8]) -> Result<GroupElement<A>> {
        let value = self.algebra.from_bytes(data)?;
        GroupElement::new(value, self.algebra.clone())
    }

    pub fn add(&self, lhs: &GroupElement<A>, rhs: &GroupElement<A>) -> Result<GroupElement<A>> {
        self.check_member(lhs)?;
        lhs.add(rhs)
    }

    pub fn multiply_scalar(
        &self,
        element: &GroupElement<A>,
        k: &BigInt,
    ) -> Result<GroupElement<A>> {
        self.check_member(element)?;
        element.multiply_scalar(k)
    }

    pub fn negate(&self, element: &GroupElement<A>) -> Result<GroupElement<A>> {
        self.check_member(element)?;
        Ok(element.negate())
    }

    fn check_member(&self, element: &GroupElement<A>) -> Result<()> {
        if *element.algebra() != self.algebra {
            return Err(Error::AlgebraMismatch);
        }
        Ok(())
    }
}

impl Group<CurveGroupAlgebra<WeierstrassCurve>> {
    /// NIST P-256 in affine coordinates.
    pub fn nist_p256() -> Self {
        Self::new(
            CurveGroupAlgebra::new(CurveParameters::nist_p256())
                .expect("built-in curve parameters are valid"),
        )
    }

    /// NIST P-384 in affine coordinates.
    pub fn nist_p384() -> Self {
        Self::new(
            CurveGroupAlgebra::new(CurveParameters::nist_p384())
                .expect("built-in curve parameters are valid"),
        )
    }

    /// NIST P-521 in affine coordinates.
    pub fn nist_p521() -> Self {
        Self::new(
            CurveGroupAlgebra::new(CurveParameters::nist_p521())
                .expect("built-in curve parameters are valid"),
        )
    }
}

impl Group<CurveGroupAlgebra<MontgomeryCurve>> {
    /// Curve25519 in affine coordinates.
    pub fn curve25519() -> Self {
        Self::new(
            CurveGroupAlgebra::new(CurveParameters::curve25519())
                .expect("built-in curve parameters are valid"),
        )
    }
}

impl Group<XOnlyMontgomeryAlgebra> {
    /// Curve25519 over x-coordinates alone, multiplied with the Montgomery
    /// ladder.
    pub fn curve25519_x_only() -> Self {
        Self::new(
            XOnlyMontgomeryAlgebra::new(CurveParameters::curve25519())
                .expect("built-in curve parameters are valid"),
        )
    }
}

impl Group<MultiplicativeGroupAlgebra> {
    /// A fresh safe-prime multiplicative group reaching the given security
    /// level.
    pub fn multiplicative_for_security<R: RngCore + ?Sized>(
        security_level: usize,
        rng: &mut R,
    ) -> Result<Self> {
        Ok(Self::new(MultiplicativeGroupAlgebra::for_security_level(
            security_level,
            rng,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::BigPrime;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tiny_group() -> Group<MultiplicativeGroupAlgebra> {
        Group::new(
            MultiplicativeGroupAlgebra::new(
                BigPrime::new_unchecked(BigInt::from(23)),
                BigPrime::new_unchecked(BigInt::from(11)),
                BigInt::from(2),
            )
            .unwrap(),
        )
    }

    #[test]
    fn accessors() {
        let group = tiny_group();
        assert_eq!(**group.order(), BigInt::from(11));
        assert_eq!(*group.cofactor(), BigInt::from(2));
        assert_eq!(group.order_length().bits(), 4);
        assert_eq!(group.element_length().bits(), 5);
        assert_eq!(group.security_level(), 2);
        assert_eq!(*group.generator().value(), BigInt::from(2));
        assert!(group.generator().is_safe());
    }

    #[test]
    fn diffie_hellman_through_the_facade() {
        let group = tiny_group();

        let public_a = group.generate(&BigInt::from(3)).unwrap();
        let public_b = group.generate(&BigInt::from(5)).unwrap();
        assert_eq!(*public_a.value(), BigInt::from(8));
        assert_eq!(*public_b.value(), BigInt::from(9));

        let shared_a = group.multiply_scalar(&public_b, &BigInt::from(3)).unwrap();
        let shared_b = group.multiply_scalar(&public_a, &BigInt::from(5)).unwrap();
        assert_eq!(shared_a, shared_b);
        assert_eq!(*shared_a.value(), BigInt::from(16));
    }

    #[test]
    fn byte_round_trip_through_the_facade() {
        let group = tiny_group();
        let element = group.generate(&BigInt::from(7)).unwrap();

        let decoded = group.from_bytes(&element.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, element);

        // 0 decodes but is not a member.
        let err = group.from_bytes(&[0]).unwrap_err();
        assert!(matches!(err, Error::InvalidElement(_)));
    }

    #[test]
    fn foreign_elements_are_rejected() {
        let group = tiny_group();
        let other = Group::new(
            MultiplicativeGroupAlgebra::new(
                BigPrime::new_unchecked(BigInt::from(47)),
                BigPrime::new_unchecked(BigInt::from(23)),
                BigInt::from(2),
            )
            .unwrap(),
        );

        let ours = group.generate(&BigInt::from(3)).unwrap();
        let theirs = other.generate(&BigInt::from(3)).unwrap();

        assert!(matches!(
            group.add(&ours, &theirs).unwrap_err(),
            Error::AlgebraMismatch
        ));
        assert!(matches!(
            group.multiply_scalar(&theirs, &BigInt::from(2)).unwrap_err(),
            Error::AlgebraMismatch
        ));
        assert!(matches!(
            group.negate(&theirs).unwrap_err(),
            Error::AlgebraMismatch
        ));
    }

    #[test]
    fn random_generation() {
        let group = tiny_group();
        let mut rng = StdRng::seed_from_u64(29);

        let (k, element) = group.generate_random(&mut rng);
        assert_eq!(group.generate(&k).unwrap(), element);
    }

    #[test]
    fn x_only_addition_is_unsupported() {
        let group = Group::curve25519_x_only();
        let a = group.generate(&BigInt::from(3)).unwrap();
        let b = group.generate(&BigInt::from(5)).unwrap();

        assert!(matches!(
            group.add(&a, &b).unwrap_err(),
            Error::UnsupportedOperation(_)
        ));
        // Scalar multiplication still works.
        assert!(group.multiply_scalar(&a, &BigInt::from(7)).is_ok());
    }

    #[test]
    fn x_only_diffie_hellman() {
        let group = Group::curve25519_x_only();
        let mut rng = StdRng::seed_from_u64(31);

        let (secret_a, public_a) = group.generate_random(&mut rng);
        let (secret_b, public_b) = group.generate_random(&mut rng);

        let shared_a = group.multiply_scalar(&public_b, &secret_a).unwrap();
        let shared_b = group.multiply_scalar(&public_a, &secret_b).unwrap();
        assert_eq!(shared_a, shared_b);
        assert_eq!(shared_a.to_bytes().unwrap().len(), 32);
    }

    #[test]
    fn nist_p256_facade() {
        let group = Group::nist_p256();
        assert_eq!(group.security_level(), 128);
        assert_eq!(group.element_length().bits(), 512);

        let g = group.generator();
        let encoded = g.to_bytes().unwrap();
        assert_eq!(encoded.len(), 64);
        assert_eq!(group.from_bytes(&encoded).unwrap(), g);
    }

    #[test]
    fn nist_p521_facade() {
        let group = Group::nist_p521();
        assert_eq!(group.security_level(), 260);

        let g = group.generator();
        let encoded = g.to_bytes().unwrap();
        assert_eq!(encoded.len(), 132);
        assert_eq!(group.from_bytes(&encoded).unwrap(), g);
    }

    #[test]
    fn fresh_multiplicative_group() {
        let mut rng = StdRng::seed_from_u64(37);
        let group = Group::multiplicative_for_security(16, &mut rng).unwrap();

        let (secret_a, public_a) = group.generate_random(&mut rng);
        let (secret_b, public_b) = group.generate_random(&mut rng);
        assert_eq!(
            group.multiply_scalar(&public_b, &secret_a).unwrap(),
            group.multiply_scalar(&public_a, &secret_b).unwrap()
        );
    }
}
