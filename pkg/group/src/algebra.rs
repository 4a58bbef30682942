use core::fmt::Debug;

use math::random::random_between;
use math::{BigPrime, NumberLength};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed};
use rand::RngCore;

use crate::errors::{Error, Result};

/// Operations of a cyclic group of prime order, written additively.
///
/// Implementations supply the group operation, the neutral element and the
/// membership test; scalar multiplication, negation, the safety predicate
/// and random sampling are derived from those. The derived
/// scalar-multiplication loop performs a number of iterations fixed by the
/// declared factor length, never by the scalar value. That property is
/// structural only: the big-integer arithmetic underneath is not constant
/// time.
pub trait GroupAlgebra: PartialEq + Sized {
    /// Raw element representation of this algebra.
    type Element: Clone + PartialEq + Debug;

    /// Order of the subgroup spanned by the generator. Prime.
    fn order(&self) -> &BigPrime;

    /// Ratio between the size of the ambient structure and the subgroup
    /// order.
    fn cofactor(&self) -> &BigInt;

    fn generator(&self) -> &Self::Element;

    /// Identity of the group operation.
    fn neutral(&self) -> Self::Element;

    /// Maximum length of an element in its wire encoding.
    fn element_bit_length(&self) -> NumberLength;

    fn order_bit_length(&self) -> NumberLength {
        NumberLength::of(self.order())
    }

    /// Bits of work the best known attack needs against this group.
    fn security_level(&self) -> usize;

    /// Whether [`add`](Self::add) is implemented. Algebras without a usable
    /// group operation advertise `false` here and panic in `add`; callers
    /// going through the element wrapper get
    /// [`Error::UnsupportedOperation`] instead of reaching it.
    fn supports_add(&self) -> bool {
        true
    }

    /// The group operation. Commutative and associative.
    fn add(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element;

    /// Membership test for the ambient structure. True for the neutral
    /// element.
    fn is_potential_element(&self, element: &Self::Element) -> bool;

    /// True iff `element` spans the full declared order, i.e. it does not
    /// collapse under cofactor multiplication. The check runs even when the
    /// cofactor is 1 (where it only excludes the neutral element).
    fn is_safe_element(&self, element: &Self::Element) -> bool {
        if !self.is_potential_element(element) {
            return false;
        }
        let cofactor = self.cofactor();
        let multiple = self.multiply_scalar_raw(element, cofactor, NumberLength::of(cofactor));
        multiple != self.neutral()
    }

    /// Inverse with respect to the group operation.
    fn negate(&self, element: &Self::Element) -> Self::Element {
        let exponent = self.order().as_ref() - BigInt::one();
        self.multiply_scalar_raw(element, &exponent, self.order_bit_length())
    }

    /// Computes `k * element` for any non-negative scalar. `k` is reduced
    /// modulo the group order before the fixed-length loop runs.
    fn multiply_scalar(&self, element: &Self::Element, k: &BigInt) -> Result<Self::Element> {
        if k.is_negative() {
            return Err(Error::ScalarOutOfRange {
                scalar: k.clone(),
                bit_length: self.order_bit_length().bits(),
            });
        }
        let k = k.mod_floor(self.order());
        Ok(self.multiply_scalar_raw(element, &k, self.order_bit_length()))
    }

    /// Computes `k * element` for a scalar of at most `factor_bit_length`
    /// bits, without reduction modulo the order.
    fn multiply_scalar_bounded(
        &self,
        element: &Self::Element,
        k: &BigInt,
        factor_bit_length: NumberLength,
    ) -> Result<Self::Element> {
        if k.is_negative() || NumberLength::of(k) > factor_bit_length {
            return Err(Error::ScalarOutOfRange {
                scalar: k.clone(),
                bit_length: factor_bit_length.bits(),
            });
        }
        Ok(self.multiply_scalar_raw(element, k, factor_bit_length))
    }

    /// Double-and-add over exactly `factor_bit_length.bits()` iterations.
    ///
    /// Each iteration computes both the doubled value and its sum with
    /// `element` and selects by the scalar bit, so the sequence of group
    /// operations is independent of the scalar value. Requires
    /// `0 <= k < 2^factor_bit_length`.
    fn multiply_scalar_raw(
        &self,
        element: &Self::Element,
        k: &BigInt,
        factor_bit_length: NumberLength,
    ) -> Self::Element {
        debug_assert!(!k.is_negative());
        debug_assert!(NumberLength::of(k) <= factor_bit_length);

        let mut r0 = self.neutral();
        for i in (0..factor_bit_length.bits() as u64).rev() {
            r0 = self.add(&r0, &r0);
            let r1 = self.add(&r0, element);
            r0 = select(k.bit(i), r1, r0);
        }
        r0
    }

    /// Computes `k * generator`.
    fn generate_element(&self, k: &BigInt) -> Result<Self::Element> {
        self.multiply_scalar(self.generator(), k)
    }

    /// Draws a uniform element of the generated subgroup together with its
    /// index with respect to the generator. The index comes from
    /// `[1, order - 1]`.
    fn generate_random_element<R: RngCore + ?Sized>(&self, rng: &mut R) -> (BigInt, Self::Element) {
        let lower = BigInt::one();
        let upper = self.order().as_ref() - BigInt::one();
        let k = random_between(rng, &lower, &upper);
        let element = self.multiply_scalar_raw(self.generator(), &k, self.order_bit_length());
        (k, element)
    }

    /// Decodes an element from its wire form.
    fn from_bytes(&self, data: &[u8]) -> Result<Self::Element>;

    /// Encodes an element into its wire form.
    fn to_bytes(&self, element: &Self::Element) -> Result<Vec<u8>>;
}

fn select<T>(bit: bool, when_set: T, otherwise: T) -> T {
    if bit {
        when_set
    } else {
        otherwise
    }
}
