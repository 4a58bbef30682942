use std::sync::Arc;

use num_bigint::BigInt;

use crate::algebra::GroupAlgebra;
use crate::errors::{Error, Result};

/// An element of a cyclic group, tied to the algebra that produced it.
///
/// Construction validates membership. Binary operations first check that
/// both operands carry the same algebra and fail with
/// [`Error::AlgebraMismatch`] otherwise; results are wrapped again, so
/// everything a caller can hold is a member of its group.
#[derive(Clone, Debug)]
pub struct GroupElement<A: GroupAlgebra> {
    value: A::Element,
    algebra: Arc<A>,
}

impl<A: GroupAlgebra> GroupElement<A> {
    /// Wraps `value` after checking membership.
    pub fn new(value: A::Element, algebra: Arc<A>) -> Result<Self> {
        if !algebra.is_potential_element(&value) {
            return Err(Error::InvalidElement(format!("{:?}", value)));
        }
        Ok(Self { value, algebra })
    }

    /// Wraps a value the algebra itself produced, which is a member by
    /// construction.
    pub(crate) fn wrap(value: A::Element, algebra: Arc<A>) -> Self {
        Self { value, algebra }
    }

    pub fn value(&self) -> &A::Element {
        &self.value
    }

    pub fn into_value(self) -> A::Element {
        self.value
    }

    pub fn algebra(&self) -> &Arc<A> {
        &self.algebra
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_same_algebra(other)?;
        self.check_supports_add()?;
        Ok(Self::wrap(
            self.algebra.add(&self.value, &other.value),
            self.algebra.clone(),
        ))
    }

    /// `self + (-other)`.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_same_algebra(other)?;
        self.check_supports_add()?;
        let negated = self.algebra.negate(&other.value);
        Ok(Self::wrap(
            self.algebra.add(&self.value, &negated),
            self.algebra.clone(),
        ))
    }

    pub fn negate(&self) -> Self {
        Self::wrap(self.algebra.negate(&self.value), self.algebra.clone())
    }

    pub fn multiply_scalar(&self, k: &BigInt) -> Result<Self> {
        let value = self.algebra.multiply_scalar(&self.value, k)?;
        Ok(Self::wrap(value, self.algebra.clone()))
    }

    pub fn is_safe(&self) -> bool {
        self.algebra.is_safe_element(&self.value)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.algebra.to_bytes(&self.value)
    }

    fn check_same_algebra(&self, other: &Self) -> Result<()> {
        if self.algebra != other.algebra {
            return Err(Error::AlgebraMismatch);
        }
        Ok(())
    }

    fn check_supports_add(&self) -> Result<()> {
        if !self.algebra.supports_add() {
            return Err(Error::UnsupportedOperation("add"));
        }
        Ok(())
    }
}

impl<A: GroupAlgebra> PartialEq for GroupElement<A> {
    fn eq(&self, other: &Self) -> bool {
        self.algebra == other.algebra && self.value == other.value
    }
}

impl<A: GroupAlgebra> Eq for GroupElement<A> {}
