use math::{BigPrime, NumberLength};
use num_bigint::{BigInt, Sign};

use super::equation::CurveEquation;
use super::parameters::CurveParameters;
use super::point::CurvePoint;
use crate::algebra::GroupAlgebra;
use crate::errors::{Error, Result};

/// Group algebra of the points of an elliptic curve, in affine coordinates,
/// over either curve shape.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveGroupAlgebra<E: CurveEquation> {
    parameters: CurveParameters<E>,
}

impl<E: CurveEquation> CurveGroupAlgebra<E> {
    /// Fails with [`Error::InvalidParameter`] if the generator is off the
    /// curve or collapses under the cofactor.
    pub fn new(parameters: CurveParameters<E>) -> Result<Self> {
        if !parameters.equation.is_point_on_curve(&parameters.generator) {
            return Err(Error::InvalidParameter(format!(
                "generator {:?} is not on the curve",
                parameters.generator
            )));
        }

        let algebra = Self { parameters };
        if !algebra.is_safe_element(algebra.generator()) {
            return Err(Error::InvalidParameter(
                "generator does not span the declared group order".to_string(),
            ));
        }

        Ok(algebra)
    }

    pub fn parameters(&self) -> &CurveParameters<E> {
        &self.parameters
    }

    fn coordinate_bytes(&self) -> usize {
        self.parameters.equation.field().element_byte_length()
    }
}

impl<E: CurveEquation> GroupAlgebra for CurveGroupAlgebra<E> {
    type Element = CurvePoint;

    fn order(&self) -> &BigPrime {
        &self.parameters.order
    }

    fn cofactor(&self) -> &BigInt {
        &self.parameters.cofactor
    }

    fn generator(&self) -> &CurvePoint {
        &self.parameters.generator
    }

    fn neutral(&self) -> CurvePoint {
        CurvePoint::infinity()
    }

    /// Two field coordinates.
    fn element_bit_length(&self) -> NumberLength {
        NumberLength::from_bits(2 * self.parameters.equation.field().element_length().bits())
    }

    /// Pollard rho against the subgroup: `sqrt(order)` work.
    fn security_level(&self) -> usize {
        self.order_bit_length().bits() / 2
    }

    fn add(&self, lhs: &CurvePoint, rhs: &CurvePoint) -> CurvePoint {
        self.parameters.equation.add(lhs, rhs)
    }

    fn negate(&self, element: &CurvePoint) -> CurvePoint {
        self.parameters.equation.negate(element)
    }

    fn is_potential_element(&self, element: &CurvePoint) -> bool {
        self.parameters.equation.is_point_on_curve(element)
    }

    /// Fixed-width little-endian `x || y`. The point at infinity has no
    /// wire form and cannot be decoded.
    fn from_bytes(&self, data: &[u8]) -> Result<CurvePoint> {
        let width = self.coordinate_bytes();
        if data.len() != 2 * width {
            return Err(Error::InvalidEncoding(format!(
                "expected {} bytes for a curve point, got {}",
                2 * width,
                data.len()
            )));
        }

        let x = BigInt::from_bytes_le(Sign::Plus, &data[..width]);
        let y = BigInt::from_bytes_le(Sign::Plus, &data[width..]);
        Ok(CurvePoint::new(x, y))
    }

    fn to_bytes(&self, element: &CurvePoint) -> Result<Vec<u8>> {
        if element.is_infinity() {
            return Err(Error::InvalidElement(
                "the point at infinity has no encoding".to_string(),
            ));
        }

        let width = self.coordinate_bytes();
        let mut out = Vec::with_capacity(2 * width);
        out.extend_from_slice(&coordinate_le_bytes(element.x(), width));
        out.extend_from_slice(&coordinate_le_bytes(element.y(), width));
        Ok(out)
    }
}

fn coordinate_le_bytes(value: &BigInt, width: usize) -> Vec<u8> {
    let (_, mut bytes) = value.to_bytes_le();
    bytes.resize(width, 0);
    bytes
}
