use num_bigint::BigInt;
use num_traits::Zero;

/// Affine point on an elliptic curve, or the point at infinity.
///
/// The point at infinity is the group identity. It carries no meaningful
/// coordinates; equality looks at the flag alone.
#[derive(Clone, Debug)]
pub struct CurvePoint {
    x: BigInt,
    y: BigInt,
    infinity: bool,
}

impl CurvePoint {
    pub fn new(x: BigInt, y: BigInt) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }

    pub fn infinity() -> Self {
        Self {
            x: BigInt::zero(),
            y: BigInt::zero(),
            infinity: true,
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    pub fn x(&self) -> &BigInt {
        &self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }
}

impl PartialEq for CurvePoint {
    fn eq(&self, other: &Self) -> bool {
        if self.infinity || other.infinity {
            return self.infinity == other.infinity;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Eq for CurvePoint {}
