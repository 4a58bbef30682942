use math::Field;
use num_bigint::BigInt;
use num_traits::Zero;

use super::point::CurvePoint;

/// Affine chord-and-tangent arithmetic of one curve shape over a prime
/// field.
pub trait CurveEquation: PartialEq {
    fn field(&self) -> &Field;

    fn a(&self) -> &BigInt;

    fn b(&self) -> &BigInt;

    /// Membership test: the point at infinity, or coordinates inside the
    /// field satisfying the curve equation.
    fn is_point_on_curve(&self, point: &CurvePoint) -> bool;

    /// Mirror image over the x axis.
    fn negate(&self, point: &CurvePoint) -> CurvePoint {
        if point.is_infinity() {
            return CurvePoint::infinity();
        }
        let field = self.field();
        CurvePoint::new(field.reduce(point.x()), field.negate(point.y()))
    }

    /// Adds two points, covering doubling and all the infinity and
    /// mirror-point cases.
    fn add(&self, lhs: &CurvePoint, rhs: &CurvePoint) -> CurvePoint;
}

/// Checks coordinate bounds: `0 <= x, y < p`.
fn in_field(field: &Field, point: &CurvePoint) -> bool {
    let p = field.modulus();
    point.x() >= &BigInt::zero() && point.x() < p && point.y() >= &BigInt::zero() && point.y() < p
}

/// Cases shared by both shapes. Returns the result for the degenerate
/// inputs, or `None` when the chord/tangent path must run.
fn trivial_sum(field: &Field, lhs: &CurvePoint, rhs: &CurvePoint) -> Option<CurvePoint> {
    if lhs.is_infinity() {
        return Some(rhs.clone());
    }
    if rhs.is_infinity() {
        return Some(lhs.clone());
    }
    // Mirror points add to infinity. This also catches doubling a point
    // with y = 0, where the tangent is vertical.
    if lhs.x() == rhs.x() && field.add(lhs.y(), rhs.y()).is_zero() {
        return Some(CurvePoint::infinity());
    }
    None
}

/// Short Weierstrass curve `y^2 = x^3 + a*x + b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeierstrassCurve {
    field: Field,
    a: BigInt,
    b: BigInt,
}

impl WeierstrassCurve {
    pub fn new(field: Field, a: BigInt, b: BigInt) -> Self {
        let a = field.reduce(&a);
        let b = field.reduce(&b);
        Self { field, a, b }
    }
}

impl CurveEquation for WeierstrassCurve {
    fn field(&self) -> &Field {
        &self.field
    }

    fn a(&self) -> &BigInt {
        &self.a
    }

    fn b(&self) -> &BigInt {
        &self.b
    }

    fn is_point_on_curve(&self, point: &CurvePoint) -> bool {
        if point.is_infinity() {
            return true;
        }
        if !in_field(&self.field, point) {
            return false;
        }

        let f = &self.field;
        let (x, y) = (point.x(), point.y());
        let lhs = f.square(y);
        let rhs = f.add(
            &f.mul(&f.square(x), x),
            &f.add(&f.mul(&self.a, x), &self.b),
        );
        lhs == rhs
    }

    fn add(&self, lhs: &CurvePoint, rhs: &CurvePoint) -> CurvePoint {
        let f = &self.field;
        if let Some(sum) = trivial_sum(f, lhs, rhs) {
            return sum;
        }

        let slope = if lhs == rhs {
            // Tangent: (3 x^2 + a) / (2 y).
            let numerator = f.add(&f.mul(&BigInt::from(3), &f.square(lhs.x())), &self.a);
            let denominator = f.mul(&BigInt::from(2), lhs.y());
            f.mul(&numerator, &f.invert(&denominator))
        } else {
            // Chord: (y2 - y1) / (x2 - x1).
            let numerator = f.sub(rhs.y(), lhs.y());
            let denominator = f.sub(rhs.x(), lhs.x());
            f.mul(&numerator, &f.invert(&denominator))
        };

        let x = f.sub(&f.sub(&f.square(&slope), lhs.x()), rhs.x());
        let y = f.sub(&f.mul(&slope, &f.sub(lhs.x(), &x)), lhs.y());
        CurvePoint::new(x, y)
    }
}

/// Montgomery curve `b*y^2 = x^3 + a*x^2 + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MontgomeryCurve {
    field: Field,
    a: BigInt,
    b: BigInt,
}

impl MontgomeryCurve {
    pub fn new(field: Field, a: BigInt, b: BigInt) -> Self {
        let a = field.reduce(&a);
        let b = field.reduce(&b);
        Self { field, a, b }
    }
}

impl CurveEquation for MontgomeryCurve {
    fn field(&self) -> &Field {
        &self.field
    }

    fn a(&self) -> &BigInt {
        &self.a
    }

    fn b(&self) -> &BigInt {
        &self.b
    }

    fn is_point_on_curve(&self, point: &CurvePoint) -> bool {
        if point.is_infinity() {
            return true;
        }
        if !in_field(&self.field, point) {
            return false;
        }

        let f = &self.field;
        let (x, y) = (point.x(), point.y());
        let x_squared = f.square(x);
        let lhs = f.mul(&self.b, &f.square(y));
        let rhs = f.add(&f.mul(&x_squared, x), &f.add(&f.mul(&self.a, &x_squared), x));
        lhs == rhs
    }

    fn add(&self, lhs: &CurvePoint, rhs: &CurvePoint) -> CurvePoint {
        let f = &self.field;
        if let Some(sum) = trivial_sum(f, lhs, rhs) {
            return sum;
        }

        let slope = if lhs == rhs {
            // Tangent: (3 x^2 + 2 a x + 1) / (2 b y).
            let numerator = f.add(
                &f.add(
                    &f.mul(&BigInt::from(3), &f.square(lhs.x())),
                    &f.mul(&f.mul(&BigInt::from(2), &self.a), lhs.x()),
                ),
                &BigInt::from(1),
            );
            let denominator = f.mul(&f.mul(&BigInt::from(2), &self.b), lhs.y());
            f.mul(&numerator, &f.invert(&denominator))
        } else {
            // Chord: (y2 - y1) / (x2 - x1).
            let numerator = f.sub(rhs.y(), lhs.y());
            let denominator = f.sub(rhs.x(), lhs.x());
            f.mul(&numerator, &f.invert(&denominator))
        };

        // x3 = b * slope^2 - a - x1 - x2
        let x = f.sub(
            &f.sub(&f.sub(&f.mul(&self.b, &f.square(&slope)), &self.a), lhs.x()),
            rhs.x(),
        );
        let y = f.sub(&f.mul(&slope, &f.sub(lhs.x(), &x)), lhs.y());
        CurvePoint::new(x, y)
    }
}
