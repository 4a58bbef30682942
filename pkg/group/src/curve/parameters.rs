use hex_literal::hex;
use math::{BigPrime, Field};
use num_bigint::{BigInt, Sign};

use super::equation::{CurveEquation, MontgomeryCurve, WeierstrassCurve};
use super::point::CurvePoint;

/// Everything needed to instantiate a curve group: the curve shape, a base
/// point, the prime order of the subgroup it spans and the cofactor.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveParameters<E: CurveEquation> {
    pub equation: E,
    pub generator: CurvePoint,
    pub order: BigPrime,
    pub cofactor: BigInt,
}

fn int(data: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, data)
}

impl CurveParameters<WeierstrassCurve> {
    /// NIST P-256 (secp256r1).
    pub fn nist_p256() -> Self {
        let p = int(&hex!(
            "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF"
        ));
        let a = int(&hex!(
            "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFC"
        ));
        let b = int(&hex!(
            "5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B"
        ));
        let g_x = int(&hex!(
            "6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296"
        ));
        let g_y = int(&hex!(
            "4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5"
        ));
        let n = int(&hex!(
            "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551"
        ));

        Self {
            equation: WeierstrassCurve::new(Field::new(BigPrime::new_unchecked(p)), a, b),
            generator: CurvePoint::new(g_x, g_y),
            order: BigPrime::new_unchecked(n),
            cofactor: BigInt::from(1),
        }
    }

    /// NIST P-384 (secp384r1).
    pub fn nist_p384() -> Self {
        let p = int(&hex!(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFF0000000000000000FFFFFFFF"
        ));
        let a = int(&hex!(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFF0000000000000000FFFFFFFC"
        ));
        let b = int(&hex!(
            "B3312FA7E23EE7E4988E056BE3F82D19181D9C6EFE8141120314088F5013875AC656398D8A2ED19D2A85C8EDD3EC2AEF"
        ));
        let g_x = int(&hex!(
            "AA87CA22BE8B05378EB1C71EF320AD746E1D3B628BA79B9859F741E082542A385502F25DBF55296C3A545E3872760AB7"
        ));
        let g_y = int(&hex!(
            "3617DE4A96262C6F5D9E98BF9292DC29F8F41DBD289A147CE9DA3113B5F0B8C00A60B1CE1D7E819D7A431D7C90EA0E5F"
        ));
        let n = int(&hex!(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFC7634D81F4372DDF581A0DB248B0A77AECEC196ACCC52973"
        ));

        Self {
            equation: WeierstrassCurve::new(Field::new(BigPrime::new_unchecked(p)), a, b),
            generator: CurvePoint::new(g_x, g_y),
            order: BigPrime::new_unchecked(n),
            cofactor: BigInt::from(1),
        }
    }

    /// NIST P-521 (secp521r1).
    pub fn nist_p521() -> Self {
        let p = int(&hex!(
            "01FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        ));
        let a = int(&hex!(
            "01FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFC"
        ));
        let b = int(&hex!(
            "0051953EB9618E1C9A1F929A21A0B68540EEA2DA725B99B315F3B8B489918EF109E156193951EC7E937B1652C0BD3BB1BF073573DF883D2C34F1EF451FD46B503F00"
        ));
        let g_x = int(&hex!(
            "00C6858E06B70404E9CD9E3ECB662395B4429C648139053FB521F828AF606B4D3DBAA14B5E77EFE75928FE1DC127A2FFA8DE3348B3C1856A429BF97E7E31C2E5BD66"
        ));
        let g_y = int(&hex!(
            "011839296A789A3BC0045C8A5FB42C7D1BD998F54449579B446817AFBD17273E662C97EE72995EF42640C550B9013FAD0761353C7086A272C24088BE94769FD16650"
        ));
        let n = int(&hex!(
            "01FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFA51868783BF2F966B7FCC0148F709A5D03BB5C9B8899C47AEBB6FB71E91386409"
        ));

        Self {
            equation: WeierstrassCurve::new(Field::new(BigPrime::new_unchecked(p)), a, b),
            generator: CurvePoint::new(g_x, g_y),
            order: BigPrime::new_unchecked(n),
            cofactor: BigInt::from(1),
        }
    }
}

impl CurveParameters<MontgomeryCurve> {
    /// Curve25519: `y^2 = x^3 + 486662 x^2 + x` over `GF(2^255 - 19)`,
    /// RFC 7748 base point.
    pub fn curve25519() -> Self {
        let p = int(&hex!(
            "7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFED"
        ));
        let g_y = int(&hex!(
            "20AE19A1B8A086B4E01EDD2C7748D14C923D4D7E6D7C61B229E9C5A27ECED3D9"
        ));
        // 2^252 + 27742317777372353535851937790883648493
        let n = int(&hex!(
            "1000000000000000000000000000000014DEF9DEA2F79CD65812631A5CF5D3ED"
        ));

        Self {
            equation: MontgomeryCurve::new(
                Field::new(BigPrime::new_unchecked(p)),
                BigInt::from(486662),
                BigInt::from(1),
            ),
            generator: CurvePoint::new(BigInt::from(9), g_y),
            order: BigPrime::new_unchecked(n),
            cofactor: BigInt::from(8),
        }
    }
}
