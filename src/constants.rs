//! Curve and field constants.
//!
//! Byte values here are transcribed directly from `libuecc`'s
//! `ec25519.c`/`ec25519_secret.c` reference tables rather than computed
//! at build time, the same way `curve25519-dalek`'s own `constants.rs`
//! hardcodes precomputed limb arrays instead of deriving them.

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::scalar::Scalar;

/// The curve's `a` coefficient in `a*x^2 + y^2 = 1 + d*x^2*y^2`.
pub(crate) const EDWARDS_A: u32 = 486664;

/// The curve's `d` coefficient.
pub(crate) const EDWARDS_D: u32 = 486660;

/// The identity element, `(0:1:1:0)`.
pub const IDENTITY: EdwardsPoint = EdwardsPoint {
    x: FieldElement::ZERO,
    y: FieldElement::ONE,
    z: FieldElement::ONE,
    t: FieldElement::ZERO,
};

/// The default base point (generator of the main subgroup), whose
/// affine `y` coordinate is `4/5`.
pub const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    x: FieldElement([
        0xd4, 0x6b, 0xfe, 0x7f, 0x39, 0xfa, 0x8c, 0x22, 0xe1, 0x96, 0x23, 0xeb, 0x26, 0xb7, 0x8e,
        0x6a, 0x34, 0x74, 0x8b, 0x66, 0xd6, 0xa3, 0x26, 0xdd, 0x19, 0x5e, 0x9f, 0x21, 0x50, 0x43,
        0x7c, 0x54,
    ]),
    y: FieldElement([
        0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66,
    ]),
    z: FieldElement::ONE,
    t: FieldElement([
        0x47, 0x56, 0x98, 0x99, 0xc7, 0x61, 0x0a, 0x82, 0x1a, 0xdf, 0x82, 0x22, 0x1f, 0x2c, 0x72,
        0x88, 0xc3, 0x29, 0x09, 0x52, 0x78, 0xe9, 0x1e, 0xe4, 0x47, 0x4b, 0x4c, 0x81, 0xa6, 0x02,
        0xfd, 0x29,
    ]),
};

/// The order of the main subgroup generated by [`ED25519_BASEPOINT_POINT`]:
/// `2^252 + 27742317777372353535851937790883648493`.
pub const BASEPOINT_ORDER: Scalar = Scalar {
    bytes: [
        0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
        0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x10,
    ],
};

#[cfg(test)]
mod test {
    use super::*;
    use subtle::ConstantTimeEq;

    #[test]
    fn basepoint_lies_on_curve() {
        let g = ED25519_BASEPOINT_POINT;
        let (x, y) = g.to_affine();
        let reloaded = EdwardsPoint::from_affine(&x, &y).expect("basepoint must satisfy curve eq");
        assert_eq!(reloaded.ct_eq(&g).unwrap_u8(), 1);
    }
}
