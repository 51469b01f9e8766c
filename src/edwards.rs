//! Arithmetic on the twisted Edwards curve `a*x^2 + y^2 = 1 + d*x^2*y^2`
//! with `a = 486664`, `d = 486660` over `F_p`, `p = 2^255 - 19`.
//!
//! Points are held in extended projective coordinates `(X:Y:Z:T)`
//! representing affine `(X/Z, Y/Z)` with the invariant `T = X*Y/Z`. This
//! curve is birationally equivalent to the Montgomery curve used by
//! Curve25519. Formulas are taken from
//! <http://hyperelliptic.org/EFD/g1p/auto-twisted-extended.html>,
//! specialized to this `(a, d)`, matching `libuecc`'s
//! `ecc_25519_double`/`ecc_25519_add`.

use core::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::constants;
use crate::field::FieldElement;
use crate::scalar::Scalar;

/// A point of the curve, held in extended projective coordinates.
///
/// The internal representation is not unique (`(X:Y:Z:T)` and
/// `(lambda*X:lambda*Y:lambda*Z:lambda*T)` denote the same point for any
/// nonzero `lambda`), so only [`CompressedEdwardsY`] is canonical.
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

/// The packed (compressed) encoding of a point: 32 bytes, little-endian.
/// Bits 0..254 hold the x-coordinate; bit 255 holds the low bit ("sign")
/// of y.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl EdwardsPoint {
    /// The identity element, `(0:1:1:0)`.
    pub fn identity() -> EdwardsPoint {
        constants::IDENTITY
    }

    /// The default base point (generator), whose packed encoding decodes
    /// to affine `y = 4/5`. Its order is [`constants::BASEPOINT_ORDER`].
    pub fn default_base() -> EdwardsPoint {
        constants::ED25519_BASEPOINT_POINT
    }

    /// Loads a point from affine coordinates, verifying that it lies on
    /// the curve. Returns `None` if `(x, y)` does not satisfy the curve
    /// equation.
    pub fn from_affine(x: &[u8; 32], y: &[u8; 32]) -> Option<EdwardsPoint> {
        let x = FieldElement::from_bytes(x);
        let y = FieldElement::from_bytes(y);
        let z = FieldElement::ONE;

        let x2 = x.square();
        let y2 = y.square();
        let ax2 = x2.mul_small(constants::EDWARDS_A);
        let dx2 = x2.mul_small(constants::EDWARDS_D);
        let dx2y2 = dx2.mul(&y2);
        let ax2_y2 = ax2.add(&y2);
        let one_dx2y2 = FieldElement::ONE.add(&dx2y2);
        let residual = ax2_y2.sub(&one_dx2y2).squeeze();

        if residual.is_zero().unwrap_u8() == 0 {
            return None;
        }

        let t = x.mul(&y);
        Some(EdwardsPoint { x, y, z, t })
    }

    /// Recovers the affine `(x, y)` coordinates of a point, each frozen
    /// into canonical `[0, p)` little-endian bytes.
    pub fn to_affine(&self) -> ([u8; 32], [u8; 32]) {
        let z_inv = self.z.invert();
        let x = self.x.mul(&z_inv).to_bytes();
        let y = self.y.mul(&z_inv).to_bytes();
        (x, y)
    }

    /// Decodes a packed point, recovering `y` from the curve equation
    /// (`y^2 = (1 - a*x^2) / (1 - d*x^2)`) and selecting the root whose
    /// parity matches the packed sign bit. Returns `None` if the packed
    /// `x` has no corresponding `y`.
    pub fn decompress(packed: &CompressedEdwardsY) -> Option<EdwardsPoint> {
        let mut x_bytes = packed.0;
        let sign = (x_bytes[31] >> 7) & 1;
        x_bytes[31] &= 0x7f;

        let x = FieldElement::from_bytes(&x_bytes);
        let z = FieldElement::ONE;

        let x2 = x.square();
        let ax2 = x2.mul_small(constants::EDWARDS_A);
        let dx2 = x2.mul_small(constants::EDWARDS_D);
        let one_minus_ax2 = FieldElement::ONE.sub(&ax2).squeeze();
        let one_minus_dx2 = FieldElement::ONE.sub(&dx2).squeeze();
        let inv = one_minus_dx2.invert();
        let y2 = one_minus_ax2.mul(&inv);

        let (y, ok) = y2.sqrt();
        if ok.unwrap_u8() == 0 {
            return None;
        }

        let y_neg = FieldElement::ZERO.sub(&y);
        let y_bytes = y.to_bytes();
        let want_neg = Choice::from(sign ^ (y_bytes[0] & 1));
        let y = FieldElement::conditional_select(&y, &y_neg, want_neg);

        let t = x.mul(&y);
        Some(EdwardsPoint { x, y, z, t })
    }

    /// Packs a point into its canonical 32-byte encoding.
    pub fn compress(&self) -> CompressedEdwardsY {
        let (x, y) = self.to_affine();
        let mut out = x;
        out[31] |= y[0] << 7;
        CompressedEdwardsY(out)
    }

    /// Returns whether `self` is the identity element of the group.
    pub fn is_identity(&self) -> Choice {
        let y_z = self.y.sub(&self.z).squeeze();
        self.x.is_zero() & y_z.is_zero()
    }

    /// Doubles a point. Equivalent to, but faster than, `self.add(self)`.
    pub fn double(&self) -> EdwardsPoint {
        let a = self.x.square();
        let b = self.y.square();
        let c = self.z.square().mul_small(2);
        let d = a.mul_small(constants::EDWARDS_A);
        let e = {
            let sum = self.x.add(&self.y).square();
            sum.sub(&a).sub(&b)
        };
        let g = d.add(&b);
        let f = g.sub(&c);
        let h = d.sub(&b);

        EdwardsPoint {
            x: e.mul(&f),
            y: g.mul(&h),
            z: f.mul(&g),
            t: e.mul(&h),
        }
    }

    /// Adds two points, using the complete addition formula for this
    /// curve.
    pub fn add_points(&self, other: &EdwardsPoint) -> EdwardsPoint {
        let a = self.x.mul(&other.x);
        let b = self.y.mul(&other.y);
        let c = self.t.mul(&other.t.mul_small(constants::EDWARDS_D));
        let d = self.z.mul(&other.z);
        let e = {
            let sum = self.x.add(&self.y).mul(&other.x.add(&other.y));
            sum.sub(&a).sub(&b)
        };
        let f = d.sub(&c);
        let g = d.add(&c);
        let h = b.sub(&a.mul_small(constants::EDWARDS_A));

        EdwardsPoint {
            x: e.mul(&f),
            y: g.mul(&h),
            z: f.mul(&g),
            t: e.mul(&h),
        }
    }

    /// Variable-base scalar multiplication via a fixed-length,
    /// constant-time double-and-always-add ladder processing `n` from
    /// bit `bits - 1` down to bit 0. `bits` is clamped to 256.
    ///
    /// `bits` must be the same compile-time-known value across call
    /// sites operating on scalars that should be indistinguishable by
    /// timing; varying it at runtime based on secret data defeats the
    /// constant-time guarantee.
    pub fn scalarmult_bits(&self, n: &[u8; 32], bits: u32) -> EdwardsPoint {
        let bits = if bits > 256 { 256 } else { bits };
        let mut cur = EdwardsPoint::identity();

        for pos in (0..bits).rev() {
            let byte = n[(pos / 8) as usize];
            let bit = (byte >> (pos % 8)) & 1;

            let doubled = cur.double();
            let added = doubled.add_points(self);
            cur = EdwardsPoint::conditional_select(&doubled, &added, Choice::from(bit));
        }

        cur
    }

    /// Variable-base scalar multiplication by a full 256-bit scalar.
    pub fn scalarmult(&self, n: &Scalar) -> EdwardsPoint {
        self.scalarmult_bits(&n.to_bytes(), 256)
    }

    /// Fixed-base scalar multiplication against [`Self::default_base`],
    /// processing `n` from bit `bits - 1` down to bit 0. `bits` is
    /// clamped to 256, matching `ecc_25519_scalarmult_base_bits`.
    pub fn scalarmult_base_bits(n: &[u8; 32], bits: u32) -> EdwardsPoint {
        EdwardsPoint::default_base().scalarmult_bits(n, bits)
    }

    /// Fixed-base scalar multiplication against [`Self::default_base`] by
    /// a full 256-bit scalar, matching `ecc_25519_scalarmult_base`.
    pub fn scalarmult_base(n: &Scalar) -> EdwardsPoint {
        EdwardsPoint::scalarmult_base_bits(&n.to_bytes(), 256)
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;
    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            x: FieldElement::ZERO.sub(&self.x),
            y: self.y,
            z: self.z,
            t: FieldElement::ZERO.sub(&self.t),
        }
    }
}

impl Neg for &EdwardsPoint {
    type Output = EdwardsPoint;
    fn neg(self) -> EdwardsPoint {
        -(*self)
    }
}

impl Add for EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: EdwardsPoint) -> EdwardsPoint {
        self.add_points(&other)
    }
}

impl Add<&EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &EdwardsPoint) -> EdwardsPoint {
        self.add_points(other)
    }
}

impl Sub for EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: EdwardsPoint) -> EdwardsPoint {
        self.add_points(&(-other))
    }
}

impl Sub<&EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &EdwardsPoint) -> EdwardsPoint {
        self.add_points(&(-other))
    }
}

impl Mul<&Scalar> for &EdwardsPoint {
    type Output = EdwardsPoint;
    fn mul(self, scalar: &Scalar) -> EdwardsPoint {
        self.scalarmult(scalar)
    }
}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        EdwardsPoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t: FieldElement::conditional_select(&a.t, &b.t, choice),
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    /// Projective equality: `(X1, Y1, Z1) ~ (X2, Y2, Z2)` iff
    /// `X1*Z2 == X2*Z1` and `Y1*Z2 == Y2*Z1`, independent of the (not
    /// unique) scaling factor each side carries.
    fn ct_eq(&self, other: &Self) -> Choice {
        let x1z2 = self.x.mul(&other.z).squeeze();
        let x2z1 = other.x.mul(&self.z).squeeze();
        let y1z2 = self.y.mul(&other.z).squeeze();
        let y2z1 = other.y.mul(&self.z).squeeze();
        x1z2.ct_eq(&x2z1) & y1z2.ct_eq(&y2z1)
    }
}

impl CompressedEdwardsY {
    /// Attempts to decompress this encoding into a curve point.
    pub fn decompress(&self) -> Option<EdwardsPoint> {
        EdwardsPoint::decompress(self)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn one_scalar(n: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        Scalar::from_bytes(bytes)
    }

    #[test]
    fn identity_roundtrip() {
        let id = EdwardsPoint::identity();
        assert_eq!(id.is_identity().unwrap_u8(), 1);
        let compressed = id.compress();
        let back = compressed.decompress().unwrap();
        assert_eq!(back.ct_eq(&id).unwrap_u8(), 1);
    }

    #[test]
    fn double_equals_add_self() {
        let g = EdwardsPoint::default_base();
        let doubled = g.double();
        let added = g.add_points(&g);
        assert_eq!(doubled.ct_eq(&added).unwrap_u8(), 1);
    }

    #[test]
    fn add_is_commutative() {
        let g = EdwardsPoint::default_base();
        let g2 = g.double();
        let g3 = g2.add_points(&g);
        let ab = g.add_points(&g2);
        let ba = g2.add_points(&g);
        assert_eq!(ab.ct_eq(&ba).unwrap_u8(), 1);
        let _ = g3;
    }

    #[test]
    fn negate_then_add_is_identity() {
        let g = EdwardsPoint::default_base();
        let neg_g = -g;
        let sum = g.add_points(&neg_g);
        assert_eq!(sum.is_identity().unwrap_u8(), 1);
    }

    #[test]
    fn scalarmult_zero_and_one() {
        let g = EdwardsPoint::default_base();
        let zero = g.scalarmult(&one_scalar(0));
        assert_eq!(zero.is_identity().unwrap_u8(), 1);

        let one = g.scalarmult(&one_scalar(1));
        assert_eq!(one.ct_eq(&g).unwrap_u8(), 1);

        let two = g.scalarmult(&one_scalar(2));
        assert_eq!(two.ct_eq(&g.double()).unwrap_u8(), 1);
    }

    #[test]
    fn base_point_packs_to_its_affine_x_with_ys_parity_as_sign() {
        let g = EdwardsPoint::default_base();
        let (x, y) = g.to_affine();
        let packed = g.compress();

        let mut expected = x;
        expected[31] |= y[0] << 7;
        assert_eq!(packed.0, expected);
    }
}
