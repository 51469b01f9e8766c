//! Serial, radix-256 implementation of arithmetic in the base field
//! `F_p` for `p = 2^255 - 19`.
//!
//! A field element is stored as 32 limbs, each logically a base-256
//! digit: the value is `sum(limb[i] * 256^i for i in 0..32)`. Between
//! operations a limb is only guaranteed to be *squeezed* (value in
//! `[0, 2p)`, each limb well below `2^8` except the top limb, which can
//! transiently run to a few hundred thousand during an unreduced
//! intermediate sum); `freeze` additionally canonicalizes into `[0, p)`
//! with exactly one byte per limb. `mul`, `square`, `mul_small` and
//! `squeeze` all leave their result squeezed; `add`/`sub` do not.
//!
//! This representation and the algorithms below are a direct port of
//! `ecc_25519_gf_*`-adjacent helpers in `libuecc`'s `src/ec25519.c`.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// A base-field element, stored as 32 radix-256 limbs.
///
/// Internal representation only — base-field arithmetic is not part of
/// this crate's public surface.
#[derive(Copy, Clone)]
pub(crate) struct FieldElement(pub(crate) [u32; 32]);

/// Canonical big-endian... no: little-endian byte form of `p`, one byte
/// per limb, used by `is_zero` to recognize the "canonical p" residue
/// class of zero that can appear after `squeeze` but before `freeze`.
const P_LIMBS: [u32; 32] = [
    0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f,
];

/// `-p mod 2^256 = 2^255 + 19`, used by `freeze`.
const MINUS_P: [u32; 32] = {
    let mut limbs = [0u32; 32];
    limbs[0] = 19;
    limbs[31] = 128;
    limbs
};

/// `-1 mod p`, used as the target for the square-root residuosity check.
const MINUS_ONE_LIMBS: [u32; 32] = [
    0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f,
];

/// `sqrt(-1) mod p`, a fixed constant (conventionally named ρ) used to
/// correct square-root candidates when the input is a square times -1.
const RHO_BYTES: [u8; 32] = [
    0xb0, 0xa0, 0x0e, 0x4a, 0x27, 0x1b, 0xee, 0xc4, 0x78, 0xe4, 0x2f, 0xad, 0x06, 0x18, 0x43, 0x2f,
    0xa7, 0xd7, 0xfb, 0x3d, 0x99, 0x00, 0x4d, 0x2b, 0x0b, 0xdf, 0xc1, 0x4f, 0x80, 0x24, 0x83, 0x2b,
];

/// Constant-time select over raw limb arrays: `a` if `choice == 0`, `b`
/// if `choice == 1`, matching `subtle::ConditionallySelectable`'s
/// contract. The mask is `0 - bit`, per the design note on replacing
/// secret-dependent branches with wrapping-arithmetic masks.
#[inline]
fn select_limbs(a: &[u32; 32], b: &[u32; 32], choice: Choice) -> [u32; 32] {
    let mask = (choice.unwrap_u8() as u32).wrapping_neg();
    let mut out = [0u32; 32];
    for i in 0..32 {
        out[i] = (b[i] & mask) | (a[i] & !mask);
    }
    out
}

/// Folds an XOR-difference of two limb arrays into a single "are these
/// equal" `Choice`, independent of which limbs differ.
fn check_equal(x: &[u32; 32], y: &[u32; 32]) -> Choice {
    let mut differentbits: u32 = 0;
    for i in 0..32 {
        let d = x[i] ^ y[i];
        differentbits |= d & 0xffff;
        differentbits |= d >> 16;
    }
    Choice::from((1u32 & (differentbits.wrapping_sub(1) >> 16)) as u8)
}

impl FieldElement {
    pub(crate) const ZERO: FieldElement = FieldElement([0u32; 32]);

    pub(crate) const ONE: FieldElement = {
        let mut limbs = [0u32; 32];
        limbs[0] = 1;
        FieldElement(limbs)
    };

    /// `sqrt(-1) mod p`.
    pub(crate) fn sqrt_m1() -> FieldElement {
        FieldElement::from_bytes(&RHO_BYTES)
    }

    /// Loads a field element from its 32-byte little-endian encoding.
    ///
    /// Every byte value fits directly into a squeezed limb; no carry
    /// propagation is required (this mirrors `ecc_25519_load_xy`/
    /// `ecc_25519_load_packed`, which copy packed bytes straight into
    /// the unpacked limb array).
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        let mut limbs = [0u32; 32];
        for i in 0..32 {
            limbs[i] = bytes[i] as u32;
        }
        FieldElement(limbs)
    }

    /// Adds two field elements. Output is not squeezed.
    pub(crate) fn add(&self, other: &FieldElement) -> FieldElement {
        let (a, b) = (&self.0, &other.0);
        let mut out = [0u32; 32];
        let mut u: u32 = 0;
        for j in 0..31 {
            u = u.wrapping_add(a[j]).wrapping_add(b[j]);
            out[j] = u & 255;
            u >>= 8;
        }
        u = u.wrapping_add(a[31]).wrapping_add(b[31]);
        out[31] = u;
        FieldElement(out)
    }

    /// Subtracts two field elements. `other` must be squeezed. Output is
    /// safe to feed into `squeeze`, `mul` or `square`.
    pub(crate) fn sub(&self, other: &FieldElement) -> FieldElement {
        let (a, b) = (&self.0, &other.0);
        let mut out = [0u32; 32];
        let mut u: u32 = 218;
        for j in 0..31 {
            u = u
                .wrapping_add(a[j])
                .wrapping_add(65280)
                .wrapping_sub(b[j]);
            out[j] = u & 255;
            u >>= 8;
        }
        u = u.wrapping_add(a[31]).wrapping_sub(b[31]);
        out[31] = u;
        FieldElement(out)
    }

    /// Two-pass carry propagation, folding the overflow above `2^255`
    /// back in via `2^256 = 2 * 2^255 = 38 (mod p)`. Result lies in
    /// `[0, 2p)`.
    pub(crate) fn squeeze(&self) -> FieldElement {
        let mut a = self.0;
        let mut u: u32 = 0;
        for j in 0..31 {
            u = u.wrapping_add(a[j]);
            a[j] = u & 255;
            u >>= 8;
        }
        u = u.wrapping_add(a[31]);
        a[31] = u & 127;
        u = 19u32.wrapping_mul(u >> 7);

        for j in 0..31 {
            u = u.wrapping_add(a[j]);
            a[j] = u & 255;
            u >>= 8;
        }
        u = u.wrapping_add(a[31]);
        a[31] = u;
        FieldElement(a)
    }

    /// Canonicalizes a squeezed field element into `[0, p)`, one byte per
    /// limb. `self` must already be squeezed.
    pub(crate) fn freeze(&self) -> FieldElement {
        let aorig = self.0;
        let mut a = self.add(&FieldElement(MINUS_P)).0;
        let negative = 0u32.wrapping_sub((a[31] >> 7) & 1);
        for j in 0..32 {
            a[j] ^= negative & (aorig[j] ^ a[j]);
        }
        FieldElement(a)
    }

    /// Returns the 32-byte little-endian encoding of a frozen field
    /// element (one byte per limb).
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        let frozen = self.freeze();
        let mut out = [0u8; 32];
        for i in 0..32 {
            out[i] = frozen.0[i] as u8;
        }
        out
    }

    /// Schoolbook 32x32 product folded by `2^256 = 38 (mod p)`. Result is
    /// squeezed.
    pub(crate) fn mul(&self, other: &FieldElement) -> FieldElement {
        let (a, b) = (&self.0, &other.0);
        let mut out = [0u32; 32];
        for i in 0..32 {
            let mut u: u32 = 0;
            for j in 0..=i {
                u = u.wrapping_add(a[j].wrapping_mul(b[i - j]));
            }
            for j in (i + 1)..32 {
                u = u.wrapping_add(38u32.wrapping_mul(a[j]).wrapping_mul(b[i + 32 - j]));
            }
            out[i] = u;
        }
        FieldElement(out).squeeze()
    }

    /// Multiplies by a small (non-secret) integer, e.g. a curve
    /// parameter. Result is squeezed.
    pub(crate) fn mul_small(&self, n: u32) -> FieldElement {
        let a = &self.0;
        let mut out = [0u32; 32];
        let mut u: u32 = 0;
        for j in 0..31 {
            u = u.wrapping_add(n.wrapping_mul(a[j]));
            out[j] = u & 255;
            u >>= 8;
        }
        u = u.wrapping_add(n.wrapping_mul(a[31]));
        out[31] = u & 127;
        u = 19u32.wrapping_mul(u >> 7);

        for j in 0..31 {
            u = u.wrapping_add(out[j]);
            out[j] = u & 255;
            u >>= 8;
        }
        u = u.wrapping_add(out[31]);
        out[31] = u;
        FieldElement(out)
    }

    /// Squares a field element, pairing symmetric cross terms. Result is
    /// squeezed.
    pub(crate) fn square(&self) -> FieldElement {
        let a = &self.0;
        let mut out = [0u32; 32];
        for i in 0..32 {
            let mut u: u32 = 0;

            let mut j = 0usize;
            while j < i - j {
                u = u.wrapping_add(a[j].wrapping_mul(a[i - j]));
                j += 1;
            }

            let mut j = i + 1;
            while j < i + 32 - j {
                u = u.wrapping_add(38u32.wrapping_mul(a[j]).wrapping_mul(a[i + 32 - j]));
                j += 1;
            }

            u = u.wrapping_mul(2);

            if i & 1 == 0 {
                u = u.wrapping_add(a[i / 2].wrapping_mul(a[i / 2]));
                u = u.wrapping_add(38u32.wrapping_mul(a[i / 2 + 16]).wrapping_mul(a[i / 2 + 16]));
            }

            out[i] = u;
        }
        FieldElement(out).squeeze()
    }

    /// Constant-time zero test. `self` must be squeezed: accepts both
    /// canonical `0` and canonical `p` (both represent `0 mod p` before
    /// `freeze`).
    pub(crate) fn is_zero(&self) -> Choice {
        check_equal(&self.0, &[0u32; 32]) | check_equal(&self.0, &P_LIMBS)
    }

    /// Fixed Bernstein addition chain computing `z^(p-2) = z^-1`.
    /// `recip(0) = 0`, which is well-defined since `0^(p-2) = 0`.
    pub(crate) fn invert(&self) -> FieldElement {
        let z = self;
        let z2 = z.square(); /* 2 */
        let t1 = z2.square(); /* 4 */
        let t0 = t1.square(); /* 8 */
        let z9 = t0.mul(z); /* 9 */
        let z11 = z9.mul(&z2); /* 11 */
        let t0 = z11.square(); /* 22 */
        let z2_5_0 = t0.mul(&z9); /* 2^5 - 2^0 = 31 */

        let t0 = z2_5_0.square(); /* 2^6 - 2^1 */
        let t1 = t0.square(); /* 2^7 - 2^2 */
        let t0 = t1.square(); /* 2^8 - 2^3 */
        let t1 = t0.square(); /* 2^9 - 2^4 */
        let t0 = t1.square(); /* 2^10 - 2^5 */
        let z2_10_0 = t0.mul(&z2_5_0); /* 2^10 - 2^0 */

        let mut t0 = z2_10_0.square(); /* 2^11 - 2^1 */
        let mut t1 = t0.square(); /* 2^12 - 2^2 */
        let mut i = 2;
        while i < 10 {
            t0 = t1.square();
            t1 = t0.square();
            i += 2;
        } /* 2^20 - 2^10 */
        let z2_20_0 = t1.mul(&z2_10_0); /* 2^20 - 2^0 */

        t0 = z2_20_0.square(); /* 2^21 - 2^1 */
        t1 = t0.square(); /* 2^22 - 2^2 */
        i = 2;
        while i < 20 {
            t0 = t1.square();
            t1 = t0.square();
            i += 2;
        } /* 2^40 - 2^20 */
        let mut t0 = t1.mul(&z2_20_0); /* 2^40 - 2^0 */

        let mut t1 = t0.square(); /* 2^41 - 2^1 */
        t0 = t1.square(); /* 2^42 - 2^2 */
        i = 2;
        while i < 10 {
            t1 = t0.square();
            t0 = t1.square();
            i += 2;
        } /* 2^50 - 2^10 */
        let z2_50_0 = t0.mul(&z2_10_0); /* 2^50 - 2^0 */

        t0 = z2_50_0.square(); /* 2^51 - 2^1 */
        t1 = t0.square(); /* 2^52 - 2^2 */
        i = 2;
        while i < 50 {
            t0 = t1.square();
            t1 = t0.square();
            i += 2;
        } /* 2^100 - 2^50 */
        let z2_100_0 = t1.mul(&z2_50_0); /* 2^100 - 2^0 */

        t1 = z2_100_0.square(); /* 2^101 - 2^1 */
        t0 = t1.square(); /* 2^102 - 2^2 */
        i = 2;
        while i < 100 {
            t1 = t0.square();
            t0 = t1.square();
            i += 2;
        } /* 2^200 - 2^100 */
        let mut t1 = t0.mul(&z2_100_0); /* 2^200 - 2^0 */

        t0 = t1.square(); /* 2^201 - 2^1 */
        t1 = t0.square(); /* 2^202 - 2^2 */
        i = 2;
        while i < 50 {
            t0 = t1.square();
            t1 = t0.square();
            i += 2;
        } /* 2^250 - 2^50 */
        let t0 = t1.mul(&z2_50_0); /* 2^250 - 2^0 */

        let t1 = t0.square(); /* 2^251 - 2^1 */
        let t0 = t1.square(); /* 2^252 - 2^2 */
        let t1 = t0.square(); /* 2^253 - 2^3 */
        let t0 = t1.square(); /* 2^254 - 2^4 */
        let t1 = t0.square(); /* 2^255 - 2^5 */
        t1.mul(&z11) /* 2^255 - 21 */
    }

    /// Computes a square root modulo `p` via `z^((p+3)/8) = z^(2^252-2)`,
    /// correcting by `ρ = sqrt(-1)` when the naive candidate's square is
    /// `-z` rather than `z`. Returns `(root, Choice::from(1))` when `z`
    /// is a quadratic residue, `(_, Choice::from(0))` otherwise (the
    /// first component is then unspecified and must not be used).
    pub(crate) fn sqrt(&self) -> (FieldElement, Choice) {
        let z = self;
        let z2 = z.square(); /* 2 */
        let t1 = z2.square(); /* 4 */
        let t0 = t1.square(); /* 8 */
        let z9 = t0.mul(z); /* 9 */
        let z11 = z9.mul(&z2); /* 11 */
        let t0 = z11.square(); /* 22 */
        let z2_5_0 = t0.mul(&z9); /* 2^5 - 2^0 = 31 */

        let t0 = z2_5_0.square();
        let t1 = t0.square();
        let t0 = t1.square();
        let t1 = t0.square();
        let t0 = t1.square();
        let z2_10_0 = t0.mul(&z2_5_0); /* 2^10 - 2^0 */

        let mut t0 = z2_10_0.square();
        let mut t1 = t0.square();
        let mut i = 2;
        while i < 10 {
            t0 = t1.square();
            t1 = t0.square();
            i += 2;
        }
        let z2_20_0 = t1.mul(&z2_10_0); /* 2^20 - 2^0 */

        t0 = z2_20_0.square();
        t1 = t0.square();
        i = 2;
        while i < 20 {
            t0 = t1.square();
            t1 = t0.square();
            i += 2;
        }
        let mut t0 = t1.mul(&z2_20_0); /* 2^40 - 2^0 */

        let mut t1 = t0.square();
        t0 = t1.square();
        i = 2;
        while i < 10 {
            t1 = t0.square();
            t0 = t1.square();
            i += 2;
        }
        let z2_50_0 = t0.mul(&z2_10_0); /* 2^50 - 2^0 */

        t0 = z2_50_0.square();
        t1 = t0.square();
        i = 2;
        while i < 50 {
            t0 = t1.square();
            t1 = t0.square();
            i += 2;
        }
        let z2_100_0 = t1.mul(&z2_50_0); /* 2^100 - 2^0 */

        t1 = z2_100_0.square();
        t0 = t1.square();
        i = 2;
        while i < 100 {
            t1 = t0.square();
            t0 = t1.square();
            i += 2;
        }
        let mut t1 = t0.mul(&z2_100_0); /* 2^200 - 2^0 */

        t0 = t1.square();
        t1 = t0.square();
        i = 2;
        while i < 50 {
            t0 = t1.square();
            t1 = t0.square();
            i += 2;
        }
        let t0 = t1.mul(&z2_50_0); /* 2^250 - 2^0 */

        let t1 = t0.square(); /* 2^251 - 2^1 */
        let t0 = t1.square(); /* 2^252 - 2^2 */
        let z2_252_1 = t0.mul(&z2); /* 2^252 - 2^1 */

        let t1 = t0.square(); /* 2^253 - 2^3 */
        let t0 = t1.mul(&z2); /* 2^253 - 6 */
        let t1 = t0.mul(z); /* 2^253 - 5 */

        let rho = FieldElement::sqrt_m1();
        let z2_252_1_rho = z2_252_1.mul(&rho);

        let is_minus_one = check_equal(&t1.0, &MINUS_ONE_LIMBS);
        let out = FieldElement(select_limbs(
            &z2_252_1.0,
            &z2_252_1_rho.0,
            is_minus_one,
        ));

        let check = out.square();
        let ok = check_equal(&check.0, &z.0);
        (out, ok)
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        check_equal(&self.0, &other.0)
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        FieldElement(select_limbs(&a.0, &b.0, choice))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn one() -> FieldElement {
        FieldElement::ONE
    }

    #[test]
    fn add_commutative_and_associative() {
        let a = FieldElement::from_bytes(&[7u8; 32]).squeeze();
        let b = FieldElement::from_bytes(&[11u8; 32]).squeeze();
        let c = FieldElement::from_bytes(&[3u8; 32]).squeeze();

        let ab = a.add(&b).freeze().to_bytes();
        let ba = b.add(&a).freeze().to_bytes();
        assert_eq!(ab, ba);

        let ab_c = a.add(&b).add(&c).freeze().to_bytes();
        let a_bc = a.add(&b.add(&c)).freeze().to_bytes();
        assert_eq!(ab_c, a_bc);
    }

    #[test]
    fn mul_identity_and_zero() {
        let a = FieldElement::from_bytes(&[42u8; 32]).squeeze();
        assert_eq!(a.mul(&one()).freeze().to_bytes(), a.freeze().to_bytes());
        assert_eq!(
            a.mul(&FieldElement::ZERO).freeze().to_bytes(),
            FieldElement::ZERO.to_bytes()
        );
    }

    #[test]
    fn square_matches_mul() {
        let a = FieldElement::from_bytes(&[200u8, 3, 99, 5, 1, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]).squeeze();
        assert_eq!(
            a.square().freeze().to_bytes(),
            a.mul(&a).freeze().to_bytes()
        );
    }

    #[test]
    fn invert_is_involution_and_identity() {
        let a = FieldElement::from_bytes(&[9u8; 32]).squeeze();
        let inv = a.invert();
        assert_eq!(
            a.mul(&inv).freeze().to_bytes(),
            FieldElement::ONE.to_bytes()
        );
        assert_eq!(
            inv.invert().freeze().to_bytes(),
            a.freeze().to_bytes()
        );
    }

    #[test]
    fn freeze_is_idempotent() {
        let a = FieldElement::from_bytes(&[0xffu8; 32]);
        let once = a.freeze();
        let twice = once.freeze();
        assert_eq!(once.to_bytes(), twice.to_bytes());
    }

    #[test]
    fn sqrt_of_four_is_two() {
        let four = FieldElement::from_bytes(&{
            let mut b = [0u8; 32];
            b[0] = 4;
            b
        });
        let (root, ok) = four.sqrt();
        assert_eq!(ok.unwrap_u8(), 1);
        let square_back = root.square();
        assert_eq!(square_back.freeze().to_bytes(), four.freeze().to_bytes());
    }

    #[test]
    fn is_zero_accepts_p_and_zero() {
        assert_eq!(FieldElement::ZERO.is_zero().unwrap_u8(), 1);
        assert_eq!(FieldElement(P_LIMBS).is_zero().unwrap_u8(), 1);
        assert_eq!(FieldElement::ONE.is_zero().unwrap_u8(), 0);
    }
}
