//! Arithmetic in the scalar field `F_q`, where `q` is the order of the
//! curve's main subgroup:
//!
//! `q = 2^252 + 27742317777372353535851937790883648493`
//!
//! Unlike the base field, `F_q` is not a power-of-two-minus-small-delta
//! field, so multiplication reduces via Montgomery's method rather than
//! the `squeeze`/`freeze` trick used in [`crate::field`].

use core::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// `q`, little-endian bytes.
const Q: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// `2^512 mod q`, used to lift a Montgomery multiplication's result back
/// out of Montgomery domain (equivalently, to bring a plain integer into
/// Montgomery domain when multiplied by it once more).
const MONTGOMERY_R2: [u8; 32] = [
    0x01, 0x0f, 0x9c, 0x44, 0xe3, 0x11, 0x06, 0xa4, 0x47, 0x93, 0x85, 0x68, 0xa7, 0x1b, 0x0e, 0xd0,
    0x65, 0xbe, 0xf5, 0x17, 0xd2, 0x73, 0xec, 0xce, 0x3d, 0x9a, 0x30, 0x7c, 0x1b, 0x41, 0x99, 0x03,
];

/// `-q^-1 mod 256`, the Montgomery reduction constant for radix-256
/// digits (`q' = 27 = 0x1b`).
const Q_INV_NEG: u32 = 0x1b;

/// An element of `F_q`, the scalar field used for point multiplication.
///
/// Stored as 32 little-endian bytes, always in `[0, q)`: every
/// constructor and arithmetic operation on `Scalar` reduces its result
/// modulo `q` before returning, so a `Scalar` is always canonical.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scalar {
    pub(crate) bytes: [u8; 32],
}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl Drop for Scalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Scalar {
    /// The additive identity.
    pub const ZERO: Scalar = Scalar { bytes: [0u8; 32] };

    /// The multiplicative identity.
    pub const ONE: Scalar = Scalar {
        bytes: {
            let mut b = [0u8; 32];
            b[0] = 1;
            b
        },
    };

    /// Builds a scalar from arbitrary 32 little-endian bytes, reducing
    /// modulo `q` if necessary. Unlike `libuecc`'s raw accessors, this
    /// never leaves a `Scalar` outside `[0, q)`.
    pub fn from_bytes(bytes: [u8; 32]) -> Scalar {
        reduce(&bytes)
    }

    /// Returns the canonical little-endian byte encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Clamps a 32-byte secret key the way X25519/Ed25519 derive a
    /// scalar from a random seed: clear the low 3 bits (cofactor
    /// clearing), clear bit 255, and set bit 254. The result is *not*
    /// reduced modulo `q` (clamped scalars are deliberately larger than
    /// `q` alone would allow, to defend against small-subgroup and
    /// related attacks at the ladder level) and must be used with
    /// [`crate::edwards::EdwardsPoint::scalarmult_bits`] rather than
    /// [`Scalar`]'s own arithmetic.
    pub fn sanitize_secret(seed: &[u8; 32]) -> [u8; 32] {
        let mut out = *seed;
        out[0] &= 248;
        out[31] &= 127;
        out[31] |= 64;
        out
    }

    /// Returns whether this scalar is congruent to zero modulo `q`.
    ///
    /// Reduces first: `self.bytes` is already canonical for any `Scalar`
    /// obtained through this crate's own constructors, but a `bits`
    /// accumulator folded over a non-canonical representative (e.g.
    /// `q` itself, before reduction) would spuriously read as nonzero.
    /// The accumulator is also explicitly zero-initialized; an earlier
    /// revision of this routine (and of the C it was ported from) left
    /// it uninitialized, so a zero scalar could spuriously read as
    /// nonzero depending on stack garbage.
    pub fn is_zero(&self) -> Choice {
        let reduced = reduce(&self.bytes);
        let mut bits: u8 = 0;
        for &b in reduced.bytes.iter() {
            bits |= b;
        }
        Choice::from((bits == 0) as u8)
    }

    /// Montgomery multiplication of two 32-byte little-endian integers,
    /// each treated as 32 base-256 digits: computes
    /// `(a*b) * 256^-32 mod q` via the standard byte-wise CIOS
    /// reduction, matching `ec25519_secret.c`'s `montgomery`. The result
    /// is bounded by `[0, 2q)`, not necessarily canonical.
    fn montgomery_bytes(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
        // One extra limb holds carry overflow from each digit's two
        // inner passes (the product pass and the reduction pass).
        let mut t = [0u32; 33];

        for i in 0..32 {
            let a_i = a[i] as u32;

            let mut carry: u32 = 0;
            for j in 0..32 {
                let sum = t[j] + a_i * b[j] as u32 + carry;
                t[j] = sum & 0xff;
                carry = sum >> 8;
            }
            t[32] += carry;

            // m is the digit that makes `t + m*q` divisible by 256,
            // since `q' = -q^-1 mod 256 = Q_INV_NEG`.
            let m = (t[0] * Q_INV_NEG) & 0xff;

            let mut carry: u32 = 0;
            for j in 0..32 {
                let sum = t[j] + m * Q[j] as u32 + carry;
                t[j] = sum & 0xff;
                carry = sum >> 8;
            }
            t[32] += carry;

            // Divide the running total by 256 (it is now a multiple of
            // 256 by construction) by shifting the digit array down.
            for j in 0..32 {
                t[j] = t[j + 1];
            }
            t[32] = 0;
        }

        // Every limb but the last is re-masked to a byte on every
        // iteration above; only the final shift can leave `t[31]`
        // holding more than a byte (carried over from the otherwise
        // unmasked extra limb), so one more ripple-carry pass brings
        // the whole array back to canonical byte digits.
        let mut carry: u32 = 0;
        for j in 0..33 {
            let sum = t[j] + carry;
            t[j] = sum & 0xff;
            carry = sum >> 8;
        }

        let mut out = [0u8; 32];
        for j in 0..32 {
            out[j] = t[j] as u8;
        }
        out
    }

    /// Field multiplication via two Montgomery multiplications: first
    /// lifts `self` and (already-reduced) `other` out of the plain
    /// domain by multiplying with `R^2`, then reduces the intermediate
    /// back down, matching `ecc_25519_secret_mult`'s `montgomery(a, B)`
    /// followed by `montgomery(result, C)`. The second Montgomery
    /// multiplication's output lands in `[0, 2q)`, so the final result
    /// is brought back to the canonical `[0, q)` representative with one
    /// more reduction.
    pub fn mul(&self, other: &Scalar) -> Scalar {
        let step1 = Scalar::montgomery_bytes(&self.bytes, &other.bytes);
        let step2 = Scalar::montgomery_bytes(&step1, &MONTGOMERY_R2);
        reduce(&step2)
    }

    /// Scalar addition modulo `q`.
    pub fn add(&self, other: &Scalar) -> Scalar {
        let sum = add_bytes_with_carry(&self.bytes, &other.bytes);
        reduce_from_overflowed(&sum)
    }

    /// Scalar subtraction modulo `q`.
    pub fn sub(&self, other: &Scalar) -> Scalar {
        let neg_other = reduce_from_overflowed(&sub_bytes_borrow(&[0u8; 33], &{
            let mut ext = [0u8; 33];
            ext[..32].copy_from_slice(&other.bytes);
            ext
        }));
        self.add(&neg_other)
    }

    /// Negation modulo `q`.
    pub fn negate(&self) -> Scalar {
        Scalar::ZERO.sub(self)
    }
}

/// Adds two 32-byte little-endian integers into a 33-byte (carry-out)
/// buffer.
fn add_bytes_with_carry(a: &[u8; 32], b: &[u8; 32]) -> [u8; 33] {
    let mut out = [0u8; 33];
    let mut carry: u16 = 0;
    for i in 0..32 {
        let t = a[i] as u16 + b[i] as u16 + carry;
        out[i] = (t & 0xff) as u8;
        carry = t >> 8;
    }
    out[32] = carry as u8;
    out
}

/// Subtracts two 33-byte little-endian integers (`a - b`), returning the
/// 33-byte result; on underflow the top byte carries the two's-complement
/// borrow, matching `IS_NEGATIVE` in `ec25519_secret.c`.
fn sub_bytes_borrow(a: &[u8; 33], b: &[u8; 33]) -> [u8; 33] {
    let mut out = [0u8; 33];
    let mut borrow: i32 = 0;
    for i in 0..33 {
        let t = a[i] as i32 - b[i] as i32 - borrow;
        if t < 0 {
            out[i] = (t + 256) as u8;
            borrow = 1;
        } else {
            out[i] = t as u8;
            borrow = 0;
        }
    }
    out
}

/// Reduces a value already known to be less than `2q` (e.g. the sum of
/// two canonical scalars) modulo `q`, by conditionally subtracting `q`
/// once.
fn reduce_from_overflowed(sum: &[u8; 33]) -> Scalar {
    let mut q_ext = [0u8; 33];
    q_ext[..32].copy_from_slice(&Q);
    let diff = sub_bytes_borrow(sum, &q_ext);
    // diff's top byte is 0xff (as u8, from a negative i32) iff sum < q.
    let negative = Choice::from((diff[32] != 0) as u8);

    let mut sum32 = [0u8; 32];
    sum32.copy_from_slice(&sum[..32]);
    let mut diff32 = [0u8; 32];
    diff32.copy_from_slice(&diff[..32]);

    let bytes = conditional_select_bytes(&sum32, &diff32, !negative);
    Scalar { bytes }
}

fn conditional_select_bytes(a: &[u8; 32], b: &[u8; 32], choice: Choice) -> [u8; 32] {
    let mut out = [0u8; 32];
    for i in 0..32 {
        out[i] = u8::conditional_select(&a[i], &b[i], choice);
    }
    out
}

/// General-purpose reduction of an arbitrary 32-byte value modulo `q`,
/// used by [`Scalar::from_bytes`]. Estimates the quotient from the top
/// nibble (`q` occupies slightly more than 252 bits, so the quotient is
/// at most 16) and corrects by trying both `nq` and `nq - 1`, matching
/// `ec25519_secret.c`'s `reduce`.
fn reduce(value: &[u8; 32]) -> Scalar {
    let nq = (value[31] >> 4) as i32;

    let mut v_ext = [0u8; 33];
    v_ext[..32].copy_from_slice(value);

    let try_reduce = |nq: i32| -> ([u8; 33], bool) {
        let mut nq_q = [0u8; 33];
        let mut carry: u32 = 0;
        for i in 0..32 {
            let t = nq as u32 * Q[i] as u32 + carry;
            nq_q[i] = (t & 0xff) as u8;
            carry = t >> 8;
        }
        nq_q[32] = carry as u8;
        let diff = sub_bytes_borrow(&v_ext, &nq_q);
        let negative = diff[32] != 0;
        (diff, negative)
    };

    let (diff_nq, neg_nq) = try_reduce(nq);
    let bytes = if !neg_nq {
        let mut out = [0u8; 32];
        out.copy_from_slice(&diff_nq[..32]);
        out
    } else {
        let (diff_nq_1, _neg) = try_reduce(nq - 1);
        let mut out = [0u8; 32];
        out.copy_from_slice(&diff_nq_1[..32]);
        out
    };

    Scalar { bytes }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Scalar {
            bytes: conditional_select_bytes(&a.bytes, &b.bytes, choice),
        }
    }
}

impl Add for Scalar {
    type Output = Scalar;
    fn add(self, other: Scalar) -> Scalar {
        Scalar::add(&self, &other)
    }
}

impl Sub for Scalar {
    type Output = Scalar;
    fn sub(self, other: Scalar) -> Scalar {
        Scalar::sub(&self, &other)
    }
}

impl Mul for Scalar {
    type Output = Scalar;
    fn mul(self, other: Scalar) -> Scalar {
        Scalar::mul(&self, &other)
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar::negate(&self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_is_zero() {
        assert_eq!(Scalar::ZERO.is_zero().unwrap_u8(), 1);
        assert_eq!(Scalar::ONE.is_zero().unwrap_u8(), 0);
    }

    #[test]
    fn from_bytes_reduces_q_to_zero() {
        let s = Scalar::from_bytes(Q);
        assert_eq!(s.is_zero().unwrap_u8(), 1);
    }

    #[test]
    fn add_sub_roundtrip() {
        let a = Scalar::from_bytes([7u8; 32].map(|b| b & 0x0f));
        let b = Scalar::ONE;
        let sum = a.add(&b);
        let back = sum.sub(&b);
        assert_eq!(back.ct_eq(&a).unwrap_u8(), 1);
    }

    #[test]
    fn mul_identity() {
        let a = Scalar::from_bytes([3u8; 32].map(|b| b & 0x0f));
        let product = a.mul(&Scalar::ONE);
        assert_eq!(product.ct_eq(&a).unwrap_u8(), 1);
    }

    #[test]
    fn mul_zero_is_zero() {
        let a = Scalar::from_bytes([5u8; 32].map(|b| b & 0x0f));
        let product = a.mul(&Scalar::ZERO);
        assert_eq!(product.is_zero().unwrap_u8(), 1);
    }

    #[test]
    fn negate_then_add_is_zero() {
        let a = Scalar::from_bytes([9u8; 32].map(|b| b & 0x0f));
        let sum = a.add(&a.negate());
        assert_eq!(sum.is_zero().unwrap_u8(), 1);
    }

    #[test]
    fn sanitize_secret_clears_and_sets_expected_bits() {
        let seed = [0xffu8; 32];
        let clamped = Scalar::sanitize_secret(&seed);
        assert_eq!(clamped[0] & 0x07, 0);
        assert_eq!(clamped[31] & 0x80, 0);
        assert_eq!(clamped[31] & 0x40, 0x40);
    }
}
