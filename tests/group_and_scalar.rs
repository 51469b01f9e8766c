//! Integration tests exercising the public API as an external crate
//! would: scalar/point round trips, Diffie-Hellman consistency, and the
//! base point's order.

use edwards25519_core::{BASEPOINT_ORDER, ED25519_BASEPOINT_POINT, IDENTITY};
use edwards25519_core::{CompressedEdwardsY, EdwardsPoint, Scalar};
use subtle::ConstantTimeEq;

fn scalar_from_u64(n: u64) -> Scalar {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&n.to_le_bytes());
    Scalar::from_bytes(bytes)
}

#[test]
fn base_point_times_its_order_is_identity() {
    let g = ED25519_BASEPOINT_POINT;
    let result = g.scalarmult(&BASEPOINT_ORDER);
    assert_eq!(result.is_identity().unwrap_u8(), 1);
}

#[test]
fn scalarmult_matches_repeated_addition() {
    let g = ED25519_BASEPOINT_POINT;
    let mut acc = IDENTITY;
    for _ in 0..13 {
        acc = acc.add_points(&g);
    }
    let via_scalar = g.scalarmult(&scalar_from_u64(13));
    assert_eq!(acc.ct_eq(&via_scalar).unwrap_u8(), 1);
}

#[test]
fn packed_roundtrip_of_base_point() {
    let g = ED25519_BASEPOINT_POINT;
    let packed = g.compress();
    let back = packed.decompress().expect("base point must decompress");
    assert_eq!(back.ct_eq(&g).unwrap_u8(), 1);
}

#[test]
fn packed_roundtrip_is_stable_under_rescaling() {
    // Doubling changes the internal (X:Y:Z:T) representative but not
    // the point it denotes, so compressing twice from different
    // internal scalings must agree.
    let g = ED25519_BASEPOINT_POINT;
    let h = g.double().double();
    let packed_direct = h.compress();

    let via_scalar = g.scalarmult(&scalar_from_u64(4));
    let packed_via_scalar = via_scalar.compress();

    assert_eq!(packed_direct, packed_via_scalar);
}

#[test]
fn diffie_hellman_is_consistent() {
    let g = ED25519_BASEPOINT_POINT;
    let a = scalar_from_u64(12345);
    let b = scalar_from_u64(67890);

    let a_pub = g.scalarmult(&a);
    let b_pub = g.scalarmult(&b);

    let shared_from_a = b_pub.scalarmult(&a);
    let shared_from_b = a_pub.scalarmult(&b);

    assert_eq!(shared_from_a.ct_eq(&shared_from_b).unwrap_u8(), 1);
}

#[test]
fn flipping_the_sign_bit_picks_the_other_y_root() {
    // The packed encoding stores x directly; the sign bit only selects
    // which of the curve equation's two roots {y, -y} decompression
    // returns for that x.
    let g = ED25519_BASEPOINT_POINT;
    let packed = g.compress();
    let mut flipped_bytes = packed.as_bytes().to_owned();
    flipped_bytes[31] ^= 0x80;
    let flipped = CompressedEdwardsY(flipped_bytes);

    let h = flipped
        .decompress()
        .expect("same x with the opposite sign must still decompress");

    let (gx, gy) = g.to_affine();
    let (hx, hy) = h.to_affine();
    assert_eq!(gx, hx);
    assert_ne!(gy, hy);

    let mut back_bytes = flipped.as_bytes().to_owned();
    back_bytes[31] ^= 0x80;
    let back = CompressedEdwardsY(back_bytes)
        .decompress()
        .expect("flipping twice must round-trip");
    assert_eq!(back.ct_eq(&g).unwrap_u8(), 1);
}

#[test]
fn scalar_order_is_zero_mod_itself() {
    // BASEPOINT_ORDER holds q's raw bytes directly, bypassing reduce, so
    // this also checks that is_zero reduces before testing.
    assert_eq!(BASEPOINT_ORDER.is_zero().unwrap_u8(), 1);
    let reduced = Scalar::from_bytes(BASEPOINT_ORDER.to_bytes());
    assert_eq!(reduced.ct_eq(&Scalar::ZERO).unwrap_u8(), 1);
}

#[cfg(feature = "serde")]
#[test]
fn scalar_serializes_via_bincode() {
    let s = scalar_from_u64(424242);
    let encoded = bincode::serialize(&s).unwrap();
    let decoded: Scalar = bincode::deserialize(&encoded).unwrap();
    assert_eq!(decoded.ct_eq(&s).unwrap_u8(), 1);
}
