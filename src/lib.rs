// -*- mode: rust; coding: utf-8; -*-
//
// This file is part of edwards25519-core.
// See LICENSE for licensing information.

//! A small, dependency-light library of raw elliptic-curve primitives
//! for the twisted Edwards curve birationally equivalent to Curve25519.
//!
//! This crate provides:
//!
//! - [`EdwardsPoint`] and [`CompressedEdwardsY`]: the curve group, in
//!   extended projective coordinates, with constant-time scalar
//!   multiplication via a fixed-length double-and-always-add ladder.
//! - [`Scalar`]: arithmetic in the scalar field of the main subgroup,
//!   including Montgomery multiplication and secret-key clamping.
//!
//! It deliberately does *not* provide a Diffie-Hellman or signature
//! construction, randomness generation, or hashing — those belong in
//! higher layers built on top of these primitives (compare `x25519-dalek`
//! and `ed25519-dalek`, which are built on `curve25519-dalek` the same
//! way). Nor does it provide variable-time or windowed scalar
//! multiplication, batch verification, or subgroup membership checks:
//! every operation here runs in time independent of its secret inputs,
//! and callers that need those features should build them on top with
//! the timing/validation tradeoffs made explicit at that layer.
//!
//! # Constant-time guarantees
//!
//! All arithmetic that might operate on secret data (field and scalar
//! arithmetic, point addition/doubling, scalar multiplication,
//! decompression's square-root step) avoids secret-dependent branches
//! and array indices, built on [`subtle`]'s [`subtle::Choice`] and
//! [`subtle::ConditionallySelectable`]. This is necessary but not
//! sufficient for a production signature or key-exchange scheme; this
//! crate does not attempt to defend against fault attacks, microarchitectural
//! side channels, or similar.
//!
//! # `no_std`
//!
//! This crate has no heap allocation and works on `no_std` targets.
//! Enable the `std` feature for nothing — it does not currently exist;
//! the crate's public API is already `no_std`-clean, matching
//! `curve25519-dalek`'s own default posture.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![allow(non_snake_case)]

#[cfg(feature = "serde")]
extern crate serde;

#[cfg(feature = "zeroize")]
extern crate zeroize;

mod backend;
mod field;

pub mod constants;
pub mod edwards;
pub mod scalar;

pub use crate::constants::{BASEPOINT_ORDER, ED25519_BASEPOINT_POINT, IDENTITY};
pub use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
pub use crate::scalar::Scalar;
