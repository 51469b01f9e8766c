//! Arithmetic backends.
//!
//! `curve25519-dalek` picks between several backends (`u32`, `u64`,
//! `fiat`, vectorized `avx2`/`avx512`) depending on target and feature
//! flags. This crate implements a single representation (radix-256
//! limbs), so there is only ever one backend to select — but the module
//! split mirrors that layout so a second backend could be added the
//! same way.

pub(crate) mod serial;
