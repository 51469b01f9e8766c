//! Backend dispatch for base-field (`F_p`) arithmetic.
//!
//! `curve25519-dalek` has a `field.rs` that re-exports whichever
//! backend's `FieldElement` type was selected for the build; this crate
//! has exactly one backend, but keeps the same indirection so
//! `edwards.rs` and the rest of the crate never name a backend module
//! directly.

pub(crate) use crate::backend::serial::u32::field::FieldElement;
