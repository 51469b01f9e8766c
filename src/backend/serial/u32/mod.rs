//! The radix-256, 32-bit-limb serial backend.

pub(crate) mod field;
