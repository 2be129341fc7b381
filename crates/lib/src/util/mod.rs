//! Shared utilities.
//!
//! Checksum hashing plus test helpers.

pub mod hash;
