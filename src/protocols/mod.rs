//! Quantum Cryptography Protocols.
//!
//! This module contains the BB84 quantum key distribution protocol and the
//! stages it is built from.

pub mod qkd;
pub use qkd::{bb84, estimator, participants, sifting};
