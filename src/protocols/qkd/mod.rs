//! Quantum Key Distribution (QKD) Protocols.
//!
//! BB84 is split into the stages a run flows through:
//! - **participants**: Alice's bits and bases, Bob's bases.
//! - **sifting**: keeping the qubits measured in Alice's basis.
//! - **estimator**: QBER estimation and the keep/discard verdict.
//! - **bb84**: the end-to-end run over a [`ChannelModel`](crate::core::ChannelModel).

pub mod bb84;
pub mod estimator;
pub mod participants;
pub mod sifting;
