use crate::core::{Basis, EntropySource};

/// Random choices made by Alice and Bob before any qubit is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participants {
    /// Alice's raw key bits.
    pub alice_bits: Vec<bool>,
    /// Bases Alice encodes each bit in.
    pub alice_bases: Vec<Basis>,
    /// Bases Bob measures each incoming qubit in.
    pub bob_bases: Vec<Basis>,
}

impl Participants {
    /// Draws `num_qubits` independent bits and bases for Alice, then
    /// `num_qubits` independent bases for Bob.
    pub fn generate<E: EntropySource + ?Sized>(num_qubits: usize, rng: &mut E) -> Self {
        let mut alice_bits = Vec::with_capacity(num_qubits);
        let mut alice_bases = Vec::with_capacity(num_qubits);

        for _ in 0..num_qubits {
            alice_bits.push(rng.next_bit());
            alice_bases.push(rng.next_basis());
        }

        let bob_bases = (0..num_qubits).map(|_| rng.next_basis()).collect();

        Self {
            alice_bits,
            alice_bases,
            bob_bases,
        }
    }

    pub fn len(&self) -> usize {
        self.alice_bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alice_bits.is_empty()
    }
}
