use crate::core::Basis;
use crate::protocols::qkd::bb84::QubitRecord;

/// Alice's and Bob's raw keys after discarding mismatched bases.
///
/// Both keys always have the same length; the pair can only be built by
/// sifting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiftedKeyPair {
    alice_key: Vec<bool>,
    bob_key: Vec<bool>,
}

impl SiftedKeyPair {
    /// Keeps every qubit where Alice and Bob used the same basis, in
    /// transmission order.
    pub fn sift(records: &[QubitRecord]) -> Self {
        let mut pair = Self::default();
        for r in records.iter().filter(|r| r.alice_basis == r.bob_basis) {
            pair.alice_key.push(r.alice_bit);
            pair.bob_key.push(r.received_bit);
        }
        pair
    }

    /// Sifts four parallel per-qubit sequences.
    ///
    /// Sequences are expected to share a length; extra trailing entries in
    /// any of them are ignored.
    pub fn from_parallel(
        alice_bits: &[bool],
        alice_bases: &[Basis],
        bob_bases: &[Basis],
        received_bits: &[bool],
    ) -> Self {
        let mut pair = Self::default();
        for (((&a_bit, a_basis), b_basis), &b_bit) in alice_bits
            .iter()
            .zip(alice_bases)
            .zip(bob_bases)
            .zip(received_bits)
        {
            if a_basis == b_basis {
                pair.alice_key.push(a_bit);
                pair.bob_key.push(b_bit);
            }
        }
        pair
    }

    pub fn alice_key(&self) -> &[bool] {
        &self.alice_key
    }

    pub fn bob_key(&self) -> &[bool] {
        &self.bob_key
    }

    pub fn len(&self) -> usize {
        self.alice_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alice_key.is_empty()
    }

    /// Number of positions where the two keys disagree.
    pub fn mismatches(&self) -> usize {
        self.alice_key
            .iter()
            .zip(&self.bob_key)
            .filter(|(a, b)| a != b)
            .count()
    }
}
