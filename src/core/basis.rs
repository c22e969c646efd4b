use serde::{Deserialize, Serialize};
use std::fmt;

/// Encoding/measurement basis of a single qubit.
///
/// BB84 only ever compares two bases for equality, so this carries no
/// operator representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Z basis (Computational) -> {|0>, |1>}.
    Rectilinear,
    /// X basis (Hadamard) -> {|+>, |->}.
    Diagonal,
}

impl Basis {
    /// Maps a fair coin to a basis: `false` -> Rectilinear, `true` -> Diagonal.
    pub fn from_coin(coin: bool) -> Self {
        if coin {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => 'x',
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
