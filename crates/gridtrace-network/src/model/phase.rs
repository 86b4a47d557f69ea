//! Single phase identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One conductor phase of a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SinglePhaseKind {
    A,
    B,
    C,
    N,
}

impl SinglePhaseKind {
    pub const ALL: [SinglePhaseKind; 4] = [Self::A, Self::B, Self::C, Self::N];

    pub fn is_neutral(self) -> bool {
        self == Self::N
    }
}

impl fmt::Display for SinglePhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::N => "N",
        };
        f.write_str(name)
    }
}
