//! Feeder direction bitset.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Which way the feeder head lies from a terminal.
///
/// `UPSTREAM` means the feeder head is reached through this terminal,
/// `DOWNSTREAM` means load is reached through it. A terminal fed from both
/// sides of a loop is `BOTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FeederDirection(u8);

impl FeederDirection {
    pub const NONE: Self = Self(0);
    pub const UPSTREAM: Self = Self(0b01);
    pub const DOWNSTREAM: Self = Self(0b10);
    pub const BOTH: Self = Self(0b11);

    /// True if every bit of `other` is set on `self`. `NONE` is contained in
    /// everything.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Bits not set on `self`, within `BOTH`.
    pub fn complement(self) -> Self {
        Self(!self.0 & Self::BOTH.0)
    }

    pub fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl BitOr for FeederDirection {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FeederDirection {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for FeederDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::NONE => "NONE",
            Self::UPSTREAM => "UPSTREAM",
            Self::DOWNSTREAM => "DOWNSTREAM",
            _ => "BOTH",
        };
        f.write_str(name)
    }
}
