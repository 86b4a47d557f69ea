//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec sized for the phases on a terminal (at most A, B, C, N).
pub type PhaseVec<T> = SmallVec<[T; 4]>;

/// SmallVec sized for equipment terminals (usually 1-3).
pub type TerminalVec<T> = SmallVec<[T; 4]>;
