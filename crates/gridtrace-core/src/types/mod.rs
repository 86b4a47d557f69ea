//! Collection aliases shared by the engine and the network model.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet};
