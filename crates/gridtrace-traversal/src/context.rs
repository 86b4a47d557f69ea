//! Per-step context attached to every item the traversal dequeues.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use gridtrace_core::types::collections::FxHashMap;

use crate::computer::ContextValueComputer;

/// Context for one queued item.
///
/// Created when the item is queued: start items get values from
/// `compute_initial`, everything else from `compute_next` applied to the
/// context of the item it was queued from. Only `is_stopping` changes after
/// that, and only once, when the engine evaluates stop conditions.
#[derive(Clone)]
pub struct StepContext {
    is_start_item: bool,
    is_branch_start_item: bool,
    step_number: usize,
    branch_depth: usize,
    is_stopping: bool,
    values: FxHashMap<String, Rc<dyn Any>>,
}

impl StepContext {
    /// Create a context with no computed values.
    pub fn new(
        is_start_item: bool,
        is_branch_start_item: bool,
        step_number: usize,
        branch_depth: usize,
    ) -> Self {
        Self {
            is_start_item,
            is_branch_start_item,
            step_number,
            branch_depth,
            is_stopping: false,
            values: FxHashMap::default(),
        }
    }

    /// Context of a top-level start item.
    pub fn start() -> Self {
        Self::new(true, false, 0, 0)
    }

    pub(crate) fn with_values(mut self, values: FxHashMap<String, Rc<dyn Any>>) -> Self {
        self.values = values;
        self
    }

    /// Derive the context for an item queued from this one. A branch start
    /// item is the start item of its own traversal.
    pub(crate) fn next(&self, is_branch_start: bool, values: FxHashMap<String, Rc<dyn Any>>) -> Self {
        Self {
            is_start_item: is_branch_start,
            is_branch_start_item: is_branch_start,
            step_number: self.step_number + 1,
            branch_depth: self.branch_depth + usize::from(is_branch_start),
            is_stopping: false,
            values,
        }
    }

    /// True for items passed to `add_start_item` and for branch start items.
    pub fn is_start_item(&self) -> bool {
        self.is_start_item
    }

    /// True for the first item of a branch traversal.
    pub fn is_branch_start_item(&self) -> bool {
        self.is_branch_start_item
    }

    /// Hops from the start item along the path that reached this item.
    pub fn step_number(&self) -> usize {
        self.step_number
    }

    /// Number of branch splits between the top-level traversal and this item.
    pub fn branch_depth(&self) -> usize {
        self.branch_depth
    }

    /// True when a stop condition matched this item; its neighbours are not queued.
    pub fn is_stopping(&self) -> bool {
        self.is_stopping
    }

    pub(crate) fn mark_stopping(&mut self, stopping: bool) {
        self.is_stopping = stopping;
    }

    /// Look up a stored value by key. `None` when absent or of another type.
    pub fn get<V: 'static>(&self, key: &str) -> Option<&V> {
        self.values.get(key)?.downcast_ref::<V>()
    }

    /// Typed lookup of the value a computer produced for this step.
    pub fn value<T, C>(&self, computer: &C) -> Option<&C::Value>
    where
        C: ContextValueComputer<T> + ?Sized,
    {
        self.get::<C::Value>(computer.key())
    }

    /// Store a value under `key`, replacing any previous value.
    pub fn set<V: 'static>(&mut self, key: impl Into<String>, value: V) {
        self.values.insert(key.into(), Rc::new(value));
    }

    pub(crate) fn raw(&self, key: &str) -> Option<&dyn Any> {
        self.values.get(key).map(|v| v.as_ref())
    }
}

impl fmt::Debug for StepContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("StepContext")
            .field("is_start_item", &self.is_start_item)
            .field("is_branch_start_item", &self.is_branch_start_item)
            .field("step_number", &self.step_number)
            .field("branch_depth", &self.branch_depth)
            .field("is_stopping", &self.is_stopping)
            .field("keys", &keys)
            .finish()
    }
}
