//! Visited-item tracking.
//!
//! [`RecursiveTracker`] chains trackers so a branch never revisits what any
//! traversal in its lineage already visited, while unrelated traversals keep
//! fully independent visited sets.

use std::cell::RefCell;
use std::hash::Hash;
use std::iter;
use std::rc::Rc;

use gridtrace_core::types::collections::FxHashSet;

/// A visited set.
pub trait Tracker<T> {
    fn has_visited(&self, item: &T) -> bool;

    /// Mark `item` visited. Returns false if it was already visited.
    fn visit(&mut self, item: &T) -> bool;

    fn clear(&mut self);
}

/// Hash-set backed tracker.
#[derive(Debug, Clone)]
pub struct BasicTracker<T> {
    visited: FxHashSet<T>,
}

impl<T> BasicTracker<T> {
    pub fn new() -> Self {
        Self {
            visited: FxHashSet::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

impl<T> Default for BasicTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> Tracker<T> for BasicTracker<T> {
    fn has_visited(&self, item: &T) -> bool {
        self.visited.contains(item)
    }

    fn visit(&mut self, item: &T) -> bool {
        if self.visited.contains(item) {
            return false;
        }
        self.visited.insert(item.clone())
    }

    fn clear(&mut self) {
        self.visited.clear();
    }
}

/// Tracker that also consults every ancestor in its chain.
///
/// Ancestors are shared through `Rc` and only read by descendants during a
/// run. Chains are walked iteratively, so lineage depth is bounded by memory
/// rather than stack.
#[derive(Debug)]
pub struct RecursiveTracker<T> {
    parent: Option<Rc<RecursiveTracker<T>>>,
    delegate: RefCell<BasicTracker<T>>,
}

impl<T: Clone + Eq + Hash> RecursiveTracker<T> {
    /// A tracker with no ancestors.
    pub fn root() -> Self {
        Self {
            parent: None,
            delegate: RefCell::new(BasicTracker::new()),
        }
    }

    /// A tracker whose lineage continues through `parent`.
    pub fn child(parent: &Rc<RecursiveTracker<T>>) -> Self {
        Self {
            parent: Some(Rc::clone(parent)),
            delegate: RefCell::new(BasicTracker::new()),
        }
    }

    /// True if this tracker or any ancestor has visited `item`.
    pub fn has_visited(&self, item: &T) -> bool {
        self.lineage()
            .any(|tracker| tracker.delegate.borrow().has_visited(item))
    }

    /// Visit `item` locally unless an ancestor already has it.
    pub fn visit(&self, item: &T) -> bool {
        if self
            .ancestors()
            .any(|tracker| tracker.delegate.borrow().has_visited(item))
        {
            return false;
        }
        self.delegate.borrow_mut().visit(item)
    }

    /// Clears this tracker and every ancestor in the chain.
    pub fn clear(&self) {
        for tracker in self.lineage() {
            tracker.delegate.borrow_mut().clear();
        }
    }

    /// Number of ancestors above this tracker.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Items visited by this tracker alone, excluding ancestors.
    pub fn local_len(&self) -> usize {
        self.delegate.borrow().len()
    }

    fn lineage(&self) -> impl Iterator<Item = &RecursiveTracker<T>> {
        iter::successors(Some(self), |tracker| tracker.parent.as_deref())
    }

    fn ancestors(&self) -> impl Iterator<Item = &RecursiveTracker<T>> {
        self.lineage().skip(1)
    }
}

impl<T: Clone + Eq + Hash> Tracker<T> for RecursiveTracker<T> {
    fn has_visited(&self, item: &T) -> bool {
        RecursiveTracker::has_visited(self, item)
    }

    fn visit(&mut self, item: &T) -> bool {
        RecursiveTracker::visit(self, item)
    }

    fn clear(&mut self) {
        RecursiveTracker::clear(self)
    }
}

impl<T> Drop for RecursiveTracker<T> {
    // Unlink the chain one tracker at a time instead of recursing through
    // nested `Rc` drops.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            match Rc::try_unwrap(parent) {
                Ok(mut tracker) => next = tracker.parent.take(),
                Err(_) => break,
            }
        }
    }
}
