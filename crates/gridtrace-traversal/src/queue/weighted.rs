//! Weighted priority queue: highest weight first, ties broken by a sub-queue.

use std::collections::BTreeMap;
use std::hash::Hash;
use std::rc::Rc;

use gridtrace_core::config::QueueDiscipline;
use gridtrace_core::constants::ABSENT_BRANCH_WEIGHT;

use super::{BreadthFirstQueue, DepthFirstQueue, TraversalQueue};
use crate::traversal::Traversal;

type SubQueueFactory<T> = Box<dyn Fn() -> Box<dyn TraversalQueue<T>>>;

/// Buckets items by integer weight and drains the heaviest bucket first.
///
/// Items with a negative weight are rejected by `add`. Each bucket is a
/// sub-queue from the caller's factory, which decides order within a weight.
pub struct WeightedPriorityQueue<T> {
    buckets: BTreeMap<i32, Box<dyn TraversalQueue<T>>>,
    get_weight: Box<dyn Fn(&T) -> i32>,
    sub_queue: SubQueueFactory<T>,
}

impl<T: 'static> WeightedPriorityQueue<T> {
    pub fn new(
        get_weight: impl Fn(&T) -> i32 + 'static,
        sub_queue: impl Fn() -> Box<dyn TraversalQueue<T>> + 'static,
    ) -> Self {
        Self {
            buckets: BTreeMap::new(),
            get_weight: Box::new(get_weight),
            sub_queue: Box::new(sub_queue),
        }
    }

    /// Equal weights come out most-recent first.
    pub fn depth_first(get_weight: impl Fn(&T) -> i32 + 'static) -> Self {
        Self::new(get_weight, || Box::new(DepthFirstQueue::new()))
    }

    /// Equal weights come out in insertion order.
    pub fn breadth_first(get_weight: impl Fn(&T) -> i32 + 'static) -> Self {
        Self::new(get_weight, || Box::new(BreadthFirstQueue::new()))
    }

    pub fn with_tie_break(
        get_weight: impl Fn(&T) -> i32 + 'static,
        tie_break: QueueDiscipline,
    ) -> Self {
        match tie_break {
            QueueDiscipline::DepthFirst => Self::depth_first(get_weight),
            QueueDiscipline::BreadthFirst => Self::breadth_first(get_weight),
        }
    }
}

impl<T> WeightedPriorityQueue<Traversal<T>>
where
    T: Clone + Eq + Hash + 'static,
{
    /// Queue for branch traversals, weighted by their first start item.
    /// A branch without a start item weighs -1 and is never queued.
    pub fn branch_queue(get_weight: Rc<dyn Fn(&T) -> i32>, tie_break: QueueDiscipline) -> Self {
        Self::with_tie_break(
            move |branch: &Traversal<T>| {
                branch
                    .start_items()
                    .next()
                    .map_or(ABSENT_BRANCH_WEIGHT, |item| get_weight(item))
            },
            tie_break,
        )
    }
}

impl<T> TraversalQueue<T> for WeightedPriorityQueue<T> {
    fn add(&mut self, item: T) -> bool {
        let weight = (self.get_weight)(&item);
        if weight < 0 {
            return false;
        }
        let sub_queue = &self.sub_queue;
        self.buckets
            .entry(weight)
            .or_insert_with(|| sub_queue())
            .add(item)
    }

    fn next(&mut self) -> Option<T> {
        loop {
            let mut bucket = self.buckets.last_entry()?;
            if let Some(item) = bucket.get_mut().next() {
                if bucket.get().is_empty() {
                    bucket.remove();
                }
                return Some(item);
            }
            bucket.remove();
        }
    }

    fn peek(&self) -> Option<&T> {
        self.buckets.values().rev().find_map(|bucket| bucket.peek())
    }

    fn len(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.len()).sum()
    }

    fn clear(&mut self) {
        self.buckets.clear();
    }
}
