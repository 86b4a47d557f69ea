//! Queue disciplines for items and branches.

mod basic;
mod weighted;

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use gridtrace_core::config::QueueDiscipline;

pub use basic::{BreadthFirstQueue, DepthFirstQueue};
pub use weighted::WeightedPriorityQueue;

use crate::traversal::{Queued, Traversal};

/// A pluggable queue discipline.
pub trait TraversalQueue<T> {
    /// Add an item. Returns false if the queue rejects it.
    fn add(&mut self, item: T) -> bool;

    /// Remove and return the next item.
    fn next(&mut self) -> Option<T>;

    fn peek(&self) -> Option<&T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn has_next(&self) -> bool {
        !self.is_empty()
    }

    fn clear(&mut self);
}

/// Selects the item queue and the matching branch queue of a traversal.
pub enum QueueType<T> {
    DepthFirst,
    BreadthFirst,
    /// Highest weight first. Items weighing less than zero are never queued;
    /// branches are weighted by their first start item.
    Weighted {
        weight: Rc<dyn Fn(&T) -> i32>,
        tie_break: QueueDiscipline,
    },
}

impl<T> QueueType<T> {
    pub fn weighted(weight: impl Fn(&T) -> i32 + 'static, tie_break: QueueDiscipline) -> Self {
        Self::Weighted {
            weight: Rc::new(weight),
            tie_break,
        }
    }
}

impl<T> QueueType<T>
where
    T: Clone + Eq + Hash + 'static,
{
    pub(crate) fn item_queue(&self) -> Box<dyn TraversalQueue<Queued<T>>> {
        match self {
            Self::DepthFirst => Box::new(DepthFirstQueue::new()),
            Self::BreadthFirst => Box::new(BreadthFirstQueue::new()),
            Self::Weighted { weight, tie_break } => {
                let weight = Rc::clone(weight);
                Box::new(WeightedPriorityQueue::with_tie_break(
                    move |queued: &Queued<T>| weight(&queued.item),
                    *tie_break,
                ))
            }
        }
    }

    pub(crate) fn branch_queue(&self) -> Box<dyn TraversalQueue<Traversal<T>>> {
        match self {
            Self::DepthFirst => Box::new(DepthFirstQueue::new()),
            Self::BreadthFirst => Box::new(BreadthFirstQueue::new()),
            Self::Weighted { weight, tie_break } => Box::new(
                WeightedPriorityQueue::branch_queue(Rc::clone(weight), *tie_break),
            ),
        }
    }
}

impl<T> Clone for QueueType<T> {
    fn clone(&self) -> Self {
        match self {
            Self::DepthFirst => Self::DepthFirst,
            Self::BreadthFirst => Self::BreadthFirst,
            Self::Weighted { weight, tie_break } => Self::Weighted {
                weight: Rc::clone(weight),
                tie_break: *tie_break,
            },
        }
    }
}

impl<T> fmt::Debug for QueueType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthFirst => f.write_str("DepthFirst"),
            Self::BreadthFirst => f.write_str("BreadthFirst"),
            Self::Weighted { tie_break, .. } => f
                .debug_struct("Weighted")
                .field("tie_break", tie_break)
                .finish_non_exhaustive(),
        }
    }
}

impl<T> From<QueueDiscipline> for QueueType<T> {
    fn from(discipline: QueueDiscipline) -> Self {
        match discipline {
            QueueDiscipline::BreadthFirst => Self::BreadthFirst,
            QueueDiscipline::DepthFirst => Self::DepthFirst,
        }
    }
}
