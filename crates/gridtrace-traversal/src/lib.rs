//! # gridtrace-traversal
//!
//! A generic, single-threaded traversal engine for possibly cyclic graphs.
//! Callers supply a `QueueNext` callback that finds neighbours, plus
//! declarative policies: stop conditions, queue conditions, step actions,
//! branch start actions and context value computers. A traversal can split
//! into branches that never revisit anything their ancestors visited.
//!
//! ```
//! use gridtrace_traversal::{QueueType, Traversal};
//!
//! let edges = |n: &u32| -> Vec<u32> { if *n < 3 { vec![n + 1] } else { vec![] } };
//! let mut traversal = Traversal::new(QueueType::BreadthFirst, move |item, _ctx, queuer| {
//!     for next in edges(item) {
//!         queuer.queue_item(next);
//!     }
//! });
//! traversal.add_start_item(0);
//! let stats = traversal.run(true).unwrap();
//! assert_eq!(stats.items_visited, 4);
//! ```

pub mod actions;
pub mod computer;
pub mod conditions;
pub mod context;
mod policies;
pub mod queue;
pub mod tracker;
pub mod traversal;

pub use actions::{if_not_stopping, if_stopping, BranchStartAction, StepAction};
pub use computer::{ContextValueComputer, DynContextValueComputer, FnComputer};
pub use conditions::{QueueCondition, StopCondition};
pub use context::StepContext;
pub use queue::{
    BreadthFirstQueue, DepthFirstQueue, QueueType, TraversalQueue, WeightedPriorityQueue,
};
pub use tracker::{BasicTracker, RecursiveTracker, Tracker};
pub use traversal::{QueueNext, Queuer, RunState, Traversal, TraversalStats};
