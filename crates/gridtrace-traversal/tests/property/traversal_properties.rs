//! Property tests for the traversal engine over random graphs.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use proptest::prelude::*;

use gridtrace_core::config::QueueDiscipline;
use gridtrace_traversal::{
    FnComputer, QueueType, StepContext, TraversalQueue, Traversal, WeightedPriorityQueue,
};

type Adjacency = Rc<HashMap<usize, Vec<usize>>>;

fn build_graph(n: usize, edges: &[(usize, usize)]) -> Adjacency {
    let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();
    for &(from, to) in edges {
        if from < n && to < n {
            adjacency.entry(from).or_default().push(to);
        }
    }
    Rc::new(adjacency)
}

fn reachable(adjacency: &Adjacency, start: usize) -> HashSet<usize> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        for next in adjacency.get(&node).into_iter().flatten() {
            if seen.insert(*next) {
                queue.push_back(*next);
            }
        }
    }
    seen
}

fn traversal_over(adjacency: &Adjacency, queue_type: QueueType<usize>) -> Traversal<usize> {
    let adjacency = Rc::clone(adjacency);
    Traversal::new(queue_type, move |item: &usize, _, queuer| {
        for next in adjacency.get(item).into_iter().flatten() {
            queuer.queue_item(*next);
        }
    })
}

// Strategy to generate random edges (cycles allowed) for a graph of size n.
fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..n, 0..n), 0..n * 3)
}

// =============================================================================
// Single visit: every reachable item exactly once, in both disciplines
// =============================================================================
proptest! {
    #[test]
    fn single_visit_on_cyclic_graphs(edges in edge_strategy(25), depth_first in any::<bool>()) {
        let adjacency = build_graph(25, &edges);
        let queue_type = if depth_first { QueueType::DepthFirst } else { QueueType::BreadthFirst };
        let visited = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&visited);

        let mut traversal = traversal_over(&adjacency, queue_type);
        traversal
            .add_step_action(move |item: &usize, _: &StepContext| sink.borrow_mut().push(*item))
            .add_start_item(0);
        let stats = traversal.run(true).unwrap();

        let visited = visited.borrow();
        let unique: HashSet<usize> = visited.iter().copied().collect();
        prop_assert_eq!(unique.len(), visited.len(), "an item was visited twice");
        prop_assert_eq!(unique, reachable(&adjacency, 0));
        prop_assert_eq!(stats.items_visited, visited.len());
    }
}

// =============================================================================
// Context propagation: a +1 computer always equals the step number
// =============================================================================
proptest! {
    #[test]
    fn hop_counter_equals_step_number(edges in edge_strategy(20)) {
        let adjacency = build_graph(20, &edges);
        let mismatches = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&mismatches);

        let mut traversal = traversal_over(&adjacency, QueueType::DepthFirst);
        traversal
            .add_context_value_computer(FnComputer::new(
                "hops",
                |_: &usize| 0_usize,
                |_: &usize, hops: &usize| hops + 1,
            ))
            .add_step_action(move |item: &usize, context: &StepContext| {
                if context.get::<usize>("hops") != Some(&context.step_number()) {
                    sink.borrow_mut().push(*item);
                }
            })
            .add_start_item(0);
        traversal.run(true).unwrap();

        prop_assert!(mismatches.borrow().is_empty());
    }
}

// =============================================================================
// Weighted ordering: non-increasing weights, negatives never dequeued
// =============================================================================
proptest! {
    #[test]
    fn weighted_queue_drains_by_weight(weights in prop::collection::vec(-5_i32..20, 0..60)) {
        let mut queue = WeightedPriorityQueue::depth_first(|w: &i32| *w);
        let mut accepted = 0;
        for w in &weights {
            if queue.add(*w) {
                accepted += 1;
            }
        }
        prop_assert_eq!(accepted, weights.iter().filter(|w| **w >= 0).count());

        let mut drained = Vec::new();
        while let Some(w) = queue.next() {
            drained.push(w);
        }
        prop_assert_eq!(drained.len(), accepted);
        prop_assert!(drained.windows(2).all(|pair| pair[0] >= pair[1]));
        prop_assert!(drained.iter().all(|w| *w >= 0));
    }
}

// =============================================================================
// Weighted traversal visits the same set as an unweighted one
// =============================================================================
proptest! {
    #[test]
    fn weighted_traversal_reaches_same_items(edges in edge_strategy(20)) {
        let adjacency = build_graph(20, &edges);
        let mut weighted = traversal_over(
            &adjacency,
            QueueType::weighted(|item: &usize| (*item % 4) as i32, QueueDiscipline::BreadthFirst),
        );
        let mut plain = traversal_over(&adjacency, QueueType::BreadthFirst);
        weighted.add_start_item(0);
        plain.add_start_item(0);

        prop_assert_eq!(
            weighted.run(true).unwrap().items_visited,
            plain.run(true).unwrap().items_visited
        );
    }
}
