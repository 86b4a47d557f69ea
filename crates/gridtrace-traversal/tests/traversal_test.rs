//! Integration tests for the traversal engine.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gridtrace_core::config::QueueDiscipline;
use gridtrace_core::TraversalError;
use gridtrace_traversal::{
    if_not_stopping, ContextValueComputer, DynContextValueComputer, FnComputer, QueueCondition,
    QueueType, Queuer, RunState, StepContext, StopCondition, Traversal,
};

type Graph = Rc<HashMap<char, Vec<char>>>;

fn graph(edges: &[(char, char)]) -> Graph {
    let mut adjacency: HashMap<char, Vec<char>> = HashMap::new();
    for &(from, to) in edges {
        adjacency.entry(from).or_default().push(to);
    }
    Rc::new(adjacency)
}

fn neighbours(graph: &Graph) -> impl Fn(&char, &StepContext, &mut Queuer<'_, char>) + 'static {
    let graph = Rc::clone(graph);
    move |item, _context, queuer| {
        for next in graph.get(item).into_iter().flatten() {
            queuer.queue_item(*next);
        }
    }
}

fn recorder() -> (Rc<RefCell<Vec<char>>>, impl Fn(&char, &StepContext) + 'static) {
    let visited = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&visited);
    (visited, move |item, _context| sink.borrow_mut().push(*item))
}

/// A -> B -> {C, D}, D -> B
fn diamond_with_cycle() -> Graph {
    graph(&[('A', 'B'), ('B', 'C'), ('B', 'D'), ('D', 'B')])
}

#[test]
fn test_breadth_first_visits_each_item_once() {
    let g = diamond_with_cycle();
    let (visited, record) = recorder();
    let mut traversal = Traversal::breadth_first(neighbours(&g));
    traversal.add_step_action(record).add_start_item('A');

    let stats = traversal.run(true).unwrap();

    assert_eq!(*visited.borrow(), vec!['A', 'B', 'C', 'D']);
    assert_eq!(stats.items_visited, 4);
    assert_eq!(stats.items_stopped, 0);
    assert_eq!(traversal.state(), RunState::Finished);
}

#[test]
fn test_stopping_item_still_runs_step_actions() {
    let g = diamond_with_cycle();
    let (visited, record) = recorder();
    let stopped = Rc::new(RefCell::new(Vec::new()));
    let stopped_sink = Rc::clone(&stopped);

    let mut traversal = Traversal::breadth_first(neighbours(&g));
    traversal
        .add_stop_condition(|item: &char, _: &StepContext| *item == 'C')
        .add_step_action(record)
        .add_step_action(move |item: &char, context: &StepContext| {
            if context.is_stopping() {
                stopped_sink.borrow_mut().push(*item);
            }
        })
        .add_start_item('A');

    let stats = traversal.run(true).unwrap();

    assert_eq!(*visited.borrow(), vec!['A', 'B', 'C', 'D']);
    assert_eq!(*stopped.borrow(), vec!['C']);
    assert_eq!(stats.items_stopped, 1);
}

#[test]
fn test_stop_isolated_to_its_path() {
    let g = graph(&[
        ('S', 'x'),
        ('S', 'y'),
        ('S', 'z'),
        ('x', 'X'),
        ('X', '1'),
        ('y', 'Y'),
        ('Y', '2'),
        ('z', 'Z'),
        ('Z', '3'),
    ]);
    let steps = Rc::new(RefCell::new(HashMap::new()));
    let sink = Rc::clone(&steps);

    let mut traversal = Traversal::breadth_first(neighbours(&g));
    traversal
        .add_stop_condition(|item: &char, _: &StepContext| *item == 'x')
        .add_step_action(move |item: &char, context: &StepContext| {
            sink.borrow_mut().insert(*item, context.step_number());
        })
        .add_start_item('S');
    traversal.run(true).unwrap();

    let steps = steps.borrow();
    assert_eq!(steps.get(&'x'), Some(&1));
    assert!(!steps.contains_key(&'X'));
    assert_eq!(steps.get(&'2'), Some(&3));
    assert_eq!(steps.get(&'3'), Some(&3));
}

#[test]
fn test_context_value_tracks_step_number() {
    let g = graph(&[('a', 'b'), ('b', 'c'), ('c', 'd'), ('a', 'e'), ('e', 'd')]);
    let mismatches = Rc::new(Cell::new(0));
    let sink = Rc::clone(&mismatches);

    let mut traversal = Traversal::depth_first(neighbours(&g));
    traversal
        .add_context_value_computer(FnComputer::new(
            "hops",
            |_: &char| 0_usize,
            |_: &char, hops: &usize| hops + 1,
        ))
        .add_step_action(move |_: &char, context: &StepContext| {
            if context.get::<usize>("hops") != Some(&context.step_number()) {
                sink.set(sink.get() + 1);
            }
        })
        .add_start_item('a');
    let stats = traversal.run(true).unwrap();

    assert_eq!(stats.items_visited, 5);
    assert_eq!(mismatches.get(), 0);
}

#[test]
fn test_run_twice_without_reset_is_an_error() {
    let g = diamond_with_cycle();
    let mut traversal = Traversal::breadth_first(neighbours(&g));
    traversal.add_start_item('A');
    traversal.run(true).unwrap();

    assert_eq!(traversal.run(true), Err(TraversalError::AlreadyRun));
}

#[test]
fn test_reset_repeats_the_same_run() {
    let g = diamond_with_cycle();
    let (visited, record) = recorder();
    let mut traversal = Traversal::depth_first(neighbours(&g));
    traversal.add_step_action(record).add_start_item('A');

    let first = traversal.run(true).unwrap();
    let first_order = visited.take();
    traversal.reset().unwrap();
    assert_eq!(traversal.state(), RunState::NotStarted);
    let second = traversal.run(true).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_order, *visited.borrow());
}

#[test]
fn test_start_item_exempt_from_stop_when_requested() {
    let g = diamond_with_cycle();
    let (visited, record) = recorder();
    let mut traversal = Traversal::breadth_first(neighbours(&g));
    traversal
        .add_stop_condition(|_: &char, _: &StepContext| true)
        .add_step_action(record)
        .add_start_item('A');

    let stats = traversal.run(false).unwrap();
    assert_eq!(*visited.borrow(), vec!['A', 'B']);
    assert_eq!(stats.items_stopped, 1);

    traversal.reset().unwrap();
    visited.take();
    traversal.run(true).unwrap();
    assert_eq!(*visited.borrow(), vec!['A']);
}

#[test]
fn test_queue_condition_refuses_item() {
    let g = diamond_with_cycle();
    let (visited, record) = recorder();
    let refusals = Rc::new(Cell::new(0));
    let refusal_sink = Rc::clone(&refusals);
    let edges = Rc::clone(&g);

    let mut traversal = Traversal::breadth_first(move |item: &char, _, queuer| {
        for next in edges.get(item).into_iter().flatten() {
            if !queuer.queue_item(*next) {
                refusal_sink.set(refusal_sink.get() + 1);
            }
        }
    });
    traversal
        .add_queue_condition(
            |next: &char, _: &StepContext, _: &char, _: &StepContext| *next != 'D',
        )
        .add_step_action(record)
        .add_start_item('A');
    traversal.run(true).unwrap();

    assert_eq!(*visited.borrow(), vec!['A', 'B', 'C']);
    assert_eq!(refusals.get(), 1);
}

struct RejectStart(char);

impl QueueCondition<char> for RejectStart {
    fn should_queue(&self, _: &char, _: &StepContext, _: &char, _: &StepContext) -> bool {
        true
    }

    fn should_queue_start_item(&self, item: &char) -> bool {
        *item != self.0
    }
}

#[test]
fn test_start_item_queue_condition() {
    let g = diamond_with_cycle();
    let (visited, record) = recorder();
    let mut traversal = Traversal::breadth_first(neighbours(&g));
    traversal
        .add_queue_condition(RejectStart('A'))
        .add_step_action(record)
        .add_start_items(['A', 'C']);
    traversal.run(true).unwrap();

    assert_eq!(*visited.borrow(), vec!['C']);
}

#[test]
fn test_start_items_run_as_separate_waves() {
    let g = graph(&[('a', 'b'), ('b', 'c'), ('x', 'b')]);
    let steps = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&steps);
    let mut traversal = Traversal::breadth_first(neighbours(&g));
    traversal
        .add_step_action(move |item: &char, context: &StepContext| {
            sink.borrow_mut().push((*item, context.step_number()));
        })
        .add_start_items(['a', 'x']);
    traversal.run(true).unwrap();

    assert_eq!(*steps.borrow(), vec![('a', 0), ('b', 1), ('c', 2), ('x', 0)]);
}

/// A -> B, B branches to C and D, both reach E.
fn branching(
    g: &Graph,
) -> impl Fn(&char, &StepContext, &mut Queuer<'_, char>) + 'static {
    let g = Rc::clone(g);
    move |item, _context, queuer| {
        for next in g.get(item).into_iter().flatten() {
            if *item == 'B' {
                queuer.queue_branch(*next);
            } else {
                queuer.queue_item(*next);
            }
        }
    }
}

#[test]
fn test_sibling_branches_do_not_share_visits() {
    let g = graph(&[('A', 'B'), ('B', 'C'), ('B', 'D'), ('C', 'E'), ('D', 'E'), ('E', 'A')]);
    let (visited, record) = recorder();
    let branch_starts = Rc::new(RefCell::new(Vec::new()));
    let branch_sink = Rc::clone(&branch_starts);
    let depths = Rc::new(RefCell::new(Vec::new()));
    let depth_sink = Rc::clone(&depths);

    let mut traversal = Traversal::breadth_first(branching(&g));
    traversal
        .add_step_action(record)
        .add_step_action(move |item: &char, context: &StepContext| {
            depth_sink.borrow_mut().push((*item, context.branch_depth()));
        })
        .add_branch_start_action(move |item: &char, context: &StepContext| {
            assert!(context.is_branch_start_item());
            branch_sink.borrow_mut().push(*item);
        })
        .add_start_item('A');
    let stats = traversal.run(true).unwrap();

    // E is visited once per branch; A is never revisited from either.
    assert_eq!(*visited.borrow(), vec!['A', 'B', 'C', 'E', 'D', 'E']);
    assert_eq!(*branch_starts.borrow(), vec!['C', 'D']);
    assert_eq!(stats.branches_run, 2);
    assert!(depths.borrow().contains(&('E', 1)));
    assert!(depths.borrow().contains(&('A', 0)));
}

#[test]
fn test_long_branch_chain_runs_iteratively() {
    const LENGTH: u32 = 2_000;
    let mut traversal = Traversal::breadth_first(|item: &u32, _, queuer| {
        if *item < LENGTH {
            queuer.queue_branch(item + 1);
        }
    });
    traversal.add_start_item(0);
    let stats = traversal.run(true).unwrap();

    assert_eq!(stats.items_visited, LENGTH as usize + 1);
    assert_eq!(stats.branches_run, LENGTH as usize);
}

#[test]
fn test_weighted_queue_visits_heaviest_first() {
    let g = graph(&[('r', 'a'), ('r', 'b'), ('r', 'c'), ('r', 'n')]);
    let weight = |item: &char| match item {
        'a' => 1,
        'b' => 3,
        'c' => 2,
        'n' => -1,
        _ => 0,
    };
    let (visited, record) = recorder();
    let mut traversal = Traversal::new(
        QueueType::weighted(weight, QueueDiscipline::DepthFirst),
        neighbours(&g),
    );
    traversal.add_step_action(record).add_start_item('r');
    traversal.run(true).unwrap();

    assert_eq!(*visited.borrow(), vec!['r', 'b', 'c', 'a']);
}

#[test]
fn test_unrelated_traversals_visit_independently() {
    let g = diamond_with_cycle();
    let mut first = Traversal::breadth_first(neighbours(&g));
    let mut second = Traversal::depth_first(neighbours(&g));
    first.add_start_item('A');
    second.add_start_item('A');

    assert_eq!(first.run(true).unwrap().items_visited, 4);
    assert_eq!(second.run(true).unwrap().items_visited, 4);
}

#[test]
fn test_if_not_stopping_skips_stopping_items() {
    let g = diamond_with_cycle();
    let (visited, record) = recorder();
    let mut traversal = Traversal::breadth_first(neighbours(&g));
    traversal
        .add_stop_condition(|item: &char, _: &StepContext| *item == 'B')
        .add_step_action(if_not_stopping(record))
        .add_start_item('A');
    traversal.run(true).unwrap();

    assert_eq!(*visited.borrow(), vec!['A']);
}

#[test]
fn test_copy_and_clear_context_value_computers() {
    let g = diamond_with_cycle();
    let mut source = Traversal::breadth_first(neighbours(&g));
    source.add_context_value_computer(FnComputer::new(
        "hops",
        |_: &char| 0_u32,
        |_: &char, v: &u32| v + 1,
    ));

    let mut target = Traversal::breadth_first(neighbours(&g));
    target.copy_context_value_computers(&source);
    assert_eq!(target.context_value_keys().collect::<Vec<_>>(), vec!["hops"]);

    target.clear_context_value_computers();
    assert_eq!(target.context_value_keys().count(), 0);
    assert_eq!(source.context_value_keys().count(), 1);
}

#[test]
fn test_copy_stop_conditions_shares_behaviour() {
    let g = diamond_with_cycle();
    let mut source = Traversal::breadth_first(neighbours(&g));
    source.add_stop_condition(|item: &char, _: &StepContext| *item == 'B');

    let (visited, record) = recorder();
    let mut target = Traversal::breadth_first(neighbours(&g));
    target
        .copy_stop_conditions(&source)
        .add_step_action(record)
        .add_start_item('A');
    target.run(true).unwrap();

    assert_eq!(*visited.borrow(), vec!['A', 'B']);
}

#[test]
fn test_branch_onto_visited_item_is_not_counted() {
    // B branches back to A, which the parent already visited, and on to C.
    let g = graph(&[('A', 'B'), ('B', 'A'), ('B', 'C')]);
    let (visited, record) = recorder();
    let mut traversal = Traversal::breadth_first(branching(&g));
    traversal.add_step_action(record).add_start_item('A');
    let stats = traversal.run(true).unwrap();

    assert_eq!(*visited.borrow(), vec!['A', 'B', 'C']);
    assert_eq!(stats.branches_run, 1);
}

/// Stops once the hop counter it computes reaches `self.0`.
struct HopLimit(u32);

impl ContextValueComputer<u32> for HopLimit {
    type Value = u32;

    fn key(&self) -> &str {
        "hops"
    }

    fn compute_initial(&self, _item: &u32) -> u32 {
        0
    }

    fn compute_next(&self, _next_item: &u32, current_value: &u32) -> u32 {
        current_value + 1
    }
}

impl StopCondition<u32> for HopLimit {
    fn should_stop(&self, _item: &u32, context: &StepContext) -> bool {
        context.value(self).is_some_and(|hops| *hops >= self.0)
    }

    fn context_computer(&self) -> Option<&dyn DynContextValueComputer<u32>> {
        Some(self)
    }
}

#[test]
fn test_clearing_computers_keeps_condition_computer_with_same_key() {
    let mut traversal = Traversal::breadth_first(|item: &u32, _, queuer| {
        if *item < 10 {
            queuer.queue_item(item + 1);
        }
    });
    let visited = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&visited);
    traversal
        .add_stop_condition(HopLimit(2))
        .add_context_value_computer(FnComputer::new(
            "hops",
            |_: &u32| 0_u32,
            |_: &u32, v: &u32| v + 1,
        ))
        .clear_context_value_computers()
        .add_step_action(move |item: &u32, _: &StepContext| sink.borrow_mut().push(*item))
        .add_start_item(0);

    assert_eq!(traversal.context_value_keys().collect::<Vec<_>>(), vec!["hops"]);
    traversal.run(true).unwrap();
    assert_eq!(*visited.borrow(), vec![0, 1, 2]);
}
