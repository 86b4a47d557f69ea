use criterion::{criterion_group, criterion_main, Criterion};

use std::rc::Rc;

use gridtrace_core::config::QueueDiscipline;
use gridtrace_traversal::{FnComputer, QueueType, StepContext, Traversal};

/// Neighbours on a `side` x `side` grid with wrap-around, so every node sits
/// on several cycles.
fn torus_neighbours(side: u32) -> impl Fn(u32) -> [u32; 4] {
    move |node| {
        let (row, col) = (node / side, node % side);
        [
            ((row + 1) % side) * side + col,
            ((row + side - 1) % side) * side + col,
            row * side + (col + 1) % side,
            row * side + (col + side - 1) % side,
        ]
    }
}

fn grid_traversal(side: u32, queue_type: QueueType<u32>) -> Traversal<u32> {
    let neighbours = Rc::new(torus_neighbours(side));
    let mut traversal = Traversal::new(queue_type, move |item: &u32, _, queuer| {
        for next in neighbours(*item) {
            queuer.queue_item(next);
        }
    });
    traversal.add_start_item(0);
    traversal
}

fn bench_breadth_first_10k(c: &mut Criterion) {
    c.bench_function("breadth_first_torus_10k", |b| {
        b.iter(|| {
            let mut traversal = grid_traversal(100, QueueType::BreadthFirst);
            traversal.run(true).unwrap()
        });
    });
}

fn bench_depth_first_with_computer_10k(c: &mut Criterion) {
    c.bench_function("depth_first_torus_10k_with_hops", |b| {
        b.iter(|| {
            let mut traversal = grid_traversal(100, QueueType::DepthFirst);
            traversal
                .add_context_value_computer(FnComputer::new(
                    "hops",
                    |_: &u32| 0_u32,
                    |_: &u32, hops: &u32| hops + 1,
                ))
                .add_stop_condition(|_: &u32, context: &StepContext| {
                    context.get::<u32>("hops").is_some_and(|hops| *hops >= 150)
                });
            traversal.run(true).unwrap()
        });
    });
}

fn bench_weighted_10k(c: &mut Criterion) {
    c.bench_function("weighted_torus_10k", |b| {
        b.iter(|| {
            let queue_type =
                QueueType::weighted(|item: &u32| (*item % 7) as i32, QueueDiscipline::DepthFirst);
            let mut traversal = grid_traversal(100, queue_type);
            traversal.run(true).unwrap()
        });
    });
}

fn bench_reset_and_rerun(c: &mut Criterion) {
    let mut traversal = grid_traversal(100, QueueType::BreadthFirst);
    c.bench_function("reset_and_rerun_torus_10k", |b| {
        b.iter(|| {
            traversal.reset().unwrap();
            traversal.run(true).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_breadth_first_10k,
    bench_depth_first_with_computer_10k,
    bench_weighted_10k,
    bench_reset_and_rerun
);
criterion_main!(benches);
