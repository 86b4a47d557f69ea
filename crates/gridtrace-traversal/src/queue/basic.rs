//! Depth-first (stack) and breadth-first (FIFO) queues.

use std::collections::VecDeque;

use super::TraversalQueue;

/// LIFO queue: the most recently added item comes out first.
#[derive(Debug, Clone)]
pub struct DepthFirstQueue<T> {
    items: Vec<T>,
}

impl<T> DepthFirstQueue<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Default for DepthFirstQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TraversalQueue<T> for DepthFirstQueue<T> {
    fn add(&mut self, item: T) -> bool {
        self.items.push(item);
        true
    }

    fn next(&mut self) -> Option<T> {
        self.items.pop()
    }

    fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

/// FIFO queue: items come out in the order they were added.
#[derive(Debug, Clone)]
pub struct BreadthFirstQueue<T> {
    items: VecDeque<T>,
}

impl<T> BreadthFirstQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> Default for BreadthFirstQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TraversalQueue<T> for BreadthFirstQueue<T> {
    fn add(&mut self, item: T) -> bool {
        self.items.push_back(item);
        true
    }

    fn next(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}
