//! Best-first k-nearest-neighbor search over the node tree.
//!
//! Nodes enter the queue keyed by the gap between the target and their extent, which
//! never exceeds the distance to anything stored inside. A leaf re-enters keyed by the
//! exact distance of its item, and an item is only accepted once it reaches the front,
//! so items come out in non-decreasing distance.

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{quadtree::Node, util::distance, Point, P2};

enum Candidate<'a, T> {
    Node(&'a Node<T>),
    Item(&'a T),
}

struct Entry<'a, T> {
    bound: f64,
    seq: usize,
    candidate: Candidate<'a, T>,
}

impl<T> PartialEq for Entry<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<'_, T> {}

impl<T> PartialOrd for Entry<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<'_, T> {
    // Reversed so the max-heap pops the smallest bound, oldest first on ties
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .bound
            .total_cmp(&self.bound)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-queue of candidates in push order among equal bounds
struct SearchQueue<'a, T> {
    heap: BinaryHeap<Entry<'a, T>>,
    next_seq: usize,
}

impl<'a, T> SearchQueue<'a, T> {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    fn push(&mut self, bound: f64, candidate: Candidate<'a, T>) {
        self.heap.push(Entry {
            bound,
            seq: self.next_seq,
            candidate,
        });
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<Candidate<'a, T>> {
        self.heap.pop().map(|entry| entry.candidate)
    }
}

/// Collect up to `k` items under `root`, nearest to `target` first
pub(crate) fn nearest<'a, T: Point>(root: &'a Node<T>, target: &P2, k: usize) -> Vec<&'a T> {
    let mut found = Vec::new();
    let mut queue = SearchQueue::new();
    queue.push(0.0, Candidate::Node(root));

    while found.len() < k {
        let Some(candidate) = queue.pop() else {
            break;
        };
        match candidate {
            Candidate::Item(item) => found.push(item),
            Candidate::Node(Node::Leaf { item, .. }) => {
                queue.push(distance(&item.point(), target), Candidate::Item(item));
            }
            Candidate::Node(Node::Internal { children, .. }) => {
                for child in children {
                    if matches!(**child, Node::Empty { .. }) {
                        continue;
                    }
                    queue.push(
                        child.boundary().min_distance(target),
                        Candidate::Node(&**child),
                    );
                }
            }
            Candidate::Node(Node::Empty { .. }) => (),
        }
    }

    found
}
