use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use crate::error::EmptyQueueError;
use crate::types::request::{Floor, FloorRequest};

/// Heap entry carrying the comparison it is ordered by. `Ord` is reversed so
/// that `BinaryHeap`, a max-heap, yields the element that compares `Less`.
#[derive(Clone)]
struct Keyed<T> {
    item: T,
    cmp: fn(&T, &T) -> Ordering,
}

impl<T> Ord for Keyed<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.cmp)(&other.item, &self.item)
    }
}

impl<T> PartialOrd for Keyed<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Keyed<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Keyed<T> {}

/// Binary heap ordered by a comparison function. The head is the element
/// that compares `Less` than every other one.
///
/// Ties are not stable: two elements comparing `Equal` may pop in either
/// order.
#[derive(Clone)]
pub struct StopHeap<T> {
    heap: BinaryHeap<Keyed<T>>,
    cmp: fn(&T, &T) -> Ordering,
}

impl<T> StopHeap<T> {
    pub fn new(cmp: fn(&T, &T) -> Ordering) -> Self {
        StopHeap {
            heap: BinaryHeap::new(),
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.heap.push(Keyed {
            item,
            cmp: self.cmp,
        });
    }

    pub fn peek(&self) -> Result<&T, EmptyQueueError> {
        self.heap.peek().map(|k| &k.item).ok_or(EmptyQueueError)
    }

    pub fn pop(&mut self) -> Result<T, EmptyQueueError> {
        self.heap.pop().map(|k| k.item).ok_or(EmptyQueueError)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Contents in pop order, without draining the heap.
    pub fn to_sorted_vec(&self) -> Vec<&T> {
        let mut sorted: Vec<&T> = self.heap.iter().map(|k| &k.item).collect();
        sorted.sort_by(|a, b| (self.cmp)(a, b));
        sorted
    }
}

impl<T: fmt::Debug> fmt::Debug for StopHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_sorted_vec()).finish()
    }
}

/// Pending stops for one travel direction.
pub type DirectionalQueue = StopHeap<FloorRequest>;

impl DirectionalQueue {
    /// Lowest floor first, for upward travel.
    pub fn ascending() -> Self {
        StopHeap::new(|a: &FloorRequest, b: &FloorRequest| a.floor.cmp(&b.floor))
    }

    /// Highest floor first, for downward travel.
    pub fn descending() -> Self {
        StopHeap::new(|a: &FloorRequest, b: &FloorRequest| b.floor.cmp(&a.floor))
    }

    pub fn peek_floor(&self) -> Option<Floor> {
        self.peek().ok().map(|r| r.floor)
    }

    pub fn floors(&self) -> Vec<Floor> {
        self.to_sorted_vec().into_iter().map(|r| r.floor).collect()
    }
}
