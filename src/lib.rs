// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A priority queue implemented with a binary heap.
//!
//! A `PriorityHeap` can be used wherever a [`BinaryHeap`][bh] can, but accepts custom
//! comparators and lets you choose, at construction time, between a growable backing store
//! and a fixed-capacity one that treats overflow as a contract violation.
//!
//! Insertion and popping the top item are `O(log n)`. Retrieving the top item is `O(1)`.
//!
//! The two standard orderings are provided by [`ascending`](fn.ascending.html) (a min-heap)
//! and [`descending`](fn.descending.html) (a max-heap); any other [`Compare`][cmp]
//! implementation can be injected instead.
//!
//! A `PriorityHeap` is not synchronized: sharing one between threads requires external
//! mutual exclusion, which Rust's ownership rules enforce (all mutating operations take
//! `&mut self`).
//!
//! [bh]: https://doc.rust-lang.org/stable/std/collections/struct.BinaryHeap.html
//! [cmp]: https://contain-rs.github.io/compare/compare/trait.Compare.html

extern crate compare;
#[cfg(test)] extern crate rand;

use std::fmt::{self, Debug};

use compare::{Compare, Natural, Rev, natural};

// The heap is a complete binary tree stored in a linear array using a Vec.
// Here's an example of the layout of a tree with 7 items where the numbers
// represent the *offsets* in the array:
//
//            0
//          /   \
//         1     2
//        / \   / \
//       3   4 5   6
//
// For the item at offset i, its parent is at (i - 1) / 2 and its children
// are at 2i + 1 and 2i + 2. The item at offset 0 is the top of the heap:
// no other item compares less than it under the heap's comparator.
//
// The heap tracks its slot budget in a separate `capacity` field rather
// than relying on `Vec::capacity`, because the allocator is free to round
// allocations up while the growth rule and the fixed-capacity overflow
// fault are defined against an exact slot count.

fn parent(x: usize) -> usize {
    debug_assert!(x > 0);
    (x - 1) / 2
}

/// Next slot budget under the 1.5x growth rule: `ceil(n * 1.5)` in integer
/// arithmetic. The 0 -> 1 step is forced so the budget strictly increases
/// from any starting point.
fn grown_capacity(n: usize) -> usize {
    if n == 0 { 1 } else { n + (n + 1) / 2 }
}

/// Returns the comparator ordering a heap so that the *smallest* item is on top.
pub fn ascending<T: Ord>() -> Natural<T> { natural() }

/// Returns the comparator ordering a heap so that the *greatest* item is on top.
pub fn descending<T: Ord>() -> Rev<Natural<T>> { natural().rev() }

/// A priority queue implemented with a binary heap.
///
/// The item that the comparator orders *less than* all others sits at the
/// top of the heap and is the one returned by [`peek`](#method.peek) and removed
/// by [`pop`](#method.pop). With the [`ascending`](fn.ascending.html) comparator
/// this is a min-heap; with [`descending`](fn.descending.html), a max-heap.
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the heap's
/// comparator, changes while it is in the heap. This is normally only
/// possible through `Cell`, `RefCell`, global state, I/O, or unsafe code.
/// An inconsistent comparator can leave the heap arbitrarily ordered, but
/// never causes an out-of-bounds access.
#[derive(Clone)]
pub struct PriorityHeap<T, C: Compare<T> = Natural<T>> {
    data: Vec<T>,
    capacity: usize,
    growable: bool,
    cmp: C,
}

impl<T, C: Compare<T> + Default> Default for PriorityHeap<T, C> {
    #[inline]
    fn default() -> PriorityHeap<T, C> {
        Self::growable(C::default())
    }
}

impl<T: Ord> PriorityHeap<T> {
    /// Returns an empty growable heap ordered according to the natural order of its
    /// items, so that the smallest item is on top.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_heap::PriorityHeap;
    ///
    /// let heap = PriorityHeap::<u32>::new();
    /// assert!(heap.is_empty());
    /// ```
    pub fn new() -> PriorityHeap<T> { Self::growable(natural()) }
}

impl<T, C: Compare<T>> PriorityHeap<T, C> {
    /// Returns an empty heap with the given capacity, comparator, and growth policy.
    ///
    /// A growable heap enlarges its backing store when a push finds it full; a
    /// fixed heap treats that push as a contract violation and panics. The policy
    /// cannot be changed after construction.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_policy(capacity: usize, cmp: C, growable: bool) -> PriorityHeap<T, C> {
        assert!(capacity > 0, "a heap must be created with a positive capacity");
        PriorityHeap {
            data: Vec::with_capacity(capacity),
            capacity: capacity,
            growable: growable,
            cmp: cmp,
        }
    }

    /// Returns an empty fixed-capacity heap ordered according to the given comparator.
    ///
    /// The heap holds at most `capacity` items; pushing onto a full one panics.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_heap::{PriorityHeap, ascending};
    ///
    /// let mut heap = PriorityHeap::fixed(3, ascending());
    /// heap.push(2);
    /// heap.push(1);
    /// assert_eq!(*heap.peek(), 1);
    /// ```
    pub fn fixed(capacity: usize, cmp: C) -> PriorityHeap<T, C> {
        Self::with_policy(capacity, cmp, false)
    }

    /// Returns an empty growable heap ordered according to the given comparator.
    ///
    /// The heap starts with a single slot and enlarges its backing store by a
    /// factor of 1.5 (rounded up) whenever a push finds it full.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_heap::{PriorityHeap, descending};
    ///
    /// let mut heap = PriorityHeap::growable(descending());
    /// for i in 0..100 {
    ///     heap.push(i);
    /// }
    /// assert_eq!(*heap.peek(), 99);
    /// ```
    pub fn growable(cmp: C) -> PriorityHeap<T, C> {
        Self::with_policy(1, cmp, true)
    }

    /// Returns the number of items in the heap.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap contains no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of slots the heap can fill before it must grow or,
    /// for a fixed heap, before pushes panic.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the heap grows on overflow rather than panicking.
    pub fn is_growable(&self) -> bool {
        self.growable
    }

    /// Returns a reference to the top item of the heap.
    ///
    /// Peeking does not modify the heap: two peeks with no push or pop in
    /// between return the same item.
    ///
    /// # Panics
    ///
    /// Panics if the heap is empty. An empty peek is a precondition violation
    /// on the caller's part, not a recoverable condition, so no sentinel is
    /// returned; check [`is_empty`](#method.is_empty) first.
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_heap::PriorityHeap;
    ///
    /// let mut heap = PriorityHeap::new();
    /// heap.push(4);
    /// heap.push(1);
    /// assert_eq!(*heap.peek(), 1);
    /// ```
    pub fn peek(&self) -> &T {
        debug_assert!(self.is_valid());
        match self.data.first() {
            Some(top) => top,
            None => panic!("peek on an empty heap"),
        }
    }

    /// Pushes an item onto the heap.
    ///
    /// If the heap is full, a growable heap enlarges its slot budget to
    /// `ceil(capacity * 1.5)` before inserting; a fixed heap panics and the
    /// item is not inserted.
    ///
    /// # Panics
    ///
    /// Panics if the heap is fixed-capacity and full. Overflowing a fixed heap
    /// is a precondition violation on the caller's part; it is reported loudly
    /// rather than degraded into a silent drop.
    pub fn push(&mut self, item: T) {
        debug_assert!(self.is_valid());
        if self.data.len() == self.capacity {
            if self.growable {
                self.grow();
            } else {
                panic!("push on a full fixed-capacity heap (capacity {})", self.capacity);
            }
        }
        self.data.push(item);
        let last = self.data.len() - 1;
        self.sift_up(last);
        debug_assert!(self.is_valid());
    }

    /// Removes the top item from the heap and returns it.
    ///
    /// The freed slot stays allocated; a fixed heap that pops can accept a
    /// push again.
    ///
    /// # Panics
    ///
    /// Panics if the heap is empty, like [`peek`](#method.peek).
    ///
    /// # Examples
    ///
    /// ```
    /// use priority_heap::PriorityHeap;
    ///
    /// let mut heap = PriorityHeap::new();
    /// heap.push(4);
    /// heap.push(1);
    /// assert_eq!(heap.pop(), 1);
    /// assert_eq!(heap.pop(), 4);
    /// ```
    pub fn pop(&mut self) -> T {
        if self.data.is_empty() {
            panic!("pop on an empty heap");
        }
        debug_assert!(self.is_valid());
        // Move the last item into the root slot and let it sink back down.
        let top = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        debug_assert!(self.is_valid());
        top
    }

    /// Enlarges the slot budget by the 1.5x growth rule.
    fn grow(&mut self) {
        let new_capacity = grown_capacity(self.capacity);
        self.data.reserve_exact(new_capacity - self.data.len());
        self.capacity = new_capacity;
    }

    /// The item at `index` may compare less than its parent; swap it upwards
    /// until the heap order is restored.
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let par = parent(index);
            if self.cmp.compares_lt(&self.data[index], &self.data[par]) {
                self.data.swap(index, par);
                index = par;
            } else {
                break;
            }
        }
    }

    /// The item at `index` may compare greater than one of its children; swap
    /// it downwards until the heap order is restored. When both children
    /// outrank the item, the smaller of the two is promoted, keeping the heap
    /// order between them.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = index * 2 + 1;
            let right = index * 2 + 2;
            let mut winner = index;
            if left < len && self.cmp.compares_lt(&self.data[left], &self.data[winner]) {
                winner = left;
            }
            if right < len && self.cmp.compares_lt(&self.data[right], &self.data[winner]) {
                winner = right;
            }
            if winner == index { return; }
            self.data.swap(index, winner);
            index = winner;
        }
    }

    /// Checks if the heap is valid.
    ///
    /// The heap is valid if no item compares less than its parent (ties are
    /// fine either way; the comparison is strict) and the item count fits the
    /// slot budget.
    fn is_valid(&self) -> bool {
        self.data.len() <= self.capacity &&
            (1..self.data.len()).all(|i| {
                !self.cmp.compares_lt(&self.data[i], &self.data[parent(i)])
            })
    }
}

impl<T: Debug, C: Compare<T>> Debug for PriorityHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PriorityHeap")
            .field("data", &self.data)
            .field("capacity", &self.capacity)
            .field("growable", &self.growable)
            .finish()
    }
}
