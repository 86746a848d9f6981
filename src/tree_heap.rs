//! Tree Heap implementation
//!
//! A binary min-heap stored as a linked complete binary tree rather than a
//! flat array. Where an array heap finds slots with `2i + 1`, `2i + 2` and
//! `(i - 1) / 2`, this heap keeps two frontier sequences of node references:
//!
//! - an insertion FIFO whose front is the next node to receive a child
//! - an extraction LIFO whose top is the structurally-last node
//!
//! The heap has two phases. While **populating**, `insert` only grows the
//! shape; no ordering is imposed. A single `build` then heapifies the whole
//! tree bottom-up in linear time, after which `peek` and `extract` operate on
//! an ordered heap. Inserting after `build` is rejected.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `insert`  | O(1)       |
//! | `build`   | O(n)       |
//! | `peek`    | O(1)       |
//! | `extract` | O(log n)   |
//!
//! # Example
//!
//! ```rust
//! use tree_heap::TreeHeap;
//!
//! let mut heap = TreeHeap::new();
//! for v in [5, 3, 8, 1, 9, 2] {
//!     heap.insert(v).unwrap();
//! }
//! heap.build().unwrap();
//!
//! assert_eq!(*heap.peek().unwrap(), 1);
//! assert_eq!(heap.extract(), Ok(1));
//! assert_eq!(heap.extract(), Ok(2));
//! assert_eq!(heap.size(), 4);
//! ```

use crate::frontier::{ExtractionStack, InsertionQueue};
use crate::node::{attach_left, attach_right, borrow_value, swap_values, NodeRef, TreeNode};
use crate::traits::{
    Comparator, DebugFormatter, DropReclaimer, HeapError, NaturalOrder, Reclaimer, ValueFormatter,
};
use crate::tree::Tree;
use log::{debug, trace};
use std::cell::Ref;
use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::rc::Rc;

/// Lifecycle phase of a [`TreeHeap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting inserts; only the shape invariant holds
    Populating,
    /// Built; heap order holds and only `peek`/`extract` are allowed
    Ordered,
}

/// A min-heap over a linked complete binary tree
///
/// `C` decides the order, `F` renders payloads for [`display`](Self::display),
/// and `R` receives the payloads still inside the heap when it is dropped.
pub struct TreeHeap<T, C = NaturalOrder, F = DebugFormatter, R = DropReclaimer>
where
    R: Reclaimer<T>,
{
    tree: Tree<T>,
    len: usize,
    insertion: InsertionQueue<T>,
    extraction: ExtractionStack<T>,
    comparator: C,
    formatter: F,
    reclaimer: R,
    phase: Phase,
}

impl<T: Ord> TreeHeap<T> {
    /// Creates an empty heap ordered by `T: Ord`
    pub fn new() -> Self {
        Self::with_callbacks(DebugFormatter, NaturalOrder, DropReclaimer)
    }

    /// Inserts every value and builds the heap
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut heap: Self = values.into_iter().collect();
        heap.impose_order();
        heap
    }
}

impl<T, C: Comparator<T>> TreeHeap<T, C> {
    /// Creates an empty heap ordered by `comparator`
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_callbacks(DebugFormatter, comparator, DropReclaimer)
    }
}

impl<T, C, F, R> TreeHeap<T, C, F, R>
where
    C: Comparator<T>,
    R: Reclaimer<T>,
{
    /// Creates an empty heap from a formatter, a comparator and a reclaimer
    pub fn with_callbacks(formatter: F, comparator: C, reclaimer: R) -> Self {
        Self {
            tree: Tree::new(),
            len: 0,
            insertion: InsertionQueue::new(),
            extraction: ExtractionStack::new(),
            comparator,
            formatter,
            reclaimer,
            phase: Phase::Populating,
        }
    }

    /// Adds `value` at the next open slot of the complete tree
    ///
    /// No ordering is imposed; call [`build`](Self::build) once all values
    /// are in.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::AlreadyBuilt`] once the heap has been built.
    pub fn insert(&mut self, value: T) -> Result<(), HeapError> {
        if self.phase == Phase::Ordered {
            return Err(HeapError::AlreadyBuilt);
        }
        self.attach(value);
        Ok(())
    }

    fn attach(&mut self, value: T) {
        let node = TreeNode::new_ref(value);

        if self.tree.root().is_none() {
            trace!("attach: new node becomes root");
            self.tree.set_root(Some(Rc::clone(&node)));
        } else {
            let front = self
                .insertion
                .peek_front()
                .cloned()
                .expect("non-empty tree must have an insertion frontier");

            let (has_left, has_right) = {
                let f = front.borrow();
                (f.has_left(), f.has_right())
            };
            if !has_left {
                trace!("attach: left child of frontier node (len {})", self.len);
                attach_left(&front, &node);
            } else if !has_right {
                trace!("attach: right child of frontier node (len {})", self.len);
                attach_right(&front, &node);
                // The frontier node is full: retire it to the extraction stack
                if let Some(full) = self.insertion.dequeue() {
                    debug_assert!(Rc::ptr_eq(&full, &front));
                    self.extraction.push(full);
                }
            } else {
                panic!("frontier node has no open child slot");
            }
        }

        self.insertion.enqueue(node);
        self.len += 1;
        self.tree.set_size(self.len);
    }

    /// Imposes heap order on the populated tree
    ///
    /// Heapifies bottom-up (left subtree, right subtree, then sift the node
    /// itself), then moves the remaining insertion frontier onto the
    /// extraction stack so its top is the structurally-last node.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::AlreadyBuilt`] if called a second time.
    pub fn build(&mut self) -> Result<(), HeapError> {
        if self.phase == Phase::Ordered {
            return Err(HeapError::AlreadyBuilt);
        }
        self.impose_order();
        Ok(())
    }

    fn impose_order(&mut self) {
        debug!("build: heapifying {} nodes", self.len);
        if let Some(root) = self.tree.root().cloned() {
            self.heapify(&root);
        }

        while let Some(node) = self.insertion.dequeue() {
            self.extraction.push(node);
        }
        debug_assert!(self
            .extraction
            .peek_top()
            .map_or(true, |last| last.borrow().is_leaf()));
        self.phase = Phase::Ordered;
        debug!(
            "build: done, extraction stack holds {} nodes",
            self.extraction.len()
        );
    }

    fn heapify(&self, node: &NodeRef<T>) {
        let (left, right) = {
            let n = node.borrow();
            (n.left(), n.right())
        };
        if let Some(left) = left {
            self.heapify(&left);
        }
        if let Some(right) = right {
            self.heapify(&right);
        }
        self.bubble_down(node);
    }

    /// Sifts the value at `node` down until neither child is smaller
    ///
    /// Both child subtrees must already be heap-ordered. Values move between
    /// nodes; links never change, so the frontier bookkeeping stays valid.
    fn bubble_down(&self, node: &NodeRef<T>) {
        let (left, right) = {
            let n = node.borrow();
            (n.left(), n.right())
        };

        let mut smallest = Rc::clone(node);
        if let Some(left) = left {
            if self.less(&left, &smallest) {
                smallest = left;
            }
        }
        if let Some(right) = right {
            if self.less(&right, &smallest) {
                smallest = right;
            }
        }

        if !Rc::ptr_eq(&smallest, node) {
            trace!("bubble_down: swapping with smaller child");
            swap_values(node, &smallest);
            self.bubble_down(&smallest);
        }
    }

    fn less(&self, a: &NodeRef<T>, b: &NodeRef<T>) -> bool {
        self.comparator.compare(&borrow_value(a), &borrow_value(b)) == Ordering::Less
    }

    fn check_readable(&self) -> Result<(), HeapError> {
        if self.phase == Phase::Populating {
            return Err(HeapError::NotBuilt);
        }
        if self.len == 0 {
            return Err(HeapError::Empty);
        }
        Ok(())
    }

    /// Returns the minimum value without removing it
    ///
    /// # Errors
    ///
    /// [`HeapError::NotBuilt`] before `build`, [`HeapError::Empty`] when
    /// there is nothing to return.
    pub fn peek(&self) -> Result<Ref<'_, T>, HeapError> {
        self.check_readable()?;
        let root = self.tree.root().expect("non-empty heap must have root");
        Ok(borrow_value(root))
    }

    /// Removes and returns the minimum value
    ///
    /// The structurally-last node's value is swapped into the root, the last
    /// node is pruned, and the root is sifted down.
    ///
    /// # Errors
    ///
    /// [`HeapError::NotBuilt`] before `build`, [`HeapError::Empty`] when
    /// there is nothing to return.
    pub fn extract(&mut self) -> Result<T, HeapError> {
        self.check_readable()?;

        let root = self
            .tree
            .root()
            .cloned()
            .expect("non-empty heap must have root");
        let last = self
            .extraction
            .pop()
            .expect("extraction stack must hold every node of a built heap");

        if self.len == 1 {
            debug_assert!(Rc::ptr_eq(&root, &last), "single node must be the root");
        } else {
            swap_values(&root, &last);
        }
        drop(root);

        self.tree.prune_leaf(&last);
        self.len -= 1;
        self.tree.set_size(self.len);

        let value = match Rc::try_unwrap(last) {
            Ok(cell) => cell.into_inner().into_value(),
            Err(_) => panic!("pruned node is still referenced"),
        };

        if let Some(root) = self.tree.root().cloned() {
            self.bubble_down(&root);
        }

        #[cfg(debug_assertions)]
        {
            let count = self.tree.count_reachable();
            assert_eq!(
                count, self.len,
                "Length mismatch after extract: counted {} nodes but len is {}",
                count, self.len
            );
        }

        Ok(value)
    }

    /// Returns the number of values in the heap
    pub fn size(&self) -> usize {
        self.len
    }

    /// Alias of [`size`](Self::size)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_built(&self) -> bool {
        self.phase == Phase::Ordered
    }

    /// Builds if needed, then extracts every value in order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        if self.phase == Phase::Populating {
            self.impose_order();
        }
        let mut sorted = Vec::with_capacity(self.len);
        while let Ok(value) = self.extract() {
            sorted.push(value);
        }
        sorted
    }

    /// Counts the nodes reachable from the root by walking the tree
    pub fn count_nodes(&self) -> usize {
        self.tree.count_reachable()
    }

    /// Whether the linked tree is a complete binary tree
    pub fn is_complete(&self) -> bool {
        self.tree.is_complete()
    }

    /// Whether every child compares greater than or equal to its parent
    pub fn is_heap_ordered(&self) -> bool {
        self.tree.is_heap_ordered(&self.comparator)
    }

    /// Lengths of the insertion FIFO and the extraction LIFO
    pub fn frontier_sizes(&self) -> (usize, usize) {
        (self.insertion.len(), self.extraction.len())
    }
}

impl<T, C, F, R> TreeHeap<T, C, F, R>
where
    C: Comparator<T>,
    F: ValueFormatter<T>,
    R: Reclaimer<T>,
{
    /// Writes the tree in bracketed pre-order form, e.g. `[7 [9] [10]]`
    pub fn display<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        write!(sink, "{}", self.tree.display(&self.formatter))
    }

    /// Writes both counts, the tree level by level, and the stack size
    pub fn display_debug<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "heap size: {}", self.len)?;
        writeln!(sink, "tree size: {}", self.tree.size())?;
        write!(sink, "{}", self.tree.display_debug(&self.formatter))?;
        writeln!(sink, "stack size: {}", self.extraction.len())
    }
}

impl<T, C, F, R> fmt::Display for TreeHeap<T, C, F, R>
where
    F: ValueFormatter<T>,
    R: Reclaimer<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree.display(&self.formatter))
    }
}

impl<T, C, F, R> fmt::Debug for TreeHeap<T, C, F, R>
where
    R: Reclaimer<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeHeap")
            .field("len", &self.len)
            .field("phase", &self.phase)
            .field("insertion", &self.insertion)
            .field("extraction", &self.extraction)
            .finish()
    }
}

impl<T: Ord> Default for TreeHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for TreeHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<T, C, F, R> Extend<T> for TreeHeap<T, C, F, R>
where
    C: Comparator<T>,
    R: Reclaimer<T>,
{
    /// # Panics
    ///
    /// Panics if the heap has already been built.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        assert!(
            self.phase == Phase::Populating,
            "cannot extend a heap after build"
        );
        for value in iter {
            self.attach(value);
        }
    }
}

impl<T, C, F, R> Drop for TreeHeap<T, C, F, R>
where
    R: Reclaimer<T>,
{
    fn drop(&mut self) {
        // Frontier handles must go first so every node is uniquely owned
        self.insertion.clear();
        self.extraction.clear();
        self.tree.drain_into(&mut self.reclaimer);
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_basic_operations() {
        let mut heap = TreeHeap::new();

        assert!(heap.is_empty());
        assert_eq!(heap.size(), 0);

        heap.insert(3).unwrap();
        heap.insert(1).unwrap();
        heap.insert(2).unwrap();
        heap.build().unwrap();

        assert!(!heap.is_empty());
        assert_eq!(heap.size(), 3);
        assert_eq!(*heap.peek().unwrap(), 1);

        assert_eq!(heap.extract(), Ok(1));
        assert_eq!(heap.extract(), Ok(2));
        assert_eq!(heap.extract(), Ok(3));
        assert_eq!(heap.extract(), Err(HeapError::Empty));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_phase_errors() {
        let mut heap = TreeHeap::new();
        heap.insert(4).unwrap();

        assert_eq!(heap.phase(), Phase::Populating);
        assert_eq!(heap.peek().err(), Some(HeapError::NotBuilt));
        assert_eq!(heap.extract(), Err(HeapError::NotBuilt));

        heap.build().unwrap();
        assert!(heap.is_built());
        assert_eq!(heap.build(), Err(HeapError::AlreadyBuilt));
        assert_eq!(heap.insert(5), Err(HeapError::AlreadyBuilt));

        // Rejected calls leave the heap untouched
        assert_eq!(heap.size(), 1);
        assert_eq!(heap.extract(), Ok(4));
    }

    #[test]
    fn test_build_on_empty_heap() {
        let mut heap: TreeHeap<i32> = TreeHeap::new();
        heap.build().unwrap();
        assert_eq!(heap.peek().err(), Some(HeapError::Empty));
        assert_eq!(heap.extract(), Err(HeapError::Empty));
        assert_eq!(heap.frontier_sizes(), (0, 0));
    }

    #[test]
    fn test_frontier_bookkeeping() {
        let mut heap = TreeHeap::new();
        for v in 0..6 {
            heap.insert(v).unwrap();
        }
        // 0 and 1 are full; 2 has only a left child, so it stays in the FIFO
        assert_eq!(heap.frontier_sizes(), (4, 2));

        heap.build().unwrap();
        assert_eq!(heap.frontier_sizes(), (0, 6));
    }

    #[test]
    fn test_insert_keeps_shape_without_order() {
        let mut heap = TreeHeap::new();
        for v in (0..10).rev() {
            heap.insert(v).unwrap();
            assert!(heap.is_complete());
            assert_eq!(heap.count_nodes(), heap.size());
        }
        assert!(!heap.is_heap_ordered());

        heap.build().unwrap();
        assert!(heap.is_heap_ordered());
    }

    #[test]
    fn test_custom_comparator_max_heap() {
        let mut heap = TreeHeap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
        for v in [4, 9, 1, 7] {
            heap.insert(v).unwrap();
        }
        heap.build().unwrap();
        assert_eq!(heap.extract(), Ok(9));
        assert_eq!(heap.extract(), Ok(7));
        assert_eq!(heap.extract(), Ok(4));
        assert_eq!(heap.extract(), Ok(1));
    }

    #[test]
    fn test_display() {
        let mut heap = TreeHeap::from_values([10, 9, 7]);
        let mut out = Vec::new();
        heap.display(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[7 [9] [10]]");
        assert_eq!(heap.to_string(), "[7 [9] [10]]");

        let mut debug = Vec::new();
        heap.display_debug(&mut debug).unwrap();
        assert_eq!(
            String::from_utf8(debug).unwrap(),
            "heap size: 3\ntree size: 3\n0: 7\n1: 9 10\nstack size: 3\n"
        );

        heap.extract().unwrap();
        assert_eq!(heap.to_string(), "[9 [10]]");
    }

    #[test]
    fn test_reclaimer_sees_remaining_values_once() {
        let reclaimed = RefCell::new(Vec::new());
        {
            let mut heap = TreeHeap::with_callbacks(
                DebugFormatter,
                NaturalOrder,
                |v: i32| reclaimed.borrow_mut().push(v),
            );
            for v in [6, 2, 4, 8, 5] {
                heap.insert(v).unwrap();
            }
            heap.build().unwrap();
            assert_eq!(heap.extract(), Ok(2));
        }
        let mut reclaimed = reclaimed.into_inner();
        reclaimed.sort();
        assert_eq!(reclaimed, vec![4, 5, 6, 8]);
    }

    #[test]
    fn test_reclaimer_on_unbuilt_heap() {
        let reclaimed = RefCell::new(0);
        {
            let mut heap = TreeHeap::with_callbacks(
                DebugFormatter,
                NaturalOrder,
                |_: u8| *reclaimed.borrow_mut() += 1,
            );
            for v in 0..20 {
                heap.insert(v).unwrap();
            }
        }
        assert_eq!(reclaimed.into_inner(), 20);
    }

    #[test]
    fn test_into_sorted_vec() {
        let heap: TreeHeap<i32> = [3, 1, 4, 1, 5, 9, 2, 6].into_iter().collect();
        assert!(!heap.is_built());
        assert_eq!(heap.into_sorted_vec(), vec![1, 1, 2, 3, 4, 5, 6, 9]);
    }

    #[test]
    #[should_panic(expected = "cannot extend a heap after build")]
    fn test_extend_after_build_panics() {
        let mut heap = TreeHeap::from_values([1, 2]);
        heap.extend([3]);
    }
}
