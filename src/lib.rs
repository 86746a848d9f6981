//! Linked Complete-Tree Heap for Rust
//!
//! This crate provides a binary min-heap that lives in an explicit linked
//! binary tree instead of a flat array. Shape is kept complete by two frontier
//! sequences of node references rather than by index arithmetic:
//!
//! - **Insertion FIFO**: the front node is the next one to receive a child
//! - **Extraction LIFO**: the top node is the structurally-last node of the tree
//!
//! # Phases
//!
//! - **Populating**: `insert` adds values in O(1), keeping the tree complete but unordered
//! - **Ordered**: a single `build` heapifies bottom-up in O(n); `peek` is O(1) and `extract` is O(log n)
//!
//! # Example
//!
//! ```rust
//! use tree_heap::{HeapError, TreeHeap};
//!
//! let mut heap = TreeHeap::new();
//! heap.insert(5).unwrap();
//! heap.insert(3).unwrap();
//! heap.insert(8).unwrap();
//! heap.build().unwrap();
//!
//! assert_eq!(*heap.peek().unwrap(), 3);
//! assert_eq!(heap.extract(), Ok(3));
//! assert_eq!(heap.insert(1), Err(HeapError::AlreadyBuilt));
//! ```

mod frontier;
mod node;
mod tree;

pub mod traits;
pub mod tree_heap;

// Re-export the main types for convenience
pub use traits::{
    Comparator, DebugFormatter, DisplayFormatter, DropReclaimer, HeapError, NaturalOrder,
    Reclaimer, ReverseOrder, ValueFormatter,
};
pub use tree_heap::{Phase, TreeHeap};
