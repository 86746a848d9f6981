//! Callback traits and the error type shared by the heap and its collaborators
//!
//! A [`TreeHeap`](crate::TreeHeap) is parameterized by three capabilities:
//!
//! - [`Comparator`]: a three-way comparison between two payloads (required)
//! - [`ValueFormatter`]: how a payload is rendered by `display` (optional)
//! - [`Reclaimer`]: what happens to payloads still in the heap when it is dropped (optional)
//!
//! Closures implement all three, so ad hoc callbacks need no wrapper type:
//!
//! ```rust
//! use tree_heap::TreeHeap;
//!
//! let mut heap = TreeHeap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! heap.insert(1).unwrap();
//! heap.insert(3).unwrap();
//! heap.insert(2).unwrap();
//! heap.build().unwrap();
//! assert_eq!(heap.extract(), Ok(3));
//! ```

use std::cmp::Ordering;
use std::fmt;

/// Error type for heap operations
///
/// Every variant is a caller-side precondition violation. The heap checks before
/// it mutates, so an `Err` always leaves the heap exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `peek` or `extract` on a heap with no elements
    Empty,
    /// `peek` or `extract` before `build` imposed heap order
    NotBuilt,
    /// `insert` or `build` after the heap was already built
    AlreadyBuilt,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::NotBuilt => {
                write!(f, "heap order has not been imposed yet (call build first)")
            }
            HeapError::AlreadyBuilt => {
                write!(f, "heap has already been built and no longer accepts inserts")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Three-way comparison between two payloads
///
/// Must be consistent with a total order: the heap relies on
/// `compare(a, b) == Less` meaning `a` belongs closer to the root than `b`.
pub trait Comparator<T> {
    /// Compares `a` against `b`
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders payloads by their `Ord` implementation (a min-heap)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Orders payloads by the reverse of their `Ord` implementation (a max-heap)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReverseOrder;

impl<T: Ord> Comparator<T> for ReverseOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.cmp(a)
    }
}

/// Renders a single payload for `display` and `display_debug`
pub trait ValueFormatter<T> {
    /// Writes `value` into `f`
    fn format(&self, value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T, F> ValueFormatter<T> for F
where
    F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    fn format(&self, value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self(value, f)
    }
}

/// Formats payloads with their `Display` implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayFormatter;

impl<T: fmt::Display> ValueFormatter<T> for DisplayFormatter {
    fn format(&self, value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", value)
    }
}

/// Formats payloads with their `Debug` implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugFormatter;

impl<T: fmt::Debug> ValueFormatter<T> for DebugFormatter {
    fn format(&self, value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", value)
    }
}

/// Receives every payload still held by a heap when the heap is dropped
///
/// Each remaining payload is handed over exactly once. Payloads that leave
/// through `extract` belong to the caller and never reach the reclaimer.
pub trait Reclaimer<T> {
    /// Takes ownership of a payload being torn down
    fn reclaim(&mut self, value: T);
}

impl<T, F> Reclaimer<T> for F
where
    F: FnMut(T),
{
    fn reclaim(&mut self, value: T) {
        self(value)
    }
}

/// Drops payloads normally
#[derive(Debug, Default, Clone, Copy)]
pub struct DropReclaimer;

impl<T> Reclaimer<T> for DropReclaimer {
    fn reclaim(&mut self, value: T) {
        drop(value);
    }
}

/// Adapter that lets a [`ValueFormatter`] drive `{}` formatting
pub(crate) struct Formatted<'a, T, F: ?Sized> {
    pub(crate) value: &'a T,
    pub(crate) formatter: &'a F,
}

impl<T, F: ValueFormatter<T> + ?Sized> fmt::Display for Formatted<'_, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.formatter.format(self.value, f)
    }
}
