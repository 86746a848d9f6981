//! The tree container
//!
//! [`Tree`] owns the root node and a node count. It knows nothing about heap
//! order or about which slot is open next; the heap drives all of that and
//! only asks the tree to set its root, prune leaves, and mirror the count.

use crate::node::{NodeRef, OptNodeRef};
use crate::traits::{Comparator, Formatted, Reclaimer, ValueFormatter};
use log::trace;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// A linked binary tree with an externally maintained size
#[derive(Debug)]
pub(crate) struct Tree<T> {
    root: OptNodeRef<T>,
    size: usize,
}

impl<T> Tree<T> {
    pub(crate) fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    pub(crate) fn root(&self) -> Option<&NodeRef<T>> {
        self.root.as_ref()
    }

    /// Installs `node` as the root, returning the previous root
    pub(crate) fn set_root(&mut self, node: OptNodeRef<T>) -> OptNodeRef<T> {
        if let Some(ref new_root) = node {
            new_root.borrow_mut().set_parent(Weak::new());
        }
        std::mem::replace(&mut self.root, node)
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Detaches a childless node from the tree
    ///
    /// The node loses its parent link and the parent (or the tree, for the
    /// root) drops its owning reference. The size is left for the caller to
    /// update.
    ///
    /// # Panics
    ///
    /// Panics if `node` still has a child, or if it is neither the root nor
    /// linked under a parent.
    pub(crate) fn prune_leaf(&mut self, node: &NodeRef<T>) {
        assert!(node.borrow().is_leaf(), "prune_leaf: node still has a child");

        let parent = node.borrow().parent();
        match parent {
            None => {
                let is_root = self.root.as_ref().is_some_and(|r| Rc::ptr_eq(r, node));
                assert!(is_root, "prune_leaf: node is not attached to this tree");
                trace!("pruning root");
                self.root = None;
            }
            Some(parent) => {
                let mut p = parent.borrow_mut();
                if p.left().is_some_and(|l| Rc::ptr_eq(&l, node)) {
                    trace!("pruning left child");
                    p.set_left(None);
                } else if p.right().is_some_and(|r| Rc::ptr_eq(&r, node)) {
                    trace!("pruning right child");
                    p.set_right(None);
                } else {
                    panic!("prune_leaf: parent does not link back to node");
                }
            }
        }
        node.borrow_mut().set_parent(Weak::new());
    }

    /// Counts the nodes reachable from the root
    pub(crate) fn count_reachable(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<NodeRef<T>> = self.root.iter().cloned().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            let n = node.borrow();
            stack.extend(n.left());
            stack.extend(n.right());
        }
        count
    }

    /// Groups nodes by depth, root level first
    fn levels(&self) -> Vec<Vec<NodeRef<T>>> {
        let mut levels = Vec::new();
        let mut current: Vec<NodeRef<T>> = self.root.iter().cloned().collect();
        while !current.is_empty() {
            let mut next = Vec::with_capacity(current.len() * 2);
            for node in &current {
                let n = node.borrow();
                next.extend(n.left());
                next.extend(n.right());
            }
            levels.push(current);
            current = next;
        }
        levels
    }

    /// Checks that the tree is a complete binary tree
    ///
    /// Walks breadth-first: once a missing child has been seen, every later
    /// node in the walk must be a leaf.
    pub(crate) fn is_complete(&self) -> bool {
        let mut queue: VecDeque<NodeRef<T>> = self.root.iter().cloned().collect();
        let mut seen_gap = false;
        while let Some(node) = queue.pop_front() {
            let n = node.borrow();
            for child in [n.left(), n.right()] {
                match child {
                    Some(child) => {
                        if seen_gap {
                            return false;
                        }
                        queue.push_back(child);
                    }
                    None => seen_gap = true,
                }
            }
        }
        true
    }

    /// Checks that no child compares less than its parent
    pub(crate) fn is_heap_ordered<C: Comparator<T>>(&self, comparator: &C) -> bool {
        let mut stack: Vec<NodeRef<T>> = self.root.iter().cloned().collect();
        while let Some(node) = stack.pop() {
            let n = node.borrow();
            for child in [n.left(), n.right()].into_iter().flatten() {
                if comparator.compare(child.borrow().value(), n.value()) == Ordering::Less {
                    return false;
                }
                stack.push(child);
            }
        }
        true
    }

    /// Pre-order bracketed rendering, e.g. `[7 [9] [10]]`
    pub(crate) fn display<'a, F: ValueFormatter<T>>(&'a self, formatter: &'a F) -> TreeDisplay<'a, T, F> {
        TreeDisplay {
            tree: self,
            formatter,
        }
    }

    /// Level-order rendering, one `depth: values` line per level
    pub(crate) fn display_debug<'a, F: ValueFormatter<T>>(
        &'a self,
        formatter: &'a F,
    ) -> TreeDebugDisplay<'a, T, F> {
        TreeDebugDisplay {
            tree: self,
            formatter,
        }
    }

    /// Dismantles the tree, passing every payload to `reclaimer` exactly once
    ///
    /// Nodes must not be held anywhere else; frontier handles have to be
    /// released before calling this.
    pub(crate) fn drain_into<R: Reclaimer<T>>(&mut self, reclaimer: &mut R) {
        let mut stack: Vec<NodeRef<T>> = self.root.take().into_iter().collect();
        while let Some(node) = stack.pop() {
            let (left, right) = node.borrow_mut().take_children();
            stack.extend(left);
            stack.extend(right);
            match Rc::try_unwrap(node) {
                Ok(cell) => reclaimer.reclaim(cell.into_inner().into_value()),
                Err(_shared) => {
                    debug_assert!(false, "drain_into: node still shared during teardown");
                }
            }
        }
        self.size = 0;
    }
}

fn fmt_subtree<T, F: ValueFormatter<T>>(
    node: &NodeRef<T>,
    formatter: &F,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let n = node.borrow();
    write!(
        f,
        "[{}",
        Formatted {
            value: n.value(),
            formatter,
        }
    )?;
    match (n.left(), n.right()) {
        (None, None) => {}
        (Some(left), None) => {
            f.write_str(" ")?;
            fmt_subtree(&left, formatter, f)?;
        }
        (left, Some(right)) => {
            f.write_str(" ")?;
            match left {
                Some(left) => fmt_subtree(&left, formatter, f)?,
                None => f.write_str("[]")?,
            }
            f.write_str(" ")?;
            fmt_subtree(&right, formatter, f)?;
        }
    }
    f.write_str("]")
}

pub(crate) struct TreeDisplay<'a, T, F> {
    tree: &'a Tree<T>,
    formatter: &'a F,
}

impl<T, F: ValueFormatter<T>> fmt::Display for TreeDisplay<'_, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tree.root() {
            Some(root) => fmt_subtree(root, self.formatter, f),
            None => f.write_str("[]"),
        }
    }
}

pub(crate) struct TreeDebugDisplay<'a, T, F> {
    tree: &'a Tree<T>,
    formatter: &'a F,
}

impl<T, F: ValueFormatter<T>> fmt::Display for TreeDebugDisplay<'_, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, level) in self.tree.levels().iter().enumerate() {
            write!(f, "{}:", depth)?;
            for node in level {
                write!(
                    f,
                    " {}",
                    Formatted {
                        value: node.borrow().value(),
                        formatter: self.formatter,
                    }
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
