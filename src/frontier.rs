//! Frontier sequences over node references
//!
//! The heap keeps the tree complete without index arithmetic by tracking two
//! frontiers:
//!
//! - [`InsertionQueue`] (FIFO): nodes that can still receive a child, in the
//!   order their open slots must be filled
//! - [`ExtractionStack`] (LIFO): nodes in breadth-first order, so the top is
//!   always the structurally-last node once the heap is built
//!
//! Both hold navigation handles only; payloads are never copied into them.

use crate::node::NodeRef;
use std::collections::VecDeque;
use std::fmt;

/// FIFO of nodes still eligible to receive children
pub(crate) struct InsertionQueue<T> {
    nodes: VecDeque<NodeRef<T>>,
}

impl<T> InsertionQueue<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: VecDeque::new(),
        }
    }

    pub(crate) fn enqueue(&mut self, node: NodeRef<T>) {
        self.nodes.push_back(node);
    }

    pub(crate) fn dequeue(&mut self) -> Option<NodeRef<T>> {
        self.nodes.pop_front()
    }

    pub(crate) fn peek_front(&self) -> Option<&NodeRef<T>> {
        self.nodes.front()
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<T> fmt::Debug for InsertionQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertionQueue")
            .field("len", &self.nodes.len())
            .finish()
    }
}

/// LIFO of nodes whose top is the structurally-last node
pub(crate) struct ExtractionStack<T> {
    nodes: Vec<NodeRef<T>>,
}

impl<T> ExtractionStack<T> {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub(crate) fn push(&mut self, node: NodeRef<T>) {
        self.nodes.push(node);
    }

    pub(crate) fn pop(&mut self) -> Option<NodeRef<T>> {
        self.nodes.pop()
    }

    pub(crate) fn peek_top(&self) -> Option<&NodeRef<T>> {
        self.nodes.last()
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<T> fmt::Debug for ExtractionStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionStack")
            .field("len", &self.nodes.len())
            .finish()
    }
}
