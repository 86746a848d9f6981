//! Linked tree nodes
//!
//! A parent owns its children through strong `Rc` links; the child points back
//! with a `Weak` link that is only used for navigation. Frontier sequences hold
//! extra strong handles to nodes they track, so a node is only uniquely held
//! once it has been detached from its parent and dropped from the frontiers.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

/// Type alias for strong node reference
pub(crate) type NodeRef<T> = Rc<RefCell<TreeNode<T>>>;
/// Type alias for weak node reference (used for parent backlinks)
pub(crate) type WeakNodeRef<T> = Weak<RefCell<TreeNode<T>>>;
/// Type alias for optional strong node reference
pub(crate) type OptNodeRef<T> = Option<NodeRef<T>>;

/// A single node of the linked tree
#[derive(Debug)]
pub(crate) struct TreeNode<T> {
    value: T,
    parent: WeakNodeRef<T>,
    left: OptNodeRef<T>,
    right: OptNodeRef<T>,
}

impl<T> TreeNode<T> {
    /// Allocates a detached node holding `value`
    pub(crate) fn new_ref(value: T) -> NodeRef<T> {
        Rc::new(RefCell::new(TreeNode {
            value,
            parent: Weak::new(),
            left: None,
            right: None,
        }))
    }

    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn left(&self) -> OptNodeRef<T> {
        self.left.clone()
    }

    pub(crate) fn right(&self) -> OptNodeRef<T> {
        self.right.clone()
    }

    pub(crate) fn parent(&self) -> OptNodeRef<T> {
        self.parent.upgrade()
    }

    pub(crate) fn has_left(&self) -> bool {
        self.left.is_some()
    }

    pub(crate) fn has_right(&self) -> bool {
        self.right.is_some()
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn set_left(&mut self, child: OptNodeRef<T>) -> OptNodeRef<T> {
        std::mem::replace(&mut self.left, child)
    }

    pub(crate) fn set_right(&mut self, child: OptNodeRef<T>) -> OptNodeRef<T> {
        std::mem::replace(&mut self.right, child)
    }

    pub(crate) fn set_parent(&mut self, parent: WeakNodeRef<T>) {
        self.parent = parent;
    }

    /// Detaches both children, handing their ownership to the caller
    pub(crate) fn take_children(&mut self) -> (OptNodeRef<T>, OptNodeRef<T>) {
        (self.left.take(), self.right.take())
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }
}

/// Borrows the payload of `node`
pub(crate) fn borrow_value<T>(node: &NodeRef<T>) -> Ref<'_, T> {
    Ref::map(node.borrow(), |n| n.value())
}

/// Links `child` under `parent` as its left child, setting the back-link
pub(crate) fn attach_left<T>(parent: &NodeRef<T>, child: &NodeRef<T>) {
    child.borrow_mut().set_parent(Rc::downgrade(parent));
    parent.borrow_mut().set_left(Some(Rc::clone(child)));
}

/// Links `child` under `parent` as its right child, setting the back-link
pub(crate) fn attach_right<T>(parent: &NodeRef<T>, child: &NodeRef<T>) {
    child.borrow_mut().set_parent(Rc::downgrade(parent));
    parent.borrow_mut().set_right(Some(Rc::clone(child)));
}

/// Exchanges the payloads of two distinct nodes without touching any link
///
/// Swapping a node with itself is a no-op.
pub(crate) fn swap_values<T>(a: &NodeRef<T>, b: &NodeRef<T>) {
    if Rc::ptr_eq(a, b) {
        return;
    }
    let mut a_mut = a.borrow_mut();
    let mut b_mut = b.borrow_mut();
    std::mem::swap(&mut a_mut.value, &mut b_mut.value);
}
