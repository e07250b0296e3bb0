use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::node::{Link, NodePtr};

/// An iterator over the values of a tree in ascending order.
///
/// Walks parent links, so it needs no auxiliary stack.
pub struct Iter<'a, V> {
    front: Link<V>,
    back: Link<V>,
    len: usize,
    marker: PhantomData<&'a V>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: Link<V>, len: usize) -> Self {
        Self {
            front: root.map(leftmost),
            back: root.map(rightmost),
            len,
            marker: PhantomData,
        }
    }
}

fn leftmost<V>(mut node_ptr: NodePtr<V>) -> NodePtr<V> {
    while let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
        node_ptr = left_ptr;
    }
    node_ptr
}

fn rightmost<V>(mut node_ptr: NodePtr<V>) -> NodePtr<V> {
    while let Some(right_ptr) = unsafe { node_ptr.as_ref().right } {
        node_ptr = right_ptr;
    }
    node_ptr
}

fn successor<V>(node_ptr: NodePtr<V>) -> Link<V> {
    unsafe {
        if let Some(right_ptr) = node_ptr.as_ref().right {
            return Some(leftmost(right_ptr));
        }
        // Ascend until we leave a left subtree
        let mut current = node_ptr;
        while let Some(parent_ptr) = current.as_ref().parent {
            if parent_ptr.as_ref().left == Some(current) {
                return Some(parent_ptr);
            }
            current = parent_ptr;
        }
        None
    }
}

fn predecessor<V>(node_ptr: NodePtr<V>) -> Link<V> {
    unsafe {
        if let Some(left_ptr) = node_ptr.as_ref().left {
            return Some(rightmost(left_ptr));
        }
        let mut current = node_ptr;
        while let Some(parent_ptr) = current.as_ref().parent {
            if parent_ptr.as_ref().right == Some(current) {
                return Some(parent_ptr);
            }
            current = parent_ptr;
        }
        None
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node_ptr = self.front?;
        self.front = successor(node_ptr);
        self.len -= 1;
        Some(unsafe { &(*node_ptr.as_ptr()).value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node_ptr = self.back?;
        self.back = predecessor(node_ptr);
        self.len -= 1;
        Some(unsafe { &(*node_ptr.as_ptr()).value })
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            len: self.len,
            marker: PhantomData,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
