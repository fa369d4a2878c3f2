//! Utilities to traverse the k-d tree structure.

use tinyvec::TinyVec;

use crate::item::Item;
use crate::kdtree::index::RawNode;

/// A node in the k-d tree.
///
/// Internal nodes carry a partition dimension and threshold: every item under the left child has
/// `coord(dim) <= threshold` and every item under the right child has `coord(dim) > threshold`.
/// Leaves carry items only.
#[derive(Debug)]
pub struct Node<'a, T: Item<K>, const K: usize> {
    items: &'a [T],
    nodes: &'a [RawNode<T::Coord>],
    id: usize,
}

impl<T: Item<K>, const K: usize> Clone for Node<'_, T, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Item<K>, const K: usize> Copy for Node<'_, T, K> {}

impl<'a, T: Item<K>, const K: usize> Node<'a, T, K> {
    pub(crate) fn new(items: &'a [T], nodes: &'a [RawNode<T::Coord>], id: usize) -> Self {
        Self { items, nodes, id }
    }

    #[inline]
    fn raw(&self) -> &'a RawNode<T::Coord> {
        &self.nodes[self.id]
    }

    fn child(&self, id: usize) -> Self {
        Self::new(self.items, self.nodes, id)
    }

    /// Every item under this node. For a leaf, this is its bucket.
    pub fn items(&self) -> &'a [T] {
        &self.items[self.raw().range()]
    }

    /// The number of items under this node.
    pub fn len(&self) -> usize {
        self.raw().end - self.raw().start
    }

    /// Returns `true` if no items are under this node. Never true for a node of a built tree.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.raw().split.is_none()
    }

    /// Returns `true` if this is an internal node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// The partition dimension of an internal node.
    pub fn dim(&self) -> Option<usize> {
        self.raw().split.map(|split| split.dim)
    }

    /// The partition threshold of an internal node.
    pub fn threshold(&self) -> Option<T::Coord> {
        self.raw().split.map(|split| split.threshold)
    }

    /// The child holding items with `coord(dim) <= threshold`.
    pub fn left_child(&self) -> Option<Self> {
        self.raw().split.map(|split| self.child(split.left))
    }

    /// The child holding items with `coord(dim) > threshold`.
    pub fn right_child(&self) -> Option<Self> {
        self.raw().split.map(|split| self.child(split.right))
    }
}

/// An iterator over the item buckets of every leaf, in left-to-right order.
///
/// Created by [`KdTreeIndex::leaves`][crate::kdtree::KdTreeIndex::leaves].
#[derive(Debug)]
pub struct Leaves<'a, T: Item<K>, const K: usize> {
    items: &'a [T],
    nodes: &'a [RawNode<T::Coord>],
    // Use TinyVec to avoid heap allocations for shallow trees
    stack: TinyVec<[usize; 32]>,
}

impl<'a, T: Item<K>, const K: usize> Leaves<'a, T, K> {
    pub(crate) fn new(items: &'a [T], nodes: &'a [RawNode<T::Coord>], root: Option<usize>) -> Self {
        let mut stack = TinyVec::new();
        if let Some(root) = root {
            stack.push(root);
        }
        Self {
            items,
            nodes,
            stack,
        }
    }
}

impl<'a, T: Item<K>, const K: usize> Iterator for Leaves<'a, T, K> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = &self.nodes[id];
            match node.split {
                // Pushed right first so the left subtree is visited first
                Some(split) => {
                    self.stack.push(split.right);
                    self.stack.push(split.left);
                }
                None => return Some(&self.items[node.range()]),
            }
        }
        None
    }
}
