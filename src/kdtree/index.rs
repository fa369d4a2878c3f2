use std::ops::Range;

use crate::item::Item;
use crate::kdtree::SplitPolicy;

/// How an internal node divides its range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Split<V> {
    pub(crate) dim: usize,
    pub(crate) threshold: V,
    pub(crate) left: usize,
    pub(crate) right: usize,
}

/// A node in the arena. Every node covers the contiguous range `start..end` of the tree's
/// items; leaves have no split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawNode<V> {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) split: Option<Split<V>>,
}

impl<V> RawNode<V> {
    #[inline]
    pub(crate) fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// The partition structure of a built k-d tree, independent of where its items are stored.
///
/// Nodes live in an arena and refer to their children by position. The layout is immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct KdTreeLayout<V> {
    pub(crate) nodes: Vec<RawNode<V>>,
    pub(crate) root: Option<usize>,
    pub(crate) leaf_size: usize,
    pub(crate) split_policy: SplitPolicy,
    pub(crate) depth: usize,
    pub(crate) forced_leaves: usize,
}

impl<V> KdTreeLayout<V> {
    /// The total number of internal and leaf nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The number of leaf nodes.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|node| node.split.is_none()).count()
    }

    /// The leaf size this tree was built with.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// The split policy this tree was built with.
    pub fn split_policy(&self) -> SplitPolicy {
        self.split_policy
    }

    /// The number of edges on the longest root-to-leaf path. Zero for a single leaf or an empty
    /// tree.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The number of leaves holding more than [`leaf_size`][Self::leaf_size] items because their
    /// items could not be split along any dimension.
    pub fn forced_leaves(&self) -> usize {
        self.forced_leaves
    }

    /// Whether the tree was built from zero items.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

/// A k-d tree that owns its items.
///
/// Usually this will be created via [`KdTreeBuilder::build`][crate::kdtree::KdTreeBuilder::build],
/// which moves the items in and reorders them.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedKdTree<T: Item<K>, const K: usize> {
    pub(crate) items: Vec<T>,
    pub(crate) layout: KdTreeLayout<T::Coord>,
}

impl<T: Item<K>, const K: usize> OwnedKdTree<T, K> {
    /// Consume the tree, returning its items in tree order.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

/// A k-d tree over a borrowed slice of items.
///
/// Created via [`KdTreeBuilder::build_in_place`][crate::kdtree::KdTreeBuilder::build_in_place].
/// The slice has been reordered into tree order and stays immutably borrowed for as long as the
/// tree lives.
#[derive(Debug, Clone, PartialEq)]
pub struct KdTreeRef<'a, T: Item<K>, const K: usize> {
    pub(crate) items: &'a [T],
    pub(crate) layout: KdTreeLayout<T::Coord>,
}
