use std::ops::Range;

use crate::item::Item;
use crate::kdtree::traversal::{Leaves, Node};
use crate::kdtree::{KdTreeLayout, KdTreeRef, OwnedKdTree};
use crate::knn::{nearest, Neighbor};

/// A trait for searching and accessing data out of a k-d tree.
///
/// Searches here are approximate: a query only ever looks inside the single leaf whose cell
/// contains it, so its true nearest neighbor may sit in a neighboring leaf just across a
/// partition boundary. In exchange, a search costs one root-to-leaf descent plus a scan of at
/// most one leaf's items.
pub trait KdTreeIndex<T: Item<K>, const K: usize>: Sized {
    /// The items of this tree, in tree order. Every leaf covers a contiguous range of them.
    fn items(&self) -> &[T];

    /// Access the partition structure of this tree.
    fn layout(&self) -> &KdTreeLayout<T::Coord>;

    /// The number of items in this tree
    fn num_items(&self) -> usize {
        self.items().len()
    }

    /// The number of nodes in this tree
    fn num_nodes(&self) -> usize {
        self.layout().num_nodes()
    }

    /// The leaf size this tree was built with
    fn leaf_size(&self) -> usize {
        self.layout().leaf_size()
    }

    /// The depth of this tree
    fn depth(&self) -> usize {
        self.layout().depth()
    }

    /// Whether this tree holds no items
    fn is_empty(&self) -> bool {
        self.layout().is_empty()
    }

    /// The range of [`items`][Self::items] held by the leaf that `query` descends to.
    ///
    /// At each internal node the descent goes left if `query[dim] <= threshold` and right
    /// otherwise. Returns an empty range for an empty tree.
    fn bucket_range<Q: Item<K, Coord = T::Coord>>(&self, query: &Q) -> Range<usize> {
        let nodes = &self.layout().nodes;
        let Some(mut id) = self.layout().root else {
            return 0..0;
        };

        loop {
            let node = &nodes[id];
            match node.split {
                Some(split) => {
                    id = if query.coord(split.dim) <= split.threshold {
                        split.left
                    } else {
                        split.right
                    };
                }
                None => return node.range(),
            }
        }
    }

    /// The candidate bucket for `query`: every item of the leaf it descends to.
    fn bucket<Q: Item<K, Coord = T::Coord>>(&self, query: &Q) -> &[T] {
        &self.items()[self.bucket_range(query)]
    }

    /// Append the candidate bucket for `query` to `out`.
    ///
    /// `out` is **not** cleared first. Pass an empty vector to collect only this query's
    /// candidates.
    fn search<Q: Item<K, Coord = T::Coord>>(&self, query: &Q, out: &mut Vec<T>)
    where
        T: Clone,
    {
        out.extend_from_slice(self.bucket(query));
    }

    /// Approximate nearest neighbor: the closest item within `query`'s candidate bucket.
    ///
    /// The returned [`Neighbor::index`] is a position in [`items`][Self::items]. Returns `None`
    /// only for an empty tree.
    fn nearest<Q: Item<K, Coord = T::Coord>>(&self, query: &Q) -> Option<Neighbor<'_, T, K>> {
        let range = self.bucket_range(query);
        let offset = range.start;
        nearest(query, &self.items()[range]).map(|neighbor| Neighbor {
            index: neighbor.index + offset,
            ..neighbor
        })
    }

    /// Access the root node of the tree for manual traversal.
    fn root(&self) -> Option<Node<'_, T, K>> {
        let layout = self.layout();
        layout
            .root
            .map(|id| Node::new(self.items(), &layout.nodes, id))
    }

    /// Iterate over the items of every leaf, left to right.
    fn leaves(&self) -> Leaves<'_, T, K> {
        let layout = self.layout();
        Leaves::new(self.items(), &layout.nodes, layout.root)
    }
}

impl<T: Item<K>, const K: usize> KdTreeIndex<T, K> for OwnedKdTree<T, K> {
    fn items(&self) -> &[T] {
        &self.items
    }

    fn layout(&self) -> &KdTreeLayout<T::Coord> {
        &self.layout
    }
}

impl<T: Item<K>, const K: usize> KdTreeIndex<T, K> for KdTreeRef<'_, T, K> {
    fn items(&self) -> &[T] {
        self.items
    }

    fn layout(&self) -> &KdTreeLayout<T::Coord> {
        &self.layout
    }
}
