use std::cmp::Ordering;

use log::debug;

use crate::item::Item;
use crate::kdtree::index::{KdTreeLayout, RawNode, Split};
use crate::kdtree::{KdTreeRef, OwnedKdTree};
use crate::r#type::Coordinate;

/// The default leaf size used by [`KdTreeBuilder::new`].
pub const DEFAULT_LEAF_SIZE: usize = 64;

/// How a node chooses the dimension it partitions along.
///
/// Both policies are deterministic. Whichever dimension is chosen, the threshold is the median
/// coordinate along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitPolicy {
    /// Split along the dimension whose coordinates span the widest range within the node.
    ///
    /// A node whose items span zero range along every dimension holds identical items and
    /// becomes a leaf.
    #[default]
    MaxSpread,

    /// Split along dimension `depth % K`. If that dimension cannot produce a non-empty right
    /// partition, try `(depth + 1) % K` and so on, through all `K` dimensions before forcing a
    /// leaf.
    RoundRobin,
}

/// A builder to create a k-d tree.
///
/// ```
/// use knn_index::kdtree::{KdTreeBuilder, KdTreeIndex};
///
/// let mut builder = KdTreeBuilder::new();
/// builder.set_leaf_size(2);
///
/// let tree = builder.build(vec![[7, 2], [2, 6], [8, 9], [1, 1], [3, 4]]);
/// assert_eq!(tree.num_items(), 5);
/// assert!(tree.bucket(&[0, 0]).contains(&[1, 1]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdTreeBuilder {
    leaf_size: usize,
    split_policy: SplitPolicy,
}

impl Default for KdTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KdTreeBuilder {
    /// Create a new builder with the default leaf size and split policy.
    pub fn new() -> Self {
        Self::new_with_leaf_size(DEFAULT_LEAF_SIZE)
    }

    /// Create a new builder with the provided leaf size.
    ///
    /// Panics if `leaf_size` is zero.
    pub fn new_with_leaf_size(leaf_size: usize) -> Self {
        assert!(leaf_size >= 1, "leaf size must be at least 1");
        Self {
            leaf_size,
            split_policy: SplitPolicy::default(),
        }
    }

    /// Set the maximum number of items a leaf may hold.
    ///
    /// Smaller leaves give searches a tighter candidate bucket at the cost of a deeper tree;
    /// larger leaves descend faster but hand back coarser buckets.
    ///
    /// Panics if `leaf_size` is zero.
    pub fn set_leaf_size(&mut self, leaf_size: usize) -> &mut Self {
        assert!(leaf_size >= 1, "leaf size must be at least 1");
        self.leaf_size = leaf_size;
        self
    }

    /// Set how nodes choose their partition dimension.
    pub fn set_split_policy(&mut self, split_policy: SplitPolicy) -> &mut Self {
        self.split_policy = split_policy;
        self
    }

    /// The configured leaf size.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// The configured split policy.
    pub fn split_policy(&self) -> SplitPolicy {
        self.split_policy
    }

    /// Build a tree that owns `items`.
    ///
    /// The items are reordered so that every leaf covers a contiguous range of them.
    pub fn build<T: Item<K>, const K: usize>(&self, mut items: Vec<T>) -> OwnedKdTree<T, K> {
        let layout = self.build_layout(&mut items);
        OwnedKdTree { items, layout }
    }

    /// Build a tree over a borrowed slice.
    ///
    /// **This permutes `items` in place.** Values are preserved but their positions change, and
    /// the slice stays borrowed by the returned tree.
    pub fn build_in_place<'a, T: Item<K>, const K: usize>(
        &self,
        items: &'a mut [T],
    ) -> KdTreeRef<'a, T, K> {
        let layout = self.build_layout(items);
        KdTreeRef { items, layout }
    }

    fn build_layout<T: Item<K>, const K: usize>(&self, items: &mut [T]) -> KdTreeLayout<T::Coord> {
        let mut state = BuildState {
            nodes: Vec::new(),
            leaf_size: self.leaf_size,
            split_policy: self.split_policy,
            depth: 0,
            forced_leaves: 0,
        };

        let root = if items.is_empty() {
            None
        } else {
            Some(state.build_kernel(items, 0, 0))
        };

        debug!(
            "built k-d tree over {} items: {} nodes, depth {}, {} forced leaves",
            items.len(),
            state.nodes.len(),
            state.depth,
            state.forced_leaves
        );

        KdTreeLayout {
            nodes: state.nodes,
            root,
            leaf_size: self.leaf_size,
            split_policy: self.split_policy,
            depth: state.depth,
            forced_leaves: state.forced_leaves,
        }
    }
}

struct BuildState<V> {
    nodes: Vec<RawNode<V>>,
    leaf_size: usize,
    split_policy: SplitPolicy,
    depth: usize,
    forced_leaves: usize,
}

impl<V: Coordinate> BuildState<V> {
    /// Recursively partition `items`, which sits at offset `start` of the full item range.
    /// Returns the arena position of the node covering it.
    fn build_kernel<T: Item<K, Coord = V>, const K: usize>(
        &mut self,
        items: &mut [T],
        start: usize,
        depth: usize,
    ) -> usize {
        self.depth = self.depth.max(depth);
        let end = start + items.len();

        if items.len() <= self.leaf_size {
            return self.push(start, end, None);
        }

        let split = match self.split_policy {
            SplitPolicy::MaxSpread => max_spread_dimension(items)
                .and_then(|dim| split_threshold(items, dim).map(|threshold| (dim, threshold))),
            SplitPolicy::RoundRobin => (0..K).find_map(|attempt| {
                let dim = (depth + attempt) % K;
                split_threshold(items, dim).map(|threshold| (dim, threshold))
            }),
        };

        let Some((dim, threshold)) = split else {
            return self.force_leaf(start, end);
        };

        let mid = partition(items, dim, threshold);
        if mid == 0 || mid == items.len() {
            // Only reachable with unordered coordinates such as NaN.
            return self.force_leaf(start, end);
        }

        let (left_items, right_items) = items.split_at_mut(mid);
        let left = self.build_kernel(left_items, start, depth + 1);
        let right = self.build_kernel(right_items, start + mid, depth + 1);

        self.push(
            start,
            end,
            Some(Split {
                dim,
                threshold,
                left,
                right,
            }),
        )
    }

    fn force_leaf(&mut self, start: usize, end: usize) -> usize {
        debug!(
            "no dimension splits items {}..{}, forcing a leaf of {} items",
            start,
            end,
            end - start
        );
        self.forced_leaves += 1;
        self.push(start, end, None)
    }

    fn push(&mut self, start: usize, end: usize, split: Option<Split<V>>) -> usize {
        self.nodes.push(RawNode { start, end, split });
        self.nodes.len() - 1
    }
}

#[inline]
fn cmp_coord<V: Coordinate>(a: V, b: V) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// The dimension with the widest coordinate range, or `None` if every dimension has zero range.
/// Ties go to the lowest dimension.
fn max_spread_dimension<T: Item<K>, const K: usize>(items: &[T]) -> Option<usize> {
    let (first, rest) = items.split_first()?;
    let mut mins: Vec<T::Coord> = (0..K).map(|dim| first.coord(dim)).collect();
    let mut maxs = mins.clone();

    for item in rest {
        for dim in 0..K {
            let value = item.coord(dim);
            if value < mins[dim] {
                mins[dim] = value;
            }
            if value > maxs[dim] {
                maxs[dim] = value;
            }
        }
    }

    let mut best: Option<(usize, <T::Coord as Coordinate>::Distance)> = None;
    for dim in 0..K {
        let spread = mins[dim].squared_diff(maxs[dim]);
        if best.map_or(true, |(_, widest)| spread > widest) {
            best = Some((dim, spread));
        }
    }

    best.filter(|(_, spread)| *spread > num_traits::Zero::zero())
        .map(|(dim, _)| dim)
}

/// Choose a threshold along `dim` that leaves at least one item on each side.
///
/// The threshold is the median coordinate (the lower median for an even count). When the
/// median is also the maximum, every item would fall to the left, so the threshold falls back to
/// the largest coordinate strictly below the maximum. Returns `None` if every item has the same
/// coordinate along `dim`.
///
/// Reorders `items`.
fn split_threshold<T: Item<K>, const K: usize>(items: &mut [T], dim: usize) -> Option<T::Coord> {
    if items.len() < 2 {
        return None;
    }

    let mid = (items.len() - 1) / 2;
    items.select_nth_unstable_by(mid, |a, b| cmp_coord(a.coord(dim), b.coord(dim)));
    let median = items[mid].coord(dim);

    // Everything past `mid` is now >= the median.
    if items[mid + 1..].iter().any(|item| item.coord(dim) > median) {
        return Some(median);
    }

    items
        .iter()
        .map(|item| item.coord(dim))
        .filter(|value| *value < median)
        .fold(None, |below, value| match below {
            Some(b) if b >= value => Some(b),
            _ => Some(value),
        })
}

/// Move items with `coord(dim) <= threshold` to the front. Returns the number moved.
fn partition<T: Item<K>, const K: usize>(
    items: &mut [T],
    dim: usize,
    threshold: T::Coord,
) -> usize {
    let mut mid = 0;
    for i in 0..items.len() {
        if items[i].coord(dim) <= threshold {
            items.swap(mid, i);
            mid += 1;
        }
    }
    mid
}
