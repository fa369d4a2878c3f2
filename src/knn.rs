//! Exact nearest neighbor refinement over a candidate set.
//!
//! A k-d tree [`bucket`][crate::kdtree::KdTreeIndex::bucket] narrows the search to a handful of
//! candidates; [`nearest`] then scans them linearly with early-abort distance accumulation.
//! Called with a whole dataset instead of a bucket, this is exact brute-force 1-NN.

use crate::distance::{squared_distance, squared_distance_within, DistanceOf};
use crate::item::Item;

/// The result of a nearest neighbor scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a, T: Item<K>, const K: usize> {
    /// The closest candidate
    pub item: &'a T,
    /// Position of [`item`][Self::item] within the scanned candidates
    pub index: usize,
    /// Squared Euclidean distance from the query to [`item`][Self::item]
    pub distance: DistanceOf<T::Coord>,
}

/// Find the candidate closest to `query` by squared Euclidean distance.
///
/// Each candidate's distance is accumulated one dimension at a time and abandoned the moment
/// it exceeds the best distance found so far. On exact ties the earliest candidate wins.
///
/// Returns `None` if `candidates` is empty.
pub fn nearest<'a, T, Q, const K: usize>(
    query: &Q,
    candidates: &'a [T],
) -> Option<Neighbor<'a, T, K>>
where
    T: Item<K>,
    Q: Item<K, Coord = T::Coord>,
{
    let (first, rest) = candidates.split_first()?;
    let mut best = Neighbor {
        item: first,
        index: 0,
        distance: squared_distance(query, first),
    };

    for (offset, candidate) in rest.iter().enumerate() {
        if let Some(distance) = squared_distance_within(query, candidate, best.distance) {
            // Strictly closer only, so the first of several equidistant candidates is kept.
            if distance < best.distance {
                best = Neighbor {
                    item: candidate,
                    index: offset + 1,
                    distance,
                };
            }
        }
    }

    Some(best)
}
