//! The point abstraction stored in and searched against a k-d tree.

use crate::r#type::Coordinate;

/// A value with exactly `K` ordered coordinates.
///
/// Every item stored in one tree, and every query searched against it, must share the same `K`
/// and the same [`Coordinate`] type. Both are enforced at compile time.
pub trait Item<const K: usize> {
    /// The numeric type of each coordinate.
    type Coord: Coordinate;

    /// The coordinate along `dim`, for `dim` in `0..K`.
    fn coord(&self, dim: usize) -> Self::Coord;
}

impl<V: Coordinate, const K: usize> Item<K> for [V; K] {
    type Coord = V;

    #[inline]
    fn coord(&self, dim: usize) -> V {
        self[dim]
    }
}

impl<T: Item<K>, const K: usize> Item<K> for &T {
    type Coord = T::Coord;

    #[inline]
    fn coord(&self, dim: usize) -> Self::Coord {
        (**self).coord(dim)
    }
}

/// An item carrying an arbitrary payload alongside its coordinates.
///
/// The payload does not take part in partitioning or distance computation. This is how a label
/// travels with a training vector through [`nearest`][crate::knn::nearest].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Labeled<P, L> {
    /// The coordinates
    pub point: P,
    /// The payload
    pub label: L,
}

impl<P, L> Labeled<P, L> {
    /// Attach `label` to `point`.
    pub fn new(point: P, label: L) -> Self {
        Self { point, label }
    }
}

impl<P: Item<K>, L, const K: usize> Item<K> for Labeled<P, L> {
    type Coord = P::Coord;

    #[inline]
    fn coord(&self, dim: usize) -> Self::Coord {
        self.point.coord(dim)
    }
}
