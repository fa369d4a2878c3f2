//! Squared Euclidean distance between items.
//!
//! No square root is ever taken: squared distances preserve ordering, which is all nearest
//! neighbor search needs.

use num_traits::Zero;

use crate::item::Item;
use crate::r#type::Coordinate;

/// The distance type produced when comparing items with coordinate type `V`.
pub type DistanceOf<V> = <V as Coordinate>::Distance;

/// Squared Euclidean distance `Σ (a[i] - b[i])²` over all `K` dimensions.
///
/// Integer sums saturate instead of overflowing; see [`Coordinate::accumulate`].
#[inline]
pub fn squared_distance<A, B, const K: usize>(a: &A, b: &B) -> DistanceOf<A::Coord>
where
    A: Item<K>,
    B: Item<K, Coord = A::Coord>,
{
    let mut sum: DistanceOf<A::Coord> = Zero::zero();
    for dim in 0..K {
        let term = a.coord(dim).squared_diff(b.coord(dim));
        sum = <A::Coord as Coordinate>::accumulate(sum, term);
    }
    sum
}

/// Squared Euclidean distance, abandoned as soon as the running sum exceeds `bound`.
///
/// Returns `None` when the distance is strictly greater than `bound`; a distance equal to
/// `bound` is still returned. The sum is checked after every dimension, so far-away candidates
/// are usually rejected after only a few coordinates.
#[inline]
pub fn squared_distance_within<A, B, const K: usize>(
    a: &A,
    b: &B,
    bound: DistanceOf<A::Coord>,
) -> Option<DistanceOf<A::Coord>>
where
    A: Item<K>,
    B: Item<K, Coord = A::Coord>,
{
    let mut sum: DistanceOf<A::Coord> = Zero::zero();
    for dim in 0..K {
        let term = a.coord(dim).squared_diff(b.coord(dim));
        sum = <A::Coord as Coordinate>::accumulate(sum, term);
        if sum > bound {
            return None;
        }
    }
    Some(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_distance() {
        assert_eq!(squared_distance(&[0i32, 0], &[3, 4]), 25u128);
        assert_eq!(squared_distance(&[1u8, 1], &[0, 0]), 2u64);
        assert_eq!(squared_distance(&[0.5f64, 0.0, 2.0], &[0.5, 1.0, 0.0]), 5.0);
    }

    #[test]
    fn test_distance_of_identical_items_is_zero() {
        let a = [7i32, -2, 9, 0];
        assert_eq!(squared_distance(&a, &a), 0u128);
    }

    #[test]
    fn test_bounded_distance_aborts_above_bound() {
        assert_eq!(squared_distance_within(&[0i32, 0], &[3, 4], 24u128), None);
        assert_eq!(squared_distance_within(&[0i32, 0], &[3, 4], 25u128), Some(25));
        assert_eq!(squared_distance_within(&[0i32, 0], &[3, 4], 100u128), Some(25));
    }

    #[test]
    fn test_extreme_32_bit_coordinates() {
        let max_term = (u32::MAX as u128) * (u32::MAX as u128);
        assert_eq!(
            squared_distance(&[0u32, 0], &[u32::MAX, u32::MAX]),
            2 * max_term
        );
        assert_eq!(
            squared_distance(&[i32::MIN, i32::MIN], &[i32::MAX, i32::MAX]),
            2 * max_term
        );
        assert_eq!(
            squared_distance_within(&[0u32, 0], &[u32::MAX, u32::MAX], max_term),
            None
        );
    }

    #[test]
    fn test_extreme_64_bit_coordinates_saturate() {
        assert_eq!(
            squared_distance(&[0u64, 0], &[u64::MAX, u64::MAX]),
            u128::MAX
        );
        assert_eq!(
            squared_distance(&[i64::MIN, 0], &[i64::MAX, 0]),
            (u64::MAX as u128) * (u64::MAX as u128)
        );
        assert_eq!(
            squared_distance_within(&[0u64, 0], &[u64::MAX, u64::MAX], u128::MAX),
            Some(u128::MAX)
        );
    }

    #[test]
    fn test_bounded_distance_stops_early() {
        // The first coordinate alone exceeds the bound, so later coordinates are never read.
        struct Probe<'a> {
            coords: [u8; 3],
            reads: &'a std::cell::Cell<usize>,
        }

        impl Item<3> for Probe<'_> {
            type Coord = u8;

            fn coord(&self, dim: usize) -> u8 {
                self.reads.set(self.reads.get() + 1);
                self.coords[dim]
            }
        }

        let reads = std::cell::Cell::new(0);
        let probe = Probe {
            coords: [200, 0, 0],
            reads: &reads,
        };
        assert_eq!(squared_distance_within(&probe, &[0u8, 0, 0], 10), None);
        assert_eq!(reads.get(), 1);
    }
}
