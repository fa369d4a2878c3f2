use std::fmt::Debug;

use num_traits::Num;

/// A trait for types that can be used as item coordinates.
///
/// Each coordinate type carries a wider [`Distance`][Coordinate::Distance] type that squared
/// differences are accumulated in. Differences are taken as absolute values before widening,
/// so unsigned coordinates never underflow. Integer distances are `u64` for coordinates up to
/// 16 bits and `u128` above that, which holds any single squared difference; sums go through
/// [`accumulate`][Coordinate::accumulate], which saturates at the maximum rather than wrapping.
///
/// This trait is sealed and cannot be implemented for external types.
pub trait Coordinate: private::Sealed + Num + PartialOrd + Copy + Debug + Send + Sync {
    /// The type squared differences are accumulated in.
    type Distance: Num + PartialOrd + Copy + Debug + Send + Sync;

    /// The squared difference `(self - other)²`, computed in the widened distance type.
    fn squared_diff(self, other: Self) -> Self::Distance;

    /// Add a squared difference to a running sum. Integer sums saturate at the maximum.
    fn accumulate(sum: Self::Distance, term: Self::Distance) -> Self::Distance;
}

macro_rules! impl_integer_coordinate {
    ($($t:ty => $wide:ty),* $(,)?) => {
        $(
            impl Coordinate for $t {
                type Distance = $wide;

                #[inline]
                fn squared_diff(self, other: Self) -> $wide {
                    let d = self.abs_diff(other) as $wide;
                    d * d
                }

                #[inline]
                fn accumulate(sum: $wide, term: $wide) -> $wide {
                    sum.saturating_add(term)
                }
            }
        )*
    };
}

macro_rules! impl_float_coordinate {
    ($($t:ty),* $(,)?) => {
        $(
            impl Coordinate for $t {
                type Distance = f64;

                #[inline]
                fn squared_diff(self, other: Self) -> f64 {
                    let d = self as f64 - other as f64;
                    d * d
                }

                #[inline]
                fn accumulate(sum: f64, term: f64) -> f64 {
                    sum + term
                }
            }
        )*
    };
}

impl_integer_coordinate!(
    i8 => u64,
    u8 => u64,
    i16 => u64,
    u16 => u64,
    i32 => u128,
    u32 => u128,
    i64 => u128,
    u64 => u128,
);

impl_float_coordinate!(f32, f64);

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for i64 {}
    impl Sealed for u64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

#[cfg(test)]
mod tests {
    use super::Coordinate;

    #[test]
    fn unsigned_diff_does_not_underflow() {
        assert_eq!(2u8.squared_diff(255), 253 * 253);
        assert_eq!(255u8.squared_diff(2), 253 * 253);
        assert_eq!(0u32.squared_diff(u32::MAX), (u32::MAX as u128) * (u32::MAX as u128));
    }

    #[test]
    fn signed_diff_spans_full_range() {
        assert_eq!(i8::MIN.squared_diff(i8::MAX), 255 * 255);
        assert_eq!((-3i32).squared_diff(4), 49);
        assert_eq!(i64::MIN.squared_diff(0), (1u128 << 63) * (1u128 << 63));
    }

    #[test]
    fn float_diff() {
        assert_eq!(1.5f32.squared_diff(-0.5), 4.0);
        assert_eq!(3.0f64.squared_diff(3.0), 0.0);
    }

    #[test]
    fn integer_sums_saturate() {
        let term = 0u64.squared_diff(u64::MAX);
        assert_eq!(u64::accumulate(term, term), u128::MAX);
        assert_eq!(u8::accumulate(u64::MAX - 1, 5), u64::MAX);
        assert_eq!(i32::accumulate(3, 4), 7);
        assert_eq!(f32::accumulate(1.5, 2.0), 3.5);
    }
}
