//! Math utility functions.

use num_traits::Float;

/// Linearly interpolate from `a` to `b` using `t` as the progress between
/// them.
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Clamp the given value into the unit interval. NaN becomes zero.
pub fn unit<T: Float>(value: T) -> T {
    if value.is_nan() {
        T::zero()
    } else {
        num_traits::clamp(value, T::zero(), T::one())
    }
}

/// The fraction `value / max`, or zero if `max` is not positive.
pub fn fraction<T: Float>(value: T, max: T) -> T {
    if max > T::zero() {
        value / max
    } else {
        T::zero()
    }
}

/// Round to the nearest integer, halves away from zero.
pub fn round<T: Float>(value: T) -> i64 {
    value.round().to_i64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Component;

    #[test]
    fn lerp_endpoints() {
        assert_fraction_eq!(lerp(100.0 as Component, 0.0, 0.25), 75.0);
        assert_fraction_eq!(lerp(0.0 as Component, 100.0, 1.0), 100.0);
    }

    #[test]
    fn unit_clamps() {
        assert_eq!(unit(-0.5 as Component), 0.0);
        assert_eq!(unit(1.5 as Component), 1.0);
        assert_eq!(unit(Component::NAN), 0.0);
        assert_eq!(unit(0.3 as Component), 0.3);
    }

    #[test]
    fn fraction_of_zero_max_is_zero() {
        assert_eq!(fraction(10.0 as Component, 0.0), 0.0);
        assert_fraction_eq!(fraction(90.0 as Component, 360.0), 0.25);
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round(49.5 as Component), 50);
        assert_eq!(round(-0.4 as Component), 0);
        assert_eq!(round(Component::NAN), 0);
    }
}
