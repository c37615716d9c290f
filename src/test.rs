/// Check for equality between two fractional components allowing for
/// floating point rounding errors.
macro_rules! assert_fraction_eq {
    ($actual:expr,$expected:expr) => {{
        approx::assert_abs_diff_eq!(
            $actual,
            $expected,
            epsilon = 1.0e-4 as $crate::Component
        );
    }};
}
