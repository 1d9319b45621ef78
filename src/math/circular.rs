//! Arithmetic on the unit circle [0, 1) used for the carousel path parameter.
//!
//! Values are `f64`: damping steps near the seam are finer than `f32` spacing.

/// Wrap a value into [0, 1).
///
/// Non-finite input maps to 0.0 so a bad value can never poison the state.
pub fn wrap_unit(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    let wrapped = x.rem_euclid(1.0);
    // rem_euclid rounds tiny negatives up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest distance from `from` to `to` on the unit circle, in [-0.5, 0.5).
///
/// Equal to `((d mod 1) + 1.5) mod 1 - 0.5` without the extra rounding of the
/// `+ 1.5` shift.
pub fn circular_diff(from: f64, to: f64) -> f64 {
    let forward = (to - from).rem_euclid(1.0);
    if forward >= 0.5 {
        forward - 1.0
    } else {
        forward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_unit_range() {
        for x in [-3.25, -1.0, -0.02, 0.0, 0.5, 0.999, 1.0, 1.01, 7.5] {
            let w = wrap_unit(x);
            assert!((0.0..1.0).contains(&w), "wrap_unit({}) = {}", x, w);
        }
        assert!((wrap_unit(-0.02) - 0.98).abs() < 1e-6);
        assert!((wrap_unit(1.01) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_unit_tiny_negative() {
        assert_eq!(wrap_unit(-1e-17), 0.0);
    }

    #[test]
    fn test_wrap_unit_non_finite() {
        assert_eq!(wrap_unit(f64::NAN), 0.0);
        assert_eq!(wrap_unit(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_circular_diff_range() {
        let steps = 40;
        for i in 0..steps {
            for j in 0..steps {
                let from = i as f64 / steps as f64;
                let to = j as f64 / steps as f64;
                let d = circular_diff(from, to);
                assert!((-0.5..0.5).contains(&d), "diff({}, {}) = {}", from, to, d);
            }
        }
    }

    #[test]
    fn test_circular_diff_takes_short_arc() {
        let steps = 40;
        for i in 0..steps {
            for j in 0..steps {
                let from = i as f64 / steps as f64 + 0.003;
                let to = j as f64 / steps as f64 + 0.001;
                let d = circular_diff(from, to);
                let direct = (to - from).abs();
                let arc = direct.min(1.0 - direct);
                assert!((d.abs() - arc).abs() < 1e-5, "diff({}, {}) = {}", from, to, d);

                // a small step along d must shrink the remaining distance
                let moved = wrap_unit(from + d * 0.1);
                assert!(circular_diff(moved, to).abs() <= d.abs() + 1e-6);
            }
        }
    }

    #[test]
    fn test_circular_diff_across_wrap() {
        assert!((circular_diff(0.99, 0.01) - 0.02).abs() < 1e-6);
        assert!((circular_diff(0.01, 0.99) + 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_circular_diff_zero() {
        assert_eq!(circular_diff(0.4, 0.4), 0.0);
    }
}
