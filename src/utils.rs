use crate::types::{Facing, Point};

/// Linear interpolation between two f64 values
pub fn lerp_f64(start: f64, end: f64, alpha: f64) -> f64 {
    start + (end - start) * alpha
}

/// `count` evenly spaced values from `start` to `end`, both inclusive
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..count)
            .map(|i| lerp_f64(start, end, i as f64 / (count - 1) as f64))
            .collect(),
    }
}

/// Unit vector for a firing angle in degrees.
/// 0° is horizontal, positive angles point upwards (negative y), mirrored by facing.
pub fn firing_direction(angle_degrees: f64, facing: Facing) -> Point {
    let radians = angle_degrees.to_radians();
    Point::new(radians.cos() * facing.sign(), -radians.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_lerp_f64() {
        assert_approx_eq!(lerp_f64(0.0, 10.0, 0.5), 5.0);
        assert_approx_eq!(lerp_f64(0.0, 10.0, 0.0), 0.0);
        assert_approx_eq!(lerp_f64(0.0, 10.0, 1.0), 10.0);
        assert_approx_eq!(lerp_f64(5.0, 10.0, 0.5), 7.5);
    }

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(-50.0, 88.0, 10);
        assert_eq!(values.len(), 10);
        assert_approx_eq!(values[0], -50.0);
        assert_approx_eq!(values[9], 88.0);
        assert_approx_eq!(values[1] - values[0], 138.0 / 9.0);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_firing_direction() {
        let right = firing_direction(0.0, Facing::Right);
        assert_approx_eq!(right.x, 1.0);
        assert_approx_eq!(right.y, 0.0);

        let left_up = firing_direction(90.0, Facing::Left);
        assert_approx_eq!(left_up.x, 0.0);
        assert_approx_eq!(left_up.y, -1.0);

        let down = firing_direction(-45.0, Facing::Left);
        assert!(down.x < 0.0);
        assert!(down.y > 0.0);
    }
}
