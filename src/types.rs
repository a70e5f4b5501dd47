//! Shared value types: points, identifiers and control enums.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A position or velocity in map pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (*self - *other).length()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalize(&self) -> Point {
        let len = self.length();
        if len == 0.0 {
            Point::ZERO
        } else {
            Point::new(self.x / len, self.y / len)
        }
    }

    /// The pixel containing this point (truncated toward zero).
    pub fn pixel(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Index of a character in the playing field's character arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterId(pub usize);

/// Index of a team in the playing field's team list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(pub usize);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn from_left(left: bool) -> Self {
        if left { Facing::Left } else { Facing::Right }
    }

    /// Horizontal sign of this facing: -1 for left, +1 for right.
    pub fn sign(self) -> f64 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Walking {
    #[default]
    NA,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 1.0);
        assert_eq!(a + b, Point::new(4.0, 5.0));
        assert_eq!(a - b, Point::new(2.0, 3.0));
        assert_eq!(a * 2.0, Point::new(6.0, 8.0));
        assert_approx_eq!(a.length(), 5.0);
        assert_approx_eq!(a.distance(&b), 13.0f64.sqrt());
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Point::ZERO.normalize(), Point::ZERO);
        let n = Point::new(0.0, -25.0).normalize();
        assert_approx_eq!(n.y, -1.0);
    }

    #[test]
    fn test_pixel_truncates_toward_zero() {
        assert_eq!(Point::new(2.9, 7.1).pixel(), (2, 7));
        assert_eq!(Point::new(-0.5, 3.0).pixel(), (0, 3));
    }

    #[test]
    fn test_facing_sign() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.sign(), 1.0);
        assert_eq!(Facing::from_left(true), Facing::Left);
        assert_eq!(format!("{}", TeamId(0)), "Team 1");
    }
}
