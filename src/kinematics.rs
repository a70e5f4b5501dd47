//! Motion state shared by every world object, plus gravity, collision and bounce.

use crate::config::{
    DEFAULT_BOUNCE_FACTOR, DEFAULT_HALTING_SPEED, GRAVITY, GRENADE_BOUNCE_FACTOR,
    GRENADE_HALTING_SPEED,
};
use crate::error::SimError;
use crate::terrain::{SurfaceShape, Terrain};
use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub pos: Point,
    pub vel: Point, // Zero in both axes means at rest
}

/// Result of advancing one tick with collision checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Moved,
    /// The destination was solid; the object now sits on the last free pixel (unless it was
    /// already embedded) and still carries its impact velocity.
    Collided,
}

impl Kinematics {
    pub fn new(pos: Point, vel: Point) -> Self {
        Kinematics { pos, vel }
    }

    pub fn at_rest(pos: Point) -> Self {
        Kinematics { pos, vel: Point::ZERO }
    }

    pub fn apply_gravity(&mut self) {
        self.vel.y += GRAVITY;
    }

    pub fn null_velocity(&mut self) {
        self.vel = Point::ZERO;
    }

    pub fn is_at_rest(&self) -> bool {
        self.vel.is_zero()
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Moves by the current velocity unless the destination pixel is solid, in which case the
    /// object is placed on the boundary found by bisection.
    pub fn advance(&mut self, terrain: &Terrain) -> Result<Motion, SimError> {
        let first = self.pos.pixel();
        let last = (self.pos + self.vel).pixel();

        if !terrain.is_solid(last.0, last.1) {
            self.pos += self.vel;
            return Ok(Motion::Moved);
        }

        // Already embedded objects skip the search and bounce where they are
        if !terrain.is_solid(first.0, first.1) {
            let (x, y) = terrain.find_collision_point(first, last)?;
            self.pos = Point::new(x as f64, y as f64);
        }
        Ok(Motion::Collided)
    }
}

/// How an object reacts to hitting the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceParameters {
    pub halting_speed: f64, // At or below this impact speed the object stops dead
    pub flat: (f64, f64),   // (vx, vy) factors on flat ground
    pub slope: f64,         // Factor applied with the axis swap on slopes
}

impl BounceParameters {
    pub const GENERIC: BounceParameters = BounceParameters {
        halting_speed: DEFAULT_HALTING_SPEED,
        flat: (DEFAULT_BOUNCE_FACTOR, -DEFAULT_BOUNCE_FACTOR),
        slope: DEFAULT_BOUNCE_FACTOR,
    };

    pub const GRENADE: BounceParameters = BounceParameters {
        halting_speed: GRENADE_HALTING_SPEED,
        flat: (GRENADE_BOUNCE_FACTOR, -GRENADE_BOUNCE_FACTOR),
        slope: GRENADE_BOUNCE_FACTOR,
    };

    /// Velocity after bouncing off ground of the given shape.
    pub fn bounce(&self, vel: Point, shape: SurfaceShape) -> Point {
        if vel.length() <= self.halting_speed {
            return Point::ZERO;
        }
        self.deflect(vel, shape)
    }

    /// Rescales velocity by the surface shape without checking the halting speed.
    pub fn deflect(&self, vel: Point, shape: SurfaceShape) -> Point {
        match shape {
            SurfaceShape::Flat => Point::new(vel.x * self.flat.0, vel.y * self.flat.1),
            SurfaceShape::SlopeRightDown => Point::new(vel.y * self.slope, vel.x * self.slope),
            SurfaceShape::SlopeLeftDown => Point::new(-vel.y * self.slope, -vel.x * self.slope),
            SurfaceShape::Unpredictable => Point::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn flat_ground() -> Terrain {
        Terrain::from_fn(100, 100, |_, y| y >= 50)
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut k = Kinematics::at_rest(Point::new(10.0, 10.0));
        for _ in 0..10 {
            k.apply_gravity();
        }
        assert_approx_eq!(k.vel.y, 0.5);
        assert_approx_eq!(k.vel.x, 0.0);
        k.null_velocity();
        assert!(k.is_at_rest());
    }

    #[test]
    fn test_advance_in_open_air() {
        let terrain = flat_ground();
        let mut k = Kinematics::new(Point::new(10.5, 10.5), Point::new(1.0, 2.0));
        assert_eq!(k.advance(&terrain), Ok(Motion::Moved));
        assert_approx_eq!(k.pos.x, 11.5);
        assert_approx_eq!(k.pos.y, 12.5);
    }

    #[test]
    fn test_advance_into_ground_lands_on_surface() {
        let terrain = flat_ground();
        let mut k = Kinematics::new(Point::new(20.0, 40.0), Point::new(0.0, 15.0));
        assert_eq!(k.advance(&terrain), Ok(Motion::Collided));
        assert_eq!(k.pos.pixel(), (20, 49));
        assert_approx_eq!(k.vel.y, 15.0);
    }

    #[test]
    fn test_advance_when_embedded_keeps_position() {
        let terrain = flat_ground();
        let mut k = Kinematics::new(Point::new(20.0, 60.0), Point::new(0.0, 1.0));
        assert_eq!(k.advance(&terrain), Ok(Motion::Collided));
        assert_eq!(k.pos, Point::new(20.0, 60.0));
    }

    #[test]
    fn test_bounce_at_halting_speed_stops() {
        let vel = Point::new(3.0, 0.0);
        assert_eq!(BounceParameters::GENERIC.bounce(vel, SurfaceShape::Flat), Point::ZERO);
        let slow = Point::new(0.6, 0.8);
        assert_eq!(BounceParameters::GRENADE.bounce(slow, SurfaceShape::Flat), Point::ZERO);
    }

    #[test]
    fn test_flat_bounce_is_damped() {
        let vel = Point::new(2.0, 4.0);
        let out = BounceParameters::GENERIC.bounce(vel, SurfaceShape::Flat);
        assert_approx_eq!(out.x, 1.0);
        assert_approx_eq!(out.y, -2.0);
        assert!(out.length() < vel.length());
    }

    #[test]
    fn test_slope_bounce_swaps_axes() {
        let vel = Point::new(1.0, 5.0);
        let right = BounceParameters::GENERIC.bounce(vel, SurfaceShape::SlopeRightDown);
        assert_approx_eq!(right.x, 2.5);
        assert_approx_eq!(right.y, 0.5);
        let left = BounceParameters::GENERIC.bounce(vel, SurfaceShape::SlopeLeftDown);
        assert_approx_eq!(left.x, -2.5);
        assert_approx_eq!(left.y, -0.5);
        let stuck = BounceParameters::GENERIC.bounce(vel, SurfaceShape::Unpredictable);
        assert_eq!(stuck, Point::ZERO);
    }
}
