//! Destructible terrain: a per-pixel solidity mask over the map image.
//!
//! The mask starts as the map image's alpha channel thresholded at full opacity and only
//! ever loses pixels (explosions carve discs out of it). Queries outside the map are never
//! solid, which lets objects fall off the edges.

use crate::config::MAX_COLLISION_ITERATIONS;
use crate::error::SimError;
use crate::types::Point;

/// One cell of a 3×3 neighbourhood template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Ground,
    Empty,
    DontCare,
}

/// A 3×3 template indexed `[row][column]`, rows top to bottom, columns left to right,
/// centred on the queried pixel.
pub type Pattern = [[Cell; 3]; 3];

/// Templates used for walking and bouncing.
pub mod patterns {
    use super::Cell::{DontCare as X, Empty as E, Ground as G};
    use super::Pattern;

    pub const WALK_LEFT_FLAT: Pattern = [[E, E, X], [E, E, X], [G, G, X]];
    pub const WALK_LEFT_UP: Pattern = [[E, E, X], [G, E, X], [X, G, X]];
    pub const WALK_LEFT_DOWN: Pattern = [[E, E, X], [E, E, X], [E, G, X]];
    pub const WALK_RIGHT_FLAT: Pattern = [[X, E, E], [X, E, E], [X, G, G]];
    pub const WALK_RIGHT_UP: Pattern = [[X, E, E], [X, E, G], [X, G, X]];
    pub const WALK_RIGHT_DOWN: Pattern = [[X, E, E], [X, E, E], [X, G, E]];

    pub const BOUNCE_FLAT: Pattern = [[E, E, E], [E, E, E], [G, G, G]];
    /// Ground rising to the left, so the surface falls away to the right.
    pub const BOUNCE_SLOPE_RIGHT_DOWN: Pattern = [[E, E, E], [G, E, E], [X, G, X]];
    /// Ground rising to the right, so the surface falls away to the left.
    pub const BOUNCE_SLOPE_LEFT_DOWN: Pattern = [[E, E, E], [E, E, G], [X, G, X]];
}

/// Shape of the ground under a bouncing object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceShape {
    Flat,
    SlopeRightDown,
    SlopeLeftDown,
    Unpredictable,
}

#[derive(Debug, Clone)]
pub struct Terrain {
    width: i32,
    height: i32,
    solid: Vec<bool>,
    revision: u64,
}

impl Terrain {
    /// Builds the mask from an alpha channel in row-major order; only fully opaque pixels
    /// are solid.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyMap);
        }
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(SimError::MapLoad(format!(
                "expected {} alpha values for a {}x{} map, got {}",
                expected,
                width,
                height,
                alpha.len()
            )));
        }
        Ok(Terrain {
            width: width as i32,
            height: height as i32,
            solid: alpha.iter().map(|&a| a == u8::MAX).collect(),
            revision: 0,
        })
    }

    /// Builds the mask from a predicate over pixel coordinates.
    pub fn from_fn(width: u32, height: u32, mut is_solid: impl FnMut(i32, i32) -> bool) -> Self {
        let mut solid = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                solid.push(is_solid(x, y));
            }
        }
        Terrain {
            width: width as i32,
            height: height as i32,
            solid,
            revision: 0,
        }
    }

    /// Builds a small map from text rows, `#` marking solid pixels.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        Terrain::from_fn(width, height, |x, y| {
            rows[y as usize].as_bytes().get(x as usize) == Some(&b'#')
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Incremented by every carve so renderers know when to refresh their alpha buffer.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Row-major solidity of every pixel.
    pub fn mask(&self) -> &[bool] {
        &self.solid
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.solid[(y * self.width + x) as usize]
    }

    /// Solidity of the pixel containing a world position.
    pub fn is_solid_at(&self, p: Point) -> bool {
        if p.x < 0.0 || p.y < 0.0 {
            return false;
        }
        let (x, y) = p.pixel();
        self.is_solid(x, y)
    }

    /// Whether a position lies outside the playable area: beyond either side or below the
    /// bottom edge. Positions above the top are still in play.
    pub fn has_left_map(&self, p: Point) -> bool {
        p.x < 0.0 || p.x > self.width as f64 || p.y > self.height as f64
    }

    /// Removes every solid pixel within `radius` of `center`. Irreversible.
    pub fn carve(&mut self, center: Point, radius: f64) {
        let radius_sq = radius * radius;
        let min_x = ((center.x - radius).floor() as i32).max(0);
        let max_x = ((center.x + radius).ceil() as i32).min(self.width - 1);
        let min_y = ((center.y - radius).floor() as i32).max(0);
        let max_y = ((center.y + radius).ceil() as i32).min(self.height - 1);

        let mut cleared = 0usize;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 - center.x;
                let dy = y as f64 - center.y;
                let idx = (y * self.width + x) as usize;
                if dx * dx + dy * dy <= radius_sq && self.solid[idx] {
                    self.solid[idx] = false;
                    cleared += 1;
                }
            }
        }
        self.revision += 1;
        crate::debug_physics!(
            "Carved radius {:.1} at ({:.1}, {:.1}), {} pixels cleared",
            radius,
            center.x,
            center.y,
            cleared
        );
    }

    /// Checks the 3×3 neighbourhood around `pos` against a template. Neighbour coordinates
    /// are clamped to the map edges.
    pub fn match_pattern(&self, pos: (i32, i32), pattern: &Pattern) -> bool {
        let (x, y) = pos;
        for (row, cells) in pattern.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let expected = match cell {
                    Cell::Ground => true,
                    Cell::Empty => false,
                    Cell::DontCare => continue,
                };
                let sx = (x - 1 + col as i32).clamp(0, self.width - 1);
                let sy = (y - 1 + row as i32).clamp(0, self.height - 1);
                if self.solid[(sy * self.width + sx) as usize] != expected {
                    return false;
                }
            }
        }
        true
    }

    /// Classifies the ground around a collision pixel for bounce response.
    pub fn surface_shape(&self, pos: (i32, i32)) -> SurfaceShape {
        if self.match_pattern(pos, &patterns::BOUNCE_FLAT) {
            SurfaceShape::Flat
        } else if self.match_pattern(pos, &patterns::BOUNCE_SLOPE_RIGHT_DOWN) {
            SurfaceShape::SlopeRightDown
        } else if self.match_pattern(pos, &patterns::BOUNCE_SLOPE_LEFT_DOWN) {
            SurfaceShape::SlopeLeftDown
        } else {
            SurfaceShape::Unpredictable
        }
    }

    /// Topmost solid pixel of a column, if the column has any ground.
    pub fn surface_height(&self, x: i32) -> Option<i32> {
        (0..self.height).find(|&y| self.is_solid(x, y))
    }

    /// Bisects between a free pixel and a solid one to find the last free pixel before the
    /// surface.
    pub fn find_collision_point(
        &self,
        free: (i32, i32),
        blocked: (i32, i32),
    ) -> Result<(i32, i32), SimError> {
        let (mut first, mut last) = (free, blocked);
        for _ in 0..MAX_COLLISION_ITERATIONS {
            let middle = (ceil_half(first.0 + last.0), ceil_half(first.1 + last.1));
            if middle == last || middle == first {
                return Ok(first);
            }
            if self.is_solid(middle.0, middle.1) {
                last = middle;
            } else {
                first = middle;
            }
        }
        Err(SimError::CollisionUnresolved {
            from: free,
            to: blocked,
        })
    }
}

fn ceil_half(sum: i32) -> i32 {
    (sum as f64 / 2.0).ceil() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat_ground(width: u32, height: u32, ground_y: i32) -> Terrain {
        Terrain::from_fn(width, height, |_, y| y >= ground_y)
    }

    #[test]
    fn test_from_alpha_threshold() {
        let terrain = Terrain::from_alpha(2, 2, &[255, 254, 0, 255]).unwrap();
        assert!(terrain.is_solid(0, 0));
        assert!(!terrain.is_solid(1, 0));
        assert!(!terrain.is_solid(0, 1));
        assert!(terrain.is_solid(1, 1));
    }

    #[test]
    fn test_from_alpha_rejects_bad_dimensions() {
        assert_eq!(Terrain::from_alpha(0, 5, &[]).unwrap_err(), SimError::EmptyMap);
        assert!(matches!(
            Terrain::from_alpha(2, 2, &[255; 3]),
            Err(SimError::MapLoad(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_is_not_solid() {
        let terrain = Terrain::from_fn(10, 10, |_, _| true);
        assert!(!terrain.is_solid(-1, 5));
        assert!(!terrain.is_solid(10, 5));
        assert!(!terrain.is_solid(5, -1));
        assert!(!terrain.is_solid(5, 10));
        assert!(!terrain.is_solid_at(Point::new(-0.5, 5.0)));
        assert!(terrain.is_solid_at(Point::new(9.9, 9.9)));
    }

    #[test]
    fn test_carve_removes_disc() {
        let mut terrain = Terrain::from_fn(50, 50, |_, _| true);
        terrain.carve(Point::new(25.0, 25.0), 10.0);
        assert!(!terrain.is_solid(25, 25));
        assert!(!terrain.is_solid(35, 25)); // exactly on the radius
        assert!(!terrain.is_solid(32, 32)); // 7² + 7² = 98 < 100
        assert!(terrain.is_solid(33, 33)); // 8² + 8² = 128 > 100
        assert!(terrain.is_solid(36, 25));
        assert_eq!(terrain.revision(), 1);
    }

    #[test]
    fn test_carve_near_edge_is_clipped() {
        let mut terrain = Terrain::from_fn(20, 20, |_, _| true);
        terrain.carve(Point::new(-5.0, 0.0), 8.0);
        assert!(!terrain.is_solid(0, 0));
        assert!(terrain.is_solid(4, 0));
        terrain.carve(Point::new(500.0, 500.0), 8.0);
        assert!(terrain.is_solid(19, 19));
    }

    #[test]
    fn test_match_pattern_flat_walk() {
        let terrain = flat_ground(10, 10, 6);
        assert!(terrain.match_pattern((5, 5), &patterns::WALK_LEFT_FLAT));
        assert!(terrain.match_pattern((5, 5), &patterns::WALK_RIGHT_FLAT));
        assert!(!terrain.match_pattern((5, 5), &patterns::WALK_LEFT_DOWN));
        assert!(!terrain.match_pattern((5, 4), &patterns::WALK_LEFT_FLAT));
    }

    #[test]
    fn test_match_pattern_clamps_at_edges() {
        let terrain = flat_ground(10, 10, 9);
        // The row below (y = 9) is ground; neighbours left of x = 0 clamp onto column 0.
        assert!(terrain.match_pattern((0, 8), &patterns::BOUNCE_FLAT));
        // Below the map the clamped rows repeat the ground row.
        assert!(!terrain.match_pattern((5, 12), &patterns::BOUNCE_FLAT));
    }

    #[test]
    fn test_step_patterns() {
        let terrain = Terrain::from_ascii(&[
            "......",
            "......",
            "...###",
            "..####",
            "######",
        ]);
        // Standing at (2, 2) the ground steps up one pixel to the right.
        assert!(terrain.match_pattern((2, 2), &patterns::WALK_RIGHT_UP));
        assert!(!terrain.match_pattern((2, 2), &patterns::WALK_RIGHT_FLAT));
        // Standing at (3, 1) the ground steps down one pixel to the left.
        assert!(terrain.match_pattern((3, 1), &patterns::WALK_LEFT_DOWN));
    }

    #[test]
    fn test_surface_shape() {
        let flat = flat_ground(10, 10, 6);
        assert_eq!(flat.surface_shape((5, 5)), SurfaceShape::Flat);

        let slope = Terrain::from_ascii(&[
            ".....",
            "#....",
            "##...",
            "###..",
            "####.",
        ]);
        assert_eq!(slope.surface_shape((1, 1)), SurfaceShape::SlopeRightDown);

        let mirrored = Terrain::from_ascii(&[
            ".....",
            "....#",
            "...##",
            "..###",
            ".####",
        ]);
        assert_eq!(mirrored.surface_shape((3, 1)), SurfaceShape::SlopeLeftDown);

        let pit = Terrain::from_ascii(&["#.#", "#.#", "###"]);
        assert_eq!(pit.surface_shape((1, 1)), SurfaceShape::Unpredictable);
    }

    #[test]
    fn test_surface_height() {
        let terrain = flat_ground(10, 20, 12);
        assert_eq!(terrain.surface_height(3), Some(12));
        let empty = Terrain::from_fn(4, 4, |_, _| false);
        assert_eq!(empty.surface_height(0), None);
    }

    #[test]
    fn test_find_collision_point_stops_above_surface() {
        let terrain = flat_ground(100, 100, 50);
        let point = terrain.find_collision_point((10, 10), (10, 80)).unwrap();
        assert_eq!(point, (10, 49));

        let diagonal = terrain.find_collision_point((0, 0), (60, 60)).unwrap();
        assert!(!terrain.is_solid(diagonal.0, diagonal.1));
        assert!(diagonal.1 <= 49 && diagonal.1 >= 47);
    }

    #[test]
    fn test_find_collision_point_converges_for_huge_steps() {
        let terrain = flat_ground(100, 100, 50);
        let point = terrain.find_collision_point((0, -1_000_000), (0, 60));
        assert_eq!(point, Ok((0, 49)));
    }

    #[test]
    fn test_has_left_map() {
        let terrain = flat_ground(100, 50, 40);
        assert!(terrain.has_left_map(Point::new(-0.1, 10.0)));
        assert!(terrain.has_left_map(Point::new(100.5, 10.0)));
        assert!(terrain.has_left_map(Point::new(10.0, 50.5)));
        assert!(!terrain.has_left_map(Point::new(10.0, -500.0)));
    }

    proptest! {
        #[test]
        fn carving_never_adds_ground(
            carves in prop::collection::vec((0.0f64..64.0, 0.0f64..64.0, 0.0f64..20.0), 1..8)
        ) {
            let mut terrain = Terrain::from_fn(64, 64, |x, y| (x * 7 + y * 3) % 5 != 0);
            for (cx, cy, r) in carves {
                let before = terrain.mask().to_vec();
                terrain.carve(Point::new(cx, cy), r);
                for (was, now) in before.iter().zip(terrain.mask()) {
                    prop_assert!(*was || !*now);
                }
                let once = terrain.mask().to_vec();
                terrain.carve(Point::new(cx, cy), r);
                prop_assert_eq!(once.as_slice(), terrain.mask());
            }
        }
    }
}
