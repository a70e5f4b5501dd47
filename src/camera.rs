use crate::config::{
    FOCUS_ACCELERATION, FOCUS_APPROACH_RATE, FOCUS_SNAP_DISTANCE, MOUSE_CAMERA_ACCELERATION,
    MOUSE_CAMERA_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH, SCROLL_BORDER,
};
use crate::types::Point;

// Top-left corner of the visible part of the map, with its own velocity
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    focus: Option<Point>, // World point the camera pans to centre on
    view_width: f64,
    view_height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64)
    }
}

impl Camera {
    pub fn new(view_width: f64, view_height: f64) -> Self {
        Camera {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            focus: None,
            view_width,
            view_height,
        }
    }

    pub fn set_focus(&mut self, focus: Point) {
        self.focus = Some(focus);
    }

    pub fn focus(&self) -> Option<Point> {
        self.focus
    }

    /// Integer offset to subtract from world coordinates when drawing.
    pub fn offset(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    /// Camera position that centres `focus`, kept inside the map.
    pub fn top_left_for(&self, focus: Point, map_width: f64, map_height: f64) -> (f64, f64) {
        let x = (focus.x - (self.view_width / 2.0).floor()).floor();
        let y = (focus.y - (self.view_height / 2.0).floor()).floor();
        (
            x.min(map_width - self.view_width).max(0.0),
            y.min(map_height - self.view_height).max(0.0),
        )
    }

    /// One tick of camera motion. `mouse` is the cursor position in screen coordinates, if
    /// known; it only scrolls the camera while there is no focus.
    pub fn update(&mut self, mouse: Option<(f32, f32)>, map_width: f64, map_height: f64) {
        if self.focus.is_none() {
            if let Some(mouse) = mouse {
                self.mouse_accelerate(mouse);
            }
        }
        self.approach_focus(map_width, map_height);
        self.update_position(map_width, map_height);
    }

    fn mouse_accelerate(&mut self, (mouse_x, mouse_y): (f32, f32)) {
        self.vx = scroll_axis(self.vx, mouse_x, self.view_width as f32);
        self.vy = scroll_axis(self.vy, mouse_y, self.view_height as f32);
    }

    fn approach_focus(&mut self, map_width: f64, map_height: f64) {
        let Some(focus) = self.focus else {
            return;
        };
        let (target_x, target_y) = self.top_left_for(focus, map_width, map_height);
        self.vx = approach_axis(self.x, self.vx, target_x);
        self.vy = approach_axis(self.y, self.vy, target_y);
    }

    fn update_position(&mut self, map_width: f64, map_height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if let Some(focus) = self.focus {
            let (target_x, target_y) = self.top_left_for(focus, map_width, map_height);
            if (self.x - target_x).abs() < FOCUS_SNAP_DISTANCE {
                self.x = target_x;
                self.vx = 0.0;
            }
            if (self.y - target_y).abs() < FOCUS_SNAP_DISTANCE {
                self.y = target_y;
                self.vy = 0.0;
            }
            if self.x == target_x && self.y == target_y {
                self.focus = None;
            }
        }

        (self.x, self.vx) = clamp_axis(self.x, self.vx, map_width - self.view_width);
        (self.y, self.vy) = clamp_axis(self.y, self.vy, map_height - self.view_height);
    }
}

fn scroll_axis(velocity: f64, mouse: f32, extent: f32) -> f64 {
    if mouse < SCROLL_BORDER {
        (velocity - MOUSE_CAMERA_ACCELERATION).max(-MOUSE_CAMERA_SPEED)
    } else if mouse > extent - SCROLL_BORDER {
        (velocity + MOUSE_CAMERA_ACCELERATION).min(MOUSE_CAMERA_SPEED)
    } else {
        let decayed = velocity - velocity.signum() * MOUSE_CAMERA_ACCELERATION;
        if decayed.abs() < MOUSE_CAMERA_ACCELERATION { 0.0 } else { decayed }
    }
}

fn approach_axis(position: f64, velocity: f64, target: f64) -> f64 {
    let proportional = (target - position) * FOCUS_APPROACH_RATE;
    if position < target {
        (velocity + FOCUS_ACCELERATION).min(proportional)
    } else {
        (velocity - FOCUS_ACCELERATION).max(proportional)
    }
}

fn clamp_axis(position: f64, velocity: f64, max: f64) -> (f64, f64) {
    if position < 0.0 {
        (0.0, 0.0)
    } else if position > max {
        (max.max(0.0), 0.0)
    } else {
        (position, velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_top_left_is_clamped_to_map() {
        let camera = Camera::new(100.0, 50.0);
        assert_eq!(camera.top_left_for(Point::new(10.0, 10.0), 500.0, 300.0), (0.0, 0.0));
        assert_eq!(camera.top_left_for(Point::new(250.0, 150.0), 500.0, 300.0), (200.0, 125.0));
        assert_eq!(camera.top_left_for(Point::new(499.0, 299.0), 500.0, 300.0), (400.0, 250.0));
    }

    #[test]
    fn test_focus_pans_smoothly_and_snaps() {
        let mut camera = Camera::new(100.0, 50.0);
        camera.set_focus(Point::new(350.0, 25.0));
        camera.update(None, 1000.0, 50.0);
        // First tick is limited by the acceleration
        assert_approx_eq!(camera.vx, FOCUS_ACCELERATION);

        let mut ticks = 0;
        while camera.focus().is_some() && ticks < 10_000 {
            let before = camera.x;
            camera.update(None, 1000.0, 50.0);
            assert!(camera.x >= before);
            assert!(camera.x <= 300.0);
            ticks += 1;
        }
        assert!(camera.focus().is_none());
        assert_eq!(camera.x, 300.0);
        assert_eq!(camera.vx, 0.0);
    }

    #[test]
    fn test_mouse_scrolls_only_without_focus() {
        let mut camera = Camera::new(100.0, 100.0);
        for _ in 0..100 {
            camera.update(Some((99.0, 50.0)), 10_000.0, 100.0);
        }
        assert_approx_eq!(camera.vx, MOUSE_CAMERA_SPEED);
        assert!(camera.x > 0.0);

        // Leaving the border lets the camera coast to a stop
        for _ in 0..100 {
            camera.update(Some((50.0, 50.0)), 10_000.0, 100.0);
        }
        assert_eq!(camera.vx, 0.0);

        camera.set_focus(Point::new(0.0, 0.0));
        let x = camera.x;
        camera.update(Some((99.0, 50.0)), 10_000.0, 100.0);
        assert!(camera.x < x);
    }

    #[test]
    fn test_camera_stays_on_map() {
        let mut camera = Camera::new(100.0, 100.0);
        for _ in 0..50 {
            camera.update(Some((0.0, 0.0)), 500.0, 500.0);
        }
        assert_eq!((camera.x, camera.y), (0.0, 0.0));
        assert_eq!((camera.vx, camera.vy), (0.0, 0.0));

        // A map smaller than the view pins the camera at the origin
        let mut small = Camera::new(100.0, 100.0);
        small.update(Some((99.0, 99.0)), 50.0, 50.0);
        assert_eq!(small.offset(), (0, 0));
    }
}
