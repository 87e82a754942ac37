use std::ops::{Add, AddAssign, Div, Mul, Sub};

use super::input::InputSnapshot;
use super::rendering::DrawList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

/// Something the stepped loop can drive. `update` runs once per fixed step and
/// writes that step's draw directives into `frame`.
pub trait Scene {
    fn load(&mut self) {}
    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        frame: &mut DrawList,
    ) -> SceneCommand;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn floor_to_grid(self) -> GridPos {
        GridPos {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

/// Integer tile address. Ordering is lexicographic on `(x, y)`, which the
/// planner relies on for deterministic tie-breaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> GridPos {
        self.offset(rhs.x, rhs.y)
    }
}

impl Sub for GridPos {
    type Output = GridPos;

    fn sub(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

pub const CAMERA_ZOOM_DEFAULT: f32 = 2.0;
pub const CAMERA_ZOOM_MIN: f32 = 0.25;
pub const CAMERA_ZOOM_MAX: f32 = 8.0;

/// Screen/world mapping for the isometric view. `offset` is the screen pixel
/// that `target` lands on; world units are iso-space pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    pub offset: Vec2,
    pub target: Vec2,
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            offset: Vec2::new(600.0, 190.0),
            target: Vec2::ZERO,
            zoom: CAMERA_ZOOM_DEFAULT,
        }
    }
}

impl Camera2D {
    pub fn effective_zoom(&self) -> f32 {
        clamp_camera_zoom(self.zoom)
    }

    pub fn set_zoom_clamped(&mut self, zoom: f32) {
        self.zoom = clamp_camera_zoom(zoom);
    }

    pub fn screen_to_world(&self, screen_px: Vec2) -> Vec2 {
        (screen_px - self.offset) / self.effective_zoom() + self.target
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.target) * self.effective_zoom() + self.offset
    }
}

fn clamp_camera_zoom(zoom: f32) -> f32 {
    if !zoom.is_finite() {
        return CAMERA_ZOOM_DEFAULT;
    }
    zoom.clamp(CAMERA_ZOOM_MIN, CAMERA_ZOOM_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_to_grid_rounds_toward_negative_infinity() {
        assert_eq!(Vec2::new(3.9, 0.1).floor_to_grid(), GridPos::new(3, 0));
        assert_eq!(Vec2::new(-0.5, -1.0).floor_to_grid(), GridPos::new(-1, -1));
    }

    #[test]
    fn grid_pos_orders_by_x_then_y() {
        let mut cells = vec![GridPos::new(1, 0), GridPos::new(0, 5), GridPos::new(0, 1)];
        cells.sort();
        assert_eq!(
            cells,
            vec![GridPos::new(0, 1), GridPos::new(0, 5), GridPos::new(1, 0)]
        );
    }

    #[test]
    fn camera_screen_world_round_trip() {
        let camera = Camera2D {
            offset: Vec2::new(600.0, 190.0),
            target: Vec2::new(10.0, -4.0),
            zoom: 2.0,
        };
        let screen = Vec2::new(812.0, 77.0);
        let back = camera.world_to_screen(camera.screen_to_world(screen));
        assert!((back.x - screen.x).abs() < 1e-3);
        assert!((back.y - screen.y).abs() < 1e-3);
    }

    #[test]
    fn camera_offset_maps_to_target() {
        let camera = Camera2D::default();
        assert_eq!(camera.screen_to_world(camera.offset), camera.target);
    }

    #[test]
    fn non_finite_zoom_falls_back_to_default() {
        let mut camera = Camera2D::default();
        camera.set_zoom_clamped(f32::NAN);
        assert_eq!(camera.zoom, CAMERA_ZOOM_DEFAULT);
        camera.set_zoom_clamped(100.0);
        assert_eq!(camera.zoom, CAMERA_ZOOM_MAX);
    }
}
