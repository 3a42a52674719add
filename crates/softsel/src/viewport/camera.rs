use glam::{Mat4, Vec2, Vec3};

use softsel_lib::host::Viewport;

const NEAR: f32 = 0.1;
const FAR: f32 = 200.0;

/// Orbit camera around `target`. Z is up, the grid lies in XY.
pub struct ArcBallCamera {
    yaw: f32,
    pitch: f32,
    distance: f32,
    target: Vec3,
    fov: f32,
}

impl ArcBallCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.9,
            distance: 14.0,
            target: Vec3::ZERO,
            fov: 45.0_f32.to_radians(),
        }
    }

    /// Degrees of yaw and pitch; pitch stops short of the poles
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(0.5, 100.0);
    }

    /// Move the target in the view plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Z).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        self.target += right * dx + up * dy;
    }

    fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cp * sy, -cp * cy, sp)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Z)
    }

    /// Screen position of `point` inside `rect`; `None` behind the camera
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let projection = Mat4::perspective_rh_gl(self.fov, rect.aspect_ratio(), NEAR, FAR);
        let clip = projection * self.view_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let center = rect.center();
        Some(egui::pos2(
            center.x + ndc.x * rect.width() * 0.5,
            center.y - ndc.y * rect.height() * 0.5,
        ))
    }

    /// World units per pixel at the target distance
    pub fn world_per_pixel(&self, rect: egui::Rect) -> f32 {
        let visible_height = 2.0 * self.distance * (self.fov * 0.5).tan();
        visible_height / rect.height().max(1.0)
    }
}

/// The camera bound to the rect it draws into
pub struct CameraView<'a> {
    pub camera: &'a ArcBallCamera,
    pub rect: egui::Rect,
}

impl Viewport for CameraView<'_> {
    fn project(&self, point: Vec3) -> Option<Vec2> {
        self.camera
            .project(point, self.rect)
            .map(|p| Vec2::new(p.x, p.y))
    }

    fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    fn world_per_pixel(&self) -> f32 {
        self.camera.world_per_pixel(self.rect)
    }
}
