//! Camera description and cursor ray casting.
//!
//! Platform-free: the host owns the real camera and hands a snapshot of it to
//! the gallery and the control surface each frame.

use crate::constants::{CAMERA_FOVY, CAMERA_Z};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// World-space ray through a normalized screen point (u right, v down).
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn screen_ray(&self, uv: Vec2) -> (Vec3, Vec3) {
        let ndc_x = 2.0 * uv.x - 1.0;
        let ndc_y = 1.0 - 2.0 * uv.y;
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (self.eye, (p1 - self.eye).normalize())
    }

    /// Where the ray through `uv` meets the plane `z = plane_z`, if in front.
    pub fn cursor_on_plane(&self, uv: Vec2, plane_z: f32) -> Option<Vec3> {
        let (ro, rd) = self.screen_ray(uv);
        ray_plane_z(ro, rd, plane_z)
    }
}

#[inline]
pub fn ray_plane_z(ray_origin: Vec3, ray_dir: Vec3, plane_z: f32) -> Option<Vec3> {
    if ray_dir.z.abs() <= 1e-6 {
        return None;
    }
    let t = (plane_z - ray_origin.z) / ray_dir.z;
    (t >= 0.0).then(|| ray_origin + ray_dir * t)
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}
