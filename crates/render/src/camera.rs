use glam::{Mat4, Vec3};
use std::f32::consts::PI;

const MIN_POLAR: f32 = 1e-4;

/// Perspective camera orbiting a target point.
///
/// The position is kept in spherical coordinates around `target`: `radius`,
/// `azimuth` about +Y (0 looks down -Z from +Z), and `polar` from +Y.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    radius: f32,
    azimuth: f32,
    polar: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Radians per pixel of orbit drag.
    pub rotate_speed: f32,
    /// Fraction of the orbit radius moved per pixel of pan drag.
    pub pan_speed: f32,
    /// Radius multiplier per zoom-in step.
    pub zoom_scale: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 0.0, 0.1), Vec3::ZERO, 50.0_f32.to_radians())
    }
}

impl OrbitCamera {
    /// Place the camera at `position`, orbiting `target`.
    pub fn looking_at(position: Vec3, target: Vec3, fov: f32) -> Self {
        let offset = position - target;
        let radius = offset.length().max(1e-6);
        Self {
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            fov,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            rotate_speed: 0.005,
            pan_speed: 0.002,
            zoom_scale: 0.95,
            min_distance: 0.01,
            max_distance: 900.0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + self.radius * Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Rotate around the target by a drag of `dx`, `dy` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * self.rotate_speed;
        self.polar = (self.polar - dy * self.rotate_speed).clamp(MIN_POLAR, PI - MIN_POLAR);
    }

    /// Move the target (and camera with it) in the view plane.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right();
        let up = right.cross(self.forward());
        let scale = self.pan_speed * self.radius.max(1.0);
        self.target += (-right * dx + up * dy) * scale;
    }

    /// Positive steps move closer to the target.
    pub fn zoom(&mut self, steps: f32) {
        self.radius = (self.radius * self.zoom_scale.powf(steps))
            .clamp(self.min_distance, self.max_distance);
    }

    /// Recompute the aspect ratio after the viewport changed size.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
        tracing::debug!(width, height, aspect = self.aspect, "camera viewport changed");
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_camera_sits_just_in_front_of_origin() {
        let cam = OrbitCamera::default();
        assert!(close(cam.position(), Vec3::new(0.0, 0.0, 0.1)));
        assert!(close(cam.forward(), Vec3::NEG_Z));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn orbit_keeps_distance() {
        let mut cam = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0);
        cam.orbit(120.0, -40.0);
        assert!((cam.position().length() - 10.0).abs() < 1e-4);
        assert!(!close(cam.position(), Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn orbit_cannot_flip_over_the_pole() {
        let mut cam = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0);
        cam.orbit(0.0, 1e6);
        let p = cam.position();
        assert!(p.y <= 10.0 && p.z > 0.0);
        assert!(!cam.view_matrix().col(0).x.is_nan());
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let mut cam = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0);
        let offset = cam.position() - cam.target;
        cam.pan(50.0, 0.0);
        assert_ne!(cam.target, Vec3::ZERO);
        assert!(close(cam.position() - cam.target, offset));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0);
        cam.zoom(1.0);
        assert!(cam.radius() < 10.0);
        cam.zoom(1e4);
        assert_eq!(cam.radius(), cam.min_distance);
        cam.zoom(-1e4);
        assert_eq!(cam.radius(), cam.max_distance);
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut cam = OrbitCamera::default();
        cam.set_viewport(1920, 1080);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.set_viewport(800, 0);
        assert_eq!(cam.aspect, 800.0);
    }
}
