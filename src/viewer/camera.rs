//! Orbit camera for the viewport
//!
//! Spherical-coordinate orbiting around a target point, screen-space
//! panning, and zoom clamped to the distance bounds set by framing.

use crate::constants::view;
use glam::{Mat4, Vec3};

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,

    /// Interactive zoom bounds, set from the framed radius
    pub min_distance: f32,
    pub max_distance: f32,

    pub orbit_sensitivity: f32,
    pub zoom_sensitivity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(2.5, 1.2, 3.5),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: view::FOV_DEG.to_radians(),
            near: view::NEAR,
            far: view::FAR,
            aspect: 1.0,
            min_distance: view::NEAR,
            max_distance: view::FAR,
            orbit_sensitivity: 0.5,
            zoom_sensitivity: 1.0,
        }
    }
}

impl OrbitCamera {
    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
        proj * view
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    /// Orbit around the target
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius < 1e-4 {
            return;
        }

        // Spherical coordinates around +Y
        let mut theta = offset.z.atan2(offset.x);
        let mut phi = (offset.y / radius).acos();

        theta += delta_x * self.orbit_sensitivity;
        phi += delta_y * self.orbit_sensitivity;

        // Clamp phi to avoid gimbal lock
        phi = phi.clamp(0.01, std::f32::consts::PI - 0.01);

        let new_offset = Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.cos(),
            radius * phi.sin() * theta.sin(),
        );
        self.position = self.target + new_offset;
    }

    /// Rotate the camera's azimuth only, keeping elevation and radius
    pub fn rotate_azimuth(&mut self, angle: f32) {
        let offset = self.position - self.target;
        let rotated = Mat4::from_rotation_y(angle).transform_vector3(offset);
        self.position = self.target + rotated;
    }

    /// Pan target and position together in the view plane
    pub fn pan(&mut self, delta_x: f32, delta_y: f32, viewport_height: f32) {
        let shift = self.screen_to_world_pan(delta_x, delta_y, viewport_height);
        self.position += shift;
        self.target += shift;
    }

    /// Convert a screen-pixel delta to world movement at the target depth
    pub fn screen_to_world_pan(&self, screen_dx: f32, screen_dy: f32, viewport_height: f32) -> Vec3 {
        let distance = self.distance();
        let fov_height = 2.0 * distance * (self.fov / 2.0).tan();
        let world_per_pixel = fov_height / viewport_height.max(1.0);

        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        right * (-screen_dx * world_per_pixel) + up * (screen_dy * world_per_pixel)
    }

    /// Move along the view direction, clamped to the framing bounds
    pub fn zoom(&mut self, delta: f32) {
        let direction = (self.target - self.position).normalize();
        let distance = self.distance();
        let new_distance = (distance - delta * self.zoom_sensitivity * distance)
            .clamp(self.min_distance, self.max_distance);
        self.position = self.target - direction * new_distance;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }
}
