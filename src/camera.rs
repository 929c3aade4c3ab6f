//! Cameras: a plain look-at camera and the orbit controller that drives
//! it from mouse input.

use glam::{Mat4, Vec3};
use winit::event::MouseButton;

use crate::input::Input;

/// A look-at camera with a perspective projection.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_3,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

/// Spherical-coordinate camera controller: drag to orbit a target, scroll
/// to zoom, elevation clamped short of the poles.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Horizontal angle in radians.
    pub azimuth: f32,
    /// Vertical angle in radians.
    pub elevation: f32,
    pub sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 6.0,
            azimuth: 0.0,
            elevation: 0.35,
            sensitivity: 0.005,
            zoom_sensitivity: 0.5,
            min_distance: 1.0,
            max_distance: 40.0,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the orbit target.
    pub fn target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Set the orbit distance, clamped to the distance limits.
    pub fn distance(mut self, distance: f32) -> Self {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self
    }

    /// Set the initial elevation in radians, clamped short of the poles.
    pub fn elevation(mut self, elevation: f32) -> Self {
        self.elevation = clamp_elevation(elevation);
        self
    }

    /// Apply one frame of mouse input.
    pub fn update(&mut self, input: &Input) {
        if input.mouse_down(MouseButton::Left) {
            let delta = input.mouse_delta();
            self.azimuth -= delta.x * self.sensitivity;
            self.elevation = clamp_elevation(self.elevation + delta.y * self.sensitivity);
        }
        let scroll = input.scroll_delta();
        if scroll.y != 0.0 {
            self.distance =
                (self.distance - scroll.y * self.zoom_sensitivity).clamp(self.min_distance, self.max_distance);
        }
    }

    /// Resolve the current spherical coordinates into a [`Camera`].
    pub fn camera(&self) -> Camera {
        let offset = Vec3::new(
            self.distance * self.elevation.cos() * self.azimuth.sin(),
            self.distance * self.elevation.sin(),
            self.distance * self.elevation.cos() * self.azimuth.cos(),
        );
        Camera {
            position: self.target + offset,
            target: self.target,
            up: Vec3::Y,
            ..Camera::default()
        }
    }
}

fn clamp_elevation(elevation: f32) -> f32 {
    elevation.clamp(
        -std::f32::consts::FRAC_PI_2 + 0.01,
        std::f32::consts::FRAC_PI_2 - 0.01,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn orbit_resolves_to_the_configured_distance() {
        let orbit = OrbitCamera::new().target(Vec3::new(0.0, 1.0, 0.0)).distance(8.0);
        let camera = orbit.camera();
        assert_relative_eq!(camera.position.distance(camera.target), 8.0, epsilon = 1e-5);
    }

    #[test]
    fn elevation_never_reaches_the_pole() {
        let orbit = OrbitCamera::new().elevation(10.0);
        assert!(orbit.elevation < std::f32::consts::FRAC_PI_2);
    }
}
