//! Splat camera: projection, initial framing, and orbit controls.

pub mod matrix;
mod orbit;
mod pose;

pub use orbit::OrbitControls;
pub use pose::{compute_initial_camera, frame_bounds, CameraFraming, MAX_FRAMING_RADIUS};

use atelier_config::schema::CameraConfig;

use matrix::{look_at, normalize, perspective, sub, Mat4, Vec3};

const UP: Vec3 = [0.0, 1.0, 0.0];

/// Perspective camera pose for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            eye: config.default_eye.map(|v| v as f32),
            target: [0.0; 3],
            fov_y: (config.fov_y_degrees as f32).to_radians(),
            near: config.near as f32,
            far: config.far as f32,
        }
    }

    /// Take the pose the orbit controls currently describe.
    pub fn follow(&mut self, controls: &OrbitControls) {
        self.eye = controls.eye();
        self.target = controls.target();
    }

    pub fn forward(&self) -> Vec3 {
        normalize(sub(self.target, self.eye))
    }

    pub fn view(&self) -> Mat4 {
        look_at(self.eye, self.target, UP)
    }

    pub fn projection(&self, width: u32, height: u32) -> Mat4 {
        perspective(self.fov_y, aspect(width, height), self.near, self.far)
    }

    /// Focal length in pixels along x and y.
    pub fn focal(&self, width: u32, height: u32) -> [f32; 2] {
        let f = height.max(1) as f32 * 0.5 / (self.fov_y * 0.5).tan();
        [f, f]
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width.max(1) as f32 / height as f32
    }
}
