//! Damped orbit controls around a target point.
//!
//! The eye sits on a sphere of `radius` around `target`, parameterised by
//! yaw `alpha` and pitch `beta`:
//!
//! ```text
//! eye = target + radius * (sin α cos β, −sin β, −cos α cos β)
//! ```
//!
//! Input moves the desired angles and radius; every [`OrbitControls::update`]
//! moves the current values a fixed fraction of the way there.

use atelier_config::schema::ControlsConfig;

use super::matrix::{add, length, lerp, sub, Vec3};
use super::pose::CameraFraming;

/// Radians of yaw or pitch per pixel of drag, before `orbit_speed`.
const ORBIT_RATE: f32 = 0.003;
/// Radius change per wheel unit, before `zoom_speed`.
const ZOOM_RATE: f32 = 0.025;
/// Below this the controls count as settled.
const SETTLE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    alpha: f32,
    beta: f32,
    radius: f32,
    target: Vec3,
    desired_alpha: f32,
    desired_beta: f32,
    desired_radius: f32,
    desired_target: Vec3,
    min_zoom: f32,
    max_zoom: f32,
    min_angle: f32,
    max_angle: f32,
    orbit_speed: f32,
    zoom_speed: f32,
    dampening: f32,
}

impl OrbitControls {
    pub fn from_config(config: &ControlsConfig) -> Self {
        let min_zoom = config.min_zoom as f32;
        let max_zoom = (config.max_zoom as f32).max(min_zoom);
        let min_angle = config.min_angle as f32;
        let max_angle = (config.max_angle as f32).max(min_angle);
        let alpha = config.alpha as f32;
        let beta = (config.beta as f32).clamp(min_angle, max_angle);
        let radius = (config.radius as f32).clamp(min_zoom, max_zoom);
        Self {
            alpha,
            beta,
            radius,
            target: [0.0; 3],
            desired_alpha: alpha,
            desired_beta: beta,
            desired_radius: radius,
            desired_target: [0.0; 3],
            min_zoom,
            max_zoom,
            min_angle,
            max_angle,
            orbit_speed: config.orbit_speed as f32,
            zoom_speed: config.zoom_speed as f32,
            dampening: (config.dampening as f32).clamp(f32::EPSILON, 1.0),
        }
    }

    /// Jump to a framing: new zoom limits, target, and the angles that put
    /// the eye where the framing asks.
    pub fn frame(&mut self, framing: &CameraFraming) {
        self.min_zoom = framing.min_zoom;
        self.max_zoom = framing.max_zoom.max(framing.min_zoom);

        let offset = sub(framing.eye, framing.target);
        let distance = length(offset);
        if distance > f32::EPSILON {
            self.desired_beta =
                (-offset[1] / distance).clamp(-1.0, 1.0).asin().clamp(self.min_angle, self.max_angle);
            self.desired_alpha = offset[0].atan2(-offset[2]);
        }
        self.desired_radius = framing.distance.clamp(self.min_zoom, self.max_zoom);
        self.desired_target = framing.target;

        self.alpha = self.desired_alpha;
        self.beta = self.desired_beta;
        self.radius = self.desired_radius;
        self.target = self.desired_target;
    }

    /// Drag by `dx`, `dy` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let rate = self.orbit_speed * ORBIT_RATE;
        self.desired_alpha -= dx * rate;
        self.desired_beta = (self.desired_beta + dy * rate).clamp(self.min_angle, self.max_angle);
    }

    /// Positive `delta` moves away from the target.
    pub fn zoom(&mut self, delta: f32) {
        self.desired_radius = (self.desired_radius + delta * self.zoom_speed * ZOOM_RATE)
            .clamp(self.min_zoom, self.max_zoom);
    }

    /// Advance damping by one tick.
    pub fn update(&mut self) {
        let t = self.dampening;
        self.alpha = lerp(self.alpha, self.desired_alpha, t);
        self.beta = lerp(self.beta, self.desired_beta, t);
        self.radius = lerp(self.radius, self.desired_radius, t);
        for axis in 0..3 {
            self.target[axis] = lerp(self.target[axis], self.desired_target[axis], t);
        }
    }

    pub fn is_settled(&self) -> bool {
        (self.alpha - self.desired_alpha).abs() < SETTLE_EPSILON
            && (self.beta - self.desired_beta).abs() < SETTLE_EPSILON
            && (self.radius - self.desired_radius).abs() < SETTLE_EPSILON
            && length(sub(self.target, self.desired_target)) < SETTLE_EPSILON
    }

    pub fn eye(&self) -> Vec3 {
        let (sa, ca) = self.alpha.sin_cos();
        let (sb, cb) = self.beta.sin_cos();
        add(
            self.target,
            [
                self.radius * sa * cb,
                -self.radius * sb,
                -self.radius * ca * cb,
            ],
        )
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn beta(&self) -> f32 {
        self.beta
    }

    pub fn zoom_limits(&self) -> (f32, f32) {
        (self.min_zoom, self.max_zoom)
    }
}
