//! Initial camera framing from asset bounds.

use atelier_config::schema::{CameraConfig, ControlsConfig};

use super::matrix::{add, length, sub, Vec3};
use crate::asset::Bounds;

/// Framing radius is clamped to `1.0..=MAX_FRAMING_RADIUS`.
pub const MAX_FRAMING_RADIUS: f32 = 50.0;

/// Where the camera starts after an asset loads, and how far it may zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub target: Vec3,
    pub eye: Vec3,
    /// Orbit radius, `|eye - target|` for framed assets.
    pub distance: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl CameraFraming {
    /// The pose used before anything is framed, or when bounds are unusable.
    pub fn fallback(camera: &CameraConfig, controls: &ControlsConfig) -> Self {
        Self {
            target: [0.0; 3],
            eye: camera.default_eye.map(|v| v as f32),
            distance: camera.default_distance as f32,
            min_zoom: controls.min_zoom as f32,
            max_zoom: controls.max_zoom as f32,
        }
    }

    fn is_finite(&self) -> bool {
        self.target
            .iter()
            .chain(self.eye.iter())
            .chain([self.distance, self.min_zoom, self.max_zoom].iter())
            .all(|v| v.is_finite())
    }
}

/// Frame `bounds` with the default camera and control settings.
pub fn compute_initial_camera(bounds: &Bounds) -> CameraFraming {
    frame_bounds(bounds, &CameraConfig::default(), &ControlsConfig::default())
}

/// Look at the bounds center from slightly above and in front.
///
/// Non-finite bounds (an empty asset, or infinite coordinates) fall back
/// to [`CameraFraming::fallback`].
pub fn frame_bounds(
    bounds: &Bounds,
    camera: &CameraConfig,
    controls: &ControlsConfig,
) -> CameraFraming {
    let fallback = CameraFraming::fallback(camera, controls);
    if !bounds.is_finite() {
        tracing::warn!(?bounds, "asset bounds are not finite, using default camera");
        return fallback;
    }

    let center = bounds.center();
    let [ex, ey, ez] = bounds.extent();
    let radius = ex.max(ey).max(ez).max(1.0).clamp(1.0, MAX_FRAMING_RADIUS);
    let eye = add(center, [0.0, radius * 0.24, radius * 1.7]);

    let framing = CameraFraming {
        target: center,
        eye,
        distance: length(sub(eye, center)),
        min_zoom: (radius * 0.25).max(0.9),
        max_zoom: (radius * 8.0).max(12.0),
    };

    if framing.is_finite() {
        framing
    } else {
        tracing::warn!(?bounds, "framing overflowed, using default camera");
        fallback
    }
}
