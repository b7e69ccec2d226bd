//! Splat viewer configuration types: camera, orbit controls, material, frame loop.

use serde::{Deserialize, Serialize};

/// Pitch limit used by the orbit controls (0.48 π).
const DEFAULT_MAX_ANGLE: f64 = std::f64::consts::PI * 0.48;

/// Camera projection and the pose used before an asset has been framed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub near: f64,
    pub far: f64,
    pub fov_y_degrees: f64,
    /// Eye position used while loading and whenever asset bounds are unusable.
    pub default_eye: [f64; 3],
    /// Orbit distance used with `default_eye`.
    pub default_distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            near: 0.01,
            far: 500.0,
            fov_y_degrees: 50.0,
            default_eye: [0.0, 1.15, 4.3],
            default_distance: 4.5,
        }
    }
}

/// Orbit controls: initial angles, limits, and damping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Initial yaw in radians.
    pub alpha: f64,
    /// Initial pitch in radians.
    pub beta: f64,
    /// Initial orbit radius.
    pub radius: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub min_angle: f64,
    pub max_angle: f64,
    pub orbit_speed: f64,
    pub zoom_speed: f64,
    /// Fraction of the remaining distance covered per tick (0.0-1.0].
    pub dampening: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            alpha: -0.3,
            beta: -0.22,
            radius: 4.5,
            min_zoom: 1.1,
            max_zoom: 24.0,
            min_angle: -DEFAULT_MAX_ANGLE,
            max_angle: DEFAULT_MAX_ANGLE,
            orbit_speed: 0.7,
            zoom_speed: 1.0,
            dampening: 0.14,
        }
    }
}

/// Fabric material: alpha test, sparkle, and selection outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    /// Fragments with weighted alpha below this are discarded.
    pub alpha_test: f64,
    pub shine_strength: f64,
    pub shine_power: f64,
    /// Outline band width in pixels for selected splats.
    pub outline_thickness: f64,
    pub outline_color: String,
    /// Clear colour behind the splats (`#rrggbbaa`).
    pub background: String,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            alpha_test: 0.02,
            shine_strength: 0.28,
            shine_power: 10.0,
            outline_thickness: 10.0,
            outline_color: "#ff8000".into(),
            background: "#00000000".into(),
        }
    }
}

/// Frame loop pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Upper bound on draws per second. `0` draws on every display tick.
    pub max_fps: u32,
    /// Duration of the opacity fade after the first frame lands.
    pub fade_in_secs: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_fps: 0,
            fade_in_secs: 0.85,
        }
    }
}

/// Splat viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub material: MaterialConfig,
    pub frame: FrameConfig,
}
