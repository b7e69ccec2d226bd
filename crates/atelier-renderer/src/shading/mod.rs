//! Pluggable splat shading.
//!
//! A [`ShadingStrategy`] supplies everything the pipeline needs from a
//! material: the WGSL `fs_main` source, the material uniform block, and the
//! blend state. [`ShadingStrategy::shade`] is the CPU reference of the same
//! fragment function, used to test the math without a GPU.

mod bridal;
mod plain;

pub use bridal::BridalMaterial;
pub use plain::PlainMaterial;

use crate::camera::matrix::Vec3;

/// Squared Mahalanobis distance beyond which a splat fragment is dropped.
pub const GAUSSIAN_CUTOFF: f32 = 4.0;

/// GPU-side material uniforms matching the WGSL `Material` struct.
///
/// Layout: 12 × f32 = 48 bytes, 16-byte aligned.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniforms {
    pub alpha_test: f32,
    pub shine_phase: f32,
    pub shine_strength: f32,
    pub shine_power: f32,
    /// Outline band width in pixels.
    pub outline_thickness: f32,
    /// `1.0` when the whole asset is selected.
    pub selected: f32,
    pub _padding: [f32; 2],
    pub outline_color: [f32; 4],
}

/// Per-frame inputs a strategy may animate on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeInputs {
    pub time_secs: f32,
    /// Unit camera forward vector.
    pub forward: Vec3,
    pub selected: bool,
}

/// One fragment of a splat quad, as the fragment stage sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// Quad-local coordinate; `|p| = 2` is the cutoff ellipse.
    pub p: [f32; 2],
    /// Window-space pixel position.
    pub frag_coord: [f32; 2],
    pub color: [f32; 4],
    /// Projected major-axis length in pixels.
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shaded {
    Discard,
    Color([f32; 4]),
}

pub trait ShadingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// WGSL defining `fs_main`. It is appended to the shared splat vertex
    /// stage, so it can use `VsOut` and the `material` binding.
    fn fragment_wgsl(&self) -> &'static str;

    fn uniforms(&self, inputs: &ShadeInputs) -> MaterialUniforms;

    /// Front-to-back "under" blending: `src × (1 − dst.a) + dst`.
    fn blend_state(&self) -> wgpu::BlendState {
        let component = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::OneMinusDstAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        };
        wgpu::BlendState {
            color: component,
            alpha: component,
        }
    }

    fn shade(&self, fragment: &Fragment, uniforms: &MaterialUniforms) -> Shaded;
}

/// Sparkle phase: time plus a view-dependent offset, so the glitter shifts
/// as the camera orbits.
pub fn shine_phase(time_secs: f32, forward: Vec3) -> f32 {
    time_secs + 3.0 * (forward[0] * 0.33 + forward[1] * 0.62 + forward[2])
}

/// `-|p|²`, the Gaussian exponent for a quad-local coordinate.
pub(crate) fn gaussian_exponent(p: [f32; 2]) -> f32 {
    -(p[0] * p[0] + p[1] * p[1])
}

pub(crate) fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// GLSL-style `fract`: `x - floor(x)`, always in `0..1`.
pub(crate) fn fract(x: f32) -> f32 {
    x - x.floor()
}

pub(crate) fn sparkle_noise(uv: [f32; 2], phase: f32) -> f32 {
    let x = uv[0] + phase;
    let y = uv[1] + phase * 0.37;
    fract((x * 12.9898 + y * 78.233).sin() * 43758.547)
}
