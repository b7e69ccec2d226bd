//! Per-frame uniform block shared by every splat draw.

use crate::camera::matrix::{Mat4, IDENTITY};

/// GPU-side frame uniforms matching the WGSL `Frame` struct.
///
/// Layout: 40 × f32 = 160 bytes, 16-byte aligned.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    /// Viewport size in pixels.
    pub viewport: [f32; 2],
    /// Focal length in pixels.
    pub focal: [f32; 2],
    /// Canvas fade-in multiplier (0.0-1.0).
    pub opacity: f32,
    /// Seconds since the session started.
    pub time: f32,
    pub _padding: [f32; 2],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view: IDENTITY,
            projection: IDENTITY,
            viewport: [1.0, 1.0],
            focal: [1.0, 1.0],
            opacity: 0.0,
            time: 0.0,
            _padding: [0.0; 2],
        }
    }
}

impl FrameUniforms {
    pub fn update_viewport(&mut self, width: u32, height: u32) {
        self.viewport = [width.max(1) as f32, height.max(1) as f32];
    }
}
