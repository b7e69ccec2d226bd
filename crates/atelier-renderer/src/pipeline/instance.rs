//! Per-splat instance data and front-to-back ordering.

use crate::asset::Splat;
use crate::camera::matrix::{transform_point, Mat4};

/// One splat as the vertex stage reads it.
///
/// Layout: position(vec3) + color(vec4) + cov_a(vec3) + cov_b(vec3) = 52 bytes.
/// `cov_a`/`cov_b` hold the upper triangle of the world-space covariance.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuSplat {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub cov_a: [f32; 3],
    pub cov_b: [f32; 3],
}

impl GpuSplat {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GpuSplat>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            // position: vec3<f32> at offset 0
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            // color: vec4<f32> at offset 12
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 12,
                shader_location: 1,
            },
            // cov_a: vec3<f32> at offset 28
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 28,
                shader_location: 2,
            },
            // cov_b: vec3<f32> at offset 40
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 40,
                shader_location: 3,
            },
        ],
    };

    pub fn from_splat(splat: &Splat) -> Self {
        let sigma = covariance(splat.rotation, splat.scale);
        Self {
            position: splat.position,
            color: splat.color.map(|c| c as f32 / 255.0),
            cov_a: [sigma[0][0], sigma[0][1], sigma[0][2]],
            cov_b: [sigma[1][1], sigma[1][2], sigma[2][2]],
        }
    }
}

/// Rotation matrix (row-major) for a unit quaternion `[w, x, y, z]`.
fn rotation_matrix(q: [f32; 4]) -> [[f32; 3]; 3] {
    let [w, x, y, z] = q;
    [
        [
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y - w * z),
            2.0 * (x * z + w * y),
        ],
        [
            2.0 * (x * y + w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z - w * x),
        ],
        [
            2.0 * (x * z - w * y),
            2.0 * (y * z + w * x),
            1.0 - 2.0 * (x * x + y * y),
        ],
    ]
}

/// `Σ = R S Sᵀ Rᵀ` for rotation `q` and per-axis standard deviations `s`.
pub fn covariance(q: [f32; 4], s: [f32; 3]) -> [[f32; 3]; 3] {
    let r = rotation_matrix(q);
    let mut m = [[0.0f32; 3]; 3];
    for row in 0..3 {
        for col in 0..3 {
            m[row][col] = r[row][col] * s[col];
        }
    }
    let mut sigma = [[0.0f32; 3]; 3];
    for row in 0..3 {
        for col in 0..3 {
            sigma[row][col] = (0..3).map(|k| m[row][k] * m[col][k]).sum();
        }
    }
    sigma
}

/// Indices of `splats` sorted nearest first for `view`.
///
/// Front-to-back order is what the under-blend expects: the camera looks
/// down −Z, so nearer splats have larger view-space z.
pub fn depth_order(splats: &[GpuSplat], view: &Mat4) -> Vec<u32> {
    let depths: Vec<f32> = splats
        .iter()
        .map(|s| transform_point(view, s.position)[2])
        .collect();
    let mut order: Vec<u32> = (0..splats.len() as u32).collect();
    order.sort_by(|&a, &b| depths[b as usize].total_cmp(&depths[a as usize]));
    order
}
