//! Instanced splat rendering: instance packing, depth sort, wgpu pipeline,
//! and the surface abstraction sessions draw through.

mod instance;
mod splat_pipeline;
mod surface;

pub use instance::{covariance, depth_order, GpuSplat};
pub use splat_pipeline::{shader_source, SplatPipeline};
pub use surface::{FrameParams, SplatSurface, WgpuSurface};
