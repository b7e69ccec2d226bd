//! The render target a session draws into.

use std::sync::Arc;

use atelier_common::Color;

use crate::asset::SplatAsset;
use crate::camera::matrix::Mat4;
use crate::gpu::{FrameUniforms, GpuContext, PhysicalSize, RendererError};
use crate::shading::{MaterialUniforms, ShadingStrategy};

use super::instance::{depth_order, GpuSplat};
use super::splat_pipeline::SplatPipeline;

/// Everything one draw needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub view: Mat4,
    pub projection: Mat4,
    pub focal: [f32; 2],
    pub opacity: f32,
    pub time_secs: f32,
    pub material: MaterialUniforms,
}

/// A drawable surface owned by exactly one render session at a time.
pub trait SplatSurface {
    /// Replace the uploaded splats.
    fn upload(&mut self, asset: &SplatAsset) -> Result<(), RendererError>;

    fn resize(&mut self, width: u32, height: u32);

    fn size(&self) -> PhysicalSize;

    fn draw(&mut self, frame: &FrameParams) -> Result<(), RendererError>;

    /// Free per-asset GPU resources. The surface stays usable for a later
    /// upload.
    ///
    /// For [`WgpuSurface`] that is the splat instance buffer. The pipeline,
    /// shader module and uniform buffers are bound to the window, not the
    /// asset: they move with the surface to the next session and are freed
    /// when the surface itself is dropped.
    fn release(&mut self) -> Result<(), RendererError>;
}

struct Uploaded {
    splats: Vec<GpuSplat>,
    buffer: wgpu::Buffer,
    sorted_for: Option<Mat4>,
}

/// [`SplatSurface`] backed by a wgpu window surface.
pub struct WgpuSurface {
    gpu: GpuContext,
    pipeline: SplatPipeline,
    background: wgpu::Color,
    uploaded: Option<Uploaded>,
    first_frame_logged: bool,
}

impl WgpuSurface {
    pub fn new(gpu: GpuContext, strategy: &Arc<dyn ShadingStrategy>, background: Color) -> Self {
        let pipeline = SplatPipeline::new(&gpu.device, gpu.format(), strategy.as_ref());
        let [r, g, b, a] = background.to_f32_array();
        Self {
            gpu,
            pipeline,
            background: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
            uploaded: None,
            first_frame_logged: false,
        }
    }

    /// Sort for `view` and upload, unless the buffer is already in order.
    fn sort_instances(&mut self, view: &Mat4) {
        let Some(uploaded) = self.uploaded.as_mut() else {
            return;
        };
        if uploaded.sorted_for.as_ref() == Some(view) {
            return;
        }
        let order = depth_order(&uploaded.splats, view);
        let sorted: Vec<GpuSplat> = order
            .iter()
            .map(|&i| uploaded.splats[i as usize])
            .collect();
        self.gpu
            .queue
            .write_buffer(&uploaded.buffer, 0, bytemuck::cast_slice(&sorted));
        uploaded.sorted_for = Some(*view);
    }
}

impl SplatSurface for WgpuSurface {
    fn upload(&mut self, asset: &SplatAsset) -> Result<(), RendererError> {
        let splats: Vec<GpuSplat> = asset.splats().iter().map(GpuSplat::from_splat).collect();
        let size = (splats.len() * std::mem::size_of::<GpuSplat>()).max(4) as u64;
        let max = self.gpu.device.limits().max_buffer_size;
        if size > max {
            return Err(RendererError::DeviceError(format!(
                "{} splats need {size} bytes, device allows {max}",
                splats.len()
            )));
        }
        let buffer = self.gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("splat instances"),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        tracing::info!(splats = splats.len(), bytes = size, "splats uploaded");
        self.uploaded = Some(Uploaded {
            splats,
            buffer,
            sorted_for: None,
        });
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    fn size(&self) -> PhysicalSize {
        self.gpu.size
    }

    fn draw(&mut self, frame: &FrameParams) -> Result<(), RendererError> {
        self.sort_instances(&frame.view);

        let output = match self.gpu.current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let PhysicalSize { width, height } = self.gpu.size;
                self.gpu.resize(width, height);
                return Err(RendererError::SurfaceError("surface reconfigured".into()));
            }
            Err(e) => {
                tracing::error!("Failed to get surface texture: {e}");
                return Err(e.into());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut uniforms = FrameUniforms {
            view: frame.view,
            projection: frame.projection,
            focal: frame.focal,
            opacity: frame.opacity,
            time: frame.time_secs,
            ..FrameUniforms::default()
        };
        uniforms.update_viewport(self.gpu.size.width, self.gpu.size.height);
        self.pipeline
            .update_uniforms(&self.gpu.queue, &uniforms, &frame.material);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("splat frame encoder"),
            });
        let instances = self
            .uploaded
            .as_ref()
            .map(|u| (&u.buffer, u.splats.len() as u32));
        self.pipeline
            .render(&mut encoder, &view, self.background, instances);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if !self.first_frame_logged {
            self.first_frame_logged = true;
            tracing::info!(
                width = self.gpu.size.width,
                height = self.gpu.size.height,
                format = ?self.gpu.format(),
                "first splat frame presented"
            );
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), RendererError> {
        if let Some(uploaded) = self.uploaded.take() {
            uploaded.buffer.destroy();
            tracing::debug!(splats = uploaded.splats.len(), "splat buffer released");
        }
        Ok(())
    }
}
