//! Window, GPU, and viewer setup on first resume.

use std::sync::Arc;
use std::time::Instant;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use atelier_common::Color;
use atelier_renderer::{
    AssetLoader, BridalMaterial, GpuContext, PlainMaterial, ShadingStrategy, SplatViewer, ViewerMode,
    WgpuSurface, WindowScheduler,
};

use super::core::{AtelierApp, SchedulerFactory};

const CLEAR: Color = Color::from_rgba(0, 0, 0, 0);

impl AtelierApp {
    /// Returns `false` if the window or GPU could not be brought up.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title("Atelier")
            .with_transparent(true)
            .with_inner_size(winit::dpi::LogicalSize::new(960.0, 720.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let gpu = match pollster::block_on(GpuContext::new(Arc::clone(&window))) {
            Ok(gpu) => gpu,
            Err(e) => {
                tracing::error!("Failed to initialize GPU: {e}");
                return false;
            }
        };

        let strategy: Arc<dyn ShadingStrategy> = if self.plain {
            Arc::new(PlainMaterial)
        } else {
            Arc::new(BridalMaterial::from_config(&self.config.material))
        };
        let background = Color::from_hex(&self.config.material.background).unwrap_or_else(|| {
            tracing::warn!(
                background = %self.config.material.background,
                "invalid background colour, using transparent"
            );
            CLEAR
        });
        let surface = WgpuSurface::new(gpu, &strategy, background);

        let spawner = Box::new(AssetLoader::new(
            self.runtime.clone(),
            Arc::clone(&self.source),
        ));
        let scheduler_window = Arc::clone(&window);
        let make_scheduler: SchedulerFactory =
            Box::new(move || WindowScheduler::new(Arc::clone(&scheduler_window)));

        let mut viewer = SplatViewer::new(
            self.config.clone(),
            strategy,
            surface,
            spawner,
            make_scheduler,
        );
        viewer.set_url(&self.url, Instant::now());
        if let Some(session) = viewer.session_mut() {
            session.set_selected(self.selected);
        }
        if let ViewerMode::Embed { src } = viewer.mode() {
            tracing::info!(%src, "hosted embed has no native view, open it in a browser");
        }

        self.window = Some(window);
        self.viewer = Some(viewer);
        true
    }
}
