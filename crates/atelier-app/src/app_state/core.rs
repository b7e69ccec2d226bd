//! AtelierApp struct definition and constructor.

use std::sync::Arc;

use winit::dpi::PhysicalPosition;
use winit::window::Window;

use atelier_config::schema::ViewerConfig;
use atelier_net::AssetSource;
use atelier_renderer::{SplatViewer, WgpuSurface, WindowScheduler};

pub(super) type SchedulerFactory = Box<dyn FnMut() -> WindowScheduler>;
pub(super) type ViewerHost = SplatViewer<WgpuSurface, WindowScheduler, SchedulerFactory>;

pub struct AtelierApp {
    pub(super) config: ViewerConfig,
    pub(super) url: String,
    pub(super) selected: bool,
    pub(super) plain: bool,

    // Loads run on the tokio runtime owned by main
    pub(super) runtime: tokio::runtime::Handle,
    pub(super) source: Arc<dyn AssetSource>,

    pub(super) window: Option<Arc<Window>>,
    pub(super) viewer: Option<ViewerHost>,

    // Pointer
    pub(super) dragging: bool,
    pub(super) cursor: Option<PhysicalPosition<f64>>,

    pub(super) title: String,
}

impl AtelierApp {
    pub fn new(
        config: ViewerConfig,
        url: String,
        selected: bool,
        plain: bool,
        runtime: tokio::runtime::Handle,
        source: Arc<dyn AssetSource>,
    ) -> Self {
        Self {
            config,
            url,
            selected,
            plain,
            runtime,
            source,
            window: None,
            viewer: None,
            dragging: false,
            cursor: None,
            title: String::new(),
        }
    }

    /// Dispose the session while the window and device still exist.
    pub(super) fn shutdown(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.unmount();
        }
        self.viewer = None;
    }
}
