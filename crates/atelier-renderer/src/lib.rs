//! Splat render core for the Atelier gown previewer.
//!
//! Classifies model URLs, streams and decodes `.splat`/`.ply` assets on a
//! tokio task, frames an orbit camera around the result, and draws it with
//! a pluggable [`shading::ShadingStrategy`] through wgpu. A
//! [`session::RenderSession`] ties one URL's lifetime together;
//! [`viewer::SplatViewer`] swaps sessions as the URL changes.

pub mod asset;
pub mod camera;
pub mod gpu;
pub mod loader;
pub mod pipeline;
pub mod scheduler;
pub mod session;
pub mod shading;
pub mod viewer;

pub use asset::{classify_asset, AssetKind, Bounds, SplatAsset};
pub use camera::{compute_initial_camera, CameraFraming};
pub use gpu::{GpuContext, RendererError};
pub use loader::{load_asset, AssetLoader, LoadSpawner};
pub use pipeline::{SplatSurface, WgpuSurface};
pub use scheduler::{FrameScheduler, ManualScheduler, TickHandle, WindowScheduler};
pub use session::{RenderSession, ViewerStatus};
pub use shading::{BridalMaterial, PlainMaterial, ShadingStrategy};
pub use viewer::{SplatViewer, ViewerMode};
