//! Network plumbing for the storefront viewer.
//!
//! - [`source`]: streaming byte sources for splat downloads
//! - [`proxy`]: the same-origin model proxy
//! - [`conversion`]: the mock video-to-3D service

pub mod client;
pub mod conversion;
pub mod proxy;
pub mod source;

pub use client::build_client;
pub use conversion::{
    with_source_param, ConversionError, ConversionResult, ConversionService, ModelSelector,
    SeededSelector,
};
pub use proxy::{ModelProxy, ProxiedResponse, ProxyError};
pub use source::{
    AssetSource, AssetStream, ChunkStream, HttpAssetSource, MemoryAssetSource, SourceError,
};
