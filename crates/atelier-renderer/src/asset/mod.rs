//! Splat assets: URL classification, decoded primitives, and decoders.

mod bounds;
mod classify;
pub mod decode;
mod splat;

pub use bounds::Bounds;
pub use classify::{classify_asset, embed_src, is_embed_url, AssetKind};
pub use decode::{DecodeError, StreamDecoder, RECORD_SIZE};
pub use splat::{Splat, SplatAsset};
