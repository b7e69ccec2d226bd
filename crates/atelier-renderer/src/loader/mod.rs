//! Asset download and decode, with progress and cancellation.

mod fetch;
mod progress;
mod task;

pub use fetch::{load_asset, LoadError};
pub use progress::{clamp_progress, LoadProgress};
pub use task::{AssetLoader, LoadEvent, LoadHandle, LoadSpawner};
