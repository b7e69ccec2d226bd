//! Configuration schema types for Atelier.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod store;
mod viewer;

pub use store::*;
pub use viewer::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Atelier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AtelierConfig {
    pub viewer: ViewerConfig,
    pub rental: RentalConfig,
    pub network: NetworkConfig,
    pub conversion: ConversionConfig,
    pub logging: LoggingConfig,
}
