//! `convert`: the mock video-to-3D service.

use atelier_common::{AtelierError, Result};
use atelier_config::schema::ConversionConfig;
use atelier_net::ConversionService;

/// Run one conversion and render the result as the JSON the storefront
/// receives.
pub async fn run(config: &ConversionConfig, video_name: &str) -> Result<String> {
    let mut service = ConversionService::from_config(config);
    let result = service
        .convert(video_name)
        .await
        .map_err(|e| AtelierError::Other(e.to_string()))?;
    serde_json::to_string_pretty(&result).map_err(|e| AtelierError::Other(e.to_string()))
}
