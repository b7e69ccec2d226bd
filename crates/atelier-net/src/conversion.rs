//! Mock video-to-3D conversion.
//!
//! There is no real pipeline behind this: after a fixed delay one of the
//! configured sample models is handed back, tagged with the source video.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use atelier_config::schema::ConversionConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("videoName is required")]
    VideoNameRequired,

    #[error("no sample models configured")]
    NoModels,
}

/// Chooses which sample model a conversion returns.
pub trait ModelSelector: Send {
    /// Index in `0..count`. `count` is never zero.
    fn pick(&mut self, count: usize) -> usize;
}

/// Uniform pick from a seedable RNG.
pub struct SeededSelector {
    rng: StdRng,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        match config.seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }
}

impl ModelSelector for SeededSelector {
    fn pick(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub status: &'static str,
    pub model_url: String,
}

pub struct ConversionService<S: ModelSelector> {
    models: Vec<String>,
    delay: Duration,
    selector: S,
}

impl ConversionService<SeededSelector> {
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(
            config.models.clone(),
            Duration::from_millis(config.delay_ms),
            SeededSelector::from_config(config),
        )
    }
}

impl<S: ModelSelector> ConversionService<S> {
    pub fn new(models: Vec<String>, delay: Duration, selector: S) -> Self {
        Self {
            models,
            delay,
            selector,
        }
    }

    pub async fn convert(&mut self, video_name: &str) -> Result<ConversionResult, ConversionError> {
        if video_name.is_empty() {
            return Err(ConversionError::VideoNameRequired);
        }
        if self.models.is_empty() {
            return Err(ConversionError::NoModels);
        }

        tracing::info!(video_name, delay_ms = self.delay.as_millis() as u64, "converting video");
        tokio::time::sleep(self.delay).await;

        let index = self.selector.pick(self.models.len()).min(self.models.len() - 1);
        let model_url = with_source_param(&self.models[index], video_name);
        tracing::debug!(%model_url, "conversion completed");

        Ok(ConversionResult {
            status: "completed",
            model_url,
        })
    }
}

/// Append `source=<name>` using `?` or `&` as the URL requires.
pub fn with_source_param(url: &str, video_name: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!(
        "{url}{separator}source={}",
        urlencoding::encode(video_name)
    )
}
