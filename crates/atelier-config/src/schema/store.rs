//! Storefront-side configuration: rental policy, networking, mock conversion, logging.

use serde::{Deserialize, Serialize};

/// Rental booking policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalConfig {
    /// Share of the rental price charged as a refundable deposit.
    pub deposit_rate: f64,
    /// Days between today and the earliest allowed rental start.
    pub lead_time_days: u32,
    pub currency_symbol: String,
}

impl Default for RentalConfig {
    fn default() -> Self {
        Self {
            deposit_rate: 0.35,
            lead_time_days: 2,
            currency_symbol: "$".into(),
        }
    }
}

/// HTTP client and model proxy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Value of the `x-model-proxy` header added to proxied responses.
    pub proxy_tag: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
            proxy_tag: "bridal3d".into(),
        }
    }
}

/// Mock video-to-3D conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub delay_ms: u64,
    /// Candidate model URLs handed back by the mock.
    pub models: Vec<String>,
    /// Fixed seed for reproducible picks; random when unset.
    pub seed: Option<u64>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2200,
            models: vec![
                "https://huggingface.co/datasets/dylanebert/3dgs/resolve/main/bonsai/bonsai-7k-mini.splat".into(),
                "https://huggingface.co/datasets/dylanebert/3dgs/resolve/main/bicycle/bicycle-7k-mini.splat".into(),
                "https://huggingface.co/datasets/dylanebert/3dgs/resolve/main/stump/input.ply".into(),
                "https://huggingface.co/datasets/dylanebert/3dgs/resolve/main/luigi/luigi.ply".into(),
            ],
            seed: None,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
