use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures surfaced by the splat viewer.
///
/// None of these are fatal to the host: unsupported formats and load
/// failures become an inline message, upstream failures carry the HTTP
/// status that the proxy saw.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewerError {
    #[error("unsupported asset format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to load asset: {0}")]
    LoadFailure(String),

    #[error("upstream fetch failed with status {status}")]
    UpstreamFetchFailure { status: u16 },

    #[error("renderer error: {0}")]
    Renderer(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AtelierError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Viewer(#[from] ViewerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("rental error: {0}")]
    Rental(String),

    #[error("{0}")]
    Other(String),
}
