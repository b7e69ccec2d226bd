//! Shared HTTP client construction.

use std::time::Duration;

use atelier_config::schema::NetworkConfig;

/// Build the reqwest client used for asset downloads and proxying.
pub fn build_client(config: &NetworkConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(concat!("atelier/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        assert!(build_client(&NetworkConfig::default()).is_ok());
    }
}
