//! `fetch`: run one request through the model proxy.

use std::path::Path;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use atelier_common::{AtelierError, Result};
use atelier_config::schema::NetworkConfig;
use atelier_net::ModelProxy;

pub async fn run(
    config: &NetworkConfig,
    url: &str,
    range: Option<&str>,
    output: Option<&Path>,
) -> Result<String> {
    let proxy = ModelProxy::new(config).map_err(|e| AtelierError::Network(e.to_string()))?;
    let response = match proxy.fetch(Some(url), range).await {
        Ok(response) => response,
        Err(err) => {
            return Err(AtelierError::Network(format!(
                "{} {}",
                err.http_status(),
                err.to_json()
            )));
        }
    };

    let mut report = format!("status {}\n", response.status);
    for (name, value) in &response.headers {
        report.push_str(&format!("{name}: {value}\n"));
    }

    let mut file = match output {
        Some(path) => Some(tokio::fs::File::create(path).await?),
        None => None,
    };
    let mut body = response.body;
    let mut total = 0usize;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| AtelierError::Network(e.to_string()))?;
        total += chunk.len();
        if let Some(file) = file.as_mut() {
            file.write_all(&chunk).await?;
        }
    }
    if let Some(file) = file.as_mut() {
        file.flush().await?;
    }

    tracing::info!(url, bytes = total, "proxy fetch finished");
    report.push_str(&format!("{total} bytes relayed\n"));
    Ok(report)
}
