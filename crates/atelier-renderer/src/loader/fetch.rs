use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use atelier_common::ViewerError;
use atelier_net::{AssetSource, SourceError};

use crate::asset::{AssetKind, SplatAsset, StreamDecoder};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("load cancelled")]
    Cancelled,

    #[error(transparent)]
    Failed(#[from] ViewerError),
}

fn source_error(err: SourceError) -> ViewerError {
    match err {
        SourceError::Status { status } => ViewerError::UpstreamFetchFailure { status },
        other => ViewerError::LoadFailure(other.to_string()),
    }
}

/// Download and decode one asset.
///
/// `on_progress` receives strictly increasing fractions in `0.0..=1.0`
/// and a final `1.0` once decoding succeeds. The token is checked before
/// every callback, so nothing is reported after cancellation.
pub async fn load_asset<F>(
    source: &dyn AssetSource,
    url: &str,
    kind: AssetKind,
    token: &CancellationToken,
    mut on_progress: F,
) -> Result<SplatAsset, LoadError>
where
    F: FnMut(f64) + Send,
{
    let mut decoder = StreamDecoder::for_kind(kind)
        .ok_or_else(|| ViewerError::UnsupportedFormat(url.to_string()))?;

    let opened = tokio::select! {
        biased;
        _ = token.cancelled() => return Err(LoadError::Cancelled),
        opened = source.open(url) => opened.map_err(source_error)?,
    };

    let total = opened.content_length.filter(|&n| n > 0);
    let mut chunks = opened.chunks;
    let mut received: u64 = 0;
    let mut reported = 0.0;

    loop {
        let next = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(LoadError::Cancelled),
            next = chunks.next() => next,
        };
        let Some(chunk) = next else { break };
        let chunk = chunk.map_err(source_error)?;
        received += chunk.len() as u64;
        decoder
            .push(&chunk)
            .map_err(|e| ViewerError::LoadFailure(e.to_string()))?;

        if let Some(total) = total {
            let fraction = (received as f64 / total as f64).min(1.0);
            if fraction > reported {
                reported = fraction;
                if token.is_cancelled() {
                    return Err(LoadError::Cancelled);
                }
                on_progress(fraction);
            }
        }
    }

    let asset = decoder
        .finish()
        .map_err(|e| ViewerError::LoadFailure(e.to_string()))?;

    if token.is_cancelled() {
        return Err(LoadError::Cancelled);
    }
    if reported < 1.0 {
        on_progress(1.0);
    }
    tracing::info!(url, splats = asset.len(), bytes = received, "asset decoded");
    Ok(asset)
}
