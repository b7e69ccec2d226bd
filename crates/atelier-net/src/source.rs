//! Byte-stream sources for splat assets.
//!
//! The renderer's loader only sees [`AssetSource`]: an HTTP implementation
//! for real downloads and an in-memory one for tests and local files.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{stream, Stream, StreamExt};

use atelier_config::schema::NetworkConfig;

/// A boxed stream of byte chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, SourceError>> + Send>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("server responded with HTTP {status}")]
    Status { status: u16 },

    #[error("download interrupted: {0}")]
    Interrupted(String),
}

/// An opened download: the expected size, if known, and its body.
pub struct AssetStream {
    pub content_length: Option<u64>,
    pub chunks: ChunkStream,
}

impl std::fmt::Debug for AssetStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetStream")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn open(&self, url: &str) -> Result<AssetStream, SourceError>;
}

/// Streams assets over HTTP(S).
pub struct HttpAssetSource {
    http: reqwest::Client,
}

impl HttpAssetSource {
    pub fn new(config: &NetworkConfig) -> Result<Self, SourceError> {
        let http =
            crate::client::build_client(config).map_err(|e| SourceError::Request(e.to_string()))?;
        Ok(Self { http })
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AssetSource for HttpAssetSource {
    async fn open(&self, url: &str) -> Result<AssetStream, SourceError> {
        tracing::debug!(url, "opening asset stream");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let content_length = response.content_length();
        let chunks = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| SourceError::Interrupted(e.to_string()))
        });

        Ok(AssetStream {
            content_length,
            chunks: Box::pin(chunks),
        })
    }
}

#[derive(Debug, Clone)]
enum MemoryEntry {
    Bytes(Arc<Vec<u8>>),
    Status(u16),
    /// Yields the bytes, then fails.
    Truncated(Arc<Vec<u8>>),
}

/// Serves registered byte buffers in fixed-size chunks.
///
/// Unknown URLs answer with HTTP 404.
#[derive(Debug)]
pub struct MemoryAssetSource {
    entries: HashMap<String, MemoryEntry>,
    chunk_size: usize,
    opened: AtomicUsize,
}

impl Default for MemoryAssetSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            chunk_size: 4096,
            opened: AtomicUsize::new(0),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.entries
            .insert(url.into(), MemoryEntry::Bytes(Arc::new(bytes)));
    }

    pub fn insert_status(&mut self, url: impl Into<String>, status: u16) {
        self.entries.insert(url.into(), MemoryEntry::Status(status));
    }

    /// Register bytes whose stream breaks after the last chunk.
    pub fn insert_truncated(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.entries
            .insert(url.into(), MemoryEntry::Truncated(Arc::new(bytes)));
    }

    /// Number of `open` calls so far.
    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    fn chunked(&self, bytes: &[u8]) -> Vec<Result<Vec<u8>, SourceError>> {
        bytes
            .chunks(self.chunk_size)
            .map(|chunk| Ok(chunk.to_vec()))
            .collect()
    }
}

#[async_trait]
impl AssetSource for MemoryAssetSource {
    async fn open(&self, url: &str) -> Result<AssetStream, SourceError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        match self.entries.get(url) {
            None => Err(SourceError::Status { status: 404 }),
            Some(MemoryEntry::Status(status)) => Err(SourceError::Status { status: *status }),
            Some(MemoryEntry::Bytes(bytes)) => Ok(AssetStream {
                content_length: Some(bytes.len() as u64),
                chunks: Box::pin(stream::iter(self.chunked(bytes))),
            }),
            Some(MemoryEntry::Truncated(bytes)) => {
                let mut items = self.chunked(bytes);
                items.push(Err(SourceError::Interrupted("connection reset".into())));
                Ok(AssetStream {
                    content_length: Some(bytes.len() as u64 * 2),
                    chunks: Box::pin(stream::iter(items)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(mut stream: AssetStream) -> (Vec<usize>, Option<SourceError>) {
        let mut sizes = Vec::new();
        while let Some(chunk) = stream.chunks.next().await {
            match chunk {
                Ok(bytes) => sizes.push(bytes.len()),
                Err(e) => return (sizes, Some(e)),
            }
        }
        (sizes, None)
    }

    #[tokio::test]
    async fn memory_source_chunks_bytes() {
        let mut source = MemoryAssetSource::new().with_chunk_size(4);
        source.insert("mem://gown.splat", vec![0u8; 10]);

        let stream = source.open("mem://gown.splat").await.unwrap();
        assert_eq!(stream.content_length, Some(10));
        let (sizes, err) = collect(stream).await;
        assert_eq!(sizes, vec![4, 4, 2]);
        assert!(err.is_none());
        assert_eq!(source.open_count(), 1);
    }

    #[tokio::test]
    async fn memory_source_unknown_url_is_404() {
        let source = MemoryAssetSource::new();
        let err = source.open("mem://missing.splat").await.unwrap_err();
        assert_eq!(err, SourceError::Status { status: 404 });
    }

    #[tokio::test]
    async fn memory_source_reports_registered_status() {
        let mut source = MemoryAssetSource::new();
        source.insert_status("mem://private.ply", 403);
        let err = source.open("mem://private.ply").await.unwrap_err();
        assert_eq!(err.to_string(), "server responded with HTTP 403");
    }

    #[tokio::test]
    async fn truncated_entry_fails_after_data() {
        let mut source = MemoryAssetSource::new().with_chunk_size(8);
        source.insert_truncated("mem://cut.splat", vec![1u8; 8]);
        let (sizes, err) = collect(source.open("mem://cut.splat").await.unwrap()).await;
        assert_eq!(sizes, vec![8]);
        assert!(matches!(err, Some(SourceError::Interrupted(_))));
    }

    #[test]
    fn http_source_builds() {
        assert!(HttpAssetSource::new(&NetworkConfig::default()).is_ok());
    }
}
