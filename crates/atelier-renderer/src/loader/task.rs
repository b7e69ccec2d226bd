//! Background loading: one tokio task per session, reporting over a
//! channel that the render loop drains.

use std::sync::mpsc;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use atelier_common::ViewerError;
use atelier_net::AssetSource;

use super::{load_asset, LoadError, LoadProgress};
use crate::asset::{AssetKind, SplatAsset};

#[derive(Debug)]
pub enum LoadEvent {
    Progress(u8),
    Completed(SplatAsset),
    Failed(ViewerError),
}

/// The session's end of a running load. Dropping it cancels the load.
#[derive(Debug)]
pub struct LoadHandle {
    token: CancellationToken,
    events: mpsc::Receiver<LoadEvent>,
}

impl LoadHandle {
    pub fn new(token: CancellationToken, events: mpsc::Receiver<LoadEvent>) -> Self {
        Self { token, events }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Events received since the last call. Always empty once cancelled.
    pub fn drain(&self) -> Vec<LoadEvent> {
        if self.token.is_cancelled() {
            return Vec::new();
        }
        self.events.try_iter().collect()
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Starts asset loads on behalf of a render session.
pub trait LoadSpawner {
    fn spawn(&self, url: &str, kind: AssetKind) -> LoadHandle;
}

/// Runs loads on a tokio runtime against an [`AssetSource`].
pub struct AssetLoader {
    runtime: tokio::runtime::Handle,
    source: Arc<dyn AssetSource>,
}

impl AssetLoader {
    pub fn new(runtime: tokio::runtime::Handle, source: Arc<dyn AssetSource>) -> Self {
        Self { runtime, source }
    }
}

impl LoadSpawner for AssetLoader {
    fn spawn(&self, url: &str, kind: AssetKind) -> LoadHandle {
        let (tx, rx) = mpsc::channel();
        let token = CancellationToken::new();
        let task_token = token.clone();
        let source = Arc::clone(&self.source);
        let url = url.to_string();

        self.runtime.spawn(async move {
            let mut progress = LoadProgress::default();
            let result = load_asset(source.as_ref(), &url, kind, &task_token, |fraction| {
                if let Some(percent) = progress.advance(fraction) {
                    let _ = tx.send(LoadEvent::Progress(percent));
                }
            })
            .await;

            if task_token.is_cancelled() {
                tracing::debug!(%url, "load cancelled");
                return;
            }
            let event = match result {
                Ok(asset) => LoadEvent::Completed(asset),
                Err(LoadError::Cancelled) => return,
                Err(LoadError::Failed(err)) => {
                    tracing::warn!(%url, error = %err, "asset load failed");
                    LoadEvent::Failed(err)
                }
            };
            let _ = tx.send(event);
        });

        LoadHandle::new(token, rx)
    }
}
