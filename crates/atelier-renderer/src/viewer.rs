//! The viewer host: routes a model URL to the embed collaborator or to a
//! render session, and swaps sessions when the URL changes.

use std::sync::Arc;
use std::time::Instant;

use atelier_config::schema::ViewerConfig;

use crate::asset::{embed_src, is_embed_url};
use crate::loader::LoadSpawner;
use crate::pipeline::SplatSurface;
use crate::scheduler::FrameScheduler;
use crate::session::{RenderSession, ViewerStatus};
use crate::shading::ShadingStrategy;

/// What the viewer is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerMode<'a> {
    Idle,
    /// Hosted embed; the render core is bypassed.
    Embed { src: &'a str },
    Splat,
}

pub struct SplatViewer<S, F, M>
where
    S: SplatSurface,
    F: FrameScheduler,
    M: FnMut() -> F,
{
    config: ViewerConfig,
    strategy: Arc<dyn ShadingStrategy>,
    spawner: Box<dyn LoadSpawner>,
    make_scheduler: M,
    url: Option<String>,
    embed: Option<String>,
    session: Option<RenderSession<S, F>>,
    spare_surface: Option<S>,
}

impl<S, F, M> SplatViewer<S, F, M>
where
    S: SplatSurface,
    F: FrameScheduler,
    M: FnMut() -> F,
{
    pub fn new(
        config: ViewerConfig,
        strategy: Arc<dyn ShadingStrategy>,
        surface: S,
        spawner: Box<dyn LoadSpawner>,
        make_scheduler: M,
    ) -> Self {
        Self {
            config,
            strategy,
            spawner,
            make_scheduler,
            url: None,
            embed: None,
            session: None,
            spare_surface: Some(surface),
        }
    }

    /// Show `url`. The same URL again is a no-op; any other URL tears the
    /// current session down before the next one mounts.
    pub fn set_url(&mut self, url: &str, now: Instant) {
        if self.url.as_deref() == Some(url) {
            return;
        }
        self.unmount();
        self.url = Some(url.to_string());

        if is_embed_url(url) {
            let src = embed_src(url);
            tracing::info!(%src, "showing hosted embed");
            self.embed = Some(src);
            return;
        }

        let Some(surface) = self.spare_surface.take() else {
            tracing::warn!(%url, "no surface available, viewer stays idle");
            return;
        };
        let scheduler = (self.make_scheduler)();
        self.session = Some(RenderSession::mount(
            url,
            &self.config,
            Arc::clone(&self.strategy),
            surface,
            scheduler,
            self.spawner.as_ref(),
            now,
        ));
    }

    /// Dispose the current session, keeping its surface for the next mount.
    pub fn unmount(&mut self) {
        self.url = None;
        self.embed = None;
        if let Some(session) = self.session.take() {
            if let Some(surface) = session.reclaim_surface() {
                self.spare_surface = Some(surface);
            }
        }
    }

    pub fn mode(&self) -> ViewerMode<'_> {
        match (&self.embed, &self.session) {
            (Some(src), _) => ViewerMode::Embed { src: src.as_str() },
            (None, Some(_)) => ViewerMode::Splat,
            (None, None) => ViewerMode::Idle,
        }
    }

    pub fn status(&self) -> Option<&ViewerStatus> {
        self.session.as_ref().map(|s| s.status())
    }

    pub fn session(&self) -> Option<&RenderSession<S, F>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut RenderSession<S, F>> {
        self.session.as_mut()
    }

    /// Drive the current session. Returns the number of draws.
    pub fn pump(&mut self, now: Instant) -> usize {
        self.session.as_mut().map_or(0, |s| s.pump(now))
    }
}
