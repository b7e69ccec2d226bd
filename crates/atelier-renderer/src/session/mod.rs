//! One viewer mount: load, frame, draw, tear down.
//!
//! A [`RenderSession`] owns its surface, scheduler, and load handle for
//! exactly one asset URL. The host drives it with [`RenderSession::pump`]
//! (or [`RenderSession::poll`] plus [`RenderSession::on_tick`]) from a
//! single thread. Switching URLs means disposing the session and mounting a
//! new one with the reclaimed surface.

mod status;

pub use status::{fade_opacity, ViewerStatus, LOAD_FAILED_MESSAGE, UNSUPPORTED_MESSAGE};

use std::sync::Arc;
use std::time::{Duration, Instant};

use atelier_common::{SessionId, ViewerError};
use atelier_config::schema::ViewerConfig;

use crate::asset::{classify_asset, AssetKind, SplatAsset};
use crate::camera::{frame_bounds, Camera, OrbitControls};
use crate::loader::{LoadEvent, LoadHandle, LoadSpawner};
use crate::pipeline::{FrameParams, SplatSurface};
use crate::scheduler::{FrameScheduler, TickHandle};
use crate::shading::{ShadeInputs, ShadingStrategy};

pub struct RenderSession<S: SplatSurface, F: FrameScheduler> {
    id: SessionId,
    url: String,
    kind: AssetKind,
    config: ViewerConfig,
    strategy: Arc<dyn ShadingStrategy>,
    surface: Option<S>,
    scheduler: F,
    load: Option<LoadHandle>,
    tick: Option<TickHandle>,
    camera: Camera,
    controls: OrbitControls,
    asset: Option<SplatAsset>,
    status: ViewerStatus,
    selected: bool,
    started: Instant,
    last_draw: Option<Instant>,
    fade_started: Option<Instant>,
    observing_resize: bool,
    disposed: bool,
}

impl<S: SplatSurface, F: FrameScheduler> RenderSession<S, F> {
    /// Start a session for `url`. Unsupported URLs get an error status and
    /// never reach `spawner`.
    pub fn mount(
        url: &str,
        config: &ViewerConfig,
        strategy: Arc<dyn ShadingStrategy>,
        surface: S,
        scheduler: F,
        spawner: &dyn LoadSpawner,
        now: Instant,
    ) -> Self {
        let kind = classify_asset(url);
        let mut session = Self {
            id: SessionId::new(),
            url: url.to_string(),
            kind,
            config: config.clone(),
            strategy,
            surface: Some(surface),
            scheduler,
            load: None,
            tick: None,
            camera: Camera::from_config(&config.camera),
            controls: OrbitControls::from_config(&config.controls),
            asset: None,
            status: ViewerStatus::default(),
            selected: false,
            started: now,
            last_draw: None,
            fade_started: None,
            observing_resize: false,
            disposed: false,
        };

        if !kind.is_supported() {
            tracing::warn!(session = %session.id.short(), %url, "unsupported asset URL");
            session.status.error = Some(UNSUPPORTED_MESSAGE.to_string());
            return session;
        }

        session.observing_resize = true;
        session.status.loading = true;
        session.load = Some(spawner.spawn(url, kind));
        tracing::info!(
            session = %session.id.short(),
            %url,
            ?kind,
            strategy = session.strategy.name(),
            "session mounted"
        );
        session
    }

    /// Apply load events received since the last call.
    pub fn poll(&mut self) {
        let Some(load) = self.load.as_ref() else {
            return;
        };
        for event in load.drain() {
            match event {
                LoadEvent::Progress(percent) => {
                    self.status.percent = self.status.percent.max(percent.min(100));
                    tracing::debug!(session = %self.id.short(), percent, "load progress");
                }
                LoadEvent::Completed(asset) => {
                    self.finish_load(asset);
                    break;
                }
                LoadEvent::Failed(err) => {
                    self.fail_load(&err);
                    break;
                }
            }
        }
    }

    fn finish_load(&mut self, asset: SplatAsset) {
        self.load = None;
        self.status.percent = 100;

        let framing = frame_bounds(&asset.bounds(), &self.config.camera, &self.config.controls);
        self.controls.frame(&framing);
        self.camera.follow(&self.controls);

        let uploaded = match self.surface.as_mut() {
            Some(surface) => surface.upload(&asset),
            None => return,
        };
        if let Err(err) = uploaded {
            tracing::warn!(session = %self.id.short(), error = %err, "splat upload failed");
            self.fail_load(&ViewerError::from(err));
            return;
        }

        tracing::info!(
            session = %self.id.short(),
            splats = asset.len(),
            target = ?framing.target,
            "asset loaded"
        );
        self.asset = Some(asset);
        if self.tick.is_none() {
            self.tick = Some(self.scheduler.request_tick());
        }
    }

    fn fail_load(&mut self, err: &ViewerError) {
        self.load = None;
        self.status.loading = false;
        self.status.error = Some(match err {
            ViewerError::LoadFailure(reason) if reason.trim().is_empty() => {
                LOAD_FAILED_MESSAGE.to_string()
            }
            other => other.to_string(),
        });
    }

    /// Run one scheduled frame. Returns `true` if a draw was presented.
    ///
    /// Damping advances on every tick; `max_fps` only skips the draw.
    pub fn on_tick(&mut self, handle: TickHandle, now: Instant) -> bool {
        if self.disposed || self.tick != Some(handle) {
            tracing::debug!(tick = handle.id(), "ignoring stale tick");
            return false;
        }
        self.tick = None;

        self.controls.update();
        self.camera.follow(&self.controls);

        let drew = if self.throttled(now) {
            tracing::debug!(session = %self.id.short(), "draw skipped by frame cap");
            false
        } else {
            self.draw(now)
        };

        self.tick = Some(self.scheduler.request_tick());
        drew
    }

    fn throttled(&self, now: Instant) -> bool {
        let max_fps = self.config.frame.max_fps;
        if max_fps == 0 {
            return false;
        }
        let interval = Duration::from_secs_f64(1.0 / f64::from(max_fps));
        self.last_draw
            .is_some_and(|last| now.saturating_duration_since(last) < interval)
    }

    fn draw(&mut self, now: Instant) -> bool {
        let Some(size) = self.surface.as_ref().map(|s| s.size()) else {
            return false;
        };
        let time_secs = now.saturating_duration_since(self.started).as_secs_f32();
        let frame = FrameParams {
            view: self.camera.view(),
            projection: self.camera.projection(size.width, size.height),
            focal: self.camera.focal(size.width, size.height),
            opacity: self.opacity(now),
            time_secs,
            material: self.strategy.uniforms(&ShadeInputs {
                time_secs,
                forward: self.camera.forward(),
                selected: self.selected,
            }),
        };

        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if let Err(err) = surface.draw(&frame) {
            tracing::debug!(session = %self.id.short(), error = %err, "draw failed");
            return false;
        }
        self.last_draw = Some(now);
        if !self.status.rendered {
            self.status.rendered = true;
            self.status.loading = false;
            self.fade_started = Some(now);
            tracing::info!(session = %self.id.short(), "first frame rendered");
        }
        true
    }

    /// Poll the loader, then run every due tick. Returns the number of draws.
    pub fn pump(&mut self, now: Instant) -> usize {
        self.poll();
        let due = self.scheduler.take_due();
        due.into_iter()
            .filter(|&handle| self.on_tick(handle, now))
            .count()
    }

    /// Canvas opacity at `now`: zero until the first frame, then fading in.
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.fade_started {
            Some(start) => fade_opacity(
                now.saturating_duration_since(start).as_secs_f64(),
                self.config.frame.fade_in_secs,
            ),
            None => 0.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.observing_resize {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
    }

    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.controls.orbit(dx, dy);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.controls.zoom(delta);
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Tear down in order: cancel the load, cancel the pending tick,
    /// release GPU resources, stop following resizes. Safe to call twice.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        if let Some(load) = self.load.take() {
            load.cancel();
        }
        if let Some(tick) = self.tick.take() {
            self.scheduler.cancel_tick(tick);
        }
        if let Some(surface) = self.surface.as_mut() {
            if let Err(err) = surface.release() {
                tracing::debug!(session = %self.id.short(), error = %err, "surface release failed");
            }
        }
        self.asset = None;
        self.observing_resize = false;
        tracing::info!(session = %self.id.short(), url = %self.url, "session disposed");
    }

    /// Dispose and hand the surface back for the next mount.
    pub fn reclaim_surface(mut self) -> Option<S> {
        self.dispose();
        self.surface.take()
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn status(&self) -> &ViewerStatus {
        &self.status
    }

    pub fn asset(&self) -> Option<&SplatAsset> {
        self.asset.as_ref()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn has_pending_tick(&self) -> bool {
        self.tick.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<S: SplatSurface, F: FrameScheduler> Drop for RenderSession<S, F> {
    fn drop(&mut self) {
        self.dispose();
    }
}
