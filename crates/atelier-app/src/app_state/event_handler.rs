//! `ApplicationHandler` implementation for the winit event loop.

use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use super::core::AtelierApp;

/// How often load progress is polled before the first frame.
const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Zoom per wheel notch and per scrolled pixel.
const LINE_ZOOM: f32 = 4.0;
const PIXEL_ZOOM: f32 = 0.05;

impl ApplicationHandler for AtelierApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }
        self.refresh_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(session) = self.viewer.as_mut().and_then(|v| v.session_mut()) {
                        session.resize(size.width, size.height);
                    }
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }

            WindowEvent::CursorMoved { position, .. } => {
                if self.dragging {
                    if let (Some(last), Some(session)) = (
                        self.cursor,
                        self.viewer.as_mut().and_then(|v| v.session_mut()),
                    ) {
                        session.orbit((position.x - last.x) as f32, (position.y - last.y) as f32);
                    }
                }
                self.cursor = Some(position);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let zoom = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_ZOOM,
                    MouseScrollDelta::PixelDelta(p) => -(p.y as f32) * PIXEL_ZOOM,
                };
                if let Some(session) = self.viewer.as_mut().and_then(|v| v.session_mut()) {
                    session.zoom(zoom);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => {
                    self.shutdown();
                    event_loop.exit();
                }
                Key::Character(ref c) if c.eq_ignore_ascii_case("s") => {
                    self.selected = !self.selected;
                    if let Some(session) = self.viewer.as_mut().and_then(|v| v.session_mut()) {
                        session.set_selected(self.selected);
                    }
                    tracing::debug!(selected = self.selected, "selection toggled");
                }
                _ => {}
            },

            WindowEvent::RedrawRequested => {
                if let Some(viewer) = self.viewer.as_mut() {
                    if let Some(session) = viewer.session_mut() {
                        session.scheduler_mut().redraw_requested();
                    }
                    viewer.pump(Instant::now());
                }
                self.refresh_title();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        let now = Instant::now();
        viewer.pump(now);
        let waiting_on_load = viewer.status().is_some_and(|s| s.loading && !s.rendered);
        self.refresh_title();

        if waiting_on_load {
            event_loop.set_control_flow(ControlFlow::WaitUntil(now + LOAD_POLL_INTERVAL));
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}
