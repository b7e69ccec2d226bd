//! Viewer window state.
//!
//! Implements `winit::application::ApplicationHandler` for the `view`
//! subcommand: one window, one GPU surface, and a [`SplatViewer`] that owns
//! the render session for the requested URL.
//!
//! [`SplatViewer`]: atelier_renderer::SplatViewer

mod core;
mod event_handler;
mod init;
mod title;

pub use self::core::AtelierApp;
