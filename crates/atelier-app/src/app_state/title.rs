//! Window title reflects the viewer overlay.

use atelier_renderer::{ViewerMode, ViewerStatus};

use super::core::AtelierApp;

pub(super) fn window_title(mode: ViewerMode<'_>, status: Option<&ViewerStatus>) -> String {
    match (mode, status) {
        (ViewerMode::Embed { src }, _) => format!("Atelier - embed {src}"),
        (_, Some(ViewerStatus {
            error: Some(error), ..
        })) => format!("Atelier - {error}"),
        (_, Some(status)) if status.loading => {
            format!("Atelier - Loading 3D view... {}%", status.percent)
        }
        _ => "Atelier".to_string(),
    }
}

impl AtelierApp {
    pub(super) fn refresh_title(&mut self) {
        let Some(viewer) = self.viewer.as_ref() else {
            return;
        };
        let title = window_title(viewer.mode(), viewer.status());
        if title == self.title {
            return;
        }
        if let Some(window) = self.window.as_ref() {
            window.set_title(&title);
        }
        self.title = title;
    }
}
