/// Shown when a URL is neither `.splat` nor `.ply`.
pub const UNSUPPORTED_MESSAGE: &str = "3DGS viewer supports only .splat or .ply URLs.";

/// Shown when a load fails without a usable reason.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load Gaussian Splat file.";

/// What the overlay shows for the current mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerStatus {
    /// Download or first frame still pending.
    pub loading: bool,
    /// Download progress, 0-100. Never decreases within one mount.
    pub percent: u8,
    /// Set once, by the first successful draw.
    pub rendered: bool,
    pub error: Option<String>,
}

/// Ease-out cubic over `duration_secs`; a zero duration is fully visible.
pub fn fade_opacity(elapsed_secs: f64, duration_secs: f64) -> f32 {
    if duration_secs <= 0.0 {
        return 1.0;
    }
    let t = (elapsed_secs / duration_secs).clamp(0.0, 1.0);
    (1.0 - (1.0 - t).powi(3)) as f32
}
