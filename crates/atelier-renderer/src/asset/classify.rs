//! URL classification: which loader, if any, handles a model URL.

use std::sync::LazyLock;

use regex::Regex;

static SPLAT_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(splat|ply)(\?.*)?$").expect("static regex"));

static PLY_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.ply(\?.*)?$").expect("static regex"));

static EMBED_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(www\.)?sketchfab\.com/models/[^/]+/embed(\?.*)?$")
        .expect("static regex")
});

/// Parameters appended to embed URLs to hide the hosted player chrome.
const EMBED_PARAMS: &str = "ui_infos=0&ui_watermark_link=0";

/// How a model URL will be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Packed 32-byte `.splat` records.
    Splat,
    /// A `.ply` file, either Gaussian or plain coloured points.
    PointCloud,
    Unsupported,
}

impl AssetKind {
    pub fn is_supported(self) -> bool {
        self != AssetKind::Unsupported
    }
}

/// Classify by extension. Case is ignored and so is a trailing query string.
pub fn classify_asset(url: &str) -> AssetKind {
    if !SPLAT_URL_RE.is_match(url) {
        AssetKind::Unsupported
    } else if PLY_URL_RE.is_match(url) {
        AssetKind::PointCloud
    } else {
        AssetKind::Splat
    }
}

/// Whether the URL is a hosted-player embed rather than a raw asset.
pub fn is_embed_url(url: &str) -> bool {
    EMBED_URL_RE.is_match(url)
}

/// Embed URL with the player chrome switched off.
pub fn embed_src(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{EMBED_PARAMS}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splat_extension_is_splat() {
        assert_eq!(classify_asset("https://cdn.test/gown.splat"), AssetKind::Splat);
        assert_eq!(classify_asset("https://cdn.test/GOWN.SPLAT"), AssetKind::Splat);
    }

    #[test]
    fn ply_extension_is_point_cloud() {
        assert_eq!(classify_asset("https://cdn.test/veil.ply"), AssetKind::PointCloud);
        assert_eq!(classify_asset("https://cdn.test/Veil.PlY"), AssetKind::PointCloud);
    }

    #[test]
    fn query_string_is_ignored() {
        assert_eq!(
            classify_asset("https://cdn.test/gown.splat?source=fitting.mp4"),
            AssetKind::Splat
        );
        assert_eq!(
            classify_asset("https://cdn.test/gown.ply?v=2&x=.splat"),
            AssetKind::PointCloud
        );
    }

    #[test]
    fn other_extensions_are_unsupported() {
        for url in [
            "https://cdn.test/gown.obj",
            "https://cdn.test/gown.glb",
            "https://cdn.test/gown.splat.zip",
            "https://cdn.test/gown",
            "",
        ] {
            assert_eq!(classify_asset(url), AssetKind::Unsupported, "{url}");
            assert!(!classify_asset(url).is_supported());
        }
    }

    #[test]
    fn embed_urls_are_recognised() {
        assert!(is_embed_url("https://sketchfab.com/models/abc123/embed"));
        assert!(is_embed_url("https://www.sketchfab.com/models/abc123/embed?autostart=1"));
        assert!(!is_embed_url("https://sketchfab.com/models/abc123"));
        assert!(!is_embed_url("https://cdn.test/gown.splat"));
    }

    #[test]
    fn embed_src_appends_with_right_separator() {
        assert_eq!(
            embed_src("https://sketchfab.com/models/abc/embed"),
            "https://sketchfab.com/models/abc/embed?ui_infos=0&ui_watermark_link=0"
        );
        assert_eq!(
            embed_src("https://sketchfab.com/models/abc/embed?autostart=1"),
            "https://sketchfab.com/models/abc/embed?autostart=1&ui_infos=0&ui_watermark_link=0"
        );
    }
}
