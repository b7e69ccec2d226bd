//! Model proxy: relays a remote splat or ply file through our own origin.
//!
//! Only http(s) targets are accepted. A `Range` header is forwarded
//! upstream, and a fixed allow-list of response headers comes back along
//! with an `x-model-proxy` tag.

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, RANGE};
use reqwest::Url;

use atelier_common::ViewerError;
use atelier_config::schema::NetworkConfig;

use crate::source::{ChunkStream, SourceError};

/// Upstream response headers copied onto the proxied response.
pub const FORWARDED_HEADERS: [&str; 7] = [
    "content-type",
    "content-length",
    "content-range",
    "accept-ranges",
    "etag",
    "cache-control",
    "last-modified",
];

pub const PROXY_TAG_HEADER: &str = "x-model-proxy";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxyError {
    #[error("url is required")]
    MissingUrl,

    #[error("Invalid model URL")]
    InvalidUrl(String),

    #[error("Only http/https URLs are allowed")]
    UnsupportedScheme(String),

    #[error("Failed to fetch upstream model")]
    Upstream { status: u16 },

    #[error("Unable to proxy model URL")]
    Unreachable(String),
}

impl ProxyError {
    /// Status code of the JSON error response.
    pub fn http_status(&self) -> u16 {
        match self {
            ProxyError::MissingUrl
            | ProxyError::InvalidUrl(_)
            | ProxyError::UnsupportedScheme(_) => 400,
            ProxyError::Upstream { .. } => 502,
            ProxyError::Unreachable(_) => 500,
        }
    }

    /// JSON error body, e.g. `{"error": "...", "status": 404}`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ProxyError::Upstream { status } => serde_json::json!({
                "error": self.to_string(),
                "status": status,
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        }
    }
}

impl From<ProxyError> for ViewerError {
    fn from(err: ProxyError) -> Self {
        match err {
            ProxyError::Upstream { status } => ViewerError::UpstreamFetchFailure { status },
            other => ViewerError::LoadFailure(other.to_string()),
        }
    }
}

/// Validate the `url` query parameter.
pub fn parse_target(url: Option<&str>) -> Result<Url, ProxyError> {
    let raw = url.filter(|u| !u.is_empty()).ok_or(ProxyError::MissingUrl)?;
    let parsed = Url::parse(raw).map_err(|e| ProxyError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ProxyError::UnsupportedScheme(other.to_string())),
    }
}

/// Successful and partial-content statuses pass through.
pub fn check_upstream_status(status: u16) -> Result<(), ProxyError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ProxyError::Upstream { status })
    }
}

/// Copy the allow-listed headers and append the proxy tag.
pub fn forward_headers(upstream: &HeaderMap, tag: &str) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = FORWARDED_HEADERS
        .iter()
        .filter_map(|name| {
            let value = upstream.get(*name)?.to_str().ok()?;
            (!value.is_empty()).then(|| ((*name).to_string(), value.to_string()))
        })
        .collect();
    headers.push((PROXY_TAG_HEADER.to_string(), tag.to_string()));
    headers
}

/// A relayed upstream response.
pub struct ProxiedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: ChunkStream,
}

impl ProxiedResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub struct ModelProxy {
    http: reqwest::Client,
    tag: String,
}

impl ModelProxy {
    pub fn new(config: &NetworkConfig) -> Result<Self, ProxyError> {
        let http = crate::client::build_client(config)
            .map_err(|e| ProxyError::Unreachable(e.to_string()))?;
        Ok(Self {
            http,
            tag: config.proxy_tag.clone(),
        })
    }

    pub async fn fetch(
        &self,
        url: Option<&str>,
        range: Option<&str>,
    ) -> Result<ProxiedResponse, ProxyError> {
        let target = parse_target(url)?;
        tracing::info!(url = %target, range = ?range, "proxying model");

        let mut request = self.http.get(target);
        if let Some(range) = range {
            request = request.header(RANGE, range);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "model proxy upstream unreachable");
            ProxyError::Unreachable(e.to_string())
        })?;

        let status = response.status().as_u16();
        check_upstream_status(status)?;

        let headers = forward_headers(response.headers(), &self.tag);
        let body = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| SourceError::Interrupted(e.to_string()))
        });

        Ok(ProxiedResponse {
            status,
            headers,
            body: Box::pin(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn missing_or_empty_url_is_rejected() {
        assert_eq!(parse_target(None), Err(ProxyError::MissingUrl));
        assert_eq!(parse_target(Some("")), Err(ProxyError::MissingUrl));
    }

    #[test]
    fn unparseable_url_is_rejected() {
        let err = parse_target(Some("not a url")).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidUrl(_)));
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.to_json(), serde_json::json!({"error": "Invalid model URL"}));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = parse_target(Some("file:///etc/passwd")).unwrap_err();
        assert_eq!(err, ProxyError::UnsupportedScheme("file".into()));
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn https_url_is_accepted() {
        let url = parse_target(Some("https://cdn.test/gowns/aurora.splat?v=2")).unwrap();
        assert_eq!(url.host_str(), Some("cdn.test"));
        assert_eq!(url.path(), "/gowns/aurora.splat");
    }

    #[test]
    fn partial_content_passes_and_errors_map_to_502() {
        assert!(check_upstream_status(200).is_ok());
        assert!(check_upstream_status(206).is_ok());

        let err = check_upstream_status(404).unwrap_err();
        assert_eq!(err.http_status(), 502);
        assert_eq!(
            err.to_json(),
            serde_json::json!({"error": "Failed to fetch upstream model", "status": 404})
        );
    }

    #[test]
    fn upstream_error_becomes_viewer_fetch_failure() {
        let viewer: ViewerError = ProxyError::Upstream { status: 503 }.into();
        assert_eq!(viewer, ViewerError::UpstreamFetchFailure { status: 503 });

        let viewer: ViewerError = ProxyError::MissingUrl.into();
        assert_eq!(viewer, ViewerError::LoadFailure("url is required".into()));
    }

    #[test]
    fn only_allow_listed_headers_are_forwarded() {
        let mut upstream = HeaderMap::new();
        upstream.insert("content-type", HeaderValue::from_static("application/octet-stream"));
        upstream.insert("content-range", HeaderValue::from_static("bytes 0-99/1000"));
        upstream.insert("etag", HeaderValue::from_static("\"abc\""));
        upstream.insert("set-cookie", HeaderValue::from_static("session=1"));
        upstream.insert("x-amz-request-id", HeaderValue::from_static("42"));

        let headers = forward_headers(&upstream, "bridal3d");
        let names: Vec<&str> = headers.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["content-type", "content-range", "etag", PROXY_TAG_HEADER]
        );
        assert_eq!(headers.last().unwrap().1, "bridal3d");
    }

    #[tokio::test]
    async fn fetch_rejects_bad_input_before_any_request() {
        let proxy = ModelProxy::new(&NetworkConfig::default()).unwrap();
        let err = proxy.fetch(Some("ftp://cdn.test/a.ply"), None).await.err();
        assert_eq!(err, Some(ProxyError::UnsupportedScheme("ftp".into())));
    }

    #[tokio::test]
    async fn fetch_reports_unreachable_upstream_as_500() {
        let proxy = ModelProxy::new(&NetworkConfig::default()).unwrap();
        let err = proxy
            .fetch(Some("http://127.0.0.1:1/gown.splat"), Some("bytes=0-31"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ProxyError::Unreachable(_)));
        assert_eq!(err.http_status(), 500);
    }
}
