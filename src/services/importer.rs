//! Content import: local files and proxy-relayed URL fetches
//!
//! Remote fetches go through public CORS relay proxies rather than straight
//! to the target host, so pages that only answer relayed requests still
//! import. An ordered list of relay strategies is tried in sequence,
//! short-circuiting on the first usable body.

use chrono::Local;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::form_urlencoded;

/// Bound on a stalled proxy; a hung fetch fails the attempt and falls
/// through to the next relay instead of wedging the import forever.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no relay proxy returned usable content for the page")]
    NoUsableContent,
    #[error("failed to read file: {0}")]
    File(#[from] std::io::Error),
}

/// How a relay proxy wraps the fetched body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyStyle {
    /// JSON envelope: `{ "contents": "<body>" }`
    JsonContents,
    /// Response body is the fetched page itself
    Passthrough,
}

/// One relay endpoint in the fallback chain
#[derive(Debug, Clone)]
pub struct RelayProxy {
    pub name: &'static str,
    pub endpoint: String,
    pub style: ProxyStyle,
}

#[derive(Deserialize)]
struct JsonEnvelope {
    contents: Option<String>,
}

impl RelayProxy {
    pub fn allorigins() -> Self {
        Self {
            name: "allorigins",
            endpoint: "https://api.allorigins.win/get".to_string(),
            style: ProxyStyle::JsonContents,
        }
    }

    pub fn codetabs() -> Self {
        Self {
            name: "codetabs",
            endpoint: "https://api.codetabs.com/v1/proxy".to_string(),
            style: ProxyStyle::Passthrough,
        }
    }

    /// Full request URL for fetching `target` through this relay
    pub fn request_url(&self, target: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        match self.style {
            ProxyStyle::JsonContents => {
                // ts defeats the relay's response cache
                let ts = Local::now().timestamp_millis();
                format!("{}?url={}&ts={}", self.endpoint, encoded, ts)
            }
            ProxyStyle::Passthrough => format!("{}?quest={}", self.endpoint, encoded),
        }
    }

    /// Unwrap the relay's response into page content, if usable
    fn extract(&self, body: String) -> Option<String> {
        let content = match self.style {
            ProxyStyle::JsonContents => {
                serde_json::from_str::<JsonEnvelope>(&body).ok()?.contents?
            }
            ProxyStyle::Passthrough => body,
        };
        if content.trim().is_empty() {
            None
        } else {
            Some(content)
        }
    }
}

/// The default fallback chain, in attempt order
pub fn default_proxies() -> Vec<RelayProxy> {
    vec![RelayProxy::allorigins(), RelayProxy::codetabs()]
}

/// Prefix a scheme when the user typed a bare host
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Fetch `target` through the relay chain. Network failure, non-OK status
/// and empty payload all just advance to the next relay; only exhausting
/// the chain is an error.
pub fn fetch_url(proxies: &[RelayProxy], target: &str) -> Result<String, ImportError> {
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|_| ImportError::NoUsableContent)?;

    for proxy in proxies {
        let Ok(response) = client.get(proxy.request_url(target)).send() else {
            continue;
        };
        if !response.status().is_success() {
            continue;
        }
        let Ok(body) = response.text() else {
            continue;
        };
        if let Some(content) = proxy.extract(body) {
            return Ok(content);
        }
    }

    Err(ImportError::NoUsableContent)
}

/// Read a local file as text; any text content is accepted as-is
pub fn read_file(path: &Path) -> Result<String, ImportError> {
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tiny_http::{Response, Server};

    /// Serve one canned response on an ephemeral port, return its base URL
    fn serve_once(status: u16, body: &'static str) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let _ = request.respond(Response::from_string(body).with_status_code(status));
            }
        });
        format!("http://127.0.0.1:{}", port)
    }

    fn json_proxy(base: &str) -> RelayProxy {
        RelayProxy {
            name: "test-json",
            endpoint: format!("{}/get", base),
            style: ProxyStyle::JsonContents,
        }
    }

    fn passthrough_proxy(base: &str) -> RelayProxy {
        RelayProxy {
            name: "test-raw",
            endpoint: format!("{}/proxy", base),
            style: ProxyStyle::Passthrough,
        }
    }

    #[test]
    fn normalize_prefixes_missing_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com "), "https://example.com");
        assert_eq!(normalize_url("http://a.b"), "http://a.b");
        assert_eq!(normalize_url("https://a.b"), "https://a.b");
    }

    #[test]
    fn request_url_encodes_the_target()  {
        let proxy = RelayProxy::codetabs();
        let url = proxy.request_url("https://example.com/a b?x=1");
        assert!(url.starts_with("https://api.codetabs.com/v1/proxy?quest="));
        assert!(url.contains("https%3A%2F%2Fexample.com%2Fa+b%3Fx%3D1"));
    }

    #[test]
    fn primary_json_content_wins() {
        let base = serve_once(200, r#"{"contents":"<h1>page</h1>"}"#);
        let proxies = vec![json_proxy(&base), passthrough_proxy("http://127.0.0.1:1")];
        assert_eq!(fetch_url(&proxies, "https://example.com").unwrap(), "<h1>page</h1>");
    }

    #[test]
    fn empty_primary_falls_through_to_secondary() {
        let primary = serve_once(200, r#"{"contents":""}"#);
        let secondary = serve_once(200, "<body>raw</body>");
        let proxies = vec![json_proxy(&primary), passthrough_proxy(&secondary)];
        assert_eq!(fetch_url(&proxies, "https://example.com").unwrap(), "<body>raw</body>");
    }

    #[test]
    fn non_ok_primary_falls_through_to_secondary() {
        let primary = serve_once(502, "bad gateway");
        let secondary = serve_once(200, "fallback body");
        let proxies = vec![json_proxy(&primary), passthrough_proxy(&secondary)];
        assert_eq!(fetch_url(&proxies, "https://example.com").unwrap(), "fallback body");
    }

    #[test]
    fn exhausted_chain_is_one_generic_failure() {
        // Nothing listens on these ports
        let proxies = vec![
            json_proxy("http://127.0.0.1:1"),
            passthrough_proxy("http://127.0.0.1:1"),
        ];
        let err = fetch_url(&proxies, "https://example.com").unwrap_err();
        assert!(matches!(err, ImportError::NoUsableContent));
    }

    #[test]
    fn read_file_preserves_content_exactly() {
        let path = std::env::temp_dir().join("html2pdf-tui-import-test.html");
        let content = "<p>naïve — exact bytes</p>\n";
        std::fs::write(&path, content).unwrap();
        assert_eq!(read_file(&path).unwrap(), content);
        let _ = std::fs::remove_file(&path);
    }
}
