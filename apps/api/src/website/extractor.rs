//! Page extraction — fetches a URL and reduces it to readable text.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("page returned status {status}")]
    Status { status: u16 },

    #[error("page has no readable text")]
    Empty,
}

/// Anything that can turn a URL into readable text.
///
/// Carried in `AppState` as `Arc<dyn PageExtractor>`.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    async fn extract(&self, url: &Url) -> Result<String, ExtractionError>;
}

/// Fetches pages over HTTP and strips HTML down to text.
#[derive(Clone)]
pub struct HttpPageExtractor {
    client: Client,
}

impl HttpPageExtractor {
    pub fn new(timeout_secs: u64) -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageExtractor for HttpPageExtractor {
    async fn extract(&self, url: &Url) -> Result<String, ExtractionError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Status {
                status: status.as_u16(),
            });
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("html"))
            .unwrap_or(false);
        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);

        let text = if is_html {
            html_to_text(&body)
        } else {
            body.trim().to_string()
        };

        if text.is_empty() {
            return Err(ExtractionError::Empty);
        }
        Ok(text)
    }
}

static INVISIBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script>|<style\b.*?</style>|<noscript\b.*?</noscript>|<head\b.*?</head>")
        .expect("invisible-element pattern is valid")
});
static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</?(p|div|li|ul|ol|tr|table|section|article|header|footer|h[1-6])\b[^>]*>")
        .expect("block pattern is valid")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));
static INLINE_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\f\v]+").expect("whitespace pattern is valid"));

/// Readable text from an HTML document: invisible elements dropped, block
/// elements on their own lines, common entities decoded, blank lines removed.
pub fn html_to_text(html: &str) -> String {
    let visible = INVISIBLE.replace_all(html, " ");
    let broken = BLOCK_BREAK.replace_all(&visible, "\n");
    let stripped = TAG.replace_all(&broken, " ");
    let decoded = decode_entities(&stripped);

    decoded
        .lines()
        .map(|line| INLINE_SPACE.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    // &amp; last so "&amp;lt;" stays "&lt;".
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
