/*!
 * Retrieval of annotation documents.
 *
 * The converter only needs "the annotation XML for this video". Where the
 * bytes come from is abstracted behind [`AnnotationSource`] so the controller
 * can be driven by the HTTP client in production and by fixtures in tests.
 */

use async_trait::async_trait;
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;
use url::Url;

use crate::app_config::FetchConfig;
use crate::errors::FetchError;

// @const: Youtube video ids are 11 URL-safe base64 characters
static VIDEO_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[?&]v=|youtu\.be/|/embed/|/shorts/|/v/)([A-Za-z0-9_-]{11})")
        .expect("video URL pattern is valid")
});

/// Source of raw annotation XML
#[async_trait]
pub trait AnnotationSource: Send + Sync + Debug {
    /// Fetch the annotation document of a video
    async fn fetch_annotations(&self, video_id: &str) -> Result<Vec<u8>, FetchError>;
}

/// Extract the video id from a Youtube URL, or return the input unchanged
/// when it is not a URL.
pub fn normalize_video_id(input: &str) -> String {
    let trimmed = input.trim();
    VIDEO_URL_REGEX
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// HTTP client for the Youtube annotation service
#[derive(Debug, Clone)]
pub struct HttpAnnotationSource {
    /// Annotation service endpoint
    endpoint: Url,
    /// HTTP client for making requests
    client: Client,
}

impl HttpAnnotationSource {
    /// Create a client from the fetch configuration
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| FetchError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { endpoint, client })
    }

    /// Full request URL for a video
    pub fn request_url(&self, video_id: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("feat", "TCS")
            .append_pair("video_id", video_id);
        url
    }
}

#[async_trait]
impl AnnotationSource for HttpAnnotationSource {
    async fn fetch_annotations(&self, video_id: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.request_url(video_id);
        debug!("Fetching annotations from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Annotation server error ({}): {}", status, error_text);
            return Err(FetchError::Status {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        debug!("Received {} bytes of annotation XML", body.len());
        Ok(body.to_vec())
    }
}

/// Reads an annotation document from a local file
#[derive(Debug, Clone)]
pub struct FileAnnotationSource {
    path: std::path::PathBuf,
}

impl FileAnnotationSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AnnotationSource for FileAnnotationSource {
    async fn fetch_annotations(&self, _video_id: &str) -> Result<Vec<u8>, FetchError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| FetchError::Body(format!("{}: {}", self.path.display(), e)))
    }
}
