/*!
 * Mock annotation source for testing
 *
 * Serves a fixed document instead of calling the annotation service, and
 * records every request it receives.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use youtube_ass::errors::FetchError;
use youtube_ass::fetcher::AnnotationSource;

/// Tracks fetch calls to ensure no actual external requests are made
#[derive(Debug, Default)]
pub struct FetchCallTracker {
    /// Count of mock fetch calls made
    pub call_count: usize,
    /// Last video id requested
    pub last_video_id: Option<String>,
    /// Should the next call fail
    pub should_fail: bool,
}

/// Mock implementation of an annotation source
#[derive(Debug)]
pub struct MockAnnotationSource {
    document: Vec<u8>,
    tracker: Arc<Mutex<FetchCallTracker>>,
}

impl MockAnnotationSource {
    /// Create a mock serving the given document
    pub fn new(document: impl Into<Vec<u8>>) -> Self {
        MockAnnotationSource {
            document: document.into(),
            tracker: Arc::new(Mutex::new(FetchCallTracker::default())),
        }
    }

    /// Get the fetch call tracker
    pub fn tracker(&self) -> Arc<Mutex<FetchCallTracker>> {
        self.tracker.clone()
    }

    /// Configure the mock to fail on the next call
    pub fn fail_next_call(&self) {
        self.tracker.lock().unwrap().should_fail = true;
    }
}

#[async_trait]
impl AnnotationSource for MockAnnotationSource {
    async fn fetch_annotations(&self, video_id: &str) -> Result<Vec<u8>, FetchError> {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.call_count += 1;
        tracker.last_video_id = Some(video_id.to_string());

        if tracker.should_fail {
            tracker.should_fail = false;
            return Err(FetchError::Status {
                status_code: 404,
                message: "Mock annotations not found".to_string(),
            });
        }

        Ok(self.document.clone())
    }
}
