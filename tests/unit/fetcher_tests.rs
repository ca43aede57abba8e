/*!
 * Tests for annotation sources
 */

use anyhow::Result;
use youtube_ass::app_config::FetchConfig;
use youtube_ass::fetcher::{AnnotationSource, FileAnnotationSource, HttpAnnotationSource, normalize_video_id};
use crate::common;
use crate::common::mock_source::MockAnnotationSource;

#[test]
fn test_normalizeVideoId_shortUrl_shouldExtractId() {
    assert_eq!(normalize_video_id("https://youtu.be/abcdefghijk?t=10"), "abcdefghijk");
    assert_eq!(normalize_video_id("https://www.youtube.com/shorts/abcdefghijk"), "abcdefghijk");
}

#[test]
fn test_requestUrl_customEndpoint_shouldKeepExistingQuery() -> Result<()> {
    let config = FetchConfig {
        endpoint: "https://example.com/read?lang=en".to_string(),
        ..FetchConfig::default()
    };
    let source = HttpAnnotationSource::new(&config)?;
    assert_eq!(
        source.request_url("vid").as_str(),
        "https://example.com/read?lang=en&feat=TCS&video_id=vid"
    );
    Ok(())
}

#[tokio::test]
async fn test_fileSource_existingFile_shouldReturnBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_annotations(&temp_dir.path().to_path_buf(), "a.xml")?;

    let source = FileAnnotationSource::new(&path);
    let bytes = source.fetch_annotations("ignored").await?;
    assert_eq!(bytes, common::sample_document().into_bytes());
    Ok(())
}

#[tokio::test]
async fn test_mockSource_failNextCall_shouldFailOnce() {
    let source = MockAnnotationSource::new("<annotations/>");
    source.fail_next_call();

    assert!(source.fetch_annotations("one").await.is_err());
    assert!(source.fetch_annotations("two").await.is_ok());

    let tracker = source.tracker();
    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.call_count, 2);
    assert_eq!(tracker.last_video_id.as_deref(), Some("two"));
}
