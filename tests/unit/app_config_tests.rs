/*!
 * Tests for application configuration
 */

use anyhow::Result;
use youtube_ass::app_config::{Config, LogLevel};
use youtube_ass::position::Canvas;
use crate::common;

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.canvas, Canvas::new(100.0, 100.0));
    assert_eq!(config.fetch.endpoint, "http://youtube.com/annotations/read2");
    assert_eq!(config.fetch.timeout_secs, 30);
    assert_eq!(config.output_dir, ".");
    assert!(!config.save_source_xml);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_saveAndLoad_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.canvas = Canvas::new(640.0, 360.0);
    config.output_dir = "subs".to_string();
    config.save_source_xml = true;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.canvas, Canvas::new(640.0, 360.0));
    assert_eq!(loaded.output_dir, "subs");
    assert!(loaded.save_source_xml);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{ "output_dir": "out", "log_level": "warn" }"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.output_dir, "out");
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.canvas, Canvas::default());
    assert_eq!(config.fetch.timeout_secs, 30);
    Ok(())
}

#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{ not json")?;
    assert!(Config::from_file(&path).is_err());
    Ok(())
}

#[test]
fn test_validate_invalidValues_shouldFail() {
    let mut config = Config::default();
    config.canvas.width = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.fetch.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.fetch.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.output_dir = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_logLevel_toLevelFilter_shouldMatch() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
