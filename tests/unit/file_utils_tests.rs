/*!
 * Tests for file system utilities
 */

use anyhow::Result;
use std::path::PathBuf;
use youtube_ass::file_utils::FileManager;
use crate::common;

#[test]
fn test_ensureDir_withNestedPath_shouldCreateAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;
    assert!(nested.is_dir());

    // Creating it again is fine
    FileManager::ensure_dir(&nested)?;
    Ok(())
}

#[test]
fn test_generateOutputPath_shouldUseVideoIdSuffixAndExtension() {
    let path = FileManager::generate_output_path("dQw4w9WgXcQ", "/tmp/out", "", "ass");
    assert_eq!(path, PathBuf::from("/tmp/out/dQw4w9WgXcQ.ass"));

    let xml = FileManager::generate_output_path("dQw4w9WgXcQ", "/tmp/out", "-annotations", "xml");
    assert_eq!(xml, PathBuf::from("/tmp/out/dQw4w9WgXcQ-annotations.xml"));
}

#[test]
fn test_generateOutputPath_withUnsafeCharacters_shouldSanitize() {
    let path = FileManager::generate_output_path("a/b:c", "out", "", "ass");
    assert_eq!(path, PathBuf::from("out/a_b_c.ass"));

    let empty = FileManager::generate_output_path("", "out", "", "ass");
    assert_eq!(empty, PathBuf::from("out/annotations.ass"));
}

#[test]
fn test_writeToFile_existingFile_shouldOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "vid.ass", "old content")?;

    FileManager::write_to_file(&path, b"new")?;
    assert_eq!(std::fs::read_to_string(&path)?, "new");
    Ok(())
}

#[test]
fn test_writeToFile_shouldCreateParentAndRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("sub").join("file.txt");

    FileManager::write_to_file(&path, "content")?;
    assert_eq!(std::fs::read_to_string(&path)?, "content");
    Ok(())
}
