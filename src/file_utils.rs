use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: Output path named after the video id
    // @params: video_id, output_dir, suffix (appended to the id), extension
    pub fn generate_output_path<P: AsRef<Path>>(
        video_id: &str,
        output_dir: P,
        suffix: &str,
        extension: &str,
    ) -> PathBuf {
        let mut output_filename = sanitize_file_stem(video_id);
        output_filename.push_str(suffix);
        output_filename.push('.');
        output_filename.push_str(extension);

        output_dir.as_ref().join(output_filename)
    }

    /// Write bytes to a file, creating the parent directory first
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: impl AsRef<[u8]>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Keep a video id usable as a file name on every platform
fn sanitize_file_stem(video_id: &str) -> String {
    let cleaned: String = video_id
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "annotations".to_string()
    } else {
        cleaned
    }
}
