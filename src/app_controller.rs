use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use crate::app_config::Config;
use crate::converter::AnnotationConverter;
use crate::diagnostics::{DiagnosticsSink, LogSink, SkipDiagnostic};
use crate::fetcher::{AnnotationSource, HttpAnnotationSource};
use crate::file_utils::FileManager;

// @module: Application controller for annotation conversion

/// Outcome of one conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Path of the written .ass file
    pub output_path: PathBuf,
    /// Path of the saved source XML, when requested
    pub source_xml_path: Option<PathBuf>,
    /// Number of dialogue lines written
    pub event_count: usize,
    /// Number of annotations that were skipped
    pub skipped_count: usize,
}

/// Main application controller: fetch, convert, write
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run with the HTTP annotation source built from the configuration
    pub async fn run(&self, video_id: &str) -> Result<RunSummary> {
        let source = HttpAnnotationSource::new(&self.config.fetch)?;
        self.run_with_source(video_id, &source).await
    }

    /// Fetch, convert and write the annotations of one video.
    ///
    /// Nothing is written unless the fetch and the conversion both succeed.
    pub async fn run_with_source(
        &self,
        video_id: &str,
        source: &dyn AnnotationSource,
    ) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();
        info!("Fetching annotations for video {}", video_id);

        let xml = source
            .fetch_annotations(video_id)
            .await
            .with_context(|| format!("Failed to fetch annotations for video {}", video_id))?;

        let converter = AnnotationConverter::new(self.config.canvas);
        let mut skipped_count = 0usize;
        let document = {
            let mut sink = |diagnostic: SkipDiagnostic| {
                skipped_count += 1;
                LogSink.report(diagnostic);
            };
            converter.convert(&xml, &mut sink)
        };

        let output_dir = PathBuf::from(&self.config.output_dir);

        // Keep the raw document even when it fails to convert, it is the
        // thing worth looking at in that case
        let source_xml_path = if self.config.save_source_xml {
            let path = FileManager::generate_output_path(video_id, &output_dir, "-annotations", "xml");
            FileManager::write_to_file(&path, &xml)?;
            info!("Saved source annotations to {:?}", path);
            Some(path)
        } else {
            None
        };

        let document = document
            .with_context(|| format!("Failed to convert annotations for video {}", video_id))?;

        if document.event_count() == 0 {
            warn!("No convertible text annotations found for video {}", video_id);
        }

        let output_path = FileManager::generate_output_path(video_id, &output_dir, "", "ass");
        document.write_to_file(&output_path)?;

        info!(
            "Success: {:?} ({} event(s), {:.2}s)",
            output_path,
            document.event_count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(RunSummary {
            output_path,
            source_xml_path,
            event_count: document.event_count(),
            skipped_count,
        })
    }
}
