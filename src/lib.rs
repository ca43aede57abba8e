/*!
 * # youtube-ass - Youtube annotations to SubStation Alpha
 *
 * A Rust library for converting Youtube video annotations into ASS subtitles.
 *
 * ## Features
 *
 * - Download the annotation XML of a video
 * - Convert text annotations into ASS styles and dialogue events
 * - Place each annotation on the ASS 3x3 anchor grid with margins
 * - Report skipped annotations through a pluggable diagnostics sink
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `position`: Mapping of annotation boxes onto ASS alignments and margins
 * - `xml_tree`: Minimal XML element tree
 * - `annotations`: Annotation parsing into keyed event and style records
 * - `ass_document`: ASS section rendering and file output
 * - `converter`: XML bytes to ASS document
 * - `diagnostics`: Skipped-annotation reporting
 * - `fetcher`: Annotation sources (HTTP and local file)
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod position;
pub mod xml_tree;
pub mod annotations;
pub mod ass_document;
pub mod converter;
pub mod diagnostics;
pub mod fetcher;
pub mod file_utils;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use annotations::{EventRecord, ParsedAnnotations, StyleRecord, parse_annotations};
pub use ass_document::AssDocument;
pub use converter::AnnotationConverter;
pub use diagnostics::{DiagnosticsSink, LogSink, SkipDiagnostic, SkipReason};
pub use errors::{ConversionError, FetchError};
pub use position::{BoundingBox, Canvas, Placement, map_position};
