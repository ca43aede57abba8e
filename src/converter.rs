use log::{debug, info};

use crate::annotations::{ParsedAnnotations, parse_annotations};
use crate::ass_document::AssDocument;
use crate::diagnostics::{DiagnosticsSink, LogSink, SkipDiagnostic};
use crate::errors::ConversionError;
use crate::position::Canvas;

/// Converts annotation XML into an ASS document for a fixed canvas size
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationConverter {
    canvas: Canvas,
}

impl AnnotationConverter {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    /// Parse the raw document bytes into keyed records.
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn parse(
        &self,
        xml: &[u8],
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<ParsedAnnotations, ConversionError> {
        let text = String::from_utf8_lossy(xml);
        parse_annotations(&text, &self.canvas, sink)
    }

    /// Convert a document, reporting skipped annotations to `sink`
    pub fn convert(
        &self,
        xml: &[u8],
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<AssDocument, ConversionError> {
        debug!("Converting {} bytes of annotation XML", xml.len());

        let mut skipped = 0usize;
        let parsed = {
            let mut counting = |diagnostic: SkipDiagnostic| {
                skipped += 1;
                sink.report(diagnostic);
            };
            self.parse(xml, &mut counting)?
        };

        info!(
            "Converted {} annotation(s), skipped {}",
            parsed.len(),
            skipped
        );

        Ok(AssDocument::from_annotations(&parsed, &self.canvas))
    }

    /// Convert a document, logging skipped annotations as warnings
    pub fn convert_logged(&self, xml: &[u8]) -> Result<AssDocument, ConversionError> {
        self.convert(xml, &mut LogSink)
    }
}
