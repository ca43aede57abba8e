use log::warn;
use std::fmt;

// @module: Reporting of annotations skipped during conversion

/// Why an annotation was left out of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The annotation `type` attribute was not `text`
    NotText(Option<String>),
    /// No `TEXT` child, or one without content
    EmptyText,
    /// No `rectRegion` or `anchoredRegion` under `segment/movingRegion`
    NoRegion,
    /// The moving region has fewer than two keyframes
    MissingKeyframe,
    /// Start or end time is the `never` sentinel
    NeverShown,
    /// The first keyframe has a missing or non-numeric coordinate
    InvalidGeometry(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotText(Some(kind)) => write!(f, "non-text annotation (type '{}')", kind),
            Self::NotText(None) => write!(f, "non-text annotation (no type)"),
            Self::EmptyText => write!(f, "empty annotation"),
            Self::NoRegion => write!(f, "no known regions inside <movingRegion>"),
            Self::MissingKeyframe => write!(f, "moving region needs a start and an end keyframe"),
            Self::NeverShown => write!(f, "annotation is never shown"),
            Self::InvalidGeometry(attr) => write!(f, "invalid or missing '{}' on region", attr),
        }
    }
}

/// A single skipped annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipDiagnostic {
    /// Value of the `id` attribute, if the annotation had one
    pub annotation_id: Option<String>,
    pub reason: SkipReason,
}

impl SkipDiagnostic {
    pub fn new(annotation_id: Option<&str>, reason: SkipReason) -> Self {
        Self {
            annotation_id: annotation_id.map(str::to_string),
            reason,
        }
    }
}

impl fmt::Display for SkipDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipping annotation {}: {}",
            self.annotation_id.as_deref().unwrap_or("<none>"),
            self.reason
        )
    }
}

/// Receiver for skip diagnostics emitted while parsing.
///
/// Diagnostics never influence control flow; a sink only observes them.
pub trait DiagnosticsSink {
    fn report(&mut self, diagnostic: SkipDiagnostic);
}

/// Sink that forwards every diagnostic to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn report(&mut self, diagnostic: SkipDiagnostic) {
        warn!("{}", diagnostic);
    }
}

impl DiagnosticsSink for Vec<SkipDiagnostic> {
    fn report(&mut self, diagnostic: SkipDiagnostic) {
        self.push(diagnostic);
    }
}

impl<F> DiagnosticsSink for F
where
    F: FnMut(SkipDiagnostic),
{
    fn report(&mut self, diagnostic: SkipDiagnostic) {
        (*self)(diagnostic)
    }
}
