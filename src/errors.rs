/*!
 * Error types for the youtube-ass application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when fetching annotation documents
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the connection failed
    #[error("Annotation request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status
    #[error("Annotation server responded with error: {status_code} - {message}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The response body could not be read
    #[error("Failed to read annotation response: {0}")]
    Body(String),

    /// The configured endpoint is not a usable URL
    #[error("Invalid annotation endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Fatal errors raised while converting an annotation document.
///
/// Problems with a single annotation are never errors; they are reported
/// through a [`crate::diagnostics::DiagnosticsSink`] instead.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The document is not well-formed XML
    #[error("Malformed annotation XML: {0}")]
    Xml(String),

    /// A required container element is missing
    #[error("Annotation document has no <{0}> element")]
    MissingElement(&'static str),
}

impl From<quick_xml::Error> for ConversionError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Xml(error.to_string())
    }
}
