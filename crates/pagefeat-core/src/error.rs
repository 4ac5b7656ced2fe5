//! Error and warning types for pagefeat.
//!
//! Provides [`PdfError`] for fatal errors that stop processing of a document,
//! [`ExtractWarning`] for non-fatal issues that allow best-effort
//! continuation, and [`ExtractResult`] for pairing a value with collected
//! warnings.

use std::fmt;

/// Fatal error types for page event processing.
///
/// These errors indicate conditions that prevent further processing of the
/// current document.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// A glyph and a draw event were reported for the same cursor slot.
    ///
    /// The upstream interpreter broke its interleaving contract; output for
    /// the document cannot be trusted.
    MalformedInputOrdering {
        /// 1-based page index.
        page: usize,
        /// Cursor slot shared by the conflicting events.
        cursor: u64,
    },
    /// Event data is structurally invalid (e.g., pages out of order).
    InvalidInput(String),
    /// I/O error reading or writing event data.
    IoError(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::MalformedInputOrdering { page, cursor } => write!(
                f,
                "malformed input ordering: glyph and draw events share cursor {cursor} on page {page}"
            ),
            PdfError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}

/// Machine-readable warning code for categorizing extraction issues.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum ExtractWarningCode {
    /// A glyph reported no individual character widths.
    DegenerateGlyphMetrics,
    /// An event kind was received that the consumer does not handle.
    UnsupportedEvent,
}

impl ExtractWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            ExtractWarningCode::DegenerateGlyphMetrics => "DEGENERATE_GLYPH_METRICS",
            ExtractWarningCode::UnsupportedEvent => "UNSUPPORTED_EVENT",
        }
    }
}

impl fmt::Display for ExtractWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal warning encountered during extraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractWarning {
    /// Machine-readable warning code.
    pub code: ExtractWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Page number where the warning occurred (1-based), if applicable.
    pub page: Option<usize>,
    /// Cursor slot of the event that caused the warning.
    pub cursor: Option<u64>,
    /// Font associated with the warning, if applicable.
    pub font_name: Option<String>,
}

impl ExtractWarning {
    /// Create a warning with a specific code and description.
    pub fn with_code(code: ExtractWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            cursor: None,
            font_name: None,
        }
    }

    /// Attach page context.
    pub fn on_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Attach cursor context.
    pub fn at_cursor(mut self, cursor: u64) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Attach font context.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        if let Some(ref font_name) = self.font_name {
            write!(f, " [font {font_name}]")?;
        }
        if let Some(cursor) = self.cursor {
            write!(f, " [cursor #{cursor}]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
#[derive(Debug, Clone)]
pub struct ExtractResult<T> {
    /// The extracted value.
    pub value: T,
    /// Warnings collected during extraction.
    pub warnings: Vec<ExtractWarning>,
}

impl<T> ExtractResult<T> {
    /// Create a result with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<ExtractWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ordering_display_names_page_and_cursor() {
        let err = PdfError::MalformedInputOrdering { page: 3, cursor: 17 };
        let msg = err.to_string();
        assert!(msg.contains("page 3"));
        assert!(msg.contains("cursor 17"));
    }

    #[test]
    fn invalid_input_display() {
        let err = PdfError::InvalidInput("page 2 after page 5".to_string());
        assert_eq!(err.to_string(), "invalid input: page 2 after page 5");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PdfError = io.into();
        assert_eq!(err, PdfError::IoError("gone".to_string()));
    }

    #[test]
    fn pdf_error_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(PdfError::InvalidInput("boom".to_string()));
        assert_eq!(err.to_string(), "invalid input: boom");
    }

    #[test]
    fn warning_code_tags() {
        assert_eq!(
            ExtractWarningCode::DegenerateGlyphMetrics.as_str(),
            "DEGENERATE_GLYPH_METRICS"
        );
        assert_eq!(ExtractWarningCode::UnsupportedEvent.to_string(), "UNSUPPORTED_EVENT");
    }

    #[test]
    fn warning_display_with_context() {
        let w = ExtractWarning::with_code(
            ExtractWarningCode::DegenerateGlyphMetrics,
            "glyph has no widths",
        )
        .on_page(2)
        .at_cursor(40)
        .with_font("F1");
        assert_eq!(
            w.to_string(),
            "[DEGENERATE_GLYPH_METRICS] glyph has no widths (page 2) [font F1] [cursor #40]"
        );
    }

    #[test]
    fn extract_result_clean() {
        let r = ExtractResult::ok(5);
        assert!(r.is_clean());
        let w = ExtractWarning::with_code(ExtractWarningCode::UnsupportedEvent, "x");
        let r = ExtractResult::with_warnings(5, vec![w]);
        assert!(!r.is_clean());
        assert_eq!(r.value, 5);
    }
}
