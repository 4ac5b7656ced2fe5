//! Error types for the event dump reader.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`ParseError`]
//! that converts into the core [`PdfError`].

use pagefeat_core::PdfError;
use thiserror::Error;

/// Error type for reading event dumps.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Malformed record, with its 1-based line number.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Error reading dump data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            line,
            message: message.into(),
        }
    }
}

impl From<ParseError> for PdfError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Syntax { .. } => PdfError::InvalidInput(err.to_string()),
            ParseError::Io(e) => PdfError::IoError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display() {
        let err = ParseError::syntax(12, "expected 4 fields");
        assert_eq!(err.to_string(), "line 12: expected 4 fields");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ParseError = io_err.into();
        assert!(matches!(err, ParseError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn syntax_to_pdf_error() {
        let pdf_err: PdfError = ParseError::syntax(3, "bad number").into();
        assert_eq!(
            pdf_err,
            PdfError::InvalidInput("line 3: bad number".to_string())
        );
    }

    #[test]
    fn io_to_pdf_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let pdf_err: PdfError = ParseError::Io(io_err).into();
        assert!(matches!(pdf_err, PdfError::IoError(_)));
        assert!(pdf_err.to_string().contains("denied"));
    }

    #[test]
    fn parse_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ParseError::syntax(1, "test"));
        assert_eq!(err.to_string(), "line 1: test");
    }
}
