//! Error types for the holerite-core library.

use thiserror::Error;

/// Main error type for the holerite library.
///
/// Only `InvalidDocument`, `PageOutOfRange` and `EmptyExtraction` describe
/// request-level failures. Per-page faults inside the bulk flow never reach
/// this type; they are recorded as degraded pages instead.
#[derive(Error, Debug)]
pub enum HoleriteError {
    /// The supplied bytes are not a structurally valid PDF.
    #[error("invalid document: {0}")]
    InvalidDocument(PdfError),

    /// A requested page lies outside the document.
    #[error("page {page} not found (document has {page_count} pages)")]
    PageOutOfRange {
        /// Requested page number (1-based).
        page: u64,
        /// Number of pages in the document.
        page_count: u32,
    },

    /// The document parsed, but no page yielded any field.
    #[error("no fields could be extracted from any page")]
    EmptyExtraction,

    /// The upload was declared as something other than a PDF.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF data.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Zero-based page index outside `[0, page_count)`.
    #[error("page index {index} out of range (document has {page_count} pages)")]
    PageOutOfRange { index: usize, page_count: u32 },

    /// Failed to extract text from a page.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to serialize a new document.
    #[error("failed to write PDF: {0}")]
    Save(String),
}

/// How a surfaced error should be reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input from the client.
    ClientInput,
    /// The requested page does not exist.
    NotFound,
    /// Well-formed input with nothing extractable.
    Unprocessable,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// HTTP status code conventionally used for this kind.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::ClientInput => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Unprocessable => 422,
            ErrorKind::Internal => 500,
        }
    }

    /// Process exit code used by the command line tool.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Internal => 1,
            ErrorKind::ClientInput => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::Unprocessable => 4,
        }
    }
}

impl HoleriteError {
    /// Classify the error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HoleriteError::InvalidDocument(_) | HoleriteError::UnsupportedContentType(_) => {
                ErrorKind::ClientInput
            }
            HoleriteError::PageOutOfRange { .. } => ErrorKind::NotFound,
            HoleriteError::EmptyExtraction => ErrorKind::Unprocessable,
            HoleriteError::Io(_) | HoleriteError::Config(_) => ErrorKind::Internal,
        }
    }
}

impl From<PdfError> for HoleriteError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::PageOutOfRange { index, page_count } => HoleriteError::PageOutOfRange {
                page: index as u64 + 1,
                page_count,
            },
            other => HoleriteError::InvalidDocument(other),
        }
    }
}

/// Result type for the holerite library.
pub type Result<T> = std::result::Result<T, HoleriteError>;
