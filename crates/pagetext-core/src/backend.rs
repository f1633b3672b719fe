use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// The bytes could not be parsed as a document.
    #[error("{0}")]
    Load(String),
    /// The document is password protected.
    #[error("File has not been decrypted")]
    Encrypted,
    /// A single page could not be loaded or converted to text.
    #[error("{0}")]
    Page(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementors own every PDF-specific concern (object parsing, fonts,
/// encodings, layout). The page loop and the error policy live in
/// [`crate::extractor`].
pub trait PdfBackend: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Parse an in-memory PDF into a document whose pages can be visited.
    fn open(&self, data: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError>;
}

/// A parsed document handed out by a [`PdfBackend`].
///
/// Pages are addressed by zero-based index in document order.
pub trait PdfDocument {
    fn page_count(&self) -> Result<usize, BackendError>;

    /// Plain-text rendition of one page.
    fn page_text(&self, index: usize) -> Result<String, BackendError>;
}
