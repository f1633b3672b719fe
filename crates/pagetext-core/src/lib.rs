use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod extractor;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend, PdfDocument};
pub use config_file::{ConfigFile, Overrides, resolve_config};
pub use extractor::{ExtractProgress, extract_text, extract_text_with_progress};

/// Input path used when nothing else is configured.
pub const DEFAULT_INPUT_PATH: &str = "Full_stack_dev_assignment.pdf";
/// Output path used when nothing else is configured.
pub const DEFAULT_OUTPUT_PATH: &str = "assignment_content.txt";

/// Text pulled out of a document, one newline-terminated fragment per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    pages: usize,
}

impl ExtractedText {
    pub(crate) fn new(text: String, pages: usize) -> Self {
        Self { text, pages }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Number of pages the text was assembled from.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Coarse classification of an extraction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Open,
    Read,
    Parse,
    Encrypted,
    Page,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{source}: '{}'", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{source}: '{}'", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Document(BackendError),
    #[error("{source}")]
    Page { index: usize, source: BackendError },
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::Open { .. } => ErrorKind::Open,
            ExtractError::Read { .. } => ErrorKind::Read,
            ExtractError::Document(BackendError::Encrypted) => ErrorKind::Encrypted,
            ExtractError::Document(_) => ErrorKind::Parse,
            ExtractError::Page { .. } => ErrorKind::Page,
        }
    }
}

/// Render an extraction result the way it is printed and saved: the text
/// itself on success, `"Error: <message>"` on failure.
pub fn render_result(result: &Result<ExtractedText, ExtractError>) -> Cow<'_, str> {
    match result {
        Ok(extracted) => Cow::Borrowed(extracted.as_str()),
        Err(e) => Cow::Owned(format!("Error: {e}")),
    }
}

/// Fully resolved run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Exit nonzero when extraction fails (the output file is still written).
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_success_is_verbatim() {
        let result = Ok(ExtractedText::new("page one\npage two\n".into(), 2));
        assert_eq!(render_result(&result), "page one\npage two\n");
    }

    #[test]
    fn render_failure_has_error_prefix() {
        let result = Err(ExtractError::Document(BackendError::Load(
            "EOF marker not found".into(),
        )));
        assert_eq!(render_result(&result), "Error: EOF marker not found");
    }

    #[test]
    fn open_error_mentions_path() {
        let err = ExtractError::Open {
            path: PathBuf::from("missing.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.kind(), ErrorKind::Open);
        assert_eq!(err.to_string(), "No such file or directory: 'missing.pdf'");
    }

    #[test]
    fn encrypted_document_has_its_own_kind() {
        assert_eq!(
            ExtractError::Document(BackendError::Encrypted).kind(),
            ErrorKind::Encrypted
        );
        assert_eq!(
            ExtractError::Document(BackendError::Load("bad xref".into())).kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn page_error_keeps_index_and_message() {
        let err = ExtractError::Page {
            index: 3,
            source: BackendError::Page("unknown font".into()),
        };
        assert_eq!(err.kind(), ErrorKind::Page);
        assert_eq!(err.to_string(), "unknown font");
        assert!(matches!(err, ExtractError::Page { index: 3, .. }));
    }

    #[test]
    fn default_config_uses_legacy_paths() {
        let config = Config::default();
        assert_eq!(config.input, PathBuf::from("Full_stack_dev_assignment.pdf"));
        assert_eq!(config.output, PathBuf::from("assignment_content.txt"));
        assert!(!config.strict);
    }
}
