use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::backend::PdfBackend;
use crate::{ExtractError, ExtractedText};

/// Progress notifications emitted while a document is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractProgress {
    /// The document parsed and reports `pages` pages.
    Opened { pages: usize },
    /// Page `index` (zero-based) of `total` has been extracted.
    Page { index: usize, total: usize },
    /// All pages are done; `bytes` is the length of the assembled text.
    Finished { pages: usize, bytes: usize },
}

/// Extract the text of every page of the PDF at `path`.
///
/// Each page contributes its text followed by a single `'\n'`, in document
/// order. A document with no pages yields an empty string.
pub fn extract_text(path: &Path, backend: &dyn PdfBackend) -> Result<ExtractedText, ExtractError> {
    extract_text_with_progress(path, backend, |_| {})
}

/// Like [`extract_text`], reporting progress through `on_progress`.
pub fn extract_text_with_progress(
    path: &Path,
    backend: &dyn PdfBackend,
    mut on_progress: impl FnMut(ExtractProgress),
) -> Result<ExtractedText, ExtractError> {
    let result = extract_inner(path, backend, &mut on_progress);
    if let Err(ref e) = result {
        tracing::warn!(path = %path.display(), kind = ?e.kind(), error = %e, "extraction failed");
    }
    result
}

fn extract_inner(
    path: &Path,
    backend: &dyn PdfBackend,
    on_progress: &mut dyn FnMut(ExtractProgress),
) -> Result<ExtractedText, ExtractError> {
    let data = read_document(path)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), backend = backend.name(), "read document");

    let document = backend.open(&data).map_err(ExtractError::Document)?;
    let total = document.page_count().map_err(ExtractError::Document)?;
    on_progress(ExtractProgress::Opened { pages: total });

    let mut text = String::new();
    for index in 0..total {
        let page_text = document
            .page_text(index)
            .map_err(|source| ExtractError::Page { index, source })?;
        tracing::debug!(page = index + 1, total, chars = page_text.len(), "extracted page");
        text.push_str(&page_text);
        text.push('\n');
        on_progress(ExtractProgress::Page { index, total });
    }

    on_progress(ExtractProgress::Finished {
        pages: total,
        bytes: text.len(),
    });
    tracing::info!(path = %path.display(), pages = total, bytes = text.len(), "extraction complete");

    Ok(ExtractedText::new(text, total))
}

/// Read the whole file while holding the handle only inside this call.
fn read_document(path: &Path) -> Result<Vec<u8>, ExtractError> {
    let mut file = File::open(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(data)
}
