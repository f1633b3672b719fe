use mupdf::{Document, Page, TextPageFlags};

use pagetext_core::{BackendError, PdfBackend, PdfDocument};

/// MIME type handed to MuPDF so it picks the PDF handler for raw bytes.
const PDF_MAGIC: &str = "application/pdf";

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the rest of the workspace does not
/// transitively depend on it.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn name(&self) -> &'static str {
        "mupdf"
    }

    fn open(&self, data: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError> {
        let document =
            Document::from_bytes(data, PDF_MAGIC).map_err(|e| BackendError::Load(e.to_string()))?;

        if document
            .needs_password()
            .map_err(|e| BackendError::Load(e.to_string()))?
        {
            return Err(BackendError::Encrypted);
        }

        Ok(Box::new(MupdfDocument { document }))
    }
}

struct MupdfDocument {
    document: Document,
}

impl PdfDocument for MupdfDocument {
    fn page_count(&self) -> Result<usize, BackendError> {
        let count = self
            .document
            .page_count()
            .map_err(|e| BackendError::Load(e.to_string()))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        let page_no = i32::try_from(index)
            .map_err(|_| BackendError::Page(format!("page index {index} out of range")))?;
        let page = self
            .document
            .load_page(page_no)
            .map_err(|e| BackendError::Page(e.to_string()))?;
        let text = page_lines(&page)?.join("\n");
        tracing::trace!(page = index + 1, chars = text.len(), "mupdf page text");
        Ok(text)
    }
}

/// Collect the page's text lines in reading order.
fn page_lines(page: &Page) -> Result<Vec<String>, BackendError> {
    let text_page = page
        .to_text_page(TextPageFlags::empty())
        .map_err(|e| BackendError::Page(e.to_string()))?;

    // Block/line iteration matches PyMuPDF's get_text() ordering
    let mut lines = Vec::new();
    for block in text_page.blocks() {
        for line in block.lines() {
            let line_text: String = line
                .chars()
                .map(|c| c.char().unwrap_or('\u{FFFD}'))
                .collect();
            lines.push(line_text);
        }
    }
    Ok(lines)
}
