//! Mock PDF backend for testing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{BackendError, PdfBackend, PdfDocument};

/// Scripted content of one mock page.
#[derive(Clone, Debug)]
pub enum MockPage {
    Text(String),
    /// Extracting this page fails with [`BackendError::Page`].
    Fail(String),
}

#[derive(Clone, Debug)]
enum OpenFailure {
    Load(String),
    Encrypted,
}

/// A hand-rolled mock implementing [`PdfBackend`] for tests.
///
/// Every `open` call yields a document with the same scripted pages, or
/// the configured open error. The bytes of the last `open` call are kept
/// for inspection.
pub struct MockBackend {
    pages: Vec<MockPage>,
    open_error: Option<OpenFailure>,
    last_input: Mutex<Option<Vec<u8>>>,
    open_calls: AtomicUsize,
}

impl MockBackend {
    pub fn new(pages: Vec<MockPage>) -> Self {
        Self {
            pages,
            open_error: None,
            last_input: Mutex::new(None),
            open_calls: AtomicUsize::new(0),
        }
    }

    /// A mock whose pages all extract successfully.
    pub fn with_pages(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|t| MockPage::Text((*t).to_string()))
                .collect(),
        )
    }

    /// A mock that refuses to open anything.
    pub fn failing_open(error: BackendError) -> Self {
        let mut mock = Self::new(Vec::new());
        mock.open_error = Some(match error {
            BackendError::Encrypted => OpenFailure::Encrypted,
            BackendError::Load(msg) | BackendError::Page(msg) => OpenFailure::Load(msg),
        });
        mock
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<Vec<u8>> {
        self.last_input.lock().ok().and_then(|g| g.clone())
    }
}

impl PdfBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn open(&self, data: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_input.lock() {
            *last = Some(data.to_vec());
        }
        match &self.open_error {
            Some(OpenFailure::Load(msg)) => return Err(BackendError::Load(msg.clone())),
            Some(OpenFailure::Encrypted) => return Err(BackendError::Encrypted),
            None => {}
        }
        Ok(Box::new(MockDocument {
            pages: self.pages.clone(),
        }))
    }
}

struct MockDocument {
    pages: Vec<MockPage>,
}

impl PdfDocument for MockDocument {
    fn page_count(&self) -> Result<usize, BackendError> {
        Ok(self.pages.len())
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        match self.pages.get(index) {
            Some(MockPage::Text(text)) => Ok(text.clone()),
            Some(MockPage::Fail(msg)) => Err(BackendError::Page(msg.clone())),
            None => Err(BackendError::Page(format!("page {index} out of range"))),
        }
    }
}
