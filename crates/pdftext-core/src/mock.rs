//! Mock PDF backend for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{BackendError, PdfBackend, PdfDocument};

/// Behaviour of a single mock page.
#[derive(Clone, Debug)]
pub enum MockPage {
    Text(String),
    Error(String),
    Panic,
}

#[derive(Clone, Debug)]
enum OpenBehavior {
    Pages(Vec<MockPage>),
    Fail(String),
    Panic,
}

/// A hand-rolled mock implementing [`PdfBackend`] for tests.
///
/// Ignores the input bytes: every `open` yields the configured pages, fails,
/// or panics. Calls to `open` are counted.
pub struct MockBackend {
    name: &'static str,
    behavior: OpenBehavior,
    open_count: AtomicUsize,
}

impl MockBackend {
    /// Create a mock whose documents contain `pages`.
    pub fn new(name: &'static str, pages: Vec<MockPage>) -> Self {
        Self {
            name,
            behavior: OpenBehavior::Pages(pages),
            open_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock whose pages all extract successfully.
    pub fn with_pages<I, S>(name: &'static str, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            pages
                .into_iter()
                .map(|p| MockPage::Text(p.into()))
                .collect(),
        )
    }

    /// Create a mock that refuses to open any document.
    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            behavior: OpenBehavior::Fail("not a PDF".into()),
            open_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock that panics while opening.
    pub fn panicking(name: &'static str) -> Self {
        Self {
            name,
            behavior: OpenBehavior::Panic,
            open_count: AtomicUsize::new(0),
        }
    }

    /// How many times `open` has been called.
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }
}

impl PdfBackend for MockBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn open(&self, _bytes: &[u8]) -> Result<Box<dyn PdfDocument>, BackendError> {
        self.open_count.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            OpenBehavior::Pages(pages) => Ok(Box::new(MockDocument {
                pages: pages.clone(),
            })),
            OpenBehavior::Fail(msg) => Err(BackendError::Open(msg.clone())),
            OpenBehavior::Panic => panic!("mock backend {} panicked", self.name),
        }
    }
}

struct MockDocument {
    pages: Vec<MockPage>,
}

impl PdfDocument for MockDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        match &self.pages[index] {
            MockPage::Text(text) => Ok(text.clone()),
            MockPage::Error(message) => Err(BackendError::Page {
                index,
                message: message.clone(),
            }),
            MockPage::Panic => panic!("mock page {index} panicked"),
        }
    }
}
