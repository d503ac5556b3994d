use crate::document::Document;
use crate::error::Result;
use crate::index::{IndexView, InvertedIndex};
use crate::query::Query;
use parking_lot::Mutex;
use std::sync::Arc;

/// An [`InvertedIndex`] shared between threads behind one lock.
///
/// Every operation holds the lock for its whole duration, so the
/// already-built check and the insert of a build happen atomically.
#[derive(Clone, Default)]
pub struct SharedIndex {
    inner: Arc<Mutex<InvertedIndex>>,
}

impl SharedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn create_index(&self, name: &str, documents: Option<&[Document]>) -> Result<bool> {
        self.inner.lock().create_index(name, documents)
    }

    pub fn get_index(&self, name: &str) -> IndexView {
        self.inner.lock().get_index(name)
    }

    pub fn search_index(&self, name: &str, query: impl Into<Query>) -> IndexView {
        self.inner.lock().search_index(name, query)
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Run `f` with the lock held.
    pub fn with<R>(&self, f: impl FnOnce(&mut InvertedIndex) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

impl From<InvertedIndex> for SharedIndex {
    fn from(index: InvertedIndex) -> Self {
        Self { inner: Arc::new(Mutex::new(index)) }
    }
}
