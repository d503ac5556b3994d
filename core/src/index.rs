use crate::document::{validate_collection, Document};
use crate::error::Result;
use crate::query::Query;
use crate::tokenizer::normalize;
use std::collections::{BTreeMap, HashMap};

/// Zero-based index of a document within the collection it was indexed from.
pub type Position = usize;

/// Token to the positions of the documents containing it.
pub type TokenPositions = BTreeMap<String, Vec<Position>>;

/// Result shape of reads and searches: `{ name: { token: [positions] } }`.
pub type IndexView = BTreeMap<String, TokenPositions>;

/// Named inverted indices over book collections.
///
/// Each name is built at most once: later builds under the same name leave the
/// first result in place until [`InvertedIndex::reset`].
#[derive(Debug, Default)]
pub struct InvertedIndex {
    files: HashMap<String, Vec<Document>>,
    index_table: HashMap<String, TokenPositions>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Build the index for `name`.
    ///
    /// Returns `Ok(false)` without touching the table when `documents` is `None`,
    /// and `Ok(true)` both for a fresh build and for a name that is already built.
    /// An invalid collection is rejected before anything is stored.
    pub fn create_index(&mut self, name: &str, documents: Option<&[Document]>) -> Result<bool> {
        let Some(documents) = documents else {
            tracing::debug!(name, "no documents supplied, nothing indexed");
            return Ok(false);
        };
        if let Err(err) = validate_collection(documents) {
            tracing::warn!(name, %err, "rejected document collection");
            return Err(err);
        }
        if self.index_table.contains_key(name) {
            tracing::debug!(name, "already indexed, keeping first build");
            return Ok(true);
        }

        let mut postings = TokenPositions::new();
        for (pos, doc) in documents.iter().enumerate() {
            for token in normalize(&doc.text) {
                postings.entry(token).or_default().push(pos);
            }
        }
        tracing::debug!(name, num_docs = documents.len(), num_tokens = postings.len(), "built index");

        self.files.insert(name.to_owned(), documents.to_vec());
        self.index_table.insert(name.to_owned(), postings);
        Ok(true)
    }

    /// The stored index for `name` keyed by that name, or an empty map if it was never built.
    pub fn get_index(&self, name: &str) -> IndexView {
        self.index_table
            .get(name)
            .map(|postings| IndexView::from([(name.to_owned(), postings.clone())]))
            .unwrap_or_default()
    }

    /// Look up every token of `query` in the index for `name`.
    ///
    /// Tokens that do not occur map to an empty list. A name that was never built
    /// yields an empty token map under that name.
    pub fn search_index(&self, name: &str, query: impl Into<Query>) -> IndexView {
        let mut hits = TokenPositions::new();
        if let Some(postings) = self.index_table.get(name) {
            for token in query.into().tokens() {
                let positions = postings.get(&token).cloned().unwrap_or_default();
                hits.insert(token, positions);
            }
        }
        IndexView::from([(name.to_owned(), hits)])
    }

    /// Drop every built index and retained collection.
    pub fn reset(&mut self) {
        self.files.clear();
        self.index_table.clear();
    }

    pub fn is_indexed(&self, name: &str) -> bool { self.index_table.contains_key(name) }

    /// The collection retained from the first successful build of `name`.
    pub fn files(&self, name: &str) -> Option<&[Document]> {
        self.files.get(name).map(Vec::as_slice)
    }

    /// Names with a built index, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.index_table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize { self.index_table.len() }

    pub fn is_empty(&self) -> bool { self.index_table.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn books() -> Vec<Document> {
        vec![
            Document::new("A", "Alice is in Wonderland"),
            Document::new("B", "The ring of power"),
        ]
    }

    #[test]
    fn null_input_returns_false_without_mutation() {
        let mut idx = InvertedIndex::new();
        assert_eq!(idx.create_index("bk", None), Ok(false));
        assert!(idx.is_empty());
        assert!(idx.get_index("bk").is_empty());
    }

    #[test]
    fn null_input_leaves_built_table_unchanged() {
        let mut idx = InvertedIndex::new();
        idx.create_index("bk", Some(books().as_slice())).unwrap();
        let before = idx.get_index("bk");

        assert_eq!(idx.create_index("bk", None), Ok(false));
        assert_eq!(idx.create_index("other", None), Ok(false));

        assert_eq!(idx.get_index("bk"), before);
        assert_eq!(idx.names(), vec!["bk"]);
        assert!(idx.files("other").is_none());
        assert_eq!(idx.files("bk"), Some(books().as_slice()));
    }

    #[test]
    fn invalid_collection_propagates_and_stores_nothing() {
        let mut idx = InvertedIndex::new();
        let err = idx.create_index("bk", Some(&[][..])).unwrap_err();
        assert!(matches!(err, Error::InvalidFile(_)));
        assert!(!idx.is_indexed("bk"));
        assert!(idx.files("bk").is_none());
    }

    #[test]
    fn positions_accumulate_per_document() {
        let docs = vec![
            Document::new("1", "the cat"),
            Document::new("2", "a dog"),
            Document::new("3", "The cat and the dog"),
        ];
        let mut idx = InvertedIndex::new();
        assert_eq!(idx.create_index("pets", Some(docs.as_slice())), Ok(true));
        let view = idx.get_index("pets");
        let pets = &view["pets"];
        assert_eq!(pets["cat"], vec![0, 2]);
        assert_eq!(pets["dog"], vec![1, 2]);
        assert_eq!(pets["the"], vec![0, 2]);
        assert_eq!(pets["a"], vec![1]);
    }

    #[test]
    fn first_build_wins() {
        let mut idx = InvertedIndex::new();
        idx.create_index("bk", Some(books().as_slice())).unwrap();
        let first = idx.get_index("bk");
        let other = vec![Document::new("C", "Something else entirely")];
        assert_eq!(idx.create_index("bk", Some(other.as_slice())), Ok(true));
        assert_eq!(idx.get_index("bk"), first);
        assert_eq!(idx.files("bk"), Some(books().as_slice()));
    }

    #[test]
    fn search_covers_every_queried_token() {
        let mut idx = InvertedIndex::new();
        idx.create_index("bk", Some(books().as_slice())).unwrap();
        let res = idx.search_index("bk", "Alice magrain");
        assert_eq!(res["bk"]["alice"], vec![0]);
        assert!(res["bk"]["magrain"].is_empty());
    }

    #[test]
    fn search_unknown_name_is_empty_for_that_name() {
        let idx = InvertedIndex::new();
        let res = idx.search_index("missing", "alice");
        assert_eq!(res.len(), 1);
        assert!(res["missing"].is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut idx = InvertedIndex::new();
        idx.create_index("bk", Some(books().as_slice())).unwrap();
        idx.create_index("bk2", Some(books().as_slice())).unwrap();
        assert_eq!(idx.names(), vec!["bk", "bk2"]);
        idx.reset();
        assert!(idx.is_empty());
        assert!(idx.files("bk").is_none());
        // A reset name can be built again.
        let other = vec![Document::new("C", "ring")];
        idx.create_index("bk", Some(other.as_slice())).unwrap();
        assert_eq!(idx.get_index("bk")["bk"]["ring"], vec![0]);
    }
}
