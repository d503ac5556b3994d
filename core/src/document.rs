use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single book in an uploaded collection.
///
/// Missing fields deserialize to the empty string so that malformed records
/// reach [`validate_collection`] instead of failing in the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

impl Document {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self { title: title.into(), text: text.into() }
    }
}

/// Check that a collection is non-empty and every document has both a title and a text.
pub fn validate_collection(documents: &[Document]) -> Result<bool> {
    if documents.is_empty() {
        return Err(Error::InvalidFile("collection is empty".into()));
    }
    for (pos, doc) in documents.iter().enumerate() {
        if doc.title.is_empty() {
            return Err(Error::InvalidFile(format!("document {pos} has no title")));
        }
        if doc.text.is_empty() {
            return Err(Error::InvalidFile(format!("document {pos} has no text")));
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_collection() {
        let err = validate_collection(&[]).unwrap_err();
        assert_eq!(err, Error::InvalidFile("collection is empty".into()));
    }

    #[test]
    fn rejects_missing_text() {
        let docs = vec![Document { title: "t".into(), ..Default::default() }];
        assert!(matches!(validate_collection(&docs), Err(Error::InvalidFile(_))));
    }

    #[test]
    fn rejects_missing_title_after_valid_ones() {
        let docs = vec![Document::new("a", "b"), Document::new("", "body")];
        let err = validate_collection(&docs).unwrap_err();
        assert_eq!(err.to_string(), "invalid file: document 1 has no title");
    }

    #[test]
    fn accepts_complete_documents() {
        assert_eq!(validate_collection(&[Document::new("t", "b")]), Ok(true));
    }
}
