use crate::tokenizer::normalize;
use serde::{Deserialize, Serialize};

/// A search query: one string of space separated words, or a nested array of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Query {
    Term(String),
    Terms(Vec<Query>),
}

impl Query {
    /// Raw strings in input order, with nested arrays flattened depth-first.
    pub fn terms(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Query::Term(s) => out.push(s),
            Query::Terms(items) => {
                for item in items {
                    item.collect_terms(out);
                }
            }
        }
    }

    /// Normalized, deduplicated tokens, using the same rule as indexing.
    pub fn tokens(&self) -> Vec<String> {
        normalize(&self.terms().join(" "))
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self { Query::Term(s.to_owned()) }
}

impl From<String> for Query {
    fn from(s: String) -> Self { Query::Term(s) }
}

impl<T: Into<Query>> From<Vec<T>> for Query {
    fn from(items: Vec<T>) -> Self {
        Query::Terms(items.into_iter().map(Into::into).collect())
    }
}
