pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod shared;
pub mod tokenizer;

pub use document::{validate_collection, Document};
pub use error::{Error, Result};
pub use index::{IndexView, InvertedIndex, Position, TokenPositions};
pub use query::Query;
pub use shared::SharedIndex;
pub use tokenizer::normalize;
