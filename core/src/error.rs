#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The document collection is empty or holds a record without a title or text.
    #[error("invalid file: {0}")]
    InvalidFile(String),
}

pub type Result<T> = std::result::Result<T, Error>;
