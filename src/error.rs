use thiserror::Error;

/// Contract violations rejected before any traversal of the tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("index {index} is out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("range {start}..{end} is empty")]
    EmptyRange { start: usize, end: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
