//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, container read/write failures, and IO.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("container error: {0}")]
    Container(#[from] zip::result::ZipError),

    #[error("malformed container: {0}")]
    Malformed(String),

    #[error("attribute encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
