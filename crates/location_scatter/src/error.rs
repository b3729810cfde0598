//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid distribution options, malformed catalogs, missing snapshots, and generic errors.
//! Unknown location ids are not errors; lookups report them as `None`.
use thiserror::Error;

use crate::location::LocationId;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("duplicate location '{id}' in catalog")]
    DuplicateLocation { id: LocationId },

    #[error("no snapshot captured for composite location '{id}'")]
    MissingSnapshot { id: LocationId },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
