//! Module for the error management
use thiserror::Error;

/// An error that can occur when reading or looking up pools.
#[derive(Error, Debug)]
pub enum Error {
    /// No pool of the collection has this id
    #[error("no pool with id '{0}'")]
    UnknownPool(String),
    /// The pool exists but has fewer riders than the requested position
    #[error("pool '{pool_id}' has no rider at position {index}")]
    UnknownRider {
        /// Id of the pool that was searched
        pool_id: String,
        /// Position of the rider that was requested
        index: usize,
    },
    /// The body is not a JSON document
    #[error("impossible to read pools")]
    Json(#[from] serde_json::Error),
}
