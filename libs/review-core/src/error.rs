//! Error types for review-core.

use thiserror::Error;

/// A collection handed to the review cursor violates its non-empty invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("collection has no items")]
    Empty,

    #[error("item {id} has no inner items")]
    EmptyItem { id: String },
}

/// Errors that can occur while mapping a lesson response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("lesson body is not a JSON object")]
    NotAnObject,

    #[error("field {field} has an unexpected type")]
    InvalidField { field: &'static str },
}
