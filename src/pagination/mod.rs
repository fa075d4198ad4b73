//! Pagination for listing endpoints.
//!
//! Two styles share one result envelope: page-number pagination
//! ([`offset::OffsetPaginator`]) and cursor pagination
//! ([`cursor::CursorPaginator`]). Both consume validated parameter types
//! that can only be obtained through a fallible `validate` constructor, so
//! a paginator can never run on unchecked input.

mod cursor;
mod offset;

pub use cursor::{CursorPaginator, CursorParams, CursorQuery, decode_cursor, encode_cursor};
pub use offset::{OffsetPaginator, OffsetParams, OffsetQuery};

use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::orm::{Entity, SelectQuery};

/// Default page size when the client does not send `limit`.
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on the client-supplied `limit`.
pub const MAX_LIMIT: i64 = 100;

/// Errors from parameter validation, query mutation and link construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be a positive integer")]
    InvalidPage,

    #[error("limit must be between 1 and {MAX_LIMIT}")]
    InvalidLimit,

    #[error("ordering must be either 'asc' or 'desc'")]
    InvalidOrdering,

    #[error("invalid cursor")]
    InvalidCursor,

    #[error("base url is required")]
    MissingBaseUrl,

    #[error("failed to parse base url")]
    InvalidBaseUrl,
}

/// The API-facing result envelope, identical for both paginator styles.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Turns validated parameters into query bounds and a fetched page into a
/// navigable envelope.
pub trait Paginator<E: Entity> {
    /// Add pagination bounds (and, for cursors, boundary conditions and
    /// ordering) to the query.
    fn paginate(&self, query: SelectQuery<E>) -> Result<SelectQuery<E>, PaginationError>;

    /// Build the result envelope from fetched rows and the matching total.
    fn create_result(&self, items: Vec<E>, total_count: i64)
    -> Result<Page<E>, PaginationError>;
}

/// Build a navigation link from the request's own URL, replacing only the
/// given query keys and preserving everything else.
pub(crate) fn build_link(
    base_url: &str,
    replace: &[(&str, String)],
) -> Result<String, PaginationError> {
    if base_url.is_empty() {
        return Err(PaginationError::MissingBaseUrl);
    }

    let mut url = Url::parse(base_url).map_err(|err| {
        tracing::warn!(error = %err, "failed to parse base url");
        PaginationError::InvalidBaseUrl
    })?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !replace.iter().any(|(replaced, _)| key == replaced))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(kept);
        pairs.extend_pairs(replace.iter().map(|(key, value)| (*key, value.as_str())));
    }

    Ok(url.into())
}
