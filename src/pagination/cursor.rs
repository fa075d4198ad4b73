//! Cursor pagination.
//!
//! Cursors are opaque tokens wrapping the last-seen row's identifier. A
//! page fetches one row beyond the requested limit so the existence of a
//! further page is known without a second query, and backward pages are
//! reversed before leaving so items always arrive in ascending key order.

use std::marker::PhantomData;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use super::{DEFAULT_LIMIT, MAX_LIMIT, Page, PaginationError, Paginator, build_link};
use crate::orm::{Entity, OrderDirection, SelectQuery};

/// Raw cursor-style input bound from the query string. Must be converted
/// into [`CursorParams`] before a paginator can be built from it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CursorQuery {
    pub cursor: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
}

impl CursorQuery {
    /// Validate the raw input against the request's own URL, producing
    /// parameters a paginator accepts. A non-empty cursor must decode; the
    /// ordering value is lower-cased and restricted to `asc`/`desc`.
    pub fn validate(self, base_url: impl Into<String>) -> Result<CursorParams, PaginationError> {
        let direction = match self.ordering {
            None => OrderDirection::default(),
            Some(ordering) => {
                OrderDirection::parse(ordering.trim()).ok_or(PaginationError::InvalidOrdering)?
            }
        };

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(PaginationError::InvalidLimit);
        }

        let cursor_id = match self.cursor.as_deref() {
            None | Some("") => None,
            Some(cursor) => Some(decode_cursor(cursor)?),
        };

        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(PaginationError::MissingBaseUrl);
        }

        Ok(CursorParams {
            cursor_id,
            direction,
            limit,
            base_url,
        })
    }
}

/// Validated cursor parameters, only obtainable via [`CursorQuery::validate`].
///
/// Holds the already-decoded cursor identifier; `asc` ordering iterates
/// forward, `desc` iterates backward.
#[derive(Debug, Clone)]
pub struct CursorParams {
    cursor_id: Option<String>,
    direction: OrderDirection,
    limit: i64,
    base_url: String,
}

impl CursorParams {
    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn is_forward(&self) -> bool {
        self.direction == OrderDirection::Asc
    }

    pub fn is_backward(&self) -> bool {
        self.direction == OrderDirection::Desc
    }

    fn has_cursor(&self) -> bool {
        self.cursor_id.is_some()
    }
}

/// Cursor paginator for records of type `E`.
pub struct CursorPaginator<E: Entity> {
    params: CursorParams,
    _marker: PhantomData<E>,
}

impl<E: Entity> CursorPaginator<E> {
    pub fn new(params: CursorParams) -> Self {
        Self {
            params,
            _marker: PhantomData,
        }
    }

    fn build_url(&self, id: &str, direction: OrderDirection) -> Result<String, PaginationError> {
        build_link(
            &self.params.base_url,
            &[
                ("cursor", encode_cursor(id)),
                ("ordering", direction.as_param().to_string()),
                ("limit", self.params.limit.to_string()),
            ],
        )
    }
}

impl<E: Entity> Paginator<E> for CursorPaginator<E> {
    fn paginate(&self, query: SelectQuery<E>) -> Result<SelectQuery<E>, PaginationError> {
        // Fetch one extra row to detect a further page without a second query.
        let mut query = query.limit(self.params.limit + 1);

        if let Some(id) = &self.params.cursor_id {
            let value = E::id_value(id).ok_or(PaginationError::InvalidCursor)?;
            query = if self.params.is_forward() {
                query.greater_than(E::PRIMARY_KEY, value)
            } else {
                query.less_than(E::PRIMARY_KEY, value)
            };
        }

        Ok(query.order_by(E::PRIMARY_KEY, self.params.direction))
    }

    fn create_result(
        &self,
        mut items: Vec<E>,
        total_count: i64,
    ) -> Result<Page<E>, PaginationError> {
        let limit = self.params.limit as usize;

        let has_more = items.len() > limit;
        if has_more {
            items.truncate(limit);
        }

        // Backward pages are fetched in descending key order; present them
        // ascending like every other page.
        if self.params.is_backward() {
            items.reverse();
        }

        if items.is_empty() {
            return Ok(Page {
                items,
                total_count,
                previous: None,
                next: None,
            });
        }

        let first_id = items[0].id();
        let last_id = items[items.len() - 1].id();

        let previous = if self.params.has_cursor() || self.params.is_backward() {
            Some(self.build_url(&first_id, OrderDirection::Desc)?)
        } else {
            None
        };

        let next = if has_more || self.params.is_backward() {
            Some(self.build_url(&last_id, OrderDirection::Asc)?)
        } else {
            None
        };

        Ok(Page {
            items,
            total_count,
            previous,
            next,
        })
    }
}

/// Encode an identifier as an opaque cursor token.
pub fn encode_cursor(id: &str) -> String {
    URL_SAFE_NO_PAD.encode(id)
}

/// Decode a cursor token back to the identifier it wraps.
pub fn decode_cursor(cursor: &str) -> Result<String, PaginationError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|_| PaginationError::InvalidCursor)?;
    String::from_utf8(decoded).map_err(|_| PaginationError::InvalidCursor)
}
