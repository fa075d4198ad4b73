//! Page-number pagination.
//!
//! Computes a row skip of `limit × (page − 1)` and exposes previous/next
//! links carrying `page` and `limit` query parameters.

use std::marker::PhantomData;

use serde::Deserialize;

use super::{DEFAULT_LIMIT, MAX_LIMIT, Page, PaginationError, Paginator, build_link};
use crate::orm::{Entity, SelectQuery};

const DEFAULT_PAGE: i64 = 1;

/// Raw offset-style input bound from the query string. Must be converted
/// into [`OffsetParams`] before a paginator can be built from it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffsetQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl OffsetQuery {
    /// Validate the raw input against the request's own URL, producing
    /// parameters a paginator accepts.
    pub fn validate(self, base_url: impl Into<String>) -> Result<OffsetParams, PaginationError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(PaginationError::InvalidPage);
        }

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(PaginationError::InvalidLimit);
        }

        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(PaginationError::MissingBaseUrl);
        }

        Ok(OffsetParams {
            page,
            limit,
            base_url,
        })
    }
}

/// Validated offset parameters, only obtainable via [`OffsetQuery::validate`].
#[derive(Debug, Clone)]
pub struct OffsetParams {
    page: i64,
    limit: i64,
    base_url: String,
}

impl OffsetParams {
    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    fn offset(&self) -> i64 {
        self.limit * (self.page - 1)
    }
}

/// Offset paginator for records of type `E`.
pub struct OffsetPaginator<E: Entity> {
    params: OffsetParams,
    _marker: PhantomData<E>,
}

impl<E: Entity> OffsetPaginator<E> {
    pub fn new(params: OffsetParams) -> Self {
        Self {
            params,
            _marker: PhantomData,
        }
    }

    fn build_url(&self, page: i64) -> Result<String, PaginationError> {
        build_link(
            &self.params.base_url,
            &[
                ("page", page.to_string()),
                ("limit", self.params.limit.to_string()),
            ],
        )
    }
}

impl<E: Entity> Paginator<E> for OffsetPaginator<E> {
    fn paginate(&self, query: SelectQuery<E>) -> Result<SelectQuery<E>, PaginationError> {
        Ok(query.limit(self.params.limit).offset(self.params.offset()))
    }

    fn create_result(
        &self,
        items: Vec<E>,
        total_count: i64,
    ) -> Result<Page<E>, PaginationError> {
        let limit = self.params.limit;
        let page = self.params.page;
        let total_pages = (total_count + limit - 1) / limit;

        let previous = if page > 1 {
            Some(self.build_url(page - 1)?)
        } else {
            None
        };

        let next = if page < total_pages {
            Some(self.build_url(page + 1)?)
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

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use url::Url;

    use super::*;

    struct MockRecord {
        id: String,
    }

    impl Entity for MockRecord {
        const TABLE_NAME: &'static str = "records";

        fn column_names() -> &'static [&'static str] {
            &["id"]
        }

        fn id(&self) -> String {
            self.id.clone()
        }
    }

    fn mock_items(count: usize) -> Vec<MockRecord> {
        (0..count)
            .map(|i| MockRecord { id: i.to_string() })
            .collect()
    }

    fn params(page: i64, limit: i64) -> OffsetParams {
        OffsetQuery {
            page: Some(page),
            limit: Some(limit),
        }
        .validate("http://example.com/api")
        .unwrap()
    }

    fn query_param(link: &str, key: &str) -> Option<String> {
        let url = Url::parse(link).unwrap();
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn validate_applies_defaults() {
        let params = OffsetQuery::default()
            .validate("http://example.com/api")
            .unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn validate_rejects_bad_input() {
        let base = "http://example.com/api";

        assert_matches!(
            OffsetQuery {
                page: Some(0),
                limit: None
            }
            .validate(base),
            Err(PaginationError::InvalidPage)
        );
        assert_matches!(
            OffsetQuery {
                page: None,
                limit: Some(0)
            }
            .validate(base),
            Err(PaginationError::InvalidLimit)
        );
        assert_matches!(
            OffsetQuery {
                page: None,
                limit: Some(101)
            }
            .validate(base),
            Err(PaginationError::InvalidLimit)
        );
    }

    #[test]
    fn validate_requires_base_url() {
        let err = OffsetQuery::default().validate("").unwrap_err();
        assert_matches!(err, PaginationError::MissingBaseUrl);
    }

    #[test]
    fn paginate_sets_limit_and_offset() {
        let paginator = OffsetPaginator::<MockRecord>::new(params(3, 10));
        let query = paginator.paginate(SelectQuery::new()).unwrap();

        assert_eq!(query.build_sql(), "SELECT id FROM records LIMIT 10 OFFSET 20");
        assert!(query.bind_values().is_empty());
    }

    #[test]
    fn first_page_offset_is_zero() {
        let paginator = OffsetPaginator::<MockRecord>::new(params(1, 25));
        let query = paginator.paginate(SelectQuery::new()).unwrap();

        assert_eq!(query.build_sql(), "SELECT id FROM records LIMIT 25");
    }

    #[test]
    fn first_page_with_more_pages() {
        let paginator = OffsetPaginator::<MockRecord>::new(params(1, 10));
        let result = paginator.create_result(mock_items(10), 25).unwrap();

        assert_eq!(result.items.len(), 10);
        assert_eq!(result.total_count, 25);
        assert!(result.previous.is_none());

        let next = result.next.expect("next link");
        assert_eq!(query_param(&next, "page").as_deref(), Some("2"));
        assert_eq!(query_param(&next, "limit").as_deref(), Some("10"));
    }

    #[test]
    fn middle_page_links_both_ways() {
        let paginator = OffsetPaginator::<MockRecord>::new(params(2, 10));
        let result = paginator.create_result(mock_items(10), 25).unwrap();

        let previous = result.previous.expect("previous link");
        assert_eq!(query_param(&previous, "page").as_deref(), Some("1"));

        let next = result.next.expect("next link");
        assert_eq!(query_param(&next, "page").as_deref(), Some("3"));
    }

    #[test]
    fn last_page_has_no_next() {
        let paginator = OffsetPaginator::<MockRecord>::new(params(3, 10));
        let result = paginator.create_result(mock_items(5), 25).unwrap();

        assert!(result.next.is_none());
        let previous = result.previous.expect("previous link");
        assert_eq!(query_param(&previous, "page").as_deref(), Some("2"));
    }

    #[test]
    fn single_page_has_no_links() {
        let paginator = OffsetPaginator::<MockRecord>::new(params(1, 10));
        let result = paginator.create_result(mock_items(5), 5).unwrap();

        assert!(result.previous.is_none());
        assert!(result.next.is_none());
    }

    #[test]
    fn empty_result_has_no_links() {
        let paginator = OffsetPaginator::<MockRecord>::new(params(1, 10));
        let result = paginator.create_result(Vec::new(), 0).unwrap();

        assert!(result.items.is_empty());
        assert!(result.previous.is_none());
        assert!(result.next.is_none());
    }

    #[test]
    fn page_beyond_last_keeps_previous_only() {
        let paginator = OffsetPaginator::<MockRecord>::new(params(9, 10));
        let result = paginator.create_result(Vec::new(), 25).unwrap();

        assert!(result.next.is_none());
        let previous = result.previous.expect("previous link");
        assert_eq!(query_param(&previous, "page").as_deref(), Some("8"));
    }

    #[test]
    fn links_preserve_existing_query_params() {
        let params = OffsetQuery {
            page: Some(2),
            limit: Some(10),
        }
        .validate("http://example.com/api?name=smith")
        .unwrap();
        let paginator = OffsetPaginator::<MockRecord>::new(params);
        let result = paginator.create_result(mock_items(10), 30).unwrap();

        let next = result.next.expect("next link");
        assert_eq!(query_param(&next, "name").as_deref(), Some("smith"));
        assert_eq!(query_param(&next, "page").as_deref(), Some("3"));
    }
}
