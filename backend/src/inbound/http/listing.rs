//! Query-string parsing for list endpoints.
//!
//! `page`, `size` and `sort` drive paging and ordering; every other
//! parameter is collected, repeat values included, for the filter binder.

use pagination::{PageRequest, PaginationError, Sort};
use serde_json::json;

use crate::domain::filter::QueryValues;
use crate::domain::{Error, ListRequest};

const PAGE_PARAM: &str = "page";
const SIZE_PARAM: &str = "size";
const SORT_PARAM: &str = "sort";

fn paging_error(error: &PaginationError) -> Error {
    let (field, value) = match error {
        PaginationError::InvalidPageNumber { value } => (PAGE_PARAM, value),
        PaginationError::InvalidPageSize { value } => (SIZE_PARAM, value),
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_paging",
        "value": value,
    }))
}

/// Split a raw query string into paging, ordering and filter values.
///
/// # Errors
///
/// Returns `invalid_request` when `page` or `size` is not a non-negative
/// integer. Only the first `page` and `size` values are read.
pub fn list_request(query_string: &str) -> Result<ListRequest, Error> {
    let mut page = None;
    let mut size = None;
    let mut sort = Vec::new();
    let mut filters = QueryValues::new();

    for (name, value) in url::form_urlencoded::parse(query_string.as_bytes()) {
        match name.as_ref() {
            PAGE_PARAM => {
                page.get_or_insert(value.into_owned());
            }
            SIZE_PARAM => {
                size.get_or_insert(value.into_owned());
            }
            SORT_PARAM => sort.push(value.into_owned()),
            _ => filters
                .entry(name.into_owned())
                .or_default()
                .push(value.into_owned()),
        }
    }

    let page = PageRequest::from_params(page.as_deref(), size.as_deref())
        .map_err(|err| paging_error(&err))?;
    Ok(ListRequest {
        filters,
        page,
        sort: Sort::from_params(sort),
    })
}

#[cfg(test)]
mod tests {
    use pagination::{DEFAULT_PAGE_SIZE, Direction, SortOrder};
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    fn empty_query_uses_defaults() {
        let request = list_request("").expect("valid");
        assert_eq!(request, ListRequest::default());
        assert_eq!(request.page.size(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    fn repeated_filters_keep_every_value_in_order() {
        let request = list_request("age=40&name=Per%20son&age=30&age=").expect("valid");
        assert_eq!(
            request.filters.get("age"),
            Some(&vec!["40".to_owned(), "30".to_owned(), String::new()])
        );
        assert_eq!(
            request.filters.get("name"),
            Some(&vec!["Per son".to_owned()])
        );
    }

    #[rstest]
    fn paging_and_sort_are_not_filters() {
        let request = list_request("page=2&size=5&sort=number,desc&sort=name").expect("valid");
        assert!(request.filters.is_empty());
        assert_eq!(request.page, PageRequest::new(2, 5));
        assert_eq!(
            request.sort.orders(),
            &[
                SortOrder::new("number", Direction::Descending),
                SortOrder::new("name", Direction::Ascending),
            ]
        );
    }

    #[rstest]
    #[case("page=-1", "page")]
    #[case("size=lots", "size")]
    fn malformed_paging_is_rejected(#[case] query: &str, #[case] field: &str) {
        let err = list_request(query).expect_err("invalid paging");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], field);
        assert_eq!(details["code"], "invalid_paging");
    }
}
