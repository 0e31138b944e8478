//! List requests and the bound queries handed to repositories.

use chrono::NaiveDate;
use pagination::{PageRequest, Sort};
use serde_json::json;

use super::Error;
use super::filter::{Filter, Filterable, QueryValues, bind};

/// Unvalidated list parameters as received from a driving adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    /// Candidate filter values keyed by parameter name.
    pub filters: QueryValues,
    /// Requested page.
    pub page: PageRequest,
    /// Requested ordering.
    pub sort: Sort,
}

impl ListRequest {
    /// Bind filters and check sort properties against the registry of `E`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request [`Error`] for malformed filters or sort
    /// properties the entity does not expose.
    pub fn bind<E: Filterable>(self, today: NaiveDate) -> Result<EntityQuery<E>, Error> {
        let filter = bind::<E>(&self.filters)?;
        let registry = E::registry();
        if let Some(unknown) = self
            .sort
            .orders()
            .iter()
            .find(|order| registry.field(order.property()).is_none())
        {
            return Err(
                Error::invalid_request(format!("unknown sort property `{}`", unknown.property()))
                    .with_details(json!({
                        "field": "sort",
                        "code": "unknown_sort_property",
                        "value": unknown.property(),
                    })),
            );
        }
        Ok(EntityQuery {
            filter,
            sort: self.sort,
            page: self.page,
            today,
        })
    }
}

/// Filter, order and page to execute against a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityQuery<E: 'static> {
    /// Conjunction of field predicates.
    pub filter: Filter<E>,
    /// Ordering; every property names a registered field.
    pub sort: Sort,
    /// Page to return.
    pub page: PageRequest,
    /// Date derived fields are computed for.
    pub today: NaiveDate,
}

impl<E> EntityQuery<E> {
    /// Unfiltered, unsorted query for `page`.
    #[must_use]
    pub const fn unfiltered(page: PageRequest, today: NaiveDate) -> Self {
        Self {
            filter: Filter::all(),
            sort: Sort::unsorted(),
            page,
            today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, Model, Person};
    use pagination::{Direction, SortOrder};
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
    }

    #[rstest]
    fn binds_filters_sort_and_page() {
        let mut filters = QueryValues::new();
        filters.insert("number".to_owned(), vec!["3".to_owned()]);
        let request = ListRequest {
            filters,
            page: PageRequest::new(1, 5),
            sort: Sort::by(vec![SortOrder::new("name", Direction::Descending)]),
        };

        let query = request.bind::<Model>(today()).expect("valid request");
        assert_eq!(query.filter.predicates().len(), 1);
        assert_eq!(query.page, PageRequest::new(1, 5));
        assert_eq!(query.sort.orders()[0].property(), "name");
        assert_eq!(query.today, today());
    }

    #[rstest]
    #[case("age")]
    #[case("dob")]
    #[case("Number")]
    fn rejects_sort_on_unregistered_model_fields(#[case] property: &str) {
        let request = ListRequest {
            sort: Sort::from_params([property]),
            ..ListRequest::default()
        };
        let err = request.bind::<Model>(today()).expect_err("unknown property");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "sort", "code": "unknown_sort_property", "value": property }))
        );
    }

    #[rstest]
    #[case("id")]
    #[case("age,desc")]
    #[case("name,dob")]
    fn accepts_sort_on_registered_person_fields(#[case] raw: &str) {
        let request = ListRequest {
            sort: Sort::from_params([raw]),
            ..ListRequest::default()
        };
        assert!(request.bind::<Person>(today()).is_ok());
    }

    #[rstest]
    fn propagates_filter_errors() {
        let mut filters = QueryValues::new();
        filters.insert("age".to_owned(), Vec::new());
        let request = ListRequest {
            filters,
            ..ListRequest::default()
        };
        let err = request.bind::<Person>(today()).expect_err("malformed filter");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
