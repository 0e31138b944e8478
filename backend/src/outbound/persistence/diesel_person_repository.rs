//! PostgreSQL-backed `PersonRepository` implementation using Diesel ORM.
//!
//! Ages are never stored. Age predicates and age ordering are rewritten as
//! date-of-birth comparisons against the query's reference date.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Direction, Page, Sort};
use tracing::debug;

use crate::domain::filter::{Condition, FieldValue};
use crate::domain::ports::{PersonQuery, PersonRepository, PersonRepositoryError};
use crate::domain::{Person, PersonDraft, PersonId, latest_birth_date_for_age};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::contains_pattern;
use super::models::{PersonRow, PersonValues};
use super::pool::{DbPool, PoolError};
use super::schema::people;

type BoxedPeople = people::BoxedQuery<'static, Pg>;

/// Diesel-backed implementation of the person repository port.
#[derive(Clone)]
pub struct DieselPersonRepository {
    pool: DbPool,
}

impl DieselPersonRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PersonRepositoryError {
    map_basic_pool_error(error, PersonRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PersonRepositoryError {
    map_basic_diesel_error(
        error,
        PersonRepositoryError::query,
        PersonRepositoryError::connection,
    )
}

fn row_to_person(row: PersonRow) -> Result<Person, PersonRepositoryError> {
    let PersonRow { id, name, dob } = row;
    let draft = PersonDraft::try_new(Some(name), Some(dob))
        .map_err(|err| PersonRepositoryError::query(format!("stored person {id}: {err}")))?;
    Ok(Person::new(PersonId::new(id), draft))
}

/// Earliest date PostgreSQL's `date` type accepts.
fn postgres_min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(-4713, 11, 24).unwrap_or(NaiveDate::MIN)
}

/// Latest date of birth for someone at least `years` old, clamped to the
/// column's range.
fn dob_bound(today: NaiveDate, years: i64) -> NaiveDate {
    latest_birth_date_for_age(today, years).max(postgres_min_date())
}

fn unsupported(field: &str, condition: &Condition) -> PersonRepositoryError {
    PersonRepositoryError::query(format!("unsupported condition on {field}: {condition:?}"))
}

fn date_value(field: &str, value: &FieldValue) -> Result<NaiveDate, PersonRepositoryError> {
    match value {
        FieldValue::Date(date) => Ok(*date),
        other => Err(PersonRepositoryError::query(format!(
            "expected a date for {field}, got {other}"
        ))),
    }
}

fn integer_value(field: &str, value: &FieldValue) -> Result<i64, PersonRepositoryError> {
    match value {
        FieldValue::Integer(number) => Ok(*number),
        other => Err(PersonRepositoryError::query(format!(
            "expected an integer for {field}, got {other}"
        ))),
    }
}

/// People table narrowed by every predicate in `query`.
fn filtered(query: &PersonQuery) -> Result<BoxedPeople, PersonRepositoryError> {
    let mut boxed = people::table.into_boxed();
    for predicate in query.filter.predicates() {
        let field = predicate.field_name();
        let condition = predicate.condition();
        boxed = match (field, condition) {
            ("name", Condition::ContainsIgnoreCase(needle)) => {
                boxed.filter(people::name.ilike(contains_pattern(needle)))
            }
            ("dob", Condition::AtLeast(from)) => {
                boxed.filter(people::dob.ge(date_value(field, from)?))
            }
            ("dob", Condition::Between(from, to)) => boxed.filter(
                people::dob.between(date_value(field, from)?, date_value(field, to)?),
            ),
            ("age", Condition::AtLeast(from)) => {
                let from = integer_value(field, from)?;
                boxed.filter(people::dob.le(dob_bound(query.today, from)))
            }
            ("age", Condition::Between(from, to)) => {
                let from = integer_value(field, from)?;
                let to = integer_value(field, to)?.saturating_add(1);
                boxed
                    .filter(people::dob.le(dob_bound(query.today, from)))
                    .filter(people::dob.gt(dob_bound(query.today, to)))
            }
            _ => return Err(unsupported(field, condition)),
        };
    }
    Ok(boxed)
}

/// Apply `sort`, then order by identifier so pages are stable.
fn ordered(mut boxed: BoxedPeople, sort: &Sort) -> BoxedPeople {
    for order in sort.orders() {
        let (property, direction) = match order.property() {
            // Older people have earlier birth dates.
            "age" => ("dob", order.direction().reversed()),
            other => (other, order.direction()),
        };
        let ascending = matches!(direction, Direction::Ascending);
        boxed = match property {
            "id" if ascending => boxed.then_order_by(people::id.asc()),
            "id" => boxed.then_order_by(people::id.desc()),
            "name" if ascending => boxed.then_order_by(people::name.asc()),
            "name" => boxed.then_order_by(people::name.desc()),
            "dob" if ascending => boxed.then_order_by(people::dob.asc()),
            "dob" => boxed.then_order_by(people::dob.desc()),
            other => {
                debug!(property = other, "ignoring unknown person sort property");
                boxed
            }
        };
    }
    boxed.then_order_by(people::id.asc())
}

#[async_trait]
impl PersonRepository for DieselPersonRepository {
    async fn find_page(&self, query: &PersonQuery) -> Result<Page<Person>, PersonRepositoryError> {
        let limit = i64::from(query.page.size());
        let offset = i64::try_from(query.page.offset())
            .map_err(|_| PersonRepositoryError::query("page offset exceeds i64 range"))?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = filtered(query)?
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows = ordered(filtered(query)?, &query.sort)
            .select(PersonRow::as_select())
            .limit(limit)
            .offset(offset)
            .load::<PersonRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let content = rows
            .into_iter()
            .map(row_to_person)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(
            content,
            query.page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        people::table
            .find(id.get())
            .select(PersonRow::as_select())
            .first::<PersonRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_person)
            .transpose()
    }

    async fn insert(&self, draft: &PersonDraft) -> Result<Person, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(people::table)
            .values(&PersonValues {
                name: draft.name(),
                dob: draft.dob(),
            })
            .returning(PersonRow::as_returning())
            .get_result::<PersonRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_person(row)
    }

    async fn update(
        &self,
        id: PersonId,
        draft: &PersonDraft,
    ) -> Result<Option<Person>, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(people::table.find(id.get()))
            .set(&PersonValues {
                name: draft.name(),
                dob: draft.dob(),
            })
            .returning(PersonRow::as_returning())
            .get_result::<PersonRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_person)
            .transpose()
    }

    async fn delete(&self, id: PersonId) -> Result<bool, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(people::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    //! SQL generation checks; no database required.

    use diesel::debug_query;
    use pagination::{PageRequest, SortOrder};
    use rstest::rstest;

    use super::*;
    use crate::domain::ListRequest;
    use crate::domain::filter::QueryValues;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
    }

    fn query(field: &str, values: &[&str]) -> PersonQuery {
        let mut filters = QueryValues::new();
        filters.insert(
            field.to_owned(),
            values.iter().map(|value| (*value).to_owned()).collect(),
        );
        ListRequest {
            filters,
            page: PageRequest::new(0, 20),
            ..ListRequest::default()
        }
        .bind::<Person>(today())
        .expect("bound query")
    }

    fn sql(query: &PersonQuery) -> String {
        let boxed = ordered(filtered(query).expect("supported filter"), &query.sort);
        debug_query::<Pg, _>(&boxed).to_string()
    }

    #[rstest]
    fn name_filter_uses_ilike() {
        let sql = sql(&query("name", &["Ali"]));
        assert!(sql.contains("ILIKE"), "{sql}");
        assert!(sql.contains("%ali%"), "{sql}");
    }

    #[rstest]
    fn age_range_becomes_birth_date_window() {
        let sql = sql(&query("age", &["30", "40"]));
        assert!(sql.contains("\"people\".\"dob\" <= $1"), "{sql}");
        assert!(sql.contains("\"people\".\"dob\" > $2"), "{sql}");
        assert!(sql.contains("1996-10-16"), "{sql}");
        assert!(sql.contains("1985-10-16"), "{sql}");
    }

    #[rstest]
    fn dob_range_uses_between() {
        let sql = sql(&query("dob", &["1975-01-01", "1990-12-31"]));
        assert!(sql.contains("BETWEEN"), "{sql}");
    }

    #[rstest]
    #[case(Direction::Ascending, "DESC")]
    #[case(Direction::Descending, "ASC")]
    fn age_sort_orders_by_birth_date_reversed(
        #[case] direction: Direction,
        #[case] dob_order: &str,
    ) {
        let mut bound = query("name", &["a"]);
        bound.sort = Sort::by(vec![SortOrder::new("age", direction)]);
        let sql = sql(&bound);
        let expected = format!("ORDER BY \"people\".\"dob\" {dob_order}, \"people\".\"id\" ASC");
        assert!(sql.contains(&expected), "{sql}");
    }

    #[rstest]
    fn unsorted_queries_order_by_identifier() {
        let sql = sql(&PersonQuery::unfiltered(PageRequest::default(), today()));
        assert!(sql.contains("ORDER BY \"people\".\"id\" ASC"), "{sql}");
    }

    #[rstest]
    fn bounds_clamp_to_postgres_dates() {
        assert_eq!(dob_bound(today(), i64::from(i32::MAX)), postgres_min_date());
        assert_eq!(
            dob_bound(today(), 30),
            NaiveDate::from_ymd_opt(1996, 10, 16).expect("valid date")
        );
    }
}
