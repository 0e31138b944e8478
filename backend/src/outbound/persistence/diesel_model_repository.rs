//! PostgreSQL-backed `ModelRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Direction, Page, Sort};
use tracing::debug;

use crate::domain::filter::{Condition, FieldValue};
use crate::domain::ports::{ModelQuery, ModelRepository, ModelRepositoryError};
use crate::domain::{Model, ModelDraft, ModelId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::contains_pattern;
use super::models::{ModelRow, ModelUpdate, NewModelRow};
use super::pool::{DbPool, PoolError};
use super::schema::models;

type BoxedModels = models::BoxedQuery<'static, Pg>;

/// Diesel-backed implementation of the model repository port.
#[derive(Clone)]
pub struct DieselModelRepository {
    pool: DbPool,
}

impl DieselModelRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ModelRepositoryError {
    map_basic_pool_error(error, ModelRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ModelRepositoryError {
    map_basic_diesel_error(
        error,
        ModelRepositoryError::query,
        ModelRepositoryError::connection,
    )
}

fn row_to_model(row: ModelRow) -> Result<Model, ModelRepositoryError> {
    let ModelRow {
        id,
        number,
        name,
        created_at: _,
    } = row;
    let draft = ModelDraft::try_new(Some(number), Some(name))
        .map_err(|err| ModelRepositoryError::query(format!("stored model {id}: {err}")))?;
    Ok(Model::new(ModelId::from_uuid(id), draft))
}

fn number_value(value: &FieldValue) -> Result<i32, ModelRepositoryError> {
    match value {
        FieldValue::Integer(number) => i32::try_from(*number)
            .map_err(|_| ModelRepositoryError::query(format!("number {number} out of range"))),
        other => Err(ModelRepositoryError::query(format!(
            "expected an integer for number, got {other}"
        ))),
    }
}

/// Models table narrowed by every predicate in `query`.
fn filtered(query: &ModelQuery) -> Result<BoxedModels, ModelRepositoryError> {
    let mut boxed = models::table.into_boxed();
    for predicate in query.filter.predicates() {
        boxed = match (predicate.field_name(), predicate.condition()) {
            ("name", Condition::ContainsIgnoreCase(needle)) => {
                boxed.filter(models::name.ilike(contains_pattern(needle)))
            }
            ("number", Condition::AtLeast(from)) => {
                boxed.filter(models::number.ge(number_value(from)?))
            }
            ("number", Condition::Between(from, to)) => {
                boxed.filter(models::number.between(number_value(from)?, number_value(to)?))
            }
            (field, condition) => {
                return Err(ModelRepositoryError::query(format!(
                    "unsupported condition on {field}: {condition:?}"
                )));
            }
        };
    }
    Ok(boxed)
}

/// Apply `sort`, falling back to creation order.
fn ordered(mut boxed: BoxedModels, sort: &Sort) -> BoxedModels {
    for order in sort.orders() {
        let ascending = matches!(order.direction(), Direction::Ascending);
        boxed = match order.property() {
            "id" if ascending => boxed.then_order_by(models::id.asc()),
            "id" => boxed.then_order_by(models::id.desc()),
            "number" if ascending => boxed.then_order_by(models::number.asc()),
            "number" => boxed.then_order_by(models::number.desc()),
            "name" if ascending => boxed.then_order_by(models::name.asc()),
            "name" => boxed.then_order_by(models::name.desc()),
            other => {
                debug!(property = other, "ignoring unknown model sort property");
                boxed
            }
        };
    }
    boxed
        .then_order_by(models::created_at.asc())
        .then_order_by(models::id.asc())
}

#[async_trait]
impl ModelRepository for DieselModelRepository {
    async fn find_page(&self, query: &ModelQuery) -> Result<Page<Model>, ModelRepositoryError> {
        let limit = i64::from(query.page.size());
        let offset = i64::try_from(query.page.offset())
            .map_err(|_| ModelRepositoryError::query("page offset exceeds i64 range"))?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = filtered(query)?
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows = ordered(filtered(query)?, &query.sort)
            .select(ModelRow::as_select())
            .limit(limit)
            .offset(offset)
            .load::<ModelRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let content = rows
            .into_iter()
            .map(row_to_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(
            content,
            query.page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn find_by_id(&self, id: ModelId) -> Result<Option<Model>, ModelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        models::table
            .find(*id.as_uuid())
            .select(ModelRow::as_select())
            .first::<ModelRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_model)
            .transpose()
    }

    async fn insert(&self, draft: &ModelDraft) -> Result<Model, ModelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(models::table)
            .values(&NewModelRow {
                id: *ModelId::random().as_uuid(),
                number: draft.number(),
                name: draft.name(),
            })
            .returning(ModelRow::as_returning())
            .get_result::<ModelRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_model(row)
    }

    async fn update(
        &self,
        id: ModelId,
        draft: &ModelDraft,
    ) -> Result<Option<Model>, ModelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(models::table.find(*id.as_uuid()))
            .set(&ModelUpdate {
                number: draft.number(),
                name: draft.name(),
            })
            .returning(ModelRow::as_returning())
            .get_result::<ModelRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_model)
            .transpose()
    }

    async fn delete(&self, id: ModelId) -> Result<bool, ModelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(models::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
