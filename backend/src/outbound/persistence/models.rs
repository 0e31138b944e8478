//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{models, people};

/// Row struct for reading from the people table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = people)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PersonRow {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
}

/// Insertable and changeset struct for person attributes.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = people)]
pub(crate) struct PersonValues<'a> {
    pub name: &'a str,
    pub dob: NaiveDate,
}

/// Row struct for reading from the models table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = models)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ModelRow {
    pub id: Uuid,
    pub number: i32,
    pub name: String,
    #[expect(dead_code, reason = "ordering column, never surfaced to the domain")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating model records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = models)]
pub(crate) struct NewModelRow<'a> {
    pub id: Uuid,
    pub number: i32,
    pub name: &'a str,
}

/// Changeset struct for updating model attributes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = models)]
pub(crate) struct ModelUpdate<'a> {
    pub number: i32,
    pub name: &'a str,
}
