//! Domain primitives, services, and ports.
//!
//! Purpose: define the person and model entities, the query-parameter filter
//! binder, and the services that drive the repository ports. Nothing here
//! knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - Person / Model: stored entities with their drafts and identifiers.
//! - ListRequest / EntityQuery: list inputs before and after filter binding.
//! - PeopleService / ModelsService: implementations of the driving ports.

pub mod error;
pub mod example_data;
pub mod filter;
mod model;
mod models_service;
mod people_service;
mod person;
pub mod ports;
mod query;
mod trace_id;
mod validation;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::example_data::{
    ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError,
};
pub use self::model::{MODEL_NAME_MAX, Model, ModelDraft, ModelId};
pub use self::models_service::ModelsService;
pub use self::people_service::PeopleService;
pub use self::person::{
    PERSON_NAME_MAX, Person, PersonDraft, PersonId, latest_birth_date_for_age, years_between,
};
pub use self::query::{EntityQuery, ListRequest};
pub use self::trace_id::TraceId;
pub use self::validation::{FieldViolation, ValidationError, ViolationCode};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
