//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel row structs and domain entities and
//! contain no business rules. Connections come from a `bb8` pool managed by
//! `diesel-async`; every database failure is mapped onto the port's
//! `Connection` or `Query` error.
//!
//! ```ignore
//! use roster::outbound::persistence::{DbPool, DieselPersonRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/roster")).await?;
//! let people = DieselPersonRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_helpers;
mod diesel_model_repository;
mod diesel_person_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_model_repository::DieselModelRepository;
pub use diesel_person_repository::DieselPersonRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
