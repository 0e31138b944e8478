//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`) are implemented by domain services and
//! called by inbound adapters. Driven ports (`*Repository`) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod model_repository;
mod models_command;
mod models_query;
mod people_command;
mod people_query;
mod person_repository;

#[cfg(test)]
pub use model_repository::MockModelRepository;
pub use model_repository::{ModelQuery, ModelRepository, ModelRepositoryError};
#[cfg(test)]
pub use models_command::MockModelsCommand;
pub use models_command::ModelsCommand;
#[cfg(test)]
pub use models_query::MockModelsQuery;
pub use models_query::ModelsQuery;
#[cfg(test)]
pub use people_command::MockPeopleCommand;
pub use people_command::PeopleCommand;
#[cfg(test)]
pub use people_query::MockPeopleQuery;
pub use people_query::{PeopleQuery, PersonView};
#[cfg(test)]
pub use person_repository::MockPersonRepository;
pub use person_repository::{PersonQuery, PersonRepository, PersonRepositoryError};
