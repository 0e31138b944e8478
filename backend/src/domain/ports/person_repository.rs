//! Driven port for person storage.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{EntityQuery, Person, PersonDraft, PersonId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by person repository adapters.
    pub enum PersonRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "person repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "person repository query failed: {message}",
    }
}

/// Bound list query over people.
pub type PersonQuery = EntityQuery<Person>;

/// Port for reading and writing people.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Return one page of people matching the query, plus the total match count.
    ///
    /// Without sort criteria people are returned in identifier order.
    async fn find_page(&self, query: &PersonQuery) -> Result<Page<Person>, PersonRepositoryError>;

    /// Look up one person.
    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PersonRepositoryError>;

    /// Store a new person and assign its identifier.
    async fn insert(&self, draft: &PersonDraft) -> Result<Person, PersonRepositoryError>;

    /// Replace the attributes of an existing person; `None` when absent.
    async fn update(
        &self,
        id: PersonId,
        draft: &PersonDraft,
    ) -> Result<Option<Person>, PersonRepositoryError>;

    /// Remove a person; `false` when absent.
    async fn delete(&self, id: PersonId) -> Result<bool, PersonRepositoryError>;
}
