//! Person domain service.
//!
//! Implements the person driving ports over a [`PersonRepository`], computing
//! ages for the clock's current UTC date on every read.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use pagination::Page;
use tracing::info;

use crate::domain::ports::{
    PeopleCommand, PeopleQuery, PersonRepository, PersonRepositoryError, PersonView,
};
use crate::domain::{Error, ListRequest, Person, PersonDraft, PersonId};

fn map_repository_error(error: PersonRepositoryError) -> Error {
    match error {
        PersonRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("person repository unavailable: {message}"))
        }
        PersonRepositoryError::Query { message } => {
            Error::internal(format!("person repository error: {message}"))
        }
    }
}

fn person_not_found(id: PersonId) -> Error {
    Error::not_found(format!("person {id} not found"))
}

/// Person service implementing [`PeopleQuery`] and [`PeopleCommand`].
#[derive(Clone)]
pub struct PeopleService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PeopleService<R> {
    /// Create a service over `repository`, reading dates from `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

#[async_trait]
impl<R> PeopleQuery for PeopleService<R>
where
    R: PersonRepository,
{
    async fn list_people(&self, request: ListRequest) -> Result<Page<PersonView>, Error> {
        let today = self.today();
        let query = request.bind::<Person>(today)?;
        let page = self
            .repository
            .find_page(&query)
            .await
            .map_err(map_repository_error)?;
        Ok(page.map(|person| PersonView::as_of(&person, today)))
    }

    async fn get_person(&self, id: PersonId) -> Result<PersonView, Error> {
        let person = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| person_not_found(id))?;
        Ok(PersonView::as_of(&person, self.today()))
    }
}

#[async_trait]
impl<R> PeopleCommand for PeopleService<R>
where
    R: PersonRepository,
{
    async fn create_person(&self, draft: PersonDraft) -> Result<PersonView, Error> {
        let person = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(person_id = %person.id(), "person created");
        Ok(PersonView::as_of(&person, self.today()))
    }

    async fn update_person(&self, id: PersonId, draft: PersonDraft) -> Result<PersonView, Error> {
        let person = self
            .repository
            .update(id, &draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| person_not_found(id))?;
        info!(person_id = %id, "person updated");
        Ok(PersonView::as_of(&person, self.today()))
    }

    async fn delete_person(&self, id: PersonId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(person_not_found(id));
        }
        info!(person_id = %id, "person deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "people_service_tests.rs"]
mod tests;
