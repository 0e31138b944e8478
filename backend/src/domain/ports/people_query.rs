//! Driving port for reading people.
//!
//! Every read carries the age derived for the service's current date.

use async_trait::async_trait;
use chrono::NaiveDate;
use pagination::Page;

use crate::domain::{Error, ListRequest, Person, PersonId};

/// Person as presented to callers, with the derived age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonView {
    /// Storage identifier.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Whole years lived on the read date.
    pub age: i32,
}

impl PersonView {
    /// Project `person` as read on `today`.
    #[must_use]
    pub fn as_of(person: &Person, today: NaiveDate) -> Self {
        Self {
            id: person.id(),
            name: person.name().to_owned(),
            dob: person.dob(),
            age: person.age_on(today),
        }
    }
}

/// Port for listing and fetching people.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeopleQuery: Send + Sync {
    /// Filter, sort and page people.
    async fn list_people(&self, request: ListRequest) -> Result<Page<PersonView>, Error>;

    /// Fetch one person; not-found when absent.
    async fn get_person(&self, id: PersonId) -> Result<PersonView, Error>;
}
