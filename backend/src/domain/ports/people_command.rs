//! Driving port for person mutations.

use async_trait::async_trait;

use crate::domain::{Error, PersonDraft, PersonId};

use super::PersonView;

/// Port for creating, replacing and deleting people.
///
/// Drafts arrive validated; adapters reject invalid payloads before calling
/// the port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeopleCommand: Send + Sync {
    /// Store a new person.
    async fn create_person(&self, draft: PersonDraft) -> Result<PersonView, Error>;

    /// Replace the name and date of birth of an existing person.
    async fn update_person(&self, id: PersonId, draft: PersonDraft) -> Result<PersonView, Error>;

    /// Remove a person; not-found when absent.
    async fn delete_person(&self, id: PersonId) -> Result<(), Error>;
}
