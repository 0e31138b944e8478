//! Person store kept in process memory.

use std::sync::Mutex;

use async_trait::async_trait;
use pagination::Page;

use crate::domain::ports::{PersonQuery, PersonRepository, PersonRepositoryError};
use crate::domain::{Person, PersonDraft, PersonId};

use super::{lock, select_page};

#[derive(Debug, Default)]
struct PersonTable {
    last_id: i64,
    rows: Vec<Person>,
}

/// Person repository holding records in insertion order.
///
/// Identifiers are assigned sequentially from 1 and never reused.
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    table: Mutex<PersonTable>,
}

impl InMemoryPersonRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn find_page(&self, query: &PersonQuery) -> Result<Page<Person>, PersonRepositoryError> {
        Ok(select_page(&lock(&self.table).rows, query))
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PersonRepositoryError> {
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|person| person.id() == id)
            .cloned())
    }

    async fn insert(&self, draft: &PersonDraft) -> Result<Person, PersonRepositoryError> {
        let mut table = lock(&self.table);
        table.last_id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| PersonRepositoryError::query("person identifiers exhausted"))?;
        let person = Person::new(PersonId::new(table.last_id), draft.clone());
        table.rows.push(person.clone());
        Ok(person)
    }

    async fn update(
        &self,
        id: PersonId,
        draft: &PersonDraft,
    ) -> Result<Option<Person>, PersonRepositoryError> {
        let mut table = lock(&self.table);
        let Some(slot) = table.rows.iter_mut().find(|person| person.id() == id) else {
            return Ok(None);
        };
        *slot = Person::new(id, draft.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: PersonId) -> Result<bool, PersonRepositoryError> {
        let mut table = lock(&self.table);
        let before = table.rows.len();
        table.rows.retain(|person| person.id() != id);
        Ok(table.rows.len() != before)
    }
}
