//! Example data seeding.
//!
//! Populates empty stores with a fixed roster of people and models so a
//! freshly started server has something to list.

use std::sync::Arc;

use chrono::NaiveDate;
use pagination::PageRequest;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    ModelQuery, ModelRepository, ModelRepositoryError, PersonQuery, PersonRepository,
    PersonRepositoryError,
};
use crate::domain::{ModelDraft, PersonDraft, ValidationError};

/// Number of people and models written by a seeding run.
pub const EXAMPLE_RECORD_COUNT: u32 = 10;

/// Result of attempting to apply example data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleDataSeedOutcome {
    /// Records were written to at least one store.
    Seeded {
        /// People inserted; zero when that store was already populated.
        people: usize,
        /// Models inserted; zero when that store was already populated.
        models: usize,
    },
    /// Both stores already held data; nothing was written.
    AlreadyPopulated,
}

/// Errors raised while seeding example data.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    /// A generated record failed domain validation.
    #[error("generated record failed validation: {0}")]
    Invalid(#[from] ValidationError),
    /// The person store rejected a read or write.
    #[error("person store error: {0}")]
    People(#[from] PersonRepositoryError),
    /// The model store rejected a read or write.
    #[error("model store error: {0}")]
    Models(#[from] ModelRepositoryError),
}

/// People written by a seeding run.
///
/// The `i`th person is named `Person{i}` and born on
/// `(1970 + 5i)-(i + 1)-(i + 1)`.
///
/// # Errors
///
/// Returns [`ExampleDataSeedingError::Invalid`] if a generated record does
/// not satisfy the person invariants.
pub fn example_people() -> Result<Vec<PersonDraft>, ExampleDataSeedingError> {
    (0..EXAMPLE_RECORD_COUNT)
        .map(|i| {
            let offset = i32::try_from(i).unwrap_or(i32::MAX);
            let dob = NaiveDate::from_ymd_opt(1970 + 5 * offset, i + 1, i + 1);
            Ok(PersonDraft::try_new(Some(format!("Person{i}")), dob)?)
        })
        .collect()
}

/// Models written by a seeding run, numbered from one.
pub fn example_models() -> Vec<ModelDraft> {
    (1..=EXAMPLE_RECORD_COUNT)
        .filter_map(|n| i32::try_from(n).ok())
        .map(ModelDraft::numbered)
        .collect()
}

/// Service that seeds the person and model stores.
pub struct ExampleDataSeeder<P, M> {
    people: Arc<P>,
    models: Arc<M>,
}

impl<P, M> ExampleDataSeeder<P, M> {
    /// Create a seeder over the two stores.
    pub fn new(people: Arc<P>, models: Arc<M>) -> Self {
        Self { people, models }
    }
}

impl<P, M> ExampleDataSeeder<P, M>
where
    P: PersonRepository,
    M: ModelRepository,
{
    /// Seed each store that is currently empty.
    ///
    /// The stores are checked independently, so a run interrupted after the
    /// people were written still seeds the models on the next start.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataSeedingError`] when a store fails. Records written
    /// before the failure are kept.
    pub async fn seed_if_empty(
        &self,
        today: NaiveDate,
    ) -> Result<ExampleDataSeedOutcome, ExampleDataSeedingError> {
        let people = self.seed_people(today).await?;
        let models = self.seed_models(today).await?;
        if people == 0 && models == 0 {
            return Ok(ExampleDataSeedOutcome::AlreadyPopulated);
        }
        info!(people, models, "example data seeded");
        Ok(ExampleDataSeedOutcome::Seeded { people, models })
    }

    async fn seed_people(&self, today: NaiveDate) -> Result<usize, ExampleDataSeedingError> {
        let probe = PersonQuery::unfiltered(PageRequest::new(0, 1), today);
        let existing = self.people.find_page(&probe).await?.total_elements();
        if existing > 0 {
            info!(existing, "example people skipped; people store not empty");
            return Ok(0);
        }
        let drafts = example_people()?;
        for draft in &drafts {
            self.people.insert(draft).await?;
        }
        Ok(drafts.len())
    }

    async fn seed_models(&self, today: NaiveDate) -> Result<usize, ExampleDataSeedingError> {
        let probe = ModelQuery::unfiltered(PageRequest::new(0, 1), today);
        let existing = self.models.find_page(&probe).await?.total_elements();
        if existing > 0 {
            info!(existing, "example models skipped; model store not empty");
            return Ok(0);
        }
        let drafts = example_models();
        for draft in &drafts {
            self.models.insert(draft).await?;
        }
        Ok(drafts.len())
    }
}
