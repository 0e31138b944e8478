//! Model store kept in process memory.

use std::sync::Mutex;

use async_trait::async_trait;
use pagination::Page;

use crate::domain::ports::{ModelQuery, ModelRepository, ModelRepositoryError};
use crate::domain::{Model, ModelDraft, ModelId};

use super::{lock, select_page};

/// Model repository holding records in creation order.
#[derive(Debug, Default)]
pub struct InMemoryModelRepository {
    rows: Mutex<Vec<Model>>,
}

impl InMemoryModelRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModelRepository for InMemoryModelRepository {
    async fn find_page(&self, query: &ModelQuery) -> Result<Page<Model>, ModelRepositoryError> {
        Ok(select_page(&lock(&self.rows), query))
    }

    async fn find_by_id(&self, id: ModelId) -> Result<Option<Model>, ModelRepositoryError> {
        Ok(lock(&self.rows).iter().find(|model| model.id() == id).cloned())
    }

    async fn insert(&self, draft: &ModelDraft) -> Result<Model, ModelRepositoryError> {
        let model = Model::new(ModelId::random(), draft.clone());
        lock(&self.rows).push(model.clone());
        Ok(model)
    }

    async fn update(
        &self,
        id: ModelId,
        draft: &ModelDraft,
    ) -> Result<Option<Model>, ModelRepositoryError> {
        let mut rows = lock(&self.rows);
        let Some(slot) = rows.iter_mut().find(|model| model.id() == id) else {
            return Ok(None);
        };
        *slot = Model::new(id, draft.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: ModelId) -> Result<bool, ModelRepositoryError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|model| model.id() != id);
        Ok(rows.len() != before)
    }
}
