//! Driven port for model storage.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{EntityQuery, Model, ModelDraft, ModelId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by model repository adapters.
    pub enum ModelRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "model repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "model repository query failed: {message}",
    }
}

/// Bound list query over models.
pub type ModelQuery = EntityQuery<Model>;

/// Port for reading and writing models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelRepository: Send + Sync {
    /// Return one page of models matching the query, plus the total match count.
    ///
    /// Without sort criteria models are returned in creation order.
    async fn find_page(&self, query: &ModelQuery) -> Result<Page<Model>, ModelRepositoryError>;

    /// Look up one model.
    async fn find_by_id(&self, id: ModelId) -> Result<Option<Model>, ModelRepositoryError>;

    /// Store a new model and assign its identifier.
    async fn insert(&self, draft: &ModelDraft) -> Result<Model, ModelRepositoryError>;

    /// Replace the attributes of an existing model; `None` when absent.
    async fn update(
        &self,
        id: ModelId,
        draft: &ModelDraft,
    ) -> Result<Option<Model>, ModelRepositoryError>;

    /// Remove a model; `false` when absent.
    async fn delete(&self, id: ModelId) -> Result<bool, ModelRepositoryError>;
}
