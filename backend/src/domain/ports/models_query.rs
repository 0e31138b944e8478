//! Driving port for reading models.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, ListRequest, Model, ModelId};

/// Port for listing and fetching models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelsQuery: Send + Sync {
    /// Filter, sort and page models.
    async fn list_models(&self, request: ListRequest) -> Result<Page<Model>, Error>;

    /// Fetch one model; not-found when absent.
    async fn get_model(&self, id: ModelId) -> Result<Model, Error>;
}
