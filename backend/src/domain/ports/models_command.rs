//! Driving port for model creation.

use async_trait::async_trait;

use crate::domain::{Error, Model, ModelDraft};

/// Port for registering models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelsCommand: Send + Sync {
    /// Store a new model with a generated identifier.
    async fn create_model(&self, draft: ModelDraft) -> Result<Model, Error>;
}
