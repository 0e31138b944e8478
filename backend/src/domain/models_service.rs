//! Model domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use tracing::info;

use crate::domain::ports::{ModelRepository, ModelRepositoryError, ModelsCommand, ModelsQuery};
use crate::domain::{Error, ListRequest, Model, ModelDraft, ModelId};

fn map_repository_error(error: ModelRepositoryError) -> Error {
    match error {
        ModelRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("model repository unavailable: {message}"))
        }
        ModelRepositoryError::Query { message } => {
            Error::internal(format!("model repository error: {message}"))
        }
    }
}

/// Model service implementing [`ModelsQuery`] and [`ModelsCommand`].
#[derive(Clone)]
pub struct ModelsService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ModelsService<R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<R> ModelsQuery for ModelsService<R>
where
    R: ModelRepository,
{
    async fn list_models(&self, request: ListRequest) -> Result<Page<Model>, Error> {
        let query = request.bind::<Model>(self.clock.utc().date_naive())?;
        self.repository
            .find_page(&query)
            .await
            .map_err(map_repository_error)
    }

    async fn get_model(&self, id: ModelId) -> Result<Model, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("model {id} not found")))
    }
}

#[async_trait]
impl<R> ModelsCommand for ModelsService<R>
where
    R: ModelRepository,
{
    async fn create_model(&self, draft: ModelDraft) -> Result<Model, Error> {
        let model = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(model_id = %model.id(), number = model.number(), "model created");
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour over a mocked repository.

    use chrono::{DateTime, Local, TimeZone, Utc};
    use mockall::predicate::eq;
    use pagination::PageRequest;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::filter::QueryValues;
    use crate::domain::ports::MockModelRepository;

    struct FixtureClock;

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
                .single()
                .expect("valid timestamp")
        }
    }

    #[fixture]
    fn model() -> Model {
        Model::new(ModelId::random(), ModelDraft::numbered(5))
    }

    fn service(repository: MockModelRepository) -> ModelsService<MockModelRepository> {
        ModelsService::new(Arc::new(repository), Arc::new(FixtureClock))
    }

    #[rstest]
    #[tokio::test]
    async fn get_returns_stored_model(model: Model) {
        let mut repository = MockModelRepository::new();
        let stored = model.clone();
        repository
            .expect_find_by_id()
            .with(eq(model.id()))
            .times(1)
            .return_once(move |_| Ok(Some(stored)));

        let found = service(repository)
            .get_model(model.id())
            .await
            .expect("model found");
        assert_eq!(found, model);
    }

    #[rstest]
    #[tokio::test]
    async fn get_reports_missing_model() {
        let mut repository = MockModelRepository::new();
        repository
            .expect_find_by_id()
            .return_once(|_| Ok(None));

        let err = service(repository)
            .get_model(ModelId::random())
            .await
            .expect_err("missing model");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn list_passes_bound_filter_to_repository(model: Model) {
        let mut repository = MockModelRepository::new();
        let stored = model.clone();
        repository
            .expect_find_page()
            .withf(|query| query.filter.predicates().len() == 1 && query.page.size() == 5)
            .times(1)
            .return_once(move |query| Ok(Page::new(vec![stored], query.page, 1)));

        let mut filters = QueryValues::new();
        filters.insert("number".to_owned(), vec!["3".to_owned(), "7".to_owned()]);
        let page = service(repository)
            .list_models(ListRequest {
                filters,
                page: PageRequest::new(0, 5),
                ..ListRequest::default()
            })
            .await
            .expect("listing succeeds");
        assert_eq!(page.content(), &[model]);
    }

    #[rstest]
    #[tokio::test]
    async fn list_rejects_malformed_filter_before_querying() {
        let mut repository = MockModelRepository::new();
        repository.expect_find_page().never();

        let mut filters = QueryValues::new();
        filters.insert("number".to_owned(), vec![String::new()]);
        let err = service(repository)
            .list_models(ListRequest {
                filters,
                ..ListRequest::default()
            })
            .await
            .expect_err("malformed filter");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(ModelRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ModelRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn create_maps_repository_failures(
        #[case] failure: ModelRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repository = MockModelRepository::new();
        repository
            .expect_insert()
            .return_once(move |_| Err(failure));

        let err = service(repository)
            .create_model(ModelDraft::numbered(1))
            .await
            .expect_err("repository failure");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_stored_model() {
        let mut repository = MockModelRepository::new();
        repository
            .expect_insert()
            .withf(|draft| draft.number() == 5 && draft.name() == "Model5")
            .return_once(|draft| Ok(Model::new(ModelId::random(), draft.clone())));

        let created = service(repository)
            .create_model(ModelDraft::numbered(5))
            .await
            .expect("created");
        assert_eq!(created.name(), "Model5");
    }
}
