//! Builders for the HTTP state from configured storage.
//!
//! A configured database URL selects the PostgreSQL adapters; otherwise the
//! in-memory stores are used. Either way example data is applied to empty
//! stores when enabled.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::info;

use roster::domain::ports::{ModelRepository, PersonRepository};
use roster::domain::{ExampleDataSeeder, ExampleDataSeedingError, ModelsService, PeopleService};
use roster::inbound::http::state::{HttpState, HttpStatePorts};
use roster::outbound::memory::{InMemoryModelRepository, InMemoryPersonRepository};
use roster::outbound::persistence::{
    DbPool, DieselModelRepository, DieselPersonRepository, MigrationError, PoolConfig, PoolError,
    run_pending_migrations,
};
use roster::settings::AppSettings;

/// Failures while preparing storage before the server starts.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Embedded migrations could not be applied.
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// Example data could not be written.
    #[error(transparent)]
    Seeding(#[from] ExampleDataSeedingError),
}

/// Build the HTTP state for `settings`, running migrations and seeding as
/// needed.
pub async fn build_http_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url).await?;
            let mut config = PoolConfig::new(url);
            if let Some(size) = settings.pool_size {
                config = config.with_max_size(size);
            }
            let pool = DbPool::new(config).await?;
            info!(storage = "postgres", "storage selected");
            wire(
                Arc::new(DieselPersonRepository::new(pool.clone())),
                Arc::new(DieselModelRepository::new(pool)),
                clock,
                settings.example_data,
            )
            .await
        }
        None => {
            info!(storage = "memory", "storage selected");
            wire(
                Arc::new(InMemoryPersonRepository::new()),
                Arc::new(InMemoryModelRepository::new()),
                clock,
                settings.example_data,
            )
            .await
        }
    }
}

async fn wire<P, M>(
    people: Arc<P>,
    models: Arc<M>,
    clock: Arc<dyn Clock>,
    example_data: bool,
) -> Result<HttpState, StartupError>
where
    P: PersonRepository + 'static,
    M: ModelRepository + 'static,
{
    if example_data {
        ExampleDataSeeder::new(Arc::clone(&people), Arc::clone(&models))
            .seed_if_empty(clock.utc().date_naive())
            .await?;
    } else {
        info!(reason = "disabled", "example data seeding skipped");
    }

    let people = Arc::new(PeopleService::new(people, Arc::clone(&clock)));
    let models = Arc::new(ModelsService::new(models, clock));
    Ok(HttpState::new(HttpStatePorts {
        people: people.clone(),
        people_commands: people,
        models: models.clone(),
        models_commands: models,
    }))
}

#[cfg(test)]
mod tests {
    //! Startup wiring over the in-memory stores.

    use pagination::PageRequest;
    use rstest::rstest;

    use super::*;
    use roster::domain::ListRequest;
    use roster::domain::ports::PeopleQuery;

    fn memory_settings(example_data: bool) -> AppSettings {
        AppSettings {
            bind_addr: None,
            database_url: None,
            pool_size: None,
            example_data,
        }
    }

    async fn people_total(state: &HttpState) -> u64 {
        state
            .people
            .list_people(ListRequest {
                page: PageRequest::new(0, 1),
                ..ListRequest::default()
            })
            .await
            .expect("listing succeeds")
            .total_elements()
    }

    #[rstest]
    #[case(true, 10)]
    #[case(false, 0)]
    #[tokio::test]
    async fn memory_state_honours_example_data_toggle(
        #[case] example_data: bool,
        #[case] expected: u64,
    ) {
        let state = build_http_state(&memory_settings(example_data))
            .await
            .expect("memory state builds");
        assert_eq!(people_total(&state).await, expected);
    }
}
