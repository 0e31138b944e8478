//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the people, models, and health endpoints together
//! with the wire schemas they exchange. The document backs Swagger UI in
//! debug builds and is printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::links::{LinkSchema, PageLinksSchema, PageMetadataSchema, ResourceLinks};
use crate::inbound::http::models::{EmbeddedModels, ModelDto, ModelPage, ModelRequest};
use crate::inbound::http::people::{EmbeddedPeople, PersonDto, PersonPage, PersonRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        description = "People and numbered models with query-parameter filtering and paging."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::people::list_people,
        crate::inbound::http::people::create_person,
        crate::inbound::http::people::get_person,
        crate::inbound::http::people::update_person,
        crate::inbound::http::people::delete_person,
        crate::inbound::http::models::list_models,
        crate::inbound::http::models::create_model,
        crate::inbound::http::models::get_model,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LinkSchema,
        PageLinksSchema,
        PageMetadataSchema,
        ResourceLinks,
        PersonRequest,
        PersonDto,
        EmbeddedPeople,
        PersonPage,
        ModelRequest,
        ModelDto,
        EmbeddedModels,
        ModelPage,
    )),
    tags(
        (name = "people", description = "Registered people and their derived age"),
        (name = "models", description = "Numbered models"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
