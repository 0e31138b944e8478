//! Models API handlers.
//!
//! ```text
//! GET  /models?number=3&number=6&name=model&sort=number,desc
//! POST /models        {"number":11,"name":"Model11"}
//! GET  /models/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use pagination::{PageLinks, PageMetadata};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Model, ModelDraft, ModelId, ValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::links::{PageLinksSchema, PageMetadataSchema, RequestUrls, ResourceLinks};
use crate::inbound::http::listing::list_request;
use crate::inbound::http::state::HttpState;

/// Create payload for a model.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ModelRequest {
    #[schema(example = 11)]
    pub number: Option<i32>,
    #[schema(example = "Model11")]
    pub name: Option<String>,
}

impl TryFrom<ModelRequest> for ModelDraft {
    type Error = ValidationError;

    fn try_from(value: ModelRequest) -> Result<Self, Self::Error> {
        Self::try_new(value.number, value.name)
    }
}

/// Model representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelDto {
    pub id: Uuid,
    #[schema(example = 5)]
    pub number: i32,
    #[schema(example = "Model5")]
    pub name: String,
    #[serde(rename = "_links")]
    pub links: ResourceLinks,
}

/// `_embedded` object of a models page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmbeddedModels {
    pub models: Vec<ModelDto>,
}

/// One page of models.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelPage {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedModels,
    #[serde(rename = "_links")]
    #[schema(value_type = PageLinksSchema)]
    pub links: PageLinks,
    #[schema(value_type = PageMetadataSchema)]
    pub page: PageMetadata,
}

fn to_dto(model: &Model, urls: &RequestUrls) -> ModelDto {
    ModelDto {
        id: *model.id().as_uuid(),
        number: model.number(),
        name: model.name().to_owned(),
        links: urls.resource_links(&format!("/models/{}", model.id())),
    }
}

/// List models matching the query-parameter filter.
#[utoipa::path(
    get,
    path = "/models",
    params(
        ("number" = Option<Vec<i32>>, Query, description = "Lower bound, or lower and upper bound"),
        ("name" = Option<String>, Query, description = "Substring of the name, case-insensitive"),
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Page size, default 20, at most 2000"),
        ("sort" = Option<Vec<String>>, Query, description = "property[,property][,asc|desc]")
    ),
    responses(
        (status = 200, description = "Page of models", body = ModelPage),
        (status = 400, description = "Malformed filter, paging or sort", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["models"],
    operation_id = "listModels"
)]
#[get("/models")]
pub async fn list_models(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<ModelPage>> {
    let urls = RequestUrls::from_request(&req)?;
    let request = list_request(req.query_string())?;
    let page = state.models.list_models(request).await?;
    let metadata = page.metadata();
    let models = page
        .content()
        .iter()
        .map(|model| to_dto(model, &urls))
        .collect();
    Ok(web::Json(ModelPage {
        embedded: EmbeddedModels { models },
        links: urls.page_links(&metadata),
        page: metadata,
    }))
}

/// Create a model.
#[utoipa::path(
    post,
    path = "/models",
    request_body = ModelRequest,
    responses(
        (status = 201, description = "Model created", body = ModelDto,
            headers(("Location" = String, description = "URL of the new model"))),
        (status = 400, description = "Invalid payload", body = Error)
    ),
    tags = ["models"],
    operation_id = "createModel"
)]
#[post("/models")]
pub async fn create_model(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<ModelRequest>,
) -> ApiResult<HttpResponse> {
    let urls = RequestUrls::from_request(&req)?;
    let draft = ModelDraft::try_from(payload.into_inner())?;
    let model = state.models_commands.create_model(draft).await?;
    let dto = to_dto(&model, &urls);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, dto.links.self_link.href.clone()))
        .json(dto))
}

/// Fetch one model.
#[utoipa::path(
    get,
    path = "/models/{id}",
    params(("id" = Uuid, Path, description = "Model identifier")),
    responses(
        (status = 200, description = "Model", body = ModelDto),
        (status = 404, description = "No such model")
    ),
    tags = ["models"],
    operation_id = "getModel"
)]
#[get("/models/{id}")]
pub async fn get_model(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ModelDto>> {
    let urls = RequestUrls::from_request(&req)?;
    let model = state
        .models
        .get_model(ModelId::from_uuid(path.into_inner()))
        .await?;
    Ok(web::Json(to_dto(&model, &urls)))
}
