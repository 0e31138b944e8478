//! People API handlers.
//!
//! ```text
//! GET    /people?name=ali&age=30&age=40&page=0&size=20&sort=age,desc
//! POST   /people        {"name":"Alice","dob":"1990-01-01"}
//! GET    /people/{id}
//! PATCH  /people/{id}   {"name":"Alicia","dob":"1990-01-01"}
//! DELETE /people/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use chrono::NaiveDate;
use pagination::{PageLinks, PageMetadata};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::PersonView;
use crate::domain::{Error, PersonDraft, PersonId, ValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::links::{PageLinksSchema, PageMetadataSchema, RequestUrls, ResourceLinks};
use crate::inbound::http::listing::list_request;
use crate::inbound::http::state::HttpState;

/// Create or replace payload for a person.
///
/// Both fields are required; they are optional here so a missing field is
/// reported as a validation violation rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct PersonRequest {
    #[schema(example = "Alice")]
    pub name: Option<String>,
    #[schema(example = "1990-01-01")]
    pub dob: Option<NaiveDate>,
}

impl TryFrom<PersonRequest> for PersonDraft {
    type Error = ValidationError;

    fn try_from(value: PersonRequest) -> Result<Self, Self::Error> {
        Self::try_new(value.name, value.dob)
    }
}

/// Person representation with the age derived at read time.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PersonDto {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Alice")]
    pub name: String,
    pub dob: NaiveDate,
    #[schema(example = 36)]
    pub age: i32,
    #[serde(rename = "_links")]
    pub links: ResourceLinks,
}

/// `_embedded` object of a people page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmbeddedPeople {
    pub people: Vec<PersonDto>,
}

/// One page of people.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PersonPage {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedPeople,
    #[serde(rename = "_links")]
    #[schema(value_type = PageLinksSchema)]
    pub links: PageLinks,
    #[schema(value_type = PageMetadataSchema)]
    pub page: PageMetadata,
}

fn person_path(id: PersonId) -> String {
    format!("/people/{id}")
}

fn to_dto(view: PersonView, urls: &RequestUrls) -> PersonDto {
    PersonDto {
        links: urls.resource_links(&person_path(view.id)),
        id: view.id.get(),
        name: view.name,
        dob: view.dob,
        age: view.age,
    }
}

/// List people matching the query-parameter filter.
///
/// `name` matches case-insensitively on the first value. `dob` and `age`
/// take one value as a lower bound or two as an inclusive range; extra
/// values are ignored.
#[utoipa::path(
    get,
    path = "/people",
    params(
        ("name" = Option<String>, Query, description = "Substring of the name, case-insensitive"),
        ("dob" = Option<Vec<NaiveDate>>, Query, description = "Lower bound, or lower and upper bound"),
        ("age" = Option<Vec<i32>>, Query, description = "Lower bound, or lower and upper bound"),
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Page size, default 20, at most 2000"),
        ("sort" = Option<Vec<String>>, Query, description = "property[,property][,asc|desc]")
    ),
    responses(
        (status = 200, description = "Page of people", body = PersonPage),
        (status = 400, description = "Malformed filter, paging or sort", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["people"],
    operation_id = "listPeople"
)]
#[get("/people")]
pub async fn list_people(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<PersonPage>> {
    let urls = RequestUrls::from_request(&req)?;
    let request = list_request(req.query_string())?;
    let page = state.people.list_people(request).await?;
    let metadata = page.metadata();
    let people = page
        .into_content()
        .into_iter()
        .map(|view| to_dto(view, &urls))
        .collect();
    Ok(web::Json(PersonPage {
        embedded: EmbeddedPeople { people },
        links: urls.page_links(&metadata),
        page: metadata,
    }))
}

/// Create a person.
#[utoipa::path(
    post,
    path = "/people",
    request_body = PersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonDto,
            headers(("Location" = String, description = "URL of the new person"))),
        (status = 400, description = "Invalid payload", body = Error)
    ),
    tags = ["people"],
    operation_id = "createPerson"
)]
#[post("/people")]
pub async fn create_person(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<PersonRequest>,
) -> ApiResult<HttpResponse> {
    let urls = RequestUrls::from_request(&req)?;
    let draft = PersonDraft::try_from(payload.into_inner())?;
    let view = state.people_commands.create_person(draft).await?;
    let dto = to_dto(view, &urls);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, dto.links.self_link.href.clone()))
        .json(dto))
}

/// Fetch one person.
#[utoipa::path(
    get,
    path = "/people/{id}",
    params(("id" = i64, Path, description = "Person identifier")),
    responses(
        (status = 200, description = "Person", body = PersonDto),
        (status = 404, description = "No such person")
    ),
    tags = ["people"],
    operation_id = "getPerson"
)]
#[get("/people/{id}")]
pub async fn get_person(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PersonDto>> {
    let urls = RequestUrls::from_request(&req)?;
    let view = state
        .people
        .get_person(PersonId::new(path.into_inner()))
        .await?;
    Ok(web::Json(to_dto(view, &urls)))
}

/// Replace a person's name and date of birth.
#[utoipa::path(
    patch,
    path = "/people/{id}",
    params(("id" = i64, Path, description = "Person identifier")),
    request_body = PersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonDto),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 404, description = "No such person")
    ),
    tags = ["people"],
    operation_id = "updatePerson"
)]
#[patch("/people/{id}")]
pub async fn update_person(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<i64>,
    payload: web::Json<PersonRequest>,
) -> ApiResult<web::Json<PersonDto>> {
    let urls = RequestUrls::from_request(&req)?;
    let draft = PersonDraft::try_from(payload.into_inner())?;
    let view = state
        .people_commands
        .update_person(PersonId::new(path.into_inner()), draft)
        .await?;
    Ok(web::Json(to_dto(view, &urls)))
}

/// Delete a person.
#[utoipa::path(
    delete,
    path = "/people/{id}",
    params(("id" = i64, Path, description = "Person identifier")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "No such person")
    ),
    tags = ["people"],
    operation_id = "deletePerson"
)]
#[delete("/people/{id}")]
pub async fn delete_person(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .people_commands
        .delete_person(PersonId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
