//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod links;
pub mod listing;
pub mod models;
pub mod people;
pub mod state;

use actix_web::web;

pub use error::ApiResult;
use error::{json_error_handler, path_error_handler};

/// Register the people and model resources.
///
/// Malformed JSON bodies become `400 invalid_request`; identifiers that do
/// not parse become `404`. Health probes are registered separately because
/// they need [`health::HealthState`] rather than [`state::HttpState`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(people::list_people)
        .service(people::create_person)
        .service(people::get_person)
        .service(people::update_person)
        .service(people::delete_person)
        .service(models::list_models)
        .service(models::create_model)
        .service(models::get_model);
}

/// Register the liveness and readiness probes.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health::ready).service(health::live);
}
