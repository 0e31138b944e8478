//! Shared helpers for endpoint tests over the in-memory stores.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::NaiveDate;
use roster::Trace;
use roster::inbound::http::configure;
use roster::inbound::http::state::HttpState;
use roster::test_support::{MutableClock, in_memory_state};
use serde_json::Value;

/// Date the test clock starts on.
pub(crate) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
}

/// Fresh state over empty stores, plus the clock driving it.
pub(crate) fn fresh_state() -> (web::Data<HttpState>, Arc<MutableClock>) {
    let clock = Arc::new(MutableClock::at_date(today()));
    (web::Data::new(in_memory_state(clock.clone())), clock)
}

/// Serve one request and return its status and JSON body, if any.
pub(crate) async fn call(
    state: &web::Data<HttpState>,
    request: test::TestRequest,
) -> (StatusCode, Option<Value>) {
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(configure),
    )
    .await;
    let res = test::call_service(&app, request.to_request()).await;
    let status = res.status();
    let bytes = test::read_body(res).await;
    (status, serde_json::from_slice(&bytes).ok())
}

/// Serve a GET request that must succeed and return its JSON body.
pub(crate) async fn get_json(state: &web::Data<HttpState>, uri: &str) -> Value {
    let (status, body) = call(state, test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::OK, "GET {uri}");
    body.expect("JSON body")
}
