//! End-to-end tests for `/models` over the in-memory store.

#[path = "support/http.rs"]
mod http;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use roster::inbound::http::state::HttpState;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use http::{call, fresh_state, get_json};

/// State holding `Model1`..`Model10`.
#[fixture]
async fn numbered_models() -> web::Data<HttpState> {
    let (state, _clock) = fresh_state();
    for number in 1..=10 {
        let (status, _) = call(
            &state,
            test::TestRequest::post()
                .uri("/models")
                .set_json(json!({ "number": number, "name": format!("Model{number}") })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    state
}

fn numbers(page: &Value) -> Vec<i64> {
    page["_embedded"]["models"]
        .as_array()
        .expect("models array")
        .iter()
        .filter_map(|model| model["number"].as_i64())
        .collect()
}

#[rstest]
#[case("/models", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])]
#[case("/models?number=8", &[8, 9, 10])]
#[case("/models?number=3&number=5", &[3, 4, 5])]
#[case("/models?number=3&number=5&number=1", &[3, 4, 5])]
#[case("/models?name=model1", &[1, 10])]
#[case("/models?number=4&name=model", &[4, 5, 6, 7, 8, 9, 10])]
#[case("/models?number=2&number=6&sort=number,desc&size=2", &[6, 5])]
#[case("/models?sort=name", &[1, 10, 2, 3, 4, 5, 6, 7, 8, 9])]
#[actix_web::test]
async fn list_filters_and_sorts(
    #[future] numbered_models: web::Data<HttpState>,
    #[case] uri: &str,
    #[case] expected: &[i64],
) {
    let state = numbered_models.await;
    let page = get_json(&state, uri).await;
    assert_eq!(numbers(&page), expected, "{uri}");
}

#[rstest]
#[actix_web::test]
async fn empty_page_keeps_envelope() {
    let (state, _clock) = fresh_state();
    let page = get_json(&state, "/models?number=100").await;
    assert_eq!(page["_embedded"]["models"], json!([]));
    assert_eq!(page["page"]["totalElements"], 0);
    assert!(page["_links"]["self"]["href"].is_string());
    assert!(page["_links"].get("next").is_none());
}

#[rstest]
#[actix_web::test]
async fn create_then_get_round_trips() {
    let (state, _clock) = fresh_state();
    let request = test::TestRequest::post()
        .uri("/models")
        .set_json(json!({ "number": 5, "name": "Model5" }));
    let (status, created) = call(&state, request).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created
        .as_ref()
        .and_then(|body| body["id"].as_str())
        .expect("identifier")
        .to_owned();

    let fetched = get_json(&state, &format!("/models/{id}")).await;
    assert_eq!(fetched["number"], 5);
    assert_eq!(fetched["name"], "Model5");
    assert_eq!(Some(fetched), created);
}

#[rstest]
#[case(json!({ "name": "Model1" }), "number")]
#[case(json!({ "number": 1, "name": " " }), "name")]
#[case(json!({ "number": 1, "name": "m".repeat(256) }), "name")]
#[actix_web::test]
async fn invalid_payloads_are_rejected(#[case] payload: Value, #[case] field: &str) {
    let (state, _clock) = fresh_state();
    let (status, body) = call(
        &state,
        test::TestRequest::post().uri("/models").set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.as_ref()
            .and_then(|body| body["details"]["violations"][0]["field"].as_str()),
        Some(field)
    );
}

#[rstest]
#[case("/models?number=2147483648")]
#[case("/models?number=three")]
#[case("/models?sort=created")]
#[actix_web::test]
async fn malformed_queries_are_rejected(#[case] uri: &str) {
    let (state, _clock) = fresh_state();
    let (status, _) = call(&state, test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
}

#[rstest]
#[actix_web::test]
async fn unknown_model_is_not_found() {
    let (state, _clock) = fresh_state();
    let (status, body) = call(
        &state,
        test::TestRequest::get().uri("/models/6f1c2b1e-8a2d-4f4e-9c3b-1d2e3f4a5b6c"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_none());
}
