//! End-to-end tests for `/people` over the in-memory store.

#[path = "support/http.rs"]
mod http;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use ::roster::inbound::http::state::HttpState;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use http::{call, fresh_state, get_json};

/// State holding `Person0`..`Person9`, born `(1970 + 5i)-(i+1)-(i+1)`.
#[fixture]
async fn roster() -> web::Data<HttpState> {
    let (state, _clock) = fresh_state();
    for i in 0..10 {
        let dob = format!("{}-{:02}-{:02}", 1970 + 5 * i, i + 1, i + 1);
        let (status, _) = call(
            &state,
            test::TestRequest::post()
                .uri("/people")
                .set_json(json!({ "name": format!("Person{i}"), "dob": dob })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    state
}

fn names(page: &Value) -> Vec<String> {
    page["_embedded"]["people"]
        .as_array()
        .expect("people array")
        .iter()
        .filter_map(|person| person["name"].as_str().map(str::to_owned))
        .collect()
}

#[rstest]
#[case("/people?name=person", 10)]
#[case("/people?name=PERSON3", 1)]
#[case("/people?name=nobody", 0)]
#[case("/people?id=1", 10)]
#[case("/people?age=30", 6)]
#[case("/people?age=20&age=30", 2)]
#[case("/people?age=20&age=30&age=99", 2)]
#[case("/people?dob=2000-01-01", 4)]
#[case("/people?dob=1980-01-01&dob=1990-12-31", 3)]
#[case("/people?height=180", 10)]
#[actix_web::test]
async fn list_applies_query_filters(
    #[future] roster: web::Data<HttpState>,
    #[case] uri: &str,
    #[case] expected: usize,
) {
    let state = roster.await;
    let page = get_json(&state, uri).await;
    assert_eq!(names(&page).len(), expected, "{uri}");
    assert_eq!(page["page"]["totalElements"].as_u64(), u64::try_from(expected).ok());
}

#[rstest]
#[actix_web::test]
async fn text_filter_uses_first_value_only(#[future] roster: web::Data<HttpState>) {
    let state = roster.await;
    let page = get_json(&state, "/people?name=person3&name=person4").await;
    assert_eq!(names(&page), ["Person3"]);
}

#[rstest]
#[actix_web::test]
async fn sorts_by_derived_age(#[future] roster: web::Data<HttpState>) {
    let state = roster.await;
    let page = get_json(&state, "/people?sort=age,asc&size=2").await;
    assert_eq!(names(&page), ["Person9", "Person8"]);
    let ages: Vec<i64> = page["_embedded"]["people"]
        .as_array()
        .expect("people array")
        .iter()
        .filter_map(|person| person["age"].as_i64())
        .collect();
    assert_eq!(ages, [11, 16]);
}

#[rstest]
#[actix_web::test]
async fn page_envelope_links_preserve_filters(#[future] roster: web::Data<HttpState>) {
    let state = roster.await;
    let page = get_json(&state, "/people?name=person&size=3&page=1").await;

    assert_eq!(names(&page), ["Person3", "Person4", "Person5"]);
    assert_eq!(
        page["page"],
        json!({ "size": 3, "totalElements": 10, "totalPages": 4, "number": 1 })
    );
    let links = &page["_links"];
    for rel in ["first", "prev", "self", "next", "last"] {
        let href = links[rel]["href"].as_str().expect("link present");
        assert!(href.starts_with("http://"), "{rel} is absolute: {href}");
        assert!(href.contains("name=person"), "{rel} keeps filter: {href}");
    }
    assert!(
        links["last"]["href"]
            .as_str()
            .is_some_and(|href| href.contains("page=3"))
    );
}

#[rstest]
#[case("/people?age=")]
#[case("/people?age=old")]
#[case("/people?dob=01/01/1990")]
#[case("/people?page=-1")]
#[case("/people?size=many")]
#[case("/people?sort=height")]
#[actix_web::test]
async fn malformed_queries_are_rejected(#[case] uri: &str) {
    let (state, _clock) = fresh_state();
    let (status, body) = call(&state, test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    assert_eq!(
        body.as_ref().and_then(|body| body["code"].as_str()),
        Some("invalid_request")
    );
}

#[rstest]
#[actix_web::test]
async fn create_then_get_round_trips() {
    let (state, _clock) = fresh_state();
    let (status, created) = call(
        &state,
        test::TestRequest::post()
            .uri("/people")
            .set_json(json!({ "name": "  Alice  ", "dob": "1990-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = created.expect("created body");
    let id = created["id"].as_i64().expect("numeric id");

    let fetched = get_json(&state, &format!("/people/{id}")).await;
    assert_eq!(fetched["name"], "Alice");
    assert_eq!(fetched["dob"], "1990-01-01");
    assert_eq!(fetched["age"], 36);
    assert_eq!(fetched, created);
    assert!(
        fetched["_links"]["self"]["href"]
            .as_str()
            .is_some_and(|href| href.ends_with(&format!("/people/{id}")))
    );
}

#[rstest]
#[actix_web::test]
async fn create_lists_every_violation() {
    let (state, _clock) = fresh_state();
    let (status, body) = call(
        &state,
        test::TestRequest::post()
            .uri("/people")
            .set_json(json!({ "name": "x".repeat(33) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body
        .as_ref()
        .and_then(|body| body["details"]["violations"].as_array())
        .expect("violations")
        .iter()
        .filter_map(|violation| violation["field"].as_str())
        .collect();
    assert_eq!(fields, ["name", "dob"]);
}

#[rstest]
#[actix_web::test]
async fn update_of_missing_person_is_not_found() {
    let (state, _clock) = fresh_state();
    let (status, body) = call(
        &state,
        test::TestRequest::patch()
            .uri("/people/12")
            .set_json(json!({ "name": "Ghost", "dob": "1990-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_none());
}

#[rstest]
#[actix_web::test]
async fn deleting_twice_reports_not_found() {
    let (state, _clock) = fresh_state();
    let (_, created) = call(
        &state,
        test::TestRequest::post()
            .uri("/people")
            .set_json(json!({ "name": "Dora", "dob": "1985-05-05" })),
    )
    .await;
    let id = created
        .and_then(|body| body["id"].as_i64())
        .expect("numeric id");
    let uri = format!("/people/{id}");

    let (first, _) = call(&state, test::TestRequest::delete().uri(&uri)).await;
    let (second, _) = call(&state, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn age_advances_with_the_clock() {
    let (state, clock) = fresh_state();
    let (_, created) = call(
        &state,
        test::TestRequest::post()
            .uri("/people")
            .set_json(json!({ "name": "Leap", "dob": "2000-02-29" })),
    )
    .await;
    let id = created
        .and_then(|body| body["id"].as_i64())
        .expect("numeric id");
    let uri = format!("/people/{id}");

    assert_eq!(get_json(&state, &uri).await["age"], 26);
    clock.advance_days(365);
    assert_eq!(get_json(&state, &uri).await["age"], 27);
}
