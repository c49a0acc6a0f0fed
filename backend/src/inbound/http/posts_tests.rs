//! Tests for posts API handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::UserDraft;
use crate::domain::ports::UserRepository;
use crate::inbound::http::test_utils::{field_errors, post_body, test_app};
use crate::outbound::memory::InMemoryStore;

/// Handler state whose store holds users 1 (`ada`) and 2 (`grace`).
async fn seeded_state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStore::default());
    for name in ["ada", "grace"] {
        let draft = UserDraft::try_from_parts(name, &format!("{name}@example.com"), "Password123")
            .expect("valid user");
        store.insert(&draft).await.expect("seed user");
    }
    web::Data::new(HttpState::from_repositories(store.clone(), store))
}

#[actix_web::test]
async fn create_assigns_owner_and_id() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;

    let request = actix_test::TestRequest::post()
        .uri("/posts?user_id=2")
        .set_json(post_body("Hello world"))
        .to_request();
    let post: PostResponse = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(post.id, 1);
    assert_eq!(post.user_id, 2);
    assert_eq!(post.title, "Hello world");
}

#[actix_web::test]
async fn create_for_missing_owner_is_not_found() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;

    let request = actix_test::TestRequest::post()
        .uri("/posts?user_id=999")
        .set_json(post_body("Orphan post"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "user 999 not found");
}

#[actix_web::test]
async fn create_without_owner_is_a_validation_failure() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;

    let request = actix_test::TestRequest::post()
        .uri("/posts")
        .set_json(post_body("Hello world"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(field_errors(&body)[0].0, "query");
}

#[rstest]
#[case(json!({"title": "Hey", "content": "Long enough content."}), "title", "too_short")]
#[case(json!({"title": "     ", "content": "Long enough content."}), "title", "empty")]
#[case(json!({"title": "Hello world", "content": "short"}), "content", "too_short")]
#[case(json!({"title": "Hello world", "content": "x".repeat(1001)}), "content", "too_long")]
#[case(json!({"title": "Hello world", "content": "before <SCRIPT>alert(1)</SCRIPT>"}), "content", "forbidden_content")]
#[actix_web::test]
async fn create_rejects_invalid_fields(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;

    let request = actix_test::TestRequest::post()
        .uri("/posts?user_id=1")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(field_errors(&body).contains(&(field.to_owned(), code.to_owned())));
}

#[actix_web::test]
async fn get_update_and_delete_round_trip() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;
    let create = actix_test::TestRequest::post()
        .uri("/posts?user_id=1")
        .set_json(post_body("First draft"))
        .to_request();
    let created: PostResponse = actix_test::call_and_read_body_json(&app, create).await;
    let uri = format!("/posts/{}", created.id);

    let fetched: PostResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(fetched, created);

    let update = actix_test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({"title": "Final version", "content": "Rewritten post content."}))
        .to_request();
    let updated: PostResponse = actix_test::call_and_read_body_json(&app, update).await;
    assert_eq!(updated.title, "Final version");
    assert_eq!(updated.user_id, created.user_id);
    assert_eq!(updated.created_at, created.created_at);

    let deleted: PostResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(deleted, updated);

    for request in [
        actix_test::TestRequest::get().uri(&uri).to_request(),
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    ] {
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn update_missing_post_is_not_found() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;

    let request = actix_test::TestRequest::put()
        .uri("/posts/42")
        .set_json(post_body("Hello world"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "post 42 not found");
}

#[actix_web::test]
async fn list_pages_in_id_order() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;
    for title in ["First post", "Second post", "Third post"] {
        let request = actix_test::TestRequest::post()
            .uri("/posts?user_id=1")
            .set_json(post_body(title))
            .to_request();
        actix_test::call_service(&app, request).await;
    }

    let page: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/posts?skip=1&limit=5").to_request(),
    )
    .await;

    assert_eq!(page["total"], 3);
    assert_eq!(page["skip"], 1);
    assert_eq!(page["limit"], 5);
    let titles: Vec<_> = page["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|post| post["title"].clone())
        .collect();
    assert_eq!(titles, vec![json!("Second post"), json!("Third post")]);
}

#[rstest]
#[case("/posts?skip=-1")]
#[case("/posts?limit=0")]
#[actix_web::test]
async fn invalid_window_is_rejected_on_empty_store(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
