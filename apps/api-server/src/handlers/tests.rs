use actix_web::{App, http::StatusCode, test, web};
use serde_json::json;

use quill_core::domain::Post;

use crate::handlers::configure_routes;
use crate::state::AppState;

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn post_json(id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "title": "First post",
        "content": "Hello",
        "date": "2024-01-01",
        "tags": ["rust", "blog"]
    })
}

fn image_json(id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "data": [1, 2, 3],
        "mime_type": "image/png",
        "description": "cover art"
    })
}

#[actix_web::test]
async fn create_then_get_round_trips() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts")
            .set_json(post_json(1))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/blogposts/1").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let found: Post = test::read_body_json(resp).await;
    assert_eq!(found.id, 1);
    assert_eq!(found.title, "First post");
    assert_eq!(found.tags, vec!["rust".to_owned(), "blog".to_owned()]);
}

#[actix_web::test]
async fn create_rejects_missing_required_fields() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    for body in [
        json!({ "id": 1, "content": "Hello", "date": "2024-01-01" }),
        json!({ "id": 1, "title": "", "content": "Hello", "date": "2024-01-01" }),
        json!({ "id": 1, "title": "First post", "date": "2024-01-01" }),
        json!({ "id": 1, "title": "First post", "content": "", "date": "2024-01-01" }),
        json!({ "id": 1, "title": "First post", "content": "Hello" }),
    ] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/blogposts")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // Nothing was written
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/blogposts/1").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_with_existing_id_conflicts() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts")
            .set_json(post_json(1))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let mut second = post_json(1);
    second["title"] = json!("Another title");
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts")
            .set_json(second)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // The stored record is unmodified
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/blogposts/1").to_request(),
    )
    .await;
    let found: Post = test::read_body_json(resp).await;
    assert_eq!(found.title, "First post");
}

#[actix_web::test]
async fn update_requires_id_and_existing_record() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/blogposts")
            .set_json(json!({ "title": "T", "content": "C", "date": "2024-01-01" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/blogposts")
            .set_json(post_json(9))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_replaces_the_whole_record() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts")
            .set_json(post_json(1))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/blogposts")
            .set_json(json!({
                "id": 1,
                "title": "Revised",
                "content": "Hello again",
                "date": "2024-02-02"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/blogposts/1").to_request(),
    )
    .await;
    let found: Post = test::read_body_json(resp).await;
    assert_eq!(found.title, "Revised");
    // Full-record replace: the old tags are gone
    assert!(found.tags.is_empty());
}

#[actix_web::test]
async fn non_positive_ids_are_rejected_before_the_store() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    for uri in ["/blogposts/0", "/blogposts/-1"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp =
            test::call_service(&app, test::TestRequest::delete().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn delete_returns_the_deleted_post() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts")
            .set_json(post_json(1))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri("/blogposts/1").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Post = test::read_body_json(resp).await;
    assert_eq!(deleted.id, 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/blogposts/1").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn list_returns_every_post() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    for id in [1, 2] {
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/blogposts")
                .set_json(post_json(id))
                .to_request(),
        )
        .await;
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/blogposts/list").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = test::read_body_json(resp).await;
    assert_eq!(posts.len(), 2);
}

#[actix_web::test]
async fn attach_requires_a_description() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts")
            .set_json(post_json(1))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts/1/images")
            .set_json(json!({ "id": 10, "data": [1], "mime_type": "image/png" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The image was not persisted
    let resp = test::call_service(&app, test::TestRequest::get().uri("/image/10").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn attach_then_detach_scenario() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts")
            .set_json(post_json(1))
            .to_request(),
    )
    .await;

    // Attach image 10
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts/1/images")
            .set_json(image_json(10))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Post = test::read_body_json(resp).await;
    assert_eq!(updated.image_ids, vec![10]);

    // The collection lists it
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/blogposts/1/images")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let images: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["id"], 10);

    // The data URI endpoint serves it
    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/image/10").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"data:image/png;base64,AQID");

    // Detach removes it from collection and store
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/blogposts/1/images/10")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Post = test::read_body_json(resp).await;
    assert!(updated.image_ids.is_empty());

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/image/10").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn detach_of_unassociated_image_conflicts() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    for id in [1, 2] {
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/blogposts")
                .set_json(post_json(id))
                .to_request(),
        )
        .await;
    }
    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts/1/images")
            .set_json(image_json(10))
            .to_request(),
    )
    .await;

    // Image 10 exists but belongs to post 1, not post 2
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/blogposts/2/images/10")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Neither the image nor post 1's collection changed
    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/image/10").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/blogposts/1").to_request(),
    )
    .await;
    let found: Post = test::read_body_json(resp).await;
    assert_eq!(found.image_ids, vec![10]);
}

#[actix_web::test]
async fn detach_validation_order() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts")
            .set_json(post_json(1))
            .to_request(),
    )
    .await;

    // Non-positive image id
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/blogposts/1/images/0")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Image missing from the store entirely
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/blogposts/1/images/10")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn listing_images_of_a_bare_post_is_empty_not_an_error() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/blogposts")
            .set_json(post_json(1))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/blogposts/1/images")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let images: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert!(images.is_empty());
}

#[actix_web::test]
async fn missing_image_data_uri_is_not_found() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/image/123").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn health_reports_ok() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
