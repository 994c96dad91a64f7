use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, message_of};

#[tokio::test]
async fn test_create_post_returns_joined_view() {
    let app = TestApp::new().await;
    let user = app.register_user().await;

    let response = app
        .post(
            "/api/posts/new",
            Some(&user.token),
            &json!({"title": "Hello", "category": "news", "description": "first post"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Hello");
    assert_eq!(body["category"], "news");
    assert_eq!(body["description"], "first post");
    assert_eq!(body["user"]["username"], user.username.as_str());
    assert_eq!(body["user"]["name"], user.name.as_str());
    assert_eq!(body["likes"]["like"], json!([]));
    assert_eq!(body["comments"]["comment"], json!([]));
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_post_requires_all_fields() {
    let app = TestApp::new().await;
    let user = app.register_user().await;

    let response = app
        .post(
            "/api/posts/new",
            Some(&user.token),
            &json!({"title": "Hello", "category": "news"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message_of(response).await, "Please enter all fields");
}

#[tokio::test]
async fn test_post_routes_require_auth() {
    let app = TestApp::new().await;

    let response = app.get("/api/posts/all", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message_of(response).await, "Please login to access this!");
}

#[tokio::test]
async fn test_list_all_and_mine() {
    let app = TestApp::new().await;
    let alice = app.register_user().await;
    let bob = app.register_user().await;
    app.create_post(&alice, "from alice").await;
    app.create_post(&bob, "from bob").await;

    let all: Vec<Value> = app
        .get("/api/posts/all", Some(&alice.token))
        .await
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = all.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["from alice", "from bob"]);

    let mine: Vec<Value> = app
        .get("/api/posts/me", Some(&bob.token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["title"], "from bob");
}

#[tokio::test]
async fn test_get_post_by_id() {
    let app = TestApp::new().await;
    let alice = app.register_user().await;
    let bob = app.register_user().await;
    let id = app.create_post(&alice, "visible").await;

    let response = app
        .get(&format!("/api/posts/all/{id}"), Some(&bob.token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], id.as_str());

    let response = app
        .get(&format!("/api/posts/me/{id}"), Some(&bob.token))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get(&format!("/api/posts/me/{id}"), Some(&alice.token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_and_malformed_post_ids() {
    let app = TestApp::new().await;
    let user = app.register_user().await;

    let unknown = app
        .get(
            &format!("/api/posts/all/{}", uuid::Uuid::new_v4()),
            Some(&user.token),
        )
        .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let malformed = app.get("/api/posts/all/abc", Some(&user.token)).await;
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_own_post_only() {
    let app = TestApp::new().await;
    let alice = app.register_user().await;
    let bob = app.register_user().await;
    let id = app.create_post(&alice, "draft").await;
    let path = format!("/api/posts/me/{id}");

    let rejected = app.put(&path, &bob.token, &json!({"title": "stolen"})).await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message_of(rejected).await,
        "Please make sure the details entered are correct."
    );

    let response = app.put(&path, &alice.token, &json!({"title": "final"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "final");
    assert_eq!(body["category"], "general");
}

#[tokio::test]
async fn test_delete_post_removes_companions() {
    let app = TestApp::new().await;
    let alice = app.register_user().await;
    let bob = app.register_user().await;
    let id = app.create_post(&alice, "short lived").await;
    let path = format!("/api/posts/me/{id}");

    let rejected = app.delete(&path, &bob.token, None).await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let response = app.delete(&path, &alice.token, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    let again = app.delete(&path, &alice.token, None).await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message_of(again).await,
        "It seems that the post has already been deleted."
    );

    let like = app
        .post("/api/posts/like", Some(&bob.token), &json!({"postId": id}))
        .await;
    assert_eq!(like.status(), StatusCode::BAD_REQUEST);

    let comment = app
        .post(
            "/api/posts/comment",
            Some(&bob.token),
            &json!({"postId": id, "comment": "too late"}),
        )
        .await;
    assert_eq!(comment.status(), StatusCode::BAD_REQUEST);
}
