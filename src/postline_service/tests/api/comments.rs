use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, TestUser, message_of};

async fn comment_on(app: &TestApp, user: &TestUser, post_id: &str, text: &str) -> Value {
    let response = app
        .post(
            "/api/posts/comment",
            Some(&user.token),
            &json!({"postId": post_id, "comment": text}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_add_comment_appends_entries() {
    let app = TestApp::new().await;
    let alice = app.register_user().await;
    let bob = app.register_user().await;
    let id = app.create_post(&alice, "discuss").await;

    comment_on(&app, &alice, &id, "first").await;
    let body = comment_on(&app, &bob, &id, "second").await;

    let texts: Vec<&str> = body["comment"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["comment"].as_str().unwrap())
        .collect();
    assert_eq!(texts, ["first", "second"]);
}

#[tokio::test]
async fn test_add_comment_requires_fields() {
    let app = TestApp::new().await;
    let user = app.register_user().await;

    let response = app
        .post(
            "/api/posts/comment",
            Some(&user.token),
            &json!({"comment": "orphan"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message_of(response).await,
        "Please enter post ID and comment"
    );
}

#[tokio::test]
async fn test_update_comment_by_author_only() {
    let app = TestApp::new().await;
    let alice = app.register_user().await;
    let bob = app.register_user().await;
    let id = app.create_post(&alice, "discuss").await;
    let body = comment_on(&app, &alice, &id, "typo").await;
    let comment_id = body["comment"][0]["id"].as_str().unwrap().to_owned();

    let rejected = app
        .put(
            "/api/posts/comment",
            &bob.token,
            &json!({"postId": id, "commentId": comment_id, "comment": "vandalised"}),
        )
        .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message_of(rejected).await,
        "Comment not found or it is not yours."
    );

    let response = app
        .put(
            "/api/posts/comment",
            &alice.token,
            &json!({"postId": id, "commentId": comment_id, "comment": "fixed"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], "Comment updated");
    assert_eq!(
        body["allCommentsOnThisPost"]["comment"][0]["comment"],
        "fixed"
    );
}

#[tokio::test]
async fn test_delete_comment_by_author_only() {
    let app = TestApp::new().await;
    let alice = app.register_user().await;
    let bob = app.register_user().await;
    let id = app.create_post(&alice, "discuss").await;
    let body = comment_on(&app, &alice, &id, "regret").await;
    let comment_id = body["comment"][0]["id"].as_str().unwrap().to_owned();
    let request = json!({"postId": id, "commentId": comment_id});

    let rejected = app
        .delete("/api/posts/comment", &bob.token, Some(&request))
        .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let response = app
        .delete("/api/posts/comment", &alice.token, Some(&request))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], "Comment deleted");

    let post: Value = app
        .get(&format!("/api/posts/all/{id}"), Some(&alice.token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(post["comments"]["comment"], json!([]));
}
