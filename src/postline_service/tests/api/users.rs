use postline_service::LIVENESS_MESSAGE;
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, message_of};

#[tokio::test]
async fn test_root_reports_liveness() {
    let app = TestApp::new().await;

    let response = app.get("/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), LIVENESS_MESSAGE);
}

#[tokio::test]
async fn test_register_returns_token_for_new_user() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/users",
            None,
            &json!({"name": "A", "email": "a@x.com", "username": "a1", "password": "p"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], "User registered");
    assert_eq!(body["username"], "a1");

    let token = body["token"].as_str().unwrap();
    let me = app.get("/api/users/me", Some(token)).await;
    assert_eq!(me.status(), StatusCode::OK);
    let me: Value = me.json().await.unwrap();
    assert_eq!(me["name"], "A");
    assert_eq!(me["username"], "a1");
}

#[tokio::test]
async fn test_register_rejects_taken_email_or_username() {
    let app = TestApp::new().await;
    let first = json!({"name": "A", "email": "a@x.com", "username": "a1", "password": "p"});
    assert_eq!(
        app.post("/api/users", None, &first).await.status(),
        StatusCode::CREATED
    );

    for duplicate in [
        json!({"name": "B", "email": "a@x.com", "username": "b1", "password": "p"}),
        json!({"name": "B", "email": "b@x.com", "username": "a1", "password": "p"}),
    ] {
        let response = app.post("/api/users", None, &duplicate).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            message_of(response).await,
            "It seems that user already exists. Please login instead!"
        );
    }
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/users",
            None,
            &json!({"name": "A", "email": "a@x.com", "password": "p"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message_of(response).await,
        "Please enter all fields including name, email, username and password"
    );
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(app.url("/api/users"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_login_with_email_or_username() {
    let app = TestApp::new().await;
    let user = app.register_user().await;

    for identifier in [
        json!({"email": user.email, "password": user.password}),
        json!({"username": user.username, "password": user.password}),
    ] {
        let response = app.post("/api/users/login", None, &identifier).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], "Logged in");
        assert_eq!(body["username"], user.username.as_str());
        assert!(body["token"].is_string());
    }
}

#[tokio::test]
async fn test_login_ignores_malformed_email_next_to_username() {
    let app = TestApp::new().await;
    let user = app.register_user().await;

    let response = app
        .post(
            "/api/users/login",
            None,
            &json!({"email": "nobody", "username": user.username, "password": user.password}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post(
            "/api/users/login",
            None,
            &json!({"email": "nobody", "password": user.password}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new().await;
    let user = app.register_user().await;

    let wrong_password = app
        .post(
            "/api/users/login",
            None,
            &json!({"email": user.email, "password": "wrong"}),
        )
        .await;
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);

    let unknown = app
        .post(
            "/api/users/login",
            None,
            &json!({"username": "nobody-here", "password": "p"}),
        )
        .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let no_identifier = app
        .post("/api/users/login", None, &json!({"password": "p"}))
        .await;
    assert_eq!(no_identifier.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message_of(no_identifier).await,
        "Please enter Email(or username) and password"
    );

    let no_password = app
        .post("/api/users/login", None, &json!({"email": user.email}))
        .await;
    assert_eq!(no_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message_of(no_password).await, "Please enter your password");
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = TestApp::new().await;

    let missing = app.get("/api/users/me", None).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message_of(missing).await, "Please login to access this!");

    let invalid = app.get("/api/users/me", Some("not-a-token")).await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message_of(invalid).await, "Invalid token");
}

#[tokio::test]
async fn test_error_body_carries_stack_outside_production() {
    let app = TestApp::new().await;

    let response = app.get("/api/users/me", None).await;

    let body: Value = response.json().await.unwrap();
    assert!(body["stack"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn test_forgot_password_mails_code_and_code_resets_password() {
    let app = TestApp::new().await;
    let user = app.register_user().await;

    let response = app
        .post(
            "/api/users/forgot-password",
            None,
            &json!({"email": user.email}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let code = app.reset_code_sent_to(&user.email).await;

    let response = app
        .post(
            "/api/users/set-new-password",
            None,
            &json!({"email": user.email, "newPassword": "brand new", "code": code}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], "Password updated successfully!");

    let old = app
        .post(
            "/api/users/login",
            None,
            &json!({"email": user.email, "password": user.password}),
        )
        .await;
    assert_eq!(old.status(), StatusCode::BAD_REQUEST);

    let new = app
        .post(
            "/api/users/login",
            None,
            &json!({"email": user.email, "password": "brand new"}),
        )
        .await;
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_code_rotates_the_stored_code() {
    let app = TestApp::new().await;
    let user = app.register_user().await;
    app.post(
        "/api/users/forgot-password",
        None,
        &json!({"email": user.email}),
    )
    .await;
    let code: u32 = app.reset_code_sent_to(&user.email).await.parse().unwrap();
    let wrong = if code == 9999 { 1000 } else { code + 1 };

    let response = app
        .post(
            "/api/users/set-new-password",
            None,
            &json!({"email": user.email, "newPassword": "x", "code": wrong}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post(
            "/api/users/set-new-password",
            None,
            &json!({"email": user.email, "newPassword": "x", "code": code}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        message_of(response).await,
        "Confirmation code entered is incorrect. Please request for another code."
    );
}

#[tokio::test]
async fn test_non_numeric_code_is_a_wrong_code() {
    let app = TestApp::new().await;
    let user = app.register_user().await;
    app.post(
        "/api/users/forgot-password",
        None,
        &json!({"email": user.email}),
    )
    .await;
    let code = app.reset_code_sent_to(&user.email).await;

    let response = app
        .post(
            "/api/users/set-new-password",
            None,
            &json!({"email": user.email, "newPassword": "x", "code": "12ab"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post(
            "/api/users/set-new-password",
            None,
            &json!({"email": user.email, "newPassword": "x", "code": code}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        message_of(response).await,
        "Confirmation code entered is incorrect. Please request for another code."
    );
}

#[tokio::test]
async fn test_set_new_password_requires_a_code() {
    let app = TestApp::new().await;
    let user = app.register_user().await;

    for body in [
        json!({"email": user.email, "newPassword": "x"}),
        json!({"email": user.email, "newPassword": "x", "code": "  "}),
    ] {
        let response = app
            .post("/api/users/set-new-password", None, &body)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_forgot_password_for_unknown_email() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/users/forgot-password",
            None,
            &json!({"email": "ghost@x.com"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.email_client.sent().await.is_empty());
}
