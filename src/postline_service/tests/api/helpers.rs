use std::time::Duration;

use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use postline_adapters::{
    HashMapCommentStore, HashMapLikeStore, HashMapPostStore, HashMapUserStore, JwtAuthConfig,
    MockEmailClient,
    config::{DEFAULT_TOKEN_TTL_IN_SECONDS, test},
};
use postline_core::{CommentStore, LikeStore, PostStore, UserStore};
use postline_service::PostlineService;
use reqwest::{Response, StatusCode};
use secrecy::Secret;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub email_client: MockEmailClient,
}

pub struct TestUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_stores(
            HashMapUserStore::new(),
            HashMapPostStore::new(),
            HashMapLikeStore::new(),
            HashMapCommentStore::new(),
        )
        .await
    }

    pub async fn with_stores<U, P, L, C>(
        user_store: U,
        post_store: P,
        like_store: L,
        comment_store: C,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        P: PostStore + Clone + 'static,
        L: LikeStore + Clone + 'static,
        C: CommentStore + Clone + 'static,
    {
        let email_client = MockEmailClient::new();
        let jwt = JwtAuthConfig::new(
            Secret::new(test::JWT_SECRET.to_owned()),
            DEFAULT_TOKEN_TTL_IN_SECONDS,
        );

        let service = PostlineService::new(
            user_store,
            post_store,
            like_store,
            comment_store,
            email_client.clone(),
            jwt,
        )
        .with_error_stack();

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            service
                .run_standalone(listener, &[], std::future::pending())
                .await
                .expect("Failed to run app");
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
            email_client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response {
        let mut request = self.http_client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> Response {
        let mut request = self.http_client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, token: &str, body: &Value) -> Response {
        self.http_client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str, token: &str, body: Option<&Value>) -> Response {
        let mut request = self.http_client.delete(self.url(path)).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.expect("Failed to execute request")
    }

    /// Registers a fresh user with generated details.
    pub async fn register_user(&self) -> TestUser {
        let name: String = Name().fake();
        let unique = uuid::Uuid::new_v4().simple().to_string();
        let email = format!("{}.{}", &unique[..8], SafeEmail().fake::<String>());
        let username = format!("user-{unique}");
        let password = "correct horse battery staple".to_owned();

        let response = self
            .post(
                "/api/users",
                None,
                &json!({
                    "name": name,
                    "email": email,
                    "username": username,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = response.json().await.unwrap();

        TestUser {
            name,
            email: email.to_lowercase(),
            username,
            password,
            token: body["token"].as_str().unwrap().to_owned(),
        }
    }

    /// Creates a post owned by `user` and returns its id.
    pub async fn create_post(&self, user: &TestUser, title: &str) -> String {
        let response = self
            .post(
                "/api/posts/new",
                Some(&user.token),
                &json!({
                    "title": title,
                    "category": "general",
                    "description": "a post made in a test",
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = response.json().await.unwrap();
        body["id"].as_str().unwrap().to_owned()
    }

    /// Waits for the reset code mailed to `email` in the background.
    pub async fn reset_code_sent_to(&self, email: &str) -> String {
        for _ in 0..50 {
            if let Some(sent) = self.email_client.last_sent_to(email).await {
                return extract_code(&sent.content);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("No reset code was sent to {email}");
    }
}

fn extract_code(content: &str) -> String {
    content
        .split("font-size: 24px;\">")
        .nth(1)
        .and_then(|rest| rest.split("</h4>").next())
        .map(|code| code.trim().to_owned())
        .expect("Reset code email has no code")
}

pub async fn message_of(response: Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["message"].as_str().unwrap().to_owned()
}
