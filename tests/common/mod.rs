use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use confera::config::Config;

/// Pre-shared token the internal module accepts in tests.
pub const INTERNAL_TOKEN: &str = "test-internal-token";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({ "email": email, "password": password, "name": name }))
            .send()
            .await
            .expect("register request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Register the bootstrap user (first user = coordinator), return the token.
    pub async fn bootstrap(&self) -> String {
        let (body, status) = self
            .register("coordinator@test.com", "password123", "Coordinator")
            .await;
        assert_eq!(status, StatusCode::OK, "bootstrap register failed: {body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Register a regular user (author role), return (token, user_id).
    pub async fn register_author(&self, email: &str) -> (String, String) {
        let (body, status) = self.register(email, "password123", "Author").await;
        assert_eq!(status, StatusCode::OK, "author register failed: {body}");
        (
            body["data"]["token"].as_str().unwrap().to_string(),
            body["data"]["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    /// Register a user, grant the reviewer role, and log in again so the
    /// fresh token carries the new role set. Returns (token, user_id).
    pub async fn register_reviewer(&self, coord_token: &str, email: &str) -> (String, String) {
        let (_, user_id) = self.register_author(email).await;
        let (body, status) = self
            .put_auth(
                &format!("/api/users/{user_id}/roles"),
                coord_token,
                &json!({ "roles": ["reviewer"] }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "role update failed: {body}");
        let (body, status) = self.login(email, "password123").await;
        assert_eq!(status, StatusCode::OK, "reviewer login failed: {body}");
        (
            body["data"]["token"].as_str().unwrap().to_string(),
            user_id,
        )
    }

    pub async fn create_event(&self, token: &str, name: &str) -> Value {
        let (body, status) = self
            .post_auth(
                "/api/events",
                token,
                &json!({
                    "name": name,
                    "description": "Call for papers",
                    "starts_on": "01/09/2026",
                    "ends_on": "2026-09-05",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create event failed: {body}");
        body["data"].clone()
    }

    /// Submit an article via multipart, return (body, status).
    pub async fn submit_article(
        &self,
        token: &str,
        event_id: &str,
        title: &str,
        file_bytes: &[u8],
        mime: &str,
        filename: &str,
    ) -> (Value, StatusCode) {
        let part = reqwest::multipart::Part::bytes(file_bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str(mime)
            .expect("invalid test mime");
        let form = reqwest::multipart::Form::new()
            .text("title", title.to_string())
            .text("abstract", "We study a thing in depth.")
            .text("theme_area", "Distributed Systems")
            .text("keywords", "systems, consensus")
            .text("event_id", event_id.to_string())
            .part("file", part);

        let resp = self
            .client
            .post(self.url("/api/articles"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .expect("submit article failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Upload a new version for an article, return (body, status).
    pub async fn submit_version(
        &self,
        token: &str,
        article_id: &str,
        file_bytes: &[u8],
    ) -> (Value, StatusCode) {
        let part = reqwest::multipart::Part::bytes(file_bytes.to_vec())
            .file_name("revised.pdf".to_string())
            .mime_str("application/pdf")
            .expect("invalid test mime");
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .client
            .post(self.url(&format!("/api/articles/{article_id}/versions")))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .expect("submit version failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app with a fresh temporary database and upload directory.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let suffix = Uuid::now_v7().to_string().replace('-', "");
    let db_name = format!("confera_test_{suffix}");

    // Connect to default postgres DB to create test DB
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let upload_dir = std::env::temp_dir().join(format!("confera_uploads_{suffix}"));

    let mut hasher = Sha256::new();
    hasher.update(INTERNAL_TOKEN.as_bytes());
    let internal_token_sha256 = hex::encode(hasher.finalize());

    let config = Config {
        database_url: test_url,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        internal_token_sha256,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        upload_dir: upload_dir.clone(),
        max_upload_size: 64 * 1024,
        log_level: "warn".to_string(),
    };

    let app = confera::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
        upload_dir,
    }
}

/// Drop the test database and upload directory after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let _ = std::fs::remove_dir_all(&app.upload_dir);

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
