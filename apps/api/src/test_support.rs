//! In-process harness for handler tests: the real router over a `MemoryStore`
//! with static files and uploads rooted in temporary directories.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::auth::password::hash_password;
use crate::auth::JwtManager;
use crate::candidates::storage::ResumeStorage;
use crate::config::Config;
use crate::models::user::{NewUser, Role, User};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::memory::MemoryStore;
use crate::store::Store;

const TEST_HOST: &str = "api.test";
const BOUNDARY: &str = "hirewire-test-boundary";

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    router: Router,
    static_root: TempDir,
    base_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(configure: impl FnOnce(&mut Config)) -> Self {
        let static_root = TempDir::new().unwrap();
        let base_dir = TempDir::new().unwrap();

        let mut config = Config::for_tests(static_root.path().to_path_buf());
        configure(&mut config);

        let store = Arc::new(MemoryStore::new());
        let state = AppState {
            store: store.clone(),
            jwt: JwtManager::new(config.jwt_secret.as_bytes(), config.jwt_ttl_secs),
            storage: ResumeStorage::new(
                config.upload_dir(),
                Some(base_dir.path().join("uploads")),
            ),
            config,
        };
        let router = build_router(state.clone());

        Self {
            state,
            store,
            router,
            static_root,
            base_dir,
        }
    }

    pub fn static_root(&self) -> &Path {
        self.static_root.path()
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.state.config.upload_dir()
    }

    pub fn secondary_upload_dir(&self) -> PathBuf {
        self.base_dir.path().join("uploads")
    }

    /// Inserts a user directly and returns it with a freshly issued token.
    pub async fn seed_user(&self, username: &str, password: &str, role: Role) -> (User, String) {
        let digest = hash_password(password);
        let user = self
            .store
            .insert_user(NewUser {
                username: username.to_string(),
                password_hash: digest.hash,
                password_salt: digest.salt,
                role,
            })
            .await
            .unwrap();
        let token = self.state.jwt.issue(&user).unwrap();
        (user, token)
    }

    pub async fn store_user(&self, username: &str) -> User {
        self.store
            .find_user_by_username(username)
            .await
            .unwrap()
            .unwrap()
    }

    pub fn json_request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, TEST_HOST);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    /// Dispatches a request and decodes the body as JSON (`Null` when empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, headers, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let (status, _, body) = self.send(self.json_request("GET", uri, token, None)).await;
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let (status, _, body) = self
            .send(self.json_request("POST", uri, token, Some(body)))
            .await;
        (status, body)
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let (status, _, body) = self
            .send(self.json_request("PUT", uri, token, Some(body)))
            .await;
        (status, body)
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let (status, _, body) = self
            .send(self.json_request("DELETE", uri, token, None))
            .await;
        (status, body)
    }

    /// Unauthenticated GET returning the raw body, for static files.
    pub async fn get_raw(&self, uri: &str) -> (StatusCode, Bytes) {
        let request = self.json_request("GET", uri, None, None);
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes)
    }

    /// Multipart POST with a single file field.
    pub async fn upload(
        &self,
        uri: &str,
        token: Option<&str>,
        field_name: &str,
        file_name: &str,
        data: &[u8],
    ) -> (StatusCode, Value) {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::HOST, TEST_HOST)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let (status, _, body) = self.send(builder.body(Body::from(body)).unwrap()).await;
        (status, body)
    }
}
