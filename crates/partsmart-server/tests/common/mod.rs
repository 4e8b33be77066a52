//! Shared setup for the HTTP tests

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use partsmart_server::services::UploadService;
use partsmart_server::storage::MemoryStore;
use partsmart_server::{app, AppState};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub const MAX_UPLOAD_BYTES: usize = 64 * 1024;

pub struct TestApp {
    pub router: Router,
    pub upload_dir: PathBuf,
}

pub async fn setup_app() -> TestApp {
    let upload_dir =
        std::env::temp_dir().join(format!("partsmart-test-{}", uuid::Uuid::new_v4()));
    let uploads = UploadService::new(&upload_dir, MAX_UPLOAD_BYTES)
        .await
        .expect("Failed to create upload dir");
    let state = AppState::new(Arc::new(MemoryStore::new()), uploads);

    TestApp {
        router: app(state, None),
        upload_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).to_string())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.json(Method::POST, uri, body).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.json(Method::PUT, uri, body).await
    }

    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        parts: Vec<FormPart>,
    ) -> (StatusCode, Value) {
        let (content_type, body) = multipart_body(parts);
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Register a user and return its id
    pub async fn create_user(&self, username: &str, role: &str) -> String {
        let (status, body) = self
            .post(
                "/api/users",
                json!({
                    "username": username,
                    "password": "secret123",
                    "email": format!("{}@example.com", username),
                    "role": role,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Create a seller profile for a fresh seller account and return its id
    pub async fn create_seller(&self, shop_name: &str) -> String {
        let username = shop_name.to_lowercase().replace(' ', "_");
        let user_id = self.create_user(&username, "seller").await;
        let (status, body) = self
            .post(
                "/api/sellers",
                json!({
                    "userId": user_id,
                    "shopName": shop_name,
                    "address": "Abossey Okai Market",
                    "phone": "+233201234567",
                    "location": { "lat": 5.5777, "lng": -0.2309 },
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_part(&self, seller_id: &str, name: &str, make: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/parts",
                json!({
                    "sellerId": seller_id,
                    "name": name,
                    "price": "120.50",
                    "vehicleMake": make,
                    "vehicleModel": "Corolla",
                    "vehicleYear": "2015-2019",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body
    }
}

pub enum FormPart {
    Text(&'static str, String),
    File {
        name: &'static str,
        file_name: &'static str,
        content_type: &'static str,
        data: Vec<u8>,
    },
}

const BOUNDARY: &str = "partsmart-test-boundary";

fn multipart_body(parts: Vec<FormPart>) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(&data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}
