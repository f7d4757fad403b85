//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use tower::ServiceExt;

use little_lemon::restaurant::NewMenuItem;
use little_lemon::{AppConfig, HttpServer, SqliteStore};

pub const TEST_SECRET: &str = "integration-test-secret-key";

/// Default config with a real secret and an in-memory database.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.security.secret_key = TEST_SECRET.to_string();
    config.database.url = "sqlite::memory:".to_string();
    config
}

pub async fn test_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::in_memory().await.unwrap())
}

/// Store pre-filled with the named dishes, priced 10, 11, 12...
pub async fn seeded_store(names: &[&str]) -> Arc<SqliteStore> {
    let store = test_store().await;
    for (offset, name) in names.iter().enumerate() {
        store
            .create_menu_item(NewMenuItem {
                name: name.to_string(),
                price: 10 + offset as i64,
                description: format!("{name} of the day"),
            })
            .await
            .unwrap();
    }
    store
}

pub fn app(store: Arc<SqliteStore>) -> Router {
    HttpServer::new(test_config(), store).router()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    get_with_cookie(app, uri, None).await
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(urlencode(fields)))
        .unwrap();
    send(app, request).await
}

pub fn urlencode(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}

/// POST `body` as is, with an optional content type.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}

pub async fn request(app: &Router, method: Method, uri: &str) -> Response<Body> {
    send(app, Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn template(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("x-template")
        .and_then(|value| value.to_str().ok())
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// The `name=value` pair of the `Set-Cookie` header, if any.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.trim().to_string())
}

/// Follow a redirect the way a browser would, sending back the cookie it set.
pub async fn follow(app: &Router, response: Response<Body>) -> Response<Body> {
    let target = location(&response).expect("redirect without Location").to_string();
    let cookie = set_cookie(&response);
    get_with_cookie(app, &target, cookie.as_deref()).await
}

/// Number of `<li>` entries inside the rendered message list.
pub fn message_count(body: &str) -> usize {
    let Some(start) = body.find("<ul class=\"messages\">") else {
        return 0;
    };
    let rest = &body[start..];
    let end = rest.find("</ul>").unwrap_or(rest.len());
    rest[..end].matches("<li").count()
}
