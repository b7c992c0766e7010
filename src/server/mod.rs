//! HTTP rendition of the contacts and auth services, backed by [`Store`].
//!
//! Both services share one listener: the contacts service answers at
//! `/contacts` and the auth service at `/auth`. Editors authenticate every
//! guarded request with the `X-Editor-Username`/`X-Editor-Password` pair.

pub mod auth;
pub mod contacts;
pub mod error;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderName, Method};
use axum::routing::{any, get};
use axum::Router;
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::api::models::Editor;
use crate::api::{PASSWORD_HEADER, USERNAME_HEADER};
use crate::storage::{Store, StoreResult};

pub use error::ServiceError;

#[derive(Clone)]
pub struct ServiceState {
    pub store: Arc<Store>,
}

pub fn router(store: Store) -> Router {
    let state = ServiceState { store: Arc::new(store) };
    Router::new()
        .route(
            "/contacts",
            get(contacts::list)
                .post(contacts::create)
                .put(contacts::update)
                .delete(contacts::remove),
        )
        .route("/auth", any(auth::handle))
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-editor-username"),
            HeaderName::from_static("x-editor-password"),
        ])
        .max_age(Duration::from_secs(86400))
}

/// Serve both services until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, store: Store, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        log::info!("contacts service on http://{addr}/contacts, auth service on http://{addr}/auth");
    }
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Run a storage call on the blocking pool.
pub(crate) async fn blocking<T, F>(state: &ServiceState, f: F) -> Result<T, ServiceError>
where
    F: FnOnce(&Store) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    Ok(tokio::task::spawn_blocking(move || f(store.as_ref())).await??)
}

/// Resolve the header credentials to an active editor.
pub(crate) async fn require_editor(state: &ServiceState, headers: &HeaderMap) -> Result<Editor, ServiceError> {
    let username = header_value(headers, USERNAME_HEADER);
    let password = header_value(headers, PASSWORD_HEADER);
    let (Some(username), Some(password)) = (username, password) else {
        return Err(ServiceError::Unauthorized("Требуется авторизация".into()));
    };
    let editor = blocking(state, move |s| s.authenticate(&username, &password)).await?;
    editor.ok_or_else(|| ServiceError::Unauthorized("Неверные учётные данные".into()))
}

/// Header text as UTF-8; `to_str` would refuse non-ASCII passwords.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Decode a JSON body; an empty body reads as `{}`.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ServiceError> {
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) { b"{}" } else { &body[..] };
    serde_json::from_slice(raw).map_err(|e| ServiceError::bad_request(format!("Некорректный JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn name(raw: &str) -> HeaderName {
        HeaderName::from_bytes(raw.as_bytes()).unwrap()
    }

    #[test]
    fn header_value_accepts_utf8_passwords() {
        let mut headers = HeaderMap::new();
        headers.insert(name(PASSWORD_HEADER), HeaderValue::from_str("пароль").unwrap());
        headers.insert(name(USERNAME_HEADER), HeaderValue::from_static(""));
        assert_eq!(header_value(&headers, PASSWORD_HEADER).as_deref(), Some("пароль"));
        assert_eq!(header_value(&headers, USERNAME_HEADER), None);
    }

    #[test]
    fn header_value_rejects_invalid_utf8() {
        let mut headers = HeaderMap::new();
        headers.insert(name(PASSWORD_HEADER), HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        assert_eq!(header_value(&headers, PASSWORD_HEADER), None);
    }
}
