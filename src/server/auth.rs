use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::api::models::{AuthAction, Editor, EditorList, EditorReply, IdBody, LoginReply, SuccessReply};
use crate::server::{blocking, parse_body, require_editor, ServiceError, ServiceState};

/// Single endpoint; the method and the body's `action` select the operation.
pub async fn handle(
    State(state): State<ServiceState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let value: Value = parse_body(&body)?;
    let action = match method {
        Method::POST | Method::PUT => serde_json::from_value::<AuthAction>(value.clone()).ok(),
        _ => None,
    };

    if method == Method::POST {
        if let Some(AuthAction::Login { username, password }) = &action {
            return login(&state, username.clone(), password.clone()).await;
        }
    }

    let editor = require_editor(&state, &headers).await?;
    match (method, action) {
        (Method::GET, _) => list_editors(&state, &editor).await,
        (Method::POST, Some(AuthAction::CreateEditor { username, password, full_name })) => {
            create_editor(&state, &editor, username, password, full_name).await
        }
        (Method::PUT, Some(AuthAction::ChangePassword { old_password, new_password })) => {
            change_password(&state, &editor, old_password, new_password).await
        }
        (Method::DELETE, _) => {
            let body: IdBody = serde_json::from_value(value).unwrap_or_default();
            delete_editor(&state, &editor, body.id).await
        }
        _ => Err(ServiceError::MethodNotAllowed),
    }
}

async fn login(state: &ServiceState, username: String, password: String) -> Result<Response, ServiceError> {
    if username.is_empty() || password.is_empty() {
        return Err(ServiceError::bad_request("Логин и пароль обязательны"));
    }
    let editor = blocking(state, move |s| s.authenticate(&username, &password)).await?;
    match editor {
        Some(editor) => {
            log::info!("editor {} logged in", editor.username);
            Ok(Json(LoginReply { success: true, editor: Some(editor) }).into_response())
        }
        None => Err(ServiceError::Unauthorized("Неверный логин или пароль".into())),
    }
}

async fn list_editors(state: &ServiceState, requester: &Editor) -> Result<Response, ServiceError> {
    if !requester.is_super_admin {
        return Err(ServiceError::Forbidden("Доступ запрещён".into()));
    }
    let editors = blocking(state, |s| s.list_editors()).await?;
    Ok(Json(EditorList { editors }).into_response())
}

async fn create_editor(
    state: &ServiceState,
    requester: &Editor,
    username: String,
    password: String,
    full_name: String,
) -> Result<Response, ServiceError> {
    if !requester.is_super_admin {
        return Err(ServiceError::Forbidden("Недостаточно прав".into()));
    }
    let username = username.trim().to_string();
    if username.is_empty() || password.is_empty() {
        return Err(ServiceError::bad_request("Логин и пароль обязательны"));
    }
    let editor = blocking(state, move |s| s.create_editor(&username, &password, full_name.trim())).await?;
    log::info!("{} created editor {}", requester.username, editor.username);
    Ok((StatusCode::CREATED, Json(EditorReply { editor })).into_response())
}

async fn change_password(
    state: &ServiceState,
    requester: &Editor,
    old_password: String,
    new_password: String,
) -> Result<Response, ServiceError> {
    if old_password.is_empty() || new_password.is_empty() {
        return Err(ServiceError::bad_request("Старый и новый пароль обязательны"));
    }
    let username = requester.username.clone();
    let success = blocking(state, move |s| s.update_password(&username, &old_password, &new_password)).await?;
    log::info!("password change for {}: {success}", requester.username);
    Ok(Json(SuccessReply { success }).into_response())
}

async fn delete_editor(state: &ServiceState, requester: &Editor, id: Option<i64>) -> Result<Response, ServiceError> {
    let Some(id) = id else {
        return Err(ServiceError::bad_request("ID редактора обязателен"));
    };
    let success = if requester.is_super_admin {
        blocking(state, move |s| s.delete_editor(id)).await?
    } else {
        false
    };
    log::info!("{} deleted editor {id}: {success}", requester.username);
    Ok(Json(SuccessReply { success }).into_response())
}
