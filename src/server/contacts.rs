use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::api::models::{ContactDraft, ContactList, ContactReply, IdBody, SuccessReply};
use crate::server::{blocking, parse_body, require_editor, ServiceError, ServiceState};

/// Public listing, ordered by `display_order`.
pub async fn list(State(state): State<ServiceState>) -> Result<Json<ContactList>, ServiceError> {
    let contacts = blocking(&state, |s| s.list_contacts()).await?;
    Ok(Json(ContactList { contacts }))
}

pub async fn create(
    State(state): State<ServiceState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ContactReply>), ServiceError> {
    let editor = require_editor(&state, &headers).await?;
    let draft = validated(parse_body::<ContactDraft>(&body)?)?;
    let contact = blocking(&state, move |s| s.create_contact(&draft)).await?;
    log::info!("{} added contact {} ({})", editor.username, contact.id, contact.name);
    Ok((StatusCode::CREATED, Json(ContactReply { contact })))
}

pub async fn update(
    State(state): State<ServiceState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ContactReply>, ServiceError> {
    let editor = require_editor(&state, &headers).await?;
    let draft = parse_body::<ContactDraft>(&body)?;
    let Some(id) = draft.id else {
        return Err(ServiceError::bad_request("ID контакта обязателен"));
    };
    let draft = validated(draft)?;
    let contact = blocking(&state, move |s| s.update_contact(id, &draft))
        .await?
        .ok_or_else(|| ServiceError::NotFound("Контакт не найден".into()))?;
    log::info!("{} updated contact {}", editor.username, contact.id);
    Ok(Json(ContactReply { contact }))
}

pub async fn remove(
    State(state): State<ServiceState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SuccessReply>, ServiceError> {
    let editor = require_editor(&state, &headers).await?;
    let Some(id) = parse_body::<IdBody>(&body)?.id else {
        return Err(ServiceError::bad_request("ID контакта обязателен"));
    };
    let success = blocking(&state, move |s| s.delete_contact(id)).await?;
    log::info!("{} deleted contact {id}: {success}", editor.username);
    Ok(Json(SuccessReply { success }))
}

fn validated(mut draft: ContactDraft) -> Result<ContactDraft, ServiceError> {
    draft.name = draft.name.trim().to_string();
    draft.telegram_username = draft.telegram_username.trim().to_string();
    if draft.name.is_empty() || draft.telegram_username.is_empty() {
        return Err(ServiceError::bad_request("Имя и Telegram обязательны"));
    }
    Ok(draft)
}
