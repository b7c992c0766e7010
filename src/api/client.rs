use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::models::{
    AuthAction, Contact, ContactDraft, ContactList, ContactReply, Editor, EditorList, EditorReply, ErrorReply, IdBody,
    LoginReply, SuccessReply,
};
use crate::api::{ApiError, Credentials, Directory, PASSWORD_HEADER, USERNAME_HEADER};

/// HTTP client for the contacts and auth services.
pub struct ApiClient {
    pub http: HttpClient,
    pub contacts_url: Url,
    pub auth_url: Url,
}

impl ApiClient {
    pub fn new(contacts_url: &str, auth_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            contacts_url: Url::parse(contacts_url)?,
            auth_url: Url::parse(auth_url)?,
        })
    }

    fn with_auth(req: RequestBuilder, creds: &Credentials) -> RequestBuilder {
        req.header(USERNAME_HEADER, &creds.username)
            .header(PASSWORD_HEADER, creds.password())
    }

    /// Decode a success body, or turn the status and `{ error }` body into an `ApiError`.
    async fn read<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()));
        }
        let message = resp.json::<ErrorReply>().await.ok().and_then(|r| r.error);
        log::debug!("service answered {status}: {message:?}");
        if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized { message })
        } else {
            Err(ApiError::Rejected { status: status.as_u16(), message })
        }
    }
}

#[async_trait]
impl Directory for ApiClient {
    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let resp = self.http.get(self.contacts_url.clone()).send().await?;
        let list: ContactList = Self::read(resp).await?;
        Ok(list.contacts)
    }

    async fn create_contact(&self, creds: &Credentials, draft: &ContactDraft) -> Result<Contact, ApiError> {
        let req = Self::with_auth(self.http.post(self.contacts_url.clone()), creds).json(draft);
        let reply: ContactReply = Self::read(req.send().await?).await?;
        Ok(reply.contact)
    }

    async fn update_contact(&self, creds: &Credentials, draft: &ContactDraft) -> Result<Contact, ApiError> {
        let req = Self::with_auth(self.http.put(self.contacts_url.clone()), creds).json(draft);
        let reply: ContactReply = Self::read(req.send().await?).await?;
        Ok(reply.contact)
    }

    async fn delete_contact(&self, creds: &Credentials, id: i64) -> Result<bool, ApiError> {
        let body = IdBody { id: Some(id) };
        let req = Self::with_auth(self.http.delete(self.contacts_url.clone()), creds).json(&body);
        let reply: SuccessReply = Self::read(req.send().await?).await?;
        Ok(reply.success)
    }

    async fn login(&self, username: &str, password: &str) -> Result<Editor, ApiError> {
        let body = AuthAction::Login {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = self.http.post(self.auth_url.clone()).json(&body).send().await?;
        let reply: LoginReply = Self::read(resp).await?;
        match reply.editor {
            Some(editor) if reply.success => Ok(editor),
            _ => Err(ApiError::Decode("login reply carries no editor".into())),
        }
    }

    async fn change_password(&self, creds: &Credentials, old: &str, new: &str) -> Result<bool, ApiError> {
        let body = AuthAction::ChangePassword {
            old_password: old.to_string(),
            new_password: new.to_string(),
        };
        let req = Self::with_auth(self.http.put(self.auth_url.clone()), creds).json(&body);
        let reply: SuccessReply = Self::read(req.send().await?).await?;
        Ok(reply.success)
    }

    async fn list_editors(&self, creds: &Credentials) -> Result<Vec<Editor>, ApiError> {
        let req = Self::with_auth(self.http.get(self.auth_url.clone()), creds);
        let list: EditorList = Self::read(req.send().await?).await?;
        Ok(list.editors)
    }

    async fn create_editor(
        &self,
        creds: &Credentials,
        username: &str,
        full_name: &str,
        password: &str,
    ) -> Result<Editor, ApiError> {
        let body = AuthAction::CreateEditor {
            username: username.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
        };
        let req = Self::with_auth(self.http.post(self.auth_url.clone()), creds).json(&body);
        let reply: EditorReply = Self::read(req.send().await?).await?;
        Ok(reply.editor)
    }

    async fn delete_editor(&self, creds: &Credentials, id: i64) -> Result<bool, ApiError> {
        let body = IdBody { id: Some(id) };
        let req = Self::with_auth(self.http.delete(self.auth_url.clone()), creds).json(&body);
        let reply: SuccessReply = Self::read(req.send().await?).await?;
        Ok(reply.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_service_url() {
        let err = ApiClient::new("not a url", "http://localhost/auth", Duration::from_secs(1)).err();
        assert!(matches!(err, Some(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn auth_headers_are_attached() {
        let client = ApiClient::new("http://localhost/contacts", "http://localhost/auth", Duration::from_secs(1)).unwrap();
        let creds = Credentials::new("anna", "secret");
        let req = ApiClient::with_auth(client.http.get(client.auth_url.clone()), &creds)
            .build()
            .unwrap();
        assert_eq!(req.headers()[USERNAME_HEADER], "anna");
        assert_eq!(req.headers()[PASSWORD_HEADER], "secret");
    }
}
