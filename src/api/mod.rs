pub mod client;
pub mod models;

use async_trait::async_trait;
use thiserror::Error;
use zeroize::Zeroizing;

use models::{Contact, ContactDraft, Editor};

pub use client::ApiClient;

pub const USERNAME_HEADER: &str = "X-Editor-Username";
pub const PASSWORD_HEADER: &str = "X-Editor-Password";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Unauthorized { message: Option<String> },

    #[error("HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected { status: u16, message: Option<String> },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// A 401 from either service: the held credentials are stale.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Error text sent by the service, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Username/password pair resent as headers on every guarded request.
/// The password buffer is wiped when the session drops it.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Zeroizing::new(password.into());
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// The two remote services the page talks to.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError>;
    async fn create_contact(&self, creds: &Credentials, draft: &ContactDraft) -> Result<Contact, ApiError>;
    async fn update_contact(&self, creds: &Credentials, draft: &ContactDraft) -> Result<Contact, ApiError>;
    async fn delete_contact(&self, creds: &Credentials, id: i64) -> Result<bool, ApiError>;

    async fn login(&self, username: &str, password: &str) -> Result<Editor, ApiError>;
    async fn change_password(&self, creds: &Credentials, old: &str, new: &str) -> Result<bool, ApiError>;
    async fn list_editors(&self, creds: &Credentials) -> Result<Vec<Editor>, ApiError>;
    async fn create_editor(
        &self,
        creds: &Credentials,
        username: &str,
        full_name: &str,
        password: &str,
    ) -> Result<Editor, ApiError>;
    async fn delete_editor(&self, creds: &Credentials, id: i64) -> Result<bool, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("anna", "hunter2");
        let shown = format!("{creds:?}");
        assert!(shown.contains("anna"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn rejected_error_mentions_server_message() {
        let err = ApiError::Rejected { status: 403, message: Some("Доступ запрещён".into()) };
        assert_eq!(err.to_string(), "HTTP 403: Доступ запрещён");
        assert_eq!(err.server_message(), Some("Доступ запрещён"));
        assert!(!err.is_unauthorized());
    }
}
