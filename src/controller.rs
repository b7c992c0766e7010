//! Page controller: the cached directory, the editing session and the
//! notices shown after each action.
//!
//! The controller never owns authoritative data. Every successful mutation is
//! followed by a fresh fetch of the affected list.

use crate::api::models::{Contact, ContactDraft, Editor};
use crate::api::{ApiError, Credentials, Directory};
use crate::i18n::{Locale, Msg};
use crate::utils::telegram_handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// One-shot message produced by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

#[derive(Debug)]
pub struct EditorSession {
    pub editor: Editor,
    credentials: Credentials,
}

impl EditorSession {
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[derive(Debug, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticating { username: String },
    Editor(EditorSession),
}

pub struct Page<D> {
    api: D,
    locale: Locale,
    contacts: Vec<Contact>,
    editors: Vec<Editor>,
    session: Session,
    notices: Vec<Notice>,
}

impl<D: Directory> Page<D> {
    pub fn new(api: D, locale: Locale) -> Self {
        Self {
            api,
            locale,
            contacts: Vec::new(),
            editors: Vec::new(),
            session: Session::Anonymous,
            notices: Vec::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contact(&self, id: i64) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn editors(&self) -> &[Editor] {
        &self.editors
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_editor(&self) -> Option<&Editor> {
        match &self.session {
            Session::Editor(s) => Some(&s.editor),
            _ => None,
        }
    }

    pub fn can_edit(&self) -> bool {
        self.current_editor().is_some()
    }

    pub fn can_manage_editors(&self) -> bool {
        self.current_editor().is_some_and(|e| e.is_super_admin)
    }

    /// Whether the delete action is offered for this editor row.
    pub fn can_delete_editor(&self, target: &Editor) -> bool {
        match self.current_editor() {
            Some(me) => me.is_super_admin && !target.is_super_admin && target.id != me.id,
            None => false,
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Draft for the "add contact" dialog, ordered after the current list.
    pub fn new_contact_draft(&self) -> ContactDraft {
        ContactDraft {
            display_order: self.contacts.len() as i64,
            ..ContactDraft::default()
        }
    }

    pub fn edit_contact_draft(&self, id: i64) -> Option<ContactDraft> {
        self.contact(id).map(ContactDraft::from)
    }

    pub async fn list_contacts(&mut self) -> bool {
        match self.api.list_contacts().await {
            Ok(contacts) => {
                log::debug!("loaded {} contacts", contacts.len());
                self.contacts = contacts;
                true
            }
            Err(e) => {
                log::warn!("loading contacts failed: {e}");
                self.error(Msg::LoadContactsFailed);
                false
            }
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            self.error(Msg::CredentialsRequired);
            return false;
        }

        // A failed attempt falls back to whatever session was active before.
        let previous = std::mem::replace(
            &mut self.session,
            Session::Authenticating { username: username.to_string() },
        );
        match self.api.login(username, password).await {
            Ok(editor) => {
                log::info!("editor {} logged in", editor.username);
                let credentials = Credentials::new(editor.username.clone(), password);
                self.editors.clear();
                self.session = Session::Editor(EditorSession { editor, credentials });
                self.success(Msg::LoggedIn);
                true
            }
            Err(e) => {
                log::warn!("login for {username} failed: {e}");
                self.session = match previous {
                    Session::Authenticating { .. } => Session::Anonymous,
                    other => other,
                };
                let description = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| Msg::InvalidCredentials.text(self.locale).to_string());
                self.push(NoticeLevel::Error, description);
                false
            }
        }
    }

    pub fn logout(&mut self) {
        if matches!(self.session, Session::Anonymous) {
            return;
        }
        self.session = Session::Anonymous;
        self.editors.clear();
        self.notice(NoticeLevel::Info, Msg::LoggedOut);
    }

    /// Create when the draft has no id, update otherwise.
    pub async fn save_contact(&mut self, draft: ContactDraft) -> bool {
        let Some(creds) = self.credentials() else {
            self.error(Msg::LoginRequired);
            return false;
        };
        let mut draft = draft;
        draft.name = draft.name.trim().to_string();
        draft.telegram_username = telegram_handle(&draft.telegram_username);
        if draft.name.is_empty() || draft.telegram_username.is_empty() {
            self.error(Msg::ContactFieldsRequired);
            return false;
        }

        let (result, done) = match draft.id {
            Some(_) => (self.api.update_contact(&creds, &draft).await, Msg::ContactUpdated),
            None => (self.api.create_contact(&creds, &draft).await, Msg::ContactAdded),
        };
        match result {
            Ok(contact) => {
                log::info!("saved contact {} ({})", contact.id, contact.name);
                self.success(done);
                self.list_contacts().await;
                true
            }
            Err(e) => {
                self.fail(e, Msg::SaveContactFailed);
                false
            }
        }
    }

    pub async fn delete_contact(&mut self, id: i64) -> bool {
        let Some(creds) = self.credentials() else {
            self.error(Msg::LoginRequired);
            return false;
        };
        match self.api.delete_contact(&creds, id).await {
            Ok(true) => {
                log::info!("deleted contact {id}");
                self.success(Msg::ContactDeleted);
                self.list_contacts().await;
                true
            }
            Ok(false) => {
                self.error(Msg::ContactNotFound);
                self.list_contacts().await;
                false
            }
            Err(e) => {
                self.fail(e, Msg::DeleteContactFailed);
                false
            }
        }
    }

    /// On success the new password replaces the one resent with each request.
    pub async fn change_password(&mut self, old: &str, new: &str) -> bool {
        let Some(creds) = self.credentials() else {
            self.error(Msg::LoginRequired);
            return false;
        };
        if old.is_empty() || new.is_empty() {
            self.error(Msg::PasswordsRequired);
            return false;
        }
        match self.api.change_password(&creds, old, new).await {
            Ok(true) => {
                if let Session::Editor(s) = &mut self.session {
                    s.credentials.set_password(new);
                }
                self.success(Msg::PasswordChanged);
                true
            }
            Ok(false) => {
                self.error(Msg::WrongOldPassword);
                false
            }
            Err(e) => {
                self.fail(e, Msg::PasswordChangeFailed);
                false
            }
        }
    }

    pub async fn list_editors(&mut self) -> bool {
        let Some(creds) = self.admin_credentials() else {
            return false;
        };
        match self.api.list_editors(&creds).await {
            Ok(editors) => {
                self.editors = editors;
                true
            }
            Err(e) => {
                self.fail(e, Msg::LoadEditorsFailed);
                false
            }
        }
    }

    pub async fn create_editor(&mut self, username: &str, full_name: &str, password: &str) -> bool {
        let Some(creds) = self.admin_credentials() else {
            return false;
        };
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            self.error(Msg::EditorFieldsRequired);
            return false;
        }
        match self.api.create_editor(&creds, username, full_name.trim(), password).await {
            Ok(editor) => {
                log::info!("created editor {}", editor.username);
                self.success(Msg::EditorCreated);
                self.list_editors().await;
                true
            }
            Err(e) => {
                self.fail(e, Msg::CreateEditorFailed);
                false
            }
        }
    }

    /// Only non-super-admin rows from the loaded list can be deleted.
    pub async fn delete_editor(&mut self, id: i64) -> bool {
        let Some(creds) = self.admin_credentials() else {
            return false;
        };
        let Some(target) = self.editors.iter().find(|e| e.id == id).cloned() else {
            self.error(Msg::EditorNotFound);
            return false;
        };
        if !self.can_delete_editor(&target) {
            self.error(Msg::CannotDeleteSuperAdmin);
            return false;
        }
        match self.api.delete_editor(&creds, id).await {
            Ok(true) => {
                log::info!("deleted editor {}", target.username);
                self.success(Msg::EditorDeleted);
                self.list_editors().await;
                true
            }
            Ok(false) => {
                self.error(Msg::DeleteEditorFailed);
                self.list_editors().await;
                false
            }
            Err(e) => {
                self.fail(e, Msg::DeleteEditorFailed);
                false
            }
        }
    }

    fn credentials(&self) -> Option<Credentials> {
        match &self.session {
            Session::Editor(s) => Some(s.credentials.clone()),
            _ => None,
        }
    }

    fn admin_credentials(&mut self) -> Option<Credentials> {
        if !self.can_edit() {
            self.error(Msg::LoginRequired);
            return None;
        }
        if !self.can_manage_editors() {
            self.error(Msg::NotPermitted);
            return None;
        }
        self.credentials()
    }

    /// A 401 ends the session; anything else is a one-shot failure notice.
    fn fail(&mut self, err: ApiError, fallback: Msg) {
        if err.is_unauthorized() {
            log::warn!("credentials rejected, ending editing session: {err}");
            self.session = Session::Anonymous;
            self.editors.clear();
            self.error(Msg::SessionExpired);
        } else {
            log::warn!("{fallback:?}: {err}");
            let description = err
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.text(self.locale).to_string());
            self.push(NoticeLevel::Error, description);
        }
    }

    fn success(&mut self, msg: Msg) {
        self.notice(NoticeLevel::Success, msg);
    }

    fn error(&mut self, msg: Msg) {
        self.notice(NoticeLevel::Error, msg);
    }

    fn notice(&mut self, level: NoticeLevel, msg: Msg) {
        let description = msg.text(self.locale).to_string();
        self.push(level, description);
    }

    fn push(&mut self, level: NoticeLevel, description: String) {
        let title = match level {
            NoticeLevel::Success => Msg::SuccessTitle,
            NoticeLevel::Error => Msg::ErrorTitle,
            NoticeLevel::Info => Msg::InfoTitle,
        };
        self.notices.push(Notice {
            level,
            title: title.text(self.locale).to_string(),
            description,
        });
    }
}
