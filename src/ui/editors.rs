use std::io::{self, Write};

use crate::api::Directory;
use crate::controller::Page;
use crate::i18n::Msg;

/// Editor-management table. Rows that cannot be deleted are marked.
pub fn render_editors<W: Write, D: Directory>(out: &mut W, page: &Page<D>) -> io::Result<()> {
    let locale = page.locale();
    writeln!(out, "{}", Msg::EditorsTitle.text(locale))?;
    for editor in page.editors() {
        let role = if editor.is_super_admin { Msg::SuperAdminRole } else { Msg::EditorRole };
        let status = if editor.is_active { Msg::Active } else { Msg::Inactive };
        write!(
            out,
            "  #{:<4} {:<16} {:<24} {}, {}",
            editor.id,
            editor.username,
            editor.full_name,
            role.text(locale),
            status.text(locale)
        )?;
        if !page.can_delete_editor(editor) {
            write!(out, " ({})", Msg::Protected.text(locale))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Contact, ContactDraft, Editor};
    use crate::api::{ApiError, Credentials};
    use crate::i18n::Locale;
    use async_trait::async_trait;

    /// Auth service answering with a fixed editor list.
    struct Roster(Vec<Editor>);

    fn unused<T>() -> Result<T, ApiError> {
        Err(ApiError::Rejected { status: 501, message: None })
    }

    #[async_trait]
    impl Directory for Roster {
        async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
            unused()
        }
        async fn create_contact(&self, _: &Credentials, _: &ContactDraft) -> Result<Contact, ApiError> {
            unused()
        }
        async fn update_contact(&self, _: &Credentials, _: &ContactDraft) -> Result<Contact, ApiError> {
            unused()
        }
        async fn delete_contact(&self, _: &Credentials, _: i64) -> Result<bool, ApiError> {
            unused()
        }
        async fn login(&self, username: &str, _: &str) -> Result<Editor, ApiError> {
            self.0
                .iter()
                .find(|e| e.username == username)
                .cloned()
                .ok_or(ApiError::Unauthorized { message: None })
        }
        async fn change_password(&self, _: &Credentials, _: &str, _: &str) -> Result<bool, ApiError> {
            unused()
        }
        async fn list_editors(&self, _: &Credentials) -> Result<Vec<Editor>, ApiError> {
            Ok(self.0.clone())
        }
        async fn create_editor(&self, _: &Credentials, _: &str, _: &str, _: &str) -> Result<Editor, ApiError> {
            unused()
        }
        async fn delete_editor(&self, _: &Credentials, _: i64) -> Result<bool, ApiError> {
            unused()
        }
    }

    fn editor(id: i64, username: &str, is_super_admin: bool) -> Editor {
        Editor {
            id,
            username: username.into(),
            full_name: format!("{username} full"),
            is_super_admin,
            is_active: true,
            created_at: None,
        }
    }

    fn row<'a>(text: &'a str, username: &str) -> &'a str {
        text.lines().find(|l| l.contains(&format!(" {username} "))).unwrap()
    }

    #[tokio::test]
    async fn protected_rows_are_marked() {
        let roster = Roster(vec![editor(1, "root", true), editor(2, "boss", true), editor(3, "anna", false)]);
        let mut page = Page::new(roster, Locale::En);
        assert!(page.login("boss", "pw").await);
        assert!(page.list_editors().await);

        let mut buf = Vec::new();
        render_editors(&mut buf, &page).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Editors\n"));
        assert!(row(&text, "root").ends_with("super-admin, active (cannot be deleted)"));
        assert!(row(&text, "boss").contains("(cannot be deleted)"));
        assert!(row(&text, "anna").ends_with("editor, active"));
    }
}
