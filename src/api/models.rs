use serde::{Deserialize, Serialize};

/// A directory entry as returned by the contacts service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub telegram_username: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

impl Contact {
    /// Position with blank values folded into `None`.
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

/// A contact being edited. Without an id it describes a new record.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ContactDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub telegram_username: String,
    pub position: Option<String>,
    pub avatar_url: Option<String>,
    pub display_order: i64,
}

impl From<&Contact> for ContactDraft {
    fn from(c: &Contact) -> Self {
        Self {
            id: Some(c.id),
            name: c.name.clone(),
            telegram_username: c.telegram_username.clone(),
            position: c.position.clone(),
            avatar_url: c.avatar_url.clone(),
            display_order: c.display_order,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Editor {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub is_super_admin: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Editor {
    /// Full name, or the username when no name was given.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() { &self.username } else { &self.full_name }
    }
}

fn default_true() -> bool {
    true
}

/// Body of every auth service POST/PUT, discriminated by `action`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AuthAction {
    Login {
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
    ChangePassword {
        #[serde(default)]
        old_password: String,
        #[serde(default)]
        new_password: String,
    },
    CreateEditor {
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
        #[serde(default)]
        full_name: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct IdBody {
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ContactList {
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactReply {
    pub contact: Contact,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct EditorList {
    #[serde(default)]
    pub editors: Vec<Editor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EditorReply {
    pub editor: Editor,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LoginReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub editor: Option<Editor>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SuccessReply {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ErrorReply {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_tolerates_null_optionals() {
        let json = r#"{"id":3,"name":"Anna","telegram_username":"anna","position":null,"avatar_url":null,"display_order":2}"#;
        let c: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, 3);
        assert_eq!(c.position(), None);
    }

    #[test]
    fn blank_position_is_none() {
        let c = Contact {
            id: 1,
            name: "Oleg".into(),
            telegram_username: "oleg".into(),
            position: Some("  ".into()),
            avatar_url: None,
            display_order: 0,
        };
        assert_eq!(c.position(), None);
    }

    #[test]
    fn new_draft_omits_id() {
        let draft = ContactDraft { name: "Ivan".into(), ..Default::default() };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["name"], "Ivan");
    }

    #[test]
    fn auth_action_is_tagged() {
        let action = AuthAction::ChangePassword {
            old_password: "a".into(),
            new_password: "b".into(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "change_password");
        assert_eq!(json["old_password"], "a");
    }

    #[test]
    fn login_action_with_missing_fields_still_parses() {
        let action: AuthAction = serde_json::from_str(r#"{"action":"login"}"#).unwrap();
        match action {
            AuthAction::Login { username, password } => {
                assert!(username.is_empty());
                assert!(password.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn editor_display_name_falls_back_to_username() {
        let e = Editor {
            id: 1,
            username: "root".into(),
            full_name: String::new(),
            is_super_admin: true,
            is_active: true,
            created_at: None,
        };
        assert_eq!(e.display_name(), "root");
    }
}
