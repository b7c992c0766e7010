use crate::api::models::{Contact, ContactDraft, Editor};
use crate::app::BootstrapAdmin;
use directories::ProjectDirs;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("username already taken")]
    UsernameTaken,
    #[error("no data directory on this platform")]
    NoDataDir,
    #[error("cannot create database directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

const EDITOR_COLUMNS: &str = "id, username, full_name, is_super_admin, is_active, created_at";
const CONTACT_COLUMNS: &str = "id, name, telegram_username, position, avatar_url, display_order";

pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// SQLite-backed contacts and editors. Each call opens its own connection.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn default_path() -> StoreResult<PathBuf> {
        let proj = ProjectDirs::from("com", "example", "ContactDirectory").ok_or(StoreError::NoDataDir)?;
        Ok(proj.data_dir().join("directory.sqlite"))
    }

    /// Open (creating if needed) the database at `path` and ensure the schema.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        ensure_dir(&path)?;
        let store = Self { path };
        store.init()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> StoreResult<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    fn init(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                telegram_username TEXT NOT NULL,
                position TEXT,
                avatar_url TEXT,
                display_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE TABLE IF NOT EXISTS editors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                full_name TEXT NOT NULL DEFAULT '',
                is_super_admin INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;
        Ok(())
    }

    /// Create the configured super-admin when no editor exists yet.
    pub fn bootstrap_admin(&self, admin: &BootstrapAdmin) -> StoreResult<bool> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM editors", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(false);
        }
        conn.execute(
            "INSERT INTO editors (username, password_hash, full_name, is_super_admin, is_active)
             VALUES (?1, ?2, ?3, 1, 1)",
            params![admin.username, hash_password(&admin.password), admin.full_name],
        )?;
        log::info!("created super-admin {}", admin.username);
        Ok(true)
    }

    pub fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY display_order ASC, id ASC"
        ))?;
        let rows = stmt.query_map([], contact_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn create_contact(&self, draft: &ContactDraft) -> StoreResult<Contact> {
        let conn = self.conn()?;
        let contact = conn.query_row(
            &format!(
                "INSERT INTO contacts (name, telegram_username, position, avatar_url, display_order)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {CONTACT_COLUMNS}"
            ),
            params![
                draft.name,
                draft.telegram_username,
                draft.position.clone().unwrap_or_default(),
                draft.avatar_url.clone().unwrap_or_default(),
                draft.display_order
            ],
            contact_from_row,
        )?;
        Ok(contact)
    }

    pub fn update_contact(&self, id: i64, draft: &ContactDraft) -> StoreResult<Option<Contact>> {
        let conn = self.conn()?;
        let contact = conn
            .query_row(
                &format!(
                    "UPDATE contacts
                     SET name = ?1, telegram_username = ?2, position = ?3,
                         avatar_url = ?4, display_order = ?5, updated_at = CURRENT_TIMESTAMP
                     WHERE id = ?6
                     RETURNING {CONTACT_COLUMNS}"
                ),
                params![
                    draft.name,
                    draft.telegram_username,
                    draft.position.clone().unwrap_or_default(),
                    draft.avatar_url.clone().unwrap_or_default(),
                    draft.display_order,
                    id
                ],
                contact_from_row,
            )
            .optional()?;
        Ok(contact)
    }

    pub fn delete_contact(&self, id: i64) -> StoreResult<bool> {
        let conn = self.conn()?;
        let n = conn.execute("DELETE FROM contacts WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    /// Active editor whose password hashes to the stored value.
    pub fn authenticate(&self, username: &str, password: &str) -> StoreResult<Option<Editor>> {
        let conn = self.conn()?;
        let editor = conn
            .query_row(
                &format!(
                    "SELECT {EDITOR_COLUMNS} FROM editors
                     WHERE username = ?1 AND password_hash = ?2 AND is_active = 1"
                ),
                params![username, hash_password(password)],
                editor_from_row,
            )
            .optional()?;
        Ok(editor)
    }

    pub fn list_editors(&self) -> StoreResult<Vec<Editor>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {EDITOR_COLUMNS} FROM editors ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], editor_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// New editors are always plain, active editors.
    pub fn create_editor(&self, username: &str, password: &str, full_name: &str) -> StoreResult<Editor> {
        let conn = self.conn()?;
        conn.query_row(
            &format!(
                "INSERT INTO editors (username, password_hash, full_name, is_super_admin, is_active)
                 VALUES (?1, ?2, ?3, 0, 1)
                 RETURNING {EDITOR_COLUMNS}"
            ),
            params![username, hash_password(password), full_name],
            editor_from_row,
        )
        .map_err(|e| match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => StoreError::UsernameTaken,
            _ => StoreError::Sqlite(e),
        })
    }

    /// Replace the password hash if `old_password` matches.
    pub fn update_password(&self, username: &str, old_password: &str, new_password: &str) -> StoreResult<bool> {
        let conn = self.conn()?;
        let n = conn.execute(
            "UPDATE editors SET password_hash = ?1, updated_at = CURRENT_TIMESTAMP
             WHERE username = ?2 AND password_hash = ?3",
            params![hash_password(new_password), username, hash_password(old_password)],
        )?;
        Ok(n > 0)
    }

    /// Super-admin rows are never deleted.
    pub fn delete_editor(&self, id: i64) -> StoreResult<bool> {
        let conn = self.conn()?;
        let n = conn.execute("DELETE FROM editors WHERE id = ?1 AND is_super_admin = 0", params![id])?;
        Ok(n > 0)
    }
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        name: row.get(1)?,
        telegram_username: row.get(2)?,
        position: row.get(3)?,
        avatar_url: row.get(4)?,
        display_order: row.get(5)?,
    })
}

fn editor_from_row(row: &Row<'_>) -> rusqlite::Result<Editor> {
    Ok(Editor {
        id: row.get(0)?,
        username: row.get(1)?,
        full_name: row.get(2)?,
        is_super_admin: row.get(3)?,
        is_active: row.get(4)?,
        created_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("db").join("directory.sqlite")).unwrap();
        store.bootstrap_admin(&BootstrapAdmin::default()).unwrap();
        (dir, store)
    }

    fn draft(name: &str, order: i64) -> ContactDraft {
        ContactDraft {
            name: name.into(),
            telegram_username: name.to_lowercase(),
            display_order: order,
            ..Default::default()
        }
    }

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn bootstrap_runs_once() {
        let (_dir, store) = store();
        assert!(!store.bootstrap_admin(&BootstrapAdmin::default()).unwrap());
        let editors = store.list_editors().unwrap();
        assert_eq!(editors.len(), 1);
        assert!(editors[0].is_super_admin);
    }

    #[test]
    fn contacts_sorted_by_display_order() {
        let (_dir, store) = store();
        store.create_contact(&draft("Second", 2)).unwrap();
        store.create_contact(&draft("First", 1)).unwrap();
        let names: Vec<String> = store.list_contacts().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn update_unknown_contact_is_none() {
        let (_dir, store) = store();
        assert!(store.update_contact(42, &draft("Ghost", 0)).unwrap().is_none());
        let c = store.create_contact(&draft("Anna", 0)).unwrap();
        let mut d = draft("Anna K", 3);
        d.position = Some("Sales".into());
        let updated = store.update_contact(c.id, &d).unwrap().unwrap();
        assert_eq!(updated.name, "Anna K");
        assert_eq!(updated.position.as_deref(), Some("Sales"));
        assert!(store.delete_contact(c.id).unwrap());
        assert!(!store.delete_contact(c.id).unwrap());
    }

    #[test]
    fn authenticate_checks_hash_and_active_flag() {
        let (_dir, store) = store();
        assert!(store.authenticate("admin", "changeme123").unwrap().is_some());
        assert!(store.authenticate("admin", "wrong").unwrap().is_none());

        let e = store.create_editor("anna", "pw", "Anna").unwrap();
        let conn = store.conn().unwrap();
        conn.execute("UPDATE editors SET is_active = 0 WHERE id = ?1", params![e.id]).unwrap();
        assert!(store.authenticate("anna", "pw").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_is_reported() {
        let (_dir, store) = store();
        store.create_editor("anna", "pw", "").unwrap();
        assert!(matches!(store.create_editor("anna", "pw2", ""), Err(StoreError::UsernameTaken)));
    }

    #[test]
    fn password_update_requires_old_password() {
        let (_dir, store) = store();
        assert!(!store.update_password("admin", "wrong", "next").unwrap());
        assert!(store.update_password("admin", "changeme123", "next").unwrap());
        assert!(store.authenticate("admin", "next").unwrap().is_some());
    }

    #[test]
    fn super_admin_survives_delete() {
        let (_dir, store) = store();
        let admin = store.list_editors().unwrap().remove(0);
        assert!(!store.delete_editor(admin.id).unwrap());
        let e = store.create_editor("anna", "pw", "").unwrap();
        assert!(store.delete_editor(e.id).unwrap());
    }
}
