use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use thiserror::Error;

use crate::i18n::Locale;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Super-admin created on first start of an empty service database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
    pub full_name: String,
}

impl Default for BootstrapAdmin {
    fn default() -> Self {
        Self {
            username: "admin".into(),
            password: "changeme123".into(),
            full_name: "Administrator".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    pub bootstrap: BootstrapAdmin,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".into(),
            database: None,
            bootstrap: BootstrapAdmin::default(),
        }
    }
}

/// Endpoints and preferences. Editor passwords are never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub contacts_url: String,
    pub auth_url: String,
    pub locale: Locale,
    pub request_timeout_secs: u64,
    pub server: ServerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            contacts_url: "http://127.0.0.1:8080/contacts".into(),
            auth_url: "http://127.0.0.1:8080/auth".into(),
            locale: Locale::default(),
            request_timeout_secs: 15,
            server: ServerSettings::default(),
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("contact-directory.toml"))
    }

    /// Read the settings file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(s.locale, Locale::Ru);
        assert_eq!(s.server.bootstrap.username, "admin");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.toml");
        fs::write(&path, "locale = \"en\"\n[server]\nbind = \"0.0.0.0:9000\"\n").unwrap();
        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.locale, Locale::En);
        assert_eq!(s.server.bind, "0.0.0.0:9000");
        assert_eq!(s.request_timeout_secs, 15);
        assert_eq!(s.auth_url, "http://127.0.0.1:8080/auth");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("s.toml");
        let mut s = Settings::default();
        s.contacts_url = "https://example.org/contacts".into();
        s.save_to(&path).unwrap();
        let back = Settings::load_from(&path).unwrap();
        assert_eq!(back.contacts_url, "https://example.org/contacts");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "locale = [").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(SettingsError::Parse(_))));
    }
}
