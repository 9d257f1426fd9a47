//! Runtime configuration.
//!
//! - The database connection string comes from the platform secrets store
//!   (GNOME Keyring/`KWallet`, macOS Keychain, Windows Credential Manager),
//!   falling back to `PHONEBOOK_DATABASE_URL` and then to a file in the
//!   user's data directory.
//! - Mail transport credentials come from a local JSON file.
//! - The seed file path comes from `PHONEBOOK_SEED_FILE`.

use std::path::{Path, PathBuf};

use keyring::Entry;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Service name used for secrets store entries.
const SERVICE_NAME: &str = "phonebook";

/// Secrets store entry holding the database connection string.
const DATABASE_URL_ENTRY: &str = "database_url";

/// Environment variable overriding the database connection string.
pub const DATABASE_URL_ENV: &str = "PHONEBOOK_DATABASE_URL";

/// Environment variable overriding the seed file path.
pub const SEED_FILE_ENV: &str = "PHONEBOOK_SEED_FILE";

/// Environment variable overriding the credentials file path.
pub const SECRETS_FILE_ENV: &str = "PHONEBOOK_SECRETS_FILE";

/// Default seed file, relative to the working directory.
pub const DEFAULT_SEED_FILE: &str = "resources/default_data.json";

/// Default credentials file, relative to the working directory.
pub const DEFAULT_SECRETS_FILE: &str = "secrets.json";

/// Where the application finds its store, seed data and mail credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `sqlite:` connection string.
    pub database_url: String,
    /// Seed file used when the store is empty.
    pub seed_file: PathBuf,
    /// Mail credentials file.
    pub secrets_file: PathBuf,
    /// Whether the store is seeded at startup.
    pub auto_seed: bool,
}

impl AppConfig {
    /// Resolve configuration from the secrets store and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no database location can be determined.
    pub fn from_env() -> Result<Self> {
        let database_url = resolve_database_url(
            database_url_from_keyring(),
            std::env::var(DATABASE_URL_ENV).ok(),
            dirs::data_dir(),
        )?;

        Ok(Self {
            database_url,
            seed_file: env_path(SEED_FILE_ENV, DEFAULT_SEED_FILE),
            secrets_file: env_path(SECRETS_FILE_ENV, DEFAULT_SECRETS_FILE),
            auto_seed: true,
        })
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var).map_or_else(|| PathBuf::from(default), PathBuf::from)
}

/// Reads the connection string from the secrets store.
///
/// A missing entry or an unavailable secrets service both yield `None`.
fn database_url_from_keyring() -> Option<String> {
    let entry = match Entry::new(SERVICE_NAME, DATABASE_URL_ENTRY) {
        Ok(entry) => entry,
        Err(e) => {
            debug!("Secrets store unavailable: {e}");
            return None;
        }
    };

    match entry.get_password() {
        Ok(url) => Some(url),
        Err(keyring::Error::NoEntry) => {
            debug!("No database URL in secrets store");
            None
        }
        Err(e) => {
            debug!("Failed to read database URL from secrets store: {e}");
            None
        }
    }
}

/// Picks the connection string: secrets store, then environment, then the
/// default file under `data_dir`.
///
/// # Errors
///
/// Returns [`Error::Config`] if every source is empty or missing.
pub fn resolve_database_url(
    secret: Option<String>,
    env: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<String> {
    if let Some(url) = secret.filter(|u| !u.trim().is_empty()) {
        return Ok(url);
    }
    if let Some(url) = env.filter(|u| !u.trim().is_empty()) {
        return Ok(url);
    }

    let dir = data_dir
        .ok_or_else(|| Error::Config("no data directory for the phonebook store".into()))?
        .join("phonebook");
    std::fs::create_dir_all(&dir)?;
    Ok(format!("sqlite:{}", dir.join("phonebook.db").display()))
}

/// Security/encryption mode for the mail connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Security {
    /// No encryption (not recommended).
    None,
    /// Implicit TLS (connect directly with TLS).
    Tls,
    /// STARTTLS upgrade after plaintext connect.
    StartTls,
}

impl Security {
    /// Mode implied by a port when none is configured.
    #[must_use]
    pub const fn for_port(port: u16) -> Self {
        match port {
            465 => Self::Tls,
            _ => Self::StartTls,
        }
    }
}

/// Mail transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SmtpCredentials {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
    /// Sender address.
    pub from: String,
    /// Security mode; derived from the port when absent.
    #[serde(default)]
    pub security: Option<Security>,
}

/// Layout of the credentials file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SecretsFile {
    smtp: SmtpCredentials,
}

impl SmtpCredentials {
    /// Load the `Smtp` section of a credentials file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// required value is empty.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse the `Smtp` section of credentials JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a required value is empty.
    pub fn parse(json: &str) -> Result<Self> {
        let file: SecretsFile = serde_json::from_str(json)?;
        let credentials = file.smtp;

        if credentials.host.trim().is_empty() {
            return Err(Error::Config("SMTP host is required".into()));
        }
        if credentials.port == 0 {
            return Err(Error::Config("SMTP port must be 1-65535".into()));
        }
        if credentials.from.trim().is_empty() {
            return Err(Error::Config("SMTP sender address is required".into()));
        }

        Ok(credentials)
    }

    /// Effective security mode.
    #[must_use]
    pub fn security(&self) -> Security {
        self.security.unwrap_or_else(|| Security::for_port(self.port))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SECRETS: &str = r#"{
        "Smtp": {
            "Host": "smtp.example.com",
            "Port": 587,
            "Username": "ana",
            "Password": "secret",
            "From": "ana@example.com"
        }
    }"#;

    #[test]
    fn test_parse_credentials() {
        let credentials = SmtpCredentials::parse(SECRETS).unwrap();
        assert_eq!(credentials.host, "smtp.example.com");
        assert_eq!(credentials.port, 587);
        assert_eq!(credentials.from, "ana@example.com");
        assert_eq!(credentials.security(), Security::StartTls);
    }

    #[test]
    fn test_security_from_port_and_override() {
        let json = SECRETS.replace("587", "465");
        assert_eq!(SmtpCredentials::parse(&json).unwrap().security(), Security::Tls);

        let json = SECRETS.replace(r#""Port": 587,"#, r#""Port": 25, "Security": "None","#);
        assert_eq!(SmtpCredentials::parse(&json).unwrap().security(), Security::None);
    }

    #[test]
    fn test_parse_rejects_missing_section_and_empty_host() {
        assert!(SmtpCredentials::parse("{}").is_err());
        let json = SECRETS.replace("smtp.example.com", "");
        assert!(matches!(SmtpCredentials::parse(&json), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        std::fs::write(&path, SECRETS).unwrap();

        assert_eq!(SmtpCredentials::load(&path).unwrap().username, "ana");
        assert!(SmtpCredentials::load(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_resolve_database_url_precedence() {
        let dir = tempfile::tempdir().unwrap();

        let url = resolve_database_url(
            Some("sqlite:/secret.db".into()),
            Some("sqlite:/env.db".into()),
            Some(dir.path().to_path_buf()),
        )
        .unwrap();
        assert_eq!(url, "sqlite:/secret.db");

        let url = resolve_database_url(
            Some(String::new()),
            Some("sqlite:/env.db".into()),
            Some(dir.path().to_path_buf()),
        )
        .unwrap();
        assert_eq!(url, "sqlite:/env.db");

        let url = resolve_database_url(None, None, Some(dir.path().to_path_buf())).unwrap();
        assert!(url.starts_with("sqlite:"));
        assert!(url.ends_with("phonebook.db"));
        assert!(dir.path().join("phonebook").is_dir());

        assert!(resolve_database_url(None, None, None).is_err());
    }
}
