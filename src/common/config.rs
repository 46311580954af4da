//! # Configuration Utilities
//!
//! Configuration records for the signing and transfer clients, plus the
//! TOML loading helpers shared by both.
//!
//! ## Example TOML
//!
//! ```toml
//! [signing]
//! endpoint_url = "https://sign.example.com/ws?wsdl"
//! project_code = "PRJ01"
//! organization_id = "ORG-1"
//!
//! [transfer]
//! host = "files.example.com"
//! username = "signer"
//! password = "secret"
//! port = 22
//! ```

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: SigningConfig = load_config("config/signing.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Settings for the signing service connection.
///
/// The optional identity fields act as defaults: any call that omits
/// `userId`, `orgId` or `fileServerId` falls back to the value stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Service description URL; also the endpoint every call is sent to
    pub endpoint_url: String,
    /// Project code sent as `pCode` on every call
    pub project_code: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub file_server_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl SigningConfig {
    pub fn new(endpoint_url: impl Into<String>, project_code: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            project_code: project_code.into(),
            organization_id: None,
            file_server_id: None,
            user_id: None,
        }
    }

    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_file_server_id(mut self, file_server_id: impl Into<String>) -> Self {
        self.file_server_id = Some(file_server_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Credentials for the SFTP file server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Server port; the session factory picks its own default when absent
    #[serde(default)]
    pub port: Option<u16>,
}

impl TransferConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            port: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

impl fmt::Debug for TransferConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .finish()
    }
}

/// Complete configuration for both clients, as read from one TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub signing: SigningConfig,
    pub transfer: TransferConfig,
}

impl ClientConfig {
    /// Loads and validates the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails [`ClientConfig::validate`].
    pub fn from_file(path: &str) -> Result<Self> {
        let config: ClientConfig = load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that could never produce a working client.
    pub fn validate(&self) -> Result<()> {
        if self.signing.endpoint_url.trim().is_empty() {
            bail!("signing.endpoint_url must not be empty");
        }
        if self.signing.project_code.trim().is_empty() {
            bail!("signing.project_code must not be empty");
        }
        if self.transfer.host.trim().is_empty() {
            bail!("transfer.host must not be empty");
        }
        if self.transfer.username.trim().is_empty() {
            bail!("transfer.username must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
            [signing]
            endpoint_url = "https://sign.example.com/ws?wsdl"
            project_code = "PRJ01"
            organization_id = "ORG-1"

            [transfer]
            host = "files.example.com"
            username = "signer"
            password = "secret"
            port = 2222
            "#,
        );

        let config = ClientConfig::from_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.signing.project_code, "PRJ01");
        assert_eq!(config.signing.organization_id.as_deref(), Some("ORG-1"));
        assert_eq!(config.signing.user_id, None);
        assert_eq!(config.signing.file_server_id, None);
        assert_eq!(config.transfer.port, Some(2222));
    }

    #[test]
    fn test_rejects_empty_project_code() {
        let file = write_config(
            r#"
            [signing]
            endpoint_url = "https://sign.example.com/ws?wsdl"
            project_code = " "

            [transfer]
            host = "files.example.com"
            username = "signer"
            password = "secret"
            "#,
        );

        let err = ClientConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("project_code"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ClientConfig::from_file("/nonexistent/pos-digicert.toml").is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = TransferConfig::new("files.example.com", "signer", "hunter2");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
