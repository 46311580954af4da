//! # Transfer Client
//!
//! The [`TransferClient`] stages files on the SFTP server used by the signing
//! service. Each operation is one scoped session:
//!
//! 1. **Connect**: open a fresh session with the configured credentials
//! 2. **Operate**: perform exactly one upload, download or delete
//! 3. **Tear down**: close the session on every exit path, success or failure
//!
//! Sessions are never shared or pooled, so concurrent calls on one client
//! each open their own.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pos_digicert::transfer::TransferClient;
//!
//! let client = TransferClient::new(config.transfer, connector);
//!
//! let mut file = tokio::fs::File::open("contract.pdf").await?;
//! client.upload(&mut file, "/inbox/contract.pdf").await?;
//!
//! let mut signed = tokio::fs::File::create("contract-signed.pdf").await?;
//! client.download("/outbox/contract.pdf", &mut signed).await?;
//! ```

use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};

use super::session::{SessionConnector, TransferSession};
use crate::common::config::TransferConfig;
use crate::common::errors::{describe_failure, TransferAction, TransferError};

/// Session state for a single operation.
///
/// Lives on the stack of one upload/download/delete call and is torn down
/// before that call returns.
#[derive(Default)]
struct SessionScope {
    session: Option<Box<dyn TransferSession>>,
    connected: bool,
}

/// Client for the SFTP server that holds documents before and after signing.
///
/// # Fields
///
/// * `config` - Host, credentials and port of the file server
/// * `connector` - Factory used to open a session per operation
pub struct TransferClient {
    config: TransferConfig,
    connector: Arc<dyn SessionConnector>,
}

impl TransferClient {
    pub fn new(config: TransferConfig, connector: Arc<dyn SessionConnector>) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Uploads everything readable from `source` to `destination`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The file was written
    /// * `Err(TransferError)` - Connect or write failure, prefixed with
    ///   "Failed to upload file"
    pub async fn upload<R>(&self, source: &mut R, destination: &str) -> Result<bool, TransferError>
    where
        R: AsyncRead + Send + Unpin,
    {
        info!("📤 Uploading to {}:{}", self.config.host, destination);

        let mut scope = SessionScope::default();
        let outcome = self.upload_in(&mut scope, source, destination).await;
        self.finish(TransferAction::Upload, &mut scope, outcome).await
    }

    /// Downloads `source` from the server into `sink`.
    ///
    /// # Returns
    ///
    /// * `Ok(bytes)` - Number of bytes written into `sink`
    /// * `Err(TransferError)` - Connect or read failure, or "File not found"
    ///   when `source` does not exist (nothing is fetched in that case)
    pub async fn download<W>(&self, source: &str, sink: &mut W) -> Result<u64, TransferError>
    where
        W: AsyncWrite + Send + Unpin,
    {
        info!("📥 Downloading {}:{}", self.config.host, source);

        let mut scope = SessionScope::default();
        let outcome = self.download_in(&mut scope, source, sink).await;
        self.finish(TransferAction::Download, &mut scope, outcome).await
    }

    /// Deletes `remote_path` from the server.
    ///
    /// # Returns
    ///
    /// * `Ok(message)` - The server's confirmation
    /// * `Err(TransferError)` - Connect or delete failure, or "File not found"
    ///   when `remote_path` does not exist (nothing is deleted in that case)
    pub async fn delete(&self, remote_path: &str) -> Result<String, TransferError> {
        info!("🗑️ Deleting {}:{}", self.config.host, remote_path);

        let mut scope = SessionScope::default();
        let outcome = self.delete_in(&mut scope, remote_path).await;
        self.finish(TransferAction::Delete, &mut scope, outcome).await
    }

    async fn upload_in(
        &self,
        scope: &mut SessionScope,
        source: &mut (dyn AsyncRead + Send + Unpin),
        destination: &str,
    ) -> Result<bool, TransferError> {
        let session = self.ensure_connected(scope).await?;
        session
            .put(source, destination)
            .await
            .map_err(|e| TransferError::Session(describe_failure(&e)))?;
        Ok(true)
    }

    async fn download_in(
        &self,
        scope: &mut SessionScope,
        source: &str,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<u64, TransferError> {
        let session = self.ensure_connected(scope).await?;
        require_existing(&mut **session, source).await?;
        session
            .get(source, sink)
            .await
            .map_err(|e| TransferError::Session(describe_failure(&e)))
    }

    async fn delete_in(
        &self,
        scope: &mut SessionScope,
        remote_path: &str,
    ) -> Result<String, TransferError> {
        let session = self.ensure_connected(scope).await?;
        require_existing(&mut **session, remote_path).await?;
        session
            .delete(remote_path)
            .await
            .map_err(|e| TransferError::Session(describe_failure(&e)))
    }

    /// Opens a session for `scope` unless it already holds one.
    async fn ensure_connected<'s>(
        &self,
        scope: &'s mut SessionScope,
    ) -> Result<&'s mut Box<dyn TransferSession>, TransferError> {
        if !scope.connected || scope.session.is_none() {
            match self.connect().await {
                Ok(session) => {
                    scope.session = Some(session);
                    scope.connected = true;
                }
                Err(e) => {
                    scope.connected = false;
                    return Err(e);
                }
            }
        }

        match scope.session.as_mut() {
            Some(session) => Ok(session),
            None => Err(TransferError::Session("session is not open".to_string())),
        }
    }

    async fn connect(&self) -> Result<Box<dyn TransferSession>, TransferError> {
        match self.config.port {
            Some(port) => debug!("Connecting to SFTP server {}:{}", self.config.host, port),
            None => debug!("Connecting to SFTP server {}", self.config.host),
        }

        self.connector
            .connect(&self.config)
            .await
            .map_err(|e| TransferError::Connect(describe_failure(&e)))
    }

    /// Tears the session down and prefixes any failure with the operation.
    async fn finish<T>(
        &self,
        action: TransferAction,
        scope: &mut SessionScope,
        outcome: Result<T, TransferError>,
    ) -> Result<T, TransferError> {
        if outcome.is_err() {
            scope.connected = false;
        }

        self.teardown(scope).await;

        outcome.map_err(|e| {
            let err = TransferError::failed(action, e);
            error!("❌ {}", err);
            err
        })
    }

    /// Closes the session if one was opened. A close failure is logged and
    /// never replaces the operation's own result.
    async fn teardown(&self, scope: &mut SessionScope) {
        scope.connected = false;

        match scope.session.take() {
            Some(mut session) => match session.end().await {
                Ok(()) => debug!("🔌 Session to {} closed", self.config.host),
                Err(e) => warn!(
                    "Failed to close session to {}: {}",
                    self.config.host,
                    describe_failure(&e)
                ),
            },
            None => debug!("No open session to {} to close", self.config.host),
        }
    }
}

async fn require_existing(
    session: &mut dyn TransferSession,
    path: &str,
) -> Result<(), TransferError> {
    let exists = session
        .exists(path)
        .await
        .map_err(|e| TransferError::Session(describe_failure(&e)))?;

    if exists {
        Ok(())
    } else {
        Err(TransferError::NotFound(path.to_string()))
    }
}
