//! # File Transfer Session
//!
//! Capability contracts for the wire-level SFTP client. A session is opened
//! by a [`SessionConnector`] and used for exactly one file operation.

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::common::config::TransferConfig;

/// An open, authenticated session on the file server.
#[async_trait]
pub trait TransferSession: Send {
    async fn exists(&mut self, path: &str) -> Result<bool>;

    /// Streams `source` into the remote file at `destination`.
    async fn put(
        &mut self,
        source: &mut (dyn AsyncRead + Send + Unpin),
        destination: &str,
    ) -> Result<()>;

    /// Streams the remote file at `path` into `sink`, returning the byte count.
    async fn get(&mut self, path: &str, sink: &mut (dyn AsyncWrite + Send + Unpin)) -> Result<u64>;

    /// Removes the remote file, returning the server's confirmation message.
    async fn delete(&mut self, path: &str) -> Result<String>;

    /// Closes the session.
    async fn end(&mut self) -> Result<()>;
}

/// Opens sessions against the file server described by a [`TransferConfig`].
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn connect(&self, config: &TransferConfig) -> Result<Box<dyn TransferSession>>;
}
