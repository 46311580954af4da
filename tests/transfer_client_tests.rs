//! Transfer client behavior against an in-memory file server.

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use pos_digicert::transfer::{SessionConnector, TransferClient, TransferSession};
use pos_digicert::{TransferConfig, TransferErrorKind};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

//===============
// Test Helpers
//===============

/// In-memory file server with counters and failure switches.
#[derive(Default)]
struct FileServer {
    files: Mutex<HashMap<String, Vec<u8>>>,
    connects: AtomicUsize,
    ends: AtomicUsize,
    gets: AtomicUsize,
    deletes: AtomicUsize,
    fail_connect: AtomicBool,
    fail_put: AtomicBool,
    fail_end: AtomicBool,
    last_port: Mutex<Option<u16>>,
}

impl FileServer {
    fn with_file(path: &str, content: &[u8]) -> Self {
        let server = FileServer::default();
        server
            .files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_vec());
        server
    }

    fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

struct MemorySession {
    server: Arc<FileServer>,
}

#[async_trait]
impl TransferSession for MemorySession {
    async fn exists(&mut self, path: &str) -> anyhow::Result<bool> {
        Ok(self.server.files.lock().unwrap().contains_key(path))
    }

    async fn put(
        &mut self,
        source: &mut (dyn AsyncRead + Send + Unpin),
        destination: &str,
    ) -> anyhow::Result<()> {
        if self.server.fail_put.load(Ordering::SeqCst) {
            bail!("Permission denied");
        }
        let mut content = Vec::new();
        source.read_to_end(&mut content).await?;
        self.server
            .files
            .lock()
            .unwrap()
            .insert(destination.to_string(), content);
        Ok(())
    }

    async fn get(
        &mut self,
        path: &str,
        sink: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> anyhow::Result<u64> {
        self.server.gets.fetch_add(1, Ordering::SeqCst);
        let content = self
            .server
            .file(path)
            .ok_or_else(|| anyhow!("No such file: {}", path))?;
        sink.write_all(&content).await?;
        Ok(content.len() as u64)
    }

    async fn delete(&mut self, path: &str) -> anyhow::Result<String> {
        self.server.deletes.fetch_add(1, Ordering::SeqCst);
        self.server.files.lock().unwrap().remove(path);
        Ok(format!("Successfully deleted {}", path))
    }

    async fn end(&mut self) -> anyhow::Result<()> {
        self.server.ends.fetch_add(1, Ordering::SeqCst);
        if self.server.fail_end.load(Ordering::SeqCst) {
            bail!("connection reset while closing");
        }
        Ok(())
    }
}

struct MemoryConnector {
    server: Arc<FileServer>,
}

#[async_trait]
impl SessionConnector for MemoryConnector {
    async fn connect(&self, config: &TransferConfig) -> anyhow::Result<Box<dyn TransferSession>> {
        self.server.connects.fetch_add(1, Ordering::SeqCst);
        *self.server.last_port.lock().unwrap() = config.port;
        if self.server.fail_connect.load(Ordering::SeqCst) {
            bail!("All configured authentication methods failed");
        }
        Ok(Box::new(MemorySession {
            server: Arc::clone(&self.server),
        }))
    }
}

fn create_client(server: FileServer) -> (TransferClient, Arc<FileServer>) {
    let server = Arc::new(server);
    let config = TransferConfig::new("files.example.com", "signer", "secret").with_port(2222);
    let connector = Arc::new(MemoryConnector {
        server: Arc::clone(&server),
    });
    (TransferClient::new(config, connector), server)
}

//===============
// Upload
//===============

#[tokio::test]
async fn test_upload_writes_file_and_closes_session() {
    let (client, server) = create_client(FileServer::default());

    let mut source: &[u8] = b"%PDF-1.7 contract";
    let uploaded = client.upload(&mut source, "/inbox/contract.pdf").await.unwrap();

    assert!(uploaded);
    assert_eq!(server.file("/inbox/contract.pdf").unwrap(), b"%PDF-1.7 contract");
    assert_eq!(FileServer::count(&server.connects), 1);
    assert_eq!(FileServer::count(&server.ends), 1);
    assert_eq!(*server.last_port.lock().unwrap(), Some(2222));
}

#[tokio::test]
async fn test_failed_put_closes_session_and_next_call_reconnects() {
    let (client, server) = create_client(FileServer::default());
    server.fail_put.store(true, Ordering::SeqCst);

    let mut source: &[u8] = b"first";
    let err = client.upload(&mut source, "/inbox/a.pdf").await.unwrap_err();

    assert_eq!(err.kind(), TransferErrorKind::Session);
    assert_eq!(err.to_string(), "Failed to upload file: Permission denied");
    assert_eq!(FileServer::count(&server.ends), 1);

    server.fail_put.store(false, Ordering::SeqCst);
    let mut source: &[u8] = b"second";
    assert!(client.upload(&mut source, "/inbox/a.pdf").await.unwrap());

    assert_eq!(FileServer::count(&server.connects), 2);
    assert_eq!(FileServer::count(&server.ends), 2);
    assert_eq!(server.file("/inbox/a.pdf").unwrap(), b"second");
}

#[tokio::test]
async fn test_connect_failure_is_wrapped_and_nothing_to_close() {
    let (client, server) = create_client(FileServer::default());
    server.fail_connect.store(true, Ordering::SeqCst);

    let mut source: &[u8] = b"data";
    let err = client.upload(&mut source, "/inbox/a.pdf").await.unwrap_err();

    assert_eq!(err.kind(), TransferErrorKind::Connect);
    assert_eq!(
        err.to_string(),
        "Failed to upload file: Failed to connect to SFTP server: All configured authentication methods failed"
    );
    assert_eq!(FileServer::count(&server.ends), 0);
    assert!(server.file("/inbox/a.pdf").is_none());
}

#[tokio::test]
async fn test_close_failure_does_not_mask_success() {
    let (client, server) = create_client(FileServer::default());
    server.fail_end.store(true, Ordering::SeqCst);

    let mut source: &[u8] = b"data";
    assert!(client.upload(&mut source, "/inbox/a.pdf").await.unwrap());
    assert_eq!(FileServer::count(&server.ends), 1);
}

#[tokio::test]
async fn test_concurrent_operations_use_independent_sessions() {
    let (client, server) = create_client(FileServer::default());

    let mut first: &[u8] = b"one";
    let mut second: &[u8] = b"two";
    let (a, b) = tokio::join!(
        client.upload(&mut first, "/inbox/one.pdf"),
        client.upload(&mut second, "/inbox/two.pdf"),
    );

    assert!(a.unwrap() && b.unwrap());
    assert_eq!(FileServer::count(&server.connects), 2);
    assert_eq!(FileServer::count(&server.ends), 2);
}

//===============
// Download
//===============

#[tokio::test]
async fn test_download_streams_into_sink() {
    let (client, server) = create_client(FileServer::with_file("/outbox/signed.pdf", b"%PDF signed"));

    let mut sink = Vec::new();
    let written = client.download("/outbox/signed.pdf", &mut sink).await.unwrap();

    assert_eq!(written, 11);
    assert_eq!(sink, b"%PDF signed");
    assert_eq!(FileServer::count(&server.ends), 1);
}

#[tokio::test]
async fn test_download_missing_file_is_not_found() {
    let (client, server) = create_client(FileServer::default());

    let mut sink = Vec::new();
    let err = client
        .download("/outbox/missing.pdf", &mut sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), TransferErrorKind::NotFound);
    assert!(err.to_string().contains("File not found"));
    assert!(err.to_string().contains("/outbox/missing.pdf"));
    assert_eq!(FileServer::count(&server.gets), 0);
    assert_eq!(FileServer::count(&server.ends), 1);
    assert!(sink.is_empty());
}

//===============
// Delete
//===============

#[tokio::test]
async fn test_delete_removes_existing_file() {
    let (client, server) = create_client(FileServer::with_file("/inbox/a.pdf", b"x"));

    let message = client.delete("/inbox/a.pdf").await.unwrap();

    assert_eq!(message, "Successfully deleted /inbox/a.pdf");
    assert!(server.file("/inbox/a.pdf").is_none());
    assert_eq!(FileServer::count(&server.ends), 1);
}

#[tokio::test]
async fn test_delete_missing_file_is_not_found() {
    let (client, server) = create_client(FileServer::default());

    let err = client.delete("/inbox/ghost.pdf").await.unwrap_err();

    assert_eq!(err.kind(), TransferErrorKind::NotFound);
    assert_eq!(
        err.to_string(),
        "Failed to delete file: File not found: /inbox/ghost.pdf"
    );
    assert_eq!(FileServer::count(&server.deletes), 0);
    assert_eq!(FileServer::count(&server.ends), 1);
}
