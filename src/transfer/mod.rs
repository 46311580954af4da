//! # Transfer Components
//!
//! ## Transfer Client ([`client`])
//! Upload, download and delete on the SFTP file server, one scoped session
//! per call.
//!
//! ## Session ([`session`])
//! Capability contracts of the wire-level SFTP transport.

pub mod client;
pub mod session;

// Re-export for convenience
pub use client::TransferClient;
pub use session::{SessionConnector, TransferSession};
