//! # pos-digicert
//!
//! Client library for signing PDF documents through a remote
//! roaming-certificate signing service, and for staging the documents on the
//! SFTP server that service reads from and writes to.
//!
//! ## Components
//!
//! - [`signing::SigningClient`]: the four signing operations over a lazily
//!   created, reused RPC connection
//! - [`transfer::TransferClient`]: upload, download and delete, one scoped
//!   session per call
//! - [`common`]: configuration, error taxonomy, status codes and logging
//!
//! The wire protocols themselves are supplied by the application through the
//! [`signing::RpcConnector`] and [`transfer::SessionConnector`] traits.

pub mod common;
pub mod signing;
pub mod transfer;

pub use common::config::{ClientConfig, SigningConfig, TransferConfig};
pub use common::errors::{RemoteFailure, SigningError, TransferError, TransferErrorKind};
pub use common::status::SigningStatus;
pub use signing::SigningClient;
pub use transfer::TransferClient;
