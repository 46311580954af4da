//! # Remote Procedure Connection
//!
//! Capability contracts for the wire-level RPC client. The signing client
//! never speaks the protocol itself: it asks an [`RpcConnector`] for a
//! connection once, then invokes named operations on it with a JSON record of
//! parameters.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// An established connection to the signing service.
#[async_trait]
pub trait RpcConnection: Send + Sync {
    /// Points every subsequent call at `endpoint_url`, overriding whatever
    /// endpoint was discovered while connecting.
    fn set_endpoint(&mut self, endpoint_url: &str);

    /// Invokes the remote operation `method` and returns its raw result record.
    async fn call(&self, method: &str, params: Value) -> Result<Value>;
}

/// Creates connections to the signing service.
#[async_trait]
pub trait RpcConnector: Send + Sync {
    async fn connect(&self, endpoint_url: &str) -> Result<Box<dyn RpcConnection>>;
}
