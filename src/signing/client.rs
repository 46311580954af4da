//! # Signing Client
//!
//! The [`SigningClient`] drives the four remote signing operations. Every
//! operation follows the same workflow:
//!
//! 1. **Ensure connection**: create the RPC connection on first use and
//!    cache it for the lifetime of the client
//! 2. **Validate**: check the operation's mandatory identity parameters
//!    against the call input and the configured defaults
//! 3. **Build parameters**: serialize the input, overlay identity defaults
//!    and the project code
//! 4. **Dispatch and normalize**: call the remote operation, attach the
//!    status message, and apply the operation's failure policy
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pos_digicert::signing::{SigningClient, VerifyCertInput};
//!
//! let client = SigningClient::new(config.signing, connector);
//!
//! let response = client
//!     .verify_roaming_cert(&VerifyCertInput {
//!         user_id: Some("880101-14-5566".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("certificate: {}", response.certificate);
//! ```

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::connection::{RpcConnection, RpcConnector};
use super::operation::{FailurePolicy, SigningOperation};
use super::types::{
    IdentityInput, RequestBulkIdResponse, RequestBulkInput, SignRoamingPdfConfigDBulkInput,
    SignRoamingPdfConfigDBulkResponse, SignRoamingPdfConfigDInput,
    SignRoamingPdfConfigDResponse, SigningResponse, VerifyCertInput, VerifyRoamingCertResponse,
};
use crate::common::config::SigningConfig;
use crate::common::errors::{describe_failure, RemoteFailure, SigningError};
use crate::common::status::{is_success_code, status_message};

/// Client for the remote roaming-certificate signing service.
///
/// Cheap to share behind an `Arc`: all operations take `&self`, and the
/// underlying connection is created at most once even when several calls
/// race on a fresh client.
///
/// # Fields
///
/// * `config` - Endpoint, project code and identity defaults
/// * `connector` - Factory used to create the RPC connection
/// * `connection` - The cached connection, empty until first use
pub struct SigningClient {
    config: SigningConfig,
    connector: Arc<dyn RpcConnector>,
    connection: OnceCell<Arc<dyn RpcConnection>>,
}

impl SigningClient {
    /// Creates a new `SigningClient`. No connection is made until the first
    /// operation is called.
    ///
    /// # Arguments
    ///
    /// * `config` - Signing service settings and identity defaults
    /// * `connector` - Factory for the wire-level RPC connection
    pub fn new(config: SigningConfig, connector: Arc<dyn RpcConnector>) -> Self {
        Self {
            config,
            connector,
            connection: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &SigningConfig {
        &self.config
    }

    /// True once the RPC connection has been established.
    pub fn is_connected(&self) -> bool {
        self.connection.initialized()
    }

    /// Verifies that the user holds a valid roaming certificate.
    ///
    /// Requires a user ID and an organization ID, from `input` or config.
    ///
    /// # Errors
    ///
    /// * [`SigningError::Validation`] - user or organization ID missing
    /// * [`SigningError::Connection`] - the service could not be reached
    /// * [`SigningError::RemoteCall`] - transport failure, malformed response,
    ///   or any non-success status
    pub async fn verify_roaming_cert(
        &self,
        input: &VerifyCertInput,
    ) -> Result<VerifyRoamingCertResponse, SigningError> {
        self.execute(SigningOperation::VerifyRoamingCert, input).await
    }

    /// Requests an individual PDF signature with the user's roaming certificate.
    ///
    /// Requires user, organization and file server IDs.
    ///
    /// Unlike the other operations, a non-success status is **not** an error
    /// here: the response is returned with its `status_code` and mapped
    /// `status_message` so the caller can inspect it.
    ///
    /// # Errors
    ///
    /// * [`SigningError::Validation`] - an identity parameter is missing
    /// * [`SigningError::Connection`] - the service could not be reached
    /// * [`SigningError::RemoteCall`] - transport failure or malformed response
    pub async fn sign_roaming_pdf_config_d(
        &self,
        input: &SignRoamingPdfConfigDInput,
    ) -> Result<SignRoamingPdfConfigDResponse, SigningError> {
        self.execute(SigningOperation::SignRoamingPdfConfigD, input).await
    }

    /// Opens a bulk signing session and returns its id.
    ///
    /// # Errors
    ///
    /// Same as [`SigningClient::verify_roaming_cert`].
    pub async fn request_bulk_id(
        &self,
        input: &RequestBulkInput,
    ) -> Result<RequestBulkIdResponse, SigningError> {
        self.execute(SigningOperation::RequestBulkId, input).await
    }

    /// Signs one PDF inside a bulk session obtained from
    /// [`SigningClient::request_bulk_id`].
    ///
    /// Only the file server ID is mandatory.
    pub async fn sign_roaming_pdf_config_d_bulk(
        &self,
        input: &SignRoamingPdfConfigDBulkInput,
    ) -> Result<SignRoamingPdfConfigDBulkResponse, SigningError> {
        self.execute(SigningOperation::SignRoamingPdfConfigDBulk, input)
            .await
    }

    async fn execute<I, R>(&self, operation: SigningOperation, input: &I) -> Result<R, SigningError>
    where
        I: Serialize + IdentityInput + Sync,
        R: SigningResponse,
    {
        let connection = self.ensure_connection().await?;

        operation.validate(input, &self.config)?;
        let params = Value::Object(operation.build_params(input, &self.config)?);

        debug!(
            "{} -> {} params: {}",
            operation.label(),
            operation.method_name(),
            params
        );

        let raw = connection
            .call(operation.method_name(), params)
            .await
            .map_err(|e| {
                SigningError::remote(
                    operation.label(),
                    RemoteFailure::Transport(describe_failure(&e)),
                )
            })?;

        debug!("{} <- {} result: {}", operation.label(), operation.method_name(), raw);

        self.normalize_response(operation, raw)
    }

    /// Decodes the raw result, attaches the status message and applies the
    /// operation's failure policy.
    fn normalize_response<R>(&self, operation: SigningOperation, raw: Value) -> Result<R, SigningError>
    where
        R: SigningResponse,
    {
        let mut response: R = serde_json::from_value(raw).map_err(|e| {
            SigningError::remote(
                operation.label(),
                RemoteFailure::MalformedResponse(e.to_string()),
            )
        })?;

        let code = response.status_code().to_string();
        let message = status_message(&code);
        response.set_status_message(message);

        if is_success_code(&code) {
            info!("✅ {} succeeded", operation.label());
            return Ok(response);
        }

        match operation.failure_policy() {
            FailurePolicy::Raise => {
                warn!("❌ {} failed: {} (Code: {})", operation.label(), message, code);
                Err(SigningError::remote(
                    operation.label(),
                    RemoteFailure::Status {
                        code,
                        message: message.to_string(),
                    },
                ))
            }
            FailurePolicy::ReturnInBand => {
                warn!(
                    "{} returned status {} ({}) to caller",
                    operation.label(),
                    code,
                    message
                );
                Ok(response)
            }
        }
    }

    /// Returns the cached connection, creating it on first use.
    ///
    /// Concurrent first callers all wait on the same creation; a failed
    /// creation leaves the slot empty so a later call tries again.
    async fn ensure_connection(&self) -> Result<Arc<dyn RpcConnection>, SigningError> {
        let connection = self
            .connection
            .get_or_try_init(|| async {
                let endpoint_url = self.config.endpoint_url.as_str();
                info!("Connecting to signing service at {}", endpoint_url);

                let mut connection = self
                    .connector
                    .connect(endpoint_url)
                    .await
                    .map_err(|e| SigningError::Connection(describe_failure(&e)))?;

                // Discovered endpoints may point at plain http.
                connection.set_endpoint(endpoint_url);

                let connection: Arc<dyn RpcConnection> = Arc::from(connection);
                Ok::<_, SigningError>(connection)
            })
            .await?;

        Ok(Arc::clone(connection))
    }
}
