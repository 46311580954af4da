//! # Signing Operations
//!
//! The signing service exposes a fixed set of remote operations. Each
//! [`SigningOperation`] variant binds, at compile time:
//!
//! - the remote method name
//! - which identity parameters are mandatory
//! - whether a non-success status is raised or returned in the response
//! - the operation name used to prefix its errors
//!
//! This module also owns the two steps every operation shares before
//! dispatch: identity validation and building the outgoing parameter record.

use serde::Serialize;
use serde_json::{Map, Value};

use super::types::IdentityInput;
use crate::common::config::SigningConfig;
use crate::common::errors::{RemoteFailure, SigningError};

/// One of the identity parameters that may be defaulted from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityParam {
    UserId,
    OrgId,
    FileServerId,
}

impl IdentityParam {
    /// Declaration order, also the order missing parameters are reported in.
    pub const ALL: [IdentityParam; 3] = [
        IdentityParam::UserId,
        IdentityParam::OrgId,
        IdentityParam::FileServerId,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            IdentityParam::UserId => "userId",
            IdentityParam::OrgId => "orgId",
            IdentityParam::FileServerId => "fileServerId",
        }
    }

    pub fn human_name(self) -> &'static str {
        match self {
            IdentityParam::UserId => "User ID",
            IdentityParam::OrgId => "Organization ID",
            IdentityParam::FileServerId => "File Server ID",
        }
    }

    fn from_input(self, input: &dyn IdentityInput) -> Option<&str> {
        match self {
            IdentityParam::UserId => input.user_id(),
            IdentityParam::OrgId => input.org_id(),
            IdentityParam::FileServerId => input.file_server_id(),
        }
    }

    fn from_config(self, config: &SigningConfig) -> Option<&str> {
        match self {
            IdentityParam::UserId => config.user_id.as_deref(),
            IdentityParam::OrgId => config.organization_id.as_deref(),
            IdentityParam::FileServerId => config.file_server_id.as_deref(),
        }
    }
}

/// What to do when the service answers with a non-success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return [`SigningError::RemoteCall`].
    Raise,
    /// Hand the response, status included, back to the caller.
    ReturnInBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningOperation {
    VerifyRoamingCert,
    SignRoamingPdfConfigD,
    RequestBulkId,
    SignRoamingPdfConfigDBulk,
}

impl SigningOperation {
    pub fn method_name(self) -> &'static str {
        match self {
            SigningOperation::VerifyRoamingCert => "verifyRoamingCert",
            SigningOperation::SignRoamingPdfConfigD => "signRoamingPdfConfigD",
            SigningOperation::RequestBulkId => "requestBulkId",
            SigningOperation::SignRoamingPdfConfigDBulk => "signRoamingPdfConfigDBulk",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SigningOperation::VerifyRoamingCert => "Certificate verification",
            SigningOperation::SignRoamingPdfConfigD => "PDF signing (Individual)",
            SigningOperation::RequestBulkId => "Bulk ID request",
            SigningOperation::SignRoamingPdfConfigDBulk => "Bulk PDF signing",
        }
    }

    pub fn mandatory_params(self) -> &'static [IdentityParam] {
        match self {
            SigningOperation::VerifyRoamingCert | SigningOperation::RequestBulkId => {
                &[IdentityParam::UserId, IdentityParam::OrgId]
            }
            SigningOperation::SignRoamingPdfConfigD => &[
                IdentityParam::UserId,
                IdentityParam::OrgId,
                IdentityParam::FileServerId,
            ],
            SigningOperation::SignRoamingPdfConfigDBulk => &[IdentityParam::FileServerId],
        }
    }

    pub fn failure_policy(self) -> FailurePolicy {
        match self {
            SigningOperation::SignRoamingPdfConfigD => FailurePolicy::ReturnInBand,
            _ => FailurePolicy::Raise,
        }
    }

    /// Checks every mandatory identity parameter against input and defaults.
    ///
    /// An empty string counts as absent on both sides.
    ///
    /// # Errors
    ///
    /// [`SigningError::Validation`] naming every unsatisfied parameter.
    pub fn validate(
        self,
        input: &dyn IdentityInput,
        config: &SigningConfig,
    ) -> Result<(), SigningError> {
        let missing: Vec<&'static str> = self
            .mandatory_params()
            .iter()
            .filter(|param| {
                let provided = param
                    .from_input(input)
                    .filter(|value| !value.is_empty())
                    .or_else(|| param.from_config(config).filter(|value| !value.is_empty()));
                provided.is_none()
            })
            .map(|param| param.human_name())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SigningError::Validation { missing })
        }
    }

    /// Builds the outgoing parameter record for this operation.
    ///
    /// Starts from the serialized input, overlays each identity parameter as
    /// "input value, else config default", then overlays `pCode`.
    pub fn build_params<I>(
        self,
        input: &I,
        config: &SigningConfig,
    ) -> Result<Map<String, Value>, SigningError>
    where
        I: Serialize + IdentityInput,
    {
        let mut params = match serde_json::to_value(input) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(SigningError::remote(
                    self.label(),
                    RemoteFailure::InvalidRequest(format!("expected a record, got {}", other)),
                ))
            }
            Err(e) => {
                return Err(SigningError::remote(
                    self.label(),
                    RemoteFailure::InvalidRequest(e.to_string()),
                ))
            }
        };

        for param in IdentityParam::ALL {
            match param.from_input(input).or_else(|| param.from_config(config)) {
                Some(value) => {
                    params.insert(param.wire_name().to_string(), Value::from(value));
                }
                None => {
                    params.remove(param.wire_name());
                }
            }
        }

        params.insert(
            "pCode".to_string(),
            Value::from(config.project_code.as_str()),
        );

        Ok(params)
    }
}
