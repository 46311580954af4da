//! # Signing Components
//!
//! ## Signing Client ([`client`])
//! Orchestrates the four remote signing operations: lazy connection, identity
//! validation, parameter building, dispatch and status normalization.
//!
//! ## Operations ([`operation`])
//! The closed table of remote operations with their mandatory parameters and
//! failure policies.
//!
//! ## Records ([`types`]) and Connection ([`connection`])
//! Typed inputs/responses and the capability contracts of the RPC transport.

pub mod client;
pub mod connection;
pub mod operation;
pub mod types;

// Re-export for convenience
pub use client::SigningClient;
pub use connection::{RpcConnection, RpcConnector};
pub use operation::{FailurePolicy, IdentityParam, SigningOperation};
pub use types::{
    IdentityInput, RequestBulkIdResponse, RequestBulkInput, SignRoamingPdfConfigDBulkInput,
    SignRoamingPdfConfigDBulkResponse, SignRoamingPdfConfigDInput,
    SignRoamingPdfConfigDResponse, SigningResponse, VerifyCertInput, VerifyRoamingCertResponse,
};
