//! # Signing Service Status Codes
//!
//! The signing service answers every call with a string status code. Exactly
//! one code means success; every other code is a failure from a fixed set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message used when the service answers with a code outside the table.
pub const UNKNOWN_STATUS_MESSAGE: &str = "Unknown status code";

/// Failure family a status code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCategory {
    Success,
    Validation,
    Internal,
    FileServer,
    SigningPage,
    Qr,
    BulkSession,
    Roaming,
    Certificate,
    UserOrOrganization,
    Block,
}

/// Every status code the signing service is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningStatus {
    Success,
    InvalidParameter,
    InternalServerError,
    FileServerAccessError,
    InvalidSigningPage,
    InvalidQrValue,
    QrTransactionError,
    FileLocked,
    RoamingOperationFailed,
    UserNotFound,
    CertificateRevoked,
    CertificateNotFound,
    OrganizationNotFound,
    CertificateExpired,
    InvalidBulkSession,
    UserBlocked,
}

impl SigningStatus {
    pub const ALL: [SigningStatus; 16] = [
        SigningStatus::Success,
        SigningStatus::InvalidParameter,
        SigningStatus::InternalServerError,
        SigningStatus::FileServerAccessError,
        SigningStatus::InvalidSigningPage,
        SigningStatus::InvalidQrValue,
        SigningStatus::QrTransactionError,
        SigningStatus::FileLocked,
        SigningStatus::RoamingOperationFailed,
        SigningStatus::UserNotFound,
        SigningStatus::CertificateRevoked,
        SigningStatus::CertificateNotFound,
        SigningStatus::OrganizationNotFound,
        SigningStatus::CertificateExpired,
        SigningStatus::InvalidBulkSession,
        SigningStatus::UserBlocked,
    ];

    /// Wire representation of the status.
    pub fn code(self) -> &'static str {
        match self {
            SigningStatus::Success => "901",
            SigningStatus::InvalidParameter => "902",
            SigningStatus::InternalServerError => "903",
            SigningStatus::FileServerAccessError => "904",
            SigningStatus::InvalidSigningPage => "905",
            SigningStatus::InvalidQrValue => "906",
            SigningStatus::QrTransactionError => "907",
            SigningStatus::FileLocked => "908",
            SigningStatus::RoamingOperationFailed => "800",
            SigningStatus::UserNotFound => "805",
            SigningStatus::CertificateRevoked => "808",
            SigningStatus::CertificateNotFound => "809",
            SigningStatus::OrganizationNotFound => "810",
            SigningStatus::CertificateExpired => "811",
            SigningStatus::InvalidBulkSession => "703",
            SigningStatus::UserBlocked => "802",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SigningStatus::Success => "Operation completed successfully",
            SigningStatus::InvalidParameter => "Invalid parameters provided",
            SigningStatus::InternalServerError => "Internal server error occurred",
            SigningStatus::FileServerAccessError => "Unable to access file server",
            SigningStatus::InvalidSigningPage => "Invalid signing page specified",
            SigningStatus::InvalidQrValue => "Invalid QR code value",
            SigningStatus::QrTransactionError => "Error processing QR transaction",
            SigningStatus::FileLocked => "File is currently locked",
            SigningStatus::RoamingOperationFailed => "Roaming operation failed",
            SigningStatus::UserNotFound => "User not found in the system",
            SigningStatus::CertificateRevoked => "Certificate has been revoked",
            SigningStatus::CertificateNotFound => "Certificate not found",
            SigningStatus::OrganizationNotFound => "Organization ID does not exist",
            SigningStatus::CertificateExpired => "Certificate has expired",
            SigningStatus::InvalidBulkSession => "Invalid bulk ID session",
            SigningStatus::UserBlocked => "User is blocked",
        }
    }

    pub fn category(self) -> StatusCategory {
        match self {
            SigningStatus::Success => StatusCategory::Success,
            SigningStatus::InvalidParameter => StatusCategory::Validation,
            SigningStatus::InternalServerError => StatusCategory::Internal,
            SigningStatus::FileServerAccessError | SigningStatus::FileLocked => {
                StatusCategory::FileServer
            }
            SigningStatus::InvalidSigningPage => StatusCategory::SigningPage,
            SigningStatus::InvalidQrValue | SigningStatus::QrTransactionError => {
                StatusCategory::Qr
            }
            SigningStatus::RoamingOperationFailed => StatusCategory::Roaming,
            SigningStatus::UserNotFound | SigningStatus::OrganizationNotFound => {
                StatusCategory::UserOrOrganization
            }
            SigningStatus::CertificateRevoked
            | SigningStatus::CertificateNotFound
            | SigningStatus::CertificateExpired => StatusCategory::Certificate,
            SigningStatus::InvalidBulkSession => StatusCategory::BulkSession,
            SigningStatus::UserBlocked => StatusCategory::Block,
        }
    }

    pub fn is_success(self) -> bool {
        self == SigningStatus::Success
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.code() == code)
    }
}

impl fmt::Display for SigningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

/// Human-readable message for a raw wire code.
pub fn status_message(code: &str) -> &'static str {
    SigningStatus::from_code(code)
        .map(SigningStatus::message)
        .unwrap_or(UNKNOWN_STATUS_MESSAGE)
}

/// True only for the single success code.
pub fn is_success_code(code: &str) -> bool {
    code == SigningStatus::Success.code()
}
