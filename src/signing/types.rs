//! # Signing Operation Records
//!
//! Inputs and responses of the four signing operations. Field names follow
//! the service's camelCase wire format; absent optional inputs are left out
//! of the outgoing record entirely.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identity fields a caller may supply to override the client defaults.
pub trait IdentityInput {
    fn user_id(&self) -> Option<&str> {
        None
    }

    fn org_id(&self) -> Option<&str> {
        None
    }

    fn file_server_id(&self) -> Option<&str> {
        None
    }
}

/// Common shape of every signing service response.
pub trait SigningResponse: DeserializeOwned {
    fn status_code(&self) -> &str;
    fn set_status_message(&mut self, message: &str);
}

// ============================================================================
// INPUTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCertInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
}

/// Request to sign one PDF with the user's roaming certificate.
///
/// `signer_xy_page` encodes where the signature is stamped, as expected by
/// the service (e.g. `"100,200,1"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRoamingPdfConfigDInput {
    pub source: String,
    pub dest: String,
    pub signer_xy_page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_value_online: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_value_offline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_bg_size_x: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_bg_size_y: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_text_row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dts_flag: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_server_id: Option<String>,
}

/// Request for a bulk session id grouping several documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBulkInput {
    pub code: String,
    pub success_url: String,
    pub cancel_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
}

/// Request to sign one PDF as part of an existing bulk session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRoamingPdfConfigDBulkInput {
    pub source: String,
    pub dest: String,
    pub signer_xy_page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_value_segment1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_value_segment2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_bg_size_x: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_bg_size_y: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_text_row: Option<u32>,
    pub dts_flag: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub bulk_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_server_id: Option<String>,
}

impl IdentityInput for VerifyCertInput {
    fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }
}

impl IdentityInput for SignRoamingPdfConfigDInput {
    fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    fn file_server_id(&self) -> Option<&str> {
        self.file_server_id.as_deref()
    }
}

impl IdentityInput for RequestBulkInput {
    fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }
}

impl IdentityInput for SignRoamingPdfConfigDBulkInput {
    fn file_server_id(&self) -> Option<&str> {
        self.file_server_id.as_deref()
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRoamingCertResponse {
    pub status_code: String,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub certificate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRoamingPdfConfigDResponse {
    pub status_code: String,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub request_id: String,
    /// Signing page the user is sent to for approval
    #[serde(default)]
    pub sp_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBulkIdResponse {
    pub status_code: String,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub bulk_id: String,
    #[serde(default)]
    pub sp_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRoamingPdfConfigDBulkResponse {
    pub status_code: String,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub request_id: String,
}

macro_rules! impl_signing_response {
    ($($response:ty),+ $(,)?) => {
        $(
            impl SigningResponse for $response {
                fn status_code(&self) -> &str {
                    &self.status_code
                }

                fn set_status_message(&mut self, message: &str) {
                    self.status_message = message.to_string();
                }
            }
        )+
    };
}

impl_signing_response!(
    VerifyRoamingCertResponse,
    SignRoamingPdfConfigDResponse,
    RequestBulkIdResponse,
    SignRoamingPdfConfigDBulkResponse,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inputs_use_wire_field_names() {
        let input = SignRoamingPdfConfigDBulkInput {
            source: "/in/a.pdf".to_string(),
            dest: "/out/a.pdf".to_string(),
            signer_xy_page: "10,20,1".to_string(),
            qr_value_segment1: Some("seg".to_string()),
            qr_bg_size_x: Some(40),
            dts_flag: 1,
            bulk_id: "B-1".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(
            value,
            json!({
                "source": "/in/a.pdf",
                "dest": "/out/a.pdf",
                "signerXyPage": "10,20,1",
                "qrValueSegment1": "seg",
                "qrBgSizeX": 40,
                "dtsFlag": 1,
                "bulkId": "B-1",
            })
        );
    }

    #[test]
    fn test_response_defaults_missing_fields() {
        let response: SignRoamingPdfConfigDResponse =
            serde_json::from_value(json!({ "statusCode": "905" })).unwrap();

        assert_eq!(response.status_code, "905");
        assert_eq!(response.request_id, "");
        assert_eq!(response.sp_url, "");
    }

    #[test]
    fn test_response_requires_status_code() {
        let result: Result<RequestBulkIdResponse, _> =
            serde_json::from_value(json!({ "bulkId": "B-1" }));
        assert!(result.is_err());
    }
}
