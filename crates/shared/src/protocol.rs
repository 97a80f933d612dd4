//! Wire envelopes for the admin backend.
//!
//! The SVC endpoints flag outcomes with `success`; the user listing endpoint
//! flags them with `status` while user mutations reply with `success`. The
//! asymmetry is part of the deployed contract and is kept as-is.

use serde::{Deserialize, Serialize};

use crate::domain::{SvcDraft, SvcId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SvcEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope<T> {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Plain acknowledgement for create/update/delete replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAddSvcRequest {
    pub svcs: Vec<SvcDraft>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAddResults {
    pub successful: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAddSvcResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<BulkAddResults>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteSvcRequest {
    pub ids: Vec<SvcId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteUsersRequest {
    pub ids: Vec<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub deleted_count: u64,
}

/// Slice of the toggle-status reply the console actually consumes; the
/// backend echoes the whole record and extra fields are ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToggleOutcome {
    #[serde(rename = "isActive")]
    pub is_active: bool,
}
