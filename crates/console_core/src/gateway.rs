//! REST access to the admin backend.
//!
//! `SvcDirectory` and `UserDirectory` are the seams the page controllers
//! depend on; `HttpGateway` is the reqwest implementation against the
//! deployed endpoint set. Failures collapse into two tiers: `Transport`
//! (nothing usable came back) and `Rejected` (the server answered with a
//! false success indicator, optionally carrying a reason).

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{SvcDraft, SvcId, SvcRecord, UserId, UserRecord},
    protocol::{
        Ack, BulkAddResults, BulkAddSvcRequest, BulkAddSvcResponse, BulkDeleteResponse,
        BulkDeleteSvcRequest, BulkDeleteUsersRequest, SvcEnvelope, ToggleOutcome, UserEnvelope,
    },
};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The server answered and said no.
    #[error("{}", .message.as_deref().unwrap_or("request rejected by server"))]
    Rejected { message: Option<String> },
    /// No usable response reached the console.
    #[error("Network error occurred")]
    Transport(#[from] reqwest::Error),
}

impl GatewayError {
    fn rejected(message: Option<String>) -> Self {
        Self::Rejected { message }
    }

    /// The string a notice should carry: the server's reason verbatim when
    /// present, the generic network message for transport failures, and the
    /// per-operation fallback otherwise.
    pub fn surface(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
            } => message.clone(),
            Self::Rejected { message: None } => fallback.to_string(),
            Self::Transport(_) => "Network error occurred".to_string(),
        }
    }
}

#[async_trait]
pub trait SvcDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<SvcRecord>, GatewayError>;
    async fn create(&self, draft: &SvcDraft) -> Result<(), GatewayError>;
    async fn bulk_create(&self, drafts: &[SvcDraft]) -> Result<BulkAddResults, GatewayError>;
    async fn fetch(&self, id: &SvcId) -> Result<SvcRecord, GatewayError>;
    async fn update(&self, id: &SvcId, draft: &SvcDraft) -> Result<(), GatewayError>;
    async fn delete(&self, id: &SvcId) -> Result<(), GatewayError>;
    async fn bulk_delete(&self, ids: &[SvcId]) -> Result<u64, GatewayError>;
    /// Flips the record's active flag server-side and returns the new value.
    async fn toggle_status(&self, id: &SvcId) -> Result<bool, GatewayError>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<UserRecord>, GatewayError>;
    async fn delete(&self, id: &UserId) -> Result<(), GatewayError>;
    async fn bulk_delete(&self, ids: &[UserId]) -> Result<u64, GatewayError>;
}

pub struct HttpGateway {
    http: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A reply body that does not parse is treated as a rejection without a
    /// reason so the caller's per-operation fallback message surfaces.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        context: &str,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        response.json().await.map_err(|err| {
            warn!(%status, context, "undecodable reply from backend: {err}");
            GatewayError::rejected(None)
        })
    }
}

fn accept<T>(envelope: SvcEnvelope<T>) -> Result<T, GatewayError> {
    if !envelope.success {
        return Err(GatewayError::rejected(envelope.message));
    }
    envelope.data.ok_or_else(|| GatewayError::rejected(None))
}

fn accept_ack(ack: Ack) -> Result<(), GatewayError> {
    if !ack.success {
        return Err(GatewayError::rejected(ack.message));
    }
    Ok(())
}

#[async_trait]
impl SvcDirectory for HttpGateway {
    async fn list(&self) -> Result<Vec<SvcRecord>, GatewayError> {
        let response = self.http.get(self.url("/api/admin/list-svc")).send().await?;
        let envelope: SvcEnvelope<Vec<SvcRecord>> = Self::decode(response, "list-svc").await?;
        if !envelope.success {
            return Err(GatewayError::rejected(envelope.message));
        }
        Ok(envelope.data.unwrap_or_default())
    }

    async fn create(&self, draft: &SvcDraft) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(self.url("/api/admin/add-svc"))
            .json(draft)
            .send()
            .await?;
        accept_ack(Self::decode(response, "add-svc").await?)
    }

    async fn bulk_create(&self, drafts: &[SvcDraft]) -> Result<BulkAddResults, GatewayError> {
        let response = self
            .http
            .post(self.url("/api/admin/bulk-add-svc"))
            .json(&BulkAddSvcRequest {
                svcs: drafts.to_vec(),
            })
            .send()
            .await?;
        let reply: BulkAddSvcResponse = Self::decode(response, "bulk-add-svc").await?;
        if !reply.success {
            return Err(GatewayError::rejected(reply.message));
        }
        reply.results.ok_or_else(|| GatewayError::rejected(None))
    }

    async fn fetch(&self, id: &SvcId) -> Result<SvcRecord, GatewayError> {
        let response = self
            .http
            .get(self.url(&format!("/api/admin/svc/{id}")))
            .send()
            .await?;
        accept(Self::decode(response, "get-svc").await?)
    }

    async fn update(&self, id: &SvcId, draft: &SvcDraft) -> Result<(), GatewayError> {
        let response = self
            .http
            .put(self.url(&format!("/api/admin/svc/{id}")))
            .json(draft)
            .send()
            .await?;
        accept_ack(Self::decode(response, "update-svc").await?)
    }

    async fn delete(&self, id: &SvcId) -> Result<(), GatewayError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/admin/svc/{id}")))
            .send()
            .await?;
        accept_ack(Self::decode(response, "delete-svc").await?)
    }

    async fn bulk_delete(&self, ids: &[SvcId]) -> Result<u64, GatewayError> {
        let response = self
            .http
            .delete(self.url("/api/admin/bulk-delete-svc"))
            .json(&BulkDeleteSvcRequest { ids: ids.to_vec() })
            .send()
            .await?;
        let reply: BulkDeleteResponse = Self::decode(response, "bulk-delete-svc").await?;
        if !reply.success {
            return Err(GatewayError::rejected(reply.message));
        }
        Ok(reply.deleted_count)
    }

    async fn toggle_status(&self, id: &SvcId) -> Result<bool, GatewayError> {
        let response = self
            .http
            .patch(self.url(&format!("/api/admin/svc/{id}/toggle-status")))
            .send()
            .await?;
        let envelope: SvcEnvelope<ToggleOutcome> = Self::decode(response, "toggle-status").await?;
        accept(envelope).map(|outcome| outcome.is_active)
    }
}

#[async_trait]
impl UserDirectory for HttpGateway {
    async fn list(&self) -> Result<Vec<UserRecord>, GatewayError> {
        let response = self.http.get(self.url("/users")).send().await?;
        let envelope: UserEnvelope<Vec<UserRecord>> = Self::decode(response, "list-users").await?;
        if !envelope.status {
            return Err(GatewayError::rejected(
                envelope.message.or(envelope.error),
            ));
        }
        Ok(envelope.data.unwrap_or_default())
    }

    async fn delete(&self, id: &UserId) -> Result<(), GatewayError> {
        let response = self
            .http
            .delete(self.url(&format!("/users/{id}")))
            .send()
            .await?;
        accept_ack(Self::decode(response, "delete-user").await?)
    }

    async fn bulk_delete(&self, ids: &[UserId]) -> Result<u64, GatewayError> {
        let response = self
            .http
            .delete(self.url("/users/bulk-delete"))
            .json(&BulkDeleteUsersRequest { ids: ids.to_vec() })
            .send()
            .await?;
        let reply: BulkDeleteResponse = Self::decode(response, "bulk-delete-users").await?;
        if !reply.success {
            return Err(GatewayError::rejected(reply.message));
        }
        Ok(reply.deleted_count)
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
