//! Snapshot transport
//!
//! Every save is a POST with a JSON body. Only `200 OK` counts as success;
//! any other status, a request that never completes, or a body that is not
//! JSON all surface as [`SyncError`].

use crate::error::SyncError;
use async_trait::async_trait;
use liftlog_core::GroupSnapshot;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Longest server error body kept in a `SyncError`
const MAX_DETAIL_LEN: usize = 512;

/// Sends group snapshots to server endpoints
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `snapshot` as JSON to `endpoint` and return the parsed response
    async fn post(&self, endpoint: &str, snapshot: &GroupSnapshot) -> Result<Value, SyncError>;
}

/// HTTP transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the server at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Transport(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, endpoint: &str, snapshot: &GroupSnapshot) -> Result<Value, SyncError> {
        let response = self.client.post(self.url(endpoint)).json(snapshot).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let mut detail = response.text().await.unwrap_or_default();
            truncate_detail(&mut detail);
            return Err(SyncError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SyncError::InvalidResponse(e.to_string()))
    }
}

fn truncate_detail(detail: &mut String) {
    if detail.len() <= MAX_DETAIL_LEN {
        return;
    }
    let mut cut = MAX_DETAIL_LEN;
    while !detail.is_char_boundary(cut) {
        cut -= 1;
    }
    detail.truncate(cut);
}

/// Send a group's full snapshot to `endpoint`
pub async fn send_update(
    transport: &dyn Transport,
    endpoint: &str,
    snapshot: &GroupSnapshot,
) -> Result<Value, SyncError> {
    debug!("POST {} ({} fields)", endpoint, snapshot.len());
    transport.post(endpoint, snapshot).await
}
