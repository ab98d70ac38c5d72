//! HTTP gateway to the shared-memory backend
//!
//! Every MCP tool call maps to exactly one request against the backend's
//! fixed REST surface (`/memory/add`, `/memory/search`, ...). The backend's
//! JSON bodies are passed through opaquely; only transport and status
//! handling happen here.

use crate::config::Settings;
use crate::error::{MembridgeError, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Client for the shared-memory HTTP backend
pub struct BackendClient {
    settings: Settings,
    client: reqwest::Client,
}

impl BackendClient {
    /// Create a new backend client from gateway settings
    pub fn new(settings: Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self { settings, client })
    }

    /// Base URL the gateway targets
    pub fn backend_url(&self) -> &str {
        &self.settings.backend_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.backend_url, path)
    }

    /// `POST /memory/add` with the entire tool input as the request body
    pub async fn add_memory(&self, input: &Value) -> Result<Value> {
        debug!("POST /memory/add");
        let response = self
            .client
            .post(self.url("/memory/add"))
            .json(input)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// `GET /memory/search?query=&limit=`
    pub async fn search_memory(&self, query: &str, limit: u64) -> Result<Value> {
        debug!("GET /memory/search query={:?} limit={}", query, limit);
        let response = self
            .client
            .get(self.url("/memory/search"))
            .query(&[("query", query), ("limit", &limit.to_string())])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// `GET /memory/list?project=&limit=`; `project` is omitted when absent
    pub async fn list_memories(&self, project: Option<&str>, limit: u64) -> Result<Value> {
        debug!("GET /memory/list project={:?} limit={}", project, limit);
        let mut params: Vec<(&str, String)> = Vec::with_capacity(2);
        if let Some(project) = project {
            params.push(("project", project.to_string()));
        }
        params.push(("limit", limit.to_string()));

        let response = self
            .client
            .get(self.url("/memory/list"))
            .query(&params)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// `PUT /memory/update/{id}` with the remaining update fields as body
    pub async fn update_memory(&self, id: &str, body: &Value) -> Result<Value> {
        debug!("PUT /memory/update/{}", id);
        let response = self
            .client
            .put(self.url(&format!("/memory/update/{}", id)))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// `DELETE /memory/delete/{id}`, no body
    pub async fn delete_memory(&self, id: &str) -> Result<Value> {
        debug!("DELETE /memory/delete/{}", id);
        let response = self
            .client
            .delete(self.url(&format!("/memory/delete/{}", id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// `GET /` health document (used by the `status` command)
    pub async fn health(&self) -> Result<Value> {
        let response = self.client.get(self.url("/")).send().await?;
        Self::decode(response).await
    }

    /// `GET /memory/stats` (used by the `status` command)
    pub async fn stats(&self) -> Result<Value> {
        let response = self.client.get(self.url("/memory/stats")).send().await?;
        Self::decode(response).await
    }

    /// Decode a backend response, mapping non-2xx statuses to errors.
    ///
    /// The backend reports failures as `{"detail": "..."}`; when that field
    /// is present its text becomes the error message verbatim, otherwise the
    /// raw body (or the bare status) is used.
    async fn decode(response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("HTTP {}", status.as_u16())
                } else {
                    body
                }
            });

        Err(MembridgeError::Backend {
            status: status.as_u16(),
            detail,
        })
    }
}
