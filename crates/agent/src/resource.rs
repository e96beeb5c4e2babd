//! Client for the cluster resource API.

use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::{AgentError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper over the resource API described in the system boundary:
/// `POST {base}/{resource}`, `GET {base}/{resource}?ns=`,
/// `DELETE {base}/{resource}?ns=&name=`.
#[derive(Clone)]
pub struct ResourceClient {
    base: String,
    client: Client,
}

impl ResourceClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            client: Client::new(),
        }
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), resource)
    }

    /// Submit a manifest. Returns the raw response body; the caller
    /// interprets the `{data, error}` envelope.
    pub async fn create(&self, resource: &str, manifest: &str) -> Result<String> {
        let url = self.resource_url(resource);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({ "yaml": manifest }))
            .send()
            .await?;
        Ok(response.text().await?)
    }

    /// Read resources of one type in a namespace. Returns the raw body.
    pub async fn list(&self, resource: &str, namespace: &str) -> Result<String> {
        let url = self.resource_url(resource);
        debug!("GET {}?ns={}", url, namespace);
        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("ns", namespace)])
            .send()
            .await?;
        Ok(response.text().await?)
    }

    /// Delete one resource instance. Status only, never the body.
    pub async fn delete(&self, resource: &str, namespace: &str, name: &str) -> Result<()> {
        let url = self.resource_url(resource);
        debug!("DELETE {}?ns={}&name={}", url, namespace, name);
        self.client
            .delete(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("ns", namespace), ("name", name)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Boot-time reachability check against `{origin}/health`. Failure here
    /// is the one fatal startup condition.
    pub async fn health(&self) -> Result<()> {
        let mut url = reqwest::Url::parse(&self.base)
            .map_err(|e| AgentError::HealthCheck(e.to_string()))?;
        url.set_path("/health");
        debug!("GET {}", url);
        self.client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
