//! 📡 The Elasticsearch sink: one POST to `_bulk` per payload, basic auth, NDJSON.
//!
//! It accepts bytes. It reports the status. It does not retry, it does not judge,
//! it does not care whether the cluster liked the documents. A 400 is just a
//! number to log. Only a request that never got an answer is an error. 🦆

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, trace};

use super::{ShipReport, Sink};
use crate::credentials::Credential;

/// 🔗 `https://host/` + `/_bulk` should be `https://host/_bulk`, not `https://host//_bulk`.
pub fn bulk_url(endpoint: &str) -> String {
    format!("{}/_bulk", endpoint.trim_end_matches('/'))
}

/// 📡 Ships bulk payloads to one cluster with one set of credentials, forever.
///
/// Internally holds:
/// - `client`: the HTTP muscle 💪, reused across requests
/// - `bulk_url`: computed once, because the endpoint never changes mid-run
/// - `credential`: basic auth, loaded once at startup
#[derive(Debug)]
pub struct ElasticsearchSink {
    client: reqwest::Client,
    bulk_url: String,
    credential: Credential,
}

impl ElasticsearchSink {
    /// 🚀 Build the client with a 10s connect timeout and the configured request timeout.
    ///
    /// No connectivity ping here: the first bootstrap send is the ping, and its
    /// status gets logged like every other send.
    pub fn new(endpoint: &str, credential: Credential, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(request_timeout)
            .build()
            .context("💀 The HTTP client refused to be born. Probably a TLS stack having a bad day.")?;

        Ok(Self {
            client,
            bulk_url: bulk_url(endpoint),
            credential,
        })
    }
}

#[async_trait]
impl Sink for ElasticsearchSink {
    async fn send(&mut self, mut payload: String) -> Result<ShipReport> {
        // ⚠️ the bulk API wants a newline after EVERY line, the last one included
        payload.push('\n');
        debug!("📡 POST {} ({} bytes)", self.bulk_url, payload.len());

        let response = self
            .client
            .post(&self.bulk_url)
            // ⚠️ application/x-ndjson, not application/json. Elasticsearch notices.
            .header("Content-Type", "application/x-ndjson")
            .basic_auth(&self.credential.username, Some(&self.credential.password))
            .body(payload)
            .send()
            .await
            .with_context(|| {
                format!(
                    "💀 The bulk request to '{}' never got an answer. Check connectivity, DNS, and whether the cluster is awake.",
                    self.bulk_url
                )
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("💀 Elasticsearch answered, then hung up halfway through the body.")?;
        trace!("🚀 bulk request landed with status {}", status);

        Ok(ShipReport::new(status, &body))
    }
}
