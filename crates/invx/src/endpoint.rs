//! 🎯 Endpoint resolution: the one question asked before anything gets shipped.
//! "Where is Elasticsearch?" Either the config already knows, or discovery finds out.

use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::app_config::EndpointConfig;
use crate::credentials::Credential;
use crate::discovery::{CloudClient, resolve_api_key};

/// 🔗 `https://host/` → `https://host`. Only the trailing slash goes.
pub fn normalize_endpoint(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// 🎯 Resolve the Elasticsearch base URL, never ending in `/`.
///
/// Discovery mode needs the API key before it makes a single call, so a missing
/// key fails here with a configuration error and no traffic at all.
pub async fn resolve_endpoint(
    endpoint: &EndpointConfig,
    credential: &Credential,
    probe_timeout: Duration,
) -> Result<String> {
    let url = match endpoint {
        EndpointConfig::Static { url } => url.clone(),
        EndpointConfig::Discovery(cloud) => {
            let api_key = resolve_api_key(cloud.api_key_file.as_deref(), &cloud.api_key_env)?;
            info!("🔭 discovering the Elasticsearch endpoint via {}", cloud.api_base_url);
            CloudClient::new(&cloud.api_base_url, api_key, probe_timeout)?
                .discover_endpoint(credential)
                .await?
        }
    };

    let url = normalize_endpoint(&url);
    info!("🎯 shipping to {}", url);
    Ok(url)
}
