//! # 🔭 DEPLOYMENT DISCOVERY
//!
//! *Previously, on invx...* somebody had an Elastic Cloud API key, a CSV of
//! credentials, and no idea which of their deployments the CSV belonged to.
//!
//! This module asks the control plane, in order:
//!
//! 1. 📋 "What deployments can this key see?" (`GET /api/v1/deployments`).
//!    Nothing? [`InventoryError::Discovery`], and we stop asking.
//! 2. 🔒 "Which one lets these credentials in?" For each deployment, in listing
//!    order: fetch its detail, pull the Elasticsearch URL, `GET` it with basic
//!    auth. First 200 wins. Any failure for a candidate is shrugged off.
//! 3. 🤷 Nobody let us in? Take the first deployment anyway. Yes, really. It
//!    might be the wrong one. It gets a `warn!` and we move on.
//! 4. 🔗 "Where does the selected one live?" Probe four metadata paths in a
//!    fixed order and take the first URL that falls out of a 200.
//!
//! ## Knowledge Graph 🧠
//! - Every control-plane call carries `Authorization: ApiKey <key>`
//! - Every call has a per-request timeout (10s by default)
//! - `aliased_url` beats `service_url` whenever both show up
//! - The returned endpoint never ends in `/` 🦆

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::credentials::Credential;
use crate::error::InventoryError;

/// 🌐 The public Elastic Cloud control plane.
pub const DEFAULT_API_BASE_URL: &str = "https://api.elastic-cloud.com";

/// 📍 Suffixes tried, in order, under `/api/v1/deployments/{id}/elasticsearch/main-elasticsearch`.
pub const METADATA_PATH_SUFFIXES: [&str; 4] = ["", "/info", "/metadata", "/settings"];

/// 📡 Control-plane settings for discovery mode.
#[derive(Debug, Deserialize, Clone)]
pub struct CloudConfig {
    /// 🌐 Scheme + host of the control plane. Tests point this at a mock server.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// 🔒 Local secret file, consulted first. Raw key, or dotenv-style `NAME=value` lines.
    #[serde(default = "default_api_key_file")]
    pub api_key_file: Option<PathBuf>,
    /// 🔒 Env var holding the key, consulted second (also the key name looked up in the file).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_api_key_file() -> Option<PathBuf> {
    Some(PathBuf::from(".env"))
}

fn default_api_key_env() -> String {
    "EC_API_KEY".to_string()
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key_file: default_api_key_file(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// 🏷️ A deployment as far as discovery cares. Transient. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub id: String,
    pub name: String,
    pub elasticsearch_resource_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeploymentList {
    #[serde(default)]
    deployments: Vec<DeploymentSummary>,
}

#[derive(Debug, Deserialize)]
struct DeploymentSummary {
    id: String,
    #[serde(default)]
    name: String,
}

/// 🔒 Find the control-plane API key: secret file first, then the environment.
///
/// The file may hold the bare key, or `NAME=value` lines where `NAME` is `env_var`.
/// A missing file is not an error by itself; missing from both places is.
pub fn resolve_api_key(key_file: Option<&Path>, env_var: &str) -> Result<String> {
    resolve_api_key_from(key_file, env_var, std::env::var(env_var).ok())
}

/// 🔒 [`resolve_api_key`] with the environment value already looked up.
pub fn resolve_api_key_from(
    key_file: Option<&Path>,
    env_var: &str,
    env_value: Option<String>,
) -> Result<String> {
    if let Some(path) = key_file {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                if let Some(key) = api_key_from_secret_file(&contents, env_var) {
                    debug!("🔒 API key loaded from '{}'", path.display());
                    return Ok(key);
                }
                debug!("🔒 '{}' exists but has no usable API key", path.display());
            }
            Err(err) => debug!("🔒 no API key file at '{}': {}", path.display(), err),
        }
    }

    match env_value {
        Some(key) if !key.trim().is_empty() => {
            debug!("🔒 API key loaded from ${}", env_var);
            Ok(key.trim().to_string())
        }
        _ => Err(InventoryError::configuration(format!(
            "no control-plane API key found in {} or in the ${} environment variable",
            key_file
                .map(|p| format!("'{}'", p.display()))
                .unwrap_or_else(|| "a secret file".to_string()),
            env_var
        ))
        .into()),
    }
}

fn api_key_from_secret_file(contents: &str, env_var: &str) -> Option<String> {
    let mut bare_key = None;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((name, value)) => {
                let name = name.trim().trim_start_matches("export ").trim();
                if name == env_var {
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
            None if bare_key.is_none() => bare_key = Some(line.to_string()),
            None => {}
        }
    }
    bare_key
}

fn url_from_metadata(metadata: &Value) -> Option<String> {
    ["aliased_url", "service_url"].iter().find_map(|field| {
        metadata
            .get(*field)
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
    })
}

/// 🔗 Pull the Elasticsearch URL out of a deployment (or resource) document.
///
/// Looks at `resources.elasticsearch[0].info.metadata` first. When there is no
/// nested resource list, falls back to the top-level `info.metadata`, then to a
/// bare top-level `metadata`. In every spot `aliased_url` beats `service_url`.
pub fn extract_elasticsearch_url(document: &Value) -> Option<String> {
    let nested = document
        .pointer("/resources/elasticsearch")
        .and_then(Value::as_array)
        .and_then(|resources| resources.first())
        .and_then(|resource| resource.pointer("/info/metadata"))
        .and_then(url_from_metadata);

    nested
        .or_else(|| document.pointer("/info/metadata").and_then(url_from_metadata))
        .or_else(|| document.get("metadata").and_then(url_from_metadata))
}

/// 📡 A thin client for the control plane, plus the basic-auth probe used for matching.
#[derive(Debug)]
pub struct CloudClient {
    client: reqwest::Client,
    api_base_url: String,
    api_key: String,
}

impl CloudClient {
    pub fn new(api_base_url: &str, api_key: String, probe_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(probe_timeout)
            .build()
            .context("💀 The control-plane HTTP client refused to be born.")?;
        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// 📡 `GET <api_base_url><path>` with the ApiKey header. Returns the status and the body.
    async fn get(&self, path: &str) -> Result<(u16, String)> {
        let url = format!("{}{}", self.api_base_url, path);
        debug!("📡 GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("ApiKey {}", self.api_key))
            .send()
            .await
            .with_context(|| format!("💀 control plane did not answer GET {}", url))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("💀 control plane dropped the body of GET {}", url))?;
        Ok((status, body))
    }

    /// 📋 Every deployment this key can see, in listing order. Empty is a [`InventoryError::Discovery`].
    pub async fn list_deployments(&self) -> Result<Vec<Deployment>> {
        let (status, body) = self.get("/api/v1/deployments").await.map_err(|err| {
            InventoryError::discovery(format!("listing deployments failed: {:#}", err))
        })?;
        if status != 200 {
            return Err(InventoryError::discovery(format!(
                "listing deployments returned HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ))
            .into());
        }

        let listing: DeploymentList = serde_json::from_str(&body).map_err(|err| {
            InventoryError::discovery(format!("deployment listing is not the JSON we expected: {}", err))
        })?;
        if listing.deployments.is_empty() {
            return Err(InventoryError::discovery(
                "the API key can see zero deployments, nothing to report to",
            )
            .into());
        }

        Ok(listing
            .deployments
            .into_iter()
            .map(|summary| Deployment {
                id: summary.id,
                name: summary.name,
                elasticsearch_resource_url: None,
            })
            .collect())
    }

    /// 🔍 Fetch one deployment's detail and fill in its Elasticsearch URL, if it has one.
    pub async fn deployment_detail(&self, deployment: &Deployment) -> Result<Deployment> {
        let (status, body) = self
            .get(&format!("/api/v1/deployments/{}", deployment.id))
            .await?;
        if status != 200 {
            anyhow::bail!(
                "💀 detail for deployment '{}' returned HTTP {}",
                deployment.id,
                status
            );
        }
        let document: Value = serde_json::from_str(&body)
            .with_context(|| format!("💀 detail for deployment '{}' is not JSON", deployment.id))?;
        let name = document
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| deployment.name.clone());

        Ok(Deployment {
            id: deployment.id.clone(),
            name,
            elasticsearch_resource_url: extract_elasticsearch_url(&document),
        })
    }

    /// 🔒 Does `url` answer 200 to these credentials? Any failure at all is a "no".
    async fn credentials_open(&self, url: &str, credential: &Credential) -> bool {
        match self
            .client
            .get(url)
            .basic_auth(&credential.username, Some(&credential.password))
            .send()
            .await
        {
            Ok(response) => response.status().as_u16() == 200,
            Err(err) => {
                debug!("🔒 credential probe against '{}' failed: {}", url, err);
                false
            }
        }
    }

    /// 🎯 The first deployment whose Elasticsearch lets `credential` in, else the first one listed.
    ///
    /// Every failure along the way (detail fetch, missing URL, refused probe)
    /// is swallowed and counts as "not this one".
    pub async fn select_deployment(
        &self,
        deployments: &[Deployment],
        credential: &Credential,
    ) -> Result<Deployment> {
        let first = deployments
            .first()
            .ok_or_else(|| InventoryError::discovery("no deployments to choose from"))?;

        for candidate in deployments {
            let detailed = match self.deployment_detail(candidate).await {
                Ok(detailed) => detailed,
                Err(err) => {
                    debug!("🤷 skipping deployment '{}': {:#}", candidate.id, err);
                    continue;
                }
            };
            let Some(ref url) = detailed.elasticsearch_resource_url else {
                debug!("🤷 deployment '{}' has no Elasticsearch URL", candidate.id);
                continue;
            };
            if self.credentials_open(url, credential).await {
                info!(
                    "🎯 credentials match deployment '{}' ({})",
                    detailed.name, detailed.id
                );
                return Ok(detailed);
            }
        }

        warn!(
            "⚠️ no deployment accepted the credentials, falling back to the first one listed: '{}' ({})",
            first.name, first.id
        );
        Ok(first.clone())
    }

    /// 🔗 Probe the metadata paths for `deployment_id` until one of them yields a URL.
    pub async fn resolve_endpoint_url(&self, deployment_id: &str) -> Result<String> {
        for suffix in METADATA_PATH_SUFFIXES {
            let path = format!(
                "/api/v1/deployments/{}/elasticsearch/main-elasticsearch{}",
                deployment_id, suffix
            );
            let (status, body) = match self.get(&path).await {
                Ok(answer) => answer,
                Err(err) => {
                    warn!("⚠️ metadata probe {} failed: {:#}", path, err);
                    continue;
                }
            };
            if status != 200 {
                warn!("⚠️ metadata probe {} returned HTTP {}", path, status);
                continue;
            }
            let document: Value = match serde_json::from_str(&body) {
                Ok(document) => document,
                Err(err) => {
                    warn!("⚠️ metadata probe {} returned non-JSON: {}", path, err);
                    continue;
                }
            };
            match extract_elasticsearch_url(&document) {
                Some(url) => {
                    info!("🔗 resolved Elasticsearch endpoint {} via {}", url, path);
                    return Ok(url);
                }
                None => warn!("⚠️ metadata probe {} had no aliased_url or service_url", path),
            }
        }

        Err(InventoryError::discovery(format!(
            "none of the {} metadata paths for deployment '{}' produced an Elasticsearch URL",
            METADATA_PATH_SUFFIXES.len(),
            deployment_id
        ))
        .into())
    }

    /// 🔭 The whole show: list, match, fall back, resolve.
    pub async fn discover_endpoint(&self, credential: &Credential) -> Result<String> {
        let deployments = self.list_deployments().await?;
        info!("📋 control plane lists {} deployment(s)", deployments.len());
        let selected = self.select_deployment(&deployments, credential).await?;
        self.resolve_endpoint_url(&selected.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{any, basic_auth, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const THE_KEY: &str = "sekrit-api-key";

    fn the_usual_suspect() -> Credential {
        Credential {
            username: "elastic".to_string(),
            password: "changeme".to_string(),
        }
    }

    fn cloud(server: &MockServer) -> CloudClient {
        CloudClient::new(&server.uri(), THE_KEY.to_string(), Duration::from_secs(5))
            .expect("💀 client should build")
    }

    fn assert_discovery_error(err: &anyhow::Error) {
        assert!(
            matches!(
                err.downcast_ref::<InventoryError>(),
                Some(InventoryError::Discovery(_))
            ),
            "wrong error flavor: {err:#}"
        );
    }

    fn detail_with_url(id: &str, url: &str) -> Value {
        json!({
            "id": id,
            "name": format!("{id}-name"),
            "resources": {
                "elasticsearch": [
                    { "ref_id": "main-elasticsearch", "info": { "metadata": { "service_url": url } } }
                ]
            }
        })
    }

    async fn mount_listing(server: &MockServer, ids: &[&str]) {
        let deployments: Vec<Value> = ids
            .iter()
            .map(|id| json!({ "id": id, "name": format!("{id}-name") }))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/v1/deployments"))
            .and(header("Authorization", format!("ApiKey {THE_KEY}").as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "deployments": deployments })),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn the_one_where_aliased_beats_service() {
        let doc = json!({
            "resources": { "elasticsearch": [ { "info": { "metadata": {
                "aliased_url": "https://pretty.es.io:443/",
                "service_url": "https://ugly-uuid.es.io:443"
            } } } ] }
        });
        assert_eq!(
            extract_elasticsearch_url(&doc).as_deref(),
            Some("https://pretty.es.io:443")
        );
    }

    #[test]
    fn the_one_where_there_is_no_nested_list_so_top_level_it_is() {
        let doc = json!({ "info": { "metadata": { "service_url": "https://top.es.io" } } });
        assert_eq!(
            extract_elasticsearch_url(&doc).as_deref(),
            Some("https://top.es.io")
        );

        let bare = json!({ "metadata": { "aliased_url": "https://bare.es.io" } });
        assert_eq!(
            extract_elasticsearch_url(&bare).as_deref(),
            Some("https://bare.es.io")
        );

        assert_eq!(extract_elasticsearch_url(&json!({ "id": "x" })), None);
    }

    #[test]
    fn the_one_where_the_secret_file_speaks_dotenv() {
        let contents = "# comment\nOTHER=nope\nexport EC_API_KEY=\"abc123\"\n";
        assert_eq!(
            api_key_from_secret_file(contents, "EC_API_KEY").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn the_one_where_the_secret_file_is_just_the_key() {
        assert_eq!(
            api_key_from_secret_file("\n  raw-key-xyz  \n", "EC_API_KEY").as_deref(),
            Some("raw-key-xyz")
        );
    }

    #[test]
    fn the_one_where_the_file_wins_over_the_environment() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "EC_API_KEY=from-file")?;

        let key = resolve_api_key_from(
            Some(file.path()),
            "EC_API_KEY",
            Some("from-env".to_string()),
        )?;
        assert_eq!(key, "from-file");
        Ok(())
    }

    #[test]
    fn the_one_where_the_environment_covers_for_a_missing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;

        let key = resolve_api_key_from(
            Some(dir.path().join("missing").as_path()),
            "EC_API_KEY",
            Some("  from-env \n".to_string()),
        )?;
        assert_eq!(key, "from-env");
        Ok(())
    }

    #[test]
    fn the_one_where_a_blank_environment_value_does_not_count() {
        let err = resolve_api_key_from(None, "EC_API_KEY", Some("   ".to_string()))
            .expect_err("💀 a blank key should not pass");
        assert!(matches!(
            err.downcast_ref::<InventoryError>(),
            Some(InventoryError::Configuration(_))
        ));
    }

    #[test]
    fn the_one_where_the_key_is_nowhere_to_be_found() {
        let err = resolve_api_key_from(None, "EC_API_KEY", None)
            .expect_err("💀 no key should be a configuration error");
        assert!(matches!(
            err.downcast_ref::<InventoryError>(),
            Some(InventoryError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn the_one_where_zero_deployments_ends_the_conversation() {
        let server = MockServer::start().await;
        mount_listing(&server, &[]).await;
        // -- 🚫 anything else the client dares to ask for is a test failure
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let err = cloud(&server)
            .discover_endpoint(&the_usual_suspect())
            .await
            .expect_err("💀 zero deployments should fail discovery");
        assert_discovery_error(&err);
    }

    #[tokio::test]
    async fn the_one_where_the_credentials_pick_the_right_deployment() -> Result<()> {
        let server = MockServer::start().await;
        let client = cloud(&server);
        mount_listing(&server, &["dep-a", "dep-b"]).await;

        for id in ["dep-a", "dep-b"] {
            Mock::given(method("GET"))
                .and(path(format!("/api/v1/deployments/{id}")))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(detail_with_url(id, &format!("{}/es-{id}", server.uri()))),
                )
                .mount(&server)
                .await;
        }
        // -- 🔒 dep-a turns the credentials away, dep-b lets them in
        Mock::given(method("GET"))
            .and(path("/es-dep-a"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/es-dep-b"))
            .and(basic_auth("elastic", "changeme"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let deployments = client.list_deployments().await?;
        let selected = client
            .select_deployment(&deployments, &the_usual_suspect())
            .await?;

        assert_eq!(selected.id, "dep-b");
        assert_eq!(selected.name, "dep-b-name");
        Ok(())
    }

    #[tokio::test]
    async fn the_one_where_nobody_matches_and_first_place_wins_by_default() -> Result<()> {
        let server = MockServer::start().await;
        let client = cloud(&server);
        mount_listing(&server, &["dep-first", "dep-second"]).await;
        // -- 💀 detail fetches all fail; every candidate is silently skipped
        Mock::given(method("GET"))
            .and(path("/api/v1/deployments/dep-first"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/deployments/dep-second"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let deployments = client.list_deployments().await?;
        let selected = client
            .select_deployment(&deployments, &the_usual_suspect())
            .await?;

        assert_eq!(selected.id, "dep-first");
        Ok(())
    }

    #[tokio::test]
    async fn the_one_where_the_fourth_metadata_path_is_the_charm() -> Result<()> {
        let server = MockServer::start().await;
        let base = "/api/v1/deployments/dep-x/elasticsearch/main-elasticsearch";
        for suffix in ["", "/info", "/metadata"] {
            Mock::given(method("GET"))
                .and(path(format!("{base}{suffix}")))
                .respond_with(ResponseTemplate::new(404))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path(format!("{base}/settings")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "info": { "metadata": { "aliased_url": "https://fourth.es.io/" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = cloud(&server).resolve_endpoint_url("dep-x").await?;

        assert_eq!(url, "https://fourth.es.io");
        Ok(())
    }

    #[tokio::test]
    async fn the_one_where_every_metadata_path_comes_up_empty() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(404))
            .expect(4)
            .mount(&server)
            .await;

        let err = cloud(&server)
            .resolve_endpoint_url("dep-nope")
            .await
            .expect_err("💀 four 404s should fail discovery");
        assert_discovery_error(&err);
    }

    #[tokio::test]
    async fn the_one_where_the_whole_show_runs_end_to_end() -> Result<()> {
        let server = MockServer::start().await;
        mount_listing(&server, &["only-one"]).await;
        Mock::given(method("GET"))
            .and(path("/api/v1/deployments/only-one"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(detail_with_url("only-one", &format!("{}/es", server.uri()))),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/es"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(
                "/api/v1/deployments/only-one/elasticsearch/main-elasticsearch",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "info": { "metadata": {
                    "aliased_url": "https://inventory.es.io:443",
                    "service_url": "https://abc123.es.io:443"
                } }
            })))
            .mount(&server)
            .await;

        let url = cloud(&server).discover_endpoint(&the_usual_suspect()).await?;

        assert_eq!(url, "https://inventory.es.io:443");
        Ok(())
    }

    #[tokio::test]
    async fn the_one_where_a_candidate_that_refuses_connections_is_skipped() -> Result<()> {
        let server = MockServer::start().await;
        let client = cloud(&server);
        mount_listing(&server, &["dep-dark", "dep-lit"]).await;

        // -- 💀 a port the OS handed out and nobody listens on anymore
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let the_dark_url = format!("http://{}", listener.local_addr()?);
        drop(listener);

        Mock::given(method("GET"))
            .and(path("/api/v1/deployments/dep-dark"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(detail_with_url("dep-dark", &the_dark_url)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/deployments/dep-lit"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(detail_with_url("dep-lit", &format!("{}/es-lit", server.uri()))),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/es-lit"))
            .and(basic_auth("elastic", "changeme"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let deployments = client.list_deployments().await?;
        let selected = client
            .select_deployment(&deployments, &the_usual_suspect())
            .await?;

        assert_eq!(selected.id, "dep-lit");
        Ok(())
    }
}
