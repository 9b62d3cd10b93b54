//! 📦 invx: reports a small software inventory and its end-of-life indicators
//! to Elasticsearch, forever, one bulk request at a time.
//!
//! 🔧 Startup order matters: config, credentials, endpoint, sink. Anything that
//! fails before the supervisor starts is fatal and happens before a single
//! document is shipped.

pub mod app_config;
pub mod backends;
pub mod catalog;
pub mod credentials;
pub mod discovery;
pub mod documents;
pub mod endpoint;
pub mod error;
pub mod supervisors;

use anyhow::{Context, Result};
use tracing::info;

use crate::app_config::AppConfig;
use crate::backends::{DryRunSink, ElasticsearchSink, SinkBackend};
use crate::supervisors::Supervisor;

pub use crate::error::InventoryError;

/// 🚀 Load credentials, resolve the endpoint, then bootstrap and ship forever.
pub async fn run(app_config: AppConfig) -> Result<()> {
    app_config.validate()?;
    let credential = credentials::load_credentials(&app_config.credentials_file)?;
    let endpoint = endpoint::resolve_endpoint(
        &app_config.endpoint,
        &credential,
        app_config.runtime.probe_timeout(),
    )
    .await
    .context("💀 Could not figure out where Elasticsearch lives.")?;

    let sink = if app_config.runtime.dry_run {
        info!("🧪 dry run: payloads get logged and dropped, {} is never contacted", endpoint);
        SinkBackend::DryRun(DryRunSink::default())
    } else {
        SinkBackend::Elasticsearch(ElasticsearchSink::new(
            &endpoint,
            credential,
            app_config.runtime.request_timeout(),
        )?)
    };

    Supervisor::new(sink, app_config.catalog, app_config.runtime.interval())?
        .run()
        .await
}

/// 🔭 Resolve and return the endpoint without shipping anything.
pub async fn resolve(app_config: &AppConfig) -> Result<String> {
    app_config.validate()?;
    let credential = credentials::load_credentials(&app_config.credentials_file)?;
    endpoint::resolve_endpoint(
        &app_config.endpoint,
        &credential,
        app_config.runtime.probe_timeout(),
    )
    .await
}
