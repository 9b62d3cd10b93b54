//! 🎬 *[camera pans across a dimly lit server room]*
//! 🎬 "In a world where software versions expire..."
//! 🎬 "One supervisor dared to report them. Every. Thirty. Seconds."
//! 🎬 *[record scratch]* 🦆
//!
//! 📦 The Supervisor runs a two-state machine:
//!
//! - **Bootstrap**: every threat record, once, in order, one request each.
//!   Whatever comes back gets logged. A transport error ends everything.
//! - **Steady**: software record `i % N`, send, sleep, `i += 1`, forever.
//!   The only exit is somebody killing the process.
//!
//! One logical thread of control. One request in flight, max. The cyclic
//! index lives here and nowhere else.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

use crate::backends::{ShipReport, Sink};
use crate::catalog::Catalog;
use crate::documents::{build_software_document, build_threat_document};
use crate::error::InventoryError;

/// 📦 Owns the sink, the catalogs, and the one counter that matters.
#[derive(Debug)]
pub struct Supervisor<S: Sink> {
    sink: S,
    catalog: Catalog,
    interval: Duration,
}

impl<S: Sink> Supervisor<S> {
    /// 🔍 Refuses a catalog the steady loop can't cycle through.
    pub fn new(sink: S, catalog: Catalog, interval: Duration) -> Result<Self, InventoryError> {
        catalog.validate()?;
        Ok(Self {
            sink,
            catalog,
            interval,
        })
    }

    /// 🚀 Bootstrap, then steady state until the heat death of the universe (or SIGTERM).
    pub async fn run(mut self) -> Result<()> {
        self.bootstrap().await?;
        self.steady(None).await
    }

    /// ⚠️ Ship each threat record exactly once. Returns how many went out.
    pub async fn bootstrap(&mut self) -> Result<usize> {
        info!(
            "⚠️ bootstrap: shipping {} end-of-life indicator(s)",
            self.catalog.threats.len()
        );
        for (position, threat) in self.catalog.threats.iter().enumerate() {
            let payload = build_threat_document(threat, Utc::now())?;
            let report = ship(&mut self.sink, "threat-bootstrap", payload)
                .await
                .with_context(|| {
                    format!(
                        "💀 bootstrap send #{} ({} {}) never got an answer",
                        position + 1,
                        threat.indicator_software,
                        threat.indicator_version
                    )
                })?;
            debug!("⚠️ bootstrap #{} answered {}", position + 1, report.status);
        }
        Ok(self.catalog.threats.len())
    }

    /// 🔄 Round-robin through the software catalog with a nap between sends.
    ///
    /// `limit: None` never returns `Ok`. `Some(n)` stops after `n` sends, without
    /// the trailing nap, which is what tests and one-shot tooling want. `Some(0)`
    /// sends nothing.
    pub async fn steady(&mut self, limit: Option<u64>) -> Result<()> {
        info!(
            "🔄 steady state: {} software record(s), one every {:?}",
            self.catalog.software.len(),
            self.interval
        );
        let mut index: u64 = 0;
        loop {
            if limit.is_some_and(|limit| index >= limit) {
                return Ok(());
            }
            let record = self.catalog.software_at(index).ok_or_else(|| {
                InventoryError::configuration("the software catalog emptied itself mid-run")
            })?;
            let payload = build_software_document(record, Utc::now())?;
            let context = format!(
                "💀 software send #{} ({} {}) never got an answer",
                index + 1,
                record.software,
                record.version
            );
            ship(&mut self.sink, "software", payload)
                .await
                .context(context)?;

            index += 1;
            if limit.is_some_and(|limit| index >= limit) {
                return Ok(());
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// 📤 Send one payload and log it the way an operator tailing the output expects.
async fn ship<S: Sink>(sink: &mut S, kind: &str, payload: String) -> Result<ShipReport> {
    let the_receipt = payload.clone();
    let report = sink.send(payload).await?;
    info!("📤 Sent ({}): {}", kind, the_receipt);
    info!(
        "📬 Status: {}, Response: {}",
        report.status, report.body_prefix
    );
    Ok(report)
}
