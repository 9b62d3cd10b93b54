use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::{ShipReport, Sink};

/// 🎭 What a dry run pretends Elasticsearch said. Every time. It is very agreeable.
pub(crate) const DRY_RUN_ACK: &str = r#"{"errors":false,"items":[],"dry_run":true}"#;

/// 🧪 The `--dry-run` sink: counts the payload, then lets it go.
///
/// The supervisor already logs every payload it hands over, so keeping a copy
/// here would only grow the heap for as long as the steady loop runs (forever).
#[derive(Debug, Default)]
pub struct DryRunSink {
    sent: u64,
}

impl DryRunSink {
    /// 📊 How many payloads went nowhere so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }
}

#[async_trait]
impl Sink for DryRunSink {
    async fn send(&mut self, payload: String) -> Result<ShipReport> {
        self.sent += 1;
        debug!(
            "🧪 dry run #{}: dropping {} bytes instead of POSTing them",
            self.sent,
            payload.len() + 1
        );
        Ok(ShipReport::new(200, DRY_RUN_ACK))
    }
}
