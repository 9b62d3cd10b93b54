use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::dry_run::DRY_RUN_ACK;
use super::{ShipReport, Sink};

/// 📦 A sink that never forgets, and never talks to the network. Test-only:
/// it keeps every payload, so it has no business in a loop that never ends.
///
/// Every payload it receives (trailing newline included, exactly as it would
/// have hit the wire) is pushed into a shared Vec. Clone-able so tests can
/// peek inside after handing the sink off to the scheduler. The `Arc` means
/// everyone shares the same Vec.
#[derive(Debug, Default, Clone)]
pub struct InMemorySink {
    pub received: Arc<Mutex<Vec<String>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 📋 Snapshot of everything shipped so far, in order.
    pub async fn payloads(&self) -> Vec<String> {
        self.received.lock().await.clone()
    }
}

#[async_trait]
impl Sink for InMemorySink {
    async fn send(&mut self, mut payload: String) -> Result<ShipReport> {
        payload.push('\n');
        debug!("🧪 stashing {} bytes instead of POSTing them", payload.len());
        self.received.lock().await.push(payload);
        Ok(ShipReport::new(200, DRY_RUN_ACK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn the_one_where_the_sink_remembers_everything_with_newlines() -> Result<()> {
        let sink = InMemorySink::new();
        let mut handed_off = sink.clone();

        handed_off.send("a\nb".to_string()).await?;
        let report = handed_off.send("c\nd".to_string()).await?;

        assert_eq!(report.status, 200);
        assert_eq!(sink.payloads().await, vec!["a\nb\n", "c\nd\n"]);
        Ok(())
    }
}
