//! 🔌 Backends: where the bytes actually leave the building.
//!
//! 🕳️ A sink takes one fully rendered bulk payload and ships it. That's the job.
//! The scheduler decides *what* to send and *when*; the sink only knows *how*.
//!
//! Two flavors in production, one more in the tests:
//! - [`ElasticsearchSink`]: HTTP POST to `<endpoint>/_bulk`, basic auth, NDJSON.
//! - [`DryRunSink`]: logs the payload and forgets it. Powers `--dry-run`.
//! - `InMemorySink` (tests only): hoards payloads in a Vec so assertions can read them.
//!
//! 🦆 The duck is here because every file must have one. This is law.

use anyhow::Result;
use async_trait::async_trait;

pub(crate) mod dry_run;
pub(crate) mod elasticsearch;
#[cfg(test)]
pub(crate) mod in_mem;

pub use dry_run::DryRunSink;
pub use elasticsearch::ElasticsearchSink;
#[cfg(test)]
pub(crate) use in_mem::InMemorySink;

/// 📬 What came back from one bulk request: the status and the first 200 chars of the body.
///
/// A non-2xx status is NOT an error here. It gets logged and life goes on.
/// Only transport failures (no response at all) bubble up as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipReport {
    pub status: u16,
    pub body_prefix: String,
}

/// ✂️ Response bodies are truncated to this many characters before logging.
pub const BODY_PREFIX_CHARS: usize = 200;

impl ShipReport {
    pub(crate) fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body_prefix: body.chars().take(BODY_PREFIX_CHARS).collect(),
        }
    }
}

/// 🕳️ A sink that sends pre-rendered bulk payloads. Pure I/O, zero logic.
///
/// # Contract 📜
/// - `send` receives `action\ndocument` WITHOUT the trailing newline and is
///   responsible for adding it. The bulk API wants a newline after every line,
///   including the last one.
/// - Transport errors propagate. No retries. Retries are somebody else's sequel.
#[async_trait]
pub trait Sink: std::fmt::Debug {
    /// 📡 Ship one payload, report what the other side said.
    async fn send(&mut self, payload: String) -> Result<ShipReport>;
}

/// 🎭 The many faces of a Sink, so the scheduler never has to know which one it got.
#[derive(Debug)]
pub enum SinkBackend {
    DryRun(DryRunSink),
    Elasticsearch(ElasticsearchSink),
}

#[async_trait]
impl Sink for SinkBackend {
    async fn send(&mut self, payload: String) -> Result<ShipReport> {
        match self {
            SinkBackend::DryRun(sink) => sink.send(payload).await,
            SinkBackend::Elasticsearch(sink) => sink.send(payload).await,
        }
    }
}
