//! 💀 The two named ways this program gives up before it even starts shipping.
//!
//! Everything else rides around in `anyhow` with a context string attached.
//! These two get names because `main` wants to tell them apart from a flaky
//! network, and tests want to `downcast_ref` them without string-matching. 🦆

use thiserror::Error;

/// 🏷️ Fatal, pre-loop failures. Both end the process with a non-zero exit.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// 🔧 Missing or broken local setup: credentials file, API key, catalog.
    /// No network traffic has happened yet when this fires.
    #[error("💀 configuration error: {0}")]
    Configuration(String),

    /// 📡 The control plane could not tell us where Elasticsearch lives.
    #[error("💀 discovery error: {0}")]
    Discovery(String),
}

impl InventoryError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery(message.into())
    }
}
